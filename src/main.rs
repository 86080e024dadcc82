/// Headless front end
/// Renders the demo scene a number of times, reports timings and optionally
/// writes the last frame to a PNG file
use micropolygon_engine::*;
use mimalloc::MiMalloc;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "\
usage: micropolygon_engine [options]
  --width <px>        output width (default 640)
  --height <px>       output height (default 480)
  --factor <1|2|4>    sub-samples per pixel axis (default 4)
  --filter <px>       resolve filter width in pixels (default 3.0)
  --size <px>         target micropolygon size in pixels (default 128)
  --frames <n>        frames to render (default 1)
  --motion            blur the quad along a diagonal sweep
  --out <file.png>    write the last frame as PNG";

struct Options {
    width: usize,
    height: usize,
    config: RasterizerConfig,
    micropolygon_size: f32,
    frames: u32,
    motion: bool,
    out: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            config: RasterizerConfig::default(),
            micropolygon_size: DEFAULT_MICROPOLYGON_SIZE,
            frames: 1,
            motion: false,
            out: None,
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("invalid value for {}: {}", flag, value))
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<Options, String> {
    let mut options = Options::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => options.width = parse_value(&arg, args.next())?,
            "--height" => options.height = parse_value(&arg, args.next())?,
            "--factor" => {
                let samples: u32 = parse_value(&arg, args.next())?;
                options.config.multisample_factor = MultisampleFactor::from_samples(samples)
                    .ok_or_else(|| format!("unsupported multisample factor {} (use 1, 2 or 4)", samples))?;
            }
            "--filter" => options.config.filter_width = parse_value(&arg, args.next())?,
            "--size" => {
                let size: f32 = parse_value(&arg, args.next())?;
                if !(size > 0.0) {
                    return Err(format!("micropolygon size must be positive, got {}", size));
                }
                options.micropolygon_size = size;
            }
            "--frames" => options.frames = parse_value(&arg, args.next())?,
            "--motion" => options.motion = true,
            "--out" => options.out = Some(PathBuf::from(parse_value::<String>(&arg, args.next())?)),
            "-h" | "--help" => return Err(String::new()),
            other => return Err(format!("unknown argument: {}", other)),
        }
    }

    if options.width == 0 || options.height == 0 {
        return Err("output size must be non-zero".to_string());
    }
    Ok(options)
}

fn write_png(path: &Path, framebuffer: &Framebuffer) -> Result<(), Box<dyn std::error::Error>> {
    micropolygon_engine::perf_scope!("write_png");
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(
        BufWriter::new(file),
        framebuffer.width as u32,
        framebuffer.height as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_source_gamma(png::ScaledFloat::new(1.0 / 2.2));

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&framebuffer.to_rgba8())?;
    Ok(())
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(message) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };

    println!("=== Micropolygon Engine - Software Rasterizer ===");
    println!(
        "{}x{}, supersample factor {}, filter width {:.2}, micropolygon size {:.1}{}",
        options.width,
        options.height,
        options.config.multisample_factor.samples(),
        options.config.filter_width,
        options.micropolygon_size,
        if options.motion { ", motion blur" } else { "" }
    );

    let scene = if options.motion {
        Scene::demo_motion_blurred()
    } else {
        Scene::demo()
    };
    let renderer = SceneRenderer::with_micropolygon_size(options.micropolygon_size);
    let mut rasterizer = SoftwareRasterizer::new(options.width, options.height, options.config);
    let mut framebuffer = Framebuffer::new(options.width, options.height);
    let mut stats = PerfStats::new();

    FUNCTION_COUNTERS.reset();
    for frame in 0..options.frames {
        let frame_stats = rasterizer.render_frame(&renderer, &scene, framebuffer.color_buffer_mut());
        stats.record_frame(frame_stats.rasterize, frame_stats.resolve);

        if frame == 0 {
            println!(
                "Diced {} quad(s) into {} micropolygons ({} skipped)",
                frame_stats.dice.quads_diced,
                frame_stats.dice.micropolygons,
                frame_stats.dice.quads_skipped
            );
        }
    }

    stats.print_summary();
    if cfg!(feature = "profiling") {
        FUNCTION_COUNTERS.snapshot().print_report();
    }

    if let Some(path) = &options.out {
        if let Err(err) = write_png(path, &framebuffer) {
            eprintln!("error: failed to write {}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
        println!("Wrote {}", path.display());
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_match_the_demo_settings() {
        let options = parse_args(args(&[])).unwrap();
        assert_eq!((options.width, options.height), (640, 480));
        assert_eq!(options.config, RasterizerConfig::default());
        assert_eq!(options.micropolygon_size, DEFAULT_MICROPOLYGON_SIZE);
        assert!(!options.motion);
    }

    #[test]
    fn flags_are_parsed() {
        let options = parse_args(args(&[
            "--width", "320", "--factor", "2", "--filter", "1.5", "--size", "8", "--motion", "--out",
            "frame.png",
        ]))
        .unwrap();
        assert_eq!(options.width, 320);
        assert_eq!(options.config.multisample_factor, MultisampleFactor::X2);
        assert_eq!(options.config.filter_width, 1.5);
        assert_eq!(options.micropolygon_size, 8.0);
        assert!(options.motion);
        assert_eq!(options.out, Some(PathBuf::from("frame.png")));
    }

    #[test]
    fn bad_factor_and_unknown_flags_are_rejected() {
        assert!(parse_args(args(&["--factor", "3"])).is_err());
        assert!(parse_args(args(&["--size", "0"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
        assert!(parse_args(args(&["--width"])).is_err());
    }
}
