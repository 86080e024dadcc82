/// CPU micropolygon rasterizer
/// Static and motion-blurred sampling into a shared supersample buffer,
/// followed by one box-filtered resolve per frame
use super::edge_equations::EdgeEquations;
use super::filter;
use super::jitter::{JitterTable, MultisampleFactor};
use super::micropolygon::{BlurredMicropolygon, MicropolygonArena, PixelBounds, StaticMicropolygon};
use super::rasterizer::GridRasterizer;
use super::supersample::SupersampleBuffer;
use crate::dicing::{DiceStats, SceneRenderer};
use crate::geometry::Grid;
use crate::scene::Scene;
use glam::{Mat4, Vec2, Vec3};
use std::time::{Duration, Instant};

/// Software rasterizer settings.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RasterizerConfig {
    /// Sub-samples per pixel axis.
    pub multisample_factor: MultisampleFactor,
    /// Resolve filter width in output pixels. Values below the pixel
    /// footprint (1.0) discard samples; 1.0 to 3.0 is typical.
    pub filter_width: f32,
}

impl Default for RasterizerConfig {
    fn default() -> Self {
        Self {
            multisample_factor: MultisampleFactor::X4,
            filter_width: 3.0,
        }
    }
}

impl RasterizerConfig {
    /// Build from a raw sub-sample count.
    ///
    /// # Panics
    /// If `samples` is not 1, 2 or 4.
    pub fn with_samples(samples: u32, filter_width: f32) -> Self {
        let multisample_factor = MultisampleFactor::from_samples(samples)
            .unwrap_or_else(|| panic!("unsupported multisample factor {}, expected 1, 2 or 4", samples));
        Self {
            multisample_factor,
            filter_width,
        }
    }
}

/// What one call to [`SoftwareRasterizer::render_frame`] did.
#[derive(Copy, Clone, Debug, Default)]
pub struct FrameStats {
    pub dice: DiceStats,
    /// Buffer clear, dicing and sampling.
    pub rasterize: Duration,
    pub resolve: Duration,
}

pub struct SoftwareRasterizer {
    width: usize,
    height: usize,
    config: RasterizerConfig,
    buffer: SupersampleBuffer,
    jitter: JitterTable,
    // Scratch micropolygons, reused between grids.
    arena: MicropolygonArena,
}

impl SoftwareRasterizer {
    pub fn new(width: usize, height: usize, config: RasterizerConfig) -> Self {
        Self {
            width,
            height,
            config,
            buffer: SupersampleBuffer::new(width, height, config.multisample_factor),
            jitter: JitterTable::new(config.multisample_factor),
            arena: MicropolygonArena::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn config(&self) -> &RasterizerConfig {
        &self.config
    }

    /// Change the output resolution. The supersample buffer follows at the
    /// start of the next frame.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    pub fn set_config(&mut self, config: RasterizerConfig) {
        self.config = config;
    }

    pub fn set_multisample_factor(&mut self, factor: MultisampleFactor) {
        self.config.multisample_factor = factor;
    }

    pub fn set_filter_width(&mut self, filter_width: f32) {
        self.config.filter_width = filter_width;
    }

    pub fn supersample_buffer(&self) -> &SupersampleBuffer {
        &self.buffer
    }

    pub fn supersample_buffer_mut(&mut self) -> &mut SupersampleBuffer {
        &mut self.buffer
    }

    pub fn jitter_table(&self) -> &JitterTable {
        &self.jitter
    }

    /// Bring the buffer and the jitter table in line with the current size
    /// and configuration.
    fn prepare(&mut self) {
        let factor = self.config.multisample_factor;
        self.buffer.ensure(self.width, self.height, factor);
        if self.jitter.factor() != factor {
            self.jitter = JitterTable::new(factor);
        }
    }

    /// Start a frame: apply pending size/config changes and clear the
    /// supersample buffer. Every grid of the frame then accumulates into it.
    pub fn begin_frame(&mut self) {
        self.prepare();
        self.buffer.clear();
        crate::count_call!(crate::perf::FUNCTION_COUNTERS.frames_begun);
    }

    /// Filter the supersample buffer down into `target`, overwriting every
    /// pixel.
    ///
    /// # Panics
    /// If `target` does not hold exactly `width * height` pixels.
    pub fn resolve(&self, target: &mut [u32]) {
        filter::downsample(&self.buffer, self.config.filter_width, target);
        crate::count_call!(crate::perf::FUNCTION_COUNTERS.frames_resolved);
    }

    /// Render a complete frame of `scene` into `target`.
    pub fn render_frame(
        &mut self,
        renderer: &SceneRenderer,
        scene: &Scene,
        target: &mut [u32],
    ) -> FrameStats {
        let start = Instant::now();
        self.begin_frame();
        let (width, height) = (self.width, self.height);
        let dice = renderer.render(scene, self, width, height);
        let rasterize = start.elapsed();

        let resolve_start = Instant::now();
        self.resolve(target);

        FrameStats {
            dice,
            rasterize,
            resolve: resolve_start.elapsed(),
        }
    }

    /// Sample a grid that does not move during the frame.
    pub fn rasterize_grid_static(&mut self, grid: &Grid) {
        self.prepare();

        let f = self.config.multisample_factor.samples();
        let target_w = (self.width * f) as i32;
        let target_h = (self.height * f) as i32;
        let scale = Vec2::new((self.width * f) as f32, (self.height * f) as f32);
        let transform = grid.transform();

        // Setup pass.
        self.arena.reserve_static(grid.micropolygon_count());
        for y in 0..grid.polys_y() {
            for x in 0..grid.polys_x() {
                let corners = grid.cell_corners(x, y);
                let pixels = corners.map(|v| ndc_to_pixel(project(transform, v.position), scale));

                let bounds = PixelBounds::conservative(&pixels);
                if bounds.is_off_target(target_w, target_h) {
                    crate::count_call!(crate::perf::FUNCTION_COUNTERS.micropolygons_off_target);
                    continue;
                }

                self.arena.static_polys.push(StaticMicropolygon {
                    edges: EdgeEquations::from_corners(&pixels),
                    bounds: bounds.clamp_to_target(target_w, target_h),
                    color: corners[0].color,
                });
            }
        }
        crate::count_add!(crate::perf::FUNCTION_COUNTERS.micropolygons_setup, self.arena.static_polys.len());

        // Sampling pass.
        let Self {
            buffer,
            jitter,
            arena,
            ..
        } = self;
        for poly in &arena.static_polys {
            let b = poly.bounds;
            crate::count_add!(crate::perf::FUNCTION_COUNTERS.samples_tested, b.area());
            for sy in b.y_min..=b.y_max {
                for sx in b.x_min..=b.x_max {
                    let (sx, sy) = (sx as usize, sy as usize);
                    let j = jitter.sample(sx, sy);
                    if poly.edges.covers(sx as f32 + j.offset.x, sy as f32 + j.offset.y) {
                        buffer.set(sx, sy, poly.color);
                        crate::count_call!(crate::perf::FUNCTION_COUNTERS.samples_covered);
                    }
                }
            }
        }
    }

    /// Sample a grid moving from its previous to its current transform.
    ///
    /// Each micropolygon is set up once per time stratum. A stratum only
    /// visits the sub-samples of its own sub-pixel phase, whose jittered
    /// times all fall inside that stratum.
    pub fn rasterize_grid_motion_blur(&mut self, grid: &Grid) {
        self.prepare();

        let factor = self.config.multisample_factor;
        let f = factor.samples();
        let fi = f as i32;
        let target_w = (self.width * f) as i32;
        let target_h = (self.height * f) as i32;
        // Positions stay in output pixels; only the equations are lifted to
        // sub-sample space.
        let scale = Vec2::new(self.width as f32, self.height as f32);
        let transform = grid.transform();
        let prev_transform = grid.prev_transform();

        // Setup pass.
        self.arena.reserve_blurred(grid.micropolygon_count(), factor.sub_samples());
        for y in 0..grid.polys_y() {
            for x in 0..grid.polys_x() {
                let corners = grid.cell_corners(x, y);
                let cur = corners.map(|v| ndc_to_pixel(project(transform, v.position), scale));
                let prev = corners.map(|v| ndc_to_pixel(project(prev_transform, v.position), scale));

                let edges = [
                    EdgeEquations::from_corners_scaled(&prev, f as f32),
                    EdgeEquations::from_corners_scaled(&cur, f as f32),
                ];
                let color = corners[0].color;

                for py in 0..f {
                    for px in 0..f {
                        let (t_min, t_max) = factor.time_stratum(px, py);

                        // Swept extent over the stratum, in output pixels.
                        let mut swept = PixelBounds::EMPTY;
                        for (p, c) in prev.iter().zip(&cur) {
                            swept.include(p.lerp(*c, t_min));
                            swept.include(p.lerp(*c, t_max));
                        }

                        // Only this phase's sub-sample of each pixel.
                        let (px, py) = (px as i32, py as i32);
                        let bounds = swept
                            .clamp_to_margin(self.width as i32, self.height as i32)
                            .to_sample_phase(fi, px, py);
                        if bounds.is_off_target(target_w, target_h) {
                            crate::count_call!(crate::perf::FUNCTION_COUNTERS.micropolygons_off_target);
                            continue;
                        }

                        self.arena.blurred_polys.push(BlurredMicropolygon {
                            edges,
                            bounds: bounds.clamp_to_target_aligned(target_w, target_h, fi, px, py),
                            color,
                        });
                    }
                }
            }
        }
        crate::count_add!(crate::perf::FUNCTION_COUNTERS.micropolygons_setup, self.arena.blurred_polys.len());

        // Sampling pass.
        let Self {
            buffer,
            jitter,
            arena,
            ..
        } = self;
        for poly in &arena.blurred_polys {
            let b = poly.bounds;
            for sy in (b.y_min..=b.y_max).step_by(f) {
                for sx in (b.x_min..=b.x_max).step_by(f) {
                    let (sx, sy) = (sx as usize, sy as usize);
                    let j = jitter.sample(sx, sy);
                    crate::count_call!(crate::perf::FUNCTION_COUNTERS.samples_tested);
                    if EdgeEquations::covers_at_time(
                        &poly.edges[0],
                        &poly.edges[1],
                        sx as f32 + j.offset.x,
                        sy as f32 + j.offset.y,
                        j.time,
                    ) {
                        buffer.set(sx, sy, poly.color);
                        crate::count_call!(crate::perf::FUNCTION_COUNTERS.samples_covered);
                    }
                }
            }
        }
    }
}

impl GridRasterizer for SoftwareRasterizer {
    fn rasterize_grid(&mut self, grid: &Grid) {
        crate::count_call!(crate::perf::FUNCTION_COUNTERS.grids_rasterized);
        if grid.has_motion() {
            crate::count_call!(crate::perf::FUNCTION_COUNTERS.grids_motion_blurred);
            self.rasterize_grid_motion_blur(grid);
        } else {
            self.rasterize_grid_static(grid);
        }
    }
}

/// Object space to normalised device coordinates, with perspective divide.
#[inline(always)]
fn project(transform: &Mat4, position: Vec3) -> Vec3 {
    transform.project_point3(position)
}

/// Normalised device coordinates to a y-down pixel space `scale` wide.
#[inline(always)]
pub fn ndc_to_pixel(ndc: Vec3, scale: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * scale.x,
        (-ndc.y * 0.5 + 0.5) * scale.y,
    )
}
