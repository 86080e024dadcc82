/// Supersample resolve: box filter, clamp, gamma encode and pack
use super::framebuffer::rgba_to_u32;
use super::supersample::SupersampleBuffer;
use glam::Vec4;

/// Display gamma applied to the color channels on resolve.
pub const DISPLAY_GAMMA: f32 = 2.2;

/// Filter window in sub-samples for a width given in output pixels.
/// Never narrower than one sample.
#[inline]
pub fn filter_width_in_samples(filter_width: f32, factor: usize) -> usize {
    let samples = (filter_width * factor as f32).floor();
    if samples >= 1.0 {
        samples as usize
    } else {
        1
    }
}

/// Average of the supersamples under the filter window of output pixel
/// `(x, y)`.
///
/// The window is `window` samples wide, centred on the pixel's
/// `factor x factor` block and clipped to the buffer.
#[inline]
pub fn box_filter(buffer: &SupersampleBuffer, x: usize, y: usize, window: usize) -> Vec4 {
    let factor = buffer.factor().samples() as i64;
    let offset = (window as i64 - factor) / 2;

    let (x_min, x_max) = window_span(x as i64, factor, offset, buffer.sample_width());
    let (y_min, y_max) = window_span(y as i64, factor, offset, buffer.sample_height());

    let mut sum = Vec4::ZERO;
    for sy in y_min..y_max {
        let row = buffer.row(sy);
        for sample in &row[x_min..x_max] {
            sum += *sample;
        }
    }

    let count = (x_max - x_min) * (y_max - y_min);
    if count == 0 {
        return Vec4::ZERO;
    }
    sum / count as f32
}

/// Half-open sample range `[min, max)` along one axis.
#[inline]
fn window_span(pixel: i64, factor: i64, offset: i64, limit: usize) -> (usize, usize) {
    let min = (pixel * factor - offset).max(0);
    let max = ((pixel + 1) * factor + offset).min(limit as i64);
    if max <= min {
        (0, 0)
    } else {
        (min as usize, max as usize)
    }
}

/// Clamp to [0, 1] and gamma encode rgb; alpha stays linear.
#[inline]
pub fn gamma_encode(color: Vec4) -> Vec4 {
    let c = color.clamp(Vec4::ZERO, Vec4::ONE);
    let inv_gamma = 1.0 / DISPLAY_GAMMA;
    Vec4::new(
        c.x.powf(inv_gamma),
        c.y.powf(inv_gamma),
        c.z.powf(inv_gamma),
        c.w,
    )
}

/// Scale an encoded color in [0, 1] to 8 bits per channel (truncating) and
/// pack it as ARGB.
#[inline]
pub fn pack_argb(color: Vec4) -> u32 {
    let c = color * 255.0;
    rgba_to_u32(c.x as u8, c.y as u8, c.z as u8, c.w as u8)
}

/// Encode and pack one linear color, as the resolve pass does per pixel.
#[inline]
pub fn encode_pixel(color: Vec4) -> u32 {
    pack_argb(gamma_encode(color))
}

/// Resolve the whole supersample buffer into `target`, overwriting every
/// pixel. `target` must hold exactly `width * height` pixels.
pub fn downsample(buffer: &SupersampleBuffer, filter_width: f32, target: &mut [u32]) {
    let width = buffer.width();
    let height = buffer.height();
    assert_eq!(
        target.len(),
        width * height,
        "resolve target holds {} pixels, expected {}x{}",
        target.len(),
        width,
        height
    );

    let window = filter_width_in_samples(filter_width, buffer.factor().samples());
    for (y, row) in target.chunks_exact_mut(width.max(1)).enumerate().take(height) {
        for (x, pixel) in row.iter_mut().enumerate() {
            *pixel = encode_pixel(box_filter(buffer, x, y, window));
        }
    }
}
