use glam::Vec4;
use micropolygon_engine::rendering::filter::{box_filter, downsample, encode_pixel, filter_width_in_samples};
use micropolygon_engine::rendering::framebuffer::unpack_argb;
use micropolygon_engine::{MultisampleFactor, SupersampleBuffer};

/// Channel-wise comparison allowing one step of 8-bit rounding.
fn assert_close(actual: u32, expected: u32) {
    let (a, e) = (unpack_argb(actual), unpack_argb(expected));
    for channel in 0..4 {
        let diff = (a[channel] as i32 - e[channel] as i32).abs();
        assert!(diff <= 1, "pixel {:08x} vs expected {:08x}", actual, expected);
    }
}

#[test]
fn test_uniform_buffer_resolves_to_its_color() {
    let color = Vec4::new(0.1, 0.4, 0.7, 0.9);
    let expected = encode_pixel(color);

    for factor in [MultisampleFactor::X1, MultisampleFactor::X2, MultisampleFactor::X4] {
        for filter_width in [0.1, 0.5, 1.0, 1.5, 2.0, 3.0, 5.0] {
            let mut buffer = SupersampleBuffer::new(9, 7, factor);
            buffer.fill(color);
            let mut target = vec![0u32; 9 * 7];
            downsample(&buffer, filter_width, &mut target);

            // Includes the last row and column, where the window is clipped.
            for &pixel in &target {
                assert_close(pixel, expected);
            }
        }
    }
}

#[test]
fn test_window_is_clipped_at_the_borders() {
    let mut buffer = SupersampleBuffer::new(4, 4, MultisampleFactor::X1);
    buffer.set(0, 0, Vec4::ONE);
    let window = filter_width_in_samples(3.0, 1);
    assert_eq!(window, 3);

    // The corner pixel only sees a 2x2 window.
    assert_eq!(box_filter(&buffer, 0, 0, window), Vec4::splat(0.25));
    // An interior pixel sees the full 3x3 window.
    assert_eq!(box_filter(&buffer, 1, 1, window), Vec4::splat(1.0 / 9.0));
    assert_eq!(box_filter(&buffer, 2, 2, window), Vec4::ZERO);
}

#[test]
fn test_wide_filter_blends_neighbours() {
    let (width, height) = (8, 4);
    let mut buffer = SupersampleBuffer::new(width, height, MultisampleFactor::X2);
    for sy in 0..buffer.sample_height() {
        for sx in 0..buffer.sample_width() / 2 {
            buffer.set(sx, sy, Vec4::ONE);
        }
    }

    let mut sharp = vec![0u32; width * height];
    downsample(&buffer, 1.0, &mut sharp);
    let mut soft = vec![0u32; width * height];
    downsample(&buffer, 3.0, &mut soft);

    let row = 1;
    // With a one pixel filter the halves stay hard-edged.
    assert_close(sharp[row * width + 3], encode_pixel(Vec4::ONE));
    assert_eq!(sharp[row * width + 4], 0);
    // A three pixel window (six samples, centred) straddles the boundary:
    // pixel 3 sees samples 4..10, of which 4 are white.
    assert_close(soft[row * width + 3], encode_pixel(Vec4::splat(4.0 / 6.0)));
    assert_close(soft[row * width + 4], encode_pixel(Vec4::splat(2.0 / 6.0)));
    assert_eq!(soft[row * width + 7], 0);
}

#[test]
fn test_narrow_filter_takes_the_centre_samples() {
    // Four samples per axis, but a half pixel window: the centre 2x2.
    let mut buffer = SupersampleBuffer::new(1, 1, MultisampleFactor::X4);
    buffer.set(1, 1, Vec4::ONE);
    buffer.set(2, 2, Vec4::ONE);
    buffer.set(0, 0, Vec4::splat(100.0));

    let window = filter_width_in_samples(0.5, 4);
    assert_eq!(window, 2);
    assert_eq!(box_filter(&buffer, 0, 0, window), Vec4::splat(0.5));
}

#[test]
fn test_encoding_clamps_and_keeps_alpha_linear() {
    let [r, g, b, a] = unpack_argb(encode_pixel(Vec4::new(0.5, -1.0, 4.0, 0.5)));
    // 0.5^(1 / 2.2) = 0.7297
    assert_eq!(r, 186);
    assert_eq!(g, 0);
    assert_eq!(b, 255);
    assert_eq!(a, 127);
}
