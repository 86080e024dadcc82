/// Final output image in packed 32-bit pixels
///
/// Row-major, origin top-left, one `u32` per pixel in ARGB order
/// (alpha in the high byte). The resolve pass overwrites every pixel.
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pub color_buffer: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color_buffer: vec![0; width * height],
        }
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.color_buffer[y * self.width + x]
    }

    pub fn color_buffer_mut(&mut self) -> &mut [u32] {
        &mut self.color_buffer
    }

    /// Unpack into tightly packed RGBA bytes, e.g. for PNG encoding.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.color_buffer.len() * 4);
        for &pixel in &self.color_buffer {
            bytes.extend_from_slice(&unpack_argb(pixel));
        }
        bytes
    }
}

/// Pack 8-bit channels as ARGB.
#[inline]
pub const fn rgba_to_u32(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Split an ARGB pixel into `[r, g, b, a]`.
#[inline]
pub const fn unpack_argb(pixel: u32) -> [u8; 4] {
    [
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
        (pixel >> 24) as u8,
    ]
}
