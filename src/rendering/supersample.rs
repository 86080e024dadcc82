/// Supersampled color target shared by every grid in a frame
use super::jitter::MultisampleFactor;
use glam::Vec4;

/// `width * factor` by `height * factor` linear RGBA samples, row-major.
///
/// Lives for as long as the rasterizer does; storage is only reallocated
/// when the output size or the multisample factor changes.
pub struct SupersampleBuffer {
    // Output resolution, not sample resolution.
    width: usize,
    height: usize,
    factor: MultisampleFactor,
    samples: Vec<Vec4>,
}

impl SupersampleBuffer {
    pub fn new(width: usize, height: usize, factor: MultisampleFactor) -> Self {
        let count = width * height * factor.sub_samples();
        Self {
            width,
            height,
            factor,
            samples: vec![Vec4::ZERO; count],
        }
    }

    /// Match the requested configuration. Returns true if the storage was
    /// reallocated, in which case the contents are cleared as well.
    pub fn ensure(&mut self, width: usize, height: usize, factor: MultisampleFactor) -> bool {
        if self.width == width && self.height == height && self.factor == factor {
            return false;
        }

        self.width = width;
        self.height = height;
        self.factor = factor;

        let count = width * height * factor.sub_samples();
        self.samples.clear();
        self.samples.resize(count, Vec4::ZERO);

        crate::count_call!(crate::perf::FUNCTION_COUNTERS.supersample_reallocations);
        true
    }

    /// Reset every sample to transparent black.
    pub fn clear(&mut self) {
        self.fill(Vec4::ZERO);
    }

    pub fn fill(&mut self, color: Vec4) {
        self.samples.fill(color);
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
    pub fn factor(&self) -> MultisampleFactor {
        self.factor
    }

    /// Samples per row.
    #[inline]
    pub fn sample_width(&self) -> usize {
        self.width * self.factor.samples()
    }

    /// Sample rows.
    #[inline]
    pub fn sample_height(&self) -> usize {
        self.height * self.factor.samples()
    }

    #[inline(always)]
    pub fn sample(&self, x: usize, y: usize) -> Vec4 {
        self.samples[y * self.sample_width() + x]
    }

    /// Overwrite one sample; last write wins.
    #[inline(always)]
    pub fn set(&mut self, x: usize, y: usize, color: Vec4) {
        let stride = self.sample_width();
        self.samples[y * stride + x] = color;
    }

    #[inline]
    pub fn samples(&self) -> &[Vec4] {
        &self.samples
    }

    /// One sample row.
    #[inline]
    pub fn row(&self, y: usize) -> &[Vec4] {
        let stride = self.sample_width();
        &self.samples[y * stride..(y + 1) * stride]
    }
}
