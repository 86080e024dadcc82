/// Stratified spatio-temporal jitter lookup
/// Sample positions and times are tabulated once per multisample factor so
/// the pattern stays coherent from frame to frame
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Side of the jitter table in output pixels. The table covers
/// `JITTER_TABLE_PIXELS * factor` sub-samples per axis and wraps.
pub const JITTER_TABLE_PIXELS: usize = 32;

/// Fixed seed so that the table, and every render, is repeatable.
pub const JITTER_SEED: u64 = 0;

/// Supported sub-samples per pixel axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum MultisampleFactor {
    X1,
    X2,
    #[default]
    X4,
}

// Time strata per sub-pixel phase, indexed by `py * factor + px`.
const PROTOTYPE_X1: [f32; 1] = [0.0];
const PROTOTYPE_X2: [f32; 4] = [0.0, 0.5, 0.25, 0.75];
// Cook 1986.
const PROTOTYPE_X4: [f32; 16] = [
    0.3750, 0.6250, 0.1250, 0.8125, //
    0.1875, 0.8750, 0.7500, 0.5000, //
    0.9375, 0.0000, 0.4375, 0.6875, //
    0.3125, 0.5625, 0.2500, 0.0625, //
];

impl MultisampleFactor {
    /// Map a sub-sample count per axis to a factor. Only 1, 2 and 4 exist.
    pub fn from_samples(samples: u32) -> Option<Self> {
        match samples {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            4 => Some(Self::X4),
            _ => None,
        }
    }

    /// Sub-samples per pixel axis.
    #[inline]
    pub const fn samples(self) -> usize {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
        }
    }

    /// Sub-samples per pixel, which is also the number of time strata.
    #[inline]
    pub const fn sub_samples(self) -> usize {
        self.samples() * self.samples()
    }

    /// Start of the time stratum assigned to each sub-pixel phase. Every
    /// entry is a distinct multiple of `1 / sub_samples()`.
    #[inline]
    pub fn prototype(self) -> &'static [f32] {
        match self {
            Self::X1 => &PROTOTYPE_X1,
            Self::X2 => &PROTOTYPE_X2,
            Self::X4 => &PROTOTYPE_X4,
        }
    }

    /// Time stratum `[t_min, t_max)` for sub-pixel phase `(px, py)`.
    #[inline]
    pub fn time_stratum(self, px: usize, py: usize) -> (f32, f32) {
        let t_min = self.prototype()[py * self.samples() + px];
        (t_min, t_min + 1.0 / self.sub_samples() as f32)
    }
}

/// Jittered sample: sub-sample position offset and sample time.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct JitterSample {
    /// Offset inside the sub-sample cell, both components in [0, 1).
    pub offset: Vec2,
    /// Time within the frame interval, in [0, 1).
    pub time: f32,
}

/// Wrapping table of jitter samples keyed by sub-sample coordinate.
pub struct JitterTable {
    factor: MultisampleFactor,
    side: usize,
    samples: Vec<JitterSample>,
}

impl JitterTable {
    pub fn new(factor: MultisampleFactor) -> Self {
        let f = factor.samples();
        let side = JITTER_TABLE_PIXELS * f;
        let mut rng = ChaCha8Rng::seed_from_u64(JITTER_SEED);

        // Spatial jitter: independent uniform offsets.
        let mut samples: Vec<JitterSample> = (0..side * side)
            .map(|_| JitterSample {
                offset: Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()),
                time: 0.0,
            })
            .collect();

        // Temporal jitter: each sub-pixel phase of every f x f block gets its
        // prototype stratum plus a dither inside that stratum.
        let stratum = 1.0 / factor.sub_samples() as f32;
        let prototype = factor.prototype();
        for y in (0..side).step_by(f) {
            for x in (0..side).step_by(f) {
                for sy in 0..f {
                    for sx in 0..f {
                        let t_min = prototype[sy * f + sx];
                        let t = t_min + rng.gen::<f32>() * stratum;
                        samples[(y + sy) * side + x + sx].time = below(t, t_min + stratum);
                    }
                }
            }
        }

        crate::count_call!(crate::perf::FUNCTION_COUNTERS.jitter_table_builds);

        Self {
            factor,
            side,
            samples,
        }
    }

    #[inline]
    pub fn factor(&self) -> MultisampleFactor {
        self.factor
    }

    /// Entries per axis.
    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Jitter for sub-sample `(x, y)`; coordinates wrap.
    #[inline(always)]
    pub fn sample(&self, x: usize, y: usize) -> &JitterSample {
        let x = x % self.side;
        let y = y % self.side;
        &self.samples[y * self.side + x]
    }

    pub fn samples(&self) -> &[JitterSample] {
        &self.samples
    }
}

/// Keep `t` strictly below the positive bound `limit`; rounding of
/// `t_min + r * stratum` can otherwise land on the next stratum.
#[inline]
fn below(t: f32, limit: f32) -> f32 {
    if t < limit {
        t
    } else {
        f32::from_bits(limit.to_bits() - 1)
    }
}
