/// Per-cell setup data cached between the setup and sampling passes
use super::edge_equations::EdgeEquations;
use glam::{Vec2, Vec4};

/// Inclusive integer sample-space bounds of a micropolygon.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelBounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl PixelBounds {
    /// An empty accumulator for [`PixelBounds::include`].
    pub const EMPTY: PixelBounds = PixelBounds {
        x_min: i32::MAX,
        x_max: i32::MIN,
        y_min: i32::MAX,
        y_max: i32::MIN,
    };

    /// Conservative bounds: floor of the minimum, ceil of the maximum.
    #[inline]
    pub fn conservative(points: &[Vec2]) -> Self {
        let mut bounds = Self::EMPTY;
        for p in points {
            bounds.include(*p);
        }
        bounds
    }

    #[inline]
    pub fn include(&mut self, p: Vec2) {
        self.x_min = self.x_min.min(p.x.floor() as i32);
        self.y_min = self.y_min.min(p.y.floor() as i32);
        self.x_max = self.x_max.max(p.x.ceil() as i32);
        self.y_max = self.y_max.max(p.y.ceil() as i32);
    }

    /// True when no part of the bounds lies on a `width x height` target.
    #[inline]
    pub fn is_off_target(&self, width: i32, height: i32) -> bool {
        self.x_max < 0 || self.x_min >= width || self.y_max < 0 || self.y_min >= height
    }

    /// Pull every side into `[-1, width + 1] x [-1, height + 1]`. Sides
    /// that were off the target stay off it, and the result can be scaled
    /// by a small stride without overflowing.
    #[inline]
    pub fn clamp_to_margin(self, width: i32, height: i32) -> Self {
        Self {
            x_min: self.x_min.clamp(-1, width + 1),
            x_max: self.x_max.clamp(-1, width + 1),
            y_min: self.y_min.clamp(-1, height + 1),
            y_max: self.y_max.clamp(-1, height + 1),
        }
    }

    /// Output-pixel bounds expressed on the `(phase_x, phase_y)` sub-sample
    /// of each pixel.
    #[inline]
    pub fn to_sample_phase(self, stride: i32, phase_x: i32, phase_y: i32) -> Self {
        Self {
            x_min: self.x_min * stride + phase_x,
            x_max: self.x_max * stride + phase_x,
            y_min: self.y_min * stride + phase_y,
            y_max: self.y_max * stride + phase_y,
        }
    }

    /// Clip to `[0, width) x [0, height)`.
    #[inline]
    pub fn clamp_to_target(self, width: i32, height: i32) -> Self {
        Self {
            x_min: self.x_min.max(0),
            y_min: self.y_min.max(0),
            x_max: self.x_max.min(width - 1),
            y_max: self.y_max.min(height - 1),
        }
    }

    /// Clip to the target while keeping the minimum on the
    /// `(phase_x, phase_y)` lattice of a `stride`-sample stepping.
    #[inline]
    pub fn clamp_to_target_aligned(
        self,
        width: i32,
        height: i32,
        stride: i32,
        phase_x: i32,
        phase_y: i32,
    ) -> Self {
        let align = |min: i32, phase: i32| if min < 0 { phase } else { min };
        Self {
            x_min: align(self.x_min, phase_x),
            y_min: align(self.y_min, phase_y),
            x_max: self.x_max.min(width - 1),
            y_max: self.y_max.min(height - 1),
        }
        .debug_check_phase(stride, phase_x, phase_y)
    }

    #[inline]
    fn debug_check_phase(self, stride: i32, phase_x: i32, phase_y: i32) -> Self {
        debug_assert_eq!(self.x_min.rem_euclid(stride), phase_x);
        debug_assert_eq!(self.y_min.rem_euclid(stride), phase_y);
        self
    }

    /// Number of sample positions with unit stride (zero when empty).
    #[inline]
    pub fn area(&self) -> u64 {
        if self.x_max < self.x_min || self.y_max < self.y_min {
            return 0;
        }
        (self.x_max - self.x_min + 1) as u64 * (self.y_max - self.y_min + 1) as u64
    }
}

/// A set-up micropolygon of a grid that does not move.
#[derive(Copy, Clone, Debug)]
pub struct StaticMicropolygon {
    pub edges: EdgeEquations,
    pub bounds: PixelBounds,
    /// Flat color of the cell's first corner.
    pub color: Vec4,
}

/// One time stratum of a moving micropolygon.
///
/// `bounds` covers the swept shape over the stratum and is expressed on the
/// stratum's sub-pixel lattice, so sampling steps by the multisample factor.
#[derive(Copy, Clone, Debug)]
pub struct BlurredMicropolygon {
    /// Equations at the start and the end of the frame interval.
    pub edges: [EdgeEquations; 2],
    pub bounds: PixelBounds,
    pub color: Vec4,
}

/// Scratch storage for set-up micropolygons. Reset, not freed, between
/// grids so steady-state frames do not allocate.
#[derive(Default)]
pub struct MicropolygonArena {
    pub static_polys: Vec<StaticMicropolygon>,
    pub blurred_polys: Vec<BlurredMicropolygon>,
}

impl MicropolygonArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the static list and make room for a grid of `cells`.
    pub fn reserve_static(&mut self, cells: usize) {
        self.static_polys.clear();
        self.static_polys.reserve(cells);
    }

    /// Empty the blurred list and make room for `cells * strata` entries.
    pub fn reserve_blurred(&mut self, cells: usize, strata: usize) {
        self.blurred_polys.clear();
        self.blurred_polys.reserve(cells * strata);
    }
}
