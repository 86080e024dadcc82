/// Quad vertex: position plus an RGBA color
use glam::{Vec3, Vec4};
use std::ops::{Add, Mul};

/// A single patch or grid vertex.
///
/// Vertices form an affine space under `+` and scalar `*`, which is all the
/// dicer needs to bilinearly interpolate patch corners.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    /// Linear RGBA, nominally in [0, 1].
    pub color: Vec4,
}

impl Vertex {
    #[inline]
    pub const fn new(position: Vec3, color: Vec4) -> Self {
        Self { position, color }
    }

    /// `(1 - alpha) * a + alpha * b`.
    ///
    /// Written in the two-weight form so that `alpha == 0` and `alpha == 1`
    /// reproduce the endpoints bit for bit.
    #[inline]
    pub fn lerp(a: Vertex, b: Vertex, alpha: f32) -> Vertex {
        (1.0 - alpha) * a + alpha * b
    }
}

impl Add for Vertex {
    type Output = Vertex;

    #[inline]
    fn add(self, rhs: Vertex) -> Vertex {
        Vertex {
            position: self.position + rhs.position,
            color: self.color + rhs.color,
        }
    }
}

impl Mul<f32> for Vertex {
    type Output = Vertex;

    #[inline]
    fn mul(self, rhs: f32) -> Vertex {
        Vertex {
            position: self.position * rhs,
            color: self.color * rhs,
        }
    }
}

impl Mul<Vertex> for f32 {
    type Output = Vertex;

    #[inline]
    fn mul(self, rhs: Vertex) -> Vertex {
        rhs * self
    }
}
