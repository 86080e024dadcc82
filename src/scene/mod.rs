/// Static scene description: a list of quads and the frame transforms
use crate::geometry::{Quad, Vertex};
use glam::{Mat4, Vec3, Vec4};

/// Quads plus the object-to-NDC transforms of the current and previous frame.
///
/// When the two transforms differ the renderer motion blurs every quad along
/// the interpolated path between them.
#[derive(Clone, Debug)]
pub struct Scene {
    pub quads: Vec<Quad>,
    pub transform: Mat4,
    pub prev_transform: Mat4,
}

impl Scene {
    pub fn new(quads: Vec<Quad>) -> Self {
        Self {
            quads,
            transform: Mat4::IDENTITY,
            prev_transform: Mat4::IDENTITY,
        }
    }

    pub fn with_transforms(mut self, transform: Mat4, prev_transform: Mat4) -> Self {
        self.transform = transform;
        self.prev_transform = prev_transform;
        self
    }

    /// A single skewed quad with a different color at each corner.
    pub fn demo() -> Self {
        Self::new(vec![Quad::new(
            Vertex::new(Vec3::new(-0.50, -0.50, 0.0), Vec4::new(1.0, 0.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(0.25, -0.51, 0.0), Vec4::new(0.0, 1.0, 0.0, 1.0)),
            Vertex::new(Vec3::new(-0.75, 0.75, 0.0), Vec4::new(0.0, 0.0, 1.0, 1.0)),
            Vertex::new(Vec3::new(0.75, 0.50, 0.0), Vec4::new(1.0, 1.0, 0.0, 1.0)),
        )])
    }

    /// The demo quad sweeping in from the lower left during the frame.
    pub fn demo_motion_blurred() -> Self {
        Self::demo().with_transforms(
            Mat4::IDENTITY,
            Mat4::from_translation(Vec3::new(-0.2, -0.2, 0.0)),
        )
    }

    #[inline]
    pub fn has_motion(&self) -> bool {
        self.transform != self.prev_transform
    }
}
