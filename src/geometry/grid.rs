/// Diced micropolygon grid
use super::Vertex;
use glam::Mat4;

/// A regular `(polys_x + 1) x (polys_y + 1)` lattice of vertices produced by
/// dicing one quad, plus the transforms for the current and previous frame.
///
/// Grids are immutable once built; rasterizers only ever borrow them.
#[derive(Clone, Debug)]
pub struct Grid {
    polys_x: usize,
    polys_y: usize,
    vertices: Vec<Vertex>,
    transform: Mat4,
    prev_transform: Mat4,
}

impl Grid {
    /// Build a grid by evaluating `vertex_at(x, y)` for every lattice point,
    /// row by row.
    pub fn from_fn<F>(
        polys_x: usize,
        polys_y: usize,
        transform: Mat4,
        prev_transform: Mat4,
        mut vertex_at: F,
    ) -> Self
    where
        F: FnMut(usize, usize) -> Vertex,
    {
        let mut vertices = Vec::with_capacity((polys_x + 1) * (polys_y + 1));
        for y in 0..=polys_y {
            for x in 0..=polys_x {
                vertices.push(vertex_at(x, y));
            }
        }

        Self {
            polys_x,
            polys_y,
            vertices,
            transform,
            prev_transform,
        }
    }

    #[inline]
    pub fn polys_x(&self) -> usize {
        self.polys_x
    }

    #[inline]
    pub fn polys_y(&self) -> usize {
        self.polys_y
    }

    /// Number of micropolygons (cells) in the grid.
    #[inline]
    pub fn micropolygon_count(&self) -> usize {
        self.polys_x * self.polys_y
    }

    #[inline]
    pub fn vertex(&self, x: usize, y: usize) -> &Vertex {
        assert!(
            x <= self.polys_x && y <= self.polys_y,
            "grid vertex ({}, {}) outside {}x{} lattice",
            x,
            y,
            self.polys_x + 1,
            self.polys_y + 1
        );
        &self.vertices[y * (self.polys_x + 1) + x]
    }

    /// Row-major lattice vertices.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Corners of cell `(x, y)` in lattice order: `(x, y)`, `(x + 1, y)`,
    /// `(x, y + 1)`, `(x + 1, y + 1)`.
    #[inline]
    pub fn cell_corners(&self, x: usize, y: usize) -> [&Vertex; 4] {
        [
            self.vertex(x, y),
            self.vertex(x + 1, y),
            self.vertex(x, y + 1),
            self.vertex(x + 1, y + 1),
        ]
    }

    #[inline]
    pub fn transform(&self) -> &Mat4 {
        &self.transform
    }

    #[inline]
    pub fn prev_transform(&self) -> &Mat4 {
        &self.prev_transform
    }

    /// True when the patch moved between the previous and the current frame.
    /// Exact comparison: any difference selects the motion blur path.
    #[inline]
    pub fn has_motion(&self) -> bool {
        self.transform != self.prev_transform
    }
}
