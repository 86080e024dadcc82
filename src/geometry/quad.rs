/// Four-vertex patch, the only primitive the dicer understands
use super::{Aabb, Vertex};

/// A bilinear patch.
///
/// Corners are stored as a 2x2 lattice: `v0` and `v1` form the first row,
/// `v2` and `v3` the second. Walking the outline therefore visits
/// `v0 -> v1 -> v3 -> v2`, see [`Quad::EDGE_ORDER`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Quad {
    pub vertices: [Vertex; 4],
}

impl Quad {
    /// Corner indices in outline order.
    pub const EDGE_ORDER: [usize; 4] = [0, 1, 3, 2];

    #[inline]
    pub const fn new(v0: Vertex, v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
        }
    }

    /// Bounds of the untransformed corner positions.
    pub fn aabb(&self) -> Aabb {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// The four outline edges as `(from, to)` corner index pairs.
    pub fn edges() -> [(usize, usize); 4] {
        let order = Self::EDGE_ORDER;
        [
            (order[0], order[1]),
            (order[1], order[2]),
            (order[2], order[3]),
            (order[3], order[0]),
        ]
    }
}
