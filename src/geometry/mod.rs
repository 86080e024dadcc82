/// Geometric primitives consumed by the dicer and the rasterizers
pub mod aabb;
pub mod grid;
pub mod quad;
pub mod vertex;

pub use aabb::Aabb;
pub use grid::Grid;
pub use quad::Quad;
pub use vertex::Vertex;
