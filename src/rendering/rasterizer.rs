/// Rasterizer contract consumed by the dicer
use crate::geometry::Grid;

/// Anything that can turn a diced grid into coverage on some render target.
///
/// Implementations own their target and may cache resources across calls.
/// Grids of any size must be accepted, including ones whose micropolygons
/// are degenerate or entirely off screen; those simply produce no coverage.
/// Calls for one frame arrive sequentially and in scene order.
pub trait GridRasterizer {
    fn rasterize_grid(&mut self, grid: &Grid);
}

impl<T: GridRasterizer + ?Sized> GridRasterizer for &mut T {
    #[inline]
    fn rasterize_grid(&mut self, grid: &Grid) {
        (**self).rasterize_grid(grid);
    }
}
