/// Dicing: quads to micropolygon grids
/// Chooses a tessellation density per quad and hands each grid to a rasterizer
use crate::geometry::{Grid, Quad, Vertex};
use crate::rendering::GridRasterizer;
use crate::scene::Scene;
use glam::Mat4;

/// Target micropolygon edge length in pixels.
pub const DEFAULT_MICROPOLYGON_SIZE: f32 = 128.0;

/// Fraction of the screen resolution one unit of object space is assumed to
/// span when sizing a quad.
pub const SCREEN_EXTENT_SCALE: f32 = 0.5;

/// Summary of one [`SceneRenderer::render`] call.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DiceStats {
    pub quads_diced: usize,
    pub quads_skipped: usize,
    pub micropolygons: usize,
}

/// Dices every quad of a scene and feeds the grids to a rasterizer.
#[derive(Copy, Clone, Debug)]
pub struct SceneRenderer {
    micropolygon_size: f32,
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self {
            micropolygon_size: DEFAULT_MICROPOLYGON_SIZE,
        }
    }
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_micropolygon_size(micropolygon_size: f32) -> Self {
        let mut renderer = Self::default();
        renderer.set_micropolygon_size(micropolygon_size);
        renderer
    }

    #[inline]
    pub fn micropolygon_size(&self) -> f32 {
        self.micropolygon_size
    }

    /// Smaller sizes dice finer. Must be positive.
    pub fn set_micropolygon_size(&mut self, size: f32) {
        debug_assert!(size > 0.0, "micropolygon size must be positive, got {}", size);
        self.micropolygon_size = size;
    }

    /// Micropolygon counts `(x, y)` for `quad` on a `width x height` screen,
    /// or `None` when the quad would produce no micropolygons.
    ///
    /// The estimate uses the untransformed corner positions.
    pub fn grid_resolution(&self, quad: &Quad, width: usize, height: usize) -> Option<(usize, usize)> {
        let diagonal = quad.aabb().diagonal();
        let pixel_width = diagonal.x * SCREEN_EXTENT_SCALE * width as f32;
        let pixel_height = diagonal.y * SCREEN_EXTENT_SCALE * height as f32;

        let polys_x = (pixel_width / self.micropolygon_size).ceil();
        let polys_y = (pixel_height / self.micropolygon_size).ceil();

        // Also rejects NaN.
        if !(polys_x > 0.0 && polys_y > 0.0) {
            return None;
        }
        Some((polys_x as usize, polys_y as usize))
    }

    /// Bilinearly subdivide `quad` into a grid.
    pub fn dice(
        &self,
        quad: &Quad,
        width: usize,
        height: usize,
        transform: Mat4,
        prev_transform: Mat4,
    ) -> Option<Grid> {
        let (polys_x, polys_y) = self.grid_resolution(quad, width, height)?;
        let [v0, v1, v2, v3] = quad.vertices;

        // Row endpoints, interpolated down the v0-v2 and v1-v3 sides.
        let rows: Vec<(Vertex, Vertex)> = (0..=polys_y)
            .map(|y| {
                let y_alpha = y as f32 / polys_y as f32;
                (Vertex::lerp(v0, v2, y_alpha), Vertex::lerp(v1, v3, y_alpha))
            })
            .collect();

        Some(Grid::from_fn(polys_x, polys_y, transform, prev_transform, |x, y| {
            let x_alpha = x as f32 / polys_x as f32;
            let (row_start, row_end) = rows[y];
            Vertex::lerp(row_start, row_end, x_alpha)
        }))
    }

    /// Dice every quad of `scene` in order and rasterize each grid as soon
    /// as it is built.
    pub fn render(
        &self,
        scene: &Scene,
        rasterizer: &mut dyn GridRasterizer,
        width: usize,
        height: usize,
    ) -> DiceStats {
        let mut stats = DiceStats::default();

        for quad in &scene.quads {
            match self.dice(quad, width, height, scene.transform, scene.prev_transform) {
                Some(grid) => {
                    stats.quads_diced += 1;
                    stats.micropolygons += grid.micropolygon_count();
                    crate::count_call!(crate::perf::FUNCTION_COUNTERS.quads_diced);
                    crate::count_add!(
                        crate::perf::FUNCTION_COUNTERS.micropolygons_diced,
                        grid.micropolygon_count()
                    );
                    rasterizer.rasterize_grid(&grid);
                }
                None => {
                    stats.quads_skipped += 1;
                    crate::count_call!(crate::perf::FUNCTION_COUNTERS.quads_skipped);
                }
            }
        }

        stats
    }
}
