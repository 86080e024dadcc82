pub mod dicing;
pub mod geometry;
pub mod perf;
/// Micropolygon Engine - REYES-style dice-then-sample renderer
/// Quads are diced into grids of flat micropolygons, stochastically sampled
/// with optional motion blur, then filtered down to the output image
pub mod rendering;
pub mod scene;

pub use dicing::{DiceStats, SceneRenderer, DEFAULT_MICROPOLYGON_SIZE};
pub use geometry::{Aabb, Grid, Quad, Vertex};
pub use perf::{CounterSnapshot, FunctionCounters, PerfStats, FUNCTION_COUNTERS};
pub use rendering::{
    EdgeEquations, FrameStats, Framebuffer, GridRasterizer, JitterTable, MultisampleFactor,
    RasterizerConfig, SoftwareRasterizer, SupersampleBuffer,
};
pub use scene::Scene;
