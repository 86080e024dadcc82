/// Micropolygon rasterization pipeline
/// Coverage testing, jittered sampling, supersample storage and resolve
pub mod edge_equations;
pub mod filter;
pub mod framebuffer;
pub mod jitter;
pub mod micropolygon;
pub mod rasterizer;
pub mod software;
pub mod supersample;

pub use edge_equations::EdgeEquations;
pub use framebuffer::Framebuffer;
pub use jitter::{JitterSample, JitterTable, MultisampleFactor, JITTER_TABLE_PIXELS};
pub use micropolygon::{BlurredMicropolygon, MicropolygonArena, PixelBounds, StaticMicropolygon};
pub use rasterizer::GridRasterizer;
pub use software::{FrameStats, RasterizerConfig, SoftwareRasterizer};
pub use supersample::SupersampleBuffer;
