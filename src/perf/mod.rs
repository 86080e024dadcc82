/// Performance measurement utilities
/// Each pipeline stage is timed and logged for optimization analysis
pub mod profiling;

pub use profiling::{CounterSnapshot, FunctionCounters, FUNCTION_COUNTERS};

use std::time::{Duration, Instant};

pub struct PerfTimer {
    name: &'static str,
    start: Instant,
}

impl PerfTimer {
    #[inline]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        println!("[PERF] {}: {}μs", self.name, elapsed.as_micros());
    }
}

/// Per-frame stage timings, accumulated over one or more frames
#[derive(Debug, Clone, Copy, Default)]
pub struct PerfStats {
    pub frames: u32,
    pub dicing_and_rasterization_us: f64,
    pub resolve_us: f64,
    pub total_us: f64,
}

impl PerfStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_frame(&mut self, rasterize: Duration, resolve: Duration) {
        let rasterize_us = rasterize.as_secs_f64() * 1e6;
        let resolve_us = resolve.as_secs_f64() * 1e6;
        self.frames += 1;
        self.dicing_and_rasterization_us += rasterize_us;
        self.resolve_us += resolve_us;
        self.total_us += rasterize_us + resolve_us;
    }

    pub fn print_summary(&self) {
        if self.frames == 0 || self.total_us <= 0.0 {
            println!("No frames recorded");
            return;
        }

        let frames = self.frames as f64;
        println!("\n========== PERFORMANCE SUMMARY ==========");
        println!("Frames:          {:8}", self.frames);
        println!(
            "Dice+Rasterize:  {:8.2}μs ({:5.1}%)",
            self.dicing_and_rasterization_us / frames,
            (self.dicing_and_rasterization_us / self.total_us) * 100.0
        );
        println!(
            "Resolve:         {:8.2}μs ({:5.1}%)",
            self.resolve_us / frames,
            (self.resolve_us / self.total_us) * 100.0
        );
        println!("─────────────────────────────────────────");
        println!("Total per frame: {:8.2}μs", self.total_us / frames);
        println!("=========================================\n");
    }
}

/// Macro for easy performance measurement
#[macro_export]
macro_rules! perf_scope {
    ($name:expr) => {
        let _timer = $crate::perf::PerfTimer::new($name);
    };
}
