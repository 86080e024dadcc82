/// Call counting for the dicing and sampling hot paths
/// Counters only move when the `profiling` feature is enabled
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe counters for the render pipeline stages
pub struct FunctionCounters {
    // Dicing counters
    pub quads_diced: AtomicU64,
    pub quads_skipped: AtomicU64,
    pub micropolygons_diced: AtomicU64,

    // Setup counters
    pub grids_rasterized: AtomicU64,
    pub grids_motion_blurred: AtomicU64,
    pub micropolygons_setup: AtomicU64,
    pub micropolygons_off_target: AtomicU64,

    // Sampling counters
    pub samples_tested: AtomicU64,
    pub samples_covered: AtomicU64,

    // Frame counters
    pub frames_begun: AtomicU64,
    pub frames_resolved: AtomicU64,
    pub jitter_table_builds: AtomicU64,
    pub supersample_reallocations: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            quads_diced: AtomicU64::new(0),
            quads_skipped: AtomicU64::new(0),
            micropolygons_diced: AtomicU64::new(0),
            grids_rasterized: AtomicU64::new(0),
            grids_motion_blurred: AtomicU64::new(0),
            micropolygons_setup: AtomicU64::new(0),
            micropolygons_off_target: AtomicU64::new(0),
            samples_tested: AtomicU64::new(0),
            samples_covered: AtomicU64::new(0),
            frames_begun: AtomicU64::new(0),
            frames_resolved: AtomicU64::new(0),
            jitter_table_builds: AtomicU64::new(0),
            supersample_reallocations: AtomicU64::new(0),
        }
    }

    fn all(&self) -> [&AtomicU64; 13] {
        [
            &self.quads_diced,
            &self.quads_skipped,
            &self.micropolygons_diced,
            &self.grids_rasterized,
            &self.grids_motion_blurred,
            &self.micropolygons_setup,
            &self.micropolygons_off_target,
            &self.samples_tested,
            &self.samples_covered,
            &self.frames_begun,
            &self.frames_resolved,
            &self.jitter_table_builds,
            &self.supersample_reallocations,
        ]
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        for counter in self.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            quads_diced: self.quads_diced.load(Ordering::Relaxed),
            quads_skipped: self.quads_skipped.load(Ordering::Relaxed),
            micropolygons_diced: self.micropolygons_diced.load(Ordering::Relaxed),
            grids_rasterized: self.grids_rasterized.load(Ordering::Relaxed),
            grids_motion_blurred: self.grids_motion_blurred.load(Ordering::Relaxed),
            micropolygons_setup: self.micropolygons_setup.load(Ordering::Relaxed),
            micropolygons_off_target: self.micropolygons_off_target.load(Ordering::Relaxed),
            samples_tested: self.samples_tested.load(Ordering::Relaxed),
            samples_covered: self.samples_covered.load(Ordering::Relaxed),
            frames_begun: self.frames_begun.load(Ordering::Relaxed),
            frames_resolved: self.frames_resolved.load(Ordering::Relaxed),
            jitter_table_builds: self.jitter_table_builds.load(Ordering::Relaxed),
            supersample_reallocations: self.supersample_reallocations.load(Ordering::Relaxed),
        }
    }
}

impl Default for FunctionCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of counter values at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub quads_diced: u64,
    pub quads_skipped: u64,
    pub micropolygons_diced: u64,
    pub grids_rasterized: u64,
    pub grids_motion_blurred: u64,
    pub micropolygons_setup: u64,
    pub micropolygons_off_target: u64,
    pub samples_tested: u64,
    pub samples_covered: u64,
    pub frames_begun: u64,
    pub frames_resolved: u64,
    pub jitter_table_builds: u64,
    pub supersample_reallocations: u64,
}

impl CounterSnapshot {
    /// Print formatted report
    pub fn print_report(&self) {
        println!("\n=== Performance Counters Report ===");
        println!("\nDicing:");
        println!("  quads diced:                {:12}", self.quads_diced);
        println!("  quads skipped:              {:12}", self.quads_skipped);
        println!("  micropolygons diced:        {:12}", self.micropolygons_diced);

        println!("\nSetup:");
        println!("  grids rasterized:           {:12}", self.grids_rasterized);
        println!("  grids motion blurred:       {:12}", self.grids_motion_blurred);
        println!("  micropolygons set up:       {:12}", self.micropolygons_setup);
        println!("  micropolygons off target:   {:12}", self.micropolygons_off_target);

        println!("\nSampling:");
        println!("  samples tested:             {:12}", self.samples_tested);
        println!("  samples covered:            {:12}", self.samples_covered);
        if self.samples_tested > 0 {
            let hit_rate = (self.samples_covered as f64 / self.samples_tested as f64) * 100.0;
            println!("  coverage hit rate:          {:11.2}%", hit_rate);
        }

        println!("\nFrames:");
        println!("  frames begun:               {:12}", self.frames_begun);
        println!("  frames resolved:            {:12}", self.frames_resolved);
        println!("  jitter table builds:        {:12}", self.jitter_table_builds);
        println!("  supersample reallocations:  {:12}", self.supersample_reallocations);

        println!();
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Macro for incrementing a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Macro for adding to a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value as u64, std::sync::atomic::Ordering::Relaxed);
        }
    };
}
