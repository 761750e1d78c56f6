//! Opt-in timing hooks for the strip pipeline.
//!
//! Timing is only collected when the `strip_metrics` feature is enabled and the
//! target is not WASM (`std::time::Instant` is unavailable there). Otherwise
//! every call compiles down to running the closure.
//!
//! ```ignore
//! use mobius_engine::geom::{GeomMetrics, TimingBucket};
//!
//! let mut metrics = GeomMetrics::default();
//! metrics.begin();
//! let area = metrics.time(TimingBucket::AreaEstimation, || {
//!     estimate_surface_area(&coords, du, dv)
//! });
//! if let Some(report) = metrics.end() {
//!     println!("area: {} ns", report.area_estimation_ns);
//! }
//! ```

use serde::Serialize;

/// Pipeline stages timed separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingBucket {
    /// Parameter sequences and the U/V grids.
    ParameterGrid,
    /// Closed-form evaluation of X/Y/Z.
    SurfaceEvaluation,
    /// Finite differences, cross products and the area sum.
    AreaEstimation,
    /// Boundary curve sampling and its length.
    EdgeEstimation,
    /// Grid triangulation for the renderer mesh.
    Triangulation,
    /// Mesh topology checks.
    Diagnostics,
}

/// Cumulative nanoseconds per bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct GeomTimingReport {
    pub parameter_grid_ns: u64,
    pub surface_evaluation_ns: u64,
    pub area_estimation_ns: u64,
    pub edge_estimation_ns: u64,
    pub triangulation_ns: u64,
    pub diagnostics_ns: u64,
}

impl GeomTimingReport {
    /// Returns the total time across all buckets in nanoseconds.
    #[must_use]
    pub fn total_ns(&self) -> u64 {
        self.parameter_grid_ns
            .saturating_add(self.surface_evaluation_ns)
            .saturating_add(self.area_estimation_ns)
            .saturating_add(self.edge_estimation_ns)
            .saturating_add(self.triangulation_ns)
            .saturating_add(self.diagnostics_ns)
    }

    /// Returns the total time in milliseconds (for display purposes).
    #[must_use]
    pub fn total_ms(&self) -> f64 {
        self.total_ns() as f64 / 1_000_000.0
    }
}

/// Accumulator for timing pipeline stages.
///
/// When the `strip_metrics` feature is disabled (or on WASM), all methods are
/// no-ops and [`end`](Self::end) returns `None`.
#[derive(Debug, Default)]
pub struct GeomMetrics {
    #[cfg(all(feature = "strip_metrics", not(target_arch = "wasm32")))]
    report: GeomTimingReport,
}

impl GeomMetrics {
    /// Resets all timing counters to zero.
    pub fn begin(&mut self) {
        #[cfg(all(feature = "strip_metrics", not(target_arch = "wasm32")))]
        {
            self.report = GeomTimingReport::default();
        }
    }

    /// Returns the accumulated timing report, or `None` if metrics are disabled.
    #[must_use]
    pub fn end(&self) -> Option<GeomTimingReport> {
        #[cfg(all(feature = "strip_metrics", not(target_arch = "wasm32")))]
        {
            Some(self.report.clone())
        }
        #[cfg(not(all(feature = "strip_metrics", not(target_arch = "wasm32"))))]
        {
            None
        }
    }

    /// Times the execution of `f` and accumulates the elapsed time in `bucket`.
    pub fn time<R>(&mut self, bucket: TimingBucket, f: impl FnOnce() -> R) -> R {
        #[cfg(all(feature = "strip_metrics", not(target_arch = "wasm32")))]
        {
            let start = std::time::Instant::now();
            let result = f();
            let nanos = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);
            self.add_to_bucket(bucket, nanos);
            result
        }

        #[cfg(not(all(feature = "strip_metrics", not(target_arch = "wasm32"))))]
        {
            let _ = bucket;
            f()
        }
    }

    #[cfg(all(feature = "strip_metrics", not(target_arch = "wasm32")))]
    fn add_to_bucket(&mut self, bucket: TimingBucket, nanos: u64) {
        let slot = match bucket {
            TimingBucket::ParameterGrid => &mut self.report.parameter_grid_ns,
            TimingBucket::SurfaceEvaluation => &mut self.report.surface_evaluation_ns,
            TimingBucket::AreaEstimation => &mut self.report.area_estimation_ns,
            TimingBucket::EdgeEstimation => &mut self.report.edge_estimation_ns,
            TimingBucket::Triangulation => &mut self.report.triangulation_ns,
            TimingBucket::Diagnostics => &mut self.report.diagnostics_ns,
        };
        *slot = slot.saturating_add(nanos);
    }
}
