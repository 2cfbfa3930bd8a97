//! Run configuration for one feature-extraction pass.
//!
//! Typically loaded from a JSON file by the application crate (with the
//! `serde` feature) and handed to the aggregator and the feature set.

use crate::{CoreError, CoreResult, SECS_PER_HOUR, TimeWindow};

/// Narrowest bin accepted by [`ExtractConfig::validate`], in seconds.  Finer
/// bins stop advancing once added to a time of day.
pub const MIN_BIN_SECS: f64 = 1.0;

// ── AggregationStrategy ──────────────────────────────────────────────────────

/// How the trajectory aggregator stores completed segments.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AggregationStrategy {
    /// Keep every `(enter, exit, length)` triple; answers arbitrary windows.
    #[default]
    Intervals,
    /// Bucket lengths into fixed-width bins; answers single-bin windows only.
    Binned { bin_size_secs: f64 },
}

impl AggregationStrategy {
    /// One-hour bins.
    pub fn hourly() -> Self {
        AggregationStrategy::Binned { bin_size_secs: SECS_PER_HOUR }
    }
}

// ── ErrorPolicy ──────────────────────────────────────────────────────────────

/// What a feature failure for one agent does to the batch.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorPolicy {
    /// Drop the failing agent's row, report it, keep going.
    #[default]
    Isolate,
    /// Abort the whole extraction on the first failure.
    FailFast,
}

// ── ExtractConfig ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExtractConfig {
    pub strategy: AggregationStrategy,

    pub error_policy: ErrorPolicy,

    /// Hour range `(start_h, end_h)` of the ranged longest-stop feature.
    pub stop_range_hours: (f64, f64),

    /// Hour windows for which a trace-distance feature is emitted.  With a
    /// binned strategy each window must be exactly one bin:
    /// one bin wide and starting on a bin boundary.
    pub distance_windows_hours: Vec<(f64, f64)>,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            strategy:               AggregationStrategy::Intervals,
            error_policy:           ErrorPolicy::Isolate,
            stop_range_hours:       (9.0, 16.0),
            distance_windows_hours: Vec::new(),
            num_threads:            None,
        }
    }
}

impl ExtractConfig {
    /// Check the configuration before any event is replayed.
    pub fn validate(&self) -> CoreResult<()> {
        if let AggregationStrategy::Binned { bin_size_secs } = self.strategy {
            if !(bin_size_secs.is_finite() && bin_size_secs >= MIN_BIN_SECS) {
                return Err(CoreError::Config(format!(
                    "bin_size_secs must be a number of at least {MIN_BIN_SECS}, got {bin_size_secs}"
                )));
            }
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        self.stop_range()?;
        self.distance_windows()?;
        Ok(())
    }

    /// The ranged-stop window in seconds.
    pub fn stop_range(&self) -> CoreResult<TimeWindow> {
        TimeWindow::from_hours(self.stop_range_hours.0, self.stop_range_hours.1)
    }

    /// All trace-distance windows in seconds.
    pub fn distance_windows(&self) -> CoreResult<Vec<TimeWindow>> {
        self.distance_windows_hours
            .iter()
            .map(|&(h0, h1)| TimeWindow::from_hours(h0, h1))
            .collect()
    }
}
