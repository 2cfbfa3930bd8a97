//! Time model.
//!
//! # Design
//!
//! Times are `f64` seconds since midnight of the simulated day, exactly as
//! they appear in the event stream.  Values past 24 h are legal (agents who
//! drive after midnight) and so are negative values (the synthesized night
//! stop starts on the previous day).
//!
//! Every window in the workspace is **left-closed, right-open**: `[start,
//! end)`.  Trace queries and plan features both clip against windows through
//! [`overlap`], so two adjacent windows never double count an instant and
//! never leave a gap between them.

use std::fmt;

use crate::{CoreError, CoreResult};

pub const SECS_PER_HOUR: f64 = 3_600.0;
pub const SECS_PER_DAY:  f64 = 86_400.0;

// ── overlap ──────────────────────────────────────────────────────────────────

/// Length of the intersection of `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Never negative: disjoint or merely touching spans give `0.0`.
#[inline]
pub fn overlap(a_start: f64, a_end: f64, b_start: f64, b_end: f64) -> f64 {
    (a_end.min(b_end) - a_start.max(b_start)).max(0.0)
}

// ── TimeWindow ───────────────────────────────────────────────────────────────

/// A validated `[start, end)` window in seconds.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    pub start: f64,
    pub end:   f64,
}

impl TimeWindow {
    /// Build a window, rejecting `start > end` and NaN bounds.
    ///
    /// `start == end` is a legal, empty window.
    pub fn new(start: f64, end: f64) -> CoreResult<Self> {
        // `!(start <= end)` is also true when either side is NaN.
        if !(start <= end) {
            return Err(CoreError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a window from hours of the day, e.g. `from_hours(9.0, 16.0)`.
    pub fn from_hours(start_h: f64, end_h: f64) -> CoreResult<Self> {
        Self::new(start_h * SECS_PER_HOUR, end_h * SECS_PER_HOUR)
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// `start <= t < end`.
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    /// Clipped length of `[start, end)` inside this window.
    #[inline]
    pub fn overlap(&self, start: f64, end: f64) -> f64 {
        overlap(self.start, self.end, start, end)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
