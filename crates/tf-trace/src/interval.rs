//! The raw interval ledger and its window query.
//!
//! # Apportionment
//!
//! A record `(start, end, value)` means `value` accrued at a constant rate
//! over `[start, end)`.  A query window `[qs, qe)` receives from each record:
//!
//! | Record vs. window              | Share                                      |
//! |--------------------------------|--------------------------------------------|
//! | entirely inside                | `value`                                    |
//! | straddles `qs` and/or `qe`     | `value * overlap / (end - start)`          |
//! | disjoint or merely touching    | `0`                                        |
//!
//! Records before the first one that reaches into the window, and gaps
//! between records, contribute nothing.
//!
//! A zero-duration record has no rate, so it is treated as a point at `t`:
//! counted whole when `qs <= t < qe` and skipped otherwise.  Splitting a
//! window at `t` therefore hands the record to exactly one piece.

use tf_core::TimeWindow;

use crate::TraceResult;

// ── IntervalRecord ───────────────────────────────────────────────────────────

/// `value` accrued uniformly over `[start, end]`.  Always `start <= end`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntervalRecord {
    pub start: f64,
    pub end:   f64,
    pub value: f64,
}

impl IntervalRecord {
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// Entirely before a window opening at `t`.
    #[inline]
    fn lies_before(&self, t: f64) -> bool {
        self.end < t || (self.end == t && !self.is_degenerate())
    }

    /// Entirely after a window closing at `t`.  The window is right-open, so
    /// a record starting exactly at `t` is already outside it.
    #[inline]
    fn lies_after(&self, t: f64) -> bool {
        self.start >= t
    }

    /// This record's contribution to `window`.  Callers skip records that
    /// lie before or after the window, so a zero-duration record reaching
    /// here sits at some `t` with `window.start <= t < window.end`.
    fn share_of(&self, window: &TimeWindow) -> f64 {
        if self.is_degenerate() || (self.start >= window.start && self.end <= window.end) {
            return self.value;
        }
        self.value * window.overlap(self.start, self.end) / self.duration()
    }
}

// ── IntervalStore ────────────────────────────────────────────────────────────

/// Append-only, time-ordered ledger of one agent's completed traversals.
///
/// Records arrive in non-decreasing `start` order and never overlap because
/// an agent traverses one link at a time.  The store relies on that order for
/// its binary searches; it does not re-validate it in release builds.
#[derive(Clone, Debug, Default)]
pub struct IntervalStore {
    records: Vec<IntervalRecord>,
}

impl IntervalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed record.
    pub fn push(&mut self, record: IntervalRecord) {
        debug_assert!(record.start <= record.end, "record ends before it starts");
        debug_assert!(
            self.records.last().is_none_or(|last| last.start <= record.start),
            "records must be appended in start order"
        );
        self.records.push(record);
    }

    pub fn records(&self) -> &[IntervalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record values.
    pub fn total(&self) -> f64 {
        self.records.iter().map(|r| r.value).sum()
    }

    /// `(first start, last end)`, or `None` for an empty store.
    pub fn span(&self) -> Option<(f64, f64)> {
        Some((self.records.first()?.start, self.records.last()?.end))
    }

    /// The record whose `[start, end)` contains `t`, if any.
    pub fn record_at(&self, t: f64) -> Option<&IntervalRecord> {
        let idx = self.records.partition_point(|r| r.start <= t);
        let candidate = self.records[..idx].last()?;
        (t < candidate.end).then_some(candidate)
    }

    /// Quantity accrued within `[start, end)`.
    ///
    /// Fails with `InvalidRange` when `start > end`.
    pub fn query(&self, start: f64, end: f64) -> TraceResult<f64> {
        let window = TimeWindow::new(start, end)?;
        if window.is_empty() {
            return Ok(0.0);
        }

        let first = self.records.partition_point(|r| r.lies_before(window.start));
        let mut total = 0.0;
        for record in &self.records[first..] {
            if record.lies_after(window.end) {
                break;
            }
            total += record.share_of(&window);
        }
        Ok(total)
    }
}
