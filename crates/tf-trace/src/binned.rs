//! Fixed-width bin accumulator, the low-memory alternative to
//! [`IntervalStore`][crate::IntervalStore].
//!
//! The day is cut into bins `[k * bin_size, (k + 1) * bin_size)`.  One
//! accumulator (the *current bin*) collects completed traversals; it is
//! flushed into the sealed list when the agent moves on to a later bin.
//! Bins only ever advance forward in time.
//!
//! A traversal that crosses one or more bin edges is split by elapsed time,
//! measured from that traversal's own entry time: the part of `[enter,
//! exit)` that falls in each bin receives the same share of the length.
//!
//! Only sealed bins are visible to queries, and only windows that coincide
//! with one bin can be answered.

use tf_core::TimeWindow;

use crate::{IntervalRecord, TraceError, TraceResult};

/// Relative tolerance (in bins) when matching a query window to a bin.
const BIN_TOLERANCE: f64 = 1e-9;

/// `true` when `window` is exactly one bin: `bin_size` wide and starting on a
/// multiple of `bin_size`.
pub fn is_single_bin(window: &TimeWindow, bin_size: f64) -> bool {
    let tolerance = BIN_TOLERANCE * bin_size;
    let aligned = window.start - (window.start / bin_size).round() * bin_size;
    (window.duration() - bin_size).abs() <= tolerance && aligned.abs() <= tolerance
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Bin {
    start: f64,
    value: f64,
}

#[derive(Clone, Debug)]
pub struct BinnedStore {
    bin_size:   f64,
    /// Sealed bin start times, strictly increasing.
    bin_starts: Vec<f64>,
    /// Sealed bin totals, parallel to `bin_starts`.
    values:     Vec<f64>,
    current:    Option<Bin>,
}

impl BinnedStore {
    /// Create an empty store.  `bin_size` must be positive; configs are
    /// validated before a store is ever built.
    pub fn new(bin_size: f64) -> Self {
        debug_assert!(bin_size > 0.0, "bin_size must be > 0");
        Self {
            bin_size,
            bin_starts: Vec::new(),
            values:     Vec::new(),
            current:    None,
        }
    }

    #[inline]
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Start of the bin containing `t`.
    #[inline]
    pub fn bin_start_of(&self, t: f64) -> f64 {
        (t / self.bin_size).floor() * self.bin_size
    }

    /// A traversal starts at `time`.  Rolls the current bin forward if
    /// `time` belongs to a later bin, sealing the old one.
    pub fn on_start(&mut self, time: f64) {
        let bin = self.bin_start_of(time);
        match self.current {
            Some(current) if bin <= current.start => {}
            _ => self.roll_to(bin),
        }
    }

    /// Add a completed traversal, splitting it across every bin it spans.
    pub fn add(&mut self, record: IntervalRecord) {
        // No-op when the aggregator already rolled forward at the matching start.
        self.on_start(record.start);
        let IntervalRecord { start: enter, end: exit, value } = record;
        let duration = exit - enter;

        let mut cursor   = enter;
        let mut assigned = 0.0;
        while let Some(current) = self.current.as_mut() {
            let bin_end = current.start + self.bin_size;
            if exit < bin_end || bin_end <= cursor || bin_end <= current.start {
                // Last (or only) bin takes the remainder so nothing is lost to
                // rounding.  A bin too narrow to move past `cursor` ends the
                // split here too.
                if exit >= bin_end {
                    log::warn!(
                        "bin size {} cannot advance past t={cursor}; {} left in bin at t={}",
                        self.bin_size,
                        value - assigned,
                        current.start,
                    );
                }
                current.value += value - assigned;
                return;
            }
            let share = value * (bin_end - cursor) / duration;
            current.value += share;
            assigned += share;
            cursor = bin_end;
            self.roll_to(bin_end);
        }
    }

    /// Seal the current bin.  Called once the replay is over.
    pub fn flush(&mut self) {
        if let Some(bin) = self.current.take() {
            self.bin_starts.push(bin.start);
            self.values.push(bin.value);
        }
    }

    /// Sealed `(bin_start, value)` pairs in time order.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.bin_starts.iter().copied().zip(self.values.iter().copied())
    }

    /// Sum over sealed bins.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Quantity accrued in the bin starting at `start`.
    ///
    /// `[start, end)` must be exactly one bin (see [`is_single_bin`]); any
    /// other non-empty window fails with `UnsupportedWindow`.  A bin that was
    /// never sealed (no driving in it, or not yet elapsed) contributes zero.
    pub fn query(&self, start: f64, end: f64) -> TraceResult<f64> {
        let window = TimeWindow::new(start, end)?;
        if window.is_empty() {
            return Ok(0.0);
        }
        if !is_single_bin(&window, self.bin_size) {
            return Err(TraceError::UnsupportedWindow { start, end, bin_size: self.bin_size });
        }
        let tolerance = BIN_TOLERANCE * self.bin_size;
        let idx = self.bin_starts.partition_point(|&s| s < start - tolerance);
        match self.bin_starts.get(idx) {
            Some(&s) if (s - start).abs() <= tolerance => Ok(self.values[idx]),
            _ => Ok(0.0),
        }
    }

    fn roll_to(&mut self, bin_start: f64) {
        self.flush();
        self.current = Some(Bin { start: bin_start, value: 0.0 });
    }
}
