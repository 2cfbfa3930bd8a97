//! Stops: the spans between consecutive car legs.
//!
//! Stops are derived on demand from a plan's car legs and never stored.  For
//! car legs `l0 … ln` (n ≥ 1) the stops are
//!
//! - the **night stop** `[arrival(ln) - 24h, departure(l0))`, which wraps the
//!   time after the last trip around to the morning, and
//! - one stop `[arrival(li), departure(li+1))` per consecutive pair.
//!
//! A plan with fewer than two car legs has no stop: a single trip leaves the
//! car parked only across midnight, which is not a stop between trips.

use tf_core::{SECS_PER_DAY, TimeWindow};
use tf_plan::{Leg, Plan};

use crate::{FeatureError, FeatureResult};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Stop {
    pub start: f64,
    pub end:   f64,
}

impl Stop {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `end - start`.
    ///
    /// Fails with [`FeatureError::UndefinedStopTime`] when either bound is
    /// not a finite number, e.g. a leg whose departure was never recorded.
    pub fn duration(&self) -> FeatureResult<f64> {
        self.check_defined()?;
        Ok(self.end - self.start)
    }

    /// `true` when the stop touches `window`, bounds included: a stop ending
    /// exactly at the window start still counts (with zero overlap).
    pub fn touches(&self, window: &TimeWindow) -> bool {
        self.end >= window.start && self.start <= window.end
    }

    /// Length of the stop clipped to `window`; never negative.
    pub fn overlap_with(&self, window: &TimeWindow) -> FeatureResult<f64> {
        self.check_defined()?;
        Ok(window.overlap(self.start, self.end))
    }

    fn check_defined(&self) -> FeatureResult<()> {
        if self.start.is_finite() && self.end.is_finite() {
            Ok(())
        } else {
            Err(FeatureError::UndefinedStopTime { start: self.start, end: self.end })
        }
    }
}

/// Every stop of `plan`, night stop first.
pub fn car_stops(plan: &Plan) -> Vec<Stop> {
    let legs: Vec<&Leg> = plan.car_legs().collect();
    let [first, .., last] = legs.as_slice() else {
        return Vec::new();
    };

    let mut stops = Vec::with_capacity(legs.len());
    stops.push(Stop::new(last.arrival_time() - SECS_PER_DAY, first.departure_time));
    stops.extend(
        legs.windows(2)
            .map(|pair| Stop::new(pair[0].arrival_time(), pair[1].departure_time)),
    );
    stops
}
