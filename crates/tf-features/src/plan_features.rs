//! Scalar features of one realized plan.
//!
//! Every function is pure: it reads the plan and never mutates it.  Plans
//! with no car legs are valid input and yield the documented sentinel.

use tf_core::TimeWindow;
use tf_plan::Plan;

use crate::{FeatureResult, car_stops};

/// Returned by the longest-stop features when the plan has no stop.
pub const NO_STOP: f64 = -1.0;

/// Longest stop between two car trips, in seconds; [`NO_STOP`] if none.
pub fn longest_stop_duration(plan: &Plan) -> FeatureResult<f64> {
    let mut longest: Option<f64> = None;
    for stop in car_stops(plan) {
        let d = stop.duration()?;
        longest = Some(longest.map_or(d, |l| l.max(d)));
    }
    Ok(longest.unwrap_or(NO_STOP))
}

/// Longest stop overlapping hours `[start_h, end_h)`, counting only the part
/// of each stop inside that range; [`NO_STOP`] if no stop reaches it.
///
/// A stop that merely touches the range (e.g. ends exactly at its start)
/// contributes a zero-length overlap.
pub fn longest_stop_duration_in_range(plan: &Plan, start_h: f64, end_h: f64) -> FeatureResult<f64> {
    let window = TimeWindow::from_hours(start_h, end_h)?;
    longest_stop_duration_in_window(plan, &window)
}

/// [`longest_stop_duration_in_range`] over a window already in seconds.
pub fn longest_stop_duration_in_window(plan: &Plan, window: &TimeWindow) -> FeatureResult<f64> {
    let mut longest: Option<f64> = None;
    for stop in car_stops(plan).iter().filter(|s| s.touches(window)) {
        let d = stop.overlap_with(window)?;
        longest = Some(longest.map_or(d, |l| l.max(d)));
    }
    Ok(longest.unwrap_or(NO_STOP))
}

/// Sum of all stop durations, in seconds.  Zero without stops.
pub fn total_stop_duration(plan: &Plan) -> FeatureResult<f64> {
    car_stops(plan).iter().map(|s| s.duration()).sum()
}

/// Longest car-leg distance in metres; `0` without car legs.
///
/// A car leg with no recorded distance counts as zero.
pub fn longest_car_leg_distance(plan: &Plan) -> f64 {
    plan.car_legs()
        .map(|leg| leg.distance_or_zero())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Total car distance in metres.
pub fn total_car_leg_distance(plan: &Plan) -> f64 {
    plan.car_legs().map(|leg| leg.distance_or_zero()).sum()
}

/// `true` if any activity overlaps `[start_s, end_s)`.
///
/// An undefined activity start or end is unbounded on that side.  Since the
/// car is parked while an activity runs, this doubles as "car parked during
/// the interval".
pub fn is_activity_ongoing_during(plan: &Plan, start_s: f64, end_s: f64) -> FeatureResult<bool> {
    let window = TimeWindow::new(start_s, end_s)?;
    Ok(plan.activities().any(|act| {
        act.start_time.is_none_or(|s| s < window.end) && act.end_time.is_none_or(|e| e > window.start)
    }))
}

/// Seconds spent driving inside `[start_s, end_s)`.
///
/// Each car leg occupies `[departure, departure + travel_time)`.  Legs
/// without recorded times contribute nothing.
pub fn drive_time_in_interval(plan: &Plan, start_s: f64, end_s: f64) -> FeatureResult<f64> {
    let window = TimeWindow::new(start_s, end_s)?;
    Ok(plan
        .car_legs()
        .filter(|leg| leg.departure_time.is_finite() && leg.travel_time.is_finite())
        .map(|leg| window.overlap(leg.departure_time, leg.arrival_time()))
        .sum())
}
