//! Core plan types: `Activity`, `Leg`, `PlanElement`, and `Plan`.
//!
//! # Undefined times
//!
//! An activity's start or end may be undefined: the first activity of the
//! day has no start, the last has no end.  These are `None` and mean
//! "unbounded on that side".
//!
//! Leg times are plain `f64`.  A leg whose departure or travel time was never
//! recorded carries NaN; features that derive stops from such a leg detect it
//! and fail instead of producing a NaN duration.

use crate::TransportMode;

// ── Activity ──────────────────────────────────────────────────────────────────

/// A stationary plan element.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Activity {
    /// Free-text activity type (`home`, `work`, …).
    pub act_type: String,
    /// Start time in seconds; `None` = unbounded towards the past.
    pub start_time: Option<f64>,
    /// End time in seconds; `None` = unbounded towards the future.
    pub end_time: Option<f64>,
}

impl Activity {
    pub fn new(act_type: impl Into<String>, start_time: Option<f64>, end_time: Option<f64>) -> Self {
        Self { act_type: act_type.into(), start_time, end_time }
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One mode-tagged movement between two activities.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    pub mode: TransportMode,
    /// Departure time in seconds.
    pub departure_time: f64,
    /// Travel time in seconds.
    pub travel_time: f64,
    /// Routed distance in metres, when the route records one.
    pub distance: Option<f64>,
}

impl Leg {
    pub fn new(mode: TransportMode, departure_time: f64, travel_time: f64, distance: Option<f64>) -> Self {
        Self { mode, departure_time, travel_time, distance }
    }

    /// A car leg, the only kind features look at.
    pub fn car(departure_time: f64, travel_time: f64, distance: f64) -> Self {
        Self::new(TransportMode::Car, departure_time, travel_time, Some(distance))
    }

    /// `departure_time + travel_time`.
    #[inline]
    pub fn arrival_time(&self) -> f64 {
        self.departure_time + self.travel_time
    }

    /// Distance, with an unrecorded distance counting as zero.
    #[inline]
    pub fn distance_or_zero(&self) -> f64 {
        self.distance.unwrap_or(0.0)
    }
}

// ── PlanElement ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlanElement {
    Activity(Activity),
    Leg(Leg),
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// An agent's realized daily plan: activities and legs in travel order.
///
/// The element order is the order the agent experienced them and is never
/// re-sorted.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    elements: Vec<PlanElement>,
}

impl Plan {
    pub fn new(elements: Vec<PlanElement>) -> Self {
        Self { elements }
    }

    /// A plan with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[PlanElement] {
        &self.elements
    }

    /// Append an element.  Used while a plan is being assembled by a loader.
    pub fn push(&mut self, element: PlanElement) {
        self.elements.push(element);
    }

    /// All legs, in plan order.
    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.elements.iter().filter_map(|e| match e {
            PlanElement::Leg(leg) => Some(leg),
            PlanElement::Activity(_) => None,
        })
    }

    /// Car legs only, in plan order.
    pub fn car_legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs().filter(|leg| leg.mode.is_car())
    }

    /// All activities, in plan order.
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.elements.iter().filter_map(|e| match e {
            PlanElement::Activity(act) => Some(act),
            PlanElement::Leg(_) => None,
        })
    }
}

impl FromIterator<PlanElement> for Plan {
    fn from_iter<I: IntoIterator<Item = PlanElement>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
