//! Leg mode tag.
//!
//! Plans carry the mode as free text.  Only `car` drives any feature; the
//! other variants exist so that a loaded plan can be written back faithfully
//! and so that mode-based filters read naturally.

/// The means by which a leg is travelled.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum TransportMode {
    /// Private vehicle.
    Car,
    /// On foot.
    Walk,
    /// Bicycle.
    Bike,
    /// Scheduled public transport (bus, rail, ferry…).
    Pt,
    /// Any tag not listed above.
    #[default]
    Other,
}

impl TransportMode {
    /// Parse a mode tag.  Matching is exact and case-sensitive, like the
    /// tags in the plan files; unknown tags become [`TransportMode::Other`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "car"  => TransportMode::Car,
            "walk" => TransportMode::Walk,
            "bike" => TransportMode::Bike,
            "pt"   => TransportMode::Pt,
            _      => TransportMode::Other,
        }
    }

    #[inline]
    pub fn is_car(self) -> bool {
        matches!(self, TransportMode::Car)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Car   => "car",
            TransportMode::Walk  => "walk",
            TransportMode::Bike  => "bike",
            TransportMode::Pt    => "pt",
            TransportMode::Other => "other",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
