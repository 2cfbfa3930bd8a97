//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ids are opaque handles: the loaders
//! map whatever the input files contain onto dense `u32` values.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `label` is the lowercase noun used by `Display`, so log lines read
/// `agent 7 … link 3`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// The raw integer, as read from input files and written to
            /// output tables.
            #[inline(always)]
            pub fn raw(self) -> $inner {
                self.0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", $label, self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> Self {
                $name(raw)
            }
        }
    };
}

typed_id! {
    /// A simulated traveler.
    pub struct AgentId(u32) = "agent";
}

typed_id! {
    /// A vehicle.  Several agents may drive the same vehicle over disjoint
    /// time windows.
    pub struct VehicleId(u32) = "vehicle";
}

typed_id! {
    /// A directed network link; the traversal unit of the event stream.
    pub struct LinkId(u32) = "link";
}
