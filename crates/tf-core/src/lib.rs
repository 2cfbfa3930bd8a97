//! `tf-core`: foundational types for the `trace_features` workspace.
//!
//! Every other `tf-*` crate depends on this one.  It has no `tf-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `AgentId`, `VehicleId`, `LinkId`                           |
//! | [`time`]     | `TimeWindow`, `overlap`, second/hour constants             |
//! | [`config`]   | `ExtractConfig`, `AggregationStrategy`, `ErrorPolicy`      |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and config types.      |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{AggregationStrategy, ErrorPolicy, ExtractConfig, MIN_BIN_SECS};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, LinkId, VehicleId};
pub use time::{SECS_PER_DAY, SECS_PER_HOUR, TimeWindow, overlap};
