//! `tf-trace`: per-agent driven-distance trajectories rebuilt from events.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                         |
//! |----------------|------------------------------------------------------------------|
//! | [`event`]      | `TraceEvent`, `EventKind`                                        |
//! | [`network`]    | `LinkTable`:  link id → length                                   |
//! | [`drivers`]    | `VehicleDrivers`:  vehicle → driving agent while in traffic      |
//! | [`filter`]     | `AgentFilter` trait, `AllAgents`                                 |
//! | [`segment`]    | `SegmentState`:  per-agent `Idle`/`Active` state machine         |
//! | [`interval`]   | `IntervalRecord`, `IntervalStore`:  raw ledger + window queries  |
//! | [`binned`]     | `BinnedStore`:  fixed-width bin accumulator                      |
//! | [`track`]      | `AgentTrace`, `TraceStore`:  the two strategies behind one API   |
//! | [`aggregator`] | `TrajectoryAggregator`:  the write path                          |
//! | [`traces`]     | `TraceSet`:  the read-only result of a replay                    |
//! | [`loader`]     | `load_links_*`, `load_events_*`                                  |
//! | [`error`]      | `TraceError`, `ProtocolViolation`, `TraceResult<T>`              |
//!
//! # Two phases
//!
//! 1. **Replay** (single-threaded, strictly ordered): events are fed to
//!    [`TrajectoryAggregator::handle`].  Each completed link traversal becomes
//!    an `IntervalRecord(enter, exit, link_length)` in the driver's store.
//! 2. **Query** (read-only, parallel-safe): [`TrajectoryAggregator::finish`]
//!    consumes the aggregator and returns a [`TraceSet`].  Giving up the
//!    mutable aggregator is the barrier between the phases, so no query can
//!    observe a half-replayed stream.

pub mod aggregator;
pub mod binned;
pub mod drivers;
pub mod error;
pub mod event;
pub mod filter;
pub mod interval;
pub mod loader;
pub mod network;
pub mod segment;
pub mod track;
pub mod traces;

#[cfg(test)]
mod tests;

pub use aggregator::TrajectoryAggregator;
pub use binned::{BinnedStore, is_single_bin};
pub use drivers::VehicleDrivers;
pub use error::{ProtocolViolation, TraceError, TraceResult};
pub use event::{EventKind, TraceEvent};
pub use filter::{AgentFilter, AllAgents};
pub use interval::{IntervalRecord, IntervalStore};
pub use loader::{load_events_csv, load_events_reader, load_links_csv, load_links_reader};
pub use network::LinkTable;
pub use segment::SegmentState;
pub use track::{AgentTrace, TraceStore};
pub use traces::TraceSet;

#[cfg(feature = "fx-hash")]
pub(crate) type FastMap<K, V> = rustc_hash::FxHashMap<K, V>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type FastMap<K, V> = std::collections::HashMap<K, V>;
