//! `tf-plan`: realized agent plans and their CSV loader.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`mode`]        | `TransportMode`                                       |
//! | [`plan`]        | `Activity`, `Leg`, `PlanElement`, `Plan`              |
//! | [`population`]  | `Population` (`BTreeMap<AgentId, Plan>`)              |
//! | [`loader`]      | `load_plans_csv`, `load_plans_reader`                 |
//! | [`error`]       | `PlanError`, `PlanResult<T>`                          |
//!
//! Plans are read-only input to feature extraction: nothing in the workspace
//! mutates a plan after it has been loaded.

pub mod error;
pub mod loader;
pub mod mode;
pub mod plan;
pub mod population;


pub use error::{PlanError, PlanResult};
pub use loader::{load_plans_csv, load_plans_reader};
pub use mode::TransportMode;
pub use plan::{Activity, Leg, Plan, PlanElement};
pub use population::Population;
