//! `tf-features`: per-agent features of realized plans and driven traces.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                      |
//! |-------------------|---------------------------------------------------------------|
//! | [`stop`]          | `Stop`, `car_stops`:  spans between consecutive car legs      |
//! | [`plan_features`] | longest/total stop, trip distance, drive time, activity flags |
//! | [`value`]         | `FeatureValue` (`Number`, `Flag`)                             |
//! | [`feature`]       | `Feature` trait, `FeatureInput`, `TraceDistance`              |
//! | [`registry`]      | `FeatureSet`:  named features and the extraction pass         |
//! | [`table`]         | `FeatureTable`, `FeatureRow`, `AgentFailure`                  |
//! | [`error`]         | `FeatureError`, `FeatureResult<T>`                            |
//!
//! # Extraction
//!
//! Extraction runs after replay, over read-only data: each agent's plan and
//! (through [`TraceDistance`]) a shared `Arc<TraceSet>`.  Agents are
//! independent, so with the `parallel` feature the per-agent loop is a Rayon
//! parallel map.  Output order is population order either way.
//!
//! A failing feature fails its agent, not the batch, unless the caller asks
//! for [`ErrorPolicy::FailFast`][tf_core::ErrorPolicy::FailFast].

pub mod error;
pub mod feature;
pub mod plan_features;
pub mod registry;
pub mod stop;
pub mod table;
pub mod value;


pub use error::{FeatureError, FeatureResult};
pub use feature::{Feature, FeatureInput, TraceDistance};
pub(crate) use feature::FnFeature;
pub use registry::FeatureSet;
pub use stop::{Stop, car_stops};
pub use table::{AgentFailure, FeatureRow, FeatureTable};
pub use value::FeatureValue;
