//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so an inverted window surfaces the same way whether
//! it came from a trace query or a plan feature.

use thiserror::Error;

/// The base error type for `tf-core` and the sub-crates built on it.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid time range: start {start} is after end {end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
