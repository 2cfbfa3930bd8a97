//! Error types for tf-output.

use std::path::PathBuf;

use tf_core::AgentId;
use thiserror::Error;

/// Errors that can occur when writing a feature table.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// Output files are never overwritten.
    #[error("output file {} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("row for {agent} has {got} values, header has {expected} features")]
    RowWidth { agent: AgentId, expected: usize, got: usize },

    #[error("rows written before the header")]
    MissingHeader,
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
