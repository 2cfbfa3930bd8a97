use tf_core::{AgentId, CoreError, LinkId};
use thiserror::Error;

/// How an event broke the enter/exit protocol.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProtocolViolation {
    #[error("started while already on {link} since t={since}")]
    AlreadyActive { link: LinkId, since: f64 },

    #[error("ended while idle")]
    NotActive,

    #[error("ended a traversal that started on {expected}")]
    UnitMismatch { expected: LinkId },

    #[error("ended at t={end}, before the traversal started at t={start}")]
    EndsBeforeStart { start: f64, end: f64 },
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("protocol violation for {agent} on {link} at t={time}: {violation}")]
    Protocol {
        agent:     AgentId,
        link:      LinkId,
        time:      f64,
        violation: ProtocolViolation,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("binned traces answer single-bin windows only: [{start}, {end}) with bin size {bin_size}")]
    UnsupportedWindow { start: f64, end: f64, bin_size: f64 },

    #[error("{0} is not in the link table")]
    UnknownLink(LinkId),

    #[error("event parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TraceError {
    /// `true` for a query window with `start > end`.
    pub fn is_invalid_range(&self) -> bool {
        matches!(self, TraceError::Core(CoreError::InvalidRange { .. }))
    }
}

pub type TraceResult<T> = Result<T, TraceError>;
