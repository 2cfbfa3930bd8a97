use tf_core::{AgentId, CoreError};
use tf_trace::TraceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    /// Inverted window, or a bad range in the feature configuration.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A derived stop has a bound that was never set, so its duration would
    /// be NaN.
    #[error("stop [{start}, {end}) has an undefined bound")]
    UndefinedStopTime { start: f64, end: f64 },

    #[error(transparent)]
    Trace(#[from] TraceError),

    /// First failure of a fail-fast extraction.
    #[error("feature {feature:?} failed for {agent}: {source}")]
    Failed {
        agent:   AgentId,
        feature: String,
        #[source]
        source:  Box<FeatureError>,
    },
}

impl FeatureError {
    /// `true` for a window with `start > end`, whichever layer rejected it.
    pub fn is_invalid_range(&self) -> bool {
        match self {
            FeatureError::Core(CoreError::InvalidRange { .. }) => true,
            FeatureError::Trace(e) => e.is_invalid_range(),
            FeatureError::Failed { source, .. } => source.is_invalid_range(),
            _ => false,
        }
    }
}

pub type FeatureResult<T> = Result<T, FeatureError>;
