//! The `Feature` trait: one named column of the feature table.

use std::sync::Arc;

use tf_core::{AgentId, AggregationStrategy, TimeWindow};
use tf_plan::Plan;
use tf_trace::{TraceError, TraceSet, is_single_bin};

use crate::{FeatureResult, FeatureValue};

/// Everything a feature may look at for one agent.
#[derive(Copy, Clone, Debug)]
pub struct FeatureInput<'a> {
    pub agent: AgentId,
    pub plan:  &'a Plan,
}

/// A named per-agent computation.
///
/// Implementations must be pure: the same input always gives the same value,
/// and evaluating one feature never influences another.  Extraction may call
/// `compute` for many agents in parallel, so features are `Send + Sync`.
///
/// Most features are closures registered through
/// [`FeatureSet::with_number`][crate::FeatureSet::with_number] and
/// [`FeatureSet::with_flag`][crate::FeatureSet::with_flag]; implement the
/// trait directly for features that carry shared state.
pub trait Feature: Send + Sync + 'static {
    /// Column header.
    fn name(&self) -> &str;

    fn compute(&self, input: &FeatureInput<'_>) -> FeatureResult<FeatureValue>;
}

// ── Closure features ──────────────────────────────────────────────────────────

pub(crate) struct FnFeature<F> {
    name: String,
    func: F,
}

impl<F> FnFeature<F>
where
    F: Fn(&FeatureInput<'_>) -> FeatureResult<FeatureValue> + Send + Sync + 'static,
{
    pub(crate) fn new(name: impl Into<String>, func: F) -> Self {
        Self { name: name.into(), func }
    }
}

impl<F> Feature for FnFeature<F>
where
    F: Fn(&FeatureInput<'_>) -> FeatureResult<FeatureValue> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, input: &FeatureInput<'_>) -> FeatureResult<FeatureValue> {
        (self.func)(input)
    }
}

// ── Trace distance ────────────────────────────────────────────────────────────

/// Distance an agent drove within a fixed window, read from a finished
/// [`TraceSet`].
///
/// Agents that never drove get `0`.
pub struct TraceDistance {
    name:   String,
    traces: Arc<TraceSet>,
    window: TimeWindow,
}

impl TraceDistance {
    /// Fails with `UnsupportedWindow` up front when the traces are binned and
    /// `window` is not exactly one bin (one bin wide and bin-aligned), rather
    /// than once per agent later.
    pub fn new(name: impl Into<String>, traces: Arc<TraceSet>, window: TimeWindow) -> FeatureResult<Self> {
        if let AggregationStrategy::Binned { bin_size_secs } = traces.strategy() {
            if !window.is_empty() && !is_single_bin(&window, bin_size_secs) {
                return Err(TraceError::UnsupportedWindow {
                    start:    window.start,
                    end:      window.end,
                    bin_size: bin_size_secs,
                }
                .into());
            }
        }
        Ok(Self { name: name.into(), traces, window })
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }
}

impl Feature for TraceDistance {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&self, input: &FeatureInput<'_>) -> FeatureResult<FeatureValue> {
        let metres = self.traces.query_window(input.agent, self.window)?;
        Ok(FeatureValue::Number(metres))
    }
}
