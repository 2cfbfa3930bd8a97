//! The read-only result of a replay.

use tf_core::{AgentId, AggregationStrategy, TimeWindow};

use crate::{AgentTrace, FastMap, TraceResult};

/// Every agent's finished trace.
///
/// Immutable once built, so it can be shared across threads (e.g. in an
/// `Arc`) and queried concurrently without locking.
#[derive(Clone, Debug)]
pub struct TraceSet {
    strategy: AggregationStrategy,
    traces:   FastMap<AgentId, AgentTrace>,
}

impl TraceSet {
    pub(crate) fn new(strategy: AggregationStrategy, traces: FastMap<AgentId, AgentTrace>) -> Self {
        Self { strategy, traces }
    }

    pub fn strategy(&self) -> AggregationStrategy {
        self.strategy
    }

    pub fn trace(&self, agent: AgentId) -> Option<&AgentTrace> {
        self.traces.get(&agent)
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Traced agents in ascending id order.
    pub fn agents(&self) -> Vec<AgentId> {
        let mut agents: Vec<AgentId> = self.traces.keys().copied().collect();
        agents.sort_unstable();
        agents
    }

    /// Distance `agent` drove within `[start, end)`.
    ///
    /// An agent without a trace drove nothing: the result is `0.0`, not an
    /// error.  The window is still validated first.
    pub fn query_interval(&self, agent: AgentId, start: f64, end: f64) -> TraceResult<f64> {
        TimeWindow::new(start, end)?;
        match self.traces.get(&agent) {
            Some(trace) => trace.query(start, end),
            None => Ok(0.0),
        }
    }

    /// [`query_interval`][Self::query_interval] over a pre-validated window.
    pub fn query_window(&self, agent: AgentId, window: TimeWindow) -> TraceResult<f64> {
        self.query_interval(agent, window.start, window.end)
    }
}
