//! Which agents the aggregator keeps trajectories for.

use std::collections::HashSet;

use tf_core::AgentId;

/// Decides whether events of an agent are aggregated or silently dropped.
pub trait AgentFilter {
    fn accepts(&self, agent: AgentId) -> bool;
}

/// Accepts every agent seen in the stream.  The default policy.
#[derive(Copy, Clone, Debug, Default)]
pub struct AllAgents;

impl AgentFilter for AllAgents {
    #[inline]
    fn accepts(&self, _agent: AgentId) -> bool {
        true
    }
}

/// Accepts only the listed agents, e.g. the population under analysis.
impl AgentFilter for HashSet<AgentId> {
    #[inline]
    fn accepts(&self, agent: AgentId) -> bool {
        self.contains(&agent)
    }
}
