//! The analysed population: one realized plan per agent.

use std::collections::BTreeMap;

use tf_core::AgentId;

use crate::Plan;

/// Agents and their plans, ordered by `AgentId`.
///
/// A `BTreeMap` keeps feature rows in a stable order across runs regardless
/// of the order the plan file listed agents in.
#[derive(Clone, Debug, Default)]
pub struct Population {
    plans: BTreeMap<AgentId, Plan>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `agent`'s plan, returning the previous one.
    pub fn insert(&mut self, agent: AgentId, plan: Plan) -> Option<Plan> {
        self.plans.insert(agent, plan)
    }

    pub fn get(&self, agent: AgentId) -> Option<&Plan> {
        self.plans.get(&agent)
    }

    pub fn contains(&self, agent: AgentId) -> bool {
        self.plans.contains_key(&agent)
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Agents in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.plans.keys().copied()
    }

    /// `(agent, plan)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Plan)> {
        self.plans.iter().map(|(&agent, plan)| (agent, plan))
    }
}

impl FromIterator<(AgentId, Plan)> for Population {
    fn from_iter<I: IntoIterator<Item = (AgentId, Plan)>>(iter: I) -> Self {
        Self { plans: iter.into_iter().collect() }
    }
}
