//! The result of one extraction pass.

use tf_core::AgentId;

use crate::{FeatureError, FeatureValue};

/// One agent's values, in the order of [`FeatureTable::names`].
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRow {
    pub agent:  AgentId,
    pub values: Vec<FeatureValue>,
}

/// An agent left out of the table because one of its features failed.
#[derive(Debug)]
pub struct AgentFailure {
    pub agent:   AgentId,
    pub feature: String,
    pub error:   FeatureError,
}

/// Feature names, one row per successful agent, and the agents that failed.
///
/// Rows follow population order (ascending agent id).
#[derive(Debug, Default)]
pub struct FeatureTable {
    pub names:    Vec<String>,
    pub rows:     Vec<FeatureRow>,
    pub failures: Vec<AgentFailure>,
}

impl FeatureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, agent: AgentId) -> Option<&FeatureRow> {
        self.rows
            .binary_search_by_key(&agent, |r| r.agent)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// `agent`'s value for the feature called `name`.
    pub fn value(&self, agent: AgentId, name: &str) -> Option<FeatureValue> {
        let col = self.names.iter().position(|n| n == name)?;
        self.row(agent).map(|r| r.values[col])
    }
}
