//! Serializable view of decisions for audit logs.

use policy_engine::{Action, Decision, Scope};
use serde::{Deserialize, Serialize};

/// Record of a single decision, stripped of its closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionAudit {
    /// Policy that produced the decision.
    pub policy_id: String,
    /// Declared scope.
    pub scope: Scope,
    /// Requested action.
    pub action: Action,
    /// Operator-facing explanation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Whether the decision short-circuited processing.
    #[serde(default)]
    pub stop: bool,
    /// Whether an adjust closure was attached.
    #[serde(default)]
    pub has_adjust: bool,
}

impl DecisionAudit {
    /// Builds the audit record for `decision`.
    #[must_use]
    pub fn from_decision(decision: &Decision) -> Self {
        Self {
            policy_id: decision.policy_id().to_owned(),
            scope: decision.scope(),
            action: decision.action(),
            reason: decision.reason().map(|r| r.message().to_owned()),
            stop: decision.is_stop(),
            has_adjust: decision.adjust_fn().is_some(),
        }
    }

    /// Builds audit records for a decision sequence, preserving order.
    #[must_use]
    pub fn from_decisions(decisions: &[Decision]) -> Vec<Self> {
        decisions.iter().map(Self::from_decision).collect()
    }
}

impl From<&Decision> for DecisionAudit {
    fn from(value: &Decision) -> Self {
        Self::from_decision(value)
    }
}
