//! Evaluation of registered policies against a node.

use std::sync::Arc;

use policy_primitives::Decision;
use tracing::{debug, trace};

use crate::contracts::{Node, Policy};
use crate::registry::PolicyRegistry;

/// Runs `policies` against `node` in slice order and collects their
/// decisions.
///
/// Every policy whose `matches` returns true contributes the decisions from
/// its `check`, in the order returned. As soon as a decision with the stop
/// flag is appended, evaluation ends and the decisions gathered so far are
/// returned; later decisions from the same check and later policies are never
/// consulted.
///
/// Nothing here mutates the node or the policies, so the same input always
/// yields the same output.
#[must_use]
pub fn evaluate(policies: &[Arc<dyn Policy>], node: &dyn Node) -> Vec<Decision> {
    let mut out = Vec::new();
    for policy in policies {
        if !policy.matches(node) {
            trace!(policy = policy.id(), node = node.id(), "policy skipped");
            continue;
        }

        let decisions = policy.check(node);
        debug!(
            policy = policy.id(),
            node = node.id(),
            decisions = decisions.len(),
            "policy matched"
        );
        for decision in decisions {
            let stop = decision.is_stop();
            out.push(decision);
            if stop {
                debug!(
                    policy = policy.id(),
                    node = node.id(),
                    collected = out.len(),
                    "stop decision short-circuited evaluation"
                );
                return out;
            }
        }
    }
    out
}

impl PolicyRegistry {
    /// Evaluates a fresh snapshot of the registry against `node`.
    ///
    /// Safe to call from many threads at once. Registrations that happen
    /// while an evaluation is running do not affect it.
    #[must_use]
    pub fn evaluate(&self, node: &dyn Node) -> Vec<Decision> {
        evaluate(&self.snapshot(), node)
    }
}
