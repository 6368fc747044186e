//! Decision records emitted by policies.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::{Action, Reason, Scope};

/// Current effective parameters of a node: string keys to arbitrary JSON-shaped
/// values. Policies should inspect values defensively.
pub type Params = Map<String, Value>;

/// Parameter mutation carried by [`Action::Adjust`] decisions.
///
/// The closure receives the mapping for the duration of the call only and must
/// not hold on to it.
pub type AdjustFn = Arc<dyn Fn(&mut Params) + Send + Sync>;

/// Unit result of a policy check.
///
/// Decisions are built once by a policy and are read-only afterwards. A
/// decision with the stop flag set halts both evaluation and enforcement right
/// after it has been recorded or applied.
#[derive(Clone)]
pub struct Decision {
    policy_id: String,
    scope: Scope,
    action: Action,
    adjust: Option<AdjustFn>,
    reason: Option<Reason>,
    stop: bool,
}

impl Decision {
    /// Creates a decision with the given scope and action and no payload.
    #[must_use]
    pub fn new(policy_id: impl Into<String>, scope: Scope, action: Action) -> Self {
        Self {
            policy_id: policy_id.into(),
            scope,
            action,
            adjust: None,
            reason: None,
            stop: false,
        }
    }

    /// Returns a decision that has no effect.
    #[must_use]
    pub fn noop(policy_id: impl Into<String>) -> Self {
        Self::new(policy_id, Scope::Node, Action::Noop)
    }

    /// Returns a node-scoped advisory decision.
    #[must_use]
    pub fn warn(policy_id: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self::new(policy_id, Scope::Node, Action::Warn).with_reason(reason)
    }

    /// Returns a parameter adjustment applied at `scope`.
    #[must_use]
    pub fn adjust<F>(policy_id: impl Into<String>, scope: Scope, adjust: F) -> Self
    where
        F: Fn(&mut Params) + Send + Sync + 'static,
    {
        Self::new(policy_id, scope, Action::Adjust).with_adjust(adjust)
    }

    /// Returns a decision cancelling the target node.
    #[must_use]
    pub fn cancel_node(policy_id: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self::new(policy_id, Scope::Node, Action::CancelNode).with_reason(reason)
    }

    /// Returns a decision cancelling the target node and its descendants.
    #[must_use]
    pub fn cancel_subtree(policy_id: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self::new(policy_id, Scope::Subtree, Action::CancelSubtree).with_reason(reason)
    }

    /// Returns a decision cancelling the root of the target's tree.
    #[must_use]
    pub fn cancel_root(policy_id: impl Into<String>, reason: impl Into<Reason>) -> Self {
        Self::new(policy_id, Scope::Root, Action::CancelRoot).with_reason(reason)
    }

    /// Attaches an operator-facing reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Reason>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a parameter mutation. Only meaningful for [`Action::Adjust`];
    /// enforcement ignores it for every other action.
    #[must_use]
    pub fn with_adjust<F>(mut self, adjust: F) -> Self
    where
        F: Fn(&mut Params) + Send + Sync + 'static,
    {
        self.adjust = Some(Arc::new(adjust));
        self
    }

    /// Marks the decision as superseding: nothing after it is evaluated or
    /// enforced.
    #[must_use]
    pub fn with_stop(mut self) -> Self {
        self.stop = true;
        self
    }

    /// Returns the identifier of the policy that produced the decision.
    #[must_use]
    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    /// Returns the declared scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Returns the requested action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the parameter mutation, if any.
    #[must_use]
    pub fn adjust_fn(&self) -> Option<&AdjustFn> {
        self.adjust.as_ref()
    }

    /// Returns the optional reason.
    #[must_use]
    pub fn reason(&self) -> Option<&Reason> {
        self.reason.as_ref()
    }

    /// Returns true when the decision short-circuits further processing.
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.stop
    }
}

impl fmt::Debug for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("policy_id", &self.policy_id)
            .field("scope", &self.scope)
            .field("action", &self.action)
            .field("adjust", &self.adjust.as_ref().map(|_| "<fn>"))
            .field("reason", &self.reason)
            .field("stop", &self.stop)
            .finish()
    }
}
