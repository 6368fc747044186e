//! Capabilities a host implements to plug its runtime into the engine.

use std::sync::Arc;

use policy_primitives::{Decision, Params};

/// Read-only view of a runtime element that policies inspect.
///
/// Hosts adapt their own task, request, or context objects to this trait. The
/// engine only ever reads through it.
pub trait Node {
    /// Stable identifier used for diagnostics.
    fn id(&self) -> &str;

    /// Semantic label (intent, task type) used for cheap matching.
    fn name(&self) -> &str;

    /// Current effective parameters. May be a shallow copy.
    fn params(&self) -> Params;

    /// Logical parent, or `None` when this node is a root.
    fn parent(&self) -> Option<&dyn Node>;

    /// Root ancestor of this node; a root returns itself.
    fn root(&self) -> &dyn Node;
}

/// Prioritized rule that matches nodes and emits decisions.
///
/// `matches` is a cheap, side-effect-free prefilter; `check` only runs when it
/// returns true.
pub trait Policy: Send + Sync {
    /// Unique identifier for diagnostics and auditing.
    fn id(&self) -> &str;

    /// Evaluation order; lower values run earlier.
    fn priority(&self) -> i32;

    /// Returns true when the policy applies to `node`.
    fn matches(&self, node: &dyn Node) -> bool;

    /// Examines `node` and returns zero or more decisions, in order.
    fn check(&self, node: &dyn Node) -> Vec<Decision>;
}

impl<P> Policy for Arc<P>
where
    P: Policy + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn matches(&self, node: &dyn Node) -> bool {
        (**self).matches(node)
    }

    fn check(&self, node: &dyn Node) -> Vec<Decision> {
        (**self).check(node)
    }
}

impl<P> Policy for Box<P>
where
    P: Policy + ?Sized,
{
    fn id(&self) -> &str {
        (**self).id()
    }

    fn priority(&self) -> i32 {
        (**self).priority()
    }

    fn matches(&self, node: &dyn Node) -> bool {
        (**self).matches(node)
    }

    fn check(&self, node: &dyn Node) -> Vec<Decision> {
        (**self).check(node)
    }
}
