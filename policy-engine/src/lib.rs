//! Host-agnostic policy evaluation.
//!
//! Hosts register prioritized [`Policy`] objects in a [`PolicyRegistry`],
//! evaluate them against a read-only [`Node`] view, and hand the resulting
//! decisions to an [`Enforcer`] that performs the real side effects. The two
//! phases are independent: evaluation never touches the enforcer, and
//! enforcement never touches the registry.

#![warn(missing_docs, clippy::pedantic)]

pub mod contracts;
pub mod enforce;
pub mod engine;
pub mod registry;
pub mod rule;

pub use contracts::{Node, Policy};
pub use enforce::{Enforcer, enforce};
pub use engine::evaluate;
pub use registry::PolicyRegistry;
pub use rule::{NodeMatcher, RulePolicy};

/// Decision model re-exported for convenience.
pub use policy_primitives::{
    Action, AdjustFn, Decision, Params, PolicyError, PolicyResult, Reason, Scope, reason,
};
