//! Core value types shared by the policy engine and its hosts.
//!
//! Everything here is plain data describing *what* should happen; nothing in
//! this crate evaluates policies or talks to a host runtime.

#![warn(missing_docs, clippy::pedantic)]

mod action;
mod decision;
mod error;
mod reason;

/// Breadth and kind of an effect requested by a decision.
pub use action::{Action, Scope};
/// Decision record emitted by policies and its parameter mutation types.
pub use decision::{AdjustFn, Decision, Params};
/// Error type and result alias shared across the engine crates.
pub use error::{PolicyError, PolicyResult};
/// Operator-facing explanation attached to warn and cancel decisions.
pub use reason::{Reason, reason};
