//! Minimal, host-agnostic policy engine facade.
//!
//! Depend on this crate via `cargo add ccx-policy`. It bundles the component
//! crates behind feature flags so hosts only pull in what they use.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export the decision model for convenience.
pub use policy_primitives as primitives;

/// Registry, evaluation, and enforcement (enabled by `engine` feature).
#[cfg(feature = "engine")]
pub use policy_engine as engine;

/// Tracing setup, dry-run enforcement, and audit records (enabled by
/// `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use policy_telemetry as telemetry;
