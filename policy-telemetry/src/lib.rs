//! Observability helpers for hosts embedding the policy engine.

#![warn(missing_docs, clippy::pedantic)]

pub mod audit;
pub mod tracing_support;

pub use audit::DecisionAudit;
pub use tracing_support::{TelemetryConfig, TracingEnforcer, init_tracing};
