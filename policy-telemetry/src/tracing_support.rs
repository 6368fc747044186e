//! Structured tracing helpers.

use anyhow::{Context, anyhow, ensure};
use policy_engine::{AdjustFn, Enforcer, Reason, Scope};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Settings for the process-wide tracing subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    filter: String,
    with_target: bool,
    ansi: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
            with_target: false,
            ansi: true,
        }
    }
}

impl TelemetryConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fallback filter directive used when `RUST_LOG` is unset.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Includes event targets in formatted output.
    #[must_use]
    pub fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Returns the fallback filter directive.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the filter directive is blank.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            !self.filter.trim().is_empty(),
            "tracing filter cannot be empty"
        );
        Ok(())
    }
}

/// Installs a formatted subscriber for the whole process.
///
/// `RUST_LOG` wins over the configured filter when it parses.
///
/// # Errors
///
/// Fails when the configuration is invalid, the filter does not parse, or a
/// global subscriber is already installed.
pub fn init_tracing(config: &TelemetryConfig) -> anyhow::Result<()> {
    config.validate()?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.filter()))
        .with_context(|| format!("invalid tracing filter `{}`", config.filter()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_ansi(config.ansi)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("failed to install tracing subscriber")
}

/// Dry-run enforcer: logs every effect instead of performing it.
///
/// Pair with `enforce` to preview what a decision sequence would do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TracingEnforcer {
    warns: usize,
    adjusts: usize,
    cancels: usize,
}

impl TracingEnforcer {
    /// Creates an enforcer with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of warn calls received.
    #[must_use]
    pub const fn warns(&self) -> usize {
        self.warns
    }

    /// Number of adjust calls received.
    #[must_use]
    pub const fn adjusts(&self) -> usize {
        self.adjusts
    }

    /// Number of cancel calls received.
    #[must_use]
    pub const fn cancels(&self) -> usize {
        self.cancels
    }
}

impl Enforcer for TracingEnforcer {
    fn warn(&mut self, policy_id: &str, reason: Option<&Reason>) {
        self.warns += 1;
        warn!(policy = policy_id, reason = reason.map(Reason::message), "policy warning");
    }

    fn adjust(&mut self, scope: Scope, _adjust: &AdjustFn) {
        self.adjusts += 1;
        info!(%scope, "dry run: parameters would be adjusted");
    }

    fn cancel(&mut self, scope: Scope, reason: Option<&Reason>) {
        self.cancels += 1;
        info!(%scope, reason = reason.map(Reason::message), "dry run: work would be cancelled");
    }
}
