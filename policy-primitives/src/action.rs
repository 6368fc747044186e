//! Scope and action tags carried by decisions.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Where a decision applies within the host's execution tree.
///
/// The engine treats the value as an opaque tag; what "subtree" or "root"
/// means is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The target node only.
    #[default]
    Node,
    /// The target node and all of its descendants.
    Subtree,
    /// The root of the tree containing the target node.
    Root,
}

impl Scope {
    /// Returns the snake-case label used in logs and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Subtree => "subtree",
            Self::Root => "root",
        }
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation requested by a decision; selects the enforcer call it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// No effect. Useful for dry runs and placeholders.
    #[default]
    Noop,
    /// Advisory signal for logs or metrics.
    Warn,
    /// Mutate parameters through the decision's adjust closure.
    Adjust,
    /// Cancel the target node only.
    CancelNode,
    /// Cancel the target node and its descendants.
    CancelSubtree,
    /// Cancel the root of the target's tree.
    CancelRoot,
}

impl Action {
    /// Returns the scope a cancel action applies to, or `None` for any other
    /// action.
    #[must_use]
    pub const fn cancel_scope(self) -> Option<Scope> {
        match self {
            Self::CancelNode => Some(Scope::Node),
            Self::CancelSubtree => Some(Scope::Subtree),
            Self::CancelRoot => Some(Scope::Root),
            Self::Noop | Self::Warn | Self::Adjust => None,
        }
    }

    /// Returns true for the three cancel actions.
    #[must_use]
    pub const fn is_cancel(self) -> bool {
        self.cancel_scope().is_some()
    }

    /// Returns the snake-case label used in logs and serialized output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Warn => "warn",
            Self::Adjust => "adjust",
            Self::CancelNode => "cancel_node",
            Self::CancelSubtree => "cancel_subtree",
            Self::CancelRoot => "cancel_root",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
