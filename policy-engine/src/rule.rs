//! Closure-backed policy for hosts that do not want to write a policy type.

use std::collections::BTreeSet;
use std::fmt;

use policy_primitives::{Decision, PolicyError, PolicyResult};

use crate::contracts::{Node, Policy};

/// Cheap prefilter over a node's name and parameter keys.
#[derive(Debug, Clone, Default)]
pub struct NodeMatcher {
    name: Option<String>,
    required_params: BTreeSet<String>,
}

impl NodeMatcher {
    /// Creates a matcher that accepts every node.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Creates a matcher accepting nodes with the given name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            required_params: BTreeSet::new(),
        }
    }

    /// Requires that the node's parameters contain every supplied key.
    #[must_use]
    pub fn with_required_params<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for key in keys {
            let key = key.into();
            if !key.trim().is_empty() {
                self.required_params.insert(key);
            }
        }
        self
    }

    /// Returns true when `node` satisfies the matcher.
    #[must_use]
    pub fn matches(&self, node: &dyn Node) -> bool {
        if !self
            .name
            .as_ref()
            .is_none_or(|expected| expected == node.name())
        {
            return false;
        }
        if self.required_params.is_empty() {
            return true;
        }
        let params = node.params();
        self.required_params
            .iter()
            .all(|key| params.contains_key(key))
    }
}

type CheckFn = dyn Fn(&dyn Node) -> Vec<Decision> + Send + Sync;

/// Policy assembled from an id, a priority, a [`NodeMatcher`], and a check
/// closure.
pub struct RulePolicy {
    id: String,
    priority: i32,
    matcher: NodeMatcher,
    check: Box<CheckFn>,
}

impl fmt::Debug for RulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulePolicy")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl RulePolicy {
    /// Creates a new rule policy.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidPolicy`] when the id is empty or only
    /// whitespace.
    pub fn new<F>(
        id: impl Into<String>,
        priority: i32,
        matcher: NodeMatcher,
        check: F,
    ) -> PolicyResult<Self>
    where
        F: Fn(&dyn Node) -> Vec<Decision> + Send + Sync + 'static,
    {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(PolicyError::InvalidPolicy("policy id cannot be empty"));
        }

        Ok(Self {
            id,
            priority,
            matcher,
            check: Box::new(check),
        })
    }

    /// Returns the matcher used as prefilter.
    #[must_use]
    pub fn matcher(&self) -> &NodeMatcher {
        &self.matcher
    }
}

impl Policy for RulePolicy {
    fn id(&self) -> &str {
        &self.id
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn matches(&self, node: &dyn Node) -> bool {
        self.matcher.matches(node)
    }

    fn check(&self, node: &dyn Node) -> Vec<Decision> {
        (self.check)(node)
    }
}
