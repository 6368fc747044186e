//! Priority-ordered policy registry.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::contracts::Policy;

struct Entry {
    priority: i32,
    policy: Arc<dyn Policy>,
}

/// Shared, consistently ordered collection of policies.
///
/// Construct one per evaluation context and pass it (usually behind an
/// [`Arc`]) to whoever evaluates. Policies are kept in ascending priority
/// order; equal priorities keep their registration order. There is no removal:
/// reloading means building a fresh registry.
///
/// The internal lock is held only while inserting and while copying out a
/// snapshot. Policy callbacks always run outside it.
#[derive(Default)]
pub struct PolicyRegistry {
    inner: RwLock<Vec<Entry>>,
}

impl fmt::Debug for PolicyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self
            .snapshot()
            .iter()
            .map(|policy| policy.id().to_owned())
            .collect();
        f.debug_struct("PolicyRegistry")
            .field("registered", &ids)
            .finish()
    }
}

impl PolicyRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a policy owned by the registry.
    ///
    /// See [`PolicyRegistry::register_shared`] for how the priority is read.
    pub fn register<P>(&self, policy: P)
    where
        P: Policy + 'static,
    {
        self.register_shared(Arc::new(policy));
    }

    /// Registers a policy instance that the caller keeps sharing.
    ///
    /// The policy's priority is read once, here, and used as its sort key for
    /// as long as it stays registered. A policy whose `priority()` later
    /// returns a different value keeps the slot it was given; register it into
    /// a fresh registry to reorder it.
    ///
    /// `priority()` runs before the lock is taken, so a panic there leaves
    /// the registry untouched and still usable.
    pub fn register_shared(&self, policy: Arc<dyn Policy>) {
        let priority = policy.priority();
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        // Insert after every entry with priority <= ours; identical to a
        // stable sort of the append order.
        let index = inner.partition_point(|entry| entry.priority <= priority);
        inner.insert(
            index,
            Entry {
                priority,
                policy: Arc::clone(&policy),
            },
        );
        let count = inner.len();
        drop(inner);

        debug!(policy = policy.id(), priority, count, "policy registered");
    }

    /// Returns a point-in-time copy of the registered policies in evaluation
    /// order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Arc<dyn Policy>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.iter().map(|entry| Arc::clone(&entry.policy)).collect()
    }

    /// Returns the number of registered policies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true when no policy has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
