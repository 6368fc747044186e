//! Application of decisions through a host-supplied enforcer.

use policy_primitives::{Action, AdjustFn, Decision, Reason, Scope};
use tracing::{debug, trace};

/// Host capability that performs the real side effects of decisions.
///
/// The engine calls these in decision order and never catches panics raised
/// by them. Any state they reach (parameter stores, task handles) is the
/// host's to synchronize.
pub trait Enforcer {
    /// Records an advisory signal.
    fn warn(&mut self, policy_id: &str, reason: Option<&Reason>);

    /// Applies a parameter mutation at `scope`.
    fn adjust(&mut self, scope: Scope, adjust: &AdjustFn);

    /// Cancels work at `scope`.
    fn cancel(&mut self, scope: Scope, reason: Option<&Reason>);
}

impl<E> Enforcer for &mut E
where
    E: Enforcer + ?Sized,
{
    fn warn(&mut self, policy_id: &str, reason: Option<&Reason>) {
        (**self).warn(policy_id, reason);
    }

    fn adjust(&mut self, scope: Scope, adjust: &AdjustFn) {
        (**self).adjust(scope, adjust);
    }

    fn cancel(&mut self, scope: Scope, reason: Option<&Reason>) {
        (**self).cancel(scope, reason);
    }
}

/// Applies `decisions` to `enforcer` strictly in order.
///
/// | action           | enforcer call                          |
/// |------------------|----------------------------------------|
/// | `Noop`           | none                                   |
/// | `Warn`           | `warn(policy_id, reason)`              |
/// | `Adjust`         | `adjust(scope, fn)`, none without a fn |
/// | `CancelNode`     | `cancel(Scope::Node, reason)`          |
/// | `CancelSubtree`  | `cancel(Scope::Subtree, reason)`       |
/// | `CancelRoot`     | `cancel(Scope::Root, reason)`          |
///
/// The cancel scope comes from the action, not from the decision's declared
/// scope. Processing ends right after a decision with the stop flag.
pub fn enforce<E>(enforcer: &mut E, decisions: &[Decision])
where
    E: Enforcer + ?Sized,
{
    for decision in decisions {
        apply(enforcer, decision);
        if decision.is_stop() {
            debug!(policy = decision.policy_id(), "stop decision ended enforcement");
            return;
        }
    }
}

fn apply<E>(enforcer: &mut E, decision: &Decision)
where
    E: Enforcer + ?Sized,
{
    let policy = decision.policy_id();
    match decision.action() {
        Action::Noop => trace!(policy, "noop decision"),
        Action::Warn => {
            debug!(policy, "enforcing warn");
            enforcer.warn(policy, decision.reason());
        }
        Action::Adjust => match decision.adjust_fn() {
            Some(adjust) => {
                debug!(policy, scope = %decision.scope(), "enforcing adjust");
                enforcer.adjust(decision.scope(), adjust);
            }
            None => trace!(policy, "adjust decision without closure ignored"),
        },
        Action::CancelNode => cancel(enforcer, decision, Scope::Node),
        Action::CancelSubtree => cancel(enforcer, decision, Scope::Subtree),
        Action::CancelRoot => cancel(enforcer, decision, Scope::Root),
    }
}

fn cancel<E>(enforcer: &mut E, decision: &Decision, scope: Scope)
where
    E: Enforcer + ?Sized,
{
    debug!(policy = decision.policy_id(), %scope, "enforcing cancel");
    enforcer.cancel(scope, decision.reason());
}
