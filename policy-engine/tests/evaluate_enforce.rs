use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use policy_engine::{
    Action, AdjustFn, Decision, Enforcer, Node, Params, Policy, PolicyRegistry, Reason, Scope,
    enforce, evaluate, reason,
};
use serde_json::Value;

struct TestNode {
    id: String,
    name: String,
    params: Params,
    parent: Option<Box<TestNode>>,
}

impl TestNode {
    fn new_root(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            params: Params::new(),
            parent: None,
        }
    }

    fn child_of(parent: TestNode, id: &str, name: &str) -> Self {
        Self {
            parent: Some(Box::new(parent)),
            ..Self::new_root(id, name)
        }
    }
}

impl Node for TestNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn params(&self) -> Params {
        self.params.clone()
    }

    fn parent(&self) -> Option<&dyn Node> {
        self.parent.as_deref().map(|p| p as &dyn Node)
    }

    fn root(&self) -> &dyn Node {
        match &self.parent {
            Some(parent) => parent.root(),
            None => self,
        }
    }
}

struct WarnA;

impl Policy for WarnA {
    fn id(&self) -> &str {
        "A"
    }

    fn priority(&self) -> i32 {
        10
    }

    fn matches(&self, _node: &dyn Node) -> bool {
        true
    }

    fn check(&self, _node: &dyn Node) -> Vec<Decision> {
        vec![Decision::warn("A", reason("warn A"))]
    }
}

struct StopB;

impl Policy for StopB {
    fn id(&self) -> &str {
        "B"
    }

    fn priority(&self) -> i32 {
        5
    }

    fn matches(&self, _node: &dyn Node) -> bool {
        true
    }

    fn check(&self, _node: &dyn Node) -> Vec<Decision> {
        vec![
            Decision::adjust("B", Scope::Root, |p| {
                p.insert("x".into(), Value::from(1));
            })
            .with_reason("stop")
            .with_stop(),
        ]
    }
}

#[derive(Debug, PartialEq)]
enum Call {
    Warn(String),
    Adjust(Scope, Params),
    Cancel(Scope),
}

#[derive(Default)]
struct RecordingEnforcer {
    calls: Vec<Call>,
}

impl Enforcer for RecordingEnforcer {
    fn warn(&mut self, policy_id: &str, _reason: Option<&Reason>) {
        self.calls.push(Call::Warn(policy_id.to_owned()));
    }

    fn adjust(&mut self, scope: Scope, adjust: &AdjustFn) {
        let mut params = Params::new();
        adjust(&mut params);
        self.calls.push(Call::Adjust(scope, params));
    }

    fn cancel(&mut self, scope: Scope, _reason: Option<&Reason>) {
        self.calls.push(Call::Cancel(scope));
    }
}

#[test]
fn lower_priority_stop_shadows_later_policy() {
    let registry = PolicyRegistry::new();
    registry.register(WarnA);
    registry.register(StopB);

    let node = TestNode::new_root("n1", "N");
    let decisions = registry.evaluate(&node);

    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].policy_id(), "B");
    assert_eq!(decisions[0].action(), Action::Adjust);
    assert_eq!(decisions[0].scope(), Scope::Root);
    assert!(decisions[0].is_stop());
}

#[test]
fn enforce_replays_warn_adjust_cancel_in_order() {
    let decisions = [
        Decision::new("W", Scope::Node, Action::Warn),
        Decision::adjust("A", Scope::Subtree, |p| {
            p.insert("y".into(), Value::from(2));
        }),
        Decision::new("C", Scope::Root, Action::CancelRoot),
    ];
    let mut enforcer = RecordingEnforcer::default();

    enforce(&mut enforcer, &decisions);

    let mut adjusted = Params::new();
    adjusted.insert("y".into(), Value::from(2));
    assert_eq!(
        enforcer.calls,
        [
            Call::Warn("W".into()),
            Call::Adjust(Scope::Subtree, adjusted),
            Call::Cancel(Scope::Root),
        ]
    );
}

#[test]
fn reason_message_is_verbatim() {
    let err = reason("hello");
    assert_eq!(err.to_string(), "hello");
}

#[test]
fn evaluate_then_enforce_stop_at_same_place() {
    let registry = PolicyRegistry::new();
    registry.register(WarnA);
    registry.register(StopB);

    let node = TestNode::new_root("n1", "N");
    let decisions = registry.evaluate(&node);
    let mut enforcer = RecordingEnforcer::default();
    enforce(&mut enforcer, &decisions);

    let mut adjusted = Params::new();
    adjusted.insert("x".into(), Value::from(1));
    assert_eq!(enforcer.calls, [Call::Adjust(Scope::Root, adjusted)]);
}

#[test]
fn repeated_evaluation_is_identical() {
    let registry = PolicyRegistry::new();
    registry.register(WarnA);

    let node = TestNode::child_of(TestNode::new_root("root", "R"), "leaf", "L");
    let first = registry.evaluate(&node);
    let second = registry.evaluate(&node);

    let summary = |ds: &[Decision]| {
        ds.iter()
            .map(|d| {
                (
                    d.policy_id().to_owned(),
                    d.scope(),
                    d.action(),
                    d.reason().cloned(),
                    d.is_stop(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&first), summary(&second));
    assert_eq!(first.len(), 1);
}

#[test]
fn policies_can_walk_lineage() {
    struct RootGuard;

    impl Policy for RootGuard {
        fn id(&self) -> &str {
            "root-guard"
        }

        fn priority(&self) -> i32 {
            0
        }

        fn matches(&self, node: &dyn Node) -> bool {
            node.parent().is_some()
        }

        fn check(&self, node: &dyn Node) -> Vec<Decision> {
            if node.root().name() == "batch" {
                vec![Decision::cancel_subtree("root-guard", "batch children are frozen")]
            } else {
                Vec::new()
            }
        }
    }

    let policies: Vec<Arc<dyn Policy>> = vec![Arc::new(RootGuard)];
    let root = TestNode::new_root("r", "batch");
    assert!(evaluate(&policies, &root).is_empty());

    let leaf = TestNode::child_of(TestNode::new_root("r", "batch"), "c", "step");
    let decisions = evaluate(&policies, &leaf);
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].action(), Action::CancelSubtree);
}

#[test]
fn concurrent_registration_never_exposes_unsorted_snapshot() {
    struct Ranked(i32);

    impl Policy for Ranked {
        fn id(&self) -> &str {
            "ranked"
        }

        fn priority(&self) -> i32 {
            self.0
        }

        fn matches(&self, _node: &dyn Node) -> bool {
            true
        }

        fn check(&self, _node: &dyn Node) -> Vec<Decision> {
            Vec::new()
        }
    }

    let registry = Arc::new(PolicyRegistry::new());
    let writers: Vec<_> = (0..4)
        .map(|w| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..50 {
                    registry.register(Ranked((i * 7 + w * 13) % 31));
                }
            })
        })
        .collect();
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let node = TestNode::new_root("n", "N");
                for _ in 0..50 {
                    let snapshot = registry.snapshot();
                    assert!(
                        snapshot
                            .windows(2)
                            .all(|w| w[0].priority() <= w[1].priority())
                    );
                    assert!(registry.evaluate(&node).is_empty());
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().expect("thread panicked");
    }
    assert_eq!(registry.len(), 200);
}

#[test]
#[should_panic(expected = "executor failure")]
fn enforcer_panics_propagate() {
    struct Failing;

    impl Enforcer for Failing {
        fn warn(&mut self, _policy_id: &str, _reason: Option<&Reason>) {
            panic!("executor failure");
        }

        fn adjust(&mut self, _scope: Scope, _adjust: &AdjustFn) {}

        fn cancel(&mut self, _scope: Scope, _reason: Option<&Reason>) {}
    }

    enforce(&mut Failing, &[Decision::warn("w", "boom")]);
}

struct Faulty {
    panic_on_priority: bool,
}

impl Policy for Faulty {
    fn id(&self) -> &str {
        "faulty"
    }

    fn priority(&self) -> i32 {
        assert!(!self.panic_on_priority, "priority lookup failed");
        1
    }

    fn matches(&self, _node: &dyn Node) -> bool {
        true
    }

    fn check(&self, _node: &dyn Node) -> Vec<Decision> {
        panic!("policy check failed");
    }
}

#[test]
#[should_panic(expected = "policy check failed")]
fn policy_check_panics_propagate() {
    let registry = PolicyRegistry::new();
    registry.register(Faulty {
        panic_on_priority: false,
    });

    let _ = registry.evaluate(&TestNode::new_root("n1", "N"));
}

#[test]
fn priority_panic_leaves_registry_usable() {
    let registry = PolicyRegistry::new();
    registry.register(WarnA);

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        registry.register(Faulty {
            panic_on_priority: true,
        });
    }));
    assert!(outcome.is_err());
    assert_eq!(registry.len(), 1);

    registry.register(StopB);
    assert_eq!(registry.len(), 2);

    let decisions = registry.evaluate(&TestNode::new_root("n1", "N"));
    assert_eq!(decisions.len(), 1);
    assert_eq!(decisions[0].policy_id(), "B");
}
