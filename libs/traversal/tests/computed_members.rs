//! Traversal of nodes whose members are built on demand
//!
//! A `Generated` node owns no children: every `member_value` call allocates
//! fresh handles from a blueprint. Once a subtree is finished nothing but
//! the engine holds those handles, so identity must survive the rest of
//! the traversal.

use once_cell::sync::Lazy;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashSet;
use std::rc::Rc;
use traversal::{
    GraphNode, HookError, MemberInfo, MemberValue, NodeId, NodeVisitor, PathNode, Shape,
    TypeInfo,
};

struct Blueprint {
    label: String,
    depth: usize,
    /// Number of `Items` children at each depth
    fan_out: Rc<[usize]>,
    /// Whether nodes below the last fan-out level get a computed `C` child
    derived: bool,
}

static GENERATED: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::of::<Blueprint>()
        .property("Items", Shape::Sequence)
        .property("C", Shape::Node)
});

#[derive(Clone)]
struct Generated(Rc<Blueprint>);

impl Generated {
    fn root(fan_out: &[usize], derived: bool) -> Self {
        Generated(Rc::new(Blueprint {
            label: "root".to_string(),
            depth: 0,
            fan_out: fan_out.into(),
            derived,
        }))
    }

    fn spawn(&self, label: String, derived: bool) -> Self {
        Generated(Rc::new(Blueprint {
            label,
            depth: self.0.depth + 1,
            fan_out: Rc::clone(&self.0.fan_out),
            derived,
        }))
    }
}

impl GraphNode for Generated {
    fn node_id(&self) -> NodeId {
        NodeId::of_rc(&self.0)
    }

    fn type_info(&self) -> &'static TypeInfo {
        &GENERATED
    }

    fn member_value(&self, member: &MemberInfo) -> MemberValue<Self> {
        let blueprint = &self.0;
        match member.name() {
            "Items" => match blueprint.fan_out.get(blueprint.depth) {
                Some(&count) => MemberValue::sequence((0..count).map(|index| {
                    self.spawn(format!("{}.{}", blueprint.label, index), blueprint.derived)
                })),
                None => MemberValue::Absent,
            },
            "C" if blueprint.derived && blueprint.depth == blueprint.fan_out.len() => {
                MemberValue::single(Some(self.spawn(format!("{}.c", blueprint.label), false)))
            }
            _ => MemberValue::Absent,
        }
    }
}

#[derive(Default)]
struct PathLog {
    paths: Vec<String>,
    exits: usize,
}

impl NodeVisitor<Generated> for PathLog {
    fn on_enter(&mut self, node: &mut PathNode<'_, Generated>) -> Result<(), HookError> {
        self.paths.push(node.path().to_string());
        Ok(())
    }

    fn on_exit(&mut self, _node: &mut PathNode<'_, Generated>) -> Result<(), HookError> {
        self.exits += 1;
        Ok(())
    }
}

fn walk(root: &Generated) -> PathLog {
    let mut log = PathLog::default();
    traversal::traverse(Some(root), None, &mut log).unwrap();
    log
}

/// Nodes the blueprint describes, counting computed children
fn expected_nodes(fan_out: &[usize], derived: bool) -> usize {
    let mut level = 1;
    let mut total = 1;
    for count in fan_out {
        level *= count;
        total += level;
    }
    if derived {
        total += level;
    }
    total
}

#[test]
fn test_children_built_per_call_are_each_visited() {
    let root = Generated::root(&[20], true);

    let log = walk(&root);

    let mut expected = vec![String::new()];
    for index in 0..20 {
        expected.push(format!("Items[{}]", index));
        expected.push(format!("Items[{}]/C", index));
    }
    assert_eq!(log.paths, expected);
    assert_eq!(log.exits, 41);
}

#[test]
fn test_summary_counts_every_generated_node() {
    let root = Generated::root(&[3, 4], true);

    let mut log = PathLog::default();
    let summary = traversal::traverse(Some(&root), None, &mut log).unwrap();

    assert_eq!(summary.visited, expected_nodes(&[3, 4], true));
    assert_eq!(summary.visited, 1 + 3 + 12 + 12);
    assert!(!summary.stopped);
}

#[test]
fn test_deep_generated_chain_is_walked_to_the_end() {
    let root = Generated::root(&[1; 12], true);

    let log = walk(&root);

    assert_eq!(log.paths.len(), 14);
    assert_eq!(
        log.paths.last().map(String::as_str),
        Some(format!("{}C", "Items[0]/".repeat(12)).as_str())
    );
}

proptest! {
    #[test]
    fn prop_every_generated_node_is_entered_once(
        fan_out in prop::collection::vec(0usize..4, 0..4),
        derived in any::<bool>(),
    ) {
        let root = Generated::root(&fan_out, derived);

        let log = walk(&root);

        let distinct: HashSet<&String> = log.paths.iter().collect();
        prop_assert_eq!(distinct.len(), log.paths.len());
        prop_assert_eq!(log.paths.len(), expected_nodes(&fan_out, derived));
        prop_assert_eq!(log.exits, log.paths.len());
    }
}
