//! Shared fixtures for traversal integration tests
//!
//! `Obj` is a dynamically populated node: every instance uses the `Entity`
//! descriptor, which declares one member of each shape. Tests fill in only
//! the members they care about. Graphs are built inside a [`Graph`] arena,
//! which clears every member on drop so that cyclic graphs do not leak.

#![allow(dead_code)]

use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use traversal::{
    HookError, HookPhase, Item, MemberInfo, MemberValue, NodeId, NodeVisitor, PathNode, Shape,
    Slot, TypeInfo,
};
use traversal::GraphNode;

pub struct Entity;

pub static ENTITY: Lazy<TypeInfo> = Lazy::new(|| {
    TypeInfo::of::<Entity>()
        .property("Name", Shape::leaf::<String>())
        .property("First", Shape::Node)
        .property("Second", Shape::Node)
        .property("Items", Shape::Sequence)
        .property("Typed", Shape::map(Slot::leaf::<String>(), Slot::Node))
        .property("ByNode", Shape::map(Slot::Node, Slot::Node))
        .property("NodeKeys", Shape::map(Slot::Node, Slot::leaf::<u32>()))
        .property("Loose", Shape::UntypedMap)
        .property("Mixed", Shape::Enumerable)
        .field("next", Shape::Node)
        .member(MemberInfo::field("hidden", Shape::Node).private())
        .member(MemberInfo::property("Secret", Shape::Node).private())
        .member(MemberInfo::field("outer", Shape::Node).back_reference())
});

pub struct Object {
    label: String,
    members: RefCell<Vec<(String, MemberValue<Obj>)>>,
}

#[derive(Clone)]
pub struct Obj(Rc<Object>);

impl Obj {
    pub fn label(&self) -> &str {
        &self.0.label
    }

    pub fn set(&self, member: &str, value: MemberValue<Obj>) {
        let mut members = self.0.members.borrow_mut();
        members.retain(|(name, _)| name != member);
        members.push((member.to_string(), value));
    }

    pub fn link(&self, member: &str, target: &Obj) {
        self.set(member, MemberValue::Single(target.clone()));
    }

    pub fn items(&self, member: &str, targets: &[Option<&Obj>]) {
        self.set(
            member,
            MemberValue::Sequence(targets.iter().map(|t| t.cloned()).collect()),
        );
    }
}

impl GraphNode for Obj {
    fn node_id(&self) -> NodeId {
        NodeId::of_rc(&self.0)
    }

    fn type_info(&self) -> &'static TypeInfo {
        &ENTITY
    }

    fn member_value(&self, member: &MemberInfo) -> MemberValue<Self> {
        self.0
            .members
            .borrow()
            .iter()
            .find(|(name, _)| name == member.name())
            .map(|(_, value)| value.clone())
            .unwrap_or(MemberValue::Absent)
    }
}

pub fn node(obj: &Obj) -> Item<Obj> {
    Item::Node(obj.clone())
}

pub fn scalar(text: &str) -> Item<Obj> {
    Item::Scalar(text.to_string())
}

/// Arena owning every object of one test graph
#[derive(Default)]
pub struct Graph {
    objects: Vec<Obj>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str) -> Obj {
        let obj = Obj(Rc::new(Object {
            label: label.to_string(),
            members: RefCell::new(Vec::new()),
        }));
        self.objects.push(obj.clone());
        obj
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn get(&self, index: usize) -> &Obj {
        &self.objects[index]
    }
}

impl Drop for Graph {
    fn drop(&mut self) {
        for obj in &self.objects {
            obj.0.members.borrow_mut().clear();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub phase: HookPhase,
    pub label: String,
    pub path: String,
}

pub fn enter(label: &str, path: &str) -> Event {
    Event {
        phase: HookPhase::Enter,
        label: label.to_string(),
        path: path.to_string(),
    }
}

pub fn exit(label: &str, path: &str) -> Event {
    Event {
        phase: HookPhase::Exit,
        label: label.to_string(),
        path: path.to_string(),
    }
}

/// Visitor recording every hook call, optionally stopping or failing on
/// chosen labels
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    pub stop_on_enter: HashSet<String>,
    pub stop_on_exit: HashSet<String>,
    pub fail_on_enter: HashSet<String>,
    pub fail_on_exit: HashSet<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stopping_on_enter(mut self, label: &str) -> Self {
        self.stop_on_enter.insert(label.to_string());
        self
    }

    pub fn stopping_on_exit(mut self, label: &str) -> Self {
        self.stop_on_exit.insert(label.to_string());
        self
    }

    pub fn failing_on_enter(mut self, label: &str) -> Self {
        self.fail_on_enter.insert(label.to_string());
        self
    }

    pub fn failing_on_exit(mut self, label: &str) -> Self {
        self.fail_on_exit.insert(label.to_string());
        self
    }

    pub fn entered(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.phase == HookPhase::Enter)
            .map(|e| e.label.as_str())
            .collect()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.phase == HookPhase::Enter)
            .map(|e| e.path.as_str())
            .collect()
    }

    fn record(
        &mut self,
        phase: HookPhase,
        node: &mut PathNode<'_, Obj>,
    ) -> Result<(), HookError> {
        let label = node.value().label().to_string();
        self.events.push(Event {
            phase,
            label: label.clone(),
            path: node.path().to_string(),
        });

        let (stops, fails) = match phase {
            HookPhase::Enter => (&self.stop_on_enter, &self.fail_on_enter),
            HookPhase::Exit => (&self.stop_on_exit, &self.fail_on_exit),
        };

        if fails.contains(&label) {
            return Err(format!("{} refused by {}", phase, label).into());
        }
        if stops.contains(&label) {
            node.stop();
        }
        Ok(())
    }
}

impl NodeVisitor<Obj> for Recorder {
    fn on_enter(&mut self, node: &mut PathNode<'_, Obj>) -> Result<(), HookError> {
        self.record(HookPhase::Enter, node)
    }

    fn on_exit(&mut self, node: &mut PathNode<'_, Obj>) -> Result<(), HookError> {
        self.record(HookPhase::Exit, node)
    }
}
