//! # Hierarchy Iterator - Depth-First Graph Traversal
//!
//! ## Purpose
//!
//! Visits every node reachable from a root exactly once, depth-first, calling
//! a [`NodeVisitor`] before and after each node's children. Children are
//! discovered through the node's [`TypeInfo`](crate::TypeInfo) members,
//! filtered by [`TraversalSettings`] and cached in a [`MemberCache`].
//!
//! ## Ordering Guarantees
//!
//! - **Exactly once**: a `visited` map keyed by [`NodeId`] bounds cycles and
//!   shared references. It holds a handle to every visited node until the
//!   call returns, so an address cannot be reused by a node that a getter
//!   builds on demand later in the same traversal.
//! - **Owner before sibling**: when a node collects its children, each child
//!   is placed in a `reserved` set until the node gets to it. Any other path
//!   that reaches a reserved value in the meantime skips it, so a value listed
//!   by a parent is processed under that parent even if an earlier sibling
//!   also references it.
//! - **Strict nesting**: `on_enter(node)` precedes every hook of its subtree,
//!   which all precede `on_exit(node)`.
//!
//! ## Child Naming
//!
//! | Member value | Child name |
//! |--------------|-----------|
//! | single node | `Member` |
//! | sequence element | `Member[index]` (nulls count) |
//! | map key | `Member.Keys[index]` |
//! | map value, leaf key | `Member[key]` (key cut to 100 chars) |
//! | map value, other key | `Member.Values[index]` |
//! | node inside a mixed collection | `Member[index]` |
//!
//! ## Early Exit
//!
//! A hook may stop its node. The stop then climbs to every ancestor: the
//! remaining siblings and the `on_exit` hooks along the active path are
//! skipped. A hook error stops the whole traversal and is returned wrapped
//! with the path of the failing node.

use crate::cache::MemberCache;
use crate::error::{HookPhase, TraversalError, TraversalResult};
use crate::member::{Item, MemberInfo, MemberValue, Shape, Slot};
use crate::node::{GraphNode, NodeId, PathNode};
use crate::visitor::NodeVisitor;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, trace, warn};
use traversal_config::naming::{MAP_KEYS_SUFFIX, MAP_VALUES_SUFFIX, MAX_KEY_NAME_LENGTH};
use traversal_config::TraversalSettings;

/// What a finished traversal looked like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalSummary {
    /// Nodes whose enter hook ran
    pub visited: usize,
    /// True when a stop flag or a hook error ended the traversal early
    pub stopped: bool,
}

/// Depth-first traversal engine bound to a member cache
#[derive(Debug, Clone, Copy)]
pub struct HierarchyIterator<'c> {
    cache: &'c MemberCache,
}

impl Default for HierarchyIterator<'static> {
    fn default() -> Self {
        Self::new(MemberCache::global())
    }
}

impl<'c> HierarchyIterator<'c> {
    pub fn new(cache: &'c MemberCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &'c MemberCache {
        self.cache
    }

    /// Traverse the graph below `root`
    ///
    /// A `None` root is a no-op. Default settings apply when `settings` is
    /// `None`. Node types whose declared kind is a leaf are rejected.
    pub fn traverse<T, V>(
        &self,
        root: Option<&T>,
        settings: Option<&TraversalSettings>,
        visitor: &mut V,
    ) -> TraversalResult<TraversalSummary>
    where
        T: GraphNode,
        V: NodeVisitor<T> + ?Sized,
    {
        if T::DECLARED_KIND.is_leaf() {
            return Err(TraversalError::InvalidArgument(format!(
                "cannot traverse a graph of leaf values ({:?})",
                T::DECLARED_KIND
            )));
        }

        let Some(root) = root else {
            trace!("Traversal skipped: no root");
            return Ok(TraversalSummary::default());
        };

        let default_settings;
        let settings = match settings {
            Some(settings) => settings,
            None => {
                default_settings = TraversalSettings::default();
                &default_settings
            }
        };

        let mut traversal = Traversal {
            cache: self.cache,
            settings,
            visitor,
            state: TraversalState::default(),
            stopped: false,
        };

        let mut node = PathNode::root(root.clone());
        debug!("Traversal started at {}", node.name());

        let result = traversal.visit(&mut node);
        let summary = TraversalSummary {
            visited: traversal.state.visited.len(),
            stopped: traversal.stopped || node.is_stopped(),
        };

        debug!(
            "Traversal finished at {}: {} nodes visited, stopped: {}",
            node.name(),
            summary.visited,
            summary.stopped
        );

        result.map(|()| summary)
    }
}

/// Traverse with the process-wide member cache
pub fn traverse<T, V>(
    root: Option<&T>,
    settings: Option<&TraversalSettings>,
    visitor: &mut V,
) -> TraversalResult<TraversalSummary>
where
    T: GraphNode,
    V: NodeVisitor<T> + ?Sized,
{
    HierarchyIterator::default().traverse(root, settings, visitor)
}

/// Per-call bookkeeping; never shared between traversals
///
/// Visited handles stay alive until the traversal ends: a [`NodeId`] is an
/// address and must not be handed to another node while it is recorded.
struct TraversalState<T> {
    visited: HashMap<NodeId, T>,
    reserved: HashSet<NodeId>,
}

impl<T> Default for TraversalState<T> {
    fn default() -> Self {
        Self {
            visited: HashMap::new(),
            reserved: HashSet::new(),
        }
    }
}

/// A child claimed by its owner and waiting for its turn
struct PendingChild<T> {
    id: NodeId,
    value: T,
    name: String,
}

struct Traversal<'a, T, V: ?Sized> {
    cache: &'a MemberCache,
    settings: &'a TraversalSettings,
    visitor: &'a mut V,
    state: TraversalState<T>,
    stopped: bool,
}

impl<'a, T, V> Traversal<'a, T, V>
where
    T: GraphNode,
    V: NodeVisitor<T> + ?Sized,
{
    fn visit(&mut self, node: &mut PathNode<'_, T>) -> TraversalResult<()> {
        let id = node.value().node_id();

        if self.state.visited.contains_key(&id) {
            return Ok(());
        }
        if self.state.reserved.contains(&id) {
            trace!("Deferring '{}': reserved by its owner", node.path());
            return Ok(());
        }

        self.state.visited.insert(id, node.value().clone());
        self.run_hook(HookPhase::Enter, node)?;
        if self.stopped || node.is_stopped() {
            return Ok(());
        }

        for pending in self.discover_children(node) {
            if !self.state.reserved.remove(&pending.id) {
                self.stopped = true;
                let path = PathNode::child(&*node, pending.value, pending.name)
                    .path()
                    .to_string();
                error!("Reservation lost for '{}'", path);
                return Err(TraversalError::ReservationLost { path });
            }

            let child_stopped = {
                let mut child = PathNode::child(&*node, pending.value, pending.name);
                self.visit(&mut child)?;
                child.is_stopped()
            };

            if self.stopped || child_stopped {
                node.stop();
                return Ok(());
            }
        }

        self.run_hook(HookPhase::Exit, node)
    }

    fn run_hook(&mut self, phase: HookPhase, node: &mut PathNode<'_, T>) -> TraversalResult<()> {
        trace!("{} '{}'", phase, node.path());

        let result = match phase {
            HookPhase::Enter => self.visitor.on_enter(node),
            HookPhase::Exit => self.visitor.on_exit(node),
        };

        result.map_err(|source| {
            self.stopped = true;
            warn!("{} hook failed at '{}': {}", phase, node.path(), source);
            TraversalError::Hook {
                phase,
                path: node.path().to_string(),
                source,
            }
        })
    }

    fn discover_children(&mut self, node: &PathNode<'_, T>) -> Vec<PendingChild<T>> {
        let value = node.value();
        let members = self.cache.members(value.type_info(), self.settings);
        let mut children = Vec::new();

        for member in members.iter() {
            let member_value = value.member_value(member);
            self.collect_member(member, &member_value, &mut children);
        }

        children
    }

    fn collect_member(
        &mut self,
        member: &MemberInfo,
        value: &MemberValue<T>,
        children: &mut Vec<PendingChild<T>>,
    ) {
        let name = member.name();

        let fully_handled = match value {
            MemberValue::Absent => true,
            MemberValue::Single(child) => {
                self.claim(child, name.to_string(), children);
                true
            }
            MemberValue::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    if let Some(child) = item {
                        self.claim(child, format!("{}[{}]", name, index), children);
                    }
                }
                true
            }
            MemberValue::Map(entries) => match member.shape() {
                Shape::Map {
                    key: key_slot,
                    value: value_slot,
                } => self.collect_typed_map(name, key_slot, value_slot, entries, children),
                _ => {
                    self.collect_untyped_map(name, entries, children);
                    false
                }
            },
            MemberValue::Items(_) => false,
        };

        if !fully_handled {
            for (index, element) in value.elements().into_iter().enumerate() {
                if let Some(child) = element {
                    self.claim(child, format!("{}[{}]", name, index), children);
                }
            }
        }
    }

    /// Map with declared slot types; fully handled only when both slots are nodes
    fn collect_typed_map(
        &mut self,
        name: &str,
        key_slot: Slot,
        value_slot: Slot,
        entries: &[(Item<T>, Item<T>)],
        children: &mut Vec<PendingChild<T>>,
    ) -> bool {
        let simple_keys = matches!(key_slot, Slot::Leaf(_));

        if key_slot.is_node() {
            for (index, (key, _)) in entries.iter().enumerate() {
                if let Some(child) = key.node() {
                    self.claim(child, keys_name(name, index), children);
                }
            }
        }

        if value_slot.is_node() {
            for (index, (key, value)) in entries.iter().enumerate() {
                if let Some(child) = value.node() {
                    let child_name = match key.scalar() {
                        Some(text) if simple_keys => keyed_name(name, text),
                        _ => values_name(name, index),
                    };
                    self.claim(child, child_name, children);
                }
            }
        }

        key_slot.is_node() && value_slot.is_node()
    }

    /// Map known only at runtime; every entry decides for itself
    fn collect_untyped_map(
        &mut self,
        name: &str,
        entries: &[(Item<T>, Item<T>)],
        children: &mut Vec<PendingChild<T>>,
    ) {
        for (index, (key, _)) in entries.iter().enumerate() {
            if let Some(child) = key.node() {
                self.claim(child, keys_name(name, index), children);
            }
        }

        for (index, (key, value)) in entries.iter().enumerate() {
            if let Some(child) = value.node() {
                let child_name = match key.scalar() {
                    Some(text) => keyed_name(name, text),
                    None => values_name(name, index),
                };
                self.claim(child, child_name, children);
            }
        }
    }

    fn claim(&mut self, child: &T, name: String, children: &mut Vec<PendingChild<T>>) {
        let id = child.node_id();

        if self.state.visited.contains_key(&id) {
            trace!("Skipping '{}': already visited", name);
            return;
        }
        if !self.state.reserved.insert(id) {
            trace!("Skipping '{}': already reserved", name);
            return;
        }

        children.push(PendingChild {
            id,
            value: child.clone(),
            name,
        });
    }
}

fn keys_name(member: &str, index: usize) -> String {
    format!("{}.{}[{}]", member, MAP_KEYS_SUFFIX, index)
}

fn values_name(member: &str, index: usize) -> String {
    format!("{}.{}[{}]", member, MAP_VALUES_SUFFIX, index)
}

fn keyed_name(member: &str, key: &str) -> String {
    let key: String = key.chars().take(MAX_KEY_NAME_LENGTH).collect();
    format!("{}[{}]", member, key)
}
