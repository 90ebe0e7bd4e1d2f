//! # Object Graph Traversal
//!
//! Depth-first traversal of arbitrary object graphs (shared sub-objects and
//! cycles included) with pre-order and post-order hooks.
//!
//! ## Design Philosophy
//!
//! - **Explicit Structure**: node types describe their members once through
//!   a [`TypeInfo`]; nothing is discovered by reflection
//! - **Identity, Not Equality**: revisits are detected by [`NodeId`], the
//!   address of the shared allocation behind a handle
//! - **Owner Before Sibling**: a child listed by a parent is processed under
//!   that parent, never under a sibling that happens to reach it first
//! - **Explicit Cache**: the per-type member lists live in a [`MemberCache`]
//!   handed to the [`HierarchyIterator`]; a process-wide one is available
//!
//! ## Quick Start
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use std::rc::Rc;
//! use traversal::{
//!     GraphNode, HookError, MemberInfo, MemberValue, NodeId, NodeVisitor, PathNode, Shape,
//!     TypeInfo,
//! };
//!
//! struct Folder {
//!     children: Vec<Dir>,
//! }
//!
//! #[derive(Clone)]
//! struct Dir(Rc<Folder>);
//!
//! static FOLDER: Lazy<TypeInfo> =
//!     Lazy::new(|| TypeInfo::of::<Folder>().property("Children", Shape::Sequence));
//!
//! impl GraphNode for Dir {
//!     fn node_id(&self) -> NodeId {
//!         NodeId::of_rc(&self.0)
//!     }
//!
//!     fn type_info(&self) -> &'static TypeInfo {
//!         &FOLDER
//!     }
//!
//!     fn member_value(&self, member: &MemberInfo) -> MemberValue<Self> {
//!         match member.name() {
//!             "Children" => MemberValue::sequence(self.0.children.iter().cloned()),
//!             _ => MemberValue::Absent,
//!         }
//!     }
//! }
//!
//! struct Paths(Vec<String>);
//!
//! impl NodeVisitor<Dir> for Paths {
//!     fn on_enter(&mut self, node: &mut PathNode<'_, Dir>) -> Result<(), HookError> {
//!         self.0.push(node.path().to_string());
//!         Ok(())
//!     }
//!
//!     fn on_exit(&mut self, _node: &mut PathNode<'_, Dir>) -> Result<(), HookError> {
//!         Ok(())
//!     }
//! }
//!
//! let leaf = Dir(Rc::new(Folder { children: vec![] }));
//! let root = Dir(Rc::new(Folder { children: vec![leaf.clone(), leaf] }));
//!
//! let mut paths = Paths(Vec::new());
//! traversal::traverse(Some(&root), None, &mut paths).unwrap();
//!
//! assert_eq!(paths.0, vec!["".to_string(), "Children[0]".to_string()]);
//! ```

pub mod cache;
pub mod error;
pub mod iterator;
pub mod kind;
pub mod member;
pub mod node;
pub mod visitor;

pub use cache::MemberCache;
pub use error::{HookError, HookPhase, TraversalError, TraversalResult};
pub use iterator::{traverse, HierarchyIterator, TraversalSummary};
pub use kind::{kind_of, Classify, LeafKind, TypeKind};
pub use member::{Item, MemberCategory, MemberInfo, MemberValue, Shape, Slot, TypeInfo, Visibility};
pub use node::{GraphNode, NodeId, PathNode};
pub use visitor::NodeVisitor;

// Settings are part of the traversal API surface
pub use traversal_config::TraversalSettings;
