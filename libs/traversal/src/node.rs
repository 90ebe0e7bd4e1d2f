//! Node identity and path bookkeeping

use crate::kind::TypeKind;
use crate::member::{MemberInfo, MemberValue, TypeInfo};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use traversal_config::naming::PATH_SEPARATOR;

/// Identity of a node value
///
/// Two handles share a `NodeId` exactly when they point at the same
/// allocation. Equality of contents plays no part. An id only names a node
/// while some handle keeps the allocation alive; the engine holds a handle
/// to every node it has visited until the traversal returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn of_ptr<X: ?Sized>(ptr: *const X) -> Self {
        Self(ptr as *const () as usize)
    }

    pub fn of_rc<X: ?Sized>(rc: &Rc<X>) -> Self {
        Self::of_ptr(Rc::as_ptr(rc))
    }

    pub fn of_arc<X: ?Sized>(arc: &Arc<X>) -> Self {
        Self::of_ptr(Arc::as_ptr(arc))
    }
}

/// A handle to a value the engine can traverse
///
/// Implemented on cheap-to-clone handles (typically an enum over
/// `Rc<RefCell<_>>` variants). `member_value` is called once per cached
/// member and should release any interior borrow before returning. It may
/// build fresh handles on every call; each fresh allocation is a distinct
/// node.
pub trait GraphNode: Clone {
    /// Declared kind of the node type itself; leaf kinds are rejected
    const DECLARED_KIND: TypeKind = TypeKind::Composite;

    fn node_id(&self) -> NodeId;

    /// Descriptor of the value's runtime type
    fn type_info(&self) -> &'static TypeInfo;

    fn member_value(&self, member: &MemberInfo) -> MemberValue<Self>;

    fn type_name(&self) -> &'static str {
        self.type_info().name()
    }
}

/// One visited position in the graph
pub struct PathNode<'p, T> {
    parent: Option<&'p PathNode<'p, T>>,
    value: T,
    name: String,
    path: String,
    stop: bool,
}

impl<'p, T: GraphNode> PathNode<'p, T> {
    /// Root node: named after the value's runtime type, with an empty path
    pub fn root(value: T) -> Self {
        let name = value.type_name().to_string();
        Self {
            parent: None,
            value,
            name,
            path: String::new(),
            stop: false,
        }
    }
}

impl<'p, T> PathNode<'p, T> {
    pub fn child(parent: &'p PathNode<'p, T>, value: T, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = if parent.path.is_empty() {
            name.clone()
        } else {
            format!("{}{}{}", parent.path, PATH_SEPARATOR, name)
        };

        Self {
            parent: Some(parent),
            value,
            name,
            path,
            stop: false,
        }
    }

    pub fn parent(&self) -> Option<&'p PathNode<'p, T>> {
        self.parent
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-joined path from the root; empty for the root itself
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent, |node| node.parent).count()
    }

    /// Prune this node: no further children, no exit hook, and the stop
    /// travels up to every ancestor.
    pub fn stop(&mut self) {
        self.stop = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stop
    }
}

impl<T> fmt::Debug for PathNode<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("stop", &self.stop)
            .finish()
    }
}
