//! # Structural Type Descriptors
//!
//! The engine never inspects a value's layout on its own. Every node type
//! publishes a [`TypeInfo`]: its simple name plus the ordered list of members
//! it declares, each tagged with a [`Shape`] saying how children hide inside
//! it. At traversal time the node hands back a [`MemberValue`] per member.
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use traversal::{MemberInfo, Shape, Slot, TypeInfo};
//!
//! struct Mailbox;
//!
//! static MAILBOX: Lazy<TypeInfo> = Lazy::new(|| {
//!     TypeInfo::of::<Mailbox>()
//!         .property("Address", Shape::leaf::<String>())
//!         .property("Folders", Shape::Sequence)
//!         .property("Rules", Shape::map(Slot::leaf::<String>(), Slot::Node))
//!         .member(MemberInfo::field("parent", Shape::Node).private().back_reference())
//! });
//!
//! assert_eq!(MAILBOX.name(), "Mailbox");
//! assert_eq!(MAILBOX.members().len(), 4);
//! ```

use crate::kind::{Classify, LeafKind};
use std::any::TypeId;
use std::fmt;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Member category, mirroring the two independently selectable axes of
/// [`TraversalSettings`](traversal_config::TraversalSettings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    Property,
    Field,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Private,
}

/// Declared type of one slot of a generic map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Assignable to the traversed node type
    Node,
    Leaf(LeafKind),
    Other,
}

impl Slot {
    /// `Leaf` for leaf types, `Other` for everything else
    pub fn leaf<X: Classify + ?Sized>() -> Self {
        match X::KIND.leaf_kind() {
            Some(kind) => Slot::Leaf(kind),
            None => Slot::Other,
        }
    }

    pub fn is_node(self) -> bool {
        self == Slot::Node
    }
}

/// Declared shape of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Atomic value, never expanded
    Leaf(LeafKind),
    /// A single node
    Node,
    /// A sequence of nodes
    Sequence,
    /// A map with declared key and value types
    Map { key: Slot, value: Slot },
    /// A map whose entries are only known at runtime
    UntypedMap,
    /// A collection that may hold nodes among other values
    Enumerable,
    /// A composite value that neither is a node nor holds any
    Opaque,
}

impl Shape {
    /// `Leaf` for leaf types, `Opaque` for everything else
    pub fn leaf<X: Classify + ?Sized>() -> Self {
        match X::KIND.leaf_kind() {
            Some(kind) => Shape::Leaf(kind),
            None => Shape::Opaque,
        }
    }

    pub fn map(key: Slot, value: Slot) -> Self {
        Shape::Map { key, value }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, Shape::Leaf(_))
    }
}

/// One declared member of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    name: String,
    category: MemberCategory,
    visibility: Visibility,
    shape: Shape,
    back_reference: bool,
    ordinal: usize,
}

impl MemberInfo {
    pub fn property(name: impl Into<String>, shape: Shape) -> Self {
        Self::new(name, MemberCategory::Property, shape)
    }

    pub fn field(name: impl Into<String>, shape: Shape) -> Self {
        Self::new(name, MemberCategory::Field, shape)
    }

    fn new(name: impl Into<String>, category: MemberCategory, shape: Shape) -> Self {
        Self {
            name: name.into(),
            category,
            visibility: Visibility::Public,
            shape,
            back_reference: false,
            ordinal: 0,
        }
    }

    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Marks a synthetic back-reference to an enclosing object.
    ///
    /// Back-reference fields are never structural.
    pub fn back_reference(mut self) -> Self {
        self.back_reference = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> MemberCategory {
        self.category
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn is_back_reference(&self) -> bool {
        self.back_reference
    }

    /// Position in the declaring type's member list
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// Structural descriptor of a node type
#[derive(Debug, Clone)]
pub struct TypeInfo {
    type_id: TypeId,
    name: String,
    members: Vec<MemberInfo>,
    fingerprint: u64,
}

impl TypeInfo {
    /// Descriptor for `X`, named by its simple type name
    pub fn of<X: ?Sized + 'static>() -> Self {
        Self::named::<X>(simple_type_name(std::any::type_name::<X>()))
    }

    pub fn named<X: ?Sized + 'static>(name: impl Into<String>) -> Self {
        let mut info = Self {
            type_id: TypeId::of::<X>(),
            name: name.into(),
            members: Vec::new(),
            fingerprint: 0,
        };
        info.fingerprint = info.compute_fingerprint();
        info
    }

    pub fn property(self, name: impl Into<String>, shape: Shape) -> Self {
        self.member(MemberInfo::property(name, shape))
    }

    pub fn field(self, name: impl Into<String>, shape: Shape) -> Self {
        self.member(MemberInfo::field(name, shape))
    }

    /// Appends a member in declaration order
    pub fn member(mut self, mut member: MemberInfo) -> Self {
        member.ordinal = self.members.len();
        self.members.push(member);
        self.fingerprint = self.compute_fingerprint();
        self
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    /// Hash of the name and member list; separates descriptors sharing a type
    pub(crate) fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// True when both describe the same type the same way
    pub(crate) fn same_layout(&self, name: &str, members: &[MemberInfo]) -> bool {
        self.name == name && self.members == members
    }

    fn compute_fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.name.hash(&mut hasher);
        self.members.hash(&mut hasher);
        hasher.finish()
    }
}

/// `a::b::Owner<c::Item>` -> `Owner`
fn simple_type_name(full: &str) -> &str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Runtime element of a map or heterogeneous collection
#[derive(Clone)]
pub enum Item<T> {
    Null,
    Node(T),
    /// Leaf value in its string form
    Scalar(String),
    Opaque,
}

impl<T> Item<T> {
    pub fn node(&self) -> Option<&T> {
        match self {
            Item::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn scalar(&self) -> Option<&str> {
        match self {
            Item::Scalar(text) => Some(text),
            _ => None,
        }
    }
}

impl<T> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Null => f.write_str("Null"),
            Item::Node(_) => f.write_str("Node"),
            Item::Scalar(text) => f.debug_tuple("Scalar").field(text).finish(),
            Item::Opaque => f.write_str("Opaque"),
        }
    }
}

/// Runtime value of a member
#[derive(Clone)]
pub enum MemberValue<T> {
    /// The member holds nothing
    Absent,
    Single(T),
    Sequence(Vec<Option<T>>),
    /// Entries in iteration order
    Map(Vec<(Item<T>, Item<T>)>),
    Items(Vec<Item<T>>),
}

impl<T> MemberValue<T> {
    pub fn single(node: Option<T>) -> Self {
        node.map_or(MemberValue::Absent, MemberValue::Single)
    }

    pub fn sequence<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        MemberValue::Sequence(nodes.into_iter().map(Some).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, MemberValue::Absent)
    }

    /// The value seen as a plain enumeration of elements, nodes or not.
    ///
    /// Map entries enumerate as key/value pairs, which are never nodes.
    pub fn elements(&self) -> Vec<Option<&T>> {
        match self {
            MemberValue::Absent | MemberValue::Single(_) => Vec::new(),
            MemberValue::Sequence(items) => items.iter().map(Option::as_ref).collect(),
            MemberValue::Map(entries) => entries.iter().map(|_| None).collect(),
            MemberValue::Items(items) => items.iter().map(Item::node).collect(),
        }
    }
}

impl<T> fmt::Debug for MemberValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberValue::Absent => f.write_str("Absent"),
            MemberValue::Single(_) => f.write_str("Single"),
            MemberValue::Sequence(items) => write!(f, "Sequence({})", items.len()),
            MemberValue::Map(entries) => write!(f, "Map({})", entries.len()),
            MemberValue::Items(items) => write!(f, "Items({})", items.len()),
        }
    }
}
