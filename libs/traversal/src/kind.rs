//! Leaf-type classification
//!
//! A leaf type is atomic: the engine never expands a member of a leaf type
//! into children. Optional wrappers are unwrapped recursively, so
//! `Option<Option<u32>>` is as much a leaf as `u32`.

use std::borrow::Cow;

/// Category of an atomic value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Boolean,
    Numeric,
    Enumeration,
    Character,
    String,
    DateTime,
    Duration,
}

/// Whether a type is atomic or may carry structural members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeKind {
    Leaf(LeafKind),
    #[default]
    Composite,
}

impl TypeKind {
    pub fn is_leaf(self) -> bool {
        matches!(self, TypeKind::Leaf(_))
    }

    pub fn leaf_kind(self) -> Option<LeafKind> {
        match self {
            TypeKind::Leaf(kind) => Some(kind),
            TypeKind::Composite => None,
        }
    }
}

/// Compile-time classification of a type
///
/// Field-less enumerations used as member values opt in with
/// `const KIND: TypeKind = TypeKind::Leaf(LeafKind::Enumeration);`.
pub trait Classify {
    const KIND: TypeKind;
}

/// Classification of `X`, usable in const and non-const contexts alike
pub const fn kind_of<X: Classify + ?Sized>() -> TypeKind {
    X::KIND
}

macro_rules! classify_as {
    ($kind:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Classify for $ty {
                const KIND: TypeKind = TypeKind::Leaf($kind);
            }
        )+
    };
}

classify_as!(LeafKind::Boolean => bool);
classify_as!(LeafKind::Numeric =>
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64,
);
classify_as!(LeafKind::Character => char);
classify_as!(LeafKind::String => String, str, Box<str>);
classify_as!(LeafKind::DateTime =>
    std::time::SystemTime,
    chrono::NaiveDate,
    chrono::NaiveTime,
    chrono::NaiveDateTime,
);
classify_as!(LeafKind::Duration => std::time::Duration, chrono::Duration);

impl<Tz: chrono::TimeZone> Classify for chrono::DateTime<Tz> {
    const KIND: TypeKind = TypeKind::Leaf(LeafKind::DateTime);
}

impl Classify for &str {
    const KIND: TypeKind = TypeKind::Leaf(LeafKind::String);
}

impl Classify for Cow<'_, str> {
    const KIND: TypeKind = TypeKind::Leaf(LeafKind::String);
}

impl<X: Classify> Classify for Option<X> {
    const KIND: TypeKind = X::KIND;
}
