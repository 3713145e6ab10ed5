//! Value reflection: the shape protocol that drives structural comparison.
//!
//! Every value taking part in deep comparison implements [`Reflect`], which
//! projects the value into a [`Shape`]: a borrowed, one-level-deep view that
//! classifies the value as a scalar, an ordered or unordered collection, a
//! keyed map, a named-field record, or an opaque leaf. The engine walks
//! shapes recursively and never inspects concrete types directly, so any
//! type that can describe itself in shape terms can participate.
//!
//! Implementations for the standard library live in `std_impls`; an adapter
//! for dynamic JSON documents lives in `json`.

mod json;
mod std_impls;

use std::any::{Any, TypeId};
use std::cell::Ref;
use std::fmt;

/// A value that can describe its own structure one level deep.
///
/// The comparison engine drives everything through this trait: it asks both
/// sides for their [`Shape`], pairs the exposed children, and recurses. An
/// implementation only ever describes its immediate layer; nesting falls out
/// of children being `Reflect` themselves.
///
/// # Examples
///
/// ```
/// use kindred_core::reflect::{native_eq_via, Reflect, RecordTag, RecordView, Shape};
/// use std::any::Any;
///
/// #[derive(PartialEq)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl Reflect for Point {
///     fn shape(&self) -> Shape<'_> {
///         Shape::Record(
///             RecordView::new(RecordTag::of::<Point>())
///                 .with_field("x", &self.x)
///                 .with_field("y", &self.y),
///         )
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn native_eq(&self, other: &dyn Reflect) -> Option<bool> {
///         native_eq_via(self, other)
///     }
/// }
/// ```
pub trait Reflect: Any {
    /// Borrowed view of this value's immediate structure.
    fn shape(&self) -> Shape<'_>;

    /// Upcast used for downcasting and identity.
    fn as_any(&self) -> &dyn Any;

    /// Type-native equality, when the type carries one.
    ///
    /// Returns `None` when the type has no native notion of equality or the
    /// other value is of a foreign type, in which case the engine falls back
    /// to structural comparison. Record and opaque values consult this before
    /// descending; see [`native_eq_via`] for the usual implementation.
    fn native_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let _ = other;
        None
    }
}

/// Implements [`Reflect::native_eq`] on top of a type's `PartialEq`.
///
/// Downcasts `other` to `T` and compares with `==`; yields `None` for
/// foreign types so the engine can fall back to structural comparison.
pub fn native_eq_via<T>(this: &T, other: &dyn Reflect) -> Option<bool>
where
    T: PartialEq + 'static,
{
    other.as_any().downcast_ref::<T>().map(|o| this == o)
}

/// One-level structural view of a value.
///
/// Borrows from the value it describes; children are exposed as
/// `&dyn Reflect` so the engine can keep walking without knowing concrete
/// types.
pub enum Shape<'a> {
    /// A leaf value with a canonical scalar representation.
    Scalar(Scalar<'a>),
    /// A fixed-length ordered collection.
    Array(Vec<&'a dyn Reflect>),
    /// A growable ordered collection.
    Sequence(Vec<&'a dyn Reflect>),
    /// An unordered collection; element order carries no meaning.
    Bag(Vec<&'a dyn Reflect>),
    /// Keyed entries; entry order carries no meaning.
    Map(Vec<(&'a dyn Reflect, &'a dyn Reflect)>),
    /// A named-field composite.
    Record(RecordView<'a>),
    /// An indirection to the value that actually carries identity. Smart
    /// pointers defer to their pointee (so shared nodes unify under one
    /// identity) and interior-mutability cells defer through their borrow
    /// guard. The engine resolves deferrals before comparing.
    Deferred(Deferral<'a>),
    /// A leaf without visible structure; equal only to itself.
    Opaque,
    /// A value that cannot be inspected right now, with the reason.
    /// Comparison reports this as an error rather than an inequality.
    Inaccessible(&'static str),
}

impl<'a> Shape<'a> {
    /// The coarse classification used for shape-compatibility checks.
    pub fn kind(&self) -> Kind {
        match self {
            Shape::Scalar(_) => Kind::Scalar,
            Shape::Array(_) => Kind::Array,
            Shape::Sequence(_) => Kind::Sequence,
            Shape::Bag(_) => Kind::Bag,
            Shape::Map(_) => Kind::Map,
            Shape::Record(_) => Kind::Record,
            Shape::Deferred(_) => Kind::Deferred,
            Shape::Opaque => Kind::Opaque,
            Shape::Inaccessible(_) => Kind::Inaccessible,
        }
    }
}

/// The resolved target of a [`Shape::Deferred`] indirection.
pub enum Deferral<'a> {
    /// A plain borrow, as produced by smart pointers.
    Plain(&'a dyn Reflect),
    /// A `RefCell` borrow guard, kept alive so the borrow spans the
    /// comparison of everything reachable through it.
    Cell(Ref<'a, dyn Reflect>),
}

impl<'a> Deferral<'a> {
    /// The value this indirection stands for.
    pub fn target(&self) -> &dyn Reflect {
        match self {
            Deferral::Plain(inner) => *inner,
            Deferral::Cell(guard) => &**guard,
        }
    }
}

/// Canonical leaf representation.
///
/// Numeric values are widened into three domains (`Int`, `UInt`, `Float`)
/// so that values of different widths compare by magnitude rather than by
/// concrete type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// The absent value (`Option::None`, JSON `null`).
    Null,
    /// The unit value.
    Unit,
    Bool(bool),
    Char(char),
    /// Signed integers of any width.
    Int(i128),
    /// Unsigned integers of any width.
    UInt(u128),
    /// Floating-point values of any width.
    Float(f64),
    Str(&'a str),
}

/// Coarse shape classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Scalar,
    Array,
    Sequence,
    Bag,
    Map,
    Record,
    Deferred,
    Opaque,
    Inaccessible,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Scalar => "scalar",
            Kind::Array => "array",
            Kind::Sequence => "sequence",
            Kind::Bag => "bag",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Deferred => "deferred",
            Kind::Opaque => "opaque",
            Kind::Inaccessible => "inaccessible",
        };
        f.write_str(name)
    }
}

/// Identity of a record's structure.
///
/// Two records compare field-by-field only when their tags are equal.
/// `Typed` tags tie structure to a concrete Rust type; `Logical` tags let
/// distinct types opt into structural compatibility under a shared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordTag {
    /// Identity of a concrete Rust type.
    Typed { id: TypeId, name: &'static str },
    /// An explicit structural name shared across concrete types.
    Logical(&'static str),
}

impl RecordTag {
    /// Tag for the concrete type `T`.
    pub fn of<T: Any>() -> Self {
        RecordTag::Typed {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Tag under an explicit structural name.
    pub fn logical(name: &'static str) -> Self {
        RecordTag::Logical(name)
    }

    /// Human-readable name, for difference reports.
    pub fn name(&self) -> &'static str {
        match self {
            RecordTag::Typed { name, .. } => name,
            RecordTag::Logical(name) => name,
        }
    }
}

/// Borrowed view of a record's named fields.
pub struct RecordView<'a> {
    pub tag: RecordTag,
    pub fields: Vec<FieldView<'a>>,
}

impl<'a> RecordView<'a> {
    pub fn new(tag: RecordTag) -> Self {
        RecordView {
            tag,
            fields: Vec::new(),
        }
    }

    /// Appends a named field.
    #[must_use]
    pub fn with_field(mut self, name: &'static str, value: &'a dyn Reflect) -> Self {
        self.fields.push(FieldView { name, value });
        self
    }

    /// Splices in the fields of a composed sub-record, flattening it into
    /// this view.
    #[must_use]
    pub fn embedding(mut self, inner: RecordView<'a>) -> Self {
        self.fields.extend(inner.fields);
        self
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&'a dyn Reflect> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.value)
    }
}

/// A single named field within a [`RecordView`].
pub struct FieldView<'a> {
    pub name: &'static str,
    pub value: &'a dyn Reflect,
}

/// Identity of a value for visit tracking.
///
/// The address alone is not enough: a struct and its first field share an
/// address, so the concrete type id is folded in to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId {
    addr: usize,
    ty: TypeId,
}

pub(crate) fn value_id(value: &dyn Reflect) -> ValueId {
    ValueId {
        addr: value as *const dyn Reflect as *const () as usize,
        ty: value.as_any().type_id(),
    }
}
