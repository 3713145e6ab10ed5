//! Comparison outcomes and difference reporting.
//!
//! A [`Comparison`] carries the verdict plus, when requested, a
//! [`Difference`] describing the first point of divergence: the path from
//! the roots to the mismatching pair and a short rendering of each side.
//! Only the deepest mismatch is reported; once a divergence is recorded the
//! engine unwinds without overwriting it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reflect::{Reflect, Scalar, Shape};

/// One step on the path from the comparison roots to a nested value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Descent into a named record field.
    Field(String),
    /// Descent into a position of an ordered collection.
    Index(usize),
    /// Descent into the value of a matched map entry, keyed by the rendered
    /// key.
    Key(String),
}

/// Renders a segment path as `$` followed by accessor notation, e.g.
/// `$.address.lines[2]`.
pub(crate) fn render_path(segments: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in segments {
        match segment {
            PathSegment::Field(name) => {
                out.push('.');
                out.push_str(name);
            }
            PathSegment::Index(index) => out.push_str(&format!("[{index}]")),
            PathSegment::Key(key) => out.push_str(&format!("[{key}]")),
        }
    }
    out
}

/// The first point of divergence found by an unequal comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    /// Path from the roots to the mismatching pair; empty means the roots
    /// themselves differ.
    pub path: Vec<PathSegment>,
    /// Rendering of the left-hand value at the divergence point.
    pub left: String,
    /// Rendering of the right-hand value at the divergence point.
    pub right: String,
}

impl Difference {
    /// The path in accessor notation, rooted at `$`.
    pub fn path_string(&self) -> String {
        render_path(&self.path)
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "values differ at `{}`: left is {}, right is {}",
            self.path_string(),
            self.left,
            self.right
        )
    }
}

/// Outcome of a [`deep_compare`](crate::engine::deep_compare) call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Whether the two roots compared equal.
    pub equal: bool,
    /// Present when the verdict is unequal and difference collection was
    /// requested.
    pub difference: Option<Difference>,
}

impl Comparison {
    pub(crate) fn equal() -> Self {
        Comparison {
            equal: true,
            difference: None,
        }
    }

    pub(crate) fn unequal(difference: Option<Difference>) -> Self {
        Comparison {
            equal: false,
            difference,
        }
    }
}

/// Path bookkeeping for the walk in progress.
///
/// Always maintained so that inaccessibility errors can point at the value
/// they arose from, even when difference collection is off.
pub(crate) struct Trail {
    segments: Vec<PathSegment>,
}

impl Trail {
    pub(crate) fn new() -> Self {
        Trail {
            segments: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn snapshot(&self) -> Vec<PathSegment> {
        self.segments.clone()
    }

    pub(crate) fn render(&self) -> String {
        render_path(&self.segments)
    }
}

/// One-level rendering of a value for difference records and demos.
pub(crate) fn describe(value: &dyn Reflect) -> String {
    match value.shape() {
        Shape::Scalar(scalar) => match scalar {
            Scalar::Null => String::from("null"),
            Scalar::Unit => String::from("unit"),
            Scalar::Bool(b) => format!("bool {b}"),
            Scalar::Char(c) => format!("char {c:?}"),
            Scalar::Int(i) => format!("int {i}"),
            Scalar::UInt(u) => format!("uint {u}"),
            Scalar::Float(x) => format!("float {x}"),
            Scalar::Str(s) => format!("string {s:?}"),
        },
        Shape::Array(items) => format!("array of {}", items.len()),
        Shape::Sequence(items) => format!("sequence of {}", items.len()),
        Shape::Bag(items) => format!("bag of {}", items.len()),
        Shape::Map(entries) => format!("map of {}", entries.len()),
        Shape::Record(view) => format!(
            "record {} ({} fields)",
            short_type_name(view.tag.name()),
            view.fields.len()
        ),
        Shape::Deferred(deferral) => describe(deferral.target()),
        Shape::Opaque => String::from("opaque value"),
        Shape::Inaccessible(reason) => format!("inaccessible ({reason})"),
    }
}

/// Trims the module path off a plain type name. Generic and tuple names are
/// left alone since their arguments carry paths of their own.
fn short_type_name(name: &str) -> &str {
    if name.contains('<') || name.contains('(') {
        name
    } else {
        name.rsplit("::").next().unwrap_or(name)
    }
}
