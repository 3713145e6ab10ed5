//! Numeric coercion across the three scalar domains.
//!
//! Integers compare exactly regardless of sign domain or original width.
//! As soon as either side is floating-point the pair is compared in `f64`
//! under the configured tolerance, with NaN treated as equal to NaN so that
//! a value graph containing NaN still compares equal to itself.

use crate::reflect::Scalar;

/// A scalar lifted into its widest numeric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Number {
    Int(i128),
    UInt(u128),
    Float(f64),
}

/// Lifts a scalar into [`Number`], or `None` for non-numeric scalars.
pub(crate) fn scalar_number(scalar: &Scalar<'_>) -> Option<Number> {
    match scalar {
        Scalar::Int(i) => Some(Number::Int(*i)),
        Scalar::UInt(u) => Some(Number::UInt(*u)),
        Scalar::Float(x) => Some(Number::Float(*x)),
        _ => None,
    }
}

/// Canonical form of an integral number, as (negative, magnitude).
///
/// `None` for floats. Used to bucket unordered-collection candidates when
/// every element involved is integral, where exact grouping is safe.
pub(crate) fn integer_key(number: Number) -> Option<(bool, u128)> {
    match number {
        Number::Int(i) if i < 0 => Some((true, i.unsigned_abs())),
        Number::Int(i) => Some((false, i as u128)),
        Number::UInt(u) => Some((false, u)),
        Number::Float(_) => None,
    }
}

pub(crate) fn numbers_equal(a: Number, b: Number, epsilon: f64) -> bool {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => x == y,
        (Number::UInt(x), Number::UInt(y)) => x == y,
        (Number::Int(x), Number::UInt(y)) | (Number::UInt(y), Number::Int(x)) => {
            x >= 0 && x as u128 == y
        }
        (Number::Float(x), Number::Float(y)) => floats_equal(x, y, epsilon),
        (Number::Float(x), Number::Int(y)) | (Number::Int(y), Number::Float(x)) => {
            floats_equal(x, y as f64, epsilon)
        }
        (Number::Float(x), Number::UInt(y)) | (Number::UInt(y), Number::Float(x)) => {
            floats_equal(x, y as f64, epsilon)
        }
    }
}

fn floats_equal(a: f64, b: f64, epsilon: f64) -> bool {
    if a == b {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    (a - b).abs() <= epsilon
}
