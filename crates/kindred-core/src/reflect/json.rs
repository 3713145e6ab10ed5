//! Dynamic JSON documents as reflectable values.
//!
//! `serde_json::Value` maps onto the shape protocol directly: arrays are
//! sequences, objects are maps keyed by strings, and numbers widen into the
//! same scalar domains as the native numeric types. A deserialized document
//! therefore compares against hand-built values without any conversion step.

use std::any::Any;

use serde_json::Value;

use super::{Reflect, Scalar, Shape};

impl Reflect for Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            Value::Null => Shape::Scalar(Scalar::Null),
            Value::Bool(b) => Shape::Scalar(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Shape::Scalar(Scalar::Int(i128::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Shape::Scalar(Scalar::UInt(u128::from(u)))
                } else {
                    Shape::Scalar(Scalar::Float(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Shape::Scalar(Scalar::Str(s.as_str())),
            Value::Array(items) => {
                Shape::Sequence(items.iter().map(|v| v as &dyn Reflect).collect())
            }
            Value::Object(entries) => Shape::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect))
                    .collect(),
            ),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
