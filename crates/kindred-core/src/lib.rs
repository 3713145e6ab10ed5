//! Kindred Core - Structural deep equality over arbitrary value graphs
//!
//! This crate decides whether two values are structurally equal, including:
//! - Recursive descent through records, collections, maps, and smart pointers
//! - Cycle protection so self-referential graphs terminate
//! - Numeric coercion across integer widths and a float tolerance
//! - Unordered matching for sets, heaps, and map entries
//! - Path-qualified difference reporting for the first divergence
//! - A `Reflect` protocol plus implementations for the standard library and
//!   `serde_json::Value`
//!
//! Equality is driven entirely by shape: values of different concrete types
//! compare equal when they expose the same structure.
//!
//! # Examples
//!
//! ```
//! use kindred_core::{deep_equal, deep_equal_with, CompareOptions};
//!
//! let left = vec![1.0_f64, 2.0, 3.0];
//! let right = vec![1.0_f64, 2.0, 3.0 + 1e-12];
//! assert!(deep_equal(&left, &right)?);
//!
//! let strict = CompareOptions::default().with_float_epsilon(0.0);
//! assert!(!deep_equal_with(&left, &right, &strict)?);
//! # Ok::<(), kindred_core::CompareError>(())
//! ```

pub mod engine;
pub mod errors;
pub mod logging;
pub mod options;
pub mod reflect;
pub mod report;

// Re-export commonly used types
pub use engine::{deep_compare, deep_equal, deep_equal_with};
pub use errors::{CompareError, CompareErrorKind, Result};
pub use options::{CompareOptions, DEFAULT_FLOAT_EPSILON};
pub use reflect::{native_eq_via, Deferral, FieldView, Reflect, RecordTag, RecordView, Scalar, Shape};
pub use report::{Comparison, Difference, PathSegment};
