//! The comparison engine.
//!
//! Entry points for structural deep equality. [`deep_equal`] answers the
//! plain question with default options; [`deep_equal_with`] takes explicit
//! [`CompareOptions`]; [`deep_compare`] additionally reports where the two
//! graphs first diverge.
//!
//! All entry points share one walk: identity shortcut, indirection
//! resolution, scalar coercion, ordered and unordered collection matching,
//! record fields, and cycle protection. A `true` verdict means every
//! reachable pair matched; an `Err` means some value could not be
//! inspected, which is deliberately kept apart from "not equal".

mod dispatch;
mod guard;
mod matching;
mod numeric;
mod record;

use std::time::Instant;

use tracing::debug;

use crate::errors::Result;
use crate::options::CompareOptions;
use crate::reflect::Reflect;
use crate::report::Comparison;

use dispatch::Walk;

/// Compares two value graphs under default options.
///
/// # Errors
///
/// Returns [`CompareError::Inaccessible`](crate::errors::CompareError) when
/// a value on the comparison path cannot be inspected.
///
/// # Examples
///
/// ```
/// use kindred_core::deep_equal;
///
/// assert!(deep_equal(&vec![1, 2, 3], &vec![1, 2, 3])?);
/// assert!(!deep_equal(&vec![1, 2, 3], &vec![3, 2, 1])?);
/// # Ok::<(), kindred_core::CompareError>(())
/// ```
pub fn deep_equal(left: &dyn Reflect, right: &dyn Reflect) -> Result<bool> {
    deep_equal_with(left, right, &CompareOptions::default())
}

/// Compares two value graphs under the given options.
///
/// # Errors
///
/// Returns [`CompareError::Inaccessible`](crate::errors::CompareError) when
/// a value on the comparison path cannot be inspected.
pub fn deep_equal_with(
    left: &dyn Reflect,
    right: &dyn Reflect,
    options: &CompareOptions,
) -> Result<bool> {
    let started = Instant::now();
    let mut walk = Walk::new(options);
    let outcome = walk.compare(left, right);
    log_outcome("deep_equal", &outcome, started);
    outcome
}

/// Compares two value graphs and reports the first divergence.
///
/// The returned [`Comparison`] carries a [`Difference`](crate::report::Difference)
/// only when the verdict is unequal and `options.collect_difference` is set.
///
/// # Errors
///
/// Returns [`CompareError::Inaccessible`](crate::errors::CompareError) when
/// a value on the comparison path cannot be inspected.
///
/// # Examples
///
/// ```
/// use kindred_core::{deep_compare, CompareOptions};
///
/// let options = CompareOptions::default().collecting_difference();
/// let outcome = deep_compare(&(1, 2), &(1, 3), &options)?;
/// assert!(!outcome.equal);
/// let difference = outcome.difference.unwrap();
/// assert_eq!(difference.path_string(), "$.1");
/// # Ok::<(), kindred_core::CompareError>(())
/// ```
pub fn deep_compare(
    left: &dyn Reflect,
    right: &dyn Reflect,
    options: &CompareOptions,
) -> Result<Comparison> {
    let started = Instant::now();
    let mut walk = Walk::new(options);
    let outcome = walk.compare(left, right);
    log_outcome("deep_compare", &outcome, started);
    let equal = outcome?;
    Ok(walk.into_comparison(equal))
}

fn log_outcome(op: &'static str, outcome: &Result<bool>, started: Instant) {
    let duration_ms = started.elapsed().as_millis() as u64;
    match outcome {
        Ok(equal) => debug!(op, equal, duration_ms, "comparison finished"),
        Err(err) => debug!(op, error = %err, duration_ms, "comparison failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_deep_equal_defaults() {
        assert!(deep_equal(&42i64, &42u8).unwrap());
        assert!(!deep_equal(&42i64, &43i64).unwrap());
    }

    #[test]
    fn test_deep_equal_with_strict_epsilon() {
        let strict = CompareOptions::default().with_float_epsilon(0.0);
        assert!(deep_equal(&1.0f64, &(1.0f64 + 1e-12)).unwrap());
        assert!(!deep_equal_with(&1.0f64, &(1.0f64 + 1e-12), &strict).unwrap());
    }

    #[test]
    fn test_deep_compare_without_collection_has_no_difference() {
        let options = CompareOptions::default();
        let outcome = deep_compare(&1, &2, &options).unwrap();
        assert!(!outcome.equal);
        assert!(outcome.difference.is_none());
    }

    #[test]
    fn test_deep_compare_map_value_difference_descends() {
        let options = CompareOptions::default().collecting_difference();
        let left = HashMap::from([(String::from("zip"), 10001), (String::from("floor"), 7)]);
        let right = HashMap::from([(String::from("zip"), 10002), (String::from("floor"), 7)]);
        let outcome = deep_compare(&left, &right, &options).unwrap();
        assert!(!outcome.equal);
        let difference = outcome.difference.unwrap();
        assert_eq!(difference.path_string(), "$[string \"zip\"]");
        assert_eq!(difference.left, "int 10001");
        assert_eq!(difference.right, "int 10002");
    }
}
