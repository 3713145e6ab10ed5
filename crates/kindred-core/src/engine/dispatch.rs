//! Shape dispatch: the recursive core of the engine.
//!
//! [`Walk`] carries the state of one comparison call: the options, the
//! cycle guard, the path trail, the first recorded difference, and the
//! suppression depth that keeps trial comparisons made during unordered
//! matching from polluting the trail or the difference record.
//!
//! Dispatch order for a pair of values: identity shortcut, indirection
//! resolution, inaccessibility, then shape compatibility. Two values of
//! different kinds are simply unequal; only an uninspectable value turns
//! the walk into an error.

use tracing::trace;

use crate::errors::{CompareError, Result};
use crate::options::CompareOptions;
use crate::reflect::{value_id, Reflect, Scalar, Shape};
use crate::report::{describe, Comparison, Difference, PathSegment, Trail};

use super::guard::PairGuard;
use super::matching;
use super::numeric::{numbers_equal, scalar_number};
use super::record;

pub(crate) struct Walk<'o> {
    options: &'o CompareOptions,
    guard: PairGuard,
    trail: Trail,
    difference: Option<Difference>,
    suppressed: u32,
}

impl<'o> Walk<'o> {
    pub(crate) fn new(options: &'o CompareOptions) -> Self {
        Walk {
            options,
            guard: PairGuard::new(),
            trail: Trail::new(),
            difference: None,
            suppressed: 0,
        }
    }

    /// Consumes the walk into the public outcome.
    pub(crate) fn into_comparison(self, equal: bool) -> Comparison {
        if equal {
            Comparison::equal()
        } else {
            Comparison::unequal(self.difference)
        }
    }

    /// Compares one pair of values, recursing through their children.
    pub(crate) fn compare(&mut self, left: &dyn Reflect, right: &dyn Reflect) -> Result<bool> {
        if value_id(left) == value_id(right) {
            return Ok(true);
        }
        let left_shape = left.shape();
        let right_shape = right.shape();
        if let Shape::Deferred(deferral) = &left_shape {
            let target = deferral.target();
            return if let Shape::Deferred(other) = &right_shape {
                self.compare(target, other.target())
            } else {
                self.compare(target, right)
            };
        }
        if let Shape::Deferred(deferral) = &right_shape {
            return self.compare(left, deferral.target());
        }
        match (&left_shape, &right_shape) {
            (Shape::Inaccessible(reason), _) => Err(self.inaccessible(reason)),
            (_, Shape::Inaccessible(reason)) => Err(self.inaccessible(reason)),
            (Shape::Scalar(a), Shape::Scalar(b)) => {
                if self.scalars_equal(a, b) {
                    Ok(true)
                } else {
                    self.note(left, right);
                    Ok(false)
                }
            }
            (Shape::Array(a), Shape::Array(b)) => self.ordered_equal(left, right, a, b),
            (Shape::Sequence(a), Shape::Sequence(b)) => self.ordered_equal(left, right, a, b),
            (Shape::Bag(a), Shape::Bag(b)) => self.unordered_equal(left, right, a, b),
            (Shape::Map(a), Shape::Map(b)) => self.map_equal(left, right, a, b),
            (Shape::Record(a), Shape::Record(b)) => {
                if let Some(verdict) = self.native_verdict(left, right) {
                    if !verdict {
                        self.note(left, right);
                    }
                    return Ok(verdict);
                }
                if !self.guard_enter(left, right) {
                    return Ok(true);
                }
                let outcome = record::equal_records(self, a, b);
                self.guard_leave(left, right);
                outcome
            }
            (Shape::Opaque, Shape::Opaque) => {
                if let Some(verdict) = self.native_verdict(left, right) {
                    if !verdict {
                        self.note(left, right);
                    }
                    return Ok(verdict);
                }
                // Identity was already ruled out above.
                self.note(left, right);
                Ok(false)
            }
            _ => {
                self.note(left, right);
                Ok(false)
            }
        }
    }

    /// Compares without touching the trail or the difference record. Used
    /// for the trial pairings made by unordered matching.
    pub(crate) fn compare_quietly(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
    ) -> Result<bool> {
        self.suppressed += 1;
        let outcome = self.compare(left, right);
        self.suppressed -= 1;
        outcome
    }

    pub(crate) fn push(&mut self, segment: PathSegment) {
        if self.suppressed == 0 {
            self.trail.push(segment);
        }
    }

    pub(crate) fn pop(&mut self) {
        if self.suppressed == 0 {
            self.trail.pop();
        }
    }

    /// Records the first divergence at the current path, rendering both
    /// sides.
    pub(crate) fn note(&mut self, left: &dyn Reflect, right: &dyn Reflect) {
        if self.should_note() {
            self.difference = Some(Difference {
                path: self.trail.snapshot(),
                left: describe(left),
                right: describe(right),
            });
        }
    }

    /// Records the first divergence with pre-rendered sides.
    pub(crate) fn note_described(&mut self, left: String, right: String) {
        if self.should_note() {
            self.difference = Some(Difference {
                path: self.trail.snapshot(),
                left,
                right,
            });
        }
    }

    fn should_note(&self) -> bool {
        self.suppressed == 0 && self.options.collect_difference && self.difference.is_none()
    }

    fn native_verdict(&self, left: &dyn Reflect, right: &dyn Reflect) -> Option<bool> {
        if self.options.ignore_native_equality {
            return None;
        }
        left.native_eq(right).or_else(|| right.native_eq(left))
    }

    fn scalars_equal(&self, a: &Scalar<'_>, b: &Scalar<'_>) -> bool {
        if let (Some(x), Some(y)) = (scalar_number(a), scalar_number(b)) {
            return numbers_equal(x, y, self.options.float_epsilon);
        }
        match (a, b) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Unit, Scalar::Unit) => true,
            (Scalar::Bool(x), Scalar::Bool(y)) => x == y,
            (Scalar::Char(x), Scalar::Char(y)) => x == y,
            (Scalar::Str(x), Scalar::Str(y)) => x == y,
            _ => false,
        }
    }

    fn ordered_equal(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
        a: &[&dyn Reflect],
        b: &[&dyn Reflect],
    ) -> Result<bool> {
        if a.len() != b.len() {
            self.note(left, right);
            return Ok(false);
        }
        if !self.guard_enter(left, right) {
            return Ok(true);
        }
        let mut verdict = Ok(true);
        for (index, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            self.push(PathSegment::Index(index));
            let element = self.compare(*x, *y);
            self.pop();
            match element {
                Ok(true) => continue,
                other => {
                    verdict = other;
                    break;
                }
            }
        }
        self.guard_leave(left, right);
        verdict
    }

    fn unordered_equal(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
        a: &[&dyn Reflect],
        b: &[&dyn Reflect],
    ) -> Result<bool> {
        if a.len() != b.len() {
            self.note(left, right);
            return Ok(false);
        }
        if !self.guard_enter(left, right) {
            return Ok(true);
        }
        let outcome = matching::match_unordered(self, a, b);
        self.guard_leave(left, right);
        match outcome {
            Ok(Some(_)) => Ok(true),
            Ok(None) => {
                self.note(left, right);
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn map_equal(
        &mut self,
        left: &dyn Reflect,
        right: &dyn Reflect,
        a: &[(&dyn Reflect, &dyn Reflect)],
        b: &[(&dyn Reflect, &dyn Reflect)],
    ) -> Result<bool> {
        if a.len() != b.len() {
            self.note(left, right);
            return Ok(false);
        }
        if !self.guard_enter(left, right) {
            return Ok(true);
        }
        let outcome = self.map_entries_equal(a, b);
        self.guard_leave(left, right);
        if let Ok(false) = &outcome {
            // Reported at the map level unless a matched value already
            // recorded something deeper.
            self.note(left, right);
        }
        outcome
    }

    /// Pairs keys one-to-one with the engine's own key equality, then
    /// compares the values of paired entries.
    ///
    /// When the key pairing lines up but some value does not, whole entries
    /// are re-matched jointly before concluding unequal: near-duplicate keys
    /// (possible under a float tolerance) can make the key pairing
    /// ambiguous, and the verdict must not depend on which assignment the
    /// matcher tried first.
    fn map_entries_equal(
        &mut self,
        a: &[(&dyn Reflect, &dyn Reflect)],
        b: &[(&dyn Reflect, &dyn Reflect)],
    ) -> Result<bool> {
        let left_keys: Vec<&dyn Reflect> = a.iter().map(|(key, _)| *key).collect();
        let right_keys: Vec<&dyn Reflect> = b.iter().map(|(key, _)| *key).collect();
        let Some(pairing) = matching::match_unordered(self, &left_keys, &right_keys)? else {
            return Ok(false);
        };
        let mut values_aligned = true;
        for (left_index, right_index) in pairing.iter().enumerate() {
            if !self.compare_quietly(a[left_index].1, b[*right_index].1)? {
                values_aligned = false;
                break;
            }
        }
        if values_aligned {
            return Ok(true);
        }
        if matching::match_entries(self, a, b)? {
            return Ok(true);
        }
        // Unequal for sure. Walk the key pairing openly so the difference
        // lands on the diverging value rather than on the whole map.
        for (left_index, right_index) in pairing.iter().enumerate() {
            let (key, left_value) = a[left_index];
            let (_, right_value) = b[*right_index];
            self.push(PathSegment::Key(describe(key)));
            let same = self.compare(left_value, right_value);
            self.pop();
            match same {
                Ok(true) => continue,
                Ok(false) => return Ok(false),
                Err(err) => return Err(err),
            }
        }
        Ok(false)
    }

    fn guard_enter(&mut self, left: &dyn Reflect, right: &dyn Reflect) -> bool {
        let entered = self.guard.enter(value_id(left), value_id(right));
        if !entered {
            trace!(
                op = "cycle",
                path = %self.trail.render(),
                "pair already on the walk stack; closing cycle as equal"
            );
        }
        entered
    }

    fn guard_leave(&mut self, left: &dyn Reflect, right: &dyn Reflect) {
        self.guard.leave(value_id(left), value_id(right));
    }

    /// Builds the inaccessibility error at the current path.
    pub(crate) fn inaccessible(&self, reason: &str) -> CompareError {
        CompareError::Inaccessible {
            path: self.trail.render(),
            reason: reason.to_string(),
        }
    }
}
