//! Unordered matching for bags and map keys.
//!
//! Elements are first bucketed by a shallow signature that any two equal
//! values are guaranteed to share: scalar payloads for exactly-comparable
//! scalars, kind and length for collections, tag and field count for
//! records. Values are never deep-hashed; within a bucket, candidates are
//! confirmed by real (suppressed) comparisons. An element that cannot be
//! inspected fails signature computation, so inaccessibility surfaces as
//! an error no matter which side holds it.
//!
//! Numbers normally share a single bucket because tolerance-based equality
//! crosses exact boundaries. When both collections hold nothing but
//! integers the comparison is exact, and bucketing tightens to the integer
//! value itself.
//!
//! Pairing uses augmenting paths rather than greedy consumption, so a
//! matching is found whenever one exists. This matters under a float
//! tolerance, where "equal" is not transitive and a greedy first pick can
//! strand a later element.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::errors::Result;
use crate::reflect::{Reflect, Scalar, Shape};

use super::dispatch::Walk;
use super::numeric::{integer_key, scalar_number};

/// Finds a one-to-one pairing between `left` and `right` under the engine's
/// equality, returning the matched right index for each left index, or
/// `None` when no complete pairing exists.
pub(crate) fn match_unordered<'o>(
    walk: &mut Walk<'o>,
    left: &[&dyn Reflect],
    right: &[&dyn Reflect],
) -> Result<Option<Vec<usize>>> {
    if left.len() != right.len() {
        return Ok(None);
    }
    let exact = all_integral(left.iter().copied()) && all_integral(right.iter().copied());
    let left_sigs = signatures(walk, left.iter().copied(), exact)?;
    let right_sigs = signatures(walk, right.iter().copied(), exact)?;
    let mut matcher = Matcher::new(&left_sigs, &right_sigs);
    let solved = matcher.solve(walk, &mut |walk, l, r| {
        walk.compare_quietly(left[l], right[r])
    })?;
    if solved {
        Ok(Some(matcher.pairing()))
    } else {
        Ok(None)
    }
}

/// Finds a one-to-one pairing of whole map entries, where an entry pairs
/// only when both its key and its value compare equal. Used when a key-first
/// pairing lined keys up but left values mismatched: with near-duplicate
/// keys a different assignment may still work, and the verdict must not
/// depend on which assignment was tried first.
pub(crate) fn match_entries<'o>(
    walk: &mut Walk<'o>,
    left: &[(&dyn Reflect, &dyn Reflect)],
    right: &[(&dyn Reflect, &dyn Reflect)],
) -> Result<bool> {
    if left.len() != right.len() {
        return Ok(false);
    }
    let exact = all_integral(left.iter().map(|(key, _)| *key))
        && all_integral(right.iter().map(|(key, _)| *key));
    let left_sigs = signatures(walk, left.iter().map(|(key, _)| *key), exact)?;
    let right_sigs = signatures(walk, right.iter().map(|(key, _)| *key), exact)?;
    let mut matcher = Matcher::new(&left_sigs, &right_sigs);
    matcher.solve(walk, &mut |walk, l, r| {
        Ok(walk.compare_quietly(left[l].0, right[r].0)?
            && walk.compare_quietly(left[l].1, right[r].1)?)
    })
}

fn all_integral<'a>(mut values: impl Iterator<Item = &'a dyn Reflect>) -> bool {
    values.all(is_integral)
}

fn is_integral(value: &dyn Reflect) -> bool {
    match value.shape() {
        Shape::Scalar(Scalar::Int(_) | Scalar::UInt(_)) => true,
        Shape::Deferred(deferral) => is_integral(deferral.target()),
        _ => false,
    }
}

fn signatures<'a>(
    walk: &Walk<'_>,
    values: impl Iterator<Item = &'a dyn Reflect>,
    exact: bool,
) -> Result<Vec<u64>> {
    values.map(|value| signature(walk, value, exact)).collect()
}

fn signature(walk: &Walk<'_>, value: &dyn Reflect, exact: bool) -> Result<u64> {
    let mut hasher = DefaultHasher::new();
    write_signature(walk, value, exact, &mut hasher)?;
    Ok(hasher.finish())
}

fn write_signature(
    walk: &Walk<'_>,
    value: &dyn Reflect,
    exact: bool,
    hasher: &mut DefaultHasher,
) -> Result<()> {
    match value.shape() {
        Shape::Scalar(scalar) => match scalar {
            Scalar::Null => 0u8.hash(hasher),
            Scalar::Unit => 1u8.hash(hasher),
            Scalar::Bool(b) => {
                2u8.hash(hasher);
                b.hash(hasher);
            }
            Scalar::Char(c) => {
                3u8.hash(hasher);
                c.hash(hasher);
            }
            Scalar::Str(s) => {
                4u8.hash(hasher);
                s.hash(hasher);
            }
            Scalar::Int(_) | Scalar::UInt(_) | Scalar::Float(_) => {
                5u8.hash(hasher);
                if exact {
                    if let Some(key) = scalar_number(&scalar).and_then(integer_key) {
                        key.hash(hasher);
                    }
                }
            }
        },
        Shape::Array(items) => {
            6u8.hash(hasher);
            items.len().hash(hasher);
        }
        Shape::Sequence(items) => {
            7u8.hash(hasher);
            items.len().hash(hasher);
        }
        Shape::Bag(items) => {
            8u8.hash(hasher);
            items.len().hash(hasher);
        }
        Shape::Map(entries) => {
            9u8.hash(hasher);
            entries.len().hash(hasher);
        }
        Shape::Record(view) => {
            10u8.hash(hasher);
            view.tag.hash(hasher);
            view.fields.len().hash(hasher);
        }
        Shape::Deferred(deferral) => write_signature(walk, deferral.target(), exact, hasher)?,
        Shape::Opaque => 11u8.hash(hasher),
        Shape::Inaccessible(reason) => return Err(walk.inaccessible(reason)),
    }
    Ok(())
}

/// Augmenting-path assignment over signature buckets.
struct Matcher<'s> {
    buckets: HashMap<u64, Vec<usize>>,
    left_sigs: &'s [u64],
    /// For each right index, the left index currently assigned to it.
    owner: Vec<Option<usize>>,
    /// Memoized trial verdicts keyed by (left, right).
    verdicts: HashMap<(usize, usize), bool>,
}

impl<'s> Matcher<'s> {
    fn new(left_sigs: &'s [u64], right_sigs: &[u64]) -> Self {
        let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
        for (index, sig) in right_sigs.iter().enumerate() {
            buckets.entry(*sig).or_default().push(index);
        }
        Matcher {
            buckets,
            left_sigs,
            owner: vec![None; right_sigs.len()],
            verdicts: HashMap::new(),
        }
    }

    fn solve<'o, F>(&mut self, walk: &mut Walk<'o>, try_pair: &mut F) -> Result<bool>
    where
        F: FnMut(&mut Walk<'o>, usize, usize) -> Result<bool>,
    {
        for l in 0..self.left_sigs.len() {
            let mut visited = vec![false; self.owner.len()];
            if !self.augment(walk, l, &mut visited, try_pair)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn augment<'o, F>(
        &mut self,
        walk: &mut Walk<'o>,
        l: usize,
        visited: &mut [bool],
        try_pair: &mut F,
    ) -> Result<bool>
    where
        F: FnMut(&mut Walk<'o>, usize, usize) -> Result<bool>,
    {
        let candidates = match self.buckets.get(&self.left_sigs[l]) {
            Some(indices) => indices.clone(),
            None => return Ok(false),
        };
        for r in candidates {
            if visited[r] {
                continue;
            }
            let matched = match self.verdicts.get(&(l, r)) {
                Some(&verdict) => verdict,
                None => {
                    let verdict = try_pair(walk, l, r)?;
                    self.verdicts.insert((l, r), verdict);
                    verdict
                }
            };
            if !matched {
                continue;
            }
            visited[r] = true;
            match self.owner[r] {
                None => {
                    self.owner[r] = Some(l);
                    return Ok(true);
                }
                Some(displaced) => {
                    if self.augment(walk, displaced, visited, try_pair)? {
                        self.owner[r] = Some(l);
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }

    /// The solved assignment as left index -> right index.
    fn pairing(&self) -> Vec<usize> {
        let mut out = vec![0; self.owner.len()];
        for (right_index, owner) in self.owner.iter().enumerate() {
            if let Some(left_index) = owner {
                out[*left_index] = right_index;
            }
        }
        out
    }
}
