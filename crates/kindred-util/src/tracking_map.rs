//! Usage-tracking decorator over a hash map
//!
//! [`TrackingMap`] wraps a `HashMap` and records every key the caller asks
//! about, hits and misses alike. After a configuration pass the owner can
//! call [`TrackingMap::expunge_unused`] to drop entries nobody read, or
//! inspect [`TrackingMap::keys_used`] to audit the read-set.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use kindred_core::{Reflect, Shape};

/// A `HashMap` wrapper that remembers which keys were read.
///
/// Reads (`get`, `contains_key`) record the requested key even when the map
/// holds no such entry. Writes (`insert`, `remove`) and value scans
/// (`contains_value`) do not count as usage. The read-set lives behind a
/// `RefCell` so lookups stay `&self`.
///
/// Keys must be `Clone` because the tracker stores its own copy of every
/// requested key.
#[derive(Default)]
pub struct TrackingMap<K, V> {
    inner: HashMap<K, V>,
    used: RefCell<HashSet<K>>,
}

impl<K, V> TrackingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Wrap an existing map. The wrapper takes ownership of the entries.
    pub fn new(inner: HashMap<K, V>) -> Self {
        TrackingMap {
            inner,
            used: RefCell::new(HashSet::new()),
        }
    }

    /// Look up a value, recording the key as used.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.used.borrow_mut().insert(key.clone());
        self.inner.get(key)
    }

    /// Check for a key, recording it as used.
    pub fn contains_key(&self, key: &K) -> bool {
        self.used.borrow_mut().insert(key.clone());
        self.inner.contains_key(key)
    }

    /// Insert an entry. Writing is not usage, so the key is not recorded.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.inner.insert(key, value)
    }

    /// Remove an entry along with any usage recorded for its key.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.used.borrow_mut().remove(key);
        self.inner.remove(key)
    }

    /// Scan for a value. Value scans do not touch the read-set.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.values().any(|candidate| candidate == value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Drop all entries and forget the read-set.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.used.borrow_mut().clear();
    }

    /// Iterate entries without recording usage.
    pub fn iter(&self) -> std::collections::hash_map::Iter<'_, K, V> {
        self.inner.iter()
    }

    /// Iterate keys without recording usage.
    pub fn keys(&self) -> std::collections::hash_map::Keys<'_, K, V> {
        self.inner.keys()
    }

    /// Iterate values without recording usage.
    pub fn values(&self) -> std::collections::hash_map::Values<'_, K, V> {
        self.inner.values()
    }

    /// Snapshot of every key that was requested so far, present or not.
    pub fn keys_used(&self) -> HashSet<K> {
        self.used.borrow().clone()
    }

    /// Retain only the entries whose keys were read.
    pub fn expunge_unused(&mut self) {
        let used = self.used.borrow();
        self.inner.retain(|key, _| used.contains(key));
    }

    /// Merge usage observed elsewhere, for example from a second wrapper
    /// around the same data.
    pub fn inform_additional_usage<I>(&self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.used.borrow_mut().extend(keys);
    }

    /// Borrow the wrapped map.
    pub fn inner(&self) -> &HashMap<K, V> {
        &self.inner
    }

    /// Unwrap, discarding the read-set.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.inner
    }
}

impl<K, V> From<HashMap<K, V>> for TrackingMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn from(inner: HashMap<K, V>) -> Self {
        TrackingMap::new(inner)
    }
}

/// Equality ignores the read-set; two wrappers are equal when their entries
/// are.
impl<K, V> PartialEq for TrackingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> PartialEq<HashMap<K, V>> for TrackingMap<K, V>
where
    K: Eq + Hash + Clone,
    V: PartialEq,
{
    fn eq(&self, other: &HashMap<K, V>) -> bool {
        self.inner == *other
    }
}

/// Debug shows the entries only; the read-set is tracker state, not data.
impl<K, V> fmt::Debug for TrackingMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// Reflection exposes the backing entries as an associative container. The
/// read-set stays invisible, so a tracked map deep-equals a plain map with
/// the same entries no matter what was read through it.
impl<K, V> Reflect for TrackingMap<K, V>
where
    K: Reflect + Eq + Hash + Clone,
    V: Reflect,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Map(
            self.inner
                .iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect))
                .collect(),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
