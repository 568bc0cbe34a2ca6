#![forbid(unsafe_code)]

//! Immutable snapshots of an observable map.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use rtmodel_foundation::{RtError, RtResult};

/// A read-only snapshot of a map's entries, in key order.
///
/// A view is detached from its source: later mutations of the map are not
/// visible through it. Cloning a view is O(1).
pub struct MapView<K, V> {
    entries: Rc<BTreeMap<K, V>>,
}

impl<K, V> Clone for MapView<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Rc::clone(&self.entries),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MapView<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Ord + Clone + fmt::Debug, V: Clone> MapView<K, V> {
    pub(crate) fn new(entries: BTreeMap<K, V>) -> Self {
        Self {
            entries: Rc::new(entries),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Value for `key`, or [`RtError::KeyNotFound`].
    pub fn lookup<Q>(&self, key: &Q) -> RtResult<V>
    where
        K: Borrow<Q>,
        Q: Ord + fmt::Debug + ?Sized,
    {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| RtError::key_not_found(&key))
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    /// Split into two views holding the lower and upper halves (by key
    /// order). Returns `None` when there are fewer than two entries.
    #[must_use]
    pub fn split(&self) -> Option<(Self, Self)> {
        if self.entries.len() < 2 {
            return None;
        }
        let mid = self.entries.len() / 2;
        let mut first = BTreeMap::new();
        let mut second = BTreeMap::new();
        for (i, (k, v)) in self.entries.iter().enumerate() {
            let half = if i < mid { &mut first } else { &mut second };
            half.insert(k.clone(), v.clone());
        }
        Some((Self::new(first), Self::new(second)))
    }
}

impl<'a, K, V> IntoIterator for &'a MapView<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::btree_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
