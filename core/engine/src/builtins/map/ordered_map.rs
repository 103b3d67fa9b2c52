//! The insertion-ordered map backing `Map` and `Set`.

use crate::{
    gc::{custom_trace, Finalize, Trace},
    object::JsObject,
    JsValue,
};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::{
    fmt::Debug,
    hash::{Hash, Hasher},
};

/// A map key: either a value (compared with `SameValueZero`, which is the
/// `PartialEq` of `JsValue`) or a tombstone left by a removal during
/// iteration.
#[derive(PartialEq, Eq, Clone, Debug)]
enum MapKey {
    Key(JsValue),
    Empty(usize), // Necessary to ensure empty keys are still unique.
}

// This ensures that a MapKey::Key(value) hashes to the same as value. The
// derived PartialEq implementation still holds.
impl Hash for MapKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            MapKey::Key(v) => v.hash(state),
            MapKey::Empty(e) => e.hash(state),
        }
    }
}

impl indexmap::Equivalent<MapKey> for JsValue {
    fn equivalent(&self, key: &MapKey) -> bool {
        match key {
            MapKey::Key(v) => v == self,
            MapKey::Empty(_) => false,
        }
    }
}

/// A structure wrapping `indexmap::IndexMap`, preserving insertion order and
/// keeping indices stable while iterators are live.
#[derive(Clone)]
pub struct OrderedMap<V> {
    map: IndexMap<MapKey, Option<V>, FxBuildHasher>,
    lock: u32,
    empty_count: usize,
}

impl<V: Trace> Finalize for OrderedMap<V> {}
unsafe impl<V: Trace> Trace for OrderedMap<V> {
    custom_trace!(this, {
        for (k, v) in &this.map {
            if let MapKey::Key(key) = k {
                mark(key);
            }
            mark(v);
        }
    });
}

impl<V: Debug> Debug for OrderedMap<V> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        self.map.fmt(formatter)
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedMap<V> {
    /// Creates a new empty `OrderedMap`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: IndexMap::default(),
            lock: 0,
            empty_count: 0,
        }
    }

    /// Return the number of key-value pairs in the map, including empty
    /// tombstones.
    #[must_use]
    pub fn full_len(&self) -> usize {
        self.map.len()
    }

    /// Gets the number of key-value pairs in the map, not including
    /// tombstones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len() - self.empty_count
    }

    /// Returns true if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Insert a key-value pair in the map.
    ///
    /// If an equivalent key already exists in the map: the key remains and
    /// retains its place in the order, and its value is updated.
    pub fn insert(&mut self, key: JsValue, value: V) -> Option<V> {
        self.map.insert(MapKey::Key(key), Some(value)).flatten()
    }

    /// Removes the key-value pair equivalent to `key` and returns its value.
    ///
    /// While iterators are live, a tombstone keeps the indices of the other
    /// entries stable.
    pub fn remove(&mut self, key: &JsValue) -> Option<V> {
        if self.lock == 0 {
            self.map.shift_remove(key).flatten()
        } else if self.map.contains_key(key) {
            self.map.insert(MapKey::Empty(self.empty_count), None);
            self.empty_count += 1;
            self.map.swap_remove(key).flatten()
        } else {
            None
        }
    }

    /// Removes all elements from the map.
    pub fn clear(&mut self) {
        self.map.clear();
        self.map.shrink_to_fit();
        self.empty_count = 0;
    }

    /// Return a reference to the value stored for `key`, if it is present.
    #[must_use]
    pub fn get(&self, key: &JsValue) -> Option<&V> {
        self.map.get(key).and_then(Option::as_ref)
    }

    /// Get a key-value pair by index, in insertion order.
    ///
    /// Valid indices are `0 <= index < self.full_len()`.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<(&JsValue, &V)> {
        if let (MapKey::Key(key), Some(value)) = self.map.get_index(index)? {
            Some((key, value))
        } else {
            None
        }
    }

    /// Return an iterator over the key-value pairs of the map, in their
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&JsValue, &V)> {
        self.map.iter().filter_map(|o| {
            if let (MapKey::Key(key), Some(value)) = o {
                Some((key, value))
            } else {
                None
            }
        })
    }

    /// Return `true` if an equivalent to `key` exists in the map.
    #[must_use]
    pub fn contains_key(&self, key: &JsValue) -> bool {
        self.map.contains_key(key)
    }

    /// Increases the lock counter and returns a lock object that will
    /// decrement the counter when dropped.
    ///
    /// This allows objects to be removed from the map during iteration
    /// without affecting the indexes until the iteration has completed.
    pub(crate) fn lock(&mut self, map: JsObject) -> MapLock {
        self.lock += 1;
        MapLock(map)
    }

    /// Increases the lock counter without creating a guard, for wrappers
    /// that manage their own unlock.
    pub(crate) fn raw_lock(&mut self) {
        self.lock += 1;
    }

    /// Decreases the lock counter and, if 0, removes all empty entries.
    pub(crate) fn unlock(&mut self) {
        self.lock -= 1;
        if self.lock == 0 {
            self.map.retain(|k, _| matches!(k, MapKey::Key(_)));
            self.empty_count = 0;
        }
    }
}

/// Increases the lock count of the map for the lifetime of the guard.
/// This should not be dropped until iteration has completed.
#[derive(Debug, Trace)]
pub(crate) struct MapLock(JsObject);

impl Clone for MapLock {
    fn clone(&self) -> Self {
        let mut map = self.0.borrow_mut();
        let map = map.as_map_mut().expect("MapLock does not point to a map");
        map.lock(self.0.clone())
    }
}

impl Finalize for MapLock {
    fn finalize(&self) {
        // A dead lock unlocks its map; a map collected in the same sweep
        // simply skips the cleanup.
        let Ok(mut map) = self.0.try_borrow_mut() else {
            return;
        };
        if let Some(map) = map.as_map_mut() {
            map.unlock();
        }
    }
}
