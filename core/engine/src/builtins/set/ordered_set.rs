//! The insertion-ordered set backing `Set`.

use crate::{
    builtins::map::ordered_map::OrderedMap,
    gc::{custom_trace, Finalize, Trace},
    object::JsObject,
    JsValue,
};

/// An insertion-ordered set of values, keyed by `SameValueZero`.
#[derive(Default, Debug, Clone)]
pub struct OrderedSet {
    inner: OrderedMap<()>,
}

impl Finalize for OrderedSet {}
unsafe impl Trace for OrderedSet {
    custom_trace!(this, {
        mark(&this.inner);
    });
}

impl OrderedSet {
    /// Creates a new empty `OrderedSet`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of values, not counting iteration tombstones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// The number of slots, including iteration tombstones.
    #[must_use]
    pub fn full_len(&self) -> usize {
        self.inner.full_len()
    }

    /// Returns true if the set contains no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Adds a value to the set, keeping the first insertion position on
    /// re-adds. Returns `true` if the value was not yet present.
    pub fn add(&mut self, value: JsValue) -> bool {
        if self.inner.contains_key(&value) {
            return false;
        }
        self.inner.insert(value, ());
        true
    }

    /// Removes a value from the set, returning whether it was present.
    pub fn delete(&mut self, value: &JsValue) -> bool {
        self.inner.remove(value).is_some()
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Checks if the set contains the value.
    #[must_use]
    pub fn contains(&self, value: &JsValue) -> bool {
        self.inner.contains_key(value)
    }

    /// Gets a value by slot index, in insertion order.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&JsValue> {
        self.inner.get_index(index).map(|(value, ())| value)
    }

    /// An iterator over the values, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &JsValue> {
        self.inner.iter().map(|(value, ())| value)
    }

    /// Locks the indices for a live iterator.
    pub(crate) fn lock(&mut self, set: JsObject) -> SetLock {
        self.inner_lock();
        SetLock(set)
    }

    fn inner_lock(&mut self) {
        // The inner lock guard is managed by `SetLock`, so only the counter
        // is used here.
        self.inner.raw_lock();
    }

    pub(crate) fn unlock(&mut self) {
        self.inner.unlock();
    }
}

/// Keeps the indices of a set stable for the lifetime of an iterator.
#[derive(Debug, Trace)]
pub(crate) struct SetLock(JsObject);

impl Finalize for SetLock {
    fn finalize(&self) {
        let Ok(mut set) = self.0.try_borrow_mut() else {
            return;
        };
        if let Some(set) = set.as_set_mut() {
            set.unlock();
        }
    }
}
