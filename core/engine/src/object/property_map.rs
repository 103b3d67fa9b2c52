//! The ordered property storage of an object.

use crate::{
    gc::{custom_trace, Finalize, Trace},
    property::{PropertyDescriptor, PropertyKey},
    JsString, JsSymbol,
};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use std::collections::BTreeMap;

/// The property table of an object.
///
/// Integer-indexed keys are stored in ascending numeric order; string and
/// symbol keys preserve insertion order, which together realizes the
/// `OrdinaryOwnPropertyKeys` emission order.
#[derive(Default, Debug, Finalize)]
pub struct PropertyMap {
    indexed_properties: BTreeMap<u32, PropertyDescriptor>,
    string_properties: IndexMap<JsString, PropertyDescriptor, FxBuildHasher>,
    symbol_properties: IndexMap<JsSymbol, PropertyDescriptor, FxBuildHasher>,
}

unsafe impl Trace for PropertyMap {
    custom_trace!(this, {
        for descriptor in this.indexed_properties.values() {
            mark(descriptor);
        }
        for descriptor in this.string_properties.values() {
            mark(descriptor);
        }
        for descriptor in this.symbol_properties.values() {
            mark(descriptor);
        }
    });
}

impl PropertyMap {
    /// Creates a new empty `PropertyMap`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the property associated with the key.
    #[must_use]
    pub fn get(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        match key {
            PropertyKey::Index(index) => self.indexed_properties.get(index),
            PropertyKey::String(string) => self.string_properties.get(string),
            PropertyKey::Symbol(symbol) => self.symbol_properties.get(symbol),
        }
    }

    /// Inserts a property, returning the previous one if present.
    pub fn insert(
        &mut self,
        key: &PropertyKey,
        property: PropertyDescriptor,
    ) -> Option<PropertyDescriptor> {
        match key {
            PropertyKey::Index(index) => self.indexed_properties.insert(*index, property),
            PropertyKey::String(string) => self.string_properties.insert(string.clone(), property),
            PropertyKey::Symbol(symbol) => self.symbol_properties.insert(symbol.clone(), property),
        }
    }

    /// Removes a property, returning it if present.
    ///
    /// String and symbol removals shift the remaining keys, preserving the
    /// insertion order of the survivors.
    pub fn remove(&mut self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        match key {
            PropertyKey::Index(index) => self.indexed_properties.remove(index),
            PropertyKey::String(string) => self.string_properties.shift_remove(string),
            PropertyKey::Symbol(symbol) => self.symbol_properties.shift_remove(symbol),
        }
    }

    /// Checks if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &PropertyKey) -> bool {
        match key {
            PropertyKey::Index(index) => self.indexed_properties.contains_key(index),
            PropertyKey::String(string) => self.string_properties.contains_key(string),
            PropertyKey::Symbol(symbol) => self.symbol_properties.contains_key(symbol),
        }
    }

    /// An iterator over the indexed properties in ascending order.
    pub fn index_properties(&self) -> impl Iterator<Item = (&u32, &PropertyDescriptor)> {
        self.indexed_properties.iter()
    }

    /// An iterator over the indexed keys in ascending order.
    pub fn index_property_keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.indexed_properties.keys().copied()
    }

    /// An iterator over the string keys in insertion order.
    pub fn string_property_keys(&self) -> impl Iterator<Item = &JsString> {
        self.string_properties.keys()
    }

    /// An iterator over the symbol keys in insertion order.
    pub fn symbol_property_keys(&self) -> impl Iterator<Item = &JsSymbol> {
        self.symbol_properties.keys()
    }

    /// The own keys in `OrdinaryOwnPropertyKeys` order: indexes ascending,
    /// then strings in insertion order, then symbols in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<PropertyKey> {
        let mut keys: Vec<PropertyKey> = Vec::with_capacity(
            self.indexed_properties.len()
                + self.string_properties.len()
                + self.symbol_properties.len(),
        );
        keys.extend(self.index_property_keys().map(PropertyKey::Index));
        keys.extend(
            self.string_property_keys()
                .cloned()
                .map(PropertyKey::String),
        );
        keys.extend(
            self.symbol_property_keys()
                .cloned()
                .map(PropertyKey::Symbol),
        );
        keys
    }

    /// Overrides the indexed properties with a dense list of values, used by
    /// the fast path of `CreateArrayFromList`.
    pub fn override_indexed_properties(&mut self, values: impl IntoIterator<Item = crate::JsValue>) {
        self.indexed_properties.clear();
        for (index, value) in values.into_iter().enumerate() {
            self.indexed_properties.insert(
                index as u32,
                PropertyDescriptor::builder()
                    .value(value)
                    .writable(true)
                    .enumerable(true)
                    .configurable(true)
                    .build(),
            );
        }
    }
}
