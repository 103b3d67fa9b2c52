//! Property descriptors and property keys.
//!
//! The [`PropertyDescriptor`] type is a record of property attributes in
//! which every field may be present or absent, exactly like the Property
//! Descriptor specification type. [`PropertyKey`] is the key space of the
//! property protocol: canonical array indices, strings, and symbols.
//!
//! More information:
//!  - [MDN documentation][mdn]
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-property-descriptor-specification-type
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/defineProperty

mod attribute;

pub use attribute::Attribute;

use crate::{
    gc::{custom_trace, Finalize, Trace},
    js_string, JsString, JsSymbol, JsValue,
};
use std::fmt;

/// The key of a single object property.
///
/// Array indices are kept in canonical numeric form: a string key is only an
/// `Index` when it round-trips to the same decimal representation, so `"04"`
/// and `"-1"` stay ordinary string keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Finalize)]
pub enum PropertyKey {
    /// A string property key.
    String(JsString),
    /// A symbol property key.
    Symbol(JsSymbol),
    /// A canonical numeric property key.
    Index(u32),
}

// Keys never contain GC'd objects.
unsafe impl Trace for PropertyKey {
    custom_trace!(this, {
        match this {
            PropertyKey::String(_) | PropertyKey::Symbol(_) | PropertyKey::Index(_) => {}
        }
    });
}

/// Parses a string of UTF-16 code units as a canonical array index.
fn canonical_index(code_units: &[u16]) -> Option<u32> {
    if code_units.is_empty() || code_units.len() > 10 {
        return None;
    }
    // No leading zeros except for "0" itself.
    if code_units[0] == u16::from(b'0') && code_units.len() > 1 {
        return None;
    }
    let mut result: u64 = 0;
    for &unit in code_units {
        if !(u16::from(b'0')..=u16::from(b'9')).contains(&unit) {
            return None;
        }
        result = result * 10 + u64::from(unit - u16::from(b'0'));
    }
    u32::try_from(result).ok()
}

impl PropertyKey {
    /// Returns the index if the key is a canonical numeric key.
    #[must_use]
    pub fn as_index(&self) -> Option<u32> {
        match self {
            Self::Index(index) => Some(*index),
            _ => None,
        }
    }

    /// Returns the string if the key is a string key.
    #[must_use]
    pub fn as_string(&self) -> Option<&JsString> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    /// Returns the symbol if the key is a symbol key.
    #[must_use]
    pub fn as_symbol(&self) -> Option<&JsSymbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }
}

impl From<JsString> for PropertyKey {
    fn from(string: JsString) -> Self {
        canonical_index(&string).map_or(Self::String(string), Self::Index)
    }
}

impl From<&JsString> for PropertyKey {
    fn from(string: &JsString) -> Self {
        Self::from(string.clone())
    }
}

impl From<&str> for PropertyKey {
    fn from(string: &str) -> Self {
        Self::from(js_string!(string))
    }
}

impl From<JsSymbol> for PropertyKey {
    fn from(symbol: JsSymbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<u32> for PropertyKey {
    fn from(index: u32) -> Self {
        Self::Index(index)
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        u32::try_from(index).map_or_else(|_| Self::from(js_string!(index.to_string())), Self::Index)
    }
}

impl From<u64> for PropertyKey {
    fn from(index: u64) -> Self {
        u32::try_from(index).map_or_else(|_| Self::from(js_string!(index.to_string())), Self::Index)
    }
}

impl From<i32> for PropertyKey {
    fn from(index: i32) -> Self {
        u32::try_from(index).map_or_else(|_| Self::from(js_string!(index.to_string())), Self::Index)
    }
}

impl From<i64> for PropertyKey {
    fn from(index: i64) -> Self {
        u32::try_from(index).map_or_else(|_| Self::from(js_string!(index.to_string())), Self::Index)
    }
}

impl From<&PropertyKey> for JsValue {
    fn from(key: &PropertyKey) -> Self {
        match key {
            PropertyKey::String(string) => string.clone().into(),
            PropertyKey::Symbol(symbol) => symbol.clone().into(),
            PropertyKey::Index(index) => js_string!(index.to_string()).into(),
        }
    }
}

impl From<PropertyKey> for JsValue {
    fn from(key: PropertyKey) -> Self {
        Self::from(&key)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(string) => string.to_std_string_escaped().fmt(f),
            Self::Symbol(symbol) => symbol.descriptive_string().to_std_string_escaped().fmt(f),
            Self::Index(index) => index.fmt(f),
        }
    }
}

/// The kind of result produced by key/value enumeration operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyNameKind {
    /// Produce keys.
    Key,
    /// Produce values.
    Value,
    /// Produce `[key, value]` pairs.
    KeyAndValue,
}

/// The kind half of a [`PropertyDescriptor`].
#[derive(Debug, Clone, Trace, Finalize)]
pub enum DescriptorKind {
    /// A data descriptor.
    Data {
        /// The `[[Value]]` field, if present.
        value: Option<JsValue>,
        /// The `[[Writable]]` field, if present.
        writable: Option<bool>,
    },
    /// An accessor descriptor.
    Accessor {
        /// The `[[Get]]` field, if present.
        get: Option<JsValue>,
        /// The `[[Set]]` field, if present.
        set: Option<JsValue>,
    },
    /// A descriptor with neither value/writable nor get/set.
    Generic,
}

impl Default for DescriptorKind {
    fn default() -> Self {
        Self::Generic
    }
}

/// A Property Descriptor with per-field presence tracking.
#[derive(Debug, Clone, Default, Trace, Finalize)]
pub struct PropertyDescriptor {
    enumerable: Option<bool>,
    configurable: Option<bool>,
    kind: DescriptorKind,
}

impl PropertyDescriptor {
    /// An empty property descriptor builder.
    #[must_use]
    pub fn builder() -> PropertyDescriptorBuilder {
        PropertyDescriptorBuilder::new()
    }

    /// `IsAccessorDescriptor ( Desc )`
    #[must_use]
    pub fn is_accessor_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Accessor { .. })
    }

    /// `IsDataDescriptor ( Desc )`
    #[must_use]
    pub fn is_data_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Data { .. })
    }

    /// `IsGenericDescriptor ( Desc )`
    #[must_use]
    pub fn is_generic_descriptor(&self) -> bool {
        matches!(self.kind, DescriptorKind::Generic)
    }

    /// Checks if the descriptor has no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_generic_descriptor() && self.enumerable.is_none() && self.configurable.is_none()
    }

    /// Returns the `[[Enumerable]]` field, if present.
    #[must_use]
    pub fn enumerable(&self) -> Option<bool> {
        self.enumerable
    }

    /// Returns the `[[Configurable]]` field, if present.
    #[must_use]
    pub fn configurable(&self) -> Option<bool> {
        self.configurable
    }

    /// Returns the `[[Writable]]` field, if present.
    #[must_use]
    pub fn writable(&self) -> Option<bool> {
        match &self.kind {
            DescriptorKind::Data { writable, .. } => *writable,
            _ => None,
        }
    }

    /// Returns the `[[Value]]` field, if present.
    #[must_use]
    pub fn value(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Data { value, .. } => value.as_ref(),
            _ => None,
        }
    }

    /// Returns the `[[Get]]` field, if present.
    #[must_use]
    pub fn get(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Accessor { get, .. } => get.as_ref(),
            _ => None,
        }
    }

    /// Returns the `[[Set]]` field, if present.
    #[must_use]
    pub fn set(&self) -> Option<&JsValue> {
        match &self.kind {
            DescriptorKind::Accessor { set, .. } => set.as_ref(),
            _ => None,
        }
    }

    /// Returns the `[[Enumerable]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_enumerable(&self) -> bool {
        self.enumerable.expect("descriptor must have an enumerable field")
    }

    /// Returns the `[[Configurable]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_configurable(&self) -> bool {
        self.configurable
            .expect("descriptor must have a configurable field")
    }

    /// Returns the `[[Writable]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_writable(&self) -> bool {
        self.writable().expect("descriptor must have a writable field")
    }

    /// Returns the `[[Value]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_value(&self) -> &JsValue {
        self.value().expect("descriptor must have a value field")
    }

    /// Returns the `[[Get]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_get(&self) -> &JsValue {
        self.get().expect("descriptor must have a get field")
    }

    /// Returns the `[[Set]]` field.
    ///
    /// # Panics
    ///
    /// Panics if the field is absent.
    #[must_use]
    pub fn expect_set(&self) -> &JsValue {
        self.set().expect("descriptor must have a set field")
    }

    /// Returns the kind record of the descriptor.
    #[must_use]
    pub fn kind(&self) -> &DescriptorKind {
        &self.kind
    }

    /// Fills in the absent fields of `self` with the fields of `desc`,
    /// per the validation semantics of `ValidateAndApplyPropertyDescriptor`.
    pub fn fill_with(&mut self, desc: &Self) {
        match (&mut self.kind, &desc.kind) {
            (
                DescriptorKind::Data { value, writable },
                DescriptorKind::Data {
                    value: new_value,
                    writable: new_writable,
                },
            ) => {
                if let Some(new_value) = new_value {
                    *value = Some(new_value.clone());
                }
                if let Some(new_writable) = new_writable {
                    *writable = Some(*new_writable);
                }
            }
            (
                DescriptorKind::Accessor { get, set },
                DescriptorKind::Accessor {
                    get: new_get,
                    set: new_set,
                },
            ) => {
                if let Some(new_get) = new_get {
                    *get = Some(new_get.clone());
                }
                if let Some(new_set) = new_set {
                    *set = Some(new_set.clone());
                }
            }
            (_, DescriptorKind::Generic) => {}
            (kind, new_kind) => *kind = new_kind.clone(),
        }
        if let Some(enumerable) = desc.enumerable {
            self.enumerable = Some(enumerable);
        }
        if let Some(configurable) = desc.configurable {
            self.configurable = Some(configurable);
        }
    }

    /// `CompletePropertyDescriptor ( Desc )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-completepropertydescriptor
    #[must_use]
    pub fn complete_property_descriptor(self) -> Self {
        let mut builder = PropertyDescriptorBuilder { inner: self };
        if builder.inner.is_generic_descriptor() || builder.inner.is_data_descriptor() {
            builder = builder.complete_with_data_defaults();
        } else {
            builder = builder.complete_with_accessor_defaults();
        }
        builder.build()
    }

    /// Converts the descriptor into a data descriptor with all defaults
    /// filled.
    #[must_use]
    pub fn into_data_defaulted(self) -> Self {
        PropertyDescriptorBuilder { inner: self }
            .complete_with_data_defaults()
            .build()
    }
}

/// A builder for [`PropertyDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct PropertyDescriptorBuilder {
    inner: PropertyDescriptor,
}

impl PropertyDescriptorBuilder {
    /// Creates a new builder with no fields present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `[[Value]]` field.
    #[must_use]
    pub fn value<V: Into<JsValue>>(mut self, value: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Data {
                value: ref mut v, ..
            } => *v = Some(value.into()),
            _ => {
                self.inner.kind = DescriptorKind::Data {
                    value: Some(value.into()),
                    writable: None,
                }
            }
        }
        self
    }

    /// Sets the `[[Writable]]` field.
    #[must_use]
    pub fn writable(mut self, writable: bool) -> Self {
        match self.inner.kind {
            DescriptorKind::Data {
                writable: ref mut w,
                ..
            } => *w = Some(writable),
            _ => {
                self.inner.kind = DescriptorKind::Data {
                    value: None,
                    writable: Some(writable),
                }
            }
        }
        self
    }

    /// Sets the `[[Get]]` field.
    #[must_use]
    pub fn get<V: Into<JsValue>>(mut self, get: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Accessor { get: ref mut g, .. } => *g = Some(get.into()),
            _ => {
                self.inner.kind = DescriptorKind::Accessor {
                    get: Some(get.into()),
                    set: None,
                }
            }
        }
        self
    }

    /// Sets the `[[Set]]` field.
    #[must_use]
    pub fn set<V: Into<JsValue>>(mut self, set: V) -> Self {
        match self.inner.kind {
            DescriptorKind::Accessor { set: ref mut s, .. } => *s = Some(set.into()),
            _ => {
                self.inner.kind = DescriptorKind::Accessor {
                    set: Some(set.into()),
                    get: None,
                }
            }
        }
        self
    }

    /// Sets the `[[Value]]` field if `value` is `Some`.
    #[must_use]
    pub fn maybe_value<V: Into<JsValue>>(self, value: Option<V>) -> Self {
        match value {
            Some(value) => self.value(value),
            None => self,
        }
    }

    /// Sets the `[[Writable]]` field if `writable` is `Some`.
    #[must_use]
    pub fn maybe_writable(self, writable: Option<bool>) -> Self {
        match writable {
            Some(writable) => self.writable(writable),
            None => self,
        }
    }

    /// Sets the `[[Get]]` field if `get` is `Some`.
    #[must_use]
    pub fn maybe_get<V: Into<JsValue>>(self, get: Option<V>) -> Self {
        match get {
            Some(get) => self.get(get),
            None => self,
        }
    }

    /// Sets the `[[Set]]` field if `set` is `Some`.
    #[must_use]
    pub fn maybe_set<V: Into<JsValue>>(self, set: Option<V>) -> Self {
        match set {
            Some(set) => self.set(set),
            None => self,
        }
    }

    /// Sets the `[[Enumerable]]` field.
    #[must_use]
    pub fn enumerable(mut self, enumerable: bool) -> Self {
        self.inner.enumerable = Some(enumerable);
        self
    }

    /// Sets the `[[Configurable]]` field.
    #[must_use]
    pub fn configurable(mut self, configurable: bool) -> Self {
        self.inner.configurable = Some(configurable);
        self
    }

    /// Sets the `[[Enumerable]]` field if `enumerable` is `Some`.
    #[must_use]
    pub fn maybe_enumerable(self, enumerable: Option<bool>) -> Self {
        match enumerable {
            Some(enumerable) => self.enumerable(enumerable),
            None => self,
        }
    }

    /// Sets the `[[Configurable]]` field if `configurable` is `Some`.
    #[must_use]
    pub fn maybe_configurable(self, configurable: Option<bool>) -> Self {
        match configurable {
            Some(configurable) => self.configurable(configurable),
            None => self,
        }
    }

    /// Fills the missing fields with the data descriptor defaults.
    #[must_use]
    pub fn complete_with_data_defaults(mut self) -> Self {
        let (value, writable) = match &self.inner.kind {
            DescriptorKind::Data { value, writable } => (
                value.clone().unwrap_or_default(),
                writable.unwrap_or(false),
            ),
            _ => (JsValue::undefined(), false),
        };
        self.inner.kind = DescriptorKind::Data {
            value: Some(value),
            writable: Some(writable),
        };
        self.inner.enumerable = Some(self.inner.enumerable.unwrap_or(false));
        self.inner.configurable = Some(self.inner.configurable.unwrap_or(false));
        self
    }

    /// Fills the missing fields with the accessor descriptor defaults.
    #[must_use]
    pub fn complete_with_accessor_defaults(mut self) -> Self {
        let (get, set) = match &self.inner.kind {
            DescriptorKind::Accessor { get, set } => (
                get.clone().unwrap_or_default(),
                set.clone().unwrap_or_default(),
            ),
            _ => (JsValue::undefined(), JsValue::undefined()),
        };
        self.inner.kind = DescriptorKind::Accessor {
            get: Some(get),
            set: Some(set),
        };
        self.inner.enumerable = Some(self.inner.enumerable.unwrap_or(false));
        self.inner.configurable = Some(self.inner.configurable.unwrap_or(false));
        self
    }

    /// Consumes the builder and returns the descriptor.
    #[must_use]
    pub fn build(self) -> PropertyDescriptor {
        self.inner
    }
}

impl From<PropertyDescriptorBuilder> for PropertyDescriptor {
    fn from(builder: PropertyDescriptorBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_index_parsing() {
        assert_eq!(PropertyKey::from("0").as_index(), Some(0));
        assert_eq!(PropertyKey::from("42").as_index(), Some(42));
        // Non-canonical forms stay string keys.
        assert_eq!(PropertyKey::from("04").as_index(), None);
        assert_eq!(PropertyKey::from("-1").as_index(), None);
        assert_eq!(PropertyKey::from("4294967296").as_index(), None);
        assert_eq!(PropertyKey::from("").as_index(), None);
        assert_eq!(PropertyKey::from("1e3").as_index(), None);
    }

    #[test]
    fn builder_tracks_presence() {
        let desc = PropertyDescriptor::builder().value(1).build();
        assert!(desc.is_data_descriptor());
        assert_eq!(desc.writable(), None);
        assert_eq!(desc.enumerable(), None);

        let completed = desc.complete_property_descriptor();
        assert_eq!(completed.writable(), Some(false));
        assert_eq!(completed.enumerable(), Some(false));
        assert_eq!(completed.configurable(), Some(false));
    }

    #[test]
    fn fill_with_merges_fields() {
        let mut desc = PropertyDescriptor::builder()
            .value(1)
            .writable(true)
            .enumerable(true)
            .configurable(true)
            .build();
        desc.fill_with(&PropertyDescriptor::builder().writable(false).build());
        assert_eq!(desc.writable(), Some(false));
        assert_eq!(desc.value().and_then(JsValue::as_number), Some(1.0));
        assert_eq!(desc.enumerable(), Some(true));
    }
}
