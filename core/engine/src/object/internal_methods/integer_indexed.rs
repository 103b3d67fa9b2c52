//! The internal methods of integer-indexed (typed array) exotic objects.
//!
//! Every canonical numeric key is routed to the backing buffer; the view is
//! revalidated against the current buffer length on each access, which is
//! what makes length-tracking views over resizable buffers work.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects

use super::{ordinary_define_own_property, ordinary_get, ordinary_set};
use crate::{
    builtins::{typed_array, Number},
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    value::string_to_number,
    Context, JsResult, JsValue,
};

/// Abstract operation `CanonicalNumericIndexString ( argument )`.
///
/// Returns the numeric value if the key spells a canonical numeric string
/// (including `"-0"` and non-integer forms), which typed arrays must
/// intercept.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-canonicalnumericindexstring
pub(crate) fn canonical_numeric_index_string(key: &PropertyKey) -> Option<f64> {
    match key {
        PropertyKey::Index(index) => Some(f64::from(*index)),
        PropertyKey::String(string) => {
            if string == "-0" {
                return Some(-0.0);
            }
            let n = string_to_number(string);
            (&Number::to_js_string(n) == string).then_some(n)
        }
        PropertyKey::Symbol(_) => None,
    }
}

/// Internal method `[[GetOwnProperty]] ( P )`.
pub(crate) fn integer_indexed_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. If Type(P) is String and CanonicalNumericIndexString(P) is not
    //    undefined, then
    if let Some(numeric_index) = canonical_numeric_index_string(key) {
        // b. Let value be IntegerIndexedElementGet(O, numericIndex).
        // c. If value is undefined, return undefined.
        let value = typed_array::integer_indexed_element_get(obj, numeric_index)?;

        // d. Return the PropertyDescriptor { [[Value]]: value, [[Writable]]:
        //    true, [[Enumerable]]: true, [[Configurable]]: true }.
        return Some(
            PropertyDescriptor::builder()
                .value(value)
                .writable(true)
                .enumerable(true)
                .configurable(true)
                .build(),
        );
    }

    // 2. Return OrdinaryGetOwnProperty(O, P).
    obj.borrow().properties().get(key).cloned()
}

/// Internal method `[[HasProperty]] ( P )`.
pub(crate) fn integer_indexed_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    if let Some(numeric_index) = canonical_numeric_index_string(key) {
        return Ok(typed_array::is_valid_integer_index(obj, numeric_index));
    }
    super::ordinary_has_property(obj, key, context)
}

/// Internal method `[[DefineOwnProperty]] ( P, Desc )`.
pub(crate) fn integer_indexed_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If Type(P) is String and CanonicalNumericIndexString(P) is not
    //    undefined, then
    if let Some(numeric_index) = canonical_numeric_index_string(key) {
        // a. If ! IsValidIntegerIndex(O, numericIndex) is false, return false.
        if !typed_array::is_valid_integer_index(obj, numeric_index) {
            return Ok(false);
        }
        // b. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is false, return false.
        if desc.configurable() == Some(false) {
            return Ok(false);
        }
        // c. If Desc has an [[Enumerable]] field and Desc.[[Enumerable]] is false, return false.
        if desc.enumerable() == Some(false) {
            return Ok(false);
        }
        // d. If IsAccessorDescriptor(Desc) is true, return false.
        if desc.is_accessor_descriptor() {
            return Ok(false);
        }
        // e. If Desc has a [[Writable]] field and Desc.[[Writable]] is false, return false.
        if desc.writable() == Some(false) {
            return Ok(false);
        }
        // f. If Desc has a [[Value]] field, perform ? IntegerIndexedElementSet(O, numericIndex, Desc.[[Value]]).
        if let Some(value) = desc.value() {
            typed_array::integer_indexed_element_set(obj, numeric_index, value, context)?;
        }
        // g. Return true.
        return Ok(true);
    }

    // 2. Return ! OrdinaryDefineOwnProperty(O, P, Desc).
    ordinary_define_own_property(obj, key, desc, context)
}

/// Internal method `[[Get]] ( P, Receiver )`.
pub(crate) fn integer_indexed_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If Type(P) is String and CanonicalNumericIndexString(P) is not
    //    undefined, then a. Return ! IntegerIndexedElementGet(O, numericIndex).
    if let Some(numeric_index) = canonical_numeric_index_string(key) {
        return Ok(typed_array::integer_indexed_element_get(obj, numeric_index)
            .unwrap_or_default());
    }

    // 2. Return ? OrdinaryGet(O, P, Receiver).
    ordinary_get(obj, key, receiver, context)
}

/// Internal method `[[Set]] ( P, V, Receiver )`.
pub(crate) fn integer_indexed_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If Type(P) is String and CanonicalNumericIndexString(P) is not
    //    undefined, then a. Perform ? IntegerIndexedElementSet(O, numericIndex, V). b. Return true.
    if let Some(numeric_index) = canonical_numeric_index_string(&key) {
        typed_array::integer_indexed_element_set(obj, numeric_index, &value, context)?;
        return Ok(true);
    }

    // 2. Return ? OrdinarySet(O, P, V, Receiver).
    ordinary_set(obj, key, value, receiver, context)
}

/// Internal method `[[Delete]] ( P )`.
pub(crate) fn integer_indexed_delete(obj: &JsObject, key: &PropertyKey) -> bool {
    // 1. If Type(P) is String and CanonicalNumericIndexString(P) is not
    //    undefined, then a. If ! IsValidIntegerIndex(O, numericIndex) is
    //    false, return true; else return false.
    if let Some(numeric_index) = canonical_numeric_index_string(key) {
        return !typed_array::is_valid_integer_index(obj, numeric_index);
    }

    // 2. Return ! OrdinaryDelete(O, P).
    super::ordinary_delete(obj, key)
}

/// Internal method `[[OwnPropertyKeys]] ( )`.
pub(crate) fn integer_indexed_own_property_keys(obj: &JsObject) -> Vec<PropertyKey> {
    let length = typed_array::typed_array_length(obj).unwrap_or(0);

    let object = obj.borrow();
    let properties = object.properties();
    let mut keys: Vec<PropertyKey> = Vec::with_capacity(length as usize + 4);

    // 3. If IsTypedArrayOutOfBounds(taRecord) is false: for each integer i
    //    starting with 0 such that i < length, append ! ToString(𝔽(i)).
    keys.extend((0..length).map(|index| PropertyKey::Index(index as u32)));

    // 4. For each own property key P of O such that Type(P) is String, in
    //    ascending chronological order.
    keys.extend(
        properties
            .string_property_keys()
            .cloned()
            .map(PropertyKey::String),
    );

    // 5. For each own property key P of O such that Type(P) is Symbol, in
    //    ascending chronological order.
    keys.extend(
        properties
            .symbol_property_keys()
            .cloned()
            .map(PropertyKey::Symbol),
    );

    keys
}
