//! The internal methods of string exotic objects.
//!
//! Bound strings synthesize their indexed character descriptors on demand,
//! so boxing a large string never materializes per-character properties.

use super::{is_compatible_property_descriptor, ordinary_define_own_property};
use crate::{
    js_string,
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    Context, JsResult, JsString,
};

/// `StringGetOwnProperty ( S, P )`: synthesizes the descriptor of an indexed
/// character.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-stringgetownproperty
fn string_get_own_property(string: &JsString, key: &PropertyKey) -> Option<PropertyDescriptor> {
    // 2. If Type(P) is not String, return undefined. (Canonical indexes only.)
    let index = key.as_index()? as usize;

    // 3-7. Let str be the String value of S.[[StringData]]; if index is out
    //      of bounds, return undefined.
    let code_unit = string.code_unit_at(index)?;

    // 8-9. Return the single code unit descriptor.
    Some(
        PropertyDescriptor::builder()
            .value(js_string!(&[code_unit][..]))
            .writable(false)
            .enumerable(true)
            .configurable(false)
            .build(),
    )
}

/// Internal method `[[GetOwnProperty]] ( P )` of string exotic objects.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-getownproperty-p
pub(crate) fn string_exotic_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
) -> Option<PropertyDescriptor> {
    // 1. Let desc be OrdinaryGetOwnProperty(S, P).
    // 2. If desc is not undefined, return desc.
    if let Some(desc) = obj.borrow().properties().get(key) {
        return Some(desc.clone());
    }

    // 3. Return StringGetOwnProperty(S, P).
    let string = obj
        .borrow()
        .as_string()
        .expect("string exotic method called on non-string object");
    string_get_own_property(&string, key)
}

/// Internal method `[[DefineOwnProperty]] ( P, Desc )` of string exotic
/// objects.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-defineownproperty-p-desc
pub(crate) fn string_exotic_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let stringDesc be StringGetOwnProperty(S, P).
    let string = obj
        .borrow()
        .as_string()
        .expect("string exotic method called on non-string object");

    if let Some(string_desc) = string_get_own_property(&string, key) {
        // 2. If stringDesc is not undefined, then
        // a. Let extensible be S.[[Extensible]].
        let extensible = obj.borrow().extensible();
        // b. Return IsCompatiblePropertyDescriptor(extensible, Desc, stringDesc).
        return Ok(is_compatible_property_descriptor(
            extensible,
            desc,
            Some(string_desc),
        ));
    }

    // 3. Return ! OrdinaryDefineOwnProperty(S, P, Desc).
    ordinary_define_own_property(obj, key, desc, context)
}

/// Internal method `[[OwnPropertyKeys]] ( )` of string exotic objects.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-string-exotic-objects-ownpropertykeys
pub(crate) fn string_exotic_own_property_keys(obj: &JsObject) -> Vec<PropertyKey> {
    let object = obj.borrow();
    let string = object
        .as_string()
        .expect("string exotic method called on non-string object");
    let len = string.len() as u32;

    let properties = object.properties();
    let mut keys = Vec::with_capacity(len as usize + 8);

    // 3. For each integer i starting with 0 such that i < len, in ascending
    //    order, append ! ToString(𝔽(i)).
    keys.extend((0..len).map(PropertyKey::Index));

    // 4. For each own property key P of O such that P is an array index and
    //    ! ToIntegerOrInfinity(P) ≥ len, in ascending numeric index order.
    keys.extend(
        properties
            .index_property_keys()
            .filter(|index| *index >= len)
            .map(PropertyKey::Index),
    );

    // 5. Strings in ascending chronological order of property creation.
    keys.extend(
        properties
            .string_property_keys()
            .cloned()
            .map(PropertyKey::String),
    );

    // 6. Symbols in ascending chronological order of property creation.
    keys.extend(
        properties
            .symbol_property_keys()
            .cloned()
            .map(PropertyKey::Symbol),
    );

    keys
}
