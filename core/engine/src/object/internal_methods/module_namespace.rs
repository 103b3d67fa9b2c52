//! The internal methods of module namespace exotic objects.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-module-namespace-exotic-objects

use crate::{
    object::JsObject,
    property::{PropertyDescriptor, PropertyKey},
    Context, JsResult, JsValue,
};

/// Internal method `[[GetOwnProperty]] ( P )`.
pub(crate) fn module_namespace_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
) -> JsResult<Option<PropertyDescriptor>> {
    // 1. If Type(P) is Symbol, return OrdinaryGetOwnProperty(O, P).
    if matches!(key, PropertyKey::Symbol(_)) {
        return Ok(obj.borrow().properties().get(key).cloned());
    }

    let object = obj.borrow();
    let namespace = object
        .as_module_namespace()
        .expect("module namespace method called on non-namespace object");

    // 2-3. If P is not an element of exports, return undefined.
    let Some(value) = namespace.get_export(key) else {
        return Ok(None);
    };

    // 4. Return the PropertyDescriptor { [[Value]]: value, [[Writable]]:
    //    true, [[Enumerable]]: true, [[Configurable]]: false }.
    Ok(Some(
        PropertyDescriptor::builder()
            .value(value)
            .writable(true)
            .enumerable(true)
            .configurable(false)
            .build(),
    ))
}

/// Internal method `[[DefineOwnProperty]] ( P, Desc )`.
pub(crate) fn module_namespace_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: &PropertyDescriptor,
) -> JsResult<bool> {
    // 1. If Type(P) is Symbol, return ! OrdinaryDefineOwnProperty(O, P, Desc).
    // (Namespaces only carry the non-configurable @@toStringTag, which the
    // ordinary validation already rejects changing.)

    // 2. Let current be ? O.[[GetOwnProperty]](P).
    let current = module_namespace_get_own_property(obj, key)?;

    // 3. If current is undefined, return false.
    let Some(current) = current else {
        return Ok(false);
    };

    // 4-7. Only a compatible data descriptor succeeds.
    if desc.is_accessor_descriptor()
        || desc.configurable() == Some(true)
        || desc.enumerable() == Some(false)
        || desc.writable() == Some(false)
    {
        return Ok(false);
    }

    // 8. If Desc has a [[Value]] field, return SameValue(Desc.[[Value]], current.[[Value]]).
    if let Some(value) = desc.value() {
        return Ok(JsValue::same_value(value, current.expect_value()));
    }

    // 9. Return true.
    Ok(true)
}

/// Internal method `[[Get]] ( P, Receiver )`.
pub(crate) fn module_namespace_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If Type(P) is Symbol, then a. Return ! OrdinaryGet(O, P, Receiver).
    if matches!(key, PropertyKey::Symbol(_)) {
        return super::ordinary_get(obj, key, receiver, context);
    }

    let object = obj.borrow();
    let namespace = object
        .as_module_namespace()
        .expect("module namespace method called on non-namespace object");

    // 2-12. Return the bound export, or undefined if absent.
    Ok(namespace.get_export(key).unwrap_or_default())
}

/// Internal method `[[Delete]] ( P )`.
pub(crate) fn module_namespace_delete(obj: &JsObject, key: &PropertyKey) -> JsResult<bool> {
    // 1. If Type(P) is Symbol, then a. Return ! OrdinaryDelete(O, P).
    if matches!(key, PropertyKey::Symbol(_)) {
        return Ok(super::ordinary_delete(obj, key));
    }

    let object = obj.borrow();
    let namespace = object
        .as_module_namespace()
        .expect("module namespace method called on non-namespace object");

    // 2-3. If P is an element of exports, return false; else true.
    Ok(namespace.get_export(key).is_none())
}

/// Internal method `[[OwnPropertyKeys]] ( )`.
pub(crate) fn module_namespace_own_property_keys(obj: &JsObject) -> Vec<PropertyKey> {
    let object = obj.borrow();
    let namespace = object
        .as_module_namespace()
        .expect("module namespace method called on non-namespace object");

    // 1. Let exports be O.[[Exports]]. (Already sorted by code unit order.)
    let mut keys: Vec<PropertyKey> = namespace.export_keys();

    // 2. Let symbolKeys be OrdinaryOwnPropertyKeys(O).
    keys.extend(
        object
            .properties()
            .symbol_property_keys()
            .cloned()
            .map(PropertyKey::Symbol),
    );

    keys
}
