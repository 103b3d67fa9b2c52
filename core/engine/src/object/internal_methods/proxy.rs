//! The internal methods of proxy exotic objects.
//!
//! Every operation loads the `[[ProxyTarget]]`/`[[ProxyHandler]]` pair,
//! throwing a `TypeError` if the proxy was revoked, then consults the trap
//! and enforces the proxy invariants against the target.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-proxy-object-internal-methods-and-internal-slots

use super::{is_compatible_property_descriptor, prototype_equals};
use crate::{
    error::JsNativeError,
    object::{JsObject, JsPrototype},
    property::{PropertyDescriptor, PropertyKey},
    Context, JsResult, JsValue,
};
use rustc_hash::FxHashSet;

/// Loads the (target, handler) pair, or throws if the proxy was revoked.
fn try_data(obj: &JsObject) -> JsResult<(JsObject, JsObject)> {
    obj.borrow()
        .as_proxy()
        .expect("proxy internal method called on non-proxy object")
        .try_data()
}

/// Gets the trap function from the handler, if present.
fn get_trap(
    handler: &JsObject,
    name: &str,
    context: &mut Context,
) -> JsResult<Option<JsObject>> {
    JsValue::from(handler).get_method(name, context)
}

/// Internal method `[[GetPrototypeOf]] ( )`.
pub(crate) fn proxy_get_prototype_of(
    obj: &JsObject,
    context: &mut Context,
) -> JsResult<JsPrototype> {
    // 1-4. Load target/handler and the trap.
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "getPrototypeOf", context)? else {
        // 5. If trap is undefined, return ? target.[[GetPrototypeOf]]().
        return target.__get_prototype_of__(context);
    };

    // 6. Let handlerProto be ? Call(trap, handler, « target »).
    let handler_proto = trap.call(&handler.clone().into(), &[target.clone().into()], context)?;

    // 7. If Type(handlerProto) is neither Object nor Null, throw a TypeError exception.
    let handler_proto = match &handler_proto {
        JsValue::Object(proto) => Some(proto.clone()),
        JsValue::Null => None,
        _ => {
            return Err(JsNativeError::typ()
                .with_message("proxy getPrototypeOf trap must return an object or null")
                .into())
        }
    };

    // 8-9. If extensibleTarget is true, return handlerProto.
    if target.__is_extensible__(context)? {
        return Ok(handler_proto);
    }

    // 10-12. Invariant: for a non-extensible target the trap must agree with
    //        the target's prototype.
    let target_proto = target.__get_prototype_of__(context)?;
    if !prototype_equals(&handler_proto, &target_proto) {
        return Err(JsNativeError::typ()
            .with_message("proxy getPrototypeOf trap violates the non-extensible invariant")
            .into());
    }

    // 13. Return handlerProto.
    Ok(handler_proto)
}

/// Internal method `[[SetPrototypeOf]] ( V )`.
pub(crate) fn proxy_set_prototype_of(
    obj: &JsObject,
    prototype: JsPrototype,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "setPrototypeOf", context)? else {
        // 5. If trap is undefined, return ? target.[[SetPrototypeOf]](V).
        return target.__set_prototype_of__(prototype, context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, V »)).
    let proto_value = prototype
        .clone()
        .map_or(JsValue::null(), JsValue::from);
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), proto_value],
            context,
        )?
        .to_boolean()
    {
        // 7. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 8-9. If the target is extensible, return true.
    if target.__is_extensible__(context)? {
        return Ok(true);
    }

    // 10-12. Invariant: the prototype of a non-extensible target cannot change.
    let target_proto = target.__get_prototype_of__(context)?;
    if !prototype_equals(&prototype, &target_proto) {
        return Err(JsNativeError::typ()
            .with_message("proxy setPrototypeOf trap violates the non-extensible invariant")
            .into());
    }

    // 13. Return true.
    Ok(true)
}

/// Internal method `[[IsExtensible]] ( )`.
pub(crate) fn proxy_is_extensible(obj: &JsObject, context: &mut Context) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "isExtensible", context)? else {
        // 5. If trap is undefined, return ? IsExtensible(target).
        return target.__is_extensible__(context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target »)).
    let result = trap
        .call(&handler.clone().into(), &[target.clone().into()], context)?
        .to_boolean();

    // 7-8. Invariant: the trap must agree with the target.
    if result != target.__is_extensible__(context)? {
        return Err(JsNativeError::typ()
            .with_message("proxy isExtensible trap must agree with the target")
            .into());
    }

    // 9. Return booleanTrapResult.
    Ok(result)
}

/// Internal method `[[PreventExtensions]] ( )`.
pub(crate) fn proxy_prevent_extensions(obj: &JsObject, context: &mut Context) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "preventExtensions", context)? else {
        // 5. If trap is undefined, return ? target.[[PreventExtensions]]().
        return target.__prevent_extensions__(context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target »)).
    let result = trap
        .call(&handler.clone().into(), &[target.clone().into()], context)?
        .to_boolean();

    // 7. If booleanTrapResult is true and target is extensible, throw.
    if result && target.__is_extensible__(context)? {
        return Err(JsNativeError::typ()
            .with_message("proxy preventExtensions trap returned true for an extensible target")
            .into());
    }

    // 8. Return booleanTrapResult.
    Ok(result)
}

/// Internal method `[[GetOwnProperty]] ( P )`.
pub(crate) fn proxy_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<Option<PropertyDescriptor>> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "getOwnPropertyDescriptor", context)? else {
        // 5. If trap is undefined, return ? target.[[GetOwnProperty]](P).
        return target.__get_own_property__(key, context);
    };

    // 6. Let trapResultObj be ? Call(trap, handler, « target, P »).
    let trap_result = trap.call(
        &handler.clone().into(),
        &[target.clone().into(), key.into()],
        context,
    )?;

    // 7. If Type(trapResultObj) is neither Object nor Undefined, throw.
    if !trap_result.is_object() && !trap_result.is_undefined() {
        return Err(JsNativeError::typ()
            .with_message("proxy getOwnPropertyDescriptor trap must return an object or undefined")
            .into());
    }

    // 8. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(key, context)?;

    // 9. If trapResultObj is undefined, then
    if trap_result.is_undefined() {
        let Some(target_desc) = target_desc else {
            // a. If targetDesc is undefined, return undefined.
            return Ok(None);
        };
        // b. If targetDesc.[[Configurable]] is false, throw.
        if !target_desc.expect_configurable() {
            return Err(JsNativeError::typ()
                .with_message("proxy trap hid a non-configurable property")
                .into());
        }
        // c-f. If the target is not extensible, throw.
        if !target.__is_extensible__(context)? {
            return Err(JsNativeError::typ()
                .with_message("proxy trap hid a property of a non-extensible target")
                .into());
        }
        return Ok(None);
    }

    // 11-12. Let resultDesc be ? ToPropertyDescriptor(trapResultObj),
    //        completed.
    let result_desc = trap_result
        .to_property_descriptor(context)?
        .complete_property_descriptor();

    // 13-14. Invariant: the reported descriptor must be compatible with the
    //        target.
    let extensible_target = target.__is_extensible__(context)?;
    if !is_compatible_property_descriptor(
        extensible_target,
        result_desc.clone(),
        target_desc.clone(),
    ) {
        return Err(JsNativeError::typ()
            .with_message("proxy getOwnPropertyDescriptor trap result is incompatible")
            .into());
    }

    // 15. If resultDesc.[[Configurable]] is false, validate against the
    //     target descriptor.
    if !result_desc.expect_configurable() {
        match &target_desc {
            None => {
                return Err(JsNativeError::typ()
                    .with_message(
                        "proxy reported a non-configurable descriptor for a missing property",
                    )
                    .into())
            }
            Some(target_desc) => {
                if target_desc.expect_configurable()
                    || (result_desc.writable() == Some(false)
                        && target_desc.writable() == Some(true))
                {
                    return Err(JsNativeError::typ()
                        .with_message(
                            "proxy reported a non-configurable descriptor incompatible with the \
                             target property",
                        )
                        .into());
                }
            }
        }
    }

    // 16. Return resultDesc.
    Ok(Some(result_desc))
}

/// Internal method `[[DefineOwnProperty]] ( P, Desc )`.
pub(crate) fn proxy_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "defineProperty", context)? else {
        // 5. If trap is undefined, return ? target.[[DefineOwnProperty]](P, Desc).
        return target.__define_own_property__(key, desc, context);
    };

    // 6. Let descObj be FromPropertyDescriptor(Desc).
    let desc_obj = crate::builtins::object::Object::from_property_descriptor(&desc, context);

    // 7. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P, descObj »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), key.into(), desc_obj],
            context,
        )?
        .to_boolean()
    {
        // 8. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 9. Let targetDesc be ? target.[[GetOwnProperty]](P).
    let target_desc = target.__get_own_property__(key, context)?;
    let extensible_target = target.__is_extensible__(context)?;

    // 11-12. Let settingConfigFalse be true if Desc has [[Configurable]]
    //        false.
    let setting_config_false = desc.configurable() == Some(false);

    match &target_desc {
        // 14. If targetDesc is undefined, then
        None => {
            // a. If extensibleTarget is false, throw.
            if !extensible_target {
                return Err(JsNativeError::typ()
                    .with_message("proxy defined a new property on a non-extensible target")
                    .into());
            }
            // b. If settingConfigFalse is true, throw.
            if setting_config_false {
                return Err(JsNativeError::typ()
                    .with_message(
                        "proxy defined a non-configurable property that the target lacks",
                    )
                    .into());
            }
        }
        // 15. Else,
        Some(target_desc) => {
            // a. If IsCompatiblePropertyDescriptor(extensibleTarget, Desc, targetDesc) is false, throw.
            if !is_compatible_property_descriptor(
                extensible_target,
                desc.clone(),
                Some(target_desc.clone()),
            ) {
                return Err(JsNativeError::typ()
                    .with_message("proxy defineProperty trap result is incompatible")
                    .into());
            }
            // b. If settingConfigFalse is true and targetDesc.[[Configurable]] is true, throw.
            if setting_config_false && target_desc.expect_configurable() {
                return Err(JsNativeError::typ()
                    .with_message(
                        "proxy defined a non-configurable property over a configurable one",
                    )
                    .into());
            }
            // c. If IsDataDescriptor(targetDesc) is true,
            //    targetDesc.[[Configurable]] is false, and
            //    targetDesc.[[Writable]] is true, then
            if target_desc.is_data_descriptor()
                && !target_desc.expect_configurable()
                && target_desc.expect_writable()
                && desc.writable() == Some(false)
            {
                return Err(JsNativeError::typ()
                    .with_message(
                        "proxy made a non-configurable writable property non-writable",
                    )
                    .into());
            }
        }
    }

    // 16. Return true.
    Ok(true)
}

/// Internal method `[[HasProperty]] ( P )`.
pub(crate) fn proxy_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "has", context)? else {
        // 5. If trap is undefined, return ? target.[[HasProperty]](P).
        return target.__has_property__(key, context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P »)).
    let result = trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), key.into()],
            context,
        )?
        .to_boolean();

    // 7. If booleanTrapResult is false, then validate.
    if !result {
        if let Some(target_desc) = target.__get_own_property__(key, context)? {
            // b. If targetDesc is not undefined, then
            if !target_desc.expect_configurable() {
                return Err(JsNativeError::typ()
                    .with_message("proxy hid a non-configurable property")
                    .into());
            }
            if !target.__is_extensible__(context)? {
                return Err(JsNativeError::typ()
                    .with_message("proxy hid a property of a non-extensible target")
                    .into());
            }
        }
    }

    // 8. Return booleanTrapResult.
    Ok(result)
}

/// Internal method `[[Get]] ( P, Receiver )`.
pub(crate) fn proxy_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "get", context)? else {
        // 5. If trap is undefined, return ? target.[[Get]](P, Receiver).
        return target.__get__(key, receiver, context);
    };

    // 6. Let trapResult be ? Call(trap, handler, « target, P, Receiver »).
    let trap_result = trap.call(
        &handler.clone().into(),
        &[target.clone().into(), key.into(), receiver],
        context,
    )?;

    // 7. Let targetDesc be ? target.[[GetOwnProperty]](P).
    if let Some(target_desc) = target.__get_own_property__(key, context)? {
        // 8. If targetDesc is not undefined and targetDesc.[[Configurable]] is false, then
        if !target_desc.expect_configurable() {
            // a. Non-writable data property: the trap must report its value.
            if target_desc.is_data_descriptor()
                && !target_desc.expect_writable()
                && !JsValue::same_value(&trap_result, target_desc.expect_value())
            {
                return Err(JsNativeError::typ()
                    .with_message("proxy get trap disagrees with a frozen data property")
                    .into());
            }
            // b. Accessor without getter: the trap must report undefined.
            if target_desc.is_accessor_descriptor()
                && target_desc.expect_get().is_undefined()
                && !trap_result.is_undefined()
            {
                return Err(JsNativeError::typ()
                    .with_message("proxy get trap reported a value for a getter-less accessor")
                    .into());
            }
        }
    }

    // 9. Return trapResult.
    Ok(trap_result)
}

/// Internal method `[[Set]] ( P, V, Receiver )`.
pub(crate) fn proxy_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "set", context)? else {
        // 5. If trap is undefined, return ? target.[[Set]](P, V, Receiver).
        return target.__set__(key, value, receiver, context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P, V, Receiver »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[
                target.clone().into(),
                (&key).into(),
                value.clone(),
                receiver,
            ],
            context,
        )?
        .to_boolean()
    {
        // 7. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 8. Let targetDesc be ? target.[[GetOwnProperty]](P).
    if let Some(target_desc) = target.__get_own_property__(&key, context)? {
        // 9. If targetDesc is not undefined and targetDesc.[[Configurable]] is false, then
        if !target_desc.expect_configurable() {
            if target_desc.is_data_descriptor()
                && !target_desc.expect_writable()
                && !JsValue::same_value(&value, target_desc.expect_value())
            {
                return Err(JsNativeError::typ()
                    .with_message("proxy set trap changed a frozen data property")
                    .into());
            }
            if target_desc.is_accessor_descriptor() && target_desc.expect_set().is_undefined() {
                return Err(JsNativeError::typ()
                    .with_message("proxy set trap succeeded on a setter-less accessor")
                    .into());
            }
        }
    }

    // 10. Return true.
    Ok(true)
}

/// Internal method `[[Delete]] ( P )`.
pub(crate) fn proxy_delete(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "deleteProperty", context)? else {
        // 5. If trap is undefined, return ? target.[[Delete]](P).
        return target.__delete__(key, context);
    };

    // 6. Let booleanTrapResult be ToBoolean(? Call(trap, handler, « target, P »)).
    if !trap
        .call(
            &handler.clone().into(),
            &[target.clone().into(), key.into()],
            context,
        )?
        .to_boolean()
    {
        // 7. If booleanTrapResult is false, return false.
        return Ok(false);
    }

    // 8-10. Invariants for successful deletions.
    let Some(target_desc) = target.__get_own_property__(key, context)? else {
        return Ok(true);
    };
    if !target_desc.expect_configurable() {
        return Err(JsNativeError::typ()
            .with_message("proxy deleted a non-configurable property")
            .into());
    }
    if !target.__is_extensible__(context)? {
        return Err(JsNativeError::typ()
            .with_message("proxy deleted a property of a non-extensible target")
            .into());
    }

    // 13. Return true.
    Ok(true)
}

/// Internal method `[[OwnPropertyKeys]] ( )`.
pub(crate) fn proxy_own_property_keys(
    obj: &JsObject,
    context: &mut Context,
) -> JsResult<Vec<PropertyKey>> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "ownKeys", context)? else {
        // 5. If trap is undefined, return ? target.[[OwnPropertyKeys]]().
        return target.__own_property_keys__(context);
    };

    // 6. Let trapResultArray be ? Call(trap, handler, « target »).
    let trap_result_array =
        trap.call(&handler.clone().into(), &[target.clone().into()], context)?;

    // 7. Let trapResult be ? CreateListFromArrayLike(trapResultArray, « String, Symbol »).
    let Some(trap_result_obj) = trap_result_array.as_object() else {
        return Err(JsNativeError::typ()
            .with_message("proxy ownKeys trap must return an array-like object")
            .into());
    };
    let length = trap_result_obj.length_of_array_like(context)?;
    let mut trap_result = Vec::with_capacity(length as usize);
    for index in 0..length {
        match trap_result_obj.get(index, context)? {
            JsValue::String(string) => trap_result.push(PropertyKey::from(string)),
            JsValue::Symbol(symbol) => trap_result.push(PropertyKey::from(symbol)),
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("proxy ownKeys trap result must contain only keys")
                    .into())
            }
        }
    }

    // 8. If trapResult contains any duplicate entries, throw.
    let mut unchecked: FxHashSet<&PropertyKey> = trap_result.iter().collect();
    if unchecked.len() != trap_result.len() {
        return Err(JsNativeError::typ()
            .with_message("proxy ownKeys trap result contains duplicate keys")
            .into());
    }

    // 9-10. Let extensibleTarget and targetKeys.
    let extensible_target = target.__is_extensible__(context)?;
    let target_keys = target.__own_property_keys__(context)?;

    // 11-16. Partition the target keys by configurability.
    let mut target_nonconfigurable_keys = Vec::new();
    let mut target_configurable_keys = Vec::new();
    for key in target_keys {
        let desc = target.__get_own_property__(&key, context)?;
        if matches!(&desc, Some(desc) if !desc.expect_configurable()) {
            target_nonconfigurable_keys.push(key);
        } else {
            target_configurable_keys.push(key);
        }
    }

    // 17. If extensibleTarget is true and targetNonconfigurableKeys is empty,
    //     return trapResult.
    if extensible_target && target_nonconfigurable_keys.is_empty() {
        return Ok(trap_result);
    }

    // 18-20. Every non-configurable key must be reported.
    for key in &target_nonconfigurable_keys {
        if !unchecked.remove(key) {
            return Err(JsNativeError::typ()
                .with_message("proxy ownKeys trap hid a non-configurable key")
                .into());
        }
    }

    // 21. If extensibleTarget is true, return trapResult.
    if extensible_target {
        return Ok(trap_result);
    }

    // 22. Every key of the non-extensible target must be reported.
    for key in &target_configurable_keys {
        if !unchecked.remove(key) {
            return Err(JsNativeError::typ()
                .with_message("proxy ownKeys trap hid a key of a non-extensible target")
                .into());
        }
    }

    // 23. If uncheckedResultKeys is not empty, throw.
    if !unchecked.is_empty() {
        return Err(JsNativeError::typ()
            .with_message("proxy ownKeys trap reported extra keys for a non-extensible target")
            .into());
    }

    // 24. Return trapResult.
    Ok(trap_result)
}

/// Internal method `[[Call]] ( thisArgument, argumentsList )`.
pub(crate) fn proxy_call(
    obj: &JsObject,
    this: &JsValue,
    args: &[JsValue],
    context: &mut Context,
) -> JsResult<JsValue> {
    let (target, handler) = try_data(obj)?;
    let Some(trap) = get_trap(&handler, "apply", context)? else {
        // 6. If trap is undefined, return ? Call(target, thisArgument, argumentsList).
        return target.call(this, args, context);
    };

    // 7. Let argArray be CreateArrayFromList(argumentsList).
    let arg_array = crate::builtins::Array::create_array_from_list(args.to_vec(), context);

    // 8. Return ? Call(trap, handler, « target, thisArgument, argArray »).
    trap.call(
        &handler.clone().into(),
        &[target.clone().into(), this.clone(), arg_array.into()],
        context,
    )
}

/// Internal method `[[Construct]] ( argumentsList, newTarget )`.
pub(crate) fn proxy_construct(
    obj: &JsObject,
    args: &[JsValue],
    new_target: &JsObject,
    context: &mut Context,
) -> JsResult<JsObject> {
    let (target, handler) = try_data(obj)?;

    // 5. Assert: IsConstructor(target) is true.
    let Some(trap) = get_trap(&handler, "construct", context)? else {
        // 6. If trap is undefined, return ? Construct(target, argumentsList, newTarget).
        return target.construct(args, Some(new_target), context);
    };

    // 7. Let argArray be CreateArrayFromList(argumentsList).
    let arg_array = crate::builtins::Array::create_array_from_list(args.to_vec(), context);

    // 8. Let newObj be ? Call(trap, handler, « target, argArray, newTarget »).
    let new_obj = trap.call(
        &handler.clone().into(),
        &[
            target.clone().into(),
            arg_array.into(),
            new_target.clone().into(),
        ],
        context,
    )?;

    // 9. If Type(newObj) is not Object, throw a TypeError exception.
    new_obj.as_object().cloned().ok_or_else(|| {
        JsNativeError::typ()
            .with_message("proxy construct trap must return an object")
            .into()
    })
}
