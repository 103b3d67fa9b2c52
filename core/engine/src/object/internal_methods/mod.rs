//! The internal methods of objects.
//!
//! Every object kind answers the same set of internal methods; the exotic
//! kinds (arrays, bound strings, typed arrays, proxies, and module
//! namespaces) override a subset of them. Dispatch happens here, on the
//! [`JsObject`] handle, so generic algorithms work uniformly over all kinds.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-ordinary-object-internal-methods-and-internal-slots

pub(crate) mod array;
pub(crate) mod integer_indexed;
pub(crate) mod module_namespace;
pub(crate) mod proxy;
pub(crate) mod string;

use super::{JsObject, JsPrototype, ObjectData, PROTOTYPE};
use crate::{
    context::intrinsics::{StandardConstructor, StandardConstructors},
    property::{DescriptorKind, PropertyDescriptor, PropertyKey},
    Context, JsResult, JsValue,
};

/// The exotic behavior set of an object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExoticKind {
    Ordinary,
    Array,
    String,
    IntegerIndexed,
    Proxy,
    ModuleNamespace,
}

impl JsObject {
    fn exotic_kind(&self) -> ExoticKind {
        match self.borrow().data {
            ObjectData::Array => ExoticKind::Array,
            ObjectData::String(_) => ExoticKind::String,
            ObjectData::IntegerIndexed(_) => ExoticKind::IntegerIndexed,
            ObjectData::Proxy(_) => ExoticKind::Proxy,
            ObjectData::ModuleNamespace(_) => ExoticKind::ModuleNamespace,
            _ => ExoticKind::Ordinary,
        }
    }

    /// Internal method `[[GetPrototypeOf]] ( )`.
    pub fn __get_prototype_of__(&self, context: &mut Context) -> JsResult<JsPrototype> {
        match self.exotic_kind() {
            ExoticKind::Proxy => proxy::proxy_get_prototype_of(self, context),
            ExoticKind::ModuleNamespace => Ok(None),
            _ => Ok(self.prototype()),
        }
    }

    /// Internal method `[[SetPrototypeOf]] ( V )`.
    pub fn __set_prototype_of__(
        &self,
        prototype: JsPrototype,
        context: &mut Context,
    ) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::Proxy => proxy::proxy_set_prototype_of(self, prototype, context),
            ExoticKind::ModuleNamespace => {
                // `SetImmutablePrototype`: only a no-op set to the current
                // (null) prototype succeeds.
                Ok(prototype.is_none())
            }
            _ => Ok(ordinary_set_prototype_of(self, prototype)),
        }
    }

    /// Internal method `[[IsExtensible]] ( )`.
    pub fn __is_extensible__(&self, context: &mut Context) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::Proxy => proxy::proxy_is_extensible(self, context),
            ExoticKind::ModuleNamespace => Ok(false),
            _ => Ok(self.borrow().extensible()),
        }
    }

    /// Internal method `[[PreventExtensions]] ( )`.
    pub fn __prevent_extensions__(&self, context: &mut Context) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::Proxy => proxy::proxy_prevent_extensions(self, context),
            ExoticKind::ModuleNamespace => Ok(true),
            _ => {
                self.borrow_mut().set_extensible(false);
                Ok(true)
            }
        }
    }

    /// Internal method `[[GetOwnProperty]] ( P )`.
    pub fn __get_own_property__(
        &self,
        key: &PropertyKey,
        context: &mut Context,
    ) -> JsResult<Option<PropertyDescriptor>> {
        match self.exotic_kind() {
            ExoticKind::String => Ok(string::string_exotic_get_own_property(self, key)),
            ExoticKind::IntegerIndexed => Ok(integer_indexed::integer_indexed_get_own_property(
                self, key,
            )),
            ExoticKind::Proxy => proxy::proxy_get_own_property(self, key, context),
            ExoticKind::ModuleNamespace => {
                module_namespace::module_namespace_get_own_property(self, key)
            }
            _ => Ok(ordinary_get_own_property(self, key)),
        }
    }

    /// Internal method `[[DefineOwnProperty]] ( P, Desc )`.
    pub fn __define_own_property__(
        &self,
        key: &PropertyKey,
        desc: PropertyDescriptor,
        context: &mut Context,
    ) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::Array => array::array_exotic_define_own_property(self, key, desc, context),
            ExoticKind::String => {
                string::string_exotic_define_own_property(self, key, desc, context)
            }
            ExoticKind::IntegerIndexed => {
                integer_indexed::integer_indexed_define_own_property(self, key, desc, context)
            }
            ExoticKind::Proxy => proxy::proxy_define_own_property(self, key, desc, context),
            ExoticKind::ModuleNamespace => {
                module_namespace::module_namespace_define_own_property(self, key, &desc)
            }
            _ => ordinary_define_own_property(self, key, desc, context),
        }
    }

    /// Internal method `[[HasProperty]] ( P )`.
    pub fn __has_property__(&self, key: &PropertyKey, context: &mut Context) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::IntegerIndexed => {
                integer_indexed::integer_indexed_has_property(self, key, context)
            }
            ExoticKind::Proxy => proxy::proxy_has_property(self, key, context),
            _ => ordinary_has_property(self, key, context),
        }
    }

    /// Internal method `[[Get]] ( P, Receiver )`.
    pub fn __get__(
        &self,
        key: &PropertyKey,
        receiver: JsValue,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        match self.exotic_kind() {
            ExoticKind::IntegerIndexed => {
                integer_indexed::integer_indexed_get(self, key, receiver, context)
            }
            ExoticKind::Proxy => proxy::proxy_get(self, key, receiver, context),
            ExoticKind::ModuleNamespace => {
                module_namespace::module_namespace_get(self, key, receiver, context)
            }
            _ => ordinary_get(self, key, receiver, context),
        }
    }

    /// Internal method `[[Set]] ( P, V, Receiver )`.
    pub fn __set__(
        &self,
        key: PropertyKey,
        value: JsValue,
        receiver: JsValue,
        context: &mut Context,
    ) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::IntegerIndexed => {
                integer_indexed::integer_indexed_set(self, key, value, receiver, context)
            }
            ExoticKind::Proxy => proxy::proxy_set(self, key, value, receiver, context),
            ExoticKind::ModuleNamespace => Ok(false),
            _ => ordinary_set(self, key, value, receiver, context),
        }
    }

    /// Internal method `[[Delete]] ( P )`.
    pub fn __delete__(&self, key: &PropertyKey, context: &mut Context) -> JsResult<bool> {
        match self.exotic_kind() {
            ExoticKind::IntegerIndexed => {
                Ok(integer_indexed::integer_indexed_delete(self, key))
            }
            ExoticKind::Proxy => proxy::proxy_delete(self, key, context),
            ExoticKind::ModuleNamespace => {
                module_namespace::module_namespace_delete(self, key)
            }
            _ => Ok(ordinary_delete(self, key)),
        }
    }

    /// Internal method `[[OwnPropertyKeys]] ( )`.
    pub fn __own_property_keys__(&self, context: &mut Context) -> JsResult<Vec<PropertyKey>> {
        match self.exotic_kind() {
            ExoticKind::String => Ok(string::string_exotic_own_property_keys(self)),
            ExoticKind::IntegerIndexed => {
                Ok(integer_indexed::integer_indexed_own_property_keys(self))
            }
            ExoticKind::Proxy => proxy::proxy_own_property_keys(self, context),
            ExoticKind::ModuleNamespace => {
                Ok(module_namespace::module_namespace_own_property_keys(self))
            }
            _ => Ok(ordinary_own_property_keys(self)),
        }
    }
}

/// Abstract operation `OrdinaryGetPrototypeOf`: compares two prototypes for
/// identity.
pub(crate) fn prototype_equals(lhs: &JsPrototype, rhs: &JsPrototype) -> bool {
    match (lhs, rhs) {
        (None, None) => true,
        (Some(a), Some(b)) => JsObject::equals(a, b),
        _ => false,
    }
}

/// Abstract operation `OrdinarySetPrototypeOf ( O, V )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinarysetprototypeof
pub(crate) fn ordinary_set_prototype_of(obj: &JsObject, prototype: JsPrototype) -> bool {
    // 1. Let current be O.[[Prototype]].
    let current = obj.prototype();

    // 2. If SameValue(V, current) is true, return true.
    if prototype_equals(&prototype, &current) {
        return true;
    }

    // 3. Let extensible be O.[[Extensible]].
    // 4. If extensible is false, return false.
    if !obj.borrow().extensible() {
        return false;
    }

    // 5. Let p be V. 6. Let done be false. 7. Repeat, while done is false,
    let mut p = prototype.clone();
    while let Some(proto) = p {
        // b. Else if SameValue(p, O) is true, return false.
        if JsObject::equals(&proto, obj) {
            return false;
        }
        // c. Else: i. If p.[[GetPrototypeOf]] is not the ordinary object
        //    internal method defined in 10.1.1, set done to true.
        if matches!(proto.borrow().data, ObjectData::Proxy(_)) {
            break;
        }
        // ii. Else, set p to p.[[Prototype]].
        p = proto.prototype();
    }

    // 8. Set O.[[Prototype]] to V. 9. Return true.
    obj.set_prototype(prototype);
    true
}

/// Abstract operation `OrdinaryGetOwnProperty ( O, P )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinarygetownproperty
pub(crate) fn ordinary_get_own_property(
    obj: &JsObject,
    key: &PropertyKey,
) -> Option<PropertyDescriptor> {
    obj.borrow().properties().get(key).cloned()
}

/// Abstract operation `OrdinaryDefineOwnProperty ( O, P, Desc )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinarydefineownproperty
pub(crate) fn ordinary_define_own_property(
    obj: &JsObject,
    key: &PropertyKey,
    desc: PropertyDescriptor,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let current be ? O.[[GetOwnProperty]](P).
    let current = obj.__get_own_property__(key, context)?;

    // 2. Let extensible be ? IsExtensible(O).
    let extensible = obj.__is_extensible__(context)?;

    // 3. Return ValidateAndApplyPropertyDescriptor(O, P, extensible, Desc, current).
    Ok(validate_and_apply_property_descriptor(
        Some((obj, key)),
        extensible,
        desc,
        current,
    ))
}

/// Abstract operation `IsCompatiblePropertyDescriptor ( Extensible, Desc, Current )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-iscompatiblepropertydescriptor
pub(crate) fn is_compatible_property_descriptor(
    extensible: bool,
    desc: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    validate_and_apply_property_descriptor(None, extensible, desc, current)
}

/// Abstract operation `ValidateAndApplyPropertyDescriptor ( O, P, extensible, Desc, current )`.
///
/// When `obj_and_key` is `None` the operation only validates.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-validateandapplypropertydescriptor
pub(crate) fn validate_and_apply_property_descriptor(
    obj_and_key: Option<(&JsObject, &PropertyKey)>,
    extensible: bool,
    desc: PropertyDescriptor,
    current: Option<PropertyDescriptor>,
) -> bool {
    // 2. If current is undefined, then
    let Some(mut current) = current else {
        // a. If extensible is false, return false.
        if !extensible {
            return false;
        }

        // c. If O is not undefined, create an own property named P of object
        //    O whose fields come from Desc, with absent fields defaulted.
        if let Some((obj, key)) = obj_and_key {
            let completed = if desc.is_generic_descriptor() || desc.is_data_descriptor() {
                desc.into_data_defaulted()
            } else {
                desc.complete_property_descriptor()
            };
            obj.borrow_mut().insert(key.clone(), completed);
        }

        // d. Return true.
        return true;
    };

    // 3. If every field in Desc is absent, return true.
    if desc.is_empty() {
        return true;
    }

    // 4. If current.[[Configurable]] is false, then
    if !current.expect_configurable() {
        // a. If Desc has a [[Configurable]] field and Desc.[[Configurable]] is true, return false.
        if desc.configurable() == Some(true) {
            return false;
        }

        // b. If Desc has an [[Enumerable]] field and
        //    SameValue(Desc.[[Enumerable]], current.[[Enumerable]]) is false, return false.
        if let Some(enumerable) = desc.enumerable() {
            if enumerable != current.expect_enumerable() {
                return false;
            }
        }

        // c. If IsGenericDescriptor(Desc) is false and
        //    SameValue(IsAccessorDescriptor(Desc), IsAccessorDescriptor(current)) is false, return false.
        if !desc.is_generic_descriptor()
            && desc.is_accessor_descriptor() != current.is_accessor_descriptor()
        {
            return false;
        }

        // d. If IsAccessorDescriptor(current) is true, then
        if current.is_accessor_descriptor() {
            // i. If Desc has a [[Get]] field and SameValue(Desc.[[Get]], current.[[Get]]) is false, return false.
            if let Some(get) = desc.get() {
                if !JsValue::same_value(get, current.expect_get()) {
                    return false;
                }
            }
            // ii. If Desc has a [[Set]] field and SameValue(Desc.[[Set]], current.[[Set]]) is false, return false.
            if let Some(set) = desc.set() {
                if !JsValue::same_value(set, current.expect_set()) {
                    return false;
                }
            }
        }
        // e. Else if current.[[Writable]] is false, then
        else if !current.expect_writable() {
            // i. If Desc has a [[Writable]] field and Desc.[[Writable]] is true, return false.
            if desc.writable() == Some(true) {
                return false;
            }
            // ii. If Desc has a [[Value]] field and SameValue(Desc.[[Value]], current.[[Value]]) is false, return false.
            if let Some(value) = desc.value() {
                if !JsValue::same_value(value, current.expect_value()) {
                    return false;
                }
            }
        }
    }

    // 5. If O is not undefined, then
    if let Some((obj, key)) = obj_and_key {
        let new = match (current.kind(), desc.kind()) {
            // a. If IsDataDescriptor(current) is true and IsAccessorDescriptor(Desc) is true:
            //    convert the property to an accessor property, preserving
            //    [[Configurable]] and [[Enumerable]].
            (DescriptorKind::Data { .. }, DescriptorKind::Accessor { .. }) => {
                PropertyDescriptor::builder()
                    .maybe_get(desc.get().cloned())
                    .maybe_set(desc.set().cloned())
                    .enumerable(desc.enumerable().unwrap_or_else(|| current.expect_enumerable()))
                    .configurable(
                        desc.configurable()
                            .unwrap_or_else(|| current.expect_configurable()),
                    )
                    .complete_with_accessor_defaults()
                    .build()
            }
            // b. Else if IsAccessorDescriptor(current) is true and IsDataDescriptor(Desc) is true:
            //    convert the property to a data property.
            (DescriptorKind::Accessor { .. }, DescriptorKind::Data { .. }) => {
                PropertyDescriptor::builder()
                    .maybe_value(desc.value().cloned())
                    .maybe_writable(desc.writable())
                    .enumerable(desc.enumerable().unwrap_or_else(|| current.expect_enumerable()))
                    .configurable(
                        desc.configurable()
                            .unwrap_or_else(|| current.expect_configurable()),
                    )
                    .complete_with_data_defaults()
                    .build()
            }
            // c. Else: for each field of Desc, set the corresponding
            //    attribute of the property named P of object O to the value
            //    of the field.
            _ => {
                current.fill_with(&desc);
                current
            }
        };
        obj.borrow_mut().insert(key.clone(), new);
    }

    // 6. Return true.
    true
}

/// Abstract operation `OrdinaryHasProperty ( O, P )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinaryhasproperty
pub(crate) fn ordinary_has_property(
    obj: &JsObject,
    key: &PropertyKey,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. Let hasOwn be ? O.[[GetOwnProperty]](P).
    if obj.__get_own_property__(key, context)?.is_some() {
        // 2. If hasOwn is not undefined, return true.
        return Ok(true);
    }

    // 3. Let parent be ? O.[[GetPrototypeOf]]().
    // 4. If parent is not null, then a. Return ? parent.[[HasProperty]](P).
    match obj.__get_prototype_of__(context)? {
        Some(parent) => parent.__has_property__(key, context),
        // 5. Return false.
        None => Ok(false),
    }
}

/// Abstract operation `OrdinaryGet ( O, P, Receiver )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinaryget
pub(crate) fn ordinary_get(
    obj: &JsObject,
    key: &PropertyKey,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    match obj.__get_own_property__(key, context)? {
        // 2. If desc is undefined, then
        None => {
            // a. Let parent be ? O.[[GetPrototypeOf]]().
            // b. If parent is null, return undefined.
            // c. Return ? parent.[[Get]](P, Receiver).
            match obj.__get_prototype_of__(context)? {
                Some(parent) => parent.__get__(key, receiver, context),
                None => Ok(JsValue::undefined()),
            }
        }
        Some(ref desc) => match desc.kind() {
            // 3. If IsDataDescriptor(desc) is true, return desc.[[Value]].
            DescriptorKind::Data {
                value: Some(value), ..
            } => Ok(value.clone()),
            // 5. Let getter be desc.[[Get]].
            // 6. If getter is undefined, return undefined.
            // 7. Return ? Call(getter, Receiver).
            DescriptorKind::Accessor { get: Some(get), .. } if !get.is_undefined() => get
                .as_object()
                .expect("getter must be undefined or callable")
                .call(&receiver, &[], context),
            _ => Ok(JsValue::undefined()),
        },
    }
}

/// Abstract operation `OrdinarySet ( O, P, V, Receiver )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinaryset
pub(crate) fn ordinary_set(
    obj: &JsObject,
    key: PropertyKey,
    value: JsValue,
    receiver: JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    // OrdinarySetWithOwnDescriptor ( O, P, V, Receiver, ownDesc )
    // 2. If ownDesc is undefined, then
    let own_desc = match obj.__get_own_property__(&key, context)? {
        Some(desc) => desc,
        None => {
            // a. Let parent be ? O.[[GetPrototypeOf]]().
            if let Some(parent) = obj.__get_prototype_of__(context)? {
                // b. If parent is not null, then
                //    i. Return ? parent.[[Set]](P, V, Receiver).
                return parent.__set__(key, value, receiver, context);
            }
            // c. Else: set ownDesc to the default data descriptor.
            PropertyDescriptor::builder()
                .value(JsValue::undefined())
                .writable(true)
                .enumerable(true)
                .configurable(true)
                .build()
        }
    };

    // 3. If IsDataDescriptor(ownDesc) is true, then
    if own_desc.is_data_descriptor() {
        // a. If ownDesc.[[Writable]] is false, return false.
        if !own_desc.expect_writable() {
            return Ok(false);
        }

        // b. If Type(Receiver) is not Object, return false.
        let Some(receiver_obj) = receiver.as_object().cloned() else {
            return Ok(false);
        };

        // c. Let existingDescriptor be ? Receiver.[[GetOwnProperty]](P).
        if let Some(existing) = receiver_obj.__get_own_property__(&key, context)? {
            // d. If existingDescriptor is not undefined, then
            // i. If IsAccessorDescriptor(existingDescriptor) is true, return false.
            if existing.is_accessor_descriptor() {
                return Ok(false);
            }
            // ii. If existingDescriptor.[[Writable]] is false, return false.
            if !existing.expect_writable() {
                return Ok(false);
            }
            // iii. Let valueDesc be the PropertyDescriptor { [[Value]]: V }.
            // iv. Return ? Receiver.[[DefineOwnProperty]](P, valueDesc).
            return receiver_obj.__define_own_property__(
                &key,
                PropertyDescriptor::builder().value(value).build(),
                context,
            );
        }

        // e. Else: Return ? CreateDataProperty(Receiver, P, V).
        return receiver_obj.create_data_property(key, value, context);
    }

    // 4. Assert: IsAccessorDescriptor(ownDesc) is true.
    // 5. Let setter be ownDesc.[[Set]].
    match own_desc.set() {
        Some(JsValue::Object(setter)) if setter.is_callable() => {
            // 7. Perform ? Call(setter, Receiver, « V »).
            setter.clone().call(&receiver, &[value], context)?;
            // 8. Return true.
            Ok(true)
        }
        // 6. If setter is undefined, return false.
        _ => Ok(false),
    }
}

/// Abstract operation `OrdinaryDelete ( O, P )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinarydelete
pub(crate) fn ordinary_delete(obj: &JsObject, key: &PropertyKey) -> bool {
    let mut object = obj.borrow_mut();
    match object.properties().get(key) {
        // 2. If desc is undefined, return true.
        None => true,
        // 3. If desc.[[Configurable]] is true, then
        Some(desc) if desc.expect_configurable() => {
            // a. Remove the own property with name P from O. b. Return true.
            object.remove(key);
            true
        }
        // 4. Return false.
        Some(_) => false,
    }
}

/// Abstract operation `OrdinaryOwnPropertyKeys ( O )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinaryownpropertykeys
pub(crate) fn ordinary_own_property_keys(obj: &JsObject) -> Vec<PropertyKey> {
    obj.borrow().properties().keys()
}

/// Abstract operation `GetPrototypeFromConstructor ( constructor, intrinsicDefaultProto )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-getprototypefromconstructor
pub(crate) fn get_prototype_from_constructor(
    new_target: &JsValue,
    default: fn(&StandardConstructors) -> &StandardConstructor,
    context: &mut Context,
) -> JsResult<JsObject> {
    // 1. Assert: intrinsicDefaultProto is this specification's name of an
    //    intrinsic object.
    // 2. Let proto be ? Get(constructor, "prototype").
    if let Some(constructor) = new_target.as_object() {
        let proto = constructor.get(PROTOTYPE, context)?;
        // 3. If Type(proto) is not Object, then
        //    a. Let realm be ? GetFunctionRealm(constructor).
        //    b. Set proto to realm's intrinsic object named intrinsicDefaultProto.
        if let Some(proto) = proto.as_object() {
            return Ok(proto.clone());
        }
    }
    Ok(default(context.intrinsics().constructors()).prototype())
}
