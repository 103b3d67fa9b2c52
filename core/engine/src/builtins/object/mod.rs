//! The global `Object` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-object-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    error::JsNativeError,
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, IntegrityLevel,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyDescriptor, PropertyKey, PropertyNameKind},
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};

/// The global `Object` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Object;

impl BuiltIn for Object {
    const NAME: &'static str = "Object";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().object().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .inherit(None::<JsObject>)
        .method(Self::has_own_property, "hasOwnProperty", 1)
        .method(Self::property_is_enumerable, "propertyIsEnumerable", 1)
        .method(Self::is_prototype_of, "isPrototypeOf", 1)
        .method(Self::to_string, "toString", 0)
        .method(Self::to_locale_string, "toLocaleString", 0)
        .method(Self::value_of, "valueOf", 0)
        .static_method(Self::assign, "assign", 2)
        .static_method(Self::create, "create", 2)
        .static_method(Self::define_properties, "defineProperties", 2)
        .static_method(Self::define_property, "defineProperty", 3)
        .static_method(Self::entries, "entries", 1)
        .static_method(Self::freeze, "freeze", 1)
        .static_method(Self::from_entries, "fromEntries", 1)
        .static_method(
            Self::get_own_property_descriptor,
            "getOwnPropertyDescriptor",
            2,
        )
        .static_method(
            Self::get_own_property_descriptors,
            "getOwnPropertyDescriptors",
            1,
        )
        .static_method(Self::get_own_property_names, "getOwnPropertyNames", 1)
        .static_method(Self::get_own_property_symbols, "getOwnPropertySymbols", 1)
        .static_method(Self::get_prototype_of, "getPrototypeOf", 1)
        .static_method(Self::has_own, "hasOwn", 2)
        .static_method(Self::is, "is", 2)
        .static_method(Self::is_extensible, "isExtensible", 1)
        .static_method(Self::is_frozen, "isFrozen", 1)
        .static_method(Self::is_sealed, "isSealed", 1)
        .static_method(Self::keys, "keys", 1)
        .static_method(Self::prevent_extensions, "preventExtensions", 1)
        .static_method(Self::seal, "seal", 1)
        .static_method(Self::set_prototype_of, "setPrototypeOf", 2)
        .static_method(Self::values, "values", 1)
        .build();

        Some(object.into())
    }
}

impl Object {
    /// `Object ( [ value ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object-value
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is neither undefined nor the active function
        //    object, the ordinary branch applies; the core has no active
        //    function notion, so only the value branch matters.
        let value = args.get_or_undefined(0);

        // 3. If value is undefined or null, return
        //    OrdinaryObjectCreate(%Object.prototype%).
        if value.is_null_or_undefined() {
            let prototype = if new_target.is_undefined() {
                context.intrinsics().constructors().object().prototype()
            } else {
                get_prototype_from_constructor(
                    new_target,
                    crate::context::intrinsics::StandardConstructors::object,
                    context,
                )?
            };
            return Ok(JsObject::from_proto_and_data(prototype, ObjectData::ordinary()).into());
        }

        // 4. Return ! ToObject(value).
        Ok(value.to_object(context)?.into())
    }

    /// `Object.assign ( target, ...sources )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.assign
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/assign
    fn assign(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let to be ? ToObject(target).
        let to = args.get_or_undefined(0).to_object(context)?;

        // 2. If only one argument was passed, return to.
        // 3. For each element nextSource of sources, do
        for source in args.iter().skip(1) {
            // a. If nextSource is neither undefined nor null, then
            if source.is_null_or_undefined() {
                continue;
            }
            // i. Let from be ! ToObject(nextSource).
            let from = source.to_object(context)?;
            // ii. Let keys be ? from.[[OwnPropertyKeys]]().
            let keys = from.__own_property_keys__(context)?;
            // iii. For each element nextKey of keys, do
            for key in keys {
                // 1. Let desc be ? from.[[GetOwnProperty]](nextKey).
                let desc = from.__get_own_property__(&key, context)?;
                // 2. If desc is not undefined and desc.[[Enumerable]] is true, then
                if matches!(&desc, Some(desc) if desc.expect_enumerable()) {
                    // a. Let propValue be ? Get(from, nextKey).
                    let value = from.get(key.clone(), context)?;
                    // b. Perform ? Set(to, nextKey, propValue, true).
                    to.set(key, value, true, context)?;
                }
            }
        }

        // 4. Return to.
        Ok(to.into())
    }

    /// `Object.create ( O, Properties )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.create
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/create
    fn create(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let prototype = args.get_or_undefined(0);
        let properties = args.get_or_undefined(1);

        // 1. If Type(O) is neither Object nor Null, throw a TypeError exception.
        let prototype = match prototype {
            JsValue::Object(proto) => Some(proto.clone()),
            JsValue::Null => None,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("Object.create: prototype must be an object or null")
                    .into())
            }
        };

        // 2. Let obj be ! OrdinaryObjectCreate(O).
        let obj = JsObject::from_proto_and_data(prototype, ObjectData::ordinary());

        // 3. If Properties is not undefined, then
        if !properties.is_undefined() {
            // a. Return ? ObjectDefineProperties(obj, Properties).
            object_define_properties(&obj, properties, context)?;
        }

        // 4. Return obj.
        Ok(obj.into())
    }

    /// `Object.defineProperty ( O, P, Attributes )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.defineproperty
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/defineProperty
    fn define_property(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(O) is not Object, throw a TypeError exception.
        let Some(obj) = args.get_or_undefined(0).as_object() else {
            return Err(JsNativeError::typ()
                .with_message("Object.defineProperty called on non-object")
                .into());
        };

        // 2. Let key be ? ToPropertyKey(P).
        let key = args.get_or_undefined(1).to_property_key(context)?;

        // 3. Let desc be ? ToPropertyDescriptor(Attributes).
        let desc = args.get_or_undefined(2).to_property_descriptor(context)?;

        // 4. Perform ? DefinePropertyOrThrow(O, key, desc).
        obj.define_property_or_throw(key, desc, context)?;

        // 5. Return O.
        Ok(args.get_or_undefined(0).clone())
    }

    /// `Object.defineProperties ( O, Properties )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.defineproperties
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/defineProperties
    fn define_properties(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If Type(O) is not Object, throw a TypeError exception.
        let Some(obj) = args.get_or_undefined(0).as_object() else {
            return Err(JsNativeError::typ()
                .with_message("Object.defineProperties called on non-object")
                .into());
        };

        // 2. Return ? ObjectDefineProperties(O, Properties).
        object_define_properties(obj, args.get_or_undefined(1), context)?;
        Ok(args.get_or_undefined(0).clone())
    }

    /// `Object.entries ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.entries
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/entries
    fn entries(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let nameList be ? EnumerableOwnPropertyNames(obj, key+value).
        let name_list =
            enumerable_own_property_names(&obj, PropertyNameKind::KeyAndValue, context)?;
        // 3. Return CreateArrayFromList(nameList).
        Ok(crate::builtins::Array::create_array_from_list(name_list, context).into())
    }

    /// `Object.freeze ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.freeze
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/freeze
    fn freeze(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        // 1. If Type(O) is not Object, return O.
        if let Some(obj) = value.as_object() {
            // 2. Let status be ? SetIntegrityLevel(O, frozen).
            if !obj.set_integrity_level(IntegrityLevel::Frozen, context)? {
                // 3. If status is false, throw a TypeError exception.
                return Err(JsNativeError::typ()
                    .with_message("cannot freeze object")
                    .into());
            }
        }
        // 4. Return O.
        Ok(value.clone())
    }

    /// `Object.fromEntries ( iterable )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.fromentries
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/fromEntries
    fn from_entries(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Perform ? RequireObjectCoercible(iterable).
        let iterable = args.get_or_undefined(0);
        if iterable.is_null_or_undefined() {
            return Err(JsNativeError::typ()
                .with_message("cannot convert null or undefined to object")
                .into());
        }

        // 2. Let obj be ! OrdinaryObjectCreate(%Object.prototype%).
        let obj = JsObject::from_proto_and_data(
            context.intrinsics().constructors().object().prototype(),
            ObjectData::ordinary(),
        );

        // 4. Let adder be the steps of CreateDataPropertyOrThrow.
        // 5. Return ? AddEntriesFromIterable(obj, iterable, adder).
        let mut iterator_record =
            iterable.get_iterator(context, Some(crate::builtins::iterable::IteratorHint::Sync), None)?;
        while let Some(next) = iterator_record.step(context)? {
            let entry = next.value(context)?;
            let Some(entry_obj) = entry.as_object() else {
                let err: crate::JsError = JsNativeError::typ()
                    .with_message("iterator entry is not an object")
                    .into();
                return iterator_record.close(Err(err), context);
            };
            let key = entry_obj.get(0, context);
            let key = crate::builtins::iterable::if_abrupt_close_iterator!(
                key,
                iterator_record,
                context
            );
            let value = entry_obj.get(1, context);
            let value = crate::builtins::iterable::if_abrupt_close_iterator!(
                value,
                iterator_record,
                context
            );
            let key = key.to_property_key(context);
            let key = crate::builtins::iterable::if_abrupt_close_iterator!(
                key,
                iterator_record,
                context
            );
            obj.create_data_property_or_throw(key, value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        Ok(obj.into())
    }

    /// `Object.getOwnPropertyDescriptor ( O, P )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getownpropertydescriptor
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/getOwnPropertyDescriptor
    fn get_own_property_descriptor(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let key be ? ToPropertyKey(P).
        let key = args.get_or_undefined(1).to_property_key(context)?;
        // 3. Let desc be ? obj.[[GetOwnProperty]](key).
        match obj.__get_own_property__(&key, context)? {
            // 4. Return FromPropertyDescriptor(desc).
            Some(desc) => Ok(Self::from_property_descriptor(&desc, context)),
            None => Ok(JsValue::undefined()),
        }
    }

    /// `Object.getOwnPropertyDescriptors ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getownpropertydescriptors
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/getOwnPropertyDescriptors
    fn get_own_property_descriptors(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let ownKeys be ? obj.[[OwnPropertyKeys]]().
        let own_keys = obj.__own_property_keys__(context)?;
        // 3. Let descriptors be ! OrdinaryObjectCreate(%Object.prototype%).
        let descriptors = JsObject::from_proto_and_data(
            context.intrinsics().constructors().object().prototype(),
            ObjectData::ordinary(),
        );

        // 4. For each element key of ownKeys, do
        for key in own_keys {
            // a. Let desc be ? obj.[[GetOwnProperty]](key).
            if let Some(desc) = obj.__get_own_property__(&key, context)? {
                // b. Let descriptor be FromPropertyDescriptor(desc).
                let descriptor = Self::from_property_descriptor(&desc, context);
                // c. If descriptor is not undefined, perform
                //    ! CreateDataPropertyOrThrow(descriptors, key, descriptor).
                descriptors
                    .create_data_property_or_throw(key, descriptor, context)
                    .expect("this CreateDataPropertyOrThrow call must not fail");
            }
        }

        // 5. Return descriptors.
        Ok(descriptors.into())
    }

    /// Abstract operation `FromPropertyDescriptor ( Desc )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-frompropertydescriptor
    pub(crate) fn from_property_descriptor(
        desc: &PropertyDescriptor,
        context: &mut Context,
    ) -> JsValue {
        // 2. Let obj be ! OrdinaryObjectCreate(%Object.prototype%).
        let obj = JsObject::from_proto_and_data(
            context.intrinsics().constructors().object().prototype(),
            ObjectData::ordinary(),
        );

        if let Some(value) = desc.value() {
            obj.create_data_property_or_throw("value", value.clone(), context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        if let Some(writable) = desc.writable() {
            obj.create_data_property_or_throw("writable", writable, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        if let Some(get) = desc.get() {
            obj.create_data_property_or_throw("get", get.clone(), context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        if let Some(set) = desc.set() {
            obj.create_data_property_or_throw("set", set.clone(), context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        if let Some(enumerable) = desc.enumerable() {
            obj.create_data_property_or_throw("enumerable", enumerable, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        if let Some(configurable) = desc.configurable() {
            obj.create_data_property_or_throw("configurable", configurable, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        obj.into()
    }

    /// `Object.getOwnPropertyNames ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getownpropertynames
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/getOwnPropertyNames
    fn get_own_property_names(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Return ? GetOwnPropertyKeys(O, string).
        let obj = args.get_or_undefined(0).to_object(context)?;
        let keys = obj.__own_property_keys__(context)?;
        let names: Vec<JsValue> = keys
            .into_iter()
            .filter(|key| !matches!(key, PropertyKey::Symbol(_)))
            .map(|key| JsValue::from(&key))
            .collect();
        Ok(crate::builtins::Array::create_array_from_list(names, context).into())
    }

    /// `Object.getOwnPropertySymbols ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getownpropertysymbols
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/getOwnPropertySymbols
    fn get_own_property_symbols(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Return ? GetOwnPropertyKeys(O, symbol).
        let obj = args.get_or_undefined(0).to_object(context)?;
        let keys = obj.__own_property_keys__(context)?;
        let symbols: Vec<JsValue> = keys
            .into_iter()
            .filter_map(|key| match key {
                PropertyKey::Symbol(symbol) => Some(JsValue::from(symbol)),
                _ => None,
            })
            .collect();
        Ok(crate::builtins::Array::create_array_from_list(symbols, context).into())
    }

    /// `Object.getPrototypeOf ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.getprototypeof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/getPrototypeOf
    fn get_prototype_of(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Return ? obj.[[GetPrototypeOf]]().
        Ok(obj
            .__get_prototype_of__(context)?
            .map_or(JsValue::null(), JsValue::from))
    }

    /// `Object.setPrototypeOf ( O, proto )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.setprototypeof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/setPrototypeOf
    fn set_prototype_of(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);

        // 1. Set O to ? RequireObjectCoercible(O).
        if value.is_null_or_undefined() {
            return Err(JsNativeError::typ()
                .with_message("cannot convert null or undefined to object")
                .into());
        }

        // 2. If Type(proto) is neither Object nor Null, throw a TypeError exception.
        let proto = match args.get_or_undefined(1) {
            JsValue::Object(proto) => Some(proto.clone()),
            JsValue::Null => None,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("Object.setPrototypeOf: prototype must be an object or null")
                    .into())
            }
        };

        // 3. If Type(O) is not Object, return O.
        let Some(obj) = value.as_object() else {
            return Ok(value.clone());
        };

        // 4. Let status be ? O.[[SetPrototypeOf]](proto).
        // 5. If status is false, throw a TypeError exception.
        if !obj.__set_prototype_of__(proto, context)? {
            return Err(JsNativeError::typ()
                .with_message("cannot set prototype of this object")
                .into());
        }

        // 6. Return O.
        Ok(value.clone())
    }

    /// `Object.hasOwn ( O, P )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.hasown
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/hasOwn
    fn has_own(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let key be ? ToPropertyKey(P).
        let key = args.get_or_undefined(1).to_property_key(context)?;
        // 3. Return ? HasOwnProperty(obj, key).
        Ok(obj.has_own_property(key, context)?.into())
    }

    /// `Object.is ( value1, value2 )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.is
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/is
    #[allow(clippy::unnecessary_wraps)]
    fn is(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return SameValue(value1, value2).
        Ok(JsValue::same_value(args.get_or_undefined(0), args.get_or_undefined(1)).into())
    }

    /// `Object.isExtensible ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.isextensible
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/isExtensible
    fn is_extensible(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(O) is not Object, return false.
        match args.get_or_undefined(0).as_object() {
            Some(obj) => Ok(obj.__is_extensible__(context)?.into()),
            None => Ok(false.into()),
        }
    }

    /// `Object.isFrozen ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.isfrozen
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/isFrozen
    fn is_frozen(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        match args.get_or_undefined(0).as_object() {
            Some(obj) => Ok(obj.test_integrity_level(IntegrityLevel::Frozen, context)?.into()),
            None => Ok(true.into()),
        }
    }

    /// `Object.isSealed ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.issealed
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/isSealed
    fn is_sealed(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        match args.get_or_undefined(0).as_object() {
            Some(obj) => Ok(obj.test_integrity_level(IntegrityLevel::Sealed, context)?.into()),
            None => Ok(true.into()),
        }
    }

    /// `Object.keys ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.keys
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/keys
    fn keys(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let nameList be ? EnumerableOwnPropertyNames(obj, key).
        let name_list = enumerable_own_property_names(&obj, PropertyNameKind::Key, context)?;
        // 3. Return CreateArrayFromList(nameList).
        Ok(crate::builtins::Array::create_array_from_list(name_list, context).into())
    }

    /// `Object.values ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.values
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/values
    fn values(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let obj be ? ToObject(O).
        let obj = args.get_or_undefined(0).to_object(context)?;
        // 2. Let nameList be ? EnumerableOwnPropertyNames(obj, value).
        let name_list = enumerable_own_property_names(&obj, PropertyNameKind::Value, context)?;
        // 3. Return CreateArrayFromList(nameList).
        Ok(crate::builtins::Array::create_array_from_list(name_list, context).into())
    }

    /// `Object.preventExtensions ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.preventextensions
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/preventExtensions
    fn prevent_extensions(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        // 1. If Type(O) is not Object, return O.
        if let Some(obj) = value.as_object() {
            // 2. Let status be ? O.[[PreventExtensions]]().
            if !obj.__prevent_extensions__(context)? {
                // 3. If status is false, throw a TypeError exception.
                return Err(JsNativeError::typ()
                    .with_message("cannot prevent extensions on this object")
                    .into());
            }
        }
        // 4. Return O.
        Ok(value.clone())
    }

    /// `Object.seal ( O )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.seal
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/seal
    fn seal(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        // 1. If Type(O) is not Object, return O.
        if let Some(obj) = value.as_object() {
            // 2. Let status be ? SetIntegrityLevel(O, sealed).
            if !obj.set_integrity_level(IntegrityLevel::Sealed, context)? {
                // 3. If status is false, throw a TypeError exception.
                return Err(JsNativeError::typ().with_message("cannot seal object").into());
            }
        }
        // 4. Return O.
        Ok(value.clone())
    }

    /// `Object.prototype.hasOwnProperty ( V )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.hasownproperty
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/hasOwnProperty
    fn has_own_property(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let P be ? ToPropertyKey(V).
        let key = args.get_or_undefined(0).to_property_key(context)?;
        // 2. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 3. Return ? HasOwnProperty(O, P).
        Ok(obj.has_own_property(key, context)?.into())
    }

    /// `Object.prototype.propertyIsEnumerable ( V )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.propertyisenumerable
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/propertyIsEnumerable
    fn property_is_enumerable(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let P be ? ToPropertyKey(V).
        let key = args.get_or_undefined(0).to_property_key(context)?;
        // 2. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 3. Let desc be ? O.[[GetOwnProperty]](P).
        // 4. If desc is undefined, return false.
        // 5. Return desc.[[Enumerable]].
        Ok(obj
            .__get_own_property__(&key, context)?
            .is_some_and(|desc| desc.expect_enumerable())
            .into())
    }

    /// `Object.prototype.isPrototypeOf ( V )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.isprototypeof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/isPrototypeOf
    fn is_prototype_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(V) is not Object, return false.
        let Some(mut v) = args.get_or_undefined(0).as_object().cloned() else {
            return Ok(false.into());
        };

        // 2. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;

        // 3. Repeat: a. Set V to ? V.[[GetPrototypeOf]]().
        while let Some(proto) = v.__get_prototype_of__(context)? {
            if JsObject::equals(&obj, &proto) {
                return Ok(true.into());
            }
            v = proto;
        }
        Ok(false.into())
    }

    /// `Object.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Object/toString
    pub(crate) fn to_string(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If the this value is undefined, return "[object Undefined]".
        if this.is_undefined() {
            return Ok(js_string!("[object Undefined]").into());
        }
        // 2. If the this value is null, return "[object Null]".
        if this.is_null() {
            return Ok(js_string!("[object Null]").into());
        }

        // 3. Let O be ! ToObject(this value).
        let obj = this
            .to_object(context)
            .expect("non-nullish values always convert to objects");

        // 4-14. Compute the built-in tag from the object kind.
        let builtin_tag = obj.borrow().kind().type_tag();

        // 15. Let tag be ? Get(O, @@toStringTag).
        let tag = obj.get(WellKnownSymbols::to_string_tag(), context)?;

        // 16. If Type(tag) is not String, set tag to builtinTag.
        let tag = tag
            .as_string()
            .cloned()
            .unwrap_or_else(|| js_string!(builtin_tag));

        // 17. Return the string-concatenation of "[object ", tag, and "]".
        Ok(js_string!(js_string!("[object "), tag, js_string!("]")).into())
    }

    /// `Object.prototype.toLocaleString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.tolocalestring
    fn to_locale_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be the this value.
        // 2. Return ? Invoke(O, "toString").
        let obj = this.to_object(context)?;
        obj.invoke("toString", &[], context)
    }

    /// `Object.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-object.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? ToObject(this value).
        Ok(this.to_object(context)?.into())
    }
}

/// Abstract operation `ObjectDefineProperties ( O, Properties )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-objectdefineproperties
fn object_define_properties(
    obj: &JsObject,
    properties: &JsValue,
    context: &mut Context,
) -> JsResult<()> {
    // 1. Let props be ? ToObject(Properties).
    let props = properties.to_object(context)?;

    // 2. Let keys be ? props.[[OwnPropertyKeys]]().
    let keys = props.__own_property_keys__(context)?;

    // 3-4. Collect then define every enumerable descriptor.
    let mut descriptors = Vec::new();
    for key in keys {
        if let Some(prop_desc) = props.__get_own_property__(&key, context)? {
            if prop_desc.expect_enumerable() {
                let desc_obj = props.get(key.clone(), context)?;
                let desc = desc_obj.to_property_descriptor(context)?;
                descriptors.push((key, desc));
            }
        }
    }
    for (key, desc) in descriptors {
        obj.define_property_or_throw(key, desc, context)?;
    }

    Ok(())
}

/// Abstract operation `EnumerableOwnPropertyNames ( O, kind )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-enumerableownpropertynames
pub(crate) fn enumerable_own_property_names(
    obj: &JsObject,
    kind: PropertyNameKind,
    context: &mut Context,
) -> JsResult<Vec<JsValue>> {
    // 1. Let ownKeys be ? O.[[OwnPropertyKeys]]().
    let own_keys = obj.__own_property_keys__(context)?;

    // 2. Let properties be a new empty List.
    let mut properties = Vec::new();

    // 3. For each element key of ownKeys, do
    for key in own_keys {
        // a. If Type(key) is String, then
        if matches!(key, PropertyKey::Symbol(_)) {
            continue;
        }
        // i. Let desc be ? O.[[GetOwnProperty]](key).
        let Some(desc) = obj.__get_own_property__(&key, context)? else {
            continue;
        };
        // ii. If desc is not undefined and desc.[[Enumerable]] is true, then
        if !desc.expect_enumerable() {
            continue;
        }
        match kind {
            // 1. If kind is key, append key to properties.
            PropertyNameKind::Key => properties.push(JsValue::from(&key)),
            // 2. Else: a. Let value be ? Get(O, key).
            PropertyNameKind::Value => properties.push(obj.get(key, context)?),
            PropertyNameKind::KeyAndValue => {
                let value = obj.get(key.clone(), context)?;
                let entry = crate::builtins::Array::create_array_from_list(
                    [JsValue::from(&key), value],
                    context,
                );
                properties.push(entry.into());
            }
        }
    }

    // 4. Return properties.
    Ok(properties)
}
