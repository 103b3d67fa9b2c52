//! Abstract operations over objects, built on top of the internal methods.

use super::{JsObject, ObjectData};
use crate::{
    builtins::function::{ClosureFunctionSignature, Function, NativeFunction},
    context::intrinsics::{StandardConstructor, StandardConstructors},
    error::JsNativeError,
    object::internal_methods::proxy,
    property::{PropertyDescriptor, PropertyKey},
    symbol::WellKnownSymbols,
    value::PreferredType,
    Context, JsResult, JsValue,
};
use std::rc::Rc;

/// The integrity level of an object, for `Object.seal`/`Object.freeze`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityLevel {
    /// The object is sealed: no new properties, none removable.
    Sealed,
    /// The object is frozen: sealed, and all data properties read-only.
    Frozen,
}

impl JsObject {
    /// Abstract operation `Get ( O, P )`, with the object itself as the
    /// receiver.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-o-p
    pub fn get<K>(&self, key: K, context: &mut Context) -> JsResult<JsValue>
    where
        K: Into<PropertyKey>,
    {
        self.__get__(&key.into(), self.clone().into(), context)
    }

    /// Abstract operation `Set ( O, P, V, Throw )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set-o-p-v-throw
    pub fn set<K, V>(&self, key: K, value: V, throw: bool, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        let key = key.into();
        // 1. Let success be ? O.[[Set]](P, V, O).
        let success = self.__set__(key.clone(), value.into(), self.clone().into(), context)?;
        // 2. If success is false and Throw is true, throw a TypeError exception.
        if !success && throw {
            return Err(JsNativeError::typ()
                .with_message(format!("cannot set non-writable property: {key}"))
                .into());
        }
        // 3. Return success.
        Ok(success)
    }

    /// Abstract operation `CreateDataProperty ( O, P, V )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createdataproperty
    pub fn create_data_property<K, V>(
        &self,
        key: K,
        value: V,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        let new_desc = PropertyDescriptor::builder()
            .value(value)
            .writable(true)
            .enumerable(true)
            .configurable(true)
            .build();
        self.__define_own_property__(&key.into(), new_desc, context)
    }

    /// Abstract operation `CreateDataPropertyOrThrow ( O, P, V )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createdatapropertyorthrow
    pub fn create_data_property_or_throw<K, V>(
        &self,
        key: K,
        value: V,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        V: Into<JsValue>,
    {
        let key = key.into();
        let success = self.create_data_property(key.clone(), value, context)?;
        if !success {
            return Err(JsNativeError::typ()
                .with_message(format!("cannot define property: {key}"))
                .into());
        }
        Ok(success)
    }

    /// Abstract operation `DefinePropertyOrThrow ( O, P, desc )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-definepropertyorthrow
    pub fn define_property_or_throw<K, P>(
        &self,
        key: K,
        desc: P,
        context: &mut Context,
    ) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
        P: Into<PropertyDescriptor>,
    {
        let key = key.into();
        let success = self.__define_own_property__(&key, desc.into(), context)?;
        if !success {
            return Err(JsNativeError::typ()
                .with_message(format!("cannot define property: {key}"))
                .into());
        }
        Ok(success)
    }

    /// Abstract operation `DeletePropertyOrThrow ( O, P )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-deletepropertyorthrow
    pub fn delete_property_or_throw<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        let key = key.into();
        let success = self.__delete__(&key, context)?;
        if !success {
            return Err(JsNativeError::typ()
                .with_message(format!("cannot delete property: {key}"))
                .into());
        }
        Ok(success)
    }

    /// Abstract operation `HasProperty ( O, P )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-hasproperty
    pub fn has_property<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        self.__has_property__(&key.into(), context)
    }

    /// Abstract operation `HasOwnProperty ( O, P )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-hasownproperty
    pub fn has_own_property<K>(&self, key: K, context: &mut Context) -> JsResult<bool>
    where
        K: Into<PropertyKey>,
    {
        Ok(self.__get_own_property__(&key.into(), context)?.is_some())
    }

    /// Internal method `[[Call]] ( thisArgument, argumentsList )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ecmascript-function-objects-call-thisargument-argumentslist
    pub fn __call__(
        &self,
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        enum Callable {
            Native(NativeFunction),
            Closure(Rc<ClosureFunctionSignature>, JsValue),
            Bound(JsObject, JsValue, Vec<JsValue>),
            Proxy,
            NotCallable,
        }

        let callable = match &self.borrow().data {
            ObjectData::Function(function) => match function {
                Function::Native { function, .. } => Callable::Native(*function),
                Function::Closure {
                    function, captures, ..
                } => Callable::Closure(function.clone(), captures.clone()),
                Function::Bound {
                    target_function,
                    this,
                    args,
                } => Callable::Bound(target_function.clone(), this.clone(), args.clone()),
            },
            ObjectData::Proxy(_) => Callable::Proxy,
            _ => Callable::NotCallable,
        };

        match callable {
            Callable::Native(function) => function(this, args, context),
            Callable::Closure(function, captures) => function(this, args, &captures, context),
            Callable::Bound(target, bound_this, mut bound_args) => {
                bound_args.extend_from_slice(args);
                target.__call__(&bound_this, &bound_args, context)
            }
            Callable::Proxy => proxy::proxy_call(self, this, args, context),
            Callable::NotCallable => Err(JsNativeError::typ()
                .with_message("not a callable function")
                .into()),
        }
    }

    /// Internal method `[[Construct]] ( argumentsList, newTarget )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ecmascript-function-objects-construct-argumentslist-newtarget
    pub fn __construct__(
        &self,
        args: &[JsValue],
        new_target: &JsObject,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        enum Constructable {
            Native(NativeFunction),
            Closure(Rc<ClosureFunctionSignature>, JsValue),
            Bound(JsObject, Vec<JsValue>),
            Proxy,
            NotConstructable,
        }

        let constructable = match &self.borrow().data {
            ObjectData::Function(function) => match function {
                Function::Native {
                    function,
                    constructor: true,
                } => Constructable::Native(*function),
                Function::Closure {
                    function,
                    constructor: true,
                    captures,
                } => Constructable::Closure(function.clone(), captures.clone()),
                Function::Bound {
                    target_function,
                    args,
                    ..
                } if target_function.is_constructor() => {
                    Constructable::Bound(target_function.clone(), args.clone())
                }
                _ => Constructable::NotConstructable,
            },
            ObjectData::Proxy(proxy) if proxy.is_constructor() => Constructable::Proxy,
            _ => Constructable::NotConstructable,
        };

        // Native constructors receive the `new.target` in the `this`
        // argument slot and allocate the receiver themselves from
        // `GetPrototypeFromConstructor`.
        let new_target_value = JsValue::from(new_target);
        let result = match constructable {
            Constructable::Native(function) => function(&new_target_value, args, context)?,
            Constructable::Closure(function, captures) => {
                function(&new_target_value, args, &captures, context)?
            }
            Constructable::Bound(target, mut bound_args) => {
                bound_args.extend_from_slice(args);
                let new_target = if Self::equals(self, new_target) {
                    target.clone()
                } else {
                    new_target.clone()
                };
                return target.__construct__(&bound_args, &new_target, context);
            }
            Constructable::Proxy => {
                return proxy::proxy_construct(self, args, new_target, context)
            }
            Constructable::NotConstructable => {
                return Err(JsNativeError::typ()
                    .with_message("not a constructor")
                    .into())
            }
        };

        result.as_object().cloned().ok_or_else(|| {
            JsNativeError::typ()
                .with_message("constructor did not return an object")
                .into()
        })
    }

    /// Abstract operation `Call ( F, V [ , argumentsList ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-call
    pub fn call(
        &self,
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        self.__call__(this, args, context)
    }

    /// Abstract operation `Construct ( F [ , argumentsList [ , newTarget ] ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-construct
    pub fn construct(
        &self,
        args: &[JsValue],
        new_target: Option<&JsObject>,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        self.__construct__(args, new_target.unwrap_or(self), context)
    }

    /// Abstract operation `Invoke ( V, P [ , argumentsList ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-invoke
    pub fn invoke<K>(&self, key: K, args: &[JsValue], context: &mut Context) -> JsResult<JsValue>
    where
        K: Into<PropertyKey>,
    {
        let this: JsValue = self.clone().into();
        let func = self.get(key, context)?;
        let Some(func) = func.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("not a callable function")
                .into());
        };
        func.call(&this, args, context)
    }

    /// Abstract operation `OrdinaryToPrimitive ( O, hint )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-ordinarytoprimitive
    pub(crate) fn ordinary_to_primitive(
        &self,
        context: &mut Context,
        hint: PreferredType,
    ) -> JsResult<JsValue> {
        // 1. Assert: Type(O) is Object.
        // 2. Assert: hint is either string or number.
        debug_assert!(hint == PreferredType::String || hint == PreferredType::Number);

        // 3. If hint is string, let methodNames be « "toString", "valueOf" ».
        // 4. Else, let methodNames be « "valueOf", "toString" ».
        let method_names = if hint == PreferredType::String {
            ["toString", "valueOf"]
        } else {
            ["valueOf", "toString"]
        };

        // 5. For each element name of methodNames, do
        for name in method_names {
            // a. Let method be ? Get(O, name).
            let method = self.get(name, context)?;
            // b. If IsCallable(method) is true, then
            if let Some(method) = method.as_callable() {
                // i. Let result be ? Call(method, O).
                let result = method.call(&self.clone().into(), &[], context)?;
                // ii. If Type(result) is not Object, return result.
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }

        // 6. Throw a TypeError exception.
        Err(JsNativeError::typ()
            .with_message("cannot convert object to primitive value")
            .into())
    }

    /// Abstract operation `IsArray ( argument )`, unwrapping proxies
    /// transitively.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isarray
    pub fn is_array_abstract(&self) -> JsResult<bool> {
        // 2. If argument is an Array exotic object, return true.
        let mut current = self.clone();
        loop {
            let next = {
                let object = current.borrow();
                match &object.data {
                    ObjectData::Array => return Ok(true),
                    // 3. If argument is a Proxy exotic object, then
                    ObjectData::Proxy(proxy) => {
                        // a. If argument.[[ProxyHandler]] is null, throw a TypeError exception.
                        // b. Let target be argument.[[ProxyTarget]].
                        // c. Return ? IsArray(target).
                        let (target, _) = proxy.try_data()?;
                        target
                    }
                    _ => return Ok(false),
                }
            };
            current = next;
        }
    }

    /// Abstract operation `LengthOfArrayLike ( obj )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-lengthofarraylike
    pub fn length_of_array_like(&self, context: &mut Context) -> JsResult<u64> {
        // 1. Return ℝ(? ToLength(? Get(obj, "length"))).
        self.get("length", context)?.to_length(context)
    }

    /// Abstract operation `SpeciesConstructor ( O, defaultConstructor )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-speciesconstructor
    pub(crate) fn species_constructor(
        &self,
        default_constructor: fn(&StandardConstructors) -> &StandardConstructor,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        // 1. Let C be ? Get(O, "constructor").
        let c = self.get("constructor", context)?;

        // 2. If C is undefined, return defaultConstructor.
        if c.is_undefined() {
            return Ok(default_constructor(context.intrinsics().constructors()).constructor());
        }

        // 3. If Type(C) is not Object, throw a TypeError exception.
        let Some(c) = c.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("property 'constructor' is not an object")
                .into());
        };

        // 4. Let S be ? Get(C, @@species).
        let s = c.get(WellKnownSymbols::species(), context)?;

        // 5. If S is either undefined or null, return defaultConstructor.
        if s.is_null_or_undefined() {
            return Ok(default_constructor(context.intrinsics().constructors()).constructor());
        }

        // 6. If IsConstructor(S) is true, return S.
        // 7. Throw a TypeError exception.
        s.as_constructor().cloned().ok_or_else(|| {
            JsNativeError::typ()
                .with_message("property 'constructor' is not a constructor")
                .into()
        })
    }

    /// Abstract operation `SetIntegrityLevel ( O, level )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-setintegritylevel
    pub fn set_integrity_level(
        &self,
        level: IntegrityLevel,
        context: &mut Context,
    ) -> JsResult<bool> {
        // 2. Let status be ? O.[[PreventExtensions]]().
        // 3. If status is false, return false.
        if !self.__prevent_extensions__(context)? {
            return Ok(false);
        }

        // 4. Let keys be ? O.[[OwnPropertyKeys]]().
        let keys = self.__own_property_keys__(context)?;

        match level {
            // 5. If level is sealed, then
            IntegrityLevel::Sealed => {
                // a. For each element k of keys, perform
                //    ? DefinePropertyOrThrow(O, k, PropertyDescriptor { [[Configurable]]: false }).
                for key in keys {
                    self.define_property_or_throw(
                        key,
                        PropertyDescriptor::builder().configurable(false),
                        context,
                    )?;
                }
            }
            // 6. Else, level is frozen,
            IntegrityLevel::Frozen => {
                for key in keys {
                    // b. Let currentDesc be ? O.[[GetOwnProperty]](k).
                    let Some(current) = self.__get_own_property__(&key, context)? else {
                        continue;
                    };
                    // c. If currentDesc is not undefined, then
                    let desc = if current.is_accessor_descriptor() {
                        // i. If IsAccessorDescriptor(currentDesc):
                        //    { [[Configurable]]: false }.
                        PropertyDescriptor::builder().configurable(false).build()
                    } else {
                        // ii. Else: { [[Configurable]]: false, [[Writable]]: false }.
                        PropertyDescriptor::builder()
                            .configurable(false)
                            .writable(false)
                            .build()
                    };
                    self.define_property_or_throw(key, desc, context)?;
                }
            }
        }

        // 7. Return true.
        Ok(true)
    }

    /// Abstract operation `TestIntegrityLevel ( O, level )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-testintegritylevel
    pub fn test_integrity_level(
        &self,
        level: IntegrityLevel,
        context: &mut Context,
    ) -> JsResult<bool> {
        // 1. Let extensible be ? IsExtensible(O).
        // 2. If extensible is true, return false.
        if self.__is_extensible__(context)? {
            return Ok(false);
        }

        // 4. Let keys be ? O.[[OwnPropertyKeys]]().
        for key in self.__own_property_keys__(context)? {
            // 5.a. Let currentDesc be ? O.[[GetOwnProperty]](k).
            let Some(current) = self.__get_own_property__(&key, context)? else {
                continue;
            };
            // b.i. If currentDesc.[[Configurable]] is true, return false.
            if current.expect_configurable() {
                return Ok(false);
            }
            // b.ii. If level is frozen and IsDataDescriptor(currentDesc) is
            //       true: if currentDesc.[[Writable]] is true, return false.
            if level == IntegrityLevel::Frozen
                && current.is_data_descriptor()
                && current.expect_writable()
            {
                return Ok(false);
            }
        }

        // 6. Return true.
        Ok(true)
    }
}

impl JsValue {
    /// Abstract operation `ToPropertyDescriptor ( Obj )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-topropertydescriptor
    pub fn to_property_descriptor(&self, context: &mut Context) -> JsResult<PropertyDescriptor> {
        // 1. If Type(Obj) is not Object, throw a TypeError exception.
        let Some(obj) = self.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("cannot convert a non-object to a property descriptor")
                .into());
        };

        let mut builder = PropertyDescriptor::builder();
        let mut has_data = false;
        let mut has_accessor = false;

        // 3-4. enumerable.
        if obj.has_property("enumerable", context)? {
            builder = builder.enumerable(obj.get("enumerable", context)?.to_boolean());
        }

        // 5-6. configurable.
        if obj.has_property("configurable", context)? {
            builder = builder.configurable(obj.get("configurable", context)?.to_boolean());
        }

        // 7-8. value.
        if obj.has_property("value", context)? {
            builder = builder.value(obj.get("value", context)?);
            has_data = true;
        }

        // 9-10. writable.
        if obj.has_property("writable", context)? {
            builder = builder.writable(obj.get("writable", context)?.to_boolean());
            has_data = true;
        }

        // 11-12. get.
        if obj.has_property("get", context)? {
            let getter = obj.get("get", context)?;
            if !getter.is_undefined() && !getter.is_callable() {
                return Err(JsNativeError::typ()
                    .with_message("property descriptor getter must be callable")
                    .into());
            }
            builder = builder.get(getter);
            has_accessor = true;
        }

        // 13-14. set.
        if obj.has_property("set", context)? {
            let setter = obj.get("set", context)?;
            if !setter.is_undefined() && !setter.is_callable() {
                return Err(JsNativeError::typ()
                    .with_message("property descriptor setter must be callable")
                    .into());
            }
            builder = builder.set(setter);
            has_accessor = true;
        }

        // 15. If Desc has a [[Get]] or [[Set]] field and a [[Value]] or
        //     [[Writable]] field, throw a TypeError exception.
        if has_accessor && has_data {
            return Err(JsNativeError::typ()
                .with_message(
                    "property descriptors cannot specify both accessors and a value or writability",
                )
                .into());
        }

        Ok(builder.build())
    }
}
