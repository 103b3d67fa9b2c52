//! The global `WeakMap` object.
//!
//! Entries are keyed by the process-unique identity of the key object, so
//! the map never roots its keys: a collected key simply leaves an
//! unreachable entry behind, which is invisible to scripts because the only
//! way to query an entry is to present the key object itself.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-weakmap-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakMap

use crate::{
    builtins::{map::add_entries_from_iterable, BuiltIn},
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{internal_methods::get_prototype_from_constructor, ConstructorBuilder, JsObject, ObjectData},
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};
use rustc_hash::FxHashMap;

/// The backing store of a `WeakMap`: values keyed by object identity.
#[derive(Debug, Default, Finalize)]
pub struct NativeWeakMap {
    entries: FxHashMap<u64, JsValue>,
}

// Only the values are traced; keys are bare identities and never keep
// their objects alive.
unsafe impl Trace for NativeWeakMap {
    custom_trace!(this, {
        for value in this.entries.values() {
            mark(value);
        }
    });
}

impl NativeWeakMap {
    /// Gets the value associated with a key object.
    #[must_use]
    pub fn get(&self, key: &JsObject) -> Option<JsValue> {
        self.entries.get(&key.hash_key()).cloned()
    }

    /// Associates a value with a key object.
    pub fn set(&mut self, key: &JsObject, value: JsValue) {
        self.entries.insert(key.hash_key(), value);
    }

    /// Removes the entry of a key object, returning whether it existed.
    pub fn delete(&mut self, key: &JsObject) -> bool {
        self.entries.remove(&key.hash_key()).is_some()
    }

    /// Checks if the key object has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &JsObject) -> bool {
        self.entries.contains_key(&key.hash_key())
    }
}

/// JavaScript `WeakMap` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeakMap;

impl BuiltIn for WeakMap {
    const NAME: &'static str = "WeakMap";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().weak_map().clone(),
        )
        .name(Self::NAME)
        .length(0)
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .method(Self::delete, "delete", 1)
        .method(Self::get, "get", 1)
        .method(Self::has, "has", 1)
        .method(Self::set, "set", 2)
        .build();

        Some(object.into())
    }
}

impl WeakMap {
    /// `WeakMap ( [ iterable ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakmap-iterable
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("calling a builtin WeakMap constructor without new is forbidden")
                .into());
        }

        // 2-3. Allocate the map.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::weak_map, context)?;
        let map = JsObject::from_proto_and_data(
            prototype,
            ObjectData::weak_map(NativeWeakMap::default()),
        );

        // 4. If iterable is either undefined or null, return map.
        let iterable = args.get_or_undefined(0);
        if iterable.is_null_or_undefined() {
            return Ok(map.into());
        }

        // 5-7. Drain the iterable through the `set` adder.
        let adder = map.get("set", context)?;
        add_entries_from_iterable(&map, iterable, &adder, context)
    }

    /// Helper to access the backing store of a receiver.
    fn this_weak_map<R, F>(this: &JsValue, f: F) -> JsResult<R>
    where
        F: FnOnce(&mut NativeWeakMap) -> R,
    {
        if let Some(obj) = this.as_object() {
            if let Some(map) = obj.borrow_mut().as_weak_map_mut() {
                return Ok(f(map));
            }
        }
        Err(JsNativeError::typ()
            .with_message("'this' is not a WeakMap")
            .into())
    }

    /// `WeakMap.prototype.delete ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakmap.prototype.delete
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakMap/delete
    fn delete(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 4. If Type(key) is not Object, return false.
        let Some(key) = args.get_or_undefined(0).as_object().cloned() else {
            return Self::this_weak_map(this, |_| false.into());
        };
        Self::this_weak_map(this, |map| map.delete(&key).into())
    }

    /// `WeakMap.prototype.get ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakmap.prototype.get
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakMap/get
    fn get(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 4. If Type(key) is not Object, return undefined.
        let Some(key) = args.get_or_undefined(0).as_object().cloned() else {
            return Self::this_weak_map(this, |_| JsValue::undefined());
        };
        Self::this_weak_map(this, |map| map.get(&key).unwrap_or_default())
    }

    /// `WeakMap.prototype.has ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakmap.prototype.has
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakMap/has
    fn has(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(key) = args.get_or_undefined(0).as_object().cloned() else {
            return Self::this_weak_map(this, |_| false.into());
        };
        Self::this_weak_map(this, |map| map.contains_key(&key).into())
    }

    /// `WeakMap.prototype.set ( key, value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakmap.prototype.set
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakMap/set
    fn set(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 4. If CanBeHeldWeakly(key) is false, throw a TypeError exception.
        let Some(key) = args.get_or_undefined(0).as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("WeakMap keys must be objects")
                .into());
        };
        let value = args.get_or_undefined(1).clone();
        Self::this_weak_map(this, move |map| map.set(&key, value))?;
        Ok(this.clone())
    }
}
