//! The global `WeakSet` object.
//!
//! Like `WeakMap`, entries are keyed by object identity and never root
//! their objects.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-weakset-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakSet

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{internal_methods::get_prototype_from_constructor, ConstructorBuilder, JsObject, ObjectData},
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};
use rustc_hash::FxHashSet;

/// The backing store of a `WeakSet`: a set of object identities.
#[derive(Debug, Default, Finalize)]
pub struct NativeWeakSet {
    entries: FxHashSet<u64>,
}

// Identities are not references, so there is nothing to trace.
unsafe impl Trace for NativeWeakSet {
    empty_trace!();
}

impl NativeWeakSet {
    /// Adds a value object to the set.
    pub fn add(&mut self, value: &JsObject) {
        self.entries.insert(value.hash_key());
    }

    /// Removes a value object, returning whether it was present.
    pub fn delete(&mut self, value: &JsObject) -> bool {
        self.entries.remove(&value.hash_key())
    }

    /// Checks if the value object is in the set.
    #[must_use]
    pub fn contains(&self, value: &JsObject) -> bool {
        self.entries.contains(&value.hash_key())
    }
}

/// JavaScript `WeakSet` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeakSet;

impl BuiltIn for WeakSet {
    const NAME: &'static str = "WeakSet";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().weak_set().clone(),
        )
        .name(Self::NAME)
        .length(0)
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .method(Self::add, "add", 1)
        .method(Self::delete, "delete", 1)
        .method(Self::has, "has", 1)
        .build();

        Some(object.into())
    }
}

impl WeakSet {
    /// `WeakSet ( [ iterable ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakset-iterable
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("calling a builtin WeakSet constructor without new is forbidden")
                .into());
        }

        // 2-3. Allocate the set.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::weak_set, context)?;
        let set = JsObject::from_proto_and_data(
            prototype,
            ObjectData::weak_set(NativeWeakSet::default()),
        );

        // 4. If iterable is either undefined or null, return set.
        let iterable = args.get_or_undefined(0);
        if iterable.is_null_or_undefined() {
            return Ok(set.into());
        }

        // 5-7. Drain the iterable through the `add` adder.
        let adder = set.get("add", context)?;
        let Some(adder) = adder.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("property `add` of object is not callable")
                .into());
        };
        let mut iterator_record = iterable.get_iterator(context, None, None)?;
        while let Some(next) = iterator_record.step(context)? {
            let next_value = next.value(context)?;
            let status = adder.call(&set.clone().into(), &[next_value], context);
            crate::builtins::iterable::if_abrupt_close_iterator!(status, iterator_record, context);
        }

        Ok(set.into())
    }

    /// Helper to access the backing store of a receiver.
    fn this_weak_set<R, F>(this: &JsValue, f: F) -> JsResult<R>
    where
        F: FnOnce(&mut NativeWeakSet) -> R,
    {
        if let Some(obj) = this.as_object() {
            if let Some(set) = obj.borrow_mut().as_weak_set_mut() {
                return Ok(f(set));
            }
        }
        Err(JsNativeError::typ()
            .with_message("'this' is not a WeakSet")
            .into())
    }

    /// `WeakSet.prototype.add ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakset.prototype.add
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakSet/add
    fn add(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 3. If CanBeHeldWeakly(value) is false, throw a TypeError exception.
        let Some(value) = args.get_or_undefined(0).as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("WeakSet values must be objects")
                .into());
        };
        Self::this_weak_set(this, move |set| set.add(&value))?;
        Ok(this.clone())
    }

    /// `WeakSet.prototype.delete ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakset.prototype.delete
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakSet/delete
    fn delete(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(value) = args.get_or_undefined(0).as_object().cloned() else {
            return Self::this_weak_set(this, |_| false.into());
        };
        Self::this_weak_set(this, |set| set.delete(&value).into())
    }

    /// `WeakSet.prototype.has ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-weakset.prototype.has
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/WeakSet/has
    fn has(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(value) = args.get_or_undefined(0).as_object().cloned() else {
            return Self::this_weak_set(this, |_| false.into());
        };
        Self::this_weak_set(this, |set| set.contains(&value).into())
    }
}
