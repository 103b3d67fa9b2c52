//! The global `Set` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-set-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set

pub mod ordered_set;
pub mod set_iterator;
#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyNameKind},
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};
use ordered_set::OrderedSet;
use set_iterator::SetIterator;

/// JavaScript `Set` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Set;

impl BuiltIn for Set {
    const NAME: &'static str = "Set";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();
        let get_size = FunctionBuilder::native(context, Self::get_size)
            .name("get size")
            .build();

        let values_function = FunctionBuilder::native(context, Self::values)
            .name("values")
            .build();

        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().set().clone(),
        )
        .name(Self::NAME)
        .length(0)
        .static_accessor(
            WellKnownSymbols::species(),
            Some(get_species),
            None,
            Attribute::CONFIGURABLE,
        )
        .property(
            "keys",
            values_function.clone(),
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            "values",
            values_function.clone(),
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            WellKnownSymbols::iterator(),
            values_function,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .accessor(
            "size",
            Some(get_size),
            None,
            Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE,
        )
        .method(Self::add, "add", 1)
        .method(Self::clear, "clear", 0)
        .method(Self::delete, "delete", 1)
        .method(Self::entries, "entries", 0)
        .method(Self::for_each, "forEach", 1)
        .method(Self::has, "has", 1)
        .build();

        Some(object.into())
    }
}

impl Set {
    /// `Set ( [ iterable ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set-iterable
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("calling a builtin Set constructor without new is forbidden")
                .into());
        }

        // 2-3. Allocate the set.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::set, context)?;
        let set = JsObject::from_proto_and_data(prototype, ObjectData::set(OrderedSet::new()));

        // 4. If iterable is either undefined or null, return set.
        let iterable = args.get_or_undefined(0);
        if iterable.is_null_or_undefined() {
            return Ok(set.into());
        }

        // 5. Let adder be ? Get(set, "add").
        let adder = set.get("add", context)?;
        let Some(adder) = adder.as_callable() else {
            // 6. If IsCallable(adder) is false, throw a TypeError exception.
            return Err(JsNativeError::typ()
                .with_message("property `add` of object is not callable")
                .into());
        };

        // 7-8. Drain the iterable through the adder.
        let mut iterator_record = iterable.get_iterator(context, None, None)?;
        while let Some(next) = iterator_record.step(context)? {
            let next_value = next.value(context)?;
            let status = adder.call(&set.clone().into(), &[next_value], context);
            crate::builtins::iterable::if_abrupt_close_iterator!(status, iterator_record, context);
        }

        Ok(set.into())
    }

    /// `get Set [ @@species ]`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-set-@@species
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// Helper to access the backing set of a receiver.
    fn this_set<R, F>(this: &JsValue, f: F) -> JsResult<R>
    where
        F: FnOnce(&mut OrderedSet) -> R,
    {
        if let Some(obj) = this.as_object() {
            if let Some(set) = obj.borrow_mut().as_set_mut() {
                return Ok(f(set));
            }
        }
        Err(JsNativeError::typ()
            .with_message("'this' is not a Set")
            .into())
    }

    /// `get Set.prototype.size`
    fn get_size(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_set(this, |set| JsValue::from(set.len()))
    }

    /// `Set.prototype.add ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.add
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/add
    fn add(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);

        // 4. If value is -0𝔽, set value to +0𝔽.
        let value = match value.as_number() {
            Some(n) if n == 0.0 => JsValue::new(0),
            _ => value.clone(),
        };

        Self::this_set(this, move |set| {
            set.add(value);
        })?;
        Ok(this.clone())
    }

    /// `Set.prototype.clear ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.clear
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/clear
    fn clear(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_set(this, |set| {
            set.clear();
            JsValue::undefined()
        })
    }

    /// `Set.prototype.delete ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.delete
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/delete
    fn delete(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        Self::this_set(this, |set| JsValue::from(set.delete(value)))
    }

    /// `Set.prototype.has ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.has
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/has
    fn has(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let value = args.get_or_undefined(0);
        Self::this_set(this, |set| JsValue::from(set.contains(value)))
    }

    /// `Set.prototype.forEach ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.foreach
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/forEach
    fn for_each(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(set_obj) = this.as_object().filter(|o| o.borrow().as_set().is_some()) else {
            return Err(JsNativeError::typ()
                .with_message("'this' is not a Set")
                .into());
        };

        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Set.prototype.forEach: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        let mut index = 0;
        loop {
            let entry = {
                let borrowed = set_obj.borrow();
                let set = borrowed.as_set().expect("the receiver was validated above");
                if index >= set.full_len() {
                    None
                } else {
                    Some(set.get_index(index).cloned())
                }
            };
            match entry {
                None => break,
                Some(None) => {}
                Some(Some(value)) => {
                    callback.call(this_arg, &[value.clone(), value, this.clone()], context)?;
                }
            }
            index += 1;
        }

        Ok(JsValue::undefined())
    }

    /// `Set.prototype.entries ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.entries
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/entries
    fn entries(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        SetIterator::create_set_iterator(this, PropertyNameKind::KeyAndValue, context)
    }

    /// `Set.prototype.values ( )`, also `keys` and `@@iterator`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-set.prototype.values
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Set/values
    fn values(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        SetIterator::create_set_iterator(this, PropertyNameKind::Value, context)
    }
}
