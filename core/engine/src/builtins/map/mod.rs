//! The global `Map` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-map-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map

pub mod map_iterator;
pub mod ordered_map;
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
use map_iterator::MapIterator;
use ordered_map::OrderedMap;

/// JavaScript `Map` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Map;

impl BuiltIn for Map {
    const NAME: &'static str = "Map";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();
        let get_size = FunctionBuilder::native(context, Self::get_size)
            .name("get size")
            .build();

        let entries_function = FunctionBuilder::native(context, Self::entries)
            .name("entries")
            .build();

        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().map().clone(),
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
            "entries",
            entries_function.clone(),
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            WellKnownSymbols::iterator(),
            entries_function,
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
        .method(Self::clear, "clear", 0)
        .method(Self::delete, "delete", 1)
        .method(Self::for_each, "forEach", 1)
        .method(Self::get, "get", 1)
        .method(Self::has, "has", 1)
        .method(Self::keys, "keys", 0)
        .method(Self::set, "set", 2)
        .method(Self::values, "values", 0)
        .build();

        Some(object.into())
    }
}

impl Map {
    /// `Map ( [ iterable ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map-iterable
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("calling a builtin Map constructor without new is forbidden")
                .into());
        }

        // 2-3. Allocate the map.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::map, context)?;
        let map = JsObject::from_proto_and_data(prototype, ObjectData::map(OrderedMap::new()));

        // 4. If iterable is either undefined or null, return map.
        let iterable = args.get_or_undefined(0);
        if iterable.is_null_or_undefined() {
            return Ok(map.into());
        }

        // 5. Let adder be ? Get(map, "set").
        let adder = map.get("set", context)?;

        // 6. Return ? AddEntriesFromIterable(map, iterable, adder).
        add_entries_from_iterable(&map, iterable, &adder, context)
    }

    /// `get Map [ @@species ]`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-map-@@species
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// Helper to access the backing map of a receiver.
    fn this_map<R, F>(this: &JsValue, f: F) -> JsResult<R>
    where
        F: FnOnce(&mut OrderedMap<JsValue>) -> R,
    {
        if let Some(obj) = this.as_object() {
            if let Some(map) = obj.borrow_mut().as_map_mut() {
                return Ok(f(map));
            }
        }
        Err(JsNativeError::typ()
            .with_message("'this' is not a Map")
            .into())
    }

    /// `get Map.prototype.size`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-map.prototype.size
    fn get_size(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_map(this, |map| JsValue::from(map.len()))
    }

    /// `Map.prototype.clear ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.clear
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/clear
    fn clear(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_map(this, |map| {
            map.clear();
            JsValue::undefined()
        })
    }

    /// `Map.prototype.delete ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.delete
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/delete
    fn delete(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let key = args.get_or_undefined(0);
        Self::this_map(this, |map| JsValue::from(map.remove(key).is_some()))
    }

    /// `Map.prototype.get ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.get
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/get
    fn get(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let key = args.get_or_undefined(0);
        Self::this_map(this, |map| map.get(key).cloned().unwrap_or_default())
    }

    /// `Map.prototype.has ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.has
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/has
    fn has(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let key = args.get_or_undefined(0);
        Self::this_map(this, |map| JsValue::from(map.contains_key(key)))
    }

    /// `Map.prototype.set ( key, value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.set
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/set
    fn set(this: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let key = args.get_or_undefined(0);
        let value = args.get_or_undefined(1);

        // 5. If key is -0𝔽, set key to +0𝔽.
        let key = match key.as_number() {
            Some(n) if n == 0.0 => JsValue::new(0),
            _ => key.clone(),
        };

        Self::this_map(this, move |map| {
            map.insert(key, value.clone());
        })?;
        Ok(this.clone())
    }

    /// `Map.prototype.forEach ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.foreach
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/forEach
    fn for_each(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. The receiver must be a Map.
        let Some(map_obj) = this.as_object().filter(|o| o.borrow().as_map().is_some()) else {
            return Err(JsNativeError::typ()
                .with_message("'this' is not a Map")
                .into());
        };

        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Map.prototype.forEach: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 4-5. Visit the live entries in insertion order; entries added
        //      during the walk are visited too.
        let mut index = 0;
        loop {
            let entry = {
                let borrowed = map_obj.borrow();
                let map = borrowed.as_map().expect("the receiver was validated above");
                if index >= map.full_len() {
                    None
                } else {
                    Some(map.get_index(index).map(|(k, v)| (k.clone(), v.clone())))
                }
            };
            match entry {
                None => break,
                Some(None) => {}
                Some(Some((key, value))) => {
                    callback.call(this_arg, &[value, key, this.clone()], context)?;
                }
            }
            index += 1;
        }

        Ok(JsValue::undefined())
    }

    /// `Map.prototype.entries ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.entries
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/entries
    fn entries(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        MapIterator::create_map_iterator(this, PropertyNameKind::KeyAndValue, context)
    }

    /// `Map.prototype.keys ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.keys
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/keys
    fn keys(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        MapIterator::create_map_iterator(this, PropertyNameKind::Key, context)
    }

    /// `Map.prototype.values ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-map.prototype.values
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Map/values
    fn values(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        MapIterator::create_map_iterator(this, PropertyNameKind::Value, context)
    }
}

/// Abstract operation `AddEntriesFromIterable ( target, iterable, adder )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-add-entries-from-iterable
pub(crate) fn add_entries_from_iterable(
    target: &JsObject,
    iterable: &JsValue,
    adder: &JsValue,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If IsCallable(adder) is false, throw a TypeError exception.
    let Some(adder) = adder.as_callable() else {
        return Err(JsNativeError::typ()
            .with_message("property `set` of object is not callable")
            .into());
    };

    // 2. Let iteratorRecord be ? GetIterator(iterable).
    let mut iterator_record = iterable.get_iterator(context, None, None)?;

    // 3. Repeat,
    while let Some(next) = iterator_record.step(context)? {
        // c. Let nextItem be ? IteratorValue(next).
        let next_item = next.value(context)?;

        // d. If Type(nextItem) is not Object, then throw and close.
        let Some(next_item) = next_item.as_object() else {
            let err: crate::JsError = JsNativeError::typ()
                .with_message("invalid iterable entry: not an object")
                .into();
            return iterator_record.close(Err(err), context);
        };

        // e-g. Read the key and the value.
        let key = next_item.get(0, context);
        let key = crate::builtins::iterable::if_abrupt_close_iterator!(key, iterator_record, context);
        let value = next_item.get(1, context);
        let value =
            crate::builtins::iterable::if_abrupt_close_iterator!(value, iterator_record, context);

        // h. Let status be Completion(Call(adder, target, « k, v »)).
        let status = adder.call(&target.clone().into(), &[key, value], context);
        // i. IfAbruptCloseIterator(status, iteratorRecord).
        crate::builtins::iterable::if_abrupt_close_iterator!(status, iterator_record, context);
    }

    // 4. Return target.
    Ok(target.clone().into())
}
