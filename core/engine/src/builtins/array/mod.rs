//! The global `Array` object.
//!
//! The JavaScript `Array` class is a global object that is used in the
//! construction of arrays; which are high-level, list-like objects.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-array-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array

pub mod array_iterator;
#[cfg(test)]
mod tests;

use crate::{
    builtins::{
        array::array_iterator::ArrayIterator,
        iterable::{if_abrupt_close_iterator, IteratorHint},
        BuiltIn, Number,
    },
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyDescriptor, PropertyNameKind},
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs},
    Context, JsResult, JsString, JsValue,
};
use std::cmp::{min, Ordering};

/// JavaScript `Array` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Array;

impl BuiltIn for Array {
    const NAME: &'static str = "Array";

    fn init(context: &mut Context) -> Option<JsValue> {
        let symbol_iterator = WellKnownSymbols::iterator();
        let symbol_unscopables = WellKnownSymbols::unscopables();

        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();

        let values_function = FunctionBuilder::native(context, Self::values)
            .name("values")
            .build();
        let unscopables_object = Self::unscopables_intrinsic(context);

        let array = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().array().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .static_accessor(
            WellKnownSymbols::species(),
            Some(get_species),
            None,
            Attribute::CONFIGURABLE,
        )
        .property(
            "length",
            0,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::PERMANENT,
        )
        .property(
            "values",
            values_function.clone(),
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            symbol_iterator,
            values_function,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .property(
            symbol_unscopables,
            unscopables_object,
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .method(Self::at, "at", 1)
        .method(Self::concat, "concat", 1)
        .method(Self::copy_within, "copyWithin", 2)
        .method(Self::entries, "entries", 0)
        .method(Self::every, "every", 1)
        .method(Self::fill, "fill", 1)
        .method(Self::filter, "filter", 1)
        .method(Self::find, "find", 1)
        .method(Self::find_index, "findIndex", 1)
        .method(Self::find_last, "findLast", 1)
        .method(Self::find_last_index, "findLastIndex", 1)
        .method(Self::flat, "flat", 0)
        .method(Self::flat_map, "flatMap", 1)
        .method(Self::for_each, "forEach", 1)
        .method(Self::includes_value, "includes", 1)
        .method(Self::index_of, "indexOf", 1)
        .method(Self::join, "join", 1)
        .method(Self::keys, "keys", 0)
        .method(Self::last_index_of, "lastIndexOf", 1)
        .method(Self::map, "map", 1)
        .method(Self::pop, "pop", 0)
        .method(Self::push, "push", 1)
        .method(Self::reduce, "reduce", 1)
        .method(Self::reduce_right, "reduceRight", 1)
        .method(Self::reverse, "reverse", 0)
        .method(Self::shift, "shift", 0)
        .method(Self::slice, "slice", 2)
        .method(Self::some, "some", 1)
        .method(Self::sort, "sort", 1)
        .method(Self::splice, "splice", 2)
        .method(Self::to_locale_string, "toLocaleString", 0)
        .method(Self::to_reversed, "toReversed", 0)
        .method(Self::to_sorted, "toSorted", 1)
        .method(Self::to_spliced, "toSpliced", 2)
        .method(Self::to_string, "toString", 0)
        .method(Self::unshift, "unshift", 1)
        .method(Self::with, "with", 2)
        .static_method(Self::from, "from", 1)
        .static_method(Self::is_array, "isArray", 1)
        .static_method(Self::of, "of", 0)
        .build();

        Some(array.into())
    }
}

impl Array {
    /// `Array ( ...values )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array
    pub(crate) fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 2. Let proto be ? GetPrototypeFromConstructor(newTarget, "%Array.prototype%").
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::array, context)?;

        // 3. Let numberOfArgs be the number of elements in values.
        let number_of_args = args.len();

        // 4. If numberOfArgs = 0, then
        if number_of_args == 0 {
            // a. Return ! ArrayCreate(0, proto).
            Ok(Self::array_create(0, Some(prototype), context)
                .expect("this ArrayCreate call must not fail")
                .into())
        // 5. Else if numberOfArgs = 1, then
        } else if number_of_args == 1 {
            // a. Let len be values[0].
            let len = &args[0];
            // b. Let array be ! ArrayCreate(0, proto).
            let array = Self::array_create(0, Some(prototype), context)
                .expect("this ArrayCreate call must not fail");
            // c. If Type(len) is not Number, then
            let int_len = if let Some(len) = len.as_number() {
                // d.i. Let intLen be ! ToUint32(len).
                let int_len = crate::value::f64_to_uint32(len);
                // d.ii. If SameValueZero(intLen, len) is false, throw a RangeError exception.
                if f64::from(int_len) != len {
                    return Err(JsNativeError::range()
                        .with_message("invalid array length")
                        .into());
                }
                int_len
            } else {
                // c.i. Perform ! CreateDataPropertyOrThrow(array, "0", len).
                array
                    .create_data_property_or_throw(0, len.clone(), context)
                    .expect("this CreateDataPropertyOrThrow call must not fail");
                // c.ii. Let intLen be 1𝔽.
                1
            };
            // e. Perform ! Set(array, "length", intLen, true).
            array
                .set("length", int_len, true, context)
                .expect("this Set call must not fail");
            // f. Return array.
            Ok(array.into())
        // 6. Else,
        } else {
            // b. Let array be ? ArrayCreate(numberOfArgs, proto).
            let array = Self::array_create(number_of_args as u64, Some(prototype), context)?;
            // c-d. Define every argument as an indexed property.
            for (i, item) in args.iter().cloned().enumerate() {
                array
                    .create_data_property_or_throw(i, item, context)
                    .expect("this CreateDataPropertyOrThrow call must not fail");
            }
            // f. Return array.
            Ok(array.into())
        }
    }

    /// Utility for constructing `Array` objects.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraycreate
    pub(crate) fn array_create(
        length: u64,
        prototype: Option<JsObject>,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        // 1. If length > 2^32 - 1, throw a RangeError exception.
        if length > 2u64.pow(32) - 1 {
            return Err(JsNativeError::range()
                .with_message("array exceeded max size")
                .into());
        }

        // 2. If proto is not present, set proto to %Array.prototype%.
        let prototype = match prototype {
            Some(prototype) => prototype,
            None => context.intrinsics().constructors().array().prototype(),
        };

        // 3-5. Let A be a new Array exotic object.
        let array = JsObject::from_proto_and_data(prototype, ObjectData::array());

        // 6. Perform ! OrdinaryDefineOwnProperty(A, "length", PropertyDescriptor
        //    { [[Value]]: 𝔽(length), [[Writable]]: true, [[Enumerable]]: false,
        //    [[Configurable]]: false }).
        array.insert_property(
            "length",
            PropertyDescriptor::builder()
                .value(length)
                .writable(true)
                .enumerable(false)
                .configurable(false),
        );

        // 7. Return A.
        Ok(array)
    }

    /// Utility for constructing `Array` objects from an iterator of
    /// `JsValue`s.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createarrayfromlist
    pub(crate) fn create_array_from_list<I>(elements: I, context: &mut Context) -> JsObject
    where
        I: IntoIterator<Item = JsValue>,
    {
        // 2. Let array be ! ArrayCreate(0).
        let array = Self::array_create(0, None, context)
            .expect("creating an empty array with the default prototype must not fail");

        // 3-4. Append every element as an indexed data property.
        let elements: Vec<_> = elements.into_iter().collect();
        let length = elements.len();
        array
            .borrow_mut()
            .properties_mut()
            .override_indexed_properties(elements);
        array
            .insert_property(
                "length",
                PropertyDescriptor::builder()
                    .value(length)
                    .writable(true)
                    .enumerable(false)
                    .configurable(false),
            );

        // 5. Return array.
        array
    }

    /// Utility function used by `Array.prototype.concat` to decide whether an
    /// argument spreads its elements.
    fn is_concat_spreadable(o: &JsValue, context: &mut Context) -> JsResult<bool> {
        // 1. If Type(O) is not Object, return false.
        let Some(o) = o.as_object() else {
            return Ok(false);
        };

        // 2. Let spreadable be ? Get(O, @@isConcatSpreadable).
        let spreadable = o.get(WellKnownSymbols::is_concat_spreadable(), context)?;

        // 3. If spreadable is not undefined, return ! ToBoolean(spreadable).
        if !spreadable.is_undefined() {
            return Ok(spreadable.to_boolean());
        }

        // 4. Return ? IsArray(O).
        o.is_array_abstract()
    }

    /// `get Array [ @@species ]`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-array-@@species
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// Utility function used to specify the creation of a new Array object
    /// using a constructor function derived from `original_array`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arrayspeciescreate
    pub(crate) fn array_species_create(
        original_array: &JsObject,
        length: u64,
        context: &mut Context,
    ) -> JsResult<JsObject> {
        // 1. Let isArray be ? IsArray(originalArray).
        // 2. If isArray is false, return ? ArrayCreate(length).
        if !original_array.is_array_abstract()? {
            return Self::array_create(length, None, context);
        }

        // 3. Let C be ? Get(originalArray, "constructor").
        let c = original_array.get("constructor", context)?;

        // 4. Fast path when C is this realm's Array constructor.
        if let Some(c) = c.as_constructor() {
            if JsObject::equals(c, &context.intrinsics().constructors().array().constructor()) {
                return Self::array_create(length, None, context);
            }
        }

        // 5. If Type(C) is Object, then a. Set C to ? Get(C, @@species).
        let c = if let Some(c_obj) = c.as_object() {
            let c = c_obj.get(WellKnownSymbols::species(), context)?;
            // b. If C is null, set C to undefined.
            if c.is_null() {
                JsValue::undefined()
            } else {
                c
            }
        } else {
            c
        };

        // 6. If C is undefined, return ? ArrayCreate(length).
        if c.is_undefined() {
            return Self::array_create(length, None, context);
        }

        // 7. If IsConstructor(C) is false, throw a TypeError exception.
        let Some(c) = c.as_constructor() else {
            return Err(JsNativeError::typ()
                .with_message("Symbol.species must be a constructor")
                .into());
        };

        // 8. Return ? Construct(C, « 𝔽(length) »).
        c.construct(&[JsValue::new(length)], Some(c), context)
    }

    /// `Array.from ( items [ , mapfn [ , thisArg ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.from
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/from
    pub(crate) fn from(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let items = args.get_or_undefined(0);
        let mapfn = args.get_or_undefined(1);
        let this_arg = args.get_or_undefined(2);

        // 2-3. Validate the map function.
        let mapping = match mapfn {
            JsValue::Undefined => None,
            JsValue::Object(o) if o.is_callable() => Some(o),
            _ => {
                return Err(JsNativeError::typ()
                    .with_message(format!("`{}` is not callable", mapfn.type_of()))
                    .into())
            }
        };

        // 4. Let usingIterator be ? GetMethod(items, @@iterator).
        let using_iterator = items
            .get_method(WellKnownSymbols::iterator(), context)?
            .map(JsValue::from);

        if let Some(using_iterator) = using_iterator {
            // 5. If usingIterator is not undefined, then
            // a-b. Construct the target or a plain array.
            let a = match this.as_constructor() {
                Some(constructor) => constructor.construct(&[], None, context)?,
                _ => Self::array_create(0, None, context)?,
            };

            // c. Let iteratorRecord be ? GetIterator(items, sync, usingIterator).
            let mut iterator_record =
                items.get_iterator(context, Some(IteratorHint::Sync), Some(using_iterator))?;

            // d-e. Drain the iterator.
            for k in 0..9_007_199_254_740_991_u64 {
                // iii. Let next be ? IteratorStep(iteratorRecord).
                let next = iterator_record.step(context)?;

                // iv. If next is false, then
                let Some(next) = next else {
                    // 1. Perform ? Set(A, "length", 𝔽(k), true).
                    a.set("length", k, true, context)?;
                    // 2. Return A.
                    return Ok(a.into());
                };

                // v. Let nextValue be ? IteratorValue(next).
                let next_value = next.value(context)?;

                // vi. If mapping is true, then
                let mapped_value = if let Some(mapfn) = mapping {
                    // 1. Let mappedValue be Call(mapfn, thisArg, « nextValue, 𝔽(k) »).
                    let mapped_value = mapfn.call(this_arg, &[next_value, k.into()], context);

                    // 2. IfAbruptCloseIterator(mappedValue, iteratorRecord).
                    if_abrupt_close_iterator!(mapped_value, iterator_record, context)
                } else {
                    // vii. Else, let mappedValue be nextValue.
                    next_value
                };

                // viii. Let defineStatus be CreateDataPropertyOrThrow(A, Pk, mappedValue).
                let define_status = a.create_data_property_or_throw(k, mapped_value, context);

                // ix. IfAbruptCloseIterator(defineStatus, iteratorRecord).
                if_abrupt_close_iterator!(define_status, iterator_record, context);
            }

            // NOTE: The loop above only exits via the `return`s.
            return Err(JsNativeError::range()
                .with_message("Array.from input is too long")
                .into());
        }

        // 7. NOTE: items is not an Iterable so assume it is an array-like object.
        // 8. Let arrayLike be ! ToObject(items).
        let array_like = items.to_object(context)?;

        // 9. Let len be ? LengthOfArrayLike(arrayLike).
        let len = array_like.length_of_array_like(context)?;

        // 10-11. Construct the target or a plain array of that length.
        let a = match this.as_constructor() {
            Some(constructor) => constructor.construct(&[len.into()], None, context)?,
            _ => Self::array_create(len, None, context)?,
        };

        // 12-14. Copy the elements, mapping as requested.
        for k in 0..len {
            let value = array_like.get(k, context)?;
            let mapped_value = if let Some(mapfn) = mapping {
                mapfn.call(this_arg, &[value, k.into()], context)?
            } else {
                value
            };
            a.create_data_property_or_throw(k, mapped_value, context)?;
        }

        // 15. Perform ? Set(A, "length", 𝔽(len), true).
        a.set("length", len, true, context)?;

        // 16. Return A.
        Ok(a.into())
    }

    /// `Array.isArray ( arg )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.isarray
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/isArray
    pub(crate) fn is_array(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? IsArray(arg).
        match args.get_or_undefined(0).as_object() {
            Some(obj) => Ok(obj.is_array_abstract()?.into()),
            None => Ok(false.into()),
        }
    }

    /// `Array.of ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.of
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/of
    pub(crate) fn of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let len be the number of elements in items.
        // 2. Let lenNumber be 𝔽(len).
        let len = args.len();

        // 3. If IsConstructor(C) is true, then
        //    a. Let A be ? Construct(C, « lenNumber »).
        // 4. Else, a. Let A be ? ArrayCreate(len).
        let a = match this.as_constructor() {
            Some(constructor) => constructor.construct(&[len.into()], None, context)?,
            _ => Self::array_create(len as u64, None, context)?,
        };

        // 5-6. Define every item.
        for (k, value) in args.iter().enumerate() {
            // b. Perform ? CreateDataPropertyOrThrow(A, Pk, kValue).
            a.create_data_property_or_throw(k, value.clone(), context)?;
        }

        // 7. Perform ? Set(A, "length", lenNumber, true).
        a.set("length", len, true, context)?;

        // 8. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.at ( index )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.at
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/at
    pub(crate) fn at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)? as i64;
        // 3. Let relativeIndex be ? ToIntegerOrInfinity(index).
        let relative_index = args.get_or_undefined(0).to_integer_or_infinity(context)?;
        let k = match relative_index {
            // 4. If relativeIndex ≥ 0, then let k be relativeIndex.
            IntegerOrInfinity::Integer(i) if i >= 0 && i < len => i,
            // 5. Else, let k be len + relativeIndex.
            IntegerOrInfinity::Integer(i) if i < 0 && len + i >= 0 => len + i,
            // 6. If k < 0 or k ≥ len, return undefined.
            _ => return Ok(JsValue::undefined()),
        };
        // 7. Return ? Get(O, ! ToString(𝔽(k))).
        obj.get(k as u64, context)
    }

    /// `Array.prototype.concat ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.concat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/concat
    pub(crate) fn concat(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let A be ? ArraySpeciesCreate(O, 0).
        let arr = Self::array_species_create(&obj, 0, context)?;
        // 3. Let n be 0.
        let mut n: u64 = 0;
        // 4. Prepend O to items.
        let this_val: JsValue = obj.into();
        // 5. For each element E of items, do
        for item in std::iter::once(&this_val).chain(args.iter()) {
            // a. Let spreadable be ? IsConcatSpreadable(E).
            if Self::is_concat_spreadable(item, context)? {
                // b. If spreadable is true, then
                let item = item
                    .as_object()
                    .expect("spreadable values are always objects");
                // ii. Let len be ? LengthOfArrayLike(E).
                let len = item.length_of_array_like(context)?;
                // iii. If n + len > 2^53 - 1, throw a TypeError exception.
                if n + len > Number::MAX_SAFE_INTEGER as u64 {
                    return Err(JsNativeError::typ()
                        .with_message("array is too long")
                        .into());
                }
                // iv-v. Shallow-copy the elements, skipping holes.
                for k in 0..len {
                    if item.has_property(k, context)? {
                        let sub_element = item.get(k, context)?;
                        arr.create_data_property_or_throw(n, sub_element, context)?;
                    }
                    n += 1;
                }
            } else {
                // c. Else,
                // ii. If n ≥ 2^53 - 1, throw a TypeError exception.
                if n >= Number::MAX_SAFE_INTEGER as u64 {
                    return Err(JsNativeError::typ()
                        .with_message("array is too long")
                        .into());
                }
                // iii. Perform ? CreateDataPropertyOrThrow(A, ! ToString(𝔽(n)), E).
                arr.create_data_property_or_throw(n, item.clone(), context)?;
                n += 1;
            }
        }

        // 6. Perform ? Set(A, "length", 𝔽(n), true).
        arr.set("length", n, true, context)?;

        // 7. Return A.
        Ok(arr.into())
    }

    /// `Array.prototype.copyWithin ( target, start [ , end ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.copywithin
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/copyWithin
    pub(crate) fn copy_within(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3-5. Let to be the clamped target position.
        let mut to = Self::get_relative_start(context, args.get_or_undefined(0), len)?;
        // 6-8. Let from be the clamped start position.
        let mut from = Self::get_relative_start(context, args.get_or_undefined(1), len)?;
        // 9-11. Let final be the clamped end position.
        let finale = Self::get_relative_end(context, args.get_or_undefined(2), len)?;

        // 12. Let count be min(final - from, len - to).
        let mut count = min(finale.saturating_sub(from), len - to) as i64;

        // 13. If from < to and to < from + count, then
        let direction = if from < to && to < from + count as u64 {
            // b. Set from to from + count - 1. c. Set to to to + count - 1.
            from += count as u64 - 1;
            to += count as u64 - 1;
            // a. Let direction be -1.
            -1
        } else {
            // 14. Else, a. Let direction be 1.
            1
        };

        // 15. Repeat, while count > 0,
        while count > 0 {
            // c. Let fromPresent be ? HasProperty(O, fromKey).
            if obj.has_property(from, context)? {
                // d. If fromPresent is true, then
                let from_value = obj.get(from, context)?;
                obj.set(to, from_value, true, context)?;
            } else {
                // e. Else: i. Perform ? DeletePropertyOrThrow(O, toKey).
                obj.delete_property_or_throw(to, context)?;
            }
            // f-h. Advance.
            if direction > 0 {
                from += 1;
                to += 1;
            } else {
                from = from.wrapping_sub(1);
                to = to.wrapping_sub(1);
            }
            count -= 1;
        }

        // 16. Return O.
        Ok(obj.into())
    }

    /// `Array.prototype.entries ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.entries
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/entries
    pub(crate) fn entries(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Return CreateArrayIterator(O, key+value).
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::KeyAndValue,
            context,
        ))
    }

    /// `Array.prototype.keys ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.keys
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/keys
    pub(crate) fn keys(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Return CreateArrayIterator(O, key).
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::Key,
            context,
        ))
    }

    /// `Array.prototype.values ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.values
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/values
    pub(crate) fn values(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Return CreateArrayIterator(O, value).
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::Value,
            context,
        ))
    }

    /// `Array.prototype.every ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.every
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/every
    pub(crate) fn every(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Array.prototype.every: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 4. Let k be 0. 5. Repeat, while k < len,
        for k in 0..len {
            // b. Let kPresent be ? HasProperty(O, Pk).
            if obj.has_property(k, context)? {
                // c. If kPresent is true, then
                let k_value = obj.get(k, context)?;
                // ii. Let testResult be ! ToBoolean(? Call(callbackfn, thisArg, « kValue, 𝔽(k), O »)).
                let test_result = callback
                    .call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?
                    .to_boolean();
                // iii. If testResult is false, return false.
                if !test_result {
                    return Ok(false.into());
                }
            }
        }

        // 6. Return true.
        Ok(true.into())
    }

    /// `Array.prototype.some ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.some
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/some
    pub(crate) fn some(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Array.prototype.some: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        for k in 0..len {
            if obj.has_property(k, context)? {
                let k_value = obj.get(k, context)?;
                let test_result = callback
                    .call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?
                    .to_boolean();
                if test_result {
                    return Ok(true.into());
                }
            }
        }

        Ok(false.into())
    }

    /// `Array.prototype.forEach ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.foreach
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/forEach
    pub(crate) fn for_each(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Array.prototype.forEach: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        for k in 0..len {
            if obj.has_property(k, context)? {
                let k_value = obj.get(k, context)?;
                callback.call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?;
            }
        }

        Ok(JsValue::undefined())
    }

    /// `Array.prototype.map ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.map
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/map
    pub(crate) fn map(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Array.prototype.map: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 4. Let A be ? ArraySpeciesCreate(O, len).
        let a = Self::array_species_create(&obj, len, context)?;

        // 5-6. Map the present elements, preserving holes.
        for k in 0..len {
            if obj.has_property(k, context)? {
                let k_value = obj.get(k, context)?;
                let mapped_value =
                    callback.call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?;
                a.create_data_property_or_throw(k, mapped_value, context)?;
            }
        }

        // 7. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.filter ( callbackfn [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.filter
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/filter
    pub(crate) fn filter(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Array.prototype.filter: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 4. Let A be ? ArraySpeciesCreate(O, 0).
        let a = Self::array_species_create(&obj, 0, context)?;

        // 5. Let k be 0. 6. Let to be 0. 7. Repeat, while k < len,
        let mut to = 0u32;
        for k in 0..len {
            if obj.has_property(k, context)? {
                let k_value = obj.get(k, context)?;
                let selected = callback
                    .call(
                        this_arg,
                        &[k_value.clone(), k.into(), obj.clone().into()],
                        context,
                    )?
                    .to_boolean();
                if selected {
                    a.create_data_property_or_throw(to, k_value, context)?;
                    to += 1;
                }
            }
        }

        // 8. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.find ( predicate [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.find
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/find
    pub(crate) fn find(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let (_, value) = Self::find_via_predicate(&obj, len, args, Direction::Ascending, context)?;
        Ok(value)
    }

    /// `Array.prototype.findIndex ( predicate [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.findindex
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/findIndex
    pub(crate) fn find_index(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let (index, _) = Self::find_via_predicate(&obj, len, args, Direction::Ascending, context)?;
        Ok(index)
    }

    /// `Array.prototype.findLast ( predicate [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.findlast
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/findLast
    pub(crate) fn find_last(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let (_, value) = Self::find_via_predicate(&obj, len, args, Direction::Descending, context)?;
        Ok(value)
    }

    /// `Array.prototype.findLastIndex ( predicate [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.findlastindex
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/findLastIndex
    pub(crate) fn find_last_index(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let obj = this.to_object(context)?;
        let len = obj.length_of_array_like(context)?;
        let (index, _) = Self::find_via_predicate(&obj, len, args, Direction::Descending, context)?;
        Ok(index)
    }

    /// Abstract operation `FindViaPredicate ( O, len, direction, predicate, thisArg )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-findviapredicate
    fn find_via_predicate(
        obj: &JsObject,
        len: u64,
        args: &[JsValue],
        direction: Direction,
        context: &mut Context,
    ) -> JsResult<(JsValue, JsValue)> {
        // 1. If IsCallable(predicate) is false, throw a TypeError exception.
        let Some(predicate) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("predicate is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        let indices: Box<dyn Iterator<Item = u64>> = match direction {
            Direction::Ascending => Box::new(0..len),
            Direction::Descending => Box::new((0..len).rev()),
        };

        // 4. For each integer k of indices, do
        for k in indices {
            // b. NOTE: Holes are read as undefined.
            let k_value = obj.get(k, context)?;
            // c. Let testResult be ? ToBoolean(? Call(predicate, thisArg, « kValue, 𝔽(k), O »)).
            let test_result = predicate
                .call(
                    this_arg,
                    &[k_value.clone(), k.into(), obj.clone().into()],
                    context,
                )?
                .to_boolean();
            // d. If testResult is true, return the Record { [[Index]]: 𝔽(k), [[Value]]: kValue }.
            if test_result {
                return Ok((k.into(), k_value));
            }
        }

        // 5. Return the Record { [[Index]]: -1𝔽, [[Value]]: undefined }.
        Ok(((-1).into(), JsValue::undefined()))
    }

    /// `Array.prototype.fill ( value [ , start [ , end ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.fill
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/fill
    pub(crate) fn fill(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3-5. Clamp start; 6-8. Clamp end.
        let start = Self::get_relative_start(context, args.get_or_undefined(1), len)?;
        let finale = Self::get_relative_end(context, args.get_or_undefined(2), len)?;

        let value = args.get_or_undefined(0).clone();

        // 9. Repeat, while k < final,
        for k in start..finale {
            // b. Perform ? Set(O, Pk, value, true).
            obj.set(k, value.clone(), true, context)?;
        }

        // 10. Return O.
        Ok(obj.into())
    }

    /// `Array.prototype.includes ( searchElement [ , fromIndex ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.includes
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/includes
    pub(crate) fn includes_value(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)? as i64;
        // 3. If len is 0, return false.
        if len == 0 {
            return Ok(false.into());
        }
        // 4. Let n be ? ToIntegerOrInfinity(fromIndex).
        let n = args.get_or_undefined(1).to_integer_or_infinity(context)?;
        let k = match n {
            // 6. If n is +∞, return false.
            IntegerOrInfinity::PositiveInfinity => return Ok(false.into()),
            // 7. Else if n is -∞, set n to 0.
            IntegerOrInfinity::NegativeInfinity => 0,
            // 8-9. Resolve the relative index.
            IntegerOrInfinity::Integer(n) if n >= 0 => n,
            IntegerOrInfinity::Integer(n) => (len + n).max(0),
        };

        let search_element = args.get_or_undefined(0);

        // 10. Repeat, while k < len,
        for k in k..len {
            // a. Let elementK be ? Get(O, ! ToString(𝔽(k))).
            let element = obj.get(k as u64, context)?;
            // b. If SameValueZero(searchElement, elementK) is true, return true.
            if JsValue::same_value_zero(search_element, &element) {
                return Ok(true.into());
            }
        }

        // 11. Return false.
        Ok(false.into())
    }

    /// `Array.prototype.indexOf ( searchElement [ , fromIndex ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.indexof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/indexOf
    pub(crate) fn index_of(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)? as i64;
        // 3. If len is 0, return -1𝔽.
        if len == 0 {
            return Ok((-1).into());
        }

        // 4. Let n be ? ToIntegerOrInfinity(fromIndex).
        let n = args.get_or_undefined(1).to_integer_or_infinity(context)?;
        let k = match n {
            // 6. If n is +∞, return -1𝔽.
            IntegerOrInfinity::PositiveInfinity => return Ok((-1).into()),
            // 7. Else if n is -∞, set n to 0.
            IntegerOrInfinity::NegativeInfinity => 0,
            IntegerOrInfinity::Integer(n) if n >= 0 => n,
            IntegerOrInfinity::Integer(n) => (len + n).max(0),
        };

        let search_element = args.get_or_undefined(0);

        // 10. Repeat, while k < len,
        for k in k..len {
            // a. Let kPresent be ? HasProperty(O, ! ToString(𝔽(k))).
            if obj.has_property(k as u64, context)? {
                // b. If kPresent is true, then
                let element = obj.get(k as u64, context)?;
                // ii. If same is true, return 𝔽(k).
                if search_element.strict_equals(&element) {
                    return Ok(k.into());
                }
            }
        }

        // 11. Return -1𝔽.
        Ok((-1).into())
    }

    /// `Array.prototype.lastIndexOf ( searchElement [ , fromIndex ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.lastindexof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/lastIndexOf
    pub(crate) fn last_index_of(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)? as i64;
        // 3. If len is 0, return -1𝔽.
        if len == 0 {
            return Ok((-1).into());
        }

        // 4. If fromIndex is present, let n be ? ToIntegerOrInfinity(fromIndex);
        //    else let n be len - 1.
        let k = if args.len() > 1 {
            match args.get_or_undefined(1).to_integer_or_infinity(context)? {
                // 5. If n is -∞, return -1𝔽.
                IntegerOrInfinity::NegativeInfinity => return Ok((-1).into()),
                IntegerOrInfinity::PositiveInfinity => len - 1,
                IntegerOrInfinity::Integer(n) if n >= 0 => min(n, len - 1),
                IntegerOrInfinity::Integer(n) => len + n,
            }
        } else {
            len - 1
        };

        let search_element = args.get_or_undefined(0);

        // 8. Repeat, while k ≥ 0,
        for k in (0..=k).rev() {
            if obj.has_property(k as u64, context)? {
                let element = obj.get(k as u64, context)?;
                if search_element.strict_equals(&element) {
                    return Ok(k.into());
                }
            }
        }

        // 9. Return -1𝔽.
        Ok((-1).into())
    }

    /// `Array.prototype.flat ( [ depth ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.flat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/flat
    pub(crate) fn flat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let sourceLen be ? LengthOfArrayLike(O).
        let source_len = obj.length_of_array_like(context)?;

        // 3. Let depthNum be 1. 4. If depth is not undefined, then
        let depth = args.get_or_undefined(0);
        let depth_num = if depth.is_undefined() {
            1
        } else {
            // a. Set depthNum to ? ToIntegerOrInfinity(depth).
            match depth.to_integer_or_infinity(context)? {
                IntegerOrInfinity::Integer(value) => value.max(0) as u64,
                IntegerOrInfinity::PositiveInfinity => u64::MAX,
                IntegerOrInfinity::NegativeInfinity => 0,
            }
        };

        // 5. Let A be ? ArraySpeciesCreate(O, 0).
        let a = Self::array_species_create(&obj, 0, context)?;

        // 6. Perform ? FlattenIntoArray(A, O, sourceLen, 0, depthNum).
        Self::flatten_into_array(&a, &obj, source_len, 0, depth_num, None, &JsValue::undefined(), context)?;

        // 7. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.flatMap ( mapperFunction [ , thisArg ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.flatmap
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/flatMap
    pub(crate) fn flat_map(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let sourceLen be ? LengthOfArrayLike(O).
        let source_len = obj.length_of_array_like(context)?;

        // 3. If ! IsCallable(mapperFunction) is false, throw a TypeError exception.
        let Some(mapper) = args.get_or_undefined(0).as_callable().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("flatMap mapper function is not callable")
                .into());
        };

        // 4. Let A be ? ArraySpeciesCreate(O, 0).
        let a = Self::array_species_create(&obj, 0, context)?;

        // 5. Perform ? FlattenIntoArray(A, O, sourceLen, 0, 1, mapperFunction, thisArg).
        Self::flatten_into_array(
            &a,
            &obj,
            source_len,
            0,
            1,
            Some(&mapper),
            args.get_or_undefined(1),
            context,
        )?;

        // 6. Return A.
        Ok(a.into())
    }

    /// Abstract operation `FlattenIntoArray ( target, source, sourceLen,
    /// start, depth [ , mapperFunction, thisArg ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-flattenintoarray
    #[allow(clippy::too_many_arguments)]
    fn flatten_into_array(
        target: &JsObject,
        source: &JsObject,
        source_len: u64,
        start: u64,
        depth: u64,
        mapper_function: Option<&JsObject>,
        this_arg: &JsValue,
        context: &mut Context,
    ) -> JsResult<u64> {
        // 1. Let targetIndex be start.
        let mut target_index = start;

        // 3. Repeat, while sourceIndex < sourceLen,
        for source_index in 0..source_len {
            // a. Let P be ! ToString(sourceIndex).
            // b. Let exists be ? HasProperty(source, P).
            if !source.has_property(source_index, context)? {
                continue;
            }

            // c.i. Let element be ? Get(source, P).
            let mut element = source.get(source_index, context)?;

            // c.ii. If mapperFunction is present, then
            if let Some(mapper) = mapper_function {
                // 2. Set element to ? Call(mapperFunction, thisArg, « element, sourceIndex, source »).
                element = mapper.call(
                    this_arg,
                    &[element, source_index.into(), source.clone().into()],
                    context,
                )?;
            }

            // c.iii. Let shouldFlatten be false.
            // c.iv. If depth > 0, then set shouldFlatten to ? IsArray(element).
            let should_flatten = if depth > 0 {
                match element.as_object() {
                    Some(obj) => obj.is_array_abstract()?,
                    None => false,
                }
            } else {
                false
            };

            if should_flatten {
                // c.v. If shouldFlatten is true, then
                // 1-2. Decrement the depth, recursing.
                let new_depth = if depth == u64::MAX { depth } else { depth - 1 };
                let element = element
                    .as_object()
                    .expect("flattenable elements are always objects");
                // 3. Let elementLen be ? LengthOfArrayLike(element).
                let element_len = element.length_of_array_like(context)?;
                // 4. Set targetIndex to ? FlattenIntoArray(target, element, elementLen, targetIndex, newDepth).
                target_index = Self::flatten_into_array(
                    target,
                    element,
                    element_len,
                    target_index,
                    new_depth,
                    None,
                    &JsValue::undefined(),
                    context,
                )?;
            } else {
                // c.vi. Else,
                // 1. If targetIndex ≥ 2^53 - 1, throw a TypeError exception.
                if target_index >= Number::MAX_SAFE_INTEGER as u64 {
                    return Err(JsNativeError::typ()
                        .with_message("array is too long")
                        .into());
                }
                // 2. Perform ? CreateDataPropertyOrThrow(target, ! ToString(targetIndex), element).
                target.create_data_property_or_throw(target_index, element, context)?;
                // 3. Set targetIndex to targetIndex + 1.
                target_index += 1;
            }
        }

        // 4. Return targetIndex.
        Ok(target_index)
    }

    /// `Array.prototype.join ( separator )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.join
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/join
    pub(crate) fn join(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3-4. Let sep be the separator string, defaulting to ",".
        let separator = args.get_or_undefined(0);
        let separator = if separator.is_undefined() {
            js_string!(",")
        } else {
            separator.to_string(context)?
        };

        // 5. Let R be the empty String. 6. Let k be 0. 7. Repeat, while k < len,
        let mut r: Vec<u16> = Vec::new();
        for k in 0..len {
            // a. If k > 0, set R to the string-concatenation of R and sep.
            if k > 0 {
                r.extend_from_slice(&separator);
            }
            // b. Let element be ? Get(O, ! ToString(𝔽(k))).
            let element = obj.get(k, context)?;
            // c. If element is undefined or null, let next be the empty
            //    String; otherwise, let next be ? ToString(element).
            if !element.is_null_or_undefined() {
                r.extend_from_slice(&element.to_string(context)?);
            }
        }

        // 8. Return R.
        Ok(JsString::from(r).into())
    }

    /// `Array.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/toString
    pub(crate) fn to_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let array be ? ToObject(this value).
        let array = this.to_object(context)?;
        // 2. Let func be ? Get(array, "join").
        let func = array.get("join", context)?;
        // 3. If IsCallable(func) is false, set func to %Object.prototype.toString%.
        match func.as_callable() {
            Some(func) => func.call(&array.clone().into(), &[], context),
            None => crate::builtins::object::Object::to_string(&array.into(), &[], context),
        }
    }

    /// `Array.prototype.toLocaleString ( [ locales [ , options ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.tolocalestring
    pub(crate) fn to_locale_string(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let array be ? ToObject(this value).
        let array = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(array).
        let len = array.length_of_array_like(context)?;

        // 3. Let separator be the implementation-defined list-separator.
        let separator = js_string!(",");

        // 4-6. Join the elements with their `toLocaleString` results.
        let mut r: Vec<u16> = Vec::new();
        for k in 0..len {
            if k > 0 {
                r.extend_from_slice(&separator);
            }
            let element = array.get(k, context)?;
            if !element.is_null_or_undefined() {
                let obj = element.to_object(context)?;
                let s = obj.invoke("toLocaleString", &[], context)?;
                r.extend_from_slice(&s.to_string(context)?);
            }
        }

        // 7. Return R.
        Ok(JsString::from(r).into())
    }

    /// `Array.prototype.pop ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.pop
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/pop
    pub(crate) fn pop(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. If len = 0, then
        if len == 0 {
            // a. Perform ? Set(O, "length", +0𝔽, true).
            obj.set("length", 0, true, context)?;
            // b. Return undefined.
            return Ok(JsValue::undefined());
        }

        // 4. Else,
        // b. Let newLen be 𝔽(len - 1).
        let new_len = len - 1;
        // d. Let element be ? Get(O, index).
        let element = obj.get(new_len, context)?;
        // e. Perform ? DeletePropertyOrThrow(O, index).
        obj.delete_property_or_throw(new_len, context)?;
        // f. Perform ? Set(O, "length", newLen, true).
        obj.set("length", new_len, true, context)?;
        // g. Return element.
        Ok(element)
    }

    /// `Array.prototype.push ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.push
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/push
    pub(crate) fn push(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let mut len = obj.length_of_array_like(context)?;

        // 3. Let argCount be the number of elements in items.
        // 4. If len + argCount > 2^53 - 1, throw a TypeError exception.
        if len + args.len() as u64 > Number::MAX_SAFE_INTEGER as u64 {
            return Err(JsNativeError::typ()
                .with_message("the length of the array exceeds 2^53 - 1")
                .into());
        }

        // 5. For each element E of items, do
        for element in args.iter().cloned() {
            // a. Perform ? Set(O, ! ToString(𝔽(len)), E, true).
            obj.set(len, element, true, context)?;
            // b. Set len to len + 1.
            len += 1;
        }

        // 6. Perform ? Set(O, "length", 𝔽(len), true).
        obj.set("length", len, true, context)?;

        // 7. Return 𝔽(len).
        Ok(len.into())
    }

    /// `Array.prototype.shift ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.shift
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/shift
    pub(crate) fn shift(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. If len = 0, then
        if len == 0 {
            obj.set("length", 0, true, context)?;
            return Ok(JsValue::undefined());
        }

        // 4. Let first be ? Get(O, "0").
        let first = obj.get(0, context)?;

        // 5-6. Shift every element down by one.
        for k in 1..len {
            let from = k;
            let to = k - 1;
            if obj.has_property(from, context)? {
                let from_value = obj.get(from, context)?;
                obj.set(to, from_value, true, context)?;
            } else {
                obj.delete_property_or_throw(to, context)?;
            }
        }

        // 7. Perform ? DeletePropertyOrThrow(O, ! ToString(𝔽(len - 1))).
        obj.delete_property_or_throw(len - 1, context)?;
        // 8. Perform ? Set(O, "length", 𝔽(len - 1), true).
        obj.set("length", len - 1, true, context)?;
        // 9. Return first.
        Ok(first)
    }

    /// `Array.prototype.unshift ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.unshift
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/unshift
    pub(crate) fn unshift(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. Let argCount be the number of elements in items.
        let arg_count = args.len() as u64;

        // 4. If argCount > 0, then
        if arg_count > 0 {
            // a. If len + argCount > 2^53 - 1, throw a TypeError exception.
            if len + arg_count > Number::MAX_SAFE_INTEGER as u64 {
                return Err(JsNativeError::typ()
                    .with_message("the length of the array exceeds 2^53 - 1")
                    .into());
            }

            // b-c. Move the existing elements up.
            for k in (0..len).rev() {
                let from = k;
                let to = k + arg_count;
                if obj.has_property(from, context)? {
                    let from_value = obj.get(from, context)?;
                    obj.set(to, from_value, true, context)?;
                } else {
                    obj.delete_property_or_throw(to, context)?;
                }
            }

            // d. Insert the new items at the front.
            for (j, item) in args.iter().cloned().enumerate() {
                obj.set(j as u64, item, true, context)?;
            }
        }

        // 5. Perform ? Set(O, "length", 𝔽(len + argCount), true).
        obj.set("length", len + arg_count, true, context)?;

        // 6. Return 𝔽(len + argCount).
        Ok((len + arg_count).into())
    }

    /// `Array.prototype.reverse ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.reverse
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/reverse
    pub(crate) fn reverse(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. Let middle be floor(len / 2).
        let middle = len / 2;

        // 4-5. Swap the ends pairwise, respecting holes.
        let mut lower = 0;
        while lower != middle {
            let upper = len - lower - 1;
            let upper_exists = obj.has_property(upper, context)?;
            let upper_value = obj.get(upper, context)?;
            let lower_exists = obj.has_property(lower, context)?;
            let lower_value = obj.get(lower, context)?;

            match (lower_exists, upper_exists) {
                (true, true) => {
                    obj.set(lower, upper_value, true, context)?;
                    obj.set(upper, lower_value, true, context)?;
                }
                (false, true) => {
                    obj.set(lower, upper_value, true, context)?;
                    obj.delete_property_or_throw(upper, context)?;
                }
                (true, false) => {
                    obj.delete_property_or_throw(lower, context)?;
                    obj.set(upper, lower_value, true, context)?;
                }
                (false, false) => {}
            }

            lower += 1;
        }

        // 6. Return O.
        Ok(obj.into())
    }

    /// `Array.prototype.reduce ( callbackfn [ , initialValue ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.reduce
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/reduce
    pub(crate) fn reduce(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        Self::reduce_with_direction(this, args, Direction::Ascending, context)
    }

    /// `Array.prototype.reduceRight ( callbackfn [ , initialValue ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.reduceright
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/reduceRight
    pub(crate) fn reduce_right(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        Self::reduce_with_direction(this, args, Direction::Descending, context)
    }

    /// One driver for `reduce` and `reduceRight`, parameterized by
    /// direction. Holes are skipped in both the seed search and the fold.
    fn reduce_with_direction(
        this: &JsValue,
        args: &[JsValue],
        direction: Direction,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3. If IsCallable(callbackfn) is false, throw a TypeError exception.
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("reduce callback is not callable")
                .into());
        };

        let indices: Box<dyn Iterator<Item = u64>> = match direction {
            Direction::Ascending => Box::new(0..len),
            Direction::Descending => Box::new((0..len).rev()),
        };
        let mut indices = indices.peekable();

        // 5-6. Seed the accumulator.
        let mut accumulator = match args.get(1) {
            Some(initial) => initial.clone(),
            None => {
                // 4. If len = 0 and initialValue is not present, throw a TypeError exception.
                // 8.b. Repeat, while kPresent is false and k < len,
                let mut seed = None;
                for k in indices.by_ref() {
                    if obj.has_property(k, context)? {
                        seed = Some(obj.get(k, context)?);
                        break;
                    }
                }
                // 8.c. If kPresent is false, throw a TypeError exception.
                let Some(seed) = seed else {
                    return Err(JsNativeError::typ()
                        .with_message("reduce of empty array with no initial value")
                        .into());
                };
                seed
            }
        };

        // 9. Repeat, while k < len,
        for k in indices {
            // b. Let kPresent be ? HasProperty(O, Pk).
            if obj.has_property(k, context)? {
                // c.ii. Set accumulator to ? Call(callbackfn, undefined,
                //       « accumulator, kValue, 𝔽(k), O »).
                let k_value = obj.get(k, context)?;
                accumulator = callback.call(
                    &JsValue::undefined(),
                    &[accumulator, k_value, k.into(), obj.clone().into()],
                    context,
                )?;
            }
        }

        // 10. Return accumulator.
        Ok(accumulator)
    }

    /// `Array.prototype.slice ( start, end )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.slice
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/slice
    pub(crate) fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;

        // 3-7. Clamp start and end.
        let k = Self::get_relative_start(context, args.get_or_undefined(0), len)?;
        let finale = Self::get_relative_end(context, args.get_or_undefined(1), len)?;

        // 8. Let count be max(final - k, 0).
        let count = finale.saturating_sub(k);

        // 9. Let A be ? ArraySpeciesCreate(O, count).
        let a = Self::array_species_create(&obj, count, context)?;

        // 10-11. Copy the range, skipping holes.
        let mut n = 0;
        for k in k..finale {
            if obj.has_property(k, context)? {
                let k_value = obj.get(k, context)?;
                a.create_data_property_or_throw(n, k_value, context)?;
            }
            n += 1;
        }

        // 12. Perform ? Set(A, "length", 𝔽(n), true).
        a.set("length", n, true, context)?;

        // 13. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.splice ( start, deleteCount, ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.splice
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/splice
    pub(crate) fn splice(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3-4. Let actualStart be the clamped relative start.
        let actual_start = Self::get_relative_start(context, args.get_or_undefined(0), len)?;

        // 5-7. Let actualDeleteCount be the clamped delete count.
        let items = args.get(2..).unwrap_or(&[]);
        let actual_delete_count = match args.len() {
            0 => 0,
            1 => len - actual_start,
            _ => {
                let dc = args
                    .get_or_undefined(1)
                    .to_integer_or_infinity(context)?
                    .clamp_finite(0, (len - actual_start) as i64);
                dc as u64
            }
        };

        // 8. If len + insertCount - actualDeleteCount > 2^53 - 1, throw a TypeError exception.
        let insert_count = items.len() as u64;
        if len + insert_count - actual_delete_count > Number::MAX_SAFE_INTEGER as u64 {
            return Err(JsNativeError::typ()
                .with_message("the length of the array exceeds 2^53 - 1")
                .into());
        }

        // 9. Let A be ? ArraySpeciesCreate(O, actualDeleteCount).
        let a = Self::array_species_create(&obj, actual_delete_count, context)?;

        // 10-11. Copy the removed range into A.
        for k in 0..actual_delete_count {
            let from = actual_start + k;
            if obj.has_property(from, context)? {
                let from_value = obj.get(from, context)?;
                a.create_data_property_or_throw(k, from_value, context)?;
            }
        }

        // 12. Perform ? Set(A, "length", 𝔽(actualDeleteCount), true).
        a.set("length", actual_delete_count, true, context)?;

        // 13-16. Move the tail and write the new items.
        match insert_count.cmp(&actual_delete_count) {
            Ordering::Less => {
                // 15. If itemCount < actualDeleteCount: shift the tail left.
                for k in actual_start..(len - actual_delete_count) {
                    let from = k + actual_delete_count;
                    let to = k + insert_count;
                    if obj.has_property(from, context)? {
                        let from_value = obj.get(from, context)?;
                        obj.set(to, from_value, true, context)?;
                    } else {
                        obj.delete_property_or_throw(to, context)?;
                    }
                }
                // c. Delete the now dangling tail entries.
                for k in ((len - actual_delete_count + insert_count)..len).rev() {
                    obj.delete_property_or_throw(k, context)?;
                }
            }
            Ordering::Greater => {
                // 16. Else if itemCount > actualDeleteCount: shift the tail right.
                for k in (actual_start..(len - actual_delete_count)).rev() {
                    let from = k + actual_delete_count;
                    let to = k + insert_count;
                    if obj.has_property(from, context)? {
                        let from_value = obj.get(from, context)?;
                        obj.set(to, from_value, true, context)?;
                    } else {
                        obj.delete_property_or_throw(to, context)?;
                    }
                }
            }
            Ordering::Equal => {}
        }

        // 17-18. Write the inserted items.
        for (index, item) in items.iter().cloned().enumerate() {
            obj.set(actual_start + index as u64, item, true, context)?;
        }

        // 19. Perform ? Set(O, "length", 𝔽(len - actualDeleteCount + itemCount), true).
        obj.set(
            "length",
            len - actual_delete_count + insert_count,
            true,
            context,
        )?;

        // 20. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.sort ( comparefn )`
    ///
    /// The sort is stable: elements comparing equal keep their relative
    /// order.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.sort
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/sort
    pub(crate) fn sort(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. If comparefn is not undefined and IsCallable(comparefn) is
        //    false, throw a TypeError exception.
        let comparefn = match args.get_or_undefined(0) {
            JsValue::Object(obj) if obj.is_callable() => Some(obj.clone()),
            JsValue::Undefined => None,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("the comparison function must be either a function or undefined")
                    .into())
            }
        };

        // 2. Let obj be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 3. Let len be ? LengthOfArrayLike(obj).
        let len = obj.length_of_array_like(context)?;

        // 4-5. Read out the present elements.
        let mut items = Vec::with_capacity(len as usize);
        for k in 0..len {
            if obj.has_property(k, context)? {
                items.push(obj.get(k, context)?);
            }
        }
        let item_count = items.len() as u64;

        // 6. Sort with SortCompare.
        let sorted = Self::sort_indexed_properties(items, comparefn.as_ref(), context)?;

        // 7-8. Write the sorted elements back and delete the hole tail.
        for (k, item) in sorted.into_iter().enumerate() {
            obj.set(k as u64, item, true, context)?;
        }
        for k in item_count..len {
            obj.delete_property_or_throw(k, context)?;
        }

        // 9. Return obj.
        Ok(obj.into())
    }

    /// Sorts a list of values with the `SortCompare` semantics: undefined
    /// values go last, and without a comparator the elements are ordered by
    /// their code unit string representation.
    fn sort_indexed_properties(
        items: Vec<JsValue>,
        comparefn: Option<&JsObject>,
        context: &mut Context,
    ) -> JsResult<Vec<JsValue>> {
        // Undefined elements always sort past every other element, before
        // the comparator is consulted.
        let mut defined: Vec<JsValue> = Vec::with_capacity(items.len());
        let mut undefined_count = 0usize;
        for item in items {
            if item.is_undefined() {
                undefined_count += 1;
            } else {
                defined.push(item);
            }
        }

        match comparefn {
            Some(comparefn) => {
                let mut err: Option<crate::JsError> = None;
                defined.sort_by(|x, y| {
                    if err.is_some() {
                        return Ordering::Equal;
                    }
                    let v = match comparefn.call(
                        &JsValue::undefined(),
                        &[x.clone(), y.clone()],
                        context,
                    ) {
                        Ok(v) => v,
                        Err(e) => {
                            err = Some(e);
                            return Ordering::Equal;
                        }
                    };
                    let v = match v.to_number(context) {
                        Ok(v) => v,
                        Err(e) => {
                            err = Some(e);
                            return Ordering::Equal;
                        }
                    };
                    // NaN compares as equal.
                    v.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
                });
                if let Some(err) = err {
                    return Err(err);
                }
            }
            None => {
                // Default ordering: lexicographic over the ToString results.
                let mut strings: Vec<(JsString, JsValue)> = Vec::with_capacity(defined.len());
                for item in defined {
                    strings.push((item.to_string(context)?, item));
                }
                strings.sort_by(|(x, _), (y, _)| x.cmp(y));
                defined = strings.into_iter().map(|(_, v)| v).collect();
            }
        }

        defined.extend(std::iter::repeat_with(JsValue::undefined).take(undefined_count));
        Ok(defined)
    }

    /// `Array.prototype.toReversed ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.toreversed
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/toReversed
    pub(crate) fn to_reversed(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. Let A be ? ArrayCreate(len).
        let a = Self::array_create(len, None, context)?;

        // 4-5. Copy in reverse; holes read as undefined.
        for k in 0..len {
            let from = len - k - 1;
            let from_value = obj.get(from, context)?;
            a.create_data_property_or_throw(k, from_value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        // 6. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.toSorted ( comparefn )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.tosorted
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/toSorted
    pub(crate) fn to_sorted(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If comparefn is not undefined and IsCallable(comparefn) is
        //    false, throw a TypeError exception.
        let comparefn = match args.get_or_undefined(0) {
            JsValue::Object(obj) if obj.is_callable() => Some(obj.clone()),
            JsValue::Undefined => None,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("the comparison function must be either a function or undefined")
                    .into())
            }
        };

        // 2. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 3. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 4. Let A be ? ArrayCreate(len).
        let a = Self::array_create(len, None, context)?;

        // 5-6. Read every element (holes read as undefined) and sort.
        let mut items = Vec::with_capacity(len as usize);
        for k in 0..len {
            items.push(obj.get(k, context)?);
        }
        let sorted = Self::sort_indexed_properties(items, comparefn.as_ref(), context)?;

        // 7-8. Write into the dense copy.
        for (k, item) in sorted.into_iter().enumerate() {
            a.create_data_property_or_throw(k, item, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        // 9. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.toSpliced ( start, skipCount, ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.tospliced
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/toSpliced
    pub(crate) fn to_spliced(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3-4. Let actualStart be the clamped relative start.
        let actual_start = Self::get_relative_start(context, args.get_or_undefined(0), len)?;

        // 5-7. Let actualSkipCount be the clamped skip count.
        let items = args.get(2..).unwrap_or(&[]);
        let actual_skip_count = match args.len() {
            0 => 0,
            1 => len - actual_start,
            _ => args
                .get_or_undefined(1)
                .to_integer_or_infinity(context)?
                .clamp_finite(0, (len - actual_start) as i64) as u64,
        };

        // 8. Let newLen be len + insertCount - actualSkipCount.
        let insert_count = items.len() as u64;
        let new_len = len + insert_count - actual_skip_count;

        // 9. If newLen > 2^53 - 1, throw a TypeError exception.
        if new_len > Number::MAX_SAFE_INTEGER as u64 {
            return Err(JsNativeError::typ()
                .with_message("the length of the array exceeds 2^53 - 1")
                .into());
        }

        // 10. Let A be ? ArrayCreate(newLen).
        let a = Self::array_create(new_len, None, context)?;

        // 11-15. Build the dense result.
        let mut i = 0u64;
        for k in 0..actual_start {
            let value = obj.get(k, context)?;
            a.create_data_property_or_throw(i, value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            i += 1;
        }
        for item in items.iter().cloned() {
            a.create_data_property_or_throw(i, item, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            i += 1;
        }
        for k in (actual_start + actual_skip_count)..len {
            let value = obj.get(k, context)?;
            a.create_data_property_or_throw(i, value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
            i += 1;
        }

        // 16. Return A.
        Ok(a.into())
    }

    /// `Array.prototype.with ( index, value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype.with
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Array/with
    pub(crate) fn with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let obj = this.to_object(context)?;
        // 2. Let len be ? LengthOfArrayLike(O).
        let len = obj.length_of_array_like(context)?;
        // 3. Let relativeIndex be ? ToIntegerOrInfinity(index).
        let relative_index = args.get_or_undefined(0).to_integer_or_infinity(context)?;

        // 4-5. Resolve the actual index.
        let actual_index = match relative_index {
            IntegerOrInfinity::Integer(i) if i >= 0 => i,
            IntegerOrInfinity::Integer(i) => len as i64 + i,
            _ => -1,
        };

        // 6. If actualIndex ≥ len or actualIndex < 0, throw a RangeError exception.
        if actual_index < 0 || actual_index as u64 >= len {
            return Err(JsNativeError::range()
                .with_message("invalid index for Array.prototype.with")
                .into());
        }

        // 7. Let A be ? ArrayCreate(len).
        let a = Self::array_create(len, None, context)?;

        // 8-9. Copy with the replacement.
        for k in 0..len {
            let value = if k == actual_index as u64 {
                args.get_or_undefined(1).clone()
            } else {
                obj.get(k, context)?
            };
            a.create_data_property_or_throw(k, value, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }

        // 10. Return A.
        Ok(a.into())
    }

    /// Helper to clamp a relative start argument into `[0, len]`.
    pub(crate) fn get_relative_start(
        context: &mut Context,
        arg: &JsValue,
        len: u64,
    ) -> JsResult<u64> {
        // 1. Let relativeStart be ? ToIntegerOrInfinity(start).
        let relative = arg.to_integer_or_infinity(context)?;
        Ok(match relative {
            // 2. If relativeStart is -∞, let k be 0.
            IntegerOrInfinity::NegativeInfinity => 0,
            // 3. Else if relativeStart < 0, let k be max(len + relativeStart, 0).
            IntegerOrInfinity::Integer(i) if i < 0 => (len as i64 + i).max(0) as u64,
            // 4. Else, let k be min(relativeStart, len).
            IntegerOrInfinity::Integer(i) => min(i as u64, len),
            IntegerOrInfinity::PositiveInfinity => len,
        })
    }

    /// Helper to clamp a relative end argument into `[0, len]`, defaulting
    /// to `len`.
    pub(crate) fn get_relative_end(
        context: &mut Context,
        arg: &JsValue,
        len: u64,
    ) -> JsResult<u64> {
        // 1. If end is undefined, let relativeEnd be len.
        if arg.is_undefined() {
            return Ok(len);
        }
        let relative = arg.to_integer_or_infinity(context)?;
        Ok(match relative {
            IntegerOrInfinity::NegativeInfinity => 0,
            IntegerOrInfinity::Integer(i) if i < 0 => (len as i64 + i).max(0) as u64,
            IntegerOrInfinity::Integer(i) => min(i as u64, len),
            IntegerOrInfinity::PositiveInfinity => len,
        })
    }

    /// The `%Array.prototype[@@unscopables]%` intrinsic object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-array.prototype-@@unscopables
    fn unscopables_intrinsic(context: &mut Context) -> JsObject {
        let unscopables = JsObject::with_null_proto();
        for name in [
            "at",
            "copyWithin",
            "entries",
            "fill",
            "find",
            "findIndex",
            "findLast",
            "findLastIndex",
            "flat",
            "flatMap",
            "includes",
            "keys",
            "toReversed",
            "toSorted",
            "toSpliced",
            "values",
        ] {
            unscopables
                .create_data_property_or_throw(name, true, context)
                .expect("this CreateDataPropertyOrThrow call must not fail");
        }
        unscopables
    }
}

/// The direction of an index walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}
