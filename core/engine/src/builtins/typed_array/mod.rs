//! The `%TypedArray%` intrinsic and the twelve concrete typed array
//! constructors.
//!
//! Every concrete prototype inherits the generic methods from
//! `%TypedArray%.prototype`; the per-kind prototypes only own their
//! `BYTES_PER_ELEMENT` constant and their `constructor` back-reference.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-typedarray-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/TypedArray

pub mod element;
pub mod integer_indexed_object;
#[cfg(test)]
mod tests;

pub use element::TypedArrayKind;
pub use integer_indexed_object::IntegerIndexed;

pub(crate) use integer_indexed_object::{
    integer_indexed_element_get, integer_indexed_element_set, is_valid_integer_index,
    typed_array_length,
};

use crate::{
    builtins::{
        array::array_iterator::ArrayIterator,
        array_buffer::ArrayBuffer,
        iterable::iterable_to_list,
        Array, BuiltIn,
    },
    context::intrinsics::{StandardConstructor, StandardConstructors},
    error::JsNativeError,
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyNameKind},
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs},
    Context, JsResult, JsString, JsValue,
};
use element::ContentType;
use std::cmp::{min, Ordering};

/// The `%TypedArray%` abstract intrinsic.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TypedArray;

impl BuiltIn for TypedArray {
    const NAME: &'static str = "TypedArray";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();
        let get_buffer = FunctionBuilder::native(context, Self::get_buffer)
            .name("get buffer")
            .build();
        let get_byte_length = FunctionBuilder::native(context, Self::get_byte_length)
            .name("get byteLength")
            .build();
        let get_byte_offset = FunctionBuilder::native(context, Self::get_byte_offset)
            .name("get byteOffset")
            .build();
        let get_length = FunctionBuilder::native(context, Self::get_length)
            .name("get length")
            .build();
        let get_to_string_tag = FunctionBuilder::native(context, Self::get_to_string_tag)
            .name("get [Symbol.toStringTag]")
            .build();

        let values_function = FunctionBuilder::native(context, Self::values)
            .name("values")
            .build();

        let accessor_attributes = Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE;
        let mut builder = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().typed_array().clone(),
        )
        .name(Self::NAME)
        .length(0);

        builder
            .static_accessor(
                WellKnownSymbols::species(),
                Some(get_species),
                None,
                Attribute::CONFIGURABLE,
            )
            .static_method(Self::from, "from", 1)
            .static_method(Self::of, "of", 0)
            .accessor("buffer", Some(get_buffer), None, accessor_attributes)
            .accessor("byteLength", Some(get_byte_length), None, accessor_attributes)
            .accessor("byteOffset", Some(get_byte_offset), None, accessor_attributes)
            .accessor("length", Some(get_length), None, accessor_attributes)
            .accessor(
                WellKnownSymbols::to_string_tag(),
                Some(get_to_string_tag),
                None,
                accessor_attributes,
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
            .method(Self::at, "at", 1)
            .method(Self::copy_within, "copyWithin", 2)
            .method(Self::entries, "entries", 0)
            .method(Self::every, "every", 1)
            .method(Self::fill, "fill", 1)
            .method(Self::filter, "filter", 1)
            .method(Self::find, "find", 1)
            .method(Self::find_index, "findIndex", 1)
            .method(Self::find_last, "findLast", 1)
            .method(Self::find_last_index, "findLastIndex", 1)
            .method(Self::for_each, "forEach", 1)
            .method(Self::includes, "includes", 1)
            .method(Self::index_of, "indexOf", 1)
            .method(Self::join, "join", 1)
            .method(Self::keys, "keys", 0)
            .method(Self::last_index_of, "lastIndexOf", 1)
            .method(Self::map, "map", 1)
            .method(Self::reduce, "reduce", 1)
            .method(Self::reduce_right, "reduceRight", 1)
            .method(Self::reverse, "reverse", 0)
            .method(Self::set, "set", 1)
            .method(Self::slice, "slice", 2)
            .method(Self::some, "some", 1)
            .method(Self::sort, "sort", 1)
            .method(Self::subarray, "subarray", 2)
            .method(Array::to_locale_string, "toLocaleString", 0)
            .method(Self::to_reversed, "toReversed", 0)
            .method(Self::to_sorted, "toSorted", 1)
            .method(Array::to_string, "toString", 0)
            .method(Self::with, "with", 2);

        Some(builder.build().into())
    }
}

impl TypedArray {
    /// `%TypedArray% ( )`
    ///
    /// The abstract constructor can never be invoked.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%
    fn constructor(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Throw a TypeError exception.
        Err(JsNativeError::typ()
            .with_message("the TypedArray constructor should never be called directly")
            .into())
    }

    /// `get %TypedArray% [ @@species ]`
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// Validates the receiver as a typed array view that is neither
    /// detached nor out of bounds, returning the object and its current
    /// length.
    fn validate(this: &JsValue) -> JsResult<(JsObject, u64)> {
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .cloned()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        let length = typed_array_length(&obj).ok_or_else(|| {
            JsNativeError::typ().with_message("typed array is detached or out of bounds")
        })?;
        Ok((obj, length))
    }

    /// `%TypedArray%.from ( source [ , mapfn [ , thisArg ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%.from
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/TypedArray/from
    fn from(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. C must be a constructor.
        let Some(constructor) = this.as_constructor().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.from called on non-constructor")
                .into());
        };

        // 3-4. Validate the map function.
        let mapping = match args.get_or_undefined(1) {
            JsValue::Undefined => None,
            JsValue::Object(o) if o.is_callable() => Some(o.clone()),
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("TypedArray.from: mapfn is not callable")
                    .into())
            }
        };
        let this_arg = args.get_or_undefined(2);

        let source = args.get_or_undefined(0);

        // 5. Let usingIterator be ? GetMethod(source, @@iterator).
        let using_iterator = source
            .get_method(WellKnownSymbols::iterator(), context)?
            .map(JsValue::from);

        // 6. If usingIterator is not undefined, then
        let values: Vec<JsValue> = if let Some(using_iterator) = using_iterator {
            // a. Let values be ? IterableToList(source, usingIterator).
            iterable_to_list(context, source, Some(using_iterator))?
        } else {
            // 7-9. Treat the source as an array-like.
            let array_like = source.to_object(context)?;
            let len = array_like.length_of_array_like(context)?;
            let mut values = Vec::with_capacity(len as usize);
            for k in 0..len {
                values.push(array_like.get(k, context)?);
            }
            values
        };

        // Construct the target and write the (possibly mapped) values.
        let len = values.len() as u64;
        let target_obj = typed_array_create(&constructor, &[len.into()], context)?;
        for (k, value) in values.into_iter().enumerate() {
            let mapped_value = if let Some(mapfn) = &mapping {
                mapfn.call(this_arg, &[value, (k as u64).into()], context)?
            } else {
                value
            };
            target_obj.set(k as u64, mapped_value, true, context)?;
        }

        Ok(target_obj.into())
    }

    /// `%TypedArray%.of ( ...items )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%.of
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/TypedArray/of
    fn of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-3. C must be a constructor.
        let Some(constructor) = this.as_constructor().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.of called on non-constructor")
                .into());
        };

        // 4. Let newObj be ? TypedArrayCreate(C, « lenNumber »).
        let new_obj = typed_array_create(&constructor, &[(args.len() as u64).into()], context)?;

        // 5-6. Write the items.
        for (k, value) in args.iter().enumerate() {
            new_obj.set(k as u64, value.clone(), true, context)?;
        }

        // 7. Return newObj.
        Ok(new_obj.into())
    }

    // ==== Accessors ====

    /// `get %TypedArray%.prototype.buffer`
    fn get_buffer(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        let borrowed = obj.borrow();
        let view = borrowed
            .as_integer_indexed()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        Ok(view.viewed_array_buffer().clone().into())
    }

    /// `get %TypedArray%.prototype.byteLength`
    fn get_byte_length(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        let Some(length) = typed_array_length(obj) else {
            return Ok(0.into());
        };
        let element_size = {
            let borrowed = obj.borrow();
            borrowed
                .as_integer_indexed()
                .expect("the receiver was validated above")
                .kind()
                .element_size()
        };
        Ok((length * element_size).into())
    }

    /// `get %TypedArray%.prototype.byteOffset`
    fn get_byte_offset(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        if typed_array_length(obj).is_none() {
            return Ok(0.into());
        }
        let byte_offset = {
            let borrowed = obj.borrow();
            borrowed
                .as_integer_indexed()
                .expect("the receiver was validated above")
                .byte_offset()
        };
        Ok(byte_offset.into())
    }

    /// `get %TypedArray%.prototype.length`
    fn get_length(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        Ok(typed_array_length(obj).unwrap_or(0).into())
    }

    /// `get %TypedArray%.prototype [ @@toStringTag ]`
    #[allow(clippy::unnecessary_wraps)]
    fn get_to_string_tag(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1-4. Return the constructor name, or undefined on other values.
        Ok(this
            .as_object()
            .and_then(|obj| {
                obj.borrow()
                    .as_integer_indexed()
                    .map(|view| js_string!(view.kind().js_name()).into())
            })
            .unwrap_or_default())
    }

    // ==== Iteration ====

    /// `%TypedArray%.prototype.entries ( )`
    fn entries(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, _) = Self::validate(this)?;
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::KeyAndValue,
            context,
        ))
    }

    /// `%TypedArray%.prototype.keys ( )`
    fn keys(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, _) = Self::validate(this)?;
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::Key,
            context,
        ))
    }

    /// `%TypedArray%.prototype.values ( )`
    fn values(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, _) = Self::validate(this)?;
        Ok(ArrayIterator::create_array_iterator(
            obj,
            PropertyNameKind::Value,
            context,
        ))
    }

    // ==== Generic algorithms ====

    /// `%TypedArray%.prototype.at ( index )`
    fn at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let len = len as i64;
        let relative_index = args.get_or_undefined(0).to_integer_or_infinity(context)?;
        let k = match relative_index {
            IntegerOrInfinity::Integer(i) if i >= 0 && i < len => i,
            IntegerOrInfinity::Integer(i) if i < 0 && len + i >= 0 => len + i,
            _ => return Ok(JsValue::undefined()),
        };
        obj.get(k as u64, context)
    }

    /// `%TypedArray%.prototype.copyWithin ( target, start [ , end ] )`
    fn copy_within(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        let to = Array::get_relative_start(context, args.get_or_undefined(0), len)?;
        let from = Array::get_relative_start(context, args.get_or_undefined(1), len)?;
        let finale = Array::get_relative_end(context, args.get_or_undefined(2), len)?;
        let count = min(finale.saturating_sub(from), len - to);

        if count > 0 {
            // Conversions above may have resized the buffer.
            let len = typed_array_length(&obj).ok_or_else(|| {
                JsNativeError::typ().with_message("typed array is detached or out of bounds")
            })?;
            let count = min(count, len.saturating_sub(to.max(from)));
            let values: Vec<JsValue> = (from..from + count)
                .map(|k| integer_indexed_element_get(&obj, k as f64).unwrap_or_default())
                .collect();
            for (i, value) in values.into_iter().enumerate() {
                integer_indexed_element_set(&obj, (to + i as u64) as f64, &value, context)?;
            }
        }

        Ok(this.clone())
    }

    /// `%TypedArray%.prototype.every ( callbackfn [ , thisArg ] )`
    fn every(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.prototype.every: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        for k in 0..len {
            let k_value = obj.get(k, context)?;
            if !callback
                .call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?
                .to_boolean()
            {
                return Ok(false.into());
            }
        }
        Ok(true.into())
    }

    /// `%TypedArray%.prototype.some ( callbackfn [ , thisArg ] )`
    fn some(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.prototype.some: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        for k in 0..len {
            let k_value = obj.get(k, context)?;
            if callback
                .call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?
                .to_boolean()
            {
                return Ok(true.into());
            }
        }
        Ok(false.into())
    }

    /// `%TypedArray%.prototype.forEach ( callbackfn [ , thisArg ] )`
    fn for_each(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.prototype.forEach: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        for k in 0..len {
            let k_value = obj.get(k, context)?;
            callback.call(this_arg, &[k_value, k.into(), obj.clone().into()], context)?;
        }
        Ok(JsValue::undefined())
    }

    /// `%TypedArray%.prototype.fill ( value [ , start [ , end ] ] )`
    fn fill(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        // 3-4. Convert the fill value once, by content type.
        let content_type = {
            let borrowed = obj.borrow();
            borrowed
                .as_integer_indexed()
                .expect("the receiver was validated above")
                .kind()
                .content_type()
        };
        let value: JsValue = match content_type {
            ContentType::BigInt => args.get_or_undefined(0).to_bigint(context)?.into(),
            ContentType::Number => args.get_or_undefined(0).to_number(context)?.into(),
        };

        let start = Array::get_relative_start(context, args.get_or_undefined(1), len)?;
        let finale = Array::get_relative_end(context, args.get_or_undefined(2), len)?;

        // 10-11. The conversions may have resized the buffer.
        let len = typed_array_length(&obj).ok_or_else(|| {
            JsNativeError::typ().with_message("typed array is detached or out of bounds")
        })?;
        let finale = min(finale, len);

        for k in start..finale {
            integer_indexed_element_set(&obj, k as f64, &value, context)?;
        }

        Ok(this.clone())
    }

    /// `%TypedArray%.prototype.filter ( callbackfn [ , thisArg ] )`
    fn filter(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.prototype.filter: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 5-6. Collect the kept values.
        let mut kept = Vec::new();
        for k in 0..len {
            let k_value = obj.get(k, context)?;
            if callback
                .call(
                    this_arg,
                    &[k_value.clone(), k.into(), obj.clone().into()],
                    context,
                )?
                .to_boolean()
            {
                kept.push(k_value);
            }
        }

        // 7-10. Write them into a species array.
        let a = typed_array_species_create(&obj, &[(kept.len() as u64).into()], context)?;
        for (k, value) in kept.into_iter().enumerate() {
            a.set(k as u64, value, true, context)?;
        }
        Ok(a.into())
    }

    /// `%TypedArray%.prototype.map ( callbackfn [ , thisArg ] )`
    fn map(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("TypedArray.prototype.map: callback is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        // 5. Let A be ? TypedArraySpeciesCreate(O, « 𝔽(len) »).
        let a = typed_array_species_create(&obj, &[len.into()], context)?;

        for k in 0..len {
            let k_value = obj.get(k, context)?;
            let mapped = callback.call(
                this_arg,
                &[k_value, k.into(), obj.clone().into()],
                context,
            )?;
            a.set(k, mapped, true, context)?;
        }
        Ok(a.into())
    }

    /// `%TypedArray%.prototype.find ( predicate [ , thisArg ] )`
    fn find(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        Ok(Self::find_via_predicate(&obj, len, args, false, context)?.1)
    }

    /// `%TypedArray%.prototype.findIndex ( predicate [ , thisArg ] )`
    fn find_index(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        Ok(Self::find_via_predicate(&obj, len, args, false, context)?.0)
    }

    /// `%TypedArray%.prototype.findLast ( predicate [ , thisArg ] )`
    fn find_last(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        Ok(Self::find_via_predicate(&obj, len, args, true, context)?.1)
    }

    /// `%TypedArray%.prototype.findLastIndex ( predicate [ , thisArg ] )`
    fn find_last_index(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        Ok(Self::find_via_predicate(&obj, len, args, true, context)?.0)
    }

    fn find_via_predicate(
        obj: &JsObject,
        len: u64,
        args: &[JsValue],
        descending: bool,
        context: &mut Context,
    ) -> JsResult<(JsValue, JsValue)> {
        let Some(predicate) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("predicate is not callable")
                .into());
        };
        let this_arg = args.get_or_undefined(1);

        let indices: Box<dyn Iterator<Item = u64>> = if descending {
            Box::new((0..len).rev())
        } else {
            Box::new(0..len)
        };

        for k in indices {
            let k_value = obj.get(k, context)?;
            if predicate
                .call(
                    this_arg,
                    &[k_value.clone(), k.into(), obj.clone().into()],
                    context,
                )?
                .to_boolean()
            {
                return Ok((k.into(), k_value));
            }
        }
        Ok(((-1).into(), JsValue::undefined()))
    }

    /// `%TypedArray%.prototype.includes ( searchElement [ , fromIndex ] )`
    fn includes(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        if len == 0 {
            return Ok(false.into());
        }
        let len = len as i64;

        let k = match args.get_or_undefined(1).to_integer_or_infinity(context)? {
            IntegerOrInfinity::PositiveInfinity => return Ok(false.into()),
            IntegerOrInfinity::NegativeInfinity => 0,
            IntegerOrInfinity::Integer(n) if n >= 0 => n,
            IntegerOrInfinity::Integer(n) => (len + n).max(0),
        };

        let search_element = args.get_or_undefined(0);
        for k in k..len {
            let element = obj.get(k as u64, context)?;
            if JsValue::same_value_zero(search_element, &element) {
                return Ok(true.into());
            }
        }
        Ok(false.into())
    }

    /// `%TypedArray%.prototype.indexOf ( searchElement [ , fromIndex ] )`
    fn index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        if len == 0 {
            return Ok((-1).into());
        }
        let len = len as i64;

        let k = match args.get_or_undefined(1).to_integer_or_infinity(context)? {
            IntegerOrInfinity::PositiveInfinity => return Ok((-1).into()),
            IntegerOrInfinity::NegativeInfinity => 0,
            IntegerOrInfinity::Integer(n) if n >= 0 => n,
            IntegerOrInfinity::Integer(n) => (len + n).max(0),
        };

        let search_element = args.get_or_undefined(0);
        for k in k..len {
            let element = obj.get(k as u64, context)?;
            if search_element.strict_equals(&element) {
                return Ok(k.into());
            }
        }
        Ok((-1).into())
    }

    /// `%TypedArray%.prototype.lastIndexOf ( searchElement [ , fromIndex ] )`
    fn last_index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        if len == 0 {
            return Ok((-1).into());
        }
        let len = len as i64;

        let k = if args.len() > 1 {
            match args.get_or_undefined(1).to_integer_or_infinity(context)? {
                IntegerOrInfinity::NegativeInfinity => return Ok((-1).into()),
                IntegerOrInfinity::PositiveInfinity => len - 1,
                IntegerOrInfinity::Integer(n) if n >= 0 => min(n, len - 1),
                IntegerOrInfinity::Integer(n) => len + n,
            }
        } else {
            len - 1
        };

        if k < 0 {
            return Ok((-1).into());
        }

        let search_element = args.get_or_undefined(0);
        for k in (0..=k).rev() {
            let element = obj.get(k as u64, context)?;
            if search_element.strict_equals(&element) {
                return Ok(k.into());
            }
        }
        Ok((-1).into())
    }

    /// `%TypedArray%.prototype.join ( separator )`
    fn join(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        let separator = args.get_or_undefined(0);
        let separator = if separator.is_undefined() {
            js_string!(",")
        } else {
            separator.to_string(context)?
        };

        let mut result: Vec<u16> = Vec::new();
        for k in 0..len {
            if k > 0 {
                result.extend_from_slice(&separator);
            }
            let element = obj.get(k, context)?;
            if !element.is_undefined() {
                result.extend_from_slice(&element.to_string(context)?);
            }
        }
        Ok(JsString::from(result).into())
    }

    /// `%TypedArray%.prototype.reduce ( callbackfn [ , initialValue ] )`
    fn reduce(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::reduce_with_direction(this, args, false, context)
    }

    /// `%TypedArray%.prototype.reduceRight ( callbackfn [ , initialValue ] )`
    fn reduce_right(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::reduce_with_direction(this, args, true, context)
    }

    /// The shared reduce driver, indexing through the typed view.
    fn reduce_with_direction(
        this: &JsValue,
        args: &[JsValue],
        descending: bool,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let Some(callback) = args.get_or_undefined(0).as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("reduce callback is not callable")
                .into());
        };

        let indices: Box<dyn Iterator<Item = u64>> = if descending {
            Box::new((0..len).rev())
        } else {
            Box::new(0..len)
        };
        let mut indices = indices.peekable();

        let mut accumulator = match args.get(1) {
            Some(initial) => initial.clone(),
            None => {
                let Some(k) = indices.next() else {
                    return Err(JsNativeError::typ()
                        .with_message("reduce of empty typed array with no initial value")
                        .into());
                };
                obj.get(k, context)?
            }
        };

        for k in indices {
            let k_value = obj.get(k, context)?;
            accumulator = callback.call(
                &JsValue::undefined(),
                &[accumulator, k_value, k.into(), obj.clone().into()],
                context,
            )?;
        }
        Ok(accumulator)
    }

    /// `%TypedArray%.prototype.reverse ( )`
    fn reverse(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;
        let middle = len / 2;
        for lower in 0..middle {
            let upper = len - lower - 1;
            let lower_value = integer_indexed_element_get(&obj, lower as f64).unwrap_or_default();
            let upper_value = integer_indexed_element_get(&obj, upper as f64).unwrap_or_default();
            integer_indexed_element_set(&obj, lower as f64, &upper_value, context)?;
            integer_indexed_element_set(&obj, upper as f64, &lower_value, context)?;
        }
        Ok(this.clone())
    }

    /// `%TypedArray%.prototype.set ( source [ , offset ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%.prototype.set
    fn set(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-3. The receiver must be a typed array.
        let target = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .cloned()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;

        // 4-5. Let targetOffset be ? ToIntegerOrInfinity(offset); < 0 throws.
        let target_offset = match args.get_or_undefined(1).to_integer_or_infinity(context)? {
            IntegerOrInfinity::Integer(i) if i >= 0 => i as u64,
            IntegerOrInfinity::PositiveInfinity => u64::MAX,
            _ => {
                return Err(JsNativeError::range()
                    .with_message("TypedArray.set: offset must not be negative")
                    .into())
            }
        };

        let target_length = typed_array_length(&target).ok_or_else(|| {
            JsNativeError::typ().with_message("typed array is detached or out of bounds")
        })?;

        let source = args.get_or_undefined(0);

        // 6-7. Copy from a typed array or from an array-like.
        let source_is_typed_array = source
            .as_object()
            .is_some_and(|obj| obj.borrow().as_integer_indexed().is_some());

        if source_is_typed_array {
            let source_obj = source.as_object().expect("checked above").clone();
            let source_length = typed_array_length(&source_obj).ok_or_else(|| {
                JsNativeError::typ().with_message("typed array is detached or out of bounds")
            })?;

            // Content types must agree.
            let (source_type, target_type) = {
                let s = source_obj.borrow();
                let t = target.borrow();
                (
                    s.as_integer_indexed().expect("checked above").kind().content_type(),
                    t.as_integer_indexed().expect("checked above").kind().content_type(),
                )
            };
            if source_type != target_type {
                return Err(JsNativeError::typ()
                    .with_message("cannot mix BigInt and Number typed arrays in set")
                    .into());
            }

            if source_length + target_offset > target_length {
                return Err(JsNativeError::range()
                    .with_message("TypedArray.set: source does not fit in the target")
                    .into());
            }

            for k in 0..source_length {
                let value = integer_indexed_element_get(&source_obj, k as f64).unwrap_or_default();
                integer_indexed_element_set(&target, (target_offset + k) as f64, &value, context)?;
            }
        } else {
            let src = source.to_object(context)?;
            let src_length = src.length_of_array_like(context)?;

            if src_length + target_offset > target_length {
                return Err(JsNativeError::range()
                    .with_message("TypedArray.set: source does not fit in the target")
                    .into());
            }

            for k in 0..src_length {
                let value = src.get(k, context)?;
                integer_indexed_element_set(&target, (target_offset + k) as f64, &value, context)?;
            }
        }

        // 8. Return undefined.
        Ok(JsValue::undefined())
    }

    /// `%TypedArray%.prototype.slice ( start, end )`
    fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        let k = Array::get_relative_start(context, args.get_or_undefined(0), len)?;
        let finale = Array::get_relative_end(context, args.get_or_undefined(1), len)?;
        let count = finale.saturating_sub(k);

        // 9. Let A be ? TypedArraySpeciesCreate(O, « 𝔽(count) »).
        let a = typed_array_species_create(&obj, &[count.into()], context)?;

        if count > 0 {
            // The species constructor may have resized the buffer.
            let len = typed_array_length(&obj).ok_or_else(|| {
                JsNativeError::typ().with_message("typed array is detached or out of bounds")
            })?;
            let finale = min(finale, len);
            let mut n = 0u64;
            for k in k..finale {
                let k_value = obj.get(k, context)?;
                a.set(n, k_value, true, context)?;
                n += 1;
            }
        }

        Ok(a.into())
    }

    /// `%TypedArray%.prototype.subarray ( begin, end )`
    ///
    /// Returns a view over the same buffer.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%.prototype.subarray
    fn subarray(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // Unlike most methods, subarray works on out-of-bounds views.
        let obj = this
            .as_object()
            .filter(|obj| obj.borrow().as_integer_indexed().is_some())
            .cloned()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a typed array"))?;
        let len = typed_array_length(&obj).unwrap_or(0);

        let (buffer, kind, byte_offset) = {
            let borrowed = obj.borrow();
            let view = borrowed.as_integer_indexed().expect("validated above");
            (
                view.viewed_array_buffer().clone(),
                view.kind(),
                view.byte_offset(),
            )
        };

        let begin = Array::get_relative_start(context, args.get_or_undefined(0), len)?;
        let finale = Array::get_relative_end(context, args.get_or_undefined(1), len)?;
        let new_length = finale.saturating_sub(begin);

        let begin_byte_offset = byte_offset + begin * kind.element_size();

        typed_array_species_create(
            &obj,
            &[
                buffer.into(),
                begin_byte_offset.into(),
                new_length.into(),
            ],
            context,
        )
        .map(JsValue::from)
    }

    /// `%TypedArray%.prototype.sort ( comparefn )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%typedarray%.prototype.sort
    fn sort(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
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

        let (obj, len) = Self::validate(this)?;

        let mut items: Vec<JsValue> = (0..len)
            .map(|k| integer_indexed_element_get(&obj, k as f64).unwrap_or_default())
            .collect();

        Self::sort_values(&mut items, comparefn.as_ref(), context)?;

        for (k, value) in items.into_iter().enumerate() {
            integer_indexed_element_set(&obj, k as f64, &value, context)?;
        }

        Ok(this.clone())
    }

    /// Sorts element values with the `TypedArraySortCompare` semantics.
    fn sort_values(
        items: &mut [JsValue],
        comparefn: Option<&JsObject>,
        context: &mut Context,
    ) -> JsResult<()> {
        match comparefn {
            Some(comparefn) => {
                let mut err: Option<crate::JsError> = None;
                items.sort_by(|x, y| {
                    if err.is_some() {
                        return Ordering::Equal;
                    }
                    let v = match comparefn
                        .call(&JsValue::undefined(), &[x.clone(), y.clone()], context)
                        .and_then(|v| v.to_number(context))
                    {
                        Ok(v) => v,
                        Err(e) => {
                            err = Some(e);
                            return Ordering::Equal;
                        }
                    };
                    v.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
                });
                if let Some(err) = err {
                    return Err(err);
                }
            }
            None => {
                items.sort_by(Self::default_numeric_compare);
            }
        }
        Ok(())
    }

    /// The default element ordering: numeric ascending, NaN last, -0 before
    /// +0, and bigints by value.
    fn default_numeric_compare(x: &JsValue, y: &JsValue) -> Ordering {
        match (x, y) {
            (JsValue::BigInt(x), JsValue::BigInt(y)) => x.cmp(y),
            (JsValue::Number(x), JsValue::Number(y)) => match (x.is_nan(), y.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    if *x == 0.0 && *y == 0.0 {
                        // -0 sorts before +0.
                        match (x.is_sign_negative(), y.is_sign_negative()) {
                            (true, false) => Ordering::Less,
                            (false, true) => Ordering::Greater,
                            _ => Ordering::Equal,
                        }
                    } else {
                        x.partial_cmp(y).unwrap_or(Ordering::Equal)
                    }
                }
            },
            _ => Ordering::Equal,
        }
    }

    /// `%TypedArray%.prototype.toReversed ( )`
    fn to_reversed(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        // 3. Let A be ? TypedArrayCreateSameType(O, « 𝔽(length) »).
        let a = typed_array_create_same_type(&obj, len, context)?;

        for k in 0..len {
            let from_value = integer_indexed_element_get(&obj, (len - k - 1) as f64)
                .unwrap_or_default();
            integer_indexed_element_set(&a, k as f64, &from_value, context)?;
        }
        Ok(a.into())
    }

    /// `%TypedArray%.prototype.toSorted ( comparefn )`
    fn to_sorted(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let comparefn = match args.get_or_undefined(0) {
            JsValue::Object(obj) if obj.is_callable() => Some(obj.clone()),
            JsValue::Undefined => None,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("the comparison function must be either a function or undefined")
                    .into())
            }
        };

        let (obj, len) = Self::validate(this)?;
        let a = typed_array_create_same_type(&obj, len, context)?;

        let mut items: Vec<JsValue> = (0..len)
            .map(|k| integer_indexed_element_get(&obj, k as f64).unwrap_or_default())
            .collect();
        Self::sort_values(&mut items, comparefn.as_ref(), context)?;

        for (k, value) in items.into_iter().enumerate() {
            integer_indexed_element_set(&a, k as f64, &value, context)?;
        }
        Ok(a.into())
    }

    /// `%TypedArray%.prototype.with ( index, value )`
    fn with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (obj, len) = Self::validate(this)?;

        let relative_index = args.get_or_undefined(0).to_integer_or_infinity(context)?;
        let actual_index = match relative_index {
            IntegerOrInfinity::Integer(i) if i >= 0 => i,
            IntegerOrInfinity::Integer(i) => len as i64 + i,
            _ => -1,
        };

        // 3-6. Convert the value by content type.
        let content_type = {
            let borrowed = obj.borrow();
            borrowed
                .as_integer_indexed()
                .expect("the receiver was validated above")
                .kind()
                .content_type()
        };
        let value: JsValue = match content_type {
            ContentType::BigInt => args.get_or_undefined(1).to_bigint(context)?.into(),
            ContentType::Number => args.get_or_undefined(1).to_number(context)?.into(),
        };

        // 7. If ! IsValidIntegerIndex(O, 𝔽(actualIndex)) is false, throw a RangeError exception.
        if actual_index < 0 || actual_index as u64 >= len {
            return Err(JsNativeError::range()
                .with_message("invalid index for TypedArray.prototype.with")
                .into());
        }

        let a = typed_array_create_same_type(&obj, len, context)?;
        for k in 0..len {
            let from_value = if k == actual_index as u64 {
                value.clone()
            } else {
                integer_indexed_element_get(&obj, k as f64).unwrap_or_default()
            };
            integer_indexed_element_set(&a, k as f64, &from_value, context)?;
        }
        Ok(a.into())
    }
}

/// Maps an element kind to its standard constructor accessor.
pub(crate) fn standard_constructor_of(
    kind: TypedArrayKind,
) -> fn(&StandardConstructors) -> &StandardConstructor {
    match kind {
        TypedArrayKind::Int8 => StandardConstructors::typed_int8_array,
        TypedArrayKind::Uint8 => StandardConstructors::typed_uint8_array,
        TypedArrayKind::Uint8Clamped => StandardConstructors::typed_uint8clamped_array,
        TypedArrayKind::Int16 => StandardConstructors::typed_int16_array,
        TypedArrayKind::Uint16 => StandardConstructors::typed_uint16_array,
        TypedArrayKind::Int32 => StandardConstructors::typed_int32_array,
        TypedArrayKind::Uint32 => StandardConstructors::typed_uint32_array,
        TypedArrayKind::Float32 => StandardConstructors::typed_float32_array,
        TypedArrayKind::Float64 => StandardConstructors::typed_float64_array,
        TypedArrayKind::BigInt64 => StandardConstructors::typed_bigint64_array,
        TypedArrayKind::BigUint64 => StandardConstructors::typed_biguint64_array,
    }
}

/// Abstract operation `TypedArrayCreate ( constructor, argumentList )`:
/// constructs and validates a new typed array.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-typedarraycreate
pub(crate) fn typed_array_create(
    constructor: &JsObject,
    args: &[JsValue],
    context: &mut Context,
) -> JsResult<JsObject> {
    // 1. Let newTypedArray be ? Construct(constructor, argumentList).
    let new_typed_array = constructor.construct(args, Some(constructor), context)?;

    // 2. Perform ? ValidateTypedArray(newTypedArray).
    if new_typed_array.borrow().as_integer_indexed().is_none() {
        return Err(JsNativeError::typ()
            .with_message("constructor did not return a typed array")
            .into());
    }
    let length = typed_array_length(&new_typed_array).ok_or_else(|| {
        JsNativeError::typ().with_message("typed array is detached or out of bounds")
    })?;

    // 3. If the length argument was a number, the new array must be at
    //    least that long.
    if args.len() == 1 {
        if let Some(requested) = args[0].as_number() {
            if (length as f64) < requested {
                return Err(JsNativeError::typ()
                    .with_message("constructor returned a typed array that is too small")
                    .into());
            }
        }
    }

    // 4. Return newTypedArray.
    Ok(new_typed_array)
}

/// Abstract operation `TypedArraySpeciesCreate ( exemplar, argumentList )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-typedarray-species-create
pub(crate) fn typed_array_species_create(
    exemplar: &JsObject,
    args: &[JsValue],
    context: &mut Context,
) -> JsResult<JsObject> {
    // 1-2. Let constructor be ? SpeciesConstructor(exemplar, the default).
    let kind = exemplar
        .borrow()
        .as_integer_indexed()
        .expect("the exemplar is always a typed array")
        .kind();
    let constructor = exemplar.species_constructor(standard_constructor_of(kind), context)?;

    // 3. Let result be ? TypedArrayCreate(constructor, argumentList).
    let result = typed_array_create(&constructor, args, context)?;

    // 4. The content types must agree.
    let result_kind = result
        .borrow()
        .as_integer_indexed()
        .expect("TypedArrayCreate already validated the result")
        .kind();
    if result_kind.content_type() != kind.content_type() {
        return Err(JsNativeError::typ()
            .with_message("species constructor returned a typed array of a different content type")
            .into());
    }

    // 5. Return result.
    Ok(result)
}

/// Abstract operation `TypedArrayCreateSameType ( exemplar, length )`: uses
/// the default constructor of the exemplar's kind, ignoring species.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-typedarray-create-same-type
pub(crate) fn typed_array_create_same_type(
    exemplar: &JsObject,
    length: u64,
    context: &mut Context,
) -> JsResult<JsObject> {
    let kind = exemplar
        .borrow()
        .as_integer_indexed()
        .expect("the exemplar is always a typed array")
        .kind();
    let constructor = standard_constructor_of(kind)(context.intrinsics().constructors())
        .constructor();
    typed_array_create(&constructor, &[length.into()], context)
}

/// Allocates a typed array of the kind with a fresh buffer of `length`
/// elements.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-allocatetypedarray
fn allocate_typed_array(
    kind: TypedArrayKind,
    prototype: JsObject,
    length: u64,
    context: &mut Context,
) -> JsResult<JsObject> {
    let byte_length = length
        .checked_mul(kind.element_size())
        .filter(|&l| l <= i64::MAX as u64)
        .ok_or_else(|| {
            JsNativeError::range().with_message("typed array allocation is too large")
        })?;

    let buffer = JsObject::from_proto_and_data(
        context.intrinsics().constructors().array_buffer().prototype(),
        ObjectData::array_buffer(ArrayBuffer::with_byte_length(byte_length, None)),
    );

    Ok(JsObject::from_proto_and_data(
        prototype,
        ObjectData::integer_indexed(IntegerIndexed::new(buffer, kind, 0, Some(length))),
    ))
}

/// The shared constructor behavior of the concrete typed array kinds.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-typedarray-constructors
fn typed_array_constructor(
    kind: TypedArrayKind,
    new_target: &JsValue,
    args: &[JsValue],
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If NewTarget is undefined, throw a TypeError exception.
    if new_target.is_undefined() {
        return Err(JsNativeError::typ()
            .with_message("calling a builtin TypedArray constructor without new is forbidden")
            .into());
    }

    let prototype =
        get_prototype_from_constructor(new_target, standard_constructor_of(kind), context)?;

    // 3. If args is empty, allocate with length 0.
    let Some(first) = args.first() else {
        return Ok(allocate_typed_array(kind, prototype, 0, context)?.into());
    };

    let Some(first_obj) = first.as_object().cloned() else {
        // 5.b. Let elementLength be ? ToIndex(firstArgument).
        let length = first.to_index(context)?;
        return Ok(allocate_typed_array(kind, prototype, length, context)?.into());
    };

    // 6.b. If firstArgument has a [[TypedArrayName]] internal slot:
    //      initialize from the typed array.
    let source_view = first_obj.borrow().as_integer_indexed().is_some();
    if source_view {
        let source_length = typed_array_length(&first_obj).ok_or_else(|| {
            JsNativeError::typ().with_message("typed array is detached or out of bounds")
        })?;
        let source_kind = first_obj
            .borrow()
            .as_integer_indexed()
            .expect("checked above")
            .kind();
        if source_kind.content_type() != kind.content_type() {
            return Err(JsNativeError::typ()
                .with_message("cannot convert between BigInt and Number typed arrays")
                .into());
        }

        let new_obj = allocate_typed_array(kind, prototype, source_length, context)?;
        for k in 0..source_length {
            let value = integer_indexed_element_get(&first_obj, k as f64).unwrap_or_default();
            integer_indexed_element_set(&new_obj, k as f64, &value, context)?;
        }
        return Ok(new_obj.into());
    }

    // 6.c. If firstArgument has an [[ArrayBufferData]] internal slot:
    //      initialize from the buffer.
    let is_buffer = first_obj.borrow().as_array_buffer().is_some();
    if is_buffer {
        let element_size = kind.element_size();

        // `InitializeTypedArrayFromArrayBuffer`:
        // 1. Let offset be ? ToIndex(byteOffset).
        let offset = args.get_or_undefined(1).to_index(context)?;
        // 2. If offset modulo elementSize ≠ 0, throw a RangeError exception.
        if offset % element_size != 0 {
            return Err(JsNativeError::range()
                .with_message("typed array byteOffset must be a multiple of the element size")
                .into());
        }

        let length_arg = args.get_or_undefined(2);
        let explicit_length = if length_arg.is_undefined() {
            None
        } else {
            Some(length_arg.to_index(context)?)
        };

        let (buffer_byte_length, resizable, detached) = {
            let borrowed = first_obj.borrow();
            let buffer = borrowed.as_array_buffer().expect("checked above");
            (
                buffer.byte_length(),
                buffer.max_byte_length().is_some(),
                buffer.is_detached_buffer(),
            )
        };
        if detached {
            return Err(JsNativeError::typ()
                .with_message("cannot create a view over a detached buffer")
                .into());
        }

        let array_length = match explicit_length {
            None => {
                if resizable {
                    // A resizable buffer without an explicit length makes a
                    // length-tracking view.
                    if offset > buffer_byte_length {
                        return Err(JsNativeError::range()
                            .with_message("typed array byteOffset is outside the buffer")
                            .into());
                    }
                    None
                } else {
                    // 7.a. If bufferByteLength modulo elementSize ≠ 0, throw.
                    if buffer_byte_length % element_size != 0 {
                        return Err(JsNativeError::range()
                            .with_message(
                                "buffer length must be a multiple of the element size",
                            )
                            .into());
                    }
                    if offset > buffer_byte_length {
                        return Err(JsNativeError::range()
                            .with_message("typed array byteOffset is outside the buffer")
                            .into());
                    }
                    Some((buffer_byte_length - offset) / element_size)
                }
            }
            Some(length) => {
                // 8.b. If offset + newByteLength > bufferByteLength, throw.
                let new_byte_length = length * element_size;
                if offset + new_byte_length > buffer_byte_length {
                    return Err(JsNativeError::range()
                        .with_message("typed array view does not fit in the buffer")
                        .into());
                }
                Some(length)
            }
        };

        return Ok(JsObject::from_proto_and_data(
            prototype,
            ObjectData::integer_indexed(IntegerIndexed::new(
                first_obj,
                kind,
                offset,
                array_length,
            )),
        )
        .into());
    }

    // 6.d. Initialize from an iterable or array-like object.
    let using_iterator = first
        .get_method(WellKnownSymbols::iterator(), context)?
        .map(JsValue::from);

    let values: Vec<JsValue> = if let Some(using_iterator) = using_iterator {
        iterable_to_list(context, first, Some(using_iterator))?
    } else {
        let len = first_obj.length_of_array_like(context)?;
        let mut values = Vec::with_capacity(len as usize);
        for k in 0..len {
            values.push(first_obj.get(k, context)?);
        }
        values
    };

    let new_obj = allocate_typed_array(kind, prototype, values.len() as u64, context)?;
    for (k, value) in values.iter().enumerate() {
        integer_indexed_element_set(&new_obj, k as f64, value, context)?;
    }
    Ok(new_obj.into())
}

macro_rules! typed_array_builtin {
    ( $(#[$outer:meta])* $name:ident, $kind:expr, $standard:expr ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy)]
        pub(crate) struct $name;

        impl BuiltIn for $name {
            const NAME: &'static str = $kind.js_name();

            fn init(context: &mut Context) -> Option<JsValue> {
                let typed_array_constructor_obj =
                    context.intrinsics().constructors().typed_array().constructor();
                let typed_array_prototype =
                    context.intrinsics().constructors().typed_array().prototype();

                let attribute =
                    Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
                let object = ConstructorBuilder::with_standard_constructor(
                    context,
                    Self::constructor,
                    $standard(context.intrinsics().constructors()).clone(),
                )
                .name(Self::NAME)
                .length(3)
                .custom_prototype(typed_array_constructor_obj)
                .inherit(typed_array_prototype)
                .static_property("BYTES_PER_ELEMENT", $kind.element_size(), attribute)
                .property("BYTES_PER_ELEMENT", $kind.element_size(), attribute)
                .build();

                Some(object.into())
            }
        }

        impl $name {
            /// The constructor of this concrete typed array kind.
            pub(crate) fn constructor(
                new_target: &JsValue,
                args: &[JsValue],
                context: &mut Context,
            ) -> JsResult<JsValue> {
                typed_array_constructor($kind, new_target, args, context)
            }
        }
    };
}

typed_array_builtin!(
    /// The `Int8Array` built-in.
    Int8Array,
    TypedArrayKind::Int8,
    StandardConstructors::typed_int8_array
);
typed_array_builtin!(
    /// The `Uint8Array` built-in.
    Uint8Array,
    TypedArrayKind::Uint8,
    StandardConstructors::typed_uint8_array
);
typed_array_builtin!(
    /// The `Uint8ClampedArray` built-in.
    Uint8ClampedArray,
    TypedArrayKind::Uint8Clamped,
    StandardConstructors::typed_uint8clamped_array
);
typed_array_builtin!(
    /// The `Int16Array` built-in.
    Int16Array,
    TypedArrayKind::Int16,
    StandardConstructors::typed_int16_array
);
typed_array_builtin!(
    /// The `Uint16Array` built-in.
    Uint16Array,
    TypedArrayKind::Uint16,
    StandardConstructors::typed_uint16_array
);
typed_array_builtin!(
    /// The `Int32Array` built-in.
    Int32Array,
    TypedArrayKind::Int32,
    StandardConstructors::typed_int32_array
);
typed_array_builtin!(
    /// The `Uint32Array` built-in.
    Uint32Array,
    TypedArrayKind::Uint32,
    StandardConstructors::typed_uint32_array
);
typed_array_builtin!(
    /// The `Float32Array` built-in.
    Float32Array,
    TypedArrayKind::Float32,
    StandardConstructors::typed_float32_array
);
typed_array_builtin!(
    /// The `Float64Array` built-in.
    Float64Array,
    TypedArrayKind::Float64,
    StandardConstructors::typed_float64_array
);
typed_array_builtin!(
    /// The `BigInt64Array` built-in.
    BigInt64Array,
    TypedArrayKind::BigInt64,
    StandardConstructors::typed_bigint64_array
);
typed_array_builtin!(
    /// The `BigUint64Array` built-in.
    BigUint64Array,
    TypedArrayKind::BigUint64,
    StandardConstructors::typed_biguint64_array
);
