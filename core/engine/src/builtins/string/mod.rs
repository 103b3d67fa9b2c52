//! The global `String` object.
//!
//! Bound strings keep their characters virtual: the exotic object resolves
//! indexed properties lazily, so boxing a string never materializes one
//! descriptor per character.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-string-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String

pub mod string_iterator;
#[cfg(test)]
mod tests;

use crate::{
    builtins::{string::string_iterator::StringIterator, BuiltIn, RegExp},
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::{Attribute, PropertyDescriptor},
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs},
    Context, JsResult, JsString, JsValue,
};
use icu_normalizer::{ComposingNormalizer, DecomposingNormalizer};
use std::cmp::{max, min};

/// JavaScript `String` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct String;

/// The placement of `String.prototype.padStart`/`padEnd` filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Start,
    End,
}

impl BuiltIn for String {
    const NAME: &'static str = "String";

    fn init(context: &mut Context) -> Option<JsValue> {
        let symbol_iterator = WellKnownSymbols::iterator();

        let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
        let mut builder = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().string().clone(),
        )
        .name(Self::NAME)
        .length(1);

        builder
            .property("length", 0, attribute)
            .method(Self::at, "at", 1)
            .method(Self::char_at, "charAt", 1)
            .method(Self::char_code_at, "charCodeAt", 1)
            .method(Self::code_point_at, "codePointAt", 1)
            .method(Self::concat, "concat", 1)
            .method(Self::ends_with, "endsWith", 1)
            .method(Self::includes, "includes", 1)
            .method(Self::index_of, "indexOf", 1)
            .method(Self::last_index_of, "lastIndexOf", 1)
            .method(Self::locale_compare, "localeCompare", 1)
            .method(Self::r#match, "match", 1)
            .method(Self::match_all, "matchAll", 1)
            .method(Self::normalize, "normalize", 0)
            .method(Self::pad_end, "padEnd", 1)
            .method(Self::pad_start, "padStart", 1)
            .method(Self::repeat, "repeat", 1)
            .method(Self::replace, "replace", 2)
            .method(Self::replace_all, "replaceAll", 2)
            .method(Self::search, "search", 1)
            .method(Self::slice, "slice", 2)
            .method(Self::split, "split", 2)
            .method(Self::starts_with, "startsWith", 1)
            .method(Self::substring, "substring", 2)
            .method(Self::to_locale_lowercase, "toLocaleLowerCase", 0)
            .method(Self::to_locale_uppercase, "toLocaleUpperCase", 0)
            .method(Self::to_lowercase, "toLowerCase", 0)
            .method(Self::to_string, "toString", 0)
            .method(Self::to_uppercase, "toUpperCase", 0)
            .method(Self::trim, "trim", 0)
            .method(Self::trim_end, "trimEnd", 0)
            .method(Self::trim_start, "trimStart", 0)
            .method(Self::value_of, "valueOf", 0)
            .method(Self::iterator, symbol_iterator, 0)
            .static_method(Self::from_char_code, "fromCharCode", 1)
            .static_method(Self::from_code_point, "fromCodePoint", 1)
            .static_method(Self::raw, "raw", 1);

        #[cfg(feature = "annex-b")]
        {
            builder
                .method(Self::substr, "substr", 2)
                .method(Self::anchor, "anchor", 1)
                .method(Self::big, "big", 0)
                .method(Self::blink, "blink", 0)
                .method(Self::bold, "bold", 0)
                .method(Self::fixed, "fixed", 0)
                .method(Self::fontcolor, "fontcolor", 1)
                .method(Self::fontsize, "fontsize", 1)
                .method(Self::italics, "italics", 0)
                .method(Self::link, "link", 1)
                .method(Self::small, "small", 0)
                .method(Self::strike, "strike", 0)
                .method(Self::sub, "sub", 0)
                .method(Self::sup, "sup", 0)
                .static_method(Self::escape, "escape", 1);
        }

        Some(builder.build().into())
    }
}

impl String {
    /// Gets the string value of a `this` that is either a string primitive
    /// or a `String` wrapper object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thisstringvalue
    fn this_string_value(this: &JsValue) -> JsResult<JsString> {
        match this {
            JsValue::String(string) => Ok(string.clone()),
            JsValue::Object(obj) => obj.borrow().as_string().ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a string")
                    .into()
            }),
            _ => Err(JsNativeError::typ()
                .with_message("'this' is not a string")
                .into()),
        }
    }

    /// `String ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string-constructor-string-value
    pub(crate) fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If value is not present, let s be the empty String.
        let string = match args.first() {
            None => js_string!(),
            // 2.a. If NewTarget is undefined and Type(value) is Symbol,
            //      return SymbolDescriptiveString(value).
            Some(JsValue::Symbol(symbol)) if new_target.is_undefined() => {
                return Ok(symbol.descriptive_string().into())
            }
            // 2.b. Let s be ? ToString(value).
            Some(value) => value.to_string(context)?,
        };

        // 3. If NewTarget is undefined, return s.
        if new_target.is_undefined() {
            return Ok(string.into());
        }

        // 4. Return ! StringCreate(s, ? GetPrototypeFromConstructor(NewTarget, "%String.prototype%")).
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::string, context)?;
        Ok(Self::string_create(string, prototype).into())
    }

    /// Abstract operation `StringCreate ( value, prototype )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-stringcreate
    pub(crate) fn string_create(value: JsString, prototype: JsObject) -> JsObject {
        let len = value.len();
        let object = JsObject::from_proto_and_data(prototype, ObjectData::string(value));
        object.insert_property(
            "length",
            PropertyDescriptor::builder()
                .value(len)
                .writable(false)
                .enumerable(false)
                .configurable(false),
        );
        object
    }

    /// `String.fromCharCode ( ...codeUnits )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.fromcharcode
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/fromCharCode
    fn from_char_code(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Convert every argument with ToUint16 and collect the units.
        let mut elements = Vec::with_capacity(args.len());
        for next_cu in args {
            let number = next_cu.to_number(context)?;
            elements.push(crate::value::f64_to_uint32(number) as u16);
        }

        // 3. Return the String value whose code units are the elements.
        Ok(JsString::from(elements).into())
    }

    /// `String.fromCodePoint ( ...codePoints )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.fromcodepoint
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/fromCodePoint
    fn from_code_point(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let result be the empty String.
        let mut result = Vec::with_capacity(args.len());

        // 2. For each element next of codePoints, do
        for next_cp in args {
            // a. Let nextCP be ? ToNumber(next).
            let number = next_cp.to_number(context)?;

            // b. If ! IsIntegralNumber(nextCP) is false, throw a RangeError exception.
            // c. If ℝ(nextCP) < 0 or ℝ(nextCP) > 0x10FFFF, throw a RangeError exception.
            if number.trunc() != number || !(0.0..=1_114_111.0).contains(&number) {
                return Err(JsNativeError::range()
                    .with_message(format!("invalid code point: {number}"))
                    .into());
            }

            // d. Set result to the string-concatenation of result and
            //    ! UTF16EncodeCodePoint(ℝ(nextCP)).
            let cp = number as u32;
            match char::from_u32(cp) {
                Some(c) => {
                    let mut buf = [0u16; 2];
                    result.extend_from_slice(c.encode_utf16(&mut buf));
                }
                // Unpaired surrogates are valid code points for strings.
                None => result.push(cp as u16),
            }
        }

        // 3. Return result.
        Ok(JsString::from(result).into())
    }

    /// `String.raw ( template, ...substitutions )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.raw
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/raw
    fn raw(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let substitutions = args.get(1..).unwrap_or(&[]);

        // 1. Let numberOfSubstitutions be the number of elements in substitutions.
        let number_of_substitutions = substitutions.len() as u64;

        // 2. Let cooked be ? ToObject(template).
        let cooked = args.get_or_undefined(0).to_object(context)?;

        // 3. Let raw be ? ToObject(? Get(cooked, "raw")).
        let raw = cooked.get("raw", context)?.to_object(context)?;

        // 4. Let literalSegments be ? LengthOfArrayLike(raw).
        let literal_segments = raw.length_of_array_like(context)?;

        // 5. If literalSegments ≤ 0, return the empty String.
        if literal_segments == 0 {
            return Ok(js_string!().into());
        }

        // 6-7. Stitch the segments and substitutions.
        let mut string_elements = Vec::new();
        for next_index in 0..literal_segments {
            // b. Let nextSeg be ? ToString(? Get(raw, nextKey)).
            let next_seg = raw.get(next_index, context)?.to_string(context)?;
            string_elements.extend_from_slice(&next_seg);

            // d. If nextIndex + 1 = literalSegments, return R.
            if next_index + 1 == literal_segments {
                break;
            }

            // e-h. Append the substitution, when present.
            if next_index < number_of_substitutions {
                let next_sub = substitutions[next_index as usize].to_string(context)?;
                string_elements.extend_from_slice(&next_sub);
            }
        }

        Ok(JsString::from(string_elements).into())
    }

    /// `String.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.tostring
    fn to_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisStringValue(this value).
        Ok(Self::this_string_value(this)?.into())
    }

    /// `String.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisStringValue(this value).
        Ok(Self::this_string_value(this)?.into())
    }

    /// `String.prototype.at ( index )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.at
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/at
    fn at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        // 2. Let S be ? ToString(O).
        let string = this.require_object_coercible()?.to_string(context)?;
        let len = string.len() as i64;

        // 3-6. Resolve the relative index.
        let relative_index = args.get_or_undefined(0).to_integer_or_infinity(context)?;
        let k = match relative_index {
            IntegerOrInfinity::Integer(i) if i >= 0 && i < len => i,
            IntegerOrInfinity::Integer(i) if i < 0 && len + i >= 0 => len + i,
            // 7. If k < 0 or k ≥ len, return undefined.
            _ => return Ok(JsValue::undefined()),
        };

        // 8. Return the substring of S from k to k + 1.
        Ok(string.substring(k as usize, k as usize + 1).into())
    }

    /// `String.prototype.charAt ( pos )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.charat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/charAt
    fn char_at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let position = args.get_or_undefined(0).to_integer_or_infinity(context)?;

        match position {
            IntegerOrInfinity::Integer(i) if i >= 0 && (i as usize) < string.len() => {
                Ok(string.substring(i as usize, i as usize + 1).into())
            }
            // 4. If position < 0 or position ≥ size, return the empty String.
            _ => Ok(js_string!().into()),
        }
    }

    /// `String.prototype.charCodeAt ( pos )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.charcodeat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/charCodeAt
    fn char_code_at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let position = args.get_or_undefined(0).to_integer_or_infinity(context)?;

        match position {
            IntegerOrInfinity::Integer(i) if i >= 0 && (i as usize) < string.len() => {
                Ok(u32::from(string[i as usize]).into())
            }
            // 4. If position < 0 or position ≥ size, return NaN.
            _ => Ok(JsValue::nan()),
        }
    }

    /// `String.prototype.codePointAt ( pos )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.codepointat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/codePointAt
    fn code_point_at(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let position = args.get_or_undefined(0).to_integer_or_infinity(context)?;

        match position {
            IntegerOrInfinity::Integer(i) if i >= 0 && (i as usize) < string.len() => Ok(string
                .code_point_at(i as usize)
                .expect("the position was checked to be in bounds")
                .as_u32()
                .into()),
            // 4. If position < 0 or position ≥ size, return undefined.
            _ => Ok(JsValue::undefined()),
        }
    }

    /// `String.prototype.concat ( ...args )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.concat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/concat
    fn concat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        let mut result: Vec<u16> = string.as_slice().to_vec();
        for arg in args {
            result.extend_from_slice(&arg.to_string(context)?);
        }

        Ok(JsString::from(result).into())
    }

    /// `String.prototype.endsWith ( searchString [ , endPosition ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.endswith
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/endsWith
    fn ends_with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        // 3-5. A RegExp search string is a TypeError.
        let search_string = args.get_or_undefined(0);
        if RegExp::is_reg_exp(search_string, context)? {
            return Err(JsNativeError::typ()
                .with_message("endsWith argument must not be a regexp")
                .into());
        }
        let search_string = search_string.to_string(context)?;

        // 6-8. Resolve the end position.
        let len = string.len();
        let end = args.get_or_undefined(1);
        let end = if end.is_undefined() {
            len
        } else {
            end.to_integer_or_infinity(context)?
                .clamp_finite(0, len as i64) as usize
        };

        // 9-12. Compare the slice.
        if search_string.len() > end {
            return Ok(false.into());
        }
        let start = end - search_string.len();
        Ok((&string[start..end] == search_string.as_slice()).into())
    }

    /// `String.prototype.startsWith ( searchString [ , position ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.startswith
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/startsWith
    fn starts_with(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        let search_string = args.get_or_undefined(0);
        if RegExp::is_reg_exp(search_string, context)? {
            return Err(JsNativeError::typ()
                .with_message("startsWith argument must not be a regexp")
                .into());
        }
        let search_string = search_string.to_string(context)?;

        let len = string.len();
        let start = args
            .get_or_undefined(1)
            .to_integer_or_infinity(context)?
            .clamp_finite(0, len as i64) as usize;

        if start + search_string.len() > len {
            return Ok(false.into());
        }
        Ok((&string[start..start + search_string.len()] == search_string.as_slice()).into())
    }

    /// `String.prototype.includes ( searchString [ , position ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.includes
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/includes
    fn includes(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        let search_string = args.get_or_undefined(0);
        if RegExp::is_reg_exp(search_string, context)? {
            return Err(JsNativeError::typ()
                .with_message("includes argument must not be a regexp")
                .into());
        }
        let search_string = search_string.to_string(context)?;

        let start = args
            .get_or_undefined(1)
            .to_integer_or_infinity(context)?
            .clamp_finite(0, string.len() as i64) as usize;

        Ok(string.index_of(&search_string, start).is_some().into())
    }

    /// `String.prototype.indexOf ( searchString [ , position ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.indexof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/indexOf
    fn index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let search_string = args.get_or_undefined(0).to_string(context)?;
        let position = args
            .get_or_undefined(1)
            .to_integer_or_infinity(context)?
            .clamp_finite(0, string.len() as i64) as usize;

        Ok(string
            .index_of(&search_string, position)
            .map_or(-1i64, |i| i as i64)
            .into())
    }

    /// `String.prototype.lastIndexOf ( searchString [ , position ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.lastindexof
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/lastIndexOf
    fn last_index_of(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let search_string = args.get_or_undefined(0).to_string(context)?;

        // 4-6. A NaN position searches from the end.
        let num_pos = args.get_or_undefined(1).to_number(context)?;
        let position = if num_pos.is_nan() {
            string.len()
        } else {
            IntegerOrInfinity::from(num_pos).clamp_finite(0, string.len() as i64) as usize
        };

        Ok(string
            .last_index_of(&search_string, position)
            .map_or(-1i64, |i| i as i64)
            .into())
    }

    /// `String.prototype.localeCompare ( that )`
    ///
    /// Only the invariant culture is supported: the comparison is ordinal
    /// over code units.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.localecompare
    fn locale_compare(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let that = args.get_or_undefined(0).to_string(context)?;

        Ok(match string.cmp(&that) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        }
        .into())
    }

    /// `String.prototype.match ( regexp )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.match
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/match
    pub(crate) fn r#match(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        // 2. If regexp is neither undefined nor null, then
        let regexp = args.get_or_undefined(0);
        if !regexp.is_null_or_undefined() {
            // a. Let matcher be ? GetMethod(regexp, @@match).
            if let Some(matcher) = regexp.get_method(WellKnownSymbols::r#match(), context)? {
                // b. If matcher is not undefined, return ? Call(matcher, regexp, « O »).
                return matcher.call(regexp, &[o.clone()], context);
            }
        }

        // 3. Let S be ? ToString(O).
        let s = o.to_string(context)?;

        // 4. Let rx be ? RegExpCreate(regexp, undefined).
        let rx = RegExp::create(regexp, &JsValue::undefined(), context)?;

        // 5. Return ? Invoke(rx, @@match, « S »).
        rx.invoke(WellKnownSymbols::r#match(), &[s.into()], context)
    }

    /// `String.prototype.matchAll ( regexp )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.matchall
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/matchAll
    pub(crate) fn match_all(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        // 2. If regexp is neither undefined nor null, then
        let regexp = args.get_or_undefined(0);
        if !regexp.is_null_or_undefined() {
            // a. Let isRegExp be ? IsRegExp(regexp).
            if RegExp::is_reg_exp(regexp, context)? {
                // b. If isRegExp is true, then
                // i. Let flags be ? Get(regexp, "flags").
                let flags = regexp
                    .as_object()
                    .expect("regexps are always objects")
                    .get("flags", context)?;
                // ii. Perform ? RequireObjectCoercible(flags).
                let flags = flags.require_object_coercible()?.to_string(context)?;
                // iii. If ? ToString(flags) does not contain "g", throw a TypeError exception.
                if !flags.contains(&(u16::from(b'g'))) {
                    return Err(JsNativeError::typ()
                        .with_message("matchAll requires a global regular expression")
                        .into());
                }
            }
            // c. Let matcher be ? GetMethod(regexp, @@matchAll).
            if let Some(matcher) = regexp.get_method(WellKnownSymbols::match_all(), context)? {
                // d. If matcher is not undefined, return ? Call(matcher, regexp, « O »).
                return matcher.call(regexp, &[o.clone()], context);
            }
        }

        // 3. Let S be ? ToString(O).
        let s = o.to_string(context)?;

        // 4. Let rx be ? RegExpCreate(regexp, "g").
        let rx = RegExp::create(regexp, &js_string!("g").into(), context)?;

        // 5. Return ? Invoke(rx, @@matchAll, « S »).
        rx.invoke(WellKnownSymbols::match_all(), &[s.into()], context)
    }

    /// `String.prototype.normalize ( [ form ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.normalize
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/normalize
    fn normalize(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        // 3. If f is not one of "NFC", "NFD", "NFKC", or "NFKD", throw a RangeError exception.
        let form = args.get_or_undefined(0);
        let form = if form.is_undefined() {
            js_string!("NFC")
        } else {
            form.to_string(context)?
        };

        let normalized = if &form == "NFC" {
            ComposingNormalizer::new_nfc().normalize_utf16(&string)
        } else if &form == "NFD" {
            DecomposingNormalizer::new_nfd().normalize_utf16(&string)
        } else if &form == "NFKC" {
            ComposingNormalizer::new_nfkc().normalize_utf16(&string)
        } else if &form == "NFKD" {
            DecomposingNormalizer::new_nfkd().normalize_utf16(&string)
        } else {
            return Err(JsNativeError::range()
                .with_message("normalization form must be one of NFC, NFD, NFKC, NFKD")
                .into());
        };

        // 4. Return the String value that is the result of normalizing S.
        Ok(JsString::from(normalized).into())
    }

    /// `String.prototype.padEnd ( maxLength [ , fillString ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.padend
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/padEnd
    fn pad_end(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::string_pad(this, args, Placement::End, context)
    }

    /// `String.prototype.padStart ( maxLength [ , fillString ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.padstart
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/padStart
    fn pad_start(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::string_pad(this, args, Placement::Start, context)
    }

    /// Abstract operation `StringPad ( O, maxLength, fillString, placement )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-stringpad
    fn string_pad(
        this: &JsValue,
        args: &[JsValue],
        placement: Placement,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let S be ? ToString(O).
        let string = this.require_object_coercible()?.to_string(context)?;

        // 2. Let intMaxLength be ℝ(? ToLength(maxLength)).
        let int_max_length = args.get_or_undefined(0).to_length(context)?;

        // 3-4. If intMaxLength ≤ stringLength, return S.
        let string_length = string.len() as u64;
        if int_max_length <= string_length {
            return Ok(string.into());
        }

        // 5-6. Resolve the filler.
        let fill_string = args.get_or_undefined(1);
        let filler = if fill_string.is_undefined() {
            js_string!(" ")
        } else {
            fill_string.to_string(context)?
        };

        // 7. If filler is the empty String, return S.
        if filler.is_empty() {
            return Ok(string.into());
        }

        // 8. Let fillLen be intMaxLength - stringLength.
        let fill_len = (int_max_length - string_length) as usize;
        let mut truncated_filler: Vec<u16> = Vec::with_capacity(fill_len);
        while truncated_filler.len() < fill_len {
            let remaining = fill_len - truncated_filler.len();
            truncated_filler.extend_from_slice(&filler[..min(filler.len(), remaining)]);
        }

        // 9-10. Stitch the result.
        let result = match placement {
            Placement::Start => {
                let mut result = truncated_filler;
                result.extend_from_slice(&string);
                result
            }
            Placement::End => {
                let mut result: Vec<u16> = string.as_slice().to_vec();
                result.extend_from_slice(&truncated_filler);
                result
            }
        };

        Ok(JsString::from(result).into())
    }

    /// `String.prototype.repeat ( count )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.repeat
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/repeat
    fn repeat(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;

        // 3. If n < 0 or n is +∞, throw a RangeError exception.
        match args.get_or_undefined(0).to_integer_or_infinity(context)? {
            IntegerOrInfinity::Integer(n) if n >= 0 => {
                if string.len() as u64 * n as u64 > u32::MAX as u64 {
                    return Err(JsNativeError::range()
                        .with_message("repeated string exceeds the maximum string length")
                        .into());
                }
                // 4-5. Return the n-fold concatenation.
                Ok(string.repeat(n as usize).into())
            }
            _ => Err(JsNativeError::range()
                .with_message("repeat count must be a positive finite number")
                .into()),
        }
    }

    /// `String.prototype.replace ( searchValue, replaceValue )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.replace
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/replace
    pub(crate) fn replace(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        let search_value = args.get_or_undefined(0);
        let replace_value = args.get_or_undefined(1);

        // 2. If searchValue is neither undefined nor null, then
        if !search_value.is_null_or_undefined() {
            // a. Let replacer be ? GetMethod(searchValue, @@replace).
            if let Some(replacer) = search_value.get_method(WellKnownSymbols::replace(), context)? {
                // b. Return ? Call(replacer, searchValue, « O, replaceValue »).
                return replacer.call(
                    search_value,
                    &[o.clone(), replace_value.clone()],
                    context,
                );
            }
        }

        // 3. Let string be ? ToString(O).
        let string = o.to_string(context)?;

        // 4. Let searchString be ? ToString(searchValue).
        let search_string = search_value.to_string(context)?;

        // 5. Let functionalReplace be IsCallable(replaceValue).
        let functional_replace = replace_value.as_callable().cloned();

        // 6. If functionalReplace is false, set replaceValue to ? ToString(replaceValue).
        let replace_template = match &functional_replace {
            Some(_) => None,
            None => Some(replace_value.to_string(context)?),
        };

        // 7-8. Let position be ? StringIndexOf(string, searchString, 0).
        let Some(position) = string.index_of(&search_string, 0) else {
            // If position is -1, return string.
            return Ok(string.into());
        };

        // 9-10. Compute the replacement text.
        let replacement = if let Some(replace_fn) = functional_replace {
            // a. Let replacement be ? ToString(? Call(replaceValue, undefined,
            //    « searchString, 𝔽(position), string »)).
            replace_fn
                .call(
                    &JsValue::undefined(),
                    &[
                        search_string.clone().into(),
                        position.into(),
                        string.clone().into(),
                    ],
                    context,
                )?
                .to_string(context)?
        } else {
            // b. Let replacement be ! GetSubstitution(searchString, string,
            //    position, captures, undefined, replaceValue).
            get_substitution(
                &search_string,
                &string,
                position,
                &[],
                &JsValue::undefined(),
                &replace_template.expect("the non-functional path always has a template"),
                context,
            )?
        };

        // 11. Return the string-concatenation of preserved, replacement, and
        //     the rest of string.
        let mut result: Vec<u16> = string[..position].to_vec();
        result.extend_from_slice(&replacement);
        result.extend_from_slice(&string[position + search_string.len()..]);
        Ok(JsString::from(result).into())
    }

    /// `String.prototype.replaceAll ( searchValue, replaceValue )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.replaceall
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/replaceAll
    pub(crate) fn replace_all(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        let search_value = args.get_or_undefined(0);
        let replace_value = args.get_or_undefined(1);

        // 2. If searchValue is neither undefined nor null, then
        if !search_value.is_null_or_undefined() {
            // a. Let isRegExp be ? IsRegExp(searchValue).
            if RegExp::is_reg_exp(search_value, context)? {
                // b. If isRegExp is true, then
                // i. Let flags be ? Get(searchValue, "flags").
                let flags = search_value
                    .as_object()
                    .expect("regexps are always objects")
                    .get("flags", context)?;
                // ii. Perform ? RequireObjectCoercible(flags).
                let flags = flags.require_object_coercible()?.to_string(context)?;
                // iii. If ? ToString(flags) does not contain "g", throw a TypeError exception.
                if !flags.contains(&(u16::from(b'g'))) {
                    return Err(JsNativeError::typ()
                        .with_message("replaceAll requires a global regular expression")
                        .into());
                }
            }

            // c. Let replacer be ? GetMethod(searchValue, @@replace).
            if let Some(replacer) = search_value.get_method(WellKnownSymbols::replace(), context)? {
                // d. Return ? Call(replacer, searchValue, « O, replaceValue »).
                return replacer.call(
                    search_value,
                    &[o.clone(), replace_value.clone()],
                    context,
                );
            }
        }

        // 3. Let string be ? ToString(O).
        let string = o.to_string(context)?;
        // 4. Let searchString be ? ToString(searchValue).
        let search_string = search_value.to_string(context)?;

        // 5-6. Resolve the replacement.
        let functional_replace = replace_value.as_callable().cloned();
        let replace_template = match &functional_replace {
            Some(_) => None,
            None => Some(replace_value.to_string(context)?),
        };

        // 7. Let searchLength be the length of searchString.
        let search_length = search_string.len();
        // 8. Let advanceBy be max(1, searchLength).
        let advance_by = max(1, search_length);

        // 9-11. Collect every match position.
        let mut match_positions = Vec::new();
        let mut position = string.index_of(&search_string, 0);
        while let Some(p) = position {
            match_positions.push(p);
            position = string.index_of(&search_string, p + advance_by);
        }

        // 12-14. Stitch the result.
        let mut result: Vec<u16> = Vec::with_capacity(string.len());
        let mut end_of_last_match = 0;
        for p in match_positions {
            result.extend_from_slice(&string[end_of_last_match..p]);
            let replacement = if let Some(replace_fn) = &functional_replace {
                replace_fn
                    .call(
                        &JsValue::undefined(),
                        &[
                            search_string.clone().into(),
                            p.into(),
                            string.clone().into(),
                        ],
                        context,
                    )?
                    .to_string(context)?
            } else {
                get_substitution(
                    &search_string,
                    &string,
                    p,
                    &[],
                    &JsValue::undefined(),
                    replace_template
                        .as_ref()
                        .expect("the non-functional path always has a template"),
                    context,
                )?
            };
            result.extend_from_slice(&replacement);
            end_of_last_match = p + search_length;
        }
        result.extend_from_slice(&string[end_of_last_match..]);

        Ok(JsString::from(result).into())
    }

    /// `String.prototype.search ( regexp )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.search
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/search
    fn search(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        // 2. If regexp is neither undefined nor null, then
        let regexp = args.get_or_undefined(0);
        if !regexp.is_null_or_undefined() {
            // a. Let searcher be ? GetMethod(regexp, @@search).
            if let Some(searcher) = regexp.get_method(WellKnownSymbols::search(), context)? {
                // b. Return ? Call(searcher, regexp, « O »).
                return searcher.call(regexp, &[o.clone()], context);
            }
        }

        // 3. Let string be ? ToString(O).
        let string = o.to_string(context)?;

        // 4. Let rx be ? RegExpCreate(regexp, undefined).
        let rx = RegExp::create(regexp, &JsValue::undefined(), context)?;

        // 5. Return ? Invoke(rx, @@search, « string »).
        rx.invoke(WellKnownSymbols::search(), &[string.into()], context)
    }

    /// `String.prototype.slice ( start, end )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.slice
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/slice
    fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let len = string.len() as i64;

        // 3-5. Clamp the start.
        let from = match args.get_or_undefined(0).to_integer_or_infinity(context)? {
            IntegerOrInfinity::Integer(i) if i < 0 => max(len + i, 0),
            IntegerOrInfinity::Integer(i) => min(i, len),
            IntegerOrInfinity::PositiveInfinity => len,
            IntegerOrInfinity::NegativeInfinity => 0,
        };

        // 6-8. Clamp the end.
        let end = args.get_or_undefined(1);
        let to = if end.is_undefined() {
            len
        } else {
            match end.to_integer_or_infinity(context)? {
                IntegerOrInfinity::Integer(i) if i < 0 => max(len + i, 0),
                IntegerOrInfinity::Integer(i) => min(i, len),
                IntegerOrInfinity::PositiveInfinity => len,
                IntegerOrInfinity::NegativeInfinity => 0,
            }
        };

        // 9-11. Return the substring.
        if from >= to {
            return Ok(js_string!().into());
        }
        Ok(string.substring(from as usize, to as usize).into())
    }

    /// `String.prototype.split ( separator, limit )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.split
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/split
    pub(crate) fn split(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? RequireObjectCoercible(this value).
        let o = this.require_object_coercible()?;

        let separator = args.get_or_undefined(0);
        let limit = args.get_or_undefined(1);

        // 2. If separator is neither undefined nor null, then
        if !separator.is_null_or_undefined() {
            // a. Let splitter be ? GetMethod(separator, @@split).
            if let Some(splitter) = separator.get_method(WellKnownSymbols::split(), context)? {
                // b. Return ? Call(splitter, separator, « O, limit »).
                return splitter.call(separator, &[o.clone(), limit.clone()], context);
            }
        }

        // 3. Let S be ? ToString(O).
        let string = o.to_string(context)?;

        // 4-5. Let lim be the limit, defaulting to 2^32 - 1.
        let lim = if limit.is_undefined() {
            u32::MAX as u64
        } else {
            limit.to_u32(context)? as u64
        };

        // 6. Let R be ? ToString(separator).
        let separator_str = separator.to_string(context)?;

        // 7. If lim = 0, return CreateArrayFromList(« »).
        if lim == 0 {
            return Ok(crate::builtins::Array::create_array_from_list([], context).into());
        }

        // 8. If separator is undefined, return CreateArrayFromList(« S »).
        if separator.is_undefined() {
            return Ok(
                crate::builtins::Array::create_array_from_list([string.into()], context).into(),
            );
        }

        // 9-10. If S or R is empty, special-case per the algorithm.
        if separator_str.is_empty() {
            // 10. Split into single code units, capped by lim.
            let parts: Vec<JsValue> = string
                .iter()
                .take(lim as usize)
                .map(|unit| JsString::from_slice(&[*unit]).into())
                .collect();
            return Ok(crate::builtins::Array::create_array_from_list(parts, context).into());
        }
        if string.is_empty() {
            // 9. If S is the empty String, return CreateArrayFromList(« S »).
            return Ok(
                crate::builtins::Array::create_array_from_list([string.into()], context).into(),
            );
        }

        // 11-17. Walk the separator occurrences.
        let mut substrings: Vec<JsValue> = Vec::new();
        let mut i = 0usize;
        while let Some(j) = string.index_of(&separator_str, i) {
            substrings.push(string.substring(i, j).into());
            if substrings.len() as u64 == lim {
                return Ok(
                    crate::builtins::Array::create_array_from_list(substrings, context).into(),
                );
            }
            i = j + separator_str.len();
        }
        substrings.push(string.substring(i, string.len()).into());

        Ok(crate::builtins::Array::create_array_from_list(substrings, context).into())
    }

    /// `String.prototype.substring ( start, end )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.substring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/substring
    fn substring(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        let len = string.len() as i64;

        // 3. Let intStart be ? ToIntegerOrInfinity(start).
        let int_start = args
            .get_or_undefined(0)
            .to_integer_or_infinity(context)?
            .clamp_finite(0, len);

        // 4. If end is undefined, let intEnd be len.
        let end = args.get_or_undefined(1);
        let int_end = if end.is_undefined() {
            len
        } else {
            end.to_integer_or_infinity(context)?.clamp_finite(0, len)
        };

        // 7-9. Swap a backwards range.
        let from = min(int_start, int_end) as usize;
        let to = max(int_start, int_end) as usize;

        // 10. Return the substring.
        Ok(string.substring(from, to).into())
    }

    /// `String.prototype.toLowerCase ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.tolowercase
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/toLowerCase
    fn to_lowercase(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(js_string!(string.to_std_string_escaped().to_lowercase()).into())
    }

    /// `String.prototype.toUpperCase ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.touppercase
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/toUpperCase
    fn to_uppercase(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(js_string!(string.to_std_string_escaped().to_uppercase()).into())
    }

    /// `String.prototype.toLocaleLowerCase ( )`
    ///
    /// Only the invariant culture is supported, so this matches
    /// `toLowerCase`.
    fn to_locale_lowercase(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::to_lowercase(this, args, context)
    }

    /// `String.prototype.toLocaleUpperCase ( )`
    ///
    /// Only the invariant culture is supported, so this matches
    /// `toUpperCase`.
    fn to_locale_uppercase(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::to_uppercase(this, args, context)
    }

    /// `String.prototype.trim ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.trim
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/trim
    fn trim(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(string.trim().into())
    }

    /// `String.prototype.trimStart ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.trimstart
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/trimStart
    fn trim_start(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(string.trim_start().into())
    }

    /// `String.prototype.trimEnd ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.trimend
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/String/trimEnd
    fn trim_end(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(string.trim_end().into())
    }

    /// `String.prototype [ @@iterator ] ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype-@@iterator
    fn iterator(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = this.require_object_coercible()?.to_string(context)?;
        Ok(StringIterator::create_string_iterator(string, context))
    }
}

// ==== Annex B methods ====

#[cfg(feature = "annex-b")]
impl String {
    /// Abstract operation `CreateHTML ( string, tag, attribute, value )`.
    ///
    /// Produces the fixed HTML wrapper template, escaping `"` in attribute
    /// values as `&quot;`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createhtml
    fn create_html(
        string: &JsValue,
        tag: &str,
        attribute_and_value: Option<(&str, &JsValue)>,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let str be ? RequireObjectCoercible(string).
        // 2. Let S be ? ToString(str).
        let s = string.require_object_coercible()?.to_string(context)?;

        // 3-4. Build the opening tag, with the escaped attribute.
        let mut p1 = format!("<{tag}");
        if let Some((attribute, value)) = attribute_and_value {
            let v = value.to_string(context)?.to_std_string_escaped();
            let escaped_v = v.replace('"', "&quot;");
            p1.push_str(&format!(" {attribute}=\"{escaped_v}\""));
        }
        p1.push('>');

        // 5-7. Stitch the final string.
        let mut result: Vec<u16> = js_string!(p1).as_slice().to_vec();
        result.extend_from_slice(&s);
        result.extend_from_slice(&js_string!(format!("</{tag}>")));
        Ok(JsString::from(result).into())
    }

    /// `String.prototype.anchor ( name )`
    fn anchor(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "a", Some(("name", args.get_or_undefined(0))), context)
    }

    /// `String.prototype.big ( )`
    fn big(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "big", None, context)
    }

    /// `String.prototype.blink ( )`
    fn blink(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "blink", None, context)
    }

    /// `String.prototype.bold ( )`
    fn bold(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "b", None, context)
    }

    /// `String.prototype.fixed ( )`
    fn fixed(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "tt", None, context)
    }

    /// `String.prototype.fontcolor ( color )`
    fn fontcolor(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "font", Some(("color", args.get_or_undefined(0))), context)
    }

    /// `String.prototype.fontsize ( size )`
    fn fontsize(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "font", Some(("size", args.get_or_undefined(0))), context)
    }

    /// `String.prototype.italics ( )`
    fn italics(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "i", None, context)
    }

    /// `String.prototype.link ( url )`
    fn link(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "a", Some(("href", args.get_or_undefined(0))), context)
    }

    /// `String.prototype.small ( )`
    fn small(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "small", None, context)
    }

    /// `String.prototype.strike ( )`
    fn strike(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "strike", None, context)
    }

    /// `String.prototype.sub ( )`
    fn sub(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "sub", None, context)
    }

    /// `String.prototype.sup ( )`
    fn sup(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::create_html(this, "sup", None, context)
    }

    /// `String.prototype.substr ( start, length )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-string.prototype.substr
    fn substr(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Let S be the coerced string.
        let string = this.require_object_coercible()?.to_string(context)?;
        let size = string.len() as i64;

        // 3. Let intStart be ? ToIntegerOrInfinity(start).
        let int_start = args.get_or_undefined(0).to_integer_or_infinity(context)?;

        // 4-6. Resolve the start.
        let int_start = match int_start {
            IntegerOrInfinity::NegativeInfinity => 0,
            IntegerOrInfinity::Integer(i) if i < 0 => max(size + i, 0),
            IntegerOrInfinity::Integer(i) => i,
            IntegerOrInfinity::PositiveInfinity => return Ok(js_string!().into()),
        };

        // 7-8. Resolve the length.
        let length = args.get_or_undefined(1);
        let int_length = if length.is_undefined() {
            size
        } else {
            length.to_integer_or_infinity(context)?.clamp_finite(0, size)
        };

        // 9-11. Return the substring.
        if int_start >= size || int_length <= 0 {
            return Ok(js_string!().into());
        }
        let int_end = min(int_start + int_length, size);
        Ok(string.substring(int_start as usize, int_end as usize).into())
    }

    /// `String.escape ( string )`
    ///
    /// Percent-escapes every code unit outside the unreserved set, using
    /// `%XX` for units below 256 and `%uXXXX` otherwise.
    fn escape(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = args.get_or_undefined(0).to_string(context)?;

        let mut result: Vec<u16> = Vec::with_capacity(string.len());
        for &unit in string.iter() {
            let c = char::from_u32(u32::from(unit));
            let unreserved = c.is_some_and(|c| {
                c.is_ascii_alphanumeric() || "@*_+-./".contains(c)
            });
            if unreserved {
                result.push(unit);
            } else if unit < 256 {
                result.extend(format!("%{unit:02X}").encode_utf16());
            } else {
                result.extend(format!("%u{unit:04X}").encode_utf16());
            }
        }

        Ok(JsString::from(result).into())
    }
}

/// Abstract operation `GetSubstitution ( matched, str, position, captures,
/// namedCaptures, replacement )`.
///
/// Expands `$$`, `$&`, `` $` ``, `$'`, `$n`, and `$<name>` in the
/// replacement template.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-getsubstitution
#[allow(clippy::too_many_arguments)]
pub(crate) fn get_substitution(
    matched: &JsString,
    string: &JsString,
    position: usize,
    captures: &[JsValue],
    named_captures: &JsValue,
    replacement: &JsString,
    context: &mut Context,
) -> JsResult<JsString> {
    let match_length = matched.len();
    let str_length = string.len();
    let tail_pos = min(position + match_length, str_length);

    let mut result: Vec<u16> = Vec::with_capacity(replacement.len());
    let dollar = u16::from(b'$');

    let mut i = 0;
    while i < replacement.len() {
        let unit = replacement[i];
        if unit != dollar || i + 1 >= replacement.len() {
            result.push(unit);
            i += 1;
            continue;
        }

        let next = replacement[i + 1];
        match next {
            // $$
            u if u == dollar => {
                result.push(dollar);
                i += 2;
            }
            // $&
            u if u == u16::from(b'&') => {
                result.extend_from_slice(matched);
                i += 2;
            }
            // $`
            u if u == u16::from(b'`') => {
                result.extend_from_slice(&string[..position]);
                i += 2;
            }
            // $'
            u if u == u16::from(b'\'') => {
                result.extend_from_slice(&string[tail_pos..]);
                i += 2;
            }
            // $n / $nn
            u if (u16::from(b'1')..=u16::from(b'9')).contains(&u) => {
                let first = (u - u16::from(b'0')) as usize;
                let second = replacement
                    .get(i + 2)
                    .copied()
                    .filter(|d| (u16::from(b'0')..=u16::from(b'9')).contains(d))
                    .map(|d| (d - u16::from(b'0')) as usize);

                // Prefer the two digit capture when it is in range.
                let (n, consumed) = match second {
                    Some(second) if first * 10 + second <= captures.len() && first * 10 + second > 0 => {
                        (first * 10 + second, 3)
                    }
                    _ => (first, 2),
                };

                if n <= captures.len() && n > 0 {
                    match captures.get(n - 1) {
                        Some(capture) if !capture.is_undefined() => {
                            result.extend_from_slice(&capture.to_string(context)?);
                        }
                        _ => {}
                    }
                    i += consumed;
                } else {
                    result.push(unit);
                    i += 1;
                }
            }
            // $<name>
            u if u == u16::from(b'<') => {
                if named_captures.is_undefined() {
                    result.push(unit);
                    i += 1;
                } else {
                    let close = (i + 2..replacement.len())
                        .find(|&j| replacement[j] == u16::from(b'>'));
                    match close {
                        None => {
                            result.push(unit);
                            i += 1;
                        }
                        Some(close) => {
                            let group_name = JsString::from_slice(&replacement[i + 2..close]);
                            let named_captures =
                                named_captures.to_object(context)?;
                            let capture = named_captures.get(group_name, context)?;
                            if !capture.is_undefined() {
                                result.extend_from_slice(&capture.to_string(context)?);
                            }
                            i = close + 1;
                        }
                    }
                }
            }
            _ => {
                result.push(unit);
                i += 1;
            }
        }
    }

    Ok(JsString::from(result))
}
