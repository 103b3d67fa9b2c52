//! The global `Number` object, and the numeric global functions.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-number-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    js_string,
    object::{internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder, JsObject, ObjectData},
    property::Attribute,
    value::{IntegerOrInfinity, JsArgs, Numeric},
    Context, JsResult, JsString, JsValue,
};

/// JavaScript `Number` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Number;

impl BuiltIn for Number {
    const NAME: &'static str = "Number";

    fn init(context: &mut Context) -> Option<JsValue> {
        let parse_int = FunctionBuilder::native(context, Self::parse_int)
            .name("parseInt")
            .length(2)
            .build();
        let parse_float = FunctionBuilder::native(context, Self::parse_float)
            .name("parseFloat")
            .length(1)
            .build();

        let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().number().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .static_property("EPSILON", f64::EPSILON, attribute)
        .static_property("MAX_SAFE_INTEGER", Self::MAX_SAFE_INTEGER, attribute)
        .static_property("MIN_SAFE_INTEGER", Self::MIN_SAFE_INTEGER, attribute)
        .static_property("MAX_VALUE", Self::MAX_VALUE, attribute)
        .static_property("MIN_VALUE", Self::MIN_VALUE, attribute)
        .static_property("NEGATIVE_INFINITY", f64::NEG_INFINITY, attribute)
        .static_property("POSITIVE_INFINITY", f64::INFINITY, attribute)
        .static_property("NaN", f64::NAN, attribute)
        .static_property(
            "parseInt",
            parse_int,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .static_property(
            "parseFloat",
            parse_float,
            Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .static_method(Self::number_is_finite, "isFinite", 1)
        .static_method(Self::number_is_nan, "isNaN", 1)
        .static_method(Self::is_safe_integer, "isSafeInteger", 1)
        .static_method(Self::number_is_integer, "isInteger", 1)
        .method(Self::to_exponential, "toExponential", 1)
        .method(Self::to_fixed, "toFixed", 1)
        .method(Self::to_locale_string, "toLocaleString", 0)
        .method(Self::to_precision, "toPrecision", 1)
        .method(Self::to_string, "toString", 1)
        .method(Self::value_of, "valueOf", 0)
        .build();

        Some(object.into())
    }
}

impl Number {
    /// The largest integer `n` such that `n` and `n + 1` are both exactly
    /// representable as a Number value: 2^53 - 1.
    pub(crate) const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991_f64;

    /// The smallest safe integer: -(2^53 - 1).
    pub(crate) const MIN_SAFE_INTEGER: f64 = -9_007_199_254_740_991_f64;

    /// The largest Number value: approximately 1.7976931348623157e308.
    pub(crate) const MAX_VALUE: f64 = f64::MAX;

    /// The smallest positive Number value: approximately 5e-324.
    pub(crate) const MIN_VALUE: f64 = f64::MIN_POSITIVE * f64::EPSILON;

    /// `Number ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number-constructor-number-value
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If value is present, then
        let n = match args.first() {
            // a. Let prim be ? ToNumeric(value).
            // b. If Type(prim) is BigInt, let n be 𝔽(ℝ(prim)).
            Some(value) => match value.to_numeric(context)? {
                Numeric::Number(number) => number,
                Numeric::BigInt(bigint) => bigint.to_f64(),
            },
            // 2. Else, let n be +0𝔽.
            None => 0.0,
        };

        // 3. If NewTarget is undefined, return n.
        if new_target.is_undefined() {
            return Ok(n.into());
        }

        // 4-6. Construct the wrapper object.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::number, context)?;
        Ok(JsObject::from_proto_and_data(prototype, ObjectData::number(n)).into())
    }

    /// Gets the numeric value of a `this` that is either a number primitive
    /// or a `Number` wrapper object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thisnumbervalue
    fn this_number_value(this: &JsValue) -> JsResult<f64> {
        match this {
            JsValue::Number(number) => Ok(*number),
            JsValue::Object(obj) => obj.borrow().as_number().ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a number")
                    .into()
            }),
            _ => Err(JsNativeError::typ()
                .with_message("'this' is not a number")
                .into()),
        }
    }

    /// Converts a `f64` number to its ECMAScript `String` representation.
    #[must_use]
    pub(crate) fn to_js_string(value: f64) -> JsString {
        if value.is_nan() {
            return js_string!("NaN");
        }
        if value == 0.0 {
            return js_string!("0");
        }
        if value == f64::INFINITY {
            return js_string!("Infinity");
        }
        if value == f64::NEG_INFINITY {
            return js_string!("-Infinity");
        }
        let mut buffer = ryu_js::Buffer::new();
        js_string!(buffer.format_finite(value))
    }

    /// `Number.prototype.toString ( [ radix ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number/toString
    fn to_string(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let x be ? thisNumberValue(this value).
        let x = Self::this_number_value(this)?;

        // 2-3. Let radixMV be ? ToIntegerOrInfinity(radix), defaulting to 10.
        let radix = args.get_or_undefined(0);
        let radix_mv = if radix.is_undefined() {
            10
        } else {
            match radix.to_integer_or_infinity(context)? {
                IntegerOrInfinity::Integer(i) if (2..=36).contains(&i) => i as u32,
                // 4. If radixMV < 2 or radixMV > 36, throw a RangeError exception.
                _ => {
                    return Err(JsNativeError::range()
                        .with_message("radix must be an integer at least 2 and no greater than 36")
                        .into())
                }
            }
        };

        // 5. If radixMV = 10, return ! ToString(x).
        if radix_mv == 10 {
            return Ok(Self::to_js_string(x).into());
        }

        // 6. Return the String representation of this Number value using the
        //    radix specified by radixMV.
        Ok(js_string!(Self::to_native_string_radix(x, radix_mv)).into())
    }

    /// Converts a number to a string in the given radix.
    ///
    /// The integer part is exact; fractional digits are emitted until the
    /// remaining value runs out of binary precision.
    fn to_native_string_radix(mut value: f64, radix: u32) -> std::string::String {
        const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

        if value.is_nan() {
            return "NaN".into();
        }
        if value == 0.0 {
            return "0".into();
        }
        if value == f64::INFINITY {
            return "Infinity".into();
        }
        if value == f64::NEG_INFINITY {
            return "-Infinity".into();
        }

        let negative = value < 0.0;
        if negative {
            value = -value;
        }

        let mut int_part = value.trunc();
        let mut frac_part = value - int_part;

        let mut int_digits = Vec::new();
        if int_part == 0.0 {
            int_digits.push(b'0');
        }
        while int_part >= 1.0 {
            let digit = (int_part % f64::from(radix)) as usize;
            int_digits.push(DIGITS[digit]);
            int_part = (int_part / f64::from(radix)).trunc();
        }
        int_digits.reverse();

        let mut result = std::string::String::new();
        if negative {
            result.push('-');
        }
        result.push_str(std::str::from_utf8(&int_digits).expect("radix digits are always ASCII"));

        if frac_part > 0.0 {
            result.push('.');
            // 52 bits of mantissa bound the useful fraction digits.
            let mut precision_left = 1100u32;
            while frac_part > 0.0 && precision_left > 0 {
                frac_part *= f64::from(radix);
                let digit = frac_part.trunc() as usize;
                result.push(DIGITS[digit] as char);
                frac_part -= frac_part.trunc();
                precision_left -= 1;
            }
        }

        result
    }

    /// `Number.prototype.toLocaleString ( [ locales [ , options ] ] )`
    ///
    /// Only the invariant culture is supported.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.tolocalestring
    fn to_locale_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let x = Self::this_number_value(this)?;
        Ok(Self::to_js_string(x).into())
    }

    /// `Number.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(Self::this_number_value(this)?.into())
    }

    /// `Number.prototype.toFixed ( fractionDigits )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.tofixed
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number/toFixed
    fn to_fixed(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let x be ? thisNumberValue(this value).
        let x = Self::this_number_value(this)?;

        // 2-3. Let f be ? ToIntegerOrInfinity(fractionDigits); 0 to 100.
        let f = args
            .get_or_undefined(0)
            .to_integer_or_infinity(context)?;
        let IntegerOrInfinity::Integer(f) = f else {
            return Err(JsNativeError::range()
                .with_message("toFixed digits argument must be between 0 and 100")
                .into());
        };
        if !(0..=100).contains(&f) {
            return Err(JsNativeError::range()
                .with_message("toFixed digits argument must be between 0 and 100")
                .into());
        }

        // 4-5. Non-finite numbers print as usual.
        if !x.is_finite() {
            return Ok(Self::to_js_string(x).into());
        }

        // 6. If x ≥ 10^21, return ! ToString(x).
        if x.abs() >= 1e21 {
            return Ok(Self::to_js_string(x).into());
        }

        // 7-9. Fixed-point formatting.
        Ok(js_string!(format!("{x:.prec$}", prec = f as usize)).into())
    }

    /// `Number.prototype.toExponential ( fractionDigits )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.toexponential
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number/toExponential
    fn to_exponential(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let x be ? thisNumberValue(this value).
        let x = Self::this_number_value(this)?;

        // 2-3. Let f be ? ToIntegerOrInfinity(fractionDigits).
        let fraction_digits = args.get_or_undefined(0);
        let f = if fraction_digits.is_undefined() {
            None
        } else {
            match fraction_digits.to_integer_or_infinity(context)? {
                IntegerOrInfinity::Integer(f) if (0..=100).contains(&f) => Some(f as usize),
                _ => {
                    return Err(JsNativeError::range()
                        .with_message("toExponential digits argument must be between 0 and 100")
                        .into())
                }
            }
        };

        // 4-5. Non-finite numbers print as usual.
        if !x.is_finite() {
            return Ok(Self::to_js_string(x).into());
        }

        // 6-12. Exponential formatting, with the ECMAScript sign on the
        //       exponent.
        let formatted = match f {
            Some(f) => format!("{x:.prec$e}", prec = f),
            None => {
                // Without an explicit digit count the shortest
                // representation is used.
                let shortest = format!("{x:e}");
                shortest
            }
        };
        Ok(js_string!(fix_exponent_sign(&formatted)).into())
    }

    /// `Number.prototype.toPrecision ( precision )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.prototype.toprecision
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Number/toPrecision
    fn to_precision(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let x be ? thisNumberValue(this value).
        let x = Self::this_number_value(this)?;
        let precision = args.get_or_undefined(0);

        // 2. If precision is undefined, return ! ToString(x).
        if precision.is_undefined() {
            return Ok(Self::to_js_string(x).into());
        }

        // 3. Let p be ? ToIntegerOrInfinity(precision).
        let p = match precision.to_integer_or_infinity(context)? {
            IntegerOrInfinity::Integer(p) if (1..=100).contains(&p) => p as usize,
            // 5. If p < 1 or p > 100, throw a RangeError exception.
            _ => {
                return Err(JsNativeError::range()
                    .with_message("precision must be an integer at least 1 and no greater than 100")
                    .into())
            }
        };

        // 4. If x is not finite, return Number::toString(x, 10).
        if !x.is_finite() {
            return Ok(Self::to_js_string(x).into());
        }

        // 6-11. Choose fixed or exponential notation from the decimal
        //       exponent.
        let formatted = format!("{x:.prec$e}", prec = p - 1);
        let (mantissa, exponent) = formatted
            .split_once('e')
            .expect("exponential formatting always contains an exponent");
        let e: i32 = exponent.parse().expect("the exponent is always an integer");

        if e < -6 || e >= p as i32 {
            // Exponential notation.
            return Ok(js_string!(fix_exponent_sign(&formatted)).into());
        }

        // Fixed notation with exactly p significant digits.
        let digits_after_point = p as i32 - 1 - e;
        Ok(js_string!(format!("{x:.prec$}", prec = digits_after_point.max(0) as usize)).into())
    }

    /// `Number.isFinite ( number )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.isfinite
    #[allow(clippy::unnecessary_wraps)]
    fn number_is_finite(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. If Type(number) is not Number, return false.
        // 2. If number is NaN, +∞𝔽, or -∞𝔽, return false. 3. Otherwise, return true.
        Ok(args
            .get_or_undefined(0)
            .as_number()
            .is_some_and(f64::is_finite)
            .into())
    }

    /// `Number.isInteger ( number )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.isinteger
    #[allow(clippy::unnecessary_wraps)]
    fn number_is_integer(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(args
            .get_or_undefined(0)
            .as_number()
            .is_some_and(|n| n.is_finite() && n.trunc() == n)
            .into())
    }

    /// `Number.isNaN ( number )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.isnan
    #[allow(clippy::unnecessary_wraps)]
    fn number_is_nan(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(args
            .get_or_undefined(0)
            .as_number()
            .is_some_and(f64::is_nan)
            .into())
    }

    /// `Number.isSafeInteger ( number )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-number.issafeinteger
    #[allow(clippy::unnecessary_wraps)]
    fn is_safe_integer(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(args
            .get_or_undefined(0)
            .as_number()
            .is_some_and(|n| n.is_finite() && n.trunc() == n && n.abs() <= Self::MAX_SAFE_INTEGER)
            .into())
    }

    /// `parseInt ( string, radix )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-parseint-string-radix
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/parseInt
    pub(crate) fn parse_int(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let inputString be ? ToString(string).
        let input_string = args.get_or_undefined(0).to_string(context)?;

        // 2. Let S be ! TrimString(inputString, start).
        let mut s = input_string
            .trim_start()
            .to_std_string_escaped();

        // 3-5. Let sign be 1, or -1 when S starts with "-"; strip the sign.
        let mut sign = 1f64;
        if let Some(stripped) = s.strip_prefix('-') {
            sign = -1f64;
            s = stripped.to_owned();
        } else if let Some(stripped) = s.strip_prefix('+') {
            s = stripped.to_owned();
        }

        // 6. Let R be ℝ(? ToInt32(radix)).
        let mut r = args.get_or_undefined(1).to_i32(context)?;

        // 7-9. Resolve the stripPrefix flag.
        let mut strip_prefix = true;
        if r != 0 {
            // a. If R < 2 or R > 36, return NaN.
            if !(2..=36).contains(&r) {
                return Ok(JsValue::nan());
            }
            // b. If R ≠ 16, set stripPrefix to false.
            if r != 16 {
                strip_prefix = false;
            }
        } else {
            // 10. Else, set R to 10.
            r = 10;
        }

        // 11. If stripPrefix is true and S starts with "0x"/"0X", remove it
        //     and set R to 16.
        if strip_prefix {
            if let Some(stripped) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                s = stripped.to_owned();
                r = 16;
            }
        }

        // 12. Let end be the longest prefix of S consisting of radix-R digits.
        let end = s
            .chars()
            .position(|c| !c.is_digit(r as u32))
            .unwrap_or(s.len());

        // 13. If Z is empty, return NaN.
        if end == 0 {
            return Ok(JsValue::nan());
        }

        // 14-16. Accumulate the mathematical value.
        let mut math_int = 0f64;
        for c in s[..end].chars() {
            let digit = c.to_digit(r as u32).expect("the prefix only has valid digits");
            math_int = math_int * f64::from(r) + f64::from(digit);
        }

        // 17. Return 𝔽(sign × mathInt).
        Ok((sign * math_int).into())
    }

    /// `parseFloat ( string )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-parsefloat-string
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/parseFloat
    pub(crate) fn parse_float(
        _: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let inputString be ? ToString(string).
        let input_string = args.get_or_undefined(0).to_string(context)?;

        // 2. Let trimmedString be ! TrimString(inputString, start).
        let trimmed = input_string.trim_start().to_std_string_escaped();

        // 3-4. The longest prefix satisfying the StrDecimalLiteral grammar.
        let prefix_len = decimal_literal_prefix_length(&trimmed);
        if prefix_len == 0 {
            return Ok(JsValue::nan());
        }

        let prefix = &trimmed[..prefix_len];
        match prefix {
            "Infinity" | "+Infinity" => return Ok(JsValue::positive_infinity()),
            "-Infinity" => return Ok(JsValue::negative_infinity()),
            _ => {}
        }

        // 5. Return the Number value of the literal.
        Ok(fast_float2::parse::<f64, _>(prefix)
            .map_or(JsValue::nan(), JsValue::from))
    }
}

/// Finds the length of the longest prefix of `s` that satisfies the
/// `StrDecimalLiteral` grammar.
fn decimal_literal_prefix_length(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    // Infinity literal.
    if s[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let mut digits = 0;
    while matches!(bytes.get(i), Some(c) if c.is_ascii_digit()) {
        i += 1;
        digits += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while matches!(bytes.get(i), Some(c) if c.is_ascii_digit()) {
            i += 1;
            digits += 1;
        }
    }
    if digits == 0 {
        return 0;
    }

    // Optional exponent.
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let mut exp_digits = 0;
        while matches!(bytes.get(j), Some(c) if c.is_ascii_digit()) {
            j += 1;
            exp_digits += 1;
        }
        if exp_digits > 0 {
            i = j;
        }
    }

    i
}

/// Rewrites a Rust exponential format (`1.5e3`) into the ECMAScript shape
/// (`1.5e+3`).
fn fix_exponent_sign(formatted: &str) -> std::string::String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_owned(),
    }
}

/// The global `isFinite ( number )` function.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-isfinite-number
#[derive(Debug, Clone, Copy)]
pub(crate) struct IsFinite;

impl BuiltIn for IsFinite {
    const NAME: &'static str = "isFinite";

    fn init(context: &mut Context) -> Option<JsValue> {
        let function = FunctionBuilder::native(context, |_, args, context| {
            // 1. Let num be ? ToNumber(number).
            // 2. If num is NaN, +∞𝔽, or -∞𝔽, return false. 3. Otherwise, return true.
            Ok(args.get_or_undefined(0).to_number(context)?.is_finite().into())
        })
        .name(Self::NAME)
        .length(1)
        .build();
        Some(function.into())
    }
}

/// The global `isNaN ( number )` function.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-isnan-number
#[derive(Debug, Clone, Copy)]
pub(crate) struct IsNaN;

impl BuiltIn for IsNaN {
    const NAME: &'static str = "isNaN";

    fn init(context: &mut Context) -> Option<JsValue> {
        let function = FunctionBuilder::native(context, |_, args, context| {
            Ok(args.get_or_undefined(0).to_number(context)?.is_nan().into())
        })
        .name(Self::NAME)
        .length(1)
        .build();
        Some(function.into())
    }
}

/// The global `parseInt ( string, radix )` function.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseInt;

impl BuiltIn for ParseInt {
    const NAME: &'static str = "parseInt";

    fn init(context: &mut Context) -> Option<JsValue> {
        let function = FunctionBuilder::native(context, Number::parse_int)
            .name(Self::NAME)
            .length(2)
            .build();
        Some(function.into())
    }
}

/// The global `parseFloat ( string )` function.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ParseFloat;

impl BuiltIn for ParseFloat {
    const NAME: &'static str = "parseFloat";

    fn init(context: &mut Context) -> Option<JsValue> {
        let function = FunctionBuilder::native(context, Number::parse_float)
            .name(Self::NAME)
            .length(1)
            .build();
        Some(function.into())
    }
}
