//! Conversions between the value type and other types, including the
//! abstract conversion operations of the specification.

use super::{IntegerOrInfinity, JsValue, Numeric, PreferredType};
use crate::{
    builtins::Number,
    error::JsNativeError,
    js_string,
    object::{JsObject, ObjectData},
    property::{PropertyDescriptor, PropertyKey},
    Context, JsBigInt, JsResult, JsString,
};

impl JsValue {
    /// Abstract operation `ToPrimitive ( input [ , preferredType ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toprimitive
    pub fn to_primitive(
        &self,
        context: &mut Context,
        preferred_type: PreferredType,
    ) -> JsResult<Self> {
        // 1. Assert: input is an ECMAScript language value.
        // 2. If Type(input) is Object, then
        if let Some(input) = self.as_object() {
            // a. Let exoticToPrim be ? GetMethod(input, @@toPrimitive).
            let exotic_to_prim =
                self.get_method(crate::symbol::WellKnownSymbols::to_primitive(), context)?;

            // b. If exoticToPrim is not undefined, then
            if let Some(exotic_to_prim) = exotic_to_prim {
                // i. If preferredType is not present, let hint be "default".
                // ii. Else if preferredType is string, let hint be "string".
                // iii. Else, 1. Assert: preferredType is number. 2. Let hint be "number".
                let hint = match preferred_type {
                    PreferredType::Default => "default",
                    PreferredType::String => "string",
                    PreferredType::Number => "number",
                };

                // iv. Let result be ? Call(exoticToPrim, input, « hint »).
                let result = exotic_to_prim.call(self, &[js_string!(hint).into()], context)?;
                // v. If Type(result) is not Object, return result.
                // vi. Throw a TypeError exception.
                return if result.is_object() {
                    Err(JsNativeError::typ()
                        .with_message("Symbol.toPrimitive cannot return an object")
                        .into())
                } else {
                    Ok(result)
                };
            }

            // c. If preferredType is not present, let preferredType be number.
            let preferred_type = match preferred_type {
                PreferredType::Default | PreferredType::Number => PreferredType::Number,
                PreferredType::String => PreferredType::String,
            };

            // d. Return ? OrdinaryToPrimitive(input, preferredType).
            return input.ordinary_to_primitive(context, preferred_type);
        }

        // 3. Return input.
        Ok(self.clone())
    }

    /// Abstract operation `ToBoolean ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toboolean
    #[must_use]
    pub fn to_boolean(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Symbol(_) | Self::Object(_) => true,
            Self::String(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::BigInt(n) => !n.is_zero(),
            Self::Boolean(v) => *v,
        }
    }

    /// Abstract operation `ToNumber ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tonumber
    pub fn to_number(&self, context: &mut Context) -> JsResult<f64> {
        match self {
            Self::Null => Ok(0.0),
            Self::Undefined => Ok(f64::NAN),
            Self::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::String(string) => Ok(string_to_number(string)),
            Self::Number(number) => Ok(*number),
            Self::Symbol(_) => Err(JsNativeError::typ()
                .with_message("argument must not be a symbol")
                .into()),
            Self::BigInt(_) => Err(JsNativeError::typ()
                .with_message("argument must not be a bigint")
                .into()),
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::Number)?;
                primitive.to_number(context)
            }
        }
    }

    /// Abstract operation `ToNumeric ( value )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tonumeric
    pub fn to_numeric(&self, context: &mut Context) -> JsResult<Numeric> {
        // 1. Let primValue be ? ToPrimitive(value, number).
        let primitive = self.to_primitive(context, PreferredType::Number)?;
        // 2. If Type(primValue) is BigInt, return primValue.
        if let Some(bigint) = primitive.as_bigint() {
            return Ok(Numeric::BigInt(bigint.clone()));
        }
        // 3. Return ? ToNumber(primValue).
        Ok(Numeric::Number(primitive.to_number(context)?))
    }

    /// Abstract operation `ToBigInt ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tobigint
    pub fn to_bigint(&self, context: &mut Context) -> JsResult<JsBigInt> {
        match self {
            Self::Null | Self::Undefined => Err(JsNativeError::typ()
                .with_message(format!("cannot convert {} to a BigInt", self.type_of()))
                .into()),
            Self::String(string) => JsBigInt::from_string(&string.to_std_string_escaped())
                .ok_or_else(|| {
                    JsNativeError::syntax()
                        .with_message("cannot convert string to a BigInt")
                        .into()
                }),
            Self::Boolean(true) => Ok(JsBigInt::from(1)),
            Self::Boolean(false) => Ok(JsBigInt::zero()),
            Self::Number(number) => JsBigInt::from_f64(*number).ok_or_else(|| {
                JsNativeError::range()
                    .with_message("cannot convert a non-integral Number to a BigInt")
                    .into()
            }),
            Self::BigInt(b) => Ok(b.clone()),
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::Number)?;
                primitive.to_bigint(context)
            }
            Self::Symbol(_) => Err(JsNativeError::typ()
                .with_message("cannot convert a Symbol to a BigInt")
                .into()),
        }
    }

    /// Abstract operation `ToString ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tostring
    pub fn to_string(&self, context: &mut Context) -> JsResult<JsString> {
        match self {
            Self::Null => Ok(js_string!("null")),
            Self::Undefined => Ok(js_string!("undefined")),
            Self::Boolean(true) => Ok(js_string!("true")),
            Self::Boolean(false) => Ok(js_string!("false")),
            Self::Number(number) => Ok(Number::to_js_string(*number)),
            Self::String(string) => Ok(string.clone()),
            Self::Symbol(_) => Err(JsNativeError::typ()
                .with_message("can't convert symbol to string")
                .into()),
            Self::BigInt(bigint) => Ok(js_string!(bigint.to_string_radix(10))),
            Self::Object(_) => {
                let primitive = self.to_primitive(context, PreferredType::String)?;
                primitive.to_string(context)
            }
        }
    }

    /// Abstract operation `ToObject ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toobject
    pub fn to_object(&self, context: &mut Context) -> JsResult<JsObject> {
        match self {
            Self::Undefined | Self::Null => Err(JsNativeError::typ()
                .with_message("cannot convert 'null' or 'undefined' to object")
                .into()),
            Self::Boolean(boolean) => Ok(JsObject::from_proto_and_data(
                context.intrinsics().constructors().boolean().prototype(),
                ObjectData::boolean(*boolean),
            )),
            Self::Number(number) => Ok(JsObject::from_proto_and_data(
                context.intrinsics().constructors().number().prototype(),
                ObjectData::number(*number),
            )),
            Self::String(string) => {
                let object = JsObject::from_proto_and_data(
                    context.intrinsics().constructors().string().prototype(),
                    ObjectData::string(string.clone()),
                );
                // Strings have a `length` own data property; the indexed
                // characters are resolved lazily by the exotic methods.
                object.borrow_mut().insert(
                    "length",
                    PropertyDescriptor::builder()
                        .value(string.len())
                        .writable(false)
                        .enumerable(false)
                        .configurable(false),
                );
                Ok(object)
            }
            Self::Symbol(symbol) => Ok(JsObject::from_proto_and_data(
                context.intrinsics().constructors().symbol().prototype(),
                ObjectData::symbol(symbol.clone()),
            )),
            Self::BigInt(bigint) => Ok(JsObject::from_proto_and_data(
                context.intrinsics().constructors().bigint().prototype(),
                ObjectData::big_int(bigint.clone()),
            )),
            Self::Object(object) => Ok(object.clone()),
        }
    }

    /// Abstract operation `ToPropertyKey ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-topropertykey
    pub fn to_property_key(&self, context: &mut Context) -> JsResult<PropertyKey> {
        Ok(match self {
            // Fast path: the value is already a key.
            Self::String(string) => string.clone().into(),
            Self::Symbol(symbol) => symbol.clone().into(),
            // 1. Let key be ? ToPrimitive(argument, string).
            _ => match self.to_primitive(context, PreferredType::String)? {
                // 2. If Type(key) is Symbol, then a. Return key.
                Self::Symbol(symbol) => symbol.into(),
                // 3. Return ! ToString(key).
                primitive => primitive.to_string(context)?.into(),
            },
        })
    }

    /// Abstract operation `ToInt32 ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toint32
    pub fn to_i32(&self, context: &mut Context) -> JsResult<i32> {
        Ok(f64_to_int32(self.to_number(context)?))
    }

    /// Abstract operation `ToUint32 ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-touint32
    pub fn to_u32(&self, context: &mut Context) -> JsResult<u32> {
        Ok(f64_to_uint32(self.to_number(context)?))
    }

    /// Abstract operation `ToIndex ( value )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-toindex
    pub fn to_index(&self, context: &mut Context) -> JsResult<u64> {
        // 1. If value is undefined, then a. Return 0.
        if self.is_undefined() {
            return Ok(0);
        }

        // 2. Else, a. Let integer be ? ToIntegerOrInfinity(value).
        let integer = self.to_integer_or_infinity(context)?;

        // b. Let clamped be ! ToLength(𝔽(integer)).
        // c. If SameValue(𝔽(integer), clamped) is false, throw a RangeError exception.
        // d. Assert: 0 ≤ integer ≤ 2^53 - 1.
        match integer {
            IntegerOrInfinity::Integer(integer)
                if (0..=(2i64.pow(53) - 1)).contains(&integer) =>
            {
                Ok(integer as u64)
            }
            _ => Err(JsNativeError::range()
                .with_message("argument must be between 0 and 2^53 - 1")
                .into()),
        }
    }

    /// Abstract operation `ToLength ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tolength
    pub fn to_length(&self, context: &mut Context) -> JsResult<u64> {
        // 1. Let len be ? ToInteger(argument).
        // 2. If len ≤ +0, return +0.
        // 3. Return min(len, 2^53 - 1).
        Ok(self
            .to_integer_or_infinity(context)?
            .clamp_finite(0, 2i64.pow(53) - 1) as u64)
    }

    /// Abstract operation `ToIntegerOrInfinity ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-tointegerorinfinity
    pub fn to_integer_or_infinity(&self, context: &mut Context) -> JsResult<IntegerOrInfinity> {
        // 1. Let number be ? ToNumber(argument).
        Ok(IntegerOrInfinity::from(self.to_number(context)?))
    }

    /// Abstract operation `RequireObjectCoercible ( argument )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-requireobjectcoercible
    pub fn require_object_coercible(&self) -> JsResult<&Self> {
        if self.is_null_or_undefined() {
            Err(JsNativeError::typ()
                .with_message("cannot convert null or undefined to object")
                .into())
        } else {
            Ok(self)
        }
    }

    /// `GetV ( V, P )`: gets the value of a property of a value, boxing
    /// primitives on the way.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getv
    pub fn get_v<K>(&self, key: K, context: &mut Context) -> JsResult<Self>
    where
        K: Into<PropertyKey>,
    {
        // 1. Let O be ? ToObject(V).
        let o = self.to_object(context)?;
        // 2. Return ? O.[[Get]](P, V).
        o.__get__(&key.into(), self.clone(), context)
    }

    /// Abstract operation `GetMethod ( V, P )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getmethod
    pub fn get_method<K>(&self, key: K, context: &mut Context) -> JsResult<Option<JsObject>>
    where
        K: Into<PropertyKey>,
    {
        // 1. Assert: IsPropertyKey(P) is true.
        // 2. Let func be ? GetV(V, P).
        let func = self.get_v(key, context)?;
        match func {
            // 3. If func is either undefined or null, return undefined.
            Self::Undefined | Self::Null => Ok(None),
            // 4. If IsCallable(func) is false, throw a TypeError exception.
            Self::Object(object) if object.is_callable() => Ok(Some(object)),
            _ => Err(JsNativeError::typ()
                .with_message("value returned for property of object is not a function")
                .into()),
        }
    }
}

/// Converts a string to a number following the `StringNumericLiteral`
/// grammar: leading and trailing whitespace are ignored, the empty string is
/// `+0`, `Infinity` forms and unsigned `0x`/`0o`/`0b` literals are accepted,
/// and anything else that is not a decimal literal is `NaN`.
pub(crate) fn string_to_number(string: &JsString) -> f64 {
    let Ok(string) = string.to_std_string() else {
        // Unpaired surrogates cannot be part of any numeric literal.
        return f64::NAN;
    };
    let string = string.trim_matches(JsString::is_trimmable_whitespace);

    match string {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(digits) = string
        .strip_prefix("0x")
        .or_else(|| string.strip_prefix("0X"))
    {
        return parse_radix_digits(digits, 16);
    }
    if let Some(digits) = string
        .strip_prefix("0o")
        .or_else(|| string.strip_prefix("0O"))
    {
        return parse_radix_digits(digits, 8);
    }
    if let Some(digits) = string
        .strip_prefix("0b")
        .or_else(|| string.strip_prefix("0B"))
    {
        return parse_radix_digits(digits, 2);
    }

    // `fast-float2` accepts `inf`/`nan` spellings that the ECMAScript
    // grammar does not, so validate the shape first.
    if !is_decimal_literal(string) {
        return f64::NAN;
    }
    fast_float2::parse(string).unwrap_or(f64::NAN)
}

/// Checks that a (already trimmed, non-empty) string matches the
/// `StrDecimalLiteral` grammar.
fn is_decimal_literal(string: &str) -> bool {
    let mut chars = string.chars().peekable();
    if matches!(chars.peek(), Some('+' | '-')) {
        chars.next();
    }

    let mut int_digits = 0;
    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        chars.next();
        int_digits += 1;
    }

    let mut frac_digits = 0;
    if chars.peek() == Some(&'.') {
        chars.next();
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            frac_digits += 1;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        if matches!(chars.peek(), Some('+' | '-')) {
            chars.next();
        }
        let mut exp_digits = 0;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            chars.next();
            exp_digits += 1;
        }
        if exp_digits == 0 {
            return false;
        }
    }

    chars.next().is_none()
}

/// Accumulates unsigned digits in the given radix into a number, preserving
/// the magnitude of arbitrarily long literals.
fn parse_radix_digits(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut result = 0.0f64;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else {
            return f64::NAN;
        };
        result = result * f64::from(radix) + f64::from(digit);
    }
    result
}

/// Abstract operation `ToInt32 ( argument )` over an already converted
/// number.
pub(crate) fn f64_to_int32(number: f64) -> i32 {
    // 1. Let number be ? ToNumber(argument).
    // 2. If number is NaN, +0𝔽, -0𝔽, +∞𝔽, or -∞𝔽, return +0𝔽.
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    // 3. Let int be the mathematical value whose sign is the sign of number
    //    and whose magnitude is floor(abs(ℝ(number))).
    // 4. Let int32bit be int modulo 2^32.
    let int32bit = number.trunc().rem_euclid(4_294_967_296.0);
    // 5. If int32bit ≥ 2^31, return 𝔽(int32bit - 2^32); otherwise return 𝔽(int32bit).
    if int32bit >= 2_147_483_648.0 {
        (int32bit - 4_294_967_296.0) as i32
    } else {
        int32bit as i32
    }
}

/// Abstract operation `ToUint32 ( argument )` over an already converted
/// number.
pub(crate) fn f64_to_uint32(number: f64) -> u32 {
    if !number.is_finite() || number == 0.0 {
        return 0;
    }
    number.trunc().rem_euclid(4_294_967_296.0) as u32
}
