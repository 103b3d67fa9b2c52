//! The global `BigInt` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-bigint-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/BigInt

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    error::JsNativeError,
    js_string,
    object::ConstructorBuilder,
    property::Attribute,
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs, PreferredType},
    Context, JsBigInt, JsResult, JsValue,
};

/// JavaScript `BigInt` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BigInt;

impl BuiltIn for BigInt {
    const NAME: &'static str = "BigInt";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().bigint().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .static_method(Self::as_int_n, "asIntN", 2)
        .static_method(Self::as_uint_n, "asUintN", 2)
        .method(Self::to_string, "toString", 0)
        .method(Self::value_of, "valueOf", 0)
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .build();

        Some(object.into())
    }
}

impl BigInt {
    /// `BigInt ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint-constructor-number-value
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is not undefined, throw a TypeError exception.
        if !new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("BigInt is not a constructor")
                .into());
        }

        // 2. Let prim be ? ToPrimitive(value, number).
        let prim = args
            .get_or_undefined(0)
            .to_primitive(context, PreferredType::Number)?;

        // 3. If Type(prim) is Number, return ? NumberToBigInt(prim).
        // 4. Otherwise, return ? ToBigInt(prim).
        prim.to_bigint(context).map(JsValue::from)
    }

    /// Gets the bigint of a `this` that is either a bigint primitive or a
    /// `BigInt` wrapper object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thisbigintvalue
    fn this_bigint_value(this: &JsValue) -> JsResult<JsBigInt> {
        match this {
            JsValue::BigInt(bigint) => Ok(bigint.clone()),
            JsValue::Object(obj) => obj.borrow().as_big_int().cloned().ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a BigInt")
                    .into()
            }),
            _ => Err(JsNativeError::typ()
                .with_message("'this' is not a BigInt")
                .into()),
        }
    }

    /// `BigInt.asIntN ( bits, bigint )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.asintn
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/BigInt/asIntN
    fn as_int_n(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (bits, bigint) = Self::calculate_as_int_n(args, context)?;
        Ok(JsBigInt::as_int_n(bits, &bigint).into())
    }

    /// `BigInt.asUintN ( bits, bigint )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.asuintn
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/BigInt/asUintN
    fn as_uint_n(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (bits, bigint) = Self::calculate_as_int_n(args, context)?;
        Ok(JsBigInt::as_uint_n(bits, &bigint).into())
    }

    /// Validates the shared arguments of `asIntN`/`asUintN`.
    fn calculate_as_int_n(args: &[JsValue], context: &mut Context) -> JsResult<(u32, JsBigInt)> {
        // 1. Set bits to ? ToIndex(bits).
        let bits = args.get_or_undefined(0).to_index(context)?;
        let bits = u32::try_from(bits).map_err(|_| {
            JsNativeError::range().with_message("bits argument is too large")
        })?;

        // 2. Set bigint to ? ToBigInt(bigint).
        let bigint = args.get_or_undefined(1).to_bigint(context)?;

        Ok((bits, bigint))
    }

    /// `BigInt.prototype.toString ( [ radix ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.prototype.tostring
    fn to_string(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let x be ? thisBigIntValue(this value).
        let x = Self::this_bigint_value(this)?;

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

        // 5-6. Return the string representation.
        Ok(js_string!(x.to_string_radix(radix_mv)).into())
    }

    /// `BigInt.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(Self::this_bigint_value(this)?.into())
    }
}
