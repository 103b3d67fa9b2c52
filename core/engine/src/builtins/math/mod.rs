//! The global `Math` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-math-object
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Math

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    js_string,
    object::ObjectInitializer,
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};

/// JavaScript `Math` object.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Math;

impl BuiltIn for Math {
    const NAME: &'static str = "Math";

    fn init(context: &mut Context) -> Option<JsValue> {
        let attribute = Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT;
        let object = ObjectInitializer::new(context)
            .property("E", std::f64::consts::E, attribute)
            .property("LN10", std::f64::consts::LN_10, attribute)
            .property("LN2", std::f64::consts::LN_2, attribute)
            .property("LOG10E", std::f64::consts::LOG10_E, attribute)
            .property("LOG2E", std::f64::consts::LOG2_E, attribute)
            .property("PI", std::f64::consts::PI, attribute)
            .property("SQRT1_2", std::f64::consts::FRAC_1_SQRT_2, attribute)
            .property("SQRT2", std::f64::consts::SQRT_2, attribute)
            .property(
                WellKnownSymbols::to_string_tag(),
                js_string!(Self::NAME),
                Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
            )
            .function(Self::abs, "abs", 1)
            .function(Self::acos, "acos", 1)
            .function(Self::acosh, "acosh", 1)
            .function(Self::asin, "asin", 1)
            .function(Self::asinh, "asinh", 1)
            .function(Self::atan, "atan", 1)
            .function(Self::atan2, "atan2", 2)
            .function(Self::atanh, "atanh", 1)
            .function(Self::cbrt, "cbrt", 1)
            .function(Self::ceil, "ceil", 1)
            .function(Self::clz32, "clz32", 1)
            .function(Self::cos, "cos", 1)
            .function(Self::cosh, "cosh", 1)
            .function(Self::exp, "exp", 1)
            .function(Self::expm1, "expm1", 1)
            .function(Self::floor, "floor", 1)
            .function(Self::fround, "fround", 1)
            .function(Self::hypot, "hypot", 2)
            .function(Self::imul, "imul", 2)
            .function(Self::log, "log", 1)
            .function(Self::log10, "log10", 1)
            .function(Self::log1p, "log1p", 1)
            .function(Self::log2, "log2", 1)
            .function(Self::max, "max", 2)
            .function(Self::min, "min", 2)
            .function(Self::pow, "pow", 2)
            .function(Self::random, "random", 0)
            .function(Self::round, "round", 1)
            .function(Self::sign, "sign", 1)
            .function(Self::sin, "sin", 1)
            .function(Self::sinh, "sinh", 1)
            .function(Self::sqrt, "sqrt", 1)
            .function(Self::tan, "tan", 1)
            .function(Self::tanh, "tanh", 1)
            .function(Self::trunc, "trunc", 1)
            .build();

        Some(object.into())
    }
}

impl Math {
    /// `Math.abs ( x )`
    fn abs(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.abs().into())
    }

    /// `Math.acos ( x )`
    fn acos(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.acos().into())
    }

    /// `Math.acosh ( x )`
    fn acosh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.acosh().into())
    }

    /// `Math.asin ( x )`
    fn asin(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.asin().into())
    }

    /// `Math.asinh ( x )`
    fn asinh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.asinh().into())
    }

    /// `Math.atan ( x )`
    fn atan(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.atan().into())
    }

    /// `Math.atan2 ( y, x )`
    fn atan2(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let y = args.get_or_undefined(0).to_number(context)?;
        let x = args.get_or_undefined(1).to_number(context)?;
        Ok(y.atan2(x).into())
    }

    /// `Math.atanh ( x )`
    fn atanh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.atanh().into())
    }

    /// `Math.cbrt ( x )`
    fn cbrt(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.cbrt().into())
    }

    /// `Math.ceil ( x )`
    fn ceil(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.ceil().into())
    }

    /// `Math.clz32 ( x )`
    fn clz32(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args
            .get_or_undefined(0)
            .to_u32(context)?
            .leading_zeros()
            .into())
    }

    /// `Math.cos ( x )`
    fn cos(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.cos().into())
    }

    /// `Math.cosh ( x )`
    fn cosh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.cosh().into())
    }

    /// `Math.exp ( x )`
    fn exp(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.exp().into())
    }

    /// `Math.expm1 ( x )`
    fn expm1(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.exp_m1().into())
    }

    /// `Math.floor ( x )`
    fn floor(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.floor().into())
    }

    /// `Math.fround ( x )`
    fn fround(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(f64::from(args.get_or_undefined(0).to_number(context)? as f32).into())
    }

    /// `Math.hypot ( ...args )`
    fn hypot(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let mut result = 0f64;
        for arg in args {
            let x = arg.to_number(context)?;
            result = result.hypot(x);
        }
        Ok(result.into())
    }

    /// `Math.imul ( x, y )`
    fn imul(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let a = args.get_or_undefined(0).to_u32(context)?;
        let b = args.get_or_undefined(1).to_u32(context)?;
        Ok((a.wrapping_mul(b) as i32).into())
    }

    /// `Math.log ( x )`
    fn log(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let x = args.get_or_undefined(0).to_number(context)?;
        Ok(if x < 0.0 { f64::NAN } else { x.ln() }.into())
    }

    /// `Math.log10 ( x )`
    fn log10(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let x = args.get_or_undefined(0).to_number(context)?;
        Ok(if x < 0.0 { f64::NAN } else { x.log10() }.into())
    }

    /// `Math.log1p ( x )`
    fn log1p(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.ln_1p().into())
    }

    /// `Math.log2 ( x )`
    fn log2(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let x = args.get_or_undefined(0).to_number(context)?;
        Ok(if x < 0.0 { f64::NAN } else { x.log2() }.into())
    }

    /// `Math.max ( ...args )`
    fn max(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let mut highest = f64::NEG_INFINITY;
        for arg in args {
            let num = arg.to_number(context)?;
            if num.is_nan() {
                return Ok(f64::NAN.into());
            }
            // +0 is larger than -0.
            highest = if highest == num {
                if highest == 0.0 && num.is_sign_positive() {
                    num
                } else {
                    highest
                }
            } else if num > highest {
                num
            } else {
                highest
            };
        }
        Ok(highest.into())
    }

    /// `Math.min ( ...args )`
    fn min(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let mut lowest = f64::INFINITY;
        for arg in args {
            let num = arg.to_number(context)?;
            if num.is_nan() {
                return Ok(f64::NAN.into());
            }
            // -0 is smaller than +0.
            lowest = if lowest == num {
                if lowest == 0.0 && num.is_sign_negative() {
                    num
                } else {
                    lowest
                }
            } else if num < lowest {
                num
            } else {
                lowest
            };
        }
        Ok(lowest.into())
    }

    /// `Math.pow ( base, exponent )`
    fn pow(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let base = args.get_or_undefined(0).to_number(context)?;
        let exponent = args.get_or_undefined(1).to_number(context)?;
        // The ECMAScript exponentiation of 1/-1 with an infinite exponent is
        // NaN, unlike IEEE 754-2019 `pow`.
        if exponent.is_infinite() && base.abs() == 1.0 {
            return Ok(f64::NAN.into());
        }
        Ok(base.powf(exponent).into())
    }

    /// `Math.random ( )`
    #[allow(clippy::unnecessary_wraps)]
    fn random(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(rand::random::<f64>().into())
    }

    /// `Math.round ( x )`
    fn round(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let num = args.get_or_undefined(0).to_number(context)?;
        // Half-way cases round towards +∞, unlike `f64::round`.
        let rounded = if num.fract() == -0.5 {
            num.trunc()
        } else {
            (num + 0.5).floor()
        };
        Ok(if num.is_finite() { rounded } else { num }.into())
    }

    /// `Math.sign ( x )`
    fn sign(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let num = args.get_or_undefined(0).to_number(context)?;
        if num.is_nan() || num == 0.0 {
            return Ok(num.into());
        }
        Ok(num.signum().into())
    }

    /// `Math.sin ( x )`
    fn sin(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.sin().into())
    }

    /// `Math.sinh ( x )`
    fn sinh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.sinh().into())
    }

    /// `Math.sqrt ( x )`
    fn sqrt(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.sqrt().into())
    }

    /// `Math.tan ( x )`
    fn tan(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.tan().into())
    }

    /// `Math.tanh ( x )`
    fn tanh(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.tanh().into())
    }

    /// `Math.trunc ( x )`
    fn trunc(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(args.get_or_undefined(0).to_number(context)?.trunc().into())
    }
}
