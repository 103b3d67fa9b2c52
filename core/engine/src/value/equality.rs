//! Equality algorithms of the value type.

use super::{JsValue, PreferredType};
use crate::{Context, JsBigInt, JsResult};
use std::hash::{Hash, Hasher};

impl JsValue {
    /// Strict equality comparison, the semantics of the `===` operator.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-isstrictlyequal
    #[must_use]
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            // 1. If Type(x) is different from Type(y), return false.
            // 2. If Type(x) is Number or BigInt, then a. Return ! Type(x)::equal(x, y).
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::equal(x, y),
            (Self::Number(x), Self::Number(y)) => x == y,
            // 3. Return ! SameValueNonNumeric(x, y).
            (_, _) => Self::same_value_non_numeric(self, other),
        }
    }

    /// The internal comparison abstract operation `SameValue(x, y)`.
    ///
    /// `SameValue` distinguishes `+0` from `-0` and considers `NaN` equal to
    /// `NaN`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-samevalue
    #[must_use]
    pub fn same_value(x: &Self, y: &Self) -> bool {
        match (x, y) {
            // 1. If Type(x) is different from Type(y), return false.
            // 2. If Type(x) is Number or BigInt, then a. Return ! Type(x)::SameValue(x, y).
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::same_value(x, y),
            (Self::Number(x), Self::Number(y)) => {
                (x.is_nan() && y.is_nan()) || x.to_bits() == y.to_bits()
            }
            // 3. Return ! SameValueNonNumeric(x, y).
            (_, _) => Self::same_value_non_numeric(x, y),
        }
    }

    /// The internal comparison abstract operation `SameValueZero(x, y)`.
    ///
    /// Like `SameValue`, but `+0` and `-0` are considered equal.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-samevaluezero
    #[must_use]
    pub fn same_value_zero(x: &Self, y: &Self) -> bool {
        match (x, y) {
            (Self::BigInt(x), Self::BigInt(y)) => JsBigInt::same_value_zero(x, y),
            (Self::Number(x), Self::Number(y)) => (x.is_nan() && y.is_nan()) || x == y,
            (_, _) => Self::same_value_non_numeric(x, y),
        }
    }

    fn same_value_non_numeric(x: &Self, y: &Self) -> bool {
        debug_assert!(x.type_of() == y.type_of() || x.is_null() || y.is_null());
        match (x, y) {
            (Self::Null, Self::Null) | (Self::Undefined, Self::Undefined) => true,
            (Self::String(x), Self::String(y)) => x == y,
            (Self::Boolean(x), Self::Boolean(y)) => x == y,
            (Self::Object(x), Self::Object(y)) => crate::object::JsObject::equals(x, y),
            (Self::Symbol(x), Self::Symbol(y)) => x == y,
            _ => false,
        }
    }

    /// Abstract equality comparison, the semantics of the `==` operator.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-islooselyequal
    pub fn loosely_equals(&self, other: &Self, context: &mut Context) -> JsResult<bool> {
        // 1. If Type(x) is the same as Type(y), then a. Return the result of performing Strict Equality Comparison x === y.
        if std::mem::discriminant(self) == std::mem::discriminant(other) {
            return Ok(self.strict_equals(other));
        }

        Ok(match (self, other) {
            // 2. If x is null and y is undefined, return true.
            // 3. If x is undefined and y is null, return true.
            (Self::Null, Self::Undefined) | (Self::Undefined, Self::Null) => true,

            // 4. If Type(x) is Number and Type(y) is String, return ! IsLooselyEqual(x, ! ToNumber(y)).
            // 6. If Type(x) is BigInt and Type(y) is String, then
            (Self::Number(_) | Self::BigInt(_), Self::String(_)) => {
                let y = other.to_numeric(context)?;
                return self.loosely_equals(&y.into(), context);
            }
            // 5. If Type(x) is String and Type(y) is Number, return ! IsLooselyEqual(! ToNumber(x), y).
            // 7. If Type(x) is String and Type(y) is BigInt, return ! IsLooselyEqual(y, x).
            (Self::String(_), Self::Number(_) | Self::BigInt(_)) => {
                let x = self.to_numeric(context)?;
                return JsValue::from(x).loosely_equals(other, context);
            }

            // 8. If Type(x) is Boolean, return ! IsLooselyEqual(! ToNumber(x), y).
            (Self::Boolean(x), _) => {
                return other.loosely_equals(&Self::new(i32::from(*x)), context)
            }
            // 9. If Type(y) is Boolean, return ! IsLooselyEqual(x, ! ToNumber(y)).
            (_, Self::Boolean(y)) => {
                return self.loosely_equals(&Self::new(i32::from(*y)), context)
            }

            // 10. If Type(x) is either Number, BigInt, String, or Symbol and Type(y) is Object,
            //     return ! IsLooselyEqual(x, ? ToPrimitive(y)).
            (
                Self::Number(_) | Self::BigInt(_) | Self::String(_) | Self::Symbol(_),
                Self::Object(_),
            ) => {
                let y = other.to_primitive(context, PreferredType::Default)?;
                return self.loosely_equals(&y, context);
            }
            // 11. If Type(x) is Object and Type(y) is either Number, BigInt, String, or Symbol,
            //     return ! IsLooselyEqual(? ToPrimitive(x), y).
            (
                Self::Object(_),
                Self::Number(_) | Self::BigInt(_) | Self::String(_) | Self::Symbol(_),
            ) => {
                let x = self.to_primitive(context, PreferredType::Default)?;
                return x.loosely_equals(other, context);
            }

            // 12. If Type(x) is BigInt and Type(y) is Number, or if Type(x) is Number and Type(y) is BigInt, then
            (Self::BigInt(x), Self::Number(y)) => Self::bigint_equals_number(x, *y),
            (Self::Number(x), Self::BigInt(y)) => Self::bigint_equals_number(y, *x),

            // 13. Return false.
            _ => false,
        })
    }

    /// Compares a `BigInt` and a `Number` by mathematical value, without any
    /// lossy conversion.
    fn bigint_equals_number(x: &JsBigInt, y: f64) -> bool {
        // a. If x or y are any of NaN, +∞𝔽, or -∞𝔽, return false.
        // b. If ℝ(x) = ℝ(y), return true; otherwise return false.
        if !y.is_finite() {
            return false;
        }
        JsBigInt::from_f64(y).is_some_and(|y| JsBigInt::equal(x, &y))
    }
}

/// `PartialEq` of values follows the `SameValueZero` semantics used by the
/// keyed collections.
impl PartialEq for JsValue {
    fn eq(&self, other: &Self) -> bool {
        Self::same_value_zero(self, other)
    }
}

impl Eq for JsValue {}

impl Hash for JsValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Undefined => 0u8.hash(state),
            Self::Null => 1u8.hash(state),
            Self::Boolean(b) => (2u8, b).hash(state),
            Self::String(s) => (3u8, s).hash(state),
            Self::Number(n) => {
                // Canonicalize NaN payloads and the sign of zero so the hash
                // agrees with `SameValueZero`.
                let n = if n.is_nan() { f64::NAN } else { *n + 0.0 };
                (4u8, n.to_bits()).hash(state);
            }
            Self::BigInt(b) => (5u8, b).hash(state),
            Self::Object(o) => (6u8, o.hash_key()).hash(state),
            Self::Symbol(s) => (7u8, s).hash(state),
        }
    }
}
