//! The `BigInt` primitive type.

use crate::{
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    JsResult, JsString,
};
use num_integer::Integer;
use num_traits::{pow::Pow, FromPrimitive, ToPrimitive, Zero};
use std::{
    fmt::{self, Display},
    ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub},
    rc::Rc,
};

/// The raw bigint type.
pub type RawBigInt = num_bigint::BigInt;

/// JavaScript bigint primitive rust type.
///
/// Cloning is cheap: the underlying arbitrary-precision integer is reference
/// counted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Finalize)]
pub struct JsBigInt {
    inner: Rc<RawBigInt>,
}

// BigInts never contain GC'd objects.
unsafe impl Trace for JsBigInt {
    empty_trace!();
}

impl JsBigInt {
    /// Creates a new [`JsBigInt`].
    #[must_use]
    pub fn new<T: Into<Self>>(value: T) -> Self {
        value.into()
    }

    /// Creates a [`JsBigInt`] with value `0`.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            inner: Rc::new(RawBigInt::zero()),
        }
    }

    /// Checks if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Converts the bigint to a string with the given radix.
    #[must_use]
    pub fn to_string_radix(&self, radix: u32) -> String {
        self.inner.to_str_radix(radix)
    }

    /// Converts the `BigInt` to an `f64` value.
    ///
    /// Returns `f64::INFINITY` if the `BigInt` is too big.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.inner.to_f64().unwrap_or(f64::INFINITY)
    }

    /// Creates a `BigInt` from a finite `f64` that is an exact integer.
    #[must_use]
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() && value.trunc() == value {
            RawBigInt::from_f64(value).map(Self::from)
        } else {
            None
        }
    }

    /// Converts a string to a `BigInt` with the specified radix.
    #[must_use]
    pub fn from_string_radix(buf: &str, radix: u32) -> Option<Self> {
        Some(Self {
            inner: Rc::new(RawBigInt::parse_bytes(buf.as_bytes(), radix)?),
        })
    }

    /// The string conversion part of the abstract operation
    /// [`StringToBigInt ( str )`][spec].
    ///
    /// A sign is only accepted for decimal literals; the `0b`/`0o`/`0x`
    /// prefixed forms are unsigned, and a trailing `n` is not part of the
    /// grammar.
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-stringtobigint
    #[must_use]
    pub fn from_string(string: &str) -> Option<Self> {
        let string = string.trim_matches(JsString::is_trimmable_whitespace);

        if string.is_empty() {
            return Some(Self::zero());
        }

        let (radix, digits) = if let Some(digits) =
            string.strip_prefix("0b").or_else(|| string.strip_prefix("0B"))
        {
            (2, digits)
        } else if let Some(digits) = string.strip_prefix("0o").or_else(|| string.strip_prefix("0O"))
        {
            (8, digits)
        } else if let Some(digits) = string.strip_prefix("0x").or_else(|| string.strip_prefix("0X"))
        {
            (16, digits)
        } else {
            (10, string)
        };

        // A sign is only valid on decimal literals.
        if radix != 10 && digits.starts_with(['+', '-']) {
            return None;
        }
        if radix == 10 && digits.len() > 1 && digits[1..].starts_with(['+', '-']) {
            return None;
        }

        Self::from_string_radix(digits, radix)
    }

    /// Checks for `SameValueZero` equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-sameValueZero
    #[must_use]
    pub fn same_value_zero(x: &Self, y: &Self) -> bool {
        Self::equal(x, y)
    }

    /// Checks for `SameValue` equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-sameValue
    #[must_use]
    pub fn same_value(x: &Self, y: &Self) -> bool {
        Self::equal(x, y)
    }

    /// Checks for mathematical equality.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-numeric-types-bigint-equal
    #[must_use]
    pub fn equal(x: &Self, y: &Self) -> bool {
        x == y
    }

    /// Returns `x` to the power `y`.
    pub fn pow(x: &Self, y: &Self) -> JsResult<Self> {
        let y = y
            .inner
            .to_biguint()
            .ok_or_else(|| JsNativeError::range().with_message("BigInt negative exponent"))?;

        let num_bits = (x.inner.bits() as f64
            * y.to_f64().expect("conversion from BigUint to f64 is infallible"))
        .floor()
            + 1f64;

        if num_bits > 1_000_000_000f64 {
            return Err(JsNativeError::range()
                .with_message("Maximum BigInt size exceeded")
                .into());
        }

        Ok(Self::new(x.inner.as_ref().clone().pow(y)))
    }

    /// Performs the `>>` operation.
    pub fn shift_right(x: &Self, y: &Self) -> JsResult<Self> {
        match y.inner.to_i32() {
            Some(n) if n > 0 => Ok(Self::new(x.inner.as_ref().clone().shr(n as usize))),
            Some(n) => Ok(Self::new(x.inner.as_ref().clone().shl(n.unsigned_abs()))),
            None => Err(JsNativeError::range()
                .with_message("Maximum BigInt size exceeded")
                .into()),
        }
    }

    /// Performs the `<<` operation.
    pub fn shift_left(x: &Self, y: &Self) -> JsResult<Self> {
        match y.inner.to_i32() {
            Some(n) if n > 0 => Ok(Self::new(x.inner.as_ref().clone().shl(n as usize))),
            Some(n) => Ok(Self::new(x.inner.as_ref().clone().shr(n.unsigned_abs()))),
            None => Err(JsNativeError::range()
                .with_message("Maximum BigInt size exceeded")
                .into()),
        }
    }

    /// Floored integer modulo.
    #[must_use]
    pub fn mod_floor(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.mod_floor(&y.inner))
    }

    /// Performs the `+` operation.
    #[must_use]
    pub fn add(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().add(y.inner.as_ref()))
    }

    /// Performs the `-` operation.
    #[must_use]
    pub fn sub(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().sub(y.inner.as_ref()))
    }

    /// Performs the `*` operation.
    #[must_use]
    pub fn mul(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().mul(y.inner.as_ref()))
    }

    /// Performs the `/` operation.
    #[must_use]
    pub fn div(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().div(y.inner.as_ref()))
    }

    /// Performs the `%` operation.
    #[must_use]
    pub fn rem(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().rem(y.inner.as_ref()))
    }

    /// Performs the `&` operation.
    #[must_use]
    pub fn bitand(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().bitand(y.inner.as_ref()))
    }

    /// Performs the `|` operation.
    #[must_use]
    pub fn bitor(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().bitor(y.inner.as_ref()))
    }

    /// Performs the `^` operation.
    #[must_use]
    pub fn bitxor(x: &Self, y: &Self) -> Self {
        Self::new(x.inner.as_ref().clone().bitxor(y.inner.as_ref()))
    }

    /// Performs the unary `-` operation.
    #[must_use]
    pub fn neg(x: &Self) -> Self {
        Self::new(x.as_inner().neg())
    }

    /// Performs the unary `~` operation.
    #[must_use]
    pub fn not(x: &Self) -> Self {
        Self::new(!x.as_inner())
    }

    /// Abstract operation [`BigInt::asIntN ( bits, bigint )`][spec]: reduces
    /// the value modulo 2^bits, reinterpreted as a signed integer.
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.asintn
    #[must_use]
    pub fn as_int_n(bits: u32, bigint: &Self) -> Self {
        if bits == 0 {
            return Self::zero();
        }
        let modulus = RawBigInt::from(1u8) << bits;
        let mut value = bigint.inner.mod_floor(&modulus);
        if value >= modulus.clone() >> 1u8 {
            value -= modulus;
        }
        Self::from(value)
    }

    /// Abstract operation [`BigInt::asUintN ( bits, bigint )`][spec]: reduces
    /// the value modulo 2^bits, reinterpreted as an unsigned integer.
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-bigint.asuintn
    #[must_use]
    pub fn as_uint_n(bits: u32, bigint: &Self) -> Self {
        if bits == 0 {
            return Self::zero();
        }
        let modulus = RawBigInt::from(1u8) << bits;
        Self::from(bigint.inner.mod_floor(&modulus))
    }

    /// Reduces the value mod 2^64 and reinterprets it as a signed 64-bit
    /// integer, for `BigInt64Array` element writes.
    #[must_use]
    pub fn to_big_int64(&self) -> i64 {
        let int = Self::as_int_n(64, self);
        int.inner
            .to_i64()
            .expect("value reduced mod 2^64 fits in an i64")
    }

    /// Reduces the value mod 2^64 and reinterprets it as an unsigned 64-bit
    /// integer, for `BigUint64Array` element writes.
    #[must_use]
    pub fn to_big_uint64(&self) -> u64 {
        let int = Self::as_uint_n(64, self);
        int.inner
            .to_u64()
            .expect("value reduced mod 2^64 fits in a u64")
    }

    pub(crate) fn as_inner(&self) -> &RawBigInt {
        &self.inner
    }
}

impl Display for JsBigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl From<RawBigInt> for JsBigInt {
    fn from(value: RawBigInt) -> Self {
        Self {
            inner: Rc::new(value),
        }
    }
}

macro_rules! bigint_from_integer {
    ( $( $int:ty ),* ) => {
        $(
            impl From<$int> for JsBigInt {
                fn from(value: $int) -> Self {
                    Self {
                        inner: Rc::new(RawBigInt::from(value)),
                    }
                }
            }
        )*
    };
}

bigint_from_integer!(i8, u8, i16, u16, i32, u32, i64, u64, i128, u128, isize, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_to_bigint_grammar() {
        assert_eq!(JsBigInt::from_string("42"), Some(JsBigInt::from(42)));
        assert_eq!(JsBigInt::from_string("  -7 "), Some(JsBigInt::from(-7)));
        assert_eq!(JsBigInt::from_string("0xff"), Some(JsBigInt::from(255)));
        assert_eq!(JsBigInt::from_string("0b101"), Some(JsBigInt::from(5)));
        assert_eq!(JsBigInt::from_string("0o17"), Some(JsBigInt::from(15)));
        assert_eq!(JsBigInt::from_string(""), Some(JsBigInt::zero()));
        // Sign is decimal-only and a trailing `n` is not grammar.
        assert_eq!(JsBigInt::from_string("0x-1"), None);
        assert_eq!(JsBigInt::from_string("-0x1"), None);
        assert_eq!(JsBigInt::from_string("10n"), None);
    }

    #[test]
    fn from_f64_rejects_non_integers() {
        assert_eq!(JsBigInt::from_f64(3.0), Some(JsBigInt::from(3)));
        assert_eq!(JsBigInt::from_f64(3.5), None);
        assert_eq!(JsBigInt::from_f64(f64::NAN), None);
        assert_eq!(JsBigInt::from_f64(f64::INFINITY), None);
    }

    #[test]
    fn modular_truncation() {
        let v = JsBigInt::from(u128::from(u64::MAX) + 7);
        assert_eq!(v.to_big_uint64(), 6);
        let v = JsBigInt::from(-1);
        assert_eq!(v.to_big_uint64(), u64::MAX);
        assert_eq!(v.to_big_int64(), -1);
        let v = JsBigInt::from(i128::from(i64::MAX) + 1);
        assert_eq!(v.to_big_int64(), i64::MIN);
    }

    #[test]
    fn as_int_n_wraps() {
        assert_eq!(
            JsBigInt::as_int_n(8, &JsBigInt::from(255)),
            JsBigInt::from(-1)
        );
        assert_eq!(
            JsBigInt::as_uint_n(8, &JsBigInt::from(-1)),
            JsBigInt::from(255)
        );
        assert_eq!(JsBigInt::as_int_n(0, &JsBigInt::from(9)), JsBigInt::zero());
    }
}
