//! The ECMAScript value type.
//!
//! A [`JsValue`] is one of the eight language types: Undefined, Null,
//! Boolean, String, Symbol, Number, BigInt, and Object.

mod conversions;
mod display;
mod equality;
mod integer;

#[cfg(test)]
mod tests;

pub use display::ValueDisplay;
pub use integer::{IntegerOrInfinity, IntegerOrNan};

use crate::{
    gc::{custom_trace, Finalize, Trace},
    object::JsObject,
    JsBigInt, JsString, JsSymbol,
};

/// A Javascript value.
///
/// The `PartialEq` implementation of this type follows the `SameValueZero`
/// algorithm, which is also the key equality of `Map` and `Set`: `NaN` is
/// equal to itself and `+0` is equal to `-0`. Use [`JsValue::strict_equals`]
/// for the semantics of the `===` operator.
#[derive(Debug, Clone, Default, Finalize)]
pub enum JsValue {
    /// `null` - A null value, for when a value doesn't exist.
    Null,
    /// `undefined` - An undefined value, for when a field or index doesn't exist.
    #[default]
    Undefined,
    /// `boolean` - A `true` / `false` value.
    Boolean(bool),
    /// `String` - A UTF-16 string, such as `"Hello, world"`.
    String(JsString),
    /// `Number` - A 64-bit floating point number, such as `3.1415`.
    Number(f64),
    /// `BigInt` - An arbitrary-precision integer, such as `0xFFFF_FFFF_FFFF_FFFFn`.
    BigInt(JsBigInt),
    /// `Object` - A reference to an object: ordinary objects, arrays,
    /// functions, and every other object kind.
    Object(JsObject),
    /// `Symbol` - A unique, non-enumerable property key.
    Symbol(JsSymbol),
}

unsafe impl Trace for JsValue {
    custom_trace!(this, {
        if let JsValue::Object(o) = this {
            mark(o);
        }
    });
}

impl JsValue {
    /// Creates a new `JsValue`.
    pub fn new<T>(value: T) -> Self
    where
        T: Into<Self>,
    {
        value.into()
    }

    /// Creates a new `undefined` value.
    #[must_use]
    pub const fn undefined() -> Self {
        Self::Undefined
    }

    /// Creates a new `null` value.
    #[must_use]
    pub const fn null() -> Self {
        Self::Null
    }

    /// Creates a new number value with `NaN`.
    #[must_use]
    pub const fn nan() -> Self {
        Self::Number(f64::NAN)
    }

    /// Creates a new number value with `+∞`.
    #[must_use]
    pub const fn positive_infinity() -> Self {
        Self::Number(f64::INFINITY)
    }

    /// Creates a new number value with `−∞`.
    #[must_use]
    pub const fn negative_infinity() -> Self {
        Self::Number(f64::NEG_INFINITY)
    }

    /// Returns true if the value is `undefined`.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns true if the value is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true if the value is `null` or `undefined`.
    #[must_use]
    pub const fn is_null_or_undefined(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns true if the value is a boolean.
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Returns the boolean if the value is a boolean.
    #[must_use]
    pub const fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(boolean) => Some(*boolean),
            _ => None,
        }
    }

    /// Returns true if the value is a number.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns the number if the value is a number.
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns true if the value is a string.
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns the string if the value is a string.
    #[must_use]
    pub const fn as_string(&self) -> Option<&JsString> {
        match self {
            Self::String(string) => Some(string),
            _ => None,
        }
    }

    /// Returns true if the value is a symbol.
    #[must_use]
    pub const fn is_symbol(&self) -> bool {
        matches!(self, Self::Symbol(_))
    }

    /// Returns the symbol if the value is a symbol.
    #[must_use]
    pub const fn as_symbol(&self) -> Option<&JsSymbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns true if the value is a bigint.
    #[must_use]
    pub const fn is_bigint(&self) -> bool {
        matches!(self, Self::BigInt(_))
    }

    /// Returns the bigint if the value is a bigint.
    #[must_use]
    pub const fn as_bigint(&self) -> Option<&JsBigInt> {
        match self {
            Self::BigInt(bigint) => Some(bigint),
            _ => None,
        }
    }

    /// Returns true if the value is an object.
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the object if the value is an object.
    #[must_use]
    pub const fn as_object(&self) -> Option<&JsObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns true if the value is a callable object.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Object(object) if object.is_callable())
    }

    /// Returns the callable object, if the value is callable.
    #[must_use]
    pub fn as_callable(&self) -> Option<&JsObject> {
        self.as_object().filter(|object| object.is_callable())
    }

    /// Returns the constructor object, if the value is a constructor.
    #[must_use]
    pub fn as_constructor(&self) -> Option<&JsObject> {
        self.as_object().filter(|object| object.is_constructor())
    }

    /// The abstract operation `typeof`, returning the type tag of the value.
    #[must_use]
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Boolean(_) => "boolean",
            Self::Symbol(_) => "symbol",
            Self::Null => "object",
            Self::Undefined => "undefined",
            Self::BigInt(_) => "bigint",
            Self::Object(object) => {
                if object.is_callable() {
                    "function"
                } else {
                    "object"
                }
            }
        }
    }

    /// A display wrapper for the value, usable in format strings.
    #[must_use]
    pub const fn display(&self) -> ValueDisplay<'_> {
        ValueDisplay { value: self }
    }
}

impl From<bool> for JsValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<JsString> for JsValue {
    fn from(value: JsString) -> Self {
        Self::String(value)
    }
}

impl From<&JsString> for JsValue {
    fn from(value: &JsString) -> Self {
        Self::String(value.clone())
    }
}

impl From<&str> for JsValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for JsValue {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<char> for JsValue {
    fn from(value: char) -> Self {
        Self::String(value.into())
    }
}

impl From<JsSymbol> for JsValue {
    fn from(value: JsSymbol) -> Self {
        Self::Symbol(value)
    }
}

impl From<JsBigInt> for JsValue {
    fn from(value: JsBigInt) -> Self {
        Self::BigInt(value)
    }
}

impl From<JsObject> for JsValue {
    fn from(value: JsObject) -> Self {
        Self::Object(value)
    }
}

impl From<&JsObject> for JsValue {
    fn from(value: &JsObject) -> Self {
        Self::Object(value.clone())
    }
}

impl From<f64> for JsValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<f32> for JsValue {
    fn from(value: f32) -> Self {
        Self::Number(value.into())
    }
}

macro_rules! value_from_integer {
    ( $( $int:ty ),* ) => {
        $(
            impl From<$int> for JsValue {
                #[allow(trivial_numeric_casts)]
                fn from(value: $int) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

// Integers above 2^53 lose precision, exactly as ECMAScript prescribes for
// number conversions.
value_from_integer!(i8, u8, i16, u16, i32, u32, i64, u64, isize, usize);

impl From<IntegerOrInfinity> for JsValue {
    fn from(value: IntegerOrInfinity) -> Self {
        match value {
            IntegerOrInfinity::Integer(integer) => Self::new(integer),
            IntegerOrInfinity::PositiveInfinity => Self::positive_infinity(),
            IntegerOrInfinity::NegativeInfinity => Self::negative_infinity(),
        }
    }
}

/// Utility trait for accessing argument lists.
pub trait JsArgs {
    /// Utility function to `get` a parameter from a `[JsValue]` or default
    /// to `JsValue::Undefined` if `get` returns `None`.
    ///
    /// Call this if you are thinking of calling something similar to
    /// `args.get(n).cloned().unwrap_or_default()` or
    /// `args.get(n).unwrap_or(&undefined)`.
    fn get_or_undefined(&self, index: usize) -> &JsValue;
}

impl JsArgs for [JsValue] {
    fn get_or_undefined(&self, index: usize) -> &JsValue {
        const UNDEFINED: &JsValue = &JsValue::Undefined;
        self.get(index).unwrap_or(UNDEFINED)
    }
}

/// The hint of the abstract operation `ToPrimitive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferredType {
    /// Hint `"string"`.
    String,
    /// Hint `"number"`.
    Number,
    /// Hint `"default"`.
    Default,
}

/// The type of a numeric value: a `Number` or a `BigInt`.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    /// A `Number` numeric value.
    Number(f64),
    /// A `BigInt` numeric value.
    BigInt(JsBigInt),
}

impl From<Numeric> for JsValue {
    fn from(value: Numeric) -> Self {
        match value {
            Numeric::Number(number) => Self::Number(number),
            Numeric::BigInt(bigint) => Self::BigInt(bigint),
        }
    }
}

pub(crate) use conversions::{f64_to_uint32, string_to_number};
