//! The element kinds of typed arrays, and their byte codecs.

use crate::{
    gc::{empty_trace, Finalize, Trace},
    Context, JsBigInt, JsResult, JsValue,
};

/// The content type of an element kind: `Number` or `BigInt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentType {
    Number,
    BigInt,
}

/// The twelve concrete element kinds of typed arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Finalize)]
pub enum TypedArrayKind {
    /// The element kind of `Int8Array`.
    Int8,
    /// The element kind of `Uint8Array`.
    Uint8,
    /// The element kind of `Uint8ClampedArray`.
    Uint8Clamped,
    /// The element kind of `Int16Array`.
    Int16,
    /// The element kind of `Uint16Array`.
    Uint16,
    /// The element kind of `Int32Array`.
    Int32,
    /// The element kind of `Uint32Array`.
    Uint32,
    /// The element kind of `Float32Array`.
    Float32,
    /// The element kind of `Float64Array`.
    Float64,
    /// The element kind of `BigInt64Array`.
    BigInt64,
    /// The element kind of `BigUint64Array`.
    BigUint64,
}

unsafe impl Trace for TypedArrayKind {
    empty_trace!();
}

impl TypedArrayKind {
    /// The size of one element, in bytes.
    #[must_use]
    pub const fn element_size(self) -> u64 {
        match self {
            Self::Int8 | Self::Uint8 | Self::Uint8Clamped => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Float64 | Self::BigInt64 | Self::BigUint64 => 8,
        }
    }

    /// The content type of the element kind.
    pub(crate) const fn content_type(self) -> ContentType {
        match self {
            Self::BigInt64 | Self::BigUint64 => ContentType::BigInt,
            _ => ContentType::Number,
        }
    }

    /// The constructor name of the element kind.
    #[must_use]
    pub const fn js_name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8Array",
            Self::Uint8 => "Uint8Array",
            Self::Uint8Clamped => "Uint8ClampedArray",
            Self::Int16 => "Int16Array",
            Self::Uint16 => "Uint16Array",
            Self::Int32 => "Int32Array",
            Self::Uint32 => "Uint32Array",
            Self::Float32 => "Float32Array",
            Self::Float64 => "Float64Array",
            Self::BigInt64 => "BigInt64Array",
            Self::BigUint64 => "BigUint64Array",
        }
    }

    /// Decodes the element starting at `bytes[0]` into a value.
    ///
    /// `bytes` must hold at least `element_size` bytes.
    pub(crate) fn get_element(self, bytes: &[u8], little_endian: bool) -> JsValue {
        macro_rules! decode {
            ($ty:ty) => {{
                let mut buf = [0u8; std::mem::size_of::<$ty>()];
                buf.copy_from_slice(&bytes[..std::mem::size_of::<$ty>()]);
                if little_endian {
                    <$ty>::from_le_bytes(buf)
                } else {
                    <$ty>::from_be_bytes(buf)
                }
            }};
        }

        match self {
            Self::Int8 => JsValue::new(decode!(i8)),
            Self::Uint8 | Self::Uint8Clamped => JsValue::new(decode!(u8)),
            Self::Int16 => JsValue::new(decode!(i16)),
            Self::Uint16 => JsValue::new(decode!(u16)),
            Self::Int32 => JsValue::new(decode!(i32)),
            Self::Uint32 => JsValue::new(decode!(u32)),
            Self::Float32 => JsValue::new(f64::from(decode!(f32))),
            Self::Float64 => JsValue::new(decode!(f64)),
            Self::BigInt64 => JsValue::new(JsBigInt::from(decode!(i64))),
            Self::BigUint64 => JsValue::new(JsBigInt::from(decode!(u64))),
        }
    }

    /// Converts a value into the element representation, then encodes it.
    ///
    /// The conversion happens before any bounds check, so its side effects
    /// (valueOf calls, thrown errors) are observable even on detached
    /// views.
    pub(crate) fn value_to_bytes(
        self,
        value: &JsValue,
        little_endian: bool,
        context: &mut Context,
    ) -> JsResult<Vec<u8>> {
        macro_rules! encode {
            ($v:expr) => {{
                let v = $v;
                if little_endian {
                    v.to_le_bytes().to_vec()
                } else {
                    v.to_be_bytes().to_vec()
                }
            }};
        }

        Ok(match self {
            Self::Int8 => encode!(value.to_u32(context)? as u8 as i8),
            Self::Uint8 => encode!(value.to_u32(context)? as u8),
            Self::Uint8Clamped => encode!(to_uint8_clamp(value, context)?),
            Self::Int16 => encode!(value.to_u32(context)? as u16 as i16),
            Self::Uint16 => encode!(value.to_u32(context)? as u16),
            Self::Int32 => encode!(value.to_i32(context)?),
            Self::Uint32 => encode!(value.to_u32(context)?),
            Self::Float32 => encode!(value.to_number(context)? as f32),
            Self::Float64 => encode!(value.to_number(context)?),
            Self::BigInt64 => encode!(value.to_bigint(context)?.to_big_int64()),
            Self::BigUint64 => encode!(value.to_bigint(context)?.to_big_uint64()),
        })
    }
}

/// Abstract operation `ToUint8Clamp ( argument )`: saturates into `[0, 255]`
/// and rounds ties to even.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-touint8clamp
fn to_uint8_clamp(value: &JsValue, context: &mut Context) -> JsResult<u8> {
    let number = value.to_number(context)?;
    if number.is_nan() || number <= 0.0 {
        return Ok(0);
    }
    if number >= 255.0 {
        return Ok(255);
    }
    let floor = number.floor();
    let diff = number - floor;
    let clamped = if diff > 0.5 {
        floor + 1.0
    } else if diff < 0.5 {
        floor
    } else if floor % 2.0 == 0.0 {
        // Ties round to even.
        floor
    } else {
        floor + 1.0
    };
    Ok(clamped as u8)
}
