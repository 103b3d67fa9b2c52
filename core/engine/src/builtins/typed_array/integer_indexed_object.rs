//! The internal state of integer-indexed (typed array) exotic objects.
//!
//! A view is a function of (backing buffer, byte offset, element length,
//! element kind). A view created without an explicit length over a resizable
//! buffer is *length-tracking*: its length is recomputed from the current
//! buffer length on every access.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-integer-indexed-exotic-objects

use super::element::TypedArrayKind;
use crate::{
    gc::{custom_trace, Finalize, Trace},
    object::JsObject,
    Context, JsResult, JsValue,
};

/// The internal slots of a typed array view.
#[derive(Debug, Finalize)]
pub struct IntegerIndexed {
    viewed_array_buffer: JsObject,
    kind: TypedArrayKind,
    byte_offset: u64,
    /// `None` marks a length-tracking view.
    array_length: Option<u64>,
}

unsafe impl Trace for IntegerIndexed {
    custom_trace!(this, {
        mark(&this.viewed_array_buffer);
    });
}

impl IntegerIndexed {
    /// Creates the internal state of a view.
    pub(crate) fn new(
        viewed_array_buffer: JsObject,
        kind: TypedArrayKind,
        byte_offset: u64,
        array_length: Option<u64>,
    ) -> Self {
        Self {
            viewed_array_buffer,
            kind,
            byte_offset,
            array_length,
        }
    }

    /// The buffer object this view reads through.
    #[must_use]
    pub fn viewed_array_buffer(&self) -> &JsObject {
        &self.viewed_array_buffer
    }

    /// The element kind of the view.
    #[must_use]
    pub fn kind(&self) -> TypedArrayKind {
        self.kind
    }

    /// The byte offset of the view into the buffer.
    #[must_use]
    pub fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    /// Whether the view tracks the buffer length.
    #[must_use]
    pub fn is_length_tracking(&self) -> bool {
        self.array_length.is_none()
    }

    /// The fixed length of the view, if it is not length-tracking.
    #[must_use]
    pub fn fixed_length(&self) -> Option<u64> {
        self.array_length
    }
}

/// Computes the current element length of a typed array view.
///
/// Returns `None` if the buffer is detached or the view is out of bounds,
/// which is what most operations surface as a `TypeError`.
pub(crate) fn typed_array_length(obj: &JsObject) -> Option<u64> {
    let (buffer_obj, kind, byte_offset, array_length) = {
        let borrowed = obj.borrow();
        let view = borrowed.as_integer_indexed()?;
        (
            view.viewed_array_buffer().clone(),
            view.kind(),
            view.byte_offset(),
            view.fixed_length(),
        )
    };

    let buffer_borrow = buffer_obj.borrow();
    let buffer = buffer_borrow.as_array_buffer()?;
    if buffer.is_detached_buffer() {
        return None;
    }
    let buffer_length = buffer.byte_length();

    match array_length {
        Some(length) => {
            // A fixed-length view is out of bounds when its last byte no
            // longer fits the (possibly shrunk) buffer.
            let byte_end = byte_offset + length * kind.element_size();
            (byte_end <= buffer_length).then_some(length)
        }
        None => {
            // A length-tracking view recomputes from the current buffer
            // length.
            (byte_offset <= buffer_length)
                .then(|| (buffer_length - byte_offset) / kind.element_size())
        }
    }
}

/// Abstract operation `IsValidIntegerIndex ( O, index )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-isvalidintegerindex
pub(crate) fn is_valid_integer_index(obj: &JsObject, index: f64) -> bool {
    // 1-2. The view must be in bounds.
    let Some(length) = typed_array_length(obj) else {
        return false;
    };

    // 3. If ! IsIntegralNumber(index) is false, return false.
    if index.trunc() != index || index.is_nan() {
        return false;
    }
    // 4. If index is -0𝔽, return false.
    if index == 0.0 && index.is_sign_negative() {
        return false;
    }
    // 5-6. If index < 0 or index ≥ O.[[ArrayLength]], return false.
    (0.0..length as f64).contains(&index)
}

/// Abstract operation `IntegerIndexedElementGet ( O, index )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integerindexedelementget
pub(crate) fn integer_indexed_element_get(obj: &JsObject, index: f64) -> Option<JsValue> {
    // 1. If ! IsValidIntegerIndex(O, index) is false, return undefined.
    if !is_valid_integer_index(obj, index) {
        return None;
    }

    let (buffer_obj, kind, byte_offset) = {
        let borrowed = obj.borrow();
        let view = borrowed
            .as_integer_indexed()
            .expect("the index validation already checked the view");
        (
            view.viewed_array_buffer().clone(),
            view.kind(),
            view.byte_offset(),
        )
    };

    // 2-4. Read the element bytes in host endianness.
    let buffer_borrow = buffer_obj.borrow();
    let buffer = buffer_borrow
        .as_array_buffer()
        .expect("views always wrap array buffers");
    let data = buffer.bytes().expect("the view is not detached");
    let start = (byte_offset + index as u64 * kind.element_size()) as usize;
    Some(kind.get_element(&data[start..], cfg!(target_endian = "little")))
}

/// Abstract operation `IntegerIndexedElementSet ( O, index, value )`.
///
/// The value conversion runs before the bounds check, so its side effects
/// are observable even when the write is silently dropped.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-integerindexedelementset
pub(crate) fn integer_indexed_element_set(
    obj: &JsObject,
    index: f64,
    value: &JsValue,
    context: &mut Context,
) -> JsResult<()> {
    let kind = {
        let borrowed = obj.borrow();
        borrowed
            .as_integer_indexed()
            .expect("element set is only called on typed arrays")
            .kind()
    };

    // 1-2. Convert the value first.
    let bytes = kind.value_to_bytes(value, cfg!(target_endian = "little"), context)?;

    // 3. If ! IsValidIntegerIndex(O, index) is true, write the bytes.
    if is_valid_integer_index(obj, index) {
        let (buffer_obj, byte_offset) = {
            let borrowed = obj.borrow();
            let view = borrowed
                .as_integer_indexed()
                .expect("the index validation already checked the view");
            (view.viewed_array_buffer().clone(), view.byte_offset())
        };
        let mut buffer_borrow = buffer_obj.borrow_mut();
        let buffer = buffer_borrow
            .as_array_buffer_mut()
            .expect("views always wrap array buffers");
        let data = buffer.bytes_mut().expect("the view is not detached");
        let start = (byte_offset + index as u64 * kind.element_size()) as usize;
        data[start..start + bytes.len()].copy_from_slice(&bytes);
    }

    // 4. Return unused.
    Ok(())
}
