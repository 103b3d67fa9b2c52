//! The global `ArrayBuffer` object.
//!
//! The byte store is shared by every view created over the buffer; a resize
//! only changes the observable byte length, and all views revalidate against
//! it on their next access.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-arraybuffer-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/ArrayBuffer

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::Attribute,
    symbol::WellKnownSymbols,
    value::{IntegerOrInfinity, JsArgs},
    Context, JsResult, JsValue,
};

/// The internal representation of an `ArrayBuffer` object.
///
/// A detached buffer has no data; a resizable buffer carries its
/// `maxByteLength`.
#[derive(Debug, Default, Finalize)]
pub struct ArrayBuffer {
    data: Option<Vec<u8>>,
    max_byte_length: Option<u64>,
}

unsafe impl Trace for ArrayBuffer {
    empty_trace!();
}

impl ArrayBuffer {
    /// Creates a new byte store of the given length.
    pub(crate) fn with_byte_length(byte_length: u64, max_byte_length: Option<u64>) -> Self {
        Self {
            data: Some(vec![0; byte_length as usize]),
            max_byte_length,
        }
    }

    /// The current byte length, or 0 when detached.
    #[must_use]
    pub fn byte_length(&self) -> u64 {
        self.data.as_ref().map_or(0, |d| d.len() as u64)
    }

    /// The maximum byte length of a resizable buffer.
    #[must_use]
    pub fn max_byte_length(&self) -> Option<u64> {
        self.max_byte_length
    }

    /// Abstract operation `IsDetachedBuffer ( arrayBuffer )`.
    #[must_use]
    pub fn is_detached_buffer(&self) -> bool {
        self.data.is_none()
    }

    /// Abstract operation `DetachArrayBuffer ( arrayBuffer )`: severs the
    /// byte store. Reachable by hosts, not by script.
    pub fn detach_buffer(&mut self) -> Option<Vec<u8>> {
        self.data.take()
    }

    /// The bytes of the buffer, if not detached.
    pub(crate) fn bytes(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// The mutable bytes of the buffer, if not detached.
    pub(crate) fn bytes_mut(&mut self) -> Option<&mut [u8]> {
        self.data.as_deref_mut()
    }

    /// Resizes the byte store, preserving the prefix and zero-filling
    /// growth.
    pub(crate) fn resize_bytes(&mut self, new_byte_length: u64) {
        if let Some(data) = &mut self.data {
            data.resize(new_byte_length as usize, 0);
        }
    }
}

impl BuiltIn for ArrayBuffer {
    const NAME: &'static str = "ArrayBuffer";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_species = FunctionBuilder::native(context, Self::get_species)
            .name("get [Symbol.species]")
            .build();
        let get_byte_length = FunctionBuilder::native(context, Self::get_byte_length)
            .name("get byteLength")
            .build();
        let get_max_byte_length = FunctionBuilder::native(context, Self::get_max_byte_length)
            .name("get maxByteLength")
            .build();
        let get_resizable = FunctionBuilder::native(context, Self::get_resizable)
            .name("get resizable")
            .build();

        let flag_attributes = Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE;
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().array_buffer().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .static_accessor(
            WellKnownSymbols::species(),
            Some(get_species),
            None,
            Attribute::CONFIGURABLE,
        )
        .static_method(Self::is_view, "isView", 1)
        .accessor("byteLength", Some(get_byte_length), None, flag_attributes)
        .accessor(
            "maxByteLength",
            Some(get_max_byte_length),
            None,
            flag_attributes,
        )
        .accessor("resizable", Some(get_resizable), None, flag_attributes)
        .method(Self::resize, "resize", 1)
        .method(Self::slice, "slice", 2)
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .build();

        Some(object.into())
    }
}

impl ArrayBuffer {
    /// `ArrayBuffer ( length [ , options ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraybuffer-length
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("ArrayBuffer constructor requires new")
                .into());
        }

        // 2. Let byteLength be ? ToIndex(length).
        let byte_length = args.get_or_undefined(0).to_index(context)?;

        // 3. Let requestedMaxByteLength be ? GetArrayBufferMaxByteLengthOption(options).
        let max_byte_length = get_max_byte_length_option(args.get_or_undefined(1), context)?;
        if let Some(max_byte_length) = max_byte_length {
            // `AllocateArrayBuffer`: maxByteLength < byteLength is a RangeError.
            if byte_length > max_byte_length {
                return Err(JsNativeError::range()
                    .with_message("ArrayBuffer length cannot exceed maxByteLength")
                    .into());
            }
        }

        // 4. Return ? AllocateArrayBuffer(NewTarget, byteLength, requestedMaxByteLength).
        let prototype = get_prototype_from_constructor(
            new_target,
            StandardConstructors::array_buffer,
            context,
        )?;
        Ok(JsObject::from_proto_and_data(
            prototype,
            ObjectData::array_buffer(Self::with_byte_length(byte_length, max_byte_length)),
        )
        .into())
    }

    /// `get ArrayBuffer [ @@species ]`
    #[allow(clippy::unnecessary_wraps)]
    fn get_species(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return the this value.
        Ok(this.clone())
    }

    /// `ArrayBuffer.isView ( arg )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraybuffer.isview
    #[allow(clippy::unnecessary_wraps)]
    fn is_view(_: &JsValue, args: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. If arg has a [[ViewedArrayBuffer]] internal slot, return true.
        Ok(args
            .get_or_undefined(0)
            .as_object()
            .map_or(false, |obj| {
                let borrowed = obj.borrow();
                borrowed.as_data_view().is_some() || borrowed.as_integer_indexed().is_some()
            })
            .into())
    }

    /// Helper to read the buffer data of a receiver.
    fn this_array_buffer<R, F>(this: &JsValue, f: F) -> JsResult<R>
    where
        F: FnOnce(&mut ArrayBuffer) -> R,
    {
        if let Some(obj) = this.as_object() {
            if let Some(buffer) = obj.borrow_mut().as_array_buffer_mut() {
                return Ok(f(buffer));
            }
        }
        Err(JsNativeError::typ()
            .with_message("'this' is not an ArrayBuffer")
            .into())
    }

    /// `get ArrayBuffer.prototype.byteLength`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-get-arraybuffer.prototype.bytelength
    fn get_byte_length(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_array_buffer(this, |buffer| JsValue::from(buffer.byte_length()))
    }

    /// `get ArrayBuffer.prototype.maxByteLength`
    fn get_max_byte_length(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_array_buffer(this, |buffer| {
            JsValue::from(buffer.max_byte_length.unwrap_or_else(|| buffer.byte_length()))
        })
    }

    /// `get ArrayBuffer.prototype.resizable`
    fn get_resizable(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Self::this_array_buffer(this, |buffer| JsValue::from(buffer.max_byte_length.is_some()))
    }

    /// `ArrayBuffer.prototype.resize ( newLength )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraybuffer.prototype.resize
    fn resize(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 4. Let newByteLength be ? ToIndex(newLength).
        let new_byte_length = args.get_or_undefined(0).to_index(context)?;

        Self::this_array_buffer(this, |buffer| {
            // 2. Require the [[ArrayBufferMaxByteLength]] internal slot.
            let Some(max_byte_length) = buffer.max_byte_length else {
                return Err(JsNativeError::typ()
                    .with_message("ArrayBuffer.prototype.resize requires a resizable buffer")
                    .into());
            };

            // 5. If IsDetachedBuffer(O) is true, throw a TypeError exception.
            if buffer.is_detached_buffer() {
                return Err(JsNativeError::typ()
                    .with_message("cannot resize a detached buffer")
                    .into());
            }

            // 6. If newByteLength > O.[[ArrayBufferMaxByteLength]], throw a RangeError.
            if new_byte_length > max_byte_length {
                return Err(JsNativeError::range()
                    .with_message("ArrayBuffer.resize: new length exceeds maxByteLength")
                    .into());
            }

            // 7-10. Resize, zero-filling growth.
            buffer.resize_bytes(new_byte_length);
            Ok(JsValue::undefined())
        })?
    }

    /// `ArrayBuffer.prototype.slice ( start, end )`
    ///
    /// Returns a fresh copy of the selected range.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-arraybuffer.prototype.slice
    fn slice(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-3. The receiver must be a non-detached ArrayBuffer.
        let Some(obj) = this.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("'this' is not an ArrayBuffer")
                .into());
        };
        let len = {
            let borrowed = obj.borrow();
            let Some(buffer) = borrowed.as_array_buffer() else {
                return Err(JsNativeError::typ()
                    .with_message("'this' is not an ArrayBuffer")
                    .into());
            };
            if buffer.is_detached_buffer() {
                return Err(JsNativeError::typ()
                    .with_message("cannot slice a detached buffer")
                    .into());
            }
            buffer.byte_length() as i64
        };

        // 5-10. Clamp the range.
        let first = match args.get_or_undefined(0).to_integer_or_infinity(context)? {
            IntegerOrInfinity::Integer(i) if i < 0 => (len + i).max(0),
            IntegerOrInfinity::Integer(i) => i.min(len),
            IntegerOrInfinity::PositiveInfinity => len,
            IntegerOrInfinity::NegativeInfinity => 0,
        };
        let end = args.get_or_undefined(1);
        let finale = if end.is_undefined() {
            len
        } else {
            match end.to_integer_or_infinity(context)? {
                IntegerOrInfinity::Integer(i) if i < 0 => (len + i).max(0),
                IntegerOrInfinity::Integer(i) => i.min(len),
                IntegerOrInfinity::PositiveInfinity => len,
                IntegerOrInfinity::NegativeInfinity => 0,
            }
        };
        let new_len = (finale - first).max(0) as u64;

        // 11-14. Construct the species buffer.
        let constructor =
            obj.species_constructor(StandardConstructors::array_buffer, context)?;
        let new = constructor.construct(&[new_len.into()], Some(&constructor), context)?;

        // 15-22. Validate the new buffer.
        {
            let borrowed = new.borrow();
            let Some(new_buffer) = borrowed.as_array_buffer() else {
                return Err(JsNativeError::typ()
                    .with_message("species constructor did not return an ArrayBuffer")
                    .into());
            };
            if new_buffer.is_detached_buffer() {
                return Err(JsNativeError::typ()
                    .with_message("species constructor returned a detached buffer")
                    .into());
            }
            if JsObject::equals(&new, &obj) {
                return Err(JsNativeError::typ()
                    .with_message("species constructor returned the same buffer")
                    .into());
            }
            if new_buffer.byte_length() < new_len {
                return Err(JsNativeError::typ()
                    .with_message("species constructor returned a buffer that is too small")
                    .into());
            }
        }

        // 23-26. Copy the bytes; the receiver may have been detached by the
        //        species constructor.
        let bytes: Vec<u8> = {
            let borrowed = obj.borrow();
            let buffer = borrowed
                .as_array_buffer()
                .expect("the receiver was validated above");
            let Some(data) = buffer.bytes() else {
                return Err(JsNativeError::typ()
                    .with_message("cannot slice a detached buffer")
                    .into());
            };
            let first = (first as usize).min(data.len());
            let end = (first + new_len as usize).min(data.len());
            data[first..end].to_vec()
        };
        {
            let mut borrowed = new.borrow_mut();
            let new_buffer = borrowed
                .as_array_buffer_mut()
                .expect("the new buffer was validated above");
            if let Some(target) = new_buffer.bytes_mut() {
                target[..bytes.len()].copy_from_slice(&bytes);
            }
        }

        // 27. Return new.
        Ok(new.into())
    }
}

/// Reads the `maxByteLength` member of an `ArrayBuffer` options object.
fn get_max_byte_length_option(
    options: &JsValue,
    context: &mut Context,
) -> JsResult<Option<u64>> {
    let Some(options) = options.as_object() else {
        return Ok(None);
    };
    let max_byte_length = options.get("maxByteLength", context)?;
    if max_byte_length.is_undefined() {
        return Ok(None);
    }
    Ok(Some(max_byte_length.to_index(context)?))
}
