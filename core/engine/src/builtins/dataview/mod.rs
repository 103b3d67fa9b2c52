//! The global `DataView` object.
//!
//! Unlike typed arrays, every read and write takes an explicit
//! `littleEndian` flag; the view revalidates against the current buffer
//! length on each access, so resizable buffers are supported, including
//! length-tracking views.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-dataview-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/DataView

#[cfg(test)]
mod tests;

use crate::{
    builtins::{typed_array::element::TypedArrayKind, BuiltIn},
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, FunctionBuilder,
        JsObject, ObjectData,
    },
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsValue,
};

/// The internal representation of a `DataView` object.
#[derive(Debug, Finalize)]
pub struct DataView {
    viewed_array_buffer: JsObject,
    /// `None` marks a length-tracking view over a resizable buffer.
    byte_length: Option<u64>,
    byte_offset: u64,
}

unsafe impl Trace for DataView {
    custom_trace!(this, {
        mark(&this.viewed_array_buffer);
    });
}

impl DataView {
    /// The current byte length of the view, or `None` when the view is out
    /// of bounds or its buffer is detached.
    fn view_byte_length(&self) -> Option<u64> {
        let borrowed = self.viewed_array_buffer.borrow();
        let buffer = borrowed.as_array_buffer()?;
        if buffer.is_detached_buffer() {
            return None;
        }
        let buffer_length = buffer.byte_length();
        match self.byte_length {
            Some(length) => (self.byte_offset + length <= buffer_length).then_some(length),
            None => (self.byte_offset <= buffer_length)
                .then(|| buffer_length - self.byte_offset),
        }
    }
}

impl BuiltIn for DataView {
    const NAME: &'static str = "DataView";

    fn init(context: &mut Context) -> Option<JsValue> {
        let get_buffer = FunctionBuilder::native(context, Self::get_buffer)
            .name("get buffer")
            .build();
        let get_byte_length = FunctionBuilder::native(context, Self::get_byte_length)
            .name("get byteLength")
            .build();
        let get_byte_offset = FunctionBuilder::native(context, Self::get_byte_offset)
            .name("get byteOffset")
            .build();

        let accessor_attributes = Attribute::CONFIGURABLE | Attribute::NON_ENUMERABLE;
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().data_view().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .accessor("buffer", Some(get_buffer), None, accessor_attributes)
        .accessor("byteLength", Some(get_byte_length), None, accessor_attributes)
        .accessor("byteOffset", Some(get_byte_offset), None, accessor_attributes)
        .method(Self::get_big_int64, "getBigInt64", 1)
        .method(Self::get_big_uint64, "getBigUint64", 1)
        .method(Self::get_float32, "getFloat32", 1)
        .method(Self::get_float64, "getFloat64", 1)
        .method(Self::get_int8, "getInt8", 1)
        .method(Self::get_int16, "getInt16", 1)
        .method(Self::get_int32, "getInt32", 1)
        .method(Self::get_uint8, "getUint8", 1)
        .method(Self::get_uint16, "getUint16", 1)
        .method(Self::get_uint32, "getUint32", 1)
        .method(Self::set_big_int64, "setBigInt64", 2)
        .method(Self::set_big_uint64, "setBigUint64", 2)
        .method(Self::set_float32, "setFloat32", 2)
        .method(Self::set_float64, "setFloat64", 2)
        .method(Self::set_int8, "setInt8", 2)
        .method(Self::set_int16, "setInt16", 2)
        .method(Self::set_int32, "setInt32", 2)
        .method(Self::set_uint8, "setUint8", 2)
        .method(Self::set_uint16, "setUint16", 2)
        .method(Self::set_uint32, "setUint32", 2)
        .property(
            WellKnownSymbols::to_string_tag(),
            js_string!(Self::NAME),
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE,
        )
        .build();

        Some(object.into())
    }
}

impl DataView {
    /// `DataView ( buffer [ , byteOffset [ , byteLength ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-dataview-buffer-byteoffset-bytelength
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("calling a builtin DataView constructor without new is forbidden")
                .into());
        }

        // 2. Perform ? RequireInternalSlot(buffer, [[ArrayBufferData]]).
        let buffer_obj = args
            .get_or_undefined(0)
            .as_object()
            .filter(|obj| obj.borrow().as_array_buffer().is_some())
            .cloned()
            .ok_or_else(|| {
                JsNativeError::typ().with_message("DataView requires an ArrayBuffer argument")
            })?;

        // 3. Let offset be ? ToIndex(byteOffset).
        let offset = args.get_or_undefined(1).to_index(context)?;

        let (buffer_byte_length, resizable, detached) = {
            let borrowed = buffer_obj.borrow();
            let buffer = borrowed
                .as_array_buffer()
                .expect("the buffer was validated above");
            (
                buffer.byte_length(),
                buffer.max_byte_length().is_some(),
                buffer.is_detached_buffer(),
            )
        };

        // 4. If IsDetachedBuffer(buffer) is true, throw a TypeError exception.
        if detached {
            return Err(JsNativeError::typ()
                .with_message("cannot create a view over a detached buffer")
                .into());
        }

        // 6. If offset > bufferByteLength, throw a RangeError exception.
        if offset > buffer_byte_length {
            return Err(JsNativeError::range()
                .with_message("DataView byteOffset is outside the buffer")
                .into());
        }

        // 7-9. Resolve the view length.
        let byte_length_arg = args.get_or_undefined(2);
        let view_byte_length = if byte_length_arg.is_undefined() {
            if resizable {
                // A resizable buffer without an explicit length makes a
                // length-tracking view.
                None
            } else {
                Some(buffer_byte_length - offset)
            }
        } else {
            let view_byte_length = byte_length_arg.to_index(context)?;
            // 9.b. If offset + viewByteLength > bufferByteLength, throw.
            if offset + view_byte_length > buffer_byte_length {
                return Err(JsNativeError::range()
                    .with_message("DataView does not fit in the buffer")
                    .into());
            }
            Some(view_byte_length)
        };

        // 10-16. Allocate the view.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::data_view, context)?;
        Ok(JsObject::from_proto_and_data(
            prototype,
            ObjectData::data_view(Self {
                viewed_array_buffer: buffer_obj,
                byte_length: view_byte_length,
                byte_offset: offset,
            }),
        )
        .into())
    }

    /// Validates the receiver and extracts (buffer, view offset, view
    /// length).
    fn this_data_view(this: &JsValue) -> JsResult<(JsObject, u64, u64)> {
        let obj = this
            .as_object()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a DataView"))?;
        let borrowed = obj.borrow();
        let view = borrowed
            .as_data_view()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a DataView"))?;
        let length = view.view_byte_length().ok_or_else(|| {
            JsNativeError::typ().with_message("DataView is detached or out of bounds")
        })?;
        Ok((view.viewed_array_buffer.clone(), view.byte_offset, length))
    }

    /// `get DataView.prototype.buffer`
    fn get_buffer(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a DataView"))?;
        let borrowed = obj.borrow();
        let view = borrowed
            .as_data_view()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a DataView"))?;
        Ok(view.viewed_array_buffer.clone().into())
    }

    /// `get DataView.prototype.byteLength`
    fn get_byte_length(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let (_, _, length) = Self::this_data_view(this)?;
        Ok(length.into())
    }

    /// `get DataView.prototype.byteOffset`
    fn get_byte_offset(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let (_, offset, _) = Self::this_data_view(this)?;
        Ok(offset.into())
    }

    /// Abstract operation `GetViewValue ( view, requestIndex, isLittleEndian, type )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getviewvalue
    fn get_view_value(
        this: &JsValue,
        args: &[JsValue],
        kind: TypedArrayKind,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 3. Let getIndex be ? ToIndex(requestIndex).
        let get_index = args.get_or_undefined(0).to_index(context)?;
        // 4. Let littleEndian be ToBoolean(isLittleEndian).
        let little_endian = args.get_or_undefined(1).to_boolean();

        // 5-9. Revalidate after the conversions.
        let (buffer_obj, view_offset, view_length) = Self::this_data_view(this)?;

        // 10-11. The read must fit the view.
        let element_size = kind.element_size();
        if get_index + element_size > view_length {
            return Err(JsNativeError::range()
                .with_message("DataView access is outside the bounds of the view")
                .into());
        }

        // 12-13. Read the bytes.
        let borrowed = buffer_obj.borrow();
        let buffer = borrowed
            .as_array_buffer()
            .expect("views always wrap array buffers");
        let data = buffer.bytes().expect("the view is not detached");
        let start = (view_offset + get_index) as usize;
        Ok(kind.get_element(&data[start..], little_endian))
    }

    /// Abstract operation `SetViewValue ( view, requestIndex, isLittleEndian, type, value )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-setviewvalue
    fn set_view_value(
        this: &JsValue,
        args: &[JsValue],
        kind: TypedArrayKind,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 3. Let getIndex be ? ToIndex(requestIndex).
        let get_index = args.get_or_undefined(0).to_index(context)?;

        // 4-5. Convert the value by content type.
        let bytes = kind.value_to_bytes(
            args.get_or_undefined(1),
            args.get_or_undefined(2).to_boolean(),
            context,
        )?;

        // 6-10. Revalidate after the conversions.
        let (buffer_obj, view_offset, view_length) = Self::this_data_view(this)?;

        // 11-12. The write must fit the view.
        if get_index + kind.element_size() > view_length {
            return Err(JsNativeError::range()
                .with_message("DataView access is outside the bounds of the view")
                .into());
        }

        // 13-14. Write the bytes.
        let mut borrowed = buffer_obj.borrow_mut();
        let buffer = borrowed
            .as_array_buffer_mut()
            .expect("views always wrap array buffers");
        let data = buffer.bytes_mut().expect("the view is not detached");
        let start = (view_offset + get_index) as usize;
        data[start..start + bytes.len()].copy_from_slice(&bytes);
        Ok(JsValue::undefined())
    }

    /// `DataView.prototype.getBigInt64 ( byteOffset [ , littleEndian ] )`
    fn get_big_int64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::BigInt64, context)
    }

    /// `DataView.prototype.getBigUint64 ( byteOffset [ , littleEndian ] )`
    fn get_big_uint64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::BigUint64, context)
    }

    /// `DataView.prototype.getFloat32 ( byteOffset [ , littleEndian ] )`
    fn get_float32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Float32, context)
    }

    /// `DataView.prototype.getFloat64 ( byteOffset [ , littleEndian ] )`
    fn get_float64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Float64, context)
    }

    /// `DataView.prototype.getInt8 ( byteOffset )`
    fn get_int8(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Int8, context)
    }

    /// `DataView.prototype.getInt16 ( byteOffset [ , littleEndian ] )`
    fn get_int16(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Int16, context)
    }

    /// `DataView.prototype.getInt32 ( byteOffset [ , littleEndian ] )`
    fn get_int32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Int32, context)
    }

    /// `DataView.prototype.getUint8 ( byteOffset )`
    fn get_uint8(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Uint8, context)
    }

    /// `DataView.prototype.getUint16 ( byteOffset [ , littleEndian ] )`
    fn get_uint16(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Uint16, context)
    }

    /// `DataView.prototype.getUint32 ( byteOffset [ , littleEndian ] )`
    fn get_uint32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::get_view_value(this, args, TypedArrayKind::Uint32, context)
    }

    /// `DataView.prototype.setBigInt64 ( byteOffset, value [ , littleEndian ] )`
    fn set_big_int64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::BigInt64, context)
    }

    /// `DataView.prototype.setBigUint64 ( byteOffset, value [ , littleEndian ] )`
    fn set_big_uint64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::BigUint64, context)
    }

    /// `DataView.prototype.setFloat32 ( byteOffset, value [ , littleEndian ] )`
    fn set_float32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Float32, context)
    }

    /// `DataView.prototype.setFloat64 ( byteOffset, value [ , littleEndian ] )`
    fn set_float64(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Float64, context)
    }

    /// `DataView.prototype.setInt8 ( byteOffset, value )`
    fn set_int8(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Int8, context)
    }

    /// `DataView.prototype.setInt16 ( byteOffset, value [ , littleEndian ] )`
    fn set_int16(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Int16, context)
    }

    /// `DataView.prototype.setInt32 ( byteOffset, value [ , littleEndian ] )`
    fn set_int32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Int32, context)
    }

    /// `DataView.prototype.setUint8 ( byteOffset, value )`
    fn set_uint8(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Uint8, context)
    }

    /// `DataView.prototype.setUint16 ( byteOffset, value [ , littleEndian ] )`
    fn set_uint16(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Uint16, context)
    }

    /// `DataView.prototype.setUint32 ( byteOffset, value [ , littleEndian ] )`
    fn set_uint32(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Self::set_view_value(this, args, TypedArrayKind::Uint32, context)
    }
}
