//! The array iterator object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-array-iterator-objects

use crate::{
    builtins::iterable::create_iter_result_object,
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{FunctionBuilder, JsObject, ObjectData},
    property::{PropertyDescriptor, PropertyNameKind},
    symbol::WellKnownSymbols,
    Context, JsResult, JsValue,
};

/// The state of an array iterator: the iterated object, the next index, and
/// the iteration kind.
#[derive(Debug, Finalize)]
pub struct ArrayIterator {
    array: JsObject,
    next_index: u64,
    kind: PropertyNameKind,
    done: bool,
}

unsafe impl Trace for ArrayIterator {
    custom_trace!(this, {
        mark(&this.array);
    });
}

impl ArrayIterator {
    pub(crate) fn init(context: &mut Context) {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .array_iterator();
        prototype.set_prototype(
            context
                .intrinsics()
                .objects()
                .iterator_prototypes()
                .iterator(),
        );

        let next = FunctionBuilder::native(context, Self::next)
            .name("next")
            .length(0)
            .build();
        prototype.insert_property(
            "next",
            PropertyDescriptor::builder()
                .value(next)
                .writable(true)
                .enumerable(false)
                .configurable(true),
        );
        prototype.insert_property(
            WellKnownSymbols::to_string_tag(),
            PropertyDescriptor::builder()
                .value(js_string!("Array Iterator"))
                .writable(false)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// Abstract operation `CreateArrayIterator ( array, kind )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createarrayiterator
    pub(crate) fn create_array_iterator(
        array: JsObject,
        kind: PropertyNameKind,
        context: &mut Context,
    ) -> JsValue {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .array_iterator();
        JsObject::from_proto_and_data(
            prototype,
            ObjectData::array_iterator(Self {
                array,
                next_index: 0,
                kind,
                done: false,
            }),
        )
        .into()
    }

    /// `%ArrayIteratorPrototype%.next ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%arrayiteratorprototype%.next
    pub(crate) fn next(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let (array, index, kind, done) = {
            let Some(obj) = this.as_object() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not an ArrayIterator")
                    .into());
            };
            let mut obj = obj.borrow_mut();
            let Some(iterator) = obj.as_array_iterator_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not an ArrayIterator")
                    .into());
            };
            (
                iterator.array.clone(),
                iterator.next_index,
                iterator.kind,
                iterator.done,
            )
        };

        if done {
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        }

        let len = array.length_of_array_like(context)?;

        if index >= len {
            let Some(obj) = this.as_object() else {
                unreachable!("the receiver was validated above");
            };
            if let Some(iterator) = obj.borrow_mut().as_array_iterator_mut() {
                iterator.done = true;
            }
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        }

        {
            let obj = this.as_object().expect("the receiver was validated above");
            if let Some(iterator) = obj.borrow_mut().as_array_iterator_mut() {
                iterator.next_index = index + 1;
            }
        }

        match kind {
            PropertyNameKind::Key => Ok(create_iter_result_object(index.into(), false, context)),
            PropertyNameKind::Value => {
                let value = array.get(index, context)?;
                Ok(create_iter_result_object(value, false, context))
            }
            PropertyNameKind::KeyAndValue => {
                let value = array.get(index, context)?;
                let entry = crate::builtins::Array::create_array_from_list(
                    [index.into(), value],
                    context,
                );
                Ok(create_iter_result_object(entry.into(), false, context))
            }
        }
    }
}
