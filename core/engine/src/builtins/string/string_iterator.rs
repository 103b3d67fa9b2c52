//! The string iterator object, yielding code points.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-string-iterator-objects

use crate::{
    builtins::iterable::create_iter_result_object,
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{FunctionBuilder, JsObject, ObjectData},
    property::PropertyDescriptor,
    symbol::WellKnownSymbols,
    Context, JsResult, JsString, JsValue,
};

/// The state of a string iterator: the iterated string and the next
/// code-unit position.
#[derive(Debug, Finalize)]
pub struct StringIterator {
    string: JsString,
    next_index: usize,
    done: bool,
}

unsafe impl Trace for StringIterator {
    empty_trace!();
}

impl StringIterator {
    pub(crate) fn init(context: &mut Context) {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .string_iterator();
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
                .value(js_string!("String Iterator"))
                .writable(false)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// `CreateStringIterator ( string )`
    pub(crate) fn create_string_iterator(string: JsString, context: &mut Context) -> JsValue {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .string_iterator();
        JsObject::from_proto_and_data(
            prototype,
            ObjectData::string_iterator(Self {
                string,
                next_index: 0,
                done: false,
            }),
        )
        .into()
    }

    /// `%StringIteratorPrototype%.next ( )`
    pub(crate) fn next(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a StringIterator")
                .into());
        };

        let (string, position, done) = {
            let mut obj = obj.borrow_mut();
            let Some(iterator) = obj.as_string_iterator_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a StringIterator")
                    .into());
            };
            (iterator.string.clone(), iterator.next_index, iterator.done)
        };

        if done || position >= string.len() {
            if let Some(iterator) = obj.borrow_mut().as_string_iterator_mut() {
                iterator.done = true;
            }
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        }

        let code_point = string
            .code_point_at(position)
            .expect("the position was checked to be in bounds");
        let count = code_point.code_unit_count();

        if let Some(iterator) = obj.borrow_mut().as_string_iterator_mut() {
            iterator.next_index = position + count;
        }

        let result_string = string.substring(position, position + count);
        Ok(create_iter_result_object(
            result_string.into(),
            false,
            context,
        ))
    }
}
