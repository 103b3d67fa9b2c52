//! The set iterator object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-set-iterator-objects

use super::ordered_set::SetLock;
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

/// The state of a set iterator.
#[derive(Debug, Finalize)]
pub struct SetIterator {
    iterated_set: Option<JsObject>,
    next_index: usize,
    iteration_kind: PropertyNameKind,
    lock: SetLock,
}

unsafe impl Trace for SetIterator {
    custom_trace!(this, {
        mark(&this.iterated_set);
        mark(&this.lock);
    });
}

impl SetIterator {
    pub(crate) fn init(context: &mut Context) {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .set_iterator();
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
                .value(js_string!("Set Iterator"))
                .writable(false)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// Abstract operation `CreateSetIterator ( set, kind )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createsetiterator
    pub(crate) fn create_set_iterator(
        set: &JsValue,
        kind: PropertyNameKind,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(set_obj) = set.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a Set")
                .into());
        };
        let lock = {
            let mut borrowed = set_obj.borrow_mut();
            let Some(set) = borrowed.as_set_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a Set")
                    .into());
            };
            set.lock(set_obj.clone())
        };

        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .set_iterator();
        Ok(JsObject::from_proto_and_data(
            prototype,
            ObjectData::set_iterator(Self {
                iterated_set: Some(set_obj.clone()),
                next_index: 0,
                iteration_kind: kind,
                lock,
            }),
        )
        .into())
    }

    /// `%SetIteratorPrototype%.next ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%setiteratorprototype%.next
    pub(crate) fn next(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a SetIterator")
                .into());
        };

        let (set, kind) = {
            let mut borrowed = obj.borrow_mut();
            let Some(iterator) = borrowed.as_set_iterator_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a SetIterator")
                    .into());
            };
            (iterator.iterated_set.clone(), iterator.iteration_kind)
        };

        let Some(set) = set else {
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        };

        loop {
            let index = {
                let mut borrowed = obj.borrow_mut();
                let iterator = borrowed
                    .as_set_iterator_mut()
                    .expect("the receiver was validated above");
                let index = iterator.next_index;
                iterator.next_index += 1;
                index
            };

            // None = exhausted; Some(None) = tombstone; Some(Some(_)) = value.
            let entry = {
                let borrowed = set.borrow();
                let inner = borrowed.as_set().expect("the target is always a set");
                if index >= inner.full_len() {
                    None
                } else {
                    Some(inner.get_index(index).cloned())
                }
            };

            match entry {
                None => {
                    if let Some(iterator) = obj.borrow_mut().as_set_iterator_mut() {
                        iterator.iterated_set = None;
                    }
                    return Ok(create_iter_result_object(
                        JsValue::undefined(),
                        true,
                        context,
                    ));
                }
                Some(None) => continue,
                Some(Some(value)) => {
                    return Ok(match kind {
                        PropertyNameKind::Value | PropertyNameKind::Key => {
                            create_iter_result_object(value, false, context)
                        }
                        PropertyNameKind::KeyAndValue => {
                            let result = crate::builtins::Array::create_array_from_list(
                                [value.clone(), value],
                                context,
                            );
                            create_iter_result_object(result.into(), false, context)
                        }
                    });
                }
            }
        }
    }
}
