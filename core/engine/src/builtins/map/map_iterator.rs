//! The map iterator object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-map-iterator-objects

use super::ordered_map::MapLock;
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

/// The state of a map iterator: the iterated map, the next index, and the
/// iteration kind.
#[derive(Debug, Finalize)]
pub struct MapIterator {
    iterated_map: Option<JsObject>,
    map_next_index: usize,
    map_iteration_kind: PropertyNameKind,
    lock: MapLock,
}

unsafe impl Trace for MapIterator {
    custom_trace!(this, {
        mark(&this.iterated_map);
        mark(&this.lock);
    });
}

impl MapIterator {
    pub(crate) fn init(context: &mut Context) {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .map_iterator();
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
                .value(js_string!("Map Iterator"))
                .writable(false)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// Abstract operation `CreateMapIterator ( map, kind )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createmapiterator
    pub(crate) fn create_map_iterator(
        map: &JsValue,
        kind: PropertyNameKind,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(map_obj) = map.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a Map")
                .into());
        };
        let lock = {
            let mut borrowed = map_obj.borrow_mut();
            let Some(map) = borrowed.as_map_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a Map")
                    .into());
            };
            map.lock(map_obj.clone())
        };

        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .map_iterator();
        Ok(JsObject::from_proto_and_data(
            prototype,
            ObjectData::map_iterator(Self {
                iterated_map: Some(map_obj.clone()),
                map_next_index: 0,
                map_iteration_kind: kind,
                lock,
            }),
        )
        .into())
    }

    /// `%MapIteratorPrototype%.next ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%mapiteratorprototype%.next
    pub(crate) fn next(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a MapIterator")
                .into());
        };

        let (map, kind) = {
            let mut borrowed = obj.borrow_mut();
            let Some(iterator) = borrowed.as_map_iterator_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a MapIterator")
                    .into());
            };
            (iterator.iterated_map.clone(), iterator.map_iteration_kind)
        };

        let Some(map) = map else {
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        };

        // Walk the entries from the saved index, skipping tombstones.
        loop {
            let index = {
                let mut borrowed = obj.borrow_mut();
                let iterator = borrowed
                    .as_map_iterator_mut()
                    .expect("the receiver was validated above");
                let index = iterator.map_next_index;
                iterator.map_next_index += 1;
                index
            };

            // None = exhausted; Some(None) = tombstone; Some(Some(_)) = entry.
            let entry = {
                let map_borrow = map.borrow();
                let inner = map_borrow.as_map().expect("the target is always a map");
                if index >= inner.full_len() {
                    None
                } else {
                    Some(inner.get_index(index).map(|(k, v)| (k.clone(), v.clone())))
                }
            };

            match entry {
                None => {
                    if let Some(iterator) = obj.borrow_mut().as_map_iterator_mut() {
                        iterator.iterated_map = None;
                    }
                    return Ok(create_iter_result_object(
                        JsValue::undefined(),
                        true,
                        context,
                    ));
                }
                Some(None) => continue,
                Some(Some((key, value))) => {
                    return Ok(match kind {
                        PropertyNameKind::Key => create_iter_result_object(key, false, context),
                        PropertyNameKind::Value => create_iter_result_object(value, false, context),
                        PropertyNameKind::KeyAndValue => {
                            let result = crate::builtins::Array::create_array_from_list(
                                [key, value],
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
