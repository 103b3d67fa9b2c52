//! The regexp string iterator object, driving `String.prototype.matchAll`.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-regexp-string-iterator-objects

use crate::{
    builtins::{iterable::create_iter_result_object, regexp::advance_string_index, RegExp},
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{FunctionBuilder, JsObject, ObjectData},
    property::PropertyDescriptor,
    symbol::WellKnownSymbols,
    Context, JsResult, JsString, JsValue,
};

/// The state of a regexp string iterator.
#[derive(Debug, Finalize)]
pub struct RegExpStringIterator {
    matcher: JsObject,
    string: JsString,
    global: bool,
    unicode: bool,
    completed: bool,
}

unsafe impl Trace for RegExpStringIterator {
    custom_trace!(this, {
        mark(&this.matcher);
    });
}

impl RegExpStringIterator {
    pub(crate) fn init(context: &mut Context) {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .regexp_string_iterator();
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
                .value(js_string!("RegExp String Iterator"))
                .writable(false)
                .enumerable(false)
                .configurable(true),
        );
    }

    /// Abstract operation `CreateRegExpStringIterator ( R, S, global, fullUnicode )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-createregexpstringiterator
    pub(crate) fn create_regexp_string_iterator(
        matcher: JsObject,
        string: JsString,
        global: bool,
        unicode: bool,
        context: &mut Context,
    ) -> JsValue {
        let prototype = context
            .intrinsics()
            .objects()
            .iterator_prototypes()
            .regexp_string_iterator();
        JsObject::from_proto_and_data(
            prototype,
            ObjectData::reg_exp_string_iterator(Self {
                matcher,
                string,
                global,
                unicode,
                completed: false,
            }),
        )
        .into()
    }

    /// `%RegExpStringIteratorPrototype%.next ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-%regexpstringiteratorprototype%.next
    pub(crate) fn next(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(obj) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("`this` is not a RegExpStringIterator")
                .into());
        };

        let (matcher, string, global, unicode, completed) = {
            let mut borrowed = obj.borrow_mut();
            let Some(iterator) = borrowed.as_regexp_string_iterator_mut() else {
                return Err(JsNativeError::typ()
                    .with_message("`this` is not a RegExpStringIterator")
                    .into());
            };
            (
                iterator.matcher.clone(),
                iterator.string.clone(),
                iterator.global,
                iterator.unicode,
                iterator.completed,
            )
        };

        // 4. If O.[[Done]] is true, return CreateIterResultObject(undefined, true).
        if completed {
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        }

        // 9. Let match be ? RegExpExec(R, S).
        let m = RegExp::abstract_exec(&matcher, string.clone(), context)?;

        let Some(m) = m else {
            // 10. If match is null: set O.[[Done]] to true and finish.
            if let Some(iterator) = obj.borrow_mut().as_regexp_string_iterator_mut() {
                iterator.completed = true;
            }
            return Ok(create_iter_result_object(
                JsValue::undefined(),
                true,
                context,
            ));
        };

        // 11. Else,
        if global {
            // a.i. Let matchStr be ? ToString(? Get(match, "0")).
            let match_str = m.get(0, context)?.to_string(context)?;

            // a.ii. If matchStr is the empty String, advance lastIndex.
            if match_str.is_empty() {
                let this_index = matcher.get("lastIndex", context)?.to_length(context)?;
                let next_index = advance_string_index(&string, this_index, unicode);
                matcher.set("lastIndex", next_index, true, context)?;
            }

            // a.iii. Return CreateIterResultObject(match, false).
            return Ok(create_iter_result_object(m.into(), false, context));
        }

        // b. Else: one match only; set O.[[Done]] to true.
        if let Some(iterator) = obj.borrow_mut().as_regexp_string_iterator_mut() {
            iterator.completed = true;
        }
        Ok(create_iter_result_object(m.into(), false, context))
    }
}
