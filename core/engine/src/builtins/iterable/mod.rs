//! The iteration protocol: iterator records, result objects, and the
//! `%IteratorPrototype%` family.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!
//! [spec]: https://tc39.es/ecma262/#sec-iteration

use crate::{
    builtins::{
        array::array_iterator::ArrayIterator, map::map_iterator::MapIterator,
        regexp::regexp_string_iterator::RegExpStringIterator, set::set_iterator::SetIterator,
        string::string_iterator::StringIterator,
    },
    error::JsNativeError,
    object::{FunctionBuilder, JsObject, ObjectData},
    property::PropertyDescriptor,
    symbol::WellKnownSymbols,
    Context, JsResult, JsValue,
};

/// `IfAbruptCloseIterator ( value, iteratorRecord )`
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ifabruptcloseiterator
macro_rules! if_abrupt_close_iterator {
    ($value:expr, $iterator_record:expr, $context:expr) => {
        match $value {
            // 1. If value is an abrupt completion, return ? IteratorClose(iteratorRecord, value).
            Err(err) => return $iterator_record.close(Err(err), $context),
            // 2. Else if value is a Completion Record, set value to value.
            Ok(value) => value,
        }
    };
}

// Export macro to crate level
pub(crate) use if_abrupt_close_iterator;

/// Initializes the `%IteratorPrototype%` family.
pub(crate) fn init(context: &mut Context) {
    let iterator_prototype = context
        .intrinsics()
        .objects()
        .iterator_prototypes()
        .iterator();

    // `%IteratorPrototype% [ @@iterator ] ( )` returns the this value.
    let symbol_iterator_fn = FunctionBuilder::native(context, |this, _, _| Ok(this.clone()))
        .name("[Symbol.iterator]")
        .build();

    iterator_prototype.set_prototype(context.intrinsics().constructors().object().prototype());
    iterator_prototype.insert_property(
        WellKnownSymbols::iterator(),
        PropertyDescriptor::builder()
            .value(symbol_iterator_fn)
            .writable(true)
            .enumerable(false)
            .configurable(true),
    );

    ArrayIterator::init(context);
    StringIterator::init(context);
    MapIterator::init(context);
    SetIterator::init(context);
    RegExpStringIterator::init(context);
}

/// Abstract operation `CreateIterResultObject ( value, done )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-createiterresultobject
pub fn create_iter_result_object(value: JsValue, done: bool, context: &mut Context) -> JsValue {
    // 1. Assert: Type(done) is Boolean.
    // 2. Let obj be ! OrdinaryObjectCreate(%Object.prototype%).
    let obj = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        ObjectData::ordinary(),
    );

    // 3. Perform ! CreateDataPropertyOrThrow(obj, "value", value).
    obj.create_data_property_or_throw("value", value, context)
        .expect("this CreateDataPropertyOrThrow call must not fail");
    // 4. Perform ! CreateDataPropertyOrThrow(obj, "done", done).
    obj.create_data_property_or_throw("done", done, context)
        .expect("this CreateDataPropertyOrThrow call must not fail");
    // 5. Return obj.
    obj.into()
}

/// The hint of `GetIterator`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IteratorHint {
    /// Hint `sync`.
    Sync,
    /// Hint `async`.
    Async,
}

impl JsValue {
    /// Abstract operation `GetIterator ( obj [ , hint [ , method ] ] )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-getiterator
    pub fn get_iterator(
        &self,
        context: &mut Context,
        hint: Option<IteratorHint>,
        method: Option<JsValue>,
    ) -> JsResult<IteratorRecord> {
        // 1. If hint is not present, set hint to sync.
        let hint = hint.unwrap_or(IteratorHint::Sync);

        // 2. If method is not present, then
        let method = match method {
            Some(method) => method,
            None => match hint {
                IteratorHint::Sync => self
                    .get_method(WellKnownSymbols::iterator(), context)?
                    .map(JsValue::from)
                    .unwrap_or_default(),
                IteratorHint::Async => self
                    .get_method(WellKnownSymbols::async_iterator(), context)?
                    .map(JsValue::from)
                    .unwrap_or_default(),
            },
        };

        // 3. Let iterator be ? Call(method, obj).
        let Some(method) = method.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("value is not iterable")
                .into());
        };
        let iterator = method.call(self, &[], context)?;

        // 4. If Type(iterator) is not Object, throw a TypeError exception.
        let Some(iterator) = iterator.as_object().cloned() else {
            return Err(JsNativeError::typ()
                .with_message("the iterator method did not return an object")
                .into());
        };

        // 5. Let nextMethod be ? GetV(iterator, "next").
        let next_method = iterator.get("next", context)?;

        // 6-7. Return the Iterator Record.
        Ok(IteratorRecord::new(iterator, next_method))
    }
}

/// The result object of one iteration step.
#[derive(Debug, Clone)]
pub struct IteratorResult {
    object: JsObject,
}

impl IteratorResult {
    /// Abstract operation `IteratorComplete ( iterResult )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iteratorcomplete
    pub fn complete(&self, context: &mut Context) -> JsResult<bool> {
        // 1. Return ToBoolean(? Get(iterResult, "done")).
        Ok(self.object.get("done", context)?.to_boolean())
    }

    /// Abstract operation `IteratorValue ( iterResult )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iteratorvalue
    pub fn value(&self, context: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? Get(iterResult, "value").
        self.object.get("value", context)
    }
}

/// An Iterator Record: the iterator object, its cached `next` method, and
/// the done flag.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-iterator-records
#[derive(Debug)]
pub struct IteratorRecord {
    iterator: JsObject,
    next_method: JsValue,
    done: bool,
}

impl IteratorRecord {
    /// Creates a new `IteratorRecord` with the given iterator object and
    /// next method.
    #[must_use]
    pub fn new(iterator: JsObject, next_method: JsValue) -> Self {
        Self {
            iterator,
            next_method,
            done: false,
        }
    }

    /// Gets the iterator object.
    #[must_use]
    pub fn iterator(&self) -> &JsObject {
        &self.iterator
    }

    /// Gets the done flag.
    #[must_use]
    pub fn done(&self) -> bool {
        self.done
    }

    /// Abstract operation `IteratorStep ( iteratorRecord )`: advances the
    /// iterator, returning `None` when it is exhausted.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iteratorstep
    pub fn step(&mut self, context: &mut Context) -> JsResult<Option<IteratorResult>> {
        // 1. Let result be ? IteratorNext(iteratorRecord).
        let Some(next_method) = self.next_method.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("iterator next method is not callable")
                .into());
        };
        let result = next_method.call(&self.iterator.clone().into(), &[], context)?;
        let Some(result) = result.as_object().cloned() else {
            self.done = true;
            return Err(JsNativeError::typ()
                .with_message("the iterator's next method did not return an object")
                .into());
        };
        let result = IteratorResult { object: result };

        // 2. Let done be ? IteratorComplete(result).
        if result.complete(context)? {
            // 3. If done is true, return false.
            self.done = true;
            return Ok(None);
        }

        // 4. Return result.
        Ok(Some(result))
    }

    /// Abstract operation `IteratorClose ( iteratorRecord, completion )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-iteratorclose
    pub fn close(
        &mut self,
        completion: JsResult<JsValue>,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 2. Let iterator be iteratorRecord.[[Iterator]].
        // 3. Let innerResult be Completion(GetMethod(iterator, "return")).
        let inner_result = JsValue::from(self.iterator.clone()).get_method("return", context);

        // 4. If innerResult.[[Type]] is normal, then
        let inner_result = match inner_result {
            Ok(None) => {
                // b. If return is undefined, return ? completion.
                return completion;
            }
            Ok(Some(r#return)) => {
                // c. Set innerResult to Completion(Call(return, iterator)).
                r#return.call(&self.iterator.clone().into(), &[], context)
            }
            Err(err) => Err(err),
        };

        // 5. If completion.[[Type]] is throw, return ? completion.
        let completion = completion?;

        // 6. If innerResult.[[Type]] is throw, return ? innerResult.
        let inner_result = inner_result?;

        // 7. If Type(innerResult.[[Value]]) is not Object, throw a TypeError exception.
        if !inner_result.is_object() {
            return Err(JsNativeError::typ()
                .with_message("iterator return method returned a non-object")
                .into());
        }

        // 8. Return ? completion.
        Ok(completion)
    }
}

/// Converts an iterable or array-like into a list of values, using the
/// iterator protocol when a method is available.
pub(crate) fn iterable_to_list(
    context: &mut Context,
    iterable: &JsValue,
    method: Option<JsValue>,
) -> JsResult<Vec<JsValue>> {
    let mut iterator_record = iterable.get_iterator(context, Some(IteratorHint::Sync), method)?;
    let mut values = Vec::new();
    while let Some(next) = iterator_record.step(context)? {
        values.push(next.value(context)?);
    }
    Ok(values)
}

/// Host hook `__getAsyncIterator`: converts a value into an async iterator
/// object.
///
/// When the value has no `@@asyncIterator` method, the sync iterator object
/// is returned and [`iterator_next`] performs the promise wrapping.
pub fn get_async_iterator(value: &JsValue, context: &mut Context) -> JsResult<JsObject> {
    if let Some(method) = value.get_method(WellKnownSymbols::async_iterator(), context)? {
        let iterator = method.call(value, &[], context)?;
        return iterator.as_object().cloned().ok_or_else(|| {
            JsNativeError::typ()
                .with_message("the async iterator method did not return an object")
                .into()
        });
    }
    let record = value.get_iterator(context, Some(IteratorHint::Sync), None)?;
    Ok(record.iterator().clone())
}

/// Host hook `__iteratorNext`: invokes `next()` once and, if the result is
/// not already a thenable, wraps it in a resolved promise through the
/// registered promise hook.
///
/// Without a registered hook the raw iterator-result object is returned; the
/// hook never blocks.
pub fn iterator_next(iterator: &JsObject, context: &mut Context) -> JsResult<JsValue> {
    let result = iterator.invoke("next", &[], context)?;

    // Already a thenable: hand it to the await engine untouched.
    if let Some(object) = result.as_object() {
        if object.get("then", context)?.is_callable() {
            return Ok(result);
        }
    }

    match context.promise_hook() {
        Some(resolve) => resolve.call(&JsValue::undefined(), &[result], context),
        None => Ok(result),
    }
}
