//! The global `Boolean` object.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-boolean-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Boolean

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    js_string,
    object::{internal_methods::get_prototype_from_constructor, ConstructorBuilder, JsObject, ObjectData},
    Context, JsResult, JsValue,
};

/// JavaScript `Boolean` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Boolean;

impl BuiltIn for Boolean {
    const NAME: &'static str = "Boolean";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().boolean().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .method(Self::to_string, "toString", 0)
        .method(Self::value_of, "valueOf", 0)
        .build();

        Some(object.into())
    }
}

impl Boolean {
    /// `Boolean ( value )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-boolean-constructor-boolean-value
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let b be ToBoolean(value).
        let data = args.first().map_or(false, JsValue::to_boolean);

        // 2. If NewTarget is undefined, return b.
        if new_target.is_undefined() {
            return Ok(data.into());
        }

        // 3-5. Construct the wrapper object.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::boolean, context)?;
        Ok(JsObject::from_proto_and_data(prototype, ObjectData::boolean(data)).into())
    }

    /// Gets the boolean value of a `this` that is either a boolean primitive
    /// or a `Boolean` wrapper object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thisbooleanvalue
    fn this_boolean_value(this: &JsValue) -> JsResult<bool> {
        match this {
            JsValue::Boolean(boolean) => Ok(*boolean),
            JsValue::Object(obj) => obj.borrow().as_boolean().ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a boolean")
                    .into()
            }),
            _ => Err(JsNativeError::typ()
                .with_message("'this' is not a boolean")
                .into()),
        }
    }

    /// `Boolean.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-boolean.prototype.tostring
    fn to_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Let b be ? thisBooleanValue(this value).
        // 2. If b is true, return "true"; else return "false".
        let b = Self::this_boolean_value(this)?;
        Ok(js_string!(if b { "true" } else { "false" }).into())
    }

    /// `Boolean.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-boolean.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisBooleanValue(this value).
        Ok(Self::this_boolean_value(this)?.into())
    }
}
