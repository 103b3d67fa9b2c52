//! The global `Error` object and the native error constructors.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-error-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Error

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::{StandardConstructor, StandardConstructors},
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, JsObject, ObjectData,
    },
    property::{Attribute, PropertyDescriptor},
    value::JsArgs,
    Context, JsResult, JsValue,
};

/// The kind of an error object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Finalize)]
pub enum ErrorKind {
    /// A plain `Error`.
    Error,
    /// A `TypeError`.
    Type,
    /// A `RangeError`.
    Range,
    /// A `SyntaxError`.
    Syntax,
    /// A `ReferenceError`.
    Reference,
}

unsafe impl Trace for ErrorKind {
    empty_trace!();
}

/// Shared steps of every error constructor: allocate the object, then
/// install `message` and `cause`.
fn create_error_object(
    new_target: &JsValue,
    args: &[JsValue],
    kind: ErrorKind,
    default: fn(&StandardConstructors) -> &StandardConstructor,
    context: &mut Context,
) -> JsResult<JsValue> {
    // 1. If NewTarget is undefined, let newTarget be the active function
    //    object; the core treats a plain call like a construction.
    // 2. Let O be ? OrdinaryCreateFromConstructor(newTarget, default, « [[ErrorData]] »).
    let prototype = if new_target.is_undefined() {
        default(context.intrinsics().constructors()).prototype()
    } else {
        get_prototype_from_constructor(new_target, default, context)?
    };
    let o = JsObject::from_proto_and_data(prototype, ObjectData::error(kind));

    // 3. If message is not undefined, then
    let message = args.get_or_undefined(0);
    if !message.is_undefined() {
        // a. Let msg be ? ToString(message).
        let msg = message.to_string(context)?;
        // b. Perform CreateNonEnumerableDataPropertyOrThrow(O, "message", msg).
        o.insert_property(
            "message",
            PropertyDescriptor::builder()
                .value(msg)
                .writable(true)
                .enumerable(false)
                .configurable(true),
        );
    }

    // 4. Perform ? InstallErrorCause(O, options).
    if let Some(options) = args.get_or_undefined(1).as_object() {
        if options.has_property("cause", context)? {
            let cause = options.get("cause", context)?;
            o.insert_property(
                "cause",
                PropertyDescriptor::builder()
                    .value(cause)
                    .writable(true)
                    .enumerable(false)
                    .configurable(true),
            );
        }
    }

    // 5. Return O.
    Ok(o.into())
}

/// JavaScript `Error` built-in implementation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Error;

impl BuiltIn for Error {
    const NAME: &'static str = "Error";

    fn init(context: &mut Context) -> Option<JsValue> {
        let attribute = Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().error().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .property("name", js_string!(Self::NAME), attribute)
        .property("message", js_string!(), attribute)
        .method(Self::to_string, "toString", 0)
        .build();

        Some(object.into())
    }
}

impl Error {
    /// `Error ( message [ , options ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-error-message
    pub(crate) fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        create_error_object(
            new_target,
            args,
            ErrorKind::Error,
            StandardConstructors::error,
            context,
        )
    }

    /// `Error.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-error.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Error/toString
    pub(crate) fn to_string(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. Let O be the this value.
        // 2. If Type(O) is not Object, throw a TypeError exception.
        let Some(o) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("Error.prototype.toString called on non-object")
                .into());
        };

        // 3. Let name be ? Get(O, "name"), defaulting to "Error".
        let name = o.get("name", context)?;
        let name = if name.is_undefined() {
            js_string!("Error")
        } else {
            name.to_string(context)?
        };

        // 5. Let msg be ? Get(O, "message"), defaulting to the empty String.
        let msg = o.get("message", context)?;
        let msg = if msg.is_undefined() {
            js_string!()
        } else {
            msg.to_string(context)?
        };

        // 7-9. Stitch "name: msg".
        if name.is_empty() {
            return Ok(msg.into());
        }
        if msg.is_empty() {
            return Ok(name.into());
        }
        Ok(js_string!(name, js_string!(": "), msg).into())
    }
}

macro_rules! native_error_builtin {
    ( $(#[$outer:meta])* $name:ident, $js_name:literal, $kind:expr, $standard:expr ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy)]
        pub(crate) struct $name;

        impl BuiltIn for $name {
            const NAME: &'static str = $js_name;

            fn init(context: &mut Context) -> Option<JsValue> {
                let attribute =
                    Attribute::WRITABLE | Attribute::NON_ENUMERABLE | Attribute::CONFIGURABLE;
                let error_constructor = context.intrinsics().constructors().error().constructor();
                let error_prototype = context.intrinsics().constructors().error().prototype();
                let object = ConstructorBuilder::with_standard_constructor(
                    context,
                    Self::constructor,
                    $standard(context.intrinsics().constructors()).clone(),
                )
                .name(Self::NAME)
                .length(1)
                .custom_prototype(error_constructor)
                .inherit(error_prototype)
                .property("name", js_string!($js_name), attribute)
                .property("message", js_string!(), attribute)
                .build();

                Some(object.into())
            }
        }

        impl $name {
            /// The native error constructor.
            pub(crate) fn constructor(
                new_target: &JsValue,
                args: &[JsValue],
                context: &mut Context,
            ) -> JsResult<JsValue> {
                create_error_object(new_target, args, $kind, $standard, context)
            }
        }
    };
}

native_error_builtin!(
    /// JavaScript `TypeError` built-in implementation.
    TypeError,
    "TypeError",
    ErrorKind::Type,
    StandardConstructors::type_error
);

native_error_builtin!(
    /// JavaScript `RangeError` built-in implementation.
    RangeError,
    "RangeError",
    ErrorKind::Range,
    StandardConstructors::range_error
);

native_error_builtin!(
    /// JavaScript `SyntaxError` built-in implementation.
    SyntaxError,
    "SyntaxError",
    ErrorKind::Syntax,
    StandardConstructors::syntax_error
);

native_error_builtin!(
    /// JavaScript `ReferenceError` built-in implementation.
    ReferenceError,
    "ReferenceError",
    ErrorKind::Reference,
    StandardConstructors::reference_error
);
