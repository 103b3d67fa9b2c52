//! The global `Function` object and the callable machinery.
//!
//! Host functions are plain function pointers; closures carry a traced
//! capture value so state like a proxy revoker survives collection; bound
//! functions wrap a target with a fixed `this` and partial arguments.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-function-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    js_string,
    object::{ConstructorBuilder, FunctionBuilder, JsObject, ObjectData},
    property::Attribute,
    symbol::WellKnownSymbols,
    value::JsArgs,
    Context, JsResult, JsString, JsValue,
};
use std::{fmt, rc::Rc};

/// The signature of a host function: `(this, args, context)`.
///
/// During `[[Construct]]`, the `this` slot carries the `new.target` value
/// instead, and the function allocates its own receiver.
pub type NativeFunction = fn(&JsValue, &[JsValue], &mut Context) -> JsResult<JsValue>;

/// The signature of a capturing host function: `(this, args, captures, context)`.
pub type ClosureFunctionSignature =
    dyn Fn(&JsValue, &[JsValue], &JsValue, &mut Context) -> JsResult<JsValue>;

/// The callable payload of a function object.
#[derive(Finalize)]
pub enum Function {
    /// A function backed by a host function pointer.
    Native {
        /// The function pointer.
        function: NativeFunction,
        /// Whether the function can be invoked with `new`.
        constructor: bool,
    },
    /// A function backed by a closure with a traced capture value.
    Closure {
        /// The closure.
        function: Rc<ClosureFunctionSignature>,
        /// Whether the function can be invoked with `new`.
        constructor: bool,
        /// The captured value handed to every invocation.
        captures: JsValue,
    },
    /// A function produced by `Function.prototype.bind`.
    Bound {
        /// The wrapped function.
        target_function: JsObject,
        /// The bound `this` value.
        this: JsValue,
        /// The bound leading arguments.
        args: Vec<JsValue>,
    },
}

unsafe impl Trace for Function {
    custom_trace!(this, {
        match this {
            Function::Native { .. } => {}
            Function::Closure { captures, .. } => mark(captures),
            Function::Bound {
                target_function,
                this: bound_this,
                args,
            } => {
                mark(target_function);
                mark(bound_this);
                mark(args);
            }
        }
    });
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native { constructor, .. } => f
                .debug_struct("Native")
                .field("constructor", constructor)
                .finish_non_exhaustive(),
            Self::Closure { constructor, .. } => f
                .debug_struct("Closure")
                .field("constructor", constructor)
                .finish_non_exhaustive(),
            Self::Bound { args, .. } => f
                .debug_struct("Bound")
                .field("args", &args.len())
                .finish_non_exhaustive(),
        }
    }
}

impl Function {
    /// Checks if the function can be invoked with `new`.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        match self {
            Self::Native { constructor, .. } | Self::Closure { constructor, .. } => *constructor,
            Self::Bound {
                target_function, ..
            } => target_function.is_constructor(),
        }
    }
}

/// Abstract operation `CreateListFromArrayLike ( obj )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-createlistfromarraylike
pub(crate) fn create_list_from_array_like(
    value: &JsValue,
    context: &mut Context,
) -> JsResult<Vec<JsValue>> {
    // 2. If Type(obj) is not Object, throw a TypeError exception.
    let Some(obj) = value.as_object() else {
        return Err(JsNativeError::typ()
            .with_message("CreateListFromArrayLike called on non-object")
            .into());
    };

    // 3. Let len be ? LengthOfArrayLike(obj).
    let len = obj.length_of_array_like(context)?;

    // 4-6. Collect the elements.
    let mut list = Vec::with_capacity(len as usize);
    for index in 0..len {
        list.push(obj.get(index, context)?);
    }

    Ok(list)
}

/// Abstract operation `OrdinaryHasInstance ( C, O )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-ordinaryhasinstance
pub(crate) fn ordinary_has_instance(
    function: &JsValue,
    object: &JsValue,
    context: &mut Context,
) -> JsResult<bool> {
    // 1. If IsCallable(C) is false, return false.
    let Some(function_obj) = function.as_callable() else {
        return Ok(false);
    };

    // 2. If C has a [[BoundTargetFunction]] internal slot, then
    let bound_target = match function_obj.borrow().as_function() {
        Some(Function::Bound {
            target_function, ..
        }) => Some(target_function.clone()),
        _ => None,
    };
    if let Some(bound_target) = bound_target {
        // a. Return ? InstanceofOperator(O, BC).
        return ordinary_has_instance(&bound_target.into(), object, context);
    }

    // 3. If Type(O) is not Object, return false.
    let Some(object) = object.as_object() else {
        return Ok(false);
    };

    // 4. Let P be ? Get(C, "prototype").
    let prototype = function_obj.get("prototype", context)?;
    let Some(prototype) = prototype.as_object() else {
        // 5. If Type(P) is not Object, throw a TypeError exception.
        return Err(JsNativeError::typ()
            .with_message("function has non-object prototype in instanceof check")
            .into());
    };

    // 6. Repeat: a. Set O to ? O.[[GetPrototypeOf]]().
    let mut object = object.clone();
    while let Some(proto) = object.__get_prototype_of__(context)? {
        if JsObject::equals(prototype, &proto) {
            return Ok(true);
        }
        object = proto;
    }
    Ok(false)
}

/// The global `Function` built-in.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BuiltInFunctionObject;

impl BuiltIn for BuiltInFunctionObject {
    const NAME: &'static str = "Function";

    fn init(context: &mut Context) -> Option<JsValue> {
        let has_instance = FunctionBuilder::native(context, Self::has_instance)
            .name("[Symbol.hasInstance]")
            .length(1)
            .build();

        let function = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().function().clone(),
        )
        .name(Self::NAME)
        .length(1)
        .method(Self::call, "call", 1)
        .method(Self::apply, "apply", 2)
        .method(Self::bind, "bind", 1)
        .method(Self::to_string, "toString", 0)
        .property(
            WellKnownSymbols::has_instance(),
            has_instance,
            Attribute::READONLY | Attribute::NON_ENUMERABLE | Attribute::PERMANENT,
        )
        .build();

        // `Function.prototype` is itself callable: it accepts any arguments
        // and returns undefined.
        let prototype = context.intrinsics().constructors().function().prototype();
        prototype.borrow_mut().data = ObjectData::function(Function::Native {
            function: Self::prototype_function,
            constructor: false,
        });

        Some(function.into())
    }
}

impl BuiltInFunctionObject {
    /// `Function ( ...parameterArgs, bodyArg )`
    ///
    /// The core carries no parser, so dynamic function compilation is not
    /// available; the constructor always throws.
    fn constructor(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Err(JsNativeError::typ()
            .with_message("cannot compile functions from strings in this host")
            .into())
    }

    /// The behavior of the callable `%Function.prototype%`.
    #[allow(clippy::unnecessary_wraps)]
    fn prototype_function(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(JsValue::undefined())
    }

    /// `Function.prototype.call ( thisArg, ...args )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-function.prototype.call
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function/call
    fn call(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        let Some(func) = this.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Function.prototype.call called on non-callable")
                .into());
        };

        let this_arg = args.get_or_undefined(0);
        // 4. Return ? Call(func, thisArg, args).
        func.call(this_arg, args.get(1..).unwrap_or(&[]), context)
    }

    /// `Function.prototype.apply ( thisArg, argArray )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-function.prototype.apply
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function/apply
    fn apply(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let func be the this value.
        // 2. If IsCallable(func) is false, throw a TypeError exception.
        let Some(func) = this.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Function.prototype.apply called on non-callable")
                .into());
        };

        let this_arg = args.get_or_undefined(0);
        let arg_array = args.get_or_undefined(1);
        // 3. If argArray is undefined or null, then
        //    a. Return ? Call(func, thisArg).
        if arg_array.is_null_or_undefined() {
            return func.call(this_arg, &[], context);
        }

        // 4. Let argList be ? CreateListFromArrayLike(argArray).
        let arg_list = create_list_from_array_like(arg_array, context)?;

        // 5. Return ? Call(func, thisArg, argList).
        func.call(this_arg, &arg_list, context)
    }

    /// `Function.prototype.bind ( thisArg, ...args )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-function.prototype.bind
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function/bind
    fn bind(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let Target be the this value.
        // 2. If IsCallable(Target) is false, throw a TypeError exception.
        let Some(target) = this.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Function.prototype.bind called on non-callable")
                .into());
        };

        let this_arg = args.get_or_undefined(0).clone();
        let bound_args = args.get(1..).unwrap_or(&[]).to_vec();
        let bound_args_len = bound_args.len();

        // 3. Let F be ? BoundFunctionCreate(Target, thisArg, args).
        let prototype = target.__get_prototype_of__(context)?;
        let bound = JsObject::from_proto_and_data(
            prototype,
            ObjectData::function(Function::Bound {
                target_function: target.clone(),
                this: this_arg,
                args: bound_args,
            }),
        );

        // 4-6. Let L be the target's length minus the bound argument count,
        //      when the target exposes a numeric length.
        let mut length = 0.0;
        if target.has_own_property("length", context)? {
            if let Some(target_len) = target.get("length", context)?.as_number() {
                if target_len.is_finite() {
                    length = (target_len.trunc() - bound_args_len as f64).max(0.0);
                } else if target_len == f64::INFINITY {
                    length = f64::INFINITY;
                }
            }
        }

        // 7. Perform ! SetFunctionLength(F, L).
        let property = crate::property::PropertyDescriptor::builder()
            .writable(false)
            .enumerable(false)
            .configurable(true);
        bound.insert_property("length", property.clone().value(length));

        // 8. Let targetName be ? Get(Target, "name").
        let target_name = target.get("name", context)?;
        // 9. If Type(targetName) is not String, set targetName to the empty String.
        let target_name = target_name.as_string().cloned().unwrap_or_default();

        // 10. Perform SetFunctionName(F, targetName, "bound").
        let name = js_string!(js_string!("bound "), target_name);
        bound.insert_property("name", property.value(name));

        // 11. Return F.
        Ok(bound.into())
    }

    /// `Function.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-function.prototype.tostring
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Function/toString
    fn to_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(func) = this.as_callable() else {
            return Err(JsNativeError::typ()
                .with_message("Function.prototype.toString called on non-callable")
                .into());
        };

        let name: JsString = func
            .get("name", context)?
            .as_string()
            .cloned()
            .unwrap_or_default();

        Ok(js_string!(
            js_string!("function "),
            name,
            js_string!("() { [native code] }")
        )
        .into())
    }

    /// `Function.prototype [ @@hasInstance ] ( V )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-function.prototype-@@hasinstance
    fn has_instance(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let F be the this value.
        // 2. Return ? OrdinaryHasInstance(F, V).
        Ok(ordinary_has_instance(this, args.get_or_undefined(0), context)?.into())
    }
}
