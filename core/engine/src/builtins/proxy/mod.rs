//! The global `Proxy` object.
//!
//! The trap machinery lives with the other internal methods; this module
//! holds the internal state, the constructor, and `Proxy.revocable`.
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-proxy-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Proxy

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    error::JsNativeError,
    gc::{custom_trace, Finalize, Trace},
    object::{ConstructorBuilder, FunctionBuilder, JsObject, ObjectData, ObjectInitializer},
    property::Attribute,
    value::JsArgs,
    Context, JsResult, JsValue,
};

/// The internal representation of a `Proxy` object: the (target, handler)
/// pair, or nothing after revocation.
#[derive(Debug, Finalize)]
pub struct Proxy {
    data: Option<(JsObject, JsObject)>,
    call: bool,
    construct: bool,
}

unsafe impl Trace for Proxy {
    custom_trace!(this, {
        if let Some((target, handler)) = &this.data {
            mark(target);
            mark(handler);
        }
    });
}

impl Proxy {
    /// Creates the internal state from a (target, handler) pair.
    fn new(target: JsObject, handler: JsObject) -> Self {
        Self {
            call: target.is_callable(),
            construct: target.is_constructor(),
            data: Some((target, handler)),
        }
    }

    /// Whether the proxy forwards `[[Call]]`.
    #[must_use]
    pub fn is_callable(&self) -> bool {
        self.call
    }

    /// Whether the proxy forwards `[[Construct]]`.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.construct
    }

    /// Gets the (target, handler) pair, or throws for a revoked proxy.
    pub(crate) fn try_data(&self) -> JsResult<(JsObject, JsObject)> {
        self.data.clone().ok_or_else(|| {
            JsNativeError::typ()
                .with_message("proxy has been revoked")
                .into()
        })
    }

    /// Revokes the proxy: every later operation throws.
    pub(crate) fn revoke(&mut self) {
        self.data = None;
    }
}

impl BuiltIn for Proxy {
    const NAME: &'static str = "Proxy";

    fn init(context: &mut Context) -> Option<JsValue> {
        let object = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().proxy().clone(),
        )
        .name(Self::NAME)
        .length(2)
        .has_prototype_property(false)
        .static_method(Self::revocable, "revocable", 2)
        .build();

        Some(object.into())
    }
}

impl Proxy {
    /// `Proxy ( target, handler )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy-target-handler
    fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, throw a TypeError exception.
        if new_target.is_undefined() {
            return Err(JsNativeError::typ()
                .with_message("Proxy constructor requires new")
                .into());
        }

        // 2. Return ? ProxyCreate(target, handler).
        Ok(Self::create(
            args.get_or_undefined(0),
            args.get_or_undefined(1),
            context,
        )?
        .into())
    }

    /// Abstract operation `ProxyCreate ( target, handler )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxycreate
    fn create(target: &JsValue, handler: &JsValue, _context: &mut Context) -> JsResult<JsObject> {
        // 1. If Type(target) is not Object, throw a TypeError exception.
        let Some(target) = target.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("proxy target must be an object")
                .into());
        };
        // 2. If Type(handler) is not Object, throw a TypeError exception.
        let Some(handler) = handler.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("proxy handler must be an object")
                .into());
        };

        // 3-8. Allocate the proxy with no prototype of its own: every
        //      prototype operation routes through the target.
        Ok(JsObject::from_proto_and_data(
            None,
            ObjectData::proxy(Self::new(target.clone(), handler.clone())),
        ))
    }

    /// `Proxy.revocable ( target, handler )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-proxy.revocable
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Proxy/revocable
    fn revocable(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let p be ? ProxyCreate(target, handler).
        let p = Self::create(
            args.get_or_undefined(0),
            args.get_or_undefined(1),
            context,
        )?;

        // 2-4. Let revoker be a function that clears the pair.
        let revoker = FunctionBuilder::closure_with_captures(
            context,
            |_, _, captures, _| {
                // a. Let p be F.[[RevocableProxy]]; if null, return undefined.
                if let Some(proxy_obj) = captures.as_object() {
                    // c-d. Set p.[[ProxyTarget]] and p.[[ProxyHandler]] to null.
                    if let Some(proxy) = proxy_obj.borrow_mut().as_proxy_mut() {
                        proxy.revoke();
                    }
                }
                Ok(JsValue::undefined())
            },
            p.clone().into(),
        )
        .name("")
        .length(0)
        .build();

        // 5-8. Return the { proxy, revoke } result object.
        let result = ObjectInitializer::new(context)
            .property(
                "proxy",
                p,
                Attribute::WRITABLE | Attribute::ENUMERABLE | Attribute::CONFIGURABLE,
            )
            .property(
                "revoke",
                revoker,
                Attribute::WRITABLE | Attribute::ENUMERABLE | Attribute::CONFIGURABLE,
            )
            .build();

        Ok(result.into())
    }
}
