use crate::{js_string, object::JsObject, value::JsArgs, Context, JsValue};

fn plain(context: &mut Context) -> JsObject {
    JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    )
}

fn new_proxy(target: &JsObject, handler: &JsObject, context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().proxy().constructor();
    ctor.construct(
        &[target.clone().into(), handler.clone().into()],
        None,
        context,
    )
    .unwrap()
}

#[test]
fn empty_handler_forwards_to_target() {
    let mut context = Context::default();
    let target = plain(&mut context);
    target.set("x", 1, true, &mut context).unwrap();
    let handler = plain(&mut context);

    let proxy = new_proxy(&target, &handler, &mut context);
    assert_eq!(
        proxy.get("x", &mut context).unwrap().as_number(),
        Some(1.0)
    );

    proxy.set("y", 2, true, &mut context).unwrap();
    assert_eq!(
        target.get("y", &mut context).unwrap().as_number(),
        Some(2.0)
    );
}

#[test]
fn get_trap_intercepts() {
    let mut context = Context::default();
    let target = plain(&mut context);
    let handler = plain(&mut context);
    let trap = crate::object::FunctionBuilder::native(&mut context, |_, args, context| {
        let key = args.get_or_undefined(1).to_string(context)?;
        Ok(js_string!(js_string!("got "), key).into())
    })
    .build();
    handler.set("get", trap, true, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    let value = proxy.get("anything", &mut context).unwrap();
    assert_eq!(value.as_string().unwrap(), "got anything");
}

#[test]
fn is_array_unwraps_proxies() {
    let mut context = Context::default();
    let array = crate::builtins::Array::create_array_from_list([], &mut context);
    let handler = plain(&mut context);
    let proxy = new_proxy(&array, &handler, &mut context);

    // A proxy over a proxy over an array is still an array.
    let nested = new_proxy(&proxy, &handler, &mut context);
    assert!(nested.is_array_abstract().unwrap());

    let result = crate::builtins::Array::is_array(
        &JsValue::undefined(),
        &[nested.into()],
        &mut context,
    )
    .unwrap();
    assert_eq!(result.as_boolean(), Some(true));
}

#[test]
fn revoked_proxies_throw() {
    let mut context = Context::default();
    let array = crate::builtins::Array::create_array_from_list([], &mut context);
    let handler = plain(&mut context);

    let proxy_ctor = context.intrinsics().constructors().proxy().constructor();
    let revocable = proxy_ctor
        .invoke(
            "revocable",
            &[array.into(), handler.into()],
            &mut context,
        )
        .unwrap();
    let revocable = revocable.as_object().unwrap();
    let proxy = revocable.get("proxy", &mut context).unwrap();
    let revoke = revocable.get("revoke", &mut context).unwrap();

    // Alive: forwards normally.
    assert!(proxy.as_object().unwrap().is_array_abstract().unwrap());

    revoke
        .as_callable()
        .unwrap()
        .call(&JsValue::undefined(), &[], &mut context)
        .unwrap();

    // Revoked: operations throw, including Array.isArray.
    assert!(proxy.as_object().unwrap().is_array_abstract().is_err());
    assert!(proxy.as_object().unwrap().get("x", &mut context).is_err());
    assert!(crate::builtins::Array::is_array(
        &JsValue::undefined(),
        &[proxy],
        &mut context
    )
    .is_err());
}

#[test]
fn proxies_forward_calls() {
    let mut context = Context::default();
    let target = crate::object::FunctionBuilder::native(&mut context, |_, args, context| {
        args.get_or_undefined(0).to_number(context).map(JsValue::from)
    })
    .build();
    let handler = plain(&mut context);
    let proxy = new_proxy(&target, &handler, &mut context);

    assert!(proxy.is_callable());
    let result = proxy
        .call(&JsValue::undefined(), &[JsValue::new(5)], &mut context)
        .unwrap();
    assert_eq!(result.as_number(), Some(5.0));
}

#[test]
fn own_keys_trap_must_report_non_configurable_keys() {
    let mut context = Context::default();
    let target = plain(&mut context);
    target
        .define_property_or_throw(
            "locked",
            crate::property::PropertyDescriptor::builder()
                .value(1)
                .writable(false)
                .enumerable(true)
                .configurable(false),
            &mut context,
        )
        .unwrap();

    let handler = plain(&mut context);
    let trap = crate::object::FunctionBuilder::native(&mut context, |_, _, context| {
        // Hide every key, including the non-configurable one.
        Ok(crate::builtins::Array::create_array_from_list([], context).into())
    })
    .build();
    handler.set("ownKeys", trap, true, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    assert!(proxy.__own_property_keys__(&mut context).is_err());
}

#[test]
fn has_trap_cannot_hide_non_configurable_keys() {
    let mut context = Context::default();
    let target = plain(&mut context);
    target
        .define_property_or_throw(
            "locked",
            crate::property::PropertyDescriptor::builder()
                .value(1)
                .writable(false)
                .enumerable(true)
                .configurable(false),
            &mut context,
        )
        .unwrap();

    let handler = plain(&mut context);
    let trap =
        crate::object::FunctionBuilder::native(&mut context, |_, _, _| Ok(false.into())).build();
    handler.set("has", trap, true, &mut context).unwrap();

    let proxy = new_proxy(&target, &handler, &mut context);
    assert!(proxy.has_property("locked", &mut context).is_err());
    // Keys the target does not have can be hidden freely.
    assert!(!proxy.has_property("free", &mut context).unwrap());
}
