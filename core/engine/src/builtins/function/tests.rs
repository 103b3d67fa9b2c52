use crate::{
    js_string,
    object::{FunctionBuilder, JsObject, ObjectData},
    value::JsArgs,
    Context, JsValue,
};

#[test]
fn call_and_apply_forward_arguments() {
    let mut context = Context::default();
    let sum = FunctionBuilder::native(&mut context, |this, args, context| {
        let base = this.as_number().unwrap_or(0.0);
        let a = args.get_or_undefined(0).to_number(context)?;
        let b = args.get_or_undefined(1).to_number(context)?;
        Ok((base + a + b).into())
    })
    .name("sum")
    .length(2)
    .build();

    let result = sum
        .invoke(
            "call",
            &[JsValue::new(10), JsValue::new(1), JsValue::new(2)],
            &mut context,
        )
        .unwrap();
    assert_eq!(result.as_number(), Some(13.0));

    let args_array = crate::builtins::Array::create_array_from_list(
        [JsValue::new(3), JsValue::new(4)],
        &mut context,
    );
    let result = sum
        .invoke(
            "apply",
            &[JsValue::new(10), args_array.into()],
            &mut context,
        )
        .unwrap();
    assert_eq!(result.as_number(), Some(17.0));
}

#[test]
fn bind_prepends_arguments_and_fixes_this() {
    let mut context = Context::default();
    let describe = FunctionBuilder::native(&mut context, |this, args, context| {
        let tag = this.to_string(context)?;
        let first = args.get_or_undefined(0).to_string(context)?;
        let second = args.get_or_undefined(1).to_string(context)?;
        Ok(js_string!(tag, js_string!(":"), first, second).into())
    })
    .name("describe")
    .length(2)
    .build();

    let bound = describe
        .invoke(
            "bind",
            &[js_string!("T").into(), js_string!("a").into()],
            &mut context,
        )
        .unwrap();
    let bound_obj = bound.as_object().unwrap();

    // The bound name and remaining length follow the spec.
    assert_eq!(
        bound_obj.get("name", &mut context).unwrap().as_string().unwrap(),
        "bound describe"
    );
    assert_eq!(
        bound_obj.get("length", &mut context).unwrap().as_number(),
        Some(1.0)
    );

    let result = bound_obj
        .call(&JsValue::new("ignored"), &[js_string!("b").into()], &mut context)
        .unwrap();
    assert_eq!(result.as_string().unwrap(), "T:ab");
}

#[test]
fn function_prototype_is_callable() {
    let mut context = Context::default();
    let prototype = context.intrinsics().constructors().function().prototype();
    let result = prototype.call(&JsValue::undefined(), &[], &mut context).unwrap();
    assert!(result.is_undefined());
}

#[test]
fn dynamic_function_compilation_is_unavailable() {
    let mut context = Context::default();
    let function = context.intrinsics().constructors().function().constructor();
    assert!(function
        .call(&JsValue::undefined(), &[js_string!("return 1").into()], &mut context)
        .is_err());
}

#[test]
fn ordinary_has_instance_walks_the_chain() {
    let mut context = Context::default();
    let array_ctor: JsValue = context.intrinsics().constructors().array().constructor().into();
    let array = crate::builtins::Array::create_array_from_list([], &mut context);

    assert!(super::ordinary_has_instance(&array_ctor, &array.into(), &mut context).unwrap());

    let plain = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        ObjectData::ordinary(),
    );
    assert!(
        !super::ordinary_has_instance(&array_ctor, &plain.into(), &mut context).unwrap()
    );
}

#[test]
fn closures_trace_their_captures() {
    let mut context = Context::default();
    let captured = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        ObjectData::ordinary(),
    );
    captured.set("x", 5, true, &mut context).unwrap();

    let reader = FunctionBuilder::closure_with_captures(
        &mut context,
        |_, _, captures, context| {
            captures
                .as_object()
                .expect("captures are always the object")
                .get("x", context)
        },
        captured.into(),
    )
    .name("reader")
    .build();

    let result = reader.call(&JsValue::undefined(), &[], &mut context).unwrap();
    assert_eq!(result.as_number(), Some(5.0));
}
