use crate::{js_string, object::JsObject, Context, JsValue};

fn new_map(context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().map().constructor();
    ctor.construct(&[], None, context).unwrap()
}

#[test]
fn set_get_has_delete() {
    let mut context = Context::default();
    let map = new_map(&mut context);

    map.invoke("set", &[js_string!("k").into(), JsValue::new(1)], &mut context)
        .unwrap();
    assert_eq!(
        map.get("size", &mut context).unwrap().as_number(),
        Some(1.0)
    );
    assert_eq!(
        map.invoke("get", &[js_string!("k").into()], &mut context)
            .unwrap()
            .as_number(),
        Some(1.0)
    );
    assert_eq!(
        map.invoke("has", &[js_string!("k").into()], &mut context)
            .unwrap()
            .as_boolean(),
        Some(true)
    );

    let deleted = map
        .invoke("delete", &[js_string!("k").into()], &mut context)
        .unwrap();
    assert_eq!(deleted.as_boolean(), Some(true));
    assert_eq!(
        map.get("size", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn keys_use_same_value_zero() {
    let mut context = Context::default();
    let map = new_map(&mut context);

    map.invoke("set", &[JsValue::nan(), JsValue::new(1)], &mut context)
        .unwrap();
    assert_eq!(
        map.invoke("get", &[JsValue::nan()], &mut context)
            .unwrap()
            .as_number(),
        Some(1.0)
    );

    // -0 keys normalize to +0.
    map.invoke("set", &[JsValue::new(-0.0), JsValue::new(2)], &mut context)
        .unwrap();
    assert_eq!(
        map.invoke("get", &[JsValue::new(0.0)], &mut context)
            .unwrap()
            .as_number(),
        Some(2.0)
    );
}

#[test]
fn insertion_order_is_preserved() {
    let mut context = Context::default();
    let map = new_map(&mut context);
    for (k, v) in [("b", 1), ("a", 2), ("c", 3)] {
        map.invoke("set", &[js_string!(k).into(), JsValue::new(v)], &mut context)
            .unwrap();
    }
    // Re-setting keeps the original position.
    map.invoke("set", &[js_string!("b").into(), JsValue::new(9)], &mut context)
        .unwrap();

    let iterator = map.invoke("keys", &[], &mut context).unwrap();
    let iterator = iterator.as_object().unwrap();
    let mut keys = Vec::new();
    loop {
        let step = iterator.invoke("next", &[], &mut context).unwrap();
        let step = step.as_object().unwrap();
        if step.get("done", &mut context).unwrap().to_boolean() {
            break;
        }
        keys.push(
            step.get("value", &mut context)
                .unwrap()
                .to_string(&mut context)
                .unwrap()
                .to_std_string_escaped(),
        );
    }
    assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn constructor_accepts_iterable_entries() {
    let mut context = Context::default();
    let entry = crate::builtins::Array::create_array_from_list(
        [js_string!("x").into(), JsValue::new(1)],
        &mut context,
    );
    let entries = crate::builtins::Array::create_array_from_list([entry.into()], &mut context);

    let ctor = context.intrinsics().constructors().map().constructor();
    let map = ctor.construct(&[entries.into()], None, &mut context).unwrap();
    assert_eq!(
        map.invoke("get", &[js_string!("x").into()], &mut context)
            .unwrap()
            .as_number(),
        Some(1.0)
    );
}

#[test]
fn for_each_visits_in_order() {
    let mut context = Context::default();
    let map = new_map(&mut context);
    map.invoke("set", &[JsValue::new(1), JsValue::new(10)], &mut context)
        .unwrap();
    map.invoke("set", &[JsValue::new(2), JsValue::new(20)], &mut context)
        .unwrap();

    let sink = crate::builtins::Array::create_array_from_list([], &mut context);
    let callback = crate::object::FunctionBuilder::closure_with_captures(
        &mut context,
        |_, args, captures, context| {
            let sink = captures.as_object().expect("captures are the sink array");
            crate::builtins::Array::push(
                &sink.clone().into(),
                &[args.first().cloned().unwrap_or_default()],
                context,
            )
        },
        sink.clone().into(),
    )
    .build();

    map.invoke("forEach", &[callback.into()], &mut context)
        .unwrap();
    assert_eq!(sink.length_of_array_like(&mut context).unwrap(), 2);
    assert_eq!(
        sink.get(0, &mut context).unwrap().as_number(),
        Some(10.0)
    );
}

#[test]
fn delete_during_iteration_is_safe() {
    let mut context = Context::default();
    let map = new_map(&mut context);
    map.invoke("set", &[JsValue::new(1), JsValue::new(1)], &mut context)
        .unwrap();
    map.invoke("set", &[JsValue::new(2), JsValue::new(2)], &mut context)
        .unwrap();

    let iterator = map.invoke("entries", &[], &mut context).unwrap();
    let iterator = iterator.as_object().unwrap();
    iterator.invoke("next", &[], &mut context).unwrap();

    // Remove the not-yet-visited entry mid-iteration.
    map.invoke("delete", &[JsValue::new(2)], &mut context)
        .unwrap();

    let step = iterator.invoke("next", &[], &mut context).unwrap();
    let step = step.as_object().unwrap();
    assert_eq!(
        step.get("done", &mut context).unwrap().as_boolean(),
        Some(true)
    );
}
