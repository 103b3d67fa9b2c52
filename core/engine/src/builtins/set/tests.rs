use crate::{js_string, object::JsObject, Context, JsValue};

fn new_set(context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().set().constructor();
    ctor.construct(&[], None, context).unwrap()
}

#[test]
fn add_has_delete() {
    let mut context = Context::default();
    let set = new_set(&mut context);

    set.invoke("add", &[js_string!("v").into()], &mut context)
        .unwrap();
    set.invoke("add", &[js_string!("v").into()], &mut context)
        .unwrap();
    assert_eq!(
        set.get("size", &mut context).unwrap().as_number(),
        Some(1.0)
    );
    assert_eq!(
        set.invoke("has", &[js_string!("v").into()], &mut context)
            .unwrap()
            .as_boolean(),
        Some(true)
    );

    let deleted = set
        .invoke("delete", &[js_string!("v").into()], &mut context)
        .unwrap();
    assert_eq!(deleted.as_boolean(), Some(true));
    assert_eq!(
        set.invoke("has", &[js_string!("v").into()], &mut context)
            .unwrap()
            .as_boolean(),
        Some(false)
    );
}

#[test]
fn nan_is_a_single_member() {
    let mut context = Context::default();
    let set = new_set(&mut context);
    set.invoke("add", &[JsValue::nan()], &mut context).unwrap();
    set.invoke("add", &[JsValue::nan()], &mut context).unwrap();
    assert_eq!(
        set.get("size", &mut context).unwrap().as_number(),
        Some(1.0)
    );
}

#[test]
fn constructor_drains_iterables() {
    let mut context = Context::default();
    let values = crate::builtins::Array::create_array_from_list(
        [JsValue::new(1), JsValue::new(2), JsValue::new(1)],
        &mut context,
    );
    let ctor = context.intrinsics().constructors().set().constructor();
    let set = ctor
        .construct(&[values.into()], None, &mut context)
        .unwrap();
    assert_eq!(
        set.get("size", &mut context).unwrap().as_number(),
        Some(2.0)
    );
}

#[test]
fn entries_yield_value_pairs() {
    let mut context = Context::default();
    let set = new_set(&mut context);
    set.invoke("add", &[js_string!("only").into()], &mut context)
        .unwrap();

    let iterator = set.invoke("entries", &[], &mut context).unwrap();
    let iterator = iterator.as_object().unwrap();
    let step = iterator.invoke("next", &[], &mut context).unwrap();
    let value = step
        .as_object()
        .unwrap()
        .get("value", &mut context)
        .unwrap();
    let pair = value.as_object().unwrap();
    assert_eq!(
        pair.get(0, &mut context).unwrap().as_string().unwrap(),
        "only"
    );
    assert_eq!(
        pair.get(1, &mut context).unwrap().as_string().unwrap(),
        "only"
    );
}
