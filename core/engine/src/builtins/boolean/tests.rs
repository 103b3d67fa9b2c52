use super::Boolean;
use crate::{Context, JsValue};

#[test]
fn constructor_without_new_returns_primitive() {
    let mut context = Context::default();
    let result =
        Boolean::constructor(&JsValue::undefined(), &[JsValue::new("x")], &mut context).unwrap();
    assert_eq!(result.as_boolean(), Some(true));

    let result = Boolean::constructor(&JsValue::undefined(), &[], &mut context).unwrap();
    assert_eq!(result.as_boolean(), Some(false));
}

#[test]
fn wrapper_unwraps_through_value_of() {
    let mut context = Context::default();
    let new_target: JsValue = context
        .intrinsics()
        .constructors()
        .boolean()
        .constructor()
        .into();
    let wrapper = Boolean::constructor(&new_target, &[JsValue::new(true)], &mut context).unwrap();
    assert!(wrapper.is_object());

    let value = wrapper
        .as_object()
        .unwrap()
        .invoke("valueOf", &[], &mut context)
        .unwrap();
    assert_eq!(value.as_boolean(), Some(true));

    let string = wrapper
        .as_object()
        .unwrap()
        .invoke("toString", &[], &mut context)
        .unwrap();
    assert_eq!(string.as_string().unwrap(), "true");
}
