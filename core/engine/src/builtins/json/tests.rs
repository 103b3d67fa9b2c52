use super::Json;
use crate::{js_string, object::FunctionBuilder, value::JsArgs, Context, JsValue};

fn parse(text: &str, context: &mut Context) -> JsValue {
    Json::parse(&JsValue::undefined(), &[js_string!(text).into()], context).unwrap()
}

fn stringify(args: &[JsValue], context: &mut Context) -> JsValue {
    Json::stringify(&JsValue::undefined(), args, context).unwrap()
}

#[test]
fn parse_plain_data() {
    let mut context = Context::default();
    let value = parse(r#"{"a": [1, true, null], "b": "x"}"#, &mut context);
    let obj = value.as_object().unwrap();

    let a = obj.get("a", &mut context).unwrap();
    let a_obj = a.as_object().unwrap();
    assert!(a_obj.is_array());
    assert_eq!(a_obj.length_of_array_like(&mut context).unwrap(), 3);
    assert!(a_obj.get(2, &mut context).unwrap().is_null());

    assert_eq!(
        obj.get("b", &mut context).unwrap().as_string().unwrap(),
        "x"
    );
}

#[test]
fn parse_rejects_invalid_json() {
    let mut context = Context::default();
    let result = Json::parse(
        &JsValue::undefined(),
        &[js_string!("{oops}").into()],
        &mut context,
    );
    assert!(result.is_err());
}

#[test]
fn parse_preserves_key_order() {
    let mut context = Context::default();
    let value = parse(r#"{"z": 1, "a": 2}"#, &mut context);
    let keys = value
        .as_object()
        .unwrap()
        .__own_property_keys__(&mut context)
        .unwrap();
    assert_eq!(format!("{}", keys[0]), "z");
    assert_eq!(format!("{}", keys[1]), "a");
}

#[test]
fn reviver_can_delete_properties() {
    let mut context = Context::default();
    let reviver = FunctionBuilder::native(&mut context, |_, args, _| {
        // Drop every numeric value.
        if args.get_or_undefined(1).is_number() {
            Ok(JsValue::undefined())
        } else {
            Ok(args.get_or_undefined(1).clone())
        }
    })
    .build();

    let value = Json::parse(
        &JsValue::undefined(),
        &[js_string!(r#"{"keep": "x", "drop": 3}"#).into(), reviver.into()],
        &mut context,
    )
    .unwrap();

    let obj = value.as_object().unwrap();
    assert!(obj.has_own_property("keep", &mut context).unwrap());
    assert!(!obj.has_own_property("drop", &mut context).unwrap());
}

#[test]
fn stringify_roundtrip() {
    let mut context = Context::default();
    let value = parse(r#"{"a":[1,true,null],"b":"x"}"#, &mut context);
    let text = stringify(&[value], &mut context);
    assert_eq!(
        text.as_string().unwrap(),
        r#"{"a":[1,true,null],"b":"x"}"#
    );
}

#[test]
fn stringify_undefined_and_functions() {
    let mut context = Context::default();
    // A bare undefined stringifies to undefined (the value, not a string).
    assert!(stringify(&[JsValue::undefined()], &mut context).is_undefined());

    // Non-finite numbers become null.
    let text = stringify(&[JsValue::nan()], &mut context);
    assert_eq!(text.as_string().unwrap(), "null");
}

#[test]
fn stringify_with_space() {
    let mut context = Context::default();
    let value = parse(r#"{"a":1}"#, &mut context);
    let text = stringify(&[value, JsValue::undefined(), JsValue::new(2)], &mut context);
    assert_eq!(text.as_string().unwrap(), "{\n  \"a\": 1\n}");
}

#[test]
fn stringify_cycle_is_a_type_error() {
    let mut context = Context::default();
    let obj = crate::object::JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    obj.set("self", obj.clone(), true, &mut context).unwrap();
    let result = Json::stringify(&JsValue::undefined(), &[obj.into()], &mut context);
    assert!(result.is_err());
}

#[test]
fn stringify_bigint_is_a_type_error() {
    let mut context = Context::default();
    let result = Json::stringify(
        &JsValue::undefined(),
        &[crate::JsBigInt::from(1).into()],
        &mut context,
    );
    assert!(result.is_err());
}

#[test]
fn property_list_filters_keys() {
    let mut context = Context::default();
    let value = parse(r#"{"a":1,"b":2}"#, &mut context);
    let filter = crate::builtins::Array::create_array_from_list(
        [js_string!("b").into()],
        &mut context,
    );
    let text = stringify(&[value, filter.into()], &mut context);
    assert_eq!(text.as_string().unwrap(), r#"{"b":2}"#);
}
