use crate::{js_string, object::JsObject, symbol::WellKnownSymbols, Context, JsValue};

fn object_constructor(context: &mut Context) -> JsObject {
    context.intrinsics().constructors().object().constructor()
}

fn plain(context: &mut Context) -> JsObject {
    JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    )
}

#[test]
fn define_property_then_read_descriptor() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);

    let descriptor = plain(&mut context);
    descriptor.set("value", 7, true, &mut context).unwrap();

    ctor.invoke(
        "defineProperty",
        &[
            target.clone().into(),
            js_string!("k").into(),
            descriptor.into(),
        ],
        &mut context,
    )
    .unwrap();

    let read = ctor
        .invoke(
            "getOwnPropertyDescriptor",
            &[target.into(), js_string!("k").into()],
            &mut context,
        )
        .unwrap();
    let read = read.as_object().unwrap();
    assert_eq!(
        read.get("value", &mut context).unwrap().as_number(),
        Some(7.0)
    );
    assert_eq!(
        read.get("writable", &mut context).unwrap().as_boolean(),
        Some(false)
    );
    assert_eq!(
        read.get("enumerable", &mut context).unwrap().as_boolean(),
        Some(false)
    );
}

#[test]
fn define_property_rejects_mixed_descriptors() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);

    let getter = crate::object::FunctionBuilder::native(&mut context, |_, _, _| {
        Ok(JsValue::undefined())
    })
    .build();

    let descriptor = plain(&mut context);
    descriptor.set("value", 7, true, &mut context).unwrap();
    descriptor.set("get", getter, true, &mut context).unwrap();

    let result = ctor.invoke(
        "defineProperty",
        &[target.into(), js_string!("k").into(), descriptor.into()],
        &mut context,
    );
    assert!(result.is_err());
}

#[test]
fn create_with_null_prototype() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);

    let created = ctor
        .invoke("create", &[JsValue::null()], &mut context)
        .unwrap();
    let created = created.as_object().unwrap();
    assert!(created.__get_prototype_of__(&mut context).unwrap().is_none());

    // A non-object prototype argument is a TypeError.
    assert!(ctor.invoke("create", &[JsValue::new(1)], &mut context).is_err());
}

#[test]
fn keys_values_entries() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);
    target.set("a", 1, true, &mut context).unwrap();
    target.set("b", 2, true, &mut context).unwrap();

    let keys = ctor
        .invoke("keys", &[target.clone().into()], &mut context)
        .unwrap();
    let keys_obj = keys.as_object().unwrap();
    assert_eq!(keys_obj.length_of_array_like(&mut context).unwrap(), 2);
    assert_eq!(
        keys_obj.get(0, &mut context).unwrap().as_string().unwrap(),
        "a"
    );

    let values = ctor
        .invoke("values", &[target.clone().into()], &mut context)
        .unwrap();
    assert_eq!(
        values
            .as_object()
            .unwrap()
            .get(1, &mut context)
            .unwrap()
            .as_number(),
        Some(2.0)
    );

    let entries = ctor.invoke("entries", &[target.into()], &mut context).unwrap();
    let first = entries.as_object().unwrap().get(0, &mut context).unwrap();
    let first = first.as_object().unwrap();
    assert_eq!(
        first.get(0, &mut context).unwrap().as_string().unwrap(),
        "a"
    );
    assert_eq!(first.get(1, &mut context).unwrap().as_number(), Some(1.0));
}

#[test]
fn assign_copies_enumerable_own_properties() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);
    let source = plain(&mut context);
    source.set("x", 1, true, &mut context).unwrap();
    source.set("y", 2, true, &mut context).unwrap();

    let result = ctor
        .invoke(
            "assign",
            &[target.clone().into(), source.into()],
            &mut context,
        )
        .unwrap();
    assert!(JsObject::equals(result.as_object().unwrap(), &target));
    assert_eq!(
        target.get("y", &mut context).unwrap().as_number(),
        Some(2.0)
    );
}

#[test]
fn from_entries_builds_objects() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);

    let entry = crate::builtins::Array::create_array_from_list(
        [js_string!("k").into(), JsValue::new(9)],
        &mut context,
    );
    let entries = crate::builtins::Array::create_array_from_list([entry.into()], &mut context);

    let result = ctor
        .invoke("fromEntries", &[entries.into()], &mut context)
        .unwrap();
    assert_eq!(
        result
            .as_object()
            .unwrap()
            .get("k", &mut context)
            .unwrap()
            .as_number(),
        Some(9.0)
    );
}

#[test]
fn object_is_distinguishes_zeroes() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);

    let same = ctor
        .invoke("is", &[JsValue::nan(), JsValue::nan()], &mut context)
        .unwrap();
    assert_eq!(same.as_boolean(), Some(true));

    let zeroes = ctor
        .invoke("is", &[JsValue::new(0.0), JsValue::new(-0.0)], &mut context)
        .unwrap();
    assert_eq!(zeroes.as_boolean(), Some(false));
}

#[test]
fn to_string_uses_to_string_tag() {
    let mut context = Context::default();
    let target = plain(&mut context);

    let tagless = crate::builtins::object::Object::to_string(
        &target.clone().into(),
        &[],
        &mut context,
    )
    .unwrap();
    assert_eq!(tagless.as_string().unwrap(), "[object Object]");

    target
        .set(
            WellKnownSymbols::to_string_tag(),
            js_string!("Custom"),
            true,
            &mut context,
        )
        .unwrap();
    let tagged =
        crate::builtins::object::Object::to_string(&target.into(), &[], &mut context).unwrap();
    assert_eq!(tagged.as_string().unwrap(), "[object Custom]");

    let null_tag =
        crate::builtins::object::Object::to_string(&JsValue::null(), &[], &mut context).unwrap();
    assert_eq!(null_tag.as_string().unwrap(), "[object Null]");
}

#[test]
fn freeze_and_is_frozen() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);
    target.set("x", 1, true, &mut context).unwrap();

    ctor.invoke("freeze", &[target.clone().into()], &mut context)
        .unwrap();
    let frozen = ctor
        .invoke("isFrozen", &[target.clone().into()], &mut context)
        .unwrap();
    assert_eq!(frozen.as_boolean(), Some(true));

    // Primitives are trivially frozen.
    let frozen = ctor
        .invoke("isFrozen", &[JsValue::new(1)], &mut context)
        .unwrap();
    assert_eq!(frozen.as_boolean(), Some(true));
}

#[test]
fn get_own_property_names_excludes_symbols() {
    let mut context = Context::default();
    let ctor = object_constructor(&mut context);
    let target = plain(&mut context);
    target.set("s", 1, true, &mut context).unwrap();
    target
        .set(crate::JsSymbol::new(None), 2, true, &mut context)
        .unwrap();

    let names = ctor
        .invoke("getOwnPropertyNames", &[target.clone().into()], &mut context)
        .unwrap();
    assert_eq!(
        names
            .as_object()
            .unwrap()
            .length_of_array_like(&mut context)
            .unwrap(),
        1
    );

    let symbols = ctor
        .invoke("getOwnPropertySymbols", &[target.into()], &mut context)
        .unwrap();
    assert_eq!(
        symbols
            .as_object()
            .unwrap()
            .length_of_array_like(&mut context)
            .unwrap(),
        1
    );
}
