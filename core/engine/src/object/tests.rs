use crate::{
    js_string,
    object::{IntegrityLevel, JsObject, ObjectData},
    property::{PropertyDescriptor, PropertyKey},
    Context, JsValue,
};

fn ordinary(context: &mut Context) -> JsObject {
    JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        ObjectData::ordinary(),
    )
}

#[test]
fn get_set_roundtrip() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);

    obj.set("answer", 42, true, &mut context).unwrap();
    let value = obj.get("answer", &mut context).unwrap();
    assert_eq!(value.as_number(), Some(42.0));
}

#[test]
fn prototype_chain_lookup() {
    let mut context = Context::default();
    let proto = ordinary(&mut context);
    proto.set("inherited", "yes", true, &mut context).unwrap();

    let obj = JsObject::from_proto_and_data(proto, ObjectData::ordinary());
    let value = obj.get("inherited", &mut context).unwrap();
    assert_eq!(value.as_string().unwrap(), "yes");
}

#[test]
fn prototype_cycle_is_rejected() {
    let mut context = Context::default();
    let a = ordinary(&mut context);
    let b = JsObject::from_proto_and_data(a.clone(), ObjectData::ordinary());

    // `a.[[SetPrototypeOf]](b)` would introduce a cycle.
    let ok = a
        .__set_prototype_of__(Some(b), &mut context)
        .unwrap();
    assert!(!ok);
}

#[test]
fn define_own_property_validates_non_configurable() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);

    obj.define_property_or_throw(
        "fixed",
        PropertyDescriptor::builder()
            .value(1)
            .writable(false)
            .enumerable(false)
            .configurable(false),
        &mut context,
    )
    .unwrap();

    // Redefining with a different value must fail.
    let ok = obj
        .__define_own_property__(
            &"fixed".into(),
            PropertyDescriptor::builder().value(2).build(),
            &mut context,
        )
        .unwrap();
    assert!(!ok);

    // Redefining with the same value is allowed.
    let ok = obj
        .__define_own_property__(
            &"fixed".into(),
            PropertyDescriptor::builder().value(1).build(),
            &mut context,
        )
        .unwrap();
    assert!(ok);
}

#[test]
fn own_keys_ordering() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);

    obj.create_data_property("zeta", 1, &mut context).unwrap();
    obj.create_data_property(2, 1, &mut context).unwrap();
    obj.create_data_property("alpha", 1, &mut context).unwrap();
    obj.create_data_property(0, 1, &mut context).unwrap();

    let keys = obj.__own_property_keys__(&mut context).unwrap();
    assert_eq!(
        keys,
        vec![
            PropertyKey::Index(0),
            PropertyKey::Index(2),
            PropertyKey::from("zeta"),
            PropertyKey::from("alpha"),
        ]
    );
}

#[test]
fn non_canonical_index_stays_string() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);

    obj.create_data_property("04", 1, &mut context).unwrap();
    let keys = obj.__own_property_keys__(&mut context).unwrap();
    assert_eq!(keys, vec![PropertyKey::from("04")]);
    assert_eq!(keys[0].as_index(), None);
}

#[test]
fn frozen_object_rejects_mutations() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);
    obj.create_data_property("x", 1, &mut context).unwrap();

    assert!(obj
        .set_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());
    assert!(obj
        .test_integrity_level(IntegrityLevel::Frozen, &mut context)
        .unwrap());

    // Writes fail without side effects.
    assert!(!obj.set("x", 2, false, &mut context).unwrap());
    assert!(!obj.set("y", 3, false, &mut context).unwrap());
    assert!(!obj.__delete__(&"x".into(), &mut context).unwrap());

    assert_eq!(
        obj.get("x", &mut context).unwrap().as_number(),
        Some(1.0)
    );
    assert!(!obj.has_own_property("y", &mut context).unwrap());
}

#[test]
fn accessors_invoke_with_receiver() {
    let mut context = Context::default();
    let obj = ordinary(&mut context);

    let getter = crate::object::FunctionBuilder::native(&mut context, |this, _, context| {
        this.as_object()
            .expect("receiver is an object")
            .get("backing", context)
    })
    .name("get x")
    .build();

    obj.define_property_or_throw(
        "x",
        PropertyDescriptor::builder()
            .get(getter)
            .enumerable(true)
            .configurable(true),
        &mut context,
    )
    .unwrap();
    obj.set("backing", js_string!("seen"), true, &mut context)
        .unwrap();

    let got = obj.get("x", &mut context).unwrap();
    assert_eq!(got.as_string().unwrap(), "seen");
}

#[test]
fn string_wrapper_has_virtual_characters() {
    let mut context = Context::default();
    let boxed = JsValue::from("abc").to_object(&mut context).unwrap();

    // Virtual indexed characters resolve lazily.
    let desc = boxed
        .__get_own_property__(&PropertyKey::Index(1), &mut context)
        .unwrap()
        .expect("index 1 exists");
    assert_eq!(desc.expect_value().as_string().unwrap(), "b");
    assert!(!desc.expect_writable());
    assert!(desc.expect_enumerable());

    // Out of range indices are absent.
    assert!(boxed
        .__get_own_property__(&PropertyKey::Index(3), &mut context)
        .unwrap()
        .is_none());

    // `length` is an ordinary own property.
    assert_eq!(
        boxed.get("length", &mut context).unwrap().as_number(),
        Some(3.0)
    );
}
