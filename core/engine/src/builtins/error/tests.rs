use crate::{error::JsNativeError, js_string, Context, JsValue};

#[test]
fn error_hierarchy_is_wired() {
    let mut context = Context::default();

    let type_error_proto = context.intrinsics().constructors().type_error().prototype();
    let error_proto = context.intrinsics().constructors().error().prototype();

    // TypeError.prototype inherits from Error.prototype.
    let parent = type_error_proto
        .__get_prototype_of__(&mut context)
        .unwrap()
        .expect("TypeError.prototype has a prototype");
    assert!(crate::object::JsObject::equals(&parent, &error_proto));

    // The `constructor` back-reference points at the constructor.
    let back = type_error_proto.get("constructor", &mut context).unwrap();
    assert!(crate::object::JsObject::equals(
        back.as_object().unwrap(),
        &context.intrinsics().constructors().type_error().constructor()
    ));
}

#[test]
fn construction_installs_message() {
    let mut context = Context::default();
    let range_error = context
        .intrinsics()
        .constructors()
        .range_error()
        .constructor();
    let err = range_error
        .construct(&[js_string!("too big").into()], None, &mut context)
        .unwrap();

    assert_eq!(
        err.get("message", &mut context)
            .unwrap()
            .as_string()
            .unwrap(),
        "too big"
    );
    assert_eq!(
        err.get("name", &mut context).unwrap().as_string().unwrap(),
        "RangeError"
    );

    let string = err.invoke("toString", &[], &mut context).unwrap();
    assert_eq!(string.as_string().unwrap(), "RangeError: too big");
}

#[test]
fn cause_is_installed_when_present() {
    let mut context = Context::default();
    let error = context.intrinsics().constructors().error().constructor();

    let options = crate::object::JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    options.set("cause", 42, true, &mut context).unwrap();

    let err = error
        .construct(
            &[js_string!("m").into(), options.into()],
            None,
            &mut context,
        )
        .unwrap();
    assert_eq!(
        err.get("cause", &mut context).unwrap().as_number(),
        Some(42.0)
    );
}

#[test]
fn native_error_materializes_with_realm_prototype() {
    let mut context = Context::default();
    let err = JsNativeError::typ().with_message("oops");
    let obj = err.to_opaque(&mut context);

    let proto = obj
        .__get_prototype_of__(&mut context)
        .unwrap()
        .expect("error objects have a prototype");
    assert!(crate::object::JsObject::equals(
        &proto,
        &context.intrinsics().constructors().type_error().prototype()
    ));
    assert_eq!(
        obj.get("message", &mut context)
            .unwrap()
            .as_string()
            .unwrap(),
        "oops"
    );

    // The `name` comes from the prototype.
    assert_eq!(
        obj.get("name", &mut context).unwrap().as_string().unwrap(),
        "TypeError"
    );
}

#[test]
fn thrown_values_surface_through_js_error() {
    let mut context = Context::default();
    let thrown = crate::JsError::from_opaque(JsValue::new(7));
    assert_eq!(thrown.as_opaque().and_then(JsValue::as_number), Some(7.0));
    assert_eq!(thrown.to_opaque(&mut context).as_number(), Some(7.0));
}
