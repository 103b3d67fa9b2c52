use crate::{js_string, object::JsObject, Context, JsValue};

fn constructor_of(name: &str, context: &mut Context) -> JsObject {
    context
        .global_object()
        .get(name, context)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap()
}

fn from_values(name: &str, values: &[JsValue], context: &mut Context) -> JsObject {
    let source = crate::builtins::Array::create_array_from_list(values.to_vec(), context);
    let ctor = constructor_of(name, context);
    ctor.construct(&[source.into()], None, context).unwrap()
}

#[test]
fn allocation_from_length() {
    let mut context = Context::default();
    let ctor = constructor_of("Int16Array", &mut context);
    let ta = ctor.construct(&[JsValue::new(4)], None, &mut context).unwrap();

    assert_eq!(ta.get("length", &mut context).unwrap().as_number(), Some(4.0));
    assert_eq!(
        ta.get("byteLength", &mut context).unwrap().as_number(),
        Some(8.0)
    );
    assert_eq!(ta.get(0, &mut context).unwrap().as_number(), Some(0.0));
}

#[test]
fn uint8_clamped_saturates() {
    let mut context = Context::default();
    let ta = from_values(
        "Uint8ClampedArray",
        &[JsValue::new(300), JsValue::new(-1), JsValue::new(127)],
        &mut context,
    );
    let joined = ta
        .invoke("join", &[js_string!(",").into()], &mut context)
        .unwrap();
    assert_eq!(joined.as_string().unwrap(), "255,0,127");
}

#[test]
fn elements_wrap_modularly() {
    let mut context = Context::default();
    let ta = from_values("Int8Array", &[JsValue::new(130)], &mut context);
    assert_eq!(ta.get(0, &mut context).unwrap().as_number(), Some(-126.0));

    let ta = from_values("Uint16Array", &[JsValue::new(65_537)], &mut context);
    assert_eq!(ta.get(0, &mut context).unwrap().as_number(), Some(1.0));
}

#[test]
fn out_of_range_reads_are_undefined() {
    let mut context = Context::default();
    let ta = from_values("Uint8Array", &[JsValue::new(1)], &mut context);
    assert!(ta.get(1, &mut context).unwrap().is_undefined());
    assert!(ta.get("-0", &mut context).unwrap().is_undefined());
    assert!(ta.get("1.5", &mut context).unwrap().is_undefined());
}

#[test]
fn views_share_the_buffer() {
    let mut context = Context::default();
    let buffer_ctor = context.intrinsics().constructors().array_buffer().constructor();
    let buffer = buffer_ctor
        .construct(&[JsValue::new(4)], None, &mut context)
        .unwrap();

    let uint8 = constructor_of("Uint8Array", &mut context);
    let uint16 = constructor_of("Uint16Array", &mut context);
    let bytes = uint8
        .construct(&[buffer.clone().into()], None, &mut context)
        .unwrap();
    let words = uint16
        .construct(&[buffer.into()], None, &mut context)
        .unwrap();

    bytes.set(0, 0xFF, true, &mut context).unwrap();
    bytes.set(1, 0x01, true, &mut context).unwrap();
    let expected = if cfg!(target_endian = "little") {
        0x01FF
    } else {
        0xFF01
    };
    assert_eq!(
        words.get(0, &mut context).unwrap().as_number(),
        Some(f64::from(expected))
    );
}

#[test]
fn byte_offset_views() {
    let mut context = Context::default();
    let buffer_ctor = context.intrinsics().constructors().array_buffer().constructor();
    let buffer = buffer_ctor
        .construct(&[JsValue::new(8)], None, &mut context)
        .unwrap();
    let uint16 = constructor_of("Uint16Array", &mut context);

    // byteOffset + length·size exactly equals byteLength.
    let view = uint16
        .construct(
            &[buffer.clone().into(), JsValue::new(4), JsValue::new(2)],
            None,
            &mut context,
        )
        .unwrap();
    assert_eq!(view.get("length", &mut context).unwrap().as_number(), Some(2.0));
    assert_eq!(
        view.get("byteOffset", &mut context).unwrap().as_number(),
        Some(4.0)
    );

    // One element more does not fit.
    assert!(uint16
        .construct(
            &[buffer.clone().into(), JsValue::new(4), JsValue::new(3)],
            None,
            &mut context
        )
        .is_err());

    // Misaligned offsets are rejected.
    assert!(uint16
        .construct(&[buffer.into(), JsValue::new(1)], None, &mut context)
        .is_err());
}

#[test]
fn length_tracking_views_follow_resizes() {
    let mut context = Context::default();
    let buffer_ctor = context.intrinsics().constructors().array_buffer().constructor();
    let options = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    options.set("maxByteLength", 16, true, &mut context).unwrap();
    let buffer = buffer_ctor
        .construct(&[JsValue::new(4), options.into()], None, &mut context)
        .unwrap();

    let uint16 = constructor_of("Uint16Array", &mut context);
    let tracking = uint16
        .construct(&[buffer.clone().into(), JsValue::new(2)], None, &mut context)
        .unwrap();
    assert_eq!(
        tracking.get("length", &mut context).unwrap().as_number(),
        Some(1.0)
    );

    buffer.invoke("resize", &[JsValue::new(10)], &mut context).unwrap();
    // length = (10 - 2) / 2
    assert_eq!(
        tracking.get("length", &mut context).unwrap().as_number(),
        Some(4.0)
    );

    // Shrinking the buffer below the offset makes the view empty.
    buffer.invoke("resize", &[JsValue::new(0)], &mut context).unwrap();
    assert_eq!(
        tracking.get("length", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn fixed_views_go_out_of_bounds_on_shrink() {
    let mut context = Context::default();
    let buffer_ctor = context.intrinsics().constructors().array_buffer().constructor();
    let options = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    options.set("maxByteLength", 16, true, &mut context).unwrap();
    let buffer = buffer_ctor
        .construct(&[JsValue::new(8), options.into()], None, &mut context)
        .unwrap();

    let uint8 = constructor_of("Uint8Array", &mut context);
    let fixed = uint8
        .construct(
            &[buffer.clone().into(), JsValue::new(0), JsValue::new(8)],
            None,
            &mut context,
        )
        .unwrap();

    buffer.invoke("resize", &[JsValue::new(4)], &mut context).unwrap();

    // Mutating methods on an out-of-bounds view throw TypeError.
    assert!(fixed.invoke("fill", &[JsValue::new(1)], &mut context).is_err());
    assert!(fixed.invoke("reverse", &[], &mut context).is_err());
    // The length accessor reports 0.
    assert_eq!(
        fixed.get("length", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn reduce_works_across_kinds() {
    let mut context = Context::default();
    let ta = from_values(
        "Float64Array",
        &[JsValue::new(1.5), JsValue::new(2.5)],
        &mut context,
    );
    let add = crate::object::FunctionBuilder::native(&mut context, |_, args, context| {
        let a = args.first().cloned().unwrap_or_default().to_number(context)?;
        let b = args.get(1).cloned().unwrap_or_default().to_number(context)?;
        Ok((a + b).into())
    })
    .build();
    let sum = ta.invoke("reduce", &[add.into()], &mut context).unwrap();
    assert_eq!(sum.as_number(), Some(4.0));

    // BigInt kinds reduce over bigints.
    let ta = from_values(
        "BigInt64Array",
        &[crate::JsBigInt::from(3).into(), crate::JsBigInt::from(4).into()],
        &mut context,
    );
    let first = ta
        .invoke(
            "reduce",
            &[crate::object::FunctionBuilder::native(&mut context, |_, args, _| {
                Ok(args.first().cloned().unwrap_or_default())
            })
            .build()
            .into()],
            &mut context,
        )
        .unwrap();
    assert_eq!(first.as_bigint(), Some(&crate::JsBigInt::from(3)));
}

#[test]
fn of_and_from_statics() {
    let mut context = Context::default();
    let uint8 = constructor_of("Uint8Array", &mut context);

    let ta = uint8
        .invoke("of", &[JsValue::new(1), JsValue::new(2)], &mut context)
        .unwrap();
    let ta = ta.as_object().unwrap();
    assert_eq!(ta.get("length", &mut context).unwrap().as_number(), Some(2.0));
    assert_eq!(ta.get(1, &mut context).unwrap().as_number(), Some(2.0));

    // `from` lossily re-encodes another typed array.
    let floats = from_values(
        "Float64Array",
        &[JsValue::new(1.7), JsValue::new(300.0)],
        &mut context,
    );
    let bytes = uint8.invoke("from", &[floats.into()], &mut context).unwrap();
    let bytes = bytes.as_object().unwrap();
    assert_eq!(bytes.get(0, &mut context).unwrap().as_number(), Some(1.0));
    assert_eq!(bytes.get(1, &mut context).unwrap().as_number(), Some(44.0));
}

#[test]
fn content_type_mixing_is_a_type_error() {
    let mut context = Context::default();
    let numbers = from_values("Uint8Array", &[JsValue::new(1)], &mut context);
    let bigints = constructor_of("BigInt64Array", &mut context);
    assert!(bigints
        .construct(&[numbers.into()], None, &mut context)
        .is_err());
}

#[test]
fn prototype_methods_are_shared_not_owned() {
    let mut context = Context::default();
    let shared_proto = context.intrinsics().constructors().typed_array().prototype();
    let uint8_proto = context
        .intrinsics()
        .constructors()
        .typed_uint8_array()
        .prototype();

    // The concrete prototype inherits from %TypedArray%.prototype...
    let parent = uint8_proto
        .__get_prototype_of__(&mut context)
        .unwrap()
        .expect("concrete prototypes have a parent");
    assert!(JsObject::equals(&parent, &shared_proto));

    // ...and does not own the shared methods.
    assert!(!uint8_proto.has_own_property("map", &mut context).unwrap());
    assert!(shared_proto.has_own_property("map", &mut context).unwrap());

    // BYTES_PER_ELEMENT is per-kind.
    assert_eq!(
        uint8_proto
            .get("BYTES_PER_ELEMENT", &mut context)
            .unwrap()
            .as_number(),
        Some(1.0)
    );
}

#[test]
fn sort_default_is_numeric() {
    let mut context = Context::default();
    let ta = from_values(
        "Int32Array",
        &[JsValue::new(10), JsValue::new(2), JsValue::new(-1)],
        &mut context,
    );
    ta.invoke("sort", &[], &mut context).unwrap();
    let joined = ta.invoke("join", &[], &mut context).unwrap();
    assert_eq!(joined.as_string().unwrap(), "-1,2,10");
}

#[test]
fn subarray_shares_the_buffer() {
    let mut context = Context::default();
    let ta = from_values(
        "Uint8Array",
        &[JsValue::new(1), JsValue::new(2), JsValue::new(3)],
        &mut context,
    );
    let sub = ta
        .invoke("subarray", &[JsValue::new(1)], &mut context)
        .unwrap();
    let sub = sub.as_object().unwrap();
    assert_eq!(sub.get("length", &mut context).unwrap().as_number(), Some(2.0));

    // A write through the subarray lands in the parent.
    sub.set(0, 9, true, &mut context).unwrap();
    assert_eq!(ta.get(1, &mut context).unwrap().as_number(), Some(9.0));
}
