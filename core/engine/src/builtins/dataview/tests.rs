use crate::{object::JsObject, Context, JsValue};

fn buffer_of(len: u64, context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().array_buffer().constructor();
    ctor.construct(&[JsValue::new(len)], None, context).unwrap()
}

fn view_over(buffer: &JsObject, context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().data_view().constructor();
    ctor.construct(&[buffer.clone().into()], None, context)
        .unwrap()
}

#[test]
fn endianness_is_explicit() {
    let mut context = Context::default();
    let buffer = buffer_of(8, &mut context);
    let view = view_over(&buffer, &mut context);

    view.invoke(
        "setUint16",
        &[JsValue::new(0), JsValue::new(0x1234), JsValue::new(false)],
        &mut context,
    )
    .unwrap();

    let big = view
        .invoke(
            "getUint16",
            &[JsValue::new(0), JsValue::new(false)],
            &mut context,
        )
        .unwrap();
    assert_eq!(big.as_number(), Some(f64::from(0x1234)));

    let little = view
        .invoke(
            "getUint16",
            &[JsValue::new(0), JsValue::new(true)],
            &mut context,
        )
        .unwrap();
    assert_eq!(little.as_number(), Some(f64::from(0x3412)));
}

#[test]
fn floats_and_bigints_roundtrip() {
    let mut context = Context::default();
    let buffer = buffer_of(16, &mut context);
    let view = view_over(&buffer, &mut context);

    view.invoke(
        "setFloat64",
        &[JsValue::new(0), JsValue::new(3.5), JsValue::new(true)],
        &mut context,
    )
    .unwrap();
    let back = view
        .invoke(
            "getFloat64",
            &[JsValue::new(0), JsValue::new(true)],
            &mut context,
        )
        .unwrap();
    assert_eq!(back.as_number(), Some(3.5));

    view.invoke(
        "setBigInt64",
        &[
            JsValue::new(8),
            crate::JsBigInt::from(-5).into(),
            JsValue::new(true),
        ],
        &mut context,
    )
    .unwrap();
    let back = view
        .invoke(
            "getBigInt64",
            &[JsValue::new(8), JsValue::new(true)],
            &mut context,
        )
        .unwrap();
    assert_eq!(back.as_bigint(), Some(&crate::JsBigInt::from(-5)));
}

#[test]
fn out_of_bounds_reads_throw() {
    let mut context = Context::default();
    let buffer = buffer_of(4, &mut context);
    let view = view_over(&buffer, &mut context);

    assert!(view
        .invoke("getUint32", &[JsValue::new(1)], &mut context)
        .is_err());
    assert!(view
        .invoke("getUint8", &[JsValue::new(4)], &mut context)
        .is_err());
}

#[test]
fn offsets_and_lengths_validate() {
    let mut context = Context::default();
    let buffer = buffer_of(8, &mut context);
    let ctor = context.intrinsics().constructors().data_view().constructor();

    // A view that does not fit is a RangeError.
    assert!(ctor
        .construct(
            &[buffer.clone().into(), JsValue::new(6), JsValue::new(4)],
            None,
            &mut context
        )
        .is_err());

    let view = ctor
        .construct(
            &[buffer.into(), JsValue::new(4), JsValue::new(4)],
            None,
            &mut context,
        )
        .unwrap();
    assert_eq!(
        view.get("byteOffset", &mut context).unwrap().as_number(),
        Some(4.0)
    );
    assert_eq!(
        view.get("byteLength", &mut context).unwrap().as_number(),
        Some(4.0)
    );
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

    let view = view_over(&buffer, &mut context);
    assert_eq!(
        view.get("byteLength", &mut context).unwrap().as_number(),
        Some(4.0)
    );

    buffer
        .invoke("resize", &[JsValue::new(12)], &mut context)
        .unwrap();
    assert_eq!(
        view.get("byteLength", &mut context).unwrap().as_number(),
        Some(12.0)
    );
}
