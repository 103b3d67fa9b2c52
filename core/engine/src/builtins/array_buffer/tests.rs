use crate::{object::JsObject, Context, JsValue};

fn new_buffer(args: &[JsValue], context: &mut Context) -> JsObject {
    let ctor = context.intrinsics().constructors().array_buffer().constructor();
    ctor.construct(args, None, context).unwrap()
}

#[test]
fn allocation_and_byte_length() {
    let mut context = Context::default();
    let buffer = new_buffer(&[JsValue::new(16)], &mut context);
    assert_eq!(
        buffer.get("byteLength", &mut context).unwrap().as_number(),
        Some(16.0)
    );
    assert_eq!(
        buffer.get("resizable", &mut context).unwrap().as_boolean(),
        Some(false)
    );
}

#[test]
fn resizable_buffers_resize_within_max() {
    let mut context = Context::default();
    let options = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    options.set("maxByteLength", 32, true, &mut context).unwrap();

    let buffer = new_buffer(&[JsValue::new(8), options.into()], &mut context);
    assert_eq!(
        buffer.get("resizable", &mut context).unwrap().as_boolean(),
        Some(true)
    );
    assert_eq!(
        buffer.get("maxByteLength", &mut context).unwrap().as_number(),
        Some(32.0)
    );

    buffer.invoke("resize", &[JsValue::new(24)], &mut context).unwrap();
    assert_eq!(
        buffer.get("byteLength", &mut context).unwrap().as_number(),
        Some(24.0)
    );

    // Beyond maxByteLength is a RangeError.
    assert!(buffer.invoke("resize", &[JsValue::new(64)], &mut context).is_err());
}

#[test]
fn fixed_buffers_cannot_resize() {
    let mut context = Context::default();
    let buffer = new_buffer(&[JsValue::new(8)], &mut context);
    assert!(buffer.invoke("resize", &[JsValue::new(4)], &mut context).is_err());
}

#[test]
fn slice_copies_out_of_the_buffer() {
    let mut context = Context::default();
    let buffer = new_buffer(&[JsValue::new(8)], &mut context);

    // Write a marker byte through the raw store.
    buffer
        .borrow_mut()
        .as_array_buffer_mut()
        .unwrap()
        .bytes_mut()
        .unwrap()[4] = 0xAB;

    let sliced = buffer
        .invoke("slice", &[JsValue::new(4), JsValue::new(6)], &mut context)
        .unwrap();
    let sliced = sliced.as_object().unwrap();
    assert_eq!(
        sliced.get("byteLength", &mut context).unwrap().as_number(),
        Some(2.0)
    );
    assert_eq!(
        sliced.borrow().as_array_buffer().unwrap().bytes().unwrap()[0],
        0xAB
    );

    // The copy is independent of the source.
    buffer
        .borrow_mut()
        .as_array_buffer_mut()
        .unwrap()
        .bytes_mut()
        .unwrap()[4] = 0;
    assert_eq!(
        sliced.borrow().as_array_buffer().unwrap().bytes().unwrap()[0],
        0xAB
    );
}

#[test]
fn is_view_recognizes_views() {
    let mut context = Context::default();
    let ctor = context.intrinsics().constructors().array_buffer().constructor();

    let uint8 = context
        .intrinsics()
        .constructors()
        .typed_uint8_array()
        .constructor();
    let view = uint8.construct(&[JsValue::new(4)], None, &mut context).unwrap();

    let result = ctor.invoke("isView", &[view.into()], &mut context).unwrap();
    assert_eq!(result.as_boolean(), Some(true));

    let result = ctor.invoke("isView", &[JsValue::new(1)], &mut context).unwrap();
    assert_eq!(result.as_boolean(), Some(false));
}

#[test]
fn length_exceeding_max_is_a_range_error() {
    let mut context = Context::default();
    let ctor = context.intrinsics().constructors().array_buffer().constructor();
    let options = JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    options.set("maxByteLength", 4, true, &mut context).unwrap();
    assert!(ctor
        .construct(&[JsValue::new(8), options.into()], None, &mut context)
        .is_err());
}
