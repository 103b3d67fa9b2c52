use crate::{js_string, Context, JsBigInt, JsValue};

#[test]
fn conversion_follows_to_bigint() {
    let mut context = Context::default();
    let bigint_fn = context.intrinsics().constructors().bigint().constructor();

    let from_number = bigint_fn
        .call(&JsValue::undefined(), &[JsValue::new(42)], &mut context)
        .unwrap();
    assert_eq!(from_number.as_bigint(), Some(&JsBigInt::from(42)));

    let from_string = bigint_fn
        .call(&JsValue::undefined(), &[js_string!("0xff").into()], &mut context)
        .unwrap();
    assert_eq!(from_string.as_bigint(), Some(&JsBigInt::from(255)));

    // Non-integral numbers are a RangeError.
    assert!(bigint_fn
        .call(&JsValue::undefined(), &[JsValue::new(1.5)], &mut context)
        .is_err());
}

#[test]
fn bigint_string_roundtrip() {
    let mut context = Context::default();
    for value in [0i64, 1, -1, 255, -9_007_199_254_740_993] {
        let b = JsBigInt::from(value);
        let s = JsValue::from(b.clone()).to_string(&mut context).unwrap();
        let back = JsValue::from(s).to_bigint(&mut context).unwrap();
        assert_eq!(back, b);
    }
}

#[test]
fn as_int_n_statics() {
    let mut context = Context::default();
    let bigint_fn = context.intrinsics().constructors().bigint().constructor();

    let wrapped = bigint_fn
        .invoke(
            "asIntN",
            &[JsValue::new(8), JsBigInt::from(255).into()],
            &mut context,
        )
        .unwrap();
    assert_eq!(wrapped.as_bigint(), Some(&JsBigInt::from(-1)));

    let wrapped = bigint_fn
        .invoke(
            "asUintN",
            &[JsValue::new(8), JsBigInt::from(-1).into()],
            &mut context,
        )
        .unwrap();
    assert_eq!(wrapped.as_bigint(), Some(&JsBigInt::from(255)));
}

#[test]
fn to_string_radix() {
    let mut context = Context::default();
    let value: JsValue = JsBigInt::from(255).into();
    let boxed = value.to_object(&mut context).unwrap();
    let hex = boxed
        .invoke("toString", &[JsValue::new(16)], &mut context)
        .unwrap();
    assert_eq!(hex.as_string().unwrap(), "ff");
}
