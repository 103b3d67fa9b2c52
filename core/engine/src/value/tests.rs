use super::*;
use crate::{js_string, Context, JsBigInt};

#[test]
fn to_boolean_follows_the_table() {
    assert!(!JsValue::undefined().to_boolean());
    assert!(!JsValue::null().to_boolean());
    assert!(!JsValue::new(0).to_boolean());
    assert!(!JsValue::new(-0.0).to_boolean());
    assert!(!JsValue::nan().to_boolean());
    assert!(!JsValue::new("").to_boolean());
    assert!(!JsValue::new(JsBigInt::zero()).to_boolean());

    assert!(JsValue::new(1).to_boolean());
    assert!(JsValue::new("false").to_boolean());
    assert!(JsValue::new(JsBigInt::from(-1)).to_boolean());
}

#[test]
fn string_to_number_grammar() {
    let n = |s: &str| string_to_number(&js_string!(s));
    assert_eq!(n(""), 0.0);
    assert_eq!(n("  42 "), 42.0);
    assert_eq!(n("1.5e3"), 1500.0);
    assert_eq!(n(".5"), 0.5);
    assert_eq!(n("Infinity"), f64::INFINITY);
    assert_eq!(n("-Infinity"), f64::NEG_INFINITY);
    assert_eq!(n("0x10"), 16.0);
    assert_eq!(n("0b101"), 5.0);
    assert_eq!(n("0o17"), 15.0);
    assert!(n("0x").is_nan());
    assert!(n("12px").is_nan());
    assert!(n("inf").is_nan());
    assert!(n("nan").is_nan());
    assert!(n("1e").is_nan());
}

#[test]
fn same_value_distinguishes_zeroes() {
    assert!(JsValue::same_value(&JsValue::nan(), &JsValue::nan()));
    assert!(!JsValue::same_value(
        &JsValue::new(0.0),
        &JsValue::new(-0.0)
    ));
    assert!(JsValue::same_value_zero(
        &JsValue::new(0.0),
        &JsValue::new(-0.0)
    ));
    assert!(!JsValue::nan().strict_equals(&JsValue::nan()));
}

#[test]
fn to_int32_wraps_modularly() {
    let mut context = Context::default();
    let x = JsValue::new(4_294_967_296.0 + 5.0);
    assert_eq!(x.to_i32(&mut context).unwrap(), 5);
    let x = JsValue::new(2_147_483_648.0);
    assert_eq!(x.to_i32(&mut context).unwrap(), -2_147_483_648);
    let x = JsValue::new(f64::NAN);
    assert_eq!(x.to_i32(&mut context).unwrap(), 0);
}

#[test]
fn to_length_clamps() {
    let mut context = Context::default();
    assert_eq!(JsValue::new(-5).to_length(&mut context).unwrap(), 0);
    assert_eq!(
        JsValue::new(f64::INFINITY).to_length(&mut context).unwrap(),
        2u64.pow(53) - 1
    );
    assert_eq!(JsValue::new(3.7).to_length(&mut context).unwrap(), 3);
}

#[test]
fn to_bigint_constraints() {
    let mut context = Context::default();
    assert_eq!(
        JsValue::new(3.0).to_bigint(&mut context).unwrap(),
        JsBigInt::from(3)
    );
    assert!(JsValue::new(3.5).to_bigint(&mut context).is_err());
    assert!(JsValue::undefined().to_bigint(&mut context).is_err());
    assert_eq!(
        JsValue::new("0xff").to_bigint(&mut context).unwrap(),
        JsBigInt::from(255)
    );
}

#[test]
fn loose_equality_cross_kind() {
    let mut context = Context::default();
    let a = JsValue::new(1);
    let b = JsValue::new("1");
    assert!(a.loosely_equals(&b, &mut context).unwrap());
    let big = JsValue::new(JsBigInt::from(1));
    assert!(big.loosely_equals(&a, &mut context).unwrap());
    assert!(!JsValue::nan()
        .loosely_equals(&JsValue::nan(), &mut context)
        .unwrap());
    assert!(JsValue::null()
        .loosely_equals(&JsValue::undefined(), &mut context)
        .unwrap());
}
