use super::Number;
use crate::{js_string, Context, JsValue};

#[test]
fn number_to_string_shapes() {
    assert_eq!(&Number::to_js_string(0.0), "0");
    assert_eq!(&Number::to_js_string(-0.0), "0");
    assert_eq!(&Number::to_js_string(1.5), "1.5");
    assert_eq!(&Number::to_js_string(f64::NAN), "NaN");
    assert_eq!(&Number::to_js_string(f64::INFINITY), "Infinity");
    assert_eq!(&Number::to_js_string(1e21), "1e+21");
    assert_eq!(&Number::to_js_string(100.0), "100");
}

#[test]
fn string_roundtrip_preserves_numbers() {
    let mut context = Context::default();
    for n in [1.0, -2.5, 0.1, 1e-7, 123_456_789.123, 2f64.powi(53)] {
        let s = Number::to_js_string(n);
        let back = JsValue::from(s).to_number(&mut context).unwrap();
        assert_eq!(back, n);
    }
}

#[test]
fn radix_to_string() {
    let mut context = Context::default();
    let result = Number::to_string(&JsValue::new(255), &[JsValue::new(16)], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "ff");

    let result = Number::to_string(&JsValue::new(-8), &[JsValue::new(2)], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "-1000");

    assert!(Number::to_string(&JsValue::new(1), &[JsValue::new(1)], &mut context).is_err());
}

#[test]
fn to_fixed_formats() {
    let mut context = Context::default();
    let result = Number::to_fixed(&JsValue::new(1.005), &[JsValue::new(1)], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "1.0");

    let result = Number::to_fixed(&JsValue::new(2.5), &[JsValue::new(0)], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "2");

    assert!(Number::to_fixed(&JsValue::new(1), &[JsValue::new(101)], &mut context).is_err());
}

#[test]
fn parse_int_radices() {
    let mut context = Context::default();
    let parse = |s: &str, radix: i32, context: &mut Context| {
        Number::parse_int(
            &JsValue::undefined(),
            &[js_string!(s).into(), JsValue::new(radix)],
            context,
        )
        .unwrap()
    };

    assert_eq!(parse("42px", 0, &mut context).as_number(), Some(42.0));
    assert_eq!(parse("0x1f", 0, &mut context).as_number(), Some(31.0));
    assert_eq!(parse("  -10 ", 0, &mut context).as_number(), Some(-10.0));
    assert_eq!(parse("ff", 16, &mut context).as_number(), Some(255.0));
    assert!(parse("zz", 10, &mut context).as_number().unwrap().is_nan());
    assert!(parse("10", 1, &mut context).as_number().unwrap().is_nan());
}

#[test]
fn parse_float_longest_prefix() {
    let mut context = Context::default();
    let parse = |s: &str, context: &mut Context| {
        Number::parse_float(&JsValue::undefined(), &[js_string!(s).into()], context).unwrap()
    };

    assert_eq!(parse("3.14abc", &mut context).as_number(), Some(3.14));
    assert_eq!(parse("-1e2xyz", &mut context).as_number(), Some(-100.0));
    assert_eq!(
        parse("Infinity and beyond", &mut context).as_number(),
        Some(f64::INFINITY)
    );
    assert!(parse("abc", &mut context).as_number().unwrap().is_nan());
}

#[test]
fn static_predicates() {
    let mut context = Context::default();
    let global = context.global_object();
    let number_obj = global
        .get("Number", &mut context)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap();

    let is_integer = number_obj.get("isInteger", &mut context).unwrap();
    let result = is_integer
        .as_callable()
        .unwrap()
        .call(&JsValue::undefined(), &[JsValue::new(5.0)], &mut context)
        .unwrap();
    assert_eq!(result.as_boolean(), Some(true));

    let is_safe = number_obj.get("isSafeInteger", &mut context).unwrap();
    let result = is_safe
        .as_callable()
        .unwrap()
        .call(&JsValue::undefined(), &[JsValue::new(2f64.powi(53))], &mut context)
        .unwrap();
    assert_eq!(result.as_boolean(), Some(false));

    // `Number.isNaN` does not coerce, unlike the global `isNaN`.
    let is_nan = number_obj.get("isNaN", &mut context).unwrap();
    let result = is_nan
        .as_callable()
        .unwrap()
        .call(&JsValue::undefined(), &[JsValue::new("abc")], &mut context)
        .unwrap();
    assert_eq!(result.as_boolean(), Some(false));
}

#[test]
fn max_safe_integer_constant() {
    let mut context = Context::default();
    let global = context.global_object();
    let number_obj = global
        .get("Number", &mut context)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap();
    let max = number_obj.get("MAX_SAFE_INTEGER", &mut context).unwrap();
    assert_eq!(max.as_number(), Some(9_007_199_254_740_991.0));
}
