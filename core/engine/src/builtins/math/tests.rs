use crate::{Context, JsValue};

fn math_invoke(name: &str, args: &[JsValue], context: &mut Context) -> JsValue {
    let global = context.global_object();
    let math = global
        .get("Math", context)
        .unwrap()
        .as_object()
        .cloned()
        .unwrap();
    math.invoke(name, args, context).unwrap()
}

#[test]
fn rounding_semantics() {
    let mut context = Context::default();
    // Half-way cases round towards +∞.
    assert_eq!(
        math_invoke("round", &[JsValue::new(-0.5)], &mut context).as_number(),
        Some(0.0)
    );
    assert_eq!(
        math_invoke("round", &[JsValue::new(2.5)], &mut context).as_number(),
        Some(3.0)
    );
    assert_eq!(
        math_invoke("trunc", &[JsValue::new(-2.7)], &mut context).as_number(),
        Some(-2.0)
    );
}

#[test]
fn min_max_nan_and_zeroes() {
    let mut context = Context::default();
    assert!(math_invoke("max", &[JsValue::new(1), JsValue::nan()], &mut context)
        .as_number()
        .unwrap()
        .is_nan());
    // -0 is smaller than +0.
    let min = math_invoke(
        "min",
        &[JsValue::new(0.0), JsValue::new(-0.0)],
        &mut context,
    )
    .as_number()
    .unwrap();
    assert!(min == 0.0 && min.is_sign_negative());
    assert_eq!(
        math_invoke("max", &[], &mut context).as_number(),
        Some(f64::NEG_INFINITY)
    );
}

#[test]
fn pow_edge_cases() {
    let mut context = Context::default();
    // (-1) ** Infinity is NaN in ECMAScript, unlike IEEE pow.
    assert!(math_invoke(
        "pow",
        &[JsValue::new(-1), JsValue::new(f64::INFINITY)],
        &mut context
    )
    .as_number()
    .unwrap()
    .is_nan());
}

#[test]
fn transcendental_functions() {
    use float_cmp::assert_approx_eq;

    let mut context = Context::default();
    let sqrt = math_invoke("sqrt", &[JsValue::new(2)], &mut context)
        .as_number()
        .unwrap();
    assert_approx_eq!(f64, sqrt, std::f64::consts::SQRT_2);

    let log = math_invoke("log", &[JsValue::new(std::f64::consts::E)], &mut context)
        .as_number()
        .unwrap();
    assert_approx_eq!(f64, log, 1.0);

    assert!(math_invoke("log", &[JsValue::new(-1)], &mut context)
        .as_number()
        .unwrap()
        .is_nan());
}

#[test]
fn imul_and_clz32() {
    let mut context = Context::default();
    assert_eq!(
        math_invoke("imul", &[JsValue::new(3), JsValue::new(4)], &mut context).as_number(),
        Some(12.0)
    );
    assert_eq!(
        math_invoke("clz32", &[JsValue::new(1)], &mut context).as_number(),
        Some(31.0)
    );
    assert_eq!(
        math_invoke("clz32", &[JsValue::new(0)], &mut context).as_number(),
        Some(32.0)
    );
}

#[test]
fn random_is_in_unit_interval() {
    let mut context = Context::default();
    for _ in 0..32 {
        let r = math_invoke("random", &[], &mut context).as_number().unwrap();
        assert!((0.0..1.0).contains(&r));
    }
}

#[test]
fn sign_preserves_zero_sign() {
    let mut context = Context::default();
    let r = math_invoke("sign", &[JsValue::new(-0.0)], &mut context)
        .as_number()
        .unwrap();
    assert!(r == 0.0 && r.is_sign_negative());
    assert_eq!(
        math_invoke("sign", &[JsValue::new(-3)], &mut context).as_number(),
        Some(-1.0)
    );
}
