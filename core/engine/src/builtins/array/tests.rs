use super::Array;
use crate::{
    builtins::function::NativeFunction,
    js_string,
    object::FunctionBuilder,
    value::JsArgs,
    Context, JsValue,
};

fn array_of(values: &[i32], context: &mut Context) -> crate::object::JsObject {
    Array::create_array_from_list(values.iter().map(|&v| JsValue::new(v)), context)
}

fn values_of(array: &JsValue, context: &mut Context) -> Vec<JsValue> {
    let obj = array.as_object().expect("expected an array");
    let len = obj.length_of_array_like(context).unwrap();
    (0..len).map(|k| obj.get(k, context).unwrap()).collect()
}

fn native(context: &mut Context, f: NativeFunction) -> JsValue {
    FunctionBuilder::native(context, f).build().into()
}

#[test]
fn push_pop_roundtrip() {
    let mut context = Context::default();
    let array = array_of(&[1, 2], &mut context);

    let len = Array::push(&array.clone().into(), &[JsValue::new(3)], &mut context).unwrap();
    assert_eq!(len.as_number(), Some(3.0));

    let popped = Array::pop(&array.clone().into(), &[], &mut context).unwrap();
    assert_eq!(popped.as_number(), Some(3.0));

    // The array is structurally identical to the prior value.
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 2);
    assert_eq!(
        array.get(0, &mut context).unwrap().as_number(),
        Some(1.0)
    );
    assert_eq!(
        array.get(1, &mut context).unwrap().as_number(),
        Some(2.0)
    );
}

#[test]
fn shift_unshift() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3], &mut context);

    let first = Array::shift(&array.clone().into(), &[], &mut context).unwrap();
    assert_eq!(first.as_number(), Some(1.0));
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 2);

    Array::unshift(&array.clone().into(), &[JsValue::new(0)], &mut context).unwrap();
    assert_eq!(
        array.get(0, &mut context).unwrap().as_number(),
        Some(0.0)
    );
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 3);
}

#[test]
fn map_preserves_holes() {
    let mut context = Context::default();
    // [1, <hole>, 3]
    let array = Array::array_create(3, None, &mut context).unwrap();
    array.create_data_property(0, 1, &mut context).unwrap();
    array.create_data_property(2, 3, &mut context).unwrap();

    let identity = native(&mut context, |_, args, _| {
        Ok(args.get_or_undefined(0).clone())
    });
    let mapped = Array::map(&array.into(), &[identity], &mut context).unwrap();

    let mapped_obj = mapped.as_object().unwrap();
    assert_eq!(mapped_obj.length_of_array_like(&mut context).unwrap(), 3);
    assert!(!mapped_obj.has_own_property(1, &mut context).unwrap());
}

#[test]
fn reduce_requires_seed_for_empty() {
    let mut context = Context::default();
    let empty = array_of(&[], &mut context);
    let add = native(&mut context, |_, args, context| {
        let a = args.get_or_undefined(0).to_number(context)?;
        let b = args.get_or_undefined(1).to_number(context)?;
        Ok((a + b).into())
    });

    let err = Array::reduce(&empty.clone().into(), &[add.clone()], &mut context);
    assert!(err.is_err());

    let seeded = Array::reduce(
        &empty.into(),
        &[add.clone(), JsValue::new(10)],
        &mut context,
    )
    .unwrap();
    assert_eq!(seeded.as_number(), Some(10.0));

    let array = array_of(&[1, 2, 3], &mut context);
    let sum = Array::reduce(&array.into(), &[add], &mut context).unwrap();
    assert_eq!(sum.as_number(), Some(6.0));
}

#[test]
fn reduce_right_folds_backwards() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3], &mut context);
    let concat = native(&mut context, |_, args, context| {
        let a = args.get_or_undefined(0).to_string(context)?;
        let b = args.get_or_undefined(1).to_string(context)?;
        Ok(js_string!(a, b).into())
    });

    let folded = Array::reduce_right(
        &array.into(),
        &[concat, JsValue::new("")],
        &mut context,
    )
    .unwrap();
    assert_eq!(folded.as_string().unwrap(), "321");
}

#[test]
fn includes_uses_same_value_zero() {
    let mut context = Context::default();
    let array = Array::create_array_from_list(
        [JsValue::nan(), JsValue::new(-0.0)],
        &mut context,
    );

    let found = Array::includes_value(&array.clone().into(), &[JsValue::nan()], &mut context)
        .unwrap();
    assert_eq!(found.as_boolean(), Some(true));

    let found =
        Array::includes_value(&array.clone().into(), &[JsValue::new(0)], &mut context).unwrap();
    assert_eq!(found.as_boolean(), Some(true));

    // indexOf uses strict equality, which never matches NaN.
    let index = Array::index_of(&array.into(), &[JsValue::nan()], &mut context).unwrap();
    assert_eq!(index.as_number(), Some(-1.0));
}

#[test]
fn splice_removes_and_inserts() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3, 4, 5], &mut context);

    let removed = Array::splice(
        &array.clone().into(),
        &[JsValue::new(1), JsValue::new(2), JsValue::new(9)],
        &mut context,
    )
    .unwrap();

    let removed: Vec<f64> = values_of(&removed, &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(removed, vec![2.0, 3.0]);

    let result: Vec<f64> = values_of(&array.into(), &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(result, vec![1.0, 9.0, 4.0, 5.0]);
}

#[test]
fn slice_and_concat_build_fresh_arrays() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3, 4], &mut context);

    let sliced = Array::slice(
        &array.clone().into(),
        &[JsValue::new(1), JsValue::new(3)],
        &mut context,
    )
    .unwrap();
    let sliced_values: Vec<f64> = values_of(&sliced, &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(sliced_values, vec![2.0, 3.0]);

    let other = array_of(&[5], &mut context);
    let joined = Array::concat(&array.into(), &[other.into()], &mut context).unwrap();
    assert_eq!(
        joined
            .as_object()
            .unwrap()
            .length_of_array_like(&mut context)
            .unwrap(),
        5
    );
}

#[test]
fn join_and_to_string() {
    let mut context = Context::default();
    let array = Array::create_array_from_list(
        [JsValue::new(1), JsValue::null(), JsValue::undefined(), JsValue::new(2)],
        &mut context,
    );

    let joined = Array::join(&array.clone().into(), &[JsValue::new("-")], &mut context).unwrap();
    assert_eq!(joined.as_string().unwrap(), "1---2");

    let string = Array::to_string(&array.into(), &[], &mut context).unwrap();
    assert_eq!(string.as_string().unwrap(), "1,,,2");
}

#[test]
fn sort_default_is_lexicographic() {
    let mut context = Context::default();
    let array = array_of(&[10, 1, 2], &mut context);

    Array::sort(&array.clone().into(), &[], &mut context).unwrap();
    let result: Vec<f64> = values_of(&array.into(), &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    // "1" < "10" < "2" in code unit order.
    assert_eq!(result, vec![1.0, 10.0, 2.0]);
}

#[test]
fn sort_with_comparator_is_stable_numeric() {
    let mut context = Context::default();
    let array = array_of(&[3, 1, 10, 2], &mut context);
    let numeric = native(&mut context, |_, args, context| {
        let a = args.get_or_undefined(0).to_number(context)?;
        let b = args.get_or_undefined(1).to_number(context)?;
        Ok((a - b).into())
    });

    Array::sort(&array.clone().into(), &[numeric], &mut context).unwrap();
    let result: Vec<f64> = values_of(&array.into(), &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(result, vec![1.0, 2.0, 3.0, 10.0]);
}

#[test]
fn flat_flattens_one_level_by_default() {
    let mut context = Context::default();
    let inner = array_of(&[2, 3], &mut context);
    let deeper = Array::create_array_from_list([JsValue::new(4)], &mut context);
    let nested = Array::create_array_from_list([deeper.into()], &mut context);
    let array = Array::create_array_from_list(
        [JsValue::new(1), inner.into(), nested.into()],
        &mut context,
    );

    let flat = Array::flat(&array.into(), &[], &mut context).unwrap();
    let values = values_of(&flat, &mut context);
    assert_eq!(values.len(), 4);
    assert_eq!(values[0].as_number(), Some(1.0));
    assert_eq!(values[1].as_number(), Some(2.0));
    assert_eq!(values[2].as_number(), Some(3.0));
    // Depth 1 leaves the second level as an array.
    assert!(values[3].is_object());
}

#[test]
fn array_from_array_like_matches_to_length() {
    let mut context = Context::default();
    let array_like = crate::object::JsObject::from_proto_and_data(
        context.intrinsics().constructors().object().prototype(),
        crate::object::ObjectData::ordinary(),
    );
    array_like.set("length", 2, true, &mut context).unwrap();
    array_like.set(0, "a", true, &mut context).unwrap();
    array_like.set(1, "b", true, &mut context).unwrap();

    let result = Array::from(&JsValue::undefined(), &[array_like.into()], &mut context).unwrap();
    let obj = result.as_object().unwrap();
    assert_eq!(obj.length_of_array_like(&mut context).unwrap(), 2);
    assert_eq!(obj.get(1, &mut context).unwrap().as_string().unwrap(), "b");
}

#[test]
fn array_length_shrink_deletes_indices() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3, 4], &mut context);

    array.set("length", 2, true, &mut context).unwrap();
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 2);
    assert!(!array.has_own_property(2, &mut context).unwrap());
    assert!(!array.has_own_property(3, &mut context).unwrap());
}

#[test]
fn array_length_shrink_stops_at_non_configurable() {
    let mut context = Context::default();
    let array = array_of(&[1, 2, 3, 4], &mut context);

    // Freeze index 2 in place.
    array
        .define_property_or_throw(
            2,
            crate::property::PropertyDescriptor::builder().configurable(false),
            &mut context,
        )
        .unwrap();

    // Shrinking to 0 stops just above the frozen index and reports failure.
    let ok = array
        .__define_own_property__(
            &"length".into(),
            crate::property::PropertyDescriptor::builder().value(0).build(),
            &mut context,
        )
        .unwrap();
    assert!(!ok);
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 3);
    assert!(array.has_own_property(2, &mut context).unwrap());
    assert!(!array.has_own_property(3, &mut context).unwrap());
}

#[test]
fn to_sorted_and_with_copy() {
    let mut context = Context::default();
    let array = array_of(&[3, 1, 2], &mut context);

    let with = Array::with(
        &array.clone().into(),
        &[JsValue::new(1), JsValue::new(9)],
        &mut context,
    )
    .unwrap();
    let with_values: Vec<f64> = values_of(&with, &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(with_values, vec![3.0, 9.0, 2.0]);

    // The original is untouched.
    assert_eq!(
        array.get(1, &mut context).unwrap().as_number(),
        Some(1.0)
    );

    let reversed = Array::to_reversed(&array.into(), &[], &mut context).unwrap();
    let reversed_values: Vec<f64> = values_of(&reversed, &mut context)
        .iter()
        .map(|v| v.as_number().unwrap())
        .collect();
    assert_eq!(reversed_values, vec![2.0, 1.0, 3.0]);
}

#[test]
fn iterator_yields_entries() {
    let mut context = Context::default();
    let array = array_of(&[7, 8], &mut context);

    let iterator = Array::values(&array.into(), &[], &mut context).unwrap();
    let iterator_obj = iterator.as_object().unwrap();

    let first = iterator_obj.invoke("next", &[], &mut context).unwrap();
    let first_obj = first.as_object().unwrap();
    assert_eq!(
        first_obj.get("value", &mut context).unwrap().as_number(),
        Some(7.0)
    );
    assert_eq!(
        first_obj.get("done", &mut context).unwrap().as_boolean(),
        Some(false)
    );

    iterator_obj.invoke("next", &[], &mut context).unwrap();
    let third = iterator_obj.invoke("next", &[], &mut context).unwrap();
    assert_eq!(
        third
            .as_object()
            .unwrap()
            .get("done", &mut context)
            .unwrap()
            .as_boolean(),
        Some(true)
    );
}
