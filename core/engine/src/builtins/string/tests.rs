use super::String;
use crate::{js_string, value::JsArgs, Context, JsValue};

fn s(value: &str) -> JsValue {
    js_string!(value).into()
}

#[test]
fn constructor_returns_primitive_without_new() {
    let mut context = Context::default();
    let result =
        String::constructor(&JsValue::undefined(), &[JsValue::new(12)], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "12");
}

#[test]
fn split_join_roundtrip() {
    let mut context = Context::default();
    let split = String::split(&s("a,b,c"), &[s(",")], &mut context).unwrap();
    let array = split.as_object().unwrap();
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 3);

    let joined = crate::builtins::Array::join(&split, &[s(",")], &mut context).unwrap();
    assert_eq!(joined.as_string().unwrap(), "a,b,c");
}

#[test]
fn split_with_limit_and_empty_separator() {
    let mut context = Context::default();

    let limited = String::split(&s("a,b,c"), &[s(","), JsValue::new(2)], &mut context).unwrap();
    assert_eq!(
        limited
            .as_object()
            .unwrap()
            .length_of_array_like(&mut context)
            .unwrap(),
        2
    );

    let chars = String::split(&s("abc"), &[s("")], &mut context).unwrap();
    let chars = chars.as_object().unwrap();
    assert_eq!(chars.length_of_array_like(&mut context).unwrap(), 3);
    assert_eq!(
        chars.get(0, &mut context).unwrap().as_string().unwrap(),
        "a"
    );

    let zero = String::split(&s("abc"), &[s("b"), JsValue::new(0)], &mut context).unwrap();
    assert_eq!(
        zero.as_object()
            .unwrap()
            .length_of_array_like(&mut context)
            .unwrap(),
        0
    );
}

#[test]
fn replace_all_with_string_pattern() {
    let mut context = Context::default();
    let result = String::replace_all(&s("abcabc"), &[s("b"), s("-")], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "a-ca-c");
}

#[test]
fn replace_all_requires_global_regexp() {
    let mut context = Context::default();
    let regexp = crate::builtins::RegExp::create(&s("b"), &JsValue::undefined(), &mut context)
        .unwrap();
    let err = String::replace_all(&s("abc"), &[regexp.into(), s("-")], &mut context);
    assert!(err.is_err());
}

#[test]
fn replace_supports_substitutions() {
    let mut context = Context::default();
    let result = String::replace(&s("abc"), &[s("b"), s("[$&]")], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "a[b]c");

    let result = String::replace(&s("abc"), &[s("b"), s("$`$'")], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "aacc");
}

#[test]
fn pad_and_repeat() {
    let mut context = Context::default();
    let padded = String::pad_start(&s("5"), &[JsValue::new(3), s("0")], &mut context).unwrap();
    assert_eq!(padded.as_string().unwrap(), "005");

    let padded = String::pad_end(&s("ab"), &[JsValue::new(5), s("12")], &mut context).unwrap();
    assert_eq!(padded.as_string().unwrap(), "ab121");

    let repeated = String::repeat(&s("ab"), &[JsValue::new(3)], &mut context).unwrap();
    assert_eq!(repeated.as_string().unwrap(), "ababab");

    assert!(String::repeat(&s("x"), &[JsValue::new(-1)], &mut context).is_err());
}

#[test]
fn index_of_and_includes() {
    let mut context = Context::default();
    assert_eq!(
        String::index_of(&s("abcabc"), &[s("bc"), JsValue::new(2)], &mut context)
            .unwrap()
            .as_number(),
        Some(4.0)
    );
    assert_eq!(
        String::last_index_of(&s("abcabc"), &[s("abc")], &mut context)
            .unwrap()
            .as_number(),
        Some(3.0)
    );
    assert_eq!(
        String::includes(&s("abc"), &[s("zb")], &mut context)
            .unwrap()
            .as_boolean(),
        Some(false)
    );
}

#[test]
fn starts_ends_with() {
    let mut context = Context::default();
    assert_eq!(
        String::starts_with(&s("hello"), &[s("he")], &mut context)
            .unwrap()
            .as_boolean(),
        Some(true)
    );
    assert_eq!(
        String::ends_with(&s("hello"), &[s("lo")], &mut context)
            .unwrap()
            .as_boolean(),
        Some(true)
    );
    assert_eq!(
        String::ends_with(&s("hello"), &[s("lo"), JsValue::new(4)], &mut context)
            .unwrap()
            .as_boolean(),
        Some(false)
    );
}

#[test]
fn slice_substring_at() {
    let mut context = Context::default();
    assert_eq!(
        String::slice(&s("hello"), &[JsValue::new(-3)], &mut context)
            .unwrap()
            .as_string()
            .unwrap(),
        "llo"
    );
    // substring swaps a backwards range.
    assert_eq!(
        String::substring(&s("hello"), &[JsValue::new(3), JsValue::new(1)], &mut context)
            .unwrap()
            .as_string()
            .unwrap(),
        "el"
    );
    assert_eq!(
        String::at(&s("hello"), &[JsValue::new(-1)], &mut context)
            .unwrap()
            .as_string()
            .unwrap(),
        "o"
    );
}

#[test]
fn char_and_code_point_access() {
    let mut context = Context::default();
    assert_eq!(
        String::char_code_at(&s("a𝄞"), &[JsValue::new(0)], &mut context)
            .unwrap()
            .as_number(),
        Some(97.0)
    );
    // The surrogate pair decodes as one code point.
    assert_eq!(
        String::code_point_at(&s("a𝄞"), &[JsValue::new(1)], &mut context)
            .unwrap()
            .as_number(),
        Some(119_070.0)
    );
    assert!(String::char_code_at(&s("a"), &[JsValue::new(5)], &mut context)
        .unwrap()
        .as_number()
        .unwrap()
        .is_nan());
}

#[test]
fn match_delegates_to_regexp() {
    let mut context = Context::default();
    let result = String::r#match(&s("a1b2"), &[s("\\d")], &mut context).unwrap();
    let array = result.as_object().unwrap();
    assert_eq!(
        array.get(0, &mut context).unwrap().as_string().unwrap(),
        "1"
    );
}

#[test]
fn from_char_code_and_code_point() {
    let mut context = Context::default();
    let result = String::from_char_code(
        &JsValue::undefined(),
        &[JsValue::new(104), JsValue::new(105)],
        &mut context,
    )
    .unwrap();
    assert_eq!(result.as_string().unwrap(), "hi");

    let result = String::from_code_point(
        &JsValue::undefined(),
        &[JsValue::new(119_070)],
        &mut context,
    )
    .unwrap();
    assert_eq!(result.as_string().unwrap(), "𝄞");

    assert!(String::from_code_point(
        &JsValue::undefined(),
        &[JsValue::new(1.5)],
        &mut context
    )
    .is_err());
}

#[cfg(feature = "annex-b")]
#[test]
fn html_wrappers_escape_quotes() {
    let mut context = Context::default();
    let result = String::anchor(&s("x"), &[s("a\"b")], &mut context).unwrap();
    assert_eq!(
        result.as_string().unwrap(),
        "<a name=\"a&quot;b\">x</a>"
    );

    let result = String::bold(&s("x"), &[], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "<b>x</b>");
}

#[cfg(feature = "annex-b")]
#[test]
fn substr_clamps() {
    let mut context = Context::default();
    let result = String::substr(&s("hello"), &[JsValue::new(-3), JsValue::new(2)], &mut context)
        .unwrap();
    assert_eq!(result.as_string().unwrap(), "ll");
}
