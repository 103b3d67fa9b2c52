use super::RegExp;
use crate::{js_string, Context, JsValue};

fn make(pattern: &str, flags: &str, context: &mut Context) -> crate::object::JsObject {
    RegExp::create(
        &js_string!(pattern).into(),
        &js_string!(flags).into(),
        context,
    )
    .unwrap()
}

#[test]
fn empty_pattern_source() {
    let mut context = Context::default();
    let re = make("", "", &mut context);
    let source = re.get("source", &mut context).unwrap();
    assert_eq!(source.as_string().unwrap(), "(?:)");
}

#[test]
fn flags_are_sorted_canonically() {
    let mut context = Context::default();
    let re = make("x", "ys", &mut context);
    let flags = re.get("flags", &mut context).unwrap();
    assert_eq!(flags.as_string().unwrap(), "sy");

    let re = make("x", "yimg", &mut context);
    let flags = re.get("flags", &mut context).unwrap();
    assert_eq!(flags.as_string().unwrap(), "gimy");
}

#[test]
fn invalid_flags_are_syntax_errors() {
    let mut context = Context::default();
    assert!(RegExp::create(
        &js_string!("x").into(),
        &js_string!("gg").into(),
        &mut context
    )
    .is_err());
    assert!(RegExp::create(
        &js_string!("x").into(),
        &js_string!("q").into(),
        &mut context
    )
    .is_err());
}

#[test]
fn exec_returns_captures_and_index() {
    let mut context = Context::default();
    let re = make("(\\w)(\\d)", "", &mut context);
    let result = RegExp::exec(&re.into(), &[js_string!("--a1--").into()], &mut context).unwrap();

    let array = result.as_object().expect("a match must return an array");
    assert_eq!(
        array.get(0, &mut context).unwrap().as_string().unwrap(),
        "a1"
    );
    assert_eq!(
        array.get(1, &mut context).unwrap().as_string().unwrap(),
        "a"
    );
    assert_eq!(
        array.get(2, &mut context).unwrap().as_string().unwrap(),
        "1"
    );
    assert_eq!(
        array.get("index", &mut context).unwrap().as_number(),
        Some(2.0)
    );
    assert_eq!(
        array.get("input", &mut context).unwrap().as_string().unwrap(),
        "--a1--"
    );
}

#[test]
fn global_exec_threads_last_index() {
    let mut context = Context::default();
    let re = make("\\d", "g", &mut context);
    let input: JsValue = js_string!("a1b2").into();

    let first = RegExp::exec(&re.clone().into(), &[input.clone()], &mut context).unwrap();
    assert!(first.is_object());
    assert_eq!(
        re.get("lastIndex", &mut context).unwrap().as_number(),
        Some(2.0)
    );

    let second = RegExp::exec(&re.clone().into(), &[input.clone()], &mut context).unwrap();
    assert!(second.is_object());

    let third = RegExp::exec(&re.clone().into(), &[input], &mut context).unwrap();
    assert!(third.is_null());
    // Exhaustion resets lastIndex to 0.
    assert_eq!(
        re.get("lastIndex", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn sticky_requires_match_at_last_index() {
    let mut context = Context::default();
    let re = make("b", "y", &mut context);
    let input: JsValue = js_string!("abc").into();

    let miss = RegExp::exec(&re.clone().into(), &[input.clone()], &mut context).unwrap();
    assert!(miss.is_null());

    re.set("lastIndex", 1, true, &mut context).unwrap();
    let hit = RegExp::exec(&re.into(), &[input], &mut context).unwrap();
    assert!(hit.is_object());
}

#[test]
fn named_groups_are_exposed() {
    let mut context = Context::default();
    let re = make("(?<year>\\d{4})", "", &mut context);
    let result = RegExp::exec(&re.into(), &[js_string!("in 2024!").into()], &mut context)
        .unwrap();
    let groups = result
        .as_object()
        .unwrap()
        .get("groups", &mut context)
        .unwrap();
    let year = groups
        .as_object()
        .unwrap()
        .get("year", &mut context)
        .unwrap();
    assert_eq!(year.as_string().unwrap(), "2024");
}

#[test]
fn duplicate_group_names_are_rejected() {
    let mut context = Context::default();
    assert!(RegExp::create(
        &js_string!("(?<a>x)(?<a>y)").into(),
        &JsValue::undefined(),
        &mut context
    )
    .is_err());
}

#[test]
fn match_all_agrees_with_exec() {
    let mut context = Context::default();
    let input = js_string!("a1b2c3");

    // Drive matchAll through the string method.
    let iterator = crate::builtins::string::String::match_all(
        &input.clone().into(),
        &[make("\\d", "g", &mut context).into()],
        &mut context,
    )
    .unwrap();
    let iterator_obj = iterator.as_object().unwrap();

    let mut collected = Vec::new();
    loop {
        let step = iterator_obj.invoke("next", &[], &mut context).unwrap();
        let step_obj = step.as_object().unwrap();
        if step_obj.get("done", &mut context).unwrap().to_boolean() {
            break;
        }
        let value = step_obj.get("value", &mut context).unwrap();
        let matched = value
            .as_object()
            .unwrap()
            .get(0, &mut context)
            .unwrap()
            .to_string(&mut context)
            .unwrap();
        collected.push(matched.to_std_string_escaped());
    }
    assert_eq!(collected, vec!["1", "2", "3"]);

    // Successive exec calls with lastIndex threaded yield the same sequence
    // and leave lastIndex at 0 on exhaustion.
    let re = make("\\d", "g", &mut context);
    let mut by_exec = Vec::new();
    loop {
        let result =
            RegExp::exec(&re.clone().into(), &[input.clone().into()], &mut context).unwrap();
        let Some(obj) = result.as_object() else {
            break;
        };
        by_exec.push(
            obj.get(0, &mut context)
                .unwrap()
                .to_string(&mut context)
                .unwrap()
                .to_std_string_escaped(),
        );
    }
    assert_eq!(by_exec, collected);
    assert_eq!(
        re.get("lastIndex", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn split_protocol() {
    let mut context = Context::default();
    let re = make(",", "", &mut context);
    let result = crate::builtins::string::String::split(
        &js_string!("a,b,,c").into(),
        &[re.into()],
        &mut context,
    )
    .unwrap();
    let array = result.as_object().unwrap();
    assert_eq!(array.length_of_array_like(&mut context).unwrap(), 4);
    assert_eq!(
        array.get(2, &mut context).unwrap().as_string().unwrap(),
        ""
    );
}

#[test]
fn replace_with_regexp() {
    let mut context = Context::default();
    let re = make("(\\d)", "g", &mut context);
    let result = crate::builtins::string::String::replace(
        &js_string!("a1b2").into(),
        &[re.into(), js_string!("[$1]").into()],
        &mut context,
    )
    .unwrap();
    assert_eq!(result.as_string().unwrap(), "a[1]b[2]");
}

#[test]
fn compile_reinitializes_in_place() {
    let mut context = Context::default();
    let re = make("a", "g", &mut context);
    re.set("lastIndex", 3, true, &mut context).unwrap();

    let this: JsValue = re.clone().into();
    RegExp::compile(
        &this,
        &[js_string!("b").into(), js_string!("i").into()],
        &mut context,
    )
    .unwrap();

    assert_eq!(
        re.get("source", &mut context).unwrap().as_string().unwrap(),
        "b"
    );
    assert_eq!(
        re.get("flags", &mut context).unwrap().as_string().unwrap(),
        "i"
    );
    assert_eq!(
        re.get("lastIndex", &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn compile_throws_on_non_writable_last_index() {
    let mut context = Context::default();
    let re = make("a", "", &mut context);
    re.define_property_or_throw(
        "lastIndex",
        crate::property::PropertyDescriptor::builder().writable(false),
        &mut context,
    )
    .unwrap();

    let this: JsValue = re.into();
    let result = RegExp::compile(&this, &[js_string!("b").into()], &mut context);
    assert!(result.is_err());
}

#[test]
fn legacy_statics_update_on_exec() {
    let mut context = Context::default();
    let constructor: JsValue = context
        .intrinsics()
        .constructors()
        .regexp()
        .constructor()
        .into();

    let re = make("(\\w)(\\d)", "", &mut context);
    RegExp::exec(&re.into(), &[js_string!("xx a1 yy").into()], &mut context).unwrap();

    let statics = context.realm().regexp_statics.last_match.clone();
    assert_eq!(&statics, "a1");
    assert_eq!(&context.realm().regexp_statics.capture(1), "a");
    assert_eq!(&context.realm().regexp_statics.left_context, "xx ");
    assert_eq!(&context.realm().regexp_statics.right_context, " yy");

    // The getters require the RegExp constructor itself as receiver.
    let constructor_obj = constructor.as_object().unwrap().clone();
    let last_match = constructor_obj.get("lastMatch", &mut context).unwrap();
    assert_eq!(last_match.as_string().unwrap(), "a1");

    let dollar_one = constructor_obj.get("$1", &mut context).unwrap();
    assert_eq!(dollar_one.as_string().unwrap(), "a");
}

#[test]
fn to_string_rebuilds_literal() {
    let mut context = Context::default();
    let re = make("a+", "gi", &mut context);
    let result = re.invoke("toString", &[], &mut context).unwrap();
    assert_eq!(result.as_string().unwrap(), "/a+/gi");
}
