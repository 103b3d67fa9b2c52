use super::{utils::MAX_TIMESTAMP, Date};
use crate::{js_string, object::JsObject, Context, JsValue};

fn construct(args: &[JsValue], context: &mut Context) -> JsObject {
    let new_target: JsValue = context
        .intrinsics()
        .constructors()
        .date()
        .constructor()
        .into();
    Date::constructor(&new_target, args, context)
        .unwrap()
        .as_object()
        .cloned()
        .expect("the Date constructor always returns an object")
}

#[test]
fn time_value_roundtrip() {
    let mut context = Context::default();
    let date = construct(&[JsValue::new(8_640_000)], &mut context);
    let time = date.invoke("getTime", &[], &mut context).unwrap();
    assert_eq!(time.as_number(), Some(8_640_000.0));
}

#[test]
fn time_clip_bounds() {
    let mut context = Context::default();

    let max = MAX_TIMESTAMP as f64;
    let date = construct(&[JsValue::new(max)], &mut context);
    assert_eq!(
        date.invoke("getTime", &[], &mut context).unwrap().as_number(),
        Some(max)
    );

    let date = construct(&[JsValue::new(-max)], &mut context);
    assert_eq!(
        date.invoke("getTime", &[], &mut context).unwrap().as_number(),
        Some(-max)
    );

    // One millisecond out of range in either direction is NaN.
    let date = construct(&[JsValue::new(max + 1.0)], &mut context);
    assert!(date
        .invoke("getTime", &[], &mut context)
        .unwrap()
        .as_number()
        .unwrap()
        .is_nan());
}

#[test]
fn utc_and_iso_formats() {
    let mut context = Context::default();
    let utc = Date::utc(
        &JsValue::undefined(),
        &[
            JsValue::new(1970),
            JsValue::new(0),
            JsValue::new(1),
            JsValue::new(0),
            JsValue::new(0),
            JsValue::new(0),
            JsValue::new(0),
        ],
        &mut context,
    )
    .unwrap();
    assert_eq!(utc.as_number(), Some(0.0));

    let date = construct(&[utc], &mut context);
    let iso = date.invoke("toISOString", &[], &mut context).unwrap();
    assert_eq!(iso.as_string().unwrap(), "1970-01-01T00:00:00.000Z");

    let utc_string = date.invoke("toUTCString", &[], &mut context).unwrap();
    assert_eq!(
        utc_string.as_string().unwrap(),
        "Thu, 01 Jan 1970 00:00:00 GMT"
    );
}

#[test]
fn constructor_components_use_make_day() {
    let mut context = Context::default();
    // Month 12 of 1999 normalizes into January 2000.
    let date = construct(
        &[JsValue::new(1999), JsValue::new(12), JsValue::new(1)],
        &mut context,
    );
    assert_eq!(
        date.invoke("getFullYear", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(2000.0)
    );
    assert_eq!(
        date.invoke("getMonth", &[], &mut context).unwrap().as_number(),
        Some(0.0)
    );
}

#[test]
fn two_digit_years_map_to_1900() {
    let mut context = Context::default();
    let date = construct(&[JsValue::new(76), JsValue::new(3)], &mut context);
    assert_eq!(
        date.invoke("getFullYear", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(1976.0)
    );
}

#[test]
fn parse_iso_strings() {
    let mut context = Context::default();

    let parsed = Date::parse(
        &JsValue::undefined(),
        &[js_string!("1970-01-01T00:00:00.000Z").into()],
        &mut context,
    )
    .unwrap();
    assert_eq!(parsed.as_number(), Some(0.0));

    let parsed = Date::parse(
        &JsValue::undefined(),
        &[js_string!("2024-02-29").into()],
        &mut context,
    )
    .unwrap();
    // A date-only form is UTC.
    let date = construct(&[parsed], &mut context);
    assert_eq!(
        date.invoke("getUTCDate", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(29.0)
    );

    let parsed = Date::parse(
        &JsValue::undefined(),
        &[js_string!("2024-01-01T01:00:00+01:00").into()],
        &mut context,
    )
    .unwrap();
    // Offset forms translate into UTC.
    let date = construct(&[parsed], &mut context);
    assert_eq!(
        date.invoke("getUTCHours", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(0.0)
    );

    // Garbage parses to NaN.
    let parsed = Date::parse(
        &JsValue::undefined(),
        &[js_string!("yesterday-ish").into()],
        &mut context,
    )
    .unwrap();
    assert!(parsed.as_number().unwrap().is_nan());
}

#[test]
fn setters_update_components() {
    let mut context = Context::default();
    let date = construct(&[JsValue::new(0)], &mut context);

    date.invoke("setUTCFullYear", &[JsValue::new(2000)], &mut context)
        .unwrap();
    assert_eq!(
        date.invoke("getUTCFullYear", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(2000.0)
    );

    date.invoke("setUTCMonth", &[JsValue::new(5)], &mut context)
        .unwrap();
    date.invoke("setUTCHours", &[JsValue::new(12)], &mut context)
        .unwrap();
    assert_eq!(
        date.invoke("getUTCMonth", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(5.0)
    );
    assert_eq!(
        date.invoke("getUTCHours", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(12.0)
    );
}

#[test]
fn invalid_dates_format_and_throw() {
    let mut context = Context::default();
    let date = construct(&[JsValue::nan()], &mut context);

    let string = date.invoke("toString", &[], &mut context).unwrap();
    assert_eq!(string.as_string().unwrap(), "Invalid Date");

    // toISOString throws a RangeError on invalid dates.
    assert!(date.invoke("toISOString", &[], &mut context).is_err());
}

#[test]
fn to_json_returns_null_for_invalid() {
    let mut context = Context::default();
    let date = construct(&[JsValue::nan()], &mut context);
    let json = date.invoke("toJSON", &[], &mut context).unwrap();
    assert!(json.is_null());
}

#[test]
fn timezone_offset_is_zero_in_utc() {
    let mut context = Context::default();
    let date = construct(&[JsValue::new(0)], &mut context);
    assert_eq!(
        date.invoke("getTimezoneOffset", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(0.0)
    );
}

#[test]
fn fixed_offset_time_zone_shifts_local_fields() {
    use crate::context::FixedOffsetTimeZone;
    use std::rc::Rc;

    let mut context = Context::default();
    context.set_time_zone(Rc::new(FixedOffsetTimeZone::from_minutes(60, "CET")));

    let date = construct(&[JsValue::new(0)], &mut context);
    assert_eq!(
        date.invoke("getUTCHours", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(0.0)
    );
    assert_eq!(
        date.invoke("getHours", &[], &mut context).unwrap().as_number(),
        Some(1.0)
    );
    assert_eq!(
        date.invoke("getTimezoneOffset", &[], &mut context)
            .unwrap()
            .as_number(),
        Some(-60.0)
    );
}
