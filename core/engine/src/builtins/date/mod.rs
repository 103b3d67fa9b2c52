//! The global `Date` object.
//!
//! The internal time value is either `NaN` or an integral number of
//! milliseconds since the Unix epoch, clipped to ±8.64e15; all calendar
//! computations live in [`utils`].
//!
//! More information:
//!  - [ECMAScript reference][spec]
//!  - [MDN documentation][mdn]
//!
//! [spec]: https://tc39.es/ecma262/#sec-date-objects
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date

pub(crate) mod utils;

#[cfg(test)]
mod tests;

use crate::{
    builtins::BuiltIn,
    context::intrinsics::StandardConstructors,
    error::JsNativeError,
    gc::{empty_trace, Finalize, Trace},
    js_string,
    object::{
        internal_methods::get_prototype_from_constructor, ConstructorBuilder, JsObject, ObjectData,
    },
    symbol::WellKnownSymbols,
    value::{IntegerOrNan, JsArgs, PreferredType},
    Context, JsResult, JsValue,
};
use utils::{
    date_from_time, hour_from_time, local_time, make_date, make_day, make_time, min_from_time,
    month_from_time, ms_from_time, replace_params, sec_from_time, time_clip, time_clip_f64,
    utc_time, week_day, year_from_time, DateParameters, MILLIS_PER_MINUTE,
};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The internal representation of a `Date` object: its time value.
#[derive(Debug, Clone, Copy, Finalize)]
pub struct Date(f64);

unsafe impl Trace for Date {
    empty_trace!();
}

impl Date {
    /// Creates a new `Date` from a (already clipped) time value.
    pub(crate) fn new(time_value: f64) -> Self {
        Self(time_value)
    }

    /// The time value of this date.
    #[must_use]
    pub fn time_value(&self) -> f64 {
        self.0
    }

    /// The time value as integer milliseconds, if the date is valid.
    fn millis(&self) -> Option<i64> {
        self.0.is_finite().then_some(self.0 as i64)
    }
}

impl BuiltIn for Date {
    const NAME: &'static str = "Date";

    fn init(context: &mut Context) -> Option<JsValue> {
        let mut builder = ConstructorBuilder::with_standard_constructor(
            context,
            Self::constructor,
            context.intrinsics().constructors().date().clone(),
        )
        .name(Self::NAME)
        .length(7);

        builder
            .static_method(Self::now, "now", 0)
            .static_method(Self::parse, "parse", 1)
            .static_method(Self::utc, "UTC", 7)
            .method(Self::get_date::<true>, "getDate", 0)
            .method(Self::get_day, "getDay", 0)
            .method(Self::get_full_year::<true>, "getFullYear", 0)
            .method(Self::get_hours::<true>, "getHours", 0)
            .method(Self::get_milliseconds::<true>, "getMilliseconds", 0)
            .method(Self::get_minutes::<true>, "getMinutes", 0)
            .method(Self::get_month::<true>, "getMonth", 0)
            .method(Self::get_seconds::<true>, "getSeconds", 0)
            .method(Self::get_time, "getTime", 0)
            .method(Self::get_timezone_offset, "getTimezoneOffset", 0)
            .method(Self::get_date::<false>, "getUTCDate", 0)
            .method(Self::get_utc_day, "getUTCDay", 0)
            .method(Self::get_full_year::<false>, "getUTCFullYear", 0)
            .method(Self::get_hours::<false>, "getUTCHours", 0)
            .method(Self::get_milliseconds::<false>, "getUTCMilliseconds", 0)
            .method(Self::get_minutes::<false>, "getUTCMinutes", 0)
            .method(Self::get_month::<false>, "getUTCMonth", 0)
            .method(Self::get_seconds::<false>, "getUTCSeconds", 0)
            .method(Self::set_date::<true>, "setDate", 1)
            .method(Self::set_full_year::<true>, "setFullYear", 3)
            .method(Self::set_hours::<true>, "setHours", 4)
            .method(Self::set_milliseconds::<true>, "setMilliseconds", 1)
            .method(Self::set_minutes::<true>, "setMinutes", 3)
            .method(Self::set_month::<true>, "setMonth", 2)
            .method(Self::set_seconds::<true>, "setSeconds", 2)
            .method(Self::set_time, "setTime", 1)
            .method(Self::set_date::<false>, "setUTCDate", 1)
            .method(Self::set_full_year::<false>, "setUTCFullYear", 3)
            .method(Self::set_hours::<false>, "setUTCHours", 4)
            .method(Self::set_milliseconds::<false>, "setUTCMilliseconds", 1)
            .method(Self::set_minutes::<false>, "setUTCMinutes", 3)
            .method(Self::set_month::<false>, "setUTCMonth", 2)
            .method(Self::set_seconds::<false>, "setUTCSeconds", 2)
            .method(Self::to_date_string, "toDateString", 0)
            .method(Self::to_iso_string, "toISOString", 0)
            .method(Self::to_json, "toJSON", 1)
            .method(Self::to_string, "toLocaleDateString", 0)
            .method(Self::to_string, "toLocaleString", 0)
            .method(Self::to_string, "toLocaleTimeString", 0)
            .method(Self::to_string, "toString", 0)
            .method(Self::to_time_string, "toTimeString", 0)
            .method(Self::to_utc_string, "toUTCString", 0)
            .method(Self::to_utc_string, "toGMTString", 0)
            .method(Self::value_of, "valueOf", 0)
            .method(
                Self::to_primitive,
                WellKnownSymbols::to_primitive(),
                1,
            );

        #[cfg(feature = "annex-b")]
        {
            builder
                .method(Self::get_year, "getYear", 0)
                .method(Self::set_year, "setYear", 1);
        }

        Some(builder.build().into())
    }
}

impl Date {
    /// Converts an argument into an `IntegerOrNan` date component.
    fn to_integer_or_nan(value: &JsValue, context: &mut Context) -> JsResult<IntegerOrNan> {
        Ok(value.to_integer_or_infinity(context)?.into())
    }

    /// Gets the time value of a `this` that is a `Date` object.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-thistimevalue
    fn this_time_value(this: &JsValue) -> JsResult<Date> {
        this.as_object()
            .and_then(|obj| obj.borrow().as_date().copied())
            .ok_or_else(|| {
                JsNativeError::typ()
                    .with_message("'this' is not a Date")
                    .into()
            })
    }

    /// The current UTC time in milliseconds.
    fn host_now_millis() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    /// `Date ( ...values )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date
    pub(crate) fn constructor(
        new_target: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        // 1. If NewTarget is undefined, return the current time as a string.
        if new_target.is_undefined() {
            let now = Self::new(Self::host_now_millis() as f64);
            return Ok(now.format_string(context));
        }

        // 3. Resolve the time value from the argument count.
        let tv = match args.len() {
            // a. If numberOfArgs = 0, let dv be the current time.
            0 => Self::host_now_millis() as f64,
            // b. Else if numberOfArgs = 1, then
            1 => {
                let value = &args[0];
                // i. If value is an Object with a [[DateValue]] slot, use it.
                let date_data = value
                    .as_object()
                    .and_then(|obj| obj.borrow().as_date().copied());
                match date_data {
                    Some(date) => date.0,
                    None => {
                        // iii. Let v be ? ToPrimitive(value).
                        let primitive = value.to_primitive(context, PreferredType::Default)?;
                        match primitive.as_string() {
                            // iv. If v is a String, parse it.
                            Some(string) => Self::parse_date_string(string, context),
                            // v. Else, let dv be TimeClip(? ToNumber(v)).
                            None => time_clip_f64(primitive.to_number(context)?),
                        }
                    }
                }
            }
            // c. Else: assemble the components in local time.
            _ => {
                let mut components = [IntegerOrNan::Nan; 7];
                // Absent trailing components default to 1 (day) or 0.
                components[2] = IntegerOrNan::Integer(1);
                components[3] = IntegerOrNan::Integer(0);
                components[4] = IntegerOrNan::Integer(0);
                components[5] = IntegerOrNan::Integer(0);
                components[6] = IntegerOrNan::Integer(0);
                for (i, arg) in args.iter().enumerate().take(7) {
                    components[i] = Self::to_integer_or_nan(arg, context)?;
                }

                Self::make_local_time_value(components, context)
            }
        };

        // 5-7. Allocate the object.
        let prototype =
            get_prototype_from_constructor(new_target, StandardConstructors::date, context)?;
        Ok(JsObject::from_proto_and_data(prototype, ObjectData::date(Self(tv))).into())
    }

    /// Assembles a local time value from year..millisecond components,
    /// applying the two-digit-year rule and `MakeDay`/`MakeTime`/`MakeDate`.
    fn make_local_time_value(components: [IntegerOrNan; 7], context: &mut Context) -> f64 {
        let [year, month, date, hour, minute, second, millisecond] = components;

        let Some(mut year) = year.as_integer() else {
            return f64::NAN;
        };
        // Years 0 to 99 map into 1900 to 1999.
        if (0..=99).contains(&year) {
            year += 1900;
        }

        let time_value = (|| {
            let day = make_day(year, month.as_integer()?, date.as_integer()?)?;
            let time = make_time(
                hour.as_integer()?,
                minute.as_integer()?,
                second.as_integer()?,
                millisecond.as_integer()?,
            )?;
            let final_date = make_date(day, time)?;
            time_clip(utc_time(final_date, &*context.time_zone()))
        })();

        time_value.map_or(f64::NAN, |t| t as f64)
    }

    /// `Date.now ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.now
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date/now
    #[allow(clippy::unnecessary_wraps)]
    fn now(_: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok((Self::host_now_millis() as f64).into())
    }

    /// `Date.parse ( string )`
    ///
    /// Accepts the ISO 8601 date and date-time interchange formats; any
    /// other input parses to `NaN`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.parse
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date/parse
    fn parse(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let string = args.get_or_undefined(0).to_string(context)?;
        Ok(Self::parse_date_string(&string, context).into())
    }

    /// Parses an ISO 8601 date or date-time string into a time value.
    fn parse_date_string(string: &crate::JsString, context: &mut Context) -> f64 {
        let Ok(string) = string.to_std_string() else {
            return f64::NAN;
        };
        parse_iso_string(&string, context).map_or(f64::NAN, |t| t as f64)
    }

    /// `Date.UTC ( year [ , month [ , date [ , hours [ , minutes [ , seconds [ , ms ] ] ] ] ] ] )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///  - [MDN documentation][mdn]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.utc
    /// [mdn]: https://developer.mozilla.org/en-US/docs/Web/JavaScript/Reference/Global_Objects/Date/UTC
    fn utc(_: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let mut components = [IntegerOrNan::Nan; 7];
        components[1] = IntegerOrNan::Integer(0);
        components[2] = IntegerOrNan::Integer(1);
        components[3] = IntegerOrNan::Integer(0);
        components[4] = IntegerOrNan::Integer(0);
        components[5] = IntegerOrNan::Integer(0);
        components[6] = IntegerOrNan::Integer(0);
        for (i, arg) in args.iter().enumerate().take(7) {
            components[i] = Self::to_integer_or_nan(arg, context)?;
        }
        let [year, month, date, hour, minute, second, millisecond] = components;

        let Some(mut year) = year.as_integer() else {
            return Ok(JsValue::nan());
        };
        if (0..=99).contains(&year) {
            year += 1900;
        }

        let time_value = (|| {
            let day = make_day(year, month.as_integer()?, date.as_integer()?)?;
            let time = make_time(
                hour.as_integer()?,
                minute.as_integer()?,
                second.as_integer()?,
                millisecond.as_integer()?,
            )?;
            time_clip(make_date(day, time)?)
        })();

        Ok(time_value.map_or(JsValue::nan(), |t| (t as f64).into()))
    }

    // ==== Getters ====

    /// `Date.prototype.getDate ( )` and `getUTCDate ( )`.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.getdate
    fn get_date<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(date_from_time(t).into())
    }

    /// `Date.prototype.getDay ( )`
    fn get_day(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        Ok(week_day(local_time(t, &*context.time_zone())).into())
    }

    /// `Date.prototype.getUTCDay ( )`
    fn get_utc_day(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        Ok(week_day(t).into())
    }

    /// `Date.prototype.getFullYear ( )` and `getUTCFullYear ( )`.
    fn get_full_year<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(year_from_time(t).into())
    }

    /// `Date.prototype.getHours ( )` and `getUTCHours ( )`.
    fn get_hours<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(hour_from_time(t).into())
    }

    /// `Date.prototype.getMilliseconds ( )` and `getUTCMilliseconds ( )`.
    fn get_milliseconds<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(ms_from_time(t).into())
    }

    /// `Date.prototype.getMinutes ( )` and `getUTCMinutes ( )`.
    fn get_minutes<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(min_from_time(t).into())
    }

    /// `Date.prototype.getMonth ( )` and `getUTCMonth ( )`.
    fn get_month<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(month_from_time(t).into())
    }

    /// `Date.prototype.getSeconds ( )` and `getUTCSeconds ( )`.
    fn get_seconds<const LOCAL: bool>(
        this: &JsValue,
        _: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let Some(mut t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        if LOCAL {
            t = local_time(t, &*context.time_zone());
        }
        Ok(sec_from_time(t).into())
    }

    /// `Date.prototype.getTime ( )`
    fn get_time(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        Ok(Self::this_time_value(this)?.0.into())
    }

    /// `Date.prototype.getTimezoneOffset ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.gettimezoneoffset
    fn get_timezone_offset(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        // 3. Return (t - LocalTime(t)) / msPerMinute.
        let offset = context.time_zone().utc_offset_ms(t);
        Ok(((-offset) as f64 / MILLIS_PER_MINUTE as f64).into())
    }

    // ==== Setters ====

    /// Writes a new time value into the receiver and returns it.
    fn set_time_value(this: &JsValue, time_value: f64) -> JsResult<JsValue> {
        let obj = this
            .as_object()
            .ok_or_else(|| JsNativeError::typ().with_message("'this' is not a Date"))?;
        let mut borrowed = obj.borrow_mut();
        let Some(date) = borrowed.as_date_mut() else {
            return Err(JsNativeError::typ()
                .with_message("'this' is not a Date")
                .into());
        };
        date.0 = time_value;
        Ok(time_value.into())
    }

    /// Shared driver of the component setters.
    fn set_components<const LOCAL: bool>(
        this: &JsValue,
        params: DateParameters,
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let t = Self::this_time_value(this)?;
        let new_value = match t.millis() {
            Some(t) => replace_params(t, params, LOCAL, &*context.time_zone())
                .map_or(f64::NAN, |t| t as f64),
            None => f64::NAN,
        };
        Self::set_time_value(this, new_value)
    }

    /// `Date.prototype.setDate ( date )` and `setUTCDate ( date )`.
    fn set_date<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let date = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                date: Some(date),
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setFullYear ( year [ , month [ , date ] ] )` and the
    /// UTC variant.
    ///
    /// An invalid date starts from time value `+0` rather than staying
    /// invalid.
    fn set_full_year<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let t = Self::this_time_value(this)?;
        let year = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let month = match args.get(1) {
            Some(month) => Some(Self::to_integer_or_nan(month, context)?),
            None => None,
        };
        let date = match args.get(2) {
            Some(date) => Some(Self::to_integer_or_nan(date, context)?),
            None => None,
        };

        let base = t.millis().unwrap_or(0);
        let new_value = replace_params(
            base,
            DateParameters {
                year: Some(year),
                month,
                date,
                ..Default::default()
            },
            LOCAL,
            &*context.time_zone(),
        )
        .map_or(f64::NAN, |t| t as f64);
        Self::set_time_value(this, new_value)
    }

    /// `Date.prototype.setHours ( hour [ , min [ , sec [ , ms ] ] ] )` and
    /// the UTC variant.
    fn set_hours<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let hour = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let minute = match args.get(1) {
            Some(minute) => Some(Self::to_integer_or_nan(minute, context)?),
            None => None,
        };
        let second = match args.get(2) {
            Some(second) => Some(Self::to_integer_or_nan(second, context)?),
            None => None,
        };
        let millisecond = match args.get(3) {
            Some(millisecond) => Some(Self::to_integer_or_nan(millisecond, context)?),
            None => None,
        };
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                hour: Some(hour),
                minute,
                second,
                millisecond,
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setMilliseconds ( ms )` and the UTC variant.
    fn set_milliseconds<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let ms = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                millisecond: Some(ms),
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setMinutes ( min [ , sec [ , ms ] ] )` and the UTC
    /// variant.
    fn set_minutes<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let minute = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let second = match args.get(1) {
            Some(second) => Some(Self::to_integer_or_nan(second, context)?),
            None => None,
        };
        let millisecond = match args.get(2) {
            Some(millisecond) => Some(Self::to_integer_or_nan(millisecond, context)?),
            None => None,
        };
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                minute: Some(minute),
                second,
                millisecond,
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setMonth ( month [ , date ] )` and the UTC variant.
    fn set_month<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let month = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let date = match args.get(1) {
            Some(date) => Some(Self::to_integer_or_nan(date, context)?),
            None => None,
        };
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                month: Some(month),
                date,
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setSeconds ( sec [ , ms ] )` and the UTC variant.
    fn set_seconds<const LOCAL: bool>(
        this: &JsValue,
        args: &[JsValue],
        context: &mut Context,
    ) -> JsResult<JsValue> {
        let second = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let millisecond = match args.get(1) {
            Some(millisecond) => Some(Self::to_integer_or_nan(millisecond, context)?),
            None => None,
        };
        Self::set_components::<LOCAL>(
            this,
            DateParameters {
                second: Some(second),
                millisecond,
                ..Default::default()
            },
            context,
        )
    }

    /// `Date.prototype.setTime ( time )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.settime
    fn set_time(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. Validate the receiver early so conversion side effects match.
        Self::this_time_value(this)?;
        // 3-4. Let v be TimeClip(? ToNumber(time)).
        let t = time_clip_f64(args.get_or_undefined(0).to_number(context)?);
        // 5-6. Store and return.
        Self::set_time_value(this, t)
    }

    // ==== Formatting ====

    /// Formats the zone suffix `GMT±HHMM (Zone Name)`.
    fn format_zone(offset_ms: i64, zone_name: &str) -> std::string::String {
        let sign = if offset_ms < 0 { '-' } else { '+' };
        let offset_minutes = (offset_ms / MILLIS_PER_MINUTE).abs();
        format!(
            "GMT{sign}{:02}{:02} ({zone_name})",
            offset_minutes / 60,
            offset_minutes % 60
        )
    }

    /// The `Date.prototype.toString` representation of this date.
    fn format_string(&self, context: &mut Context) -> JsValue {
        let Some(t) = self.millis() else {
            return js_string!("Invalid Date").into();
        };
        let tz = context.time_zone();
        let offset = tz.utc_offset_ms(t);
        let local = local_time(t, &*tz);
        js_string!(format!(
            "{} {} {:02} {:04} {:02}:{:02}:{:02} {}",
            DAY_NAMES[week_day(local) as usize],
            MONTH_NAMES[month_from_time(local) as usize],
            date_from_time(local),
            year_from_time(local),
            hour_from_time(local),
            min_from_time(local),
            sec_from_time(local),
            Self::format_zone(offset, &tz.zone_name()),
        ))
        .into()
    }

    /// `Date.prototype.toString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.tostring
    fn to_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        Ok(Self::this_time_value(this)?.format_string(context))
    }

    /// `Date.prototype.toDateString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.todatestring
    fn to_date_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(js_string!("Invalid Date").into());
        };
        let local = local_time(t, &*context.time_zone());
        Ok(js_string!(format!(
            "{} {} {:02} {:04}",
            DAY_NAMES[week_day(local) as usize],
            MONTH_NAMES[month_from_time(local) as usize],
            date_from_time(local),
            year_from_time(local),
        ))
        .into())
    }

    /// `Date.prototype.toTimeString ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.totimestring
    fn to_time_string(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(js_string!("Invalid Date").into());
        };
        let tz = context.time_zone();
        let offset = tz.utc_offset_ms(t);
        let local = local_time(t, &*tz);
        Ok(js_string!(format!(
            "{:02}:{:02}:{:02} {}",
            hour_from_time(local),
            min_from_time(local),
            sec_from_time(local),
            Self::format_zone(offset, &tz.zone_name()),
        ))
        .into())
    }

    /// `Date.prototype.toISOString ( )`
    ///
    /// The output uses the `YYYY-MM-DDTHH:mm:ss.sssZ` interchange format,
    /// with the expanded `±YYYYYY` form outside of years 0 to 9999.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.toisostring
    fn to_iso_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Err(JsNativeError::range()
                .with_message("Invalid time value")
                .into());
        };

        let year = year_from_time(t);
        let year_repr = if (0..=9999).contains(&year) {
            format!("{year:04}")
        } else if year < 0 {
            format!("-{:06}", -year)
        } else {
            format!("+{year:06}")
        };

        Ok(js_string!(format!(
            "{year_repr}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            month_from_time(t) + 1,
            date_from_time(t),
            hour_from_time(t),
            min_from_time(t),
            sec_from_time(t),
            ms_from_time(t),
        ))
        .into())
    }

    /// `Date.prototype.toUTCString ( )`
    ///
    /// The output uses the `ddd, DD MMM YYYY HH:mm:ss GMT` format.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.toutcstring
    fn to_utc_string(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(js_string!("Invalid Date").into());
        };
        Ok(js_string!(format!(
            "{}, {:02} {} {:04} {:02}:{:02}:{:02} GMT",
            DAY_NAMES[week_day(t) as usize],
            date_from_time(t),
            MONTH_NAMES[month_from_time(t) as usize],
            year_from_time(t),
            hour_from_time(t),
            min_from_time(t),
            sec_from_time(t),
        ))
        .into())
    }

    /// `Date.prototype.toJSON ( key )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.tojson
    fn to_json(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1. Let O be ? ToObject(this value).
        let o = this.to_object(context)?;

        // 2. Let tv be ? ToPrimitive(O, number).
        let tv = this.to_primitive(context, PreferredType::Number)?;

        // 3. If Type(tv) is Number and tv is not finite, return null.
        if let Some(number) = tv.as_number() {
            if !number.is_finite() {
                return Ok(JsValue::null());
            }
        }

        // 4. Return ? Invoke(O, "toISOString").
        o.invoke("toISOString", &[], context)
    }

    /// `Date.prototype.valueOf ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.valueof
    fn value_of(this: &JsValue, _: &[JsValue], _: &mut Context) -> JsResult<JsValue> {
        // 1. Return ? thisTimeValue(this value).
        Ok(Self::this_time_value(this)?.0.into())
    }

    /// `Date.prototype [ @@toPrimitive ] ( hint )`
    ///
    /// Dates prefer the string representation for the "default" hint.
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype-@@toprimitive
    fn to_primitive(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        // 1-2. The this value must be an Object.
        let Some(o) = this.as_object() else {
            return Err(JsNativeError::typ()
                .with_message("Date.prototype[@@toPrimitive] requires an object receiver")
                .into());
        };

        // 3-5. Map the hint onto OrdinaryToPrimitive.
        let hint = args.get_or_undefined(0);
        let try_first = match hint.as_string() {
            Some(string) if string == "string" || string == "default" => PreferredType::String,
            Some(string) if string == "number" => PreferredType::Number,
            _ => {
                return Err(JsNativeError::typ()
                    .with_message("Date.prototype[@@toPrimitive] called with invalid hint")
                    .into())
            }
        };

        // 6. Return ? OrdinaryToPrimitive(O, tryFirst).
        o.ordinary_to_primitive(context, try_first)
    }
}

// ==== Annex B methods ====

#[cfg(feature = "annex-b")]
impl Date {
    /// `Date.prototype.getYear ( )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.getyear
    fn get_year(this: &JsValue, _: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let Some(t) = Self::this_time_value(this)?.millis() else {
            return Ok(JsValue::nan());
        };
        // 3. Return YearFromTime(LocalTime(t)) - 1900𝔽.
        Ok((year_from_time(local_time(t, &*context.time_zone())) - 1900).into())
    }

    /// `Date.prototype.setYear ( year )`
    ///
    /// More information:
    ///  - [ECMAScript reference][spec]
    ///
    /// [spec]: https://tc39.es/ecma262/#sec-date.prototype.setyear
    fn set_year(this: &JsValue, args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
        let t = Self::this_time_value(this)?;

        // 3. Let y be ? ToNumber(year).
        let year = Self::to_integer_or_nan(args.get_or_undefined(0), context)?;
        let Some(mut year) = year.as_integer() else {
            // 5. If y is NaN, set the [[DateValue]] to NaN.
            return Self::set_time_value(this, f64::NAN);
        };

        // 7. If 0 ≤ yi ≤ 99, let yyyy be 1900𝔽 + 𝔽(yi).
        if (0..=99).contains(&year) {
            year += 1900;
        }

        let base = t.millis().unwrap_or(0);
        let new_value = replace_params(
            base,
            DateParameters {
                year: Some(IntegerOrNan::Integer(year)),
                ..Default::default()
            },
            true,
            &*context.time_zone(),
        )
        .map_or(f64::NAN, |t| t as f64);
        Self::set_time_value(this, new_value)
    }
}

/// Parses the ISO 8601 date-time interchange format:
/// `YYYY[-MM[-DD]][THH:mm[:ss[.sss]][Z|±HH:MM]]`, with the expanded
/// `±YYYYYY` year form. Date-only forms are UTC; date-time forms without an
/// offset are local time.
fn parse_iso_string(s: &str, context: &mut Context) -> Option<i64> {
    let bytes = s.as_bytes();
    let mut pos = 0usize;

    // Year: YYYY, +YYYYYY, or -YYYYYY.
    let year: i64 = match bytes.first()? {
        b'+' | b'-' => {
            let sign = if bytes[0] == b'-' { -1 } else { 1 };
            let digits = s.get(1..7)?;
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            pos = 7;
            let year: i64 = digits.parse().ok()?;
            // -000000 is not a valid expanded year.
            if sign == -1 && year == 0 {
                return None;
            }
            sign * year
        }
        _ => {
            let digits = s.get(0..4)?;
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            pos = 4;
            digits.parse().ok()?
        }
    };

    // Optional month and day.
    let mut month = 1i64;
    let mut day = 1i64;
    if bytes.get(pos) == Some(&b'-') {
        month = parse_two_digits(s, pos + 1)?;
        pos += 3;
        if !(1..=12).contains(&month) {
            return None;
        }
        if bytes.get(pos) == Some(&b'-') {
            day = parse_two_digits(s, pos + 1)?;
            pos += 3;
            if !(1..=31).contains(&day) {
                return None;
            }
        }
    }

    // Optional time part.
    let mut hour = 0i64;
    let mut minute = 0i64;
    let mut second = 0i64;
    let mut millisecond = 0i64;
    let mut offset: Option<i64> = None;
    let mut has_time = false;

    if matches!(bytes.get(pos), Some(&b'T') | Some(&b't')) {
        has_time = true;
        hour = parse_two_digits(s, pos + 1)?;
        if bytes.get(pos + 3) != Some(&b':') {
            return None;
        }
        minute = parse_two_digits(s, pos + 4)?;
        pos += 6;
        if !(0..=24).contains(&hour) || !(0..=59).contains(&minute) {
            return None;
        }

        if bytes.get(pos) == Some(&b':') {
            second = parse_two_digits(s, pos + 1)?;
            pos += 3;
            if !(0..=59).contains(&second) {
                return None;
            }
            if bytes.get(pos) == Some(&b'.') {
                let digits = s.get(pos + 1..pos + 4)?;
                if !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                millisecond = digits.parse().ok()?;
                pos += 4;
            }
        }

        // Optional offset.
        match bytes.get(pos) {
            Some(&b'Z') | Some(&b'z') => {
                offset = Some(0);
                pos += 1;
            }
            Some(&b'+') | Some(&b'-') => {
                let sign = if bytes[pos] == b'-' { -1 } else { 1 };
                let off_hour = parse_two_digits(s, pos + 1)?;
                if bytes.get(pos + 3) != Some(&b':') {
                    return None;
                }
                let off_minute = parse_two_digits(s, pos + 4)?;
                pos += 6;
                if !(0..=23).contains(&off_hour) || !(0..=59).contains(&off_minute) {
                    return None;
                }
                offset = Some(sign * (off_hour * 60 + off_minute) * MILLIS_PER_MINUTE);
            }
            _ => {}
        }
    }

    // Trailing garbage is a parse failure.
    if pos != s.len() {
        return None;
    }

    let day_number = make_day(year, month - 1, day)?;
    let time = make_time(hour, minute, second, millisecond)?;
    let mut t = make_date(day_number, time)?;

    match offset {
        Some(offset) => t -= offset,
        None => {
            if has_time {
                // A date-time without offset is local time.
                t = utc_time(t, &*context.time_zone());
            }
        }
    }

    time_clip(t)
}

fn parse_two_digits(s: &str, at: usize) -> Option<i64> {
    let digits = s.get(at..at + 2)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
