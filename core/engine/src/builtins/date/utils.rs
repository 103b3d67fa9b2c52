//! The ECMAScript date/time calendar algebra.
//!
//! Every computation operates on integer milliseconds since the Unix epoch
//! (UTC). The functions mirror the abstract operations of the
//! specification; out-of-range intermediate values surface as `None` and
//! become `NaN` time values at the call sites.

use crate::context::TimeZone;

/// The absolute maximum value of a time value: 8.64 × 10^15.
pub(super) const MAX_TIMESTAMP: i64 = 864 * 10i64.pow(13);
/// The number of milliseconds in a second.
pub(super) const MILLIS_PER_SECOND: i64 = 1000;
/// The number of milliseconds in a minute.
pub(super) const MILLIS_PER_MINUTE: i64 = MILLIS_PER_SECOND * 60;
/// The number of milliseconds in an hour.
pub(super) const MILLIS_PER_HOUR: i64 = MILLIS_PER_MINUTE * 60;
/// The number of milliseconds in a day.
pub(super) const MILLIS_PER_DAY: i64 = MILLIS_PER_HOUR * 24;

// The year range that a valid time value can reach, with slack for
// intermediate computations.
pub(super) const MIN_YEAR: i64 = -300_000;
pub(super) const MAX_YEAR: i64 = -MIN_YEAR;
pub(super) const MIN_MONTH: i64 = MIN_YEAR * 12;
pub(super) const MAX_MONTH: i64 = MAX_YEAR * 12;

/// `Day ( t )`: the day number of a time value.
pub(super) const fn day(t: i64) -> i64 {
    t.div_euclid(MILLIS_PER_DAY)
}

/// `TimeWithinDay ( t )`: the milliseconds into the day, always
/// non-negative.
pub(super) const fn time_within_day(t: i64) -> i64 {
    t.rem_euclid(MILLIS_PER_DAY)
}

/// `DaysInYear ( y )`.
pub(super) const fn days_in_year(year: i64) -> i64 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

const fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// `DayFromYear ( y )`: the day number of the first day of year `y`.
pub(super) const fn day_from_year(year: i64) -> i64 {
    // Shift the year so every division is on a positive value, which avoids
    // negative truncation differences.
    const YEAR_DELTA: i64 = 399_999;
    const fn day(year: i64) -> i64 {
        let year = year + YEAR_DELTA;
        365 * year + year / 4 - year / 100 + year / 400
    }
    day(year) - day(1970)
}

/// `TimeFromYear ( y )`: the time value of the first instant of year `y`.
pub(super) const fn time_from_year(year: i64) -> i64 {
    day_from_year(year) * MILLIS_PER_DAY
}

/// `YearFromTime ( t )`.
///
/// Starts from a division estimate and walks at most a couple of steps
/// until `TimeFromYear(year) ≤ t < TimeFromYear(year + 1)`.
pub(super) fn year_from_time(t: i64) -> i64 {
    let mut year = 1970 + (t as f64 / (MILLIS_PER_DAY as f64 * 365.2425)).floor() as i64;
    while time_from_year(year) > t {
        year -= 1;
    }
    while time_from_year(year + 1) <= t {
        year += 1;
    }
    year
}

/// `DayWithinYear ( t )`.
pub(super) fn day_within_year(t: i64) -> i64 {
    day(t) - day_from_year(year_from_time(t))
}

/// The cumulative day number at the start of each month.
const MONTH_STARTS: [i64; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const MONTH_STARTS_LEAP: [i64; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

fn month_starts(year: i64) -> &'static [i64; 12] {
    if is_leap_year(year) {
        &MONTH_STARTS_LEAP
    } else {
        &MONTH_STARTS
    }
}

/// `MonthFromTime ( t )`: 0 (January) to 11 (December).
pub(super) fn month_from_time(t: i64) -> i64 {
    let year = year_from_time(t);
    let day_in_year = day_within_year(t);
    let starts = month_starts(year);
    (0..12)
        .rev()
        .find(|&m| day_in_year >= starts[m as usize])
        .unwrap_or(0)
}

/// `DateFromTime ( t )`: 1 to 31.
pub(super) fn date_from_time(t: i64) -> i64 {
    let year = year_from_time(t);
    let day_in_year = day_within_year(t);
    let month = month_from_time(t);
    day_in_year - month_starts(year)[month as usize] + 1
}

/// `WeekDay ( t )`: 0 (Sunday) to 6 (Saturday).
pub(super) fn week_day(t: i64) -> i64 {
    (day(t) + 4).rem_euclid(7)
}

/// `HourFromTime ( t )`.
pub(super) const fn hour_from_time(t: i64) -> i64 {
    t.div_euclid(MILLIS_PER_HOUR).rem_euclid(24)
}

/// `MinFromTime ( t )`.
pub(super) const fn min_from_time(t: i64) -> i64 {
    t.div_euclid(MILLIS_PER_MINUTE).rem_euclid(60)
}

/// `SecFromTime ( t )`.
pub(super) const fn sec_from_time(t: i64) -> i64 {
    t.div_euclid(MILLIS_PER_SECOND).rem_euclid(60)
}

/// `msFromTime ( t )`.
pub(super) const fn ms_from_time(t: i64) -> i64 {
    t.rem_euclid(MILLIS_PER_SECOND)
}

/// Abstract operation `MakeTime ( hour, min, sec, ms )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-maketime
pub(super) fn make_time(hour: i64, min: i64, sec: i64, ms: i64) -> Option<i64> {
    // 6. Let t be ((h * msPerHour + m * msPerMinute) + s * msPerSecond) + milli.
    let h_ms = hour.checked_mul(MILLIS_PER_HOUR)?;
    let m_ms = min.checked_mul(MILLIS_PER_MINUTE)?;
    let s_ms = sec.checked_mul(MILLIS_PER_SECOND)?;
    h_ms.checked_add(m_ms)?.checked_add(s_ms)?.checked_add(ms)
}

/// Abstract operation `MakeDay ( year, month, date )`.
///
/// Out-of-range months are normalized into years before the day number is
/// computed.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-makeday
pub(super) fn make_day(mut year: i64, mut month: i64, date: i64) -> Option<i64> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(MIN_MONTH..=MAX_MONTH).contains(&month) {
        return None;
    }

    // 5. Let ym be y + 𝔽(floor(ℝ(m) / 12)).
    year += month.div_euclid(12);
    // 7. Let mn be 𝔽(ℝ(m) modulo 12).
    month = month.rem_euclid(12);

    // 8. Find a time value t such that YearFromTime(t) is ym,
    //    MonthFromTime(t) is mn, and DateFromTime(t) is 1𝔽.
    let month = usize::try_from(month).expect("month is between 0 and 11 at this point");
    let day = day_from_year(year) + month_starts(year)[month];

    // 9. Return Day(t) + dt - 1𝔽.
    (day - 1).checked_add(date)
}

/// Abstract operation `MakeDate ( day, time )`.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-makedate
pub(super) fn make_date(day: i64, time: i64) -> Option<i64> {
    // 2. Let tv be day × msPerDay + time.
    day.checked_mul(MILLIS_PER_DAY)?.checked_add(time)
}

/// Abstract operation `TimeClip ( time )`.
///
/// Returns the timestamp if it is within ±8.64e15, `None` otherwise.
///
/// More information:
///  - [ECMAScript reference][spec]
///
/// [spec]: https://tc39.es/ecma262/#sec-timeclip
pub(super) fn time_clip(time: i64) -> Option<i64> {
    // 2. If abs(ℝ(time)) > 8.64 × 10^15, return NaN.
    (time.checked_abs()? <= MAX_TIMESTAMP).then_some(time)
}

/// `TimeClip` over a float time value, as used by the constructor.
pub(super) fn time_clip_f64(time: f64) -> f64 {
    if !time.is_finite() || time.abs() > MAX_TIMESTAMP as f64 {
        return f64::NAN;
    }
    time.trunc()
}

/// `LocalTime ( t )`: converts from UTC to local time.
pub(super) fn local_time(t: i64, time_zone: &dyn TimeZone) -> i64 {
    t + time_zone.utc_offset_ms(t)
}

/// `UTC ( t )`: converts from local time to UTC.
///
/// The two-step fix point is intentional: around a daylight saving
/// transition the one-step estimate can land on the discontinuity.
pub(super) fn utc_time(local: i64, time_zone: &dyn TimeZone) -> i64 {
    let estimate = local - time_zone.utc_offset_ms(local);
    local - time_zone.utc_offset_ms(estimate)
}

/// The parameters of one `Date` component update.
#[derive(Default, Debug, Clone, Copy)]
pub(super) struct DateParameters {
    pub(super) year: Option<crate::value::IntegerOrNan>,
    pub(super) month: Option<crate::value::IntegerOrNan>,
    pub(super) date: Option<crate::value::IntegerOrNan>,
    pub(super) hour: Option<crate::value::IntegerOrNan>,
    pub(super) minute: Option<crate::value::IntegerOrNan>,
    pub(super) second: Option<crate::value::IntegerOrNan>,
    pub(super) millisecond: Option<crate::value::IntegerOrNan>,
}

/// Replaces some (or all) components of `t` (a UTC time value) with the
/// specified parameters, interpreting and producing local time when `local`
/// is set.
pub(super) fn replace_params(
    t: i64,
    params: DateParameters,
    local: bool,
    time_zone: &dyn TimeZone,
) -> Option<i64> {
    let DateParameters {
        year,
        month,
        date,
        hour,
        minute,
        second,
        millisecond,
    } = params;

    let t = if local { local_time(t, time_zone) } else { t };

    let year = match year {
        Some(i) => i.as_integer()?,
        None => year_from_time(t),
    };
    let month = match month {
        Some(i) => i.as_integer()?,
        None => month_from_time(t),
    };
    let date = match date {
        Some(i) => i.as_integer()?,
        None => date_from_time(t),
    };
    let hour = match hour {
        Some(i) => i.as_integer()?,
        None => hour_from_time(t),
    };
    let minute = match minute {
        Some(i) => i.as_integer()?,
        None => min_from_time(t),
    };
    let second = match second {
        Some(i) => i.as_integer()?,
        None => sec_from_time(t),
    };
    let millisecond = match millisecond {
        Some(i) => i.as_integer()?,
        None => ms_from_time(t),
    };

    let new_day = make_day(year, month, date)?;
    let new_time = make_time(hour, minute, second, millisecond)?;
    let mut ts = make_date(new_day, new_time)?;

    if local {
        ts = utc_time(ts, time_zone);
    }

    time_clip(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_fields() {
        let t = 0;
        assert_eq!(year_from_time(t), 1970);
        assert_eq!(month_from_time(t), 0);
        assert_eq!(date_from_time(t), 1);
        assert_eq!(week_day(t), 4); // Thursday
        assert_eq!(hour_from_time(t), 0);
    }

    #[test]
    fn negative_times() {
        // 1969-12-31T23:59:59.999Z
        let t = -1;
        assert_eq!(year_from_time(t), 1969);
        assert_eq!(month_from_time(t), 11);
        assert_eq!(date_from_time(t), 31);
        assert_eq!(hour_from_time(t), 23);
        assert_eq!(min_from_time(t), 59);
        assert_eq!(sec_from_time(t), 59);
        assert_eq!(ms_from_time(t), 999);
    }

    #[test]
    fn make_day_normalizes_months() {
        // Month 12 of 1999 is January 2000.
        assert_eq!(make_day(1999, 12, 1), make_day(2000, 0, 1));
        // Month -1 of 2000 is December 1999.
        assert_eq!(make_day(2000, -1, 1), make_day(1999, 11, 1));
    }

    #[test]
    fn leap_years() {
        assert_eq!(days_in_year(2000), 366);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2024), 366);
        // 2000-02-29 exists.
        let day = make_day(2000, 1, 29).unwrap();
        let t = make_date(day, 0).unwrap();
        assert_eq!(month_from_time(t), 1);
        assert_eq!(date_from_time(t), 29);
    }

    #[test]
    fn time_clip_bounds() {
        assert_eq!(time_clip(MAX_TIMESTAMP), Some(MAX_TIMESTAMP));
        assert_eq!(time_clip(-MAX_TIMESTAMP), Some(-MAX_TIMESTAMP));
        assert_eq!(time_clip(MAX_TIMESTAMP + 1), None);
        assert_eq!(time_clip(-MAX_TIMESTAMP - 1), None);
    }
}
