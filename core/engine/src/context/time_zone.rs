//! The pluggable time zone of the engine.

use chrono::{Offset, TimeZone as _};
use std::fmt::Debug;

/// A time zone supplies the offset from UTC at a given instant, plus a
/// display name for `Date.prototype.toString`.
///
/// The default implementation is plain UTC; embedders can plug in the host
/// zone database.
pub trait TimeZone: Debug {
    /// The offset to add to a UTC time value to obtain local time, in
    /// milliseconds, at the given UTC instant.
    fn utc_offset_ms(&self, utc_millis: i64) -> i64;

    /// The display name of the zone.
    fn zone_name(&self) -> String {
        "Coordinated Universal Time".into()
    }
}

/// The default time zone: UTC, offset 0 everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct UtcTimeZone;

impl TimeZone for UtcTimeZone {
    fn utc_offset_ms(&self, _utc_millis: i64) -> i64 {
        0
    }
}

/// A fixed-offset time zone.
#[derive(Debug, Clone)]
pub struct FixedOffsetTimeZone {
    offset_ms: i64,
    name: String,
}

impl FixedOffsetTimeZone {
    /// Creates a fixed-offset zone from an offset in minutes east of UTC.
    #[must_use]
    pub fn from_minutes(minutes: i32, name: &str) -> Self {
        Self {
            offset_ms: i64::from(minutes) * 60_000,
            name: name.into(),
        }
    }
}

impl TimeZone for FixedOffsetTimeZone {
    fn utc_offset_ms(&self, _utc_millis: i64) -> i64 {
        self.offset_ms
    }

    fn zone_name(&self) -> String {
        self.name.clone()
    }
}

/// The host operating system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeZone;

impl TimeZone for LocalTimeZone {
    fn utc_offset_ms(&self, utc_millis: i64) -> i64 {
        let Some(utc) = chrono::DateTime::from_timestamp_millis(utc_millis) else {
            return 0;
        };
        let offset = chrono::Local.from_utc_datetime(&utc.naive_utc()).offset().fix();
        i64::from(offset.local_minus_utc()) * 1000
    }

    fn zone_name(&self) -> String {
        // `chrono` does not expose the zone name portably.
        "Local Time".into()
    }
}
