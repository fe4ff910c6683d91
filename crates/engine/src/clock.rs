//! Business-timezone helpers.
//!
//! Receipts are stored as UTC instants; the business operates (and reads its
//! reports) in a single fixed timezone. Every calendar-day computation in the
//! engine goes through this module so that "today" means the same thing in
//! receipt display, sales aggregation, and export.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// The timezone the business operates in.
pub const BUSINESS_TZ: Tz = chrono_tz::Asia::Manila;

/// The current calendar date in the business timezone.
#[must_use]
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&BUSINESS_TZ).date_naive()
}

/// The business-timezone calendar date a stored instant falls on.
#[must_use]
pub fn local_date(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&BUSINESS_TZ).date_naive()
}

/// UTC instant of local midnight at the start of `date`.
///
/// The business timezone has a fixed offset, so local midnight always exists;
/// the fallbacks only matter if the constant is ever pointed at a DST zone.
#[must_use]
pub fn day_start_utc(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match BUSINESS_TZ.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Utc.from_utc_datetime(&midnight),
    }
}

/// Half-open UTC window `[start, end)` covering one local calendar day.
#[must_use]
pub fn day_bounds_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    (day_start_utc(date), day_start_utc(date + chrono::Days::new(1)))
}

/// Receipt display date, e.g. `August 25, 2026`.
#[must_use]
pub fn format_long_date(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&BUSINESS_TZ)
        .format("%B %d, %Y")
        .to_string()
}

/// Receipt display time, e.g. `03:41 PM`.
#[must_use]
pub fn format_clock_time(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&BUSINESS_TZ)
        .format("%I:%M %p")
        .to_string()
}

/// Compact timestamp used in the export, e.g. `2026-08-25 15:41`.
#[must_use]
pub fn format_stamp(instant: DateTime<Utc>) -> String {
    instant
        .with_timezone(&BUSINESS_TZ)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
