//! Weekly booking-cap enforcement.
//!
//! Deliberately separate from conflict filtering: the cap is re-evaluated at
//! booking-confirmation time, because a provider's week can fill up between
//! when a slot list was shown and when a slot is chosen. The week anchor day
//! is an explicit configuration value, never a platform locale default.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// The start of the calendar week containing `instant`: midnight (in `tz`)
/// of the most recent `week_starts_on` day at or before the instant's civil
/// date. The week spans `[week_start, week_start + 7 days)`.
pub fn week_start_of(instant: DateTime<Utc>, week_starts_on: Weekday, tz: Tz) -> DateTime<Utc> {
    let local_date = instant.with_timezone(&tz).date_naive();
    let days_back = (7 + i64::from(local_date.weekday().num_days_from_monday())
        - i64::from(week_starts_on.num_days_from_monday()))
        % 7;
    local_day_start(local_date - Duration::days(days_back), tz)
}

/// Midnight of `date` in `tz`, as an instant.
///
/// In a handful of zones midnight itself can fall inside a DST gap; the
/// civil midnight read as UTC anchors the day then, keeping the function
/// total.
pub(crate) fn local_day_start(date: NaiveDate, tz: Tz) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(instant) => instant.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&midnight),
    }
}

/// Whether a provider can still accept a booking this week. `true` when the
/// cap is absent (unbounded) or the active-session count is strictly below
/// it.
pub fn has_capacity(active_in_week: u32, max_sessions_per_week: Option<u32>) -> bool {
    match max_sessions_per_week {
        Some(cap) => active_in_week < cap,
        None => true,
    }
}
