//! Conflict filtering -- drops candidate slots that collide with booked
//! sessions or lie in the past.
//!
//! Overlap uses half-open interval semantics: a slot conflicts with an
//! occupied interval iff `slot.start < occupied.end && slot.end >
//! occupied.start`. Touching boundaries (a slot ending exactly when an
//! occupied interval begins, or starting exactly when one ends) are NOT
//! conflicts.
//!
//! Occupied intervals are derived once per query from the active sessions in
//! range, keyed by the civil date of each session's start in the engine's
//! reference timezone. Each interval is padded on the end by the provider's
//! buffer, so a session's trailing buffer also blocks adjacent slots. The
//! padding is one-directional: a session never blocks time before its own
//! start.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

use crate::slots::SlotTimes;
use crate::types::{minute_of_day, BookedSession};

/// A busy span on one calendar day, in minutes since that day's midnight.
/// The end already includes the provider's trailing buffer. A session that
/// runs past midnight keeps its full length here (`end_minute` may exceed
/// 1440); it stays keyed to the day it started on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OccupiedInterval {
    pub start_minute: i64,
    pub end_minute: i64,
}

/// Derive buffer-padded occupied intervals from booked sessions, keyed by
/// the civil date of each session's start in `tz`.
///
/// Only sessions in an active status contribute; cancelled and finished
/// sessions are ignored even if the store hands them over.
pub fn occupied_by_day(
    sessions: &[BookedSession],
    buffer_minutes: u32,
    tz: Tz,
) -> HashMap<NaiveDate, Vec<OccupiedInterval>> {
    let mut by_day: HashMap<NaiveDate, Vec<OccupiedInterval>> = HashMap::new();

    for session in sessions.iter().filter(|s| s.status.is_active()) {
        let local = session.scheduled_at.with_timezone(&tz);
        let start_minute = i64::from(local.hour() * 60 + local.minute());
        let end_minute =
            start_minute + i64::from(session.duration_minutes) + i64::from(buffer_minutes);

        by_day
            .entry(local.date_naive())
            .or_default()
            .push(OccupiedInterval {
                start_minute,
                end_minute,
            });
    }

    by_day
}

/// Half-open overlap test between a candidate span and the day's occupied
/// intervals.
pub fn is_occupied(occupied: &[OccupiedInterval], start_minute: i64, end_minute: i64) -> bool {
    occupied
        .iter()
        .any(|occ| start_minute < occ.end_minute && end_minute > occ.start_minute)
}

/// Filter one day's candidate slots against occupied intervals and the
/// reference "now".
///
/// A candidate survives iff it overlaps no occupied interval on `date`, its
/// absolute start instant is strictly after `now`, and that start instant
/// actually exists in `tz` (a start swallowed by a DST spring-forward gap is
/// not bookable and is skipped). Pure filtering; no side effects.
pub fn filter_available(
    date: NaiveDate,
    candidates: Vec<SlotTimes>,
    occupied: &HashMap<NaiveDate, Vec<OccupiedInterval>>,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<SlotTimes> {
    let day_occupied = occupied.get(&date).map(Vec::as_slice).unwrap_or(&[]);

    candidates
        .into_iter()
        .filter(|slot| {
            let start_minute = i64::from(minute_of_day(slot.start));
            let end_minute = i64::from(minute_of_day(slot.end));
            !is_occupied(day_occupied, start_minute, end_minute)
        })
        .filter(|slot| starts_in_future(date, slot.start, tz, now))
        .collect()
}

/// Whether the slot's absolute start instant lies strictly after `now`.
///
/// An ambiguous local time (DST fall-back) resolves to the earlier instant;
/// a nonexistent one (spring-forward gap) fails the check.
fn starts_in_future(date: NaiveDate, start: NaiveTime, tz: Tz, now: DateTime<Utc>) -> bool {
    match tz.from_local_datetime(&date.and_time(start)).earliest() {
        Some(instant) => instant.with_timezone(&Utc) > now,
        None => false,
    }
}
