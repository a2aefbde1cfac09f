//! Candidate slot generation -- one day's windows into bookable start/end
//! pairs.
//!
//! Within each window a cursor starts at the window's opening minute and
//! emits fixed-length slots, advancing by session length plus buffer after
//! each one. Windows are processed in input order and independently; the
//! decoder has already guaranteed they do not overlap, so neither do the
//! emitted slots.

use chrono::{Duration, NaiveTime};

use crate::types::TimeWindow;

/// A single candidate slot's wall-clock times, before any date is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotTimes {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Generate the ordered candidate slots for one day's windows.
///
/// Per window: emit `[cursor, cursor + duration)` while the slot still fits
/// (`cursor + duration <= window end`), then advance the cursor by
/// `duration + buffer`. A window shorter than the session duration yields
/// nothing. Exact integer minute arithmetic throughout; a zero duration
/// yields no slots rather than looping.
pub fn generate_day_slots(
    windows: &[TimeWindow],
    session_duration_minutes: u32,
    buffer_minutes: u32,
) -> Vec<SlotTimes> {
    if session_duration_minutes == 0 {
        return Vec::new();
    }

    let mut slots = Vec::new();
    for window in windows {
        let start_minute = window.start_minute();
        let end_minute = window.end_minute();

        let mut cursor = start_minute;
        while cursor + session_duration_minutes <= end_minute {
            let offset = Duration::minutes(i64::from(cursor - start_minute));
            let slot_start = window.start + offset;
            slots.push(SlotTimes {
                start: slot_start,
                end: slot_start + Duration::minutes(i64::from(session_duration_minutes)),
            });
            cursor += session_duration_minutes + buffer_minutes;
        }
    }
    slots
}
