//! Core data model shared across the engine.
//!
//! Everything here is plain data: reconstructed fresh from the backing
//! stores on every query and never mutated in place. Wall-clock times are
//! `chrono::NaiveTime` values restricted to whole minutes within a single
//! day; they carry no date and no timezone. The engine's single reference
//! timezone (see [`crate::engine::EngineConfig`]) is the only clock used to
//! turn them into instants.

use chrono::{DateTime, NaiveTime, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Serde adapter for wall-clock times stored as `"HH:MM"` strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Minutes since midnight. All slot arithmetic is exact integer minutes.
pub(crate) fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// A single contiguous span of time-of-day during which a provider is
/// available, independent of any specific date.
///
/// Invariant (enforced by the decoder, not the constructor): `start < end`,
/// both within `[00:00, 24:00)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end)
    }
}

/// A provider's recurring weekly availability: for each weekday, the ordered
/// windows during which sessions may be offered.
///
/// Days absent from the stored blob deserialize as empty, meaning no
/// availability that day. [`crate::decoder::decode_weekly_availability`] is
/// the only construction path that guarantees the window invariants
/// (chronological, non-overlapping, `start < end`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyAvailability {
    #[serde(default)]
    pub monday: Vec<TimeWindow>,
    #[serde(default)]
    pub tuesday: Vec<TimeWindow>,
    #[serde(default)]
    pub wednesday: Vec<TimeWindow>,
    #[serde(default)]
    pub thursday: Vec<TimeWindow>,
    #[serde(default)]
    pub friday: Vec<TimeWindow>,
    #[serde(default)]
    pub saturday: Vec<TimeWindow>,
    #[serde(default)]
    pub sunday: Vec<TimeWindow>,
}

impl WeeklyAvailability {
    /// The windows configured for the given weekday.
    pub fn windows_for(&self, weekday: Weekday) -> &[TimeWindow] {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    /// Days in calendar order with their stored names, for validation.
    pub(crate) fn iter_days(&self) -> impl Iterator<Item = (&'static str, &[TimeWindow])> {
        [
            ("monday", self.monday.as_slice()),
            ("tuesday", self.tuesday.as_slice()),
            ("wednesday", self.wednesday.as_slice()),
            ("thursday", self.thursday.as_slice()),
            ("friday", self.friday.as_slice()),
            ("saturday", self.saturday.as_slice()),
            ("sunday", self.sunday.as_slice()),
        ]
        .into_iter()
    }
}

/// Per-provider scheduling knobs, owned and written by the profile-management
/// collaborator. The engine fetches one value per query and treats it as an
/// immutable read for the whole query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSchedulingConfig {
    pub session_duration_minutes: u32,
    pub buffer_minutes: u32,
    /// Maximum active sessions accepted per calendar week. Absent means
    /// unbounded.
    pub max_sessions_per_week: Option<u32>,
    /// Raw weekly-availability blob exactly as stored; decoded per query by
    /// [`crate::decoder::decode_weekly_availability`]. May be missing or
    /// empty, meaning no availability configured.
    pub availability: Option<String>,
}

/// Lifecycle status of a booked session. Only active statuses block slots;
/// cancelled and finished sessions free their time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl SessionStatus {
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Scheduled | SessionStatus::InProgress)
    }
}

/// A session already committed by the booking workflow. The engine only
/// reads these; the booking workflow is the sole writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSession {
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: SessionStatus,
}
