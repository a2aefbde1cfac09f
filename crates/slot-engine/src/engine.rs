//! Range and point queries over a provider's bookable time.
//!
//! Composes the decoder, slot generator, conflict filter and capacity guard
//! into the two operations the booking workflow consumes:
//!
//! - [`SlotEngine::compute_available_slots`] -- the range listing shown to a
//!   client choosing a time.
//! - [`SlotEngine::is_slot_still_available`] -- the optimistic re-check run
//!   immediately before a booking is committed.
//!
//! Each query is a pure function of the store contents at the instant it
//! runs; the engine holds no state between calls and never writes. The point
//! query narrows the race between listing and booking but cannot close it:
//! at-most-once booking is owned by the booking workflow's transactional,
//! uniqueness-constrained write.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::capacity::{has_capacity, local_day_start, week_start_of};
use crate::conflict;
use crate::decoder::decode_weekly_availability;
use crate::error::Result;
use crate::slots::generate_day_slots;
use crate::store::{ProfileStore, SessionStore};
use crate::types::{hhmm, minute_of_day};

/// Engine-wide clock policy: the single reference timezone every instant is
/// interpreted in, and the day a capacity week begins on. Both are explicit
/// inputs so results never depend on an ambient platform setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub reference_tz: Tz,
    pub week_starts_on: Weekday,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reference_tz: chrono_tz::UTC,
            week_starts_on: Weekday::Sun,
        }
    }
}

/// A concrete bookable slot offered to a client. Ephemeral engine output:
/// constructed fresh per query, never persisted, carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSlot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

/// The availability-to-bookable-slot engine.
///
/// Generic over its two store collaborators; see [`crate::store`]. Cheap to
/// construct, safe to share across concurrent queries.
pub struct SlotEngine<P, S> {
    profiles: P,
    sessions: S,
    config: EngineConfig,
}

impl<P: ProfileStore, S: SessionStore> SlotEngine<P, S> {
    pub fn new(profiles: P, sessions: S, config: EngineConfig) -> Self {
        Self {
            profiles,
            sessions,
            config,
        }
    }

    /// Compute every bookable slot for the provider on the civil dates
    /// `from..=to`, relative to the reference instant `now`.
    ///
    /// Missing configuration, missing availability, and undecodable
    /// availability all yield an empty list, not a fault -- the decode
    /// failure is logged once as a data-integrity warning. Only a store
    /// failure propagates as an error.
    pub async fn compute_available_slots(
        &self,
        provider_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<CandidateSlot>> {
        if from > to {
            return Ok(Vec::new());
        }

        let Some(scheduling) = self.profiles.scheduling_config(provider_id).await? else {
            debug!(provider_id, "no scheduling configuration for provider");
            return Ok(Vec::new());
        };
        if scheduling.session_duration_minutes == 0 {
            warn!(
                provider_id,
                "stored session duration is zero; no slots can be offered"
            );
            return Ok(Vec::new());
        }

        let availability = match decode_weekly_availability(scheduling.availability.as_deref()) {
            Ok(Some(availability)) => availability,
            Ok(None) => return Ok(Vec::new()),
            Err(err) => {
                warn!(provider_id, %err, "undecodable weekly availability; treating as none");
                return Ok(Vec::new());
            }
        };

        let tz = self.config.reference_tz;
        let range_start = local_day_start(from, tz);
        let range_end = match to.succ_opt() {
            Some(next) => local_day_start(next, tz),
            None => DateTime::<Utc>::MAX_UTC,
        };
        let sessions = self
            .sessions
            .find_active_sessions(provider_id, range_start, range_end)
            .await?;
        let occupied = conflict::occupied_by_day(&sessions, scheduling.buffer_minutes, tz);

        let mut result = Vec::new();
        for date in from.iter_days().take_while(|d| *d <= to) {
            let windows = availability.windows_for(date.weekday());
            let candidates = generate_day_slots(
                windows,
                scheduling.session_duration_minutes,
                scheduling.buffer_minutes,
            );
            for slot in conflict::filter_available(date, candidates, &occupied, tz, now) {
                result.push(CandidateSlot {
                    date,
                    start_time: slot.start,
                    end_time: slot.end,
                });
            }
        }

        debug!(provider_id, slots = result.len(), "range query complete");
        Ok(result)
    }

    /// The first bookable slot in `from..=to`, if any. Convenience over
    /// [`Self::compute_available_slots`] for "next opening" displays.
    pub async fn first_available_slot(
        &self,
        provider_id: &str,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Option<CandidateSlot>> {
        Ok(self
            .compute_available_slots(provider_id, from, to, now)
            .await?
            .into_iter()
            .next())
    }

    /// Re-check a single slot immediately before a booking is committed:
    /// still conflict-free (same half-open, buffer-padded semantics as the
    /// range listing), not in the past, and the provider's weekly cap not
    /// yet reached.
    ///
    /// A provider without scheduling configuration answers `false`. This is
    /// an optimistic pre-check, not an exclusivity guarantee.
    pub async fn is_slot_still_available(
        &self,
        provider_id: &str,
        candidate_start: DateTime<Utc>,
        duration_minutes: u32,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        if candidate_start <= now || duration_minutes == 0 {
            return Ok(false);
        }

        let Some(scheduling) = self.profiles.scheduling_config(provider_id).await? else {
            debug!(provider_id, "no scheduling configuration for provider");
            return Ok(false);
        };

        let tz = self.config.reference_tz;
        let local = candidate_start.with_timezone(&tz);
        let date = local.date_naive();

        // Occupied intervals are keyed to the day their session starts on,
        // so the candidate's own civil day is the only one to fetch.
        let day_start = local_day_start(date, tz);
        let day_end = match date.succ_opt() {
            Some(next) => local_day_start(next, tz),
            None => DateTime::<Utc>::MAX_UTC,
        };
        let sessions = self
            .sessions
            .find_active_sessions(provider_id, day_start, day_end)
            .await?;
        let occupied = conflict::occupied_by_day(&sessions, scheduling.buffer_minutes, tz);

        let start_minute = i64::from(minute_of_day(local.time()));
        let end_minute = start_minute + i64::from(duration_minutes);
        if let Some(day_occupied) = occupied.get(&date) {
            if conflict::is_occupied(day_occupied, start_minute, end_minute) {
                debug!(provider_id, %candidate_start, "slot no longer free");
                return Ok(false);
            }
        }

        let week_start = week_start_of(candidate_start, self.config.week_starts_on, tz);
        let booked = self
            .sessions
            .count_active_sessions_in_week(provider_id, week_start)
            .await?;
        Ok(has_capacity(booked, scheduling.max_sessions_per_week))
    }
}
