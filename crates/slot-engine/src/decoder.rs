//! Weekly-availability decoding -- stored blob to validated model.
//!
//! The profile store keeps a provider's recurring availability as an opaque
//! JSON blob shaped like:
//!
//! ```json
//! {"monday": [{"start": "09:00", "end": "12:00"}], "friday": []}
//! ```
//!
//! Decoding runs in two phases: structural (serde) and semantic validation.
//! Validation is validate-then-construct: either the caller gets a
//! [`WeeklyAvailability`] whose windows are guaranteed chronological,
//! non-overlapping and non-empty, or a typed [`DecodeError`] naming the
//! offending day. There is no "maybe valid" in-between state, so the slot
//! generator never has to defend against overlapping windows.
//!
//! Missing or empty input is "no availability configured" (`Ok(None)`), not
//! a fault. The decoder itself never logs; the engine boundary decides how
//! to report failures.

use crate::error::DecodeError;
use crate::types::{TimeWindow, WeeklyAvailability};

/// Decode a stored weekly-availability blob.
///
/// Returns `Ok(None)` for missing, empty, or whitespace-only input. Returns
/// a typed [`DecodeError`] when the blob is structurally malformed or its
/// windows violate the invariants (`start < end`, chronological order,
/// no overlap within a day).
pub fn decode_weekly_availability(
    raw: Option<&str>,
) -> Result<Option<WeeklyAvailability>, DecodeError> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };

    let availability: WeeklyAvailability = serde_json::from_str(raw)?;
    validate(&availability)?;
    Ok(Some(availability))
}

fn validate(availability: &WeeklyAvailability) -> Result<(), DecodeError> {
    for (day, windows) in availability.iter_days() {
        validate_day(day, windows)?;
    }
    Ok(())
}

fn validate_day(day: &'static str, windows: &[TimeWindow]) -> Result<(), DecodeError> {
    for window in windows {
        if window.start >= window.end {
            return Err(DecodeError::InvalidWindow {
                day,
                start: window.start,
                end: window.end,
            });
        }
    }

    for pair in windows.windows(2) {
        if pair[1].start < pair[0].start {
            return Err(DecodeError::OutOfOrder { day });
        }
        // Touching boundaries (one window ends exactly when the next starts)
        // are allowed; only a true overlap is rejected.
        if pair[1].start < pair[0].end {
            return Err(DecodeError::Overlapping {
                day,
                first_end: pair[0].end,
                second_start: pair[1].start,
            });
        }
    }

    Ok(())
}
