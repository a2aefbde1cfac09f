//! Error types for slot-engine operations.

use chrono::NaiveTime;
use thiserror::Error;

use crate::store::StoreError;

/// A stored weekly-availability blob that failed to decode.
///
/// Structural failures come from serde; the remaining variants are semantic
/// validation failures and name the offending day so operators can find the
/// bad configuration.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The blob was not valid JSON of the expected shape.
    #[error("availability parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A window whose start is not strictly before its end.
    #[error("invalid window on {day}: {start}..{end} is empty or inverted")]
    InvalidWindow {
        day: &'static str,
        start: NaiveTime,
        end: NaiveTime,
    },

    /// Windows on one day are not in chronological order.
    #[error("windows on {day} are not in chronological order")]
    OutOfOrder { day: &'static str },

    /// Two windows on one day overlap. Overlapping windows would emit
    /// duplicate slots, so they are rejected outright.
    #[error("overlapping windows on {day}: one runs until {first_end}, the next starts {second_start}")]
    Overlapping {
        day: &'static str,
        first_end: NaiveTime,
        second_start: NaiveTime,
    },
}

/// Faults a query can propagate to the caller.
///
/// Missing or undecodable configuration is deliberately *not* here: that is
/// "provider has zero availability", surfaced as an empty result.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A backing store read failed. The engine does not retry; retry policy
    /// belongs to the calling layer.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience alias used throughout slot-engine.
pub type Result<T> = std::result::Result<T, EngineError>;
