//! Collaborator seams -- the profile and session stores the engine reads
//! from.
//!
//! The engine owns no data and performs no writes. These two reads are the
//! only suspension points in a query; everything after them is synchronous,
//! CPU-only computation. Implementations live in the calling service (a
//! database, a cache, an in-memory fixture in tests).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{BookedSession, ProviderSchedulingConfig};

/// Failure of a backing store read. Propagated to the caller unretried;
/// retry policy belongs to the calling layer.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to provider scheduling configuration.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// The provider's scheduling configuration, or `None` for an unknown
    /// provider.
    async fn scheduling_config(
        &self,
        provider_id: &str,
    ) -> Result<Option<ProviderSchedulingConfig>, StoreError>;
}

/// Read access to booked sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Sessions for the provider in an active status whose start falls
    /// within `[from, to)`.
    async fn find_active_sessions(
        &self,
        provider_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BookedSession>, StoreError>;

    /// Count of the provider's active sessions whose start falls within
    /// `[week_start, week_start + 7 days)`.
    async fn count_active_sessions_in_week(
        &self,
        provider_id: &str,
        week_start: DateTime<Utc>,
    ) -> Result<u32, StoreError>;
}
