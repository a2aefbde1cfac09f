//! # slot-engine
//!
//! Deterministic availability-to-bookable-slot computation for provider
//! booking services.
//!
//! Turns a provider's recurring weekly availability, a fixed session length,
//! buffer time and weekly booking cap, together with the sessions already on
//! the calendar, into the concrete slots a client can book -- and answers
//! "is this exact slot still free?" right before a booking is committed.
//!
//! ## Modules
//!
//! - [`decoder`] -- stored availability blob -> validated weekly model
//! - [`slots`] -- one day's windows -> ordered candidate slots
//! - [`conflict`] -- drops candidates that collide with booked sessions or the past
//! - [`capacity`] -- weekly booking-cap enforcement
//! - [`engine`] -- the two queries the booking workflow consumes
//! - [`store`] -- collaborator seams for configuration and session reads
//! - [`error`] -- error types
//!
//! The engine never writes and holds no state between queries. Its point
//! query is an optimistic pre-check only: true at-most-once booking belongs
//! to the booking workflow's transactional write.

pub mod capacity;
pub mod conflict;
pub mod decoder;
pub mod engine;
pub mod error;
pub mod slots;
pub mod store;
pub mod types;

pub use decoder::decode_weekly_availability;
pub use engine::{CandidateSlot, EngineConfig, SlotEngine};
pub use error::{DecodeError, EngineError, Result};
pub use slots::generate_day_slots;
pub use store::{ProfileStore, SessionStore, StoreError};
pub use types::{
    BookedSession, ProviderSchedulingConfig, SessionStatus, TimeWindow, WeeklyAvailability,
};
