//! Property-based tests for slot generation using proptest.
//!
//! These verify invariants that must hold for *any* window, session length
//! and buffer, not just the worked examples in `slot_tests.rs`.

use chrono::{NaiveTime, Timelike};
use proptest::prelude::*;
use slot_engine::slots::generate_day_slots;
use slot_engine::types::TimeWindow;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn time(minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap()
}

fn minute_of(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn arb_duration() -> impl Strategy<Value = u32> {
    15u32..=120
}

fn arb_buffer() -> impl Strategy<Value = u32> {
    0u32..=45
}

/// A well-formed window: start < end, both within the day.
fn arb_window() -> impl Strategy<Value = TimeWindow> {
    (0u32..1380).prop_flat_map(|start| {
        (Just(start), 1u32..=(1439 - start)).prop_map(|(start, len)| TimeWindow {
            start: time(start),
            end: time(start + len),
        })
    })
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Every slot stays inside its window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_stay_inside_the_window(
        window in arb_window(),
        duration in arb_duration(),
        buffer in arb_buffer(),
    ) {
        let slots = generate_day_slots(&[window], duration, buffer);
        for slot in &slots {
            prop_assert!(
                window.start <= slot.start && slot.end <= window.end,
                "slot {:?}..{:?} escapes window {:?}..{:?}",
                slot.start,
                slot.end,
                window.start,
                window.end
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Consecutive starts differ by exactly duration + buffer
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn spacing_is_exact(
        window in arb_window(),
        duration in arb_duration(),
        buffer in arb_buffer(),
    ) {
        let slots = generate_day_slots(&[window], duration, buffer);
        for pair in slots.windows(2) {
            prop_assert_eq!(
                minute_of(pair[1].start) - minute_of(pair[0].start),
                duration + buffer
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Property 3: Slot count matches the closed-form bound
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slot_count_is_exact(
        window in arb_window(),
        duration in arb_duration(),
        buffer in arb_buffer(),
    ) {
        let len = minute_of(window.end) - minute_of(window.start);
        let expected = if len < duration {
            0
        } else {
            (len - duration) / (duration + buffer) + 1
        };

        let slots = generate_day_slots(&[window], duration, buffer);
        prop_assert_eq!(slots.len() as u32, expected);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Every slot is exactly one session long
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_are_one_session_long(
        window in arb_window(),
        duration in arb_duration(),
        buffer in arb_buffer(),
    ) {
        let slots = generate_day_slots(&[window], duration, buffer);
        for slot in &slots {
            prop_assert_eq!(minute_of(slot.end) - minute_of(slot.start), duration);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Generation never panics, even on malformed windows
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn generation_never_panics(
        start in 0u32..=1439,
        end in 0u32..=1439,
        duration in 0u32..=200,
        buffer in arb_buffer(),
    ) {
        // Inverted and empty windows must yield nothing rather than panic;
        // the decoder normally rejects them, but the generator stays total.
        let window = TimeWindow { start: time(start), end: time(end) };
        let slots = generate_day_slots(&[window], duration, buffer);
        if start >= end || duration == 0 {
            prop_assert!(slots.is_empty());
        }
    }
}
