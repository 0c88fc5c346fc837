//! Countdown engine implementation.
//!
//! The countdown engine is a caller-ticked state machine. It does not use
//! internal threads - the caller invokes `tick()` once per second and each
//! tick is one elapsed second, so transitions stay deterministic under test.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Finished -> (reset) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new();
//! engine.start(90);
//! // Once per second:
//! engine.tick(); // Returns Some(Event::CountdownFinished) at zero
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountdownMode {
    Idle,
    Running,
    Finished,
}

/// Core countdown engine.
///
/// Owns no tick source; whoever schedules the one-second cadence calls
/// `tick()` and stops calling it once the engine reports the finish.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    mode: CountdownMode,
    /// Duration the current countdown started from, in seconds.
    total_secs: u64,
    /// Seconds left. Only mutated while `Running`; never underflows.
    remaining_secs: u64,
}

impl CountdownEngine {
    /// Create an idle engine with nothing on the clock.
    pub fn new() -> Self {
        Self {
            mode: CountdownMode::Idle,
            total_secs: 0,
            remaining_secs: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> CountdownMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// `HH:MM:SS` rendering of the remaining time.
    pub fn display(&self) -> String {
        format_hms(self.remaining_secs)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a countdown of `duration_secs`.
    ///
    /// A zero duration or a non-idle engine drops the request without
    /// surfacing an error; the state is left untouched.
    pub fn start(&mut self, duration_secs: u64) -> Option<Event> {
        if duration_secs == 0 || self.mode != CountdownMode::Idle {
            return None;
        }
        self.total_secs = duration_secs;
        self.remaining_secs = duration_secs;
        self.mode = CountdownMode::Running;
        Some(Event::CountdownStarted {
            total_secs: duration_secs,
            display: self.display(),
            at: Utc::now(),
        })
    }

    /// Advance by one second. Only acts while `Running`.
    ///
    /// Reports the finish transition exactly once, on the tick where the
    /// count reaches zero; later ticks are no-ops until `reset()`.
    pub fn tick(&mut self) -> Option<Event> {
        if self.mode != CountdownMode::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.mode = CountdownMode::Finished;
            return Some(Event::CountdownFinished {
                total_secs: self.total_secs,
                at: Utc::now(),
            });
        }
        Some(Event::CountdownTick {
            remaining_secs: self.remaining_secs,
            display: self.display(),
            at: Utc::now(),
        })
    }

    /// Stop whatever is in flight and return to `Idle`. Callable from any
    /// mode.
    pub fn reset(&mut self) -> Option<Event> {
        self.mode = CountdownMode::Idle;
        self.total_secs = 0;
        self.remaining_secs = 0;
        Some(Event::CountdownReset { at: Utc::now() })
    }
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Render seconds as zero-padded `HH:MM:SS`. Hours are not wrapped at 24.
pub fn format_hms(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_duration_is_rejected() {
        let mut engine = CountdownEngine::new();
        assert!(engine.start(0).is_none());
        assert_eq!(engine.mode(), CountdownMode::Idle);
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn start_sets_running_with_full_duration() {
        let mut engine = CountdownEngine::new();
        assert!(engine.start(90).is_some());
        assert_eq!(engine.mode(), CountdownMode::Running);
        assert_eq!(engine.remaining_secs(), 90);
        assert_eq!(engine.total_secs(), 90);
    }

    #[test]
    fn start_while_running_is_rejected() {
        let mut engine = CountdownEngine::new();
        engine.start(10);
        assert!(engine.start(5).is_none());
        assert_eq!(engine.remaining_secs(), 10);
    }

    #[test]
    fn three_second_run_finishes_on_third_tick() {
        let mut engine = CountdownEngine::new();
        engine.start(3);
        assert_eq!(engine.remaining_secs(), 3);

        assert!(matches!(engine.tick(), Some(Event::CountdownTick { .. })));
        assert_eq!(engine.mode(), CountdownMode::Running);
        assert_eq!(engine.remaining_secs(), 2);

        assert!(matches!(engine.tick(), Some(Event::CountdownTick { .. })));
        assert_eq!(engine.mode(), CountdownMode::Running);
        assert_eq!(engine.remaining_secs(), 1);

        assert!(matches!(
            engine.tick(),
            Some(Event::CountdownFinished { .. })
        ));
        assert_eq!(engine.mode(), CountdownMode::Finished);
        assert_eq!(engine.remaining_secs(), 0);

        // Finished engines ignore further ticks.
        assert!(engine.tick().is_none());
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn tick_while_idle_is_a_noop() {
        let mut engine = CountdownEngine::new();
        assert!(engine.tick().is_none());
        assert_eq!(engine.mode(), CountdownMode::Idle);
    }

    #[test]
    fn reset_returns_to_idle_from_any_mode() {
        let mut engine = CountdownEngine::new();
        engine.start(2);
        engine.reset();
        assert_eq!(engine.mode(), CountdownMode::Idle);
        assert_eq!(engine.remaining_secs(), 0);

        engine.start(1);
        engine.tick();
        assert_eq!(engine.mode(), CountdownMode::Finished);
        engine.reset();
        assert_eq!(engine.mode(), CountdownMode::Idle);
        assert_eq!(engine.remaining_secs(), 0);
    }

    #[test]
    fn format_hms_cases() {
        assert_eq!(format_hms(3661), "01:01:01");
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(59), "00:00:59");
        // Hours keep counting past a day.
        assert_eq!(format_hms(90_000), "25:00:00");
    }

    proptest! {
        #[test]
        fn remaining_tracks_ticks_and_never_underflows(
            duration in 1u64..=10_000,
            extra in 0u64..=16,
        ) {
            let mut engine = CountdownEngine::new();
            engine.start(duration);
            for i in 1..=duration + extra {
                engine.tick();
                prop_assert_eq!(engine.remaining_secs(), duration.saturating_sub(i));
                if i >= duration {
                    prop_assert_eq!(engine.mode(), CountdownMode::Finished);
                } else {
                    prop_assert_eq!(engine.mode(), CountdownMode::Running);
                }
            }
        }

        #[test]
        fn format_hms_is_zero_padded(secs in 0u64..=1_000_000) {
            let rendered = format_hms(secs);
            let fields: Vec<&str> = rendered.split(':').collect();
            prop_assert_eq!(fields.len(), 3);
            prop_assert!(fields[0].len() >= 2);
            prop_assert_eq!(fields[1].len(), 2);
            prop_assert_eq!(fields[2].len(), 2);
            prop_assert!(fields[1].parse::<u64>().unwrap() < 60);
            prop_assert!(fields[2].parse::<u64>().unwrap() < 60);
        }
    }
}
