//! Single-control action state machine.
//!
//! One control drives the whole cycle: start a countdown, wait for it to
//! finish, stop the alert. The mode is derived from the countdown and
//! playback state, never stored as its own flag, so there is no
//! representable combination of "countdown running" and "alert playing".
//!
//! ```text
//! Idle -> Running -> AlertPlaying -> Idle -> ...
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::AlertSink;
use crate::countdown::{CountdownEngine, CountdownMode};
use crate::events::Event;

/// The control's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerMode {
    Idle,
    Running,
    AlertPlaying,
}

/// Mediates between the countdown engine and alert playback behind a
/// single control.
pub struct ActionController<A: AlertSink> {
    countdown: CountdownEngine,
    alert: A,
}

impl<A: AlertSink> ActionController<A> {
    pub fn new(alert: A) -> Self {
        Self {
            countdown: CountdownEngine::new(),
            alert,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn mode(&self) -> ControllerMode {
        match self.countdown.mode() {
            CountdownMode::Idle => ControllerMode::Idle,
            CountdownMode::Running => ControllerMode::Running,
            // A finished countdown keeps the stop affordance even when the
            // alert failed to sound.
            CountdownMode::Finished => ControllerMode::AlertPlaying,
        }
    }

    pub fn countdown(&self) -> &CountdownEngine {
        &self.countdown
    }

    pub fn alert_playing(&self) -> bool {
        self.alert.is_playing()
    }

    /// Label for the single action control.
    pub fn control_label(&self) -> &'static str {
        match self.mode() {
            ControllerMode::AlertPlaying => "Stop Music",
            _ => "Start Timer",
        }
    }

    /// The duration selector is only editable before a countdown starts.
    pub fn duration_selector_enabled(&self) -> bool {
        self.mode() == ControllerMode::Idle
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.mode(),
            countdown: self.countdown.mode(),
            remaining_secs: self.countdown.remaining_secs(),
            total_secs: self.countdown.total_secs(),
            display: self.countdown.display(),
            alert_playing: self.alert.is_playing(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Handle one activation of the control.
    pub fn activate(&mut self, selected_duration_secs: u64) -> Option<Event> {
        match self.mode() {
            ControllerMode::Idle => self.countdown.start(selected_duration_secs),
            // A running countdown ignores the control outright; only the
            // finish transition leaves Running.
            ControllerMode::Running => None,
            ControllerMode::AlertPlaying => {
                self.alert.stop();
                self.countdown.reset();
                Some(Event::AlertStopped { at: Utc::now() })
            }
        }
    }

    /// Advance the countdown by one second.
    ///
    /// The finish transition starts the alert; the engine reports it
    /// exactly once per countdown, so playback is never double-started.
    pub fn tick(&mut self) -> Option<Event> {
        let event = self.countdown.tick();
        if let Some(Event::CountdownFinished { .. }) = event {
            debug!("countdown finished, starting alert");
            self.alert.start();
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::MuteAlert;

    /// Counts `start()` calls; optionally refuses to play, mimicking a
    /// missing sound file.
    #[derive(Default)]
    struct ProbeAlert {
        starts: usize,
        stops: usize,
        refuse: bool,
        playing: bool,
    }

    impl AlertSink for ProbeAlert {
        fn start(&mut self) {
            self.starts += 1;
            if !self.refuse {
                self.playing = true;
            }
        }

        fn stop(&mut self) {
            self.stops += 1;
            self.playing = false;
        }

        fn is_playing(&self) -> bool {
            self.playing
        }
    }

    #[test]
    fn full_cycle_idle_running_alert_idle() {
        let mut controller = ActionController::new(MuteAlert::default());
        assert_eq!(controller.mode(), ControllerMode::Idle);
        assert_eq!(controller.control_label(), "Start Timer");
        assert!(controller.duration_selector_enabled());

        assert!(matches!(
            controller.activate(3),
            Some(Event::CountdownStarted { .. })
        ));
        assert_eq!(controller.mode(), ControllerMode::Running);
        assert!(!controller.duration_selector_enabled());

        controller.tick();
        controller.tick();
        assert_eq!(controller.mode(), ControllerMode::Running);
        assert!(matches!(
            controller.tick(),
            Some(Event::CountdownFinished { .. })
        ));

        assert_eq!(controller.mode(), ControllerMode::AlertPlaying);
        assert!(controller.alert_playing());
        assert_eq!(controller.control_label(), "Stop Music");
        assert!(!controller.duration_selector_enabled());

        assert!(matches!(
            controller.activate(3),
            Some(Event::AlertStopped { .. })
        ));
        assert_eq!(controller.mode(), ControllerMode::Idle);
        assert!(!controller.alert_playing());
        assert_eq!(controller.control_label(), "Start Timer");
        assert!(controller.duration_selector_enabled());
    }

    #[test]
    fn zero_duration_activation_is_a_noop() {
        let mut controller = ActionController::new(MuteAlert::default());
        assert!(controller.activate(0).is_none());
        assert_eq!(controller.mode(), ControllerMode::Idle);
        assert_eq!(controller.countdown().remaining_secs(), 0);
    }

    #[test]
    fn activation_while_running_is_ignored() {
        let mut controller = ActionController::new(MuteAlert::default());
        controller.activate(3);
        controller.tick();
        assert!(controller.activate(99).is_none());
        assert_eq!(controller.mode(), ControllerMode::Running);
        assert_eq!(controller.countdown().remaining_secs(), 2);
        assert_eq!(controller.countdown().total_secs(), 3);
    }

    #[test]
    fn alert_starts_exactly_once_per_countdown() {
        let mut controller = ActionController::new(ProbeAlert::default());
        controller.activate(2);
        controller.tick();
        controller.tick();
        controller.tick();
        controller.tick();
        assert_eq!(controller.alert.starts, 1);

        controller.activate(0); // acknowledge the alert
        controller.activate(2); // second run
        controller.tick();
        controller.tick();
        assert_eq!(controller.alert.starts, 2);
    }

    #[test]
    fn failed_playback_still_offers_stop_affordance() {
        let mut controller = ActionController::new(ProbeAlert {
            refuse: true,
            ..Default::default()
        });
        controller.activate(1);
        controller.tick();

        assert_eq!(controller.mode(), ControllerMode::AlertPlaying);
        assert!(!controller.alert_playing());
        assert_eq!(controller.control_label(), "Stop Music");

        assert!(matches!(
            controller.activate(1),
            Some(Event::AlertStopped { .. })
        ));
        assert_eq!(controller.mode(), ControllerMode::Idle);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut controller = ActionController::new(MuteAlert::default());
        controller.activate(5);
        match controller.snapshot() {
            Event::StateSnapshot {
                mode,
                countdown,
                remaining_secs,
                total_secs,
                display,
                alert_playing,
                ..
            } => {
                assert_eq!(mode, ControllerMode::Running);
                assert_eq!(countdown, CountdownMode::Running);
                assert_eq!(remaining_secs, 5);
                assert_eq!(total_secs, 5);
                assert_eq!(display, "00:00:05");
                assert!(!alert_playing);
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
