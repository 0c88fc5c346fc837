use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controller::ControllerMode;
use crate::countdown::CountdownMode;

/// Every state change in the system produces an Event.
/// The CLI prints them; a GUI shell would subscribe to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CountdownStarted {
        total_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    CountdownTick {
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Fires exactly once per run.
    CountdownFinished {
        total_secs: u64,
        at: DateTime<Utc>,
    },
    CountdownReset {
        at: DateTime<Utc>,
    },
    /// The user acknowledged the alert and playback stopped.
    AlertStopped {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: ControllerMode,
        countdown: CountdownMode,
        remaining_secs: u64,
        total_secs: u64,
        display: String,
        alert_playing: bool,
        at: DateTime<Utc>,
    },
}
