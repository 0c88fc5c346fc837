//! Live clock snapshots.
//!
//! The clock has no internal timer. The caller re-samples once per second
//! and renders whatever it gets back; every snapshot is self-contained and
//! independent of the previous one.

use chrono::{DateTime, Local, Timelike};
use serde::{Deserialize, Serialize};

/// Display format for the live clock, e.g. `Sat, 08 Feb 2025 14:03:59`.
const CLOCK_FORMAT: &str = "%a, %d %b %Y %H:%M:%S";

/// One rendered observation of "now".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub timestamp: DateTime<Local>,
    pub formatted_text: String,
    pub is_daytime: bool,
}

impl ClockSnapshot {
    /// Snapshot the current local time.
    pub fn now() -> Self {
        Self::at(Local::now())
    }

    /// Snapshot an arbitrary instant.
    pub fn at(timestamp: DateTime<Local>) -> Self {
        Self {
            formatted_text: timestamp.format(CLOCK_FORMAT).to_string(),
            is_daytime: is_daytime(timestamp.hour()),
            timestamp,
        }
    }

    /// Name of the background asset matching this snapshot.
    pub fn background_asset(&self) -> &'static str {
        background_for_hour(self.timestamp.hour())
    }
}

/// Hours before noon count as daytime.
pub fn is_daytime(hour: u32) -> bool {
    hour < 12
}

/// `"morning"` before noon, `"evening"` from noon onward.
pub fn background_for_hour(hour: u32) -> &'static str {
    if is_daytime(hour) {
        "morning"
    } else {
        "evening"
    }
}
