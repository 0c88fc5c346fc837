//! # Chime Core Library
//!
//! This library provides the core logic for Chime: a live clock, a countdown
//! timer, and an audible alert when the countdown reaches zero. It follows a
//! CLI-first philosophy where all behavior is available via a standalone CLI
//! binary, with any GUI shell being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: A caller-ticked state machine where one `tick()`
//!   is one elapsed second, keeping transitions deterministic under test
//! - **Clock**: Pure snapshot construction; the one-second cadence is
//!   supplied by whatever scheduler drives it
//! - **Alert Playback**: A single exclusive rodio sink behind a trait seam
//! - **Action Controller**: The three-state machine tying the countdown to
//!   playback behind a single control
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: Countdown state machine
//! - [`ClockSnapshot`]: One rendered observation of "now"
//! - [`ActionController`]: Control gating and mode transitions
//! - [`Config`]: TOML-backed preferences

pub mod audio;
pub mod clock;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod events;

pub use audio::{AlertSink, MuteAlert, RodioAlert};
pub use clock::ClockSnapshot;
pub use config::Config;
pub use controller::{ActionController, ControllerMode};
pub use countdown::{format_hms, CountdownEngine, CountdownMode};
pub use error::{AudioError, ConfigError, CoreError};
pub use events::Event;
