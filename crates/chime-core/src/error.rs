//! Core error types for chime-core.
//!
//! Invalid countdown input (a zero duration) is not an error path; the
//! engine drops the request without reporting. Errors here cover config I/O
//! and alert resource acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for chime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Alert playback errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Config directory could not be prepared
    #[error("Failed to prepare config directory {path}: {message}")]
    DirUnavailable { path: PathBuf, message: String },
}

/// Alert playback errors. Handled at the point of occurrence (logged);
/// they never propagate out of the playback trigger.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The configured sound file does not exist
    #[error("Alert sound not found at {path}")]
    SoundNotFound { path: PathBuf },

    /// The sound file exists but could not be opened
    #[error("Failed to open alert sound {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No usable audio output device
    #[error("No audio output device available: {0}")]
    Stream(#[from] rodio::StreamError),

    /// The sink could not be attached to the output stream
    #[error("Audio playback failed: {0}")]
    Play(#[from] rodio::PlayError),

    /// The sound file could not be decoded
    #[error("Failed to decode alert sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
