//! Alert playback over the default audio output.
//!
//! Playback failures are never fatal: a missing or undecodable sound file
//! logs a warning and the rest of the system keeps running with no audible
//! alert.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use rodio::{Decoder, OutputStream, Sink};
use tracing::{debug, warn};

use crate::error::AudioError;

/// A single exclusive playback slot for the countdown alert.
///
/// Callers only invoke `start()` while idle; the controller's mode gating
/// and the engine's at-most-once finish signal enforce that.
pub trait AlertSink {
    /// Begin playback of the alert sound.
    fn start(&mut self);
    /// Stop playback. Safe to call when already idle.
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Alert sink that tracks playback state without touching an audio device.
#[derive(Debug, Default)]
pub struct MuteAlert {
    playing: bool,
}

impl AlertSink for MuteAlert {
    fn start(&mut self) {
        self.playing = true;
    }

    fn stop(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Keeps the output stream alive for as long as the sink plays.
struct ActiveAlert {
    _stream: OutputStream,
    sink: Sink,
}

/// rodio-backed playback of a fixed, configured sound file.
pub struct RodioAlert {
    sound_path: PathBuf,
    /// Playback volume, 0-100.
    volume: u32,
    active: Option<ActiveAlert>,
}

impl RodioAlert {
    pub fn new(sound_path: PathBuf, volume: u32) -> Self {
        Self {
            sound_path,
            volume,
            active: None,
        }
    }

    fn acquire(&self) -> Result<ActiveAlert, AudioError> {
        if !self.sound_path.exists() {
            return Err(AudioError::SoundNotFound {
                path: self.sound_path.clone(),
            });
        }
        let file = File::open(&self.sound_path).map_err(|source| AudioError::OpenFailed {
            path: self.sound_path.clone(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file))?;
        let (stream, handle) = OutputStream::try_default()?;
        let sink = Sink::try_new(&handle)?;
        sink.set_volume(self.volume.min(100) as f32 / 100.0);
        sink.append(source);
        Ok(ActiveAlert {
            _stream: stream,
            sink,
        })
    }
}

impl AlertSink for RodioAlert {
    fn start(&mut self) {
        if self.active.is_some() {
            return;
        }
        match self.acquire() {
            Ok(active) => {
                debug!(path = %self.sound_path.display(), "alert playback started");
                self.active = Some(active);
            }
            Err(err) => {
                warn!(%err, "alert sound unavailable, continuing without audio");
            }
        }
    }

    fn stop(&mut self) {
        if let Some(active) = self.active.take() {
            active.sink.stop();
        }
    }

    fn is_playing(&self) -> bool {
        self.active.is_some()
    }
}

impl AlertSink for Box<dyn AlertSink> {
    fn start(&mut self) {
        (**self).start();
    }

    fn stop(&mut self) {
        (**self).stop();
    }

    fn is_playing(&self) -> bool {
        (**self).is_playing()
    }
}
