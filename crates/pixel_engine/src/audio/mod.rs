//! Audio boundary
//!
//! The engine does not play audio itself. Games describe sound effects with
//! their own event type and hand them to an [`AudioSink`] supplied by the
//! platform layer. Playing a sound is fire-and-forget: failures are logged
//! and never reach the simulation.

use std::fmt::Debug;

/// Audio errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio device or backend is available
    #[error("Audio backend unavailable: {0}")]
    Unavailable(String),

    /// The backend refused to play the requested sound
    #[error("Sound rejected: {0}")]
    Rejected(String),
}

/// Something that can play sound effects of type `S`
pub trait AudioSink<S> {
    /// Start playing a sound without waiting for it to finish
    fn play_sound(&mut self, sound: S) -> Result<(), AudioError>;
}

/// Play a sound, logging and swallowing any failure
pub fn play_or_ignore<S: Debug + Copy>(sink: &mut dyn AudioSink<S>, sound: S) {
    if let Err(e) = sink.play_sound(sound) {
        log::warn!("Ignoring failed sound {:?}: {}", sound, e);
    }
}

/// Sink that discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl<S> AudioSink<S> for NullAudio {
    fn play_sound(&mut self, _sound: S) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Sink that writes every sound to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAudio;

impl<S: Debug> AudioSink<S> for LogAudio {
    fn play_sound(&mut self, sound: S) -> Result<(), AudioError> {
        log::debug!("Play sound: {:?}", sound);
        Ok(())
    }
}

/// Sink that remembers every sound it was asked to play
#[derive(Debug, Clone)]
pub struct RecordingAudio<S> {
    played: Vec<S>,
}

impl<S> Default for RecordingAudio<S> {
    fn default() -> Self {
        Self { played: Vec::new() }
    }
}

impl<S> RecordingAudio<S> {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sounds played so far, oldest first
    pub fn played(&self) -> &[S] {
        &self.played
    }

    /// Count how many times a sound was played
    pub fn count(&self, sound: &S) -> usize
    where
        S: PartialEq,
    {
        self.played.iter().filter(|s| *s == sound).count()
    }
}

impl<S> AudioSink<S> for RecordingAudio<S> {
    fn play_sound(&mut self, sound: S) -> Result<(), AudioError> {
        self.played.push(sound);
        Ok(())
    }
}
