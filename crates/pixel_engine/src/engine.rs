//! Core engine implementation
//!
//! The engine owns the frame buffer, the input manager and the frame pacer.
//! The host feeds it wall-clock time and key events; whenever a frame is due
//! the engine snapshots the input, updates the application and lets it
//! render into the surface.

use crate::{
    application::{AppError, Application},
    config::{Config, Deserialize, Serialize},
    foundation::time::{FramePacer, FrameStep},
    input::{InputManager, KeyBindings},
    render::PixelSurface,
};
use std::time::Duration;
use thiserror::Error;

/// Main engine struct
///
/// The engine coordinates the subsystems and drives the application.
pub struct Engine {
    config: EngineConfig,
    surface: PixelSurface,
    input: InputManager,
    pacer: FramePacer,
    frame_count: u64,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let max_step = config.max_frame_duration()?;
        log::info!(
            "Initializing engine: {}x{} surface at {} fps",
            config.width,
            config.height,
            config.target_fps
        );

        Ok(Self {
            surface: PixelSurface::new(config.width, config.height),
            input: InputManager::new(KeyBindings::default()),
            pacer: FramePacer::new(config.target_fps, max_step),
            frame_count: 0,
            config,
        })
    }

    /// Report elapsed wall time and run a frame if one is due
    ///
    /// Returns the step that was simulated, or `None` when it is too early
    /// for the next frame.
    pub fn advance(
        &mut self,
        app: &mut dyn Application,
        elapsed: Duration,
    ) -> Result<Option<FrameStep>, EngineError> {
        let Some(step) = self.pacer.advance(elapsed) else {
            return Ok(None);
        };

        let input = self.input.snapshot();
        app.update(&input, step.delta_time)?;
        app.render(&mut self.surface);
        self.frame_count += 1;

        Ok(Some(step))
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The most recently rendered frame
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Get the input manager
    pub fn input(&self) -> &InputManager {
        &self.input
    }

    /// Get mutable access to the input manager
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Frame pacer statistics
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Number of frames run so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Surface width in pixels
    pub width: u32,

    /// Surface height in pixels
    pub height: u32,

    /// Frames per second the pacer aims for
    pub target_fps: u32,

    /// Longest step handed to the application, in seconds
    pub max_frame_time: f32,
}

impl EngineConfig {
    /// Reject sizes and rates the engine cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "surface must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.target_fps == 0 {
            return Err(EngineError::InvalidConfig("target_fps must be positive".to_string()));
        }
        if !self.max_frame_time.is_finite() || self.max_frame_time <= 0.0 {
            return Err(EngineError::InvalidConfig(format!(
                "max_frame_time must be positive and finite, got {}",
                self.max_frame_time
            )));
        }
        self.max_frame_duration().map(|_| ())
    }

    fn max_frame_duration(&self) -> Result<Duration, EngineError> {
        Duration::try_from_secs_f32(self.max_frame_time).map_err(|e| {
            EngineError::InvalidConfig(format!(
                "max_frame_time {} is out of range: {e}",
                self.max_frame_time
            ))
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 192,
            height: 160,
            target_fps: 60,
            max_frame_time: 1.0 / 15.0,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(String),

    /// Application error
    #[error("Application error: {0}")]
    Application(#[from] AppError),
}
