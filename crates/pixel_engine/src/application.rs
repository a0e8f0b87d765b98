//! Application trait and lifecycle management

use crate::config::ConfigError;
use crate::input::InputState;
use crate::render::PixelSurface;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to create your game or application using the engine.
pub trait Application {
    /// Update the application
    ///
    /// Called once per paced frame. Implement your game logic here.
    ///
    /// # Arguments
    /// * `input` - Snapshot of the controls held this frame
    /// * `delta_time` - Time to simulate in seconds
    fn update(&mut self, input: &InputState, delta_time: f32) -> Result<(), AppError>;

    /// Render the application
    ///
    /// Called after update. Draw the whole frame into `surface`.
    fn render(&mut self, surface: &mut PixelSurface);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
