//! # Pixel Engine
//!
//! A small software-rendered 2D engine for retro arcade games.
//!
//! ## Features
//!
//! - **Pixel Surface**: CPU frame buffer with clipped drawing primitives
//! - **Bitmap Fonts**: Built-in score and text fonts for HUDs
//! - **Toroidal Physics**: Wrapped positions and wrapped circle collision
//! - **Frame Pacing**: Fixed-cadence driver that coalesces late frames
//! - **Configuration**: TOML/RON config files via serde
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixel_engine::prelude::*;
//! use std::time::Duration;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn update(&mut self, input: &InputState, delta_time: f32) -> Result<(), AppError> {
//!         // Advance your game
//!         Ok(())
//!     }
//!
//!     fn render(&mut self, surface: &mut PixelSurface) {
//!         surface.clear(Color::BLACK);
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = Engine::new(EngineConfig::default())?;
//!     let mut app = MyApp;
//!     engine.advance(&mut app, Duration::from_millis(16))?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod audio;
pub mod physics;
pub mod render;

mod application;
mod engine;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineConfig, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineConfig, EngineError,
        foundation::{
            math::{Vec2, Bounds2},
            time::{FramePacer, FrameStep},
        },
        config::{Config, ConfigError},
        input::{InputManager, InputState, Controls, KeyBindings, KeyCode},
        audio::{AudioSink, AudioError, NullAudio},
        physics::{BoundingCircle, CollisionLayers},
        render::{Color, PixelSurface, Rect, text::{BitmapFont, FontVariant}},
    };
}
