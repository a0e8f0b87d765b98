//! # Pixel Blaster
//!
//! A retro asteroids game for a 192x160 pixel screen, built on
//! `pixel_engine`. Steer the ship, shoot the drifting rocks and watch them
//! split: large into two medium, medium into two small, small into dust.
//!
//! The simulation lives in [`World`]; [`Game`] adds the title and game over
//! screens and implements the engine's `Application` trait so any host that
//! can pace frames and present a `PixelSurface` can run it.
//!
//! ```
//! use pixel_blaster::{GameConfig, World};
//! use pixel_engine::input::Controls;
//!
//! let mut world = World::new(&GameConfig::default(), 7);
//! let result = world.tick(1.0 / 60.0, Controls::FIRE);
//! assert_eq!(result.lives, 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::cast_precision_loss)]

pub mod asteroid;
pub mod collision;
pub mod config;
pub mod entity;
pub mod events;
pub mod game;
pub mod hud;
pub mod pilot;
pub mod projectile;
pub mod ship;
pub mod world;

pub use config::GameConfig;
pub use entity::{Entity, EntityId, EntityKind};
pub use events::{FrameResult, GameEvent, SoundEvent};
pub use game::{Game, Phase};
pub use world::World;
