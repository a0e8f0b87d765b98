//! Physics module for collision detection
//!
//! Provides circle colliders on a toroidal playfield, collision layer
//! filtering and a per-frame collision system that reports overlapping pairs.

pub mod collision;
pub mod collision_layers;
pub mod collision_system;

pub use collision::BoundingCircle;
pub use collision_layers::CollisionLayers;
pub use collision_system::{Collider, CollisionPair, CollisionSystem};
