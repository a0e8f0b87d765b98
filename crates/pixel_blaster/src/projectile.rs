//! Projectiles fired by the ship

use crate::config::GameplayConfig;
use crate::entity::{Entity, EntityKind};
use pixel_engine::foundation::math::{heading_vector, Vec2};
use pixel_engine::render::{Color, PixelSurface};

/// Projectile-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    ttl: f32,
}

impl Projectile {
    /// Create a projectile living for `ttl` seconds
    pub fn new(ttl: f32) -> Self {
        Self { ttl }
    }

    /// Seconds left to live
    pub fn ttl(&self) -> f32 {
        self.ttl
    }

    /// Check if the projectile ran out of time
    pub fn is_expired(&self) -> bool {
        self.ttl <= 0.0
    }

    pub(crate) fn tick(&mut self, dt: f32) {
        self.ttl -= dt;
    }

    pub(crate) fn draw(&self, surface: &mut PixelSurface, center: Vec2) {
        surface.set_pixel(center.x.floor() as i32, center.y.floor() as i32, Color::WHITE);
    }
}

impl Entity {
    /// Create a projectile flying along `heading`
    ///
    /// Shots do not inherit the shooter's velocity.
    pub fn projectile(position: Vec2, heading: f32, config: &GameplayConfig) -> Self {
        Self {
            kind: EntityKind::Projectile(Projectile::new(config.projectile_lifetime)),
            position,
            velocity: heading_vector(heading) * config.projectile_speed,
            heading,
            radius: config.projectile_radius,
        }
    }
}
