//! Entities living in the game world
//!
//! Every entity shares a body (position, velocity, heading, collision
//! radius) and carries its variant-specific state in [`EntityKind`]. The
//! world owns them in a slot-map arena keyed by [`EntityId`].

use crate::asteroid::Asteroid;
use crate::projectile::Projectile;
use crate::ship::{Ship, EXPLOSION_RADIUS};
use pixel_engine::foundation::math::{normalize_angle, Bounds2, Vec2};
use pixel_engine::render::PixelSurface;

slotmap::new_key_type! {
    /// Stable id of an entity in the world arena
    pub struct EntityId;
}

/// Variant-specific entity state
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// The player's ship
    Ship(Ship),
    /// A drifting asteroid
    Asteroid(Asteroid),
    /// A shot fired by the ship
    Projectile(Projectile),
}

/// A simulated object in the playfield
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Variant and its state
    pub kind: EntityKind,
    /// Position inside the playfield
    pub position: Vec2,
    /// Velocity in pixels per second
    pub velocity: Vec2,
    /// Heading in radians, 0 pointing up
    pub heading: f32,
    /// Collision radius
    pub radius: f32,
}

impl Entity {
    /// Check if this is the ship
    pub fn is_ship(&self) -> bool {
        matches!(self.kind, EntityKind::Ship(_))
    }

    /// Check if this is an asteroid
    pub fn is_asteroid(&self) -> bool {
        matches!(self.kind, EntityKind::Asteroid(_))
    }

    /// Check if this is a projectile
    pub fn is_projectile(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile(_))
    }

    /// Ship state, if this is the ship
    pub fn as_ship(&self) -> Option<&Ship> {
        match &self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    /// Mutable ship state, if this is the ship
    pub fn as_ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            EntityKind::Ship(ship) => Some(ship),
            _ => None,
        }
    }

    /// Asteroid state, if this is an asteroid
    pub fn as_asteroid(&self) -> Option<&Asteroid> {
        match &self.kind {
            EntityKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    /// Projectile state, if this is a projectile
    pub fn as_projectile(&self) -> Option<&Projectile> {
        match &self.kind {
            EntityKind::Projectile(projectile) => Some(projectile),
            _ => None,
        }
    }

    /// Whether the entity takes part in collision tests right now
    pub fn is_collidable(&self) -> bool {
        match &self.kind {
            EntityKind::Ship(ship) => ship.is_collidable(),
            EntityKind::Asteroid(_) => true,
            EntityKind::Projectile(projectile) => !projectile.is_expired(),
        }
    }

    /// Whether the world should drop this entity
    pub fn is_expired(&self) -> bool {
        self.as_projectile().is_some_and(Projectile::is_expired)
    }

    /// Advance by `dt` seconds and wrap into `bounds`
    pub fn update(&mut self, dt: f32, bounds: &Bounds2) {
        match &mut self.kind {
            EntityKind::Ship(ship) => {
                if ship.is_destroyed() {
                    self.velocity = Vec2::zeros();
                }
            }
            EntityKind::Asteroid(asteroid) => {
                self.heading = normalize_angle(self.heading + asteroid.spin() * dt);
            }
            EntityKind::Projectile(projectile) => projectile.tick(dt),
        }

        self.position = bounds.wrap(self.position + self.velocity * dt);
    }

    /// Half-size of what gets drawn, which can exceed the collision radius
    fn draw_extent(&self) -> f32 {
        match &self.kind {
            EntityKind::Ship(ship) if ship.is_destroyed() => EXPLOSION_RADIUS,
            _ => self.radius * 1.5,
        }
    }

    /// Draw the entity, repeated on every edge it straddles
    ///
    /// `origin` is where the playfield's top-left corner sits on the surface.
    pub fn draw(&self, surface: &mut PixelSurface, origin: Vec2, bounds: &Bounds2) {
        for offset in bounds.wrap_offsets(self.position, self.draw_extent()) {
            let center = origin + self.position + offset;
            match &self.kind {
                EntityKind::Ship(ship) => ship.draw(surface, center, self.heading, self.radius),
                EntityKind::Asteroid(asteroid) => {
                    asteroid.draw(surface, center, self.heading, self.radius);
                }
                EntityKind::Projectile(projectile) => projectile.draw(surface, center),
            }
        }
    }
}
