//! Player ship
//!
//! The ship cycles through three states:
//!
//! ```text
//! Active --(asteroid hit)--> Destroyed --(respawn delay)--> Invulnerable --(timer)--> Active
//! ```
//!
//! A destroyed ship stays in the world as an explosion and ignores input.
//! An invulnerable ship flies normally, blinks and cannot be hit.

use crate::config::GameplayConfig;
use crate::entity::{Entity, EntityKind};
use pixel_engine::foundation::math::{heading_vector, normalize_angle, rotate, Vec2};
use pixel_engine::input::Controls;
use pixel_engine::render::{Color, PixelSurface};

/// Hull color
pub const SHIP_COLOR: Color = Color::rgb(208, 112, 112);

/// Largest radius the explosion debris reaches
pub(crate) const EXPLOSION_RADIUS: f32 = 8.0;

/// Seconds the explosion takes to reach full size
const EXPLOSION_GROWTH: f32 = 0.6;

/// Hull outline in units of the collision radius, nose first
const HULL: [(f32, f32); 3] = [(0.0, -1.2), (1.0, 1.0), (-1.0, 1.0)];

/// Ship life-cycle state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShipState {
    /// Flying and vulnerable
    Active,
    /// Flying but immune to asteroids
    Invulnerable {
        /// Seconds until vulnerable again
        remaining: f32,
    },
    /// Exploded, waiting to respawn
    Destroyed {
        /// Seconds until the respawn is due
        remaining: f32,
    },
}

/// State change produced by [`Ship::advance_state`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipTransition {
    /// The respawn delay elapsed; the world decides between respawn and game over
    RespawnDue,
    /// Invulnerability wore off
    Vulnerable,
}

/// Ship-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    state: ShipState,
    state_time: f32,
    fire_cooldown: f32,
    thrusting: bool,
    blink_period: f32,
}

impl Ship {
    /// Create an active ship
    pub fn new(blink_period: f32) -> Self {
        Self {
            state: ShipState::Active,
            state_time: 0.0,
            fire_cooldown: 0.0,
            thrusting: false,
            blink_period,
        }
    }

    /// Current state
    pub fn state(&self) -> ShipState {
        self.state
    }

    /// Seconds spent in the current state
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Check if the ship can be hit
    pub fn is_collidable(&self) -> bool {
        matches!(self.state, ShipState::Active)
    }

    /// Check if the ship is immune to asteroids
    pub fn is_invulnerable(&self) -> bool {
        matches!(self.state, ShipState::Invulnerable { .. })
    }

    /// Check if the ship has exploded
    pub fn is_destroyed(&self) -> bool {
        matches!(self.state, ShipState::Destroyed { .. })
    }

    /// Check if the engine fired this tick
    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Blow the ship up; returns `false` if it could not be hit
    pub fn destroy(&mut self, respawn_delay: f32) -> bool {
        if !self.is_collidable() {
            return false;
        }
        self.enter(ShipState::Destroyed { remaining: respawn_delay });
        self.thrusting = false;
        true
    }

    /// Bring the ship back with an invulnerability window
    pub fn respawn(&mut self, invulnerability_time: f32) {
        self.enter(ShipState::Invulnerable {
            remaining: invulnerability_time,
        });
        self.fire_cooldown = 0.0;
        self.thrusting = false;
    }

    fn enter(&mut self, state: ShipState) {
        self.state = state;
        self.state_time = 0.0;
    }

    /// Run the state timers
    ///
    /// A destroyed ship stays destroyed until [`respawn`](Self::respawn) is
    /// called, so `RespawnDue` repeats every tick until then.
    pub fn advance_state(&mut self, dt: f32) -> Option<ShipTransition> {
        self.state_time += dt;
        match &mut self.state {
            ShipState::Active => None,
            ShipState::Invulnerable { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.enter(ShipState::Active);
                    Some(ShipTransition::Vulnerable)
                } else {
                    None
                }
            }
            ShipState::Destroyed { remaining } => {
                *remaining -= dt;
                (*remaining <= 0.0).then_some(ShipTransition::RespawnDue)
            }
        }
    }

    /// Cool the gun down and report whether a shot leaves this tick
    pub fn trigger(&mut self, dt: f32, fire_held: bool, cooldown: f32) -> bool {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        if !fire_held || self.is_destroyed() || self.fire_cooldown > 0.0 {
            return false;
        }
        self.fire_cooldown = cooldown;
        true
    }

    /// Blinking: hidden on every other blink period while invulnerable
    pub fn is_visible(&self) -> bool {
        match self.state {
            ShipState::Invulnerable { remaining } => {
                (remaining.max(0.0) / self.blink_period).floor() as u32 % 2 == 0
            }
            _ => true,
        }
    }

    pub(crate) fn draw(&self, surface: &mut PixelSurface, center: Vec2, heading: f32, radius: f32) {
        if self.is_destroyed() {
            self.draw_explosion(surface, center);
            return;
        }
        if !self.is_visible() {
            return;
        }

        let hull = HULL.map(|(x, y)| center + rotate(Vec2::new(x, y) * radius, heading));
        surface.draw_filled_polygon(&hull, SHIP_COLOR);

        if self.thrusting {
            let flame = center + rotate(Vec2::new(0.0, radius + 1.0), heading);
            surface.set_pixel(flame.x.floor() as i32, flame.y.floor() as i32, Color::ORANGE);
        }
    }

    fn draw_explosion(&self, surface: &mut PixelSurface, center: Vec2) {
        let growth = (self.state_time / EXPLOSION_GROWTH).min(1.0);
        let reach = 1.0 + growth * (EXPLOSION_RADIUS - 1.0);
        let fade = 1.0 - growth * 0.6;

        let (cx, cy) = (center.x.floor() as i32, center.y.floor() as i32);
        surface.draw_circle_outline(cx, cy, (reach * 0.5) as i32, Color::ORANGE.scaled(fade));

        for i in 0..8 {
            let angle = i as f32 * std::f32::consts::FRAC_PI_4;
            let debris = center + heading_vector(angle) * reach;
            let color = SHIP_COLOR.scaled(fade);
            surface.set_pixel(debris.x.floor() as i32, debris.y.floor() as i32, color);
        }
    }
}

impl Entity {
    /// Create the ship, at rest and heading up
    pub fn ship(position: Vec2, config: &GameplayConfig) -> Self {
        Self {
            kind: EntityKind::Ship(Ship::new(config.blink_period)),
            position,
            velocity: Vec2::zeros(),
            heading: 0.0,
            radius: config.ship_radius,
        }
    }

    /// Apply rotation, thrust, friction and the speed cap to the ship
    ///
    /// Does nothing for other entities or a destroyed ship.
    pub fn steer(&mut self, controls: Controls, dt: f32, config: &GameplayConfig) {
        let EntityKind::Ship(ship) = &mut self.kind else {
            return;
        };
        if ship.is_destroyed() {
            return;
        }

        let mut turn = 0.0;
        if controls.contains(Controls::ROTATE_LEFT) {
            turn -= 1.0;
        }
        if controls.contains(Controls::ROTATE_RIGHT) {
            turn += 1.0;
        }
        self.heading = normalize_angle(self.heading + turn * config.ship_rotation_speed * dt);

        ship.thrusting = controls.contains(Controls::THRUST);
        if ship.thrusting {
            self.velocity += heading_vector(self.heading) * config.ship_thrust * dt;
        }

        self.velocity *= config.ship_friction.powf(dt);
        let speed = self.velocity.magnitude();
        if speed > config.ship_max_speed {
            self.velocity *= config.ship_max_speed / speed;
        }
    }

    /// Fire control for the ship; `false` for other entities
    pub fn trigger(&mut self, dt: f32, fire_held: bool, cooldown: f32) -> bool {
        self.as_ship_mut()
            .is_some_and(|ship| ship.trigger(dt, fire_held, cooldown))
    }

    /// Where shots leave the hull
    pub fn nose(&self) -> Vec2 {
        self.position + heading_vector(self.heading) * self.radius * HULL[0].1.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ship() -> Entity {
        Entity::ship(Vec2::new(50.0, 50.0), &GameplayConfig::default())
    }

    #[test]
    fn test_state_cycle() {
        let mut ship = Ship::new(0.2);
        assert!(ship.is_collidable());

        assert!(ship.destroy(1.0));
        assert!(ship.is_destroyed());
        assert!(!ship.destroy(1.0));

        assert_eq!(ship.advance_state(0.5), None);
        assert_eq!(ship.advance_state(0.5), Some(ShipTransition::RespawnDue));
        assert!(ship.is_destroyed());

        ship.respawn(2.0);
        assert!(ship.is_invulnerable());
        assert!(!ship.destroy(1.0));
        assert_eq!(ship.advance_state(1.0), None);
        assert_eq!(ship.advance_state(1.0), Some(ShipTransition::Vulnerable));
        assert_eq!(ship.state(), ShipState::Active);
        assert_relative_eq!(ship.state_time(), 0.0);
    }

    #[test]
    fn test_blinking() {
        let mut ship = Ship::new(0.25);
        ship.respawn(1.0);
        let mut visible = Vec::new();
        for _ in 0..4 {
            ship.advance_state(0.25);
            visible.push(ship.is_visible());
        }
        // remaining 0.75, 0.5, 0.25 and then active
        assert_eq!(visible, vec![false, true, false, true]);
    }

    #[test]
    fn test_rotation() {
        let config = GameplayConfig::default();
        let mut ship = ship();
        ship.steer(Controls::ROTATE_RIGHT, 0.1, &config);
        assert_relative_eq!(ship.heading, config.ship_rotation_speed * 0.1, epsilon = 1e-5);

        ship.steer(Controls::ROTATE_LEFT | Controls::ROTATE_RIGHT, 0.1, &config);
        assert_relative_eq!(ship.heading, config.ship_rotation_speed * 0.1, epsilon = 1e-5);
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let config = GameplayConfig::default();
        let mut ship = ship();
        ship.steer(Controls::THRUST, 0.1, &config);
        assert!(ship.velocity.y < 0.0);
        assert_relative_eq!(ship.velocity.x, 0.0, epsilon = 1e-5);
        assert!(ship.as_ship().unwrap().is_thrusting());
    }

    #[test]
    fn test_friction_and_speed_cap() {
        let config = GameplayConfig::default();
        let mut ship = ship();
        ship.velocity = Vec2::new(10.0, 0.0);
        ship.steer(Controls::empty(), 1.0, &config);
        assert_relative_eq!(ship.velocity.x, 10.0 * config.ship_friction, epsilon = 1e-4);

        ship.velocity = Vec2::new(0.0, 1000.0);
        ship.steer(Controls::empty(), 0.01, &config);
        assert!(ship.velocity.magnitude() <= config.ship_max_speed + 1e-3);
    }

    #[test]
    fn test_destroyed_ship_ignores_controls() {
        let config = GameplayConfig::default();
        let mut ship = ship();
        ship.as_ship_mut().unwrap().destroy(1.0);
        ship.steer(Controls::all(), 0.1, &config);
        assert_relative_eq!(ship.heading, 0.0);
        assert_eq!(ship.velocity, Vec2::zeros());
        assert!(!ship.trigger(0.1, true, 0.25));
    }

    #[test]
    fn test_fire_cooldown() {
        let mut ship = Ship::new(0.2);
        assert!(ship.trigger(0.016, true, 0.25));
        assert!(!ship.trigger(0.1, true, 0.25));
        assert!(!ship.trigger(0.1, true, 0.25));
        assert!(ship.trigger(0.1, true, 0.25));
        assert!(!ship.trigger(1.0, false, 0.25));
    }

    #[test]
    fn test_nose_leads_the_hull() {
        let mut ship = ship();
        ship.heading = std::f32::consts::FRAC_PI_2;
        let nose = ship.nose();
        assert!(nose.x > ship.position.x);
        assert_relative_eq!(nose.y, ship.position.y, epsilon = 1e-4);
    }

    #[test]
    fn test_draws_hull_and_explosion() {
        let mut surface = PixelSurface::new(20, 20);
        let mut ship = Ship::new(0.2);
        ship.draw(&mut surface, Vec2::new(10.0, 10.0), 0.0, 2.5);
        assert_eq!(surface.get_pixel(10, 10), Some(SHIP_COLOR));

        surface.clear(Color::BLACK);
        ship.destroy(1.0);
        ship.advance_state(1.0);
        ship.draw(&mut surface, Vec2::new(10.0, 10.0), 0.0, 2.5);
        assert!(surface.pixels().iter().any(|&c| c != Color::BLACK));
    }
}
