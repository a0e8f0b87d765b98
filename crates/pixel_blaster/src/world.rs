//! The game world
//!
//! [`World`] owns every entity plus score, lives and the wave counter, and
//! advances them one [`tick`](World::tick) at a time. A tick runs to
//! completion:
//!
//! 1. run the ship's state timers (respawn, end of invulnerability)
//! 2. steer the ship from the held controls and fire
//! 3. move every entity with toroidal wraparound and age projectiles
//! 4. resolve projectile and ship contacts with asteroids
//!
//! The world is seeded, so the same seed and inputs replay identically.

use crate::asteroid::{self, Asteroid, AsteroidTier};
use crate::collision::{self, Contact};
use crate::config::{GameConfig, GameplayConfig};
use crate::entity::{Entity, EntityId};
use crate::events::{FrameResult, GameEvent};
use crate::ship::ShipTransition;
use log::{debug, info, trace};
use pixel_engine::foundation::math::{Bounds2, Vec2};
use pixel_engine::input::Controls;
use pixel_engine::render::{PixelSurface, Rect};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

/// Depth of the band along each edge where wave asteroids appear
const EDGE_MARGIN: f32 = 40.0;

/// All game state
pub struct World {
    config: GameplayConfig,
    bounds: Bounds2,
    entities: SlotMap<EntityId, Entity>,
    ship: Option<EntityId>,
    score: u32,
    lives: u32,
    wave: u32,
    wave_pending: bool,
    game_over: bool,
    rng: StdRng,
    ticks: u64,
    elapsed: f32,
}

impl World {
    /// World with the ship at the centre and no asteroids
    pub fn empty(config: &GameConfig, seed: u64) -> Self {
        let gameplay = config.gameplay.clone();
        let bounds = config.screen.play_bounds();
        let mut entities = SlotMap::with_key();
        let ship = entities.insert(Entity::ship(bounds.center(), &gameplay));

        Self {
            lives: gameplay.starting_lives.min(gameplay.max_lives),
            config: gameplay,
            bounds,
            entities,
            ship: Some(ship),
            score: 0,
            wave: 0,
            wave_pending: false,
            game_over: false,
            rng: StdRng::seed_from_u64(seed),
            ticks: 0,
            elapsed: 0.0,
        }
    }

    /// Fresh game: the ship plus the first wave
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut world = Self::empty(config, seed);
        world.start_wave(&mut Vec::new());
        info!("New world (seed {}) with {} asteroids", seed, world.asteroid_count());
        world
    }

    /// Playfield size
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Gameplay tuning in use
    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }

    /// Current score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Current wave, 0 before the first one
    pub fn wave(&self) -> u32 {
        self.wave
    }

    /// Check if the game has ended
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ticks simulated so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds so far
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Speed multiplier applied to newly spawned asteroids
    pub fn speed_multiplier(&self) -> f32 {
        1.0 + self.config.wave_speed_step * self.wave.saturating_sub(1) as f32
    }

    /// Look up an entity
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Look up an entity for modification
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Every entity in arena order
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// The ship's id, `None` once the game is over
    pub fn ship_id(&self) -> Option<EntityId> {
        self.ship
    }

    /// The ship entity
    pub fn ship(&self) -> Option<&Entity> {
        self.ship.and_then(|id| self.entities.get(id))
    }

    /// The ship entity for modification
    pub fn ship_mut(&mut self) -> Option<&mut Entity> {
        self.ship.and_then(|id| self.entities.get_mut(id))
    }

    /// Live asteroids in arena order
    pub fn asteroids(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().filter(|(_, e)| e.is_asteroid())
    }

    /// Number of live asteroids
    pub fn asteroid_count(&self) -> usize {
        self.asteroids().count()
    }

    /// Number of live projectiles
    pub fn projectile_count(&self) -> usize {
        self.entities.values().filter(|e| e.is_projectile()).count()
    }

    /// Add an asteroid with a random look
    pub fn spawn_asteroid(
        &mut self,
        tier: AsteroidTier,
        position: Vec2,
        velocity: Vec2,
    ) -> EntityId {
        let asteroid = Asteroid::random(tier, &mut self.rng);
        let position = self.bounds.wrap(position);
        let id = self.entities.insert(Entity::asteroid(asteroid, position, velocity));
        trace!("Spawned {:?} asteroid {:?} at {:?}", tier, id, position);
        id
    }

    /// Add a projectile flying along `heading`
    pub fn spawn_projectile(&mut self, position: Vec2, heading: f32) -> EntityId {
        let position = self.bounds.wrap(position);
        self.entities.insert(Entity::projectile(position, heading, &self.config))
    }

    /// Remove an entity
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        if self.ship == Some(id) {
            self.ship = None;
        }
        self.entities.remove(id)
    }

    /// Advance the simulation by `dt` seconds with `controls` held
    ///
    /// `dt` is clamped to `[0, max_frame_time]`. A zero step changes
    /// nothing, and once the game is over the world stays frozen.
    pub fn tick(&mut self, dt: f32, controls: Controls) -> FrameResult {
        let mut events = Vec::new();
        if self.game_over {
            return self.result(events);
        }

        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_time)
        } else {
            0.0
        };
        if dt <= 0.0 {
            return self.result(events);
        }

        self.ticks += 1;
        self.elapsed += dt;

        if self.wave_pending && self.asteroid_count() == 0 {
            self.start_wave(&mut events);
        }

        self.update_ship(dt, controls, &mut events);
        if self.game_over {
            return self.result(events);
        }

        for entity in self.entities.values_mut() {
            entity.update(dt, &self.bounds);
        }
        self.entities.retain(|_, entity| !entity.is_expired());

        self.resolve_contacts(&mut events);
        self.result(events)
    }

    fn result(&self, events: Vec<GameEvent>) -> FrameResult {
        FrameResult {
            events,
            score: self.score,
            lives: self.lives,
            asteroid_count: self.asteroid_count(),
            game_over: self.game_over,
        }
    }

    fn update_ship(&mut self, dt: f32, controls: Controls, events: &mut Vec<GameEvent>) {
        let Some(id) = self.ship else {
            return;
        };
        let transition = match self.entities.get_mut(id).and_then(Entity::as_ship_mut) {
            Some(ship) => ship.advance_state(dt),
            None => return,
        };

        match transition {
            Some(ShipTransition::RespawnDue) if self.lives == 0 => {
                self.remove(id);
                self.game_over = true;
                info!("Game over: final score {}", self.score);
                events.push(GameEvent::GameOver);
                return;
            }
            Some(ShipTransition::RespawnDue) => {
                self.respawn_ship(id);
                events.push(GameEvent::ShipRespawned);
            }
            Some(ShipTransition::Vulnerable) => debug!("Ship invulnerability ended"),
            None => {}
        }

        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        entity.steer(controls, dt, &self.config);
        let fired = entity
            .trigger(dt, controls.contains(Controls::FIRE), self.config.fire_cooldown)
            .then(|| (entity.nose(), entity.heading));

        if let Some((nose, heading)) = fired {
            self.spawn_projectile(nose, heading);
            events.push(GameEvent::ProjectileFired);
        }
    }

    fn respawn_ship(&mut self, id: EntityId) {
        let center = self.bounds.center();
        let invulnerability_time = self.config.invulnerability_time;
        if let Some(entity) = self.entities.get_mut(id) {
            entity.position = center;
            entity.velocity = Vec2::zeros();
            entity.heading = 0.0;
            if let Some(ship) = entity.as_ship_mut() {
                ship.respawn(invulnerability_time);
            }
        }
        debug!("Ship respawned with {} lives", self.lives);
    }

    fn resolve_contacts(&mut self, events: &mut Vec<GameEvent>) {
        let contacts = collision::find_contacts(&self.entities, self.bounds);
        let had_asteroids = !contacts.is_empty() && self.asteroid_count() > 0;

        for contact in contacts {
            match contact {
                Contact::ProjectileHit { projectile, asteroid } => {
                    self.remove(projectile);
                    self.shatter(asteroid, events);
                }
                Contact::ShipHit { ship, .. } => self.crash_ship(ship, events),
            }
        }

        if had_asteroids && self.asteroid_count() == 0 {
            debug!("Field cleared, next wave on the following tick");
            self.wave_pending = true;
        }
    }

    fn shatter(&mut self, id: EntityId, events: &mut Vec<GameEvent>) {
        let Some(parent) = self.remove(id) else {
            return;
        };
        let Some(tier) = parent.tier() else {
            return;
        };

        let points = tier.points();
        self.add_score(points);

        match tier.split_into() {
            Some(child) => {
                let multiplier = self.speed_multiplier();
                let velocities =
                    asteroid::split_velocities(parent.velocity, child, multiplier, &mut self.rng);
                for velocity in velocities {
                    self.spawn_asteroid(child, parent.position, velocity);
                }
                events.push(GameEvent::AsteroidSplit { tier, points });
            }
            None => events.push(GameEvent::AsteroidDestroyed { tier, points }),
        }
    }

    fn crash_ship(&mut self, id: EntityId, events: &mut Vec<GameEvent>) {
        let respawn_delay = self.config.respawn_delay;
        let Some(entity) = self.entities.get_mut(id) else {
            return;
        };
        if !entity.as_ship_mut().is_some_and(|ship| ship.destroy(respawn_delay)) {
            return;
        }
        entity.velocity = Vec2::zeros();

        self.lives = self.lives.saturating_sub(1);
        debug!("Ship destroyed, {} lives left", self.lives);
        events.push(GameEvent::ShipDestroyed { lives_left: self.lives });
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points).min(self.config.max_score);
    }

    fn start_wave(&mut self, events: &mut Vec<GameEvent>) {
        self.wave += 1;
        self.wave_pending = false;

        let count = self.config.initial_asteroids + self.wave - 1;
        let multiplier = self.speed_multiplier();
        for _ in 0..count {
            let tier = AsteroidTier::pick(self.rng.gen());
            let position = self.edge_position();
            let velocity = asteroid::random_velocity(tier, multiplier, &mut self.rng);
            self.spawn_asteroid(tier, position, velocity);
        }

        info!("Wave {} started: {} asteroids at speed x{:.2}", self.wave, count, multiplier);
        events.push(GameEvent::WaveStarted { wave: self.wave });
    }

    /// Random position in the band along one of the four edges
    fn edge_position(&mut self) -> Vec2 {
        let Bounds2 { width, height } = self.bounds;
        let margin = EDGE_MARGIN.min(width / 2.0).min(height / 2.0);
        let rng = &mut self.rng;

        match rng.gen_range(0..4) {
            0 => Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..margin)),
            1 => Vec2::new(rng.gen_range(0.0..width), rng.gen_range(height - margin..height)),
            2 => Vec2::new(rng.gen_range(0.0..margin), rng.gen_range(0.0..height)),
            _ => Vec2::new(rng.gen_range(width - margin..width), rng.gen_range(0.0..height)),
        }
    }

    /// Draw every entity into the playfield area of `surface`
    ///
    /// The playfield starts `top` pixels down; drawing is clipped to it so
    /// wrapped silhouettes never spill into the HUD strip.
    pub fn draw(&self, surface: &mut PixelSurface, top: i32) {
        surface.set_clip(Rect::new(
            0,
            top,
            self.bounds.width as u32,
            self.bounds.height as u32,
        ));
        let origin = Vec2::new(0.0, top as f32);

        // Ship last so it stays on top
        for entity in self.entities.values().filter(|e| !e.is_ship()) {
            entity.draw(surface, origin, &self.bounds);
        }
        if let Some(ship) = self.ship() {
            ship.draw(surface, origin, &self.bounds);
        }

        surface.reset_clip();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipState;
    use approx::assert_relative_eq;
    use pixel_engine::render::Color;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::empty(&GameConfig::default(), 1)
    }

    #[test]
    fn test_new_world_spawns_first_wave() {
        let config = GameConfig::default();
        let world = World::new(&config, 42);
        assert_eq!(world.wave(), 1);
        assert_eq!(world.asteroid_count(), config.gameplay.initial_asteroids as usize);
        assert_eq!(world.lives(), 3);
        assert!(world.ship().is_some());
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = GameConfig::default();
        let mut a = World::new(&config, 9);
        let mut b = World::new(&config, 9);
        for _ in 0..120 {
            a.tick(DT, Controls::FIRE | Controls::ROTATE_LEFT);
            b.tick(DT, Controls::FIRE | Controls::ROTATE_LEFT);
        }
        let positions = |w: &World| w.entities().map(|(_, e)| e.position).collect::<Vec<_>>();
        assert_eq!(positions(&a), positions(&b));
        assert_eq!(a.score(), b.score());
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut world = world();
        let id =
            world.spawn_asteroid(AsteroidTier::Small, Vec2::new(10.0, 10.0), Vec2::new(15.0, 0.0));
        world.tick(10.0, Controls::empty());
        let x = world.get(id).unwrap().position.x;
        assert_relative_eq!(x, 10.0 + 15.0 / 15.0, epsilon = 1e-4);
        assert_relative_eq!(world.elapsed(), 1.0 / 15.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_and_nan_dt_are_noops() {
        let mut world = world();
        world.spawn_asteroid(AsteroidTier::Small, Vec2::new(10.0, 10.0), Vec2::new(15.0, 0.0));
        world.tick(-1.0, Controls::all());
        world.tick(f32::NAN, Controls::all());
        assert_eq!(world.ticks(), 0);
        assert_eq!(world.projectile_count(), 0);
    }

    #[test]
    fn test_firing_spawns_projectile_at_nose() {
        let mut world = world();
        let result = world.tick(DT, Controls::FIRE);
        assert!(result.has(|e| *e == GameEvent::ProjectileFired));
        assert_eq!(world.projectile_count(), 1);

        let ship = world.ship().unwrap().position;
        let (_, shot) = world.entities().find(|(_, e)| e.is_projectile()).unwrap();
        // Fired upwards from the nose
        assert!(shot.position.y < ship.y);
        assert!(shot.velocity.y < 0.0);

        // Held fire respects the cooldown
        let result = world.tick(DT, Controls::FIRE);
        assert!(!result.has(|e| *e == GameEvent::ProjectileFired));
    }

    #[test]
    fn test_projectiles_expire() {
        let mut world = world();
        world.tick(DT, Controls::FIRE);
        let lifetime = world.config().projectile_lifetime;
        let ticks = (lifetime / DT).ceil() as usize + 1;
        for _ in 0..ticks {
            world.tick(DT, Controls::empty());
        }
        assert_eq!(world.projectile_count(), 0);
    }

    #[test]
    fn test_crash_costs_one_life_and_respawns() {
        let mut world = world();
        let center = world.bounds().center();
        world.spawn_asteroid(AsteroidTier::Large, center, Vec2::zeros());

        let result = world.tick(DT, Controls::empty());
        assert!(result.has(|e| matches!(e, GameEvent::ShipDestroyed { lives_left: 2 })));
        assert_eq!(result.lives, 2);
        assert!(world.ship().unwrap().as_ship().unwrap().is_destroyed());

        // Still overlapping while exploding, but no further loss
        world.tick(DT, Controls::empty());
        assert_eq!(world.lives(), 2);

        let delay = world.config().respawn_delay;
        let mut respawned = false;
        for _ in 0..((delay / DT) as usize + 2) {
            respawned |= world.tick(DT, Controls::empty()).has(|e| *e == GameEvent::ShipRespawned);
        }
        assert!(respawned);

        let ship = world.ship().unwrap();
        assert!(matches!(ship.as_ship().unwrap().state(), ShipState::Invulnerable { .. }));
        assert_eq!(world.lives(), 2);
    }

    #[test]
    fn test_last_life_ends_the_game() {
        let mut config = GameConfig::default();
        config.gameplay.starting_lives = 1;
        let mut world = World::empty(&config, 1);
        let center = world.bounds().center();
        world.spawn_asteroid(AsteroidTier::Large, center, Vec2::zeros());

        world.tick(DT, Controls::empty());
        assert_eq!(world.lives(), 0);
        assert!(!world.is_game_over());

        let mut over = false;
        for _ in 0..200 {
            let result = world.tick(DT, Controls::empty());
            if result.game_over {
                over = result.has(|e| *e == GameEvent::GameOver);
                break;
            }
        }
        assert!(over);
        assert!(world.ship().is_none());

        // Frozen from now on
        let ticks = world.ticks();
        let result = world.tick(DT, Controls::all());
        assert!(result.events.is_empty());
        assert_eq!(world.ticks(), ticks);
    }

    #[test]
    fn test_score_saturates() {
        let mut config = GameConfig::default();
        config.gameplay.max_score = 120;
        let mut world = World::empty(&config, 1);
        world.add_score(100);
        world.add_score(100);
        assert_eq!(world.score(), 120);
    }

    #[test]
    fn test_cleared_field_starts_next_wave() {
        let mut world = world();
        let far = Vec2::new(20.0, 20.0);
        world.spawn_asteroid(AsteroidTier::Small, far, Vec2::zeros());
        world.spawn_projectile(far, 0.0);

        let result = world.tick(DT, Controls::empty());
        assert_eq!(result.asteroid_count, 0);
        assert_eq!(result.score, AsteroidTier::Small.points());

        let result = world.tick(DT, Controls::empty());
        assert!(result.has(|e| *e == GameEvent::WaveStarted { wave: 1 }));
        assert_eq!(world.wave(), 1);
        assert!(world.asteroid_count() > 0);
        assert!(world.asteroids().all(|(_, a)| world.bounds().contains(a.position)));
    }

    #[test]
    fn test_waves_speed_up() {
        let mut world = world();
        assert_relative_eq!(world.speed_multiplier(), 1.0);
        world.start_wave(&mut Vec::new());
        world.start_wave(&mut Vec::new());
        assert_eq!(world.wave(), 2);
        assert_relative_eq!(world.speed_multiplier(), 1.15, epsilon = 1e-6);
    }

    #[test]
    fn test_draw_keeps_hud_clear() {
        let mut world = world();
        world.spawn_asteroid(AsteroidTier::Large, Vec2::new(50.0, 1.0), Vec2::zeros());

        let mut surface = PixelSurface::new(192, 160);
        world.draw(&mut surface, 15);

        let hud_lit = (0..15)
            .flat_map(|y| (0..192).map(move |x| (x, y)))
            .any(|(x, y)| surface.get_pixel(x, y) != Some(Color::BLACK));
        assert!(!hud_lit);

        // Ship at the centre of the playfield
        let center = world.bounds().center();
        assert_ne!(
            surface.get_pixel(center.x as i32, center.y as i32 + 15),
            Some(Color::BLACK)
        );
        assert_eq!(surface.clip(), surface.bounds());
    }
}
