//! Asteroids and their size tiers

use crate::entity::{Entity, EntityKind};
use pixel_engine::foundation::math::{heading_vector, rotate, Vec2};
use pixel_engine::render::{Color, PixelSurface};
use rand::Rng;
use std::f32::consts::TAU;

/// Vertices in a jagged asteroid outline
const OUTLINE_VERTICES: usize = 9;

/// Range of a vertex's distance from the centre, in units of the radius
const OUTLINE_ROUGHNESS: std::ops::Range<f32> = 0.75..1.0;

/// Range of the angle each fragment of a split leaves the parent's course at
const SPLIT_SPREAD: std::ops::Range<f32> = 0.35..0.8;

/// Asteroid size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsteroidTier {
    /// Large asteroid (splits into medium)
    Large,

    /// Medium asteroid (splits into small)
    Medium,

    /// Small asteroid (destroyed completely)
    Small,
}

impl AsteroidTier {
    /// Every tier, largest first
    pub const ALL: [Self; 3] = [Self::Large, Self::Medium, Self::Small];

    /// Collision radius
    pub fn radius(self) -> f32 {
        match self {
            Self::Large => 7.0,
            Self::Medium => 4.5,
            Self::Small => 3.5,
        }
    }

    /// Get the points awarded for destroying this size
    pub fn points(self) -> u32 {
        match self {
            Self::Large => 20,
            Self::Medium => 50,
            Self::Small => 100,
        }
    }

    /// Get the next smaller size when split
    pub fn split_into(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }

    /// Base speed range in pixels per second
    pub fn speed_range(self) -> std::ops::Range<f32> {
        match self {
            Self::Large => 6.0..9.0,
            Self::Medium => 9.0..12.0,
            Self::Small => 12.0..18.0,
        }
    }

    /// Chance of this tier when a wave spawns
    pub fn spawn_weight(self) -> f32 {
        match self {
            Self::Large => 0.6,
            Self::Medium => 0.3,
            Self::Small => 0.1,
        }
    }

    /// Pick a tier from a uniform roll in `[0, 1)`
    pub fn pick(roll: f32) -> Self {
        let mut cumulative = 0.0;
        for tier in Self::ALL {
            cumulative += tier.spawn_weight();
            if roll < cumulative {
                return tier;
            }
        }
        Self::Small
    }
}

/// Asteroid-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct Asteroid {
    tier: AsteroidTier,
    color: Color,
    outline: Vec<f32>,
    spin: f32,
}

impl Asteroid {
    /// Create an asteroid with an explicit look
    ///
    /// `outline` holds each vertex's distance from the centre in units of
    /// the radius; fewer than three vertices fall back to a round outline.
    pub fn new(tier: AsteroidTier, color: Color, outline: Vec<f32>, spin: f32) -> Self {
        let outline = if outline.len() < 3 {
            vec![1.0; OUTLINE_VERTICES]
        } else {
            outline
        };
        Self {
            tier,
            color,
            outline,
            spin,
        }
    }

    /// Round, grey, non-spinning asteroid
    pub fn plain(tier: AsteroidTier) -> Self {
        Self::new(tier, Color::GREY, Vec::new(), 0.0)
    }

    /// Asteroid with a random color, outline and spin
    pub fn random(tier: AsteroidTier, rng: &mut impl Rng) -> Self {
        let mut channel = || rng.gen_range(64..192);
        let color = Color::rgb(channel(), channel(), channel());
        let outline = (0..OUTLINE_VERTICES).map(|_| rng.gen_range(OUTLINE_ROUGHNESS)).collect();
        let spin = rng.gen_range(-1.0..1.0);
        Self::new(tier, color, outline, spin)
    }

    /// Size tier
    pub fn tier(&self) -> AsteroidTier {
        self.tier
    }

    /// Fill color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Spin in radians per second
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub(crate) fn draw(&self, surface: &mut PixelSurface, center: Vec2, heading: f32, radius: f32) {
        let step = TAU / self.outline.len() as f32;
        let points: Vec<Vec2> = self
            .outline
            .iter()
            .enumerate()
            .map(|(i, &scale)| {
                center + rotate(Vec2::new(0.0, -radius * scale), heading + i as f32 * step)
            })
            .collect();
        surface.draw_filled_polygon(&points, self.color);
    }
}

impl Entity {
    /// Create an asteroid entity; the radius follows the tier
    pub fn asteroid(asteroid: Asteroid, position: Vec2, velocity: Vec2) -> Self {
        Self {
            radius: asteroid.tier().radius(),
            kind: EntityKind::Asteroid(asteroid),
            position,
            velocity,
            heading: 0.0,
        }
    }

    /// Asteroid tier, if this is an asteroid
    pub fn tier(&self) -> Option<AsteroidTier> {
        self.as_asteroid().map(Asteroid::tier)
    }
}

/// Random drift for a freshly spawned asteroid
pub fn random_velocity(tier: AsteroidTier, speed_multiplier: f32, rng: &mut impl Rng) -> Vec2 {
    let speed = rng.gen_range(tier.speed_range()) * speed_multiplier;
    heading_vector(rng.gen_range(0.0..TAU)) * speed
}

/// Velocities of the two fragments of a split asteroid
///
/// The fragments leave at mirrored angles either side of the parent's
/// course, never slower than the parent, so they always diverge.
pub fn split_velocities(
    parent: Vec2,
    child: AsteroidTier,
    speed_multiplier: f32,
    rng: &mut impl Rng,
) -> [Vec2; 2] {
    let parent_speed = parent.magnitude();
    let course = if parent_speed > f32::EPSILON {
        parent / parent_speed
    } else {
        heading_vector(rng.gen_range(0.0..TAU))
    };
    let speed = (rng.gen_range(child.speed_range()) * speed_multiplier).max(parent_speed);
    let spread = rng.gen_range(SPLIT_SPREAD);

    [rotate(course, spread) * speed, rotate(course, -spread) * speed]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tier_table() {
        assert_eq!(AsteroidTier::Large.points(), 20);
        assert_eq!(AsteroidTier::Medium.points(), 50);
        assert_eq!(AsteroidTier::Small.points(), 100);

        assert_eq!(AsteroidTier::Large.split_into(), Some(AsteroidTier::Medium));
        assert_eq!(AsteroidTier::Medium.split_into(), Some(AsteroidTier::Small));
        assert_eq!(AsteroidTier::Small.split_into(), None);

        assert!(AsteroidTier::Large.radius() > AsteroidTier::Medium.radius());
        assert!(AsteroidTier::Medium.radius() > AsteroidTier::Small.radius());
    }

    #[test]
    fn test_pick_follows_weights() {
        assert_eq!(AsteroidTier::pick(0.0), AsteroidTier::Large);
        assert_eq!(AsteroidTier::pick(0.59), AsteroidTier::Large);
        assert_eq!(AsteroidTier::pick(0.61), AsteroidTier::Medium);
        assert_eq!(AsteroidTier::pick(0.95), AsteroidTier::Small);
        assert_eq!(AsteroidTier::pick(0.999_999), AsteroidTier::Small);
    }

    #[test]
    fn test_random_asteroid_look() {
        let mut rng = StdRng::seed_from_u64(7);
        let asteroid = Asteroid::random(AsteroidTier::Medium, &mut rng);
        let Color { r, g, b } = asteroid.color();
        assert!([r, g, b].iter().all(|c| (64..192).contains(c)));
        assert_eq!(asteroid.outline.len(), OUTLINE_VERTICES);
        assert!(asteroid.outline.iter().all(|s| OUTLINE_ROUGHNESS.contains(s)));
    }

    #[test]
    fn test_random_velocity_in_tier_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for tier in AsteroidTier::ALL {
            let range = tier.speed_range();
            let speed = random_velocity(tier, 2.0, &mut rng).magnitude();
            assert!(speed >= range.start * 2.0 - 1e-3 && speed <= range.end * 2.0 + 1e-3);
        }
    }

    #[test]
    fn test_split_fragments_diverge() {
        let mut rng = StdRng::seed_from_u64(3);
        let parent = Vec2::new(8.0, 0.0);
        let [a, b] = split_velocities(parent, AsteroidTier::Medium, 1.0, &mut rng);

        assert!(a.magnitude() >= parent.magnitude());
        assert_relative_eq!(a.magnitude(), b.magnitude(), epsilon = 1e-4);
        // Mirrored about the parent's course
        assert_relative_eq!(a.x, b.x, epsilon = 1e-4);
        assert!(a.y * b.y < 0.0);
    }

    #[test]
    fn test_split_from_rest_still_diverges() {
        let mut rng = StdRng::seed_from_u64(5);
        let [a, b] = split_velocities(Vec2::zeros(), AsteroidTier::Small, 1.0, &mut rng);
        assert!(a.magnitude() > 0.0);
        assert!((a - b).magnitude() > 1.0);
    }

    #[test]
    fn test_entity_radius_matches_tier() {
        for tier in AsteroidTier::ALL {
            let entity = Entity::asteroid(Asteroid::plain(tier), Vec2::zeros(), Vec2::zeros());
            assert_eq!(entity.radius, tier.radius());
            assert_eq!(entity.tier(), Some(tier));
        }
    }
}
