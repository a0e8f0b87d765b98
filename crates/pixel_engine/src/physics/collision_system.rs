//! Core collision detection system
//!
//! Split into the usual two phases: a broad phase that discards pairs whose
//! layers never interact, and a narrow phase that runs the wrapped
//! circle-circle test on what remains.
//!
//! The system is rebuilt every frame from the live colliders and does not
//! know what a collider's key refers to, so it can be fed straight from an
//! entity arena.

use crate::foundation::math::Bounds2;
use crate::physics::collision::BoundingCircle;
use crate::physics::collision_layers::CollisionLayers;

/// Collider registered with the system for one frame
#[derive(Debug, Clone, Copy)]
pub struct Collider<K> {
    /// Caller-defined identifier, e.g. an entity key
    pub key: K,
    /// Collision shape
    pub shape: BoundingCircle,
    /// Layer this collider sits on
    pub layer: CollisionLayers,
    /// Layers this collider wants to touch
    pub mask: CollisionLayers,
}

/// Pair of colliders that overlap this frame
///
/// `first` was registered before `second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair<K> {
    /// Earlier-registered collider
    pub first: K,
    /// Later-registered collider
    pub second: K,
}

/// Per-frame collision detection over a wrapped playfield
pub struct CollisionSystem<K> {
    bounds: Bounds2,
    colliders: Vec<Collider<K>>,
    pairs: Vec<CollisionPair<K>>,
}

impl<K: Copy> CollisionSystem<K> {
    /// Create a new collision system for the given playfield
    pub fn new(bounds: Bounds2) -> Self {
        Self {
            bounds,
            colliders: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Register a collider for the current frame
    pub fn register(&mut self, collider: Collider<K>) {
        self.colliders.push(collider);
    }

    /// Perform collision detection (broad-phase + narrow-phase)
    ///
    /// Pairs come back ordered by the registration index of `first`, then of
    /// `second`, so callers resolving "first match wins" get a result tied
    /// to registration order and nothing else.
    pub fn detect(&mut self) -> &[CollisionPair<K>] {
        self.pairs.clear();

        for (i, a) in self.colliders.iter().enumerate() {
            for b in &self.colliders[i + 1..] {
                // Broad phase: layer filtering
                if !CollisionLayers::should_collide(a.layer, a.mask, b.layer, b.mask) {
                    continue;
                }

                // Narrow phase: wrapped circle test
                if a.shape.intersects_wrapped(&b.shape, &self.bounds) {
                    self.pairs.push(CollisionPair { first: a.key, second: b.key });
                }
            }
        }

        &self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;

    fn collider(
        key: u32,
        x: f32,
        y: f32,
        radius: f32,
        layer: CollisionLayers,
        mask: CollisionLayers,
    ) -> Collider<u32> {
        Collider {
            key,
            shape: BoundingCircle::new(Vec2::new(x, y), radius),
            layer,
            mask,
        }
    }

    fn enemy(key: u32, x: f32, y: f32) -> Collider<u32> {
        let mask = CollisionLayers::PLAYER | CollisionLayers::PROJECTILE;
        collider(key, x, y, 5.0, CollisionLayers::ENEMY, mask)
    }

    fn bullet(key: u32, x: f32, y: f32) -> Collider<u32> {
        collider(key, x, y, 1.0, CollisionLayers::PROJECTILE, CollisionLayers::ENEMY)
    }

    #[test]
    fn test_collision_detection() {
        let mut system = CollisionSystem::new(Bounds2::new(200.0, 200.0));
        system.register(enemy(1, 50.0, 50.0));
        system.register(bullet(2, 53.0, 50.0));

        let pairs = system.detect();
        assert_eq!(pairs, &[CollisionPair { first: 1, second: 2 }]);
    }

    #[test]
    fn test_layer_filtering() {
        let mut system = CollisionSystem::new(Bounds2::new(200.0, 200.0));
        // Overlapping enemies ignore each other
        system.register(enemy(1, 50.0, 50.0));
        system.register(enemy(2, 52.0, 50.0));
        // Overlapping bullets ignore each other
        system.register(bullet(3, 100.0, 100.0));
        system.register(bullet(4, 100.5, 100.0));

        assert!(system.detect().is_empty());
    }

    #[test]
    fn test_detection_across_wrap() {
        let mut system = CollisionSystem::new(Bounds2::new(200.0, 200.0));
        system.register(enemy(1, 2.0, 100.0));
        system.register(bullet(2, 198.0, 100.0));
        assert_eq!(system.detect().len(), 1);
    }

    #[test]
    fn test_pairs_follow_registration_order() {
        let mut system = CollisionSystem::new(Bounds2::new(200.0, 200.0));
        system.register(bullet(10, 50.0, 50.0));
        system.register(enemy(20, 52.0, 50.0));
        system.register(enemy(30, 48.0, 50.0));

        let pairs = system.detect().to_vec();
        assert_eq!(pairs[0], CollisionPair { first: 10, second: 20 });
        assert_eq!(pairs[1], CollisionPair { first: 10, second: 30 });
    }
}
