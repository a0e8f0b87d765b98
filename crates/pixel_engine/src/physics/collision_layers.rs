//! Collision layer system for filtering collision detection
//!
//! Each collider sits on one layer and carries a mask of the layers it wants
//! to touch. A pair is only tested when each side's layer is in the other
//! side's mask.

bitflags::bitflags! {
    /// Collision layer definitions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CollisionLayers: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;
        /// Enemy and hazard layer
        const ENEMY = 1 << 1;
        /// Projectiles (bullets, missiles, etc.)
        const PROJECTILE = 1 << 2;
        /// Pickups and collectibles
        const PICKUP = 1 << 3;
    }
}

impl CollisionLayers {
    /// Check if two colliders should be tested against each other
    ///
    /// # Example
    /// ```
    /// use pixel_engine::physics::CollisionLayers;
    ///
    /// // Player collides with enemies, enemies collide with players and projectiles
    /// assert!(CollisionLayers::should_collide(
    ///     CollisionLayers::PLAYER,
    ///     CollisionLayers::ENEMY,
    ///     CollisionLayers::ENEMY,
    ///     CollisionLayers::PLAYER | CollisionLayers::PROJECTILE,
    /// ));
    /// ```
    pub fn should_collide(layer_a: Self, mask_a: Self, layer_b: Self, mask_b: Self) -> bool {
        // A's layer must be in B's mask AND B's layer must be in A's mask
        mask_b.intersects(layer_a) && mask_a.intersects(layer_b)
    }
}
