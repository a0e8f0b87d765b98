//! Collision shapes
//!
//! Everything in a retro arcade playfield collides as a circle. Distances
//! are measured along the shortest wrapped path, so two objects hugging
//! opposite edges are neighbours.

use crate::foundation::math::{Bounds2, Vec2};

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "collision radius must be positive, got {radius}");
        Self { center, radius }
    }

    /// Check if this circle intersects with another in flat space
    ///
    /// Circles that merely touch do not intersect.
    pub fn intersects(&self, other: &Self) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Check if this circle intersects with another on a wrapped playfield
    pub fn intersects_wrapped(&self, other: &Self, bounds: &Bounds2) -> bool {
        let distance_squared = bounds.distance_squared(self.center, other.center);
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_intersection() {
        let a = BoundingCircle::new(Vec2::new(0.0, 0.0), 5.0);
        let b = BoundingCircle::new(Vec2::new(8.0, 0.0), 5.0);
        let c = BoundingCircle::new(Vec2::new(10.0, 0.0), 5.0);
        assert!(a.intersects(&b));
        // Touching is not overlapping
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_wrapped_intersection_across_edge() {
        let bounds = Bounds2::new(100.0, 80.0);
        let left = BoundingCircle::new(Vec2::new(1.0, 40.0), 2.0);
        let right = BoundingCircle::new(Vec2::new(98.0, 40.0), 2.0);
        assert!(!left.intersects(&right));
        assert!(left.intersects_wrapped(&right, &bounds));
    }

    #[test]
    fn test_wrapped_intersection_across_corner() {
        let bounds = Bounds2::new(100.0, 80.0);
        let top_left = BoundingCircle::new(Vec2::new(0.5, 0.5), 1.0);
        let bottom_right = BoundingCircle::new(Vec2::new(99.5, 79.5), 1.0);
        assert!(top_left.intersects_wrapped(&bottom_right, &bounds));
    }
}
