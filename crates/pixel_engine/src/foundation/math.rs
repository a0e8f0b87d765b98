//! Math utilities and types
//!
//! Provides the 2D vector types used by the engine plus the toroidal
//! ("wrap-around") arithmetic retro arcade playfields are built on.

pub use nalgebra::{Vector2, Rotation2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Wrap a scalar into `[0, extent)`
///
/// `rem_euclid` can round up to exactly `extent` for tiny negative inputs, so
/// that case is folded back to zero.
pub fn wrap_scalar(value: f32, extent: f32) -> f32 {
    debug_assert!(extent > 0.0, "wrap extent must be positive");
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed offset from `from` to `to` on a circle of length `extent`
pub fn wrapped_delta(from: f32, to: f32, extent: f32) -> f32 {
    let delta = to - from;
    delta - extent * (delta / extent).round()
}

/// Unit vector for a heading angle in radians
///
/// Heading 0 points up the screen (negative y) and positive angles turn
/// clockwise, matching screen coordinates where y grows downwards.
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Rotate a vector by `angle` radians
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Rotation2::new(angle) * v
}

/// Normalize an angle into `[0, 2π)`
pub fn normalize_angle(angle: f32) -> f32 {
    wrap_scalar(angle, std::f32::consts::TAU)
}

/// Size of a toroidal 2D space
///
/// Everything that leaves one edge re-enters from the opposite edge, so
/// positions are taken modulo `width`/`height` and distances use the
/// shortest wrapped path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Bounds2 {
    /// Create new bounds
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center point of the space
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Wrap a position into `[0, width) x [0, height)`
    pub fn wrap(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            wrap_scalar(position.x, self.width),
            wrap_scalar(position.y, self.height),
        )
    }

    /// Check that a position lies inside the half-open bounds
    pub fn contains(&self, position: Vec2) -> bool {
        (0.0..self.width).contains(&position.x) && (0.0..self.height).contains(&position.y)
    }

    /// Shortest offset from `from` to `to` across the wrapped space
    pub fn delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        Vec2::new(
            wrapped_delta(from.x, to.x, self.width),
            wrapped_delta(from.y, to.y, self.height),
        )
    }

    /// Squared shortest distance between two points
    pub fn distance_squared(&self, a: Vec2, b: Vec2) -> f32 {
        self.delta(a, b).magnitude_squared()
    }

    /// Offsets at which an object of `radius` centred at `position` must be
    /// drawn so that it appears on every edge it straddles
    ///
    /// Always contains the zero offset first.
    pub fn wrap_offsets(&self, position: Vec2, radius: f32) -> Vec<Vec2> {
        let mut xs = vec![0.0];
        if position.x - radius < 0.0 {
            xs.push(self.width);
        }
        if position.x + radius >= self.width {
            xs.push(-self.width);
        }

        let mut ys = vec![0.0];
        if position.y - radius < 0.0 {
            ys.push(self.height);
        }
        if position.y + radius >= self.height {
            ys.push(-self.height);
        }

        ys.iter()
            .flat_map(|&dy| xs.iter().map(move |&dx| Vec2::new(dx, dy)))
            .collect()
    }
}
