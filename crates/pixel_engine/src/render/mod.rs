//! Software rendering
//!
//! Everything is drawn on the CPU into a [`PixelSurface`]. The platform
//! layer presents the finished surface however it likes; the engine never
//! depends on how that happens.

pub mod surface;
pub mod text;

pub use surface::{PixelSurface, SurfaceError};

use serde::{Deserialize, Serialize};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Color {
    /// Black
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pure red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Orange
    pub const ORANGE: Self = Self::rgb(255, 165, 0);
    /// Mid grey
    pub const GREY: Self = Self::rgb(128, 128, 128);

    /// Create a color from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`)
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * f).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// One past the right edge, saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    /// One past the bottom edge, saturating at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    /// Check if a pixel lies inside
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles (empty if disjoint)
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let extent =
            |from: i32, to: i32| u32::try_from(i64::from(to) - i64::from(from)).unwrap_or(0);
        Self::new(x, y, extent(x, right), extent(y, bottom))
    }

    /// Check if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, -5, 10, 10);
        assert_eq!(a.intersect(&b), Rect::new(5, 0, 5, 5));
        assert!(a.intersect(&Rect::new(20, 20, 5, 5)).is_empty());
    }

    #[test]
    fn test_rect_edges_saturate() {
        let far = Rect::new(i32::MAX, 0, 10, 10);
        assert_eq!(far.right(), i32::MAX);
        assert!(!far.contains(i32::MAX, 0));

        let wide = Rect::new(i32::MIN, i32::MIN, u32::MAX, u32::MAX);
        assert_eq!(wide.right(), i32::MAX);
        assert_eq!(wide.intersect(&Rect::new(0, 0, 4, 4)), Rect::new(0, 0, 4, 4));
        assert!(far.intersect(&Rect::new(0, 0, 4, 4)).is_empty());
    }

    #[test]
    fn test_color_scaled() {
        assert_eq!(Color::WHITE.scaled(0.5), Color::rgb(128, 128, 128));
        assert_eq!(Color::RED.scaled(2.0), Color::RED);
    }
}
