//! Pixel surface and drawing primitives
//!
//! A fixed-size grid of [`Color`] values. Drawing never fails: anything
//! outside the surface (or outside the active clip rectangle) is silently
//! dropped.

use image::imageops;
use std::path::Path;

use crate::foundation::math::Vec2;
use crate::render::text::Glyph;
use crate::render::{Color, Rect};

/// Longest side of an exported image
const MAX_EXPORT_SIDE: u32 = 16_384;

/// Errors that can occur when exporting a surface
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    /// The pixel data did not match the surface size
    #[error("Surface of {width}x{height} could not be converted to an image")]
    Conversion {
        /// Surface width
        width: u32,
        /// Surface height
        height: u32,
    },

    /// The upscaled image would be too large to allocate
    #[error("Cannot scale a {width}x{height} surface by {scale}")]
    ScaleTooLarge {
        /// Surface width
        width: u32,
        /// Surface height
        height: u32,
        /// Requested scale factor
        scale: u32,
    },

    /// Image encoding or file write failed
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

/// CPU frame buffer
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
    clip: Rect,
}

impl PixelSurface {
    /// Create a black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width as usize) * (height as usize)],
            clip: Rect::new(0, 0, width, height),
        }
    }

    /// Surface width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Surface height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Full surface rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Row-major pixel data
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Restrict drawing to `rect` (intersected with the surface)
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersect(&self.bounds());
    }

    /// Allow drawing anywhere on the surface again
    pub fn reset_clip(&mut self) {
        self.clip = self.bounds();
    }

    /// Current clip rectangle
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Fill the whole surface, ignoring the clip rectangle
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Set a single pixel; out-of-bounds or clipped writes are ignored
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.clip.contains(x, y) {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = color;
        }
    }

    /// Read a pixel, `None` if out of bounds
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.bounds().contains(x, y) {
            Some(self.pixels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Fill a rectangle
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let area = rect.intersect(&self.clip);
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set_pixel(x, y, color);
            }
        }
    }

    /// Draw a line with Bresenham's algorithm, both endpoints inclusive
    ///
    /// The line is first clipped to the clip rectangle, so endpoints far
    /// off the surface cost nothing extra.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let Some([x0, y0, x1, y1]) = clip_line(self.clip, [x0, y0, x1, y1]) else {
            return;
        };
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set_pixel(x as i32, y as i32, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill a polygon with the even-odd rule
    ///
    /// A pixel is filled when its centre lies inside the polygon. Works for
    /// concave outlines such as jagged asteroids.
    pub fn draw_filled_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let (min_y, max_y) = points
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
        let first_row = (min_y.floor() as i32).max(self.clip.y);
        let last_row = (max_y.ceil() as i32).min(self.clip.bottom() - 1);

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for row in first_row..=last_row {
            let sample_y = row as f32 + 0.5;
            crossings.clear();

            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let spans =
                    (a.y <= sample_y && sample_y < b.y) || (b.y <= sample_y && sample_y < a.y);
                if spans {
                    let t = (sample_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f32::total_cmp);

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil() as i32;
                let end = (span[1] - 0.5).ceil() as i32;
                for x in start.max(self.clip.x)..end.min(self.clip.right()) {
                    self.set_pixel(x, row, color);
                }
            }
        }
    }

    /// Draw a circle outline with the midpoint algorithm
    pub fn draw_circle_outline(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius <= 0 {
            self.set_pixel(cx, cy, color);
            return;
        }

        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;
        while x >= y {
            let octants = [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)];
            for (px, py) in octants {
                self.set_pixel(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    /// Copy a glyph bitmap with its top-left corner at `(x, y)`
    pub fn blit_glyph(&mut self, glyph: &Glyph, x: i32, y: i32, color: Color) {
        for row in 0..glyph.height() {
            for col in 0..glyph.width() {
                if glyph.is_set(col, row) {
                    self.set_pixel(x + i32::from(col), y + i32::from(row), color);
                }
            }
        }
    }

    /// Packed RGB8 bytes, row-major
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    /// Convert to an `image` buffer for presentation or export
    pub fn to_image(&self) -> Result<image::RgbImage, SurfaceError> {
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            SurfaceError::Conversion {
                width: self.width,
                height: self.height,
            },
        )
    }

    /// Save the surface as a PNG file, optionally scaled up by an integer factor
    pub fn save_png(&self, path: impl AsRef<Path>, scale: u32) -> Result<(), SurfaceError> {
        let mut image = self.to_image()?;
        if scale > 1 {
            let too_large = SurfaceError::ScaleTooLarge {
                width: self.width,
                height: self.height,
                scale,
            };
            let side = |extent: u32| extent.checked_mul(scale).filter(|&s| s <= MAX_EXPORT_SIDE);
            let (Some(width), Some(height)) = (side(self.width), side(self.height)) else {
                return Err(too_large);
            };
            image = imageops::resize(&image, width, height, imageops::FilterType::Nearest);
        }
        image.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Clip a segment to `clip` (Liang-Barsky), returning endpoints inside it
///
/// Coordinates come back widened to `i64` so the line stepper never
/// overflows. Endpoints already inside the rectangle are returned unchanged.
fn clip_line(clip: Rect, [x0, y0, x1, y1]: [i32; 4]) -> Option<[i64; 4]> {
    if clip.is_empty() {
        return None;
    }
    let (x0, y0) = (i64::from(x0), i64::from(y0));
    let (dx, dy) = (i64::from(x1) - x0, i64::from(y1) - y0);
    let (left, top) = (i64::from(clip.x), i64::from(clip.y));
    let (right, bottom) = (i64::from(clip.right()) - 1, i64::from(clip.bottom()) - 1);

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [(-dx, x0 - left), (dx, right - x0), (-dy, y0 - top), (dy, bottom - y0)] {
        if p == 0 {
            if q < 0 {
                return None;
            }
            continue;
        }
        let r = q as f64 / p as f64;
        if p < 0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64, start: i64, delta: i64, lo: i64, hi: i64| {
        ((start as f64 + t * delta as f64).round() as i64).clamp(lo, hi)
    };
    Some([
        at(t0, x0, dx, left, right),
        at(t0, y0, dy, top, bottom),
        at(t1, x0, dx, left, right),
        at(t1, y0, dy, top, bottom),
    ])
}
