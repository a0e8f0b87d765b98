//! Bitmap text rendering
//!
//! Two built-in fonts cover a retro HUD:
//!
//! - [`FontVariant::Score`]: 3x5 digits, for score and lives counters
//! - [`FontVariant::Text`]: 5x7 digits, uppercase letters and space
//!
//! Glyphs are laid out left to right with a fixed advance. Characters a font
//! cannot render are skipped and take up no room, so drawing never fails.
//!
//! # Example
//!
//! ```
//! use pixel_engine::render::{Color, PixelSurface};
//! use pixel_engine::render::text::{BitmapFont, FontVariant};
//!
//! let mut surface = PixelSurface::new(64, 16);
//! let font = BitmapFont::new(FontVariant::Score);
//! let width = font.draw_text(&mut surface, "1230", 0, 0, Color::RED);
//! assert_eq!(width, font.text_width("1230"));
//! ```

mod glyphs;

use crate::render::{Color, PixelSurface};

/// A fixed-size 1-bit glyph bitmap
///
/// Each row is a bit pattern whose most significant used bit is the
/// leftmost pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    width: u8,
    rows: &'static [u8],
}

impl Glyph {
    /// Create a glyph from row bit patterns
    pub const fn new(width: u8, rows: &'static [u8]) -> Self {
        Self { width, rows }
    }

    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.rows.len() as u8
    }

    /// Check whether the pixel at `(col, row)` is set
    pub fn is_set(&self, col: u8, row: u8) -> bool {
        if col >= self.width {
            return false;
        }
        self.rows
            .get(usize::from(row))
            .is_some_and(|bits| (bits >> (self.width - 1 - col)) & 1 == 1)
    }
}

/// Which built-in font to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontVariant {
    /// Small digits-only font
    Score,
    /// Larger font with digits, uppercase letters and space
    Text,
}

/// A built-in bitmap font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    variant: FontVariant,
    glyph_width: u32,
    glyph_height: u32,
    spacing: u32,
}

impl BitmapFont {
    /// Load a built-in font
    pub const fn new(variant: FontVariant) -> Self {
        match variant {
            FontVariant::Score => Self {
                variant,
                glyph_width: glyphs::SCORE_WIDTH as u32,
                glyph_height: glyphs::SCORE_HEIGHT as u32,
                spacing: 2,
            },
            FontVariant::Text => Self {
                variant,
                glyph_width: glyphs::TEXT_WIDTH as u32,
                glyph_height: glyphs::TEXT_HEIGHT as u32,
                spacing: 1,
            },
        }
    }

    /// Font variant
    pub const fn variant(&self) -> FontVariant {
        self.variant
    }

    /// Height of every glyph in pixels
    pub const fn line_height(&self) -> u32 {
        self.glyph_height
    }

    /// Horizontal distance between the starts of consecutive glyphs
    pub const fn advance(&self) -> u32 {
        self.glyph_width + self.spacing
    }

    /// Look up the glyph for a character
    pub fn glyph(&self, c: char) -> Option<Glyph> {
        match self.variant {
            FontVariant::Score => glyphs::score_glyph(c),
            FontVariant::Text => glyphs::text_glyph(c),
        }
    }

    /// Width in pixels of `text` once unsupported characters are dropped
    pub fn text_width(&self, text: &str) -> u32 {
        let count = text.chars().filter(|&c| self.glyph(c).is_some()).count() as u32;
        if count == 0 {
            0
        } else {
            count * self.glyph_width + (count - 1) * self.spacing
        }
    }

    /// Draw text with its top-left corner at `(x, y)`, returning the width drawn
    pub fn draw_text(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
    ) -> u32 {
        let mut cursor = x;
        for glyph in text.chars().filter_map(|c| self.glyph(c)) {
            surface.blit_glyph(&glyph, cursor, y, color);
            cursor += self.advance() as i32;
        }
        self.text_width(text)
    }

    /// Draw text so that it ends just before `right_x`
    pub fn draw_text_right_aligned(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        right_x: i32,
        y: i32,
        color: Color,
    ) {
        let x = right_x - self.text_width(text) as i32;
        self.draw_text(surface, text, x, y, color);
    }

    /// Draw text horizontally centred on `center_x`
    pub fn draw_text_centered(
        &self,
        surface: &mut PixelSurface,
        text: &str,
        center_x: i32,
        y: i32,
        color: Color,
    ) {
        let x = center_x - (self.text_width(text) / 2) as i32;
        self.draw_text(surface, text, x, y, color);
    }
}

/// Draw `text` with a built-in font, returning the width drawn
pub fn draw_text(
    surface: &mut PixelSurface,
    text: &str,
    x: i32,
    y: i32,
    variant: FontVariant,
    color: Color,
) -> u32 {
    BitmapFont::new(variant).draw_text(surface, text, x, y, color)
}
