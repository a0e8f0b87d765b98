//! Heads-up display and full-screen messages

use pixel_engine::render::text::{BitmapFont, FontVariant};
use pixel_engine::render::{Color, PixelSurface};

/// Score and lives color
pub const HUD_COLOR: Color = Color::RED;

/// Message color
pub const TEXT_COLOR: Color = Color::WHITE;

/// Gap between the top of the screen and the counters
const TOP_MARGIN: i32 = 3;

/// Gap between the right edge of the screen and the lives counter
const LIVES_RIGHT_MARGIN: i32 = 10;

const SCORE_FONT: BitmapFont = BitmapFont::new(FontVariant::Score);
const TEXT_FONT: BitmapFont = BitmapFont::new(FontVariant::Text);

/// Score, right-aligned on the centre line
pub fn draw_score(surface: &mut PixelSurface, score: u32) {
    let right = surface.width() as i32 / 2;
    SCORE_FONT.draw_text_right_aligned(surface, &score.to_string(), right, TOP_MARGIN, HUD_COLOR);
}

/// Lives, right-aligned near the right edge
pub fn draw_lives(surface: &mut PixelSurface, lives: u32) {
    let right = surface.width() as i32 - LIVES_RIGHT_MARGIN;
    SCORE_FONT.draw_text_right_aligned(surface, &lives.to_string(), right, TOP_MARGIN, HUD_COLOR);
}

/// Both counters
pub fn draw_status(surface: &mut PixelSurface, score: u32, lives: u32) {
    draw_score(surface, score);
    draw_lives(surface, lives);
}

/// Title screen
pub fn draw_title(surface: &mut PixelSurface) {
    let center_x = surface.width() as i32 / 2;
    let center_y = surface.height() as i32 / 2;
    TEXT_FONT.draw_text_centered(surface, "PIXEL BLASTER", center_x, center_y - 30, TEXT_COLOR);
    TEXT_FONT.draw_text_centered(surface, "PRESS ANY KEY TO START", center_x, center_y, TEXT_COLOR);
}

/// Game over banner, drawn over the frozen playfield
pub fn draw_game_over(surface: &mut PixelSurface) {
    let center_x = surface.width() as i32 / 2;
    let center_y = surface.height() as i32 / 2;
    TEXT_FONT.draw_text_centered(surface, "GAME OVER", center_x, center_y - 4, TEXT_COLOR);
}
