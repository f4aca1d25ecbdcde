//! UI Theme - Shared colors and styling constants
//!
//! Centralized color definitions for the HUD, modal screens and the world
//! backgrounds.

use macroquad::prelude::Color;
use crate::assets::hex;
use crate::game::Theme;

// =============================================================================
// Overlay Colors
// =============================================================================

/// Dimming layer behind modal screens
pub const SCRIM_COLOR: Color = Color::new(0.0, 0.0, 0.0, 0.6);

/// Modal panel background
pub const PANEL_BG: Color = Color::new(0.12, 0.12, 0.16, 0.94);

/// Modal panel border
pub const PANEL_BORDER: Color = Color::new(1.0, 0.84, 0.0, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(0.95, 0.95, 0.97, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.65, 0.65, 0.72, 1.0);

/// Titles and the score counter
pub const TITLE_COLOR: Color = hex(0xFFD700);

/// Remaining-lives hearts
pub const LIFE_COLOR: Color = hex(0xFF4D6D);

/// HUD strip behind score/lives/level
pub const HUD_BG: Color = Color::new(0.0, 0.0, 0.0, 0.35);

/// Bars outside the play field when the window aspect differs
pub const LETTERBOX_COLOR: Color = Color::new(0.04, 0.04, 0.05, 1.0);

// =============================================================================
// Font Sizes (logical units, scaled with the view)
// =============================================================================

pub const FONT_SIZE_TITLE: f32 = 48.0;
pub const FONT_SIZE_HEADER: f32 = 28.0;
pub const FONT_SIZE_CONTENT: f32 = 20.0;
pub const FONT_SIZE_SMALL: f32 = 15.0;

// =============================================================================
// Debug Overlay
// =============================================================================

pub const DEBUG_PLAYER: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const DEBUG_PLATFORM: Color = Color::new(0.0, 1.0, 0.0, 1.0);
pub const DEBUG_ENEMY: Color = Color::new(1.0, 0.0, 1.0, 1.0);
pub const DEBUG_COIN: Color = Color::new(1.0, 1.0, 0.0, 1.0);
pub const DEBUG_TEXT_BG: Color = Color::new(0.0, 0.0, 0.0, 0.7);

// =============================================================================
// World Themes
// =============================================================================

/// Vertical background gradient, top color then bottom color
pub fn background_gradient(theme: Theme) -> (Color, Color) {
    match theme {
        Theme::Forest => (hex(0x87CEEB), hex(0x98FB98)),
        Theme::Desert => (hex(0xFFE4B5), hex(0xF4A460)),
        Theme::Space => (hex(0x191970), hex(0x483D8B)),
    }
}

/// Fill for the parallax circles
pub fn parallax_color(theme: Theme) -> Color {
    match theme {
        Theme::Forest => Color::new(1.0, 1.0, 1.0, 0.35),
        Theme::Desert => Color::new(1.0, 0.98, 0.9, 0.3),
        Theme::Space => Color::new(0.85, 0.85, 1.0, 0.25),
    }
}

/// Platform fill and its top edge highlight
pub fn platform_colors(theme: Theme) -> (Color, Color) {
    match theme {
        Theme::Forest => (hex(0x8B5A2B), hex(0x4CAF50)),
        Theme::Desert => (hex(0xC2955A), hex(0xE8C07D)),
        Theme::Space => (hex(0x4B4E6D), hex(0x9FA8DA)),
    }
}

/// Linear blend between two colors
pub fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}
