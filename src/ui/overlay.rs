//! HUD and modal screens
//!
//! `Overlay` is the UI sink: the app forwards every HUD and screen event
//! from the session into it, and it draws whatever it last heard on top of
//! the world. The text it shows is built by plain functions so it can be
//! checked without a window.

use macroquad::prelude::*;
use crate::game::renderer::View;
use crate::game::{HudSnapshot, Screen};
use super::theme::*;

/// Receives score/lives/level updates and screen transitions
pub trait UiSink {
    fn hud_changed(&mut self, hud: HudSnapshot);
    fn screen_changed(&mut self, screen: Screen);
}

/// Text content of one modal screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub title: String,
    pub lines: Vec<String>,
}

pub struct Overlay {
    hud: HudSnapshot,
    screen: Screen,
    level_count: usize,
    muted: bool,
}

impl Overlay {
    pub fn new(level_count: usize, muted: bool) -> Self {
        Self {
            hud: HudSnapshot::default(),
            screen: Screen::Start,
            level_count,
            muted,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[cfg(test)]
    pub fn hud(&self) -> HudSnapshot {
        self.hud
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Whether the HUD strip is visible on the current screen
    pub fn shows_hud(&self) -> bool {
        !matches!(self.screen, Screen::Start | Screen::Instructions)
    }

    pub fn draw(&self, view: &View) {
        if self.shows_hud() {
            self.draw_hud(view);
        }
        if let Some(modal) = modal_for(self.screen, &self.hud, self.level_count) {
            draw_modal(&modal, view);
        }
    }

    fn draw_hud(&self, view: &View) {
        let (x, y) = view.screen(0.0, 0.0);
        let strip_h = view.size(44.0);
        draw_rectangle(x, y, view.size(view.width), strip_h, HUD_BG);

        let font_size = view.size(FONT_SIZE_CONTENT);
        let baseline = y + strip_h * 0.5 + font_size * 0.3;

        let score = format!("Score: {}", self.hud.score);
        draw_text(&score, x + view.size(16.0), baseline, font_size, TITLE_COLOR);

        let level = format!("Level {}/{}", self.hud.level, self.level_count);
        let dims = measure_text(&level, None, font_size as u16, 1.0);
        draw_text(&level, x + (view.size(view.width) - dims.width) * 0.5, baseline, font_size, TEXT_COLOR);

        // Hearts from the right edge
        let radius = view.size(8.0);
        let spacing = radius * 2.6;
        let right = x + view.size(view.width) - view.size(20.0);
        for i in 0..self.hud.lives {
            draw_heart(right - i as f32 * spacing, y + strip_h * 0.5, radius);
        }

        if self.muted {
            let (mx, my) = view.screen(16.0, 64.0);
            draw_text("Muted (M)", mx, my, view.size(FONT_SIZE_SMALL), TEXT_DIM);
        }
    }
}

impl UiSink for Overlay {
    fn hud_changed(&mut self, hud: HudSnapshot) {
        self.hud = hud;
    }

    fn screen_changed(&mut self, screen: Screen) {
        log::debug!("Screen -> {:?}", screen);
        self.screen = screen;
    }
}

/// Modal content for a screen, or `None` while playing
pub fn modal_for(screen: Screen, hud: &HudSnapshot, level_count: usize) -> Option<Modal> {
    let modal = |title: &str, lines: &[String]| Modal {
        title: title.to_string(),
        lines: lines.to_vec(),
    };
    match screen {
        Screen::Playing => None,
        Screen::Start => Some(modal(
            "Coin Runner",
            &[
                "Collect coins, dodge enemies, reach the flag".into(),
                String::new(),
                "Enter / Space: Play".into(),
                "I: Instructions".into(),
            ],
        )),
        Screen::Instructions => Some(modal(
            "How to Play",
            &[
                "Arrows / A D: Move".into(),
                "Space / Up / W: Jump".into(),
                "P: Pause    M: Mute".into(),
                "F3 or Ctrl+D: Debug overlay".into(),
                "Touch: swipe to move, swipe up to jump".into(),
                format!("Coins: +{}   Coins left at the flag: +{} each", crate::game::coin::COIN_SCORE, crate::game::coin::COIN_BONUS),
                String::new(),
                "Esc / Enter: Back".into(),
            ],
        )),
        Screen::Paused => Some(modal(
            "Paused",
            &[
                "P: Resume".into(),
                "R: Restart".into(),
                "Esc: Title screen".into(),
            ],
        )),
        Screen::LevelComplete { bonus } => Some(modal(
            &format!("Level {} Complete!", hud.level),
            &[
                format!("Coin bonus: +{}", bonus),
                format!("Score: {}", hud.score),
                String::new(),
                "Enter: Next level".into(),
            ],
        )),
        Screen::GameOver => Some(modal(
            "Game Over",
            &[
                format!("Final score: {}", hud.score),
                format!("Reached level {}", hud.level),
                String::new(),
                "R / Enter: Play again".into(),
                "Esc: Title screen".into(),
            ],
        )),
        Screen::GameWon => Some(modal(
            "You Win!",
            &[
                format!("All {} levels cleared", level_count),
                format!("Final score: {}", hud.score),
                String::new(),
                "R / Enter: Play again".into(),
                "Esc: Title screen".into(),
            ],
        )),
    }
}

fn draw_modal(modal: &Modal, view: &View) {
    let (x, y) = view.screen(0.0, 0.0);
    draw_rectangle(x, y, view.size(view.width), view.size(view.height), SCRIM_COLOR);

    let title_size = view.size(FONT_SIZE_TITLE);
    let line_size = view.size(FONT_SIZE_CONTENT);
    let line_h = line_size * 1.35;

    let panel_w = view.size(560.0);
    let panel_h = title_size * 1.8 + line_h * modal.lines.len() as f32 + view.size(24.0);
    let panel_x = x + (view.size(view.width) - panel_w) * 0.5;
    let panel_y = y + (view.size(view.height) - panel_h) * 0.5;

    draw_rectangle(panel_x, panel_y, panel_w, panel_h, PANEL_BG);
    draw_rectangle_lines(panel_x, panel_y, panel_w, panel_h, view.size(3.0), PANEL_BORDER);

    let center_x = panel_x + panel_w * 0.5;
    let mut cursor_y = panel_y + title_size * 1.2;
    draw_centered(&modal.title, center_x, cursor_y, title_size, TITLE_COLOR);
    cursor_y += title_size * 0.6 + line_h * 0.5;

    for line in &modal.lines {
        if !line.is_empty() {
            draw_centered(line, center_x, cursor_y, line_size, TEXT_COLOR);
        }
        cursor_y += line_h;
    }
}

fn draw_centered(text: &str, center_x: f32, baseline: f32, font_size: f32, color: Color) {
    let dims = measure_text(text, None, font_size as u16, 1.0);
    draw_text(text, (center_x - dims.width * 0.5).round(), baseline.round(), font_size, color);
}

fn draw_heart(cx: f32, cy: f32, r: f32) {
    draw_circle(cx - r * 0.5, cy - r * 0.2, r * 0.6, LIFE_COLOR);
    draw_circle(cx + r * 0.5, cy - r * 0.2, r * 0.6, LIFE_COLOR);
    draw_triangle(
        vec2(cx - r * 1.08, cy),
        vec2(cx + r * 1.08, cy),
        vec2(cx, cy + r),
        LIFE_COLOR,
    );
}
