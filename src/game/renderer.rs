//! World Renderer
//!
//! Draws the post-update world. Rendering is a pure read: nothing here
//! touches simulation state, and the shake jitter draws from macroquad's
//! own RNG so the seeded world RNG stays untouched.
//!
//! All positions are authored in logical viewport units. `View` maps them
//! to window pixels, keeping the aspect ratio with letterbox bars.

use macroquad::prelude::*;
use crate::assets::{Assets, Placeholder, Sprite, SpriteKey, hex};
use crate::config::Viewport;
use crate::ui::theme;
use super::entity::{AnimState, Coin, Enemy, EnemyKind, Facing, Player};
use super::geometry::Rect as WorldRect;
use super::level::Theme;
use super::particles::{Particle, ParticleKind};
use super::world::World;

/// Horizontal speed of the background layer relative to the camera
const PARALLAX_FACTOR: f32 = 0.3;
/// Steps in the background gradient
const GRADIENT_BANDS: usize = 32;
/// Invulnerability flash period in steps
const FLASH_PERIOD: u32 = 6;

// =============================================================================
// View transform
// =============================================================================

/// Logical-to-window mapping for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub scale: f32,
    /// Window position of logical (0, 0)
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
    pub camera_x: f32,
    pub jitter_x: f32,
    pub jitter_y: f32,
}

impl View {
    /// Fit the viewport into the window, centered
    pub fn fit(viewport: &Viewport, screen_w: f32, screen_h: f32) -> Self {
        let scale = (screen_w / viewport.width).min(screen_h / viewport.height).max(0.0);
        let draw_w = viewport.width * scale;
        let draw_h = viewport.height * scale;
        Self {
            scale,
            origin_x: (screen_w - draw_w) * 0.5,
            origin_y: (screen_h - draw_h) * 0.5,
            width: viewport.width,
            height: viewport.height,
            camera_x: 0.0,
            jitter_x: 0.0,
            jitter_y: 0.0,
        }
    }

    pub fn with_camera(self, camera_x: f32, jitter: (f32, f32)) -> Self {
        Self {
            camera_x,
            jitter_x: jitter.0,
            jitter_y: jitter.1,
            ..self
        }
    }

    /// Viewport position to window pixels (no camera)
    pub fn screen(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y + y * self.scale)
    }

    /// World position to window pixels
    pub fn world(&self, x: f32, y: f32) -> (f32, f32) {
        self.screen(x - self.camera_x + self.jitter_x, y + self.jitter_y)
    }

    pub fn size(&self, v: f32) -> f32 {
        v * self.scale
    }

    /// Whether a world rect intersects the visible area
    pub fn is_visible(&self, rect: &WorldRect) -> bool {
        rect.right() >= self.camera_x && rect.x <= self.camera_x + self.width
    }

    /// Window-space rect of a world rect
    fn world_rect(&self, rect: &WorldRect) -> WorldRect {
        let (x, y) = self.world(rect.x, rect.y);
        WorldRect::new(x, y, self.size(rect.w), self.size(rect.h))
    }
}

/// Random view offset for a shake of the given intensity
pub fn shake_jitter(intensity: f32) -> (f32, f32) {
    if intensity <= 0.0 {
        return (0.0, 0.0);
    }
    let half = intensity * 0.5;
    (
        macroquad::rand::gen_range(-half, half),
        macroquad::rand::gen_range(-half, half),
    )
}

// =============================================================================
// Sprite selection
// =============================================================================

pub fn player_sprite_key(anim: AnimState) -> SpriteKey {
    match anim {
        AnimState::Idle => SpriteKey::PlayerIdle,
        AnimState::Run => SpriteKey::PlayerRun,
        AnimState::Jump => SpriteKey::PlayerJump,
    }
}

pub fn enemy_sprite_key(kind: EnemyKind) -> SpriteKey {
    match kind {
        EnemyKind::Red => SpriteKey::EnemyRed,
        EnemyKind::Purple { .. } => SpriteKey::EnemyPurple,
        EnemyKind::Pink => SpriteKey::EnemyPink,
    }
}

pub fn particle_sprite_key(kind: ParticleKind) -> SpriteKey {
    match kind {
        ParticleKind::Coin => SpriteKey::ParticleCoin,
        ParticleKind::Hit => SpriteKey::ParticleHit,
    }
}

/// Player opacity: half on alternating flash windows while invulnerable
pub fn player_alpha(player: &Player) -> f32 {
    if player.invulnerable && (player.invuln_timer / FLASH_PERIOD) % 2 == 1 {
        0.5
    } else {
        1.0
    }
}

/// Horizontal squash of a spinning coin, never fully edge-on
pub fn coin_spin(phase: f32) -> f32 {
    phase.cos().abs().max(0.15)
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw the whole world for one frame
pub fn draw_world(world: &World, assets: &Assets, view: &View) {
    draw_background(world.theme, view);
    draw_parallax(world.theme, view);

    let (fill, top) = theme::platform_colors(world.theme);
    for platform in world.platforms.iter().filter(|p| view.is_visible(&p.rect)) {
        let r = view.world_rect(&platform.rect);
        draw_rectangle(r.x, r.y, r.w, r.h, fill);
        draw_rectangle(r.x, r.y, r.w, view.size(6.0).min(r.h), top);
    }

    if view.is_visible(&world.goal.rect) {
        draw_sprite(assets.sprite(SpriteKey::Goal), view.world_rect(&world.goal.rect), false, 1.0, 0);
    }

    for coin in world.coins.iter().filter(|c| view.is_visible(&c.rect)) {
        draw_coin(coin, assets, view);
    }

    for enemy in world.enemies.iter().filter(|e| view.is_visible(&e.rect)) {
        draw_enemy(enemy, assets, view);
    }

    let player = &world.player;
    draw_sprite(
        assets.sprite(player_sprite_key(player.anim)),
        view.world_rect(&player.rect),
        player.facing == Facing::Left,
        player_alpha(player),
        player.anim_frame,
    );

    for particle in world.particles.iter() {
        draw_particle(particle, assets, view);
    }
}

fn draw_background(level_theme: Theme, view: &View) {
    let (top, bottom) = theme::background_gradient(level_theme);
    let band_h = view.height / GRADIENT_BANDS as f32;
    for i in 0..GRADIENT_BANDS {
        let t = i as f32 / (GRADIENT_BANDS - 1) as f32;
        let (x, y) = view.screen(0.0, i as f32 * band_h);
        // +1 px overlap hides seams between bands
        draw_rectangle(x, y, view.size(view.width), view.size(band_h) + 1.0, theme::lerp_color(top, bottom, t));
    }
}

/// Translucent circles scrolling slower than the camera, wrapping around
fn draw_parallax(level_theme: Theme, view: &View) {
    let color = theme::parallax_color(level_theme);
    let span = view.width + 400.0;
    let shift = view.camera_x * PARALLAX_FACTOR;
    for i in 0..8u32 {
        let base_x = i as f32 * 180.0 + (i * 97 % 130) as f32;
        let y = 50.0 + (i * 53 % 160) as f32;
        let radius = 25.0 + (i * 31 % 35) as f32;
        let x = (base_x - shift).rem_euclid(span) - 200.0;
        let (sx, sy) = view.screen(x + view.jitter_x, y + view.jitter_y);
        draw_circle(sx, sy, view.size(radius), color);
    }
}

fn draw_coin(coin: &Coin, assets: &Assets, view: &View) {
    let spin = coin_spin(coin.phase);
    let rect = WorldRect::new(
        coin.rect.center_x() - coin.rect.w * spin * 0.5,
        coin.rect.y + coin.bob,
        coin.rect.w * spin,
        coin.rect.h,
    );
    draw_sprite(assets.sprite(SpriteKey::Coin), view.world_rect(&rect), false, 1.0, 0);
}

fn draw_enemy(enemy: &Enemy, assets: &Assets, view: &View) {
    let r = view.world_rect(&enemy.rect);
    if enemy.kind == EnemyKind::Pink {
        let pad = view.size(4.0);
        draw_rectangle_lines(r.x - pad, r.y - pad, r.w + pad * 2.0, r.h + pad * 2.0, view.size(3.0), Color::new(1.0, 0.41, 0.71, 0.55));
    }
    draw_sprite(assets.sprite(enemy_sprite_key(enemy.kind)), r, enemy.vel_x < 0.0, 1.0, 0);
}

fn draw_particle(particle: &Particle, assets: &Assets, view: &View) {
    let (x, y) = view.world(particle.x, particle.y);
    let size = view.size(particle.size);
    let alpha = particle.alpha();
    match assets.sprite(particle_sprite_key(particle.kind)) {
        Sprite::Texture(texture) => {
            draw_texture_ex(
                texture,
                x - size,
                y - size,
                Color::new(1.0, 1.0, 1.0, alpha),
                DrawTextureParams {
                    dest_size: Some(vec2(size * 2.0, size * 2.0)),
                    rotation: particle.rotation,
                    ..Default::default()
                },
            );
        }
        Sprite::Placeholder(Placeholder::Circle { color }) => {
            draw_poly(x, y, 12, size, 0.0, with_alpha(color, alpha));
        }
        Sprite::Placeholder(placeholder) => {
            let color = match placeholder {
                Placeholder::Square { color } => color,
                _ => hex(0xFFD700),
            };
            draw_poly(x, y, 4, size, particle.rotation.to_degrees() + 45.0, with_alpha(color, alpha));
        }
    }
}

/// Draw a sprite into a window-space rect. Textures wider than tall are
/// treated as horizontal strips of square frames.
fn draw_sprite(sprite: Sprite, dest: WorldRect, flip_x: bool, alpha: f32, frame: u32) {
    match sprite {
        Sprite::Texture(texture) => {
            let (tw, th) = (texture.width(), texture.height());
            let frames = if th > 0.0 { (tw / th).floor().max(1.0) as u32 } else { 1 };
            let source = if frames > 1 {
                let index = (frame % frames) as f32;
                Some(macroquad::math::Rect::new(index * th, 0.0, th, th))
            } else {
                None
            };
            draw_texture_ex(
                texture,
                dest.x,
                dest.y,
                Color::new(1.0, 1.0, 1.0, alpha),
                DrawTextureParams {
                    dest_size: Some(vec2(dest.w, dest.h)),
                    source,
                    flip_x,
                    ..Default::default()
                },
            );
        }
        Sprite::Placeholder(placeholder) => draw_placeholder(placeholder, dest, flip_x, alpha),
    }
}

fn draw_placeholder(placeholder: Placeholder, r: WorldRect, flip_x: bool, alpha: f32) {
    let white = with_alpha(WHITE, alpha);
    let dark = with_alpha(Color::new(0.1, 0.1, 0.12, 1.0), alpha);
    // Eyes sit toward the facing side
    let look = if flip_x { -1.0 } else { 1.0 };

    match placeholder {
        Placeholder::Player { body } => {
            let body = with_alpha(body, alpha);
            let head_r = r.w * 0.28;
            draw_rectangle(r.x + r.w * 0.15, r.y + r.h * 0.4, r.w * 0.7, r.h * 0.6, body);
            draw_circle(r.center_x(), r.y + head_r + r.h * 0.05, head_r, body);
            let eye_y = r.y + head_r + r.h * 0.03;
            for side in [-1.0, 1.0] {
                let ex = r.center_x() + side * head_r * 0.4 + look * head_r * 0.2;
                draw_circle(ex, eye_y, head_r * 0.22, white);
                draw_circle(ex + look * head_r * 0.08, eye_y, head_r * 0.1, dark);
            }
        }
        Placeholder::Enemy { body } => {
            let body = with_alpha(body, alpha);
            let spikes = 4;
            let spike_w = r.w / spikes as f32;
            let spike_h = r.h * 0.25;
            draw_rectangle(r.x, r.y + spike_h, r.w, r.h - spike_h, body);
            for i in 0..spikes {
                let x = r.x + i as f32 * spike_w;
                draw_triangle(
                    vec2(x, r.y + spike_h),
                    vec2(x + spike_w, r.y + spike_h),
                    vec2(x + spike_w * 0.5, r.y),
                    body,
                );
            }
            let eye_y = r.y + r.h * 0.5;
            for side in [-1.0, 1.0] {
                let ex = r.center_x() + side * r.w * 0.18;
                draw_circle(ex, eye_y, r.w * 0.1, white);
                draw_circle(ex + look * r.w * 0.03, eye_y, r.w * 0.05, dark);
            }
        }
        Placeholder::Coin => {
            let (cx, cy) = r.center();
            draw_ellipse(cx, cy, r.w * 0.5, r.h * 0.5, 0.0, with_alpha(hex(0xDAA520), alpha));
            draw_ellipse(cx, cy, r.w * 0.38, r.h * 0.38, 0.0, with_alpha(hex(0xFFD700), alpha));
            draw_circle(cx - r.w * 0.12, cy - r.h * 0.15, r.h * 0.08, with_alpha(hex(0xFFFACD), alpha));
        }
        Placeholder::Flag => {
            let pole_w = (r.w * 0.1).max(2.0);
            draw_rectangle(r.x, r.y, pole_w, r.h, with_alpha(hex(0x8B8B8B), alpha));
            draw_triangle(
                vec2(r.x + pole_w, r.y),
                vec2(r.x + pole_w, r.y + r.h * 0.45),
                vec2(r.right(), r.y + r.h * 0.22),
                with_alpha(hex(0x32CD32), alpha),
            );
        }
        Placeholder::Square { color } => {
            draw_rectangle(r.x, r.y, r.w, r.h, with_alpha(color, alpha));
        }
        Placeholder::Circle { color } => {
            let (cx, cy) = r.center();
            draw_circle(cx, cy, r.w.min(r.h) * 0.5, with_alpha(color, alpha));
        }
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, color.a * alpha)
}

/// Bars covering the window outside the play field
pub fn draw_letterbox(view: &View, screen_w: f32, screen_h: f32) {
    let color = theme::LETTERBOX_COLOR;
    let right = view.origin_x + view.size(view.width);
    let bottom = view.origin_y + view.size(view.height);
    if view.origin_x > 0.0 {
        draw_rectangle(0.0, 0.0, view.origin_x, screen_h, color);
        draw_rectangle(right, 0.0, screen_w - right, screen_h, color);
    }
    if view.origin_y > 0.0 {
        draw_rectangle(0.0, 0.0, screen_w, view.origin_y, color);
        draw_rectangle(0.0, bottom, screen_w, screen_h - bottom, color);
    }
}

// =============================================================================
// Debug overlay
// =============================================================================

/// Hitboxes plus a text block with the player's physics state
pub fn draw_debug(world: &World, view: &View, fps: i32) {
    let thickness = 2.0;
    let outline = |rect: &WorldRect, color: Color| {
        let r = view.world_rect(rect);
        draw_rectangle_lines(r.x, r.y, r.w, r.h, thickness, color);
    };

    for platform in &world.platforms {
        outline(&platform.rect, theme::DEBUG_PLATFORM);
    }
    for enemy in &world.enemies {
        outline(&enemy.rect, theme::DEBUG_ENEMY);
    }
    for coin in &world.coins {
        outline(&coin.rect, theme::DEBUG_COIN);
    }
    outline(&world.player.rect, theme::DEBUG_PLAYER);

    let lines = debug_lines(world, fps);
    let font_size = view.size(theme::FONT_SIZE_SMALL);
    let line_h = font_size * 1.1;
    let (x, y) = view.screen(10.0, 70.0);
    draw_rectangle(x - 4.0, y - line_h, view.size(230.0), line_h * (lines.len() as f32 + 0.5), theme::DEBUG_TEXT_BG);
    for (i, line) in lines.iter().enumerate() {
        draw_text(line, x, y + i as f32 * line_h, font_size, WHITE);
    }
}

pub fn debug_lines(world: &World, fps: i32) -> Vec<String> {
    let p = &world.player;
    vec![
        format!("pos: {:.1}, {:.1}", p.rect.x, p.rect.y),
        format!("vel: {:.2}, {:.2}", p.vel_x, p.vel_y),
        format!("grounded: {}", p.grounded),
        format!("camera x: {:.1}", world.camera.x),
        format!("fps: {}", fps),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;
    use crate::config::PlayerTuning;

    #[test]
    fn test_fit_letterboxes_wide_window() {
        let view = View::fit(&Viewport::default(), 2400.0, 500.0);
        assert_relative_eq!(view.scale, 1.0);
        assert_relative_eq!(view.origin_x, 700.0);
        assert_relative_eq!(view.origin_y, 0.0);
    }

    #[test]
    fn test_fit_letterboxes_tall_window() {
        let view = View::fit(&Viewport::default(), 500.0, 1000.0);
        assert_relative_eq!(view.scale, 0.5);
        assert_relative_eq!(view.origin_x, 0.0);
        assert_relative_eq!(view.origin_y, 375.0);
    }

    #[test]
    fn test_world_to_screen_applies_camera_and_jitter() {
        let view = View::fit(&Viewport::default(), 2000.0, 1000.0).with_camera(300.0, (2.0, -1.0));
        assert_eq!(view.world(300.0, 100.0), (4.0, 198.0));
        assert_eq!(view.screen(300.0, 100.0), (600.0, 200.0));
    }

    #[test]
    fn test_visibility_culling() {
        let view = View::fit(&Viewport::default(), 1000.0, 500.0).with_camera(500.0, (0.0, 0.0));
        assert!(view.is_visible(&WorldRect::new(1400.0, 0.0, 50.0, 50.0)));
        assert!(view.is_visible(&WorldRect::new(460.0, 0.0, 50.0, 50.0)));
        assert!(!view.is_visible(&WorldRect::new(100.0, 0.0, 50.0, 50.0)));
        assert!(!view.is_visible(&WorldRect::new(1600.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_player_flashes_while_invulnerable() {
        let mut player = Player::new(&PlayerTuning::default());
        assert_eq!(player_alpha(&player), 1.0);
        player.make_invulnerable(120);
        player.invuln_timer = 5;
        assert_eq!(player_alpha(&player), 1.0);
        player.invuln_timer = 6;
        assert_eq!(player_alpha(&player), 0.5);
        player.invuln_timer = 12;
        assert_eq!(player_alpha(&player), 1.0);
    }

    #[test]
    fn test_sprite_keys() {
        assert_eq!(player_sprite_key(AnimState::Jump), SpriteKey::PlayerJump);
        assert_eq!(enemy_sprite_key(EnemyKind::Purple { pause: 3 }), SpriteKey::EnemyPurple);
        assert_eq!(particle_sprite_key(ParticleKind::Hit), SpriteKey::ParticleHit);
    }

    #[test]
    fn test_coin_spin_never_vanishes() {
        assert_relative_eq!(coin_spin(0.0), 1.0);
        assert_relative_eq!(coin_spin(PI / 2.0), 0.15);
    }

    #[test]
    fn test_shake_jitter_zero_without_shake() {
        assert_eq!(shake_jitter(0.0), (0.0, 0.0));
    }

    #[test]
    fn test_debug_lines() {
        let world = World::new(PlayerTuning::default(), Viewport::default(), 1);
        let lines = debug_lines(&world, 60);
        assert_eq!(lines[0], "pos: 50.0, 350.0");
        assert_eq!(lines[2], "grounded: false");
        assert_eq!(lines[4], "fps: 60");
    }
}
