//! Player physics
//!
//! One call to [`step`] is one simulation frame: timers, horizontal
//! acceleration, jump, coyote window, gravity, integration, animation,
//! platform resolution, world-left clamp and the fall check, in that order.

use super::entity::{AnimState, Facing, Platform, Player};
use super::geometry::{platform_contact, Contact};
use crate::config::{PlayerTuning, Viewport};
use crate::input::{Action, InputFrame};

/// Above this |velX| the player counts as running and turns to face it
const RUN_THRESHOLD: f32 = 0.5;
/// Steps between run frames
const RUN_FRAME_TICKS: u32 = 6;
const RUN_FRAMES: u32 = 4;
/// Steps between idle frames
const IDLE_FRAME_TICKS: u32 = 40;
const IDLE_FRAMES: u32 = 2;

/// What happened during a player step that the session needs to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerStep {
    pub jumped: bool,
    /// Fell past the bottom of the viewport
    pub fell: bool,
}

/// Advance the player by one frame
pub fn step(
    player: &mut Player,
    platforms: &[Platform],
    input: &InputFrame,
    tuning: &PlayerTuning,
    viewport: &Viewport,
) -> PlayerStep {
    let mut result = PlayerStep::default();

    // Invulnerability countdown
    if player.invulnerable {
        player.invuln_timer = player.invuln_timer.saturating_sub(1);
        if player.invuln_timer == 0 {
            player.invulnerable = false;
        }
    }

    // Horizontal acceleration, or friction when no direction is held
    if input.down(Action::Left) {
        player.vel_x = (player.vel_x - tuning.acceleration).max(-tuning.max_speed);
    } else if input.down(Action::Right) {
        player.vel_x = (player.vel_x + tuning.acceleration).min(tuning.max_speed);
    } else {
        player.vel_x *= tuning.friction;
        if player.vel_x.abs() < tuning.stop_threshold {
            player.vel_x = 0.0;
        }
    }

    if input.pressed(Action::Jump) && (player.grounded || player.coyote > 0) {
        player.vel_y = -tuning.jump_power;
        player.grounded = false;
        player.coyote = 0;
        result.jumped = true;
    }

    if player.grounded {
        player.coyote = tuning.coyote_frames;
    } else {
        player.coyote = player.coyote.saturating_sub(1);
    }

    player.vel_y = (player.vel_y + tuning.gravity).min(tuning.terminal_velocity);

    player.rect.x += player.vel_x;
    player.rect.y += player.vel_y;

    update_animation(player);

    resolve_platforms(player, platforms);

    if player.rect.x < 0.0 {
        player.rect.x = 0.0;
        player.vel_x = 0.0;
    }

    result.fell = player.rect.y > viewport.height + tuning.fall_margin;
    result
}

/// Snap the player out of every platform it touches, in list order.
/// Later platforms win where two contacts disagree.
pub fn resolve_platforms(player: &mut Player, platforms: &[Platform]) {
    player.grounded = false;

    for platform in platforms {
        let p = &platform.rect;
        match platform_contact(&player.rect, player.vel_y, p) {
            Contact::Top => {
                player.rect.y = p.y - player.rect.h;
                player.vel_y = 0.0;
                player.grounded = true;
            }
            Contact::Left if player.vel_x > 0.0 => {
                player.rect.x = p.x - player.rect.w;
                player.vel_x = 0.0;
            }
            Contact::Right if player.vel_x < 0.0 => {
                player.rect.x = p.right();
                player.vel_x = 0.0;
            }
            _ => {}
        }
    }
}

/// Recompute animation state and facing from the current physics state
pub fn update_animation(player: &mut Player) {
    player.anim_timer = player.anim_timer.wrapping_add(1);

    if !player.grounded {
        player.anim = AnimState::Jump;
        player.anim_frame = if player.vel_y < 0.0 { 0 } else { 1 };
    } else if player.vel_x.abs() > RUN_THRESHOLD {
        if player.anim != AnimState::Run {
            player.anim = AnimState::Run;
            player.anim_frame = 0;
        }
        if player.anim_timer % RUN_FRAME_TICKS == 0 {
            player.anim_frame = (player.anim_frame + 1) % RUN_FRAMES;
        }
    } else {
        if player.anim != AnimState::Idle {
            player.anim = AnimState::Idle;
            player.anim_frame = 0;
        }
        if player.anim_timer % IDLE_FRAME_TICKS == 0 {
            player.anim_frame = (player.anim_frame + 1) % IDLE_FRAMES;
        }
    }

    if player.vel_x > RUN_THRESHOLD {
        player.facing = Facing::Right;
    } else if player.vel_x < -RUN_THRESHOLD {
        player.facing = Facing::Left;
    }
}
