//! Entity records
//!
//! Plain data for everything that lives in a level. Behavior lives in the
//! sibling modules (`player`, `enemy`, `coin`); these types only carry state.

use serde::{Serialize, Deserialize};
use super::geometry::Rect;
use crate::config::PlayerTuning;

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Player animation state, recomputed every step from physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Run,
    Jump,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vel_x: f32,
    pub vel_y: f32,
    pub grounded: bool,
    /// Remaining frames of the post-ledge jump window
    pub coyote: u32,
    pub anim: AnimState,
    pub anim_frame: u32,
    pub anim_timer: u32,
    pub facing: Facing,
    pub invulnerable: bool,
    /// Frames left until `invulnerable` clears
    pub invuln_timer: u32,
}

impl Player {
    /// A fresh player at the spawn point
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            rect: Rect::new(tuning.spawn_x, tuning.spawn_y, tuning.width, tuning.height),
            vel_x: 0.0,
            vel_y: 0.0,
            grounded: false,
            coyote: 0,
            anim: AnimState::Idle,
            anim_frame: 0,
            anim_timer: 0,
            facing: Facing::Right,
            invulnerable: false,
            invuln_timer: 0,
        }
    }

    /// Move back to the spawn point with no velocity. Facing and the
    /// invulnerability state are left to the caller.
    pub fn respawn(&mut self, tuning: &PlayerTuning) {
        self.rect.x = tuning.spawn_x;
        self.rect.y = tuning.spawn_y;
        self.vel_x = 0.0;
        self.vel_y = 0.0;
        self.grounded = false;
        self.coyote = 0;
        self.anim = AnimState::Idle;
        self.anim_frame = 0;
    }

    /// Start an invulnerability window of `frames` steps
    pub fn make_invulnerable(&mut self, frames: u32) {
        self.invulnerable = frames > 0;
        self.invuln_timer = frames;
    }
}

/// Static level geometry. Its index in the level's platform list is what
/// enemies reference as their home.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { rect: Rect::new(x, y, w, h) }
    }
}

/// Frames a purple enemy holds still once it decides to pause
pub const PURPLE_PAUSE_FRAMES: u32 = 60;

/// Enemy variant with its per-variant state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Plain patrol
    Red,
    /// Patrol with random pauses; `pause` counts down the current one
    Purple { pause: u32 },
    /// Fast patrol, drawn with a glow
    Pink,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    pub vel_x: f32,
    pub kind: EnemyKind,
    /// Index into the level's platform list
    pub home: Option<usize>,
}

impl Enemy {
    pub fn is_paused(&self) -> bool {
        matches!(self.kind, EnemyKind::Purple { pause } if pause > 0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    /// Hitbox, fixed at the authored position
    pub rect: Rect,
    /// Spin/bob phase, grows without bound
    pub phase: f32,
    /// Vertical draw offset accumulated from the phase
    pub bob: f32,
}

impl Coin {
    pub fn new(rect: Rect, phase: f32) -> Self {
        Self { rect, phase, bob: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Goal {
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawns_at_tuning_position() {
        let tuning = PlayerTuning::default();
        let player = Player::new(&tuning);
        assert_eq!(player.rect, Rect::new(50.0, 350.0, 62.0, 70.0));
        assert!(!player.invulnerable);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_respawn_clears_motion() {
        let tuning = PlayerTuning::default();
        let mut player = Player::new(&tuning);
        player.rect.x = 900.0;
        player.rect.y = 700.0;
        player.vel_x = 4.0;
        player.vel_y = 16.0;
        player.coyote = 3;
        player.facing = Facing::Left;

        player.respawn(&tuning);
        assert_eq!(player.rect.x, 50.0);
        assert_eq!(player.rect.y, 350.0);
        assert_eq!(player.vel_x, 0.0);
        assert_eq!(player.vel_y, 0.0);
        assert_eq!(player.coyote, 0);
        assert_eq!(player.facing, Facing::Left);
    }

    #[test]
    fn test_purple_pause_state() {
        let mut enemy = Enemy {
            rect: Rect::new(0.0, 0.0, 30.0, 30.0),
            vel_x: 1.0,
            kind: EnemyKind::Purple { pause: 0 },
            home: None,
        };
        assert!(!enemy.is_paused());
        enemy.kind = EnemyKind::Purple { pause: 5 };
        assert!(enemy.is_paused());
        enemy.kind = EnemyKind::Red;
        assert!(!enemy.is_paused());
    }
}
