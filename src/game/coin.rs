//! Coins and the goal flag

use super::entity::{Coin, Goal};
use super::geometry::{overlaps, Rect};

/// Phase advance per step
const PHASE_STEP: f32 = 0.2;
/// Amplitude of the per-step bob increment
const BOB_AMPLITUDE: f32 = 0.5;
/// Score for one coin
pub const COIN_SCORE: u32 = 100;
/// End-of-level bonus per uncollected coin
pub const COIN_BONUS: u32 = 50;

/// Advance every coin's spin and bob
pub fn animate(coins: &mut [Coin]) {
    for coin in coins {
        coin.phase += PHASE_STEP;
        coin.bob += coin.phase.sin() * BOB_AMPLITUDE;
    }
}

/// Remove every coin the player overlaps. Returns the centers of the
/// removed coins so the caller can score them and spawn effects.
pub fn collect(coins: &mut Vec<Coin>, player: &Rect) -> Vec<(f32, f32)> {
    let mut centers = Vec::new();
    coins.retain(|coin| {
        if overlaps(player, &coin.rect) {
            centers.push(coin.rect.center());
            false
        } else {
            true
        }
    });
    centers
}

/// Bonus for finishing with `remaining` coins uncollected
pub fn goal_bonus(remaining: usize) -> u32 {
    COIN_BONUS.saturating_mul(remaining as u32)
}

pub fn reached_goal(goal: &Goal, player: &Rect) -> bool {
    overlaps(player, &goal.rect)
}
