//! Enemy AI
//!
//! Enemies patrol back and forth along a platform and never fall off it.
//! Each step moves the enemy by its velocity, then checks the new position
//! against the allowed band; leaving the band reverts the move and turns
//! the enemy around. Variant-specific behavior runs after the patrol move.

use rand::Rng;
use super::entity::{Enemy, EnemyKind, Platform, PURPLE_PAUSE_FRAMES};
use super::geometry::Rect;

/// Inset from the home platform's left edge
const HOME_MARGIN_LEFT: f32 = 5.0;
/// Inset from the home platform's right edge (covers the enemy's width)
const HOME_MARGIN_RIGHT: f32 = 35.0;
/// Vertical slack when searching for a supporting platform
const SUPPORT_ABOVE: f32 = 5.0;
const SUPPORT_BELOW: f32 = 10.0;
/// Per-step chance that a moving purple enemy stops for a while
const PURPLE_PAUSE_CHANCE: f64 = 0.01;

/// Horizontal range the enemy's x may occupy, open at both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatrolBand {
    pub left: f32,
    pub right: f32,
}

impl PatrolBand {
    pub fn contains(&self, x: f32) -> bool {
        x > self.left && x < self.right
    }
}

/// Band for an enemy at its current position, or `None` if nothing
/// supports it
pub fn patrol_band(enemy: &Enemy, platforms: &[Platform]) -> Option<PatrolBand> {
    if let Some(home) = enemy.home.and_then(|i| platforms.get(i)) {
        let p = &home.rect;
        return Some(PatrolBand {
            left: p.x + HOME_MARGIN_LEFT,
            right: p.right() - HOME_MARGIN_RIGHT,
        });
    }

    // No usable home: the last platform that currently supports the enemy wins
    platforms
        .iter()
        .rev()
        .find(|p| supports(&p.rect, &enemy.rect))
        .map(|p| PatrolBand {
            left: p.rect.x,
            right: p.rect.right() - enemy.rect.w,
        })
}

/// The enemy's feet are near the platform top and it overlaps horizontally
fn supports(platform: &Rect, enemy: &Rect) -> bool {
    let feet = enemy.bottom();
    feet >= platform.y - SUPPORT_ABOVE
        && feet <= platform.bottom() + SUPPORT_BELOW
        && enemy.right() > platform.x
        && enemy.x < platform.right()
}

/// Advance one enemy by one step
pub fn patrol<R: Rng + ?Sized>(enemy: &mut Enemy, platforms: &[Platform], rng: &mut R) {
    let old_x = enemy.rect.x;
    enemy.rect.x += enemy.vel_x;

    let on_band = patrol_band(enemy, platforms)
        .map(|band| band.contains(enemy.rect.x))
        .unwrap_or(false);
    if !on_band {
        enemy.vel_x = -enemy.vel_x;
        enemy.rect.x = old_x;
    }

    match &mut enemy.kind {
        EnemyKind::Red | EnemyKind::Pink => {}
        EnemyKind::Purple { pause } => {
            if *pause == 0 && rng.gen_bool(PURPLE_PAUSE_CHANCE) {
                *pause = PURPLE_PAUSE_FRAMES;
            }
            if *pause > 0 {
                *pause -= 1;
                enemy.rect.x = old_x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn enemy(x: f32, y: f32, vel_x: f32, kind: EnemyKind, home: Option<usize>) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, 30.0, 30.0),
            vel_x,
            kind,
            home,
        }
    }

    fn level_one_platforms() -> Vec<Platform> {
        vec![
            Platform::new(0.0, 450.0, 300.0, 50.0),
            Platform::new(400.0, 400.0, 150.0, 20.0),
        ]
    }

    #[test]
    fn test_moves_by_velocity() {
        let platforms = level_one_platforms();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut e = enemy(450.0, 360.0, -1.0, EnemyKind::Red, Some(1));
        patrol(&mut e, &platforms, &mut rng);
        assert_eq!(e.rect.x, 449.0);
        assert_eq!(e.vel_x, -1.0);
    }

    #[test]
    fn test_reverses_at_home_band_edge() {
        let platforms = level_one_platforms();
        let mut rng = SmallRng::seed_from_u64(0);
        // Band is (405, 515); moving to 405 is outside
        let mut e = enemy(406.0, 360.0, -1.0, EnemyKind::Red, Some(1));
        patrol(&mut e, &platforms, &mut rng);
        assert_eq!(e.rect.x, 406.0);
        assert_eq!(e.vel_x, 1.0);

        let mut e = enemy(514.0, 360.0, 1.0, EnemyKind::Red, Some(1));
        patrol(&mut e, &platforms, &mut rng);
        assert_eq!(e.rect.x, 514.0);
        assert_eq!(e.vel_x, -1.0);
    }

    #[test]
    fn test_patrol_never_leaves_band() {
        let platforms = level_one_platforms();
        let mut rng = SmallRng::seed_from_u64(9);
        let mut e = enemy(450.0, 360.0, 3.0, EnemyKind::Pink, Some(1));
        let mut reversals = 0;
        for _ in 0..2000 {
            let before = e.vel_x;
            patrol(&mut e, &platforms, &mut rng);
            if e.vel_x != before {
                reversals += 1;
            }
            assert!(e.rect.x > 405.0 && e.rect.x < 515.0, "escaped to {}", e.rect.x);
        }
        assert!(reversals > 10);
    }

    #[test]
    fn test_fallback_scan_uses_supporting_platform() {
        let platforms = level_one_platforms();
        let mut rng = SmallRng::seed_from_u64(0);
        // Home out of range: falls back to the scan, finds the ground
        let mut e = enemy(268.0, 420.0, 1.0, EnemyKind::Red, Some(17));
        let band = patrol_band(&e, &platforms).unwrap();
        assert_eq!(band, PatrolBand { left: 0.0, right: 270.0 });

        patrol(&mut e, &platforms, &mut rng);
        assert_eq!(e.rect.x, 269.0);
        patrol(&mut e, &platforms, &mut rng);
        assert_eq!(e.rect.x, 269.0);
        assert_eq!(e.vel_x, -1.0);
    }

    #[test]
    fn test_unsupported_enemy_just_turns() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut e = enemy(100.0, 50.0, 2.0, EnemyKind::Red, None);
        patrol(&mut e, &level_one_platforms(), &mut rng);
        assert_eq!(e.rect.x, 100.0);
        assert_eq!(e.vel_x, -2.0);
        patrol(&mut e, &[], &mut rng);
        assert_eq!(e.rect.x, 100.0);
        assert_eq!(e.vel_x, 2.0);
    }

    #[test]
    fn test_purple_pause_holds_position() {
        let platforms = level_one_platforms();
        let mut rng = SmallRng::seed_from_u64(3);
        let mut e = enemy(450.0, 360.0, 1.0, EnemyKind::Purple { pause: 10 }, Some(1));
        for _ in 0..10 {
            patrol(&mut e, &platforms, &mut rng);
            assert_eq!(e.rect.x, 450.0);
        }
        assert_eq!(e.kind, EnemyKind::Purple { pause: 0 });
    }

    #[test]
    fn test_purple_pause_lasts_full_window() {
        let platforms = vec![Platform::new(0.0, 400.0, 100_000.0, 20.0)];
        let mut rng = SmallRng::seed_from_u64(21);
        let mut e = enemy(500.0, 370.0, 1.0, EnemyKind::Purple { pause: 0 }, Some(0));

        // Run until a pause starts, then count the frames held in place
        let mut started = false;
        for _ in 0..20_000 {
            patrol(&mut e, &platforms, &mut rng);
            if e.is_paused() {
                started = true;
                break;
            }
        }
        assert!(started);
        assert_eq!(e.kind, EnemyKind::Purple { pause: PURPLE_PAUSE_FRAMES - 1 });

        let held_at = e.rect.x;
        for _ in 0..PURPLE_PAUSE_FRAMES - 1 {
            patrol(&mut e, &platforms, &mut rng);
            assert_eq!(e.rect.x, held_at);
        }
        assert!(!e.is_paused());
    }
}
