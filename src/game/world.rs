//! Simulation context
//!
//! `World` owns every live entity list for the current level plus the
//! effect state that survives across steps (particles, camera, shake) and
//! the seeded RNG. Rendering reads it; only the session mutates it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use super::camera::Camera;
use super::entity::{Coin, Enemy, Goal, Platform, Player};
use super::level::{LevelData, Theme};
use super::particles::ParticlePool;
use crate::config::{PlayerTuning, Viewport};

/// Upper bound (exclusive) of a coin's starting phase
const COIN_PHASE_RANGE: f32 = 60.0;
/// Shake multiplier per step
const SHAKE_DECAY: f32 = 0.9;
/// Shake below this snaps to zero
const SHAKE_CUTOFF: f32 = 0.5;

pub struct World {
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub goal: Goal,
    pub particles: ParticlePool,
    pub camera: Camera,
    pub theme: Theme,
    pub level_width: f32,
    /// Screen shake intensity in world units
    pub shake: f32,
    pub rng: SmallRng,
    pub tuning: PlayerTuning,
    pub viewport: Viewport,
}

impl World {
    /// An empty world; call `load_level` before stepping it
    pub fn new(tuning: PlayerTuning, viewport: Viewport, seed: u64) -> Self {
        Self {
            player: Player::new(&tuning),
            platforms: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            goal: Goal::default(),
            particles: ParticlePool::new(),
            camera: Camera::new(),
            theme: Theme::default(),
            level_width: viewport.width,
            shake: 0.0,
            rng: SmallRng::seed_from_u64(seed),
            tuning,
            viewport,
        }
    }

    /// Replace the live entity lists with a fresh copy of a level.
    /// Particles are left alone so effects carry across the transition.
    pub fn load_level(&mut self, level: &LevelData) {
        self.platforms = level.platforms.clone();
        self.enemies = level
            .enemies
            .iter()
            .map(|spawn| Enemy {
                rect: spawn.rect,
                vel_x: spawn.vel_x,
                kind: spawn.kind.spawn_kind(),
                home: spawn.home,
            })
            .collect();

        let rng = &mut self.rng;
        self.coins = level
            .coins
            .iter()
            .map(|rect| Coin::new(*rect, rng.gen_range(0.0..COIN_PHASE_RANGE)))
            .collect();

        self.goal = Goal { rect: level.goal };
        self.theme = level.theme;
        self.level_width = level.width();
        self.shake = 0.0;

        self.player = Player::new(&self.tuning);
        self.camera.reset();
    }

    /// Put the player back at the spawn point after a death
    pub fn reset_player(&mut self) {
        self.player.respawn(&self.tuning);
        self.camera.reset();
    }

    /// Start a shake of the given intensity, replacing any current one
    pub fn start_shake(&mut self, intensity: f32) {
        self.shake = intensity;
    }

    /// Advance effects that keep running outside gameplay
    pub fn tick_effects(&mut self) {
        self.particles.update();
        if self.shake > 0.0 {
            self.shake *= SHAKE_DECAY;
            if self.shake < SHAKE_CUTOFF {
                self.shake = 0.0;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::EnemyKind;
    use crate::game::level::LevelCatalog;

    fn world() -> World {
        World::new(PlayerTuning::default(), Viewport::default(), 7)
    }

    #[test]
    fn test_load_level_populates_lists() {
        let catalog = LevelCatalog::builtin().unwrap();
        let mut world = world();
        world.load_level(catalog.get(2).unwrap());

        assert_eq!(world.theme, Theme::Desert);
        assert!(!world.platforms.is_empty());
        assert!(world.enemies.iter().all(|e| e.kind == EnemyKind::Purple { pause: 0 }));
        assert_eq!(world.coins.len(), catalog.get(2).unwrap().coins.len());
        assert!(world.coins.iter().all(|c| (0.0..60.0).contains(&c.phase)));
        assert_eq!(world.player.rect.x, 50.0);
        assert_eq!(world.camera.x, 0.0);
    }

    #[test]
    fn test_reload_restores_coins() {
        let catalog = LevelCatalog::builtin().unwrap();
        let level = catalog.get(1).unwrap();
        let mut world = world();
        world.load_level(level);
        world.coins.clear();
        world.load_level(level);
        assert_eq!(world.coins.len(), level.coins.len());
    }

    #[test]
    fn test_reset_player() {
        let catalog = LevelCatalog::builtin().unwrap();
        let mut world = world();
        world.load_level(catalog.get(1).unwrap());
        world.player.rect.x = 900.0;
        world.player.vel_x = 3.0;
        world.camera.x = 500.0;

        world.reset_player();
        assert_eq!(world.player.rect.x, 50.0);
        assert_eq!(world.player.vel_x, 0.0);
        assert_eq!(world.camera.x, 0.0);
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut world = world();
        world.start_shake(25.0);
        world.tick_effects();
        assert!((world.shake - 22.5).abs() < 1e-4);
        for _ in 0..100 {
            world.tick_effects();
        }
        assert_eq!(world.shake, 0.0);
    }
}
