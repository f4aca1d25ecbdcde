//! Game flow
//!
//! `Session` owns the world plus score, lives and the current level, and
//! drives the per-step update order:
//!
//! player → camera → enemies → coins → particles/effects → goal
//!
//! Everything the outside world needs to hear about (sounds, HUD values,
//! screen changes) is pushed into `events` and drained by the app.

use rand::Rng;
use super::coin;
use super::enemy;
use super::event::{EventQueue, GameEvent, HudSnapshot, Screen, SoundCue};
use super::geometry::overlaps;
use super::level::LevelCatalog;
use super::particles::{Particle, ParticleKind};
use super::player;
use super::world::World;
use crate::config::{PlayerTuning, Viewport};
use crate::input::InputFrame;

/// Particles in a coin pickup burst
const COIN_BURST: usize = 6;
/// Particles when the player dies from falling / from an enemy
const FALL_BURST: usize = 20;
const ENEMY_BURST: usize = 12;
const FALL_SHAKE: f32 = 25.0;
const ENEMY_SHAKE: f32 = 15.0;
const GAME_OVER_SHAKE: f32 = 30.0;
/// Steps between reaching the goal and the celebration burst
const CELEBRATION_DELAY: u32 = 30;
const CELEBRATION_BURST: usize = 30;
/// Victory confetti: count and steps between particles
const VICTORY_PARTICLES: u32 = 50;
const VICTORY_INTERVAL: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No game in progress (title screens)
    Idle,
    Running,
    Paused,
    LevelComplete { bonus: u32 },
    GameOver,
    GameWon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Fall,
    Enemy,
}

/// Delayed particle effects that run on the end-of-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Celebration {
    None,
    /// One burst at the view center once `delay` reaches zero
    Burst { delay: u32 },
    /// Confetti, one particle every few steps
    Victory { remaining: u32, timer: u32 },
}

pub struct Session {
    pub world: World,
    catalog: LevelCatalog,
    pub score: u32,
    pub lives: u32,
    /// Current level number, 1-indexed
    pub level: u32,
    pub phase: Phase,
    pub events: EventQueue<GameEvent>,
    celebration: Celebration,
}

impl Session {
    pub fn new(catalog: LevelCatalog, tuning: PlayerTuning, viewport: Viewport, seed: u64) -> Self {
        let lives = tuning.starting_lives;
        Self {
            world: World::new(tuning, viewport, seed),
            catalog,
            score: 0,
            lives,
            level: 1,
            phase: Phase::Idle,
            events: EventQueue::new(),
            celebration: Celebration::None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.lives,
            level: self.level,
        }
    }

    fn hud_changed(&mut self) {
        let hud = self.hud();
        self.events.send(GameEvent::HudChanged(hud));
    }

    fn sound(&mut self, cue: SoundCue) {
        self.events.send(GameEvent::Sound(cue));
    }

    fn screen(&mut self, screen: Screen) {
        self.events.send(GameEvent::ScreenChanged(screen));
    }

    // =========================================================================
    // Flow
    // =========================================================================

    /// Begin a new game from level 1
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = self.world.tuning.starting_lives;
        self.celebration = Celebration::None;
        if !self.load_level(1) {
            log::warn!("Level 1 missing from catalog");
            return;
        }
        self.phase = Phase::Running;
        log::info!("New game started");
        self.screen(Screen::Playing);
        self.hud_changed();
    }

    /// Load a level by number. Unknown numbers leave everything unchanged.
    pub fn load_level(&mut self, number: u32) -> bool {
        let Some(level) = self.catalog.get(number) else {
            log::warn!("No level {}, ignoring load", number);
            return false;
        };
        self.world.load_level(level);
        self.level = number;
        log::info!(
            "Loaded level {} ({:?}, {} coins, {} enemies)",
            number, level.theme, level.coins.len(), level.enemies.len()
        );
        true
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => {
                self.phase = Phase::Paused;
                self.screen(Screen::Paused);
            }
            Phase::Paused => {
                self.phase = Phase::Running;
                self.screen(Screen::Playing);
            }
            _ => {}
        }
    }

    /// Advance from the level-complete screen
    pub fn next_level(&mut self) {
        if !matches!(self.phase, Phase::LevelComplete { .. }) {
            return;
        }
        let next = self.level + 1;
        if next as usize > self.catalog.len() {
            self.win();
            return;
        }
        self.celebration = Celebration::None;
        self.load_level(next);
        self.phase = Phase::Running;
        self.screen(Screen::Playing);
        self.hud_changed();
    }

    /// Throw away the current game and start over
    pub fn restart(&mut self) {
        self.world.particles.clear();
        self.start();
    }

    /// Leave the game for the title screen
    pub fn stop(&mut self) {
        self.phase = Phase::Idle;
        self.celebration = Celebration::None;
        self.world.particles.clear();
        self.world.shake = 0.0;
        self.screen(Screen::Start);
    }

    // =========================================================================
    // Simulation
    // =========================================================================

    /// Advance one simulation step
    pub fn step(&mut self, input: &InputFrame) {
        match self.phase {
            Phase::Running => self.simulate(input),
            Phase::LevelComplete { .. } | Phase::GameOver | Phase::GameWon => {
                self.tick_celebration();
                self.world.tick_effects();
            }
            Phase::Idle | Phase::Paused => {}
        }
    }

    fn simulate(&mut self, input: &InputFrame) {
        self.update_player(input);
        self.update_camera();
        self.update_enemies();
        self.update_coins();
        self.world.tick_effects();
        self.check_goal();
    }

    fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    fn update_player(&mut self, input: &InputFrame) {
        let world = &mut self.world;
        let result = player::step(
            &mut world.player,
            &world.platforms,
            input,
            &world.tuning,
            &world.viewport,
        );
        if result.jumped {
            self.sound(SoundCue::Jump);
        }
        if result.fell {
            self.handle_death(DeathCause::Fall);
        }
    }

    fn update_camera(&mut self) {
        let world = &mut self.world;
        world.camera.follow(
            world.player.rect.x,
            world.level_width,
            world.viewport.width,
            world.tuning.camera_smoothing,
        );
    }

    fn update_enemies(&mut self) {
        for i in 0..self.world.enemies.len() {
            let world = &mut self.world;
            enemy::patrol(&mut world.enemies[i], &world.platforms, &mut world.rng);

            if !self.running() || self.world.player.invulnerable {
                continue;
            }
            if overlaps(&self.world.player.rect, &self.world.enemies[i].rect) {
                self.handle_death(DeathCause::Enemy);
            }
        }
    }

    fn update_coins(&mut self) {
        coin::animate(&mut self.world.coins);
        if !self.running() {
            return;
        }

        let player = self.world.player.rect;
        let collected = coin::collect(&mut self.world.coins, &player);
        for (x, y) in collected {
            self.score = self.score.saturating_add(coin::COIN_SCORE);
            let world = &mut self.world;
            world.particles.spawn_burst(&mut world.rng, x, y, COIN_BURST, ParticleKind::Coin);
            log::debug!("Coin collected at ({}, {}), score {}", x, y, self.score);
            self.sound(SoundCue::Coin);
            self.hud_changed();
        }
    }

    fn check_goal(&mut self) {
        if !self.running() || !coin::reached_goal(&self.world.goal, &self.world.player.rect) {
            return;
        }

        let bonus = coin::goal_bonus(self.world.coins.len());
        self.score = self.score.saturating_add(bonus);
        self.sound(SoundCue::LevelComplete);
        self.hud_changed();
        log::info!("Level {} complete, bonus {}", self.level, bonus);

        if (self.level as usize) < self.catalog.len() {
            self.phase = Phase::LevelComplete { bonus };
            self.celebration = Celebration::Burst { delay: CELEBRATION_DELAY };
            self.screen(Screen::LevelComplete { bonus });
        } else {
            self.win();
        }
    }

    fn win(&mut self) {
        self.phase = Phase::GameWon;
        self.celebration = Celebration::Victory { remaining: VICTORY_PARTICLES, timer: 0 };
        log::info!("Game won with score {}", self.score);
        self.screen(Screen::GameWon);
    }

    /// Lose a life, or end the game on the last one. No effect while the
    /// player is invulnerable or outside active play.
    pub fn handle_death(&mut self, cause: DeathCause) {
        if !self.running() || self.world.player.invulnerable {
            return;
        }

        self.lives = self.lives.saturating_sub(1);
        let (shake, burst) = match cause {
            DeathCause::Fall => (FALL_SHAKE, FALL_BURST),
            DeathCause::Enemy => (ENEMY_SHAKE, ENEMY_BURST),
        };
        let world = &mut self.world;
        world.start_shake(shake);
        let (cx, cy) = world.player.rect.center();
        world.particles.spawn_burst(&mut world.rng, cx, cy, burst, ParticleKind::Hit);
        log::debug!("Player died ({:?}), {} lives left", cause, self.lives);

        self.sound(SoundCue::EnemyHit);
        self.hud_changed();

        if self.lives == 0 {
            self.phase = Phase::GameOver;
            self.celebration = Celebration::None;
            self.sound(SoundCue::GameOver);
            self.world.start_shake(GAME_OVER_SHAKE);
            log::info!("Game over on level {} with score {}", self.level, self.score);
            self.screen(Screen::GameOver);
        } else {
            self.world.reset_player();
            let frames = self.world.tuning.invulnerability_frames;
            self.world.player.make_invulnerable(frames);
        }
    }

    fn tick_celebration(&mut self) {
        let world = &mut self.world;
        match &mut self.celebration {
            Celebration::None => {}
            Celebration::Burst { delay } => {
                *delay = delay.saturating_sub(1);
                if *delay == 0 {
                    let x = world.viewport.width / 2.0 + world.camera.x;
                    let y = world.viewport.height / 2.0;
                    world.particles.spawn_burst(&mut world.rng, x, y, CELEBRATION_BURST, ParticleKind::Coin);
                    self.celebration = Celebration::None;
                }
            }
            Celebration::Victory { remaining, timer } => {
                if *timer % VICTORY_INTERVAL == 0 {
                    let x = world.rng.gen_range(0.0..world.viewport.width) + world.camera.x;
                    let y = world.rng.gen_range(0.0..world.viewport.height);
                    let kind = if world.rng.gen_bool(0.5) { ParticleKind::Coin } else { ParticleKind::Hit };
                    let particle = Particle::random(&mut world.rng, x, y, kind);
                    world.particles.spawn(particle);
                    *remaining -= 1;
                }
                *timer += 1;
                if *remaining == 0 {
                    self.celebration = Celebration::None;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{Enemy, EnemyKind};
    use crate::game::geometry::Rect;
    use crate::input::ActionSet;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn session() -> Session {
        let catalog = LevelCatalog::builtin().unwrap();
        let mut s = Session::new(catalog, PlayerTuning::default(), Viewport::default(), 11);
        s.start();
        s.events.clear();
        s
    }

    fn idle() -> InputFrame {
        InputFrame::default()
    }

    /// An enemy that stays put: no supporting platform, so every move reverts
    fn stuck_enemy(x: f32, y: f32) -> Enemy {
        Enemy {
            rect: Rect::new(x, y, 30.0, 30.0),
            vel_x: 1.0,
            kind: EnemyKind::Red,
            home: None,
        }
    }

    fn drained(s: &mut Session) -> Vec<GameEvent> {
        s.events.drain().collect()
    }

    #[test]
    fn test_start_state() {
        let catalog = LevelCatalog::builtin().unwrap();
        let mut s = Session::new(catalog, PlayerTuning::default(), Viewport::default(), 1);
        assert_eq!(s.phase, Phase::Idle);
        s.start();
        assert_eq!(s.phase, Phase::Running);
        assert_eq!((s.score, s.lives, s.level), (0, 3, 1));
        let events = drained(&mut s);
        assert!(events.contains(&GameEvent::ScreenChanged(Screen::Playing)));
        assert!(events.contains(&GameEvent::HudChanged(HudSnapshot { score: 0, lives: 3, level: 1 })));
    }

    #[test]
    fn test_coin_pickup_scores_and_bursts() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.particles.clear();
        // Overlap the coin at (470, 360, 20, 20)
        s.world.player.rect.x = 440.0;
        s.world.player.rect.y = 330.0;
        let coins_before = s.world.coins.len();

        s.update_coins();

        assert_eq!(s.score, 100);
        assert_eq!(s.world.coins.len(), coins_before - 1);
        assert_eq!(s.world.particles.len(), 6);
        for p in s.world.particles.iter() {
            assert_eq!(p.kind, ParticleKind::Coin);
            assert!((p.x - 480.0).abs() <= 5.0);
            assert!((p.y - 370.0).abs() <= 5.0);
        }
        let events = drained(&mut s);
        assert!(events.contains(&GameEvent::Sound(SoundCue::Coin)));

        // Still overlapping the same spot: nothing more to collect
        s.update_coins();
        assert_eq!(s.score, 100);
    }

    #[test]
    fn test_coin_pickup_through_full_step() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.player.rect.x = 440.0;
        s.world.player.rect.y = 330.0;
        s.step(&idle());
        assert_eq!(s.score, 100);
        assert_eq!(s.world.coins.len(), 4);
    }

    #[test]
    fn test_last_life_enemy_contact_is_game_over() {
        let mut s = session();
        s.lives = 1;
        s.world.enemies = vec![stuck_enemy(60.0, 380.0), stuck_enemy(70.0, 385.0)];

        s.step(&idle());

        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, Phase::GameOver);
        assert_eq!(s.world.shake, 30.0 * 0.9);
        let events = drained(&mut s);
        assert!(events.contains(&GameEvent::Sound(SoundCue::GameOver)));
        assert!(events.contains(&GameEvent::ScreenChanged(Screen::GameOver)));

        for _ in 0..50 {
            s.step(&idle());
        }
        assert_eq!(s.lives, 0);
        assert_eq!(s.phase, Phase::GameOver);
    }

    #[test]
    fn test_enemy_death_respawns_with_invulnerability() {
        let mut s = session();
        s.world.player.rect.x = 300.0;
        s.world.enemies = vec![stuck_enemy(320.0, 370.0)];
        s.world.particles.clear();

        s.step(&idle());

        assert_eq!(s.lives, 2);
        assert_eq!(s.phase, Phase::Running);
        assert!(s.world.player.invulnerable);
        assert_eq!(s.world.player.invuln_timer, 120);
        assert_eq!(s.world.player.rect.x, 50.0);
        assert_eq!(s.world.player.rect.y, 350.0);
        assert_eq!(s.world.particles.len(), 12);
        assert!(s.world.particles.iter().all(|p| p.kind == ParticleKind::Hit));
    }

    #[test]
    fn test_invulnerable_player_ignores_enemies() {
        let mut s = session();
        s.world.enemies = vec![stuck_enemy(60.0, 380.0)];
        s.world.player.make_invulnerable(120);

        for frame in 1..120 {
            s.step(&idle());
            assert_eq!(s.lives, 3, "hit while invulnerable at frame {}", frame);
            assert!(s.world.player.invulnerable);
        }
        // Window closes at the start of step 120, and the enemy is still there
        s.step(&idle());
        assert_eq!(s.lives, 2);
    }

    #[test]
    fn test_direct_death_ignored_while_invulnerable() {
        let mut s = session();
        s.world.player.make_invulnerable(10);
        s.handle_death(DeathCause::Enemy);
        assert_eq!(s.lives, 3);
        assert!(s.events.is_empty());
    }

    #[test]
    fn test_fall_death() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.platforms.clear();
        s.world.particles.clear();
        s.world.player.rect.y = 640.0;

        s.step(&idle());

        assert_eq!(s.lives, 2);
        assert_eq!(s.world.particles.len(), 20);
        // Shake starts at 25 and decays once during the same step
        assert!((s.world.shake - 22.5).abs() < 1e-4);
    }

    #[test]
    fn test_goal_bonus_for_remaining_coins() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.coins.truncate(3);
        s.world.player.rect.x = 1580.0;
        s.world.player.rect.y = 380.0;

        s.step(&idle());

        assert_eq!(s.score, 150);
        assert_eq!(s.phase, Phase::LevelComplete { bonus: 150 });
        let events = drained(&mut s);
        assert!(events.contains(&GameEvent::Sound(SoundCue::LevelComplete)));
        assert!(events.contains(&GameEvent::ScreenChanged(Screen::LevelComplete { bonus: 150 })));
    }

    #[test]
    fn test_level_complete_celebration_after_delay() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.coins.clear();
        s.world.player.rect.x = 1580.0;
        s.world.player.rect.y = 380.0;
        s.step(&idle());
        assert_eq!(s.phase, Phase::LevelComplete { bonus: 0 });
        s.world.particles.clear();

        for _ in 0..29 {
            s.step(&idle());
        }
        assert!(s.world.particles.is_empty());
        s.step(&idle());
        assert_eq!(s.world.particles.len(), 30);
    }

    #[test]
    fn test_next_level_and_win() {
        let mut s = session();
        s.world.enemies.clear();
        s.world.player.rect.x = 1580.0;
        s.world.player.rect.y = 380.0;
        s.step(&idle());
        assert!(matches!(s.phase, Phase::LevelComplete { .. }));

        s.next_level();
        assert_eq!(s.phase, Phase::Running);
        assert_eq!(s.level, 2);
        assert_eq!(s.world.player.rect.x, 50.0);

        // Skip straight to the last level and finish it
        s.load_level(3);
        let goal = s.world.goal.rect;
        s.world.enemies.clear();
        s.world.player.rect.x = goal.x - 20.0;
        s.world.player.rect.y = goal.y;
        s.world.platforms.push(crate::game::entity::Platform::new(goal.x - 100.0, goal.bottom(), 300.0, 50.0));
        s.step(&idle());
        assert_eq!(s.phase, Phase::GameWon);
    }

    #[test]
    fn test_victory_confetti_runs_out() {
        let mut s = session();
        s.phase = Phase::LevelComplete { bonus: 0 };
        s.level = 3;
        s.next_level();
        assert_eq!(s.phase, Phase::GameWon);

        let mut spawned = 0;
        for _ in 0..(VICTORY_PARTICLES * VICTORY_INTERVAL) {
            let before = s.world.particles.len();
            s.step(&idle());
            if s.world.particles.len() > before {
                spawned += 1;
            }
        }
        assert!(spawned > 0);
        assert_eq!(s.celebration, Celebration::None);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut s = session();
        s.toggle_pause();
        assert_eq!(s.phase, Phase::Paused);
        let y = s.world.player.rect.y;
        for _ in 0..30 {
            s.step(&idle());
        }
        assert_eq!(s.world.player.rect.y, y);
        s.toggle_pause();
        assert_eq!(s.phase, Phase::Running);
        s.step(&idle());
        assert!(s.world.player.rect.y > y);
    }

    #[test]
    fn test_unknown_level_is_noop() {
        let mut s = session();
        s.world.player.rect.x = 123.0;
        assert!(!s.load_level(99));
        assert_eq!(s.level, 1);
        assert_eq!(s.world.player.rect.x, 123.0);
    }

    #[test]
    fn test_restart_resets_score() {
        let mut s = session();
        s.score = 900;
        s.lives = 1;
        s.phase = Phase::GameOver;
        s.restart();
        assert_eq!((s.score, s.lives, s.level), (0, 3, 1));
        assert_eq!(s.phase, Phase::Running);
        assert!(s.world.particles.is_empty());
    }

    #[test]
    fn test_score_never_decreases() {
        let mut s = session();
        let mut rng = SmallRng::seed_from_u64(99);
        let mut previous = ActionSet::empty();
        let mut last_score = s.score;

        for _ in 0..5000 {
            let held = ActionSet::from_bits_truncate(rng.gen::<u16>())
                & (ActionSet::LEFT | ActionSet::RIGHT | ActionSet::JUMP);
            let frame = InputFrame::from_held(held, previous);
            previous = held;

            s.step(&frame);
            assert!(s.score >= last_score);
            last_score = s.score;

            match s.phase {
                Phase::LevelComplete { .. } => s.next_level(),
                Phase::GameOver | Phase::GameWon => break,
                _ => {}
            }
        }
    }
}
