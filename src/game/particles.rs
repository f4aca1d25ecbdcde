//! Particle System
//!
//! Short-lived sprites spawned in bursts by pickups, deaths and
//! celebrations. Life is counted in simulation steps: a particle spawned
//! with life `L` survives exactly `L` calls to `update`.

use rand::Rng;
use std::f32::consts::TAU;

/// Maximum number of live particles. Spawns past this are dropped.
pub const MAX_PARTICLES: usize = 512;

/// Downward acceleration per step
const GRAVITY: f32 = 0.4;
/// Horizontal velocity multiplier per step
const DRAG: f32 = 0.98;

/// Visual flavor of a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Gold sparkle from coins and celebrations
    Coin,
    /// Red shard from deaths
    Hit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    /// Remaining life in steps
    pub life: u32,
    /// Life at spawn, kept for the fade
    pub max_life: u32,
    pub kind: ParticleKind,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Particle {
    /// Spawn a particle near `(x, y)` with the randomized burst spread
    pub fn random<R: Rng + ?Sized>(rng: &mut R, x: f32, y: f32, kind: ParticleKind) -> Self {
        let life = rng.gen_range(30..50);
        Self {
            x: x + rng.gen_range(-5.0..5.0),
            y: y + rng.gen_range(-5.0..5.0),
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-12.0..-2.0),
            life,
            max_life: life,
            kind,
            size: rng.gen_range(2.0..8.0),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: rng.gen_range(-0.15..0.15),
        }
    }

    /// Opacity in [0, 1], fading linearly with remaining life
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// The particle pool. Order is irrelevant; dead particles are swapped out.
#[derive(Debug, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn new() -> Self {
        Self { particles: Vec::with_capacity(MAX_PARTICLES) }
    }

    /// Add one particle. Returns false if the pool is full or the particle
    /// has no life.
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= MAX_PARTICLES || particle.life == 0 {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Spawn a burst of `count` randomized particles around an origin
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        x: f32,
        y: f32,
        count: usize,
        kind: ParticleKind,
    ) {
        for _ in 0..count {
            if !self.spawn(Particle::random(rng, x, y, kind)) {
                break;
            }
        }
    }

    /// Advance every particle one step and discard the expired ones
    pub fn update(&mut self) {
        for p in &mut self.particles {
            p.x += p.vel_x;
            p.y += p.vel_y;
            p.vel_y += GRAVITY;
            p.vel_x *= DRAG;
            p.rotation += p.rotation_speed;
            p.life = p.life.saturating_sub(1);
        }
        self.particles.retain(|p| p.life > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Kill all particles
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
