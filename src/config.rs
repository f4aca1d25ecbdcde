//! Startup configuration
//!
//! Read once from `assets/config.ron`. Every field has a default, so a
//! partial file (or no file at all) is valid. Tuning constants live here
//! rather than in the simulation so they can be tweaked without a rebuild.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Default location of the config file, relative to the working directory
pub const CONFIG_PATH: &str = "assets/config.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[cfg(test)]
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Read(e.to_string())
    }
}

/// Logical size of the play field in world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1000.0, height: 500.0 }
    }
}

/// Player movement and session constants.
///
/// All rates are per simulation step (one step = one frame at `sim_hz`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub width: f32,
    pub height: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Upward velocity applied on jump
    pub jump_power: f32,
    pub acceleration: f32,
    /// Velocity multiplier when no direction is held
    pub friction: f32,
    /// Below this |velX| friction snaps to zero
    pub stop_threshold: f32,
    pub gravity: f32,
    pub terminal_velocity: f32,
    /// Frames after leaving a platform during which a jump is still accepted
    pub coyote_frames: u32,
    /// Frames of invulnerability after losing a life
    pub invulnerability_frames: u32,
    /// Distance below the viewport bottom that counts as a fall
    pub fall_margin: f32,
    /// Exponential camera smoothing factor per step
    pub camera_smoothing: f32,
    pub starting_lives: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 62.0,
            height: 70.0,
            spawn_x: 50.0,
            spawn_y: 350.0,
            max_speed: 5.0,
            jump_power: 15.0,
            acceleration: 0.8,
            friction: 0.85,
            stop_threshold: 0.1,
            gravity: 0.8,
            terminal_velocity: 16.0,
            coyote_frames: 8,
            invulnerability_frames: 120,
            fall_margin: 100.0,
            camera_smoothing: 0.1,
            starting_lives: 3,
        }
    }
}

/// How sprites are obtained at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssetStrategy {
    /// Load PNG sprites from `root`, falling back to placeholders per key
    #[default]
    Sprites,
    /// Skip loading entirely and draw placeholders
    Placeholders,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    pub strategy: AssetStrategy,
    pub root: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            strategy: AssetStrategy::Sprites,
            root: "assets/sprites".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub muted: bool,
    /// Master volume (0.0 to 1.0)
    pub volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { muted: false, volume: 0.5 }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: Viewport,
    pub player: PlayerTuning,
    pub assets: AssetSettings,
    pub audio: AudioSettings,
    /// Fixed simulation rate in steps per second
    pub sim_hz: f64,
    /// Cap on catch-up steps after a long frame
    pub max_steps_per_frame: u32,
    /// RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
    pub debug_overlay: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            player: PlayerTuning::default(),
            assets: AssetSettings::default(),
            audio: AudioSettings::default(),
            sim_hz: 60.0,
            max_steps_per_frame: 4,
            seed: None,
            debug_overlay: false,
        }
    }
}

impl GameConfig {
    /// Parse a config from RON text
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        Ok(config.sanitized())
    }

    /// Load a config file from disk
    #[cfg(test)]
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Read and parse through macroquad's file API (works on WASM too)
    pub async fn fetch(path: &str) -> Result<Self, ConfigError> {
        let contents = macroquad::file::load_string(path)
            .await
            .map_err(|e| ConfigError::Read(e.to_string()))?;
        Self::from_ron_str(&contents)
    }

    /// Like [`GameConfig::fetch`], but any failure is logged and replaced
    /// by defaults.
    pub async fn load_or_default(path: &str) -> Self {
        match Self::fetch(path).await {
            Ok(config) => {
                log::info!("Loaded config from {}", path);
                config
            }
            Err(ConfigError::Read(e)) => {
                log::info!("No config at {} ({}), using defaults", path, e);
                Self::default()
            }
            Err(e) => {
                log::warn!("{} is invalid, using defaults: {}", path, e);
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or break the frame loop
    fn sanitized(mut self) -> Self {
        if !self.sim_hz.is_finite() || self.sim_hz < 1.0 {
            self.sim_hz = 60.0;
        }
        self.max_steps_per_frame = self.max_steps_per_frame.max(1);
        self.audio.volume = self.audio.volume.clamp(0.0, 1.0);
        self
    }
}
