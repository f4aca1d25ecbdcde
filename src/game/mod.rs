//! Game Simulation Module
//!
//! The platformer core: plain entity records, per-step update functions and
//! the session that sequences them. Nothing here touches the window, audio
//! or input devices, so every rule can be exercised from unit tests.
//!
//! Key concepts:
//! - World: the live entity lists of the loaded level
//! - Session: score, lives, level number and the game-flow phase
//! - Event: sounds, HUD values and screen changes reported outward
//! - Renderer: a pure read of the post-step state

pub mod geometry;
pub mod entity;
pub mod player;
pub mod enemy;
pub mod coin;
pub mod particles;
pub mod camera;
pub mod level;
pub mod world;
pub mod session;
pub mod event;
pub mod runtime;
pub mod renderer;

// Re-export main types
pub use event::{GameEvent, HudSnapshot, Screen, SoundCue};
pub use level::{LevelCatalog, Theme};
pub use runtime::FrameClock;
pub use session::{Phase, Session};
pub use world::World;
