//! Event System
//!
//! The simulation never talks to audio or UI directly. It pushes events
//! into a queue during a step; the app drains the queue once per display
//! frame and forwards each event to the collaborator that cares.
//!
//! Example flow:
//! 1. Coin pickup → `Sound(Coin)` + `HudChanged`
//! 2. App drains → audio notifier plays the cue, UI sink updates the HUD

/// A queue for events of a single type.
/// Events are collected during the frame and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    /// Check if there are any events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events in queue
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Named sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Coin,
    EnemyHit,
    LevelComplete,
    GameOver,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Jump => "jump",
            SoundCue::Coin => "coin",
            SoundCue::EnemyHit => "enemyHit",
            SoundCue::LevelComplete => "levelComplete",
            SoundCue::GameOver => "gameOver",
        }
    }
}

/// Modal screens the UI can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Instructions,
    Playing,
    Paused,
    LevelComplete { bonus: u32 },
    GameOver,
    GameWon,
}

/// Values the HUD displays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudSnapshot {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
}

/// Everything the simulation reports outward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Sound(SoundCue),
    HudChanged(HudSnapshot),
    ScreenChanged(Screen),
}
