//! Input state management
//!
//! Polls keyboard (macroquad), gamepad and touch once per display frame and
//! folds them into one `InputFrame`. Edges are computed here against the
//! previous frame, so every source gets the same "pressed" semantics.

use macroquad::prelude::*;
use super::actions::{ActionSet, InputFrame};
use super::gamepad::Gamepad;
use super::touch::TouchGestures;

/// Unified input state for keyboard, gamepad and touch
pub struct InputState {
    gamepad: Gamepad,
    touch: TouchGestures,
    previous: ActionSet,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            gamepad: Gamepad::new(),
            touch: TouchGestures::new(),
            previous: ActionSet::empty(),
        }
    }

    /// Call once per display frame
    pub fn sample(&mut self) -> InputFrame {
        self.gamepad.poll();
        self.poll_touches();

        let held = keyboard_actions() | self.gamepad.actions() | self.touch.tick();
        let frame = InputFrame::from_held(held, self.previous);
        self.previous = held;
        frame
    }

    fn poll_touches(&mut self) {
        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => self.touch.touch_started(touch.position.x, touch.position.y),
                TouchPhase::Ended => self.touch.touch_ended(touch.position.x, touch.position.y),
                TouchPhase::Cancelled => self.touch.touch_cancelled(),
                TouchPhase::Moved | TouchPhase::Stationary => {}
            }
        }
    }

    /// Check if any gamepad is connected
    pub fn has_gamepad(&self) -> bool {
        self.gamepad.has_gamepad()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keys currently held, mapped to actions
fn keyboard_actions() -> ActionSet {
    let mut actions = ActionSet::empty();
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_key_down(*k));

    if any(&[KeyCode::Left, KeyCode::A]) {
        actions |= ActionSet::LEFT;
    }
    if any(&[KeyCode::Right, KeyCode::D]) {
        actions |= ActionSet::RIGHT;
    }
    if any(&[KeyCode::Space, KeyCode::Up, KeyCode::W]) {
        actions |= ActionSet::JUMP;
    }
    if is_key_down(KeyCode::P) {
        actions |= ActionSet::PAUSE;
    }
    if is_key_down(KeyCode::M) {
        actions |= ActionSet::MUTE;
    }
    if is_key_down(KeyCode::R) {
        actions |= ActionSet::RESTART;
    }
    if is_key_down(KeyCode::Escape) {
        actions |= ActionSet::MENU;
    }
    if any(&[KeyCode::Enter, KeyCode::KpEnter, KeyCode::Space]) {
        actions |= ActionSet::CONFIRM;
    }
    if is_key_down(KeyCode::I) {
        actions |= ActionSet::INSTRUCTIONS;
    }

    let ctrl_d = any(&[KeyCode::LeftControl, KeyCode::RightControl]) && is_key_down(KeyCode::D);
    if is_key_down(KeyCode::F3) || ctrl_d {
        actions |= ActionSet::TOGGLE_DEBUG;
    }
    // Ctrl+D is a debug chord, not a move
    if ctrl_d && !is_key_down(KeyCode::Right) {
        actions.remove(ActionSet::RIGHT);
    }
    actions
}
