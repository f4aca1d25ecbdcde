//! Gamepad support
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: No gamepad backend; reports nothing connected

use super::actions::ActionSet;

// Standard gamepad button indices (matches Web Gamepad API standard mapping)
pub mod button {
    pub const A: u32 = 0;           // South
    pub const B: u32 = 1;           // East
    pub const X: u32 = 2;           // West
    pub const Y: u32 = 3;           // North
    pub const SELECT: u32 = 8;
    pub const START: u32 = 9;
    pub const DPAD_UP: u32 = 12;
    pub const DPAD_DOWN: u32 = 13;
    pub const DPAD_LEFT: u32 = 14;
    pub const DPAD_RIGHT: u32 = 15;
}

/// Stick deflection that counts as a direction press
const STICK_THRESHOLD: f32 = 0.5;

/// Translate a button mask and left stick X into held actions
pub fn actions_from_state(mask: u32, stick_x: f32) -> ActionSet {
    let down = |b: u32| mask & (1 << b) != 0;
    let mut actions = ActionSet::empty();

    if down(button::DPAD_LEFT) || stick_x < -STICK_THRESHOLD {
        actions |= ActionSet::LEFT;
    }
    if down(button::DPAD_RIGHT) || stick_x > STICK_THRESHOLD {
        actions |= ActionSet::RIGHT;
    }
    if down(button::A) {
        actions |= ActionSet::JUMP | ActionSet::CONFIRM;
    }
    if down(button::START) {
        actions |= ActionSet::PAUSE;
    }
    if down(button::SELECT) {
        actions |= ActionSet::MENU;
    }
    if down(button::X) {
        actions |= ActionSet::RESTART;
    }
    actions
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
mod platform {
    use super::*;

    pub struct Gamepad;

    impl Gamepad {
        pub fn new() -> Self {
            Self
        }

        pub fn poll(&mut self) {}

        pub fn has_gamepad(&self) -> bool {
            false
        }

        pub fn actions(&self) -> ActionSet {
            ActionSet::empty()
        }
    }
}

// ============================================================================
// Native Implementation (gilrs)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
mod platform {
    use super::*;
    use gilrs::{Axis, Button as GilrsButton, Gilrs};

    pub struct Gamepad {
        /// `None` when the platform backend failed to start
        gilrs: Option<Gilrs>,
    }

    impl Gamepad {
        pub fn new() -> Self {
            let gilrs = match Gilrs::new() {
                Ok(g) => Some(g),
                Err(e) => {
                    log::warn!("Gamepad support unavailable: {}", e);
                    None
                }
            };
            Self { gilrs }
        }

        pub fn poll(&mut self) {
            let Some(gilrs) = self.gilrs.as_mut() else { return };
            // Events are processed internally by gilrs
            while let Some(event) = gilrs.next_event() {
                if let gilrs::EventType::Connected = event.event {
                    log::info!("Gamepad connected: {}", gilrs.gamepad(event.id).name());
                }
            }
        }

        pub fn has_gamepad(&self) -> bool {
            self.active().is_some()
        }

        fn active(&self) -> Option<gilrs::Gamepad<'_>> {
            self.gilrs.as_ref()?.gamepads().next().map(|(_, gp)| gp)
        }

        fn button_mask(&self) -> u32 {
            let Some(gp) = self.active() else { return 0 };
            let mut mask = 0u32;

            if gp.is_pressed(GilrsButton::South) { mask |= 1 << button::A; }
            if gp.is_pressed(GilrsButton::East) { mask |= 1 << button::B; }
            if gp.is_pressed(GilrsButton::West) { mask |= 1 << button::X; }
            if gp.is_pressed(GilrsButton::North) { mask |= 1 << button::Y; }
            if gp.is_pressed(GilrsButton::Select) { mask |= 1 << button::SELECT; }
            if gp.is_pressed(GilrsButton::Start) { mask |= 1 << button::START; }
            if gp.is_pressed(GilrsButton::DPadUp) { mask |= 1 << button::DPAD_UP; }
            if gp.is_pressed(GilrsButton::DPadDown) { mask |= 1 << button::DPAD_DOWN; }
            if gp.is_pressed(GilrsButton::DPadLeft) { mask |= 1 << button::DPAD_LEFT; }
            if gp.is_pressed(GilrsButton::DPadRight) { mask |= 1 << button::DPAD_RIGHT; }

            mask
        }

        /// Actions held on the first connected gamepad
        pub fn actions(&self) -> ActionSet {
            let stick_x = self.active().map(|gp| gp.value(Axis::LeftStickX)).unwrap_or(0.0);
            actions_from_state(self.button_mask(), stick_x)
        }
    }
}

impl Default for Gamepad {
    fn default() -> Self {
        Self::new()
    }
}

// Re-export the platform-specific implementation
pub use platform::Gamepad;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_buttons() {
        let actions = actions_from_state(1 << button::A, 0.0);
        assert_eq!(actions, ActionSet::JUMP | ActionSet::CONFIRM);
        assert_eq!(actions_from_state(1 << button::START, 0.0), ActionSet::PAUSE);
        assert_eq!(actions_from_state(1 << button::SELECT, 0.0), ActionSet::MENU);
        assert_eq!(actions_from_state(1 << button::X, 0.0), ActionSet::RESTART);
    }

    #[test]
    fn test_stick_and_dpad_move() {
        assert_eq!(actions_from_state(0, -0.8), ActionSet::LEFT);
        assert_eq!(actions_from_state(0, 0.8), ActionSet::RIGHT);
        assert_eq!(actions_from_state(0, 0.3), ActionSet::empty());
        assert_eq!(actions_from_state(1 << button::DPAD_RIGHT, 0.0), ActionSet::RIGHT);
    }
}
