//! Game action definitions
//!
//! Every physical input (keyboard, gamepad, touch) is translated into a set
//! of logical actions once per frame. The simulation only sees `InputFrame`.

use bitflags::bitflags;

/// All logical actions the game responds to
///
/// Default bindings:
/// - Left/Right: arrows, A/D, left stick, d-pad, horizontal swipe
/// - Jump: Space, Up, W, South face button, upward swipe
/// - Pause: P, Start
/// - Mute: M
/// - Restart: R, West face button
/// - Menu: Escape, Select
/// - Confirm: Enter, Space, South face button
/// - Instructions: I
/// - ToggleDebug: F3, Ctrl+D
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Pause,
    Mute,
    Restart,
    Menu,
    Confirm,
    Instructions,
    ToggleDebug,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Left,
        Action::Right,
        Action::Jump,
        Action::Pause,
        Action::Mute,
        Action::Restart,
        Action::Menu,
        Action::Confirm,
        Action::Instructions,
        Action::ToggleDebug,
    ];

    /// The single flag for this action
    pub fn flag(self) -> ActionSet {
        match self {
            Action::Left => ActionSet::LEFT,
            Action::Right => ActionSet::RIGHT,
            Action::Jump => ActionSet::JUMP,
            Action::Pause => ActionSet::PAUSE,
            Action::Mute => ActionSet::MUTE,
            Action::Restart => ActionSet::RESTART,
            Action::Menu => ActionSet::MENU,
            Action::Confirm => ActionSet::CONFIRM,
            Action::Instructions => ActionSet::INSTRUCTIONS,
            Action::ToggleDebug => ActionSet::TOGGLE_DEBUG,
        }
    }
}

bitflags! {
    /// A set of actions, one bit each
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActionSet: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const PAUSE = 1 << 3;
        const MUTE = 1 << 4;
        const RESTART = 1 << 5;
        const MENU = 1 << 6;
        const CONFIRM = 1 << 7;
        const INSTRUCTIONS = 1 << 8;
        const TOGGLE_DEBUG = 1 << 9;
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        ActionSet::empty()
    }
}

/// One frame of sampled input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputFrame {
    /// Actions currently held
    pub held: ActionSet,
    /// Actions that went down this frame
    pub pressed: ActionSet,
}

impl InputFrame {
    /// Build a frame from this frame's held set and the previous one
    pub fn from_held(held: ActionSet, previous: ActionSet) -> Self {
        Self {
            held,
            pressed: held & !previous,
        }
    }

    pub fn down(&self, action: Action) -> bool {
        self.held.contains(action.flag())
    }

    pub fn pressed(&self, action: Action) -> bool {
        self.pressed.contains(action.flag())
    }

    /// The same held state with no edges, for extra steps within one frame
    pub fn held_only(&self) -> Self {
        Self {
            held: self.held,
            pressed: ActionSet::empty(),
        }
    }
}
