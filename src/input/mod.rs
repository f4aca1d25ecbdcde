//! Input handling with gamepad and touch support
//!
//! Provides an action-based input system: keyboard, gamepad and touch
//! swipes all map onto the same small set of logical actions.
//!
//! Native: Uses gilrs crate for cross-platform gamepad input
//! WASM: Keyboard and touch only

mod actions;
mod gamepad;
mod state;
mod touch;

pub use actions::*;
pub use state::InputState;
#[allow(unused_imports)]
pub use touch::TouchGestures;
