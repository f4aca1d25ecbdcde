//! Immediate-mode game UI
//!
//! - HUD strip with score, level and lives
//! - Modal screens (start, instructions, pause, level complete, game over, win)
//! - Shared colors for the HUD, the screens and the world themes
//!
//! Nothing here is retained between frames except the last HUD snapshot and
//! screen, which arrive through `UiSink`.

mod overlay;
pub mod theme;

pub use overlay::{Overlay, UiSink};
#[allow(unused_imports)]
pub use overlay::{Modal, modal_for};
