//! Touch gestures
//!
//! A swipe becomes a short synthetic hold of an action: horizontal swipes
//! hold left or right, upward swipes hold jump. A tap confirms menus. The
//! hold is counted in display frames and ticks down once per `tick`.

use super::actions::ActionSet;

/// Minimum swipe length in pixels
const SWIPE_MIN: f32 = 30.0;
/// Frames a horizontal swipe holds left/right
const MOVE_HOLD_FRAMES: u32 = 12;
/// Frames an upward swipe holds jump
const JUMP_HOLD_FRAMES: u32 = 6;

#[derive(Debug, Clone, Default)]
pub struct TouchGestures {
    /// Where the current touch started
    start: Option<(f32, f32)>,
    left: u32,
    right: u32,
    jump: u32,
    confirm: u32,
}

impl TouchGestures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn touch_started(&mut self, x: f32, y: f32) {
        self.start = Some((x, y));
    }

    /// Finish a touch and turn it into a hold if it was a swipe
    pub fn touch_ended(&mut self, x: f32, y: f32) {
        let Some((sx, sy)) = self.start.take() else { return };
        self.swipe(x - sx, y - sy);
    }

    pub fn touch_cancelled(&mut self) {
        self.start = None;
    }

    /// Apply a swipe by its delta (screen y grows downward)
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        if dx.abs() <= SWIPE_MIN && dy.abs() <= SWIPE_MIN {
            self.confirm = 1;
            return;
        }
        if dx.abs() > dy.abs() {
            if dx.abs() > SWIPE_MIN {
                if dx > 0.0 {
                    self.right = MOVE_HOLD_FRAMES;
                    self.left = 0;
                } else {
                    self.left = MOVE_HOLD_FRAMES;
                    self.right = 0;
                }
            }
        } else if dy < -SWIPE_MIN {
            self.jump = JUMP_HOLD_FRAMES;
        }
    }

    /// Actions held this frame; call once per display frame
    pub fn tick(&mut self) -> ActionSet {
        let mut held = ActionSet::empty();
        for (counter, flag) in [
            (&mut self.left, ActionSet::LEFT),
            (&mut self.right, ActionSet::RIGHT),
            (&mut self.jump, ActionSet::JUMP),
            (&mut self.confirm, ActionSet::CONFIRM),
        ] {
            if *counter > 0 {
                *counter -= 1;
                held |= flag;
            }
        }
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_swipe_holds_for_twelve_frames() {
        let mut touch = TouchGestures::new();
        touch.touch_started(100.0, 300.0);
        touch.touch_ended(180.0, 310.0);
        for _ in 0..12 {
            assert_eq!(touch.tick(), ActionSet::RIGHT);
        }
        assert_eq!(touch.tick(), ActionSet::empty());
    }

    #[test]
    fn test_upward_swipe_jumps() {
        let mut touch = TouchGestures::new();
        touch.swipe(5.0, -60.0);
        for _ in 0..6 {
            assert_eq!(touch.tick(), ActionSet::JUMP);
        }
        assert_eq!(touch.tick(), ActionSet::empty());
    }

    #[test]
    fn test_downward_swipe_ignored() {
        let mut touch = TouchGestures::new();
        touch.swipe(0.0, 80.0);
        assert_eq!(touch.tick(), ActionSet::empty());
    }

    #[test]
    fn test_tap_confirms_for_one_frame() {
        let mut touch = TouchGestures::new();
        touch.touch_started(200.0, 200.0);
        touch.touch_ended(210.0, 195.0);
        assert_eq!(touch.tick(), ActionSet::CONFIRM);
        assert_eq!(touch.tick(), ActionSet::empty());
    }

    #[test]
    fn test_left_swipe_replaces_right() {
        let mut touch = TouchGestures::new();
        touch.swipe(50.0, 0.0);
        touch.tick();
        touch.swipe(-50.0, 0.0);
        assert_eq!(touch.tick(), ActionSet::LEFT);
    }

    #[test]
    fn test_tap_without_start_is_ignored() {
        let mut touch = TouchGestures::new();
        touch.touch_ended(500.0, 0.0);
        assert_eq!(touch.tick(), ActionSet::empty());
        touch.touch_started(0.0, 0.0);
        touch.touch_cancelled();
        touch.touch_ended(500.0, 0.0);
        assert_eq!(touch.tick(), ActionSet::empty());
    }
}
