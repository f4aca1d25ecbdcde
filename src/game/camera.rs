//! Horizontal follow camera

/// Fraction of the viewport width kept to the left of the player
const LEAD_FRACTION: f32 = 1.0 / 3.0;

/// Horizontal scroll offset. The view never scrolls vertically.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ease toward the player, clamped to the level's scrollable range
    pub fn follow(&mut self, player_x: f32, level_width: f32, viewport_width: f32, smoothing: f32) {
        let max_x = (level_width - viewport_width).max(0.0);
        let target = (player_x - viewport_width * LEAD_FRACTION).clamp(0.0, max_x);
        self.x += (target - self.x) * smoothing;
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_follow_eases_toward_target() {
        let mut camera = Camera::new();
        // Target = 1000 - 1000/3
        camera.follow(1000.0, 3000.0, 1000.0, 0.1);
        assert_relative_eq!(camera.x, 66.666_67, epsilon = 1e-3);
    }

    #[test]
    fn test_follow_clamps_to_level() {
        let mut camera = Camera::new();
        for _ in 0..500 {
            camera.follow(5000.0, 1840.0, 1000.0, 0.1);
        }
        assert!(camera.x <= 840.0);
        assert_relative_eq!(camera.x, 840.0, epsilon = 1e-2);

        for _ in 0..500 {
            camera.follow(0.0, 1840.0, 1000.0, 0.1);
        }
        assert!(camera.x >= 0.0);
        assert!(camera.x < 0.01);
    }

    #[test]
    fn test_narrow_level_never_scrolls() {
        let mut camera = Camera::new();
        camera.follow(900.0, 600.0, 1000.0, 0.1);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera { x: 300.0 };
        camera.reset();
        assert_eq!(camera.x, 0.0);
    }
}
