//! Collision primitives
//!
//! Axis-aligned rectangles and the directional platform contact test.
//! Contact is classified from the mover's post-integration position
//! without a swept test, so a mover fast enough to cross a platform in a
//! single step passes through it.

use serde::{Serialize, Deserialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Center X
    pub fn center_x(&self) -> f32 {
        self.x + self.w * 0.5
    }

    /// Center Y
    pub fn center_y(&self) -> f32 {
        self.y + self.h * 0.5
    }

    /// Center point
    pub fn center(&self) -> (f32, f32) {
        (self.center_x(), self.center_y())
    }

    /// Rectangle of the given size centered inside this one
    pub fn centered(&self, w: f32, h: f32) -> Self {
        Self::new(self.center_x() - w * 0.5, self.center_y() - h * 0.5, w, h)
    }

    /// All components are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}

/// Strict AABB intersection. Rectangles that only share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Which side of a platform a mover is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    /// Landing on the top surface
    Top,
    /// Pressing against the left wall
    Left,
    /// Pressing against the right wall
    Right,
}

/// Classify a mover's contact with a platform.
///
/// Priority order: `Top` (falling and the mover's top is above the
/// platform's top), then `Left`/`Right` by the mover's horizontal center.
/// Returns `Contact::None` when the rectangles don't overlap, or when they
/// do but no branch applies.
pub fn platform_contact(mover: &Rect, vel_y: f32, platform: &Rect) -> Contact {
    if !overlaps(mover, platform) {
        return Contact::None;
    }

    if vel_y > 0.0 && mover.y < platform.y {
        Contact::Top
    } else if mover.center_x() < platform.x {
        Contact::Left
    } else if mover.center_x() > platform.right() {
        Contact::Right
    } else {
        Contact::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_symmetric() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(5.0, 5.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(-3.0, 9.5, 4.0, 1.0),
            Rect::new(2.0, 2.0, 1.0, 1.0),
            Rect::new(20.0, 20.0, 0.0, 0.0),
        ];
        for a in &rects {
            for b in &rects {
                assert_eq!(overlaps(a, b), overlaps(b, a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!overlaps(&a, &Rect::new(10.0, 0.0, 5.0, 5.0)));
        assert!(!overlaps(&a, &Rect::new(0.0, 10.0, 5.0, 5.0)));
        assert!(overlaps(&a, &Rect::new(9.9, 9.9, 5.0, 5.0)));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn test_contact_top_when_falling_from_above() {
        let platform = Rect::new(0.0, 100.0, 200.0, 20.0);
        let mover = Rect::new(50.0, 40.0, 20.0, 62.0);
        assert_eq!(platform_contact(&mover, 3.0, &platform), Contact::Top);
        // Rising through the platform is not a landing
        assert_eq!(platform_contact(&mover, -3.0, &platform), Contact::None);
    }

    #[test]
    fn test_contact_sides_by_center() {
        let platform = Rect::new(100.0, 100.0, 100.0, 100.0);
        // Center at 95: left of the platform's left edge
        let left = Rect::new(80.0, 150.0, 30.0, 20.0);
        assert_eq!(platform_contact(&left, 0.0, &platform), Contact::Left);
        // Center at 205: right of the platform's right edge
        let right = Rect::new(190.0, 150.0, 30.0, 20.0);
        assert_eq!(platform_contact(&right, 0.0, &platform), Contact::Right);
    }

    #[test]
    fn test_top_wins_over_side() {
        let platform = Rect::new(100.0, 100.0, 100.0, 20.0);
        let mover = Rect::new(80.0, 90.0, 30.0, 20.0);
        assert_eq!(platform_contact(&mover, 1.0, &platform), Contact::Top);
    }

    #[test]
    fn test_no_contact_without_overlap() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let mover = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(platform_contact(&mover, 5.0, &platform), Contact::None);
    }
}
