//! Axis-aligned rectangle geometry
//!
//! Everything in the level (platforms, traps, patrol bodies, the finish flag,
//! the player) is an axis-aligned rectangle in world space, with Y growing
//! downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin)
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

    /// Rectangle from a top-left position and a size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap test; rectangles that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether a point lies inside (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Grow by `dx` on the left and right and `dy` on the top and bottom
    pub fn expand(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x - dx, self.y - dy, self.w + 2.0 * dx, self.h + 2.0 * dy)
    }

    /// Extend the top edge upward by `amount`, keeping the bottom fixed
    pub fn extend_up(&self, amount: f32) -> Rect {
        Rect::new(self.x, self.y - amount, self.w, self.h + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&below));
        assert!(!a.intersects(&right));
    }

    #[test]
    fn test_expand_grows_all_sides() {
        let r = Rect::new(100.0, 200.0, 40.0, 20.0).expand(4.0, 6.0);
        assert_eq!(r, Rect::new(96.0, 194.0, 48.0, 32.0));
    }

    #[test]
    fn test_extend_up_keeps_bottom() {
        let r = Rect::new(0.0, 100.0, 30.0, 50.0);
        let e = r.extend_up(20.0);
        assert_eq!(e.top(), 80.0);
        assert_eq!(e.bottom(), r.bottom());
    }

    #[test]
    fn test_contains_point() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Vec2::new(15.0, 15.0)));
        assert!(r.contains(Vec2::new(30.0, 30.0)));
        assert!(!r.contains(Vec2::new(31.0, 15.0)));
    }
}
