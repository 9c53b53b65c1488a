//! Axis-aligned rectangle geometry
//!
//! Everything in the playfield is an AABB: the bird's bounding box and both
//! members of every pipe pair. One overlap convention is used crate-wide and
//! fixed here: overlap is *strict*, so rectangles that merely share an edge
//! (zero overlap area) do not collide, while one unit of interpenetration does.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (both non-negative)
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Strict AABB overlap. Touching edges do not count as overlap; this is
    /// the single collision convention for the whole crate.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max().x
            && other.min.x < self.max().x
            && self.min.y < other.max().y
            && other.min.y < self.max().y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 9.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the x=10 edge: zero overlap area
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Corner touch only
        let c = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn one_unit_overlap_collides() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn disjoint_rects_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }
}
