//! Axis-aligned rectangle collision primitives
//!
//! Platforms and the actor are plain AABBs. All tests are discrete
//! containment checks sampled once per frame; there is no swept test, so
//! tunneling at high speed is possible.

use glam::Vec2;

/// An axis-aligned rectangle defined by center and half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Build a rect from a center and a scale pair (half-extent = scale / 2)
    pub fn from_scale(center: Vec2, scale_x: f32, scale_y: f32) -> Self {
        Self {
            center,
            half: Vec2::new(scale_x / 2.0, scale_y / 2.0),
        }
    }

    /// Inclusive point containment (edges count)
    pub fn contains(&self, p: Vec2) -> bool {
        (p.x - self.center.x).abs() <= self.half.x && (p.y - self.center.y).abs() <= self.half.y
    }

    /// Whether two rectangles overlap (touching edges count)
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }

    pub fn top(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }
}
