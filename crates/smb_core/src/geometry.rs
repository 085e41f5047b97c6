//! Axis-aligned rectangles in screen space (x grows right, y grows down).
//!
//! `Rect` is the single box type shared by physics and rendering: the same
//! rectangle that is swept against the block set is the one the presentation
//! layer draws at. Edge setters move the rectangle without resizing it, which
//! is what collision snapping needs.

use glam::Vec2;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from its left edge and bottom edge, the anchor used by
    /// level files.
    pub fn from_left_bottom(left: f32, bottom: f32, width: f32, height: f32) -> Self {
        Self::new(left, bottom - height, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.width;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Zero or negative extents are data errors; loaders reject them.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Open-interval overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Strict interior test, used for pointer hit-testing.
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.left() < point.x
            && point.x < self.right()
            && self.top() < point.y
            && point.y < self.bottom()
    }
}

pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}
