//! Horizontal follow camera.
//!
//! The camera only ever scrolls right. It keeps the player's right edge on the
//! viewport midline once the player crosses it, and stops where the viewport's
//! right edge meets the level's right edge. It never moves vertically.

use smb_core::Rect;

use crate::block::Block;

/// Trimmed off the rightmost block edge so the last column never shows a seam.
pub const LEVEL_WIDTH_INSET: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Camera {
    offset_x: f32,
    view_width: f32,
    view_height: f32,
    level_width: f32,
}

impl Camera {
    pub fn new(view_width: f32, view_height: f32, level_width: f32) -> Self {
        Self {
            offset_x: 0.0,
            view_width,
            view_height,
            level_width,
        }
    }

    /// Camera whose level width is the rightmost block edge, less the inset.
    pub fn for_blocks(view_width: f32, view_height: f32, blocks: &[Block]) -> Self {
        let rightmost = blocks
            .iter()
            .map(|block| block.rect().right())
            .fold(0.0_f32, f32::max);
        Self::new(view_width, view_height, rightmost - LEVEL_WIDTH_INSET)
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn view_width(&self) -> f32 {
        self.view_width
    }

    pub fn view_height(&self) -> f32 {
        self.view_height
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    /// Rightmost offset that still keeps the viewport inside the level.
    fn max_offset(&self) -> f32 {
        (self.level_width - self.view_width).max(0.0)
    }

    pub fn scroll(&mut self, player: &Rect) {
        let midline = self.offset_x + self.view_width / 2.0;
        if player.right() <= midline {
            return;
        }
        let target = (player.right() - self.view_width / 2.0).min(self.max_offset());
        if target > self.offset_x {
            self.offset_x = target;
        }
    }

    /// World-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        Rect::new(self.offset_x, 0.0, self.view_width, self.view_height)
    }

    /// Shift a world-space rectangle into screen space.
    pub fn to_screen(&self, rect: &Rect) -> Rect {
        Rect::new(rect.x - self.offset_x, rect.y, rect.width, rect.height)
    }
}
