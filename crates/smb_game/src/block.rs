//! Static level geometry and the coin pickup that boxes release.

use glam::Vec2;
use smb_core::animation::FrameCycle;
use smb_core::Rect;

pub const BLOCK_SIZE: f32 = 32.0;

const BOX_CYCLE: FrameCycle = FrameCycle::new(12, 5);
const COIN_CYCLE: FrameCycle = FrameCycle::new(4, 5);
const COIN_RISE_TICKS: u32 = 20;
const COIN_LIFETIME_TICKS: u32 = 40;
const COIN_SPEED: f32 = 3.0;
pub const COIN_SIZE: (f32, f32) = (20.0, 28.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeType {
    Short,
    Medium,
    Tall,
}

impl PipeType {
    pub fn height(self) -> f32 {
        match self {
            Self::Short => 64.0,
            Self::Medium => 96.0,
            Self::Tall => 128.0,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Short => 1,
            Self::Medium => 2,
            Self::Tall => 3,
        }
    }
}

impl TryFrom<u8> for PipeType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Short),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Tall),
            other => Err(format!("unknown pipe type {other} (expected 1, 2 or 3)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Floor,
    Brick,
    Pipe(PipeType),
    Block,
    Box,
}

impl BlockKind {
    pub fn default_size(self) -> (f32, f32) {
        match self {
            Self::Pipe(pipe) => (64.0, pipe.height()),
            _ => (BLOCK_SIZE, BLOCK_SIZE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Block {
    pub kind: BlockKind,
    rect: Rect,
    destroyed: bool,
    animation_frame: u32,
}

impl Block {
    pub fn new(kind: BlockKind, rect: Rect) -> Result<Self, String> {
        if rect.is_degenerate() {
            return Err(format!(
                "{kind:?} block at ({}, {}) has degenerate size {}x{}",
                rect.x, rect.y, rect.width, rect.height
            ));
        }
        Ok(Self {
            kind,
            rect,
            destroyed: false,
            animation_frame: 0,
        })
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroyed boxes stop colliding; everything else is always solid.
    pub fn is_solid(&self) -> bool {
        !self.destroyed
    }

    pub fn is_intact_box(&self) -> bool {
        self.kind == BlockKind::Box && !self.destroyed
    }

    /// Break an intact box. Returns false if there was nothing to break.
    pub fn destroy(&mut self) -> bool {
        if !self.is_intact_box() {
            return false;
        }
        self.destroyed = true;
        true
    }

    pub fn animate(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Shimmer frame of an intact box.
    pub fn shimmer_frame(&self) -> u32 {
        BOX_CYCLE.frame_at(self.animation_frame)
    }
}

/// Solid blocks paired with their index in `blocks`, as the collision
/// resolver consumes them.
pub fn solid_obstacles(blocks: &[Block]) -> impl Iterator<Item = (usize, &Rect)> + '_ {
    blocks
        .iter()
        .enumerate()
        .filter(|(_, block)| block.is_solid())
        .map(|(index, block)| (index, block.rect()))
}

/// Cosmetic coin popping out of a box: no collision, fixed lifetime.
#[derive(Debug, Clone)]
pub struct Coin {
    rect: Rect,
    timer: u32,
}

impl Coin {
    /// Coin sitting on top of `origin`, left-aligned with it.
    pub fn spawn_on(origin: &Rect) -> Self {
        Self {
            rect: Rect::from_left_bottom(origin.left(), origin.top(), COIN_SIZE.0, COIN_SIZE.1),
            timer: 0,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.rect.left(), self.rect.bottom())
    }

    pub fn update(&mut self) {
        self.timer += 1;
        if self.timer < COIN_RISE_TICKS {
            self.rect.translate(0.0, -COIN_SPEED);
        } else {
            self.rect.translate(0.0, COIN_SPEED);
        }
    }

    pub fn is_expired(&self) -> bool {
        self.timer >= COIN_LIFETIME_TICKS
    }

    pub fn spin_frame(&self) -> u32 {
        COIN_CYCLE.frame_at(self.timer)
    }
}
