//! State shared by every movable actor.
//!
//! Players and enemies are separate structs with their own state machines;
//! what they have in common (box, velocity, facing, animation counter) lives
//! in `Body`. `EntityKind` is the closed set of actor kinds a level can spawn.

use glam::Vec2;
use serde::Deserialize;
use smb_core::Rect;

/// Downward acceleration per tick, in pixels.
pub const GRAVITY: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum EntityKind {
    Player,
    Turtle,
    Mushroom,
}

impl EntityKind {
    pub fn is_enemy(self) -> bool {
        matches!(self, Self::Turtle | Self::Mushroom)
    }

    /// Box size used when the level file gives none.
    pub fn default_size(self) -> (f32, f32) {
        match self {
            Self::Player => (32.0, 32.0),
            Self::Mushroom => (32.0, 32.0),
            Self::Turtle => (32.0, 48.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Turtle => "turtle",
            Self::Mushroom => "mushroom",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub rect: Rect,
    /// Horizontal velocity is in tenths of a pixel for the player and whole
    /// pixels for enemies; vertical velocity is always whole pixels.
    pub velocity: Vec2,
    pub on_ground: bool,
    pub facing: Facing,
    pub animation_frame: u32,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            velocity: Vec2::ZERO,
            on_ground: true,
            facing: Facing::Right,
            animation_frame: 0,
        }
    }
}
