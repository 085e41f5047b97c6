//! Renderable snapshot handed to the presentation layer each tick.

use smb_core::Rect;

use crate::block::{Block, BlockKind, Coin, PipeType};
use crate::enemy::Enemy;
use crate::entity::{EntityKind, Facing};
use crate::player::{Player, PlayerPose};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Player(PlayerPose),
    EnemyWalk(EntityKind, u32),
    EnemyFlat(EntityKind),
    Floor,
    Brick,
    Block,
    Pipe(PipeType),
    BoxShimmer(u32),
    BoxUsed,
    Coin(u32),
}

impl SpriteKey {
    pub fn for_block(block: &Block) -> Self {
        match block.kind {
            BlockKind::Floor => Self::Floor,
            BlockKind::Brick => Self::Brick,
            BlockKind::Block => Self::Block,
            BlockKind::Pipe(pipe) => Self::Pipe(pipe),
            BlockKind::Box if block.is_destroyed() => Self::BoxUsed,
            BlockKind::Box => Self::BoxShimmer(block.shimmer_frame()),
        }
    }

    pub fn for_enemy(enemy: &Enemy) -> Self {
        if enemy.is_dying() {
            Self::EnemyFlat(enemy.kind())
        } else {
            Self::EnemyWalk(enemy.kind(), enemy.walk_frame())
        }
    }

    pub fn for_player(player: &Player) -> Self {
        Self::Player(player.pose())
    }

    pub fn for_coin(coin: &Coin) -> Self {
        Self::Coin(coin.spin_frame())
    }

    /// Image file backing this sprite. Left-facing variants are mirrored at
    /// draw time and share the file.
    pub fn image_name(&self) -> String {
        match *self {
            Self::Player(PlayerPose::Stand) => "mario1.png".to_string(),
            Self::Player(PlayerPose::Run(frame)) => format!("mario{}.png", frame + 2),
            Self::Player(PlayerPose::Skid) => "mario5.png".to_string(),
            Self::Player(PlayerPose::Jump) => "mario6.png".to_string(),
            Self::Player(PlayerPose::Dead) => "mario_die.png".to_string(),
            Self::EnemyWalk(kind, frame) => format!("{}{}.png", kind.label(), frame + 1),
            Self::EnemyFlat(kind) => format!("{}3.png", kind.label()),
            Self::Floor => "floor.png".to_string(),
            Self::Brick => "brick.png".to_string(),
            Self::Block => "block.png".to_string(),
            Self::Pipe(pipe) => format!("pipe{}.png", pipe.code()),
            // The fifth shimmer frame holds on box4.
            Self::BoxShimmer(frame) => format!("box{}.png", frame.min(3) + 1),
            Self::BoxUsed => "box5.png".to_string(),
            Self::Coin(frame) => format!("coin{}.png", frame + 1),
        }
    }
}

/// One thing to draw: which sprite, which way it faces, where in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderable {
    pub key: SpriteKey,
    pub facing: Facing,
    pub rect: Rect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_names_follow_asset_layout() {
        assert_eq!(SpriteKey::Player(PlayerPose::Run(2)).image_name(), "mario4.png");
        assert_eq!(SpriteKey::Player(PlayerPose::Dead).image_name(), "mario_die.png");
        assert_eq!(
            SpriteKey::EnemyWalk(EntityKind::Turtle, 1).image_name(),
            "turtle2.png"
        );
        assert_eq!(
            SpriteKey::EnemyFlat(EntityKind::Mushroom).image_name(),
            "mushroom3.png"
        );
        assert_eq!(SpriteKey::Pipe(PipeType::Tall).image_name(), "pipe3.png");
        assert_eq!(SpriteKey::BoxShimmer(4).image_name(), "box4.png");
        assert_eq!(SpriteKey::Coin(0).image_name(), "coin1.png");
    }

    #[test]
    fn player_poses_key_distinct_sprites() {
        use std::collections::HashSet;

        let keys: HashSet<SpriteKey> = [
            SpriteKey::Player(PlayerPose::Stand),
            SpriteKey::Player(PlayerPose::Run(0)),
            SpriteKey::Player(PlayerPose::Run(1)),
            SpriteKey::Player(PlayerPose::Run(1)),
            SpriteKey::Player(PlayerPose::Jump),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 4);
        assert!(keys.contains(&SpriteKey::Player(PlayerPose::Run(1))));
    }

    #[test]
    fn used_box_switches_sprite() {
        let mut block = Block::new(BlockKind::Box, Rect::new(0.0, 0.0, 32.0, 32.0)).unwrap();
        assert_eq!(SpriteKey::for_block(&block), SpriteKey::BoxShimmer(0));
        block.destroy();
        assert_eq!(SpriteKey::for_block(&block), SpriteKey::BoxUsed);
    }
}
