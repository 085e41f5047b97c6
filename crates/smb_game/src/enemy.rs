//! Patrolling enemies.
//!
//! ```text
//!   Inactive --(rect meets camera view)--> Patrolling
//!   Inactive | Patrolling --(stomped)--> Dying --(30 ticks)--> Removed
//!   any --(fell below the level)--> Removed
//! ```
//!
//! Enemies fall at a constant rate and never zero their velocity on contact:
//! landing just snaps them onto the block, and a horizontal hit reverses the
//! patrol direction.

use glam::Vec2;
use smb_core::animation::FrameCycle;
use smb_core::Rect;

use crate::block::{solid_obstacles, Block};
use crate::collision::{move_and_collide, Axis};
use crate::entity::{Body, EntityKind, Facing, GRAVITY};

pub const PATROL_SPEED: f32 = 1.0;
pub const DEATH_ANIMATION_TICKS: u32 = 30;
const WALK_CYCLE: FrameCycle = FrameCycle::new(8, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Inactive,
    Patrolling,
    Dying,
    Removed,
}

/// What an enemy needs to see for one tick.
pub struct EnemyTick<'a> {
    pub blocks: &'a [Block],
    /// Camera view as of the previous tick's scroll.
    pub visible: Rect,
    /// Anything whose top passes below this line has left the level.
    pub death_y: f32,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    kind: EntityKind,
    body: Body,
    state: EnemyState,
}

impl Enemy {
    pub fn new(kind: EntityKind, rect: Rect) -> Result<Self, String> {
        if !kind.is_enemy() {
            return Err(format!("{kind} is not an enemy kind"));
        }
        if rect.is_degenerate() {
            return Err(format!(
                "{kind} at ({}, {}) has degenerate size {}x{}",
                rect.x, rect.y, rect.width, rect.height
            ));
        }
        let mut body = Body::new(rect);
        body.velocity = Vec2::new(0.0, GRAVITY);
        body.facing = Facing::Left;
        Ok(Self {
            kind,
            body,
            state: EnemyState::Inactive,
        })
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn is_dying(&self) -> bool {
        self.state == EnemyState::Dying
    }

    pub fn is_removed(&self) -> bool {
        self.state == EnemyState::Removed
    }

    /// Touching it hurts: active and not already on its way out.
    pub fn is_lethal(&self) -> bool {
        self.state == EnemyState::Patrolling
    }

    pub fn can_be_stomped(&self) -> bool {
        matches!(self.state, EnemyState::Inactive | EnemyState::Patrolling)
    }

    pub fn walk_frame(&self) -> u32 {
        WALK_CYCLE.frame_at(self.body.animation_frame)
    }

    pub fn update(&mut self, ctx: &EnemyTick<'_>) {
        if self.state == EnemyState::Removed {
            return;
        }

        let fall = self.body.velocity.y;
        move_and_collide(
            &mut self.body.rect,
            Axis::Vertical,
            fall,
            solid_obstacles(ctx.blocks),
        );

        let step = self.body.velocity.x;
        let contact = move_and_collide(
            &mut self.body.rect,
            Axis::Horizontal,
            step,
            solid_obstacles(ctx.blocks),
        );
        if contact.collided() {
            self.body.velocity.x = -self.body.velocity.x;
        }

        self.animate();

        if self.state == EnemyState::Inactive && self.body.rect.intersects(&ctx.visible) {
            self.activate();
        }

        if self.body.rect.top() > ctx.death_y {
            log::debug!("{} fell out of the level at x={}", self.kind, self.body.rect.x);
            self.state = EnemyState::Removed;
        }
    }

    fn activate(&mut self) {
        log::trace!("{} activated at x={}", self.kind, self.body.rect.x);
        self.body.velocity.x = -PATROL_SPEED;
        self.state = EnemyState::Patrolling;
    }

    fn animate(&mut self) {
        self.body.animation_frame += 1;
        if self.state == EnemyState::Dying {
            self.body.velocity.x = 0.0;
            if self.body.animation_frame > DEATH_ANIMATION_TICKS {
                self.state = EnemyState::Removed;
            }
        } else if self.body.velocity.x <= 0.0 {
            self.body.facing = Facing::Left;
        } else {
            self.body.facing = Facing::Right;
        }
    }

    /// Squash this enemy. Returns false if it was already dying or gone.
    pub fn stomp(&mut self) -> bool {
        if !self.can_be_stomped() {
            return false;
        }
        self.state = EnemyState::Dying;
        self.body.velocity.x = 0.0;
        self.body.animation_frame = 0;
        true
    }

    #[cfg(test)]
    pub(crate) fn force_active(&mut self) {
        self.activate();
    }
}
