//! Player controller.
//!
//! ```text
//!   Normal --(hit by live enemy | fell below level)--> Dying --(200 ticks)--> Dead
//! ```
//!
//! Each tick runs in a fixed order: integrate and resolve against blocks,
//! then (only while `Normal`) steer, resolve enemy contacts, handle the jump
//! button and apply the left-bound ratchet, and finally pick the sprite pose.
//!
//! Horizontal velocity is kept in tenths of a pixel; see [`horizontal_step`].

use glam::Vec2;
use smb_core::animation::FrameCycle;
use smb_core::{InputSnapshot, Rect};

use crate::block::{solid_obstacles, Block, Coin};
use crate::collision::{move_and_collide, Axis};
use crate::enemy::Enemy;
use crate::entity::{Body, Facing, GRAVITY};
use crate::events::GameEvent;

pub const MAX_RUN_SPEED: f32 = 40.0;
pub const RUN_ACCEL: f32 = 1.0;
pub const RUN_DECEL: f32 = 1.5;
/// At or below this speed an idle player stops dead.
pub const STOP_EPSILON: f32 = 3.0;

pub const JUMP_STEP: u32 = 6;
pub const JUMP_FORCE_CAP: u32 = 5 * 30;
pub const JUMP_SPEED: f32 = -(6.0 + GRAVITY);

pub const STOMP_TOLERANCE: f32 = 10.0;
pub const STOMP_BOUNCE: f32 = -GRAVITY * 3.0;
pub const STOMP_SCORE: u32 = 200;
pub const BOX_SCORE: u32 = 200;

pub const DEATH_IMPULSE: f32 = -GRAVITY * 4.0;
pub const DEATH_ANIMATION_TICKS: u32 = 200;

const RUN_CYCLE: FrameCycle = FrameCycle::new(8, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Normal,
    Dying,
    Dead,
}

/// Sprite the player should be drawn with this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerPose {
    Stand,
    Run(u32),
    Skid,
    Jump,
    Dead,
}

/// Everything the player touches during one tick.
pub struct PlayerTick<'a> {
    pub input: InputSnapshot,
    pub blocks: &'a mut [Block],
    pub enemies: &'a mut [Enemy],
    pub view_width: f32,
    /// Coins released this tick; the world adds them after the update.
    pub spawns: &'a mut Vec<Coin>,
    pub events: &'a mut Vec<GameEvent>,
}

/// Pixels moved this tick for a horizontal velocity in tenths of a pixel.
///
/// The ±9 bias before the truncating division rounds every nonzero velocity
/// away from zero, so even a speed of 1 moves a whole pixel.
pub fn horizontal_step(velocity_x: f32) -> f32 {
    if velocity_x < 0.0 {
        ((velocity_x - 9.0) / 10.0).trunc()
    } else {
        ((velocity_x + 9.0) / 10.0).trunc()
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    body: Body,
    state: PlayerState,
    pose: PlayerPose,
    pub jump_force: u32,
    pub jump_locked: bool,
    jump_cue_played: bool,
    pub score: u32,
    pub coins: u32,
    /// Ratchet: the player can never walk left of this.
    pub left_bound_x: f32,
}

impl Player {
    pub fn new(rect: Rect, score: u32, coins: u32) -> Self {
        Self {
            body: Body::new(rect),
            state: PlayerState::Normal,
            pose: PlayerPose::Stand,
            jump_force: 0,
            jump_locked: false,
            jump_cue_played: false,
            score,
            coins,
            left_bound_x: 0.0,
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn pose(&self) -> PlayerPose {
        self.pose
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn rect(&self) -> &Rect {
        &self.body.rect
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_alive(&self) -> bool {
        self.state == PlayerState::Normal
    }

    pub fn is_dying(&self) -> bool {
        self.state == PlayerState::Dying
    }

    pub fn death_animation_complete(&self) -> bool {
        self.state == PlayerState::Dead
    }

    pub fn update(&mut self, ctx: &mut PlayerTick<'_>) {
        if self.state == PlayerState::Dead {
            return;
        }

        self.integrate(ctx);
        if self.state == PlayerState::Normal {
            self.steer(ctx.input);
            self.resolve_enemy_contacts(ctx.enemies, ctx.events);
            self.handle_jump(ctx.input, ctx.events);
            self.clamp_to_left_bound(ctx.view_width);
        }
        self.animate(ctx.input);
    }

    fn integrate(&mut self, ctx: &mut PlayerTick<'_>) {
        let dx = horizontal_step(self.body.velocity.x);
        let contact = move_and_collide(
            &mut self.body.rect,
            Axis::Horizontal,
            dx,
            solid_obstacles(ctx.blocks),
        );
        if contact.blocked_horizontally() {
            self.body.velocity.x = 0.0;
        }

        let dying = self.state == PlayerState::Dying;
        // Gravity only pulls while rising or at rest; falls run at a fixed speed.
        if self.body.velocity.y <= 0.0 {
            self.body.velocity.y += if dying { GRAVITY / 2.0 } else { GRAVITY };
        }

        if dying {
            // The death arc ignores the level entirely.
            self.body.rect.translate(0.0, self.body.velocity.y);
            return;
        }

        let contact = move_and_collide(
            &mut self.body.rect,
            Axis::Vertical,
            self.body.velocity.y,
            solid_obstacles(ctx.blocks),
        );
        if contact.landed() {
            self.body.on_ground = true;
            self.jump_force = 0;
            self.body.velocity.y = 0.0;
        } else if contact.bumped_head() {
            self.body.on_ground = false;
            self.body.velocity.y = 0.0;
            self.jump_locked = true;
            for index in contact.hits {
                self.break_box(&mut ctx.blocks[index], ctx.spawns, ctx.events);
            }
        } else {
            self.body.on_ground = false;
        }
    }

    fn break_box(&mut self, block: &mut Block, spawns: &mut Vec<Coin>, events: &mut Vec<GameEvent>) {
        if !block.destroy() {
            return;
        }
        let coin = Coin::spawn_on(block.rect());
        let position = coin.anchor();
        spawns.push(coin);
        self.score += BOX_SCORE;
        events.push(GameEvent::BoxDestroyed { position });
        events.push(GameEvent::CoinSpawned { position });
        log::debug!("Box broken at ({}, {})", position.x, position.y);
    }

    fn steer(&mut self, input: InputSnapshot) {
        let vx = &mut self.body.velocity.x;
        if input.move_left {
            if *vx > -MAX_RUN_SPEED {
                *vx -= RUN_ACCEL;
            }
            self.body.facing = Facing::Left;
        } else if input.move_right {
            if *vx < MAX_RUN_SPEED {
                *vx += RUN_ACCEL;
            }
            self.body.facing = Facing::Right;
        } else if vx.abs() <= STOP_EPSILON {
            *vx = 0.0;
        } else {
            *vx -= RUN_DECEL.copysign(*vx);
        }
    }

    /// Stomp or be hit by every enemy currently overlapping the player.
    ///
    /// A stomp needs the player's bottom edge to sit at least
    /// `STOMP_TOLERANCE` past the enemy's top edge; anything shallower against
    /// a live enemy kills the player.
    pub fn resolve_enemy_contacts(&mut self, enemies: &mut [Enemy], events: &mut Vec<GameEvent>) {
        for enemy in enemies.iter_mut() {
            if !self.body.rect.intersects(enemy.rect()) || !enemy.can_be_stomped() {
                continue;
            }
            if self.body.rect.bottom() - enemy.rect().top() >= STOMP_TOLERANCE {
                enemy.stomp();
                self.body.velocity.y = STOMP_BOUNCE;
                self.score += STOMP_SCORE;
                self.coins += 1;
                events.push(GameEvent::EnemyKilled {
                    kind: enemy.kind(),
                    position: enemy.rect().top_left(),
                });
            } else if self.state == PlayerState::Normal && enemy.is_lethal() {
                self.die(events);
            }
        }
    }

    fn handle_jump(&mut self, input: InputSnapshot, events: &mut Vec<GameEvent>) {
        if input.jump && self.jump_force < JUMP_FORCE_CAP && !self.jump_locked {
            self.jump_force += JUMP_STEP;
            self.body.velocity.y = JUMP_SPEED;
            self.body.on_ground = false;
            if !self.jump_cue_played {
                events.push(GameEvent::PlayerJumped);
                self.jump_cue_played = true;
            }
        } else {
            self.jump_locked = true;
        }

        if !input.jump && self.body.on_ground {
            self.jump_locked = false;
            self.jump_cue_played = false;
        }
    }

    fn clamp_to_left_bound(&mut self, view_width: f32) {
        let rect = &mut self.body.rect;
        if rect.left() < self.left_bound_x {
            rect.set_left(self.left_bound_x);
        }
        let half_view = view_width / 2.0;
        if rect.right() > self.left_bound_x + half_view {
            self.left_bound_x = rect.right() - half_view;
        }
    }

    /// Enter the death sequence. No-op unless the player is alive.
    pub fn die(&mut self, events: &mut Vec<GameEvent>) {
        if self.state != PlayerState::Normal {
            return;
        }
        log::info!(
            "Player died at ({}, {})",
            self.body.rect.x,
            self.body.rect.y
        );
        self.state = PlayerState::Dying;
        self.body.velocity = Vec2::new(0.0, DEATH_IMPULSE);
        self.body.animation_frame = 0;
        events.push(GameEvent::PlayerDied);
    }

    fn animate(&mut self, input: InputSnapshot) {
        self.body.animation_frame += 1;

        if self.state == PlayerState::Dying {
            self.pose = PlayerPose::Dead;
            if self.body.animation_frame > DEATH_ANIMATION_TICKS {
                self.state = PlayerState::Dead;
            }
            return;
        }

        let vx = self.body.velocity.x;
        self.pose = if vx == 0.0 && self.body.on_ground {
            PlayerPose::Stand
        } else if !self.body.on_ground {
            PlayerPose::Jump
        } else if (input.move_right && vx < 0.0) || (input.move_left && vx > 0.0) {
            self.body.animation_frame = 0;
            PlayerPose::Skid
        } else {
            PlayerPose::Run(RUN_CYCLE.frame_at(self.body.animation_frame))
        };
    }

    /// Time bonus paid out while the level-complete tally runs.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::enemy::EnemyState;
    use crate::entity::EntityKind;

    const GROUND: f32 = 412.0;
    const VIEW_WIDTH: f32 = 1008.0;

    fn floor(columns: usize) -> Vec<Block> {
        (0..columns)
            .map(|i| {
                Block::new(
                    BlockKind::Floor,
                    Rect::new(32.0 * i as f32, GROUND, 32.0, 32.0),
                )
                .unwrap()
            })
            .collect()
    }

    fn player_on_ground(x: f32) -> Player {
        Player::new(Rect::from_left_bottom(x, GROUND, 32.0, 32.0), 0, 0)
    }

    struct Harness {
        blocks: Vec<Block>,
        enemies: Vec<Enemy>,
        spawns: Vec<Coin>,
        events: Vec<GameEvent>,
    }

    impl Harness {
        fn new(blocks: Vec<Block>) -> Self {
            Self {
                blocks,
                enemies: Vec::new(),
                spawns: Vec::new(),
                events: Vec::new(),
            }
        }

        fn tick(&mut self, player: &mut Player, input: InputSnapshot) {
            let mut ctx = PlayerTick {
                input,
                blocks: &mut self.blocks,
                enemies: &mut self.enemies,
                view_width: VIEW_WIDTH,
                spawns: &mut self.spawns,
                events: &mut self.events,
            };
            player.update(&mut ctx);
        }
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn right() -> InputSnapshot {
        InputSnapshot {
            move_right: true,
            ..InputSnapshot::default()
        }
    }

    fn jump() -> InputSnapshot {
        InputSnapshot {
            jump: true,
            ..InputSnapshot::default()
        }
    }

    #[test]
    fn horizontal_step_biases_away_from_zero() {
        assert_eq!(horizontal_step(0.0), 0.0);
        assert_eq!(horizontal_step(1.0), 1.0);
        assert_eq!(horizontal_step(10.0), 1.0);
        assert_eq!(horizontal_step(11.0), 2.0);
        assert_eq!(horizontal_step(40.0), 4.0);
        assert_eq!(horizontal_step(-1.0), -1.0);
        assert_eq!(horizontal_step(-11.0), -2.0);
        assert_eq!(horizontal_step(-40.0), -4.0);
    }

    #[test]
    fn standing_player_stays_grounded() {
        let mut h = Harness::new(floor(10));
        let mut player = player_on_ground(64.0);
        for _ in 0..10 {
            h.tick(&mut player, idle());
        }
        assert_eq!(player.rect().bottom(), GROUND);
        assert!(player.body().on_ground);
        assert_eq!(player.velocity().y, 0.0);
        assert_eq!(player.pose(), PlayerPose::Stand);
    }

    #[test]
    fn acceleration_caps_at_max_run_speed() {
        let mut h = Harness::new(floor(200));
        let mut player = player_on_ground(64.0);
        for _ in 0..100 {
            h.tick(&mut player, right());
        }
        assert_eq!(player.velocity().x, MAX_RUN_SPEED);
        assert!(matches!(player.pose(), PlayerPose::Run(_)));
    }

    #[test]
    fn release_decelerates_and_snaps_to_zero() {
        let mut h = Harness::new(floor(200));
        let mut player = player_on_ground(64.0);
        for _ in 0..10 {
            h.tick(&mut player, right());
        }
        assert_eq!(player.velocity().x, 10.0);
        h.tick(&mut player, idle());
        assert_eq!(player.velocity().x, 8.5);
        for _ in 0..4 {
            h.tick(&mut player, idle());
        }
        // 8.5 -> 7 -> 5.5 -> 4 -> 2.5, then the epsilon snap.
        assert_eq!(player.velocity().x, 2.5);
        h.tick(&mut player, idle());
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn running_into_wall_snaps_and_zeroes_velocity() {
        let mut blocks = floor(20);
        let wall = Rect::new(200.0, GROUND - 64.0, 32.0, 64.0);
        blocks.push(Block::new(BlockKind::Pipe(crate::block::PipeType::Short), wall).unwrap());
        let mut h = Harness::new(blocks);
        let mut player = player_on_ground(166.0);
        player.body_mut().velocity.x = 40.0;

        for _ in 0..3 {
            h.tick(&mut player, idle());
        }
        assert_eq!(player.rect().right(), wall.left());
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn head_bump_on_box_breaks_it_once() {
        let box_rect = Rect::new(96.0, 200.0, 32.0, 32.0);
        let mut h = Harness::new(vec![Block::new(BlockKind::Box, box_rect).unwrap()]);
        let mut player = Player::new(Rect::new(96.0, 236.0, 32.0, 32.0), 0, 0);
        player.body_mut().velocity.y = JUMP_SPEED;
        player.body_mut().on_ground = false;

        h.tick(&mut player, idle());

        assert!(h.blocks[0].is_destroyed());
        assert_eq!(player.score, BOX_SCORE);
        assert_eq!(player.rect().top(), box_rect.bottom());
        assert_eq!(player.velocity().y, 0.0);
        assert!(player.jump_locked);
        assert_eq!(h.spawns.len(), 1);
        assert_eq!(h.spawns[0].rect().left(), box_rect.left());
        assert_eq!(h.spawns[0].rect().bottom(), box_rect.top());
        assert_eq!(
            h.events,
            vec![
                GameEvent::BoxDestroyed {
                    position: Vec2::new(96.0, 200.0)
                },
                GameEvent::CoinSpawned {
                    position: Vec2::new(96.0, 200.0)
                },
            ]
        );

        // The broken box no longer collides, so a second pass scores nothing.
        player.body_mut().velocity.y = JUMP_SPEED;
        h.tick(&mut player, idle());
        assert_eq!(player.score, BOX_SCORE);
        assert_eq!(h.spawns.len(), 1);
    }

    #[test]
    fn held_jump_is_capped_and_needs_release_to_repeat() {
        let mut h = Harness::new(floor(10));
        let mut player = player_on_ground(64.0);
        h.tick(&mut player, idle());

        let mut impulses = 0;
        for _ in 0..200 {
            let before = player.jump_force;
            h.tick(&mut player, jump());
            if player.jump_force > before {
                impulses += 1;
            }
        }
        assert_eq!(impulses, (JUMP_FORCE_CAP / JUMP_STEP) as usize);
        // Landed long ago, still holding: no new jump.
        assert!(player.body().on_ground);
        assert!(player.jump_locked);
        assert_eq!(
            h.events
                .iter()
                .filter(|e| **e == GameEvent::PlayerJumped)
                .count(),
            1
        );

        h.tick(&mut player, idle());
        assert!(!player.jump_locked);
        h.tick(&mut player, jump());
        assert_eq!(player.jump_force, JUMP_STEP);
        assert_eq!(player.velocity().y, JUMP_SPEED);
        assert_eq!(
            h.events
                .iter()
                .filter(|e| **e == GameEvent::PlayerJumped)
                .count(),
            2
        );
    }

    #[test]
    fn releasing_jump_mid_air_locks_until_landing() {
        let mut h = Harness::new(floor(10));
        let mut player = player_on_ground(64.0);
        h.tick(&mut player, idle());
        for _ in 0..5 {
            h.tick(&mut player, jump());
        }
        h.tick(&mut player, idle());
        assert!(player.jump_locked);
        let force = player.jump_force;
        h.tick(&mut player, jump());
        assert_eq!(player.jump_force, force);
        assert!(!player.body().on_ground);
    }

    fn enemy_with_top(top: f32, x: f32) -> Enemy {
        let mut enemy = Enemy::new(EntityKind::Mushroom, Rect::new(x, top, 32.0, 32.0)).unwrap();
        enemy.force_active();
        enemy
    }

    #[test]
    fn shallow_contact_with_live_enemy_kills_player() {
        let mut player = Player::new(Rect::new(100.0, 68.0, 32.0, 32.0), 0, 0);
        assert_eq!(player.rect().bottom(), 100.0);
        let mut enemies = vec![enemy_with_top(92.0, 110.0)];
        let mut events = Vec::new();

        player.resolve_enemy_contacts(&mut enemies, &mut events);

        assert!(player.is_dying());
        assert_eq!(player.velocity(), Vec2::new(0.0, DEATH_IMPULSE));
        assert_eq!(enemies[0].state(), EnemyState::Patrolling);
        assert_eq!(events, vec![GameEvent::PlayerDied]);
    }

    #[test]
    fn deep_contact_stomps_enemy() {
        let mut player = Player::new(Rect::new(100.0, 68.0, 32.0, 32.0), 0, 3);
        let mut enemies = vec![enemy_with_top(85.0, 110.0)];
        let mut events = Vec::new();

        player.resolve_enemy_contacts(&mut enemies, &mut events);

        assert!(player.is_alive());
        assert_eq!(enemies[0].state(), EnemyState::Dying);
        assert_eq!(player.score, STOMP_SCORE);
        assert_eq!(player.coins, 4);
        assert_eq!(player.velocity().y, STOMP_BOUNCE);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::EnemyKilled {
                kind: EntityKind::Mushroom,
                ..
            }]
        ));
    }

    #[test]
    fn dying_enemy_is_harmless() {
        let mut player = Player::new(Rect::new(100.0, 68.0, 32.0, 32.0), 0, 0);
        let mut enemy = enemy_with_top(92.0, 110.0);
        enemy.stomp();
        let mut enemies = vec![enemy];
        let mut events = Vec::new();

        player.resolve_enemy_contacts(&mut enemies, &mut events);

        assert!(player.is_alive());
        assert!(events.is_empty());
    }

    #[test]
    fn death_sequence_ends_after_threshold() {
        let mut h = Harness::new(floor(10));
        let mut player = player_on_ground(64.0);
        let mut events = Vec::new();
        player.die(&mut events);
        player.die(&mut events);
        assert_eq!(events, vec![GameEvent::PlayerDied]);

        for _ in 0..DEATH_ANIMATION_TICKS {
            h.tick(&mut player, right());
            assert!(player.is_dying());
            assert_eq!(player.velocity().x, 0.0);
        }
        h.tick(&mut player, idle());
        assert!(player.death_animation_complete());
        // Falls straight through the floor on the way out.
        assert!(player.rect().top() > GROUND);
    }

    #[test]
    fn death_arc_uses_half_gravity() {
        let mut h = Harness::new(floor(10));
        let mut player = player_on_ground(64.0);
        let mut events = Vec::new();
        player.die(&mut events);

        let mut arc = Vec::new();
        for _ in 0..12 {
            h.tick(&mut player, idle());
            arc.push(player.velocity().y);
        }
        assert_eq!(
            arc,
            vec![-17.5, -15.0, -12.5, -10.0, -7.5, -5.0, -2.5, 0.0, 2.5, 2.5, 2.5, 2.5]
        );
    }

    #[test]
    fn running_left_into_pipe_snaps_and_zeroes_velocity() {
        let mut blocks = floor(20);
        let pipe = Rect::new(100.0, GROUND - 64.0, 64.0, 64.0);
        blocks.push(Block::new(BlockKind::Pipe(crate::block::PipeType::Short), pipe).unwrap());
        let mut h = Harness::new(blocks);
        let mut player = player_on_ground(170.0);
        player.body_mut().velocity.x = -40.0;

        for _ in 0..3 {
            h.tick(&mut player, idle());
        }
        assert_eq!(player.rect().left(), pipe.right());
        assert_eq!(player.velocity().x, 0.0);
    }

    #[test]
    fn head_bump_on_brick_stops_without_breaking() {
        let brick_rect = Rect::new(96.0, 200.0, 32.0, 32.0);
        let mut h = Harness::new(vec![Block::new(BlockKind::Brick, brick_rect).unwrap()]);
        let mut player = Player::new(Rect::new(96.0, 236.0, 32.0, 32.0), 0, 0);
        player.body_mut().velocity.y = JUMP_SPEED;
        player.body_mut().on_ground = false;

        h.tick(&mut player, idle());

        assert_eq!(player.rect().top(), brick_rect.bottom());
        assert_eq!(player.velocity().y, 0.0);
        assert!(player.jump_locked);
        assert!(!h.blocks[0].is_destroyed());
        assert!(h.blocks[0].is_solid());
        assert!(h.spawns.is_empty());
        assert!(h.events.is_empty());
        assert_eq!(player.score, 0);
    }

    #[test]
    fn left_bound_ratchets_forward() {
        let mut h = Harness::new(floor(100));
        let mut player = player_on_ground(600.0);
        h.tick(&mut player, idle());
        assert_eq!(player.left_bound_x, 632.0 - VIEW_WIDTH / 2.0);

        let bound = player.left_bound_x;
        for _ in 0..400 {
            h.tick(
                &mut player,
                InputSnapshot {
                    move_left: true,
                    ..InputSnapshot::default()
                },
            );
        }
        assert_eq!(player.rect().left(), bound);
        assert_eq!(player.left_bound_x, bound);
    }
}
