//! The World aggregate: everything one level owns, stepped one tick at a time.

use smb_core::{InputSnapshot, Rect};

use crate::block::{Block, Coin};
use crate::camera::Camera;
use crate::enemy::{Enemy, EnemyTick};
use crate::events::GameEvent;
use crate::level::LevelData;
use crate::player::{Player, PlayerTick};
use crate::sprite::{Renderable, SpriteKey};

pub struct World {
    blocks: Vec<Block>,
    enemies: Vec<Enemy>,
    coins: Vec<Coin>,
    player: Player,
    camera: Camera,
    level_end_x: f32,
    death_y: f32,
    completed: bool,
    /// Coins spawned during the player update, flushed once it returns.
    pending_coins: Vec<Coin>,
}

impl World {
    /// Build a fresh world from level data. The player starts with the given
    /// score and coins; everything else is reset.
    pub fn from_level(
        level: &LevelData,
        view_width: f32,
        view_height: f32,
        score: u32,
        coins: u32,
    ) -> Result<Self, String> {
        let blocks = level
            .blocks
            .iter()
            .map(|spawn| Block::new(spawn.kind, spawn.rect))
            .collect::<Result<Vec<_>, String>>()?;
        let enemies = level
            .enemies
            .iter()
            .map(|spawn| Enemy::new(spawn.kind, spawn.rect))
            .collect::<Result<Vec<_>, String>>()?;
        let camera = Camera::for_blocks(view_width, view_height, &blocks);

        log::debug!(
            "World built for '{}': level width {}, {} enemies",
            level.world,
            camera.level_width(),
            enemies.len()
        );

        Ok(Self {
            blocks,
            enemies,
            coins: Vec::new(),
            player: Player::new(level.player_spawn, score, coins),
            camera,
            level_end_x: level.level_end,
            death_y: level.death_y,
            completed: false,
            pending_coins: Vec::new(),
        })
    }

    /// Advance one tick. Returns the events raised during it, in order.
    pub fn step(&mut self, input: InputSnapshot) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.completed {
            return events;
        }

        {
            let mut ctx = PlayerTick {
                input,
                blocks: &mut self.blocks,
                enemies: &mut self.enemies,
                view_width: self.camera.view_width(),
                spawns: &mut self.pending_coins,
                events: &mut events,
            };
            self.player.update(&mut ctx);
        }

        // Activation tests against last tick's view; the camera scrolls below.
        let enemy_ctx = EnemyTick {
            blocks: &self.blocks,
            visible: self.camera.visible_rect(),
            death_y: self.death_y,
        };
        for enemy in &mut self.enemies {
            enemy.update(&enemy_ctx);
        }
        self.enemies.retain(|enemy| !enemy.is_removed());

        for block in &mut self.blocks {
            block.animate();
        }
        for coin in &mut self.coins {
            coin.update();
        }
        self.coins.retain(|coin| !coin.is_expired());
        // Fresh coins start moving next tick.
        self.coins.append(&mut self.pending_coins);

        self.camera.scroll(self.player.rect());

        if self.player.is_alive() && self.player.rect().top() > self.death_y {
            self.player.die(&mut events);
        }

        if self.player.is_alive() && self.player.rect().left() >= self.level_end_x {
            log::info!("Level end reached with score {}", self.player.score);
            self.completed = true;
            events.push(GameEvent::LevelCompleted);
        }

        events
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn player_dead(&self) -> bool {
        self.player.death_animation_complete()
    }

    /// Everything overlapping the current view, back to front: blocks, coins,
    /// enemies, then the player.
    pub fn renderables(&self) -> Vec<Renderable> {
        let visible = self.camera.visible_rect();
        let on_screen = |rect: &Rect| rect.intersects(&visible);

        let blocks = self
            .blocks
            .iter()
            .filter(|block| on_screen(block.rect()))
            .map(|block| Renderable {
                key: SpriteKey::for_block(block),
                facing: Default::default(),
                rect: *block.rect(),
            });
        let coins = self
            .coins
            .iter()
            .filter(|coin| on_screen(coin.rect()))
            .map(|coin| Renderable {
                key: SpriteKey::for_coin(coin),
                facing: Default::default(),
                rect: *coin.rect(),
            });
        let enemies = self
            .enemies
            .iter()
            .filter(|enemy| on_screen(enemy.rect()))
            .map(|enemy| Renderable {
                key: SpriteKey::for_enemy(enemy),
                facing: enemy.body().facing,
                rect: *enemy.rect(),
            });
        let player = std::iter::once(Renderable {
            key: SpriteKey::for_player(&self.player),
            facing: self.player.body().facing,
            rect: *self.player.rect(),
        });

        blocks.chain(coins).chain(enemies).chain(player).collect()
    }
}
