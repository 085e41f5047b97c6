//! One play-through: lives, the level timer, respawns and the end-of-level tally.
//!
//! The session owns the current `World` and rebuilds it from the same level
//! data whenever a life is lost or the player restarts, carrying score and
//! coins over.

use smb_core::InputSnapshot;

use crate::events::{GameEvent, SoundCue};
use crate::level::LevelData;
use crate::world::World;

pub const START_LIVES: i32 = 3;
pub const GAME_OVER_TICKS: u32 = 250;
/// Level timer seconds lost per second of play.
pub const TIMER_RATE: f32 = 2.0;
/// Timer seconds converted to bonus per second of the level-complete tally.
pub const TALLY_RATE: f32 = 60.0;
pub const BONUS_PER_TIMER_SECOND: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Level end reached; the timer is being converted into score.
    Tally,
    /// Out of lives; the banner is showing.
    GameOver,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Game(GameEvent),
    LifeLost { lives_left: i32 },
    LevelReloaded,
    GameOver,
    Finished { score: u32 },
}

impl SessionEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            SessionEvent::Game(event) => event.sound_cue(),
            SessionEvent::GameOver => Some(SoundCue::GameOver),
            SessionEvent::LevelReloaded => Some(SoundCue::Background),
            _ => None,
        }
    }
}

/// What the heads-up display shows each frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub time: i32,
    pub world: String,
    pub coins: u32,
    pub lives: i32,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub view_width: f32,
    pub view_height: f32,
    pub fps: u32,
    pub lives: i32,
}

pub struct Session {
    level: LevelData,
    settings: SessionSettings,
    world: World,
    phase: SessionPhase,
    lives: i32,
    time: f32,
    paused: bool,
    banner_ticks: u32,
}

impl Session {
    pub fn new(level: LevelData, settings: SessionSettings) -> Result<Self, String> {
        let world = World::from_level(&level, settings.view_width, settings.view_height, 0, 0)?;
        log::info!(
            "Session started on '{}' with {} lives",
            level.world,
            settings.lives
        );
        Ok(Self {
            time: level.time,
            level,
            settings,
            world,
            phase: SessionPhase::Playing,
            lives: settings.lives,
            paused: false,
            banner_ticks: 0,
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn level(&self) -> &LevelData {
        &self.level
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SessionPhase::Finished
    }

    pub fn score(&self) -> u32 {
        self.world.player().score
    }

    pub fn hud(&self) -> Hud {
        let player = self.world.player();
        Hud {
            score: player.score,
            time: self.time.max(0.0) as i32,
            world: self.level.world.clone(),
            coins: player.coins,
            lives: self.lives,
            paused: self.paused,
        }
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::debug!("Paused: {}", self.paused);
    }

    /// Rebuild the level, keeping score and coins. Does nothing once the
    /// game is over.
    pub fn reload(&mut self) -> Result<(), String> {
        if matches!(self.phase, SessionPhase::GameOver | SessionPhase::Finished) {
            return Ok(());
        }
        self.rebuild_world()?;
        self.phase = SessionPhase::Playing;
        Ok(())
    }

    fn rebuild_world(&mut self) -> Result<(), String> {
        let player = self.world.player();
        let (score, coins) = (player.score, player.coins);
        self.world = World::from_level(
            &self.level,
            self.settings.view_width,
            self.settings.view_height,
            score,
            coins,
        )?;
        self.time = self.level.time;
        log::info!(
            "Reloaded '{}' with score {score}, coins {coins}, lives {}",
            self.level.world,
            self.lives
        );
        Ok(())
    }

    pub fn tick(&mut self, input: InputSnapshot) -> Result<Vec<SessionEvent>, String> {
        let mut out = Vec::new();
        let fps = self.settings.fps.max(1) as f32;

        match self.phase {
            SessionPhase::Finished => {}
            SessionPhase::GameOver => {
                self.banner_ticks += 1;
                if self.banner_ticks > GAME_OVER_TICKS {
                    self.finish(&mut out);
                }
            }
            SessionPhase::Tally if !self.paused => {
                self.time -= TALLY_RATE / fps;
                let bonus = (TALLY_RATE / fps * BONUS_PER_TIMER_SECOND) as u32;
                self.world.player_mut().add_score(bonus);
                if self.time <= 0.0 {
                    self.time = 0.0;
                    self.finish(&mut out);
                }
            }
            SessionPhase::Playing if !self.paused => {
                out.extend(self.world.step(input).into_iter().map(SessionEvent::Game));
                self.time -= TIMER_RATE / fps;

                if self.world.is_completed() {
                    self.phase = SessionPhase::Tally;
                } else if self.world.player_dead() {
                    self.lose_life(&mut out)?;
                }
            }
            SessionPhase::Playing | SessionPhase::Tally => {}
        }
        Ok(out)
    }

    fn lose_life(&mut self, out: &mut Vec<SessionEvent>) -> Result<(), String> {
        self.lives -= 1;
        out.push(SessionEvent::LifeLost {
            lives_left: self.lives,
        });
        self.rebuild_world()?;
        if self.lives < 0 {
            log::info!("Game over with score {}", self.score());
            self.phase = SessionPhase::GameOver;
            self.banner_ticks = 0;
            out.push(SessionEvent::GameOver);
        } else {
            out.push(SessionEvent::LevelReloaded);
        }
        Ok(())
    }

    fn finish(&mut self, out: &mut Vec<SessionEvent>) {
        self.phase = SessionPhase::Finished;
        let score = self.score();
        log::info!("Session finished with score {score}");
        out.push(SessionEvent::Finished { score });
    }
}
