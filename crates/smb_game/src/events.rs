//! Discrete things that happened during a tick.
//!
//! The simulation never plays sounds or touches the HUD itself; it reports
//! these and the presentation side reacts.

use glam::Vec2;

use crate::entity::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    PlayerJumped,
    BoxDestroyed { position: Vec2 },
    CoinSpawned { position: Vec2 },
    EnemyKilled { kind: EntityKind, position: Vec2 },
    PlayerDied,
    LevelCompleted,
}

/// Fire-and-forget audio cues. `Music` cues replace the current track,
/// the rest are one-shot effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Coin,
    Kill,
    Lose,
    Win,
    GameOver,
    Background,
}

impl SoundCue {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Jump => "sounds/jump.mp3",
            Self::Coin => "sounds/coin.mp3",
            Self::Kill => "sounds/kill.mp3",
            Self::Lose => "sounds/lose.mp3",
            Self::Win => "sounds/win.mp3",
            Self::GameOver => "sounds/gameover.mp3",
            Self::Background => "sounds/fon.mp3",
        }
    }

    pub fn is_music(self) -> bool {
        matches!(self, Self::Win | Self::GameOver | Self::Background)
    }
}

impl GameEvent {
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            Self::PlayerJumped => Some(SoundCue::Jump),
            Self::BoxDestroyed { .. } => Some(SoundCue::Coin),
            Self::CoinSpawned { .. } => None,
            Self::EnemyKilled { .. } => Some(SoundCue::Kill),
            Self::PlayerDied => Some(SoundCue::Lose),
            Self::LevelCompleted => Some(SoundCue::Win),
        }
    }
}
