//! Scripted input for headless runs and determinism tests.
//!
//! A replay is a list of frames. Each frame holds the movement keys for
//! `repeat` ticks; taps, clicks and typed text fire on its first tick only.

use glam::Vec2;
use serde::Deserialize;
use smb_core::{InputState, Key, MouseBtn};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub tap: Vec<Key>,
    #[serde(default)]
    pub click: Option<[f32; 2]>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

/// One tick worth of scripted input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayStep {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub taps: Vec<Key>,
    pub click: Option<Vec2>,
    pub text: String,
}

impl ReplayStep {
    /// Drive `input` for this tick. Call `input.end_frame()` after the tick.
    pub fn apply(&self, input: &mut InputState) {
        for (key, held) in [
            (Key::Left, self.left),
            (Key::Right, self.right),
            (Key::Up, self.jump),
        ] {
            if held {
                input.key_down(key);
            } else {
                input.key_up(key);
            }
        }
        for key in &self.taps {
            input.key_down(*key);
            input.key_up(*key);
        }
        if let Some(point) = self.click {
            input.mouse_position = (f64::from(point.x), f64::from(point.y));
            input.mouse_down(MouseBtn::Left);
            input.mouse_up(MouseBtn::Left);
        }
        if !self.text.is_empty() {
            input.text_input(&self.text);
        }
    }
}

impl ReplaySequence {
    pub fn expanded_steps(&self) -> Vec<ReplayStep> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let held = ReplayStep {
                left: frame.left,
                right: frame.right,
                jump: frame.jump,
                ..Default::default()
            };
            out.push(ReplayStep {
                taps: frame.tap.clone(),
                click: frame.click.map(|[x, y]| Vec2::new(x, y)),
                text: frame.text.clone().unwrap_or_default(),
                ..held.clone()
            });
            for _ in 1..frame.repeat.max(1) {
                out.push(held.clone());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
