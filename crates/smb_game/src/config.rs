use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{SessionSettings, START_LIVES};

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    #[serde(default = "default_view_width")]
    pub view_width: f32,
    #[serde(default = "default_view_height")]
    pub view_height: f32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_lives")]
    pub lives: i32,
    #[serde(default = "default_level_path")]
    pub level_path: PathBuf,
    #[serde(default = "default_records_path")]
    pub records_path: PathBuf,
    #[serde(default)]
    pub replay_path: Option<PathBuf>,
    /// Pace ticks against the wall clock instead of running flat out.
    #[serde(default)]
    pub realtime: bool,
    /// Ticks to simulate when no replay is given.
    #[serde(default = "default_idle_ticks")]
    pub idle_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: default_view_width(),
            view_height: default_view_height(),
            fps: default_fps(),
            lives: default_lives(),
            level_path: default_level_path(),
            records_path: default_records_path(),
            replay_path: None,
            realtime: false,
            idle_ticks: default_idle_ticks(),
        }
    }
}

impl GameConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            view_width: self.view_width,
            view_height: self.view_height,
            fps: self.fps,
            lives: self.lives,
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.view_width <= 0.0 || config.view_height <= 0.0 {
        return Err(format!(
            "Config validation failed: view size {}x{} must be positive",
            config.view_width, config.view_height
        ));
    }
    if config.fps == 0 {
        return Err("Config validation failed: fps must be > 0".to_string());
    }
    if config.lives < 0 {
        return Err("Config validation failed: lives must be >= 0".to_string());
    }
    Ok(())
}

const fn default_view_width() -> f32 {
    1008.0
}

const fn default_view_height() -> f32 {
    460.0
}

const fn default_fps() -> u32 {
    60
}

const fn default_lives() -> i32 {
    START_LIVES
}

fn default_level_path() -> PathBuf {
    PathBuf::from("assets/levels/level_1_1.json")
}

fn default_records_path() -> PathBuf {
    PathBuf::from("assets/records.json")
}

const fn default_idle_ticks() -> u32 {
    600
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "smb_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    #[test]
    fn empty_object_gives_defaults() {
        let path = temp_file_path("empty");
        fs::write(&path, "{}").expect("write temp file");
        let config = load_config_from_path(&path).expect("defaults are valid");
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.session_settings().lives, 3);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let path = temp_file_path("partial");
        fs::write(&path, r#"{ "fps": 30, "realtime": true }"#).expect("write temp file");
        let config = load_config_from_path(&path).expect("valid config");
        assert_eq!(config.fps, 30);
        assert!(config.realtime);
        assert_eq!(config.view_width, 1008.0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_zero_fps() {
        let path = temp_file_path("zero_fps");
        fs::write(&path, r#"{ "fps": 0 }"#).expect("write temp file");
        let err = load_config_from_path(&path).expect_err("fps 0 is invalid");
        assert!(err.contains("fps must be > 0"));
        let _ = fs::remove_file(path);
    }
}
