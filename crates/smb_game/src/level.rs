//! Level files: JSON description of blocks, enemies and spawn points.
//!
//! Vertical positions in the file are measured upward from the ground line,
//! which sits one and a half tiles above the bottom of the view. The loader
//! turns them into screen-space rectangles and rejects anything the
//! simulation cannot run: unknown tags, bad pipe codes, empty extents.

use serde::Deserialize;
use smb_core::Rect;
use std::fs;
use std::path::Path;

use crate::block::{BlockKind, PipeType, BLOCK_SIZE};
use crate::entity::EntityKind;

/// Distance from the bottom of the view up to the ground line.
pub const GROUND_INSET: f32 = BLOCK_SIZE * 3.0 / 2.0;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub world: String,
    pub time: f32,
    pub level_end: f32,
    pub player: PlayerSpawn,
    pub groups: LevelGroups,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PlayerSpawn {
    pub x: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LevelGroups {
    #[serde(default)]
    pub floor: Vec<FloorRun>,
    #[serde(default)]
    pub blocks: Vec<ThingEntry>,
    #[serde(default)]
    pub creatures: Vec<ThingEntry>,
    #[serde(default)]
    pub images: Vec<Decoration>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct FloorRun {
    pub x: f32,
    pub width: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThingEntry {
    pub thing: String,
    pub x: f32,
    pub bottom: f32,
    #[serde(rename = "type", default)]
    pub variant: Option<u8>,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

/// Background art placed by the level; the simulation never looks at it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Decoration {
    pub name: String,
    #[serde(rename = "type", default)]
    pub variant: Option<u8>,
    pub x: f32,
    pub bottom: f32,
}

impl Decoration {
    pub fn image_name(&self) -> String {
        match self.variant {
            Some(variant) => format!("{}{}.png", self.name.to_lowercase(), variant),
            None => format!("{}.png", self.name.to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockSpawn {
    pub kind: BlockKind,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub kind: EntityKind,
    pub rect: Rect,
}

/// A validated level, ready to build worlds from. Reloading a level builds a
/// fresh world from the same `LevelData`.
#[derive(Debug, Clone)]
pub struct LevelData {
    pub world: String,
    pub time: f32,
    pub level_end: f32,
    pub player_spawn: Rect,
    pub ground_y: f32,
    /// Bodies whose top passes below this have fallen out of the level.
    pub death_y: f32,
    pub blocks: Vec<BlockSpawn>,
    pub enemies: Vec<EnemySpawn>,
    pub decorations: Vec<Decoration>,
}

pub fn load_level_from_path(path: &Path, view_height: f32) -> Result<LevelData, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let level = parse_level(&raw, view_height)
        .map_err(|e| format!("{e} (in {})", path.display()))?;
    log::info!(
        "Loaded level '{}' from {}: {} blocks, {} enemies, ground line at y={}",
        level.world,
        path.display(),
        level.blocks.len(),
        level.enemies.len(),
        level.ground_y
    );
    Ok(level)
}

pub fn parse_level(raw: &str, view_height: f32) -> Result<LevelData, String> {
    let file: LevelFile =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse level JSON: {e}"))?;
    validate_level_file(&file)?;
    build_level(file, view_height)
}

fn validate_level_file(file: &LevelFile) -> Result<(), String> {
    if file.time <= 0.0 {
        return Err("Level validation failed: time must be > 0".to_string());
    }
    if file.level_end <= file.player.x {
        return Err(format!(
            "Level validation failed: level_end {} is not right of the player spawn {}",
            file.level_end, file.player.x
        ));
    }
    if file.groups.floor.is_empty() && file.groups.blocks.is_empty() {
        return Err("Level validation failed: level has no static geometry".to_string());
    }
    for run in &file.groups.floor {
        if run.width == 0 {
            return Err(format!(
                "Level validation failed: floor run at x={} has zero width",
                run.x
            ));
        }
    }
    Ok(())
}

fn build_level(file: LevelFile, view_height: f32) -> Result<LevelData, String> {
    let ground_y = view_height - GROUND_INSET;
    let mut blocks = Vec::new();

    for run in &file.groups.floor {
        for column in 0..run.width {
            let x = run.x + BLOCK_SIZE * column as f32;
            for bottom in [view_height + BLOCK_SIZE / 2.0, view_height - BLOCK_SIZE / 2.0] {
                blocks.push(BlockSpawn {
                    kind: BlockKind::Floor,
                    rect: Rect::from_left_bottom(x, bottom, BLOCK_SIZE, BLOCK_SIZE),
                });
            }
        }
    }

    for entry in &file.groups.blocks {
        let kind = block_kind(entry)?;
        let rect = entry_rect(entry, ground_y, kind.default_size())?;
        blocks.push(BlockSpawn { kind, rect });
    }

    let enemies = file
        .groups
        .creatures
        .iter()
        .map(|entry| {
            let kind = enemy_kind(entry)?;
            let rect = entry_rect(entry, ground_y, kind.default_size())?;
            Ok(EnemySpawn { kind, rect })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let (default_w, default_h) = EntityKind::Player.default_size();
    let player_spawn = Rect::from_left_bottom(
        file.player.x,
        ground_y,
        file.player.width.unwrap_or(default_w),
        file.player.height.unwrap_or(default_h),
    );
    if player_spawn.is_degenerate() {
        return Err("Level validation failed: player has degenerate size".to_string());
    }

    Ok(LevelData {
        world: file.world,
        time: file.time,
        level_end: file.level_end,
        player_spawn,
        ground_y,
        death_y: view_height,
        blocks,
        enemies,
        decorations: file.groups.images,
    })
}

fn block_kind(entry: &ThingEntry) -> Result<BlockKind, String> {
    match entry.thing.as_str() {
        "Box" => Ok(BlockKind::Box),
        "Brick" => Ok(BlockKind::Brick),
        "Block" => Ok(BlockKind::Block),
        "Pipe" => {
            let code = entry.variant.ok_or_else(|| {
                format!(
                    "Level validation failed: pipe at x={} is missing its type",
                    entry.x
                )
            })?;
            let pipe = PipeType::try_from(code).map_err(|e| {
                format!("Level validation failed: pipe at x={}: {e}", entry.x)
            })?;
            Ok(BlockKind::Pipe(pipe))
        }
        other => Err(format!(
            "Level validation failed: unknown block thing '{other}' at x={}",
            entry.x
        )),
    }
}

fn enemy_kind(entry: &ThingEntry) -> Result<EntityKind, String> {
    match entry.thing.as_str() {
        "Mushroom" => Ok(EntityKind::Mushroom),
        "Turtle" => Ok(EntityKind::Turtle),
        other => Err(format!(
            "Level validation failed: unknown creature thing '{other}' at x={}",
            entry.x
        )),
    }
}

fn entry_rect(entry: &ThingEntry, ground_y: f32, default_size: (f32, f32)) -> Result<Rect, String> {
    let rect = Rect::from_left_bottom(
        entry.x,
        ground_y - entry.bottom,
        entry.width.unwrap_or(default_size.0),
        entry.height.unwrap_or(default_size.1),
    );
    if rect.is_degenerate() {
        return Err(format!(
            "Level validation failed: {} at x={} has degenerate size {}x{}",
            entry.thing, entry.x, rect.width, rect.height
        ));
    }
    Ok(rect)
}
