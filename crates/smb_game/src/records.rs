//! Persisted high-score table: a JSON array of `{name, score}`, best first.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighScoreTable {
    entries: Vec<RecordEntry>,
}

impl HighScoreTable {
    pub fn new(entries: Vec<RecordEntry>) -> Self {
        Self { entries }
    }

    /// Load the table. A missing file is an empty table; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            log::info!("No records file at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        let entries: Vec<RecordEntry> = serde_json::from_str(&raw)
            .map_err(|e| format!("Failed to parse records {}: {e}", path.display()))?;
        log::debug!("Loaded {} records from {}", entries.len(), path.display());
        Ok(Self { entries })
    }

    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                format!("Failed to create records dir '{}': {e}", parent.display())
            })?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| format!("Failed to serialize records: {e}"))?;
        fs::write(path, json).map_err(|e| format!("Failed to write '{}': {e}", path.display()))?;
        log::info!("Saved {} records to {}", self.entries.len(), path.display());
        Ok(())
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A score earns a new record only by beating the current top entry.
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.first().map_or(true, |top| top.score < score)
    }

    pub fn insert_top(&mut self, name: impl Into<String>, score: u32) {
        self.entries.insert(
            0,
            RecordEntry {
                name: name.into(),
                score,
            },
        );
    }

    /// Display lines, numbered from 1.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| format!("{}) {}: {}", i + 1, entry.name, entry.score))
            .collect()
    }
}
