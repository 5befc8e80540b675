//! Map model: a spawn list and the tile coordinates of solid blocks.
//!
//! Maps are authored as JSON (or YAML) documents:
//! ```text
//! { "spawn": [ {"x": 5, "y": 5} ], "blocks": [ {"x": 0, "y": 0}, ... ] }
//! ```
//! A map is loaded once at startup and never mutated afterwards. Only the
//! first spawn point is used.

use gridshot_common::Position;
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUILTIN_MAP: &str = include_str!("../maps/default.json");

/// Errors from loading or validating a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("map has no spawn point")]
    NoSpawn,
    #[error("{kind} #{index} has a non-finite coordinate")]
    NonFinite { kind: &'static str, index: usize },
    #[error("unsupported map file extension: {0:?}")]
    UnsupportedFormat(String),
}

/// Static map data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub spawn: Vec<Position>,
    #[serde(default)]
    pub blocks: Vec<Position>,
}

impl MapData {
    /// The map bundled with the crate.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_MAP) {
            Ok(map) => map,
            // The bundled file is covered by tests; an empty room is the fallback.
            Err(e) => {
                tracing::error!("built-in map is invalid: {e}");
                Self {
                    spawn: vec![Position::default()],
                    blocks: Vec::new(),
                }
            }
        }
    }

    /// Parse and validate a JSON map document.
    pub fn from_json_str(data: &str) -> Result<Self, MapError> {
        let map: Self = serde_json::from_str(data)?;
        map.validate()?;
        Ok(map)
    }

    /// Parse and validate a YAML map document.
    pub fn from_yaml_str(data: &str) -> Result<Self, MapError> {
        let map: Self = serde_yaml::from_str(data)?;
        map.validate()?;
        Ok(map)
    }

    /// Load a map file, choosing the parser from the extension.
    /// Files without an extension are read as JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let map = match ext.as_deref() {
            None | Some("json") => Self::from_json_str(&data)?,
            Some("yaml") | Some("yml") => Self::from_yaml_str(&data)?,
            Some(other) => return Err(MapError::UnsupportedFormat(other.to_string())),
        };

        tracing::info!(
            "loaded map {} ({} blocks, spawn at {:?})",
            path.display(),
            map.blocks.len(),
            map.spawn_point()
        );
        Ok(map)
    }

    /// Save the map as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MapError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Check that there is a spawn point and every coordinate is finite.
    /// Duplicate blocks are allowed.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.spawn.is_empty() {
            return Err(MapError::NoSpawn);
        }
        if let Some(index) = self.spawn.iter().position(|p| !p.is_finite()) {
            return Err(MapError::NonFinite {
                kind: "spawn",
                index,
            });
        }
        if let Some(index) = self.blocks.iter().position(|p| !p.is_finite()) {
            return Err(MapError::NonFinite {
                kind: "block",
                index,
            });
        }
        Ok(())
    }

    /// Where the player starts: the first spawn entry.
    pub fn spawn_point(&self) -> Position {
        self.spawn.first().copied().unwrap_or_default()
    }
}

impl Default for MapData {
    fn default() -> Self {
        Self::builtin()
    }
}
