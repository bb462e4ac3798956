//! Save files and periodic autosaves

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SnapshotConfig;
use crate::landscape::{Landscape, TileAmbiance, TileCoord};
use crate::rng::TerrainRng;
use crate::world::{PlayerState, World};

pub const SAVE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub version: u32,
    pub session: String,
    pub saved_at: DateTime<Utc>,
    pub tile_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub x: i64,
    pub y: i64,
    pub lushness: f64,
    pub has_asphalt: bool,
    pub is_paved: bool,
}

/// A whole world in plain data. Tiles are stored row-major so identical
/// worlds produce identical files apart from the timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveGame {
    pub metadata: SaveMetadata,
    pub player: PlayerState,
    pub rng: TerrainRng,
    pub asphalt_frequency: f64,
    pub tiles: Vec<TileRecord>,
}

impl SaveGame {
    pub fn capture(session: &str, world: &World) -> Self {
        let tiles: Vec<TileRecord> = world
            .landscape
            .tiles()
            .into_iter()
            .map(|(coord, tile)| TileRecord {
                x: coord.x,
                y: coord.y,
                lushness: tile.lushness,
                has_asphalt: tile.has_asphalt,
                is_paved: tile.is_paved,
            })
            .collect();
        Self {
            metadata: SaveMetadata {
                version: SAVE_FORMAT_VERSION,
                session: session.to_string(),
                saved_at: Utc::now(),
                tile_count: tiles.len(),
            },
            player: world.player.clone(),
            rng: world.landscape.rng().clone(),
            asphalt_frequency: world.landscape.asphalt_frequency(),
            tiles,
        }
    }

    pub fn into_world(self) -> World {
        let tiles = self.tiles.into_iter().map(|record| {
            (
                TileCoord::new(record.x, record.y),
                TileAmbiance {
                    lushness: record.lushness,
                    has_asphalt: record.has_asphalt,
                    is_paved: record.is_paved,
                },
            )
        });
        World {
            landscape: Landscape::restore(self.rng, self.asphalt_frequency, tiles),
            player: self.player,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        let save: SaveGame = serde_json::from_str(text)?;
        if save.metadata.version != SAVE_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(save.metadata.version));
        }
        Ok(save)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

pub struct SnapshotWriter {
    output_dir: PathBuf,
    interval_frames: u64,
}

impl SnapshotWriter {
    pub fn new(output_dir: impl AsRef<Path>, interval_frames: u64) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            interval_frames,
        }
    }

    pub fn from_config(config: &SnapshotConfig) -> Self {
        Self::new(&config.output_dir, config.interval_frames)
    }

    pub fn should_write(&self, frame: u64) -> bool {
        self.interval_frames != 0 && frame != 0 && frame % self.interval_frames == 0
    }

    pub fn maybe_write(
        &self,
        session: &str,
        world: &World,
    ) -> Result<Option<PathBuf>, SnapshotError> {
        let frame = world.frame_number();
        if !self.should_write(frame) {
            return Ok(None);
        }
        let path = self
            .output_dir
            .join(session)
            .join(format!("frame_{frame:06}.json"));
        SaveGame::capture(session, world).write_to(&path)?;
        Ok(Some(path))
    }

    pub fn list_saves(&self, session: &str) -> Result<Vec<PathBuf>, SnapshotError> {
        let dir = self.output_dir.join(session);
        let mut saves = Vec::new();
        if !dir.exists() {
            return Ok(saves);
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_save = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("frame_") && name.ends_with(".json"));
            if is_save {
                saves.push(path);
            }
        }
        saves.sort();
        Ok(saves)
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported save format version {0}")]
    UnsupportedVersion(u32),
}
