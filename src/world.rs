use serde::{Deserialize, Serialize};

use crate::landscape::{Landscape, TileCoord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Position in tile units; the player can stand mid-tile.
    pub x: f64,
    pub y: f64,
    pub asphalt_count: u32,
    pub frame_number: u64,
}

impl PlayerState {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn tile(&self) -> TileCoord {
        TileCoord::containing(self.x, self.y)
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) -> TileCoord {
        self.x += dx;
        self.y += dy;
        self.tile()
    }
}

/// Everything a saved game holds.
#[derive(Debug, Clone)]
pub struct World {
    pub landscape: Landscape,
    pub player: PlayerState,
}

impl World {
    pub fn new(landscape: Landscape) -> Self {
        Self {
            landscape,
            player: PlayerState::default(),
        }
    }

    pub fn player_tile(&self) -> TileCoord {
        self.player.tile()
    }

    pub fn frame_number(&self) -> u64 {
        self.player.frame_number
    }

    pub fn asphalt_count(&self) -> u32 {
        self.player.asphalt_count
    }
}
