//! Sparse, unbounded tile map with on-demand generation

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use crate::rng::{RngExt, TerrainRng};

pub const DEFAULT_ASPHALT_FREQUENCY: f64 = 0.05;

/// Integer tile address. Tile `(x, y)` covers `[x, x+1) × [y, y+1)`.
///
/// Ordering is row-major: by `y`, then by `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
}

impl TileCoord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// The tile containing a point given in tile units.
    pub fn containing(x: f64, y: f64) -> Self {
        Self {
            x: x.floor() as i64,
            y: y.floor() as i64,
        }
    }
}

impl Ord for TileCoord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for TileCoord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-tile state. `lushness` and the initial asphalt draw are fixed at
/// creation; `is_paved` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileAmbiance {
    pub lushness: f64,
    pub has_asphalt: bool,
    pub is_paved: bool,
}

impl TileAmbiance {
    fn generate(rng: &mut TerrainRng, asphalt_frequency: f64) -> Self {
        let lushness = rng.unit_f64();
        let has_asphalt = rng.chance(asphalt_frequency);
        Self {
            lushness,
            has_asphalt,
            is_paved: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Landscape {
    rng: TerrainRng,
    asphalt_frequency: f64,
    tiles: HashMap<TileCoord, TileAmbiance>,
}

impl Landscape {
    pub fn new(seed: u64) -> Self {
        Self::with_asphalt_frequency(seed, DEFAULT_ASPHALT_FREQUENCY)
    }

    pub fn with_asphalt_frequency(seed: u64, asphalt_frequency: f64) -> Self {
        Self {
            rng: TerrainRng::new(seed),
            asphalt_frequency,
            tiles: HashMap::new(),
        }
    }

    /// Rebuild a landscape from persisted parts. The generator picks up its
    /// stream exactly where it was when saved.
    pub fn restore(
        rng: TerrainRng,
        asphalt_frequency: f64,
        tiles: impl IntoIterator<Item = (TileCoord, TileAmbiance)>,
    ) -> Self {
        Self {
            rng,
            asphalt_frequency,
            tiles: tiles.into_iter().collect(),
        }
    }

    fn get_or_create(&mut self, coord: TileCoord) -> &mut TileAmbiance {
        let Self {
            rng,
            asphalt_frequency,
            tiles,
        } = self;
        tiles
            .entry(coord)
            .or_insert_with(|| TileAmbiance::generate(rng, *asphalt_frequency))
    }

    /// Persisted ambiance for `coord`, generated on first access.
    pub fn get_ambiance(&mut self, coord: TileCoord) -> &TileAmbiance {
        self.get_or_create(coord)
    }

    pub fn get_lushness(&mut self, coord: TileCoord) -> f64 {
        self.get_ambiance(coord).lushness
    }

    pub fn get_has_asphalt(&mut self, coord: TileCoord) -> bool {
        self.get_ambiance(coord).has_asphalt
    }

    pub fn get_is_paved(&mut self, coord: TileCoord) -> bool {
        self.get_ambiance(coord).is_paved
    }

    pub fn set_has_asphalt(&mut self, coord: TileCoord, value: bool) {
        self.get_or_create(coord).has_asphalt = value;
    }

    pub fn set_is_paved(&mut self, coord: TileCoord, value: bool) {
        self.get_or_create(coord).is_paved = value;
    }

    /// Read, test and clear the tile's asphalt under a single borrow.
    pub fn try_take_asphalt(&mut self, coord: TileCoord) -> bool {
        let tile = self.get_or_create(coord);
        std::mem::replace(&mut tile.has_asphalt, false)
    }

    /// Look at a tile without generating it.
    pub fn peek(&self, coord: TileCoord) -> Option<&TileAmbiance> {
        self.tiles.get(&coord)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn paved_count(&self) -> usize {
        self.tiles.values().filter(|tile| tile.is_paved).count()
    }

    /// Generated tiles in row-major order.
    pub fn tiles(&self) -> Vec<(TileCoord, TileAmbiance)> {
        let mut tiles: Vec<_> = self
            .tiles
            .iter()
            .map(|(coord, tile)| (*coord, *tile))
            .collect();
        tiles.sort_by_key(|(coord, _)| *coord);
        tiles
    }

    pub fn rng(&self) -> &TerrainRng {
        &self.rng
    }

    pub fn asphalt_frequency(&self) -> f64 {
        self.asphalt_frequency
    }
}

/// Landscape handle for a render thread and a simulation thread. Each call
/// holds the lock for the whole operation, so first-access generation runs
/// once per coordinate.
#[derive(Debug, Clone)]
pub struct SharedLandscape {
    inner: Arc<Mutex<Landscape>>,
}

impl SharedLandscape {
    pub fn new(landscape: Landscape) -> Self {
        Self {
            inner: Arc::new(Mutex::new(landscape)),
        }
    }

    // None of the operations leave a tile half-written, so a poisoned lock
    // still guards consistent state.
    fn lock(&self) -> MutexGuard<'_, Landscape> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_ambiance(&self, coord: TileCoord) -> TileAmbiance {
        *self.lock().get_ambiance(coord)
    }

    pub fn set_is_paved(&self, coord: TileCoord, value: bool) {
        self.lock().set_is_paved(coord, value);
    }

    pub fn try_take_asphalt(&self, coord: TileCoord) -> bool {
        self.lock().try_take_asphalt(coord)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut Landscape) -> R) -> R {
        f(&mut self.lock())
    }
}
