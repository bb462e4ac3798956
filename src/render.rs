//! Tile appearance and the per-frame read pass handed to a renderer

use serde::Serialize;

use crate::landscape::{Landscape, TileAmbiance, TileCoord};
use crate::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const ASPHALT_COLOR: Rgb = Rgb(128, 128, 128);
pub const PLAYER_COLOR: Rgb = Rgb(255, 255, 0);
pub const OUTLINE_COLOR: Rgb = Rgb(0, 0, 0);
const BARREN_COLOR: Rgb = Rgb(120, 86, 40);
const LUSH_COLOR: Rgb = Rgb(0, 255, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileAppearance {
    pub fill: Rgb,
    pub asphalt_marker: bool,
}

impl TileAppearance {
    pub fn glyph(&self) -> char {
        match (self.asphalt_marker, self.fill == ASPHALT_COLOR) {
            (true, _) => 'o',
            (false, true) => '#',
            (false, false) if self.fill.1 >= 170 => '"',
            (false, false) if self.fill.1 >= 85 => ',',
            _ => '.',
        }
    }
}

pub fn tile_appearance(tile: &TileAmbiance) -> TileAppearance {
    let fill = if tile.is_paved {
        ASPHALT_COLOR
    } else {
        lerp(BARREN_COLOR, LUSH_COLOR, tile.lushness)
    };
    TileAppearance {
        fill,
        asphalt_marker: tile.has_asphalt,
    }
}

fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
    Rgb(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

#[derive(Debug, Clone, Serialize)]
pub struct TileDraw {
    pub coord: TileCoord,
    pub left: i32,
    pub top: i32,
    pub appearance: TileAppearance,
}

/// The player's fixed square at the center of the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerMarker {
    pub center_x: i32,
    pub center_y: i32,
    pub fill: Rgb,
    pub outline: Rgb,
}

impl PlayerMarker {
    pub fn at(center_x: i32, center_y: i32) -> Self {
        Self {
            center_x,
            center_y,
            fill: PLAYER_COLOR,
            outline: OUTLINE_COLOR,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FramePlan {
    pub frame: u64,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tiles: Vec<TileDraw>,
    pub player_marker: PlayerMarker,
}

impl FramePlan {
    /// One character per visible tile, the player drawn as `@`.
    pub fn to_ascii(&self, player_tile: TileCoord) -> String {
        let mut out = String::new();
        let mut row = None;
        for draw in &self.tiles {
            if row.is_some_and(|y| y != draw.coord.y) {
                out.push('\n');
            }
            row = Some(draw.coord.y);
            if draw.coord == player_tile {
                out.push('@');
            } else {
                out.push(draw.appearance.glyph());
            }
        }
        out.push('\n');
        out
    }
}

/// Read pass for one frame. Windowing is pure; the ambiance reads made here
/// are what bring unseen tiles into existence.
pub fn plan_frame(frame: u64, viewport: &Viewport, landscape: &mut Landscape) -> FramePlan {
    let tiles = viewport
        .visible()
        .into_iter()
        .map(|coord| {
            let (left, top) = viewport.screen_origin(coord);
            TileDraw {
                coord,
                left,
                top,
                appearance: tile_appearance(landscape.get_ambiance(coord)),
            }
        })
        .collect();
    let (center_x, center_y) = viewport.screen_center();
    FramePlan {
        frame,
        tile_width: viewport.tile_width,
        tile_height: viewport.tile_height,
        tiles,
        player_marker: PlayerMarker::at(center_x, center_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ambiance(lushness: f64, has_asphalt: bool, is_paved: bool) -> TileAmbiance {
        TileAmbiance {
            lushness,
            has_asphalt,
            is_paved,
        }
    }

    #[test]
    fn paved_tiles_use_asphalt_color() {
        let look = tile_appearance(&ambiance(0.9, false, true));
        assert_eq!(look.fill, ASPHALT_COLOR);
        assert!(!look.asphalt_marker);
    }

    #[test]
    fn lushness_runs_from_brown_to_green() {
        assert_eq!(tile_appearance(&ambiance(0.0, false, false)).fill, BARREN_COLOR);
        let lush = tile_appearance(&ambiance(0.999, false, false)).fill;
        assert!(lush.1 > 250 && lush.0 < 2 && lush.2 == 0);
    }

    #[test]
    fn pickup_marker_shows_on_paved_tiles_too() {
        assert!(tile_appearance(&ambiance(0.2, true, true)).asphalt_marker);
        assert!(tile_appearance(&ambiance(0.2, true, false)).asphalt_marker);
    }

    #[test]
    fn windowing_alone_generates_nothing() {
        let mut viewport = Viewport::new(32, 32, 640, 480);
        viewport.center_on(-40.0, 12.0);
        let landscape = Landscape::new(1);

        let visible = viewport.visible();
        assert!(!visible.is_empty());
        assert!(landscape.is_empty());
    }

    #[test]
    fn plan_frame_generates_every_visible_tile() {
        let viewport = Viewport::new(32, 32, 640, 480);
        let mut landscape = Landscape::new(1);

        let plan = plan_frame(0, &viewport, &mut landscape);

        assert_eq!(plan.tiles.len(), 21 * 16);
        assert_eq!(landscape.len(), 21 * 16);
        assert_eq!((plan.player_marker.center_x, plan.player_marker.center_y), (320, 240));
    }

    #[test]
    fn player_marker_carries_its_colors() {
        let mut viewport = Viewport::new(32, 32, 640, 640);
        viewport.center_on(-3.5, 12.25);
        let mut landscape = Landscape::new(1);

        let marker = plan_frame(0, &viewport, &mut landscape).player_marker;

        assert_eq!(marker, PlayerMarker::at(320, 320));
        assert_eq!(marker.fill, Rgb(255, 255, 0));
        assert_eq!(marker.outline, Rgb(0, 0, 0));
    }

    #[test]
    fn ascii_marks_player_and_rows() {
        let viewport = Viewport::new(32, 32, 64, 64);
        let mut landscape = Landscape::with_asphalt_frequency(1, 0.0);
        landscape.set_is_paved(TileCoord::new(1, 1), true);

        let ascii = plan_frame(0, &viewport, &mut landscape).to_ascii(TileCoord::new(0, 0));
        let rows: Vec<&str> = ascii.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].chars().nth(1), Some('@'));
        assert_eq!(rows[2].chars().nth(2), Some('#'));
    }
}
