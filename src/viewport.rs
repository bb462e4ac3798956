//! Pixel-space window over the landscape

use serde::{Deserialize, Serialize};

use crate::landscape::TileCoord;

/// Inclusive tile rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBounds {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl TileBounds {
    pub fn width(&self) -> u64 {
        (self.max_x - self.min_x + 1).max(0) as u64
    }

    pub fn height(&self) -> u64 {
        (self.max_y - self.min_y + 1).max(0) as u64
    }

    pub fn contains(&self, coord: TileCoord) -> bool {
        (self.min_x..=self.max_x).contains(&coord.x) && (self.min_y..=self.max_y).contains(&coord.y)
    }

    /// Row-major walk: increasing `y`, then increasing `x`.
    pub fn coords(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| TileCoord::new(x, y)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub tile_width: u32,
    pub tile_height: u32,
    pub view_width: u32,
    pub view_height: u32,
    center_x: f64,
    center_y: f64,
}

impl Viewport {
    pub fn new(tile_width: u32, tile_height: u32, view_width: u32, view_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            view_width,
            view_height,
            center_x: 0.0,
            center_y: 0.0,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_x, self.center_y)
    }

    pub fn set_center(&mut self, center_x_px: f64, center_y_px: f64) {
        self.center_x = center_x_px;
        self.center_y = center_y_px;
    }

    /// Center the view on a position given in tile units.
    pub fn center_on(&mut self, x: f64, y: f64) {
        self.set_center(
            x * f64::from(self.tile_width),
            y * f64::from(self.tile_height),
        );
    }

    /// Tile window around a pixel center. Both edges are inclusive, so the
    /// window can reach one tile past the view on each side.
    pub fn bounds(&self, center_x_px: f64, center_y_px: f64) -> TileBounds {
        let (min_x, max_x) = axis_span(center_x_px, self.tile_width, self.view_width);
        let (min_y, max_y) = axis_span(center_y_px, self.tile_height, self.view_height);
        TileBounds {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Coordinates visible around a pixel center, row-major. Pure geometry:
    /// nothing here touches a landscape.
    pub fn visible_tiles(&self, center_x_px: f64, center_y_px: f64) -> Vec<TileCoord> {
        self.bounds(center_x_px, center_y_px).coords().collect()
    }

    pub fn visible(&self) -> Vec<TileCoord> {
        self.visible_tiles(self.center_x, self.center_y)
    }

    /// Top-left pixel of `coord` relative to the view's own top-left corner.
    pub fn screen_origin(&self, coord: TileCoord) -> (i32, i32) {
        let left = f64::from(self.tile_width) * coord.x as f64 - self.center_x
            + f64::from(self.view_width / 2);
        let top = f64::from(self.tile_height) * coord.y as f64 - self.center_y
            + f64::from(self.view_height / 2);
        (left.floor() as i32, top.floor() as i32)
    }

    pub fn screen_center(&self) -> (i32, i32) {
        ((self.view_width / 2) as i32, (self.view_height / 2) as i32)
    }
}

fn axis_span(center_px: f64, tile_px: u32, view_px: u32) -> (i64, i64) {
    let tile_px = f64::from(tile_px);
    let center = center_px / tile_px;
    let half_extent = f64::from(view_px) / tile_px / 2.0;
    (
        (center - half_extent).floor() as i64,
        (center + half_extent).floor() as i64,
    )
}
