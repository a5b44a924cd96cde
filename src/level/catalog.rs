//! The fixed tile catalog the level generator refers to
//!
//! Coordinates are in tile-grid units on the meadow tile sheet.

use crate::tilemap::{Layer, TileOptions, TileRegistry};

pub const GRASS_FLAT: &str = "grass_flat";
pub const GRASS_TUFTS: &str = "grass_tufts";
pub const GRASS_FLOWERS: &str = "grass_flowers";
pub const GRASS_STONES: &str = "grass_stones";

pub const TREE_TOP: &str = "tree_top";
pub const TREE_BOTTOM: &str = "tree_bottom";
pub const BUSH: &str = "bush";
pub const MUSHROOMS: &str = "mushrooms";

pub const PLAYER: &str = "player";

/// 9-slice dirt patch names, row-major from the top-left corner.
pub const DIRT_SLICES: [[&str; 3]; 3] = [
    ["dirt_top_left", "dirt_top", "dirt_top_right"],
    ["dirt_left", "dirt_middle", "dirt_right"],
    ["dirt_bottom_left", "dirt_bottom", "dirt_bottom_right"],
];

/// Sheet position of the top-left dirt slice.
const DIRT_ORIGIN: (u32, u32) = (0, 1);

/// Dirt slice for the cell at `(row, col)` of a `height` x `width` patch.
///
/// The first row/column take precedence over the last when a patch is only
/// one cell thick.
pub fn dirt_slice(row: u32, col: u32, height: u32, width: u32) -> &'static str {
    let band = |offset: u32, extent: u32| {
        if offset == 0 {
            0
        } else if offset + 1 == extent {
            2
        } else {
            1
        }
    };
    DIRT_SLICES[band(row, height)][band(col, width)]
}

/// Register every catalog tile against `registry`.
pub fn setup_tile_definitions<R: TileRegistry + ?Sized>(registry: &mut R) {
    let ground = TileOptions::layer(Layer::Bottom);
    let over = TileOptions::layer(Layer::Top);

    let grass = [GRASS_FLAT, GRASS_TUFTS, GRASS_FLOWERS, GRASS_STONES];
    for (x, name) in grass.into_iter().enumerate() {
        registry.define_tile(name, x as u32, 0, ground);
    }

    for (row, names) in DIRT_SLICES.iter().enumerate() {
        for (col, name) in names.iter().enumerate() {
            let (x, y) = (DIRT_ORIGIN.0 + col as u32, DIRT_ORIGIN.1 + row as u32);
            registry.define_tile(name, x, y, ground);
        }
    }

    registry.define_tile(TREE_TOP, 4, 1, over.solid());
    registry.define_tile(TREE_BOTTOM, 4, 2, over.solid());
    registry.define_tile(BUSH, 5, 1, over);
    registry.define_tile(MUSHROOMS, 5, 2, over);

    registry.define_tile(PLAYER, 6, 0, TileOptions::layer(Layer::Sprite));
}
