//! Five-stage layered level compositor
//!
//! Stages run in a fixed order and later stages may overwrite earlier ones:
//!
//! 1. **Base fill**: every cell gets a random grass variant.
//! 2. **Patches**: rectangles of 9-slice dirt replace the ground tile.
//! 3. **Tall decorations**: two-cell trees, always written, both cells solid.
//! 4. **Small decorations**: written only into empty top slots.
//! 5. **Paths**: force flat grass and clear bushes/mushrooms, never trees.
//!
//! Only stage 1 is random, and it draws from a seeded generator, so the
//! output is a pure function of `(layout, seed, grid size)`. Every table in a
//! [`LevelLayout`] is authored data; nothing is searched or derived.

use serde::{Deserialize, Serialize};

use super::catalog::{
    dirt_slice, BUSH, GRASS_FLAT, GRASS_FLOWERS, GRASS_STONES, GRASS_TUFTS, MUSHROOMS,
    TREE_BOTTOM, TREE_TOP,
};
use super::Level;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Cumulative thresholds of the base-fill distribution, in variant order.
const BASE_FILL: [(f64, &str); 3] =
    [(0.30, GRASS_TUFTS), (0.50, GRASS_FLOWERS), (0.55, GRASS_STONES)];

/// A grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// A named decoration at a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub name: String,
    pub x: i32,
    pub y: i32,
}

impl Placement {
    pub fn new(name: &str, x: i32, y: i32) -> Self {
        Self { name: name.to_string(), x, y }
    }
}

/// Authored tables consumed by the compositor.
///
/// Can be deserialized so a project keeps its layout in a TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub patches: Vec<Rect>,
    /// Upper cell of each two-cell tree
    #[serde(default)]
    pub trees: Vec<Point>,
    #[serde(default)]
    pub decorations: Vec<Placement>,
    #[serde(default)]
    pub path: Vec<Point>,
}

impl LevelLayout {
    /// The built-in 20x17 meadow.
    pub fn meadow() -> Self {
        let row_9 = (0..20).map(|x| Point::new(x, 9));
        let column_10 = (0..9).map(|y| Point::new(10, y));

        Self {
            width: 20,
            height: 17,
            patches: vec![Rect::new(2, 2, 5, 4), Rect::new(12, 8, 6, 5), Rect::new(14, 1, 3, 3)],
            trees: vec![
                Point::new(1, 5),
                Point::new(9, 3),
                Point::new(17, 8),
                Point::new(5, 12),
                Point::new(15, 14),
                Point::new(3, 16),
            ],
            decorations: vec![
                Placement::new(BUSH, 4, 9),
                Placement::new(MUSHROOMS, 10, 5),
                Placement::new(BUSH, 9, 4),
                Placement::new(MUSHROOMS, 6, 3),
                Placement::new(BUSH, 6, 3),
                Placement::new(BUSH, 16, 13),
                Placement::new(MUSHROOMS, 1, 1),
                Placement::new(BUSH, 17, 9),
                Placement::new(BUSH, 18, 2),
            ],
            path: row_9.chain(column_10).collect(),
        }
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self::meadow()
    }
}

/// State used in place of a zero seed, which would lock xorshift at zero.
///
/// Seed 0 therefore produces the same level as seeding with this value.
const ZERO_SEED_STATE: u64 = 0x9E37_79B9_7F4A_7C15;

/// xorshift64 (shifts 13, 7, 17) driving the base fill.
#[derive(Debug, Clone)]
pub(crate) struct Rng {
    state: u64,
}

impl Rng {
    pub(crate) fn new(seed: u64) -> Self {
        let state = match seed {
            0 => ZERO_SEED_STATE,
            seed => seed,
        };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Top 53 bits scaled into [0.0, 1.0).
    pub(crate) fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (1u64 << 53) as f64;
        (self.next_u64() >> 11) as f64 * SCALE
    }
}

/// Grass variant for a uniform sample `r` in [0, 1).
pub fn base_variant(r: f64) -> &'static str {
    BASE_FILL.iter().find(|(threshold, _)| r < *threshold).map_or(GRASS_FLAT, |&(_, name)| name)
}

pub(crate) fn compose<E>(level: &mut Level<E>, layout: &LevelLayout, seed: u64) {
    fill_base(level, seed);
    overlay_patches(level, &layout.patches);
    place_trees(level, &layout.trees);
    place_decorations(level, &layout.decorations);
    carve_path(level, &layout.path);
}

/// Stage 1: one draw per cell in row-major order. Resets every cell.
fn fill_base<E>(level: &mut Level<E>, seed: u64) {
    let mut rng = Rng::new(seed);
    for tile in level.tiles.iter_mut() {
        tile.bottom_tile = base_variant(rng.next_f64()).to_string();
        tile.top_tile = None;
        tile.solid = false;
    }
}

/// Stage 2: 9-slice dirt, bottom tile only.
///
/// Only the part of each patch that overlaps the grid is visited.
fn overlay_patches<E>(level: &mut Level<E>, patches: &[Rect]) {
    let (grid_w, grid_h) = (i64::from(level.width()), i64::from(level.height()));
    for patch in patches {
        let (left, top) = (i64::from(patch.x), i64::from(patch.y));
        let (right, bottom) = (left + i64::from(patch.width), top + i64::from(patch.height));
        for y in top.max(0)..bottom.min(grid_h) {
            for x in left.max(0)..right.min(grid_w) {
                // both offsets lie within the patch extent, so they fit in u32
                let (row, col) = ((y - top) as u32, (x - left) as u32);
                let name = dirt_slice(row, col, patch.height, patch.width);
                if let Some(tile) = level.tile_mut(x as i32, y as i32) {
                    tile.bottom_tile = name.to_string();
                }
            }
        }
    }
}

/// Stage 3: trees always win their two cells.
///
/// A lower cell whose row would overflow `i32` is skipped like any other
/// off-grid cell.
fn place_trees<E>(level: &mut Level<E>, trees: &[Point]) {
    for tree in trees {
        for (dy, name) in [(0, TREE_TOP), (1, TREE_BOTTOM)] {
            let Some(y) = tree.y.checked_add(dy) else { continue };
            if let Some(tile) = level.tile_mut(tree.x, y) {
                tile.top_tile = Some(name.to_string());
                tile.solid = true;
            }
        }
    }
}

/// Stage 4: first writer wins.
fn place_decorations<E>(level: &mut Level<E>, decorations: &[Placement]) {
    for decoration in decorations {
        if let Some(tile) = level.tile_mut(decoration.x, decoration.y) {
            if tile.top_tile.is_none() {
                tile.top_tile = Some(decoration.name.clone());
            }
        }
    }
}

/// Stage 5: walkable ground, small decorations removed.
fn carve_path<E>(level: &mut Level<E>, path: &[Point]) {
    for point in path {
        if let Some(tile) = level.tile_mut(point.x, point.y) {
            tile.bottom_tile = GRASS_FLAT.to_string();
            if matches!(tile.top_tile.as_deref(), Some(BUSH) | Some(MUSHROOMS)) {
                tile.top_tile = None;
            }
        }
    }
}
