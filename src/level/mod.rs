//! Tile-name grids and the procedural level compositor
//!
//! A [`Level`] is a fixed-size grid of [`LevelTile`]s plus an ordered set of
//! entities. Cells refer to tiles by name only; pixels come from a
//! [`TileMap`](crate::tilemap::TileMap) populated with the [`catalog`].
//!
//! All coordinate access is bounds-checked and lenient: writes outside the
//! grid are ignored and reads outside the grid return `None`.

pub mod catalog;
pub mod generator;

use std::rc::Rc;

use log::debug;
use serde::Serialize;

use crate::tilemap::TileRegistry;

pub use generator::{LevelLayout, Placement, Point, Rect, DEFAULT_SEED};

/// Contents of one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTile {
    pub bottom_tile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_tile: Option<String>,
    pub solid: bool,
}

impl LevelTile {
    /// A walkable cell with only a ground tile.
    pub fn ground(bottom_tile: impl Into<String>) -> Self {
        Self { bottom_tile: bottom_tile.into(), top_tile: None, solid: false }
    }
}

/// A cell whose top slot is occupied, as reported by
/// [`Level::get_top_layer_tiles`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopTile {
    pub name: String,
    pub x: u32,
    pub y: u32,
}

/// A grid of tile names and the entities placed on it.
///
/// Entities are opaque to the level; membership is by `Rc` identity, so two
/// equal values are still distinct entities.
#[derive(Debug, Clone)]
pub struct Level<E = ()> {
    width: u32,
    height: u32,
    tiles: Vec<LevelTile>,
    entities: Vec<Rc<E>>,
}

impl<E> Level<E> {
    /// Create a `width` x `height` grid filled with `default_tile`.
    pub fn new(width: u32, height: u32, default_tile: &str) -> Self {
        let len = width as usize * height as usize;
        Self { width, height, tiles: vec![LevelTile::ground(default_tile); len], entities: Vec::new() }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Cell at `(x, y)`, or `None` outside the grid.
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&LevelTile> {
        self.offset(x, y).map(|i| &self.tiles[i])
    }

    pub(crate) fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut LevelTile> {
        let i = self.offset(x, y)?;
        self.tiles.get_mut(i)
    }

    /// Replace the cell at `(x, y)`. Does nothing outside the grid.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: LevelTile) {
        if let Some(cell) = self.tile_mut(x, y) {
            *cell = tile;
        }
    }

    /// Append an entity unless it is already present.
    pub fn add_entity(&mut self, entity: Rc<E>) {
        if !self.entities.iter().any(|e| Rc::ptr_eq(e, &entity)) {
            self.entities.push(entity);
        }
    }

    /// Remove an entity by identity. Non-members are ignored.
    pub fn remove_entity(&mut self, entity: &Rc<E>) {
        self.entities.retain(|e| !Rc::ptr_eq(e, entity));
    }

    /// Entities in insertion order.
    pub fn get_entities(&self) -> &[Rc<E>] {
        &self.entities
    }

    /// Bottom tile names, one row per `y`.
    pub fn get_bottom_layer_tiles(&self) -> Vec<Vec<String>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.tiles
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|t| t.bottom_tile.clone()).collect())
            .collect()
    }

    /// Every occupied top slot, in row-major order.
    pub fn get_top_layer_tiles(&self) -> Vec<TopTile> {
        let width = self.width.max(1) as usize;
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| {
                tile.top_tile.as_ref().map(|name| TopTile {
                    name: name.clone(),
                    x: (i % width) as u32,
                    y: (i / width) as u32,
                })
            })
            .collect()
    }

    /// Run the five-stage compositor over this grid.
    ///
    /// The level keeps its own size: `layout.width`/`layout.height` are not
    /// consulted, and layout entries outside the grid are dropped. See
    /// [`generator`] for the stage order and overwrite rules.
    pub fn procedural_generate_level(&mut self, layout: &LevelLayout, seed: u64) {
        if (layout.width, layout.height) != (self.width, self.height) {
            debug!(
                "Composing {}x{} layout onto {}x{} level",
                layout.width, layout.height, self.width, self.height
            );
        }
        generator::compose(self, layout, seed);
    }

    /// Register the tile catalog the generator's names refer to.
    pub fn setup_tile_definitions<R: TileRegistry + ?Sized>(registry: &mut R) {
        catalog::setup_tile_definitions(registry);
    }
}

impl Level<()> {
    /// Build and compose a level sized to `layout`.
    pub fn generate(layout: &LevelLayout, seed: u64) -> Self {
        let mut level = Level::new(layout.width, layout.height, catalog::GRASS_FLAT);
        level.procedural_generate_level(layout, seed);
        level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_defaults() {
        let level: Level = Level::new(4, 3, "grass_flat");
        assert_eq!(level.width(), 4);
        assert_eq!(level.height(), 3);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(level.get_tile(x, y), Some(&LevelTile::ground("grass_flat")));
            }
        }
        assert!(level.get_entities().is_empty());
        assert!(level.get_top_layer_tiles().is_empty());
    }

    #[test]
    fn test_level_size_wins_over_layout_size() {
        let mut level: Level = Level::new(5, 5, "g");
        level.procedural_generate_level(&LevelLayout::meadow(), DEFAULT_SEED);
        assert_eq!((level.width(), level.height()), (5, 5));
        assert_eq!(level.get_bottom_layer_tiles().len(), 5);
        // meadow's tree at (1, 5) falls below this grid; only its mushrooms at (1, 1) remain
        let top: Vec<_> =
            level.get_top_layer_tiles().into_iter().map(|t| (t.name, t.x, t.y)).collect();
        assert!(top.contains(&(catalog::MUSHROOMS.to_string(), 1, 1)));
        assert!(top.iter().all(|(_, x, y)| *x < 5 && *y < 5));
    }

    #[test]
    fn test_get_tile_out_of_range() {
        let level: Level = Level::new(4, 3, "g");
        assert!(level.get_tile(-1, 0).is_none());
        assert!(level.get_tile(4, 0).is_none());
        assert!(level.get_tile(0, -1).is_none());
        assert!(level.get_tile(0, 3).is_none());
    }

    #[test]
    fn test_set_tile_out_of_range_is_noop() {
        let mut level: Level = Level::new(2, 2, "g");
        let before = level.get_bottom_layer_tiles();
        level.set_tile(2, 0, LevelTile::ground("x"));
        level.set_tile(0, -1, LevelTile::ground("x"));
        assert_eq!(level.get_bottom_layer_tiles(), before);
    }

    #[test]
    fn test_set_and_get_tile() {
        let mut level: Level = Level::new(3, 3, "g");
        let tile = LevelTile { bottom_tile: "dirt".into(), top_tile: Some("bush".into()), solid: true };
        level.set_tile(2, 1, tile.clone());
        assert_eq!(level.get_tile(2, 1), Some(&tile));
        assert_eq!(level.get_bottom_layer_tiles()[1][2], "dirt");
        assert_eq!(level.get_top_layer_tiles(), vec![TopTile { name: "bush".into(), x: 2, y: 1 }]);
    }

    #[test]
    fn test_bottom_layer_shape() {
        let level: Level = Level::new(5, 2, "g");
        let rows = level.get_bottom_layer_tiles();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 5));
    }

    #[test]
    fn test_zero_width_level() {
        let level: Level = Level::new(0, 3, "g");
        assert_eq!(level.get_bottom_layer_tiles().len(), 3);
        assert!(level.get_tile(0, 0).is_none());
    }

    #[test]
    fn test_entities_by_identity() {
        let mut level: Level<&str> = Level::new(1, 1, "g");
        let a = Rc::new("slime");
        let b = Rc::new("slime");
        level.add_entity(Rc::clone(&a));
        level.add_entity(Rc::clone(&b));
        level.add_entity(Rc::clone(&a));
        assert_eq!(level.get_entities().len(), 2);

        level.remove_entity(&a);
        assert_eq!(level.get_entities().len(), 1);
        assert!(Rc::ptr_eq(&level.get_entities()[0], &b));

        level.remove_entity(&Rc::new("slime"));
        assert_eq!(level.get_entities().len(), 1);
    }

    #[test]
    fn test_entities_keep_insertion_order() {
        let mut level: Level<u32> = Level::new(1, 1, "g");
        let ids: Vec<_> = (0..4).map(Rc::new).collect();
        for id in ids.iter().rev() {
            level.add_entity(Rc::clone(id));
        }
        let order: Vec<u32> = level.get_entities().iter().map(|e| **e).collect();
        assert_eq!(order, vec![3, 2, 1, 0]);
    }
}
