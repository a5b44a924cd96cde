//! Tile extraction runtime
//!
//! A [`TileMap`] binds one decoded container, holds named tile-region
//! definitions and lazily extracts per-tile pixel blocks. Extracted blocks
//! live in a [`TileCache`] which is cleared wholesale whenever a different
//! image is bound and per-name whenever a definition is replaced.
//!
//! Lookups that cannot be satisfied (no image bound, unknown name) return
//! `None`; only binding an asset can fail with an error.

use std::collections::HashMap;
use std::rc::Rc;

use image::RgbaImage;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assets::AssetBundle;
use crate::codec::CodecError;
use crate::color::{denormalize, NormalizedColor, TRANSPARENT_NORMALIZED};
use crate::container::{Container, DecodedImage};

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 16;

/// Number of pixels in one tile block.
pub const TILE_PIXELS: usize = (TILE_SIZE * TILE_SIZE) as usize;

/// Render-order class of a tile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Ground drawn first
    #[default]
    Bottom,
    /// Characters and other moving things
    Sprite,
    /// Decorations drawn over sprites
    Top,
}

/// Optional attributes accepted by [`TileMap::define_tile`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TileOptions {
    pub solid: bool,
    pub layer: Layer,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl TileOptions {
    pub fn layer(layer: Layer) -> Self {
        Self { layer, ..Self::default() }
    }

    pub fn solid(mut self) -> Self {
        self.solid = true;
        self
    }

    pub fn flipped(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }
}

/// A named tile region, addressed in tile-grid units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDefinition {
    pub name: String,
    pub tile_x: u32,
    pub tile_y: u32,
    pub layer: Layer,
    pub solid: bool,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl TileDefinition {
    pub fn new(name: impl Into<String>, tile_x: u32, tile_y: u32, options: TileOptions) -> Self {
        Self {
            name: name.into(),
            tile_x,
            tile_y,
            layer: options.layer,
            solid: options.solid,
            flip_x: options.flip_x,
            flip_y: options.flip_y,
        }
    }
}

/// Anything tile definitions can be registered against.
///
/// [`TileMap`] is the runtime implementation; the level catalog only needs
/// this trait, so it can also populate test doubles or authoring tools.
pub trait TileRegistry {
    /// Insert or replace the definition for `name`.
    fn define_tile(&mut self, name: &str, tile_x: u32, tile_y: u32, options: TileOptions);
}

/// Extracted pixel blocks keyed by tile name.
#[derive(Debug, Clone, Default)]
pub struct TileCache {
    blocks: HashMap<String, Vec<NormalizedColor>>,
}

impl TileCache {
    pub fn new() -> Self {
        Self { blocks: HashMap::new() }
    }

    pub fn get(&self, name: &str) -> Option<&[NormalizedColor]> {
        self.blocks.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blocks.contains_key(name)
    }

    pub fn insert(&mut self, name: &str, block: Vec<NormalizedColor>) {
        self.blocks.insert(name.to_string(), block);
    }

    /// Drop the block for one name. Returns whether anything was cached.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.blocks.remove(name).is_some()
    }

    /// Drop every block.
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Error binding an image to a [`TileMap`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TileMapError {
    /// The asset bundle has no container under this name
    #[error("Asset '{0}' not found")]
    AssetNotFound(String),
    /// The container failed to decode
    #[error("Asset '{name}' is corrupt: {source}")]
    InvalidContainer {
        name: String,
        #[source]
        source: CodecError,
    },
}

/// Runtime tile store bound to one decoded image at a time.
#[derive(Debug, Default)]
pub struct TileMap {
    assets: AssetBundle,
    /// Decoded images by asset name, so re-loading never decodes twice
    decoded: HashMap<String, Rc<DecodedImage>>,
    image: Option<Rc<DecodedImage>>,
    bound_asset: Option<String>,
    definitions: HashMap<String, TileDefinition>,
    cache: TileCache,
}

impl TileMap {
    /// Create a tile map with no assets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tile map that loads images from `assets`.
    pub fn with_assets(assets: AssetBundle) -> Self {
        Self { assets, ..Self::default() }
    }

    pub fn assets(&self) -> &AssetBundle {
        &self.assets
    }

    /// Bind the asset called `name`, decoding it on first use.
    ///
    /// The tile cache is cleared even when `name` is already bound.
    pub fn load(&mut self, name: &str) -> Result<(), TileMapError> {
        let image = match self.decoded.get(name).cloned() {
            Some(image) => image,
            None => {
                let container = self
                    .assets
                    .get(name)
                    .map_err(|_| TileMapError::AssetNotFound(name.to_string()))?;
                debug!("decoding asset '{}' ({}x{})", name, container.width, container.height);
                let image = DecodedImage::new(container.clone()).map_err(|source| {
                    TileMapError::InvalidContainer { name: name.to_string(), source }
                })?;
                let image = Rc::new(image);
                self.decoded.insert(name.to_string(), Rc::clone(&image));
                image
            }
        };
        self.install(image, Some(name.to_string()));
        Ok(())
    }

    /// Decode and bind a container that is not part of the asset bundle.
    pub fn bind(&mut self, container: Container) -> Result<(), CodecError> {
        let image = DecodedImage::new(container)?;
        self.install(Rc::new(image), None);
        Ok(())
    }

    fn install(&mut self, image: Rc<DecodedImage>, name: Option<String>) {
        self.image = Some(image);
        self.bound_asset = name;
        self.cache.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    /// Name of the bound asset, if it came from the bundle.
    pub fn loaded_asset(&self) -> Option<&str> {
        self.bound_asset.as_deref()
    }

    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_deref()
    }

    /// Register or replace a tile definition.
    ///
    /// Any cached pixels for `name` are dropped, even if the new definition
    /// is identical to the old one.
    pub fn define_tile(&mut self, name: &str, tile_x: u32, tile_y: u32, options: TileOptions) {
        let definition = TileDefinition::new(name, tile_x, tile_y, options);
        self.definitions.insert(name.to_string(), definition);
        self.cache.invalidate(name);
    }

    pub fn get_tile_definition(&self, name: &str) -> Option<&TileDefinition> {
        self.definitions.get(name)
    }

    /// All definitions on `layer`, sorted by name.
    pub fn get_tiles_for_layer(&self, layer: Layer) -> Vec<&TileDefinition> {
        let mut tiles: Vec<_> = self.definitions.values().filter(|d| d.layer == layer).collect();
        tiles.sort_by(|a, b| a.name.cmp(&b.name));
        tiles
    }

    /// Every definition, in no particular order.
    pub fn definitions(&self) -> impl Iterator<Item = &TileDefinition> {
        self.definitions.values()
    }

    pub fn definition_count(&self) -> usize {
        self.definitions.len()
    }

    pub fn cache(&self) -> &TileCache {
        &self.cache
    }

    /// Pixel block for `name`, `TILE_SIZE * TILE_SIZE` entries in row-major
    /// order.
    ///
    /// Returns `None` when nothing is bound or the name is undefined. Pixels
    /// that fall outside the bound image come back fully transparent.
    pub fn get_tile_pixels(&mut self, name: &str) -> Option<&[NormalizedColor]> {
        let image = self.image.as_deref()?;
        let definition = self.definitions.get(name)?;
        if !self.cache.contains(name) {
            debug!("extracting tile '{}' at ({}, {})", name, definition.tile_x, definition.tile_y);
            let block = extract_tile(image, definition);
            self.cache.insert(name, block);
        }
        self.cache.get(name)
    }

    /// Render the tile `name` as a `TILE_SIZE` square image.
    pub fn tile_image(&mut self, name: &str) -> Option<RgbaImage> {
        let block = self.get_tile_pixels(name)?;
        let mut image = RgbaImage::new(TILE_SIZE, TILE_SIZE);
        for (i, &color) in block.iter().enumerate() {
            let x = i as u32 % TILE_SIZE;
            let y = i as u32 / TILE_SIZE;
            image.put_pixel(x, y, denormalize(color));
        }
        Some(image)
    }
}

impl TileRegistry for TileMap {
    fn define_tile(&mut self, name: &str, tile_x: u32, tile_y: u32, options: TileOptions) {
        TileMap::define_tile(self, name, tile_x, tile_y, options);
    }
}

/// Copy one tile out of `image`, mirroring each axis independently.
fn extract_tile(image: &DecodedImage, definition: &TileDefinition) -> Vec<NormalizedColor> {
    let size = TILE_SIZE as i64;
    let origin_x = definition.tile_x as i64 * size;
    let origin_y = definition.tile_y as i64 * size;

    let mut block = Vec::with_capacity(TILE_PIXELS);
    for py in 0..size {
        let local_y = if definition.flip_y { size - 1 - py } else { py };
        for px in 0..size {
            let local_x = if definition.flip_x { size - 1 - px } else { px };
            let source_x = i32::try_from(origin_x + local_x).ok();
            let source_y = i32::try_from(origin_y + local_y).ok();
            let color = source_x
                .zip(source_y)
                .and_then(|(x, y)| image.normalized_pixel_at(x, y))
                .unwrap_or(TRANSPARENT_NORMALIZED);
            block.push(color);
        }
    }
    block
}
