//! The serialized palette + packed index unit and its decoded view

use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::codec::{self, CodecError};
use crate::color::NormalizedColor;

/// Bytes used to store each packed palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IndexWidth {
    /// One byte per pixel, palettes of up to 256 colors
    One,
    /// Two little-endian bytes per pixel
    Two,
}

impl IndexWidth {
    /// Narrowest width able to address a palette of `len` colors.
    pub fn for_palette_len(len: usize) -> Self {
        if len <= 256 {
            IndexWidth::One
        } else {
            IndexWidth::Two
        }
    }

    /// Number of bytes per packed index.
    pub fn bytes(self) -> usize {
        match self {
            IndexWidth::One => 1,
            IndexWidth::Two => 2,
        }
    }
}

impl From<IndexWidth> for u8 {
    fn from(width: IndexWidth) -> Self {
        width.bytes() as u8
    }
}

impl TryFrom<u8> for IndexWidth {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(IndexWidth::One),
            2 => Ok(IndexWidth::Two),
            other => Err(format!("index width must be 1 or 2, got {}", other)),
        }
    }
}

/// One encoded source image.
///
/// Read-only once produced by [`codec::encode`]. The palette is ordered by
/// first appearance in the source; `packed_indices` holds one index per
/// pixel in row-major order, `index_width` bytes each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<[u8; 4]>,
    #[serde(with = "base64_blob")]
    pub packed_indices: Vec<u8>,
    pub index_width: IndexWidth,
}

impl Container {
    /// Number of pixels described by the declared dimensions.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Serialize the packed index blob as standard base64 text.
mod base64_blob {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// A container bound together with its decoded index buffer.
///
/// Decoding is done once, in [`DecodedImage::new`]; pixel queries are then
/// plain slice lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    container: Container,
    indices: Vec<u16>,
}

impl DecodedImage {
    /// Decode `container`, failing if it is corrupt.
    pub fn new(container: Container) -> Result<Self, CodecError> {
        let indices = codec::decode(&container)?;
        Ok(Self { container, indices })
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    pub fn width(&self) -> u32 {
        self.container.width
    }

    pub fn height(&self) -> u32 {
        self.container.height
    }

    /// See [`codec::pixel_at`].
    pub fn pixel_at(&self, x: i32, y: i32) -> Option<Rgba<u8>> {
        codec::pixel_at(self, x, y)
    }

    /// See [`codec::normalized_pixel_at`].
    pub fn normalized_pixel_at(&self, x: i32, y: i32) -> Option<NormalizedColor> {
        codec::normalized_pixel_at(self, x, y)
    }

    /// Expand back into a full RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        let palette = &self.container.palette;
        let raw: Vec<u8> = self.indices.iter().flat_map(|&i| palette[i as usize]).collect();
        RgbaImage::from_raw(self.width(), self.height(), raw)
            .unwrap_or_else(|| RgbaImage::new(self.width(), self.height()))
    }
}
