//! Palette + packed index codec
//!
//! Converts raw RGBA pixel buffers into [`Container`]s and back. Every
//! function here is pure: the same input always produces the same output.
//!
//! Encoding assigns palette slots in first-seen, row-major order, then packs
//! one index per pixel using the narrowest [`IndexWidth`] that can address
//! the palette. Decoding validates the packed blob against the declared
//! dimensions and refuses anything that does not line up exactly.

use std::collections::HashMap;

use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::color::{normalize, NormalizedColor};
use crate::container::{Container, DecodedImage, IndexWidth};

/// Largest palette addressable with a two-byte index.
pub const MAX_PALETTE_LEN: usize = u16::MAX as usize + 1;

/// Errors produced while encoding or decoding a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The RGBA buffer does not hold exactly `width * height` pixels
    #[error("pixel buffer has {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    BufferSizeMismatch { width: u32, height: u32, expected: usize, actual: usize },
    /// More unique colors than a two-byte index can address
    #[error("image has {0} unique colors, at most {max} are supported", max = MAX_PALETTE_LEN)]
    PaletteOverflow(usize),
    /// The packed indices do not describe a valid `width * height` image
    #[error("invalid container: {0}")]
    InvalidContainer(String),
}

/// Insertion-ordered palette under construction.
///
/// The hash map gives O(1) lookups, the vector preserves first-seen order;
/// palette order never depends on hash iteration.
#[derive(Debug, Default)]
struct PaletteBuilder {
    slots: HashMap<[u8; 4], u32>,
    colors: Vec<[u8; 4]>,
}

impl PaletteBuilder {
    /// Return the slot for `color`, appending it if it is new.
    fn index_of(&mut self, color: [u8; 4]) -> u32 {
        if let Some(&slot) = self.slots.get(&color) {
            return slot;
        }
        let slot = self.colors.len() as u32;
        self.slots.insert(color, slot);
        self.colors.push(color);
        slot
    }

    fn into_colors(self) -> Vec<[u8; 4]> {
        self.colors
    }
}

/// Encode a row-major RGBA byte buffer into a [`Container`].
///
/// `pixels` must hold exactly `width * height * 4` bytes. A zero-sized image
/// is valid and yields an empty palette and an empty index blob.
///
/// # Examples
///
/// ```
/// use pxtile::codec::{decode, encode};
/// use pxtile::container::IndexWidth;
///
/// let pixels = [255, 0, 0, 255, 0, 0, 255, 255, 255, 0, 0, 255];
/// let container = encode(&pixels, 3, 1).unwrap();
/// assert_eq!(container.palette, vec![[255, 0, 0, 255], [0, 0, 255, 255]]);
/// assert_eq!(container.index_width, IndexWidth::One);
/// assert_eq!(decode(&container).unwrap(), vec![0, 1, 0]);
/// ```
pub fn encode(pixels: &[u8], width: u32, height: u32) -> Result<Container, CodecError> {
    let pixel_count = width as usize * height as usize;
    let expected = pixel_count * 4;
    if pixels.len() != expected {
        return Err(CodecError::BufferSizeMismatch { width, height, expected, actual: pixels.len() });
    }

    let mut palette = PaletteBuilder::default();
    let indices: Vec<u32> = pixels
        .chunks_exact(4)
        .map(|px| palette.index_of([px[0], px[1], px[2], px[3]]))
        .collect();

    let palette = palette.into_colors();
    if palette.len() > MAX_PALETTE_LEN {
        return Err(CodecError::PaletteOverflow(palette.len()));
    }

    let index_width = IndexWidth::for_palette_len(palette.len());
    let packed_indices = pack(&indices, index_width);

    Ok(Container { width, height, palette, packed_indices, index_width })
}

/// Encode an [`RgbaImage`] buffer.
pub fn encode_image(image: &RgbaImage) -> Result<Container, CodecError> {
    encode(image.as_raw(), image.width(), image.height())
}

fn pack(indices: &[u32], width: IndexWidth) -> Vec<u8> {
    match width {
        IndexWidth::One => indices.iter().map(|&i| i as u8).collect(),
        IndexWidth::Two => indices.iter().flat_map(|&i| (i as u16).to_le_bytes()).collect(),
    }
}

/// Unpack a container's index buffer.
///
/// Fails with [`CodecError::InvalidContainer`] when the declared index width
/// is not the one the palette size calls for, when the blob length does not
/// match that width and the dimensions, or when an index points past the end
/// of the palette. Corrupt data is never truncated or padded.
pub fn decode(container: &Container) -> Result<Vec<u16>, CodecError> {
    let palette_len = container.palette.len();
    let required = IndexWidth::for_palette_len(palette_len);
    if container.index_width != required {
        return Err(CodecError::InvalidContainer(format!(
            "{}-byte indices declared for a palette of {} colors, which needs {}-byte indices",
            container.index_width.bytes(),
            palette_len,
            required.bytes()
        )));
    }

    let bytes = &container.packed_indices;
    let step = container.index_width.bytes();

    if bytes.len() % step != 0 {
        return Err(CodecError::InvalidContainer(format!(
            "packed index blob of {} bytes is not a multiple of the {}-byte index width",
            bytes.len(),
            step
        )));
    }

    let indices: Vec<u16> = match container.index_width {
        IndexWidth::One => bytes.iter().map(|&b| b as u16).collect(),
        IndexWidth::Two => {
            bytes.chunks_exact(2).map(|pair| u16::from_le_bytes([pair[0], pair[1]])).collect()
        }
    };

    let expected = container.pixel_count();
    if indices.len() != expected {
        return Err(CodecError::InvalidContainer(format!(
            "decoded {} indices, expected {} for {}x{}",
            indices.len(),
            expected,
            container.width,
            container.height
        )));
    }

    if let Some(bad) = indices.iter().find(|&&i| i as usize >= palette_len) {
        return Err(CodecError::InvalidContainer(format!(
            "index {} out of range for palette of {} colors",
            bad, palette_len
        )));
    }

    Ok(indices)
}

/// Decode a container back into its original row-major RGBA bytes.
pub fn decode_pixels(container: &Container) -> Result<Vec<u8>, CodecError> {
    let indices = decode(container)?;
    Ok(indices.iter().flat_map(|&i| container.palette[i as usize]).collect())
}

/// Color of the pixel at `(x, y)`, or `None` outside the image.
pub fn pixel_at(image: &DecodedImage, x: i32, y: i32) -> Option<Rgba<u8>> {
    let container = image.container();
    if x < 0 || y < 0 || x as u32 >= container.width || y as u32 >= container.height {
        return None;
    }
    let offset = y as usize * container.width as usize + x as usize;
    let slot = *image.indices().get(offset)?;
    container.palette.get(slot as usize).map(|&c| Rgba(c))
}

/// [`pixel_at`] with every channel scaled into `[0.0, 1.0]`.
pub fn normalized_pixel_at(image: &DecodedImage, x: i32, y: i32) -> Option<NormalizedColor> {
    pixel_at(image, x, y).map(normalize)
}
