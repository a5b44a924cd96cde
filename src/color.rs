//! Color helpers shared by the codec and the tile runtime
//!
//! Palette entries are stored as raw `[r, g, b, a]` byte quadruples and
//! surfaced as [`image::Rgba<u8>`]. Tile blocks use normalized floats.

use image::Rgba;

/// A color with every channel in `[0.0, 1.0]`.
pub type NormalizedColor = [f32; 4];

/// Fully transparent black, used wherever a pixel has no source.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Normalized counterpart of [`TRANSPARENT`].
pub const TRANSPARENT_NORMALIZED: NormalizedColor = [0.0, 0.0, 0.0, 0.0];

/// Divide each channel by 255.
pub fn normalize(color: Rgba<u8>) -> NormalizedColor {
    let Rgba([r, g, b, a]) = color;
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0]
}

/// Inverse of [`normalize`], rounding to the nearest byte and clamping.
pub fn denormalize(color: NormalizedColor) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(color[0]), channel(color[1]), channel(color[2]), channel(color[3])])
}

/// Format a color as `#RRGGBBAA`.
///
/// # Examples
///
/// ```
/// use image::Rgba;
/// use pxtile::color::to_hex;
///
/// assert_eq!(to_hex(Rgba([255, 0, 128, 255])), "#FF0080FF");
/// ```
pub fn to_hex(color: Rgba<u8>) -> String {
    let Rgba([r, g, b, a]) = color;
    format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_extremes() {
        assert_eq!(normalize(Rgba([0, 0, 0, 0])), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(normalize(Rgba([255, 255, 255, 255])), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_normalize_midpoint() {
        let [r, _, _, a] = normalize(Rgba([51, 0, 0, 255]));
        assert!((r - 0.2).abs() < f32::EPSILON);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_denormalize_inverts_normalize() {
        for v in [0u8, 1, 17, 127, 128, 200, 254, 255] {
            let c = Rgba([v, 255 - v, v / 2, 255]);
            assert_eq!(denormalize(normalize(c)), c);
        }
    }

    #[test]
    fn test_denormalize_clamps() {
        assert_eq!(denormalize([-1.0, 2.0, 0.5, 1.0]), Rgba([0, 255, 128, 255]));
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(TRANSPARENT), "#00000000");
        assert_eq!(to_hex(Rgba([0x12, 0xAB, 0x0F, 0xFF])), "#12AB0FFF");
    }
}
