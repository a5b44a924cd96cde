//! Codec and artifact integration tests

use image::{Rgba, RgbaImage};
use pxtile::assets::AssetBundle;
use pxtile::codec::{decode, decode_pixels, encode, encode_image, CodecError};
use pxtile::container::{Container, DecodedImage, IndexWidth};
use tempfile::TempDir;

/// A 40x20 image with 800 distinct colors.
fn many_colors() -> RgbaImage {
    RgbaImage::from_fn(40, 20, |x, y| Rgba([x as u8 * 5, y as u8 * 11, (x + y) as u8, 255]))
}

#[test]
fn test_roundtrip_many_colors() {
    let image = many_colors();
    let container = encode_image(&image).unwrap();
    assert_eq!(container.index_width, IndexWidth::Two);
    assert_eq!(container.palette.len(), 800);
    assert_eq!(decode_pixels(&container).unwrap(), image.as_raw().to_vec());
}

#[test]
fn test_roundtrip_single_color() {
    let image = RgbaImage::from_pixel(7, 3, Rgba([12, 34, 56, 78]));
    let container = encode_image(&image).unwrap();
    assert_eq!(container.palette, vec![[12, 34, 56, 78]]);
    assert_eq!(container.index_width, IndexWidth::One);
    assert!(decode(&container).unwrap().iter().all(|&i| i == 0));
    assert_eq!(decode_pixels(&container).unwrap(), image.as_raw().to_vec());
}

#[test]
fn test_transparent_pixels_keep_their_channels() {
    // Fully transparent pixels with different RGB are distinct palette entries
    let pixels = [0, 0, 0, 0, 255, 255, 255, 0];
    let container = encode(&pixels, 2, 1).unwrap();
    assert_eq!(container.palette.len(), 2);
    assert_eq!(decode_pixels(&container).unwrap(), pixels.to_vec());
}

#[test]
fn test_encoding_is_deterministic() {
    let image = many_colors();
    let a = encode_image(&image).unwrap();
    let b = encode_image(&image).unwrap();
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn test_decoded_image_bounds() {
    let image = many_colors();
    let decoded = DecodedImage::new(encode_image(&image).unwrap()).unwrap();
    let (w, h) = (decoded.width() as i32, decoded.height() as i32);

    for (x, y) in [(-1, 0), (w, 0), (0, -1), (0, h)] {
        assert!(decoded.pixel_at(x, y).is_none(), "({}, {}) should be out of range", x, y);
        assert!(decoded.normalized_pixel_at(x, y).is_none());
    }
    for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
        let expected = *image.get_pixel(x as u32, y as u32);
        assert_eq!(decoded.pixel_at(x, y), Some(expected));
    }
    assert_eq!(decoded.to_image(), image);
}

#[test]
fn test_truncated_container_rejected() {
    let mut container = encode_image(&many_colors()).unwrap();
    container.packed_indices.truncate(container.packed_indices.len() - 2);
    assert!(matches!(decode(&container), Err(CodecError::InvalidContainer(_))));
    assert!(DecodedImage::new(container).is_err());
}

#[test]
fn test_wrong_dimensions_rejected() {
    let mut container: Container = encode(&[1, 1, 1, 255].repeat(6), 3, 2).unwrap();
    container.height = 3;
    assert!(matches!(decode(&container), Err(CodecError::InvalidContainer(_))));
}

#[test]
fn test_artifact_file_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("assets.json");

    let mut bundle = AssetBundle::new();
    bundle.insert("many", encode_image(&many_colors()).unwrap());
    bundle.insert("one", encode(&[9, 9, 9, 255], 1, 1).unwrap());
    bundle.save(&path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["assets"]["many"]["indexWidth"], 2);
    assert_eq!(json["assets"]["one"]["packedIndices"], "AA==");
    assert_eq!(json["assets"]["one"]["palette"][0], serde_json::json!([9, 9, 9, 255]));

    let loaded = AssetBundle::load(&path).unwrap();
    assert_eq!(loaded, bundle);
    let many = loaded.get("many").unwrap();
    assert_eq!(decode_pixels(many).unwrap(), many_colors().as_raw().to_vec());
}

#[test]
fn test_artifact_with_bad_index_width_rejected() {
    let text = r#"{"assets":{"x":{"width":1,"height":1,"palette":[[0,0,0,255]],"packedIndices":"AA==","indexWidth":3}}}"#;
    assert!(AssetBundle::from_json(text).is_err());
}
