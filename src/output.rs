//! PNG output and file path generation

use image::imageops::FilterType;
use image::RgbaImage;
use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save an RGBA image to a PNG file, creating parent directories.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    info!("Saving {} ({}x{})", path.display(), image.width(), image.height());
    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art. A factor of 0 or 1
/// returns the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// Output path for an extracted tile.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{tile}.png` |
/// | `-o out.png` | `out.png` |
/// | `-o dir/` or an existing directory | `dir/{tile}.png` |
pub fn tile_output_path(tile_name: &str, output_arg: Option<&Path>) -> PathBuf {
    let file_name = format!("{}.png", tile_name);
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => PathBuf::from(file_name),
    }
}
