//! Source image discovery for the asset build.
//!
//! Finds image files under the asset directory using the configured glob
//! patterns and derives each asset's name from its relative path.

use crate::build::{BuildContext, BuildError};
use glob::glob;
use log::warn;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Discover image files matching a glob pattern.
///
/// # Arguments
/// - `base_dir` - Base directory to resolve patterns from
/// - `pattern` - Glob pattern to match
///
/// # Returns
/// Sorted list of matching file paths.
pub fn discover_files(base_dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, BuildError> {
    let full_pattern = base_dir.join(pattern);
    let pattern_str = full_pattern.to_string_lossy();

    let paths = glob(&pattern_str)
        .map_err(|source| BuildError::InvalidPattern { pattern: pattern.to_string(), source })?;

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => {
                if path.is_file() && is_image_file(&path) {
                    files.push(path);
                }
            }
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }

    files.sort();
    Ok(files)
}

/// Check if a path has an image extension the `image` crate recognizes.
fn is_image_file(path: &Path) -> bool {
    image::ImageFormat::from_path(path).is_ok()
}

/// Discover all source images for the build.
///
/// Returns a deduplicated, sorted list across every configured pattern.
pub fn discover_all_sources(ctx: &BuildContext) -> Result<Vec<PathBuf>, BuildError> {
    let asset_dir = ctx.asset_dir();
    if !asset_dir.is_dir() {
        return Err(BuildError::MissingAssetDir(asset_dir));
    }

    let mut all_files = BTreeSet::new();
    for pattern in ctx.patterns() {
        all_files.extend(discover_files(&asset_dir, pattern)?);
    }

    Ok(all_files.into_iter().collect())
}

/// Asset name for a source file: its path relative to `base_dir`, without
/// extension, with `/` separators.
///
/// `assets/tiles/meadow.png` under `assets` becomes `tiles/meadow`.
pub fn asset_name(base_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let stem = relative.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
