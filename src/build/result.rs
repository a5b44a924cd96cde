//! Build result types.
//!
//! Contains types for representing the outcome of an asset build.

use crate::container::{Container, IndexWidth};
use std::path::PathBuf;
use std::time::Duration;

/// Per-asset statistics reported after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    /// Asset name in the artifact
    pub name: String,
    /// Source image path
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Number of distinct colors
    pub palette_len: usize,
    pub index_width: IndexWidth,
    /// Size of the packed index blob in bytes
    pub packed_bytes: usize,
}

impl AssetReport {
    /// Summarize an encoded container.
    pub fn new(name: String, source: PathBuf, container: &Container) -> Self {
        Self {
            name,
            source,
            width: container.width,
            height: container.height,
            palette_len: container.palette.len(),
            index_width: container.index_width,
            packed_bytes: container.packed_indices.len(),
        }
    }
}

impl std::fmt::Display for AssetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}x{}, {} colors, {}-byte indices)",
            self.name,
            self.width,
            self.height,
            self.palette_len,
            self.index_width.bytes()
        )
    }
}

/// Result of a complete build run.
#[derive(Debug, Default)]
pub struct BuildResult {
    /// One report per encoded asset, in name order
    pub assets: Vec<AssetReport>,
    /// Artifact path, if it was written
    pub output: Option<PathBuf>,
    /// Total build duration
    pub total_duration: Duration,
}

impl BuildResult {
    /// Create a new empty build result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset report.
    pub fn add_asset(&mut self, report: AssetReport) {
        self.assets.push(report);
    }

    /// Number of assets encoded.
    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    /// Total size of all packed index blobs.
    pub fn total_packed_bytes(&self) -> usize {
        self.assets.iter().map(|a| a.packed_bytes).sum()
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Encoded {} asset(s), {} index bytes in {:.2}s",
            self.asset_count(),
            self.total_packed_bytes(),
            self.total_duration.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode;

    #[test]
    fn test_asset_report_from_container() {
        let container = encode(&[10, 20, 30, 255].repeat(6), 3, 2).unwrap();
        let report = AssetReport::new("tiles".into(), PathBuf::from("assets/tiles.png"), &container);
        assert_eq!(report.width, 3);
        assert_eq!(report.height, 2);
        assert_eq!(report.palette_len, 1);
        assert_eq!(report.index_width, IndexWidth::One);
        assert_eq!(report.packed_bytes, 6);
        assert_eq!(report.to_string(), "tiles (3x2, 1 colors, 1-byte indices)");
    }

    #[test]
    fn test_build_result_summary() {
        let container = encode(&[0, 0, 0, 255].repeat(4), 2, 2).unwrap();
        let mut result = BuildResult::new();
        result.add_asset(AssetReport::new("a".into(), PathBuf::from("a.png"), &container));
        result.add_asset(AssetReport::new("b".into(), PathBuf::from("b.png"), &container));

        assert_eq!(result.asset_count(), 2);
        assert_eq!(result.total_packed_bytes(), 8);
        assert!(result.summary().starts_with("Encoded 2 asset(s), 8 index bytes"));
    }
}
