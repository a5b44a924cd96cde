//! Build pipeline orchestration.
//!
//! Discovers source images, encodes each into a container, and writes the
//! asset artifact. Any encode-time failure aborts the whole build; no partial
//! artifact is written.

use crate::assets::{AssetBundle, AssetError};
use crate::build::{asset_name, discover_all_sources, AssetReport, BuildContext, BuildResult};
use crate::codec::{encode_image, CodecError};
use log::{debug, info};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

/// Error during an asset build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BuildError {
    /// The configured asset directory does not exist
    #[error("Asset directory not found: {}", .0.display())]
    MissingAssetDir(PathBuf),
    /// A configured glob pattern could not be parsed
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    /// A source image could not be opened or decoded
    #[error("Failed to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    /// A source image could not be encoded
    #[error("Failed to encode asset '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: CodecError,
    },
    /// Two source files map to the same asset name
    #[error("Duplicate asset name '{name}': {} and {}", .first.display(), .second.display())]
    DuplicateName { name: String, first: PathBuf, second: PathBuf },
    /// The artifact could not be written
    #[error(transparent)]
    Write(#[from] AssetError),
}

/// Build pipeline for producing the asset artifact.
pub struct BuildPipeline {
    context: BuildContext,
    dry_run: bool,
}

impl BuildPipeline {
    /// Create a new build pipeline.
    pub fn new(context: BuildContext) -> Self {
        Self { context, dry_run: false }
    }

    /// Set dry-run mode (encode but don't write the artifact).
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Get the build context.
    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Encode every discovered source into a bundle.
    pub fn encode_all(&self) -> Result<(AssetBundle, Vec<AssetReport>), BuildError> {
        let asset_dir = self.context.asset_dir();
        let sources = discover_all_sources(&self.context)?;
        debug!("Discovered {} source image(s) in {}", sources.len(), asset_dir.display());

        let mut named: Vec<(String, PathBuf)> = Vec::with_capacity(sources.len());
        let mut seen: HashMap<String, usize> = HashMap::new();
        for path in sources {
            let name = asset_name(&asset_dir, &path);
            if let Some(&i) = seen.get(&name) {
                return Err(BuildError::DuplicateName {
                    name,
                    first: named[i].1.clone(),
                    second: path,
                });
            }
            seen.insert(name.clone(), named.len());
            named.push((name, path));
        }

        let mut bundle = AssetBundle::new();
        let mut reports = Vec::with_capacity(named.len());
        for (name, path) in named {
            let image = image::open(&path)
                .map_err(|source| BuildError::Image { path: path.clone(), source })?
                .to_rgba8();
            let container = encode_image(&image)
                .map_err(|source| BuildError::Encode { name: name.clone(), source })?;

            let report = AssetReport::new(name.clone(), path, &container);
            debug!("Encoded {}", report);
            reports.push(report);
            bundle.insert(name, container);
        }

        reports.sort_by(|a, b| a.name.cmp(&b.name));
        Ok((bundle, reports))
    }

    /// Run the build pipeline.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let (bundle, reports) = self.encode_all()?;

        let mut result = BuildResult::new();
        for report in reports {
            result.add_asset(report);
        }

        if !self.dry_run {
            let out = self.context.out_path();
            bundle.save(&out)?;
            result.output = Some(out);
        }

        result.total_duration = start.elapsed();
        info!("{}", result.summary());
        Ok(result)
    }
}
