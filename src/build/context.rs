//! Build context containing configuration and paths for an asset build.

use crate::config::PxtileConfig;
use std::path::{Path, PathBuf};

/// Build context containing configuration and paths for a build operation.
///
/// Relative paths in the configuration resolve against the project root
/// (where `pxtile.toml` lives, or the working directory without one).
#[derive(Debug, Clone)]
pub struct BuildContext {
    config: PxtileConfig,
    project_root: PathBuf,
}

impl BuildContext {
    /// Create a new build context.
    pub fn new(config: PxtileConfig, project_root: PathBuf) -> Self {
        Self { config, project_root }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PxtileConfig {
        &self.config
    }

    /// Get the project root directory.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Directory scanned for source images.
    pub fn asset_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.project.assets)
    }

    /// Path the artifact is written to.
    pub fn out_path(&self) -> PathBuf {
        self.resolve_path(&self.config.project.out)
    }

    /// Glob patterns for source discovery.
    pub fn patterns(&self) -> &[String] {
        &self.config.build.patterns
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        crate::config::resolve_path(&self.project_root, path)
    }
}
