//! Configuration loading and discovery for `pxtile.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{BuildConfig, LevelConfig, ProjectConfig, PxtileConfig};
use crate::level::LevelLayout;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "pxtile.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override asset source directory
    pub src: Option<PathBuf>,
    /// Override artifact output path
    pub out: Option<PathBuf>,
    /// Override level seed
    pub seed: Option<u64>,
}

/// Find pxtile.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find pxtile.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a pxtile.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns a default
/// configuration.
///
/// Also returns the path the configuration came from, if any, so relative
/// paths can be resolved against the project root.
pub fn load_config(path: Option<&Path>) -> Result<(PxtileConfig, Option<PathBuf>), ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            let config = load_config_file(&p)?;
            Ok((config, Some(p)))
        }
        None => Ok((default_config(), None)),
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<PxtileConfig, ConfigError> {
    debug!("Reading config {}", path.display());
    let contents = fs::read_to_string(path)?;
    let config: PxtileConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Create a default configuration when no pxtile.toml is found.
///
/// The project name is the current directory name.
pub fn default_config() -> PxtileConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    PxtileConfig {
        project: ProjectConfig {
            name: project_name,
            assets: PathBuf::from("assets"),
            out: PathBuf::from("build/assets.json"),
        },
        build: BuildConfig::default(),
        level: LevelConfig::default(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut PxtileConfig, overrides: &CliOverrides) {
    if let Some(ref src) = overrides.src {
        config.project.assets = src.clone();
    }

    if let Some(ref out) = overrides.out {
        config.project.out = out.clone();
    }

    if let Some(seed) = overrides.seed {
        config.level.seed = seed;
    }
}

/// Get the project root directory from a config file path.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Resolve the level layout named by `config`.
///
/// Reads the layout file relative to `root` when one is configured, otherwise
/// uses the built-in meadow. Width/height overrides are applied last.
pub fn load_layout(config: &LevelConfig, root: &Path) -> Result<LevelLayout, ConfigError> {
    let mut layout = match config.layout {
        Some(ref path) => {
            let path = resolve_path(root, path);
            debug!("Reading level layout {}", path.display());
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        }
        None => LevelLayout::meadow(),
    };

    if let Some(width) = config.width {
        layout.width = width;
    }
    if let Some(height) = config.height {
        layout.height = height;
    }

    if layout.width == 0 || layout.height == 0 {
        return Err(ConfigError::Validation(vec![format!(
            "level layout: dimensions must be positive, got {}x{}",
            layout.width, layout.height
        )]));
    }

    Ok(layout)
}
