//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod inspect;
mod level;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, project_root, ConfigError, PxtileConfig};

/// Process exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// pxtile - Indexed-color tile sheets and procedural tile levels
#[derive(Parser)]
#[command(name = "pxtile")]
#[command(about = "pxtile - Encode tile sheets, extract tiles, and generate tile levels")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encode source images into the asset artifact
    Build {
        /// Config file (default: nearest pxtile.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the asset source directory
        #[arg(long)]
        src: Option<PathBuf>,

        /// Override the artifact output path
        #[arg(long)]
        out: Option<PathBuf>,

        /// Encode everything but don't write the artifact
        #[arg(long)]
        dry_run: bool,
    },

    /// Print the dimensions and palette of assets in an artifact
    Inspect {
        /// Asset artifact (JSON)
        artifact: PathBuf,

        /// Only show this asset
        #[arg(long)]
        asset: Option<String>,
    },

    /// Extract one catalog tile from an asset and save it as PNG
    Tile {
        /// Asset artifact (JSON)
        artifact: PathBuf,

        /// Asset holding the tile sheet
        #[arg(long)]
        asset: String,

        /// Catalog tile name (e.g. tree_top)
        #[arg(long)]
        tile: String,

        /// Output file or directory (default: {tile}.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-64, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,
    },

    /// Generate a level and print its layers
    Level {
        /// Config file (default: nearest pxtile.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the base-fill seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the layers as JSON instead of a glyph grid
        #[arg(long)]
        json: bool,
    },
}

/// Load the project config and its root directory.
///
/// An explicit path must exist; otherwise the nearest `pxtile.toml` is used,
/// falling back to defaults rooted at the working directory.
pub(crate) fn load_project(config: Option<&Path>) -> Result<(PxtileConfig, PathBuf), ConfigError> {
    let (cfg, source) = load_config(config)?;
    let root = source
        .as_deref()
        .and_then(project_root)
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    Ok((cfg, root))
}

/// Parse arguments and run the selected command.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { config, src, out, dry_run } => {
            build::run_build(config.as_deref(), src.as_deref(), out.as_deref(), dry_run)
        }
        Commands::Inspect { artifact, asset } => inspect::run_inspect(&artifact, asset.as_deref()),
        Commands::Tile { artifact, asset, tile, output, scale } => {
            inspect::run_tile(&artifact, &asset, &tile, output.as_deref(), scale)
        }
        Commands::Level { config, seed, json } => level::run_level(config.as_deref(), seed, json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_tile_command() {
        let cli = Cli::try_parse_from([
            "pxtile", "tile", "assets.json", "--asset", "meadow", "--tile", "bush", "--scale", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Tile { asset, tile, scale, output, .. } => {
                assert_eq!(asset, "meadow");
                assert_eq!(tile, "bush");
                assert_eq!(scale, 4);
                assert!(output.is_none());
            }
            _ => panic!("expected tile command"),
        }
    }

    #[test]
    fn test_scale_out_of_range_rejected() {
        let result = Cli::try_parse_from([
            "pxtile", "tile", "a.json", "--asset", "a", "--tile", "t", "--scale", "0",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_project_explicit_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("pxtile.toml");
        std::fs::write(&path, "[project]\nname = \"meadow\"\n[level]\nseed = 3\n").unwrap();

        let (config, root) = load_project(Some(&path)).unwrap();
        assert_eq!(config.project.name, "meadow");
        assert_eq!(config.level.seed, 3);
        assert_eq!(root, temp.path());
    }

    #[test]
    fn test_load_project_missing_explicit_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = load_project(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
