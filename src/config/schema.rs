//! Configuration schema types for `pxtile.toml`
//!
//! Defines the structure and validation rules for pxtile project configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::level::DEFAULT_SEED;

/// Project metadata section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Directory scanned for source images
    #[serde(default = "default_assets")]
    pub assets: PathBuf,
    /// Path of the generated asset artifact
    #[serde(default = "default_out")]
    pub out: PathBuf,
}

fn default_assets() -> PathBuf {
    PathBuf::from("assets")
}

fn default_out() -> PathBuf {
    PathBuf::from("build/assets.json")
}

/// Asset build settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Glob patterns, relative to the asset directory
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self { patterns: default_patterns() }
    }
}

fn default_patterns() -> Vec<String> {
    vec!["**/*.png".to_string()]
}

/// Level generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Seed for the base-fill stage
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Optional TOML layout file; the built-in meadow is used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
    /// Grid width override (defaults to the layout's width)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Grid height override (defaults to the layout's height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self { seed: default_seed(), layout: None, width: None, height: None }
    }
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

/// Root configuration structure for `pxtile.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PxtileConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Asset build settings
    #[serde(default)]
    pub build: BuildConfig,
    /// Level generation settings
    #[serde(default)]
    pub level: LevelConfig,
}

/// Config validation error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "level.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pxtile.toml: '{}' {}", self.field, self.message)
    }
}

impl PxtileConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.build.patterns.is_empty() {
            errors.push(ConfigValidationError {
                field: "build.patterns".to_string(),
                message: "must contain at least one glob pattern".to_string(),
            });
        }
        for (i, pattern) in self.build.patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                errors.push(ConfigValidationError {
                    field: format!("build.patterns[{}]", i),
                    message: "must be a non-empty string".to_string(),
                });
            }
        }

        let dimensions = [("level.width", self.level.width), ("level.height", self.level.height)];
        for (field, value) in dimensions {
            if value == Some(0) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> PxtileConfig {
        toml::from_str(text).expect("should parse config")
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = parse("[project]\nname = \"meadow\"\n");
        assert_eq!(config.project.assets, PathBuf::from("assets"));
        assert_eq!(config.project.out, PathBuf::from("build/assets.json"));
        assert_eq!(config.build.patterns, vec!["**/*.png"]);
        assert_eq!(config.level.seed, 42);
        assert!(config.level.layout.is_none());
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
[project]
name = "meadow"
assets = "art"
out = "dist/tiles.json"

[build]
patterns = ["tiles/*.png", "sprites/**/*.png"]

[level]
seed = 7
layout = "levels/meadow.toml"
width = 32
height = 24
"#,
        );
        assert_eq!(config.project.assets, PathBuf::from("art"));
        assert_eq!(config.build.patterns.len(), 2);
        assert_eq!(config.level.seed, 7);
        assert_eq!(config.level.layout, Some(PathBuf::from("levels/meadow.toml")));
        assert_eq!((config.level.width, config.level.height), (Some(32), Some(24)));
    }

    #[test]
    fn test_missing_project_section() {
        let result: Result<PxtileConfig, _> = toml::from_str("[build]\npatterns = []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let config = parse("[project]\nname = \"\"\n");
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "project.name");
    }

    #[test]
    fn test_validate_empty_patterns() {
        let config = parse("[project]\nname = \"x\"\n[build]\npatterns = []\n");
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.field == "build.patterns"));
    }

    #[test]
    fn test_validate_blank_pattern() {
        let config = parse("[project]\nname = \"x\"\n[build]\npatterns = [\"*.png\", \" \"]\n");
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "build.patterns[1]");
    }

    #[test]
    fn test_validate_zero_level_dimensions() {
        let config = parse("[project]\nname = \"x\"\n[level]\nwidth = 0\nheight = 0\n");
        let fields: Vec<_> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["level.width", "level.height"]);
    }

    #[test]
    fn test_validation_error_display() {
        let error = ConfigValidationError {
            field: "level.width".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(error.to_string(), "pxtile.toml: 'level.width' must be a positive integer");
    }
}
