//! The generated asset artifact: named containers persisted as JSON

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::container::Container;

/// Error loading, saving or querying an asset bundle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AssetError {
    /// File I/O error
    #[error("Failed to access asset file: {0}")]
    Io(#[from] std::io::Error),
    /// JSON (de)serialization error
    #[error("Failed to parse asset file: {0}")]
    Parse(#[from] serde_json::Error),
    /// No container registered under this name
    #[error("Asset '{0}' not found")]
    NotFound(String),
}

/// Mapping from asset name to its encoded container.
///
/// Names are kept sorted so the serialized artifact is stable across builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetBundle {
    #[serde(default)]
    assets: BTreeMap<String, Container>,
}

impl AssetBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self { assets: BTreeMap::new() }
    }

    /// Add or replace a container, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, container: Container) -> Option<Container> {
        self.assets.insert(name.into(), container)
    }

    /// Look up a container by name.
    pub fn get(&self, name: &str) -> Result<&Container, AssetError> {
        self.assets.get(name).ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.assets.contains_key(name)
    }

    /// Asset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.keys().map(String::as_str)
    }

    /// `(name, container)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Container)> {
        self.assets.iter().map(|(name, container)| (name.as_str(), container))
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Parse a bundle from JSON text.
    pub fn from_json(text: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AssetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a bundle from a JSON file.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        info!("Loading {}", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the bundle to a JSON file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), AssetError> {
        info!("Saving {} ({} assets)", path.display(), self.len());
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
