//! pxtile - Indexed-color tile sheets, a tile extraction runtime, and a
//! procedural tile level compositor
//!
//! This library provides functionality to:
//! - Encode RGBA images into a compact palette + packed index container
//! - Decode containers and extract named, optionally flipped tiles
//! - Compose deterministic layered levels from an authored layout
//! - Build an asset artifact from a directory of source images

pub mod assets;
pub mod build;
pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod container;
pub mod level;
pub mod output;
pub mod tilemap;
