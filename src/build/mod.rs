//! Asset build pipeline for pxtile
//!
//! Turns a directory of source images into the asset artifact the tile map
//! runtime loads from.
//!
//! # Overview
//!
//! The build pipeline consists of:
//! - **Discovery**: Find source images using glob patterns from config
//! - **Encoding**: Decode each image to RGBA and encode it into a container
//! - **Output**: Write the named containers as one JSON artifact
//!
//! # Example
//!
//! ```ignore
//! use pxtile::build::{BuildContext, BuildPipeline};
//! use pxtile::config::load_config;
//!
//! let (config, _) = load_config(None)?;
//! let context = BuildContext::new(config, project_root);
//! let result = BuildPipeline::new(context).build()?;
//! println!("{}", result.summary());
//! ```

pub mod context;
pub mod discovery;
pub mod pipeline;
pub mod result;

pub use context::*;
pub use discovery::*;
pub use pipeline::*;
pub use result::*;
