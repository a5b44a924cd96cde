//! Configuration module for the pxtile asset build and level tools
//!
//! Provides types and parsing for `pxtile.toml` project configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
