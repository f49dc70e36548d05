//! Content loaders for reading combat data from files.

pub mod blows;
pub mod config;
pub mod factory;
pub mod races;
pub mod tables;

pub use blows::BlowCatalog;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use races::{BlowSpec, RaceLoader, RaceSpec};
pub use tables::TablesLoader;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
