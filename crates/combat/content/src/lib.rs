//! Data-driven combat content and its loaders.
//!
//! This crate turns the bundled data files into combat-core types:
//! - Combat configuration (TOML)
//! - Critical tables and the deadliness curve (TOML)
//! - Blow methods and blow effects (RON)
//! - Monster races with their blow tables (RON)
//!
//! Content is handed to the combat core already parsed and validated; the
//! core never reads files itself.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    BlowCatalog, BlowSpec, ConfigLoader, ContentFactory, LoadResult, RaceLoader, RaceSpec,
    TablesLoader,
};
