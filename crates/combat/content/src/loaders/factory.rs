//! Content factory for loading every combat data file from one directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use combat_core::{CombatConfig, CombatTables, MonsterRace};

use crate::loaders::{BlowCatalog, ConfigLoader, LoadResult, RaceLoader, TablesLoader};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── tables.toml
/// ├── blows.ron
/// └── races.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data files shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load combat configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Load critical tables and the deadliness curve from `tables.toml`.
    pub fn load_tables(&self) -> LoadResult<CombatTables> {
        let path = self.data_dir.join("tables.toml");
        TablesLoader::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Load blow methods and effects from `blows.ron`.
    pub fn load_blows(&self) -> LoadResult<BlowCatalog> {
        let path = self.data_dir.join("blows.ron");
        BlowCatalog::load(&path).with_context(|| format!("loading {}", path.display()))
    }

    /// Load monster races from `races.ron`, resolving blows against `blows`.
    pub fn load_races(&self, blows: &BlowCatalog) -> LoadResult<Vec<Arc<MonsterRace>>> {
        let path = self.data_dir.join("races.ron");
        RaceLoader::load(&path, blows).with_context(|| format!("loading {}", path.display()))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
