//! Monster race catalog loader.
//!
//! Races name their blows by method and effect; names are resolved against a
//! [`BlowCatalog`] when the catalog is loaded.

use std::path::Path;
use std::sync::Arc;

use combat_core::{CombatConfig, Dice, MonsterBlow, MonsterRace, RaceFlags};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{BlowCatalog, LoadResult, read_file};

/// One blow of a race as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlowSpec {
    /// Method name; `None` writes an empty slot, which ends the table.
    pub method: Option<String>,
    pub effect: String,
    pub dice: Dice,
}

/// A race as written in the data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSpec {
    pub name: String,
    pub level: i32,
    pub ac: i32,
    #[serde(default)]
    pub flags: RaceFlags,
    #[serde(default)]
    pub blows: Vec<BlowSpec>,
}

impl RaceSpec {
    /// Resolves blow names into a [`MonsterRace`].
    pub fn resolve(self, catalog: &BlowCatalog) -> LoadResult<MonsterRace> {
        if self.blows.len() > CombatConfig::MAX_MONSTER_BLOWS {
            anyhow::bail!(
                "Race '{}' has {} blows, at most {} are allowed",
                self.name,
                self.blows.len(),
                CombatConfig::MAX_MONSTER_BLOWS
            );
        }

        let mut race = MonsterRace::new(self.name, self.level, self.ac).with_flags(self.flags);
        for spec in self.blows {
            let method = match spec.method.as_deref() {
                Some(name) => Some(catalog.method(name).cloned().ok_or_else(|| {
                    anyhow::anyhow!("Unknown blow method '{}' for race '{}'", name, race.name)
                })?),
                None => None,
            };
            let effect = catalog.effect(&spec.effect).cloned().ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown blow effect '{}' for race '{}'",
                    spec.effect,
                    race.name
                )
            })?;
            race = race.with_blow(MonsterBlow {
                method,
                effect,
                dice: spec.dice,
            });
        }
        Ok(race)
    }
}

/// Loader for monster races from RON files.
pub struct RaceLoader;

impl RaceLoader {
    /// Load races from a RON file.
    ///
    /// RON format: `Vec<RaceSpec>`
    pub fn load(path: &Path, catalog: &BlowCatalog) -> LoadResult<Vec<Arc<MonsterRace>>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &BlowCatalog) -> LoadResult<Vec<Arc<MonsterRace>>> {
        let specs: Vec<RaceSpec> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse race catalog RON: {}", e))?;

        let mut races = Vec::with_capacity(specs.len());
        for spec in specs {
            let race = spec.resolve(catalog)?;
            debug!(race = %race.name, blows = race.blows.len(), "race loaded");
            races.push(Arc::new(race));
        }
        Ok(races)
    }
}
