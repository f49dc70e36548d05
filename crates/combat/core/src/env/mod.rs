//! Traits describing the world the combat core runs against.
//!
//! Oracles expose balance tables and level geometry; the RNG supplies every
//! roll. [`CombatEnv`] bundles the read-only parts so resolution functions
//! take one argument instead of three.
mod cave;
mod rng;
mod tables;

pub use cave::{CaveOracle, GridCave, TerrainKind};
pub use rng::{CombatRng, PcgRng, RandomChance, ScriptedRng};
pub use tables::{
    CombatTables, CriticalLevel, CriticalParams, CriticalTable, DEADLINESS_CONVERSION,
    DeadlinessTable, PercentCriticalLevel, PercentCriticalParams, PercentCriticalTable,
    TablesOracle,
};

use crate::config::CombatConfig;

/// Read-only context shared by every combat operation.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub config: &'a CombatConfig,
    pub tables: &'a dyn TablesOracle,
}

impl<'a> CombatEnv<'a> {
    pub fn new(config: &'a CombatConfig, tables: &'a dyn TablesOracle) -> Self {
        Self { config, tables }
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
