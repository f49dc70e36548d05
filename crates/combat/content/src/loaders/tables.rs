//! Combat tables loader.
//!
//! Critical tiers and the deadliness curve are validated while they are
//! deserialized, so a table that parses is ready to use.

use std::path::Path;

use combat_core::CombatTables;
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`CombatTables`] from TOML files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load tables from a TOML file.
    ///
    /// The `percent` and `deadliness` sections are optional and default to
    /// the built-in values.
    pub fn load(path: &Path) -> LoadResult<CombatTables> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatTables> {
        let tables: CombatTables = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat tables TOML: {}", e))?;

        debug!(
            melee_tiers = tables.melee.levels.levels().len(),
            ranged_tiers = tables.ranged.levels.levels().len(),
            percent_tiers = tables.percent.levels.levels().len(),
            "combat tables loaded"
        );
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[melee]
weight_scale = 1
to_h_scale = 5
level_scale = 3
skill_scale = 0
chance_range = 5000
power_weight_scale = 1
power_random = 650
debuff_to_h = 10
levels = [
    { cutoff = 400, multiplier = 2, addend = 5, class = "good" },
    { cutoff = 0, multiplier = 3, addend = 10, class = "great" },
]

[ranged]
weight_scale = 1
to_h_scale = 4
level_scale = 2
skill_scale = 1
thrown_skill_scale = 1
chance_range = 5000
power_weight_scale = 1
power_random = 500
debuff_to_h = 10
levels = [{ cutoff = 0, multiplier = 2, addend = 5, class = "good" }]
"#;

    #[test]
    fn optional_sections_default() {
        let tables = TablesLoader::parse(MINIMAL).expect("tables parse");
        assert_eq!(tables.melee.levels.levels().len(), 2);
        assert_eq!(tables.deadliness, CombatTables::default().deadliness);
        assert_eq!(tables.percent, CombatTables::default().percent);
    }

    #[test]
    fn unsorted_tiers_fail_to_load() {
        let broken = MINIMAL.replace(
            r#"{ cutoff = 0, multiplier = 3, addend = 10, class = "great" },"#,
            r#"{ cutoff = 100, multiplier = 3, addend = 10, class = "great" },
    { cutoff = 0, multiplier = 3, addend = 15, class = "superb" },"#,
        );
        assert_ne!(broken, MINIMAL);
        let err = TablesLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("cutoff"), "{err}");
    }
}
