//! Blow method and blow effect catalog loader.

use std::collections::HashMap;
use std::path::Path;

use combat_core::{BlowEffect, BlowMethod};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Blow catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BlowFile {
    methods: Vec<BlowMethod>,
    effects: Vec<BlowEffect>,
}

/// Blow methods and effects, looked up by name when races are resolved.
#[derive(Debug, Clone, Default)]
pub struct BlowCatalog {
    methods: HashMap<String, BlowMethod>,
    effects: HashMap<String, BlowEffect>,
}

impl BlowCatalog {
    /// Load the catalog from a RON file.
    ///
    /// RON format: `(methods: [BlowMethod...], effects: [BlowEffect...])`.
    /// Names must be unique within each list.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Self> {
        let file: BlowFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse blow catalog RON: {}", e))?;

        let mut catalog = Self::default();
        for method in file.methods {
            let name = method.name.clone();
            if catalog.methods.insert(name.clone(), method).is_some() {
                anyhow::bail!("Duplicate blow method '{}'", name);
            }
        }
        for effect in file.effects {
            let name = effect.name.clone();
            if catalog.effects.insert(name.clone(), effect).is_some() {
                anyhow::bail!("Duplicate blow effect '{}'", name);
            }
        }
        Ok(catalog)
    }

    pub fn method(&self, name: &str) -> Option<&BlowMethod> {
        self.methods.get(name)
    }

    pub fn effect(&self, name: &str) -> Option<&BlowEffect> {
        self.effects.get(name)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }
}
