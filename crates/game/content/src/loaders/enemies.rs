//! Enemy template catalog loader.

use std::path::Path;

use game_core::{EnemyCatalog, EnemyTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Enemy table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyTable {
    pub enemies: Vec<EnemyTemplate>,
}

/// Loader for enemy templates from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        let table: EnemyTable = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse enemy RON {}: {}", path.display(), e)
        })?;

        if let Some(duplicate) = first_duplicate_id(&table.enemies) {
            anyhow::bail!(
                "Duplicate enemy id {} in {}",
                duplicate,
                path.display()
            );
        }
        Ok(EnemyCatalog::new(table.enemies))
    }
}

fn first_duplicate_id(templates: &[EnemyTemplate]) -> Option<u32> {
    let mut seen = std::collections::BTreeSet::new();
    templates
        .iter()
        .map(|template| template.id)
        .find(|id| !seen.insert(*id))
}
