//! Terrain-property table loader.

use std::path::Path;

use game_core::{TerrainTable, TerrainType};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Terrain table structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainCatalog {
    pub terrain: Vec<TerrainType>,
}

/// Loader for the terrain table from RON files.
pub struct TerrainLoader;

impl TerrainLoader {
    /// Load the terrain table. Duplicate ids keep the last row.
    pub fn load(path: &Path) -> LoadResult<TerrainTable> {
        let content = read_file(path)?;
        let catalog: TerrainCatalog = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse terrain RON {}: {}", path.display(), e)
        })?;

        Ok(TerrainTable::new(catalog.terrain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Rgb;

    #[test]
    fn loads_rows_with_optional_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("terrain.ron");
        std::fs::write(
            &path,
            r#"(
                terrain: [
                    (id: 0, name: "Ocean", walkable: false,
                     effect: Some((kind: Wave, speed: 1.5, intensity: 0.4))),
                    (id: 2, name: "Forest", walkable: true, encounter_rate: 180,
                     encounter_zone: 3, battle_background: Some("forest"),
                     color: Some((r: 45, g: 90, b: 30))),
                ],
            )"#,
        )
        .unwrap();

        let table = TerrainLoader::load(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.is_walkable(0));
        let forest = table.get(2).unwrap();
        assert_eq!(forest.encounter_rate, 100);
        assert_eq!(forest.battle_background.as_deref(), Some("forest"));
        assert_eq!(table.color(2), Rgb::new(45, 90, 30));
        assert!(table.get(0).unwrap().effect.is_some());
    }
}
