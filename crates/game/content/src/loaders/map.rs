//! World map loader.
//!
//! A map file carries the terrain rows (row-major terrain ids) and the
//! location markers placed on them.

use std::path::Path;

use game_core::{
    GameConfig, Location, Position, TerrainId, TerrainTable, WorldError, WorldModel,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tiles: Vec<Vec<TerrainId>>,
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Overrides the configured start tile for this map.
    #[serde(default)]
    pub start: Option<Position>,
}

impl MapData {
    /// Builds the world model for this map.
    ///
    /// Missing terrain is the fatal [`WorldError::MissingTerrain`].
    pub fn into_world(
        self,
        config: &GameConfig,
        terrain: Option<TerrainTable>,
    ) -> Result<WorldModel, WorldError> {
        let mut world = WorldModel::new(config);
        world.load_grid(self.tiles.as_slice())?;
        if let Some(table) = terrain {
            world.set_terrain_table(table);
        }
        for location in self.locations {
            world.add_location(location);
        }
        Ok(world)
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<MapData> {
        let content = read_file(path)?;
        let data: MapData = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON {}: {}", path.display(), e))?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::LocationKind;

    #[test]
    fn map_builds_a_world_with_locations() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("isle.ron");
        std::fs::write(
            &path,
            r#"(
                name: "Isle",
                tiles: [[0, 0, 0], [0, 1, 0], [0, 0, 0]],
                locations: [
                    (name: "Hut", position: (x: 1, y: 1), kind: town),
                    (name: "Fort", position: (x: 2, y: 2), width: 2, height: 2, kind: castle),
                ],
                start: Some((x: 1, y: 1)),
            )"#,
        )
        .unwrap();

        let data = MapLoader::load(&path).unwrap();
        assert_eq!(data.start, Some(Position::new(1, 1)));
        let world = data.into_world(&GameConfig::default(), None).unwrap();
        assert!(world.is_walkable(1, 1));
        assert!(!world.is_walkable(0, 1));
        let fort = world.location_at(Position::new(0, 0)).unwrap();
        assert_eq!(fort.kind, LocationKind::Stronghold);
        assert_eq!(
            world.location_at(Position::new(1, 1)).map(|l| l.kind),
            Some(LocationKind::Settlement)
        );
    }

    #[test]
    fn map_without_tiles_is_missing_terrain() {
        let data = MapData {
            name: "Void".into(),
            ..MapData::default()
        };
        assert_eq!(
            data.into_world(&GameConfig::default(), None).err(),
            Some(WorldError::MissingTerrain)
        );
    }
}
