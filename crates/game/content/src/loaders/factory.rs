//! Content factory for loading a complete game from a data directory.

use std::path::{Path, PathBuf};

use game_core::{Character, EnemyCatalog, GameConfig, TerrainTable, WorldModel};

use crate::loaders::{
    ConfigLoader, EnemyLoader, LoadResult, MapData, MapLoader, PartyLoader, TerrainLoader,
};

/// Everything a session needs, resolved once at load time.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub world: WorldModel,
    pub enemies: EnemyCatalog,
    pub party: Vec<Character>,
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── terrain.ron
/// ├── enemies.ron
/// ├── party.ron
/// └── maps/
///     └── overworld.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Map loaded when the caller names none.
    pub const DEFAULT_MAP: &'static str = "overworld";

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`. A missing file means all
    /// defaults.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the terrain table from `terrain.ron`, if present.
    ///
    /// Without one the world falls back to the legacy walkability rule.
    pub fn load_terrain(&self) -> LoadResult<Option<TerrainTable>> {
        let path = self.data_dir.join("terrain.ron");
        if !path.exists() {
            return Ok(None);
        }
        TerrainLoader::load(&path).map(Some)
    }

    /// Load enemy templates from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<EnemyCatalog> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Load the starting party from `party.ron`.
    pub fn load_party(&self, config: &GameConfig) -> LoadResult<Vec<Character>> {
        let path = self.data_dir.join("party.ron");
        PartyLoader::load(&path, config)
    }

    /// Load a map from `maps/{map_name}.ron`.
    pub fn load_map(&self, map_name: &str) -> LoadResult<MapData> {
        let path = self.data_dir.join("maps").join(format!("{}.ron", map_name));
        MapLoader::load(&path)
    }

    /// Load the world for a map, with the terrain table applied.
    pub fn load_world(&self, map_name: &str, config: &GameConfig) -> LoadResult<WorldModel> {
        let map = self.load_map(map_name)?;
        let terrain = self.load_terrain()?;
        map.into_world(config, terrain)
            .map_err(|e| anyhow::anyhow!("Map '{}' in {}: {}", map_name, self.data_dir.display(), e))
    }

    /// Load everything for one session on the given map.
    ///
    /// A start tile set by the map overrides the one from `config.toml`.
    pub fn load_all(&self, map_name: &str) -> LoadResult<ContentBundle> {
        let mut config = self.load_config()?;
        let map = self.load_map(map_name)?;
        if map.start.is_some() {
            config.start_position = map.start;
        }

        let terrain = self.load_terrain()?;
        let world = map
            .into_world(&config, terrain)
            .map_err(|e| anyhow::anyhow!("Map '{}' in {}: {}", map_name, self.data_dir.display(), e))?;
        let enemies = self.load_enemies()?;
        let party = self.load_party(&config)?;

        Ok(ContentBundle {
            config,
            world,
            enemies,
            party,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Position;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn optional_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
        assert!(factory.load_terrain().unwrap().is_none());
        assert!(factory.load_enemies().is_err());
    }

    #[test]
    fn empty_map_surfaces_missing_terrain() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("maps")).unwrap();
        std::fs::write(dir.path().join("maps/void.ron"), "(name: \"Void\", tiles: [])").unwrap();

        let error = ContentFactory::new(dir.path())
            .load_world("void", &GameConfig::default())
            .unwrap_err()
            .to_string();
        assert!(error.contains("missing terrain data"), "{error}");
    }

    #[test]
    fn shipped_data_loads() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let bundle = ContentFactory::new(data_dir)
            .load_all(ContentFactory::DEFAULT_MAP)
            .unwrap();

        assert!(!bundle.party.is_empty());
        assert!(!bundle.enemies.is_empty());
        let dims = bundle.world.dimensions().unwrap();
        assert_eq!((dims.width, dims.height), (32, 24));
        let start = bundle.config.start_position.unwrap_or(Position::ORIGIN);
        assert!(bundle.world.is_walkable(start.x, start.y));
        for terrain in bundle.world.terrain_table().into_iter().flat_map(|t| {
            (0..=5).filter_map(move |id| t.get(id))
        }) {
            if terrain.encounter_rate > 0 {
                assert!(!bundle.enemies.for_zone(terrain.encounter_zone).is_empty());
            }
        }
    }
}
