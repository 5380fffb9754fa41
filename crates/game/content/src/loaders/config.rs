//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults; an encounter rate above 100 is
    /// clamped so the rest of the simulation never sees one.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let mut config: GameConfig = toml::from_str(content)?;
        config.default_encounter_rate = config.default_encounter_rate.min(100);
        config.starting_level = config.starting_level.max(1);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_takes_defaults() {
        let config = ConfigLoader::parse("move_delay_ticks = 4\nexp_multiplier_percent = 150\n")
            .unwrap();
        assert_eq!(config.move_delay_ticks, 4);
        assert_eq!(config.exp_multiplier_percent, 150);
        assert_eq!(config.starting_hp, 100);
        assert_eq!(config.start_position, None);
    }

    #[test]
    fn start_position_is_a_table() {
        let config = ConfigLoader::parse("[start_position]\nx = 12\ny = 7\n").unwrap();
        assert_eq!(config.start_position, Some(game_core::Position::new(12, 7)));
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "move_delay_ticks = \"soon\"").unwrap();
        let error = ConfigLoader::load(&path).unwrap_err().to_string();
        assert!(error.contains("config.toml"), "{error}");
    }
}
