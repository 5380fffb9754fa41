//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

use game_content::ContentFactory;

/// Settings for one headless run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Directory holding `config.toml`, `terrain.ron`, `enemies.ron`,
    /// `party.ron` and `maps/`.
    pub data_dir: PathBuf,
    pub map: String,
    /// Fixed seed for a reproducible run. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// World ticks to simulate.
    pub ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
            map: ContentFactory::DEFAULT_MAP.to_string(),
            seed: None,
            ticks: Self::DEFAULT_TICKS,
        }
    }
}

impl SimConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "crates/game/content/data";
    pub const DEFAULT_TICKS: u64 = 2_000;

    /// Reads `CONTENT_DATA_DIR`, `SIM_MAP`, `SIM_SEED` and `SIM_TICKS`.
    ///
    /// Without `CONTENT_DATA_DIR` the data directory is looked up next to the
    /// executable's workspace first, then under the current directory.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = match env::var("CONTENT_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => locate_data_dir(),
        };
        if let Some(map) = env::var("SIM_MAP")
            .ok()
            .map(|map| map.trim().to_string())
            .filter(|map| !map.is_empty())
        {
            config.map = map;
        }
        config.seed = read_env::<u64>("SIM_SEED");
        if let Some(ticks) = read_env::<u64>("SIM_TICKS") {
            config.ticks = ticks;
        }

        config
    }
}

/// `target/<profile>/rpg-sim` sits two levels below the workspace root.
fn locate_data_dir() -> PathBuf {
    let beside_exe = env::current_exe().ok().and_then(|exe| {
        exe.parent()
            .and_then(|p| p.parent())
            .and_then(|p| p.parent())
            .map(|root| root.join(SimConfig::DEFAULT_DATA_DIR))
    });
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(SimConfig::DEFAULT_DATA_DIR),
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_overworld() {
        let config = SimConfig::default();
        assert_eq!(config.map, "overworld");
        assert_eq!(config.seed, None);
        assert_eq!(config.ticks, SimConfig::DEFAULT_TICKS);
        assert!(config.data_dir.ends_with("crates/game/content/data"));
    }
}
