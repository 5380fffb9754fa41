//! Content loaders for reading game data from files.
//!
//! Each loader turns one RON/TOML file into the game-core type that consumes
//! it. [`ContentFactory`] ties them together over a data directory.

pub mod config;
pub mod enemies;
pub mod factory;
pub mod map;
pub mod party;
pub mod terrain;

pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use map::{MapData, MapLoader};
pub use party::{PartyLoader, PartyMemberSpec};
pub use terrain::TerrainLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
