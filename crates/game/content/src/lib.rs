//! Data-driven content definitions and loaders.
//!
//! This crate reads the static game content the simulation core consumes:
//! - Game configuration (TOML)
//! - Terrain-property table (RON)
//! - Enemy template catalog (RON)
//! - Starting party (RON)
//! - World maps: terrain rows and location markers (RON)
//!
//! Content is handed to the runtime explicitly and never lives in a global.
//! All loaders deserialize game-core types directly through serde.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentBundle, ContentFactory, EnemyLoader, LoadResult, MapData, MapLoader,
    PartyLoader, PartyMemberSpec, TerrainLoader,
};
