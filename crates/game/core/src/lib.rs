//! Deterministic role-playing simulation core.
//!
//! `game-core` defines the canonical rules (stat model, battle resolution,
//! toroidal tile world, movement and encounters) and exposes pure APIs that can
//! be driven by the runtime, by tests, or by offline tools. Nothing here touches
//! a clock, a file, or a global: randomness flows through [`env::RngOracle`] and
//! content is passed in explicitly.
pub mod battle;
pub mod combat;
pub mod config;
pub mod env;
pub mod error;
pub mod explore;
pub mod projector;
pub mod state;
pub mod world;

pub use battle::{AttackOutcome, BattleEngine, BattleError, BattleResult, BattleState};
pub use config::GameConfig;
pub use env::{EnemyCatalog, PcgRng, RngOracle};
pub use error::{ErrorSeverity, GameError};
pub use explore::{
    CameraFrame, Encounter, EncounterError, MovementController, StepOutcome, spawn_roster,
};
pub use projector::{Camera, Projector, Rgb, TerrainTexture, TextureImage};
pub use state::{
    Character, Combatant, Direction, Enemy, EnemyTemplate, Facing, MapDimensions, Position,
    ResourceMeter,
};
pub use world::{
    EffectDescriptor, EffectKind, EncounterProfile, Location, LocationKind, TerrainId,
    TerrainTable, TerrainType, TileGrid, WorldError, WorldModel,
};
