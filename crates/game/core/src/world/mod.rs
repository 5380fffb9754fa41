//! Toroidal tile world: terrain grid, terrain-property table, location markers.
//!
//! [`WorldModel`] answers the walkability and terrain queries the movement
//! controller and the renderer need. Before a grid is loaded every query
//! reports "unknown" (`None`) or "blocked".
mod error;
mod grid;
mod location;
mod terrain;

pub use error::WorldError;
pub use grid::TileGrid;
pub use location::{Location, LocationKind};
pub use terrain::{EffectDescriptor, EffectKind, TerrainTable, TerrainType};

use crate::config::GameConfig;
use crate::state::{MapDimensions, Position};

/// Integer terrain-type identifier stored in each tile.
pub type TerrainId = u16;

/// Encounter parameters of the tile a step landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterProfile {
    /// Percent chance per accepted step, 0-100.
    pub rate: u8,
    pub zone: u32,
    pub battle_background: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct WorldModel {
    grid: Option<TileGrid>,
    terrain: Option<TerrainTable>,
    locations: Vec<Location>,
    default_encounter_rate: u8,
}

impl WorldModel {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            default_encounter_rate: config.default_encounter_rate.min(100),
            ..Self::default()
        }
    }

    /// Replaces the terrain grid. Empty input is a fatal configuration error
    /// and leaves the previous grid (if any) untouched.
    pub fn load_grid<R>(&mut self, rows: &[R]) -> Result<(), WorldError>
    where
        R: AsRef<[TerrainId]>,
    {
        let grid = TileGrid::from_rows(rows)?;
        tracing::debug!(
            target: "game_core::world",
            width = grid.dimensions().width,
            height = grid.dimensions().height,
            "terrain grid loaded"
        );
        self.grid = Some(grid);
        Ok(())
    }

    pub fn with_grid(mut self, grid: TileGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    pub fn with_terrain_table(mut self, table: TerrainTable) -> Self {
        self.terrain = Some(table);
        self
    }

    pub fn set_terrain_table(&mut self, table: TerrainTable) {
        self.terrain = Some(table);
    }

    pub fn add_location(&mut self, location: Location) {
        self.locations.push(location);
    }

    pub fn grid(&self) -> Option<&TileGrid> {
        self.grid.as_ref()
    }

    pub fn terrain_table(&self) -> Option<&TerrainTable> {
        self.terrain.as_ref()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn is_loaded(&self) -> bool {
        self.grid.is_some()
    }

    pub fn dimensions(&self) -> Option<MapDimensions> {
        self.grid.as_ref().map(TileGrid::dimensions)
    }

    /// Wraps a coordinate onto the loaded map. Without a grid the input comes
    /// back as is.
    pub fn wrap(&self, x: i32, y: i32) -> Position {
        self.dimensions()
            .map_or(Position::new(x, y), |dims| dims.wrap(x, y))
    }

    /// Terrain id at any coordinate; `None` before a grid is loaded.
    pub fn terrain_at(&self, x: i32, y: i32) -> Option<TerrainId> {
        self.grid.as_ref().map(|grid| grid.terrain_at(x, y))
    }

    /// Terrain metadata for the tile, when the table lists its id.
    pub fn terrain_type_at(&self, x: i32, y: i32) -> Option<&TerrainType> {
        let id = self.terrain_at(x, y)?;
        self.terrain.as_ref()?.get(id)
    }

    /// Whether a unit may stand on the tile. Nothing is walkable before load.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        let Some(id) = self.terrain_at(x, y) else {
            return false;
        };
        match &self.terrain {
            Some(table) => table.is_walkable(id),
            None => TerrainTable::legacy_walkable(id),
        }
    }

    /// Encounter rate and zone of the tile.
    ///
    /// With a terrain table, ids the table does not list never start
    /// encounters. Without one, every tile uses the configured default rate in
    /// zone 0.
    pub fn encounter_profile(&self, x: i32, y: i32) -> Option<EncounterProfile> {
        let id = self.terrain_at(x, y)?;
        match &self.terrain {
            Some(table) => table.get(id).map(|terrain| EncounterProfile {
                rate: terrain.encounter_rate.min(100),
                zone: terrain.encounter_zone,
                battle_background: terrain.battle_background.clone(),
            }),
            None => Some(EncounterProfile {
                rate: self.default_encounter_rate,
                zone: 0,
                battle_background: None,
            }),
        }
    }

    pub fn location_at(&self, tile: Position) -> Option<&Location> {
        let dims = self.dimensions()?;
        self.locations
            .iter()
            .find(|location| location.contains(dims, tile))
    }

    /// Flags the location under `tile` as visited. Returns it together with
    /// whether this was the first visit.
    pub fn mark_visited(&mut self, tile: Position) -> Option<(&Location, bool)> {
        let dims = self.dimensions()?;
        let location = self
            .locations
            .iter_mut()
            .find(|location| location.contains(dims, tile))?;
        let first = !location.visited;
        location.visited = true;
        Some((location, first))
    }
}
