use crate::state::{MapDimensions, Position};

use super::{TerrainId, WorldError};

/// Dense, row-major terrain grid on a torus.
///
/// Every lookup is wrapped modulo the dimensions, so there is no such thing as
/// an out-of-range coordinate once a grid exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    dimensions: MapDimensions,
    tiles: Vec<TerrainId>,
}

impl TileGrid {
    /// Builds a grid from terrain rows.
    ///
    /// The first row fixes the width. Shorter rows are padded with terrain `0`
    /// and longer rows are truncated.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, WorldError>
    where
        R: AsRef<[TerrainId]>,
    {
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if width == 0 {
            return Err(WorldError::MissingTerrain);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for row in rows {
            let row = row.as_ref();
            let taken = row.len().min(width);
            tiles.extend_from_slice(&row[..taken]);
            tiles.extend(std::iter::repeat_n(0, width - taken));
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tiles,
        })
    }

    /// Grid of a single terrain type.
    pub fn filled(dimensions: MapDimensions, terrain: TerrainId) -> Result<Self, WorldError> {
        if dimensions.is_empty() {
            return Err(WorldError::MissingTerrain);
        }
        Ok(Self {
            dimensions,
            tiles: vec![terrain; (dimensions.width * dimensions.height) as usize],
        })
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn terrain_at(&self, x: i32, y: i32) -> TerrainId {
        self.tiles[self.index(x, y)]
    }

    pub fn set(&mut self, x: i32, y: i32, terrain: TerrainId) {
        let index = self.index(x, y);
        self.tiles[index] = terrain;
    }

    /// Iterates `(position, terrain)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, TerrainId)> + '_ {
        let width = self.dimensions.width as usize;
        self.tiles.iter().enumerate().map(move |(index, &terrain)| {
            let position = Position::new((index % width) as i32, (index / width) as i32);
            (position, terrain)
        })
    }

    fn index(&self, x: i32, y: i32) -> usize {
        let wrapped = self.dimensions.wrap(x, y);
        wrapped.y as usize * self.dimensions.width as usize + wrapped.x as usize
    }
}
