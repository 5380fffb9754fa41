use crate::state::{MapDimensions, Position};
use crate::world::{Location, TerrainId, WorldModel};

/// Tiles around the player that a top-down renderer draws this frame.
///
/// The frame extends [`CameraFrame::OVERDRAW`] tiles past the right and bottom
/// edges so partial tiles are covered. Every tile is looked up through the
/// wrapped grid, so a frame straddling the map seam needs no special casing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CameraFrame {
    /// World tile drawn at the top-left corner (unwrapped).
    pub origin: Position,
    pub columns: u32,
    pub rows: u32,
    /// Row-major terrain ids, `columns * rows` long.
    pub tiles: Vec<TerrainId>,
    /// Player tile relative to `origin`.
    pub player: Position,
    pub locations: Vec<VisibleLocation>,
}

/// A location marker whose footprint overlaps the frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibleLocation {
    pub location: Location,
    /// Top-left of the marker relative to the frame origin. Negative when the
    /// footprint starts left of or above the frame.
    pub offset: Position,
}

impl CameraFrame {
    /// Frame overdraw beyond the viewport capacity, in tiles.
    pub const OVERDRAW: u32 = 2;

    /// Centres a `tiles_wide × tiles_high` viewport on `player`.
    ///
    /// Returns `None` before a grid is loaded.
    pub fn around(
        world: &WorldModel,
        player: Position,
        tiles_wide: u32,
        tiles_high: u32,
    ) -> Option<Self> {
        let grid = world.grid()?;
        let origin = player.offset(-((tiles_wide / 2) as i32), -((tiles_high / 2) as i32));
        let columns = tiles_wide + Self::OVERDRAW;
        let rows = tiles_high + Self::OVERDRAW;

        let tiles = (0..rows as i32)
            .flat_map(|y| (0..columns as i32).map(move |x| (x, y)))
            .map(|(x, y)| grid.terrain_at(origin.x + x, origin.y + y))
            .collect();

        let locations = world
            .locations()
            .iter()
            .filter_map(|location| {
                let offset = footprint_offset(grid.dimensions(), origin, location, columns, rows)?;
                Some(VisibleLocation {
                    location: location.clone(),
                    offset,
                })
            })
            .collect();

        Some(Self {
            origin,
            columns,
            rows,
            tiles,
            player: Position::new((tiles_wide / 2) as i32, (tiles_high / 2) as i32),
            locations,
        })
    }

    /// Terrain at a frame-relative tile.
    pub fn tile(&self, column: u32, row: u32) -> Option<TerrainId> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles.get((row * self.columns + column) as usize).copied()
    }
}

/// Frame-relative top-left of a footprint that overlaps the frame.
fn footprint_offset(
    dims: MapDimensions,
    origin: Position,
    location: &Location,
    columns: u32,
    rows: u32,
) -> Option<Position> {
    let x = axis_offset(
        location.position.x - origin.x,
        location.width.max(1),
        columns,
        dims.width,
    )?;
    let y = axis_offset(
        location.position.y - origin.y,
        location.height.max(1),
        rows,
        dims.height,
    )?;
    Some(Position::new(x, y))
}

/// Places a wrapped span of `extent` tiles so it overlaps `[0, span)`, either
/// at its wrapped start or one map length earlier.
fn axis_offset(delta: i32, extent: u32, span: u32, size: u32) -> Option<i32> {
    let size = size as i32;
    let start = delta.rem_euclid(size);
    if start < span as i32 {
        Some(start)
    } else {
        let before = start - size;
        (before + extent as i32 > 0).then_some(before)
    }
}
