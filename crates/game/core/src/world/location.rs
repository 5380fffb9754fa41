use strum::{Display, EnumIter};

use crate::state::{MapDimensions, Position};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LocationKind {
    #[cfg_attr(feature = "serde", serde(alias = "town"))]
    Settlement,
    Dungeon,
    #[cfg_attr(feature = "serde", serde(alias = "castle"))]
    Stronghold,
    Landmark,
}

/// Named marker occupying a rectangle of tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub name: String,
    /// Top-left tile of the footprint.
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default = "default_extent"))]
    pub width: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_extent"))]
    pub height: u32,
    pub kind: LocationKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visited: bool,
}

#[cfg(feature = "serde")]
fn default_extent() -> u32 {
    1
}

impl Location {
    pub fn new(name: impl Into<String>, position: Position, kind: LocationKind) -> Self {
        Self {
            name: name.into(),
            position,
            width: 1,
            height: 1,
            kind,
            visited: false,
        }
    }

    /// Footprint size; both sides are at least one tile.
    pub fn with_footprint(mut self, width: u32, height: u32) -> Self {
        self.width = width.max(1);
        self.height = height.max(1);
        self
    }

    /// Whether the (wrapped) tile lies inside this footprint. Footprints that
    /// cross the map edge continue on the opposite side.
    pub fn contains(&self, dimensions: MapDimensions, tile: Position) -> bool {
        if dimensions.is_empty() {
            return false;
        }
        let dx = (tile.x - self.position.x).rem_euclid(dimensions.width as i32) as u32;
        let dy = (tile.y - self.position.y).rem_euclid(dimensions.height as i32) as u32;
        dx < self.width.max(1) && dy < self.height.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_wraps_across_the_seam() {
        let dims = MapDimensions::new(16, 16);
        let keep = Location::new("Narshe", Position::new(15, 15), LocationKind::Stronghold)
            .with_footprint(2, 2);
        assert!(keep.contains(dims, Position::new(15, 15)));
        assert!(keep.contains(dims, Position::new(0, 0)));
        assert!(keep.contains(dims, Position::new(-1, 16)));
        assert!(!keep.contains(dims, Position::new(1, 0)));
    }

    #[test]
    fn zero_footprint_is_one_tile() {
        let inn = Location::new("Inn", Position::new(3, 3), LocationKind::Settlement)
            .with_footprint(0, 0);
        assert_eq!((inn.width, inn.height), (1, 1));
    }
}
