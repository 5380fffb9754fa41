//! Terrain metadata keyed by terrain id.

use std::collections::BTreeMap;

use strum::{Display, EnumIter};

use crate::projector::Rgb;

use super::TerrainId;

/// Animated-effect hint for the renderer. The simulation never reads it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectDescriptor {
    pub kind: EffectKind,
    pub speed: f32,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    Wave,
    Shimmer,
    Sway,
}

/// One row of the terrain-property table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainType {
    pub id: TerrainId,
    pub name: String,
    pub walkable: bool,
    /// Percent chance (0-100) of an encounter per accepted step.
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounter_rate: u8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounter_zone: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: Option<EffectDescriptor>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub battle_background: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: Option<Rgb>,
}

impl TerrainType {
    pub fn new(id: TerrainId, name: impl Into<String>, walkable: bool) -> Self {
        Self {
            id,
            name: name.into(),
            walkable,
            encounter_rate: 0,
            encounter_zone: 0,
            effect: None,
            battle_background: None,
            color: None,
        }
    }

    pub fn with_encounters(mut self, rate: u8, zone: u32) -> Self {
        self.encounter_rate = rate.min(100);
        self.encounter_zone = zone;
        self
    }
}

/// Terrain-property table. Walkability and encounter data come from here
/// whenever a table is loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainTable {
    types: BTreeMap<TerrainId, TerrainType>,
}

impl TerrainTable {
    /// Ids that block movement when no table row says otherwise (open water
    /// and impassable high ground).
    pub const LEGACY_BLOCKED: [TerrainId; 2] = [0, 3];

    /// Fallback colors by id: ocean, grass, forest, mountain, desert, snow.
    /// Ids past the end reuse the last entry.
    pub const DEFAULT_PALETTE: [Rgb; 6] = [
        Rgb::new(30, 77, 139),
        Rgb::new(94, 170, 60),
        Rgb::new(45, 90, 30),
        Rgb::new(139, 115, 85),
        Rgb::new(212, 165, 116),
        Rgb::new(232, 240, 248),
    ];

    pub fn new(types: impl IntoIterator<Item = TerrainType>) -> Self {
        Self {
            types: types
                .into_iter()
                .map(|mut terrain| {
                    terrain.encounter_rate = terrain.encounter_rate.min(100);
                    (terrain.id, terrain)
                })
                .collect(),
        }
    }

    pub fn get(&self, id: TerrainId) -> Option<&TerrainType> {
        self.types.get(&id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Table-driven walkability. Ids the table does not list follow the
    /// legacy rule.
    pub fn is_walkable(&self, id: TerrainId) -> bool {
        self.get(id)
            .map_or_else(|| Self::legacy_walkable(id), |terrain| terrain.walkable)
    }

    pub fn legacy_walkable(id: TerrainId) -> bool {
        !Self::LEGACY_BLOCKED.contains(&id)
    }

    pub fn color(&self, id: TerrainId) -> Rgb {
        self.get(id)
            .and_then(|terrain| terrain.color)
            .unwrap_or_else(|| Self::palette_color(id))
    }

    pub fn palette_color(id: TerrainId) -> Rgb {
        let index = (id as usize).min(Self::DEFAULT_PALETTE.len() - 1);
        Self::DEFAULT_PALETTE[index]
    }
}
