//! Stat model: the plain records the battle engine and the movement
//! controller mutate.
//!
//! Characters belong to the party roster for the whole session; a character at
//! 0 HP is "fallen", never removed. Enemies are instantiated from templates at
//! encounter time and are owned by the battle that spawned them.
pub mod types;

pub use types::{
    Character, Combatant, Direction, Enemy, EnemyTemplate, Facing, MapDimensions, Position,
    ResourceMeter,
};
