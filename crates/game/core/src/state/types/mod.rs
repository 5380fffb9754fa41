pub mod character;
pub mod common;
pub mod enemy;

// Re-export common types
pub use common::{Direction, Facing, MapDimensions, Position, ResourceMeter};

// Re-export combatant records
pub use character::Character;
pub use enemy::{Enemy, EnemyTemplate};

use crate::combat;

/// Shared view over anything that can stand in a battle.
///
/// The damage rule is the same for both sides, so the battle engine resolves
/// character and enemy attacks through this trait.
pub trait Combatant {
    fn name(&self) -> &str;
    fn attack(&self) -> u32;
    fn defense(&self) -> u32;
    fn hp(&self) -> ResourceMeter;
    fn hp_mut(&mut self) -> &mut ResourceMeter;

    fn is_alive(&self) -> bool {
        !self.hp().is_depleted()
    }

    /// Raw damage this unit deals against the given defense, before variance.
    fn calculate_damage(&self, target_defense: u32) -> i64 {
        combat::calculate_damage(self.attack(), target_defense)
    }

    /// Reduces HP, floored at 0. Returns the HP left.
    fn take_damage(&mut self, amount: u32) -> u32 {
        let hp = self.hp_mut();
        hp.current = combat::apply_damage(hp.current, amount);
        hp.current
    }
}
