//! Combat resolution rules.
//!
//! Pure functions shared by both sides of a battle. The battle engine owns
//! sequencing; this module only answers "how much damage does this hit do".
//!
//! - `calculate_damage`: raw attack-vs-defense difference
//! - `roll_damage`: raw damage plus uniform variance, floored at the minimum
//! - `apply_damage`: HP reduction (clamped to 0)

pub mod damage;

pub use damage::{apply_damage, calculate_damage, roll_damage};
