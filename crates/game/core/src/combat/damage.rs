//! Damage calculation and application.

use crate::config::GameConfig;
use crate::env::RngOracle;

/// Raw damage before variance.
///
/// # Formula
///
/// ```text
/// raw_damage = attack - defense
/// ```
///
/// Monotonic in both inputs: more attack or less defense never deals less.
/// The result may be negative; the floor is applied after variance. Computed
/// in `i64` so the full `u32` stat range keeps its order.
pub fn calculate_damage(attack: u32, defense: u32) -> i64 {
    i64::from(attack) - i64::from(defense)
}

/// Final damage of one hit.
///
/// ```text
/// final_damage = clamp(raw_damage + uniform[-DAMAGE_VARIANCE, DAMAGE_VARIANCE], MIN_DAMAGE, u32::MAX)
/// ```
pub fn roll_damage<R>(raw_damage: i64, rng: &mut R) -> u32
where
    R: RngOracle + ?Sized,
{
    let variance = rng.range(-GameConfig::DAMAGE_VARIANCE, GameConfig::DAMAGE_VARIANCE);
    let damage = raw_damage.saturating_add(i64::from(variance));
    damage.clamp(i64::from(GameConfig::MIN_DAMAGE), i64::from(u32::MAX)) as u32
}

/// Apply damage to current HP.
///
/// Returns the new HP value (clamped to 0).
pub fn apply_damage(current_hp: u32, damage: u32) -> u32 {
    current_hp.saturating_sub(damage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn damage_is_monotonic() {
        assert!(calculate_damage(21, 5) > calculate_damage(20, 5));
        assert!(calculate_damage(20, 4) > calculate_damage(20, 5));
    }

    #[test]
    fn rolled_damage_stays_within_variance() {
        let mut rng = PcgRng::new(11);
        for _ in 0..500 {
            let damage = roll_damage(calculate_damage(20, 5), &mut rng);
            assert!((13..=17).contains(&damage));
        }
    }

    #[test]
    fn hopeless_attack_still_scratches() {
        let mut rng = PcgRng::new(3);
        for _ in 0..100 {
            assert_eq!(roll_damage(calculate_damage(1, 50), &mut rng), 1);
        }
    }

    #[test]
    fn huge_attack_keeps_its_edge() {
        let mut rng = PcgRng::new(4);
        assert!(calculate_damage(3_000_000_000, 0) > calculate_damage(1_000, 0));

        let strong = roll_damage(calculate_damage(3_000_000_000, 0), &mut rng);
        let weak = roll_damage(calculate_damage(1_000, 0), &mut rng);
        assert!(strong > weak);
        assert!(strong >= 2_999_999_998);

        let capped = roll_damage(calculate_damage(u32::MAX, 0), &mut rng);
        assert!(capped >= u32::MAX - 2);
        let edge = roll_damage(calculate_damage(i32::MAX as u32, 0), &mut rng);
        assert!(edge >= i32::MAX as u32 - 2);
    }

    #[test]
    fn apply_clamps_at_zero() {
        assert_eq!(apply_damage(3, 10), 0);
        assert_eq!(apply_damage(10, 3), 7);
    }
}
