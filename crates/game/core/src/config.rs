use crate::state::Position;

/// Game configuration constants and tunable parameters.
///
/// Every field has an explicit default, so a partially specified config file
/// resolves once at load time and is never consulted for missing values again.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Simulation ticks between two accepted movement steps.
    pub move_delay_ticks: u32,
    /// Encounter rate (percent per step) used when no terrain table is loaded.
    pub default_encounter_rate: u8,
    /// Scales the experience pool of a won battle before it is split.
    pub exp_multiplier_percent: u32,
    pub starting_level: u32,
    pub starting_hp: u32,
    pub starting_mp: u32,
    /// Player spawn tile. `None` spawns at the centre of the map.
    pub start_position: Option<Position>,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Largest roster a random encounter can produce.
    pub const MAX_ENCOUNTER_SIZE: u32 = 3;
    /// Damage variance is drawn uniformly from `[-DAMAGE_VARIANCE, DAMAGE_VARIANCE]`.
    pub const DAMAGE_VARIANCE: i32 = 2;
    pub const MIN_DAMAGE: u32 = 1;
    /// Experience needed to leave level `n` is `EXP_PER_LEVEL * n`.
    pub const EXP_PER_LEVEL: u32 = 100;
    /// Reference cadence of the world tick in milliseconds (~60 Hz).
    pub const TICK_MILLIS: u64 = 16;
    /// Ground distance at which projector fog reaches full strength.
    pub const FOG_DISTANCE: f32 = 500.0;
    pub const FOG_MAX: f32 = 0.7;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVE_DELAY_TICKS: u32 = 8;
    pub const DEFAULT_ENCOUNTER_RATE: u8 = 10;

    pub fn new() -> Self {
        Self {
            move_delay_ticks: Self::DEFAULT_MOVE_DELAY_TICKS,
            default_encounter_rate: Self::DEFAULT_ENCOUNTER_RATE,
            exp_multiplier_percent: 100,
            starting_level: 1,
            starting_hp: 100,
            starting_mp: 50,
            start_position: None,
        }
    }

    pub fn with_move_delay(move_delay_ticks: u32) -> Self {
        Self {
            move_delay_ticks,
            ..Self::new()
        }
    }

    /// Applies the experience multiplier to a raw battle reward.
    pub fn scale_experience(&self, raw: u32) -> u32 {
        let scaled = u64::from(raw) * u64::from(self.exp_multiplier_percent) / 100;
        u32::try_from(scaled).unwrap_or(u32::MAX)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_multiplier_keeps_rewards_intact() {
        let config = GameConfig::default();
        assert_eq!(config.scale_experience(60), 60);
        assert_eq!(config.move_delay_ticks, 8);
    }

    #[test]
    fn multiplier_scales_with_integer_floor() {
        let config = GameConfig {
            exp_multiplier_percent: 150,
            ..GameConfig::default()
        };
        assert_eq!(config.scale_experience(15), 22);
    }
}
