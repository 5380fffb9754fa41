use std::collections::BTreeMap;

/// Outcome of a finished battle, consumed by the progression layer and UI.
///
/// Created once, when the battle's result is first requested after it ended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub victory: bool,
    pub total_exp: u32,
    pub total_gold: u32,
    pub defeated_enemies: Vec<String>,
    /// Experience share per surviving character, keyed by name.
    pub character_exp_gained: BTreeMap<String, u32>,
    /// One announcement per level gained, e.g. `"Terra reached level 3!"`.
    pub level_ups: Vec<String>,
}

impl BattleResult {
    pub fn defeat() -> Self {
        Self::default()
    }

    pub fn exp_for(&self, name: &str) -> Option<u32> {
        self.character_exp_gained.get(name).copied()
    }
}
