//! Abstraction for sourcing battle commands.
//!
//! Front-ends plug in [`CommandProvider`] implementations so a battle can run
//! with human input, scripted fixtures, or a simple policy.
use std::collections::VecDeque;

use game_core::BattleEngine;

use super::events::BattleCommand;

/// Trait for choosing the next battle command from the current battle.
pub trait CommandProvider {
    /// Command for the character whose turn it is.
    fn next_command(&mut self, battle: &BattleEngine) -> BattleCommand;
}

/// Always attacks the first standing enemy; drinks a potion when the acting
/// character drops below a quarter of max HP.
#[derive(Clone, Copy, Debug, Default)]
pub struct AutoBattleProvider;

impl CommandProvider for AutoBattleProvider {
    fn next_command(&mut self, battle: &BattleEngine) -> BattleCommand {
        let wounded = battle
            .current_character()
            .and_then(|index| battle.party().get(index))
            .is_some_and(|c| c.hp.current > 0 && c.hp.current * 4 < c.hp.maximum);
        if wounded {
            return BattleCommand::Potion;
        }
        BattleCommand::Attack {
            target: battle.first_living_enemy().unwrap_or(0),
        }
    }
}

/// Replays a fixed list of commands, then falls back to
/// [`AutoBattleProvider`]. Useful for testing.
#[derive(Clone, Debug, Default)]
pub struct ScriptedProvider {
    script: VecDeque<BattleCommand>,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = BattleCommand>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl CommandProvider for ScriptedProvider {
    fn next_command(&mut self, battle: &BattleEngine) -> BattleCommand {
        self.script
            .pop_front()
            .unwrap_or_else(|| AutoBattleProvider.next_command(battle))
    }
}
