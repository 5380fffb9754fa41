//! Enemy archetypes and the battle-only units spawned from them.

use std::collections::BTreeSet;

use super::{Combatant, ResourceMeter};

/// Archetype row from the enemy table, keyed by `id` and tagged with the
/// encounter zones it may appear in.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: u32,
    pub name: String,
    pub level: u32,
    pub max_hp: u32,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: u32,
    pub exp_reward: u32,
    pub gold_reward: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub texture: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub encounter_zones: BTreeSet<u32>,
}

impl EnemyTemplate {
    pub fn appears_in(&self, zone: u32) -> bool {
        self.encounter_zones.contains(&zone)
    }

    /// Instantiates a full-HP enemy for a battle.
    pub fn spawn(&self) -> Enemy {
        Enemy {
            name: self.name.clone(),
            level: self.level,
            hp: ResourceMeter::full(self.max_hp),
            attack: self.attack,
            defense: self.defense,
            magic: self.magic,
            speed: self.speed,
            exp_reward: self.exp_reward,
            gold_reward: self.gold_reward,
            texture: self.texture.clone(),
            encounter_zones: self.encounter_zones.clone(),
        }
    }
}

/// Battle-only unit. Discarded when the battle ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub level: u32,
    pub hp: ResourceMeter,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub speed: u32,
    pub exp_reward: u32,
    pub gold_reward: u32,
    pub texture: String,
    pub encounter_zones: BTreeSet<u32>,
}

impl Enemy {
    /// Bare enemy with the given combat numbers, mostly useful for scripted fights.
    pub fn new(name: impl Into<String>, max_hp: u32, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            level: 1,
            hp: ResourceMeter::full(max_hp),
            attack,
            defense,
            magic: 0,
            speed: 0,
            exp_reward: 0,
            gold_reward: 0,
            texture: String::new(),
            encounter_zones: BTreeSet::new(),
        }
    }

    pub fn with_rewards(mut self, exp_reward: u32, gold_reward: u32) -> Self {
        self.exp_reward = exp_reward;
        self.gold_reward = gold_reward;
        self
    }
}

impl Combatant for Enemy {
    fn name(&self) -> &str {
        &self.name
    }

    fn attack(&self) -> u32 {
        self.attack
    }

    fn defense(&self) -> u32 {
        self.defense
    }

    fn hp(&self) -> ResourceMeter {
        self.hp
    }

    fn hp_mut(&mut self) -> &mut ResourceMeter {
        &mut self.hp
    }
}
