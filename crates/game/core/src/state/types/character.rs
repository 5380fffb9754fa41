use crate::config::GameConfig;

use super::{Combatant, Facing, Position, ResourceMeter};

/// Player-controlled unit.
///
/// HP/MP/experience/level are mutated by the battle engine; position and
/// facing by the movement controller. Nothing else writes to a character.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Character {
    pub name: String,
    pub level: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub experience: u32,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub speed: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub position: Position,
    #[cfg_attr(feature = "serde", serde(default))]
    pub facing: Facing,
}

impl Character {
    /// Stat growth applied on every level gained.
    pub const HP_PER_LEVEL: u32 = 10;
    pub const MP_PER_LEVEL: u32 = 5;

    /// Creates a fresh level-1 style character from the configured starting values.
    pub fn new(name: impl Into<String>, config: &GameConfig) -> Self {
        Self {
            name: name.into(),
            level: config.starting_level.max(1),
            experience: 0,
            hp: ResourceMeter::full(config.starting_hp),
            mp: ResourceMeter::full(config.starting_mp),
            attack: 10,
            defense: 8,
            magic: 12,
            speed: 10,
            position: Position::ORIGIN,
            facing: Facing::Down,
        }
    }

    pub fn with_combat_stats(mut self, attack: u32, defense: u32, magic: u32, speed: u32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.magic = magic;
        self.speed = speed;
        self
    }

    pub fn with_hp(mut self, maximum: u32) -> Self {
        self.hp = ResourceMeter::full(maximum);
        self
    }

    /// Experience needed to leave the current level, saturating at `u32::MAX`.
    pub fn next_level_threshold(&self) -> u32 {
        GameConfig::EXP_PER_LEVEL.saturating_mul(self.level)
    }

    /// Raises the level by one, grows the stat block and refills HP/MP.
    ///
    /// Every stat saturates instead of wrapping.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.hp.maximum = self.hp.maximum.saturating_add(Self::HP_PER_LEVEL);
        self.mp.maximum = self.mp.maximum.saturating_add(Self::MP_PER_LEVEL);
        self.attack = self.attack.saturating_add(2);
        self.defense = self.defense.saturating_add(1);
        self.magic = self.magic.saturating_add(1);
        self.speed = self.speed.saturating_add(1);
        self.hp.refill();
        self.mp.refill();
    }

    /// Adds experience and levels up for as long as the threshold is met.
    ///
    /// Returns the number of levels gained. The threshold rises with every
    /// level, so the loop ends for any finite gain.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.experience >= self.next_level_threshold() {
            self.experience -= self.next_level_threshold();
            self.level_up();
            gained += 1;
        }
        gained
    }

    /// Brings a fallen or wounded character back to full HP and MP.
    pub fn restore_fully(&mut self) {
        self.hp.refill();
        self.mp.refill();
    }
}

impl Combatant for Character {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Character {
        Character::new("Terra", &GameConfig::default())
    }

    #[test]
    fn exactly_one_threshold_levels_once() {
        let mut terra = hero();
        assert_eq!(terra.gain_experience(100), 1);
        assert_eq!(terra.level, 2);
        assert_eq!(terra.experience, 0);
    }

    #[test]
    fn large_gain_climbs_the_staircase() {
        let mut terra = hero();
        assert_eq!(terra.gain_experience(250), 2);
        assert_eq!(terra.level, 3);
        assert_eq!(terra.experience, 50);
    }

    #[test]
    fn level_up_grows_and_refills() {
        let mut terra = hero();
        terra.hp.deplete(60);
        terra.level_up();
        assert_eq!(terra.hp.maximum, 110);
        assert_eq!(terra.hp.current, 110);
        assert_eq!(terra.attack, 12);
    }

    #[test]
    fn veteran_levels_saturate_instead_of_wrapping() {
        let mut veteran = hero();
        veteran.level = 50_000_000;
        assert_eq!(veteran.next_level_threshold(), u32::MAX);
        assert_eq!(veteran.gain_experience(10), 0);
        assert_eq!((veteran.level, veteran.experience), (50_000_000, 10));

        veteran.level = u32::MAX;
        veteran.attack = u32::MAX;
        veteran.hp = ResourceMeter::full(u32::MAX - 3);
        veteran.level_up();
        assert_eq!(veteran.level, u32::MAX);
        assert_eq!(veteran.attack, u32::MAX);
        assert_eq!(veteran.hp.maximum, u32::MAX);
        assert_eq!(veteran.hp.current, u32::MAX);
    }

    #[test]
    fn zero_hp_means_fallen() {
        let mut terra = hero();
        assert!(terra.is_alive());
        assert_eq!(terra.take_damage(500), 0);
        assert!(!terra.is_alive());
    }
}
