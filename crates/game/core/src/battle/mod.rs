//! Turn-based battle resolution.
//!
//! [`BattleEngine`] owns the combatants for the duration of a battle: the
//! party is moved in by [`BattleEngine::start_battle`] and handed back by
//! [`BattleEngine::into_party`] once the caller has consumed the result.
//!
//! ```text
//! Start → PlayerTurn ⇄ EnemyTurn → Victory | Defeat
//! ```
//!
//! Terminal detection is the caller's job after every individual action via
//! [`BattleEngine::is_battle_over`]; the engine never ends a battle on its own.
mod result;
mod state;

pub use result::BattleResult;
pub use state::{AttackOutcome, BattleError, BattleState};

use tracing::debug;

use crate::combat::roll_damage;
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{Character, Combatant, Enemy};

#[derive(Clone, Debug)]
pub struct BattleEngine {
    party: Vec<Character>,
    enemies: Vec<Enemy>,
    state: BattleState,
    current_character: usize,
    log: Vec<String>,
    /// Parallel to `party`: characters guarding through the next enemy turn.
    guarding: Vec<bool>,
    config: GameConfig,
    result: Option<BattleResult>,
}

impl BattleEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            party: Vec::new(),
            enemies: Vec::new(),
            state: BattleState::Start,
            current_character: 0,
            log: Vec::new(),
            guarding: Vec::new(),
            config: config.clone(),
            result: None,
        }
    }

    /// Takes over the rosters, resets the turn cursor and the log, and hands
    /// the first turn to the party.
    ///
    /// Neither roster has to be non-empty, but a battle without enemies is
    /// over as soon as it is checked.
    pub fn start_battle(&mut self, party: Vec<Character>, enemies: Vec<Enemy>) {
        self.state = BattleState::Start;
        self.guarding = vec![false; party.len()];
        self.party = party;
        self.enemies = enemies;
        self.result = None;
        self.log.clear();

        self.push_log(format!(
            "Battle started against {} enemies!",
            self.enemies.len()
        ));
        self.current_character = self.first_living_from(0).unwrap_or(0);
        self.state = BattleState::PlayerTurn;
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn party(&self) -> &[Character] {
        &self.party
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Index of the party member whose turn it is, if that member is standing.
    pub fn current_character(&self) -> Option<usize> {
        self.party
            .get(self.current_character)
            .filter(|character| character.is_alive())
            .map(|_| self.current_character)
    }

    /// Index of the first enemy still standing.
    pub fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(Combatant::is_alive)
    }

    /// Returns the roster so the caller can carry the party back to the world.
    pub fn into_party(self) -> Vec<Character> {
        self.party
    }

    /// One party member attacks one enemy.
    ///
    /// A missing or already defeated target is a soft failure: nothing is
    /// mutated, nothing is logged, and the outcome carries `"Invalid target!"`.
    pub fn execute_attack<R>(
        &mut self,
        attacker: usize,
        target: usize,
        rng: &mut R,
    ) -> Result<AttackOutcome, BattleError>
    where
        R: RngOracle + ?Sized,
    {
        let attacker = self
            .party
            .get(attacker)
            .ok_or(BattleError::NoSuchCharacter(attacker))?;
        let Some(enemy) = self.enemies.get_mut(target).filter(|e| e.is_alive()) else {
            return Ok(AttackOutcome::invalid());
        };

        let damage = roll_damage(attacker.calculate_damage(enemy.defense()), rng);
        let remaining_hp = enemy.take_damage(damage);
        let defeated = remaining_hp == 0;

        let mut message = format!(
            "{} attacks {} for {} damage!",
            attacker.name, enemy.name, damage
        );
        if defeated {
            message.push_str(&format!("\n{} defeated!", enemy.name));
        }
        debug!(
            target: "game_core::battle",
            attacker = %attacker.name,
            enemy = %enemy.name,
            damage,
            remaining_hp,
            "character attack"
        );

        self.push_log(message.clone());
        Ok(AttackOutcome::Hit {
            damage,
            remaining_hp,
            defeated,
            message,
        })
    }

    /// Every living enemy, in roster order, strikes a uniformly random living
    /// party member. Stops early once the party is wiped out.
    ///
    /// Guard stances taken during the player turn expire afterwards.
    pub fn execute_enemy_turn<R>(&mut self, rng: &mut R) -> Vec<String>
    where
        R: RngOracle + ?Sized,
    {
        let mut messages = Vec::new();

        for enemy in self.enemies.iter().filter(|e| e.is_alive()) {
            let living: Vec<usize> = self
                .party
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_alive())
                .map(|(index, _)| index)
                .collect();
            if living.is_empty() {
                break;
            }

            let index = living[rng.below(living.len() as u32) as usize];
            let defense = effective_defense(&self.party[index], self.guarding[index]);
            let damage = roll_damage(enemy.calculate_damage(defense), rng);

            let target = &mut self.party[index];
            let remaining_hp = target.take_damage(damage);

            let mut message = format!(
                "{} attacks {} for {} damage!",
                enemy.name, target.name, damage
            );
            if remaining_hp == 0 {
                message.push_str(&format!("\n{} has fallen!", target.name));
            }
            debug!(
                target: "game_core::battle",
                enemy = %enemy.name,
                character = %target.name,
                damage,
                remaining_hp,
                "enemy attack"
            );

            self.log.push(message.clone());
            messages.push(message);
        }

        self.guarding.iter_mut().for_each(|guard| *guard = false);
        messages
    }

    /// The character braces: defense ×1.5 until the end of the next enemy turn.
    pub fn execute_defend(&mut self, character: usize) -> Result<String, BattleError> {
        let member = self
            .party
            .get(character)
            .ok_or(BattleError::NoSuchCharacter(character))?;
        if !member.is_alive() {
            return Ok(format!("{} cannot act!", member.name));
        }

        let message = format!("{} defends!", member.name);
        self.guarding[character] = true;
        self.push_log(message.clone());
        Ok(message)
    }

    /// Restores up to `amount` HP to a standing character.
    pub fn execute_potion(&mut self, character: usize, amount: u32) -> Result<String, BattleError> {
        let member = self
            .party
            .get_mut(character)
            .ok_or(BattleError::NoSuchCharacter(character))?;
        if !member.is_alive() {
            return Ok(format!("{} cannot act!", member.name));
        }

        let restored = member.hp.restore(amount);
        let message = format!("{} uses Potion! Restored {} HP!", member.name, restored);
        self.push_log(message.clone());
        Ok(message)
    }

    /// Recomputes and caches the terminal state.
    ///
    /// A mutual wipe resolves to `Defeat`: the party check runs first. Once
    /// terminal, the state never changes again.
    pub fn is_battle_over(&mut self) -> bool {
        if self.state.is_terminal() {
            return true;
        }

        let party_down = self.party.iter().all(|c| !c.is_alive());
        let enemies_down = self.enemies.iter().all(|e| !e.is_alive());

        if party_down {
            self.state = BattleState::Defeat;
        } else if enemies_down {
            self.state = BattleState::Victory;
        } else {
            return false;
        }

        debug!(target: "game_core::battle", state = %self.state, "battle over");
        true
    }

    /// Advances the character cursor to the next standing party member, or
    /// hands the turn to the enemies when none is left.
    pub fn next_character_turn(&mut self) {
        match self.first_living_from(self.current_character + 1) {
            Some(index) => self.current_character = index,
            None => {
                self.current_character = self.party.len();
                self.state = BattleState::EnemyTurn;
            }
        }
    }

    /// Returns the turn to the party after the enemies acted.
    pub fn begin_player_turn(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.current_character = self.first_living_from(0).unwrap_or(0);
        self.state = BattleState::PlayerTurn;
    }

    /// Rewards of the battle.
    ///
    /// On victory, experience and gold are summed over every enemy, the
    /// experience pool is split evenly over the party's full size, and the
    /// share is applied only to characters still standing, leveling them up
    /// as many times as the share allows. The result is computed once and
    /// cached, so repeated calls never grant experience twice.
    ///
    /// Anything other than a victory yields an empty, non-victorious result.
    pub fn battle_result(&mut self) -> BattleResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        if self.state != BattleState::Victory {
            let result = BattleResult::defeat();
            if self.state.is_terminal() {
                self.result = Some(result.clone());
            }
            return result;
        }

        let mut result = BattleResult {
            victory: true,
            ..BattleResult::default()
        };

        let mut raw_exp = 0u32;
        for enemy in &self.enemies {
            raw_exp = raw_exp.saturating_add(enemy.exp_reward);
            result.total_gold = result.total_gold.saturating_add(enemy.gold_reward);
            result.defeated_enemies.push(enemy.name.clone());
        }
        result.total_exp = self.config.scale_experience(raw_exp);

        let share = match self.party.len() {
            0 => 0,
            size => result.total_exp / size as u32,
        };

        for character in self.party.iter_mut().filter(|c| c.is_alive()) {
            let old_level = character.level;
            character.gain_experience(share);
            result
                .character_exp_gained
                .insert(character.name.clone(), share);
            for level in old_level + 1..=character.level {
                result
                    .level_ups
                    .push(format!("{} reached level {}!", character.name, level));
            }
        }

        self.result = Some(result.clone());
        result
    }

    fn first_living_from(&self, start: usize) -> Option<usize> {
        self.party
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, c)| c.is_alive())
            .map(|(index, _)| index)
    }

    fn push_log(&mut self, line: String) {
        self.log.push(line);
    }
}

fn effective_defense(character: &Character, guarding: bool) -> u32 {
    if guarding {
        u32::try_from(u64::from(character.defense) * 3 / 2).unwrap_or(u32::MAX)
    } else {
        character.defense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn party_of(n: usize) -> Vec<Character> {
        let config = GameConfig::default();
        (0..n)
            .map(|i| {
                Character::new(format!("hero-{i}"), &config)
                    .with_hp(100)
                    .with_combat_stats(20, 5, 0, 10)
            })
            .collect()
    }

    fn engine(party: Vec<Character>, enemies: Vec<Enemy>) -> BattleEngine {
        let mut engine = BattleEngine::new(&GameConfig::default());
        engine.start_battle(party, enemies);
        engine
    }

    #[test]
    fn start_hands_turn_to_party() {
        let battle = engine(party_of(2), vec![Enemy::new("Slime", 10, 3, 1)]);
        assert_eq!(battle.state(), BattleState::PlayerTurn);
        assert_eq!(battle.current_character(), Some(0));
        assert_eq!(battle.log(), ["Battle started against 1 enemies!"]);
    }

    #[test]
    fn attacking_fallen_enemy_changes_nothing() {
        let mut dead = Enemy::new("Husk", 10, 3, 1);
        dead.hp.current = 0;
        let mut battle = engine(party_of(1), vec![dead]);
        let mut rng = PcgRng::new(5);

        let outcome = battle.execute_attack(0, 0, &mut rng).unwrap();
        assert_eq!(outcome, AttackOutcome::invalid());
        assert_eq!(battle.log().len(), 1);

        let missing = battle.execute_attack(0, 7, &mut rng).unwrap();
        assert_eq!(missing.message(), "Invalid target!");
    }

    #[test]
    fn unknown_attacker_is_rejected() {
        let mut battle = engine(party_of(1), vec![Enemy::new("Slime", 10, 3, 1)]);
        let err = battle.execute_attack(4, 0, &mut PcgRng::new(1)).unwrap_err();
        assert_eq!(err, BattleError::NoSuchCharacter(4));
    }

    #[test]
    fn killing_blow_is_announced() {
        let mut battle = engine(party_of(1), vec![Enemy::new("Slime", 3, 3, 0)]);
        let outcome = battle.execute_attack(0, 0, &mut PcgRng::new(9)).unwrap();
        assert!(outcome.message().ends_with("\nSlime defeated!"));
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Victory);
    }

    #[test]
    fn empty_enemy_list_is_immediate_victory() {
        let mut battle = engine(party_of(2), Vec::new());
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Victory);
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Victory);
    }

    #[test]
    fn mutual_wipe_resolves_to_defeat() {
        let mut party = party_of(1);
        party[0].hp.current = 0;
        let mut enemy = Enemy::new("Slime", 10, 3, 1);
        enemy.hp.current = 0;
        let mut battle = engine(party, vec![enemy]);
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Defeat);
        assert!(!battle.battle_result().victory);
    }

    #[test]
    fn enemy_turn_skips_fallen_targets() {
        let mut party = party_of(3);
        party[0].hp.current = 0;
        party[2].hp.current = 0;
        let mut battle = engine(party, vec![Enemy::new("Wolf", 40, 30, 0); 3]);

        let messages = battle.execute_enemy_turn(&mut PcgRng::new(2));
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.contains("attacks hero-1")));
        assert_eq!(battle.party()[0].hp.current, 0);
    }

    #[test]
    fn enemy_turn_stops_when_party_is_gone() {
        let mut party = party_of(1);
        party[0].hp = crate::state::ResourceMeter::new(1, 100);
        let mut battle = engine(party, vec![Enemy::new("Wolf", 40, 30, 0); 3]);

        let messages = battle.execute_enemy_turn(&mut PcgRng::new(2));
        assert_eq!(messages.len(), 1);
        assert!(messages[0].ends_with("hero-0 has fallen!"));
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Defeat);
    }

    #[test]
    fn guard_softens_the_next_enemy_turn_only() {
        let mut party = party_of(1);
        party[0].defense = 10;
        let mut battle = engine(party, vec![Enemy::new("Ogre", 99, 20, 0)]);
        let mut rng = PcgRng::new(77);

        battle.execute_defend(0).unwrap();
        battle.execute_enemy_turn(&mut rng);
        let guarded_loss = 100 - battle.party()[0].hp.current;
        assert!((3..=7).contains(&guarded_loss));

        let before = battle.party()[0].hp.current;
        battle.execute_enemy_turn(&mut rng);
        let open_loss = before - battle.party()[0].hp.current;
        assert!((8..=12).contains(&open_loss));
    }

    #[test]
    fn potion_caps_at_max_hp() {
        let mut party = party_of(1);
        party[0].hp.current = 90;
        let mut battle = engine(party, vec![Enemy::new("Slime", 10, 3, 1)]);
        let message = battle.execute_potion(0, 30).unwrap();
        assert_eq!(message, "hero-0 uses Potion! Restored 10 HP!");
        assert_eq!(battle.party()[0].hp.current, 100);
    }

    #[test]
    fn cursor_skips_fallen_and_hands_over_to_enemies() {
        let mut party = party_of(3);
        party[1].hp.current = 0;
        let mut battle = engine(party, vec![Enemy::new("Slime", 10, 3, 1)]);

        battle.next_character_turn();
        assert_eq!(battle.current_character(), Some(2));
        assert_eq!(battle.state(), BattleState::PlayerTurn);

        battle.next_character_turn();
        assert_eq!(battle.state(), BattleState::EnemyTurn);
        assert_eq!(battle.current_character(), None);

        battle.begin_player_turn();
        assert_eq!(battle.state(), BattleState::PlayerTurn);
        assert_eq!(battle.current_character(), Some(0));
    }

    #[test]
    fn rewards_split_over_full_party_and_applied_once() {
        let mut party = party_of(3);
        party[2].hp.current = 0;
        let enemies = vec![
            Enemy::new("Slime", 0, 3, 1).with_rewards(90, 10),
            Enemy::new("Bat", 0, 3, 1).with_rewards(60, 5),
        ];
        let mut battle = engine(party, enemies);
        assert!(battle.is_battle_over());

        let result = battle.battle_result();
        assert!(result.victory);
        assert_eq!(result.total_exp, 150);
        assert_eq!(result.total_gold, 15);
        assert_eq!(result.defeated_enemies, vec!["Slime", "Bat"]);
        assert_eq!(result.exp_for("hero-0"), Some(50));
        assert_eq!(result.exp_for("hero-2"), None);

        let again = battle.battle_result();
        assert_eq!(again, result);
        let party = battle.into_party();
        assert_eq!(party[0].experience, 50);
        assert_eq!(party[2].experience, 0);
    }

    #[test]
    fn one_battle_can_grant_several_levels() {
        let enemies = vec![Enemy::new("Dragon", 0, 3, 1).with_rewards(250, 0)];
        let mut battle = engine(party_of(1), enemies);
        assert!(battle.is_battle_over());

        let result = battle.battle_result();
        assert_eq!(
            result.level_ups,
            vec!["hero-0 reached level 2!", "hero-0 reached level 3!"]
        );
        let hero = &battle.party()[0];
        assert_eq!((hero.level, hero.experience), (3, 50));
    }

    #[test]
    fn multiplier_scales_the_pool_before_the_split() {
        let config = GameConfig {
            exp_multiplier_percent: 150,
            ..GameConfig::default()
        };
        let mut battle = BattleEngine::new(&config);
        battle.start_battle(
            party_of(3),
            vec![Enemy::new("Behemoth", 0, 3, 1).with_rewards(60, 0)],
        );
        assert!(battle.is_battle_over());

        let result = battle.battle_result();
        assert_eq!(result.total_exp, 90);
        for name in ["hero-0", "hero-1", "hero-2"] {
            assert_eq!(result.exp_for(name), Some(30));
        }
        assert!(battle.party().iter().all(|hero| hero.experience == 30));
    }

    #[test]
    fn extreme_stats_do_not_overflow() {
        let mut party = party_of(1);
        party[0].attack = i32::MAX as u32;
        party[0].level = 50_000_000;
        let enemies = vec![Enemy::new("Tonberry", 1_000, 3, 0).with_rewards(10, 0)];
        let mut battle = engine(party, enemies);

        battle.execute_attack(0, 0, &mut PcgRng::new(6)).unwrap();
        assert!(battle.is_battle_over());
        assert_eq!(battle.state(), BattleState::Victory);

        let result = battle.battle_result();
        assert!(result.level_ups.is_empty());
        assert_eq!(battle.party()[0].experience, 10);
    }

    #[test]
    fn guarding_a_huge_defense_saturates() {
        let mut hero = party_of(1).remove(0);
        hero.defense = u32::MAX;
        assert_eq!(effective_defense(&hero, true), u32::MAX);
        assert_eq!(effective_defense(&hero, false), u32::MAX);
    }
}
