//! Game session: one context object plus an explicit finite-state machine.
//!
//! ```text
//! Exploring ──encounter──▶ Battle ──victory──▶ BattleOver ──confirm──▶ Exploring
//!                            │
//!                            └──defeat──▶ GameOver ──confirm──▶ Exploring
//! ```
//!
//! Every input goes through [`GameSession::dispatch`]. World ticks are only
//! processed while exploring, so an encounter pauses the world until the
//! battle result has been handed back.
mod builder;
mod context;
mod input;

pub use builder::SessionBuilder;
pub use context::GameContext;
pub use input::HeldDirections;

use strum::Display;
use tracing::{debug, info, warn};

use game_core::{
    AttackOutcome, BattleEngine, BattleResult, BattleState, CameraFrame, Encounter, GameError,
    RngOracle, StepOutcome, spawn_roster,
};

use crate::api::{BattleCommand, GameEvent, Result, RuntimeError, SessionEvent};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum SessionState {
    #[strum(to_string = "exploring")]
    Exploring,
    #[strum(to_string = "in battle")]
    Battle,
    #[strum(to_string = "showing battle results")]
    BattleOver,
    #[strum(to_string = "game over")]
    GameOver,
}

/// HP restored by a potion.
pub const POTION_HEAL: u32 = 30;

pub struct GameSession<R> {
    context: GameContext,
    state: SessionState,
    battle: Option<BattleEngine>,
    last_result: Option<BattleResult>,
    rng: R,
}

impl<R: RngOracle> GameSession<R> {
    pub fn builder(rng: R) -> SessionBuilder<R> {
        SessionBuilder::new(rng)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Active battle, if any.
    pub fn battle(&self) -> Option<&BattleEngine> {
        self.battle.as_ref()
    }

    pub fn last_result(&self) -> Option<&BattleResult> {
        self.last_result.as_ref()
    }

    pub fn camera_frame(&self, tiles_wide: u32, tiles_high: u32) -> Option<CameraFrame> {
        self.context
            .controller
            .camera_frame(&self.context.world, tiles_wide, tiles_high)
    }

    /// Feeds one event through the state machine and returns what happened.
    pub fn dispatch(&mut self, event: GameEvent) -> Result<Vec<SessionEvent>> {
        match event {
            GameEvent::Press(direction) => {
                self.context.input.press(direction);
                Ok(Vec::new())
            }
            GameEvent::Release(direction) => {
                self.context.input.release(direction);
                Ok(Vec::new())
            }
            GameEvent::Tick => Ok(self.tick()),
            GameEvent::Battle(command) => {
                if self.state != SessionState::Battle {
                    return Err(self.unexpected(event));
                }
                self.run_command(command)
            }
            GameEvent::Confirm => match self.state {
                SessionState::BattleOver | SessionState::GameOver => {
                    info!(from = %self.state, "returning to the world map");
                    self.state = SessionState::Exploring;
                    self.battle = None;
                    Ok(Vec::new())
                }
                _ => Err(self.unexpected(event)),
            },
        }
    }

    fn unexpected(&self, event: GameEvent) -> RuntimeError {
        RuntimeError::UnexpectedEvent {
            event: event.label(),
            state: self.state,
        }
    }

    fn tick(&mut self) -> Vec<SessionEvent> {
        self.context.ticks += 1;
        if self.state != SessionState::Exploring {
            return Vec::new();
        }

        let held = self.context.input.held();
        let outcome = self.context.controller.tick(&held, &self.context.world);
        let mut events = Vec::new();

        match outcome {
            StepOutcome::Waiting | StepOutcome::Idle => {}
            StepOutcome::Blocked { facing } => {
                self.context.sync_party();
                events.push(SessionEvent::Blocked { facing });
            }
            StepOutcome::Moved { position, facing } => {
                self.context.steps += 1;
                self.context.sync_party();
                events.push(SessionEvent::Moved { position, facing });

                if let Some((location, first_visit)) = self.context.world.mark_visited(position) {
                    debug!(location = %location.name, first_visit, "entered location");
                    events.push(SessionEvent::EnteredLocation {
                        name: location.name.clone(),
                        first_visit,
                    });
                }

                let encounter = self
                    .context
                    .controller
                    .roll_encounter(&self.context.world, &mut self.rng);
                if let Some(encounter) = encounter {
                    self.start_encounter(encounter, &mut events);
                }
            }
        }
        events
    }

    fn start_encounter(&mut self, encounter: Encounter, events: &mut Vec<SessionEvent>) {
        let roster = match spawn_roster(&self.context.enemies, encounter.zone, &mut self.rng) {
            Ok(roster) => roster,
            Err(error) => {
                warn!(
                    %error,
                    severity = error.severity().as_str(),
                    zone = encounter.zone,
                    "encounter aborted"
                );
                events.push(SessionEvent::EncounterAborted {
                    zone: encounter.zone,
                });
                return;
            }
        };

        let names: Vec<String> = roster.iter().map(|enemy| enemy.name.clone()).collect();
        info!(
            zone = encounter.zone,
            position = %encounter.position,
            enemies = ?names,
            "encounter started"
        );

        let mut battle = BattleEngine::new(&self.context.config);
        battle.start_battle(std::mem::take(&mut self.context.party), roster);
        self.context.input.clear();

        events.push(SessionEvent::EncounterStarted {
            zone: encounter.zone,
            enemies: names,
            battle_background: encounter.battle_background,
        });
        events.extend(battle.log().iter().cloned().map(SessionEvent::BattleMessage));

        self.battle = Some(battle);
        self.last_result = None;
        self.state = SessionState::Battle;
    }

    fn run_command(&mut self, command: BattleCommand) -> Result<Vec<SessionEvent>> {
        let state = self.state;
        let Some(battle) = self.battle.as_mut() else {
            return Err(RuntimeError::Desync {
                state,
                detail: "no battle engine",
            });
        };
        let mut events = Vec::new();

        // A fresh battle against an empty or pre-defeated roster ends on the
        // first check.
        if battle.is_battle_over() {
            self.finish_battle(&mut events);
            return Ok(events);
        }
        if battle.state() != BattleState::PlayerTurn {
            battle.begin_player_turn();
        }
        let Some(actor) = battle.current_character() else {
            return Err(RuntimeError::Desync {
                state,
                detail: "no character can act",
            });
        };

        let message = match command {
            BattleCommand::Attack { target } => {
                match battle.execute_attack(actor, target, &mut self.rng)? {
                    AttackOutcome::Invalid { message } => {
                        // The character keeps the turn.
                        events.push(SessionEvent::BattleMessage(message));
                        return Ok(events);
                    }
                    AttackOutcome::Hit { message, .. } => message,
                }
            }
            BattleCommand::Defend => battle.execute_defend(actor)?,
            BattleCommand::Potion => battle.execute_potion(actor, POTION_HEAL)?,
        };
        events.push(SessionEvent::BattleMessage(message));

        if battle.is_battle_over() {
            self.finish_battle(&mut events);
            return Ok(events);
        }

        battle.next_character_turn();
        if battle.state() == BattleState::EnemyTurn {
            let messages = battle.execute_enemy_turn(&mut self.rng);
            events.extend(messages.into_iter().map(SessionEvent::BattleMessage));
            if battle.is_battle_over() {
                self.finish_battle(&mut events);
                return Ok(events);
            }
            battle.begin_player_turn();
        }
        Ok(events)
    }

    fn finish_battle(&mut self, events: &mut Vec<SessionEvent>) {
        let Some(mut battle) = self.battle.take() else {
            return;
        };
        let result = battle.battle_result();
        let victory = battle.state() == BattleState::Victory;
        events.extend(
            result
                .level_ups
                .iter()
                .cloned()
                .map(SessionEvent::BattleMessage),
        );

        self.context.party = battle.into_party();
        self.context.sync_party();
        events.push(SessionEvent::BattleEnded(result.clone()));

        if victory {
            info!(
                exp = result.total_exp,
                gold = result.total_gold,
                "battle won"
            );
            self.state = SessionState::BattleOver;
        } else {
            warn!("party defeated");
            for character in &mut self.context.party {
                character.restore_fully();
            }
            events.push(SessionEvent::GameOver);
            self.state = SessionState::GameOver;
        }
        self.last_result = Some(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{
        Character, Enemy, EnemyCatalog, EnemyTemplate, ErrorSeverity, GameConfig, MapDimensions,
        PcgRng, TerrainTable, TerrainType, TileGrid, WorldModel,
    };

    fn quiet_session() -> GameSession<PcgRng> {
        let config = GameConfig::with_move_delay(1);
        let grid = TileGrid::filled(MapDimensions::new(8, 8), 1).unwrap();
        let table = TerrainTable::new([TerrainType::new(1, "Plains", true)]);
        let world = WorldModel::new(&config)
            .with_grid(grid)
            .with_terrain_table(table);
        GameSession::builder(PcgRng::new(1))
            .config(config.clone())
            .world(world)
            .enemies(EnemyCatalog::new(Vec::<EnemyTemplate>::new()))
            .party(vec![Character::new("Terra", &config)])
            .build()
            .unwrap()
    }

    #[test]
    fn battle_commands_are_rejected_while_exploring() {
        let mut session = quiet_session();
        let error = session
            .dispatch(GameEvent::Battle(BattleCommand::Defend))
            .unwrap_err();
        assert!(matches!(
            error,
            RuntimeError::UnexpectedEvent {
                state: SessionState::Exploring,
                ..
            }
        ));
        assert!(session.dispatch(GameEvent::Confirm).is_err());
    }

    #[test]
    fn invalid_target_keeps_the_turn() {
        let mut session = quiet_session();
        let config = session.context.config.clone();
        let mut battle = BattleEngine::new(&config);
        battle.start_battle(
            std::mem::take(&mut session.context.party),
            vec![Enemy::new("Guard", 40, 5, 2)],
        );
        session.battle = Some(battle);
        session.state = SessionState::Battle;

        let events = session
            .dispatch(GameEvent::Battle(BattleCommand::Attack { target: 4 }))
            .unwrap();
        assert_eq!(
            events,
            vec![SessionEvent::BattleMessage("Invalid target!".into())]
        );
        assert_eq!(session.battle().map(|b| b.current_character()), Some(Some(0)));
    }

    #[test]
    fn battle_state_without_an_engine_is_internal() {
        let mut session = quiet_session();
        session.state = SessionState::Battle;

        let error = session
            .dispatch(GameEvent::Battle(BattleCommand::Defend))
            .unwrap_err();
        assert!(matches!(
            error,
            RuntimeError::Desync {
                state: SessionState::Battle,
                ..
            }
        ));
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        assert_eq!(error.error_code(), "RUNTIME_DESYNC");
    }
}
