use game_core::{
    Character, EnemyCatalog, GameConfig, MovementController, Position, WorldModel,
};

use super::input::HeldDirections;

/// Everything the session owns outside of an active battle.
///
/// The party lives here while exploring; during a battle it is moved into the
/// [`BattleEngine`](game_core::BattleEngine) and `party` is empty until the
/// battle hands it back.
#[derive(Clone, Debug)]
pub struct GameContext {
    pub config: GameConfig,
    pub world: WorldModel,
    pub enemies: EnemyCatalog,
    pub party: Vec<Character>,
    pub controller: MovementController,
    pub input: HeldDirections,
    /// Accepted steps since the session started.
    pub steps: u64,
    pub ticks: u64,
}

impl GameContext {
    pub fn new(
        config: GameConfig,
        world: WorldModel,
        enemies: EnemyCatalog,
        party: Vec<Character>,
    ) -> Self {
        let controller = MovementController::spawn(&world, &config);
        let mut context = Self {
            config,
            world,
            enemies,
            party,
            controller,
            input: HeldDirections::default(),
            steps: 0,
            ticks: 0,
        };
        context.sync_party();
        context
    }

    pub fn player_position(&self) -> Position {
        self.controller.position()
    }

    /// Copies the controller's position and facing onto every party member.
    pub fn sync_party(&mut self) {
        let position = self.controller.position();
        let facing = self.controller.facing();
        for character in &mut self.party {
            character.position = position;
            character.facing = facing;
        }
    }
}
