use game_content::ContentBundle;
use game_core::{Character, EnemyCatalog, GameConfig, RngOracle, WorldModel};
use tracing::info;

use crate::api::{Result, RuntimeError};

use super::{GameContext, GameSession, SessionState};

/// Builder for [`GameSession`] with explicit content injection.
pub struct SessionBuilder<R> {
    rng: R,
    config: GameConfig,
    world: Option<WorldModel>,
    enemies: EnemyCatalog,
    party: Vec<Character>,
}

impl<R: RngOracle> SessionBuilder<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            config: GameConfig::default(),
            world: None,
            enemies: EnemyCatalog::default(),
            party: Vec::new(),
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn world(mut self, world: WorldModel) -> Self {
        self.world = Some(world);
        self
    }

    pub fn enemies(mut self, enemies: EnemyCatalog) -> Self {
        self.enemies = enemies;
        self
    }

    pub fn party(mut self, party: Vec<Character>) -> Self {
        self.party = party;
        self
    }

    /// Takes config, world, enemies and party from loaded content.
    pub fn content(self, bundle: ContentBundle) -> Self {
        self.config(bundle.config)
            .world(bundle.world)
            .enemies(bundle.enemies)
            .party(bundle.party)
    }

    pub fn build(self) -> Result<GameSession<R>> {
        let world = self.world.ok_or(RuntimeError::MissingWorld)?;
        if !world.is_loaded() {
            return Err(RuntimeError::MissingWorld);
        }
        if self.party.is_empty() {
            return Err(RuntimeError::EmptyParty);
        }

        let context = GameContext::new(self.config, world, self.enemies, self.party);
        info!(
            start = %context.player_position(),
            party = context.party.len(),
            templates = context.enemies.len(),
            "session ready"
        );

        Ok(GameSession {
            context,
            state: SessionState::Exploring,
            battle: None,
            last_result: None,
            rng: self.rng,
        })
    }
}
