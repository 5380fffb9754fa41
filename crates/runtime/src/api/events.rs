//! Events flowing into and out of a [`GameSession`](crate::GameSession).
//!
//! [`GameEvent`] is the tagged intent enum the input layer feeds in;
//! [`SessionEvent`] is what a dispatch produced, in order, for front-ends to
//! render or log.
use game_core::{BattleResult, Direction, Facing, Position};

/// Input intents accepted by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// One fixed-period simulation tick.
    Tick,
    Press(Direction),
    Release(Direction),
    Battle(BattleCommand),
    /// Acknowledge a battle result or a game over.
    Confirm,
}

impl GameEvent {
    pub fn label(&self) -> &'static str {
        match self {
            GameEvent::Tick => "tick",
            GameEvent::Press(_) => "press",
            GameEvent::Release(_) => "release",
            GameEvent::Battle(_) => "battle command",
            GameEvent::Confirm => "confirm",
        }
    }
}

/// Action chosen for the character whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleCommand {
    /// Attack the enemy at this roster index.
    Attack { target: usize },
    Defend,
    Potion,
}

/// Observable outcome of a dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    Moved {
        position: Position,
        facing: Facing,
    },
    Blocked {
        facing: Facing,
    },
    EnteredLocation {
        name: String,
        first_visit: bool,
    },
    EncounterStarted {
        zone: u32,
        enemies: Vec<String>,
        battle_background: Option<String>,
    },
    /// The zone had no enemy templates; exploration continues.
    EncounterAborted {
        zone: u32,
    },
    BattleMessage(String),
    BattleEnded(BattleResult),
    GameOver,
}
