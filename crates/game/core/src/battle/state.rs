use strum::{Display, EnumIter};

use crate::error::{ErrorSeverity, GameError};

/// Battle phase.
///
/// `Start` is transient; `Victory` and `Defeat` are terminal and admit no
/// further transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    #[default]
    Start,
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

impl BattleState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, BattleState::Victory | BattleState::Defeat)
    }
}

/// What a single attack did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit {
        damage: u32,
        remaining_hp: u32,
        defeated: bool,
        message: String,
    },
    /// Target missing or already defeated. Nothing changed.
    Invalid { message: String },
}

impl AttackOutcome {
    pub const INVALID_TARGET: &'static str = "Invalid target!";

    pub fn invalid() -> Self {
        AttackOutcome::Invalid {
            message: Self::INVALID_TARGET.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AttackOutcome::Hit { message, .. } | AttackOutcome::Invalid { message } => message,
        }
    }

    pub fn damage(&self) -> Option<u32> {
        match self {
            AttackOutcome::Hit { damage, .. } => Some(*damage),
            AttackOutcome::Invalid { .. } => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, AttackOutcome::Hit { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("no party member at index {0}")]
    NoSuchCharacter(usize),
}

impl GameError for BattleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            BattleError::NoSuchCharacter(_) => "BATTLE_NO_SUCH_CHARACTER",
        }
    }
}
