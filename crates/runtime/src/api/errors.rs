//! Unified error types surfaced by the runtime API.
//!
//! Only configuration problems and misuse of the session surface as errors.
//! Soft gameplay failures (invalid targets, empty encounter zones) are
//! reported through [`SessionEvent`](super::SessionEvent)s instead.
use thiserror::Error;

use game_core::{BattleError, ErrorSeverity, GameError, WorldError};

use crate::session::SessionState;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    World(#[from] WorldError),

    #[error(transparent)]
    Battle(#[from] BattleError),

    #[error("session requires a loaded world before building")]
    MissingWorld,

    #[error("session requires at least one party member")]
    EmptyParty,

    #[error("{event} is not accepted while {state}")]
    UnexpectedEvent {
        event: &'static str,
        state: SessionState,
    },

    /// The session state and the battle engine disagree.
    #[error("session desynchronized while {state}: {detail}")]
    Desync {
        state: SessionState,
        detail: &'static str,
    },
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::World(error) => error.severity(),
            RuntimeError::Battle(error) => error.severity(),
            RuntimeError::MissingWorld | RuntimeError::EmptyParty => ErrorSeverity::Fatal,
            RuntimeError::UnexpectedEvent { .. } => ErrorSeverity::Validation,
            RuntimeError::Desync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            RuntimeError::World(error) => error.error_code(),
            RuntimeError::Battle(error) => error.error_code(),
            RuntimeError::MissingWorld => "RUNTIME_MISSING_WORLD",
            RuntimeError::EmptyParty => "RUNTIME_EMPTY_PARTY",
            RuntimeError::UnexpectedEvent { .. } => "RUNTIME_UNEXPECTED_EVENT",
            RuntimeError::Desync { .. } => "RUNTIME_DESYNC",
        }
    }
}
