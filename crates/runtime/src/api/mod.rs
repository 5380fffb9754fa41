//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the session module can stay focused on orchestration.

pub mod errors;
pub mod events;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use events::{BattleCommand, GameEvent, SessionEvent};
pub use providers::{AutoBattleProvider, CommandProvider, ScriptedProvider};
