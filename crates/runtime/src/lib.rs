//! Runtime orchestration for the role-playing simulation.
//!
//! This crate wires the pure rules in `game-core` into a single playable
//! session: one [`GameContext`] owning the world, the party and the input
//! state, driven by a finite-state machine that consumes [`GameEvent`]s and
//! reports [`SessionEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`api`] exposes the event, command and error types clients interact with
//! - [`session`] hosts the state machine and its builder
//! - [`rng`] adapts `rand` to the core's random oracle
pub mod api;
pub mod rng;
pub mod session;

pub use api::{
    AutoBattleProvider, BattleCommand, CommandProvider, GameEvent, Result, RuntimeError,
    ScriptedProvider, SessionEvent,
};
pub use rng::RandRng;
pub use session::{GameContext, GameSession, HeldDirections, SessionBuilder, SessionState};
