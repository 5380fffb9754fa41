//! Headless client for the role-playing simulation.
//!
//! # Architecture
//!
//! ```text
//! rpg-sim (composition root)
//!   ├─→ game-content (data directory → ContentBundle)
//!   ├─→ runtime (GameSession state machine, RandRng)
//!   └─→ driver (scripted walk, auto-battle, Mode7 snapshot)
//! ```
//!
//! The binary only wires these together; everything it does can also be
//! driven from tests through [`Simulation`].
pub mod config;
mod driver;

pub use config::SimConfig;
pub use driver::{SimReport, Simulation, average_color, render_view};
