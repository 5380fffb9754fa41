//! Read-only data and services the simulation consumes.
//!
//! The enemy catalog and the random source are passed in explicitly by
//! whichever service needs them, so several independent simulations (or
//! tests) can run side by side without sharing hidden state.
mod catalog;
mod rng;

pub use catalog::EnemyCatalog;
pub use rng::{PcgRng, RngOracle};
