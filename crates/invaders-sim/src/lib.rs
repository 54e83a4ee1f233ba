//! Simulation engine for the invaders formation.
//!
//! Owns the formation grid, the column spawners, and the kill bookkeeping,
//! advances them in a fixed order each tick, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

pub mod engine;
pub mod formation;
pub mod grid;
pub mod kill_tracker;
pub mod scoreboard;
pub mod snapshot;
pub mod spawner;
pub mod tempo;

pub use engine::{SimConfig, SimulationEngine};
pub use invaders_core as core;
pub use tempo::{SteppedTempo, TempoSource};
