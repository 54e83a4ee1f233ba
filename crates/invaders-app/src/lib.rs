//! Headless runner for the invaders simulation.
//!
//! Wires the engine to a scripted stand-in for the projectile layer and
//! drives it either as fast as possible or at a fixed tick rate on a
//! dedicated game loop thread.

pub mod autopilot;
pub mod cli;
pub mod game_loop;
pub mod state;

pub use invaders_core as core;
