//! Messages and summaries shared between the runner and the game loop thread.

use serde::Serialize;

use invaders_core::commands::{Notification, SimCommand};
use invaders_core::enums::GamePhase;
use invaders_core::state::GameStateSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A control command to forward to the simulation engine.
    Command(SimCommand),
    /// A collision notification from outside the loop.
    Notify(Notification),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Final report printed when a run ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub phase: GamePhase,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub score: u32,
    pub kills: u32,
    pub total_units: u32,
    pub lives: u32,
}

impl RunSummary {
    pub fn from_snapshot(snapshot: &GameStateSnapshot) -> Self {
        Self {
            phase: snapshot.phase,
            ticks: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            score: snapshot.score.score,
            kills: snapshot.score.kills,
            total_units: snapshot.score.total_units,
            lives: snapshot.score.lives,
        }
    }
}
