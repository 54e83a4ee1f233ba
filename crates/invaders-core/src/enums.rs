//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    /// Ticks are accepted but do not advance time or state.
    Paused,
    /// Every invader was destroyed.
    Won,
    /// The formation reached the cannon line or the player ran out of lives.
    Lost,
}

impl GamePhase {
    /// Whether the game has ended. Terminal phases never change again.
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost)
    }
}

/// Formation march state held across ticks.
///
/// Descent is instantaneous and therefore never held; it is reported per
/// tick through [`MarchStep::Descended`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarchState {
    #[default]
    AdvancingRight,
    AdvancingLeft,
    Lost,
    Won,
}

impl MarchState {
    /// Whether the formation has stopped for good.
    pub fn is_halted(self) -> bool {
        matches!(self, MarchState::Lost | MarchState::Won)
    }
}

/// Outcome of a single formation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarchStep {
    /// Translated horizontally, direction unchanged.
    Advanced,
    /// Crossed a bound: flipped direction and stepped down one row.
    Descended,
    /// Stepped down below the cannon line. Emitted once.
    ReachedFloor,
    /// Already lost or won; nothing moved.
    Halted,
}

/// Result of recording one kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KillSignal {
    /// Interval threshold reached; the tempo source should raise its pitch.
    SpeedUp,
    /// The last invader died.
    Won,
}
