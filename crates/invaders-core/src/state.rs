//! Game state snapshot: the complete visible state produced by each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, MarchState};
use crate::events::SimEvent;
use crate::types::{Position, SimTime, SpawnerId, UnitId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub formation: FormationView,
    pub invaders: Vec<InvaderView>,
    pub spawners: Vec<SpawnerView>,
    pub score: ScoreView,
    /// Current tempo multiplier of the formation.
    pub tempo: f32,
    /// Events emitted during this tick, in emission order.
    pub events: Vec<SimEvent>,
}

/// Rigid-body state of the formation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormationView {
    pub march: MarchState,
    pub current_x: f32,
    pub current_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
}

/// A surviving invader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvaderView {
    pub unit: UnitId,
    pub row: usize,
    pub column: usize,
    pub type_name: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnerView {
    pub spawner_id: SpawnerId,
    /// Row of the tracked invader, `None` once the column is exhausted.
    pub current_row: Option<usize>,
    pub position: Position,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub lives: u32,
    pub kills: u32,
    pub total_units: u32,
}
