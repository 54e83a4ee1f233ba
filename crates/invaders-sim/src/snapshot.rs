//! Builds the read-only `GameStateSnapshot` from engine state.

use invaders_core::enums::GamePhase;
use invaders_core::events::SimEvent;
use invaders_core::state::*;
use invaders_core::types::SimTime;

use crate::formation::Formation;
use crate::kill_tracker::KillTracker;
use crate::scoreboard::Scoreboard;
use crate::spawner::ColumnSpawner;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    time: &SimTime,
    phase: GamePhase,
    formation: &Formation,
    spawners: &[ColumnSpawner],
    kill_tracker: &KillTracker,
    scoreboard: &Scoreboard,
    tempo: f32,
    events: Vec<SimEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        formation: build_formation(formation),
        invaders: build_invaders(formation),
        spawners: spawners.iter().map(build_spawner).collect(),
        score: ScoreView {
            score: scoreboard.score(),
            lives: scoreboard.lives(),
            kills: kill_tracker.total_kills(),
            total_units: kill_tracker.total_units(),
        },
        tempo,
        events,
    }
}

fn build_formation(formation: &Formation) -> FormationView {
    let state = formation.state();
    FormationView {
        march: formation.march(),
        current_x: state.current_x,
        current_y: state.current_y,
        min_x: state.min_x,
        max_x: state.max_x,
        min_y: state.min_y,
    }
}

fn build_invaders(formation: &Formation) -> Vec<InvaderView> {
    let grid = formation.grid();
    grid.alive()
        .map(|u| InvaderView {
            unit: u.unit,
            row: u.row,
            column: u.column,
            type_name: grid.type_name(u.type_id).unwrap_or_default().to_string(),
            position: u.position,
        })
        .collect()
}

fn build_spawner(spawner: &ColumnSpawner) -> SpawnerView {
    SpawnerView {
        spawner_id: spawner.id(),
        current_row: spawner.current_row(),
        position: spawner.position(),
        active: spawner.is_active(),
    }
}
