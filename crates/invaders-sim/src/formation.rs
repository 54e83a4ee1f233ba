//! Formation controller: marches the grid as one rigid body.
//!
//! The controller owns the [`Grid`] and is its only mutator. `current_x` and
//! `current_y` track the displacement of the whole rectangle, so dead units
//! never shrink the bounds the formation reverses at.

use tracing::debug;

use invaders_core::config::SwarmConfig;
use invaders_core::enums::{MarchState, MarchStep};
use invaders_core::types::{Position, UnitId};

use crate::grid::Grid;

/// Horizontal and vertical march bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormationState {
    pub current_x: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub current_y: f32,
    /// Cannon line. Dropping below it loses the game.
    pub min_y: f32,
    pub moving_right: bool,
}

impl FormationState {
    /// Start at the left bound moving right.
    pub fn new(min_x: f32, max_x: f32, current_y: f32, min_y: f32) -> Self {
        Self {
            current_x: min_x,
            min_x,
            max_x,
            current_y,
            min_y,
            moving_right: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Formation {
    grid: Grid,
    state: FormationState,
    march: MarchState,
    speed_factor: f32,
    y_step: f32,
}

impl Formation {
    pub fn new(grid: Grid, state: FormationState, speed_factor: f32, y_step: f32) -> Self {
        let march = if state.moving_right {
            MarchState::AdvancingRight
        } else {
            MarchState::AdvancingLeft
        };
        Self {
            grid,
            state,
            march,
            speed_factor,
            y_step,
        }
    }

    /// Build the grid and bounds from a validated configuration.
    pub fn from_config(config: &SwarmConfig) -> Self {
        let state = FormationState::new(
            config.min_x(),
            config.max_x(),
            config.origin.y,
            config.floor_y,
        );
        Self::new(
            Grid::from_config(config),
            state,
            config.speed_factor,
            config.y_spacing,
        )
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &FormationState {
        &self.state
    }

    pub fn march(&self) -> MarchState {
        self.march
    }

    pub fn y_step(&self) -> f32 {
        self.y_step
    }

    /// Advance one tick at the given tempo.
    pub fn tick(&mut self, tempo: f32, dt: f32) -> MarchStep {
        if self.march.is_halted() {
            return MarchStep::Halted;
        }

        let displacement = self.speed_factor * tempo * dt;
        if self.state.moving_right {
            self.state.current_x += displacement;
            if self.state.current_x < self.state.max_x {
                self.grid.translate(Position::new(displacement, 0.0));
                return MarchStep::Advanced;
            }
        } else {
            self.state.current_x -= displacement;
            if self.state.current_x > self.state.min_x {
                self.grid.translate(Position::new(-displacement, 0.0));
                return MarchStep::Advanced;
            }
        }

        self.descend()
    }

    /// Reverse and step down one row.
    fn descend(&mut self) -> MarchStep {
        self.state.moving_right = !self.state.moving_right;
        self.grid.translate(Position::new(0.0, -self.y_step));
        self.state.current_y -= self.y_step;

        if self.state.current_y < self.state.min_y {
            self.march = MarchState::Lost;
            return MarchStep::ReachedFloor;
        }

        self.march = if self.state.moving_right {
            MarchState::AdvancingRight
        } else {
            MarchState::AdvancingLeft
        };
        debug!(
            current_x = self.state.current_x,
            current_y = self.state.current_y,
            moving_right = self.state.moving_right,
            "formation descended"
        );
        MarchStep::Descended
    }

    /// Kill the unit in a slot.
    pub fn mark_dead(&mut self, row: usize, column: usize) -> Option<UnitId> {
        self.grid.mark_dead(row, column)
    }

    /// Stop marching for good. Ignored once already halted.
    pub fn halt(&mut self, outcome: MarchState) {
        if !self.march.is_halted() && outcome.is_halted() {
            self.march = outcome;
        }
    }
}
