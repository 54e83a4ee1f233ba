//! Fundamental identifier and simulation-time types.

use serde::{Deserialize, Serialize};

/// World-space position (x = right, y = up). Re-exported so downstream
/// crates do not need to name `glam` directly.
pub use glam::Vec2 as Position;

/// Identifier of one invader, assigned row-major at grid construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Identifier of a column spawner. Equal to the column index it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpawnerId(pub u32);

/// Identifier of a projectile. Enemy projectiles are numbered by the engine;
/// friendly projectile ids come from the external projectile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks that advanced the simulation.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SpawnerId {
    /// Column index served by this spawner.
    pub fn column(self) -> usize {
        self.0 as usize
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
