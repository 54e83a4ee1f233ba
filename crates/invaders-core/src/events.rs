//! One-way events emitted by the simulation for audio, VFX, and UI sinks.
//!
//! Events are collected during a tick and drained into that tick's snapshot.

use serde::{Deserialize, Serialize};

use crate::types::{Position, ProjectileId, SpawnerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A spawner launched an enemy projectile.
    ProjectileSpawned {
        projectile_id: ProjectileId,
        spawner_id: SpawnerId,
        position: Position,
    },
    /// Play the shot cue.
    ShotFired { spawner_id: SpawnerId },
    /// Play an explosion at a destroyed invader.
    Explosion { position: Position },
    /// Add points to the score display.
    ScoreAdded { points: u32, total: u32 },
    /// The player's cannon was hit.
    LifeLost { remaining: u32 },
    /// Kill interval reached; the music should speed up.
    SpeedUp { tempo: f32 },
    /// End of game. `failure` is false when the swarm was cleared.
    GameOver { failure: bool },
}
