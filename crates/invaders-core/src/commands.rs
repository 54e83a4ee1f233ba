//! Inbound messages delivered to the simulation.
//!
//! Commands and notifications are queued and applied at well-defined points
//! of the next tick: commands before any system runs, notifications after the
//! spawners have fired.

use serde::{Deserialize, Serialize};

use crate::types::{ProjectileId, SpawnerId};

/// Control commands from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    Pause,
    Resume,
}

/// Collision notifications from the external projectile layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Notification {
    /// A friendly projectile hit the spawner of a column.
    SpawnerHit {
        projectile_id: ProjectileId,
        spawner_id: SpawnerId,
    },
    /// An enemy projectile hit the player's cannon.
    PlayerHit { projectile_id: ProjectileId },
}
