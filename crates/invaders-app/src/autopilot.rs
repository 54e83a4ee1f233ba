//! Scripted stand-in for the projectile and collision layer.
//!
//! The autopilot reads each snapshot and answers with notifications: a hit on
//! a random live spawner every `hit_every` ticks, and a player hit for each
//! enemy shot with probability `player_hit_chance`.

use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use invaders_core::commands::Notification;
use invaders_core::events::SimEvent;
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::ProjectileId;

#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: ChaCha8Rng,
    hit_every: u64,
    player_hit_chance: f64,
    next_projectile: u32,
}

impl Autopilot {
    pub fn new(seed: u64, hit_every: u64, player_hit_chance: f64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            hit_every,
            player_hit_chance: player_hit_chance.clamp(0.0, 1.0),
            next_projectile: 0,
        }
    }

    /// Notifications to deliver before the next tick.
    pub fn react(&mut self, snapshot: &GameStateSnapshot) -> Vec<Notification> {
        let mut notifications = Vec::new();
        if snapshot.phase.is_over() {
            return notifications;
        }

        for event in &snapshot.events {
            if let SimEvent::ProjectileSpawned { projectile_id, .. } = event {
                if self.rng.gen_bool(self.player_hit_chance) {
                    notifications.push(Notification::PlayerHit {
                        projectile_id: *projectile_id,
                    });
                }
            }
        }

        let due = self.hit_every > 0 && snapshot.time.tick % self.hit_every == 0;
        if due {
            let target = snapshot
                .spawners
                .iter()
                .filter(|s| s.active)
                .choose(&mut self.rng);
            if let Some(spawner) = target {
                notifications.push(Notification::SpawnerHit {
                    projectile_id: ProjectileId(self.next_projectile),
                    spawner_id: spawner.spawner_id,
                });
                self.next_projectile += 1;
            }
        }

        notifications
    }
}
