//! Simulation engine.
//!
//! `SimulationEngine` owns the formation, one spawner per column, the kill
//! tracker, and the scoreboard. Each tick runs, in order: queued commands, the
//! formation march, every spawner in column order, then the collision
//! notifications delivered since the previous tick. Once the game is won or
//! lost every further tick is a no-op.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use invaders_core::commands::{Notification, SimCommand};
use invaders_core::config::SwarmConfig;
use invaders_core::enums::{GamePhase, KillSignal, MarchState, MarchStep};
use invaders_core::error::ConfigError;
use invaders_core::events::SimEvent;
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::{ProjectileId, SimTime, SpawnerId};

use crate::formation::Formation;
use crate::kill_tracker::KillTracker;
use crate::scoreboard::Scoreboard;
use crate::snapshot;
use crate::spawner::ColumnSpawner;
use crate::tempo::{SteppedTempo, TempoSource};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub swarm: SwarmConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            swarm: SwarmConfig::default(),
        }
    }
}

pub struct SimulationEngine {
    formation: Formation,
    spawners: Vec<ColumnSpawner>,
    kill_tracker: KillTracker,
    scoreboard: Scoreboard,
    tempo: Box<dyn TempoSource>,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    next_projectile_id: u32,
    command_queue: VecDeque<SimCommand>,
    notifications: VecDeque<Notification>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine driven by the built-in stepped tempo.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        let tempo = SteppedTempo::new(config.swarm.tempo);
        Self::with_tempo(config, Box::new(tempo))
    }

    /// Create an engine driven by an external tempo source.
    pub fn with_tempo(config: SimConfig, tempo: Box<dyn TempoSource>) -> Result<Self, ConfigError> {
        let swarm = config.swarm;
        swarm.validate()?;
        if tempo.pitch_step() == 0 {
            return Err(ConfigError::ZeroPitchStep);
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let formation = Formation::from_config(&swarm);
        let spawners = (0..swarm.column_count)
            .map(|column| {
                ColumnSpawner::setup(
                    column,
                    formation.grid(),
                    swarm.fire_window,
                    swarm.muzzle_offset,
                    &mut rng,
                )
            })
            .collect();

        Ok(Self {
            kill_tracker: KillTracker::from_config(&swarm, tempo.pitch_step()),
            scoreboard: Scoreboard::new(swarm.max_lives),
            formation,
            spawners,
            tempo,
            time: SimTime::default(),
            phase: GamePhase::Active,
            rng,
            next_projectile_id: 0,
            command_queue: VecDeque::new(),
            notifications: VecDeque::new(),
            events: Vec::new(),
        })
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue a collision notification, resolved after the spawners of the
    /// next tick have run.
    pub fn queue_notification(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
    }

    /// A friendly projectile collided with a spawner.
    pub fn notify_collision(&mut self, projectile_id: ProjectileId, spawner_id: SpawnerId) {
        self.queue_notification(Notification::SpawnerHit {
            projectile_id,
            spawner_id,
        });
    }

    /// An enemy projectile collided with the player's cannon.
    pub fn notify_player_hit(&mut self, projectile_id: ProjectileId) {
        self.queue_notification(Notification::PlayerHit { projectile_id });
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }
        if self.phase.is_over() {
            self.notifications.clear();
        }

        let events = std::mem::take(&mut self.events);
        self.build_snapshot(events)
    }

    /// Current visible state without advancing.
    pub fn snapshot(&self) -> GameStateSnapshot {
        self.build_snapshot(Vec::new())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn spawners(&self) -> &[ColumnSpawner] {
        &self.spawners
    }

    pub fn spawner(&self, id: SpawnerId) -> Option<&ColumnSpawner> {
        self.spawners.get(id.column())
    }

    /// Spawners that can still fire or be hit.
    pub fn active_spawners(&self) -> impl Iterator<Item = &ColumnSpawner> {
        self.spawners.iter().filter(|s| s.is_active())
    }

    pub fn kill_tracker(&self) -> &KillTracker {
        &self.kill_tracker
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn tempo(&self) -> f32 {
        self.tempo.tempo()
    }

    fn build_snapshot(&self, events: Vec<SimEvent>) -> GameStateSnapshot {
        snapshot::build_snapshot(
            &self.time,
            self.phase,
            &self.formation,
            &self.spawners,
            &self.kill_tracker,
            &self.scoreboard,
            self.tempo.tempo(),
            events,
        )
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                SimCommand::Pause => {
                    if self.phase == GamePhase::Active {
                        self.phase = GamePhase::Paused;
                    }
                }
                SimCommand::Resume => {
                    if self.phase == GamePhase::Paused {
                        self.phase = GamePhase::Active;
                    }
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Formation march (establishes positions)
        match self.formation.tick(self.tempo.tempo(), dt) {
            MarchStep::ReachedFloor => {
                self.end_game(GamePhase::Lost);
                return;
            }
            MarchStep::Advanced | MarchStep::Descended | MarchStep::Halted => {}
        }

        // 2. Spawners (read positions, may fire)
        for spawner in &mut self.spawners {
            let Some(shot) = spawner.tick(dt, self.formation.grid(), &mut self.rng) else {
                continue;
            };
            let projectile_id = ProjectileId(self.next_projectile_id);
            self.next_projectile_id += 1;
            self.events.push(SimEvent::ProjectileSpawned {
                projectile_id,
                spawner_id: shot.spawner_id,
                position: shot.position,
            });
            self.events.push(SimEvent::ShotFired {
                spawner_id: shot.spawner_id,
            });
        }

        // 3. Collision notifications
        while let Some(notification) = self.notifications.pop_front() {
            match notification {
                Notification::SpawnerHit {
                    projectile_id,
                    spawner_id,
                } => self.resolve_spawner_hit(projectile_id, spawner_id),
                Notification::PlayerHit { projectile_id } => {
                    self.resolve_player_hit(projectile_id)
                }
            }
            if self.phase.is_over() {
                break;
            }
        }
    }

    fn resolve_spawner_hit(&mut self, projectile_id: ProjectileId, spawner_id: SpawnerId) {
        let Some(spawner) = self.spawners.get_mut(spawner_id.column()) else {
            warn!(spawner = spawner_id.0, "collision with unknown spawner ignored");
            return;
        };
        if !spawner.is_active() {
            debug!(spawner = spawner_id.0, "collision with inactive spawner ignored");
            return;
        }

        let Some(kill) = spawner.on_projectile_hit(self.formation.grid(), &mut self.rng) else {
            return;
        };
        let type_name = self.formation.grid().type_name(kill.type_id).unwrap_or_default();
        let points = self.kill_tracker.points(type_name);
        let total = self.scoreboard.add(points);
        self.formation.mark_dead(kill.row, kill.column);
        debug!(
            projectile = projectile_id.0,
            unit = kill.unit.0,
            row = kill.row,
            column = kill.column,
            points,
            "invader destroyed"
        );

        self.events.push(SimEvent::Explosion {
            position: kill.position,
        });
        self.events.push(SimEvent::ScoreAdded { points, total });

        match self.kill_tracker.record_kill() {
            Some(KillSignal::SpeedUp) => {
                self.tempo.increase_pitch();
                let tempo = self.tempo.tempo();
                debug!(tempo, "formation sped up");
                self.events.push(SimEvent::SpeedUp { tempo });
            }
            Some(KillSignal::Won) => self.end_game(GamePhase::Won),
            None => {}
        }
    }

    fn resolve_player_hit(&mut self, projectile_id: ProjectileId) {
        let remaining = self.scoreboard.lose_life();
        debug!(projectile = projectile_id.0, remaining, "player hit");
        self.events.push(SimEvent::LifeLost { remaining });
        if remaining == 0 {
            self.end_game(GamePhase::Lost);
        }
    }

    /// Enter a terminal phase. Emits `GameOver` once.
    fn end_game(&mut self, outcome: GamePhase) {
        if self.phase.is_over() {
            return;
        }
        let (march, failure) = match outcome {
            GamePhase::Won => (MarchState::Won, false),
            _ => (MarchState::Lost, true),
        };
        self.formation.halt(march);
        self.phase = outcome;
        info!(
            phase = ?outcome,
            kills = self.kill_tracker.total_kills(),
            score = self.scoreboard.score(),
            tick = self.time.tick,
            "game over"
        );
        self.events.push(SimEvent::GameOver { failure });
    }
}
