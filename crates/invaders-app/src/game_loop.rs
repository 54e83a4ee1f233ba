//! Game loop drivers.
//!
//! `run_headless` ticks the engine back to back on the calling thread.
//! `spawn_game_loop` runs it at the fixed tick rate on its own thread; the
//! engine is created inside that thread, commands arrive via an `mpsc`
//! channel, and snapshots leave through another one and, optionally, through
//! shared state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{error, info};

use invaders_core::constants::{DT, TICK_RATE};
use invaders_core::state::GameStateSnapshot;
use invaders_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot::Autopilot;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Run up to `max_ticks` ticks as fast as possible, handing every snapshot to
/// `on_snapshot`. Stops early once the game is over. Returns the last snapshot.
pub fn run_headless(
    config: SimConfig,
    mut autopilot: Option<Autopilot>,
    max_ticks: u64,
    mut on_snapshot: impl FnMut(&GameStateSnapshot) -> anyhow::Result<()>,
) -> anyhow::Result<GameStateSnapshot> {
    let mut engine = SimulationEngine::new(config).context("invalid simulation config")?;
    let mut snapshot = engine.snapshot();

    for _ in 0..max_ticks {
        snapshot = engine.tick(DT);
        on_snapshot(&snapshot)?;
        if snapshot.phase.is_over() {
            break;
        }
        if let Some(pilot) = autopilot.as_mut() {
            for notification in pilot.react(&snapshot) {
                engine.queue_notification(notification);
            }
        }
    }

    Ok(snapshot)
}

/// Spawn the fixed-rate game loop in a new thread.
///
/// The configuration is validated before the thread starts. Returns the
/// command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    autopilot: Option<Autopilot>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: Option<Arc<Mutex<Option<GameStateSnapshot>>>>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    config.swarm.validate().context("invalid simulation config")?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("invaders-game-loop".into())
        .spawn(move || {
            run_game_loop(
                config,
                autopilot,
                cmd_rx,
                snapshot_tx,
                latest_snapshot.as_deref(),
            );
        })
        .context("failed to spawn game loop thread")?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the game ends, a Shutdown command arrives, or
/// either channel disconnects.
fn run_game_loop(
    config: SimConfig,
    mut autopilot: Option<Autopilot>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    snapshot_tx: mpsc::Sender<GameStateSnapshot>,
    latest_snapshot: Option<&Mutex<Option<GameStateSnapshot>>>,
) {
    let mut engine = match SimulationEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("failed to start simulation: {e}");
            return;
        }
    };
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Notify(notification)) => {
                    engine.queue_notification(notification)
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(DT);

        // 3. Let the scripted projectile layer respond
        if let Some(pilot) = autopilot.as_mut() {
            for notification in pilot.react(&snapshot) {
                engine.queue_notification(notification);
            }
        }

        // 4. Store latest snapshot for synchronous polling
        if let Some(Ok(mut lock)) = latest_snapshot.map(|slot| slot.lock()) {
            *lock = Some(snapshot.clone());
        }

        // 5. Hand the snapshot to the consumer
        let over = snapshot.phase.is_over();
        if snapshot_tx.send(snapshot).is_err() {
            return;
        }
        if over {
            info!("game loop finished");
            return;
        }

        // 6. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset
            next_tick_time = now;
        }
    }
}
