//! Command-line interface of the headless runner.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use invaders_core::commands::SimCommand;
use invaders_core::config::SwarmConfig;
use invaders_core::state::GameStateSnapshot;
use invaders_sim::engine::SimConfig;

use crate::autopilot::Autopilot;
use crate::game_loop;
use crate::state::{GameLoopCommand, RunSummary};

#[derive(Debug, Parser)]
#[command(name = "invaders", about = "Run the invaders formation simulation headless")]
pub struct Args {
    /// JSON formation config. Missing fields take the arcade defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RNG seed for the simulation and the autopilot.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 36_000)]
    pub ticks: u64,

    /// Tick at the fixed 60 Hz rate on a game loop thread.
    #[arg(long)]
    pub realtime: bool,

    /// Hit a random live spawner every N ticks. 0 disables.
    #[arg(long, default_value_t = 30)]
    pub hit_every: u64,

    /// Probability that an enemy shot hits the player.
    #[arg(long, default_value_t = 0.02)]
    pub player_hit_chance: f64,

    /// Pause the realtime loop once this tick is reached.
    #[arg(long, requires = "realtime")]
    pub pause_at: Option<u64>,

    /// How long a `--pause-at` pause lasts, in seconds.
    #[arg(long, default_value_t = 1.0)]
    pub pause_secs: f64,

    /// Turn off the autopilot; nothing collides.
    #[arg(long)]
    pub no_autopilot: bool,

    /// What to print on stdout.
    #[arg(long, value_enum, default_value_t = Emit::Summary)]
    pub emit: Emit,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// One JSON summary line when the run ends.
    Summary,
    /// One JSON snapshot line per tick, then the summary.
    Snapshots,
}

/// A single pause of the realtime loop: `Pause` once `at_tick` is reached,
/// `Resume` after `duration` of wall-clock time has passed.
#[derive(Debug, Clone, Copy)]
pub struct PauseSchedule {
    at_tick: u64,
    duration: Duration,
    started: Option<Instant>,
    finished: bool,
}

impl PauseSchedule {
    pub fn new(at_tick: u64, duration: Duration) -> Self {
        Self {
            at_tick,
            duration,
            started: None,
            finished: false,
        }
    }

    /// Command to send after seeing a snapshot at `tick`.
    pub fn poll(&mut self, tick: u64, now: Instant) -> Option<SimCommand> {
        if self.finished {
            return None;
        }
        match self.started {
            None if tick >= self.at_tick => {
                self.started = Some(now);
                Some(SimCommand::Pause)
            }
            Some(start) if now.duration_since(start) >= self.duration => {
                self.finished = true;
                Some(SimCommand::Resume)
            }
            _ => None,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<SwarmConfig> {
    let Some(path) = path else {
        return Ok(SwarmConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    SwarmConfig::from_json(&json).with_context(|| format!("invalid config {}", path.display()))
}

pub fn run(args: Args) -> Result<()> {
    let swarm = load_config(args.config.as_deref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.print_config {
        serde_json::to_writer_pretty(&mut out, &swarm)?;
        writeln!(out)?;
        return Ok(());
    }

    let config = SimConfig {
        seed: args.seed,
        swarm,
    };
    let autopilot = (!args.no_autopilot)
        .then(|| Autopilot::new(args.seed, args.hit_every, args.player_hit_chance));
    info!(
        seed = args.seed,
        ticks = args.ticks,
        realtime = args.realtime,
        "starting simulation"
    );

    let pause = args
        .pause_at
        .map(|tick| -> Result<PauseSchedule> {
            let duration = Duration::try_from_secs_f64(args.pause_secs)
                .context("--pause-secs must be a non-negative number of seconds")?;
            Ok(PauseSchedule::new(tick, duration))
        })
        .transpose()?;
    if pause.is_some() && !args.realtime {
        warn!("--pause-at only applies to --realtime runs");
    }

    let emit = args.emit;
    let last = {
        let mut write_snapshot = |snapshot: &GameStateSnapshot| -> Result<()> {
            if emit == Emit::Snapshots {
                serde_json::to_writer(&mut out, snapshot)?;
                writeln!(out)?;
            }
            Ok(())
        };
        if args.realtime {
            run_realtime(config, autopilot, args.ticks, pause, &mut write_snapshot)?
        } else {
            game_loop::run_headless(config, autopilot, args.ticks, &mut write_snapshot)?
        }
    };

    let summary = RunSummary::from_snapshot(&last);
    info!(phase = ?summary.phase, score = summary.score, ticks = summary.ticks, "run finished");
    serde_json::to_writer(&mut out, &summary)?;
    writeln!(out)?;
    Ok(())
}

fn run_realtime(
    config: SimConfig,
    autopilot: Option<Autopilot>,
    max_ticks: u64,
    mut pause: Option<PauseSchedule>,
    on_snapshot: &mut impl FnMut(&GameStateSnapshot) -> Result<()>,
) -> Result<GameStateSnapshot> {
    let (snapshot_tx, snapshot_rx) = mpsc::channel();
    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, autopilot, snapshot_tx, None)?;

    // Paused snapshots repeat the same tick, so the limit is on simulated ticks.
    let mut last = None;
    for snapshot in snapshot_rx.iter() {
        on_snapshot(&snapshot)?;
        let tick = snapshot.time.tick;
        last = Some(snapshot);
        if tick >= max_ticks {
            break;
        }
        if let Some(command) = pause.as_mut().and_then(|p| p.poll(tick, Instant::now())) {
            info!(?command, tick, "pause schedule");
            if cmd_tx.send(GameLoopCommand::Command(command)).is_err() {
                break;
            }
        }
    }

    // The loop may already have exited after a game over.
    let _ = cmd_tx.send(GameLoopCommand::Shutdown);
    drop(snapshot_rx);
    handle
        .join()
        .map_err(|_| anyhow::anyhow!("game loop thread panicked"))?;

    last.context("game loop produced no snapshots")
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::enums::GamePhase;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["invaders"]).unwrap();
        assert_eq!(args.seed, 42);
        assert_eq!(args.hit_every, 30);
        assert_eq!(args.emit, Emit::Summary);
        assert!(!args.realtime);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "invaders",
            "--seed",
            "7",
            "--ticks",
            "100",
            "--emit",
            "snapshots",
            "--no-autopilot",
        ])
        .unwrap();
        assert_eq!(args.seed, 7);
        assert_eq!(args.ticks, 100);
        assert_eq!(args.emit, Emit::Snapshots);
        assert!(args.no_autopilot);
    }

    #[test]
    fn test_pause_at_requires_realtime() {
        assert!(Args::try_parse_from(["invaders", "--pause-at", "10"]).is_err());
        let args =
            Args::try_parse_from(["invaders", "--realtime", "--pause-at", "10"]).unwrap();
        assert_eq!(args.pause_at, Some(10));
        assert_eq!(args.pause_secs, 1.0);
    }

    #[test]
    fn test_pause_schedule_pauses_then_resumes_once() {
        let start = Instant::now();
        let mut schedule = PauseSchedule::new(3, Duration::from_millis(100));

        assert_eq!(schedule.poll(1, start), None);
        assert_eq!(schedule.poll(3, start), Some(SimCommand::Pause));
        // Ticks stay put while paused.
        assert_eq!(schedule.poll(3, start + Duration::from_millis(50)), None);
        assert_eq!(
            schedule.poll(3, start + Duration::from_millis(100)),
            Some(SimCommand::Resume)
        );
        assert_eq!(schedule.poll(4, start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_realtime_run_pauses_and_finishes() {
        let config = SimConfig {
            seed: 3,
            swarm: SwarmConfig::default(),
        };
        let pause = PauseSchedule::new(2, Duration::from_millis(50));
        let mut phases = Vec::new();
        let last = run_realtime(config, None, 6, Some(pause), &mut |snapshot| {
            phases.push(snapshot.phase);
            Ok(())
        })
        .unwrap();

        assert_eq!(last.time.tick, 6);
        assert!(phases.contains(&GamePhase::Paused));
        assert_eq!(last.phase, GamePhase::Active);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/invaders.json"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }

    #[test]
    fn test_no_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), SwarmConfig::default());
    }
}
