use invaders_core::constants::DT;
use invaders_core::events::SimEvent;
use invaders_core::types::{ProjectileId, SpawnerId};
use invaders_sim::{SimConfig, SimulationEngine};

/// Scripted play: every enemy shot from an odd column is answered with a
/// hit on that column, and every fifth shot hits the player.
fn run_scenario(seed: u64, ticks: u64) -> String {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    })
    .unwrap();

    let mut next_friendly = 0;
    let mut last_snapshot = engine.tick(DT);
    for _ in 1..ticks {
        for event in &last_snapshot.events {
            if let SimEvent::ProjectileSpawned {
                projectile_id,
                spawner_id,
                ..
            } = event
            {
                if spawner_id.0 % 2 == 1 {
                    engine.notify_collision(ProjectileId(next_friendly), *spawner_id);
                    next_friendly += 1;
                }
                if projectile_id.0 % 5 == 4 {
                    engine.notify_player_hit(*projectile_id);
                }
            }
        }
        last_snapshot = engine.tick(DT);
    }

    serde_json::to_string(&last_snapshot).unwrap()
}

#[test]
fn identical_conditions_produce_identical_snapshots() {
    let run1 = run_scenario(7, 240);
    let run2 = run_scenario(7, 240);

    assert_eq!(
        run1, run2,
        "Two identical simulation runs must produce byte-identical snapshots"
    );
}

#[test]
fn determinism_over_longer_run() {
    let run1 = run_scenario(7, 1_800);
    let run2 = run_scenario(7, 1_800);

    assert_eq!(run1, run2, "Determinism must hold over 1800 ticks (30 seconds)");
}

#[test]
fn direct_hits_on_exhausted_columns_are_ignored() {
    let mut engine = SimulationEngine::new(SimConfig::default()).unwrap();
    for hit in 0..20 {
        engine.notify_collision(ProjectileId(hit), SpawnerId(0));
    }
    let snapshot = engine.tick(DT);

    let explosions = snapshot
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::Explosion { .. }))
        .count();
    assert_eq!(explosions, 5);
    assert_eq!(snapshot.score.kills, 5);
    assert_eq!(snapshot.spawners[0].current_row, None);
    assert!(!snapshot.spawners[0].active);
}
