//! Kill bookkeeping: win detection, speed-up intervals, and points lookup.

use std::collections::HashMap;

use tracing::warn;

use invaders_core::config::SwarmConfig;
use invaders_core::enums::KillSignal;

#[derive(Debug, Clone)]
pub struct KillTracker {
    total_kills: u32,
    total_units: u32,
    interval_kills: u32,
    pitch_step: u32,
    points: HashMap<String, u32>,
    won: bool,
}

impl KillTracker {
    pub fn new(total_units: u32, pitch_step: u32, points: HashMap<String, u32>) -> Self {
        Self {
            total_kills: 0,
            total_units,
            interval_kills: 0,
            pitch_step: pitch_step.max(1),
            points,
            won: false,
        }
    }

    /// Points table keyed by trimmed type name.
    pub fn from_config(config: &SwarmConfig, pitch_step: u32) -> Self {
        let points = config
            .invader_types
            .iter()
            .map(|t| (t.key().to_string(), t.points))
            .collect();
        Self::new(config.total_units() as u32, pitch_step, points)
    }

    /// Count one kill. Returns `Won` exactly once, on the kill that empties
    /// the formation; later kills are ignored.
    pub fn record_kill(&mut self) -> Option<KillSignal> {
        if self.won {
            return None;
        }

        self.total_kills += 1;
        if self.total_kills >= self.total_units {
            self.won = true;
            return Some(KillSignal::Won);
        }

        self.interval_kills += 1;
        if self.interval_kills < self.interval_threshold() {
            return None;
        }
        self.interval_kills = 0;
        Some(KillSignal::SpeedUp)
    }

    /// Points for a unit type. Unknown names score nothing.
    pub fn points(&self, type_name: &str) -> u32 {
        match self.points.get(type_name) {
            Some(points) => *points,
            None => {
                warn!(type_name, "no points configured for invader type");
                0
            }
        }
    }

    /// Kills between speed-ups.
    pub fn interval_threshold(&self) -> u32 {
        self.total_units / self.pitch_step
    }

    pub fn total_kills(&self) -> u32 {
        self.total_kills
    }

    pub fn total_units(&self) -> u32 {
        self.total_units
    }

    pub fn interval_kills(&self) -> u32 {
        self.interval_kills
    }

    pub fn is_won(&self) -> bool {
        self.won
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(total_units: u32, pitch_step: u32) -> KillTracker {
        let points = HashMap::from([("Crab".to_string(), 20), ("Squid".to_string(), 30)]);
        KillTracker::new(total_units, pitch_step, points)
    }

    #[test]
    fn test_speed_up_every_eleven_of_fifty_five() {
        let mut t = tracker(55, 5);
        assert_eq!(t.interval_threshold(), 11);

        for _ in 0..10 {
            assert_eq!(t.record_kill(), None);
        }
        assert_eq!(t.interval_kills(), 10);
        assert_eq!(t.record_kill(), Some(KillSignal::SpeedUp));
        assert_eq!(t.interval_kills(), 0);
        assert_eq!(t.total_kills(), 11);
    }

    #[test]
    fn test_won_on_last_kill_only() {
        let mut t = tracker(55, 5);
        let mut signals = Vec::new();
        for _ in 0..54 {
            signals.push(t.record_kill());
        }
        assert!(!signals.contains(&Some(KillSignal::Won)));
        assert_eq!(
            signals.iter().filter(|s| **s == Some(KillSignal::SpeedUp)).count(),
            4
        );

        assert_eq!(t.record_kill(), Some(KillSignal::Won));
        assert!(t.is_won());
        // Further kills neither win again nor count.
        assert_eq!(t.record_kill(), None);
        assert_eq!(t.total_kills(), 55);
    }

    #[test]
    fn test_win_skips_interval_logic() {
        // Threshold 2: the final kill would also complete an interval.
        let mut t = tracker(4, 2);
        assert_eq!(t.record_kill(), None);
        assert_eq!(t.record_kill(), Some(KillSignal::SpeedUp));
        assert_eq!(t.record_kill(), None);
        assert_eq!(t.record_kill(), Some(KillSignal::Won));
        assert_eq!(t.interval_kills(), 1);
    }

    #[test]
    fn test_pitch_step_above_total_speeds_up_every_kill() {
        let mut t = tracker(3, 10);
        assert_eq!(t.interval_threshold(), 0);
        assert_eq!(t.record_kill(), Some(KillSignal::SpeedUp));
        assert_eq!(t.record_kill(), Some(KillSignal::SpeedUp));
        assert_eq!(t.record_kill(), Some(KillSignal::Won));
    }

    #[test]
    fn test_points_lookup() {
        let t = tracker(10, 2);
        assert_eq!(t.points("Crab"), 20);
        assert_eq!(t.points("Squid"), 30);
        assert_eq!(t.points("unknown-name"), 0);
        assert_eq!(t.points(""), 0);
    }

    #[test]
    fn test_from_config_trims_names() {
        let config = SwarmConfig {
            invader_types: vec![invaders_core::config::InvaderType::new("  Octopus ", 10, 2)],
            column_count: 4,
            ..Default::default()
        };
        let t = KillTracker::from_config(&config, 2);
        assert_eq!(t.total_units(), 8);
        assert_eq!(t.points("Octopus"), 10);
        assert_eq!(t.interval_threshold(), 4);
    }
}
