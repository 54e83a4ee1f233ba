//! Tempo sources. The formation polls the tempo every tick and only ever
//! signals the source one way, through `increase_pitch`.

use invaders_core::config::TempoConfig;

/// Numeric tempo signal consumed by the formation.
pub trait TempoSource {
    /// Current speed multiplier, never negative.
    fn tempo(&self) -> f32;

    /// Number of speed-up events across a full clear. Must be greater than 0.
    fn pitch_step(&self) -> u32;

    /// Raise the tempo by one step.
    fn increase_pitch(&mut self);
}

/// Linear tempo: `base + step_increment * steps`, saturating after
/// `pitch_step` increases.
#[derive(Debug, Clone, PartialEq)]
pub struct SteppedTempo {
    base: f32,
    step_increment: f32,
    pitch_step: u32,
    steps: u32,
}

impl SteppedTempo {
    pub fn new(config: TempoConfig) -> Self {
        Self {
            base: config.base.max(0.0),
            step_increment: config.step_increment,
            pitch_step: config.pitch_step,
            steps: 0,
        }
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }
}

impl Default for SteppedTempo {
    fn default() -> Self {
        Self::new(TempoConfig::default())
    }
}

impl TempoSource for SteppedTempo {
    fn tempo(&self) -> f32 {
        (self.base + self.step_increment * self.steps as f32).max(0.0)
    }

    fn pitch_step(&self) -> u32 {
        self.pitch_step
    }

    fn increase_pitch(&mut self) {
        self.steps = (self.steps + 1).min(self.pitch_step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_tempo_rises_and_saturates() {
        let mut tempo = SteppedTempo::new(TempoConfig {
            pitch_step: 2,
            base: 1.0,
            step_increment: 0.5,
        });
        assert_eq!(tempo.tempo(), 1.0);
        tempo.increase_pitch();
        assert_eq!(tempo.tempo(), 1.5);
        tempo.increase_pitch();
        tempo.increase_pitch();
        assert_eq!(tempo.tempo(), 2.0);
        assert_eq!(tempo.steps(), 2);
    }

    #[test]
    fn test_tempo_never_negative() {
        let mut tempo = SteppedTempo::new(TempoConfig {
            pitch_step: 4,
            base: 0.5,
            step_increment: -1.0,
        });
        tempo.increase_pitch();
        assert_eq!(tempo.tempo(), 0.0);
    }
}
