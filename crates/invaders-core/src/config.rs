//! Formation configuration.
//!
//! Everything the simulation needs is rebuilt from a `SwarmConfig` on every
//! start. Geometry follows the arcade scene: slot `(row, column)` begins at
//! `origin + (column * x_spacing, -row * y_spacing)` and the march spans
//! `2 * x_spacing * column_count` to the right of `origin.x`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::Position;

/// One kind of invader and how many rows of it the formation holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvaderType {
    /// Unique key. Leading and trailing whitespace is ignored.
    pub name: String,
    pub points: u32,
    /// Opaque reference forwarded to the renderer.
    #[serde(default)]
    pub sprite_set: String,
    pub row_count: usize,
}

/// Inclusive range a spawner's fire interval is drawn from (seconds).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireWindow {
    pub min_secs: f32,
    pub max_secs: f32,
}

/// Parameters of the built-in stepped tempo source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoConfig {
    /// Number of speed-up events spread across a full clear.
    pub pitch_step: u32,
    pub base: f32,
    pub step_increment: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    /// Ordered top to bottom.
    pub invader_types: Vec<InvaderType>,
    pub column_count: usize,
    pub x_spacing: f32,
    /// Row spacing and descent step.
    pub y_spacing: f32,
    /// Spawn position of slot (0, 0).
    pub origin: Position,
    /// Cannon line.
    pub floor_y: f32,
    /// Overrides the horizontal march span.
    pub march_width: Option<f32>,
    pub speed_factor: f32,
    pub fire_window: FireWindow,
    pub muzzle_offset: Position,
    pub max_lives: u32,
    pub tempo: TempoConfig,
}

impl InvaderType {
    pub fn new(name: impl Into<String>, points: u32, row_count: usize) -> Self {
        Self {
            name: name.into(),
            points,
            sprite_set: String::new(),
            row_count,
        }
    }

    /// Lookup key for the points table.
    pub fn key(&self) -> &str {
        self.name.trim()
    }
}

impl FireWindow {
    pub fn new(min_secs: f32, max_secs: f32) -> Self {
        Self { min_secs, max_secs }
    }
}

impl Default for FireWindow {
    fn default() -> Self {
        Self::new(DEFAULT_FIRE_MIN_SECS, DEFAULT_FIRE_MAX_SECS)
    }
}

impl Default for TempoConfig {
    fn default() -> Self {
        Self {
            pitch_step: DEFAULT_PITCH_STEP,
            base: DEFAULT_BASE_TEMPO,
            step_increment: DEFAULT_TEMPO_INCREMENT,
        }
    }
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            invader_types: vec![
                InvaderType::new("Squid", 30, 1),
                InvaderType::new("Crab", 20, 2),
                InvaderType::new("Octopus", 10, 2),
            ],
            column_count: DEFAULT_COLUMN_COUNT,
            x_spacing: DEFAULT_X_SPACING,
            y_spacing: DEFAULT_Y_SPACING,
            origin: Position::new(DEFAULT_ORIGIN.0, DEFAULT_ORIGIN.1),
            floor_y: DEFAULT_FLOOR_Y,
            march_width: None,
            speed_factor: DEFAULT_SPEED_FACTOR,
            fire_window: FireWindow::default(),
            muzzle_offset: Position::new(DEFAULT_MUZZLE_OFFSET.0, DEFAULT_MUZZLE_OFFSET.1),
            max_lives: DEFAULT_MAX_LIVES,
            tempo: TempoConfig::default(),
        }
    }
}

impl SwarmConfig {
    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SwarmConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Total rows contributed by all invader types.
    pub fn row_count(&self) -> usize {
        self.invader_types.iter().map(|t| t.row_count).sum()
    }

    pub fn total_units(&self) -> usize {
        self.row_count() * self.column_count
    }

    /// Left march bound.
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    /// Right march bound.
    pub fn max_x(&self) -> f32 {
        let span = self
            .march_width
            .unwrap_or(2.0 * self.x_spacing * self.column_count as f32);
        self.min_x() + span
    }

    /// Spawn position of a slot.
    pub fn slot_origin(&self, row: usize, column: usize) -> Position {
        self.origin + Position::new(column as f32 * self.x_spacing, -(row as f32) * self.y_spacing)
    }

    /// Reject configurations the simulation cannot start from.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.column_count == 0 {
            return Err(ConfigError::NoColumns);
        }
        if self.row_count() == 0 {
            return Err(ConfigError::NoRows);
        }

        self.check_finite()?;

        let FireWindow { min_secs, max_secs } = self.fire_window;
        if min_secs > max_secs {
            return Err(ConfigError::FireWindowInverted {
                min: min_secs,
                max: max_secs,
            });
        }
        if min_secs < 0.0 {
            return Err(ConfigError::NegativeFireWindow {
                min: min_secs,
                max: max_secs,
            });
        }

        if self.tempo.pitch_step == 0 {
            return Err(ConfigError::ZeroPitchStep);
        }
        if self.y_spacing <= 0.0 {
            return Err(ConfigError::InvalidYSpacing(self.y_spacing));
        }
        if let Some(width) = self.march_width {
            if width <= 0.0 {
                return Err(ConfigError::InvalidMarchWidth(width));
            }
        }

        let mut seen = HashSet::new();
        for (index, invader_type) in self.invader_types.iter().enumerate() {
            let key = invader_type.key();
            if key.is_empty() {
                return Err(ConfigError::EmptyTypeName { index });
            }
            if !seen.insert(key) {
                return Err(ConfigError::DuplicateTypeName(key.to_string()));
            }
        }

        Ok(())
    }

    fn check_finite(&self) -> Result<(), ConfigError> {
        let fields = [
            ("fire_window.min_secs", self.fire_window.min_secs),
            ("fire_window.max_secs", self.fire_window.max_secs),
            ("speed_factor", self.speed_factor),
            ("x_spacing", self.x_spacing),
            ("y_spacing", self.y_spacing),
            ("origin.x", self.origin.x),
            ("origin.y", self.origin.y),
            ("floor_y", self.floor_y),
            ("march_width", self.march_width.unwrap_or(0.0)),
            ("muzzle_offset.x", self.muzzle_offset.x),
            ("muzzle_offset.y", self.muzzle_offset.y),
            ("tempo.base", self.tempo.base),
            ("tempo.step_increment", self.tempo.step_increment),
        ];
        match fields.into_iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(ConfigError::NonFinite { field }),
            None => Ok(()),
        }
    }
}
