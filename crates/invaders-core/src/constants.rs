//! Simulation constants and default tuning parameters.
//!
//! Defaults reproduce the classic 5 × 11 arcade layout.

/// Fixed tick rate of the realtime runner (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the fixed tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Formation layout ---

/// Number of invader columns.
pub const DEFAULT_COLUMN_COUNT: usize = 11;

/// Horizontal distance between neighbouring columns.
pub const DEFAULT_X_SPACING: f32 = 16.0;

/// Vertical distance between rows. Also the descent step on each reversal.
pub const DEFAULT_Y_SPACING: f32 = 16.0;

/// Top-left slot position at spawn.
pub const DEFAULT_ORIGIN: (f32, f32) = (-88.0, 100.0);

/// Y of the cannon line. The formation loses once its offset drops below it.
pub const DEFAULT_FLOOR_Y: f32 = -60.0;

// --- Movement ---

/// Horizontal speed at tempo 1.0 (units per second).
pub const DEFAULT_SPEED_FACTOR: f32 = 10.0;

// --- Firing ---

/// Lower bound of a spawner's randomized fire interval (seconds).
pub const DEFAULT_FIRE_MIN_SECS: f32 = 1.0;

/// Upper bound of a spawner's randomized fire interval (seconds).
pub const DEFAULT_FIRE_MAX_SECS: f32 = 4.0;

/// Projectile spawn point relative to the tracked invader.
pub const DEFAULT_MUZZLE_OFFSET: (f32, f32) = (0.0, -6.0);

// --- Tempo ---

/// Number of speed-up events over a full clear.
pub const DEFAULT_PITCH_STEP: u32 = 5;

/// Tempo multiplier at the start of a game.
pub const DEFAULT_BASE_TEMPO: f32 = 1.0;

/// Tempo added by each speed-up event.
pub const DEFAULT_TEMPO_INCREMENT: f32 = 0.25;

// --- Player ---

/// Lives at the start of a game.
pub const DEFAULT_MAX_LIVES: u32 = 3;
