//! Race configuration
//!
//! Every tunable of a match lives here. Defaults reproduce the classic
//! 1920x900 board; a JSON file can override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::odd_floor;

/// Match configuration (startup constants)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    // === Board ===
    /// Playfield width in pixels
    pub canvas_width: u32,
    /// Playfield height in pixels
    pub canvas_height: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,

    // === Timing ===
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Race countdown (seconds)
    pub level_time: f32,
    /// Preview countdown (seconds)
    pub preview_time: f32,
    /// Phase accumulator threshold (ticks at 1x)
    pub phase_period: f32,

    // === Slow-motion ===
    /// Time scale while slow-motion is active
    pub slow_motion_scale: f32,
    /// Energy drained per slow-motion tick
    pub energy_drain: f32,
    /// Energy regained per normal tick
    pub energy_regen: f32,
    /// Energy cap, also the starting value each round
    pub max_energy: f32,

    // === Maze ===
    /// Bernoulli chance per interior wall of becoming a phase wall
    pub phase_wall_chance: f64,

    // === Actors ===
    /// Pixels per tick per held direction
    pub player_speed: f32,
    /// Actor edge = tile_size - actor_margin
    pub actor_margin: f32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            tile_size: TILE_SIZE,

            tick_rate: TICK_RATE,
            level_time: LEVEL_TIME,
            preview_time: PREVIEW_TIME,
            phase_period: PHASE_PERIOD,

            slow_motion_scale: SLOW_MOTION_SCALE,
            energy_drain: ENERGY_DRAIN,
            energy_regen: ENERGY_REGEN,
            max_energy: MAX_ENERGY,

            phase_wall_chance: PHASE_WALL_CHANCE,

            player_speed: PLAYER_SPEED,
            actor_margin: ACTOR_MARGIN,
        }
    }
}

impl RaceConfig {
    /// Grid dimensions `(rows, cols)`, each forced odd
    pub fn grid_dims(&self) -> (usize, usize) {
        let tile = self.tile_size.max(1);
        let rows = odd_floor((self.canvas_height / tile) as usize);
        let cols = odd_floor((self.canvas_width / tile) as usize);
        (rows, cols)
    }

    /// Tile edge as a float for pixel math
    #[inline]
    pub fn tile(&self) -> f32 {
        self.tile_size as f32
    }

    /// Seconds advanced per simulation tick at 1x
    #[inline]
    pub fn tick_seconds(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Edge length of an actor's square body
    #[inline]
    pub fn actor_size(&self) -> f32 {
        self.tile() - self.actor_margin
    }

    /// Check that the configuration can drive a round
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 {
            return Err(ConfigError::NotPositive { field: "tile_size" });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::NotPositive { field: "tick_rate" });
        }

        let (rows, cols) = self.grid_dims();
        if rows < MIN_GRID_DIM || cols < MIN_GRID_DIM {
            return Err(ConfigError::GridTooSmall {
                rows,
                cols,
                min: MIN_GRID_DIM,
            });
        }

        let positives = [
            ("level_time", self.level_time),
            ("preview_time", self.preview_time),
            ("phase_period", self.phase_period),
            ("max_energy", self.max_energy),
            ("player_speed", self.player_speed),
            ("actor_size", self.actor_size()),
        ];
        for (field, value) in positives {
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field });
            }
        }
        // Rates may be zero (no drain / no regen) but never negative
        if self.energy_drain < 0.0 {
            return Err(ConfigError::NotPositive { field: "energy_drain" });
        }
        if self.energy_regen < 0.0 {
            return Err(ConfigError::NotPositive { field: "energy_regen" });
        }
        if self.actor_margin < 0.0 {
            return Err(ConfigError::NotPositive { field: "actor_margin" });
        }

        if !(0.0..=1.0).contains(&self.phase_wall_chance) {
            return Err(ConfigError::OutOfUnitRange {
                field: "phase_wall_chance",
                value: self.phase_wall_chance,
            });
        }
        let scale = self.slow_motion_scale as f64;
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(ConfigError::OutOfUnitRange {
                field: "slow_motion_scale",
                value: scale,
            });
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded race config from {}", path.display());
        Ok(config)
    }
}
