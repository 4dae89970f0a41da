//! Maze Race - A two-player local maze racing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (maze generation, collisions, round state)
//! - `settings`: Tunable race configuration
//! - `scoreboard`: Cumulative scores and player labels
//! - `error`: Configuration errors

pub mod error;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use scoreboard::{PlayerNames, Scoreboard};
pub use settings::RaceConfig;

/// Default game configuration constants
pub mod consts {
    /// Playfield dimensions in pixels
    pub const CANVAS_WIDTH: u32 = 1920;
    pub const CANVAS_HEIGHT: u32 = 900;
    /// Tile edge length in pixels
    pub const TILE_SIZE: u32 = 30;

    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 60;
    /// Race countdown (seconds)
    pub const LEVEL_TIME: f32 = 60.0;
    /// Memorization window before the race (seconds)
    pub const PREVIEW_TIME: f32 = 5.0;

    /// Phase walls toggle once the accumulator exceeds this (ticks at 1x)
    pub const PHASE_PERIOD: f32 = 120.0;
    /// Chance an interior wall becomes a phase wall
    pub const PHASE_WALL_CHANCE: f64 = 0.08;

    /// Time scale while slow-motion is engaged
    pub const SLOW_MOTION_SCALE: f32 = 0.1;
    /// Slow-motion energy
    pub const MAX_ENERGY: f32 = 100.0;
    pub const ENERGY_DRAIN: f32 = 0.5;
    pub const ENERGY_REGEN: f32 = 0.1;

    /// Pixels moved per tick for each held direction
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Actors are this much smaller than a tile (split evenly per side)
    pub const ACTOR_MARGIN: f32 = 10.0;

    /// Smallest grid (rows or cols) that still forms a maze
    pub const MIN_GRID_DIM: usize = 5;
}

/// Round an even grid dimension down to the nearest odd value
#[inline]
pub fn odd_floor(n: usize) -> usize {
    if n % 2 == 0 { n.saturating_sub(1) } else { n }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_floor() {
        assert_eq!(odd_floor(64), 63);
        assert_eq!(odd_floor(29), 29);
        assert_eq!(odd_floor(30), 29);
        assert_eq!(odd_floor(0), 0);
    }
}
