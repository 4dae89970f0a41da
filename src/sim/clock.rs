//! Round timers and the slow-motion energy pool
//!
//! The clock only reports numbers and events; the round state machine
//! decides what a toggle or an expired countdown means.

use serde::{Deserialize, Serialize};

use crate::settings::RaceConfig;

/// What happened during one racing tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    /// Time scale applied this tick
    pub time_scale: f32,
    /// The phase accumulator crossed its threshold and was reset
    pub phase_toggled: bool,
    /// The race countdown reached zero
    pub expired: bool,
}

/// Per-round timer state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundClock {
    /// Race seconds remaining
    pub countdown: f32,
    /// Scaled ticks since the last wall toggle
    pub phase_accumulator: f32,
    /// Slow-motion energy in [0, max_energy]
    pub energy: f32,
    /// Preview seconds remaining
    pub preview_countdown: f32,
    /// Scale applied on the most recent tick
    pub time_scale: f32,

    max_energy: f32,
    energy_drain: f32,
    energy_regen: f32,
    slow_motion_scale: f32,
    tick_seconds: f32,
    phase_period: f32,
}

impl RoundClock {
    /// Fresh clock: full energy, full countdowns
    pub fn new(config: &RaceConfig) -> Self {
        Self {
            countdown: config.level_time,
            phase_accumulator: 0.0,
            energy: config.max_energy,
            preview_countdown: config.preview_time,
            time_scale: 1.0,
            max_energy: config.max_energy,
            energy_drain: config.energy_drain,
            energy_regen: config.energy_regen,
            slow_motion_scale: config.slow_motion_scale,
            tick_seconds: config.tick_seconds(),
            phase_period: config.phase_period,
        }
    }

    #[inline]
    pub fn max_energy(&self) -> f32 {
        self.max_energy
    }

    /// Advance the preview countdown by one unscaled tick.
    ///
    /// Returns true once the preview is over.
    pub fn advance_preview(&mut self) -> bool {
        self.preview_countdown -= self.tick_seconds;
        self.preview_countdown <= 0.0
    }

    /// Advance one racing tick
    pub fn advance(&mut self, request_slow_motion: bool) -> ClockTick {
        if request_slow_motion && self.energy > 0.0 {
            self.time_scale = self.slow_motion_scale;
            self.energy -= self.energy_drain;
        } else {
            self.time_scale = 1.0;
            self.energy += self.energy_regen;
        }
        self.energy = self.energy.clamp(0.0, self.max_energy);

        self.countdown -= self.tick_seconds * self.time_scale;

        self.phase_accumulator += self.time_scale;
        let phase_toggled = self.phase_accumulator > self.phase_period;
        if phase_toggled {
            self.phase_accumulator = 0.0;
        }

        ClockTick {
            time_scale: self.time_scale,
            phase_toggled,
            expired: self.countdown <= 0.0,
        }
    }
}
