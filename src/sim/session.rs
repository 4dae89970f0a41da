//! Match session: scores across rounds and round regeneration
//!
//! Resolution and re-initialization happen in the same `tick` call. The
//! returned outcome is the host's cue to show a banner before ticking again.

use super::grid::{Grid, Tile};
use super::maze::MazeGenerator;
use super::rect::Rect;
use super::state::{Actor, PlayerId, RoundOutcome, RoundPhase, RoundState};
use super::tick::{TickInput, tick};
use crate::error::ConfigError;
use crate::scoreboard::{PlayerNames, Scoreboard};
use crate::settings::RaceConfig;

/// A running match between two players
#[derive(Debug, Clone)]
pub struct MatchSession {
    config: RaceConfig,
    names: PlayerNames,
    scores: Scoreboard,
    generator: MazeGenerator,
    round: RoundState,
    round_number: u32,
    last_outcome: Option<RoundOutcome>,
    seed: u64,
}

impl MatchSession {
    /// Start a match; the first round begins in preview.
    ///
    /// The config is validated first, so every maze this session generates
    /// has a solid border and room for the start and goal corners.
    pub fn new(config: RaceConfig, names: PlayerNames, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut generator = MazeGenerator::new(seed, config.phase_wall_chance);
        let round = fresh_round(&config, &mut generator);
        let session = Self {
            config,
            names,
            scores: Scoreboard::new(),
            generator,
            round,
            round_number: 1,
            last_outcome: None,
            seed,
        };
        session.log_round_start();
        Ok(session)
    }

    /// Advance the current round by one tick.
    ///
    /// On resolution the scores are updated and a new round replaces the old
    /// one before this returns.
    pub fn tick(&mut self, input: &TickInput) -> Option<RoundOutcome> {
        let outcome = tick(&mut self.round, input)?;

        self.scores.record(outcome);
        self.last_outcome = Some(outcome);
        log::info!(
            "Round {} over: {} ({} {} - {} {})",
            self.round_number,
            outcome.banner(&self.names),
            self.names.name(PlayerId::One),
            self.scores.player1,
            self.scores.player2,
            self.names.name(PlayerId::Two),
        );

        self.start_next_round();
        Some(outcome)
    }

    fn start_next_round(&mut self) {
        self.round = fresh_round(&self.config, &mut self.generator);
        self.round_number += 1;
        self.log_round_start();
    }

    fn log_round_start(&self) {
        log::info!(
            "Round {} started: {}x{} maze, {} phase walls",
            self.round_number,
            self.round.grid.rows(),
            self.round.grid.cols(),
            self.round.grid.count(Tile::PhaseWall),
        );
    }

    #[inline]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[inline]
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    #[inline]
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    #[inline]
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// 1-based number of the round in progress
    #[inline]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    /// Outcome of the most recently resolved round
    #[inline]
    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        let round = &self.round;
        FrameSnapshot {
            grid: &round.grid,
            players: round.players,
            goal: round.goal,
            walls_active: round.walls_active,
            countdown: round.clock.countdown,
            preview_countdown: round.clock.preview_countdown,
            energy: round.clock.energy,
            max_energy: round.clock.max_energy(),
            phase: round.phase,
            scores: self.scores,
            last_outcome: self.last_outcome,
        }
    }
}

fn fresh_round(config: &RaceConfig, generator: &mut MazeGenerator) -> RoundState {
    let (rows, cols) = config.grid_dims();
    RoundState::new(config, generator.generate(rows, cols))
}

/// Countdown below which the HUD timer turns to alert
pub const TIME_CRITICAL_SECS: f32 = 10.0;

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub grid: &'a Grid,
    pub players: [Actor; 2],
    pub goal: Rect,
    pub walls_active: bool,
    pub countdown: f32,
    pub preview_countdown: f32,
    pub energy: f32,
    pub max_energy: f32,
    pub phase: RoundPhase,
    pub scores: Scoreboard,
    pub last_outcome: Option<RoundOutcome>,
}

impl FrameSnapshot<'_> {
    /// Big preview digit (5, 4, .. 1); `None` means show "GO!"
    pub fn preview_digit(&self) -> Option<u32> {
        if self.phase != RoundPhase::Preview || self.preview_countdown <= 0.0 {
            return None;
        }
        Some(self.preview_countdown.floor() as u32 + 1)
    }

    /// Whether the race timer should be drawn as an alert
    pub fn time_critical(&self) -> bool {
        self.countdown < TIME_CRITICAL_SECS
    }

    /// Energy bar fill in [0, 1]
    pub fn energy_fraction(&self) -> f32 {
        if self.max_energy <= 0.0 {
            return 0.0;
        }
        (self.energy / self.max_energy).clamp(0.0, 1.0)
    }
}
