//! Round state and core simulation types
//!
//! Everything one round owns lives here; it is discarded wholesale when the
//! round resolves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::RoundClock;
use super::grid::Grid;
use super::rect::Rect;
use crate::settings::RaceConfig;

/// Which player an actor belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::One, PlayerId::Two];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    Player1Wins,
    Player2Wins,
    /// Countdown ran out, or both players were crushed at once
    Draw,
}

impl RoundOutcome {
    pub fn win(player: PlayerId) -> Self {
        match player {
            PlayerId::One => RoundOutcome::Player1Wins,
            PlayerId::Two => RoundOutcome::Player2Wins,
        }
    }

    /// The winning player, `None` on a draw
    pub fn winner(self) -> Option<PlayerId> {
        match self {
            RoundOutcome::Player1Wins => Some(PlayerId::One),
            RoundOutcome::Player2Wins => Some(PlayerId::Two),
            RoundOutcome::Draw => None,
        }
    }
}

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Maze visible, input frozen
    Preview,
    /// Players race for the goal
    Racing,
    /// Round over; terminal until the session starts a new round
    Resolved(RoundOutcome),
}

/// A player's body in the maze
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: PlayerId,
    pub rect: Rect,
}

impl Actor {
    /// Actor inset into the start tile (1, 1)
    pub fn at_start(id: PlayerId, config: &RaceConfig) -> Self {
        Self {
            id,
            rect: start_rect(config),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.rect.pos
    }
}

/// The fixed start rect: tile (1, 1) shrunk by the actor margin
pub fn start_rect(config: &RaceConfig) -> Rect {
    let inset = config.tile() + config.actor_margin / 2.0;
    let size = config.actor_size();
    Rect::new(inset, inset, size, size)
}

/// The goal: the whole tile at the corner opposite the start
pub fn goal_rect(config: &RaceConfig) -> Rect {
    let (rows, cols) = config.grid_dims();
    Rect::tile(rows - 2, cols - 2, config.tile())
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Maze tiles (immutable for the round)
    pub grid: Grid,
    /// Both actors, indexed by `PlayerId::index`
    pub players: [Actor; 2],
    /// Goal tile
    pub goal: Rect,
    /// Timers and energy
    pub clock: RoundClock,
    /// Whether phase walls are currently solid
    pub walls_active: bool,
    /// Current phase
    pub phase: RoundPhase,
    /// Simulation ticks processed this round
    pub time_ticks: u64,
    /// Tile edge in pixels
    pub tile_size: f32,
    /// Pixels per tick per held direction
    pub player_speed: f32,
}

impl RoundState {
    /// Start a round on the given maze
    pub fn new(config: &RaceConfig, grid: Grid) -> Self {
        Self {
            grid,
            players: [
                Actor::at_start(PlayerId::One, config),
                Actor::at_start(PlayerId::Two, config),
            ],
            goal: goal_rect(config),
            clock: RoundClock::new(config),
            walls_active: true,
            phase: RoundPhase::Preview,
            time_ticks: 0,
            tile_size: config.tile(),
            player_speed: config.player_speed,
        }
    }

    #[inline]
    pub fn player(&self, id: PlayerId) -> &Actor {
        &self.players[id.index()]
    }

    #[inline]
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Actor {
        &mut self.players[id.index()]
    }

    /// Outcome if the round has resolved
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            RoundPhase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }
}
