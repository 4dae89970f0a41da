//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable processing order (player 1 before player 2)
//! - No rendering or input-device dependencies

pub mod clock;
pub mod collision;
pub mod grid;
pub mod maze;
pub mod rect;
pub mod session;
pub mod state;
pub mod tick;

pub use clock::{ClockTick, RoundClock};
pub use collision::{MoveResult, is_crushed, move_actor};
pub use grid::{Grid, Tile};
pub use maze::{MazeGenerator, carve_passages};
pub use rect::Rect;
pub use session::{FrameSnapshot, MatchSession, TIME_CRITICAL_SECS};
pub use state::{Actor, PlayerId, RoundOutcome, RoundPhase, RoundState, goal_rect, start_rect};
pub use tick::{MoveIntent, TickInput, tick};
