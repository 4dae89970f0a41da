//! Fixed timestep simulation tick
//!
//! Drives a round through Preview -> Racing -> Resolved. At most one
//! resolution happens per tick and nothing moves after it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{is_crushed, move_actor};
use super::state::{PlayerId, RoundOutcome, RoundPhase, RoundState};

/// Directions held by one player this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Per-axis displacement; right beats left and down beats up.
    ///
    /// Diagonals are not normalized.
    pub fn displacement(&self, speed: f32) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.left {
            d.x = -speed;
        }
        if self.right {
            d.x = speed;
        }
        if self.up {
            d.y = -speed;
        }
        if self.down {
            d.y = speed;
        }
        d
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    pub player1: MoveIntent,
    pub player2: MoveIntent,
    /// Shared slow-motion request
    pub slow_motion: bool,
}

impl TickInput {
    pub fn intent(&self, player: PlayerId) -> MoveIntent {
        match player {
            PlayerId::One => self.player1,
            PlayerId::Two => self.player2,
        }
    }
}

/// Advance a round by one tick.
///
/// Returns the outcome on the tick the round resolves. A resolved round
/// ignores further ticks.
pub fn tick(state: &mut RoundState, input: &TickInput) -> Option<RoundOutcome> {
    match state.phase {
        RoundPhase::Resolved(_) => return None,
        RoundPhase::Preview => {
            state.time_ticks += 1;
            // Input is frozen while players study the maze
            if state.clock.advance_preview() {
                log::debug!("Preview over after {} ticks, race on", state.time_ticks);
                state.phase = RoundPhase::Racing;
            }
            return None;
        }
        RoundPhase::Racing => {}
    }

    state.time_ticks += 1;

    // 1. Timers
    let clock = state.clock.advance(input.slow_motion);

    // 2. Time up beats everything else this tick
    if clock.expired {
        return Some(resolve(state, RoundOutcome::Draw));
    }

    // 3. Wall phase; a materializing wall crushes whoever stands in it
    if clock.phase_toggled {
        state.walls_active = !state.walls_active;
        log::debug!(
            "Phase walls {} at tick {}",
            if state.walls_active { "solid" } else { "open" },
            state.time_ticks
        );

        if state.walls_active {
            let crushed = PlayerId::ALL.map(|id| {
                is_crushed(state.player(id), &state.grid, state.tile_size, true)
            });
            let outcome = match crushed {
                [true, true] => Some(RoundOutcome::Draw),
                [true, false] => Some(RoundOutcome::win(PlayerId::Two)),
                [false, true] => Some(RoundOutcome::win(PlayerId::One)),
                [false, false] => None,
            };
            if let Some(outcome) = outcome {
                return Some(resolve(state, outcome));
            }
        }
    }

    // 4. Movement, player 1 first
    for id in PlayerId::ALL {
        let delta = input.intent(id).displacement(state.player_speed);
        let actor = &mut state.players[id.index()];
        let moved = move_actor(actor, delta, &state.grid, state.tile_size, state.walls_active);
        if (delta.x != 0.0 && !moved.moved_x) || (delta.y != 0.0 && !moved.moved_y) {
            log::trace!("{:?} blocked at {} moving {}", id, actor.pos(), delta);
        }
    }

    // 5. Goal; player 1 wins a same-tick tie
    for id in PlayerId::ALL {
        if state.player(id).rect.intersects(&state.goal) {
            return Some(resolve(state, RoundOutcome::win(id)));
        }
    }

    None
}

fn resolve(state: &mut RoundState, outcome: RoundOutcome) -> RoundOutcome {
    state.phase = RoundPhase::Resolved(outcome);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::RaceConfig;
    use crate::sim::grid::{Grid, Tile};
    use crate::sim::rect::Rect;

    /// Small open arena: walled border, floor everywhere else
    fn arena_config() -> RaceConfig {
        RaceConfig {
            canvas_width: 9 * 30,
            canvas_height: 9 * 30,
            ..Default::default()
        }
    }

    fn open_round(config: &RaceConfig) -> RoundState {
        let (rows, cols) = config.grid_dims();
        let mut grid = Grid::filled(rows, cols, Tile::Floor);
        for r in 0..rows {
            for c in 0..cols {
                if grid.is_border(r, c) {
                    grid.set(r, c, Tile::Wall);
                }
            }
        }
        RoundState::new(config, grid)
    }

    fn racing_round(config: &RaceConfig) -> RoundState {
        let mut round = open_round(config);
        round.phase = RoundPhase::Racing;
        round
    }

    fn hold_right() -> TickInput {
        TickInput {
            player1: MoveIntent { right: true, ..Default::default() },
            player2: MoveIntent { right: true, ..Default::default() },
            slow_motion: false,
        }
    }

    #[test]
    fn test_displacement() {
        let intent = MoveIntent { left: true, right: true, up: true, ..Default::default() };
        assert_eq!(intent.displacement(4.0), Vec2::new(4.0, -4.0));
        assert_eq!(MoveIntent::default().displacement(4.0), Vec2::ZERO);
    }

    #[test]
    fn test_preview_ignores_input() {
        let config = arena_config();
        let mut round = open_round(&config);
        let start = round.players;

        let input = TickInput { slow_motion: true, ..hold_right() };
        assert_eq!(tick(&mut round, &input), None);

        assert_eq!(round.phase, RoundPhase::Preview);
        assert_eq!(round.players, start);
        assert_eq!(round.clock.energy, config.max_energy);
        assert_eq!(round.clock.countdown, config.level_time);
        assert!(round.clock.preview_countdown < config.preview_time);
    }

    #[test]
    fn test_preview_to_racing() {
        let config = arena_config();
        let mut round = open_round(&config);
        let mut ticks = 0;
        while round.phase == RoundPhase::Preview {
            tick(&mut round, &TickInput::default());
            ticks += 1;
            assert!(ticks < 1000);
        }
        assert_eq!(round.phase, RoundPhase::Racing);
        assert!((300..=301).contains(&ticks), "preview took {ticks} ticks");
    }

    #[test]
    fn test_racing_moves_players() {
        let config = arena_config();
        let mut round = racing_round(&config);
        tick(&mut round, &hold_right());
        assert_eq!(round.players[0].pos(), Vec2::new(39.0, 35.0));
        assert_eq!(round.players[1].pos(), Vec2::new(39.0, 35.0));
    }

    #[test]
    fn test_blocked_player_holds_position() {
        let config = arena_config();
        let mut round = racing_round(&config);
        // Pressed into the top-left corner of the open interior
        round.players[0].rect.pos = Vec2::new(31.0, 31.0);
        let input = TickInput {
            player1: MoveIntent { up: true, left: true, ..Default::default() },
            ..Default::default()
        };

        assert_eq!(tick(&mut round, &input), None);
        assert_eq!(round.players[0].pos(), Vec2::new(31.0, 31.0));
    }

    #[test]
    fn test_countdown_expiry_is_draw() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.clock.countdown = 0.001;

        assert_eq!(tick(&mut round, &TickInput::default()), Some(RoundOutcome::Draw));
        assert_eq!(round.phase, RoundPhase::Resolved(RoundOutcome::Draw));
    }

    #[test]
    fn test_countdown_beats_goal() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.clock.countdown = 0.001;
        round.players[0].rect.pos = round.goal.pos;

        assert_eq!(tick(&mut round, &TickInput::default()), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_phase_crush_eliminates_player() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.grid.set(3, 3, Tile::PhaseWall);
        round.walls_active = false;
        round.players[0].rect.pos = Vec2::new(95.0, 95.0);
        // Next tick pushes the accumulator past the threshold
        round.clock.phase_accumulator = config.phase_period;

        let outcome = tick(&mut round, &TickInput::default());
        assert!(round.walls_active);
        assert_eq!(outcome, Some(RoundOutcome::Player2Wins));
    }

    #[test]
    fn test_phase_crush_both_is_draw() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.grid.set(3, 3, Tile::PhaseWall);
        round.walls_active = false;
        round.players[0].rect.pos = Vec2::new(95.0, 95.0);
        round.players[1].rect.pos = Vec2::new(95.0, 95.0);
        round.clock.phase_accumulator = config.phase_period;

        assert_eq!(tick(&mut round, &TickInput::default()), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_crushed_player_cannot_escape_that_tick() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.grid.set(3, 3, Tile::PhaseWall);
        round.walls_active = false;
        round.players[1].rect.pos = Vec2::new(95.0, 95.0);
        round.clock.phase_accumulator = config.phase_period;
        let trapped = round.players[1].rect;

        let input = TickInput {
            player2: MoveIntent { up: true, left: true, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(tick(&mut round, &input), Some(RoundOutcome::Player1Wins));
        assert_eq!(round.players[1].rect, trapped);
    }

    #[test]
    fn test_walls_vanishing_crushes_nobody() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.grid.set(3, 3, Tile::PhaseWall);
        round.players[0].rect.pos = Vec2::new(95.0, 95.0);
        round.clock.phase_accumulator = config.phase_period;

        assert_eq!(tick(&mut round, &TickInput::default()), None);
        assert!(!round.walls_active);
        assert_eq!(round.phase, RoundPhase::Racing);
    }

    #[test]
    fn test_goal_tie_goes_to_player_one() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.players[0].rect.pos = round.goal.pos + Vec2::splat(5.0);
        round.players[1].rect.pos = round.goal.pos + Vec2::splat(5.0);

        assert_eq!(tick(&mut round, &TickInput::default()), Some(RoundOutcome::Player1Wins));
    }

    #[test]
    fn test_player_two_reaches_goal() {
        let config = arena_config();
        let mut round = racing_round(&config);
        // Goal tile (7, 7) at (210, 210); one step right enters it
        round.players[1].rect = Rect::new(187.0, 215.0, 20.0, 20.0);

        assert_eq!(tick(&mut round, &hold_right()), Some(RoundOutcome::Player2Wins));
    }

    #[test]
    fn test_resolved_round_is_inert() {
        let config = arena_config();
        let mut round = racing_round(&config);
        round.phase = RoundPhase::Resolved(RoundOutcome::Draw);
        let before = round.players;

        assert_eq!(tick(&mut round, &hold_right()), None);
        assert_eq!(round.players, before);
        assert_eq!(round.phase, RoundPhase::Resolved(RoundOutcome::Draw));
    }

    #[test]
    fn test_slow_motion_stretches_the_race() {
        let config = arena_config();
        let mut normal = racing_round(&config);
        let mut slowed = racing_round(&config);
        let slow = TickInput { slow_motion: true, ..Default::default() };
        for _ in 0..60 {
            tick(&mut normal, &TickInput::default());
            tick(&mut slowed, &slow);
        }
        assert!(slowed.clock.countdown > normal.clock.countdown);
        assert!(slowed.clock.energy < normal.clock.energy);
    }
}
