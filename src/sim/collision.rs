//! Movement and collision response on the tile grid
//!
//! Actors resolve each axis on its own, x first then y. Diagonal motion
//! against a wall keeps the free axis, so actors slide along corridors
//! instead of sticking to corners.

use glam::Vec2;

use super::grid::Grid;
use super::state::Actor;

/// Which axes of a requested move were applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveResult {
    pub moved_x: bool,
    pub moved_y: bool,
}

/// Move an actor by `delta`, rolling back any axis that lands in a solid tile
pub fn move_actor(
    actor: &mut Actor,
    delta: Vec2,
    grid: &Grid,
    tile_size: f32,
    walls_active: bool,
) -> MoveResult {
    let mut result = MoveResult::default();

    if delta.x != 0.0 {
        actor.rect.pos.x += delta.x;
        if grid.is_blocked(&actor.rect, tile_size, walls_active) {
            actor.rect.pos.x -= delta.x;
        } else {
            result.moved_x = true;
        }
    }

    if delta.y != 0.0 {
        actor.rect.pos.y += delta.y;
        if grid.is_blocked(&actor.rect, tile_size, walls_active) {
            actor.rect.pos.y -= delta.y;
        } else {
            result.moved_y = true;
        }
    }

    result
}

/// Whether an actor currently overlaps a solid tile
#[inline]
pub fn is_crushed(actor: &Actor, grid: &Grid, tile_size: f32, walls_active: bool) -> bool {
    grid.is_blocked(&actor.rect, tile_size, walls_active)
}
