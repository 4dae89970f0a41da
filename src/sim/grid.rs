//! Tile grid and collision queries
//!
//! The grid is regenerated wholesale each round and never mutated once
//! handed to a round. Solidity of phase walls is decided per query.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    Floor,
    #[default]
    Wall,
    /// Solid only while walls are active
    PhaseWall,
}

impl Tile {
    /// Whether this tile stops an actor
    #[inline]
    pub fn is_solid(self, walls_active: bool) -> bool {
        match self {
            Tile::Floor => false,
            Tile::Wall => true,
            Tile::PhaseWall => walls_active,
        }
    }
}

/// A rows x cols tile grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A grid made entirely of one tile kind
    pub fn filled(rows: usize, cols: usize, tile: Tile) -> Self {
        Self {
            rows,
            cols,
            tiles: vec![tile; rows * cols],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Tile at (row, col), `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.rows && col < self.cols {
            Some(self.tiles[row * self.cols + col])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, tile: Tile) {
        if row < self.rows && col < self.cols {
            self.tiles[row * self.cols + col] = tile;
        }
    }

    /// Whether (row, col) lies on the outer ring
    #[inline]
    pub fn is_border(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.cols
    }

    /// Iterate `(row, col, tile)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &t)| (i / self.cols, i % self.cols, t))
    }

    /// Count tiles of a kind
    pub fn count(&self, kind: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == kind).count()
    }

    /// Whether any in-bounds tile covered by `rect` is solid.
    ///
    /// The covered range runs from `floor(left / tile)` to `floor(right / tile)`
    /// inclusive (same for rows), so an edge lying exactly on a tile boundary
    /// also tests the next tile. Tiles outside the grid never block.
    pub fn is_blocked(&self, rect: &Rect, tile_size: f32, walls_active: bool) -> bool {
        let start_c = (rect.left() / tile_size).floor() as i64;
        let end_c = (rect.right() / tile_size).floor() as i64;
        let start_r = (rect.top() / tile_size).floor() as i64;
        let end_r = (rect.bottom() / tile_size).floor() as i64;

        // Clamp to grid bounds; an empty range means nothing in bounds
        let start_c = start_c.max(0);
        let start_r = start_r.max(0);
        let end_c = end_c.min(self.cols as i64 - 1);
        let end_r = end_r.min(self.rows as i64 - 1);

        for r in start_r..=end_r {
            for c in start_c..=end_c {
                if self.tiles[r as usize * self.cols + c as usize].is_solid(walls_active) {
                    return true;
                }
            }
        }
        false
    }
}

impl fmt::Display for Grid {
    /// ASCII dump: `#` wall, `~` phase wall, space floor
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.cols.max(1)) {
            for tile in row {
                let ch = match tile {
                    Tile::Floor => ' ',
                    Tile::Wall => '#',
                    Tile::PhaseWall => '~',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
