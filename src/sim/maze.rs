//! Perfect maze generation
//!
//! Randomized depth-first carving over the odd-coordinate lattice, then a
//! sparse sprinkle of phase walls, then the start/goal corners are opened.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Grid, Tile};

/// Lattice steps: up, down, left, right (two tiles at a time)
const DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Seeded maze generator, reused across rounds of a match
#[derive(Debug, Clone)]
pub struct MazeGenerator {
    rng: Pcg32,
    phase_wall_chance: f64,
}

impl MazeGenerator {
    pub fn new(seed: u64, phase_wall_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            phase_wall_chance,
        }
    }

    /// Generate a full maze: carved tree, phase walls, cleared corners.
    ///
    /// `rows` and `cols` must be odd and at least 5.
    pub fn generate(&mut self, rows: usize, cols: usize) -> Grid {
        let (mut grid, _) = carve_passages(&mut self.rng, rows, cols);
        inject_phase_walls(&mut grid, &mut self.rng, self.phase_wall_chance);
        clear_corners(&mut grid);
        grid
    }
}

/// Carve a spanning tree of passages starting from (1, 1).
///
/// Returns the grid and the number of carving steps taken. Each step opens
/// exactly one new lattice cell, so a grid with `n` lattice cells always takes
/// `n - 1` steps.
pub fn carve_passages<R: Rng>(rng: &mut R, rows: usize, cols: usize) -> (Grid, usize) {
    let mut grid = Grid::filled(rows, cols, Tile::Wall);
    let mut stack = vec![(1usize, 1usize)];
    grid.set(1, 1, Tile::Floor);
    let mut steps = 0;

    // Neighbor buffer reused across iterations
    let mut neighbors: Vec<(usize, usize, usize, usize)> = Vec::with_capacity(4);

    while let Some(&(r, c)) = stack.last() {
        neighbors.clear();
        for (dr, dc) in DIRECTIONS {
            let nr = r as isize + dr;
            let nc = c as isize + dc;
            // Strictly inside the border
            if nr <= 0 || nc <= 0 || nr >= rows as isize - 1 || nc >= cols as isize - 1 {
                continue;
            }
            let (nr, nc) = (nr as usize, nc as usize);
            if grid.get(nr, nc) == Some(Tile::Wall) {
                let wall_r = (r as isize + dr / 2) as usize;
                let wall_c = (c as isize + dc / 2) as usize;
                neighbors.push((nr, nc, wall_r, wall_c));
            }
        }

        if neighbors.is_empty() {
            stack.pop();
            continue;
        }

        let (nr, nc, wall_r, wall_c) = neighbors[rng.random_range(0..neighbors.len())];
        grid.set(wall_r, wall_c, Tile::Floor);
        grid.set(nr, nc, Tile::Floor);
        stack.push((nr, nc));
        steps += 1;
    }

    (grid, steps)
}

/// Turn each interior wall into a phase wall with probability `chance`
fn inject_phase_walls<R: Rng>(grid: &mut Grid, rng: &mut R, chance: f64) {
    let chance = chance.clamp(0.0, 1.0);
    for r in 1..grid.rows() - 1 {
        for c in 1..grid.cols() - 1 {
            if grid.get(r, c) == Some(Tile::Wall) && rng.random_bool(chance) {
                grid.set(r, c, Tile::PhaseWall);
            }
        }
    }
}

/// Open the tiles next to the start (1, 1) and goal (rows-2, cols-2) corners
fn clear_corners(grid: &mut Grid) {
    let (rows, cols) = (grid.rows(), grid.cols());
    grid.set(1, 2, Tile::Floor);
    grid.set(2, 1, Tile::Floor);
    grid.set(rows - 2, cols - 3, Tile::Floor);
    grid.set(rows - 3, cols - 2, Tile::Floor);
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;

    /// Flood fill from (1, 1) treating everything but `Wall` as open
    fn reachable_from_start(grid: &Grid) -> Vec<bool> {
        let (rows, cols) = (grid.rows(), grid.cols());
        let mut seen = vec![false; rows * cols];
        let mut queue = VecDeque::from([(1usize, 1usize)]);
        seen[cols + 1] = true;
        while let Some((r, c)) = queue.pop_front() {
            let next = [(r - 1, c), (r + 1, c), (r, c - 1), (r, c + 1)];
            for (nr, nc) in next {
                if grid.get(nr, nc).is_some_and(|t| t != Tile::Wall) && !seen[nr * cols + nc] {
                    seen[nr * cols + nc] = true;
                    queue.push_back((nr, nc));
                }
            }
        }
        seen
    }

    fn odd_dim() -> impl Strategy<Value = usize> {
        (2usize..=20).prop_map(|n| n * 2 + 1)
    }

    proptest! {
        #[test]
        fn prop_every_floor_reachable(seed in any::<u64>(), rows in odd_dim(), cols in odd_dim()) {
            let grid = MazeGenerator::new(seed, 0.08).generate(rows, cols);
            let seen = reachable_from_start(&grid);
            for (r, c, tile) in grid.iter() {
                if tile == Tile::Floor {
                    prop_assert!(seen[r * cols + c], "floor ({}, {}) unreachable", r, c);
                }
            }
        }

        #[test]
        fn prop_border_stays_wall(seed in any::<u64>(), rows in odd_dim(), cols in odd_dim()) {
            let grid = MazeGenerator::new(seed, 0.5).generate(rows, cols);
            for (r, c, tile) in grid.iter() {
                if grid.is_border(r, c) {
                    prop_assert_eq!(tile, Tile::Wall);
                }
            }
        }

        #[test]
        fn prop_carving_is_a_spanning_tree(seed in any::<u64>(), rows in odd_dim(), cols in odd_dim()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (grid, steps) = carve_passages(&mut rng, rows, cols);

            // Every odd/odd lattice cell is carved
            let lattice = (rows / 2) * (cols / 2);
            for r in (1..rows).step_by(2) {
                for c in (1..cols).step_by(2) {
                    prop_assert_eq!(grid.get(r, c), Some(Tile::Floor));
                }
            }
            // n cells joined by n - 1 passages: a tree
            prop_assert_eq!(steps, lattice - 1);
            // Each step opened one lattice cell and one connector, never the same twice
            prop_assert_eq!(grid.count(Tile::Floor), 1 + 2 * steps);
        }
    }

    #[test]
    fn test_start_is_floor() {
        let grid = MazeGenerator::new(7, 0.08).generate(29, 63);
        assert_eq!(grid.get(1, 1), Some(Tile::Floor));
        assert_eq!(grid.get(27, 61), Some(Tile::Floor));
    }

    #[test]
    fn test_corners_cleared_even_with_dense_phase_walls() {
        let grid = MazeGenerator::new(3, 1.0).generate(11, 15);
        for (r, c) in [(1, 2), (2, 1), (9, 12), (8, 13)] {
            assert_eq!(grid.get(r, c), Some(Tile::Floor), "({r}, {c})");
        }
    }

    #[test]
    fn test_phase_walls_only_replace_interior_walls() {
        let mut rng = Pcg32::seed_from_u64(11);
        let (carved, _) = carve_passages(&mut rng, 21, 21);
        let mut grid = carved.clone();
        inject_phase_walls(&mut grid, &mut rng, 0.5);

        assert!(grid.count(Tile::PhaseWall) > 0);
        for (r, c, tile) in grid.iter() {
            if tile == Tile::PhaseWall {
                assert_eq!(carved.get(r, c), Some(Tile::Wall));
                assert!(!grid.is_border(r, c));
            }
        }
    }

    #[test]
    fn test_zero_chance_injects_nothing() {
        let grid = MazeGenerator::new(5, 0.0).generate(21, 31);
        assert_eq!(grid.count(Tile::PhaseWall), 0);
    }

    #[test]
    fn test_same_seed_same_maze() {
        let a = MazeGenerator::new(42, 0.08).generate(29, 63);
        let b = MazeGenerator::new(42, 0.08).generate(29, 63);
        assert_eq!(a, b);

        let c = MazeGenerator::new(43, 0.08).generate(29, 63);
        assert_ne!(a, c);
    }

    #[test]
    fn test_successive_rounds_differ() {
        let mut generator = MazeGenerator::new(42, 0.08);
        let first = generator.generate(29, 63);
        let second = generator.generate(29, 63);
        assert_ne!(first, second);
    }

    #[test]
    fn test_smallest_maze() {
        let grid = MazeGenerator::new(1, 0.08).generate(5, 5);
        let seen = reachable_from_start(&grid);
        assert!(seen[3 * 5 + 3], "goal corner unreachable");
    }
}
