//! Bomb fuses and explosion ray propagation
//!
//! A bomb counts down a fixed fuse, then detonates: rays are cast from the
//! owning cell in the four cardinal directions up to a fixed range. A ray
//! stops at the first wall (excluded), consumes the first brick it meets
//! (included, brick cleared), and otherwise runs to range exhaustion. The
//! resulting cell set is frozen into an `Explosion` that lingers as a
//! hazard for a fixed number of ticks.

use super::actor::Direction;
use super::grid::{Grid, Tile};
use crate::consts::{BOMB_FUSE_TICKS, EXPLOSION_TICKS};

/// An armed bomb sitting on a grid cell
#[derive(Debug, Clone)]
pub struct Bomb {
    pub row: i32,
    pub col: i32,
    /// Ticks until detonation
    pub fuse_ticks: u32,
}

impl Bomb {
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            row,
            col,
            fuse_ticks: BOMB_FUSE_TICKS,
        }
    }

    /// Count the fuse down one tick. Returns true when it expires.
    pub fn tick(&mut self) -> bool {
        self.fuse_ticks = self.fuse_ticks.saturating_sub(1);
        self.fuse_ticks == 0
    }

    /// Fuse progress in [0, 1] for rendering (1 = just placed)
    pub fn fuse_fraction(&self) -> f32 {
        self.fuse_ticks as f32 / BOMB_FUSE_TICKS as f32
    }
}

/// Result of a detonation
#[derive(Debug)]
pub struct Detonation {
    pub cells: Vec<(i32, i32)>,
    pub bricks_destroyed: u32,
}

/// Cast explosion rays from a cell, clearing the first brick on each ray.
/// Mutates the grid; returns the affected cell set (origin included).
pub fn propagate(grid: &mut Grid, row: i32, col: i32, range: i32) -> Detonation {
    let mut cells = vec![(row, col)];
    let mut bricks_destroyed = 0;

    for dir in Direction::ALL {
        let (dr, dc) = dir.delta();
        for i in 1..=range {
            let (nr, nc) = (row + dr * i, col + dc * i);
            match grid.tile(nr, nc) {
                Tile::Wall => break,
                Tile::Brick => {
                    grid.clear_brick(nr, nc);
                    bricks_destroyed += 1;
                    cells.push((nr, nc));
                    break;
                }
                Tile::Empty => cells.push((nr, nc)),
            }
        }
    }

    Detonation {
        cells,
        bricks_destroyed,
    }
}

/// A timed hazard region: the cell set is a snapshot taken at detonation
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Explosion {
    cells: Vec<(i32, i32)>,
    pub ticks_left: u32,
}

impl Explosion {
    pub fn new(cells: Vec<(i32, i32)>) -> Self {
        Self {
            cells,
            ticks_left: EXPLOSION_TICKS,
        }
    }

    #[inline]
    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells
    }

    #[inline]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.cells.iter().any(|&(r, c)| r == row && c == col)
    }

    /// Count the hazard down one tick. Returns true when it is finished.
    pub fn tick(&mut self) -> bool {
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left == 0
    }

    /// Remaining lifetime in [0, 1] for rendering fade-out
    pub fn alpha(&self) -> f32 {
        self.ticks_left as f32 / EXPLOSION_TICKS as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// RngCore stub: rolls a brick only on the chosen roll indices.
    /// Generation consumes one f32 roll per interior, non-parity,
    /// non-safe-zone cell, in row-major order.
    struct BrickAtRolls {
        next_roll: usize,
        brick_rolls: Vec<usize>,
    }

    impl rand::RngCore for BrickAtRolls {
        fn next_u32(&mut self) -> u32 {
            let roll = if self.brick_rolls.contains(&self.next_roll) {
                0 // maps to ~0.0 < BRICK_PROBABILITY
            } else {
                u32::MAX // maps to ~1.0
            };
            self.next_roll += 1;
            roll
        }
        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
    }

    /// 7x7 maze with bricks at the given roll indices (empty elsewhere)
    fn grid_7x7(brick_rolls: Vec<usize>) -> Grid {
        let mut rng = BrickAtRolls {
            next_roll: 0,
            brick_rolls,
        };
        Grid::generate(7, 7, &mut rng)
    }

    #[test]
    fn test_origin_always_included() {
        let mut grid = grid_7x7(vec![]);
        let det = propagate(&mut grid, 3, 3, 2);
        assert!(det.cells.contains(&(3, 3)));
        assert_eq!(det.bricks_destroyed, 0);
    }

    #[test]
    fn test_ray_runs_to_range_in_open_space() {
        let mut grid = grid_7x7(vec![]);
        let det = propagate(&mut grid, 3, 3, 2);
        assert!(det.cells.contains(&(1, 3)));
        assert!(det.cells.contains(&(5, 3)));
        assert!(det.cells.contains(&(3, 1)));
        assert!(det.cells.contains(&(3, 5)));
        // origin + 4 rays * 2 cells
        assert_eq!(det.cells.len(), 9);
    }

    #[test]
    fn test_ray_stops_at_wall_without_effect() {
        let mut grid = grid_7x7(vec![]);
        // From (1,1) the up and left rays hit the border wall immediately
        let det = propagate(&mut grid, 1, 1, 2);
        assert!(!det.cells.contains(&(0, 1)));
        assert!(!det.cells.contains(&(1, 0)));
        assert!(det.cells.contains(&(1, 2)));
        assert!(det.cells.contains(&(2, 1)));
    }

    #[test]
    fn test_first_brick_stops_ray_and_is_destroyed() {
        // Roll indices 0 and 1 are (1,3) and (1,4) in a 7x7 maze
        let mut grid = grid_7x7(vec![0, 1]);
        assert_eq!(grid.tile(1, 3), Tile::Brick);
        assert_eq!(grid.tile(1, 4), Tile::Brick);

        let det = propagate(&mut grid, 1, 1, 2);
        // Right ray: (1,2) empty, (1,3) brick -> destroyed, included, stop
        assert!(det.cells.contains(&(1, 2)));
        assert!(det.cells.contains(&(1, 3)));
        assert!(!det.cells.contains(&(1, 4)));
        assert_eq!(grid.tile(1, 3), Tile::Empty);
        // The brick beyond the stopped ray survives
        assert_eq!(grid.tile(1, 4), Tile::Brick);
        assert_eq!(det.bricks_destroyed, 1);
    }

    #[test]
    fn test_brick_then_wall_affects_only_the_brick() {
        // Roll index 15 is (5,3): brick one cell below the bomb at (4,3),
        // with the solid border wall (6,3) right behind it
        let mut grid = grid_7x7(vec![15]);
        assert_eq!(grid.tile(4, 3), Tile::Empty);
        assert_eq!(grid.tile(5, 3), Tile::Brick);
        assert_eq!(grid.tile(6, 3), Tile::Wall);

        let det = propagate(&mut grid, 4, 3, 2);
        let down: Vec<_> = det.cells.iter().filter(|&&(r, c)| c == 3 && r > 4).collect();
        assert_eq!(down, vec![&(5, 3)]);
        assert_eq!(grid.tile(5, 3), Tile::Empty);
        assert_eq!(det.bricks_destroyed, 1);
    }

    #[test]
    fn test_bomb_fuse_counts_down_to_zero() {
        let mut bomb = Bomb::new(1, 1);
        for _ in 0..BOMB_FUSE_TICKS - 1 {
            assert!(!bomb.tick());
        }
        assert!(bomb.tick());
        assert_eq!(bomb.fuse_ticks, 0);
    }

    #[test]
    fn test_explosion_lifetime() {
        let mut exp = Explosion::new(vec![(1, 1), (1, 2)]);
        assert!(exp.contains(1, 2));
        assert!(!exp.contains(2, 2));
        let mut finished = false;
        for _ in 0..EXPLOSION_TICKS {
            finished = exp.tick();
        }
        assert!(finished);
        assert_eq!(exp.alpha(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_affected_cells_stay_on_unobstructed_rays(
            seed in any::<u64>(),
            row in 1i32..8,
            col in 1i32..10,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut grid = Grid::generate(9, 11, &mut rng);
            prop_assume!(grid.is_empty(row, col));
            let snapshot = grid.clone();
            let det = propagate(&mut grid, row, col, 2);
            for &(r, c) in &det.cells {
                // Never a wall, always on a cardinal ray within range
                prop_assert!(snapshot.tile(r, c) != Tile::Wall);
                prop_assert!(r == row || c == col);
                prop_assert!((r - row).abs() + (c - col).abs() <= 2);
            }
        }

        #[test]
        fn prop_at_most_one_brick_per_ray(
            seed in any::<u64>(),
            row in 1i32..8,
            col in 1i32..10,
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut grid = Grid::generate(9, 11, &mut rng);
            prop_assume!(grid.is_empty(row, col));
            let det = propagate(&mut grid, row, col, 2);
            prop_assert!(det.bricks_destroyed <= 4);
        }
    }
}
