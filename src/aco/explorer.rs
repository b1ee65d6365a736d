//! Pheromone-independent random exploration used to seed the matrix.

use super::grid::LevelGrid;
use super::types::AntPath;
use rand::Rng;

/// Generates uniformly random feasible paths.
///
/// Starting from the all-zero path, repeatedly gives a random still-unset
/// variable a random non-zero level that keeps the total at or below 1,
/// until the total is exactly 1.
#[derive(Debug, Clone, Copy)]
pub struct RandomExplorer {
    grid: LevelGrid,
}

impl RandomExplorer {
    pub fn new(grid: LevelGrid) -> Self {
        Self { grid }
    }

    /// Draws one path whose levels sum to 1.
    ///
    /// If every variable has been set before the total reaches 1, the path is
    /// discarded and drawn again from scratch.
    pub fn random_path<R: Rng>(&self, rng: &mut R) -> AntPath {
        let cols = self.grid.cols();
        let units = self.grid.units();
        let max_row = self.grid.rows() - 1;

        loop {
            let mut rows = vec![0usize; cols];
            let mut unset: Vec<usize> = (0..cols).collect();
            let mut total = 0usize;

            while total < units && !unset.is_empty() {
                // Same distribution as redrawing (level, variable) pairs until one fits.
                let row = rng.random_range(1..=max_row.min(units - total));
                let col = unset.swap_remove(rng.random_range(0..unset.len()));
                rows[col] = row;
                total += row;
            }

            if total == units {
                let levels = self.grid.levels_of(&rows);
                return AntPath { levels, rows };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_random_paths_are_valid() {
        let grid = LevelGrid::new(6, 16, 0.2, 1);
        let explorer = RandomExplorer::new(grid);
        let mut rng = create_rng(42);
        for _ in 0..200 {
            let path = explorer.random_path(&mut rng);
            assert!(grid.is_complete(&path.rows), "incomplete path {:?}", path.rows);
            assert!(grid.valid_path(&path.levels));
        }
    }

    #[test]
    fn test_random_paths_restart_when_stuck() {
        // Levels {0.25, 0.5} over two variables: 0.25 + 0.25 leaves no room,
        // so such draws must be discarded.
        let grid = LevelGrid::new(3, 2, 0.25, 2);
        let explorer = RandomExplorer::new(grid);
        let mut rng = create_rng(7);
        for _ in 0..100 {
            let path = explorer.random_path(&mut rng);
            assert_eq!(path.rows, vec![2, 2]);
        }
    }

    #[test]
    fn test_random_paths_cover_space() {
        let grid = LevelGrid::new(3, 2, 0.5, 1);
        let explorer = RandomExplorer::new(grid);
        let mut rng = create_rng(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(explorer.random_path(&mut rng).rows);
        }
        assert_eq!(seen.len(), 3);
    }
}
