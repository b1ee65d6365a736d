//! Pheromone-biased path construction and path validation.

use super::grid::LevelGrid;
use super::pheromone::PheromoneMatrix;
use super::types::AntPath;
use crate::error::AcoError;
use rand::Rng;

/// Samples level paths column by column from a pheromone matrix.
///
/// At each column only the rows that keep the running sum at or below 1 are
/// eligible, and one of them is drawn with probability proportional to its
/// pheromone. The filter does not look ahead, so a finished path may still
/// fall short of 1; [`build_valid`](PathBuilder::build_valid) resamples until
/// it does not.
#[derive(Debug, Clone, Copy)]
pub struct PathBuilder {
    grid: LevelGrid,
}

impl PathBuilder {
    pub fn new(grid: LevelGrid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &LevelGrid {
        &self.grid
    }

    /// Builds one path. The result is not necessarily valid.
    pub fn build<R: Rng>(&self, matrix: &PheromoneMatrix, rng: &mut R) -> AntPath {
        let cols = self.grid.cols();
        let mut rows = Vec::with_capacity(cols);
        let mut levels = Vec::with_capacity(cols);
        let mut used = 0usize;

        for col in 0..cols {
            // used <= units holds throughout, so row 0 is always eligible.
            let eligible = self.grid.feasible_rows(used).max(1);
            let row = select_row(matrix, col, eligible, rng);
            rows.push(row);
            levels.push(self.grid.level(row));
            used += row;
        }

        AntPath { levels, rows }
    }

    /// Builds paths until one sums to exactly 1.
    ///
    /// Returns the path and the number of constructions it took. With
    /// `max_attempts = None` this keeps trying forever.
    pub fn build_valid<R: Rng>(
        &self,
        matrix: &PheromoneMatrix,
        max_attempts: Option<usize>,
        rng: &mut R,
    ) -> Result<(AntPath, usize), AcoError> {
        let mut attempts = 0usize;
        loop {
            attempts += 1;
            let path = self.build(matrix, rng);
            if self.grid.valid_path(&path.levels) {
                return Ok((path, attempts));
            }
            if max_attempts.is_some_and(|max| attempts >= max) {
                return Err(AcoError::AttemptsExhausted { attempts });
            }
        }
    }
}

/// Roulette draw over rows `0..eligible` of `col`, weighted by pheromone.
///
/// Zero-pheromone rows are never drawn unless every eligible row is zero, in
/// which case the draw is uniform.
fn select_row<R: Rng>(matrix: &PheromoneMatrix, col: usize, eligible: usize, rng: &mut R) -> usize {
    if eligible == 1 {
        return 0;
    }

    let total: f64 = matrix.column_prefix(col, eligible).sum();
    if total <= 0.0 || !total.is_finite() {
        return rng.random_range(0..eligible);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (row, weight) in matrix.column_prefix(col, eligible).enumerate() {
        if weight > 0.0 {
            cumulative += weight;
            last_positive = row;
            if cumulative > threshold {
                return row;
            }
        }
    }

    last_positive // floating-point fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn scenario_grid() -> LevelGrid {
        LevelGrid::new(3, 2, 0.5, 1)
    }

    #[test]
    fn test_build_favors_heavy_rows() {
        let grid = scenario_grid();
        let mut m = PheromoneMatrix::new(3, 2, 1e-6);
        m.set(0, 0, 1e6);
        m.set(2, 1, 1e6);
        let builder = PathBuilder::new(grid);
        let mut rng = create_rng(42);

        let hits = (0..100)
            .filter(|_| {
                let (path, _) = builder.build_valid(&m, Some(1000), &mut rng).unwrap();
                path.rows == vec![0, 2]
            })
            .count();
        assert!(hits >= 99, "expected [0, 2] nearly always, got {hits}/100");
    }

    #[test]
    fn test_build_levels_match_rows() {
        let grid = LevelGrid::new(6, 16, 0.2, 1);
        let builder = PathBuilder::new(grid);
        let m = PheromoneMatrix::new(6, 16, 1.0);
        let mut rng = create_rng(3);
        for _ in 0..50 {
            let path = builder.build(&m, &mut rng);
            assert_eq!(path.rows.len(), 16);
            assert_eq!(path.levels, grid.levels_of(&path.rows));
        }
    }

    #[test]
    fn test_overshoot_is_impossible() {
        // Column 0 strongly prefers level 1.0: the remaining columns are
        // forced to level 0.
        let grid = scenario_grid();
        let mut m = PheromoneMatrix::new(3, 2, 1.0);
        m.set(2, 0, 1e9);
        m.set(2, 1, 1e9);
        let builder = PathBuilder::new(grid);
        let mut rng = create_rng(5);
        for _ in 0..100 {
            let path = builder.build(&m, &mut rng);
            if path.rows[0] == 2 {
                assert_eq!(path.rows[1], 0);
            }
        }
    }

    #[test]
    fn test_row_zero_only_exhausts_attempts() {
        let grid = scenario_grid();
        let mut m = PheromoneMatrix::zeros(3, 2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 1.0);
        let builder = PathBuilder::new(grid);
        let mut rng = create_rng(11);

        let path = builder.build(&m, &mut rng);
        assert_eq!(path.rows, vec![0, 0]);
        assert!(!grid.valid_path(&path.levels));

        match builder.build_valid(&m, Some(50), &mut rng) {
            Err(AcoError::AttemptsExhausted { attempts }) => assert_eq!(attempts, 50),
            other => panic!("expected exhausted attempts, got {other:?}"),
        }
    }

    #[test]
    fn test_reachable_pheromone_terminates() {
        let grid = scenario_grid();
        let mut m = PheromoneMatrix::zeros(3, 2);
        m.set(0, 0, 1.0);
        m.set(0, 1, 1.0);
        m.set(2, 1, 1.0);
        let builder = PathBuilder::new(grid);
        let mut rng = create_rng(11);

        let (path, attempts) = builder.build_valid(&m, None, &mut rng).unwrap();
        assert_eq!(path.rows, vec![0, 2]);
        assert!(attempts >= 1);
    }

    #[test]
    fn test_all_zero_column_draws_uniformly() {
        let grid = scenario_grid();
        let m = PheromoneMatrix::zeros(3, 2);
        let builder = PathBuilder::new(grid);
        let mut rng = create_rng(8);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[builder.build(&m, &mut rng).rows[0]] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let grid = LevelGrid::new(6, 16, 0.2, 1);
        let builder = PathBuilder::new(grid);
        let m = PheromoneMatrix::new(6, 16, 1.0);
        let a = builder.build_valid(&m, None, &mut create_rng(99)).unwrap();
        let b = builder.build_valid(&m, None, &mut create_rng(99)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_prefix_sums_never_exceed_one(
            cells in proptest::collection::vec(0.001f64..100.0, 6 * 16),
            seed in any::<u64>(),
        ) {
            let grid = LevelGrid::new(6, 16, 0.2, 1);
            let mut m = PheromoneMatrix::zeros(6, 16);
            for (i, v) in cells.iter().enumerate() {
                m.set(i / 16, i % 16, *v);
            }
            let path = PathBuilder::new(grid).build(&m, &mut create_rng(seed));
            let mut sum = 0.0;
            for level in &path.levels {
                sum += level;
                prop_assert!(sum <= 1.0 + 1e-9, "prefix sum {} exceeds 1", sum);
            }
        }

        #[test]
        fn prop_valid_path_iff_sum_is_one(rows in proptest::collection::vec(0usize..6, 1..8)) {
            let grid = LevelGrid::new(6, rows.len(), 0.2, 1);
            let levels = grid.levels_of(&rows);
            let expected = rows.iter().sum::<usize>() == 5;
            prop_assert_eq!(grid.valid_path(&levels), expected);
        }
    }
}
