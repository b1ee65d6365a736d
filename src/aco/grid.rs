//! Discretized level grid.
//!
//! Feasibility is tracked in integer step units: a path is complete when the
//! row indices it picked add up to `units = 1 / step`. Level values are only
//! materialized for reporting and table keys.

use super::types::Configuration;

/// Rounds `x` to `decimals` decimal digits.
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (x * factor).round() / factor
}

/// Shape and spacing of the level grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGrid {
    rows: usize,
    cols: usize,
    step: f64,
    decimals: u32,
    units: usize,
}

impl LevelGrid {
    /// Creates a grid of `rows` levels for each of `cols` variables.
    ///
    /// Pair with [`AcoConfig::validate`](super::AcoConfig::validate) to reject
    /// grids whose step does not divide 1.
    pub fn new(rows: usize, cols: usize, step: f64, decimals: u32) -> Self {
        let units = if step > 0.0 {
            (1.0 / step).round() as usize
        } else {
            0
        };
        Self {
            rows,
            cols,
            step,
            decimals,
            units,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Number of steps that make up a full sum of 1.
    pub fn units(&self) -> usize {
        self.units
    }

    /// Level value of a row: `row · step`, rounded.
    pub fn level(&self, row: usize) -> f64 {
        round_to(row as f64 * self.step, self.decimals)
    }

    /// Row holding `level`, or `None` if the value is off-grid or out of range.
    pub fn row_of(&self, level: f64) -> Option<usize> {
        if !level.is_finite() || level < 0.0 {
            return None;
        }
        let row = (level / self.step).round();
        if row >= self.rows as f64 {
            return None;
        }
        let row = row as usize;
        if (self.level(row) - level).abs() > 1e-6 {
            return None;
        }
        Some(row)
    }

    /// Level values of a row path.
    pub fn levels_of(&self, rows: &[usize]) -> Vec<f64> {
        rows.iter().map(|&r| self.level(r)).collect()
    }

    /// Number of rows selectable when `used` units are already committed.
    ///
    /// Row `r` is admissible while `used + r <= units`; the admissible rows are
    /// always a prefix `0..n`. The filter only bounds overshoot: it does not
    /// look ahead to the remaining columns.
    pub fn feasible_rows(&self, used: usize) -> usize {
        if used > self.units {
            return 0;
        }
        (self.units - used + 1).min(self.rows)
    }

    /// Returns `true` iff the levels sum to exactly 1 at the grid's precision.
    pub fn valid_path(&self, levels: &[f64]) -> bool {
        let sum: f64 = levels.iter().sum();
        round_to(sum, self.decimals) == 1.0
    }

    /// Returns `true` iff `rows` has one entry per column and sums to 1.
    pub fn is_complete(&self, rows: &[usize]) -> bool {
        rows.len() == self.cols
            && rows.iter().all(|&r| r < self.rows)
            && rows.iter().sum::<usize>() == self.units
    }

    /// Every configuration of the grid whose levels sum to 1.
    ///
    /// Configurations are listed in lexicographic row order.
    pub fn enumerate_valid(&self) -> Vec<Configuration> {
        let mut out = Vec::new();
        if self.rows == 0 {
            return out;
        }
        let mut current = Vec::with_capacity(self.cols);
        self.enumerate_from(0, self.units, &mut current, &mut out);
        out
    }

    fn enumerate_from(
        &self,
        col: usize,
        remaining: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Configuration>,
    ) {
        if col == self.cols {
            if remaining == 0 {
                out.push(Configuration::new(current.clone()));
            }
            return;
        }
        // The columns after this one can absorb at most this many units.
        let capacity_after = (self.cols - col - 1) * (self.rows - 1);
        let max_row = remaining.min(self.rows - 1);
        for row in 0..=max_row {
            if remaining - row > capacity_after {
                continue;
            }
            current.push(row);
            self.enumerate_from(col + 1, remaining - row, current, out);
            current.pop();
        }
    }
}
