//! Objective-value lookup table.
//!
//! The table maps every feasible configuration to a precomputed score. It is
//! built once, before any repetition, either from a delimited text file or by
//! scoring the enumerated grid with a closure.

use super::grid::LevelGrid;
use super::types::Configuration;
use crate::error::AcoError;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Layout of a delimited objective table.
///
/// Each record holds one level per variable followed by the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableFormat {
    /// Field separator.
    pub delimiter: char,
    /// Skip the first non-empty line.
    pub has_header: bool,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: ';',
            has_header: false,
        }
    }
}

impl TableFormat {
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }
}

/// Exact mapping from configuration to score.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveTable {
    cols: usize,
    scores: HashMap<Configuration, f64>,
}

impl ObjectiveTable {
    /// Creates an empty table for configurations of `cols` variables.
    pub fn new(cols: usize) -> Self {
        Self {
            cols,
            scores: HashMap::new(),
        }
    }

    /// Number of variables per configuration.
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Inserts or replaces the score of `configuration`.
    pub fn insert(&mut self, configuration: Configuration, score: f64) {
        self.scores.insert(configuration, score);
    }

    /// Score of the configuration with row path `rows`.
    pub fn get(&self, rows: &[usize]) -> Option<f64> {
        self.scores.get(rows).copied()
    }

    /// Score of `rows`, or [`AcoError::ObjectiveMiss`] if it is absent.
    pub fn lookup(&self, rows: &[usize]) -> Result<f64, AcoError> {
        self.get(rows).ok_or_else(|| AcoError::ObjectiveMiss {
            configuration: Configuration::new(rows.to_vec()),
        })
    }

    /// Builds a table by scoring every valid configuration of `grid`.
    ///
    /// `score` receives the level values of each configuration.
    pub fn from_fn<F>(grid: &LevelGrid, mut score: F) -> Self
    where
        F: FnMut(&[f64]) -> f64,
    {
        let mut table = Self::new(grid.cols());
        for configuration in grid.enumerate_valid() {
            let levels = grid.levels_of(configuration.rows());
            let value = score(&levels);
            table.insert(configuration, value);
        }
        table
    }

    /// Builds a table from `(levels, score)` records.
    ///
    /// Record `i` is reported as line `i + 1` in errors. A repeated
    /// configuration keeps the last score.
    pub fn from_records<I>(grid: &LevelGrid, records: I) -> Result<Self, AcoError>
    where
        I: IntoIterator<Item = (Vec<f64>, f64)>,
    {
        let mut table = Self::new(grid.cols());
        for (i, (levels, score)) in records.into_iter().enumerate() {
            let line = i + 1;
            if levels.len() != grid.cols() {
                return Err(AcoError::ColumnCount {
                    line,
                    expected: grid.cols() + 1,
                    found: levels.len() + 1,
                });
            }
            table.insert_levels(grid, line, &levels, score)?;
        }
        Ok(table)
    }

    /// Parses a delimited table.
    pub fn from_reader<R: BufRead>(
        grid: &LevelGrid,
        reader: R,
        format: TableFormat,
    ) -> Result<Self, AcoError> {
        let mut table = Self::new(grid.cols());
        let expected = grid.cols() + 1;
        let mut header_pending = format.has_header;

        for (i, line) in reader.lines().enumerate() {
            let line_no = i + 1;
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if header_pending {
                header_pending = false;
                continue;
            }

            let fields: Vec<&str> = trimmed
                .split(format.delimiter)
                .map(str::trim)
                .collect();
            if fields.len() != expected {
                return Err(AcoError::ColumnCount {
                    line: line_no,
                    expected,
                    found: fields.len(),
                });
            }

            let mut values = Vec::with_capacity(expected);
            for field in &fields {
                let value: f64 = field.parse().map_err(|_| AcoError::Parse {
                    line: line_no,
                    message: format!("cannot parse {field:?} as a number"),
                })?;
                values.push(value);
            }
            let score = values[grid.cols()];
            table.insert_levels(grid, line_no, &values[..grid.cols()], score)?;
        }

        Ok(table)
    }

    /// Reads a delimited table from a file.
    pub fn from_path<P: AsRef<Path>>(
        grid: &LevelGrid,
        path: P,
        format: TableFormat,
    ) -> Result<Self, AcoError> {
        let file = File::open(path)?;
        Self::from_reader(grid, BufReader::new(file), format)
    }

    fn insert_levels(
        &mut self,
        grid: &LevelGrid,
        line: usize,
        levels: &[f64],
        score: f64,
    ) -> Result<(), AcoError> {
        if !score.is_finite() {
            return Err(AcoError::NonFiniteScore { line });
        }
        let rows = levels
            .iter()
            .map(|&value| grid.row_of(value).ok_or(AcoError::OffGrid { line, value }))
            .collect::<Result<Vec<_>, _>>()?;
        self.insert(Configuration::new(rows), score);
        Ok(())
    }
}
