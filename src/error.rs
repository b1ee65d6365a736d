//! Error types.

use crate::aco::Configuration;
use thiserror::Error;

/// Errors raised while loading objective tables or running the colony.
#[derive(Debug, Error)]
pub enum AcoError {
    /// The configuration failed [`AcoConfig::validate`](crate::aco::AcoConfig::validate).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A sampled configuration has no entry in the objective table.
    ///
    /// The table is expected to enumerate every feasible configuration, so
    /// this aborts the run.
    #[error("configuration {configuration} not found in objective table")]
    ObjectiveMiss { configuration: Configuration },

    /// The attempt budget ran out before an ant produced a valid path.
    #[error("no valid path after {attempts} attempts")]
    AttemptsExhausted { attempts: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A field of the objective table could not be parsed as a number.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A level value does not sit on the discretization grid.
    #[error("line {line}: level {value} is not on the grid")]
    OffGrid { line: usize, value: f64 },

    #[error("line {line}: score is not finite")]
    NonFiniteScore { line: usize },
}
