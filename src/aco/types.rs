//! Core value types shared by the colony components.

use std::borrow::Borrow;
use std::fmt;

/// A configuration as its row-index path, one row per variable.
///
/// Used directly as the objective-table key: hashing the indices keeps lookups
/// exact without formatting level values into strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Configuration(Vec<usize>);

impl Configuration {
    pub fn new(rows: Vec<usize>) -> Self {
        Self(rows)
    }

    pub fn rows(&self) -> &[usize] {
        &self.0
    }

    pub fn into_rows(self) -> Vec<usize> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<usize>> for Configuration {
    fn from(rows: Vec<usize>) -> Self {
        Self(rows)
    }
}

impl Borrow<[usize]> for Configuration {
    fn borrow(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// One constructed path: level values and the rows that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct AntPath {
    /// Level value per variable.
    pub levels: Vec<f64>,
    /// Row index per variable.
    pub rows: Vec<usize>,
}

/// A scored configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Objective value (higher is better).
    pub score: f64,
    /// Row-index path.
    pub path: Configuration,
    /// Level values of `path`.
    pub levels: Vec<f64>,
}
