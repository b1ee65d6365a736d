//! Score-keyed solution records.

use super::config::TiePolicy;
use super::types::Configuration;
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// Maps each distinct score to the path that achieved it.
///
/// Used once per generation and once per repetition. Two paths with the same
/// score share one entry; [`TiePolicy`] decides which path stays.
#[derive(Debug, Clone, Default)]
pub struct SolutionRecord {
    entries: BTreeMap<OrderedFloat<f64>, Configuration>,
    tie_policy: TiePolicy,
}

impl SolutionRecord {
    pub fn new(tie_policy: TiePolicy) -> Self {
        Self {
            entries: BTreeMap::new(),
            tie_policy,
        }
    }

    /// Records `path` under `score`.
    pub fn insert(&mut self, score: f64, path: Configuration) {
        match self.tie_policy {
            TiePolicy::KeepLatest => {
                self.entries.insert(OrderedFloat(score), path);
            }
            TiePolicy::KeepEarliest => {
                self.entries.entry(OrderedFloat(score)).or_insert(path);
            }
        }
    }

    /// Highest score and its path.
    pub fn best(&self) -> Option<(f64, &Configuration)> {
        self.entries
            .last_key_value()
            .map(|(score, path)| (score.into_inner(), path))
    }

    /// Number of distinct scores.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending score order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &Configuration)> {
        self.entries.iter().map(|(s, p)| (s.into_inner(), p))
    }
}
