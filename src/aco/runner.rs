//! Colony execution: seeding, the generation loop, and repetitions.
//!
//! [`GenerationRunner`] owns the state of one repetition (pheromone matrix,
//! global solution record, discovered configurations) and advances it one
//! generation at a time. [`AcoRunner`] drives whole repetitions.

use super::config::AcoConfig;
use super::explorer::RandomExplorer;
use super::grid::LevelGrid;
use super::objective::ObjectiveTable;
use super::path::PathBuilder;
use super::pheromone::PheromoneMatrix;
use super::record::SolutionRecord;
use super::types::{AntPath, Configuration, Solution};
use super::updater::PheromoneUpdater;
use crate::error::AcoError;
use crate::random::{create_rng, rng_from};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

/// Statistics of one generation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best score among this generation's ants.
    pub generation_best: f64,
    /// Best score seen so far in the repetition.
    pub global_best: f64,
    /// Distinct scores reached by this generation's ants.
    pub distinct_scores: usize,
    /// Path constructions spent on all ants, invalid ones included.
    pub attempts: usize,
    /// Most constructions a single ant needed.
    pub max_attempts_per_ant: usize,
}

/// What one generation produced.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub stats: GenerationStats,
    /// Best solution of the generation.
    pub best: Solution,
    /// Best solution of the repetition so far.
    pub global_best: Solution,
}

/// Result of one repetition.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepetitionResult {
    /// Zero-based repetition index.
    pub repetition: usize,
    /// Best solution of the last generation.
    pub final_generation_best: Solution,
    /// Best solution across all generations.
    pub global_best: Solution,
    /// Distinct configurations the ants sampled.
    pub distinct_configurations: usize,
    /// Distinct scores the ants reached.
    pub distinct_scores: usize,
    /// Per-generation statistics.
    pub history: Vec<GenerationStats>,
    /// Pheromone matrix after the last update.
    pub pheromone: PheromoneMatrix,
}

/// Result of a full experiment.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// One entry per repetition, in order.
    pub repetitions: Vec<RepetitionResult>,
    /// Best global solution over all repetitions (earliest repetition on ties).
    pub best: Solution,
}

struct AntReport {
    path: AntPath,
    score: f64,
    attempts: usize,
}

/// Runs one repetition generation by generation.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, GenerationRunner, ObjectiveTable};
/// use u_aco::random::create_rng;
///
/// let config = AcoConfig::default().with_grid(3, 2, 0.5).with_ants(10);
/// let table = ObjectiveTable::from_fn(&config.grid(), |levels| levels[1]);
/// let mut runner = GenerationRunner::new(&table, &config);
/// let mut rng = create_rng(7);
///
/// runner.seed_pheromone(&mut rng).unwrap();
/// let outcome = runner.run_generation(&mut rng).unwrap();
/// assert!(outcome.stats.global_best >= outcome.stats.generation_best);
/// ```
pub struct GenerationRunner<'a> {
    table: &'a ObjectiveTable,
    config: &'a AcoConfig,
    grid: LevelGrid,
    builder: PathBuilder,
    explorer: RandomExplorer,
    updater: PheromoneUpdater,
    pheromone: PheromoneMatrix,
    global: SolutionRecord,
    discovered: HashSet<Configuration>,
    generation: usize,
}

impl<'a> GenerationRunner<'a> {
    /// Creates a fresh repetition with every cell at `initial_pheromone`.
    pub fn new(table: &'a ObjectiveTable, config: &'a AcoConfig) -> Self {
        let grid = config.grid();
        Self {
            table,
            config,
            grid,
            builder: PathBuilder::new(grid),
            explorer: RandomExplorer::new(grid),
            updater: PheromoneUpdater::from_config(config),
            pheromone: PheromoneMatrix::new(grid.rows(), grid.cols(), config.initial_pheromone),
            global: SolutionRecord::new(config.tie_policy),
            discovered: HashSet::new(),
            generation: 0,
        }
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn pheromone_mut(&mut self) -> &mut PheromoneMatrix {
        &mut self.pheromone
    }

    /// Number of generations run so far.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn distinct_configurations(&self) -> usize {
        self.discovered.len()
    }

    /// Best solution of the repetition so far.
    pub fn global_best(&self) -> Option<Solution> {
        self.global
            .best()
            .map(|(score, path)| self.solution(score, path))
    }

    /// Lays `ph_init` along `n_ants` random feasible paths.
    ///
    /// Each path is looked up in the objective table, so a missing
    /// configuration aborts here too, but the scores take no part in best
    /// tracking.
    pub fn seed_pheromone<R: Rng>(&mut self, rng: &mut R) -> Result<(), AcoError> {
        for _ in 0..self.config.n_ants {
            let path = self.explorer.random_path(rng);
            self.table.lookup(&path.rows)?;
            self.pheromone.deposit(&path.rows, self.config.ph_init);
            trace!(rows = ?path.rows, "seeded path");
        }
        Ok(())
    }

    /// Samples, scores and records `n_ants` ants, then updates the pheromone.
    pub fn run_generation<R: Rng>(&mut self, rng: &mut R) -> Result<GenerationOutcome, AcoError> {
        let ants = self.sample_ants(rng)?;

        let mut record = SolutionRecord::new(self.config.tie_policy);
        let mut attempts = 0usize;
        let mut max_attempts_per_ant = 0usize;

        for ant in ants {
            attempts += ant.attempts;
            max_attempts_per_ant = max_attempts_per_ant.max(ant.attempts);

            let configuration = Configuration::new(ant.path.rows);
            self.discovered.insert(configuration.clone());
            record.insert(ant.score, configuration.clone());
            self.global.insert(ant.score, configuration);
        }

        let best = record
            .best()
            .map(|(score, path)| self.solution(score, path))
            .ok_or_else(|| AcoError::InvalidConfig("generation produced no ants".into()))?;
        let global_best = self
            .global_best()
            .ok_or_else(|| AcoError::InvalidConfig("generation produced no ants".into()))?;

        self.updater
            .update(&mut self.pheromone, &record, Some(&global_best.path));

        let stats = GenerationStats {
            generation: self.generation,
            generation_best: best.score,
            global_best: global_best.score,
            distinct_scores: record.len(),
            attempts,
            max_attempts_per_ant,
        };
        debug!(
            generation = stats.generation,
            generation_best = stats.generation_best,
            global_best = stats.global_best,
            attempts = stats.attempts,
            "generation complete"
        );

        self.generation += 1;
        Ok(GenerationOutcome {
            stats,
            best,
            global_best,
        })
    }

    fn sample_ants<R: Rng>(&self, rng: &mut R) -> Result<Vec<AntReport>, AcoError> {
        // One seed per ant keeps results independent of scheduling.
        let seeds: Vec<u64> = (0..self.config.n_ants).map(|_| rng.random()).collect();

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return seeds.par_iter().map(|&seed| self.sample_ant(seed)).collect();
            }
        }

        seeds.iter().map(|&seed| self.sample_ant(seed)).collect()
    }

    fn sample_ant(&self, seed: u64) -> Result<AntReport, AcoError> {
        let mut rng = create_rng(seed);
        let (path, attempts) = self
            .builder
            .build_valid(&self.pheromone, self.config.max_attempts, &mut rng)
            .inspect_err(|e| warn!(generation = self.generation, error = %e, "ant gave up"))?;
        let score = self.table.lookup(&path.rows)?;
        Ok(AntReport {
            path,
            score,
            attempts,
        })
    }

    fn solution(&self, score: f64, path: &Configuration) -> Solution {
        Solution {
            score,
            path: path.clone(),
            levels: self.grid.levels_of(path.rows()),
        }
    }
}

/// Executes complete experiments: independent repetitions of seeding
/// followed by `generations` generations.
///
/// # Usage
///
/// ```
/// use u_aco::aco::{AcoConfig, AcoRunner, ObjectiveTable};
///
/// let config = AcoConfig::default()
///     .with_grid(3, 2, 0.5)
///     .with_repetitions(2)
///     .with_generations(5)
///     .with_ants(50)
///     .with_seed(42);
/// let table = ObjectiveTable::from_fn(&config.grid(), |levels| levels[1]);
///
/// let result = AcoRunner::run(&table, &config).unwrap();
/// assert_eq!(result.repetitions.len(), 2);
/// assert_eq!(result.best.score, 1.0);
/// ```
pub struct AcoRunner;

impl AcoRunner {
    /// Runs every repetition and returns their results.
    ///
    /// Fails on an invalid configuration, a table whose width differs from
    /// the grid, an objective-table miss, or an exhausted attempt budget.
    pub fn run(table: &ObjectiveTable, config: &AcoConfig) -> Result<AcoResult, AcoError> {
        check(table, config)?;

        let mut rng = rng_from(config.seed);
        let seeds: Vec<u64> = (0..config.repetitions).map(|_| rng.random()).collect();
        let run_one = |(i, &seed): (usize, &u64)| Self::run_repetition(table, config, i, seed);

        #[cfg(feature = "parallel")]
        let repetitions: Vec<RepetitionResult> = if config.parallel {
            seeds.par_iter().enumerate().map(run_one).collect::<Result<_, _>>()?
        } else {
            seeds.iter().enumerate().map(run_one).collect::<Result<_, _>>()?
        };
        #[cfg(not(feature = "parallel"))]
        let repetitions: Vec<RepetitionResult> =
            seeds.iter().enumerate().map(run_one).collect::<Result<_, _>>()?;

        let best = repetitions
            .iter()
            .map(|r| &r.global_best)
            .fold(None::<&Solution>, |acc, s| match acc {
                Some(b) if b.score >= s.score => Some(b),
                _ => Some(s),
            })
            .cloned()
            .ok_or_else(|| AcoError::InvalidConfig("repetitions must be positive".into()))?;

        Ok(AcoResult { repetitions, best })
    }

    /// Runs a single repetition from its own seed.
    pub fn run_repetition(
        table: &ObjectiveTable,
        config: &AcoConfig,
        repetition: usize,
        seed: u64,
    ) -> Result<RepetitionResult, AcoError> {
        check(table, config)?;

        let mut rng = create_rng(seed);
        let mut runner = GenerationRunner::new(table, config);
        runner.seed_pheromone(&mut rng)?;

        let mut history = Vec::with_capacity(config.generations);
        let mut last = None;
        for _ in 0..config.generations {
            let outcome = runner.run_generation(&mut rng)?;
            history.push(outcome.stats);
            last = Some(outcome.best);
        }

        let final_generation_best = last
            .ok_or_else(|| AcoError::InvalidConfig("generations must be positive".into()))?;
        let global_best = runner
            .global_best()
            .ok_or_else(|| AcoError::InvalidConfig("generations must be positive".into()))?;

        info!(
            repetition,
            best_score = final_generation_best.score,
            global_best = global_best.score,
            distinct_configurations = runner.distinct_configurations(),
            "repetition complete"
        );

        Ok(RepetitionResult {
            repetition,
            final_generation_best,
            global_best,
            distinct_configurations: runner.distinct_configurations(),
            distinct_scores: runner.global.len(),
            history,
            pheromone: runner.pheromone,
        })
    }
}

fn check(table: &ObjectiveTable, config: &AcoConfig) -> Result<(), AcoError> {
    config.validate().map_err(AcoError::InvalidConfig)?;
    if table.cols() != config.cols {
        return Err(AcoError::InvalidConfig(format!(
            "objective table has {} columns, grid has {}",
            table.cols(),
            config.cols
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
