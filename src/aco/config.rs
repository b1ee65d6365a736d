//! ACO configuration.
//!
//! [`AcoConfig`] replaces the fixed constants of a hand-tuned colony with one
//! explicit object handed to every component.

use super::grid::{round_to, LevelGrid};

/// Which path a [`SolutionRecord`](super::SolutionRecord) keeps when two
/// distinct paths reach exactly the same score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TiePolicy {
    /// The most recently recorded path replaces the earlier one.
    #[default]
    KeepLatest,
    /// The first path recorded for a score is kept.
    KeepEarliest,
}

/// Configuration for the ant colony.
///
/// The grid has `rows` discretization levels (`0, step, 2·step, …`) for each
/// of `cols` variables. A configuration is feasible when its levels sum to 1.
///
/// # Defaults
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.rows, 6);
/// assert_eq!(config.cols, 16);
/// assert_eq!(config.n_ants, 100);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_aco::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_grid(3, 2, 0.5)
///     .with_generations(5)
///     .with_ants(20)
///     .with_evaporation(0.8)
///     .with_seed(42);
/// assert_eq!(config.grid().units(), 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AcoConfig {
    /// Number of discretization levels per variable (row 0 is level 0).
    pub rows: usize,

    /// Number of variables (matrix columns).
    pub cols: usize,

    /// Distance between consecutive levels.
    pub step: f64,

    /// Decimal digits levels are rounded to.
    pub level_decimals: u32,

    /// Independent runs, each with a fresh pheromone matrix.
    pub repetitions: usize,

    /// Generations per repetition.
    pub generations: usize,

    /// Ants per generation, and random explorers during seeding.
    pub n_ants: usize,

    /// Value every pheromone cell starts with.
    pub initial_pheromone: f64,

    /// Multiplicative decay applied to the matrix once per generation, in (0, 1].
    ///
    /// 1.0 disables evaporation.
    pub evaporation: f64,

    /// Pheromone each random explorer lays down before generation 0.
    pub ph_init: f64,

    /// Pheromone laid on the generation best and on the global best.
    pub ph_bestsol: f64,

    /// Pheromone laid on every other distinct solution of a generation.
    pub ph_sol: f64,

    /// Path constructions allowed per ant before giving up.
    ///
    /// `None` retries forever.
    pub max_attempts: Option<usize>,

    /// Tie handling for equal scores.
    pub tie_policy: TiePolicy,

    /// Sample ants and repetitions in parallel (requires the `parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 16,
            step: 0.2,
            level_decimals: 1,
            repetitions: 3,
            generations: 10,
            n_ants: 100,
            initial_pheromone: 1.0,
            evaporation: 0.5,
            ph_init: 20.0,
            ph_bestsol: 20.0,
            ph_sol: 2.0,
            max_attempts: Some(1_000_000),
            tie_policy: TiePolicy::default(),
            parallel: false,
            seed: None,
        }
    }
}

impl AcoConfig {
    /// Sets the grid shape and level spacing.
    pub fn with_grid(mut self, rows: usize, cols: usize, step: f64) -> Self {
        self.rows = rows;
        self.cols = cols;
        self.step = step;
        self
    }

    pub fn with_level_decimals(mut self, decimals: u32) -> Self {
        self.level_decimals = decimals;
        self
    }

    pub fn with_repetitions(mut self, n: usize) -> Self {
        self.repetitions = n;
        self
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    pub fn with_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    pub fn with_initial_pheromone(mut self, value: f64) -> Self {
        self.initial_pheromone = value;
        self
    }

    pub fn with_evaporation(mut self, factor: f64) -> Self {
        self.evaporation = factor;
        self
    }

    /// Sets the seeding, generation-best and other-solution deposits.
    pub fn with_deposits(mut self, ph_init: f64, ph_bestsol: f64, ph_sol: f64) -> Self {
        self.ph_init = ph_init;
        self.ph_bestsol = ph_bestsol;
        self.ph_sol = ph_sol;
        self
    }

    /// Bounds the number of path constructions per ant.
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = Some(n);
        self
    }

    /// Retries path construction until a valid path appears, however long it takes.
    pub fn with_unbounded_attempts(mut self) -> Self {
        self.max_attempts = None;
        self
    }

    pub fn with_tie_policy(mut self, policy: TiePolicy) -> Self {
        self.tie_policy = policy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The level grid described by this configuration.
    pub fn grid(&self) -> LevelGrid {
        LevelGrid::new(self.rows, self.cols, self.step, self.level_decimals)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows < 2 {
            return Err(format!("rows must be at least 2, got {}", self.rows));
        }
        if self.cols == 0 {
            return Err("cols must be positive".into());
        }
        if !self.step.is_finite() || self.step <= 0.0 || self.step > 1.0 {
            return Err(format!("step must be in (0, 1], got {}", self.step));
        }
        if self.level_decimals > 9 {
            return Err(format!(
                "level_decimals must be at most 9, got {}",
                self.level_decimals
            ));
        }
        if (round_to(self.step, self.level_decimals) - self.step).abs() > 1e-12 {
            return Err(format!(
                "step {} is not representable with {} decimals",
                self.step, self.level_decimals
            ));
        }
        let units = (1.0 / self.step).round();
        if (units * self.step - 1.0).abs() > 1e-9 {
            return Err(format!("1 / step must be an integer, got step {}", self.step));
        }
        if ((self.rows - 1) * self.cols) < units as usize {
            return Err(format!(
                "a {}x{} grid with step {} cannot reach a sum of 1",
                self.rows, self.cols, self.step
            ));
        }
        if self.repetitions == 0 {
            return Err("repetitions must be positive".into());
        }
        if self.generations == 0 {
            return Err("generations must be positive".into());
        }
        if self.n_ants == 0 {
            return Err("n_ants must be positive".into());
        }
        if !self.initial_pheromone.is_finite() || self.initial_pheromone <= 0.0 {
            return Err(format!(
                "initial_pheromone must be positive, got {}",
                self.initial_pheromone
            ));
        }
        if !(self.evaporation > 0.0 && self.evaporation <= 1.0) {
            return Err(format!(
                "evaporation must be in (0, 1], got {}",
                self.evaporation
            ));
        }
        for (name, value) in [
            ("ph_init", self.ph_init),
            ("ph_bestsol", self.ph_bestsol),
            ("ph_sol", self.ph_sol),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be non-negative, got {value}"));
            }
        }
        if self.max_attempts == Some(0) {
            return Err("max_attempts must be positive".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.rows, 6);
        assert_eq!(config.cols, 16);
        assert!((config.step - 0.2).abs() < 1e-12);
        assert_eq!(config.repetitions, 3);
        assert_eq!(config.generations, 10);
        assert!((config.evaporation - 0.5).abs() < 1e-12);
        assert_eq!(config.tie_policy, TiePolicy::KeepLatest);
        assert_eq!(config.max_attempts, Some(1_000_000));
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
        assert!(AcoConfig::default().with_grid(3, 2, 0.5).validate().is_ok());
    }

    #[test]
    fn test_validate_single_row() {
        let config = AcoConfig::default().with_grid(1, 4, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_integral_units() {
        let config = AcoConfig::default().with_grid(6, 4, 0.3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_step_needs_more_decimals() {
        let config = AcoConfig::default().with_grid(5, 4, 0.25);
        assert!(config.validate().is_err());
        assert!(config.with_level_decimals(2).validate().is_ok());
    }

    #[test]
    fn test_validate_unreachable_sum() {
        // Two columns of at most 0.2 each never reach 1.
        let config = AcoConfig::default().with_grid(2, 2, 0.2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_evaporation_bounds() {
        assert!(AcoConfig::default().with_evaporation(0.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation(1.5).validate().is_err());
        assert!(AcoConfig::default().with_evaporation(1.0).validate().is_ok());
    }

    #[test]
    fn test_validate_negative_deposit() {
        let config = AcoConfig::default().with_deposits(20.0, -1.0, 2.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_attempts() {
        let config = AcoConfig::default().with_max_attempts(0);
        assert!(config.validate().is_err());
        assert!(config.with_unbounded_attempts().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        assert!(AcoConfig::default().with_ants(0).validate().is_err());
        assert!(AcoConfig::default().with_generations(0).validate().is_err());
        assert!(AcoConfig::default().with_repetitions(0).validate().is_err());
    }
}
