//! Ant colony optimization over discretized mixture grids.
//!
//! Searches a fixed, enumerable space of configurations (one discrete level
//! per variable, levels summing to one) for the configuration with the highest
//! precomputed objective value.
//!
//! - [`aco`]: pheromone matrix, path construction, validation, seeding,
//!   pheromone update, and the generation/repetition runners.
//! - [`random`]: seeded RNG construction.
//! - [`error`]: the crate's error type.
//!
//! # Example
//!
//! ```
//! use u_aco::aco::{AcoConfig, AcoRunner, ObjectiveTable};
//!
//! let config = AcoConfig::default()
//!     .with_grid(6, 4, 0.2)
//!     .with_repetitions(1)
//!     .with_generations(5)
//!     .with_ants(40)
//!     .with_seed(7);
//! let table = ObjectiveTable::from_fn(&config.grid(), |levels| levels[0] - levels[1]);
//!
//! let result = AcoRunner::run(&table, &config).unwrap();
//! assert!(config.grid().is_complete(result.best.path.rows()));
//! ```

pub mod aco;
pub mod error;
pub mod random;

pub use error::AcoError;
