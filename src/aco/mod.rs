//! Ant Colony Optimization over a discretized mixture grid.
//!
//! Each of `cols` variables takes one of `rows` evenly spaced levels
//! (`0, step, 2·step, …`), and a configuration is feasible when its levels sum
//! to exactly 1. Ants build configurations column by column, drawing each level
//! with probability proportional to the pheromone on it; the colony then
//! evaporates the pheromone and reinforces the paths of the best and other
//! distinct solutions. Scores come from a precomputed [`ObjectiveTable`] and
//! are maximized.
//!
//! # Key Types
//!
//! - [`AcoConfig`]: grid shape and tuning parameters
//! - [`PheromoneMatrix`]: `rows × cols` pheromone weights
//! - [`PathBuilder`]: pheromone-biased path construction
//! - [`RandomExplorer`]: random feasible paths for initial seeding
//! - [`PheromoneUpdater`]: evaporation and reinforcement
//! - [`GenerationRunner`]: one repetition, advanced generation by generation
//! - [`AcoRunner`]: complete experiments over independent repetitions
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a Colony
//!   of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*

mod config;
mod explorer;
mod grid;
mod objective;
mod path;
mod pheromone;
mod record;
mod runner;
mod types;
mod updater;

pub use config::{AcoConfig, TiePolicy};
pub use explorer::RandomExplorer;
pub use grid::{round_to, LevelGrid};
pub use objective::{ObjectiveTable, TableFormat};
pub use path::PathBuilder;
pub use pheromone::PheromoneMatrix;
pub use record::SolutionRecord;
pub use runner::{
    AcoResult, AcoRunner, GenerationOutcome, GenerationRunner, GenerationStats, RepetitionResult,
};
pub use types::{AntPath, Configuration, Solution};
pub use updater::PheromoneUpdater;
