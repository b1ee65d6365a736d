//! Evaporation and reinforcement.

use super::config::AcoConfig;
use super::pheromone::PheromoneMatrix;
use super::record::SolutionRecord;
use super::types::Configuration;

/// Applies the end-of-generation pheromone update.
///
/// All of a generation's deposits are gathered in a separate zero matrix and
/// added after evaporation, so this generation's pheromone is never decayed.
#[derive(Debug, Clone, Copy)]
pub struct PheromoneUpdater {
    evaporation: f64,
    ph_bestsol: f64,
    ph_sol: f64,
}

impl PheromoneUpdater {
    pub fn new(evaporation: f64, ph_bestsol: f64, ph_sol: f64) -> Self {
        Self {
            evaporation,
            ph_bestsol,
            ph_sol,
        }
    }

    pub fn from_config(config: &AcoConfig) -> Self {
        Self::new(config.evaporation, config.ph_bestsol, config.ph_sol)
    }

    /// Deposits for one generation, before they are merged into the matrix.
    ///
    /// The generation best receives `ph_bestsol`, every other distinct score
    /// `ph_sol`, and `global_best` another `ph_bestsol` on top.
    pub fn deposits(
        &self,
        rows: usize,
        cols: usize,
        generation: &SolutionRecord,
        global_best: Option<&Configuration>,
    ) -> PheromoneMatrix {
        let mut deposits = PheromoneMatrix::zeros(rows, cols);
        let best_score = generation.best().map(|(score, _)| score);

        for (score, path) in generation.iter() {
            let qty = if Some(score) == best_score {
                self.ph_bestsol
            } else {
                self.ph_sol
            };
            deposits.deposit(path.rows(), qty);
        }

        if let Some(path) = global_best {
            deposits.deposit(path.rows(), self.ph_bestsol);
        }

        deposits
    }

    /// Evaporates `matrix`, then adds this generation's deposits.
    pub fn update(
        &self,
        matrix: &mut PheromoneMatrix,
        generation: &SolutionRecord,
        global_best: Option<&Configuration>,
    ) {
        let deposits = self.deposits(matrix.rows(), matrix.cols(), generation, global_best);
        matrix.evaporate(self.evaporation);
        matrix.add(&deposits);
    }
}
