//! Ant colony experiment CLI.
//!
//! Loads an objective table, runs the configured repetitions, and reports the
//! best configuration of each repetition.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_aco::aco::{AcoConfig, AcoResult, AcoRunner, LevelGrid, ObjectiveTable, TableFormat, TiePolicy};

#[derive(Parser)]
#[command(name = "u-aco")]
#[command(about = "Ant colony search for the best-scoring mixture configuration")]
struct Cli {
    /// Objective table: one level per variable followed by the score
    #[arg(required_unless_present = "synthetic")]
    table: Option<PathBuf>,

    /// Score a synthetic quadratic mixture response instead of reading a table
    #[arg(long, conflicts_with = "table")]
    synthetic: bool,

    /// Field delimiter of the table
    #[arg(long, default_value = ";")]
    delimiter: char,

    /// Skip the first line of the table
    #[arg(long)]
    skip_header: bool,

    /// JSON file with an AcoConfig; command-line values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Levels per variable
    #[arg(long)]
    rows: Option<usize>,

    /// Number of variables
    #[arg(long)]
    cols: Option<usize>,

    /// Spacing between levels
    #[arg(long)]
    step: Option<f64>,

    /// Decimal digits levels are rounded to
    #[arg(long)]
    decimals: Option<u32>,

    #[arg(long)]
    repetitions: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    /// Ants per generation
    #[arg(long)]
    ants: Option<usize>,

    #[arg(long)]
    initial_pheromone: Option<f64>,

    /// Evaporation factor in (0, 1]
    #[arg(long)]
    evaporation: Option<f64>,

    /// Pheromone per random explorer during seeding
    #[arg(long)]
    ph_init: Option<f64>,

    /// Pheromone on the generation and global best
    #[arg(long)]
    ph_bestsol: Option<f64>,

    /// Pheromone on other distinct solutions
    #[arg(long)]
    ph_sol: Option<f64>,

    /// Path constructions allowed per ant
    #[arg(long, conflicts_with = "unbounded_attempts")]
    max_attempts: Option<usize>,

    /// Retry path construction without limit
    #[arg(long)]
    unbounded_attempts: bool,

    /// Keep the first path seen for a tied score instead of the latest
    #[arg(long)]
    keep_earliest: bool,

    /// Sample ants and repetitions in parallel (needs the `parallel` feature)
    #[arg(long)]
    parallel: bool,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write the full result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<AcoConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AcoConfig::default(),
    };

    if let Some(v) = cli.rows {
        config.rows = v;
    }
    if let Some(v) = cli.cols {
        config.cols = v;
    }
    if let Some(v) = cli.step {
        config.step = v;
    }
    if let Some(v) = cli.decimals {
        config.level_decimals = v;
    }
    if let Some(v) = cli.repetitions {
        config.repetitions = v;
    }
    if let Some(v) = cli.generations {
        config.generations = v;
    }
    if let Some(v) = cli.ants {
        config.n_ants = v;
    }
    if let Some(v) = cli.initial_pheromone {
        config.initial_pheromone = v;
    }
    if let Some(v) = cli.evaporation {
        config.evaporation = v;
    }
    if let Some(v) = cli.ph_init {
        config.ph_init = v;
    }
    if let Some(v) = cli.ph_bestsol {
        config.ph_bestsol = v;
    }
    if let Some(v) = cli.ph_sol {
        config.ph_sol = v;
    }
    if let Some(v) = cli.max_attempts {
        config.max_attempts = Some(v);
    }
    if cli.unbounded_attempts {
        config.max_attempts = None;
    }
    if cli.keep_earliest {
        config.tie_policy = TiePolicy::KeepEarliest;
    }
    if cli.parallel {
        config.parallel = true;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;
    Ok(config)
}

/// Quadratic mixture response: linear blending terms minus a curvature penalty.
fn synthetic_table(grid: &LevelGrid) -> ObjectiveTable {
    let cols = grid.cols();
    ObjectiveTable::from_fn(grid, |levels| {
        levels
            .iter()
            .enumerate()
            .map(|(i, x)| {
                let weight = ((i * 7) % cols) as f64 / cols as f64;
                weight * x - 0.5 * x * x
            })
            .sum()
    })
}

fn load_table(cli: &Cli, grid: &LevelGrid) -> Result<ObjectiveTable> {
    if cli.synthetic {
        return Ok(synthetic_table(grid));
    }
    let Some(path) = &cli.table else {
        bail!("no objective table given");
    };
    let format = TableFormat::default()
        .with_delimiter(cli.delimiter)
        .with_header(cli.skip_header);
    ObjectiveTable::from_path(grid, path, format)
        .with_context(|| format!("loading objective table {}", path.display()))
}

fn report(result: &AcoResult) {
    for rep in &result.repetitions {
        let best = &rep.final_generation_best;
        println!("=== Repetition {} ===", rep.repetition + 1);
        println!(">>> Best path {:?} : {:.3}", best.path.rows(), best.score);
        println!(">>> Unique experiments : {}", rep.distinct_configurations);
    }
    println!("\n=== Overall Best ===");
    println!("Path: {:?}", result.best.path.rows());
    println!("Levels: {:?}", result.best.levels);
    println!("Score: {:.3}", result.best.score);
}

fn write_output(result: &AcoResult, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(result)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "results saved");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;
    let grid = config.grid();
    let table = load_table(&cli, &grid)?;
    info!(
        entries = table.len(),
        rows = grid.rows(),
        cols = grid.cols(),
        "objective table ready"
    );

    let result = AcoRunner::run(&table, &config)?;
    report(&result);

    if let Some(path) = &cli.output {
        write_output(&result, path)?;
    }

    Ok(())
}
