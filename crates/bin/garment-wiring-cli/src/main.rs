//! Command-line driver for the wiring-topology experiment core.
//!
//! Out of scope for the core itself (§1): reads a clothing catalogue and a
//! line-delimited configuration file, runs one [`Experiment`] per
//! configuration line, and writes one result object per line.

use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use garment_types::ClothingItem;
use wiring_experiment::{Experiment, ExperimentConfig};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Evaluate smart-garment wiring topologies from a configuration file"
)]
struct Cli {
    /// JSON file mapping clothing-id to a ClothingItem
    #[arg(short, long)]
    catalogue: PathBuf,

    /// Line-delimited JSON file of ExperimentConfig objects
    #[arg(short = 'f', long)]
    configs: PathBuf,

    /// Where to write line-delimited ExperimentResult objects
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let catalogue_raw = fs::read_to_string(&cli.catalogue)
        .with_context(|| format!("failed to read catalogue: {}", cli.catalogue.display()))?;
    let catalogue: HashMap<String, ClothingItem> = serde_json::from_str(&catalogue_raw)
        .with_context(|| "failed to parse clothing catalogue")?;

    let configs_file = fs::File::open(&cli.configs)
        .with_context(|| format!("failed to open configs: {}", cli.configs.display()))?;
    let mut output = fs::File::create(&cli.output)
        .with_context(|| format!("failed to create output: {}", cli.output.display()))?;

    for (line_number, line) in BufReader::new(configs_file).lines().enumerate() {
        let line = line.with_context(|| format!("failed to read configs line {line_number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let config: ExperimentConfig = serde_json::from_str(&line)
            .with_context(|| format!("failed to parse config on line {line_number}"))?;

        let item = catalogue
            .get(&config.clothing_id)
            .cloned()
            .with_context(|| format!("unknown clothing_id {:?}", config.clothing_id))?;

        log::info!("running experiment {}", config.experiment_id);
        let mut rng = StdRng::seed_from_u64(config.seeds);
        let result = Experiment::run(&config, item, &mut rng)
            .with_context(|| format!("experiment {} failed", config.experiment_id))?;

        let serialized = serde_json::to_string(&result)
            .with_context(|| format!("failed to serialize result for {}", config.experiment_id))?;
        writeln!(output, "{serialized}")
            .with_context(|| format!("failed to write result for {}", config.experiment_id))?;
    }

    Ok(())
}
