//! Command-line runner for the assortative cooperation simulation.

mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use coop_core::Parameters;
use coop_world::{DelimitedReporter, Simulation};
use rand::Rng;
use std::path::PathBuf;
use tracing::info;

/// Evolution of cooperation under assortative interaction in a patch-structured population
#[derive(Parser, Debug)]
#[command(name = "coop-sim")]
#[command(about = "Individual-based simulation of cooperation with assortment, dispersal and mortality")]
struct Args {
    /// JSON parameter file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed (drawn from OS entropy if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (defaults to the base name)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Mutation probability per birth
    #[arg(long)]
    mu: Option<f64>,

    /// Output identifier
    #[arg(long)]
    base_name: Option<String>,

    /// Number of patches
    #[arg(long)]
    npatches: Option<usize>,

    /// Number of generations
    #[arg(long)]
    max_time: Option<u64>,

    /// Breeders per patch (even)
    #[arg(long)]
    npp: Option<usize>,

    /// Benefit of receiving help
    #[arg(short = 'B', long = "benefit")]
    benefit: Option<f64>,

    /// Cost of helping
    #[arg(short = 'C', long = "cost")]
    cost: Option<f64>,

    /// Synergy of mutual cooperation
    #[arg(short = 'D', long = "synergy")]
    synergy: Option<f64>,

    /// Assortment strength in [0, 1]
    #[arg(long)]
    alpha: Option<f64>,

    /// Probability a candidate parent is drawn from a random patch
    #[arg(short = 'd', long = "dispersal")]
    dispersal: Option<f64>,

    /// Per-generation death probability
    #[arg(long)]
    mortality_prob: Option<f64>,

    /// Candidate parents sampled per replacement
    #[arg(long)]
    n_parents_sample: Option<usize>,

    /// Write a record every this many generations
    #[arg(long)]
    output_nth_generation: Option<u64>,

    /// Fraction of founders that cooperate
    #[arg(long)]
    initial_coop_fraction: Option<f64>,
}

impl Args {
    fn parameters(&self) -> Result<Parameters> {
        let mut params = match &self.config {
            Some(path) => Parameters::from_json_file(path)
                .with_context(|| format!("failed to load parameters from {}", path.display()))?,
            None => Parameters::default(),
        };

        if let Some(mu) = self.mu {
            params.mu = mu;
        }
        if let Some(base_name) = &self.base_name {
            params.base_name = base_name.clone();
        }
        if let Some(npatches) = self.npatches {
            params.npatches = npatches;
        }
        if let Some(max_time) = self.max_time {
            params.max_time = max_time;
        }
        if let Some(npp) = self.npp {
            params.npp = npp;
        }
        if let Some(benefit) = self.benefit {
            params.benefit = benefit;
        }
        if let Some(cost) = self.cost {
            params.cost = cost;
        }
        if let Some(synergy) = self.synergy {
            params.synergy = synergy;
        }
        if let Some(alpha) = self.alpha {
            params.alpha = alpha;
        }
        if let Some(dispersal) = self.dispersal {
            params.dispersal = dispersal;
        }
        if let Some(mortality_prob) = self.mortality_prob {
            params.mortality_prob = mortality_prob;
        }
        if let Some(n_parents_sample) = self.n_parents_sample {
            params.n_parents_sample = n_parents_sample;
        }
        if let Some(nth) = self.output_nth_generation {
            params.output_nth_generation = nth;
        }
        if let Some(fraction) = self.initial_coop_fraction {
            params.initial_coop_fraction = fraction;
        }

        Ok(params)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    telemetry::init_telemetry(args.log_json)?;

    let params = args.parameters()?;
    params.validate().context("invalid parameters")?;

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&params.base_name));

    info!(seed, output = %output.display(), "Writing records");

    let reporter = DelimitedReporter::create(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let mut sim = Simulation::new(params, seed, reporter)?;
    let stats = sim.run()?;

    info!(
        mean_coop = stats.mean(),
        var_coop = stats.variance(),
        "Run complete"
    );

    Ok(())
}
