//! Configuration types for the simulation.

use crate::{Error, PayoffMatrix, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Run parameters
///
/// Serialized names follow the conventional model notation, so a parameter
/// file uses `B`, `C`, `D` and `d` for the payoff shape and dispersal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Probability that an offspring flips its parent's strategy
    pub mu: f64,
    /// Output identifier, used as the default output path
    pub base_name: String,
    /// Number of patches
    pub npatches: usize,
    /// Number of generations to run
    pub max_time: u64,
    /// Breeders per patch (must be even)
    pub npp: usize,
    /// Benefit received from a cooperating partner
    #[serde(rename = "B")]
    pub benefit: f64,
    /// Cost paid by a cooperator
    #[serde(rename = "C")]
    pub cost: f64,
    /// Synergy bonus of mutual cooperation
    #[serde(rename = "D")]
    pub synergy: f64,
    /// Assortment strength (0.0 to 1.0)
    pub alpha: f64,
    /// Probability that a candidate parent comes from a random patch
    #[serde(rename = "d")]
    pub dispersal: f64,
    /// Per-generation death probability of each breeder
    pub mortality_prob: f64,
    /// Candidate parents sampled per replacement
    pub n_parents_sample: usize,
    /// Emit a data record every this many generations
    pub output_nth_generation: u64,
    /// Fraction of founders in each patch that start as cooperators
    pub initial_coop_fraction: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            mu: 0.001,
            base_name: "output_gardner_2011".to_string(),
            npatches: 1,
            max_time: 50_000,
            npp: 5000,
            benefit: 3.0,
            cost: 1.0,
            synergy: 2.0,
            alpha: 0.5,
            dispersal: 0.0,
            mortality_prob: 0.1,
            n_parents_sample: 20,
            output_nth_generation: 10,
            initial_coop_fraction: 0.0,
        }
    }
}

impl Parameters {
    /// Load parameters from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let params: Parameters = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), "Loaded parameter file");
        Ok(params)
    }

    /// Check every precondition the engines rely on
    pub fn validate(&self) -> Result<()> {
        if self.npatches == 0 {
            return Err(Error::Config("npatches must be at least 1".to_string()));
        }

        if self.npp == 0 || self.npp % 2 != 0 {
            return Err(Error::Config(format!(
                "npp must be a positive even number, got {}",
                self.npp
            )));
        }

        if self.n_parents_sample == 0 {
            return Err(Error::Config(
                "n_parents_sample must be at least 1".to_string(),
            ));
        }

        if self.output_nth_generation == 0 {
            return Err(Error::Config(
                "output_nth_generation must be at least 1".to_string(),
            ));
        }

        for (name, value) in [
            ("mu", self.mu),
            ("alpha", self.alpha),
            ("d", self.dispersal),
            ("mortality_prob", self.mortality_prob),
            ("initial_coop_fraction", self.initial_coop_fraction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }

        for (name, value) in [("B", self.benefit), ("C", self.cost), ("D", self.synergy)] {
            if !value.is_finite() {
                return Err(Error::Config(format!("{} must be finite, got {}", name, value)));
            }
        }

        // payoffs are used directly as fecundity weights
        let payoffs = self.payoff_matrix();
        if payoffs
            .values()
            .iter()
            .flatten()
            .any(|&v| !v.is_finite() || v < 0.0)
        {
            return Err(Error::Config(format!(
                "payoffs must be finite and non-negative, got {:?} for B={}, C={}, D={}",
                payoffs.values(),
                self.benefit,
                self.cost,
                self.synergy
            )));
        }

        // the weights of one candidate sample are summed
        let max_payoff = payoffs.values().iter().flatten().fold(0.0f64, |m, &v| m.max(v));
        if !(max_payoff * self.n_parents_sample as f64).is_finite() {
            return Err(Error::Config(format!(
                "total fecundity of {} candidates overflows for B={}, C={}, D={}",
                self.n_parents_sample, self.benefit, self.cost, self.synergy
            )));
        }

        Ok(())
    }

    pub fn payoff_matrix(&self) -> PayoffMatrix {
        PayoffMatrix::new(self.benefit, self.cost, self.synergy)
    }

    /// Founders per patch that start as cooperators
    pub fn initial_cooperators(&self) -> usize {
        ((self.initial_coop_fraction * self.npp as f64).round() as usize).min(self.npp)
    }

    /// `(name, value)` pairs in the order they are written to the trailer
    pub fn records(&self) -> Vec<(&'static str, String)> {
        vec![
            ("mu", self.mu.to_string()),
            ("base_name", self.base_name.clone()),
            ("npatches", self.npatches.to_string()),
            ("max_time", self.max_time.to_string()),
            ("npp", self.npp.to_string()),
            ("B", self.benefit.to_string()),
            ("C", self.cost.to_string()),
            ("D", self.synergy.to_string()),
            ("alpha", self.alpha.to_string()),
            ("d", self.dispersal.to_string()),
            ("mortality_prob", self.mortality_prob.to_string()),
            ("n_parents_sample", self.n_parents_sample.to_string()),
            ("output_nth_generation", self.output_nth_generation.to_string()),
            ("initial_coop_fraction", self.initial_coop_fraction.to_string()),
        ]
    }
}
