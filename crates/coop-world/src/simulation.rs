//! Simulation driver for a single run.

use crate::interaction::interact;
use crate::metapopulation::Metapopulation;
use crate::replacement::{replace, ReplacementSummary};
use crate::report::Reporter;
use coop_core::{CooperationStats, Error, Parameters, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Running,
    Finished,
}

pub struct Simulation<R: Reporter> {
    params: Parameters,
    metapopulation: Metapopulation,
    rng: ChaCha8Rng,
    seed: u64,
    generation: u64,
    state: RunState,
    reporter: R,
}

impl<R: Reporter> Simulation<R> {
    /// Validate `params` and build the founder population.
    ///
    /// Nothing random is drawn until the first generation.
    pub fn new(params: Parameters, seed: u64, reporter: R) -> Result<Self> {
        params.validate()?;

        let metapopulation = Metapopulation::new(&params);

        Ok(Self {
            params,
            metapopulation,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            generation: 0,
            state: RunState::Initialized,
            reporter,
        })
    }

    /// Run the remaining generations, writing the header first and the trailer last
    #[instrument(skip(self), fields(seed = self.seed, max_time = self.params.max_time))]
    pub fn run(&mut self) -> Result<CooperationStats> {
        match self.state {
            RunState::Initialized => {}
            RunState::Running => {
                return Err(Error::InvalidState(format!(
                    "simulation already advanced to generation {} by stepping",
                    self.generation
                )));
            }
            RunState::Finished => {
                return Err(Error::InvalidState("simulation already finished".to_string()));
            }
        }

        info!(
            npatches = self.params.npatches,
            npp = self.params.npp,
            alpha = self.params.alpha,
            b = self.params.benefit,
            c = self.params.cost,
            d = self.params.synergy,
            "Starting simulation for {} generations",
            self.params.max_time
        );

        self.state = RunState::Running;
        self.reporter.write_header()?;

        while self.generation < self.params.max_time {
            let replacement = self.advance()?;

            if self.generation % self.params.output_nth_generation == 0 {
                let stats = self.metapopulation.stats();
                debug!(
                    generation = self.generation,
                    mean_coop = stats.mean(),
                    var_coop = stats.variance(),
                    deaths = replacement.deaths,
                    immigrant_births = replacement.immigrant_births,
                    mutations = replacement.mutations,
                    "Generation record"
                );
                self.reporter.write_record(self.generation, &stats)?;
            }

            self.generation += 1;
        }

        self.reporter.write_trailer(self.seed, &self.params)?;
        self.reporter.flush()?;
        self.state = RunState::Finished;

        let stats = self.metapopulation.stats();
        info!(
            generations = self.generation,
            mean_coop = stats.mean(),
            var_coop = stats.variance(),
            "Simulation finished"
        );

        Ok(stats)
    }

    /// Run a single generation without reporting.
    ///
    /// A stepped simulation can no longer be `run`, since its output would lack
    /// the earlier generations.
    pub fn step(&mut self) -> Result<ReplacementSummary> {
        if self.state == RunState::Finished {
            return Err(Error::InvalidState("simulation already finished".to_string()));
        }

        self.state = RunState::Running;
        let summary = self.advance()?;
        self.generation += 1;
        Ok(summary)
    }

    /// Reset, interact, replace
    fn advance(&mut self) -> Result<ReplacementSummary> {
        self.metapopulation.reset_resources();

        let payoffs = *self.metapopulation.payoffs();
        for patch in self.metapopulation.patches_mut() {
            interact(patch, &payoffs, self.params.alpha, &mut self.rng)?;
        }

        replace(&mut self.metapopulation, &self.params, &mut self.rng)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn metapopulation(&self) -> &Metapopulation {
        &self.metapopulation
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DelimitedReporter;

    fn small_params() -> Parameters {
        Parameters {
            npatches: 2,
            npp: 10,
            max_time: 25,
            output_nth_generation: 5,
            initial_coop_fraction: 0.5,
            ..Default::default()
        }
    }

    #[test]
    fn test_simulation_creation() {
        let sim = Simulation::new(small_params(), 42, DelimitedReporter::new(Vec::new())).unwrap();
        assert_eq!(sim.state(), RunState::Initialized);
        assert_eq!(sim.generation(), 0);
        assert_eq!(sim.metapopulation().total_size(), 20);
    }

    #[test]
    fn test_invalid_parameters_prevent_run() {
        let params = Parameters {
            npp: 7,
            ..small_params()
        };
        let result = Simulation::new(params, 42, DelimitedReporter::new(Vec::new()));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_run_reports_every_nth_generation() {
        let mut sim = Simulation::new(small_params(), 42, DelimitedReporter::new(Vec::new())).unwrap();
        sim.run().unwrap();

        assert_eq!(sim.state(), RunState::Finished);
        assert_eq!(sim.generation(), 25);

        let text = String::from_utf8(sim.into_reporter().into_inner()).unwrap();
        let generations: Vec<&str> = text
            .lines()
            .skip(1)
            .take_while(|line| !line.is_empty())
            .map(|line| line.split(';').next().unwrap())
            .collect();
        assert_eq!(generations, vec!["0", "5", "10", "15", "20"]);
        assert!(text.starts_with("generation;mean_coop;var_coop;\n"));
        assert!(text.contains("\nseed;42\n"));
    }

    #[test]
    fn test_finished_simulation_rejects_further_work() {
        let mut sim = Simulation::new(small_params(), 1, DelimitedReporter::new(Vec::new())).unwrap();
        sim.run().unwrap();

        assert!(matches!(sim.run(), Err(Error::InvalidState(_))));
        assert!(matches!(sim.step(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_run_after_step_rejected() {
        let mut sim = Simulation::new(small_params(), 7, DelimitedReporter::new(Vec::new())).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.state(), RunState::Running);

        assert!(matches!(sim.run(), Err(Error::InvalidState(_))));
        assert_eq!(sim.generation(), 1);
        assert!(sim.into_reporter().into_inner().is_empty());
    }

    #[test]
    fn test_population_size_conserved() {
        let params = Parameters {
            mortality_prob: 0.5,
            dispersal: 0.3,
            ..small_params()
        };
        let mut sim = Simulation::new(params, 99, DelimitedReporter::new(Vec::new())).unwrap();

        for _ in 0..50 {
            sim.step().unwrap();
            assert_eq!(sim.metapopulation().num_patches(), 2);
            assert!(sim.metapopulation().patches().iter().all(|p| p.len() == 10));
        }
        assert_eq!(sim.generation(), 50);
    }
}
