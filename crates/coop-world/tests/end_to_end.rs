//! Whole-run scenarios on tiny populations.

use coop_core::{CooperationStats, Parameters};
use coop_world::{DelimitedReporter, Simulation};

fn scenario(initial_coop_fraction: f64) -> Parameters {
    Parameters {
        mu: 0.0,
        npatches: 1,
        npp: 4,
        max_time: 1,
        benefit: 3.0,
        cost: 1.0,
        synergy: 2.0,
        alpha: 0.0,
        dispersal: 0.0,
        mortality_prob: 1.0,
        output_nth_generation: 1,
        initial_coop_fraction,
        ..Default::default()
    }
}

fn strategies<R: coop_world::Reporter>(sim: &Simulation<R>) -> Vec<bool> {
    sim.metapopulation().patches()[0]
        .breeders()
        .iter()
        .map(|b| b.is_cooperative)
        .collect()
}

#[test]
fn test_one_generation_full_turnover() {
    for seed in 0..50 {
        let mut sim =
            Simulation::new(scenario(0.5), seed, DelimitedReporter::new(Vec::new())).unwrap();
        let before = strategies(&sim);

        let stats = sim.run().unwrap();
        let after = strategies(&sim);

        assert_eq!(after.len(), 4);
        assert!(after.iter().all(|s| before.contains(s)));
        assert_eq!(stats, CooperationStats::from_strategies(after.iter().copied()));

        let text = String::from_utf8(sim.into_reporter().into_inner()).unwrap();
        let record = text.lines().nth(1).unwrap();
        assert_eq!(record, format!("0;{};{};", stats.mean(), stats.variance()));
    }
}

#[test]
fn test_no_novel_strategy_without_mutation() {
    for (fraction, expected) in [(0.0, false), (1.0, true)] {
        let params = Parameters {
            max_time: 100,
            ..scenario(fraction)
        };
        let mut sim = Simulation::new(params, 3, DelimitedReporter::new(Vec::new())).unwrap();
        sim.run().unwrap();

        assert!(strategies(&sim).iter().all(|&s| s == expected));
    }
}

#[test]
fn test_full_assortment_favours_cooperators() {
    // mutual cooperators earn 5 against 1 for defector pairs
    let params = Parameters {
        npp: 100,
        max_time: 300,
        alpha: 1.0,
        mortality_prob: 0.2,
        n_parents_sample: 10,
        output_nth_generation: 100,
        ..scenario(0.5)
    };
    let mut sim = Simulation::new(params, 2024, DelimitedReporter::new(Vec::new())).unwrap();
    let stats = sim.run().unwrap();

    assert!(stats.mean() > 0.9, "cooperation only reached {}", stats.mean());
}
