//! Mortality and fecundity-weighted replacement.
//!
//! Slots are visited patch by patch, slot by slot, and overwritten in place.
//! An offspring written into an earlier slot is therefore already visible as
//! a candidate parent for later slots of the same sweep.

use crate::individual::Individual;
use crate::metapopulation::Metapopulation;
use coop_core::{Error, Parameters, Result};
use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

/// Outcome of one replacement sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplacementSummary {
    /// Breeders that died and were replaced
    pub deaths: usize,
    /// Births whose chosen parent came from a different patch
    pub immigrant_births: usize,
    /// Births whose strategy differs from the chosen parent
    pub mutations: usize,
}

/// Pick an index with probability proportional to `weights`.
///
/// When every weight is zero the pick is uniform instead.
pub fn select_parent(weights: &[f64], rng: &mut ChaCha8Rng) -> Result<usize> {
    if weights.is_empty() {
        return Err(Error::Sampling("no candidate parents to choose from".to_string()));
    }

    match WeightedIndex::<f64>::new(weights) {
        Ok(dist) => Ok(dist.sample(rng)),
        Err(WeightedError::AllWeightsZero) => Ok(rng.gen_range(0..weights.len())),
        Err(e) => Err(Error::Sampling(format!("invalid fecundity weights {:?}: {}", weights, e))),
    }
}

/// Kill each breeder with probability `mortality_prob` and replace it with an
/// offspring of one of `n_parents_sample` candidate parents.
pub fn replace(
    metapop: &mut Metapopulation,
    params: &Parameters,
    rng: &mut ChaCha8Rng,
) -> Result<ReplacementSummary> {
    let num_patches = metapop.num_patches();
    let patch_size = metapop.patch_size();

    let mut summary = ReplacementSummary::default();
    let mut candidates: Vec<(usize, Individual)> = Vec::with_capacity(params.n_parents_sample);
    let mut weights: Vec<f64> = Vec::with_capacity(params.n_parents_sample);

    for patch in 0..num_patches {
        for slot in 0..patch_size {
            if rng.gen::<f64>() >= params.mortality_prob {
                continue;
            }

            candidates.clear();
            weights.clear();

            for _ in 0..params.n_parents_sample {
                let origin = if rng.gen::<f64>() < params.dispersal {
                    rng.gen_range(0..num_patches)
                } else {
                    patch
                };
                let index = rng.gen_range(0..patch_size);

                let candidate = *metapop.individual(origin, index)?;
                weights.push(candidate.resources);
                candidates.push((origin, candidate));
            }

            let chosen = select_parent(&weights, rng)?;
            let (origin, parent) = candidates[chosen];
            let offspring = Individual::birth(&parent, params.mu, rng);

            summary.deaths += 1;
            if origin != patch {
                summary.immigrant_births += 1;
            }
            if offspring.is_cooperative != parent.is_cooperative {
                summary.mutations += 1;
            }

            trace!(
                patch,
                slot,
                parent_patch = origin,
                parent_fecundity = parent.resources,
                is_cooperative = offspring.is_cooperative,
                "Breeder replaced"
            );

            *metapop.individual_mut(patch, slot)? = offspring;
        }
    }

    Ok(summary)
}
