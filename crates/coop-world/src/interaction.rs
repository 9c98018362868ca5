//! Assortative pairwise interaction within a patch.
//!
//! Random draws happen in a fixed order: the cooperator binomial, the
//! non-cooperator binomial, the cooperator shuffle, the non-cooperator
//! shuffle and finally the remainder shuffle. Reordering them changes every
//! seeded run.

use crate::patch::Patch;
use coop_core::{Error, PayoffMatrix, Result};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Binomial, Distribution};
use tracing::trace;

/// How a patch was paired off in one generation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairingSummary {
    /// Cooperators placed in cooperator-cooperator pairs
    pub assorted_cooperators: usize,
    /// Non-cooperators placed in non-cooperator pairs
    pub assorted_non_cooperators: usize,
    /// Individuals paired at random from the remainder pool
    pub remainder: usize,
    /// Every pair formed, as breeder indices
    pub pairs: Vec<(usize, usize)>,
}

/// Number of individuals out of `count` that enter same-strategy pairs.
///
/// Trials are whole pairs, so the result is always even and never exceeds `count`.
pub fn assortative_count(count: usize, alpha: f64, rng: &mut ChaCha8Rng) -> Result<usize> {
    let binomial = Binomial::new((count / 2) as u64, alpha)
        .map_err(|e| Error::Sampling(format!("binomial(n={}, p={}): {}", count / 2, alpha, e)))?;
    let pairs = binomial.sample(rng) as usize;
    Ok(2 * pairs)
}

/// Pair every breeder in `patch` once and write its payoff into `resources`.
///
/// A fraction `alpha` of the possible same-strategy pairs is formed first;
/// everyone left over is shuffled together and paired at random.
pub fn interact(
    patch: &mut Patch,
    payoffs: &PayoffMatrix,
    alpha: f64,
    rng: &mut ChaCha8Rng,
) -> Result<PairingSummary> {
    patch.update_partitions();

    let assorted_cooperators = assortative_count(patch.cooperators().len(), alpha, rng)?;
    let assorted_non_cooperators = assortative_count(patch.non_cooperators().len(), alpha, rng)?;

    let mut pairs = Vec::with_capacity(patch.len() / 2);
    let mut remainder = {
        let (cooperators, non_cooperators) = patch.partitions_mut();
        cooperators.shuffle(rng);
        non_cooperators.shuffle(rng);

        pairs.extend(
            cooperators[..assorted_cooperators]
                .chunks_exact(2)
                .map(|p| (p[0], p[1])),
        );
        pairs.extend(
            non_cooperators[..assorted_non_cooperators]
                .chunks_exact(2)
                .map(|p| (p[0], p[1])),
        );

        cooperators[assorted_cooperators..]
            .iter()
            .chain(non_cooperators[assorted_non_cooperators..].iter())
            .copied()
            .collect::<Vec<usize>>()
    };

    if remainder.len() % 2 != 0 {
        return Err(Error::InvalidState(format!(
            "odd remainder pool of {} in a patch of {}",
            remainder.len(),
            patch.len()
        )));
    }

    remainder.shuffle(rng);
    pairs.extend(remainder.chunks_exact(2).map(|p| (p[0], p[1])));

    let breeders = patch.breeders_mut();
    for &(focal, partner) in &pairs {
        let (focal_payoff, partner_payoff) = payoffs.pair_payoffs(
            breeders[focal].is_cooperative,
            breeders[partner].is_cooperative,
        );
        breeders[focal].resources = focal_payoff;
        breeders[partner].resources = partner_payoff;
    }

    trace!(
        assorted_cooperators,
        assorted_non_cooperators,
        remainder = remainder.len(),
        pairs = pairs.len(),
        "Patch paired"
    );

    Ok(PairingSummary {
        assorted_cooperators,
        assorted_non_cooperators,
        remainder: remainder.len(),
        pairs,
    })
}
