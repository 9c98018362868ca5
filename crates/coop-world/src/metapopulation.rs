//! The collection of patches a run evolves.

use crate::individual::Individual;
use crate::patch::Patch;
use coop_core::{CooperationStats, Error, Parameters, PayoffMatrix, Result};

/// Ordered patches of equal size plus the payoff matrix they play
#[derive(Debug, Clone)]
pub struct Metapopulation {
    patches: Vec<Patch>,
    patch_size: usize,
    payoffs: PayoffMatrix,
}

impl Metapopulation {
    /// Build the founder population described by `params`
    pub fn new(params: &Parameters) -> Self {
        let n_cooperators = params.initial_cooperators();
        let patches = (0..params.npatches)
            .map(|_| Patch::new(params.npp, n_cooperators))
            .collect();

        Self {
            patches,
            patch_size: params.npp,
            payoffs: params.payoff_matrix(),
        }
    }

    /// Assemble a metapopulation from existing patches, which must all share one size
    pub fn from_patches(patches: Vec<Patch>, payoffs: PayoffMatrix) -> Result<Self> {
        let patch_size = patches
            .first()
            .map(Patch::len)
            .ok_or_else(|| Error::Config("metapopulation needs at least one patch".to_string()))?;

        if let Some((index, patch)) = patches
            .iter()
            .enumerate()
            .find(|(_, p)| p.len() != patch_size)
        {
            return Err(Error::Config(format!(
                "patch {} has {} breeders, expected {}",
                index,
                patch.len(),
                patch_size
            )));
        }

        Ok(Self {
            patches,
            patch_size,
            payoffs,
        })
    }

    pub fn num_patches(&self) -> usize {
        self.patches.len()
    }

    pub fn patch_size(&self) -> usize {
        self.patch_size
    }

    pub fn payoffs(&self) -> &PayoffMatrix {
        &self.payoffs
    }

    pub fn patches(&self) -> &[Patch] {
        &self.patches
    }

    pub fn patches_mut(&mut self) -> &mut [Patch] {
        &mut self.patches
    }

    /// Breeder at `(patch, index)`; out-of-range coordinates are a sampling defect
    pub fn individual(&self, patch: usize, index: usize) -> Result<&Individual> {
        self.patches
            .get(patch)
            .and_then(|p| p.get(index))
            .ok_or_else(|| {
                Error::Sampling(format!(
                    "individual ({}, {}) outside {} patches of {}",
                    patch,
                    index,
                    self.patches.len(),
                    self.patch_size
                ))
            })
    }

    pub fn individual_mut(&mut self, patch: usize, index: usize) -> Result<&mut Individual> {
        let (num_patches, patch_size) = (self.patches.len(), self.patch_size);
        self.patches
            .get_mut(patch)
            .and_then(|p| p.get_mut(index))
            .ok_or_else(|| {
                Error::Sampling(format!(
                    "individual ({}, {}) outside {} patches of {}",
                    patch, index, num_patches, patch_size
                ))
            })
    }

    pub fn reset_resources(&mut self) {
        for patch in &mut self.patches {
            patch.reset_resources();
        }
    }

    /// Cooperation statistics over every breeder
    pub fn stats(&self) -> CooperationStats {
        CooperationStats::from_strategies(
            self.patches
                .iter()
                .flat_map(|p| p.breeders().iter().map(|b| b.is_cooperative)),
        )
    }

    pub fn total_size(&self) -> usize {
        self.patches.iter().map(Patch::len).sum()
    }
}
