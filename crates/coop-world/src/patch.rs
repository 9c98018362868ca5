//! A fixed-size patch of breeders.

use crate::individual::Individual;

/// A local sub-population.
///
/// The cooperator and non-cooperator partitions are index views into
/// `breeders`; they are only meaningful right after [`Patch::update_partitions`].
#[derive(Debug, Clone)]
pub struct Patch {
    breeders: Vec<Individual>,
    cooperators: Vec<usize>,
    non_cooperators: Vec<usize>,
}

impl Patch {
    /// Create `size` founders, the first `n_cooperators` of which cooperate
    pub fn new(size: usize, n_cooperators: usize) -> Self {
        let breeders = (0..size)
            .map(|i| Individual::new(i < n_cooperators))
            .collect();
        Self::from_breeders(breeders)
    }

    pub fn from_breeders(breeders: Vec<Individual>) -> Self {
        let mut patch = Self {
            cooperators: Vec::with_capacity(breeders.len()),
            non_cooperators: Vec::with_capacity(breeders.len()),
            breeders,
        };
        patch.update_partitions();
        patch
    }

    pub fn len(&self) -> usize {
        self.breeders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeders.is_empty()
    }

    pub fn breeders(&self) -> &[Individual] {
        &self.breeders
    }

    pub fn breeders_mut(&mut self) -> &mut [Individual] {
        &mut self.breeders
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.breeders.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Individual> {
        self.breeders.get_mut(index)
    }

    /// Rebuild both partitions from the current strategy bits
    pub fn update_partitions(&mut self) {
        self.cooperators.clear();
        self.non_cooperators.clear();

        for (index, breeder) in self.breeders.iter().enumerate() {
            if breeder.is_cooperative {
                self.cooperators.push(index);
            } else {
                self.non_cooperators.push(index);
            }
        }
    }

    pub fn cooperators(&self) -> &[usize] {
        &self.cooperators
    }

    pub fn non_cooperators(&self) -> &[usize] {
        &self.non_cooperators
    }

    /// Mutable access to both partitions at once, cooperators first
    pub fn partitions_mut(&mut self) -> (&mut [usize], &mut [usize]) {
        (&mut self.cooperators, &mut self.non_cooperators)
    }

    pub fn reset_resources(&mut self) {
        for breeder in &mut self.breeders {
            breeder.reset_resources();
        }
    }

    pub fn count_cooperators(&self) -> usize {
        self.breeders.iter().filter(|b| b.is_cooperative).count()
    }
}
