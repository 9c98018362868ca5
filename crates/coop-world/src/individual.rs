//! Individual state and birth.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// A breeder in a patch
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Individual {
    pub is_cooperative: bool,
    /// Fecundity accumulated from this generation's interaction
    pub resources: f64,
}

impl Individual {
    /// Create a founder
    pub fn new(is_cooperative: bool) -> Self {
        Self {
            is_cooperative,
            resources: 0.0,
        }
    }

    /// Create an offspring of `parent`, flipping its strategy with probability `mu`.
    ///
    /// Always consumes exactly one uniform draw.
    pub fn birth(parent: &Individual, mu: f64, rng: &mut ChaCha8Rng) -> Self {
        let mut is_cooperative = parent.is_cooperative;
        if rng.gen::<f64>() < mu {
            is_cooperative = !is_cooperative;
        }

        Self {
            is_cooperative,
            resources: 0.0,
        }
    }

    pub fn reset_resources(&mut self) {
        self.resources = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_founder_has_no_resources() {
        let founder = Individual::new(true);
        assert!(founder.is_cooperative);
        assert_eq!(founder.resources, 0.0);
    }

    #[test]
    fn test_birth_without_mutation_copies_parent() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = Individual {
            is_cooperative: true,
            resources: 7.5,
        };

        for _ in 0..100 {
            let child = Individual::birth(&parent, 0.0, &mut rng);
            assert!(child.is_cooperative);
            assert_eq!(child.resources, 0.0);
        }
    }

    #[test]
    fn test_birth_with_certain_mutation_flips() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let parent = Individual::new(false);
        let child = Individual::birth(&parent, 1.0, &mut rng);
        assert!(child.is_cooperative);
    }

    #[test]
    fn test_mutation_rate_converges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let parent = Individual::new(false);
        let mu = 0.05;
        let births = 200_000;

        let flips = (0..births)
            .filter(|_| Individual::birth(&parent, mu, &mut rng).is_cooperative)
            .count();

        let rate = flips as f64 / births as f64;
        // ~10 standard errors of a binomial proportion
        assert!((rate - mu).abs() < 0.005, "flip rate {} too far from {}", rate, mu);
    }
}
