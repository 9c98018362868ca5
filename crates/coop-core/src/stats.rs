//! Summary statistics over the cooperative indicator.

use serde::{Deserialize, Serialize};

/// Mean and population variance of the 0/1 cooperation indicator
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CooperationStats {
    pub cooperators: usize,
    pub total: usize,
}

impl CooperationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate statistics over a sequence of strategy bits
    pub fn from_strategies(strategies: impl IntoIterator<Item = bool>) -> Self {
        let mut stats = Self::new();
        for is_cooperative in strategies {
            stats.record(is_cooperative);
        }
        stats
    }

    pub fn record(&mut self, is_cooperative: bool) {
        self.total += 1;
        if is_cooperative {
            self.cooperators += 1;
        }
    }

    /// Fraction of cooperators
    pub fn mean(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.cooperators as f64 / self.total as f64
    }

    /// Population variance of the indicator
    pub fn variance(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        // sum of squares equals the cooperator count for a 0/1 indicator
        let mean = self.mean();
        (self.cooperators as f64 / self.total as f64 - mean * mean).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_stats() {
        let stats = CooperationStats::new();
        assert_eq!(stats.mean(), 0.0);
        assert_eq!(stats.variance(), 0.0);
    }

    #[test]
    fn test_mixed_population() {
        let stats = CooperationStats::from_strategies([true, false, true, true]);
        assert_eq!(stats.cooperators, 3);
        assert_eq!(stats.total, 4);
        assert!((stats.mean() - 0.75).abs() < 1e-12);
        assert!((stats.variance() - 0.1875).abs() < 1e-12);
    }

    #[test]
    fn test_monomorphic_population_has_no_variance() {
        let all_coop = CooperationStats::from_strategies(vec![true; 10]);
        assert_eq!(all_coop.mean(), 1.0);
        assert_eq!(all_coop.variance(), 0.0);

        let no_coop = CooperationStats::from_strategies(vec![false; 10]);
        assert_eq!(no_coop.mean(), 0.0);
        assert_eq!(no_coop.variance(), 0.0);
    }
}
