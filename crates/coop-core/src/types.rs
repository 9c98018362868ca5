//! Core type definitions for the simulation.

use serde::{Deserialize, Serialize};

/// Payoffs of the pairwise donation game.
///
/// `values[a][b]` is the payoff to a focal individual with cooperative state
/// `a` whose partner has cooperative state `b` (0 = defect, 1 = cooperate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffMatrix {
    values: [[f64; 2]; 2],
}

impl PayoffMatrix {
    /// Build the matrix from benefit `b`, cost `c` and synergy `d`.
    pub fn new(b: f64, c: f64, d: f64) -> Self {
        Self {
            values: [[1.0, 1.0 + b], [1.0 - c, 1.0 - c + b + d]],
        }
    }

    /// Payoff to a focal individual given both strategies
    pub fn payoff(&self, focal_cooperates: bool, partner_cooperates: bool) -> f64 {
        self.values[focal_cooperates as usize][partner_cooperates as usize]
    }

    /// Payoffs to both members of a pair, focal first
    pub fn pair_payoffs(&self, focal_cooperates: bool, partner_cooperates: bool) -> (f64, f64) {
        (
            self.payoff(focal_cooperates, partner_cooperates),
            self.payoff(partner_cooperates, focal_cooperates),
        )
    }

    pub fn values(&self) -> &[[f64; 2]; 2] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_matrix_entries() {
        let m = PayoffMatrix::new(3.0, 1.0, 2.0);
        assert_eq!(m.payoff(false, false), 1.0);
        assert_eq!(m.payoff(false, true), 4.0);
        assert_eq!(m.payoff(true, false), 0.0);
        assert_eq!(m.payoff(true, true), 5.0);
    }

    #[test]
    fn test_mixed_pair_is_asymmetric() {
        let m = PayoffMatrix::new(3.0, 1.0, 2.0);
        assert_eq!(m.pair_payoffs(true, false), (0.0, 4.0));
        assert_eq!(m.pair_payoffs(false, true), (4.0, 0.0));
    }

    proptest! {
        #[test]
        fn pair_payoffs_mirror_matrix(
            b in -10.0f64..10.0,
            c in -10.0f64..10.0,
            d in -10.0f64..10.0,
            focal in any::<bool>(),
            partner in any::<bool>(),
        ) {
            let m = PayoffMatrix::new(b, c, d);
            let (f, p) = m.pair_payoffs(focal, partner);
            prop_assert_eq!(f, m.values()[focal as usize][partner as usize]);
            prop_assert_eq!(p, m.values()[partner as usize][focal as usize]);
            prop_assert_eq!(m.payoff(false, false), 1.0);
            prop_assert_eq!(m.payoff(true, true), 1.0 - c + b + d);
        }
    }
}
