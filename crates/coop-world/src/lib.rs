//! Population engine for the assortative cooperation model.
//!
//! Patches of breeders interact pairwise under assortative matching, then die
//! and are replaced by offspring of fecundity-weighted parents.

pub mod individual;
pub mod patch;
pub mod metapopulation;
pub mod interaction;
pub mod replacement;
pub mod report;
pub mod simulation;

pub use individual::Individual;
pub use patch::Patch;
pub use metapopulation::Metapopulation;
pub use interaction::{interact, PairingSummary};
pub use replacement::{replace, select_parent, ReplacementSummary};
pub use report::{DelimitedReporter, Reporter};
pub use simulation::{RunState, Simulation};
