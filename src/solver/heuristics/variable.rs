//! Heuristics for selecting which unassigned variable to branch on next.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::solver::{
    assignment::Assignment,
    csp::{Csp, Variable},
};

/// A trait for variable-selection heuristics.
///
/// Implementors choose which unassigned variable the solver should branch on
/// next. The engine checks completeness before calling, so implementations
/// may assume at least one variable is unassigned; returning `None` means no
/// unassigned variable remains.
pub trait VariableSelectionHeuristic {
    fn select_variable(&mut self, assignment: &Assignment, csp: &Csp) -> Option<Variable>;
}

/// Selects the first unassigned variable in the CSP's declaration order.
///
/// Wholly deterministic, which makes solve results and step counts
/// reproducible. This is the baseline policy and the one tests rely on.
#[derive(Debug, Default)]
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(&mut self, assignment: &Assignment, csp: &Csp) -> Option<Variable> {
        csp.variables()
            .iter()
            .find(|variable| !assignment.is_assigned(variable))
            .cloned()
    }
}

/// Selects uniformly at random among the unassigned variables.
///
/// The generator is owned and explicitly seeded rather than drawn from a
/// global source, so a run is reproducible under a fixed seed. Useful for
/// escaping pathological declaration orders.
#[derive(Debug)]
pub struct RandomUnassignedHeuristic {
    rng: ChaCha8Rng,
}

impl RandomUnassignedHeuristic {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl VariableSelectionHeuristic for RandomUnassignedHeuristic {
    fn select_variable(&mut self, assignment: &Assignment, csp: &Csp) -> Option<Variable> {
        use rand::seq::IteratorRandom;

        csp.variables()
            .iter()
            .filter(|variable| !assignment.is_assigned(variable))
            .choose(&mut self.rng)
            .cloned()
    }
}
