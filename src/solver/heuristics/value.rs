//! Heuristics for ordering the candidate values of a variable.

use crate::{
    error::Result,
    solver::{assignment::Assignment, csp::Csp},
};

/// A trait for strategies that determine the order in which candidate values
/// are tried for a variable.
///
/// Each call produces a fresh, finite sequence; nothing is filtered or pruned
/// here — consistency checking is the engine's job.
pub trait ValueOrderingHeuristic {
    fn order_values(
        &mut self,
        assignment: &Assignment,
        csp: &Csp,
        variable: &str,
    ) -> Result<Vec<i64>>;
}

/// Returns the variable's domain snapshot in its stored order, unfiltered.
#[derive(Debug, Default)]
pub struct DomainOrderHeuristic;

impl ValueOrderingHeuristic for DomainOrderHeuristic {
    fn order_values(
        &mut self,
        assignment: &Assignment,
        _csp: &Csp,
        variable: &str,
    ) -> Result<Vec<i64>> {
        Ok(assignment.domain(variable)?.to_vec())
    }
}
