use serde::Serialize;

use crate::{
    error::Result,
    solver::{assignment::Assignment, csp::Variable},
};

/// A human-readable tag for a constraint, used in logs and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A predicate over a fixed scope of variables.
///
/// The engine only ever talks to constraints through this trait, so new
/// constraint kinds can be added without touching the solver. A proposed
/// value is checked against the *current* assignment of the other variables
/// in scope; the variable under test is excluded because its value is not
/// yet committed.
pub trait Constraint: std::fmt::Debug {
    /// The constraint's scope.
    fn variables(&self) -> &[Variable];

    /// Is `variable` in this constraint's scope?
    fn affects(&self, variable: &str) -> bool {
        self.variables().iter().any(|v| v == variable)
    }

    fn descriptor(&self) -> ConstraintDescriptor;

    /// Would assigning `value` to `variable` keep this constraint satisfied,
    /// given the current assignment of the other variables in scope?
    ///
    /// Asking about a variable outside the scope is a contract violation and
    /// fails with [`SolverError::OutOfScope`](crate::error::SolverError::OutOfScope).
    fn satisfied_by_proposed_value(
        &self,
        variable: &str,
        value: i64,
        assignment: &Assignment,
    ) -> Result<bool>;
}
