use std::collections::HashMap;

use tracing::trace;

use crate::{
    error::{Result, SolverError},
    solver::csp::{Csp, Variable},
};

/// A mutable partial mapping from variable to assigned value.
///
/// An `Assignment` is created from a [`Csp`], copying each variable's domain
/// as a static snapshot. It may be pre-filled by the caller (e.g. puzzle
/// clues) before solving, and is mutated in place by the engine via
/// [`assign`](Assignment::assign)/[`unassign`](Assignment::unassign) during
/// search. There is no copy-on-write: callers that need to preserve a prior
/// state must save it explicitly (the engine pairs every assign with an
/// unassign through [`ScopedAssignment`]).
#[derive(Debug, Clone)]
pub struct Assignment {
    values: HashMap<Variable, i64>,
    /// Domain snapshot copied from the CSP; never narrowed by search.
    domains: HashMap<Variable, Vec<i64>>,
    /// The CSP's variables in declaration order, for the completeness scan.
    variables: Vec<Variable>,
}

impl Assignment {
    /// Creates an empty assignment over the variables of `csp`, copying each
    /// domain as a snapshot.
    pub fn new(csp: &Csp) -> Self {
        let variables = csp.variables().to_vec();
        let domains = variables
            .iter()
            .filter_map(|v| csp.domain(v).map(|d| (v.clone(), d.to_vec())))
            .collect();
        Self {
            values: HashMap::new(),
            domains,
            variables,
        }
    }

    /// Assigns `value` to `variable`, overwriting any existing entry.
    pub fn assign(&mut self, variable: impl Into<Variable>, value: i64) {
        let variable = variable.into();
        trace!(%variable, value, "assign");
        self.values.insert(variable, value);
    }

    /// Removes the entry for `variable`. Safe to call when it is unassigned.
    pub fn unassign(&mut self, variable: &str) {
        trace!(%variable, "unassign");
        self.values.remove(variable);
    }

    pub fn is_assigned(&self, variable: &str) -> bool {
        self.values.contains_key(variable)
    }

    /// The value assigned to `variable`, or `None` if it is unassigned.
    pub fn get(&self, variable: &str) -> Option<i64> {
        self.values.get(variable).copied()
    }

    /// The value assigned to `variable`.
    ///
    /// Fails with [`SolverError::NotAssigned`] when the variable is
    /// unassigned, or [`SolverError::UnknownVariable`] when the CSP never
    /// declared it. Either indicates a bug in the caller's contract.
    pub fn value(&self, variable: &str) -> Result<i64> {
        match self.values.get(variable) {
            Some(value) => Ok(*value),
            None if self.domains.contains_key(variable) => Err(SolverError::NotAssigned {
                variable: variable.to_string(),
            }
            .into()),
            None => Err(SolverError::UnknownVariable {
                variable: variable.to_string(),
            }
            .into()),
        }
    }

    /// The static domain snapshot for `variable`, in its stored order.
    pub fn domain(&self, variable: &str) -> Result<&[i64]> {
        self.domains
            .get(variable)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                SolverError::UnknownVariable {
                    variable: variable.to_string(),
                }
                .into()
            })
    }

    /// `true` iff every variable of the originating CSP is assigned.
    pub fn is_complete(&self) -> bool {
        self.variables.iter().all(|v| self.is_assigned(v))
    }

    pub fn assigned_count(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the current `(variable, value)` pairs, in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, i64)> {
        self.values.iter().map(|(variable, value)| (variable, *value))
    }
}

/// Assigns a value on construction and unassigns it on drop.
///
/// The engine wraps every tentative assignment in one of these so that the
/// assignment is restored bit-for-bit on every exit from a branch, including
/// early returns through `?`. Calling [`keep`](ScopedAssignment::keep)
/// defuses the guard once the branch has led to a solution.
pub struct ScopedAssignment<'a> {
    assignment: &'a mut Assignment,
    variable: Variable,
    keep: bool,
}

impl<'a> ScopedAssignment<'a> {
    pub fn new(assignment: &'a mut Assignment, variable: Variable, value: i64) -> Self {
        assignment.assign(variable.clone(), value);
        Self {
            assignment,
            variable,
            keep: false,
        }
    }

    /// The guarded assignment, for recursing while the guard is live.
    pub fn assignment(&mut self) -> &mut Assignment {
        self.assignment
    }

    /// Consumes the guard, leaving the assignment in place.
    pub fn keep(mut self) {
        self.keep = true;
    }
}

impl Drop for ScopedAssignment<'_> {
    fn drop(&mut self) {
        if !self.keep {
            self.assignment.unassign(&self.variable);
        }
    }
}
