use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::Assignment,
        constraint::{Constraint, ConstraintDescriptor},
        csp::Variable,
    },
};

/// A binary constraint requiring two variables to take different values.
///
/// A proposed value for one member is consistent iff the other member is
/// unassigned or holds a different value.
#[derive(Debug, Clone)]
pub struct DifferingPairConstraint {
    vars: [Variable; 2],
}

impl DifferingPairConstraint {
    pub fn new(first: impl Into<Variable>, second: impl Into<Variable>) -> Self {
        Self {
            vars: [first.into(), second.into()],
        }
    }

    /// The member of the pair that is not `variable`.
    fn other(&self, variable: &str) -> Option<&Variable> {
        if self.vars[0] == variable {
            Some(&self.vars[1])
        } else if self.vars[1] == variable {
            Some(&self.vars[0])
        } else {
            None
        }
    }
}

impl Constraint for DifferingPairConstraint {
    fn variables(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "DifferingPairConstraint".to_string(),
            description: format!("{} != {}", self.vars[0], self.vars[1]),
        }
    }

    fn satisfied_by_proposed_value(
        &self,
        variable: &str,
        value: i64,
        assignment: &Assignment,
    ) -> Result<bool> {
        let Some(other) = self.other(variable) else {
            return Err(SolverError::OutOfScope {
                constraint: self.descriptor().name,
                variable: variable.to_string(),
            }
            .into());
        };
        Ok(assignment.get(other) != Some(value))
    }
}
