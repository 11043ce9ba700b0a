use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::Assignment,
        constraint::{Constraint, ConstraintDescriptor},
        csp::Variable,
    },
};

/// A constraint requiring all variables in its scope to take distinct values.
///
/// This is the workhorse of grid puzzles like Sudoku, where each row, column,
/// and box is one `AllDifferent` over its nine cells. A proposed value is
/// consistent iff no *other* currently-assigned variable in the scope already
/// holds it; the variable under test is excluded from the scan since its own
/// value is not yet committed.
#[derive(Debug, Clone)]
pub struct AllDifferentConstraint {
    vars: Vec<Variable>,
}

impl AllDifferentConstraint {
    pub fn new<I, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Variable>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl Constraint for AllDifferentConstraint {
    fn variables(&self) -> &[Variable] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "AllDifferentConstraint".to_string(),
            description: format!("AllDifferent({})", self.vars.join(", ")),
        }
    }

    fn satisfied_by_proposed_value(
        &self,
        variable: &str,
        value: i64,
        assignment: &Assignment,
    ) -> Result<bool> {
        if !self.affects(variable) {
            return Err(SolverError::OutOfScope {
                constraint: self.descriptor().name,
                variable: variable.to_string(),
            }
            .into());
        }

        Ok(self
            .vars
            .iter()
            .filter(|other| other.as_str() != variable)
            .all(|other| assignment.get(other) != Some(value)))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::csp::Csp;

    fn assignment_over(names: &[&str]) -> Assignment {
        let variables = names
            .iter()
            .map(|name| (name.to_string(), vec![1, 2, 3]))
            .collect();
        let csp = Csp::new(variables, vec![]).unwrap();
        Assignment::new(&csp)
    }

    #[test]
    fn proposed_value_held_by_peer_is_inconsistent() {
        let constraint = AllDifferentConstraint::new(["a", "b", "c"]);
        let mut assignment = assignment_over(&["a", "b", "c"]);
        assignment.assign("a", 1);
        assignment.assign("b", 2);

        assert!(constraint
            .satisfied_by_proposed_value("c", 3, &assignment)
            .unwrap());
        assert!(!constraint
            .satisfied_by_proposed_value("c", 1, &assignment)
            .unwrap());
        assert!(!constraint
            .satisfied_by_proposed_value("c", 2, &assignment)
            .unwrap());
    }

    #[test]
    fn variable_under_test_is_excluded_from_the_scan() {
        let constraint = AllDifferentConstraint::new(["a", "b"]);
        let mut assignment = assignment_over(&["a", "b"]);
        assignment.assign("a", 1);

        // Re-proposing a's own current value only checks the *other*
        // variables, so it stays consistent.
        assert!(constraint
            .satisfied_by_proposed_value("a", 1, &assignment)
            .unwrap());
    }

    #[test]
    fn unassigned_peers_do_not_block_any_value() {
        let constraint = AllDifferentConstraint::new(["a", "b", "c"]);
        let assignment = assignment_over(&["a", "b", "c"]);
        for value in 1..=3 {
            assert!(constraint
                .satisfied_by_proposed_value("b", value, &assignment)
                .unwrap());
        }
    }

    #[test]
    fn out_of_scope_query_is_an_error() {
        let constraint = AllDifferentConstraint::new(["a", "b"]);
        let assignment = assignment_over(&["a", "b"]);

        let err = constraint
            .satisfied_by_proposed_value("z", 1, &assignment)
            .unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::OutOfScope { variable, .. } if variable == "z"
        ));
    }

    #[test]
    fn descriptor_lists_the_scope() {
        let constraint = AllDifferentConstraint::new(["a", "b"]);
        let descriptor = constraint.descriptor();
        assert_eq!(descriptor.name, "AllDifferentConstraint");
        assert_eq!(descriptor.description, "AllDifferent(a, b)");
    }
}
