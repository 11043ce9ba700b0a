use std::collections::HashMap;

use crate::{
    error::{Result, SolverError},
    solver::{assignment::Assignment, constraint::Constraint},
};

/// The name of one unknown to be solved. Opaque to the engine.
pub type Variable = String;
/// Index of a constraint within a [`Csp`]'s constraint list.
pub type ConstraintId = usize;

/// The static description of a constraint satisfaction problem.
///
/// A `Csp` owns the variable→domain mapping and the constraint list, and it
/// derives an incidence index from each variable to the constraints whose
/// scope mentions it. It is constructed once per problem instance and
/// read-only thereafter; domains are never narrowed during search.
///
/// Variables keep the order they were declared in. That order is part of the
/// problem's identity: the deterministic variable-selection heuristic scans
/// it, so it must not depend on a hash map's iteration order.
#[derive(Debug)]
pub struct Csp {
    /// Variable names in declaration order.
    variables: Vec<Variable>,
    domains: HashMap<Variable, Vec<i64>>,
    constraints: Vec<Box<dyn Constraint>>,
    /// For each variable, the ids of the constraints that affect it.
    incidence: HashMap<Variable, Vec<ConstraintId>>,
}

impl Csp {
    /// Builds a `Csp` from an ordered list of `(variable, domain)` pairs and
    /// a list of constraints.
    ///
    /// Every constraint registers itself under each variable in its scope to
    /// form the incidence index. A scope variable with no domain entry is a
    /// contract violation and fails construction with
    /// [`SolverError::UndeclaredScopeVariable`].
    pub fn new(
        variables: Vec<(Variable, Vec<i64>)>,
        constraints: Vec<Box<dyn Constraint>>,
    ) -> Result<Self> {
        let order: Vec<Variable> = variables.iter().map(|(name, _)| name.clone()).collect();
        let domains: HashMap<Variable, Vec<i64>> = variables.into_iter().collect();

        let mut incidence: HashMap<Variable, Vec<ConstraintId>> = HashMap::new();
        for (id, constraint) in constraints.iter().enumerate() {
            for variable in constraint.variables() {
                if !domains.contains_key(variable) {
                    return Err(SolverError::UndeclaredScopeVariable {
                        constraint: constraint.descriptor().name,
                        variable: variable.clone(),
                    }
                    .into());
                }
                incidence.entry(variable.clone()).or_default().push(id);
            }
        }

        Ok(Self {
            variables: order,
            domains,
            constraints,
            incidence,
        })
    }

    /// The variable names in their declaration order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The domain declared for `variable`, in its stored order.
    pub fn domain(&self, variable: &str) -> Option<&[i64]> {
        self.domains.get(variable).map(Vec::as_slice)
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint>] {
        &self.constraints
    }

    /// The constraints whose scope includes `variable`.
    pub fn constraints_affecting(&self, variable: &str) -> impl Iterator<Item = &dyn Constraint> {
        self.incidence
            .get(variable)
            .into_iter()
            .flatten()
            .map(move |&id| self.constraints[id].as_ref())
    }

    /// Would assigning `value` to `variable` violate any constraint, given
    /// the current assignment of the other variables?
    ///
    /// Returns `true` iff every constraint indexed under `variable` reports
    /// satisfaction for the proposed value. This is the only pruning the
    /// engine performs; there is no propagation across other unassigned
    /// variables. No side effects.
    pub fn is_variable_value_consistent(
        &self,
        assignment: &Assignment,
        variable: &str,
        value: i64,
    ) -> Result<bool> {
        for constraint in self.constraints_affecting(variable) {
            if !constraint.satisfied_by_proposed_value(variable, value, assignment)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Re-checks every constraint against every assigned variable in its
    /// scope. Used to verify a finished assignment end-to-end.
    pub fn is_assignment_consistent(&self, assignment: &Assignment) -> Result<bool> {
        for constraint in &self.constraints {
            for variable in constraint.variables() {
                let Some(value) = assignment.get(variable) else {
                    continue;
                };
                if !constraint.satisfied_by_proposed_value(variable, value, assignment)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}
