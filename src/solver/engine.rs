use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tracing::{debug, trace};

use crate::{
    error::{Result, SolverError},
    solver::{
        assignment::{Assignment, ScopedAssignment},
        csp::Csp,
        heuristics::{value::ValueOrderingHeuristic, variable::VariableSelectionHeuristic},
        stats::SearchStats,
    },
};

/// Ceiling on node visits per solve call. Bounds runaway search on
/// unsatisfiable or pathological inputs.
pub const DEFAULT_STEP_LIMIT: u64 = 10_000_000;

/// A cloneable, thread-safe handle onto the engine's step counter.
///
/// An external progress reporter may read this on its own schedule while a
/// solve is running. It is read-only feedback; nothing outside the solver
/// call chain may touch the [`Assignment`] or [`Csp`].
#[derive(Debug, Clone, Default)]
pub struct StepCounter(Arc<AtomicU64>);

impl StepCounter {
    /// Steps taken so far in the current solve invocation.
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

/// Depth-first recursive backtracking search over a [`Csp`].
///
/// The engine repeatedly asks its variable heuristic for the next unassigned
/// variable and its value heuristic for an ordered candidate list, checks
/// each candidate against the CSP's constraint index, and recurses on the
/// first consistent one. A failed branch is undone exactly before the next
/// candidate is tried. The first complete assignment found is returned;
/// alternate solutions are never explored.
pub struct BacktrackingSolver {
    variable_heuristic: Box<dyn VariableSelectionHeuristic>,
    value_heuristic: Box<dyn ValueOrderingHeuristic>,
    step_limit: u64,
    steps: StepCounter,
}

impl BacktrackingSolver {
    pub fn new(
        variable_heuristic: Box<dyn VariableSelectionHeuristic>,
        value_heuristic: Box<dyn ValueOrderingHeuristic>,
    ) -> Self {
        Self {
            variable_heuristic,
            value_heuristic,
            step_limit: DEFAULT_STEP_LIMIT,
            steps: StepCounter::default(),
        }
    }

    /// Replaces the default ceiling of [`DEFAULT_STEP_LIMIT`] node visits.
    pub fn with_step_limit(mut self, step_limit: u64) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// A handle for reading the live step count from another thread.
    pub fn step_counter(&self) -> StepCounter {
        self.steps.clone()
    }

    /// Attempts to find a complete, consistent assignment for `csp`,
    /// starting from `assignment` (which may be partially pre-filled with
    /// e.g. puzzle clues).
    ///
    /// # Returns
    ///
    /// * `Ok((Some(assignment), stats))` — a complete assignment satisfying
    ///   every constraint, plus search statistics.
    /// * `Ok((None, stats))` — the search exhausted every branch; the CSP has
    ///   no solution reachable from the initial assignment. A normal
    ///   negative outcome, not an error.
    /// * `Err(_)` — a contract violation, or
    ///   [`SolverError::StepLimitExceeded`] when the step ceiling was hit.
    pub fn solve(
        &mut self,
        csp: &Csp,
        mut assignment: Assignment,
    ) -> Result<(Option<Assignment>, SearchStats)> {
        self.steps.reset();
        let mut stats = SearchStats::default();

        let solved = self.backtrack(csp, &mut assignment, &mut stats)?;
        stats.steps = self.steps.count();
        debug!(solved, ?stats, "search finished");

        if solved {
            Ok((Some(assignment), stats))
        } else {
            Ok((None, stats))
        }
    }

    fn backtrack(
        &mut self,
        csp: &Csp,
        assignment: &mut Assignment,
        stats: &mut SearchStats,
    ) -> Result<bool> {
        if assignment.is_complete() {
            return Ok(true);
        }

        let steps = self.steps.increment();
        if steps > self.step_limit {
            return Err(SolverError::StepLimitExceeded {
                limit: self.step_limit,
            }
            .into());
        }

        let Some(variable) = self.variable_heuristic.select_variable(assignment, csp) else {
            // Unreachable while the completeness check above holds; treat a
            // heuristic that finds nothing to branch on as terminal.
            return Ok(true);
        };

        for value in self.value_heuristic.order_values(assignment, csp, &variable)? {
            stats.consistency_checks += 1;
            if !csp.is_variable_value_consistent(assignment, &variable, value)? {
                continue;
            }

            trace!(%variable, value, steps, "branching");
            let mut guard = ScopedAssignment::new(assignment, variable.clone(), value);
            if self.backtrack(csp, guard.assignment(), stats)? {
                // First solution wins; keep the branch assigned all the way
                // up the stack.
                guard.keep();
                return Ok(true);
            }
            // Guard drops here, restoring the assignment exactly as it was
            // before this candidate.
            stats.backtracks += 1;
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::solver::{
        constraint::Constraint,
        constraints::{
            all_different::AllDifferentConstraint, differing_pair::DifferingPairConstraint,
        },
        heuristics::{
            value::DomainOrderHeuristic,
            variable::{RandomUnassignedHeuristic, SelectFirstHeuristic},
        },
    };

    fn deterministic_solver() -> BacktrackingSolver {
        BacktrackingSolver::new(
            Box::new(SelectFirstHeuristic),
            Box::new(DomainOrderHeuristic),
        )
    }

    /// A 2x2 Latin square: four cells, domain {1, 2}, all-different rows and
    /// columns.
    fn latin_square_2x2() -> Csp {
        let variables = ["r1c1", "r1c2", "r2c1", "r2c2"]
            .iter()
            .map(|name| (name.to_string(), vec![1, 2]))
            .collect();
        let constraints: Vec<Box<dyn Constraint>> = vec![
            Box::new(AllDifferentConstraint::new(["r1c1", "r1c2"])),
            Box::new(AllDifferentConstraint::new(["r2c1", "r2c2"])),
            Box::new(AllDifferentConstraint::new(["r1c1", "r2c1"])),
            Box::new(AllDifferentConstraint::new(["r1c2", "r2c2"])),
        ];
        Csp::new(variables, constraints).unwrap()
    }

    #[test]
    fn solves_a_latin_square_to_a_verified_solution() {
        let _ = tracing_subscriber::fmt::try_init();
        let csp = latin_square_2x2();
        let mut solver = deterministic_solver();

        let (solution, stats) = solver.solve(&csp, Assignment::new(&csp)).unwrap();
        let solution = solution.expect("latin square is satisfiable");

        assert!(solution.is_complete());
        assert!(csp.is_assignment_consistent(&solution).unwrap());
        // One of the two valid squares: the diagonal pairs must match.
        assert_eq!(
            solution.value("r1c1").unwrap(),
            solution.value("r2c2").unwrap()
        );
        assert_eq!(
            solution.value("r1c2").unwrap(),
            solution.value("r2c1").unwrap()
        );
        assert!(stats.steps > 0);
    }

    #[test]
    fn respects_a_prefilled_partial_assignment() {
        let csp = latin_square_2x2();
        let mut assignment = Assignment::new(&csp);
        assignment.assign("r1c1", 2);

        let mut solver = deterministic_solver();
        let (solution, _) = solver.solve(&csp, assignment).unwrap();
        let solution = solution.unwrap();

        assert_eq!(solution.value("r1c1").unwrap(), 2);
        assert_eq!(solution.value("r1c2").unwrap(), 1);
        assert_eq!(solution.value("r2c1").unwrap(), 1);
        assert_eq!(solution.value("r2c2").unwrap(), 2);
    }

    #[test]
    fn unsatisfiable_problem_is_a_normal_negative_result() {
        // Two variables forced to differ, but only one value exists.
        let variables = vec![("a".to_string(), vec![1]), ("b".to_string(), vec![1])];
        let constraints: Vec<Box<dyn Constraint>> =
            vec![Box::new(DifferingPairConstraint::new("a", "b"))];
        let csp = Csp::new(variables, constraints).unwrap();

        let mut solver = deterministic_solver();
        let (solution, stats) = solver.solve(&csp, Assignment::new(&csp)).unwrap();
        assert!(solution.is_none());
        assert!(stats.steps > 0);
    }

    #[test]
    fn step_ceiling_aborts_the_solve() {
        // Unsatisfiable with a deep search tree: five variables over {1, 2, 3}
        // cannot all differ.
        let names: Vec<String> = (0..5).map(|i| format!("v{i}")).collect();
        let variables = names
            .iter()
            .map(|name| (name.clone(), vec![1, 2, 3]))
            .collect();
        let constraints: Vec<Box<dyn Constraint>> =
            vec![Box::new(AllDifferentConstraint::new(names))];
        let csp = Csp::new(variables, constraints).unwrap();

        let mut solver = deterministic_solver().with_step_limit(4);
        let err = solver.solve(&csp, Assignment::new(&csp)).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::StepLimitExceeded { limit: 4 }
        ));
    }

    #[test]
    fn deterministic_heuristics_give_identical_runs() {
        let csp = latin_square_2x2();

        let (first, first_stats) = deterministic_solver()
            .solve(&csp, Assignment::new(&csp))
            .unwrap();
        let (second, second_stats) = deterministic_solver()
            .solve(&csp, Assignment::new(&csp))
            .unwrap();

        let first = first.unwrap();
        let second = second.unwrap();
        for variable in csp.variables() {
            assert_eq!(
                first.value(variable).unwrap(),
                second.value(variable).unwrap()
            );
        }
        assert_eq!(first_stats, second_stats);
    }

    #[test]
    fn seeded_random_heuristic_is_reproducible_and_correct() {
        let csp = latin_square_2x2();

        let run = |seed: u64| {
            let mut solver = BacktrackingSolver::new(
                Box::new(RandomUnassignedHeuristic::seeded(seed)),
                Box::new(DomainOrderHeuristic),
            );
            solver.solve(&csp, Assignment::new(&csp)).unwrap()
        };

        let (first, first_stats) = run(99);
        let (second, second_stats) = run(99);
        let first = first.unwrap();
        let second = second.unwrap();

        assert!(csp.is_assignment_consistent(&first).unwrap());
        for variable in csp.variables() {
            assert_eq!(
                first.value(variable).unwrap(),
                second.value(variable).unwrap()
            );
        }
        assert_eq!(first_stats, second_stats);
    }

    #[test]
    fn step_counter_handle_is_readable_from_another_thread() {
        let csp = latin_square_2x2();
        let mut solver = deterministic_solver();
        let counter = solver.step_counter();

        let (_, stats) = solver.solve(&csp, Assignment::new(&csp)).unwrap();

        let observed = std::thread::spawn(move || counter.count())
            .join()
            .unwrap();
        assert_eq!(observed, stats.steps);
    }

    #[test]
    fn solved_input_returns_without_charging_a_step() {
        let csp = latin_square_2x2();
        let mut assignment = Assignment::new(&csp);
        assignment.assign("r1c1", 1);
        assignment.assign("r1c2", 2);
        assignment.assign("r2c1", 2);
        assignment.assign("r2c2", 1);

        let mut solver = deterministic_solver();
        let (solution, stats) = solver.solve(&csp, assignment).unwrap();
        assert!(solution.is_some());
        assert_eq!(stats.steps, 0);
    }

    proptest! {
        /// Whatever the engine returns as success must be a complete
        /// assignment that re-verifies against every constraint.
        #[test]
        fn returned_solutions_verify_end_to_end(
            domain_sizes in proptest::collection::vec(1..4i64, 1..6),
            raw_pairs in proptest::collection::vec((0..16usize, 0..16usize), 0..8),
        ) {
            let names: Vec<String> = (0..domain_sizes.len())
                .map(|i| format!("v{i}"))
                .collect();
            let variables = names
                .iter()
                .zip(&domain_sizes)
                .map(|(name, &size)| (name.clone(), (1..=size).collect()))
                .collect();
            let constraints: Vec<Box<dyn Constraint>> = raw_pairs
                .iter()
                .map(|&(a, b)| (a % names.len(), b % names.len()))
                .filter(|&(a, b)| a != b)
                .map(|(a, b)| {
                    Box::new(DifferingPairConstraint::new(
                        names[a].clone(),
                        names[b].clone(),
                    )) as Box<dyn Constraint>
                })
                .collect();
            let csp = Csp::new(variables, constraints).unwrap();

            let mut solver = deterministic_solver();
            let (solution, _stats) = solver.solve(&csp, Assignment::new(&csp)).unwrap();
            if let Some(solution) = solution {
                prop_assert!(solution.is_complete());
                prop_assert!(csp.is_assignment_consistent(&solution).unwrap());
            }
        }
    }
}
