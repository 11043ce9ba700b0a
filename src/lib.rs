//! Trellis is a generic, heuristic-driven backtracking solver for constraint
//! satisfaction problems (CSPs).
//!
//! A problem is described as a set of named variables, a domain of candidate
//! integer values for each variable, and a list of constraints over subsets
//! of those variables. The engine performs depth-first recursive backtracking
//! search and returns the first complete assignment that satisfies every
//! constraint, or an explicit "no solution" result.
//!
//! # Core Concepts
//!
//! - **[`Csp`]**: the static problem description — variables, domains, and
//!   constraints, plus an index from each variable to the constraints that
//!   mention it.
//! - **[`Assignment`]**: the mutable partial mapping from variable to value
//!   that the search builds up and tears down as it explores.
//! - **[`Constraint`]**: a trait representing a rule that must hold. The
//!   crate ships [`AllDifferentConstraint`] and [`DifferingPairConstraint`].
//! - **[`BacktrackingSolver`]**: the engine, parameterised by a
//!   variable-selection heuristic and a value-ordering heuristic.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving for `a != b` where `a` can be `1` or `2` and `b` can only be `1`.
//! The solver must deduce that `a` is `2`.
//!
//! ```
//! use trellis::solver::{
//!     assignment::Assignment,
//!     constraint::Constraint,
//!     constraints::differing_pair::DifferingPairConstraint,
//!     csp::Csp,
//!     engine::BacktrackingSolver,
//!     heuristics::{value::DomainOrderHeuristic, variable::SelectFirstHeuristic},
//! };
//!
//! # fn main() -> trellis::error::Result<()> {
//! let variables = vec![
//!     ("a".to_string(), vec![1, 2]),
//!     ("b".to_string(), vec![1]),
//! ];
//! let constraints: Vec<Box<dyn Constraint>> =
//!     vec![Box::new(DifferingPairConstraint::new("a", "b"))];
//!
//! let csp = Csp::new(variables, constraints)?;
//! let assignment = Assignment::new(&csp);
//!
//! let mut solver = BacktrackingSolver::new(
//!     Box::new(SelectFirstHeuristic),
//!     Box::new(DomainOrderHeuristic),
//! );
//! let (solution, stats) = solver.solve(&csp, assignment)?;
//! let solution = solution.expect("problem is satisfiable");
//!
//! assert_eq!(solution.value("a")?, 2);
//! assert_eq!(solution.value("b")?, 1);
//! assert!(stats.steps > 0);
//! # Ok(())
//! # }
//! ```
//!
//! [`Csp`]: solver::csp::Csp
//! [`Assignment`]: solver::assignment::Assignment
//! [`Constraint`]: solver::constraint::Constraint
//! [`AllDifferentConstraint`]: solver::constraints::all_different::AllDifferentConstraint
//! [`DifferingPairConstraint`]: solver::constraints::differing_pair::DifferingPairConstraint
//! [`BacktrackingSolver`]: solver::engine::BacktrackingSolver

pub mod error;
pub mod examples;
pub mod solver;
