//! A 9x9 Sudoku frontend for the generic solver.
//!
//! Cells are named `a1`..`i9` (row letter, column digit) and declared in
//! row-major order. Each row, column, and 3x3 box contributes one
//! all-different constraint, 27 in total. Clues are loaded into the initial
//! assignment before the search starts.

use std::fmt;
use std::str::FromStr;

use crate::{
    error::{Error, Result, SolverError},
    solver::{
        assignment::Assignment,
        constraint::Constraint,
        constraints::all_different::AllDifferentConstraint,
        csp::{Csp, Variable},
        engine::BacktrackingSolver,
        heuristics::{value::DomainOrderHeuristic, variable::SelectFirstHeuristic},
        stats::SearchStats,
    },
};

/// The grid marker for a cell without a clue.
pub const NO_VALUE: i64 = 0;

/// Minimum number of clues for a 9x9 Sudoku to have any chance of a unique
/// solution (arXiv:1201.0749).
const MIN_CLUES: usize = 17;

fn cell_name(row: usize, col: usize) -> Variable {
    format!("{}{}", (b'a' + row as u8) as char, col + 1)
}

fn constraints() -> Vec<Box<dyn Constraint>> {
    let mut constraints: Vec<Box<dyn Constraint>> = Vec::with_capacity(27);
    for row in 0..9 {
        constraints.push(Box::new(AllDifferentConstraint::new(
            (0..9).map(|col| cell_name(row, col)),
        )));
    }
    for col in 0..9 {
        constraints.push(Box::new(AllDifferentConstraint::new(
            (0..9).map(|row| cell_name(row, col)),
        )));
    }
    for box_row in 0..3 {
        for box_col in 0..3 {
            constraints.push(Box::new(AllDifferentConstraint::new((0..9).map(|i| {
                cell_name(box_row * 3 + i / 3, box_col * 3 + i % 3)
            }))));
        }
    }
    constraints
}

/// A Sudoku instance: the CSP over its 81 cells plus the current assignment.
#[derive(Debug)]
pub struct SudokuPuzzle {
    csp: Csp,
    assignment: Assignment,
}

impl SudokuPuzzle {
    /// Builds a puzzle from a 9x9 grid of clues, with [`NO_VALUE`] marking
    /// blank cells.
    ///
    /// Fails with [`SolverError::InvalidPuzzle`] when a clue is outside
    /// `1..=9` or when fewer than 17 clues are given.
    pub fn new(clues: [[i64; 9]; 9]) -> Result<Self> {
        let variables = (0..9)
            .flat_map(|row| (0..9).map(move |col| (cell_name(row, col), (1..=9).collect())))
            .collect();
        let csp = Csp::new(variables, constraints())?;
        let mut assignment = Assignment::new(&csp);

        let mut clue_count = 0;
        for (row, cells) in clues.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                if value == NO_VALUE {
                    continue;
                }
                if !(1..=9).contains(&value) {
                    return Err(SolverError::InvalidPuzzle(format!(
                        "clue {value} at {} is outside 1..=9",
                        cell_name(row, col)
                    ))
                    .into());
                }
                clue_count += 1;
                assignment.assign(cell_name(row, col), value);
            }
        }

        if clue_count < MIN_CLUES {
            return Err(SolverError::InvalidPuzzle(format!(
                "{clue_count} clues given; at least {MIN_CLUES} are required"
            ))
            .into());
        }

        Ok(Self { csp, assignment })
    }

    /// Runs the backtracking search with the deterministic heuristic pair,
    /// filling the grid in place.
    ///
    /// An exhausted search surfaces as [`SolverError::NoSolution`]; the step
    /// ceiling, should it trip, propagates as
    /// [`SolverError::StepLimitExceeded`].
    pub fn solve(&mut self) -> Result<SearchStats> {
        let mut solver = BacktrackingSolver::new(
            Box::new(SelectFirstHeuristic),
            Box::new(DomainOrderHeuristic),
        );
        let (solution, stats) = solver.solve(&self.csp, self.assignment.clone())?;
        match solution {
            Some(assignment) => {
                self.assignment = assignment;
                Ok(stats)
            }
            None => Err(SolverError::NoSolution { steps: stats.steps }.into()),
        }
    }

    /// The value at `(row, col)` (zero-based), or `None` for a blank cell.
    pub fn value(&self, row: usize, col: usize) -> Option<i64> {
        self.assignment.get(&cell_name(row, col))
    }

    /// The current grid, with [`NO_VALUE`] for blank cells.
    pub fn to_grid(&self) -> [[i64; 9]; 9] {
        let mut grid = [[NO_VALUE; 9]; 9];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if let Some(value) = self.value(row, col) {
                    *cell = value;
                }
            }
        }
        grid
    }

    /// `true` iff every cell is filled and no constraint is violated.
    pub fn is_solved(&self) -> Result<bool> {
        Ok(self.assignment.is_complete() && self.csp.is_assignment_consistent(&self.assignment)?)
    }
}

impl FromStr for SudokuPuzzle {
    type Err = Error;

    /// Parses the textual grid format: one line per row, `.` for blank
    /// cells, with `|` column separators and `-` ruler lines ignored.
    fn from_str(text: &str) -> Result<Self> {
        let mut grid = [[NO_VALUE; 9]; 9];
        let mut row = 0;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('-') {
                continue;
            }
            if row >= 9 {
                return Err(SolverError::InvalidPuzzle("more than 9 grid rows".to_string()).into());
            }

            let cells: Vec<char> = line
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '|')
                .collect();
            if cells.len() != 9 {
                return Err(SolverError::InvalidPuzzle(format!(
                    "grid row {} has {} cells, expected 9",
                    row + 1,
                    cells.len()
                ))
                .into());
            }

            for (col, c) in cells.into_iter().enumerate() {
                grid[row][col] = match c {
                    '.' => NO_VALUE,
                    '0'..='9' => i64::from(c as u8 - b'0'),
                    other => {
                        return Err(SolverError::InvalidPuzzle(format!(
                            "unexpected character `{other}` in grid row {}",
                            row + 1
                        ))
                        .into())
                    }
                };
            }
            row += 1;
        }

        if row != 9 {
            return Err(
                SolverError::InvalidPuzzle(format!("expected 9 grid rows, found {row}")).into(),
            );
        }
        Self::new(grid)
    }
}

impl fmt::Display for SudokuPuzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            write!(f, " ")?;
            for col in 0..9 {
                match self.value(row, col) {
                    Some(value) => write!(f, "{value} ")?,
                    None => write!(f, ". ")?,
                }
                if (col + 1) % 3 == 0 && col < 8 {
                    write!(f, "| ")?;
                }
            }
            writeln!(f)?;
            if (row + 1) % 3 == 0 && row < 8 {
                writeln!(f, "-------|-------|-------")?;
            }
        }
        Ok(())
    }
}
