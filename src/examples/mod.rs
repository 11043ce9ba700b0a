//! Worked problem frontends built on the generic solver.

pub mod sudoku;
