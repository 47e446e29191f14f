#![deny(missing_docs)]
//! This crate solves 9x9 Sudoku puzzles by exhaustive backtracking search.
//!
//! The search walks the grid in row-major order, tries candidate digits in
//! ascending order, and undoes its most recent placement whenever a cell
//! dead-ends. Unsolvable and self-contradictory inputs surface as
//! [`solver::SolveError`] values, never as panics.

/// The `board` module defines the 9x9 grid, cell addressing, block
/// arithmetic, and the row/column/block uniqueness queries.
pub mod board;

/// The `parse` module loads puzzles from their plain-text format.
pub mod parse;

/// The `solver` module implements the backtracking search engine.
pub mod solver;

/// The `trail` module provides the undo log of solver placements that
/// drives backtracking.
pub mod trail;
