#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The backtracking search engine.
//!
//! [`Solver`] owns a [`Board`], a mask of the given cells, and a [`Trail`] of
//! its own placements. [`Solver::solve`] walks the board in row-major order,
//! trying candidate digits in ascending order at each empty cell. When a cell
//! admits no candidate, the most recent placement is popped off the trail,
//! its cell cleared, and the search resumes there with the next higher digit
//! as the new floor. Ascending candidate order is load-bearing: it makes the
//! output deterministic and gives each backtrack a well-defined resumption
//! point (every digit below the cleared one has already been ruled out at
//! that cell).
//!
//! The search is a plain loop over a cursor; there is no recursion and no
//! allocation on the hot path. The only exits are a fully consistent grid
//! ([`Ok`]) or a [`SolveError`].

use crate::board::{Board, Cell};
use crate::trail::Trail;
use bit_vec::BitVec;
use std::error::Error;
use std::fmt;

/// The puzzle from the Wikipedia Sudoku article, kept as the crate's
/// canonical example input.
pub const EXAMPLE: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// Why a solve could not produce a completed grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    /// The search backtracked past its first own placement: no assignment of
    /// the empty cells is consistent with the givens.
    Unsolvable,
    /// A given digit already clashes with another given in its row, column
    /// or block, detected before the search began.
    Contradiction {
        /// The earliest offending cell in row-major order.
        cell: Cell,
        /// The digit that appears more than once in one of the cell's units.
        digit: u8,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsolvable => write!(f, "puzzle has no solution"),
            Self::Contradiction { cell, digit } => {
                write!(f, "given {digit} at {cell} clashes with another given")
            }
        }
    }
}

impl Error for SolveError {}

/// Counters describing one completed search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Digits written by the solver, including ones later undone.
    pub placements: usize,
    /// Dead ends: times a placement was popped and its cell cleared.
    pub backtracks: usize,
    /// Empty cells in the input, i.e. placements still standing on success.
    pub blanks: usize,
}

/// The backtracking solver.
///
/// Exclusively owns its board and trail for the duration of a solve, so
/// repeated or concurrent solves of different puzzles cannot interfere.
#[derive(Debug, Clone)]
pub struct Solver {
    board: Board,
    /// One bit per cell, set where the input was nonzero. Given cells are
    /// skipped by the cursor and never touched by backtracking.
    givens: BitVec,
    trail: Trail,
    stats: SearchStats,
}

impl Solver {
    /// Creates a solver for `board`, recording every currently filled cell
    /// as a given.
    #[must_use]
    pub fn new(board: Board) -> Self {
        let givens: BitVec = Board::cells().map(|cell| board.get(cell) != 0).collect();
        Self {
            board,
            givens,
            trail: Trail::new(),
            stats: SearchStats::default(),
        }
    }

    /// Runs the search to completion.
    ///
    /// On success the owned board is fully populated and every given is
    /// unchanged; the returned stats describe the search effort.
    ///
    /// # Errors
    ///
    /// [`SolveError::Contradiction`] if the givens clash before any search,
    /// [`SolveError::Unsolvable`] if the search exhausts every candidate at
    /// some cell with nothing left to undo.
    pub fn solve(&mut self) -> Result<SearchStats, SolveError> {
        // A fresh run: undo any placements left from a previous call.
        while let Some(cell) = self.trail.pop() {
            self.board.clear(cell);
        }

        if let Some((cell, digit)) = self.board.first_contradiction() {
            return Err(SolveError::Contradiction { cell, digit });
        }

        self.stats = SearchStats {
            blanks: self.board.blanks(),
            ..SearchStats::default()
        };

        // Forward mode: try `floor..=9` at the cursor. Retreat mode: pop the
        // trail, clear that cell and retry it with floor = cleared digit + 1.
        let mut cursor = Some(Cell::FIRST);
        let mut floor = 1_u8;

        while let Some(cell) = cursor {
            if self.is_given(cell) {
                cursor = cell.next();
                floor = 1;
                continue;
            }

            match (floor..=9).find(|&digit| self.board.admits(cell, digit)) {
                Some(digit) => {
                    self.board.set(cell, digit);
                    self.trail.push(cell);
                    self.stats.placements += 1;
                    cursor = cell.next();
                    floor = 1;
                }
                None => {
                    let prev = self.trail.pop().ok_or(SolveError::Unsolvable)?;
                    let failed = self.board.get(prev);
                    self.board.clear(prev);
                    self.stats.backtracks += 1;
                    cursor = Some(prev);
                    floor = failed + 1;
                }
            }
        }

        Ok(self.stats)
    }

    /// The board in its current state.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Consumes the solver, handing the board back to the caller.
    #[must_use]
    pub fn into_board(self) -> Board {
        self.board
    }

    /// Stats of the most recent [`Self::solve`] call.
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    fn is_given(&self, cell: Cell) -> bool {
        self.givens.get(cell.index()) == Some(true)
    }
}

impl From<Board> for Solver {
    fn from(board: Board) -> Self {
        Self::new(board)
    }
}

impl From<[[u8; 9]; 9]> for Solver {
    fn from(grid: [[u8; 9]; 9]) -> Self {
        Self::new(Board::from(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Published solution of [`EXAMPLE`].
    const EXAMPLE_SOLVED: [[u8; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9],
    ];

    fn solve(grid: [[u8; 9]; 9]) -> Result<Board, SolveError> {
        let mut solver = Solver::from(grid);
        solver.solve()?;
        Ok(solver.into_board())
    }

    #[test]
    fn test_example_matches_published_solution() {
        let board = solve(EXAMPLE).unwrap();
        assert_eq!(board, Board::from(EXAMPLE_SOLVED));
    }

    #[test]
    fn test_example_first_row() {
        let board = solve(EXAMPLE).unwrap();
        let first_row: Vec<u8> = (0..9).map(|col| board.get(Cell::new(0, col))).collect();
        assert_eq!(first_row, vec![5, 3, 4, 6, 7, 8, 9, 1, 2]);
    }

    #[test]
    fn test_solution_satisfies_all_units() {
        let board = solve(EXAMPLE).unwrap();
        assert!(board.is_solved());
    }

    #[test]
    fn test_givens_are_preserved() {
        let board = solve(EXAMPLE).unwrap();
        for cell in Board::cells() {
            let given = EXAMPLE[cell.row][cell.col];
            if given != 0 {
                assert_eq!(board.get(cell), given, "given at {cell} was altered");
            }
        }
    }

    #[test]
    fn test_empty_grid_solves_completely() {
        let mut solver = Solver::new(Board::empty());
        let stats = solver.solve().unwrap();
        assert!(solver.board().is_solved());
        assert_eq!(stats.blanks, 81);
    }

    #[test]
    fn test_solved_input_is_trivial_success() {
        let mut solver = Solver::from(EXAMPLE_SOLVED);
        let stats = solver.solve().unwrap();
        assert_eq!(solver.board(), &Board::from(EXAMPLE_SOLVED));
        assert_eq!(stats.placements, 0, "no assignments on a full grid");
        assert_eq!(stats.backtracks, 0);
    }

    #[test]
    fn test_determinism_across_runs() {
        let first = solve(EXAMPLE).unwrap();
        let second = solve(EXAMPLE).unwrap();
        assert_eq!(first, second);

        let empty_first = solve([[0; 9]; 9]).unwrap();
        let empty_second = solve([[0; 9]; 9]).unwrap();
        assert_eq!(empty_first, empty_second);
    }

    #[test]
    fn test_resolving_same_solver_reproduces_board() {
        let mut solver = Solver::from(EXAMPLE);
        solver.solve().unwrap();
        let first = *solver.board();
        solver.solve().unwrap();
        assert_eq!(*solver.board(), first);
    }

    #[test]
    fn test_duplicate_givens_are_rejected_upfront() {
        let mut grid = [[0_u8; 9]; 9];
        grid[0][1] = 5;
        grid[0][6] = 5;
        assert_eq!(
            solve(grid),
            Err(SolveError::Contradiction {
                cell: Cell::new(0, 1),
                digit: 5,
            })
        );
    }

    #[test]
    fn test_consistent_but_unsolvable_givens() {
        // Row 0 pins 1-8; the only digit left for (0, 8) is 9, which the
        // given at (1, 8) rules out. No two givens clash directly, so the
        // contradiction pre-scan passes and the search itself must report
        // the dead end.
        let mut grid = [[0_u8; 9]; 9];
        for (col, digit) in (0..8).zip(1_u8..=8) {
            grid[0][col] = digit;
        }
        grid[1][8] = 9;
        assert_eq!(solve(grid), Err(SolveError::Unsolvable));
    }

    #[test]
    fn test_stats_balance_on_success() {
        let mut solver = Solver::from(EXAMPLE);
        let stats = solver.solve().unwrap();
        // Every backtrack undoes exactly one placement; the survivors fill
        // the blanks.
        assert_eq!(stats.placements - stats.backtracks, stats.blanks);
        assert!(stats.blanks > 0);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(SolveError::Unsolvable.to_string(), "puzzle has no solution");
        let clash = SolveError::Contradiction {
            cell: Cell::new(0, 1),
            digit: 5,
        };
        assert_eq!(clash.to_string(), "given 5 at r1c2 clashes with another given");
    }
}
