#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The 9x9 board and its uniqueness queries.
//!
//! A [`Board`] is a fixed 9x9 grid of digits where `0` marks an empty cell.
//! This module owns all of the grid geometry the search engine relies on:
//! row-major cell addressing, the floor-division mapping from a cell to its
//! 3x3 block, and the read-only queries that decide whether a digit may be
//! placed ([`Board::admits`]) and whether a grid is fully solved
//! ([`Board::is_solved`]).
//!
//! The board carries no search state. Which cells were given in the input and
//! which were placed by the solver is tracked elsewhere (see
//! [`crate::solver::Solver`]).

use itertools::Itertools;
use std::fmt;

/// Side length of the board.
pub const SIZE: usize = 9;

/// Side length of one 3x3 block.
pub const BLOCK: usize = 3;

/// Total number of cells on the board.
pub const CELLS: usize = SIZE * SIZE;

/// A cell coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index in `0..9`, top to bottom.
    pub row: usize,
    /// Column index in `0..9`, left to right.
    pub col: usize,
}

impl Cell {
    /// The top-left cell, where a search begins.
    pub const FIRST: Self = Self { row: 0, col: 0 };

    /// Creates a cell coordinate. Callers are expected to stay in `0..9`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The next cell in row-major order, or `None` past the bottom-right.
    ///
    /// This is the traversal order of the search: columns advance first and
    /// wrap to the start of the next row.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        if self.col + 1 < SIZE {
            Some(Self {
                row: self.row,
                col: self.col + 1,
            })
        } else if self.row + 1 < SIZE {
            Some(Self {
                row: self.row + 1,
                col: 0,
            })
        } else {
            None
        }
    }

    /// Flat row-major index in `0..81`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Top-left cell of the 3x3 block containing this cell.
    ///
    /// Block origin is `(row / 3 * 3, col / 3 * 3)` with floor division.
    #[must_use]
    pub const fn block_origin(self) -> Self {
        Self {
            row: self.row / BLOCK * BLOCK,
            col: self.col / BLOCK * BLOCK,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.col + 1)
    }
}

/// A 9x9 grid of digits in `[0, 9]`; `0` denotes an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([[u8; SIZE]; SIZE]);

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with every cell empty.
    #[must_use]
    pub const fn empty() -> Self {
        Self([[0; SIZE]; SIZE])
    }

    /// The digit at `cell`, `0` if the cell is empty.
    #[must_use]
    pub const fn get(&self, cell: Cell) -> u8 {
        self.0[cell.row][cell.col]
    }

    /// Writes `digit` at `cell`.
    pub const fn set(&mut self, cell: Cell, digit: u8) {
        self.0[cell.row][cell.col] = digit;
    }

    /// Clears `cell` back to empty.
    pub const fn clear(&mut self, cell: Cell) {
        self.0[cell.row][cell.col] = 0;
    }

    /// Iterates over every cell coordinate in row-major order.
    pub fn cells() -> impl Iterator<Item = Cell> {
        (0..SIZE)
            .cartesian_product(0..SIZE)
            .map(|(row, col)| Cell::new(row, col))
    }

    /// Number of empty cells on the board.
    #[must_use]
    pub fn blanks(&self) -> usize {
        Self::cells().filter(|&cell| self.get(cell) == 0).count()
    }

    /// Checks whether `digit` may be placed at `cell` without clashing.
    ///
    /// True iff `digit` appears nowhere in `cell`'s row, nowhere in its
    /// column, and nowhere in its 3x3 block. The scans include the target
    /// cell itself; in normal search flow that cell is empty, so the
    /// self-comparison can never match.
    ///
    /// Read-only: this never mutates the board.
    #[must_use]
    pub fn admits(&self, cell: Cell, digit: u8) -> bool {
        let row_free = (0..SIZE).all(|col| self.0[cell.row][col] != digit);
        let col_free = (0..SIZE).all(|row| self.0[row][cell.col] != digit);

        let origin = cell.block_origin();
        let block_free = (origin.row..origin.row + BLOCK)
            .cartesian_product(origin.col..origin.col + BLOCK)
            .all(|(row, col)| self.0[row][col] != digit);

        row_free && col_free && block_free
    }

    /// Finds the first filled cell whose digit already appears elsewhere in
    /// its row, column or block, scanning in row-major order.
    ///
    /// Returns `None` when the filled cells are mutually consistent. Used to
    /// reject contradictory givens before a search begins.
    #[must_use]
    pub fn first_contradiction(&self) -> Option<(Cell, u8)> {
        Self::cells().find_map(|cell| {
            let digit = self.get(cell);
            if digit == 0 {
                return None;
            }
            // Blank the cell on a scratch copy so `admits` only sees the
            // other occurrences of the digit.
            let mut probe = *self;
            probe.clear(cell);
            (!probe.admits(cell, digit)).then_some((cell, digit))
        })
    }

    /// Checks whether the grid is completely and consistently filled:
    /// every row, every column and every block contains 1-9 exactly once.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        let rows = (0..SIZE).all(|row| self.unit_complete((0..SIZE).map(|col| Cell::new(row, col))));
        let cols = (0..SIZE).all(|col| self.unit_complete((0..SIZE).map(|row| Cell::new(row, col))));
        let blocks = (0..SIZE).step_by(BLOCK).all(|br| {
            (0..SIZE).step_by(BLOCK).all(|bc| {
                self.unit_complete(
                    (br..br + BLOCK)
                        .cartesian_product(bc..bc + BLOCK)
                        .map(|(row, col)| Cell::new(row, col)),
                )
            })
        });
        rows && cols && blocks
    }

    /// True iff the nine cells of one unit hold each of 1-9 exactly once.
    fn unit_complete(&self, unit: impl Iterator<Item = Cell>) -> bool {
        let mut seen = [false; SIZE + 1];
        for cell in unit {
            let digit = usize::from(self.get(cell));
            if digit == 0 || seen[digit] {
                return false;
            }
            seen[digit] = true;
        }
        true
    }

    /// Iterates over the rows of the board.
    pub fn rows(&self) -> impl Iterator<Item = &[u8; SIZE]> {
        self.0.iter()
    }
}

impl From<[[u8; SIZE]; SIZE]> for Board {
    fn from(grid: [[u8; SIZE]; SIZE]) -> Self {
        Self(grid)
    }
}

impl From<Board> for [[u8; SIZE]; SIZE] {
    fn from(board: Board) -> Self {
        board.0
    }
}

impl fmt::Display for Board {
    /// Renders the grid with `.` for blanks and rules between blocks:
    ///
    /// ```text
    /// 5 3 . | . 7 . | . . .
    /// ...
    /// ------+-------+------
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row_idx, row) in self.rows().enumerate() {
            if row_idx > 0 && row_idx % BLOCK == 0 {
                writeln!(f, "------+-------+------")?;
            }
            let line = row
                .chunks(BLOCK)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(|&d| {
                            if d == 0 {
                                ".".to_string()
                            } else {
                                d.to_string()
                            }
                        })
                        .join(" ")
                })
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
