#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the plain-text puzzle format.
//!
//! The format is line-oriented and deliberately loose:
//! - Lines starting with `#` are comments and are skipped.
//! - Blank lines are skipped.
//! - Every other character is a cell: `1`-`9` for a given, `0` or `.` for a
//!   blank. Whitespace between cells is ignored.
//! - Cells are read in row-major order until 81 have been seen; anything
//!   after that is ignored. Fewer than 81 cells is an error.
//!
//! This accepts both the common nine-lines-of-nine layout and the one-line
//! 81-character form. The parser only builds a [`Board`]; whether the givens
//! are mutually consistent is the solver's concern.

use crate::board::{Board, CELLS, Cell, SIZE};
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Ways a puzzle text can fail to describe a 9x9 grid.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A cell character that is not `0`-`9` or `.`.
    BadCell {
        /// One-based line number of the offending character.
        line: usize,
        /// The character itself.
        ch: char,
    },
    /// Input ended before 81 cells were seen.
    Truncated {
        /// How many cells were present.
        cells: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read puzzle: {e}"),
            Self::BadCell { line, ch } => {
                write!(f, "line {line}: invalid cell character {ch:?}")
            }
            Self::Truncated { cells } => {
                write!(f, "puzzle ended after {cells} of {CELLS} cells")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::BadCell { .. } | Self::Truncated { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parses puzzle text from a `BufRead` source into a [`Board`].
///
/// # Errors
///
/// [`ParseError::Io`] if a line cannot be read, [`ParseError::BadCell`] on
/// the first character that is not a cell, [`ParseError::Truncated`] if the
/// input holds fewer than 81 cells.
pub fn parse_puzzle<R: BufRead>(reader: R) -> Result<Board, ParseError> {
    let mut board = Board::empty();
    let mut filled = 0_usize;

    for (line_idx, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        for ch in trimmed.chars().filter(|c| !c.is_whitespace()) {
            if filled == CELLS {
                break;
            }
            let digit = match ch {
                '.' | '0' => 0,
                '1'..='9' => ch as u8 - b'0',
                _ => {
                    return Err(ParseError::BadCell {
                        line: line_idx + 1,
                        ch,
                    });
                }
            };
            let cell = Cell::new(filled / SIZE, filled % SIZE);
            board.set(cell, digit);
            filled += 1;
        }
    }

    if filled < CELLS {
        return Err(ParseError::Truncated { cells: filled });
    }

    Ok(board)
}

/// Parses a puzzle file specified by its path.
///
/// Convenience wrapper that opens the file, wraps it in a `BufReader`, and
/// calls [`parse_puzzle`].
///
/// # Errors
///
/// [`ParseError::Io`] if the file cannot be opened, plus everything
/// [`parse_puzzle`] reports.
pub fn parse_puzzle_file<P: AsRef<Path>>(path: P) -> Result<Board, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_puzzle(io::BufReader::new(file))
}

/// Parses a puzzle held in a string.
///
/// # Errors
///
/// Everything [`parse_puzzle`] reports, except that I/O cannot fail.
pub fn parse_puzzle_text(text: &str) -> Result<Board, ParseError> {
    parse_puzzle(text.as_bytes())
}
