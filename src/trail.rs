#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The placement trail: an undo log of solver-made assignments.
//!
//! Every time the search writes a digit into a previously empty cell, that
//! cell's coordinate is pushed here. When a cell dead-ends, the most recent
//! entry is popped and the search resumes at that cell with a raised
//! candidate floor. Given cells are never recorded, so the trail is exactly
//! the set of decisions the solver is allowed to undo, oldest first.

use crate::board::{CELLS, Cell};
use smallvec::SmallVec;

/// Ordered history of the cells the solver has assigned.
///
/// Backed by an inline buffer large enough for a full board, so a solve
/// never allocates for trail bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail {
    steps: SmallVec<[Cell; CELLS]>,
}

impl Trail {
    /// Creates an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: SmallVec::new(),
        }
    }

    /// Number of undoable placements currently recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when no placements remain to undo. Backtracking from this state
    /// means the puzzle is unsolvable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Records a placement at `cell`.
    pub fn push(&mut self, cell: Cell) {
        self.steps.push(cell);
    }

    /// Removes and returns the most recent placement, if any.
    pub fn pop(&mut self) -> Option<Cell> {
        self.steps.pop()
    }

    /// Iterates over recorded placements, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trail_is_empty() {
        let trail = Trail::new();
        assert!(trail.is_empty());
        assert_eq!(trail.len(), 0);
        assert_eq!(Trail::new().pop(), None);
    }

    #[test]
    fn test_pop_is_lifo() {
        let mut trail = Trail::new();
        trail.push(Cell::new(0, 2));
        trail.push(Cell::new(0, 3));
        trail.push(Cell::new(1, 0));

        assert_eq!(trail.pop(), Some(Cell::new(1, 0)));
        assert_eq!(trail.pop(), Some(Cell::new(0, 3)));
        assert_eq!(trail.pop(), Some(Cell::new(0, 2)));
        assert_eq!(trail.pop(), None);
    }

    #[test]
    fn test_iter_yields_oldest_first() {
        let mut trail = Trail::new();
        trail.push(Cell::new(2, 2));
        trail.push(Cell::new(2, 5));

        let cells: Vec<Cell> = trail.iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(2, 2), Cell::new(2, 5)]);
    }

    #[test]
    fn test_full_board_stays_inline() {
        let mut trail = Trail::new();
        for cell in crate::board::Board::cells() {
            trail.push(cell);
        }
        assert_eq!(trail.len(), CELLS);
        assert!(!trail.steps.spilled());
    }
}
