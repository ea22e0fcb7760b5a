//! Incremental conflict counters for an N×N board

use crate::error::{QueensError, Result};
use std::fmt;

/// Marker stored in a cell that holds a queen
pub const OCCUPIED: i32 = -1;

/// Attack counters for every cell of the board.
///
/// A cell holds [`OCCUPIED`] when a queen sits on it, `0` when it is free and
/// unattacked, and otherwise the number of placed queens that attack it along
/// a row, a column or either diagonal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictBoard {
    size: usize,
    counters: Vec<i32>,
}

impl ConflictBoard {
    /// Create an empty board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            counters: vec![0; size * size],
        }
    }

    /// Board dimension
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    /// Counter value at a cell, `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.size && col < self.size {
            Some(self.counters[self.index(row, col)])
        } else {
            None
        }
    }

    /// Raw counters in row-major order
    pub fn counters(&self) -> &[i32] {
        &self.counters
    }

    /// True iff the cell is free and not attacked by any placed queen
    #[inline]
    pub fn is_safe(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(0)
    }

    /// Put a queen on a free cell and mark every cell it attacks
    pub fn place_queen(&mut self, row: usize, col: usize) -> Result<()> {
        match self.get(row, col) {
            None => Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "cell is outside the board",
            }),
            Some(0) => {
                let idx = self.index(row, col);
                self.counters[idx] = OCCUPIED;
                self.apply_attacks(row, col, 1);
                Ok(())
            }
            Some(_) => Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "cell is occupied or attacked",
            }),
        }
    }

    /// Take a queen off the board, exactly undoing [`place_queen`](Self::place_queen)
    pub fn remove_queen(&mut self, row: usize, col: usize) -> Result<()> {
        match self.get(row, col) {
            None => Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "cell is outside the board",
            }),
            Some(OCCUPIED) => {
                let idx = self.index(row, col);
                self.counters[idx] = 0;
                self.apply_attacks(row, col, -1);
                Ok(())
            }
            Some(_) => Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "cell holds no queen",
            }),
        }
    }

    /// Add `delta` to every cell sharing the row, column or a diagonal with (row, col),
    /// leaving (row, col) itself untouched.
    fn apply_attacks(&mut self, row: usize, col: usize, delta: i32) {
        let n = self.size;

        for c in (0..n).filter(|&c| c != col) {
            let idx = self.index(row, c);
            self.counters[idx] += delta;
        }
        for r in (0..n).filter(|&r| r != row) {
            let idx = self.index(r, col);
            self.counters[idx] += delta;
        }

        // Four diagonal rays out from the queen
        for (dr, dc) in [(1isize, 1isize), (1, -1), (-1, 1), (-1, -1)] {
            let mut r = row as isize + dr;
            let mut c = col as isize + dc;
            while r >= 0 && r < n as isize && c >= 0 && c < n as isize {
                let idx = self.index(r as usize, c as usize);
                self.counters[idx] += delta;
                r += dr;
                c += dc;
            }
        }
    }

    /// Columns of the queens currently on the board, scanned row by row
    pub fn queen_columns(&self) -> Vec<Option<usize>> {
        (0..self.size)
            .map(|row| (0..self.size).find(|&col| self.get(row, col) == Some(OCCUPIED)))
            .collect()
    }
}

impl fmt::Display for ConflictBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.counters[self.index(row, col)] {
                    OCCUPIED => write!(f, "  Q")?,
                    v => write!(f, "{:3}", v)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = ConflictBoard::new(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.counters().len(), 16);
        assert!(board.counters().iter().all(|&v| v == 0));
        assert!(board.is_safe(3, 3));
        assert!(!board.is_safe(4, 0));
    }

    #[test]
    fn test_place_marks_attacks() {
        let mut board = ConflictBoard::new(4);
        board.place_queen(1, 1).unwrap();

        assert_eq!(board.get(1, 1), Some(OCCUPIED));
        // Row, column and both diagonals
        assert_eq!(board.get(1, 3), Some(1));
        assert_eq!(board.get(3, 1), Some(1));
        assert_eq!(board.get(0, 0), Some(1));
        assert_eq!(board.get(3, 3), Some(1));
        assert_eq!(board.get(0, 2), Some(1));
        assert_eq!(board.get(2, 0), Some(1));
        // Knight's move away is untouched
        assert_eq!(board.get(3, 2), Some(0));
        assert!(board.is_safe(3, 2));
        assert!(!board.is_safe(1, 0));
    }

    #[test]
    fn test_overlapping_attacks_accumulate() {
        let mut board = ConflictBoard::new(5);
        board.place_queen(0, 0).unwrap();
        board.place_queen(1, 2).unwrap();

        // (1, 1) is hit by the first queen's diagonal and the second queen's row
        assert_eq!(board.get(1, 1), Some(2));
        assert_eq!(board.queen_columns(), vec![Some(0), Some(2), None, None, None]);
    }

    #[test]
    fn test_place_then_remove_restores_every_cell() {
        for n in 1..=7 {
            for row in 0..n {
                for col in 0..n {
                    let mut board = ConflictBoard::new(n);
                    // Start from a non-trivial state so increments overlap
                    if n > 3 && row != 0 && col != 2 && board.is_safe(0, 2) {
                        board.place_queen(0, 2).unwrap();
                    }
                    if !board.is_safe(row, col) {
                        continue;
                    }
                    let before = board.clone();
                    board.place_queen(row, col).unwrap();
                    board.remove_queen(row, col).unwrap();
                    assert_eq!(board, before, "n={n} row={row} col={col}");
                }
            }
        }
    }

    #[test]
    fn test_precondition_violations() {
        let mut board = ConflictBoard::new(4);
        assert!(matches!(
            board.place_queen(4, 0),
            Err(QueensError::InvalidPlacement { .. })
        ));
        assert!(board.remove_queen(0, 0).is_err());

        board.place_queen(0, 0).unwrap();
        assert!(board.place_queen(0, 0).is_err());
        assert!(board.place_queen(0, 3).is_err());

        let snapshot = board.clone();
        assert!(board.remove_queen(2, 1).is_err());
        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = ConflictBoard::new(6);
        board.place_queen(0, 1).unwrap();
        let mut copy = board.clone();
        copy.place_queen(1, 3).unwrap();

        assert_eq!(board.get(1, 3), Some(0));
        assert_eq!(copy.get(1, 3), Some(OCCUPIED));
        assert_eq!(copy.get(1, 5), Some(1));
        assert_eq!(board.get(1, 5), Some(0));
    }
}
