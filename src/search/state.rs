//! Search state shared by the sequential driver and every parallel task

use crate::board::{ConflictBoard, PartialAssignment};
use crate::error::{QueensError, Result};

/// Row-by-row placement state that a search task owns exclusively.
///
/// Cloning must produce a fully independent copy: parallel strategies hand a
/// fresh clone to every task they spawn and never share one instance.
pub trait SearchState: Clone + Send + Sync {
    /// Board dimension
    fn size(&self) -> usize;

    /// Columns placed so far, one per filled row
    fn columns(&self) -> &[usize];

    /// Whether a queen can go in `col` of the next row
    fn is_safe(&self, col: usize) -> bool;

    /// Put a queen in `col` of the next row
    fn place(&mut self, col: usize) -> Result<()>;

    /// Undo the most recent [`place`](Self::place)
    fn retract(&mut self) -> Result<()>;

    /// Next row to fill
    fn row(&self) -> usize {
        self.columns().len()
    }

    fn is_complete(&self) -> bool {
        self.row() == self.size()
    }

    /// Safe columns of the next row in ascending order
    fn safe_columns(&self) -> Vec<usize> {
        (0..self.size()).filter(|&col| self.is_safe(col)).collect()
    }

    /// Private copy advanced by one placement
    fn advanced(&self, col: usize) -> Result<Self> {
        let mut next = self.clone();
        next.place(col)?;
        Ok(next)
    }
}

/// Conflict counters paired with the columns placed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBoard {
    board: ConflictBoard,
    columns: Vec<usize>,
}

impl TrackedBoard {
    pub fn new(size: usize) -> Self {
        Self {
            board: ConflictBoard::new(size),
            columns: Vec::with_capacity(size),
        }
    }

    pub fn board(&self) -> &ConflictBoard {
        &self.board
    }
}

impl SearchState for TrackedBoard {
    fn size(&self) -> usize {
        self.board.size()
    }

    fn columns(&self) -> &[usize] {
        &self.columns
    }

    #[inline]
    fn is_safe(&self, col: usize) -> bool {
        self.board.is_safe(self.columns.len(), col)
    }

    fn place(&mut self, col: usize) -> Result<()> {
        self.board.place_queen(self.columns.len(), col)?;
        self.columns.push(col);
        Ok(())
    }

    fn retract(&mut self) -> Result<()> {
        let col = self.columns.pop().ok_or(QueensError::InvalidPlacement {
            row: 0,
            col: 0,
            reason: "no queen to retract",
        })?;
        self.board.remove_queen(self.columns.len(), col)
    }
}

impl SearchState for PartialAssignment {
    fn size(&self) -> usize {
        PartialAssignment::size(self)
    }

    fn columns(&self) -> &[usize] {
        PartialAssignment::columns(self)
    }

    #[inline]
    fn is_safe(&self, col: usize) -> bool {
        self.accepts(col)
    }

    fn place(&mut self, col: usize) -> Result<()> {
        if !self.accepts(col) {
            return Err(QueensError::InvalidPlacement {
                row: PartialAssignment::row(self),
                col,
                reason: "column or diagonal already taken",
            });
        }
        self.push(col);
        Ok(())
    }

    fn retract(&mut self) -> Result<()> {
        self.pop().map(|_| ()).ok_or(QueensError::InvalidPlacement {
            row: 0,
            col: 0,
            reason: "no queen to retract",
        })
    }

    fn advanced(&self, col: usize) -> Result<Self> {
        if !self.accepts(col) {
            return Err(QueensError::InvalidPlacement {
                row: PartialAssignment::row(self),
                col,
                reason: "column or diagonal already taken",
            });
        }
        Ok(self.extended(col))
    }
}
