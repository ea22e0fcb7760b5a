//! Immutable partial assignments and the stateless validity check

use serde::{Deserialize, Serialize};

/// Columns of the queens placed so far, one entry per filled row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PartialAssignment {
    size: usize,
    columns: Vec<usize>,
}

impl PartialAssignment {
    /// Empty assignment for an N×N board
    pub fn new(size: usize) -> Self {
        Self {
            size,
            columns: Vec::with_capacity(size),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Next row to fill
    pub fn row(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn is_complete(&self) -> bool {
        self.columns.len() == self.size
    }

    /// Whether a queen may go in `col` of the next row
    pub fn accepts(&self, col: usize) -> bool {
        col < self.size && is_valid(&self.columns, col)
    }

    /// A new assignment with `col` appended; `self` is left untouched
    pub fn extended(&self, col: usize) -> Self {
        let mut columns = Vec::with_capacity(self.size);
        columns.extend_from_slice(&self.columns);
        columns.push(col);
        Self {
            size: self.size,
            columns,
        }
    }

    pub(crate) fn push(&mut self, col: usize) {
        self.columns.push(col);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.columns.pop()
    }
}

/// Check whether `candidate` can be the column of row `assignment.len()`.
///
/// Returns false iff an earlier queen shares the column or a diagonal.
pub fn is_valid(assignment: &[usize], candidate: usize) -> bool {
    let row = assignment.len();
    assignment
        .iter()
        .enumerate()
        .all(|(i, &col)| col != candidate && col.abs_diff(candidate) != row - i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_assignment_accepts_everything() {
        let assignment = PartialAssignment::new(4);
        assert_eq!(assignment.row(), 0);
        assert!((0..4).all(|c| assignment.accepts(c)));
        assert!(!assignment.accepts(4));
    }

    #[test]
    fn test_is_valid_rejects_column_and_diagonals() {
        // Queens at (0, 1) and (1, 3); checking row 2
        let prior = [1, 3];
        assert!(!is_valid(&prior, 1)); // same column as row 0
        assert!(!is_valid(&prior, 3)); // same column as row 1
        assert!(!is_valid(&prior, 2)); // diagonal of row 1
        assert!(!is_valid(&prior, 4)); // diagonal of row 1
        assert!(is_valid(&prior, 0));
        assert!(!is_valid(&[0], 1));
        assert!(is_valid(&[0], 2));
    }

    #[test]
    fn test_extended_leaves_original_untouched() {
        let base = PartialAssignment::new(5).extended(0);
        let left = base.extended(2);
        let right = base.extended(3);

        assert_eq!(base.columns(), &[0]);
        assert_eq!(left.columns(), &[0, 2]);
        assert_eq!(right.columns(), &[0, 3]);
        assert!(!base.is_complete());
    }

    #[test]
    fn test_push_pop_backtracking() {
        let mut assignment = PartialAssignment::new(4);
        assignment.push(1);
        assignment.push(3);
        assert_eq!(assignment.row(), 2);
        assert_eq!(assignment.pop(), Some(3));
        assert_eq!(assignment.columns(), &[1]);
    }
}
