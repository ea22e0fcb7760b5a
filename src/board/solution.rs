//! Complete N-Queens placements

use crate::error::{QueensError, Result};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A full placement: `columns[row]` is the column of the queen in that row
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Solution {
    columns: Vec<usize>,
}

impl Solution {
    /// Wrap columns produced by a search leaf, skipping validation
    pub(crate) fn from_leaf(columns: &[usize]) -> Self {
        Self {
            columns: columns.to_vec(),
        }
    }

    /// Build a solution from caller-supplied columns, rejecting attacking placements
    pub fn from_columns(columns: Vec<usize>) -> Result<Self> {
        let n = columns.len();
        if n == 0 {
            return Err(QueensError::InvalidBoardSize(0));
        }
        if let Some((row, &col)) = columns.iter().enumerate().find(|&(_, &c)| c >= n) {
            return Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "column is outside the board",
            });
        }
        let solution = Self { columns };
        if let Some((row, col)) = solution.first_conflict() {
            return Err(QueensError::InvalidPlacement {
                row,
                col,
                reason: "queen is attacked by an earlier row",
            });
        }
        Ok(solution)
    }

    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// No two queens share a column or a diagonal
    pub fn is_valid(&self) -> bool {
        self.first_conflict().is_none()
    }

    /// The later queen of the first attacking pair, as (row, col)
    fn first_conflict(&self) -> Option<(usize, usize)> {
        self.columns
            .iter()
            .enumerate()
            .tuple_combinations()
            .find(|&((i, &a), (j, &b))| a == b || a.abs_diff(b) == i.abs_diff(j))
            .map(|(_, (j, &b))| (j, b))
    }

    /// Mirror image across the vertical axis
    pub fn mirrored(&self) -> Self {
        let n = self.size();
        Self {
            columns: self.columns.iter().map(|&c| n - 1 - c).collect(),
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.columns.iter().join(", "))
    }
}
