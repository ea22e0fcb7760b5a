//! Depth-first backtracking over the remaining rows of a board

use super::collector::SolutionCollector;
use super::state::SearchState;
use crate::board::Solution;
use crate::error::Result;

/// Single-threaded backtracking driver.
///
/// Columns are tried in ascending order and rows are filled top to bottom, so
/// one run delivers its solutions in ascending lexicographic order.
pub struct SequentialSearcher<'a> {
    collector: &'a SolutionCollector,
}

impl<'a> SequentialSearcher<'a> {
    pub fn new(collector: &'a SolutionCollector) -> Self {
        Self { collector }
    }

    /// Enumerate every completion of `state`.
    ///
    /// `state` is restored to its starting placement when this returns `Ok`.
    pub fn run<S: SearchState>(&self, state: &mut S) -> Result<()> {
        if state.is_complete() {
            return self.collector.add(Solution::from_leaf(state.columns()));
        }

        for col in 0..state.size() {
            if !state.is_safe(col) {
                continue;
            }
            state.place(col)?;
            let outcome = self.run(state);
            state.retract()?;
            outcome?;
        }

        Ok(())
    }
}
