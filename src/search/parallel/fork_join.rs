//! Depth-bounded recursive splitting of the search tree

use super::{Job, JoinReport, WorkerPool};
use crate::error::Result;
use crate::search::collector::SolutionCollector;
use crate::search::sequential::SequentialSearcher;
use crate::search::state::SearchState;
use log::{debug, trace};
use rayon::prelude::*;
use std::sync::Arc;

/// Default number of tree levels split into separate tasks
pub const DEFAULT_DEPTH_THRESHOLD: usize = 2;

/// Splits the top `depth_threshold` levels of the tree into independent tasks
/// and runs everything below them with the sequential searcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkJoin {
    depth_threshold: usize,
}

impl ForkJoin {
    pub fn new(depth_threshold: usize) -> Self {
        Self { depth_threshold }
    }

    pub fn depth_threshold(&self) -> usize {
        self.depth_threshold
    }

    /// Run the whole tree below `initial` on `pool`
    pub fn run<S>(
        &self,
        pool: &WorkerPool,
        initial: S,
        collector: Arc<SolutionCollector>,
    ) -> Result<JoinReport>
    where
        S: SearchState + 'static,
    {
        debug!(
            "fork-join from row {} with depth threshold {} on {} worker(s)",
            initial.row(),
            self.depth_threshold,
            pool.worker_count()
        );

        let threshold = self.depth_threshold;
        let root = SearchTask::new(initial, 0);
        let job: Job = Box::new(move || root.compute(threshold, &collector));
        pool.run_all(vec![job])
    }
}

impl Default for ForkJoin {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH_THRESHOLD)
    }
}

/// A subtree owned by exactly one task
struct SearchTask<S> {
    state: S,
    depth: usize,
}

impl<S: SearchState> SearchTask<S> {
    fn new(state: S, depth: usize) -> Self {
        Self { state, depth }
    }

    /// Explore this subtree, splitting it further while above the threshold.
    ///
    /// Children are joined before returning. A failing child does not stop
    /// its siblings; the first failure is returned once all of them finish.
    fn compute(self, threshold: usize, collector: &SolutionCollector) -> Result<()> {
        if self.depth >= threshold || self.state.is_complete() {
            let mut state = self.state;
            return SequentialSearcher::new(collector).run(&mut state);
        }

        let children = self.spawn_children()?;
        trace!(
            "task at row {} depth {} split into {} children",
            self.state.row(),
            self.depth,
            children.len()
        );

        children
            .into_par_iter()
            .with_max_len(1)
            .map(|child| child.compute(threshold, collector))
            .reduce(|| Ok(()), |a, b| a.and(b))
    }

    /// One private copy of the state per safe column of the next row
    fn spawn_children(&self) -> Result<Vec<Self>> {
        self.state
            .safe_columns()
            .into_iter()
            .map(|col| Ok(Self::new(self.state.advanced(col)?, self.depth + 1)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{PartialAssignment, Solution};
    use crate::error::QueensError;
    use crate::search::state::TrackedBoard;

    fn sequential_set(n: usize) -> Vec<Solution> {
        let collector = SolutionCollector::new();
        SequentialSearcher::new(&collector)
            .run(&mut TrackedBoard::new(n))
            .unwrap();
        collector.snapshot().unwrap()
    }

    fn fork_join_set<S: SearchState + 'static>(initial: S, threshold: usize) -> Vec<Solution> {
        let pool = WorkerPool::new(4, None).unwrap();
        let collector = Arc::new(SolutionCollector::new());
        let report = ForkJoin::new(threshold)
            .run(&pool, initial, Arc::clone(&collector))
            .unwrap();
        assert!(!report.timed_out);
        let mut solutions = collector.snapshot().unwrap();
        solutions.sort();
        solutions
    }

    #[test]
    fn test_matches_sequential_for_every_threshold() {
        for n in 1..=8 {
            let expected = sequential_set(n);
            for threshold in 0..=4 {
                assert_eq!(
                    fork_join_set(PartialAssignment::new(n), threshold),
                    expected,
                    "oracle n={n} threshold={threshold}"
                );
                assert_eq!(
                    fork_join_set(TrackedBoard::new(n), threshold),
                    expected,
                    "counters n={n} threshold={threshold}"
                );
            }
        }
    }

    #[test]
    fn test_threshold_deeper_than_board() {
        assert_eq!(fork_join_set(PartialAssignment::new(4), 10), sequential_set(4));
    }

    #[test]
    fn test_spawn_children_clone_state() {
        let root = SearchTask::new(TrackedBoard::new(5), 0);
        let children = root.spawn_children().unwrap();

        assert_eq!(children.len(), 5);
        assert_eq!(root.state.row(), 0);
        for (col, child) in children.iter().enumerate() {
            assert_eq!(child.state.columns(), &[col]);
            assert_eq!(child.depth, 1);
        }
    }

    /// Assignment that panics when one particular branch is entered
    #[derive(Clone)]
    struct Faulty {
        inner: PartialAssignment,
        poison: Vec<usize>,
    }

    impl SearchState for Faulty {
        fn size(&self) -> usize {
            self.inner.size()
        }

        fn columns(&self) -> &[usize] {
            self.inner.columns()
        }

        fn is_safe(&self, col: usize) -> bool {
            self.inner.accepts(col)
        }

        fn place(&mut self, col: usize) -> Result<()> {
            self.inner.place(col)?;
            if self.inner.columns() == self.poison.as_slice() {
                panic!("poisoned branch");
            }
            Ok(())
        }

        fn retract(&mut self) -> Result<()> {
            self.inner.retract()
        }
    }

    #[test]
    fn test_failed_branch_surfaces_without_stopping_siblings() {
        let pool = WorkerPool::new(2, None).unwrap();
        let collector = Arc::new(SolutionCollector::new());
        let initial = Faulty {
            inner: PartialAssignment::new(6),
            poison: vec![1, 3],
        };

        let err = ForkJoin::new(1)
            .run(&pool, initial, Arc::clone(&collector))
            .unwrap_err();
        assert_eq!(err, QueensError::TaskFailure("poisoned branch".into()));

        // The three 6-queens solutions outside the poisoned branch still arrive
        let solutions = collector.snapshot().unwrap();
        assert_eq!(solutions.len(), 3);
        assert!(solutions.iter().all(|s| s.columns()[..2] != [1, 3]));
    }
}
