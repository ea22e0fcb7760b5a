//! Strategy dispatch: one execution path per decomposition policy

use super::collector::SolutionCollector;
use super::outcome::SearchOutcome;
use super::parallel::{ColumnPartition, ForkJoin, JoinReport, WorkerPool};
use super::sequential::SequentialSearcher;
use super::state::{SearchState, TrackedBoard};
use crate::board::PartialAssignment;
use crate::config::{BoardModel, Settings, Strategy};
use crate::error::{QueensError, Result};
use log::info;
use std::sync::Arc;
use std::time::Duration;

/// Validated, fully resolved parameters for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    pub size: usize,
    pub strategy: Strategy,
    pub board_model: BoardModel,
    pub depth_threshold: usize,
    pub worker_count: usize,
    pub join_timeout: Option<Duration>,
    pub keep_solutions: bool,
}

impl SearchPlan {
    /// Resolve settings, failing before any work when the board size is not positive
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let size = usize::try_from(settings.board.size)
            .map_err(|_| QueensError::InvalidBoardSize(settings.board.size))?;

        Ok(Self {
            size,
            strategy: settings.search.strategy,
            board_model: settings.search.board_model,
            depth_threshold: settings.search.depth_threshold,
            worker_count: settings.search.resolved_worker_count(),
            join_timeout: settings.search.join_timeout(),
            keep_solutions: settings.output.keep_solutions,
        })
    }

    /// Same plan under another strategy
    pub fn with_strategy(&self, strategy: Strategy) -> Self {
        Self {
            strategy,
            ..self.clone()
        }
    }

    /// Run the plan to completion, or until the join timeout
    pub fn run(&self) -> Result<SearchOutcome> {
        let collector = Arc::new(SolutionCollector::with_storage(self.keep_solutions));

        let report = match self.board_model {
            BoardModel::Counters => {
                self.strategy
                    .execute(self, TrackedBoard::new(self.size), Arc::clone(&collector))?
            }
            BoardModel::Oracle => self.strategy.execute(
                self,
                PartialAssignment::new(self.size),
                Arc::clone(&collector),
            )?,
        };

        // Snapshot first: after a timeout, straggling tasks may still be adding
        let solutions = collector.snapshot()?;
        let count = if collector.keeps_solutions() {
            solutions.len()
        } else {
            collector.count()
        };

        let outcome = SearchOutcome {
            size: self.size,
            strategy: self.strategy,
            board_model: self.board_model,
            count,
            solutions,
            complete: report.as_ref().map_or(true, |r| !r.timed_out),
            tasks_submitted: report.as_ref().map_or(0, |r| r.submitted),
            tasks_pending: report.as_ref().map_or(0, JoinReport::pending),
            join_timeout: self.join_timeout,
        };
        info!("{}", outcome.summary());
        Ok(outcome)
    }
}

impl Strategy {
    /// Explore every completion of `initial` with this strategy.
    ///
    /// Parallel strategies return the report of their top-level join; the
    /// sequential strategy runs on the calling thread and has none.
    pub fn execute<S>(
        self,
        plan: &SearchPlan,
        initial: S,
        collector: Arc<SolutionCollector>,
    ) -> Result<Option<JoinReport>>
    where
        S: SearchState + 'static,
    {
        match self {
            Strategy::Sequential => {
                let mut state = initial;
                SequentialSearcher::new(&collector).run(&mut state)?;
                Ok(None)
            }
            Strategy::ForkJoinDepthBounded => {
                let pool = WorkerPool::new(plan.worker_count, plan.join_timeout)?;
                ForkJoin::new(plan.depth_threshold)
                    .run(&pool, initial, collector)
                    .map(Some)
            }
            Strategy::ColumnPartition => {
                let pool = WorkerPool::new(plan.worker_count, plan.join_timeout)?;
                ColumnPartition.run(&pool, initial, collector).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn plan(size: usize, strategy: Strategy, board_model: BoardModel) -> SearchPlan {
        SearchPlan {
            size,
            strategy,
            board_model,
            depth_threshold: 2,
            worker_count: 4,
            join_timeout: Some(Duration::from_secs(120)),
            keep_solutions: true,
        }
    }

    #[test]
    fn test_plan_from_settings() {
        let mut settings = Settings::for_size(9);
        settings.search.strategy = Strategy::ColumnPartition;
        settings.search.worker_count = Some(3);
        settings.search.join_timeout_seconds = None;

        let plan = SearchPlan::from_settings(&settings).unwrap();
        assert_eq!(plan.size, 9);
        assert_eq!(plan.worker_count, 3);
        assert_eq!(plan.join_timeout, None);
        assert_eq!(plan.with_strategy(Strategy::Sequential).strategy, Strategy::Sequential);
    }

    #[test]
    fn test_plan_rejects_bad_size_before_search() {
        for size in [0, -5] {
            assert_eq!(
                SearchPlan::from_settings(&Settings::for_size(size)),
                Err(QueensError::InvalidBoardSize(size))
            );
        }
    }

    #[test]
    fn test_known_counts_for_every_strategy() {
        for strategy in Strategy::ALL {
            for model in [BoardModel::Counters, BoardModel::Oracle] {
                for (n, expected) in [(1, 1), (4, 2), (5, 10), (8, 92)] {
                    let outcome = plan(n, strategy, model).run().unwrap();
                    assert_eq!(outcome.count, expected, "{strategy} {model:?} n={n}");
                    assert!(outcome.complete);
                }
            }
        }
    }

    #[test]
    fn test_twelve_queens() {
        let mut counting = plan(12, Strategy::Sequential, BoardModel::Counters);
        counting.keep_solutions = false;
        assert_eq!(counting.run().unwrap().count, 14200);

        let parallel = plan(12, Strategy::ColumnPartition, BoardModel::Counters)
            .run()
            .unwrap();
        assert_eq!(parallel.count, 14200);
        assert_eq!(parallel.solutions.len(), 14200);
    }

    #[test]
    fn test_every_strategy_yields_the_same_set() {
        for n in 1..=9 {
            let reference: BTreeSet<_> = plan(n, Strategy::Sequential, BoardModel::Counters)
                .run()
                .unwrap()
                .solutions
                .into_iter()
                .collect();

            for strategy in Strategy::ALL {
                for model in [BoardModel::Counters, BoardModel::Oracle] {
                    let solutions: BTreeSet<_> =
                        plan(n, strategy, model).run().unwrap().solutions.into_iter().collect();
                    assert_eq!(solutions, reference, "{strategy} {model:?} n={n}");
                }
            }
        }
    }

    #[test]
    fn test_every_solution_is_non_attacking() {
        for strategy in Strategy::ALL {
            let outcome = plan(8, strategy, BoardModel::Oracle).run().unwrap();
            assert!(outcome.solutions.iter().all(|s| s.size() == 8 && s.is_valid()));
        }
    }

    #[test]
    fn test_repeated_sequential_runs_are_identical() {
        let first = plan(8, Strategy::Sequential, BoardModel::Counters).run().unwrap();
        let second = plan(8, Strategy::Sequential, BoardModel::Counters).run().unwrap();
        assert_eq!(first.solutions, second.solutions);
        assert_eq!(first.solutions, first.sorted_solutions());
    }

    #[test]
    fn test_count_only_runs() {
        for strategy in Strategy::ALL {
            let mut counting = plan(8, strategy, BoardModel::Counters);
            counting.keep_solutions = false;
            let outcome = counting.run().unwrap();
            assert_eq!(outcome.count, 92);
            assert!(outcome.solutions.is_empty());
        }
    }

    #[test]
    fn test_depth_threshold_zero_matches_other_thresholds() {
        let mut shallow = plan(8, Strategy::ForkJoinDepthBounded, BoardModel::Counters);
        shallow.depth_threshold = 0;
        let mut deep = shallow.clone();
        deep.depth_threshold = 5;

        assert_eq!(
            shallow.run().unwrap().sorted_solutions(),
            deep.run().unwrap().sorted_solutions()
        );
    }

    #[test]
    fn test_parallel_reports_submitted_tasks() {
        let outcome = plan(6, Strategy::ColumnPartition, BoardModel::Counters)
            .run()
            .unwrap();
        assert_eq!(outcome.tasks_submitted, 6);
        assert_eq!(outcome.tasks_pending, 0);

        let outcome = plan(6, Strategy::Sequential, BoardModel::Counters).run().unwrap();
        assert_eq!(outcome.tasks_submitted, 0);
    }
}
