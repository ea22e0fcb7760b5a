//! One job per column of the first open row

use super::{Job, JoinReport, WorkerPool};
use crate::error::Result;
use crate::search::collector::SolutionCollector;
use crate::search::sequential::SequentialSearcher;
use crate::search::state::SearchState;
use log::debug;
use std::sync::Arc;

/// Partitions only the next row: every safe column becomes one job that
/// clones the starting state, places that queen and searches the rest
/// sequentially.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnPartition;

impl ColumnPartition {
    pub fn run<S>(
        &self,
        pool: &WorkerPool,
        initial: S,
        collector: Arc<SolutionCollector>,
    ) -> Result<JoinReport>
    where
        S: SearchState + 'static,
    {
        if initial.is_complete() {
            // Nothing left to partition
            let mut state = initial;
            SequentialSearcher::new(&collector).run(&mut state)?;
            return Ok(JoinReport {
                submitted: 0,
                completed: 0,
                timed_out: false,
            });
        }

        let columns = initial.safe_columns();
        debug!(
            "column partition of row {} into {} job(s) on {} worker(s)",
            initial.row(),
            columns.len(),
            pool.worker_count()
        );

        // Read-only starting point; each job takes its own clone
        let start = Arc::new(initial);
        let jobs: Vec<Job> = columns
            .into_iter()
            .map(|col| {
                let start = Arc::clone(&start);
                let collector = Arc::clone(&collector);
                Box::new(move || -> Result<()> {
                    let mut state = start.as_ref().clone();
                    state.place(col)?;
                    SequentialSearcher::new(&collector).run(&mut state)
                }) as Job
            })
            .collect();

        pool.run_all(jobs)
    }
}
