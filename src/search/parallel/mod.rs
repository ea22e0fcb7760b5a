//! Worker pool and top-level join shared by the parallel strategies
//!
//! Every job runs on a rayon pool and reports back over a channel. The caller
//! blocks on that channel until all jobs have reported or the join timeout
//! expires. There is no cancellation: a job that fails does not stop its
//! siblings, and jobs still running after a timeout keep adding to the
//! collector until they finish on their own.

pub mod column_partition;
pub mod fork_join;

pub use column_partition::ColumnPartition;
pub use fork_join::ForkJoin;

use crate::error::{QueensError, Result};
use crossbeam_channel::RecvTimeoutError;
use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// A unit of work submitted to the pool
pub type Job = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// How the top-level join ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinReport {
    pub submitted: usize,
    pub completed: usize,
    pub timed_out: bool,
}

impl JoinReport {
    pub fn pending(&self) -> usize {
        self.submitted - self.completed
    }
}

/// Fixed-size pool with a bounded final join
pub struct WorkerPool {
    pool: ThreadPool,
    join_timeout: Option<Duration>,
}

impl WorkerPool {
    pub fn new(worker_count: usize, join_timeout: Option<Duration>) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_count.max(1))
            .thread_name(|i| format!("queens-worker-{i}"))
            .build()
            .map_err(|e| QueensError::TaskFailure(format!("failed to build worker pool: {e}")))?;

        debug!("worker pool ready with {} thread(s)", pool.current_num_threads());
        Ok(Self { pool, join_timeout })
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Submit every job and block until they all report back.
    ///
    /// A failed job surfaces here as its error once the remaining jobs have
    /// reported; the first failure wins. A timeout is not an error: the
    /// report flags it and lists how many jobs never reported.
    pub fn run_all(&self, jobs: Vec<Job>) -> Result<JoinReport> {
        let submitted = jobs.len();
        let (tx, rx) = crossbeam_channel::unbounded::<(usize, Result<()>)>();

        for (id, job) in jobs.into_iter().enumerate() {
            let tx = tx.clone();
            self.pool.spawn(move || {
                let result = panic::catch_unwind(AssertUnwindSafe(job))
                    .unwrap_or_else(|payload| Err(QueensError::from_panic(payload)));
                // The receiver is gone only when the caller stopped waiting
                let _ = tx.send((id, result));
            });
        }
        drop(tx);

        let deadline = self.join_timeout.map(|timeout| Instant::now() + timeout);
        let mut completed = 0;
        let mut first_failure = None;

        while completed < submitted {
            let received = match deadline {
                Some(deadline) => rx.recv_deadline(deadline),
                None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
            };

            match received {
                Ok((id, result)) => {
                    completed += 1;
                    if let Err(err) = result {
                        warn!("job {id} failed: {err}");
                        first_failure.get_or_insert(err);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    warn!(
                        "join timed out after {:?}; {} of {} job(s) still outstanding",
                        self.join_timeout.unwrap_or_default(),
                        submitted - completed,
                        submitted
                    );
                    if let Some(err) = first_failure {
                        return Err(err);
                    }
                    return Ok(JoinReport {
                        submitted,
                        completed,
                        timed_out: true,
                    });
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(QueensError::TaskFailure(format!(
                        "{} job(s) were dropped without reporting",
                        submitted - completed
                    )));
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(JoinReport {
                submitted,
                completed,
                timed_out: false,
            }),
        }
    }
}
