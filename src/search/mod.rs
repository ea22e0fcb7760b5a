//! Backtracking search, its parallel decompositions and the solution sink

pub mod collector;
pub mod outcome;
pub mod parallel;
pub mod sequential;
pub mod state;
pub mod strategy;

pub use collector::SolutionCollector;
pub use outcome::{OutcomeSummary, SearchOutcome};
pub use parallel::{ColumnPartition, ForkJoin, JoinReport, WorkerPool};
pub use sequential::SequentialSearcher;
pub use state::{SearchState, TrackedBoard};
pub use strategy::SearchPlan;
