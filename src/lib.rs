//! Parallel N-Queens Solver
//!
//! This library enumerates every placement of N non-attacking queens by
//! backtracking, either sequentially or split across a worker pool.

pub mod board;
pub mod config;
pub mod error;
pub mod problem;
pub mod search;
pub mod utils;

pub use board::Solution;
pub use config::{Settings, Strategy};
pub use error::QueensError;
pub use problem::QueensProblem;
pub use search::SearchOutcome;

use anyhow::Result;

/// Main entry point for solving an N-Queens problem
pub fn solve_queens(settings: Settings) -> Result<SearchOutcome> {
    let problem = QueensProblem::new(settings)?;
    Ok(problem.solve()?)
}
