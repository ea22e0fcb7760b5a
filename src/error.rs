//! Error types for the N-Queens search

use std::time::Duration;
use thiserror::Error;

/// Errors raised by board operations and search runs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueensError {
    /// The requested board dimension is not a positive integer
    #[error("invalid board size {0}: the board dimension must be a positive integer")]
    InvalidBoardSize(i64),

    /// A place/remove call broke the board's preconditions
    #[error("invalid placement at ({row}, {col}): {reason}")]
    InvalidPlacement {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    /// A spawned search task could not run to completion
    #[error("search task failed: {0}")]
    TaskFailure(String),

    /// The top-level join gave up before every task reported back
    #[error("join timed out after {timeout:?} with {pending} task(s) outstanding")]
    JoinTimeout { timeout: Duration, pending: usize },

    /// Settings that cannot drive a search
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QueensError {
    /// Build a task failure from a caught panic payload
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "task panicked".to_string()
        };
        QueensError::TaskFailure(message)
    }
}

pub type Result<T> = std::result::Result<T, QueensError>;
