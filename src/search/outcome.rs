//! Result of one search run

use crate::board::Solution;
use crate::config::{BoardModel, Strategy};
use crate::error::{QueensError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a run produced and whether it is known to be exhaustive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOutcome {
    pub size: usize,
    pub strategy: Strategy,
    pub board_model: BoardModel,
    /// Solutions counted, including those not retained
    pub count: usize,
    /// Retained solutions in arrival order; empty for count-only runs
    pub solutions: Vec<Solution>,
    /// False when the join timed out and the run may have missed solutions
    pub complete: bool,
    pub tasks_submitted: usize,
    pub tasks_pending: usize,
    #[serde(skip)]
    pub join_timeout: Option<Duration>,
}

impl SearchOutcome {
    /// Turn a timed-out run into a [`QueensError::JoinTimeout`]
    pub fn require_complete(self) -> Result<Self> {
        if self.complete {
            Ok(self)
        } else {
            Err(QueensError::JoinTimeout {
                timeout: self.join_timeout.unwrap_or_default(),
                pending: self.tasks_pending,
            })
        }
    }

    /// Retained solutions in lexicographic order
    pub fn sorted_solutions(&self) -> Vec<Solution> {
        let mut solutions = self.solutions.clone();
        solutions.sort();
        solutions
    }

    /// One-line summary for logs and reports
    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            size: self.size,
            strategy: self.strategy,
            count: self.count,
            complete: self.complete,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub size: usize,
    pub strategy: Strategy,
    pub count: usize,
    pub complete: bool,
}

impl std::fmt::Display for OutcomeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-queens via {}: {} solution(s){}",
            self.size,
            self.strategy,
            self.count,
            if self.complete { "" } else { " (incomplete)" }
        )
    }
}
