//! N-Queens problem definition

use crate::config::{Settings, Strategy};
use crate::error::Result;
use crate::search::{SearchOutcome, SearchPlan};
use log::{info, warn};
use std::collections::BTreeSet;

/// A board size plus the settings that decide how to search it
pub struct QueensProblem {
    settings: Settings,
    plan: SearchPlan,
}

impl QueensProblem {
    /// Create a problem from settings; fails fast on a non-positive board size
    pub fn new(settings: Settings) -> Result<Self> {
        let plan = SearchPlan::from_settings(&settings)?;
        Ok(Self { settings, plan })
    }

    /// Solve with the configured strategy
    pub fn solve(&self) -> Result<SearchOutcome> {
        info!(
            "solving {}-queens with {} ({:?} board, {} worker(s))",
            self.plan.size, self.plan.strategy, self.plan.board_model, self.plan.worker_count
        );
        self.plan.run()
    }

    /// Solve with an explicit strategy, ignoring the configured one
    pub fn solve_with(&self, strategy: Strategy) -> Result<SearchOutcome> {
        self.plan.with_strategy(strategy).run()
    }

    /// Run every strategy on the same board
    pub fn compare_strategies(&self) -> Result<StrategyComparison> {
        let outcomes = Strategy::ALL
            .iter()
            .map(|&strategy| self.solve_with(strategy))
            .collect::<Result<Vec<_>>>()?;

        let comparison = StrategyComparison { outcomes };
        if !comparison.all_agree() {
            warn!("strategies disagree on the {}-queens solutions", self.plan.size);
        }
        Ok(comparison)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn plan(&self) -> &SearchPlan {
        &self.plan
    }

    pub fn size(&self) -> usize {
        self.plan.size
    }
}

/// Outcomes of the same board under every strategy
#[derive(Debug, Clone)]
pub struct StrategyComparison {
    pub outcomes: Vec<SearchOutcome>,
}

impl StrategyComparison {
    /// True when every run is complete and all report the same solutions.
    ///
    /// Count-only runs are compared by count alone.
    pub fn all_agree(&self) -> bool {
        let Some(first) = self.outcomes.first() else {
            return true;
        };
        let reference: BTreeSet<_> = first.solutions.iter().collect();

        self.outcomes.iter().all(|outcome| {
            outcome.complete
                && outcome.count == first.count
                && outcome.solutions.iter().collect::<BTreeSet<_>>() == reference
        })
    }
}
