//! Configuration settings for the N-Queens search

use crate::error::QueensError;
use crate::search::parallel::fork_join::DEFAULT_DEPTH_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Board dimension N; signed so that bad input is reported rather than rejected by the parser
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub board_model: BoardModel,
    pub depth_threshold: usize,
    /// `None` uses the available hardware parallelism
    pub worker_count: Option<usize>,
    /// `None` waits for every task however long it takes
    pub join_timeout_seconds: Option<u64>,
}

/// How the search tree is decomposed
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    #[default]
    Sequential,
    ForkJoinDepthBounded,
    ColumnPartition,
}

/// Which safety check backs the search state
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum BoardModel {
    /// Incremental attack counters, cloned per task
    #[default]
    Counters,
    /// Stateless check over the placed columns
    Oracle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Keep every solution rather than only counting them
    pub keep_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { size: 8 }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sequential,
            board_model: BoardModel::Counters,
            depth_threshold: DEFAULT_DEPTH_THRESHOLD,
            worker_count: None,
            join_timeout_seconds: Some(3600),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            keep_solutions: true,
            output_directory: PathBuf::from("output/solutions"),
        }
    }
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [
        Strategy::Sequential,
        Strategy::ForkJoinDepthBounded,
        Strategy::ColumnPartition,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::ForkJoinDepthBounded => "fork-join-depth-bounded",
            Strategy::ColumnPartition => "column-partition",
        }
    }

    pub fn is_parallel(self) -> bool {
        !matches!(self, Strategy::Sequential)
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl SearchConfig {
    /// Worker threads to use, falling back to the hardware parallelism
    pub fn resolved_worker_count(&self) -> usize {
        self.worker_count.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    pub fn join_timeout(&self) -> Option<Duration> {
        self.join_timeout_seconds.map(Duration::from_secs)
    }
}

impl Settings {
    /// Settings for an N×N board with defaults everywhere else
    pub fn for_size(size: i64) -> Self {
        Self {
            board: BoardConfig { size },
            ..Self::default()
        }
    }

    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> std::result::Result<(), QueensError> {
        if self.board.size <= 0 {
            return Err(QueensError::InvalidBoardSize(self.board.size));
        }

        if self.search.worker_count == Some(0) {
            return Err(QueensError::Config(
                "worker count must be positive".to_string(),
            ));
        }

        if self.search.join_timeout_seconds == Some(0) {
            return Err(QueensError::Config(
                "join timeout must be at least one second".to_string(),
            ));
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(size) = cli_overrides.size {
            self.board.size = size;
        }
        if let Some(strategy) = cli_overrides.strategy {
            self.search.strategy = strategy;
        }
        if let Some(board_model) = cli_overrides.board_model {
            self.search.board_model = board_model;
        }
        if let Some(depth_threshold) = cli_overrides.depth_threshold {
            self.search.depth_threshold = depth_threshold;
        }
        if let Some(workers) = cli_overrides.workers {
            self.search.worker_count = Some(workers);
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.search.join_timeout_seconds = Some(timeout);
        }
        if cli_overrides.count_only {
            self.output.keep_solutions = false;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub size: Option<i64>,
    pub strategy: Option<Strategy>,
    pub board_model: Option<BoardModel>,
    pub depth_threshold: Option<usize>,
    pub workers: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub count_only: bool,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}
