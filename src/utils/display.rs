//! Display and output formatting utilities

use crate::board::Solution;
use crate::config::OutputFormat;
use crate::search::SearchOutcome;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Format solutions and outcomes for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Board with a queen per row
    pub fn format_board(solution: &Solution) -> String {
        let n = solution.size();
        let mut output = String::with_capacity(n * (n + 1));
        for &col in solution.columns() {
            for c in 0..n {
                output.push(if c == col { 'Q' } else { '·' });
            }
            output.push('\n');
        }
        output
    }

    /// Board with row and column numbers
    pub fn format_board_with_coords(solution: &Solution) -> String {
        let n = solution.size();
        let mut output = String::new();

        output.push_str("   ");
        for x in 0..n {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, &col) in solution.columns().iter().enumerate() {
            output.push_str(&format!("{:2} ", y));
            for x in 0..n {
                output.push_str(if x == col { " Q" } else { " ·" });
            }
            output.push('\n');
        }

        output
    }

    /// One numbered solution, optionally with its board
    pub fn format_solution(index: usize, solution: &Solution, show_board: bool) -> String {
        let mut output = format!("#{:<5} {}\n", index + 1, solution);
        if show_board {
            output.push_str(&Self::format_board(solution));
        }
        output
    }

    /// Count, completeness and task statistics of a run
    pub fn format_outcome(outcome: &SearchOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!("Board: {}x{}\n", outcome.size, outcome.size));
        output.push_str(&format!("Strategy: {}\n", outcome.strategy));
        output.push_str(&format!("Board model: {:?}\n", outcome.board_model));
        output.push_str(&format!("Solutions: {}\n", outcome.count));
        if outcome.strategy.is_parallel() {
            output.push_str(&format!(
                "Tasks: {} submitted, {} pending\n",
                outcome.tasks_submitted, outcome.tasks_pending
            ));
        }
        if !outcome.complete {
            output.push_str("Result may be incomplete: the join timed out\n");
        }

        output
    }

    /// Side-by-side table of strategy runs
    pub fn format_comparison(runs: &[(SearchOutcome, Duration)]) -> String {
        let mut output = String::new();

        output.push_str("Strategy                 | Solutions | Time(s) | Complete\n");
        output.push_str("-------------------------|-----------|---------|---------\n");

        for (outcome, elapsed) in runs {
            output.push_str(&format!(
                "{:24} | {:9} | {:7.3} | {}\n",
                outcome.strategy.name(),
                outcome.count,
                elapsed.as_secs_f64(),
                if outcome.complete { "yes" } else { "no" }
            ));
        }

        output
    }

    /// Save the solutions of a run based on output format; returns the written file
    pub fn save_solutions<P: AsRef<Path>>(
        outcome: &SearchOutcome,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let path = match format {
            OutputFormat::Text => {
                let path = output_dir.join(format!("queens_{}.txt", outcome.size));
                let mut content = Self::format_outcome(outcome);
                content.push('\n');
                for (i, solution) in outcome.solutions.iter().enumerate() {
                    content.push_str(&Self::format_solution(i, solution, true));
                    content.push('\n');
                }
                std::fs::write(&path, content)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            OutputFormat::Json => {
                let path = output_dir.join(format!("queens_{}.json", outcome.size));
                let json = serde_json::to_string_pretty(outcome)
                    .context("Failed to serialize solutions")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
        };

        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
