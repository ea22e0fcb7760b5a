//! Main CLI application for the parallel N-Queens solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nqueens_parallel::{
    config::{BoardModel, CliOverrides, OutputFormat, Settings, Strategy},
    problem::QueensProblem,
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nqueens_parallel")]
#[command(about = "Exhaustive N-Queens solver with parallel backtracking")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug)]
struct SearchArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Board size (overrides config)
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    size: Option<i64>,

    /// Board representation used while searching (overrides config)
    #[arg(long, value_enum)]
    board_model: Option<BoardModel>,

    /// Rows expanded into subtasks before going sequential (overrides config)
    #[arg(short, long)]
    depth_threshold: Option<usize>,

    /// Worker threads (overrides config)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Join timeout in seconds (overrides config)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Count solutions without retaining them
    #[arg(long)]
    count_only: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Enumerate every solution for one board size
    Solve {
        #[command(flatten)]
        search: SearchArgs,

        /// Search strategy (overrides config)
        #[arg(short, long, value_enum)]
        strategy: Option<Strategy>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the first N solutions as boards
        #[arg(short, long, default_value_t = 0)]
        print: usize,

        /// Treat a join timeout as an error
        #[arg(long)]
        strict: bool,
    },

    /// Run every strategy on the same board and compare
    Compare {
        #[command(flatten)]
        search: SearchArgs,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            search,
            strategy,
            format,
            output,
            print,
            strict,
        } => {
            init_logging(search.verbose);
            let overrides = search.overrides(strategy, format, output);
            let settings = load_settings(&search.config, &overrides)?;
            solve_command(settings, print, strict, search.verbose)
        }
        Commands::Compare { search } => {
            init_logging(search.verbose);
            let overrides = search.overrides(None, None, None);
            let settings = load_settings(&search.config, &overrides)?;
            compare_command(settings)
        }
        Commands::Setup { directory, force } => {
            init_logging(false);
            setup_command(directory, force)
        }
    }
}

impl SearchArgs {
    fn overrides(
        &self,
        strategy: Option<Strategy>,
        format: Option<OutputFormat>,
        output_dir: Option<PathBuf>,
    ) -> CliOverrides {
        CliOverrides {
            size: self.size,
            strategy,
            board_model: self.board_model,
            depth_threshold: self.depth_threshold,
            workers: self.workers,
            timeout_seconds: self.timeout,
            count_only: self.count_only,
            format,
            output_dir,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .try_init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                config_path.display()
            ))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings
        .validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

fn solve_command(settings: Settings, print: usize, strict: bool, verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("♛ Starting N-Queens solver"));

    if verbose {
        println!("Configuration:");
        println!("  Board size: {}", settings.board.size);
        println!("  Strategy: {}", settings.search.strategy);
        println!("  Board model: {:?}", settings.search.board_model);
        println!("  Depth threshold: {}", settings.search.depth_threshold);
        println!("  Workers: {}", settings.search.resolved_worker_count());
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }

    let start_time = Instant::now();
    let problem = QueensProblem::new(settings.clone()).context("Failed to create problem")?;
    let mut outcome = problem.solve().context("Search failed")?;
    let total_time = start_time.elapsed();

    if !outcome.complete {
        println!(
            "{}",
            ColorOutput::warning(&format!(
                "⚠ Join timed out with {} task(s) pending; counts may be incomplete",
                outcome.tasks_pending
            ))
        );
    }
    if strict {
        outcome = outcome.require_complete()?;
    }

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ {} in {:.3}s",
            outcome.summary(),
            total_time.as_secs_f64()
        ))
    );

    if verbose {
        println!("\n{}", SolutionFormatter::format_outcome(&outcome));
    }

    for (i, solution) in outcome.solutions.iter().take(print).enumerate() {
        println!("{}", SolutionFormatter::format_solution(i, solution, true));
    }

    if outcome.solutions.is_empty() {
        return Ok(());
    }

    println!("{}", ColorOutput::info("💾 Saving solutions..."));
    let path = SolutionFormatter::save_solutions(
        &outcome,
        &settings.output.output_directory,
        settings.output.format,
    )
    .context("Failed to save solutions")?;
    println!("{}", ColorOutput::success(&format!("Solutions saved to {}", path.display())));

    Ok(())
}

fn compare_command(settings: Settings) -> Result<()> {
    println!(
        "{}",
        ColorOutput::info(&format!("⚖ Comparing strategies on {}-queens", settings.board.size))
    );

    let problem = QueensProblem::new(settings).context("Failed to create problem")?;
    let mut runs = Vec::with_capacity(Strategy::ALL.len());
    for strategy in Strategy::ALL {
        let start_time = Instant::now();
        let outcome = problem
            .solve_with(strategy)
            .with_context(|| format!("{} search failed", strategy))?;
        runs.push((outcome, start_time.elapsed()));
    }

    println!("\n{}", SolutionFormatter::format_comparison(&runs));

    let comparison = nqueens_parallel::problem::StrategyComparison {
        outcomes: runs.into_iter().map(|(outcome, _)| outcome).collect(),
    };
    if comparison.all_agree() {
        println!("{}", ColorOutput::success("✅ All strategies agree"));
    } else {
        println!("{}", ColorOutput::error("❌ Strategies disagree"));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let output_dir = directory.join("output/solutions");

    for dir in [&config_dir, &output_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    write_config(&config_dir.join("default.yaml"), &Settings::default(), force)?;

    let examples_dir = config_dir.join("presets");
    std::fs::create_dir_all(&examples_dir)?;

    let mut quick = Settings::for_size(8);
    quick.search.strategy = Strategy::ColumnPartition;
    write_config(&examples_dir.join("quick.yaml"), &quick, force)?;

    let mut large = Settings::for_size(14);
    large.search.strategy = Strategy::ForkJoinDepthBounded;
    large.search.depth_threshold = 3;
    large.output.keep_solutions = false;
    write_config(&examples_dir.join("count_14.yaml"), &large, force)?;

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- solve --config config/default.yaml");

    Ok(())
}

fn write_config(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings
        .to_file(&path.to_path_buf())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Created: {}", path.display());
    Ok(())
}
