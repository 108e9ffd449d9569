//! TSP Genetic Solver - Command Line Interface
//!
//! Evolves tours over a distance table with a genetic algorithm.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tsp_genetic::benchmark::{Sweep, SweepConfig};
use tsp_genetic::genetic::{
    GAConfig, GenerationObserver, GenerationReport, GeneticAlgorithm, HistoryRecorder, LogObserver,
};
use tsp_genetic::instance::{seed_table, DistanceTable};
use tsp_genetic::Result;

use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tsp-genetic")]
#[command(version = "1.0")]
#[command(about = "A genetic algorithm heuristic for the Traveling Salesman Problem")]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evolve tours over a distance table
    Solve {
        /// Edge-list file (`CITY CITY COST` per line); the built-in 9-city table if omitted
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Number of generations
        #[arg(short, long, default_value = "5")]
        generations: usize,

        /// Tours per generation
        #[arg(short, long, default_value = "6")]
        population: usize,

        /// Probability of mutating each child (0.0 to 1.0)
        #[arg(short, long, default_value = "0.3")]
        mutation_rate: f64,

        /// Tours drawn per tournament (defaults to a third of the population)
        #[arg(long)]
        tournament_size: Option<usize>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Evaluate fitness in parallel
        #[arg(long)]
        parallel: bool,

        /// Write per-generation statistics to a CSV file
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output solution to a JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Repeat runs over a grid of generation counts and population sizes
    Sweep {
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// Generation counts, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "4,8,10")]
        generations: Vec<usize>,

        /// Population sizes, comma separated
        #[arg(short, long, value_delimiter = ',', default_value = "6,8")]
        populations: Vec<usize>,

        #[arg(short, long, default_value = "0.3")]
        mutation_rate: f64,

        /// Runs per grid point
        #[arg(short, long, default_value = "2")]
        runs: usize,

        /// Seed of the first run of each grid point
        #[arg(short, long, default_value = "0")]
        seed: u64,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },

    /// Print a distance table and check it is complete
    Show {
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Solve {
            table,
            generations,
            population,
            mutation_rate,
            tournament_size,
            seed,
            parallel,
            history,
            output,
        } => {
            let mut config = GAConfig::new(generations, population, mutation_rate)
                .with_parallel(parallel);
            config.tournament_size = tournament_size;
            config.seed = seed;
            solve(table.as_deref(), config, history.as_deref(), output.as_deref())
        }

        Commands::Sweep {
            table,
            generations,
            populations,
            mutation_rate,
            runs,
            seed,
            output,
        } => {
            let config = SweepConfig {
                generations,
                populations,
                mutation_rate,
                runs,
                base_seed: seed,
                ..Default::default()
            };
            run_sweep(table.as_deref(), config, &output)
        }

        Commands::Show { table } => show_table(table.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_table(path: Option<&Path>) -> Result<DistanceTable<String>> {
    match path {
        Some(path) => {
            println!("Loading table from {:?}...", path);
            DistanceTable::<String>::from_file(path)
        }
        None => seed_table(),
    }
}

fn solve(
    table_path: Option<&Path>,
    config: GAConfig,
    history_path: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(table_path)?;
    println!("{}", table);

    let mut logger = LogObserver;
    let mut history = HistoryRecorder::new();
    let mut ga = GeneticAlgorithm::new(&table, config);

    let solution = ga.run_with_observer(&mut |report: &GenerationReport<String>| {
        logger.on_generation(report);
        history.on_generation(report);
    })?;

    println!("\n========== Results ==========");
    print!("{}", solution);

    if let Some(path) = history_path {
        history.export_csv(path)?;
        println!("\nHistory saved to {:?}", path);
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&solution)?;
        std::fs::write(path, json)?;
        println!("\nSolution saved to {:?}", path);
    }

    Ok(())
}

fn run_sweep(table_path: Option<&Path>, config: SweepConfig, output: &Path) -> Result<()> {
    let table = load_table(table_path)?;
    std::fs::create_dir_all(output)?;

    let progress = ProgressBar::new(config.total_runs() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} runs ({elapsed})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut sweep = Sweep::new(config);
    sweep.run(&table, |_| progress.inc(1))?;
    progress.finish_and_clear();

    println!("{}", sweep.generate_report());

    let results_path = output.join("sweep_results.csv");
    sweep.export_to_csv(&results_path)?;
    println!("Results exported to {:?}", results_path);

    let stats_path = output.join("sweep_statistics.csv");
    sweep.export_statistics_csv(&stats_path)?;
    println!("Statistics exported to {:?}", stats_path);

    Ok(())
}

fn show_table(table_path: Option<&Path>) -> Result<()> {
    let table = load_table(table_path)?;

    println!("========== Distance Table ==========\n");
    println!("{}", table);
    println!("Cities ({}): {}", table.len(), table.cities().join(", "));

    let missing = table.missing_pairs();
    if missing.is_empty() {
        println!("All pairs have a cost");
    } else {
        println!("Missing pairs ({}):", missing.len());
        for (a, b) in missing {
            println!("  {} - {}", a, b);
        }
    }

    Ok(())
}
