//! Command-line crossword filler.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crossfill::mcts::SearchConfig;
use crossfill::solver::{generate, LayoutSource, RunConfig};
use crossfill::words::WordSource;

#[derive(Parser)]
#[command(name = "crossfill")]
#[command(version, about = "Fill crossword grids with Monte Carlo Tree Search", long_about = None)]
struct Cli {
    /// Layout CSV path or glob; a blank grid is generated when omitted
    #[arg(long = "path_to_layout")]
    path_to_layout: Option<String>,

    /// Rows of the generated grid (ignored when a layout path is given)
    #[arg(long = "num_rows", default_value_t = 4)]
    num_rows: usize,

    /// Columns of the generated grid (ignored when a layout path is given)
    #[arg(long = "num_cols", default_value_t = 5)]
    num_cols: usize,

    /// Word CSV path or glob with an 'answer' column; the built-in
    /// dictionary is used when omitted
    #[arg(long = "path_to_words")]
    path_to_words: Option<String>,

    /// Keep at most this many words after deduplication
    #[arg(long = "max_num_words")]
    max_num_words: Option<usize>,

    /// Search iteration budget
    #[arg(long = "max_mcts_iterations", default_value_t = 1000)]
    max_mcts_iterations: u32,

    /// Seed for the search RNG
    #[arg(long = "random_seed", default_value_t = 0)]
    random_seed: u64,

    /// Directory receiving grid.csv and summary.csv
    #[arg(long = "output_path")]
    output_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let layout = match cli.path_to_layout {
        Some(pattern) => LayoutSource::Existing { pattern },
        None => LayoutSource::New {
            rows: cli.num_rows,
            cols: cli.num_cols,
        },
    };
    let words = match cli.path_to_words {
        Some(pattern) => WordSource::Files { pattern },
        None => WordSource::Dictionary,
    };

    let config = RunConfig {
        layout,
        words,
        max_num_words: cli.max_num_words,
        search: SearchConfig::default()
            .with_max_iterations(cli.max_mcts_iterations)
            .with_seed(cli.random_seed),
        output_path: cli.output_path,
        progress: true,
    };

    // A partial fill still exits cleanly; only setup and I/O problems
    // bubble up as errors.
    let outcome = generate(&config)?;

    println!("{}", outcome.grid);
    println!(
        "Filled {}/{} entries (reward {:.2}).",
        outcome.entries_filled, outcome.entries_total, outcome.reward
    );
    Ok(())
}
