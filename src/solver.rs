//! The orchestrator: wires suppliers to the search and emits outputs.
//!
//! A run builds the grid and catalogue once, drives the search one
//! iteration at a time (cancellation and progress both live at iteration
//! boundaries), then extracts the best witnessed state. A grid that could
//! not be filled completely is a normal outcome with `solved == false`;
//! only setup and I/O problems are errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::core::{Error, Result};
use crate::grid::{Grid, Layout};
use crate::mcts::{IterationRecord, Search, SearchConfig, SearchStats};
use crate::words::{supplier::resolve_pattern, WordIndex, WordSource};

/// Where the layout comes from.
#[derive(Clone, Debug)]
pub enum LayoutSource {
    /// Generate a blank all-open grid.
    New { rows: usize, cols: usize },
    /// Read a layout CSV; a glob pattern takes its first match in sorted
    /// order.
    Existing { pattern: String },
}

impl LayoutSource {
    /// Produce the cell map.
    pub fn load(&self) -> Result<Layout> {
        match self {
            LayoutSource::New { rows, cols } => {
                log::info!("generating blank {rows}x{cols} layout");
                Ok(Layout::blank(*rows, *cols))
            }
            LayoutSource::Existing { pattern } => {
                let paths = resolve_pattern(pattern)?;
                log::info!("reading layout from {}", paths[0].display());
                Layout::from_path(&paths[0])
            }
        }
    }
}

/// Everything one run needs.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub layout: LayoutSource,
    pub words: WordSource,
    /// Cap on the catalogue size, applied after deduplication.
    pub max_num_words: Option<usize>,
    pub search: SearchConfig,
    /// Directory receiving `grid.csv` and `summary.csv`, if set.
    pub output_path: Option<PathBuf>,
    /// Show a progress bar across iterations.
    pub progress: bool,
}

/// What one run produced.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    /// Whether every entry was filled.
    pub solved: bool,
    /// Fraction of entries filled in the best state.
    pub reward: f64,
    pub entries_filled: usize,
    pub entries_total: usize,
    /// The final cell map with all committed letters.
    pub grid: Layout,
    /// Per-iteration summary rows.
    pub history: Vec<IterationRecord>,
    pub stats: SearchStats,
}

/// Fill a layout with catalogue words, maximising the share of entries
/// filled.
pub fn generate(config: &RunConfig) -> Result<RunOutcome> {
    let layout = config.layout.load()?;
    let grid = Arc::new(Grid::build(layout, &[])?);

    let raw_words = config.words.read()?;
    let index = Arc::new(WordIndex::build(
        raw_words,
        grid.lengths(),
        config.max_num_words,
    ));
    if index.is_empty() && !grid.entries().is_empty() {
        return Err(Error::words("no usable words after filtering"));
    }

    let mut search = Search::new(Grid::initial_state(&grid, &index), config.search.clone());

    let bar = progress_bar(config.progress, config.search.max_iterations);
    while search.step()? {
        bar.inc(1);
    }
    bar.finish_and_clear();

    let best = search.best_state();
    let solved = search.best_reward() >= 1.0;
    log::info!(
        "search done: {}/{} entries filled (reward {:.3}), {} iterations, {} nodes, {:.0} it/s",
        best.filled_entries(),
        best.total_entries(),
        search.best_reward(),
        search.stats().iterations,
        search.tree_stats().node_count,
        search.stats().iterations_per_second()
    );

    let rendered = best.render();
    if let Some(dir) = &config.output_path {
        write_outputs(dir, &rendered, search.history())?;
    }

    Ok(RunOutcome {
        solved,
        reward: search.best_reward(),
        entries_filled: best.filled_entries(),
        entries_total: best.total_entries(),
        grid: rendered,
        history: search.history().to_vec(),
        stats: search.stats().clone(),
    })
}

fn progress_bar(visible: bool, iterations: u32) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::from(iterations));
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} iterations")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    bar
}

fn write_outputs(dir: &Path, grid: &Layout, history: &[IterationRecord]) -> Result<()> {
    std::fs::create_dir_all(dir)
        .map_err(|e| Error::io(format!("create {}", dir.display()), e))?;

    let grid_path = dir.join("grid.csv");
    grid.write_csv(&grid_path)?;

    let summary_path = dir.join("summary.csv");
    let mut writer = csv::Writer::from_path(&summary_path)?;
    for record in history {
        writer.serialize(record)?;
    }
    writer
        .flush()
        .map_err(|e| Error::io(format!("write {}", summary_path.display()), e))?;

    log::info!("wrote {} and {}", grid_path.display(), summary_path.display());
    Ok(())
}
