//! # crossfill
//!
//! A crossword grid filler. Given a rectangular layout of open and blocked
//! cells (optionally pre-seeded with fixed letters) and a word list, the
//! crate searches for an assignment of one word to every entry — each
//! maximal run of two or more open cells — such that crossing cells agree,
//! maximising the share of entries filled.
//!
//! ## Architecture
//!
//! - **Immutable suppliers**: the word catalogue ([`words::WordIndex`],
//!   with per-length `(position, letter)` posting lists) and the grid
//!   geometry ([`grid::Grid`], entries plus their crossing relation) are
//!   built once per run and shared behind `Arc`.
//!
//! - **Cheap state cloning**: a [`state::CrosswordState`] owns only the
//!   per-entry dynamic data (pattern, candidate set, assignment). Applying
//!   an action clones the parent, so sibling search branches never disturb
//!   each other.
//!
//! - **Single-player MCTS**: [`mcts::Search`] runs UCB1
//!   selection, per-iteration expansion, uniform random playouts, and
//!   accumulating backpropagation, tracking the best terminal state ever
//!   witnessed. Determinism for a given seed is a hard requirement; all
//!   randomness flows from one [`core::SearchRng`].
//!
//! ## Modules
//!
//! - `core`: identifier newtypes, errors, seeded RNG
//! - `words`: word sources, normalisation, the positional letter index
//! - `grid`: cell map, CSV dialect, entries and crossings
//! - `state`: the mutable partial assignment and its apply protocol
//! - `mcts`: the search engine
//! - `solver`: orchestration, progress, CSV outputs

pub mod core;
pub mod grid;
pub mod mcts;
pub mod solver;
pub mod state;
pub mod words;

// Re-export commonly used types
pub use crate::core::{EntryId, Error, Result, SearchRng, WordId};
pub use crate::grid::{Axis, Cell, Crossing, Entry, Grid, Layout};
pub use crate::mcts::{IterationRecord, Search, SearchConfig, SearchStats};
pub use crate::solver::{generate, LayoutSource, RunConfig, RunOutcome};
pub use crate::state::{Action, CrosswordState};
pub use crate::words::{WordIndex, WordSource};
