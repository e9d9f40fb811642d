//! Static grid geometry: entries and the crossing relation.
//!
//! An entry is a maximal run of at least two open cells along one axis.
//! Entries are discovered in row-major order of their start cells, across
//! before down at the same cell; ids follow discovery order. Each entry
//! records, position by position, which entry of the other axis shares the
//! cell and where the shared cell sits inside it.

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::core::{EntryId, Error, Result};
use crate::grid::layout::{Cell, Layout};
use crate::state::CrosswordState;
use crate::words::WordIndex;

/// Axis an entry runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Across,
    Down,
}

/// Pointer from one position of an entry into the entry crossing it there.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Crossing {
    /// The entry of the other axis sharing the cell.
    pub other: EntryId,
    /// Position of the shared cell within `other`.
    pub other_pos: usize,
}

/// Static description of one entry.
#[derive(Clone, Debug)]
pub struct Entry {
    pub id: EntryId,
    pub axis: Axis,
    /// Cell positions in reading order.
    pub cells: Vec<(usize, usize)>,
    /// Crossing pointer per position, where one exists.
    pub crossings: Vec<Option<Crossing>>,
    /// Letters the layout fixes, per position.
    pub seed: Vec<Option<u8>>,
}

impl Entry {
    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Entries are never empty; present for the usual pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The full static geometry of a puzzle.
#[derive(Debug)]
pub struct Grid {
    layout: Layout,
    entries: Vec<Entry>,
    lengths: BTreeSet<usize>,
}

impl Grid {
    /// Build the geometry from a cell map plus programmatic fixed letters.
    ///
    /// Each `fixed` element aims an uppercase letter at an open cell. Two
    /// different letters aimed at one cell are rejected, as is a letter on a
    /// blocked or out-of-range cell.
    pub fn build(mut layout: Layout, fixed: &[((usize, usize), char)]) -> Result<Self> {
        apply_fixed_letters(&mut layout, fixed)?;

        let entries = extract_entries(&layout);
        let lengths: BTreeSet<usize> = entries.iter().map(Entry::len).collect();

        log::info!(
            "grid {}x{}: {} cells ({} blocked), {} entries, lengths {:?}",
            layout.rows(),
            layout.cols(),
            layout.rows() * layout.cols(),
            layout.block_count(),
            entries.len(),
            lengths
        );

        Ok(Self {
            layout,
            entries,
            lengths,
        })
    }

    /// The starting state: nothing assigned beyond what the layout fixes,
    /// candidate sets drawn from the catalogue.
    #[must_use]
    pub fn initial_state(grid: &Arc<Self>, index: &Arc<WordIndex>) -> CrosswordState {
        CrosswordState::initial(Arc::clone(grid), Arc::clone(index))
    }

    /// All entries, ordered by id.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// A single entry.
    #[inline]
    #[must_use]
    pub fn entry(&self, id: EntryId) -> &Entry {
        &self.entries[id.index()]
    }

    /// The distinct entry lengths present.
    #[must_use]
    pub fn lengths(&self) -> &BTreeSet<usize> {
        &self.lengths
    }

    /// The underlying cell map.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.layout.rows()
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.layout.cols()
    }
}

fn apply_fixed_letters(layout: &mut Layout, fixed: &[((usize, usize), char)]) -> Result<()> {
    for &((row, col), ch) in fixed {
        if row >= layout.rows() || col >= layout.cols() {
            return Err(Error::layout(format!(
                "fixed letter at ({row}, {col}) is outside the {}x{} grid",
                layout.rows(),
                layout.cols()
            )));
        }
        if !ch.is_ascii_alphabetic() {
            return Err(Error::layout(format!(
                "fixed letter '{ch}' at ({row}, {col}) is not a letter"
            )));
        }
        let letter = ch.to_ascii_uppercase() as u8;
        match layout.get(row, col) {
            Cell::Blocked => {
                return Err(Error::layout(format!(
                    "fixed letter '{ch}' aimed at blocked cell ({row}, {col})"
                )));
            }
            Cell::Open(Some(existing)) if existing != letter => {
                return Err(Error::InconsistentFixedLetters {
                    row,
                    col,
                    first: existing as char,
                    second: letter as char,
                });
            }
            Cell::Open(_) => layout.set_letter(row, col, letter),
        }
    }
    Ok(())
}

/// Scan for maximal open runs of length >= 2, rows first, then columns.
///
/// A run starts at the first column, or right of a block (across); at the
/// first row, or below a block (down). Both checks run per cell in row-major
/// order so ids interleave across and down in discovery order.
fn extract_entries(layout: &Layout) -> Vec<Entry> {
    let mut entries = Vec::new();

    for row in 0..layout.rows() {
        for col in 0..layout.cols() {
            if !layout.get(row, col).is_open() {
                continue;
            }

            let starts_across = col == 0 || !layout.get(row, col - 1).is_open();
            if starts_across {
                let cells = run_cells(layout, row, col, Axis::Across);
                push_entry(&mut entries, layout, cells, Axis::Across);
            }

            let starts_down = row == 0 || !layout.get(row - 1, col).is_open();
            if starts_down {
                let cells = run_cells(layout, row, col, Axis::Down);
                push_entry(&mut entries, layout, cells, Axis::Down);
            }
        }
    }

    link_crossings(&mut entries);
    entries
}

fn run_cells(layout: &Layout, row: usize, col: usize, axis: Axis) -> Vec<(usize, usize)> {
    let mut cells = Vec::new();
    let (mut r, mut c) = (row, col);
    while r < layout.rows() && c < layout.cols() && layout.get(r, c).is_open() {
        cells.push((r, c));
        match axis {
            Axis::Across => c += 1,
            Axis::Down => r += 1,
        }
    }
    cells
}

fn push_entry(entries: &mut Vec<Entry>, layout: &Layout, cells: Vec<(usize, usize)>, axis: Axis) {
    if cells.len() < crate::words::MIN_WORD_LEN {
        return;
    }
    let seed = cells
        .iter()
        .map(|&(r, c)| layout.get(r, c).letter())
        .collect();
    let positions = cells.len();
    entries.push(Entry {
        id: EntryId::new(entries.len() as u32),
        axis,
        cells,
        crossings: vec![None; positions],
        seed,
    });
}

fn link_crossings(entries: &mut [Entry]) {
    let mut by_cell: FxHashMap<(usize, usize), Vec<(EntryId, usize)>> = FxHashMap::default();
    for entry in entries.iter() {
        for (pos, &cell) in entry.cells.iter().enumerate() {
            by_cell.entry(cell).or_default().push((entry.id, pos));
        }
    }

    for entry in entries.iter_mut() {
        for (pos, &cell) in entry.cells.iter().enumerate() {
            let sharers = &by_cell[&cell];
            entry.crossings[pos] = sharers
                .iter()
                .find(|(other, _)| *other != entry.id)
                .map(|&(other, other_pos)| Crossing { other, other_pos });
        }
    }
}
