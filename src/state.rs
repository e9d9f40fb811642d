//! The mutable side of a puzzle: which entries hold which words.
//!
//! A `CrosswordState` is a partial assignment over the immutable grid
//! geometry and word catalogue, both shared behind `Arc`. Cloning a state
//! duplicates only the per-entry dynamic slots, so the search can hold many
//! sibling states cheaply.
//!
//! Actions always target the most constrained unfilled entry (fewest
//! candidates, ties to the smallest id). Playing a word commits its letters
//! into the crossing entries and refilters their candidate sets against the
//! catalogue's posting lists; no propagation runs beyond the immediate
//! neighbours. A played word also leaves every other entry's candidate set,
//! since no word may appear twice in one puzzle.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::core::{EntryId, Error, Result, SearchRng, WordId};
use crate::grid::{Grid, Layout};
use crate::words::{intersect_sorted, WordIndex};

/// Filling one entry with one catalogue word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub entry: EntryId,
    pub word: WordId,
}

/// Per-entry dynamic data.
#[derive(Clone, Debug)]
struct EntrySlot {
    /// Committed letters; `None` is unknown.
    pattern: SmallVec<[Option<u8>; 16]>,
    /// Catalogue words still compatible with the pattern, ascending by id.
    /// Cleared once the slot is filled.
    candidates: Vec<WordId>,
    /// The catalogue word placed here, if the slot was filled by an action
    /// (layout-fixed slots may hold a word the catalogue does not know).
    assigned: Option<WordId>,
    filled: bool,
}

/// A partial assignment of words to entries.
#[derive(Clone, Debug)]
pub struct CrosswordState {
    grid: Arc<Grid>,
    index: Arc<WordIndex>,
    slots: Vec<EntrySlot>,
    /// Words no longer available, ascending.
    used: Vec<WordId>,
    filled: usize,
}

impl CrosswordState {
    /// The starting state for a grid: nothing assigned beyond what the
    /// layout fixes.
    ///
    /// Entries whose every letter is fixed are born filled. Entries whose
    /// seed constraints match no catalogue word are born dead, which makes
    /// the state terminal with a reward below one; that is legal input.
    #[must_use]
    pub fn initial(grid: Arc<Grid>, index: Arc<WordIndex>) -> Self {
        let mut slots = Vec::with_capacity(grid.entries().len());
        let mut used: Vec<WordId> = Vec::new();
        let mut filled = 0;

        for entry in grid.entries() {
            let pattern: SmallVec<[Option<u8>; 16]> = entry.seed.iter().copied().collect();

            if pattern.iter().all(Option::is_some) {
                let text: String = pattern.iter().flatten().map(|&l| l as char).collect();
                let assigned = index.lookup(&text);
                if let Some(id) = assigned {
                    if let Err(at) = used.binary_search(&id) {
                        used.insert(at, id);
                    }
                }
                slots.push(EntrySlot {
                    pattern,
                    candidates: Vec::new(),
                    assigned,
                    filled: true,
                });
                filled += 1;
                continue;
            }

            let constraints: Vec<(usize, u8)> = pattern
                .iter()
                .enumerate()
                .filter_map(|(pos, letter)| letter.map(|l| (pos, l)))
                .collect();
            slots.push(EntrySlot {
                pattern,
                candidates: index.query(entry.len(), &constraints),
                assigned: None,
                filled: false,
            });
        }

        // Words consumed by born-filled entries are off the table everywhere.
        if !used.is_empty() {
            for slot in slots.iter_mut().filter(|s| !s.filled) {
                slot.candidates.retain(|id| used.binary_search(id).is_err());
            }
        }

        Self {
            grid,
            index,
            slots,
            used,
            filled,
        }
    }

    /// The entry the next action must fill: fewest candidates, ties to the
    /// smallest id. `None` once everything is filled.
    #[must_use]
    pub fn next_entry(&self) -> Option<EntryId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.filled)
            .min_by_key(|(i, slot)| (slot.candidates.len(), *i))
            .map(|(i, _)| EntryId::new(i as u32))
    }

    /// Every action available from this state, in candidate order.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        match self.next_entry() {
            Some(entry) => self.slots[entry.index()]
                .candidates
                .iter()
                .map(|&word| Action { entry, word })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Sample one legal action uniformly. `None` means the state is
    /// terminal.
    #[must_use]
    pub fn random_action(&self, rng: &mut SearchRng) -> Option<Action> {
        let entry = self.next_entry()?;
        let candidates = &self.slots[entry.index()].candidates;
        if candidates.is_empty() {
            return None;
        }
        let word = candidates[rng.gen_range_usize(0..candidates.len())];
        Some(Action { entry, word })
    }

    /// Whether no further action exists: every entry filled, or the most
    /// constrained entry has no candidate left.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self.next_entry() {
            Some(entry) => self.slots[entry.index()].candidates.is_empty(),
            None => true,
        }
    }

    /// Fraction of entries filled, in `[0, 1]`. A grid without entries
    /// counts as completely filled.
    #[must_use]
    pub fn reward(&self) -> f64 {
        if self.slots.is_empty() {
            1.0
        } else {
            self.filled as f64 / self.slots.len() as f64
        }
    }

    /// Produce the child state in which `action` has been played.
    ///
    /// The letters of the played word flow into each unfilled crossing
    /// entry: the shared position is committed and the neighbour's candidate
    /// set intersected with the posting list for that `(position, letter)`
    /// pair. The word itself becomes unavailable to every other entry.
    pub fn apply(&self, action: Action) -> Result<CrosswordState> {
        let slot = &self.slots[action.entry.index()];
        if slot.filled {
            return Err(Error::internal(format!(
                "action refills {}",
                action.entry
            )));
        }
        if slot.candidates.binary_search(&action.word).is_err() {
            return Err(Error::internal(format!(
                "{} is not a candidate of {}",
                action.word, action.entry
            )));
        }

        let mut next = self.clone();
        let word = next.index.word(action.word).as_bytes().to_vec();
        let entry = next.grid.entry(action.entry);

        {
            let slot = &mut next.slots[action.entry.index()];
            slot.pattern = word.iter().map(|&b| Some(b)).collect();
            slot.candidates = vec![action.word];
            slot.assigned = Some(action.word);
            slot.filled = true;
        }
        next.filled += 1;

        for (pos, crossing) in entry.crossings.iter().enumerate() {
            let Some(crossing) = crossing else { continue };
            let neighbour = &mut next.slots[crossing.other.index()];
            if neighbour.filled {
                debug_assert_eq!(
                    neighbour.pattern[crossing.other_pos],
                    Some(word[pos]),
                    "candidate disagreed with a filled crossing entry"
                );
                continue;
            }
            match neighbour.pattern[crossing.other_pos] {
                Some(letter) => debug_assert_eq!(
                    letter,
                    word[pos],
                    "candidate disagreed with a committed letter"
                ),
                None => {
                    neighbour.pattern[crossing.other_pos] = Some(word[pos]);
                    let postings = next.index.postings(
                        next.grid.entry(crossing.other).len(),
                        crossing.other_pos,
                        word[pos],
                    );
                    neighbour.candidates = intersect_sorted(&neighbour.candidates, postings);
                }
            }
        }

        // No word appears twice: drop it from every other candidate set.
        for (i, slot) in next.slots.iter_mut().enumerate() {
            if slot.filled || i == action.entry.index() {
                continue;
            }
            if let Ok(at) = slot.candidates.binary_search(&action.word) {
                slot.candidates.remove(at);
            }
        }
        if let Err(at) = next.used.binary_search(&action.word) {
            next.used.insert(at, action.word);
        }

        Ok(next)
    }

    /// Number of filled entries.
    #[must_use]
    pub fn filled_entries(&self) -> usize {
        self.filled
    }

    /// Total number of entries.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.slots.len()
    }

    /// The committed letters of one entry.
    #[must_use]
    pub fn pattern(&self, id: EntryId) -> &[Option<u8>] {
        &self.slots[id.index()].pattern
    }

    /// The candidate set of one entry.
    #[must_use]
    pub fn candidates(&self, id: EntryId) -> &[WordId] {
        &self.slots[id.index()].candidates
    }

    /// The catalogue word assigned to one entry, if any.
    #[must_use]
    pub fn assigned(&self, id: EntryId) -> Option<WordId> {
        self.slots[id.index()].assigned
    }

    /// Whether one entry is filled.
    #[must_use]
    pub fn is_filled(&self, id: EntryId) -> bool {
        self.slots[id.index()].filled
    }

    /// The shared grid geometry.
    #[must_use]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// The shared word catalogue.
    #[must_use]
    pub fn index(&self) -> &Arc<WordIndex> {
        &self.index
    }

    /// The cell map with every committed letter written in.
    #[must_use]
    pub fn render(&self) -> Layout {
        let mut layout = self.grid.layout().clone();
        for (i, slot) in self.slots.iter().enumerate() {
            let entry = self.grid.entry(EntryId::new(i as u32));
            for (pos, letter) in slot.pattern.iter().enumerate() {
                if let Some(letter) = letter {
                    let (r, c) = entry.cells[pos];
                    layout.set_letter(r, c, *letter);
                }
            }
        }
        layout
    }
}
