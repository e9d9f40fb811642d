//! Invariant tests for the crossword state and its apply protocol.

use std::sync::Arc;

use crossfill::core::SearchRng;
use crossfill::grid::{Grid, Layout};
use crossfill::state::CrosswordState;
use crossfill::words::WordIndex;

// =============================================================================
// Helpers
// =============================================================================

fn build_state(layout: Layout, fixed: &[((usize, usize), char)], words: &[&str]) -> CrosswordState {
    let grid = Arc::new(Grid::build(layout, fixed).unwrap());
    let index = Arc::new(WordIndex::build(words.iter().copied(), grid.lengths(), None));
    Grid::initial_state(&grid, &index)
}

/// Check every structural invariant a state must uphold after an apply.
fn check_invariants(state: &CrosswordState) {
    let grid = state.grid();
    let index = state.index();
    let mut assigned_words = Vec::new();
    let mut filled = 0;

    for entry in grid.entries() {
        let pattern = state.pattern(entry.id);
        assert_eq!(pattern.len(), entry.len());

        if state.is_filled(entry.id) {
            filled += 1;
            // A filled entry's pattern is fully committed, and a catalogue
            // assignment is letter-equal to it.
            assert!(pattern.iter().all(Option::is_some));
            if let Some(word) = state.assigned(entry.id) {
                let letters: Vec<Option<u8>> =
                    index.word(word).bytes().map(Some).collect();
                assert_eq!(pattern, letters.as_slice());
                assigned_words.push(word);
            }
        } else {
            // Every candidate has the right length and agrees with each
            // committed letter.
            for &candidate in state.candidates(entry.id) {
                let text = index.word(candidate).as_bytes();
                assert_eq!(text.len(), entry.len());
                for (pos, letter) in pattern.iter().enumerate() {
                    if let Some(letter) = letter {
                        assert_eq!(text[pos], *letter);
                    }
                }
            }
        }

        // Crossing cells carry one letter, visible from both sides.
        for (pos, crossing) in entry.crossings.iter().enumerate() {
            if let Some(crossing) = crossing {
                let other = state.pattern(crossing.other)[crossing.other_pos];
                match (pattern[pos], other) {
                    (Some(a), Some(b)) => assert_eq!(a, b),
                    (None, Some(_)) | (Some(_), None) => {
                        panic!("crossing cell committed on one side only")
                    }
                    (None, None) => {}
                }
            }
        }
    }

    // No word on two entries.
    let total = assigned_words.len();
    assigned_words.sort();
    assigned_words.dedup();
    assert_eq!(assigned_words.len(), total, "a word was assigned twice");

    // Reward is exactly the filled share.
    assert_eq!(state.filled_entries(), filled);
    if state.total_entries() > 0 {
        let expected = filled as f64 / state.total_entries() as f64;
        assert!((state.reward() - expected).abs() < 1e-12);
    } else {
        assert_eq!(state.reward(), 1.0);
    }
}

// =============================================================================
// Invariants along apply chains
// =============================================================================

#[test]
fn test_invariants_hold_along_forced_fill() {
    let mut state = build_state(Layout::blank(2, 2), &[], &["AB", "CD", "AC", "BD"]);
    check_invariants(&state);

    while !state.is_terminal() {
        let action = state.legal_actions()[0];
        state = state.apply(action).unwrap();
        check_invariants(&state);
    }
    assert_eq!(state.reward(), 1.0);
}

#[test]
fn test_invariants_hold_along_random_chains() {
    let words = ["CAT", "ARE", "TEN", "CAR", "ATE", "REN"];
    let mut rng = SearchRng::new(11);

    for _ in 0..30 {
        let mut state = build_state(Layout::blank(3, 3), &[], &words);
        while let Some(action) = state.random_action(&mut rng) {
            state = state.apply(action).unwrap();
            check_invariants(&state);
        }
        assert!(state.is_terminal());
    }
}

#[test]
fn test_invariants_hold_with_seed_letters() {
    let mut state = build_state(
        Layout::blank(2, 2),
        &[((0, 0), 'A')],
        &["AB", "CD", "AC", "BD"],
    );
    check_invariants(&state);

    let mut rng = SearchRng::new(3);
    while let Some(action) = state.random_action(&mut rng) {
        state = state.apply(action).unwrap();
        check_invariants(&state);
    }
}

// =============================================================================
// Boundary behaviours
// =============================================================================

#[test]
fn test_undersupplied_word_list_gives_partial_fill() {
    // Not enough words to satisfy the columns; the best any chain can do is
    // a partial arrangement.
    let mut state = build_state(Layout::blank(2, 2), &[], &["AB", "CD"]);
    let mut rng = SearchRng::new(5);

    while let Some(action) = state.random_action(&mut rng) {
        state = state.apply(action).unwrap();
        check_invariants(&state);
    }

    assert!(state.is_terminal());
    assert!(state.reward() < 1.0);
    assert!(state.reward() > 0.0);
}

#[test]
fn test_entryless_grid_is_terminal_with_full_reward() {
    // A 1xN strip has one across entry; a 1x1 grid has none at all.
    let state = build_state(Layout::blank(1, 1), &[], &["AB", "CD"]);
    assert_eq!(state.total_entries(), 0);
    assert!(state.is_terminal());
    assert_eq!(state.reward(), 1.0);
    check_invariants(&state);
}

#[test]
fn test_born_dead_entry_from_fixed_letters() {
    // No word has 'X' in the middle: both centre entries are born dead.
    let state = build_state(
        Layout::blank(3, 3),
        &[((1, 1), 'X')],
        &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"],
    );

    check_invariants(&state);
    assert!(state.is_terminal());
    assert!(state.reward() < 1.0);
}

#[test]
fn test_rendered_grid_keeps_blocked_cells() {
    let text = ",0,1,2\n0,_,_,_\n1,,,\n2,_,_,_\n";
    let layout = Layout::parse_csv(text).unwrap();
    let mut state = build_state(layout, &[], &["CAT", "ARE", "TEN", "CAR", "ATE", "REN"]);

    let mut rng = SearchRng::new(0);
    while let Some(action) = state.random_action(&mut rng) {
        state = state.apply(action).unwrap();
    }

    let rendered = state.render();
    for c in 0..3 {
        assert_eq!(rendered.get(1, c).letter(), None);
        assert!(!rendered.get(1, c).is_open());
    }
}
