//! The word catalogue, bucketed by length and indexed by positional letters.
//!
//! Candidate filtering is the inner loop of the whole search: every letter
//! committed during expansion and every random rollout move narrows some
//! entry's candidate set. To keep that cheap, each length bucket precomputes
//! a posting list of word ids for every `(position, letter)` pair. A pattern
//! query is then a handful of sorted-list intersections instead of a scan
//! over the bucket.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashMap;

use crate::core::WordId;

/// Number of letters in the alphabet; patterns and words are `A-Z` only.
pub const ALPHABET: usize = 26;

/// Shortest word (and entry) the catalogue accepts.
pub const MIN_WORD_LEN: usize = 2;

/// Immutable word catalogue.
///
/// Words are deduplicated, uppercased and sorted at build time; `WordId`s
/// index the sorted list, so ascending id order is alphabetical order and
/// every derived list (buckets, postings, candidate sets) stays sorted for
/// free.
#[derive(Debug)]
pub struct WordIndex {
    words: Vec<Box<str>>,
    buckets: FxHashMap<usize, LengthBucket>,
}

#[derive(Debug)]
struct LengthBucket {
    /// Every word of this length, ascending.
    members: Vec<WordId>,
    /// `postings[pos][letter]`: words with `letter` at `pos`, ascending.
    postings: Vec<[Vec<WordId>; ALPHABET]>,
}

impl LengthBucket {
    fn new(length: usize) -> Self {
        Self {
            members: Vec::new(),
            postings: (0..length)
                .map(|_| std::array::from_fn(|_| Vec::new()))
                .collect(),
        }
    }

    fn insert(&mut self, id: WordId, word: &str) {
        self.members.push(id);
        for (pos, byte) in word.bytes().enumerate() {
            self.postings[pos][(byte - b'A') as usize].push(id);
        }
    }
}

impl WordIndex {
    /// Build the catalogue from raw word strings.
    ///
    /// Inputs are trimmed, uppercased, filtered to pure-letter strings whose
    /// length appears in `lengths` (the entry lengths the grid needs), and
    /// deduplicated. When `max_num_words` is set, only the first that many
    /// survivors (in alphabetical order) are kept.
    pub fn build<I>(raw_words: I, lengths: &BTreeSet<usize>, max_num_words: Option<usize>) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut clean: BTreeSet<String> = BTreeSet::new();
        for raw in raw_words {
            let word = raw.as_ref().trim().to_ascii_uppercase();
            if word.len() < MIN_WORD_LEN || !lengths.contains(&word.len()) {
                continue;
            }
            if !word.bytes().all(|b| b.is_ascii_uppercase()) {
                continue;
            }
            clean.insert(word);
        }

        let cap = max_num_words.unwrap_or(usize::MAX);
        let words: Vec<Box<str>> = clean.into_iter().take(cap).map(String::into_boxed_str).collect();

        let mut buckets: FxHashMap<usize, LengthBucket> = FxHashMap::default();
        for (i, word) in words.iter().enumerate() {
            buckets
                .entry(word.len())
                .or_insert_with(|| LengthBucket::new(word.len()))
                .insert(WordId::new(i as u32), word);
        }

        let per_length: BTreeMap<usize, usize> =
            buckets.iter().map(|(len, b)| (*len, b.members.len())).collect();
        log::info!("word catalogue: {} words {:?}", words.len(), per_length);

        Self { words, buckets }
    }

    /// Total number of catalogue words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check whether the catalogue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The text of a catalogue word.
    #[inline]
    #[must_use]
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id.index()]
    }

    /// Find a word by exact text.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<WordId> {
        self.words
            .binary_search_by(|w| w.as_ref().cmp(text))
            .ok()
            .map(|i| WordId::new(i as u32))
    }

    /// Every word of the given length, ascending by id.
    #[must_use]
    pub fn bucket(&self, length: usize) -> &[WordId] {
        self.buckets
            .get(&length)
            .map_or(&[], |b| b.members.as_slice())
    }

    /// Words of `length` carrying `letter` (an `A-Z` byte) at `pos`.
    #[must_use]
    pub fn postings(&self, length: usize, pos: usize, letter: u8) -> &[WordId] {
        debug_assert!(letter.is_ascii_uppercase());
        match self.buckets.get(&length) {
            Some(b) if pos < length => b.postings[pos][(letter - b'A') as usize].as_slice(),
            _ => &[],
        }
    }

    /// All words of `length` matching every `(position, letter)` constraint.
    ///
    /// With no constraints this is the whole bucket. Constraint posting
    /// lists are intersected shortest-first so the work is linear in the
    /// smallest list.
    #[must_use]
    pub fn query(&self, length: usize, constraints: &[(usize, u8)]) -> Vec<WordId> {
        if constraints.is_empty() {
            return self.bucket(length).to_vec();
        }

        let mut lists: Vec<&[WordId]> = constraints
            .iter()
            .map(|&(pos, letter)| self.postings(length, pos, letter))
            .collect();
        lists.sort_by_key(|l| l.len());

        let mut result = lists[0].to_vec();
        for list in &lists[1..] {
            if result.is_empty() {
                break;
            }
            result = intersect_sorted(&result, list);
        }
        result
    }
}

/// Intersect two ascending id lists in linear time.
#[must_use]
pub fn intersect_sorted(a: &[WordId], b: &[WordId]) -> Vec<WordId> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(values: &[usize]) -> BTreeSet<usize> {
        values.iter().copied().collect()
    }

    fn build(words: &[&str], lens: &[usize]) -> WordIndex {
        WordIndex::build(words.iter().copied(), &lengths(lens), None)
    }

    #[test]
    fn test_build_normalises() {
        let index = build(&[" cat ", "CAT", "dog", "a", "x-ray", "tiger"], &[3, 5]);

        // "cat"/"CAT" collapse, "a" too short, "x-ray" not pure letters.
        assert_eq!(index.len(), 3);
        assert!(index.lookup("CAT").is_some());
        assert!(index.lookup("DOG").is_some());
        assert!(index.lookup("TIGER").is_some());
        assert!(index.lookup("XRAY").is_none());
    }

    #[test]
    fn test_ids_are_alphabetical() {
        let index = build(&["TEN", "ARE", "CAT"], &[3]);

        let are = index.lookup("ARE").unwrap();
        let cat = index.lookup("CAT").unwrap();
        let ten = index.lookup("TEN").unwrap();
        assert!(are < cat && cat < ten);
    }

    #[test]
    fn test_cap_keeps_first_words() {
        let index = WordIndex::build(
            ["TEN", "ARE", "CAT", "DOG"].iter().copied(),
            &lengths(&[3]),
            Some(2),
        );

        assert_eq!(index.len(), 2);
        assert!(index.lookup("ARE").is_some());
        assert!(index.lookup("CAT").is_some());
        assert!(index.lookup("TEN").is_none());
    }

    #[test]
    fn test_length_filter() {
        let index = build(&["AB", "ABC", "ABCD"], &[2, 4]);

        assert_eq!(index.bucket(2).len(), 1);
        assert!(index.bucket(3).is_empty());
        assert_eq!(index.bucket(4).len(), 1);
    }

    #[test]
    fn test_query_no_constraints() {
        let index = build(&["CAT", "CAR", "DOG"], &[3]);
        assert_eq!(index.query(3, &[]).len(), 3);
        assert!(index.query(5, &[]).is_empty());
    }

    #[test]
    fn test_query_single_constraint() {
        let index = build(&["CAT", "CAR", "DOG", "COW"], &[3]);

        let c_words = index.query(3, &[(0, b'C')]);
        assert_eq!(c_words.len(), 3);

        let ends_t = index.query(3, &[(2, b'T')]);
        assert_eq!(ends_t.len(), 1);
        assert_eq!(index.word(ends_t[0]), "CAT");
    }

    #[test]
    fn test_query_intersects_constraints() {
        let index = build(&["CAT", "CAR", "COT", "BAT"], &[3]);

        let hits = index.query(3, &[(0, b'C'), (1, b'A')]);
        let texts: Vec<&str> = hits.iter().map(|&id| index.word(id)).collect();
        assert_eq!(texts, vec!["CAR", "CAT"]);

        assert!(index.query(3, &[(0, b'B'), (2, b'R')]).is_empty());
    }

    #[test]
    fn test_intersect_sorted() {
        let a: Vec<WordId> = [1, 3, 5, 7].iter().map(|&i| WordId::new(i)).collect();
        let b: Vec<WordId> = [2, 3, 4, 7, 9].iter().map(|&i| WordId::new(i)).collect();

        let out = intersect_sorted(&a, &b);
        assert_eq!(out, vec![WordId::new(3), WordId::new(7)]);

        assert!(intersect_sorted(&a, &[]).is_empty());
    }
}
