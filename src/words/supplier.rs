//! Word sources feeding the catalogue.
//!
//! Two back-ends: the embedded English dictionary, and CSV files carrying an
//! `answer` column. File sources accept a glob pattern and merge every
//! matching file.

use std::fs::File;
use std::path::PathBuf;

use crate::core::{Error, Result};

/// Column that word CSV files must carry.
pub const WORD_COLUMN: &str = "answer";

const DICTIONARY: &str = include_str!("../../assets/dictionary.txt");

/// Where raw words come from.
#[derive(Clone, Debug)]
pub enum WordSource {
    /// The embedded English dictionary.
    Dictionary,
    /// CSV files matching a path or glob pattern, each with an `answer`
    /// column.
    Files { pattern: String },
}

impl WordSource {
    /// Read every raw word the source provides.
    ///
    /// No normalisation happens here; the catalogue builder trims,
    /// uppercases and filters.
    pub fn read(&self) -> Result<Vec<String>> {
        match self {
            WordSource::Dictionary => Ok(dictionary_words()),
            WordSource::Files { pattern } => file_words(pattern),
        }
    }
}

fn dictionary_words() -> Vec<String> {
    DICTIONARY.lines().map(str::to_owned).collect()
}

fn file_words(pattern: &str) -> Result<Vec<String>> {
    let paths = resolve_pattern(pattern)?;
    log::info!("reading words from {} file(s)", paths.len());

    let mut words = Vec::new();
    for path in &paths {
        read_answer_column(path, &mut words)?;
    }
    Ok(words)
}

/// Expand a path or glob pattern into a sorted list of matching files.
pub fn resolve_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob::glob(pattern).map_err(|e| Error::InvalidPattern {
        pattern: pattern.to_owned(),
        message: e.to_string(),
    })?;

    let mut paths: Vec<PathBuf> = entries.filter_map(std::result::Result::ok).collect();
    paths.sort();

    if paths.is_empty() {
        return Err(Error::NoMatchingFiles {
            pattern: pattern.to_owned(),
        });
    }
    Ok(paths)
}

fn read_answer_column(path: &PathBuf, out: &mut Vec<String>) -> Result<()> {
    let file =
        File::open(path).map_err(|e| Error::io(format!("open {}", path.display()), e))?;
    let mut reader = csv::Reader::from_reader(file);

    let column = reader
        .headers()?
        .iter()
        .position(|h| h == WORD_COLUMN)
        .ok_or_else(|| {
            Error::words(format!(
                "{} has no '{}' column",
                path.display(),
                WORD_COLUMN
            ))
        })?;

    for record in reader.records() {
        let record = record?;
        if let Some(value) = record.get(column) {
            out.push(value.to_owned());
        }
    }
    Ok(())
}
