//! The rectangular cell map and its CSV dialect.
//!
//! Layouts travel as CSV with an index column and a header row: blocked
//! cells are empty strings, open cells hold `_`, pre-filled cells hold one
//! letter. The separator may be a comma or a semicolon and is sniffed from
//! the first line. The same dialect is written back out, so an emitted grid
//! re-parses with this module.

use std::fmt;
use std::path::Path;

use crate::core::{Error, Result};

/// Placeholder for an open cell that carries no letter yet.
pub const EMPTY_SYMBOL: char = '_';

/// One cell of the layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// Never carries a letter.
    Blocked,
    /// Carries the committed letter, if any.
    Open(Option<u8>),
}

impl Cell {
    /// The committed letter, if this is an open cell holding one.
    #[must_use]
    pub fn letter(self) -> Option<u8> {
        match self {
            Cell::Open(letter) => letter,
            Cell::Blocked => None,
        }
    }

    /// Whether the cell can carry a letter.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Open(_))
    }
}

/// A rectangular map of blocked and open cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Layout {
    /// An all-open layout with no letters, `rows × cols`.
    #[must_use]
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Open(None); rows * cols],
        }
    }

    /// Parse the CSV dialect described in the module docs.
    pub fn parse_csv(text: &str) -> Result<Self> {
        let delimiter = sniff_delimiter(text);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => return Err(Error::layout("empty layout file")),
        };
        let cols = header.len().saturating_sub(1);
        if cols == 0 {
            return Err(Error::layout("layout has no columns"));
        }

        let mut cells = Vec::new();
        let mut rows = 0;
        for record in records {
            let record = record?;
            if record.len() != cols + 1 {
                return Err(Error::layout(format!(
                    "row {} has {} cells, expected {}",
                    rows,
                    record.len().saturating_sub(1),
                    cols
                )));
            }
            for (col, field) in record.iter().skip(1).enumerate() {
                cells.push(parse_cell(field, rows, col)?);
            }
            rows += 1;
        }
        if rows == 0 {
            return Err(Error::layout("layout has no rows"));
        }

        Ok(Self { rows, cols, cells })
    }

    /// Read and parse a layout CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("read {}", path.display()), e))?;
        Self::parse_csv(&text)
    }

    /// Serialise to the CSV dialect this module parses.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec![String::new()];
        header.extend((0..self.cols).map(|c| c.to_string()));
        writer.write_record(&header).expect("write to memory");

        for r in 0..self.rows {
            let mut record = vec![r.to_string()];
            for c in 0..self.cols {
                record.push(match self.get(r, c) {
                    Cell::Blocked => String::new(),
                    Cell::Open(None) => EMPTY_SYMBOL.to_string(),
                    Cell::Open(Some(letter)) => (letter as char).to_string(),
                });
            }
            writer.write_record(&record).expect("write to memory");
        }

        let bytes = writer.into_inner().expect("flush to memory");
        String::from_utf8(bytes).expect("CSV output is UTF-8")
    }

    /// Write the CSV serialisation to a file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv())
            .map_err(|e| Error::io(format!("write {}", path.display()), e))
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Put a letter into an open cell. Panics if the cell is blocked; callers
    /// go through [`crate::grid::Grid::build`] which validates first.
    pub fn set_letter(&mut self, row: usize, col: usize, letter: u8) {
        debug_assert!(letter.is_ascii_uppercase());
        let cell = &mut self.cells[row * self.cols + col];
        assert!(cell.is_open(), "letter written to blocked cell");
        *cell = Cell::Open(Some(letter));
    }

    /// Count blocked cells.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_open()).count()
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if c > 0 {
                    write!(f, " ")?;
                }
                let glyph = match self.get(r, c) {
                    Cell::Blocked => '#',
                    Cell::Open(None) => EMPTY_SYMBOL,
                    Cell::Open(Some(letter)) => letter as char,
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_cell(field: &str, row: usize, col: usize) -> Result<Cell> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(Cell::Blocked);
    }
    let mut chars = field.chars();
    let first = chars.next().unwrap_or(EMPTY_SYMBOL);
    if chars.next().is_some() {
        return Err(Error::layout(format!(
            "cell ({row}, {col}) holds '{field}'; expected empty, '_' or a single letter"
        )));
    }
    if first == EMPTY_SYMBOL {
        Ok(Cell::Open(None))
    } else if first.is_ascii_alphabetic() {
        Ok(Cell::Open(Some(first.to_ascii_uppercase() as u8)))
    } else {
        Err(Error::layout(format!(
            "cell ({row}, {col}) holds '{field}'; expected empty, '_' or a single letter"
        )))
    }
}

fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}
