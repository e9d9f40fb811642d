//! Word catalogue: sources, normalisation, and the positional letter index.

pub mod index;
pub mod supplier;

pub use index::{intersect_sorted, WordIndex, MIN_WORD_LEN};
pub use supplier::{WordSource, WORD_COLUMN};
