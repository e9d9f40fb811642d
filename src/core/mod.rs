//! Shared building blocks: identifiers, errors, and the seeded RNG.

pub mod error;
pub mod ids;
pub mod rng;

pub use error::{Error, Result};
pub use ids::{EntryId, WordId};
pub use rng::SearchRng;
