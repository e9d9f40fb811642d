//! Grid geometry: the cell map, entries, and the crossing relation.

pub mod geometry;
pub mod layout;

pub use geometry::{Axis, Crossing, Entry, Grid};
pub use layout::{Cell, Layout, EMPTY_SYMBOL};
