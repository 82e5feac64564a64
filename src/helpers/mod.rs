//! Helper functions for the presentation layer

mod date;

pub use date::*;
