//! Core traits for the signal engine.

mod indicator;

pub use indicator::{Indicator, MultiOutputIndicator};
