//! Data sources for income series.
//!
//! - built-in reference series (`sample`)
//! - the `IncomeSource` seam and its implementations (`source`)

pub mod sample;
pub mod source;

pub use sample::*;
pub use source::*;
