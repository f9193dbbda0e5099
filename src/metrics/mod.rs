//! Inequality measurement core.
//!
//! Everything in here is pure and synchronous: an ascending, equal-width
//! bucketed income series goes in, shares and scalar statistics come out.
//!
//! - `characterize`: per-bucket population/income shares
//! - `inequality`: the five summary statistics
//! - `dataset`: eager aggregation of a series and its statistics

pub mod characterize;
pub mod dataset;
pub mod inequality;

pub use characterize::*;
pub use dataset::*;
pub use inequality::*;
