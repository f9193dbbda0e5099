//! Reporting utilities: terminal report and label formatting.

pub mod format;

pub use format::*;
