//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - selection enums (`Country`, `MeasureKind`) and the resolved `Selection`
//! - percentile bracket labels (`PercentileBracket`)
//! - the run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
