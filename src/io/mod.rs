//! Input/output helpers.
//!
//! - CSV ingest + bracket reconstruction (`ingest`)
//! - share table export for spreadsheets (`export`)
//! - dataset JSON read/write (`dataset_file`)

pub mod dataset_file;
pub mod export;
pub mod ingest;

pub use dataset_file::*;
pub use export::*;
pub use ingest::*;
