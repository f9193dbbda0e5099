//! `inequality-report` library crate.
//!
//! The binary (`ineq`) is a thin wrapper around this library so that:
//!
//! - the measurement core is testable without spawning processes
//! - data sources, reports and exports can be reused by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod metrics;
pub mod plot;
pub mod report;
pub mod tui;
