//! `real-wages` library crate.
//!
//! Turns heterogeneous statistical exports (inflation, minimum wages, income
//! shares) into normalized per-country series and derives comparable metrics:
//! real wages, year-over-year variations, and cross-country alignments.
//!
//! The binary (`rw`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - rendering front-ends can consume the same datasets and snapshots

pub mod app;
pub mod cli;
pub mod compare;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod names;
pub mod report;
pub mod snapshot;
pub mod variation;

pub use compare::{align_pair, compare};
pub use data::SeriesLoader;
pub use math::adjust_to_base_year;
pub use snapshot::SnapshotBuilder;
pub use variation::combine_variations;
