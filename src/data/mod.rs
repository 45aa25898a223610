//! Data acquisition: loading normalized series for the engines.

pub mod loader;

pub use loader::*;
