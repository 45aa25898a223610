//! Input/output helpers.
//!
//! - declared resource schemas (`schema`)
//! - row sources: CSV directory, HTTP, in-memory (`source`)
//! - row filtering + grouping (`ingest`)
//! - result exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;
pub mod schema;
pub mod source;

pub use export::*;
pub use ingest::*;
pub use schema::*;
pub use source::*;
