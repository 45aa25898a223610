//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - normalized series (`TimeSeries`, `CategorizedDataset`, `WageSeries`)
//! - computed outputs (`RealWageEntry`, `ComparisonSnapshot`, `AlignedPair`, `VariationRow`)
//! - the shared "latest observed year" rule (`series`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
