//! Numerical building blocks: inflation compounding.

pub mod compound;

pub use compound::*;
