//! Shared utilities for the particle-rs CLI

pub mod format;
pub mod table;

pub use format::*;
pub use table::*;
