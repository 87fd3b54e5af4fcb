//! Command implementations for particle-rs

pub mod simulate;
pub mod validate;
