//! # Metrics Module
//!
//! Spatial primitives and per-team aggregates.
//!
//! - `spatial` - centroid, spread, coordination index
//! - `team` - alive-player team aggregates

pub mod spatial;
pub mod team;

pub use spatial::*;
pub use team::*;
