//! # Models
//!
//! Telemetry input types and the borrowed snapshot view shared by analyzers.

pub mod sample;
pub mod view;

pub use sample::{PlayerPositionSample, Side, Snapshot, Vec3};
pub use view::SnapshotView;
