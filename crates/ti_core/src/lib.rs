//! # ti_core - Tactical Intelligence Engine
//!
//! Turns one snapshot of per-tick player telemetry from a recorded round
//! into tactical indicators: formation shape, map control, advantage,
//! execute timing, information balance, momentum, movement patterns, a
//! round forecast and a strategy recommendation.
//!
//! ## Features
//! - Deterministic, rule-table based classification
//! - Stateless per call; safe to run concurrently
//! - Off-thread worker with request ids and cancellation
//! - JSON API and JSON Schema export for UI consumers
//!
//! ```rust
//! use ti_core::{IntelConfig, ReportAggregator};
//!
//! let result = ReportAggregator::new(IntelConfig::default()).analyze(&[]).unwrap();
//! assert_eq!(result.data_points, 0);
//! assert_eq!(result.report.confidence, 0.0);
//! ```

// Rule tables read better with one row per line
#![allow(clippy::type_complexity)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod worker;

pub use api::{analyze_snapshot_json, handle_message_json};
pub use config::IntelConfig;
pub use error::{IntelError, Result};
pub use models::{PlayerPositionSample, Side, Snapshot, Vec3};
pub use report::{report_schema, AnalysisResult, IntelligenceReport, ReportAggregator};
pub use worker::{AsyncComputeHost, CancelToken, RequestId, WorkerRequest, WorkerResponse};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
