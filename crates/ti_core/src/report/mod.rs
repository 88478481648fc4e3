//! # Report Module
//!
//! - `types` - `IntelligenceReport`, `AnalysisResult` and friends
//! - `aggregator` - `ReportAggregator`, which runs the full pipeline
//!
//! [`report_schema`] exports the JSON Schema of [`AnalysisResult`] for UI
//! consumers that validate payloads.

pub mod aggregator;
pub mod types;

pub use aggregator::ReportAggregator;
pub use types::{AnalysisResult, CompetitiveMetrics, IntelligenceReport, TickRange};

/// JSON Schema of [`AnalysisResult`].
pub fn report_schema() -> serde_json::Value {
    let schema = schemars::schema_for!(AnalysisResult);
    serde_json::to_value(schema).unwrap_or(serde_json::Value::Null)
}
