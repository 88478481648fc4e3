//! JSON entry points for embedding hosts that exchange strings rather than
//! Rust types. Both run synchronously on the caller's thread; use
//! [`AsyncComputeHost`](crate::worker::AsyncComputeHost) to stay off it.

use tracing::warn;

use crate::config::IntelConfig;
use crate::error::Result;
use crate::models::Snapshot;
use crate::report::ReportAggregator;
use crate::worker::{run_job, RequestId, WorkerRequest, WorkerResponse};

/// Analyze a JSON array of samples and return the `AnalysisResult` as JSON.
pub fn analyze_snapshot_json(snapshot_json: &str, config: &IntelConfig) -> Result<String> {
    let samples: Snapshot = serde_json::from_str(snapshot_json)?;
    let result = ReportAggregator::new(config.clone()).analyze(&samples)?;
    Ok(serde_json::to_string(&result)?)
}

/// Answer one wire message. Never fails: malformed input becomes an
/// `ANALYSIS_ERROR` reply with request id 0.
pub fn handle_message_json(message_json: &str, config: &IntelConfig) -> String {
    let response = match serde_json::from_str::<WorkerRequest>(message_json) {
        Ok(request) => handle_message(request, &ReportAggregator::new(config.clone())),
        Err(err) => {
            warn!(error = %err, "malformed worker message");
            WorkerResponse::AnalysisError {
                error: format!("Invalid message: {}", err),
                request_id: RequestId(0),
            }
        }
    };
    encode_response(&response)
}

/// Answer one typed request on the current thread.
pub fn handle_message(request: WorkerRequest, aggregator: &ReportAggregator) -> WorkerResponse {
    let WorkerRequest::AnalyzeTacticalData { data, request_id } = request;
    let id = request_id.unwrap_or(RequestId(0));
    run_job(id, &data, None, |samples| aggregator.analyze(samples))
}

/// Serialize a reply; falls back to a hand-built error if the report itself
/// cannot be encoded.
pub fn encode_response(response: &WorkerResponse) -> String {
    serde_json::to_string(response).unwrap_or_else(|err| {
        let fallback = WorkerResponse::AnalysisError {
            error: format!("Serialization error: {}", err),
            request_id: response.request_id(),
        };
        serde_json::to_string(&fallback).unwrap_or_default()
    })
}
