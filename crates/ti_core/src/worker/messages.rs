//! Wire messages exchanged with the analysis worker.
//!
//! ```json
//! { "type": "ANALYZE_TACTICAL_DATA", "data": [...], "requestId": 7 }
//! { "type": "ANALYSIS_COMPLETE", "result": {...}, "requestId": 7 }
//! { "type": "ANALYSIS_ERROR", "error": "...", "requestId": 7 }
//! { "type": "ANALYSIS_CANCELLED", "requestId": 7 }
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Snapshot;
use crate::report::AnalysisResult;

/// Correlates a reply with the request that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum WorkerRequest {
    #[serde(rename = "ANALYZE_TACTICAL_DATA", rename_all = "camelCase")]
    AnalyzeTacticalData {
        data: Snapshot,
        /// Assigned by the host when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        request_id: Option<RequestId>,
    },
}

impl WorkerRequest {
    pub fn analyze(data: Snapshot) -> Self {
        WorkerRequest::AnalyzeTacticalData { data, request_id: None }
    }

    /// Caller-supplied id, if any.
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            WorkerRequest::AnalyzeTacticalData { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum WorkerResponse {
    #[serde(rename = "ANALYSIS_COMPLETE", rename_all = "camelCase")]
    AnalysisComplete {
        result: Box<AnalysisResult>,
        request_id: RequestId,
    },
    #[serde(rename = "ANALYSIS_ERROR", rename_all = "camelCase")]
    AnalysisError { error: String, request_id: RequestId },
    #[serde(rename = "ANALYSIS_CANCELLED", rename_all = "camelCase")]
    AnalysisCancelled { request_id: RequestId },
}

impl WorkerResponse {
    pub fn request_id(&self) -> RequestId {
        match self {
            WorkerResponse::AnalysisComplete { request_id, .. }
            | WorkerResponse::AnalysisError { request_id, .. }
            | WorkerResponse::AnalysisCancelled { request_id } => *request_id,
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkerResponse::AnalysisComplete { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn into_result(self) -> Option<AnalysisResult> {
        match self {
            WorkerResponse::AnalysisComplete { result, .. } => Some(*result),
            _ => None,
        }
    }
}
