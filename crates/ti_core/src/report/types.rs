use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    ExecuteTiming, FormationReport, InformationWarfare, MapControlAnalysis, MatchOutcome,
    MomentumAnalysis, PatternRecognition, StrategicRecommendation, TacticalAdvantage,
};

/// Secondary 0-100 indicators derived from the pattern and control reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveMetrics {
    /// Share of alive players moving at high speed
    pub aggression: f64,
    /// Mean team coordination index
    pub coordination: f64,
    /// Peaks when activity sits midway between holding and rushing
    pub adaptability: f64,
    /// 100 when territory is split evenly
    pub territorial_balance: f64,
}

/// Terminal output of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IntelligenceReport {
    pub formations: FormationReport,
    pub map_control: MapControlAnalysis,
    pub tactical_advantage: TacticalAdvantage,
    pub execute_timing: ExecuteTiming,
    pub information_warfare: InformationWarfare,
    pub momentum: MomentumAnalysis,
    pub pattern_recognition: PatternRecognition,
    pub match_outcome: MatchOutcome,
    pub strategic_recommendations: StrategicRecommendation,
    pub competitive_metrics: CompetitiveMetrics,
    pub timestamp: DateTime<Utc>,
    /// Mean of pattern confidence, outcome confidence, coordination and adaptability
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TickRange {
    pub start: u64,
    pub end: u64,
}

/// Report plus the bookkeeping the caller needs to match it to its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub report: IntelligenceReport,
    /// Number of samples analyzed
    pub data_points: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_range: Option<TickRange>,
    pub processing_time_ms: f64,
}
