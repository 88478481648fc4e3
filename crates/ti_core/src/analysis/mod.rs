//! # Analysis Module
//!
//! Per-snapshot tactical analyzers. Every function here is pure: it reads a
//! [`SnapshotView`](crate::models::SnapshotView) or precomputed team
//! aggregates plus a threshold group, and returns a fresh result.
//!
//! ## Submodules
//!
//! - `metrics` - spatial primitives and team aggregates
//! - `rules` - ordered rule tables backing the classifiers
//! - `formation`, `map_control`, `momentum`, `advantage`, `execute_timing`,
//!   `information`, `patterns` - mid-tier analyzers
//! - `outcome`, `strategy` - forecast and guidance built on the mid tier

pub mod advantage;
pub mod execute_timing;
pub mod formation;
pub mod information;
pub mod map_control;
pub mod metrics;
pub mod momentum;
pub mod outcome;
pub mod patterns;
pub mod rules;
pub mod strategy;

pub use advantage::{score_advantage, AdvantageLevel, TacticalAdvantage};
pub use execute_timing::{predict_execute_timing, ExecutePhase, ExecuteTiming};
pub use formation::{classify_formation, classify_formations, Formation, FormationAnalysis, FormationReport};
pub use information::{analyze_information, InformationAdvantage, InformationWarfare};
pub use map_control::{estimate_map_control, MapControlAnalysis, MapControlStatus};
pub use momentum::{track_momentum, MomentumAnalysis, MomentumLeader};
pub use outcome::{predict_outcome, MatchOutcome, OutcomeFactors, RoundOutcome};
pub use patterns::{
    movement_activity, overall_coordination, recognize_patterns, BehaviorPattern, PatternAnomaly,
    PatternRecognition, PatternStrength,
};
pub use strategy::{recommend_strategy, StrategicRecommendation, StrategyInput, StrategyPriority};
