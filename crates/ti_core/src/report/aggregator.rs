//! # Report Aggregator
//!
//! Runs every analyzer over one snapshot and composes the
//! [`IntelligenceReport`].
//!
//! ## Pipeline
//! 1. Partition the snapshot into a [`SnapshotView`] and compute team aggregates
//! 2. Mid-tier analyzers (the pattern read runs in parallel with the rest)
//! 3. Outcome forecast, then strategy on top of it
//! 4. Competitive metrics and overall confidence

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, warn};

use super::types::{AnalysisResult, CompetitiveMetrics, IntelligenceReport, TickRange};
use crate::analysis::metrics::TeamAggregates;
use crate::analysis::{
    analyze_information, classify_formations, estimate_map_control, predict_execute_timing,
    predict_outcome, recognize_patterns, recommend_strategy, score_advantage, track_momentum,
    MapControlAnalysis, PatternRecognition, StrategyInput,
};
use crate::config::IntelConfig;
use crate::error::{IntelError, Result};
use crate::models::{PlayerPositionSample, SnapshotView};

/// Stateless composer; holds only the config it was built with.
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    config: IntelConfig,
}

impl ReportAggregator {
    pub fn new(config: IntelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IntelConfig {
        &self.config
    }

    /// Analyze one snapshot.
    ///
    /// # Errors
    /// * [`IntelError::SnapshotTooLarge`] - above `worker.max_snapshot_samples`
    pub fn analyze(&self, samples: &[PlayerPositionSample]) -> Result<AnalysisResult> {
        let limit = self.config.worker.max_snapshot_samples;
        if samples.len() > limit {
            return Err(IntelError::SnapshotTooLarge {
                size: samples.len(),
                limit,
            });
        }

        let started = Instant::now();
        let report = self.build_report(samples);
        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;

        debug!(
            samples = samples.len(),
            advantage = report.tactical_advantage.advantage.label(),
            outcome = report.match_outcome.prediction.label(),
            confidence = report.confidence,
            elapsed_ms = processing_time_ms,
            "snapshot analyzed"
        );

        Ok(AnalysisResult {
            data_points: samples.len(),
            round_number: round_number(samples),
            tick_range: tick_range(samples),
            processing_time_ms,
            report,
        })
    }

    /// Compose the report without the size check or timing.
    pub fn build_report(&self, samples: &[PlayerPositionSample]) -> IntelligenceReport {
        let cfg = &self.config;
        let view = SnapshotView::new(samples, cfg.spatial.alive_health_min);
        let teams = TeamAggregates::from_view(&view);
        let has_data = !view.is_empty();

        let (
            (formations, map_control, momentum),
            ((tactical_advantage, information_warfare, execute_timing), pattern_recognition),
        ) = rayon::join(
            || {
                (
                    classify_formations(&teams.t, &teams.ct, &cfg.formation),
                    estimate_map_control(&view, &cfg.map_control),
                    track_momentum(&view, &cfg.momentum),
                )
            },
            || {
                rayon::join(
                    || {
                        (
                            score_advantage(&teams, has_data, &cfg.advantage),
                            analyze_information(&teams, has_data, &cfg.information),
                            predict_execute_timing(&view, &cfg.execute),
                        )
                    },
                    || recognize_patterns(&view, &cfg.spatial, &cfg.pattern),
                )
            },
        );

        let match_outcome = predict_outcome(
            &teams,
            pattern_recognition.overall_coordination,
            has_data,
            &cfg.outcome,
        );

        let strategic_recommendations = recommend_strategy(
            &StrategyInput {
                advantage: tactical_advantage.advantage,
                t_alive: teams.t.alive_count,
                ct_alive: teams.ct.alive_count,
                outcome_confidence: match_outcome.confidence,
                pattern: pattern_recognition.pattern,
            },
            &cfg.strategy,
        );

        let competitive_metrics = competitive_metrics(&pattern_recognition, &map_control);
        let confidence = if has_data {
            (pattern_recognition.confidence
                + match_outcome.confidence
                + competitive_metrics.coordination
                + competitive_metrics.adaptability)
                / 4.0
        } else {
            0.0
        };

        IntelligenceReport {
            formations,
            map_control,
            tactical_advantage,
            execute_timing,
            information_warfare,
            momentum,
            pattern_recognition,
            match_outcome,
            strategic_recommendations,
            competitive_metrics,
            timestamp: Utc::now(),
            confidence,
        }
    }
}

fn competitive_metrics(pattern: &PatternRecognition, control: &MapControlAnalysis) -> CompetitiveMetrics {
    let activity = pattern.movement_activity;
    CompetitiveMetrics {
        aggression: activity,
        coordination: pattern.overall_coordination,
        adaptability: (100.0 - (activity - 50.0).abs() * 2.0).clamp(0.0, 100.0),
        territorial_balance: 100.0 - (control.t_control - control.ct_control).abs(),
    }
}

fn round_number(samples: &[PlayerPositionSample]) -> Option<u32> {
    let first = samples.first()?.round_number;
    if samples.iter().any(|s| s.round_number != first) {
        warn!(round = first, "snapshot spans more than one round");
    }
    Some(first)
}

fn tick_range(samples: &[PlayerPositionSample]) -> Option<TickRange> {
    let start = samples.iter().map(|s| s.tick).min()?;
    let end = samples.iter().map(|s| s.tick).max()?;
    Some(TickRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        AdvantageLevel, BehaviorPattern, ExecutePhase, Formation, InformationAdvantage,
        MapControlStatus, RoundOutcome, StrategyPriority,
    };
    use crate::models::fixtures::{moving, player};
    use crate::models::Side;

    #[test]
    fn test_empty_snapshot_neutral_everywhere() {
        let result = ReportAggregator::default().analyze(&[]).unwrap();
        let report = &result.report;

        assert_eq!(result.data_points, 0);
        assert!(result.tick_range.is_none());
        assert_eq!(report.formations.t_side.formation, Formation::Unknown);
        assert_eq!(report.formations.ct_side.confidence, 0.0);
        assert_eq!(report.map_control.status, MapControlStatus::NoData);
        assert_eq!(report.map_control.t_control, 50.0);
        assert_eq!(report.tactical_advantage.advantage, AdvantageLevel::NoData);
        assert_eq!(report.execute_timing.phase, ExecutePhase::NoData);
        assert_eq!(report.information_warfare.advantage, InformationAdvantage::NoData);
        assert_eq!(report.pattern_recognition.pattern, BehaviorPattern::NoData);
        assert_eq!(report.match_outcome.prediction, RoundOutcome::NoData);
        assert_eq!(report.match_outcome.confidence, 0.0);
        assert_eq!(report.strategic_recommendations.priority, StrategyPriority::NoData);
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn test_five_vs_three_report() {
        let mut samples: Vec<_> = (0..5)
            .map(|i| moving(Side::T, 100.0, i as f64 * 50.0, 0.0, 120.0, 0.0))
            .collect();
        samples.extend((0..3).map(|i| player(Side::Ct, 40.0, 2500.0 + i as f64 * 50.0, 0.0)));
        samples.push(player(Side::Ct, 0.0, 2600.0, 100.0));

        let result = ReportAggregator::default().analyze(&samples).unwrap();
        let report = &result.report;

        assert_eq!(result.data_points, 9);
        assert_eq!(report.tactical_advantage.advantage, AdvantageLevel::TStrong);
        assert_eq!(report.tactical_advantage.confidence, 95.0);
        assert_eq!(report.formations.t_side.formation, Formation::TightStack);
        assert_eq!(report.match_outcome.prediction, RoundOutcome::TVictory);
        assert_eq!(report.strategic_recommendations.priority, StrategyPriority::Execute);
        assert_eq!(
            report.match_outcome.t_win_probability + report.match_outcome.ct_win_probability,
            100.0
        );
    }

    #[test]
    fn test_confidence_is_mean_of_subset() {
        let samples = vec![
            moving(Side::T, 100.0, 0.0, 0.0, 10.0, 0.0),
            moving(Side::Ct, 100.0, 4000.0, 0.0, 10.0, 0.0),
        ];
        let report = ReportAggregator::default().build_report(&samples);
        let expected = (report.pattern_recognition.confidence
            + report.match_outcome.confidence
            + report.competitive_metrics.coordination
            + report.competitive_metrics.adaptability)
            / 4.0;
        assert!((report.confidence - expected).abs() < 1e-9);
    }

    #[test]
    fn test_snapshot_limit() {
        let mut config = IntelConfig::default();
        config.worker.max_snapshot_samples = 2;
        let samples = vec![player(Side::T, 100.0, 0.0, 0.0); 3];
        let err = ReportAggregator::new(config).analyze(&samples).unwrap_err();
        assert!(matches!(err, IntelError::SnapshotTooLarge { size: 3, limit: 2 }));
    }

    #[test]
    fn test_tick_range_and_round() {
        let mut a = player(Side::T, 100.0, 0.0, 0.0);
        a.tick = 640;
        let mut b = player(Side::Ct, 100.0, 0.0, 0.0);
        b.tick = 512;
        let result = ReportAggregator::default().analyze(&[a, b]).unwrap();
        assert_eq!(result.tick_range, Some(TickRange { start: 512, end: 640 }));
        assert_eq!(result.round_number, Some(3));
    }
}
