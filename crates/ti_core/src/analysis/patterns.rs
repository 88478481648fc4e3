//! # Pattern Recognizer
//!
//! Classifies the round's movement behavior from the share of fast-moving
//! alive players and the mean team coordination, and flags anomalous
//! combinations independently of the classification.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::coordination_index;
use super::rules::{always, first_match, Rule};
use crate::config::{PatternThresholds, SpatialThresholds};
use crate::models::SnapshotView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum BehaviorPattern {
    #[serde(rename = "AGGRESSIVE")]
    Aggressive,
    #[serde(rename = "TACTICAL")]
    Tactical,
    #[serde(rename = "DEFENSIVE")]
    Defensive,
    #[serde(rename = "ADAPTIVE")]
    Adaptive,
    #[serde(rename = "NO DATA")]
    NoData,
}

impl BehaviorPattern {
    pub fn label(&self) -> &'static str {
        match self {
            BehaviorPattern::Aggressive => "AGGRESSIVE",
            BehaviorPattern::Tactical => "TACTICAL",
            BehaviorPattern::Defensive => "DEFENSIVE",
            BehaviorPattern::Adaptive => "ADAPTIVE",
            BehaviorPattern::NoData => "NO DATA",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            BehaviorPattern::Aggressive => "Fast, coordinated movement; teams are committing to fights",
            BehaviorPattern::Tactical => "Structured positioning with teammates in support range",
            BehaviorPattern::Defensive => "Little movement; players are holding positions",
            BehaviorPattern::Adaptive => "Mixed tempo; teams are reacting to information",
            BehaviorPattern::NoData => "No player data available",
        }
    }

    /// Per-pattern confidence formula; `a` is movement activity, `c` overall coordination.
    fn confidence(&self, a: f64, c: f64) -> f64 {
        match self {
            BehaviorPattern::Aggressive => (70.0 + a * 0.3).min(95.0),
            BehaviorPattern::Tactical => (60.0 + c * 0.4).min(90.0),
            BehaviorPattern::Defensive => (50.0 + (100.0 - a) * 0.3).min(85.0),
            BehaviorPattern::Adaptive => (50.0 + (a - 50.0).abs() * 0.5).min(80.0),
            BehaviorPattern::NoData => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PatternStrength {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl PatternStrength {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 80.0 {
            PatternStrength::High
        } else if confidence > 60.0 {
            PatternStrength::Medium
        } else {
            PatternStrength::Low
        }
    }
}

/// Anomaly flags; several can fire on the same snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternAnomaly {
    /// Nearly every alive player is moving fast
    UniversalHighMobility,
    /// Teams are scattered with almost no support range
    NearZeroCoordination,
    /// High activity without the coordination to back it
    ChaoticAggression,
}

impl PatternAnomaly {
    pub fn description(&self) -> &'static str {
        match self {
            PatternAnomaly::UniversalHighMobility => "Unusually high mobility across nearly all players",
            PatternAnomaly::NearZeroCoordination => "Near-zero team coordination detected",
            PatternAnomaly::ChaoticAggression => "High activity with low coordination suggests uncoordinated aggression",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecognition {
    pub pattern: BehaviorPattern,
    pub confidence: f64,
    pub strength: PatternStrength,
    /// Percent of alive players above the high-movement speed
    pub movement_activity: f64,
    /// Mean of both sides' coordination indices
    pub overall_coordination: f64,
    pub description: String,
    pub anomalies: Vec<PatternAnomaly>,
}

struct PatternInput {
    activity: f64,
    coordination: f64,
}

fn aggressive(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.activity > cfg.aggressive_activity && i.coordination > cfg.aggressive_coordination
}

fn tactical(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.coordination > cfg.tactical_coordination
}

fn defensive(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.activity < cfg.defensive_activity
}

static PATTERN_RULES: &[Rule<PatternInput, PatternThresholds, BehaviorPattern>] = &[
    Rule { name: "aggressive", when: aggressive, then: BehaviorPattern::Aggressive },
    Rule { name: "tactical", when: tactical, then: BehaviorPattern::Tactical },
    Rule { name: "defensive", when: defensive, then: BehaviorPattern::Defensive },
    Rule { name: "adaptive", when: always, then: BehaviorPattern::Adaptive },
];

fn universal_mobility(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.activity > cfg.universal_mobility_activity
}

fn coordination_collapse(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.coordination < cfg.coordination_floor
}

fn chaotic(i: &PatternInput, cfg: &PatternThresholds) -> bool {
    i.activity > cfg.chaotic_activity && i.coordination < cfg.chaotic_coordination
}

/// Not first-match: every matching row contributes its flag.
static ANOMALY_RULES: &[Rule<PatternInput, PatternThresholds, PatternAnomaly>] = &[
    Rule { name: "universal_mobility", when: universal_mobility, then: PatternAnomaly::UniversalHighMobility },
    Rule { name: "coordination_collapse", when: coordination_collapse, then: PatternAnomaly::NearZeroCoordination },
    Rule { name: "chaotic_aggression", when: chaotic, then: PatternAnomaly::ChaoticAggression },
];

/// Mean coordination index over both sides' alive players.
pub fn overall_coordination(view: &SnapshotView<'_>, cfg: &SpatialThresholds) -> f64 {
    (coordination_index(&view.t_alive, cfg) + coordination_index(&view.ct_alive, cfg)) / 2.0
}

/// Percent of alive players moving faster than `high_movement_speed`.
pub fn movement_activity(view: &SnapshotView<'_>, cfg: &PatternThresholds) -> f64 {
    let alive = view.alive_count();
    if alive == 0 {
        return 0.0;
    }
    let fast = view
        .alive_players()
        .filter(|p| p.planar_speed() > cfg.high_movement_speed)
        .count();
    fast as f64 / alive as f64 * 100.0
}

pub fn recognize_patterns(
    view: &SnapshotView<'_>,
    spatial: &SpatialThresholds,
    cfg: &PatternThresholds,
) -> PatternRecognition {
    if view.is_empty() {
        return PatternRecognition {
            pattern: BehaviorPattern::NoData,
            confidence: 0.0,
            strength: PatternStrength::Low,
            movement_activity: 0.0,
            overall_coordination: 0.0,
            description: BehaviorPattern::NoData.description().to_string(),
            anomalies: Vec::new(),
        };
    }

    let input = PatternInput {
        activity: movement_activity(view, cfg),
        coordination: overall_coordination(view, spatial),
    };

    let pattern = first_match(PATTERN_RULES, &input, cfg)
        .copied()
        .unwrap_or(BehaviorPattern::Adaptive);
    let confidence = pattern.confidence(input.activity, input.coordination);

    let anomalies = ANOMALY_RULES
        .iter()
        .filter(|rule| (rule.when)(&input, cfg))
        .map(|rule| rule.then)
        .collect();

    PatternRecognition {
        pattern,
        confidence,
        strength: PatternStrength::from_confidence(confidence),
        movement_activity: input.activity,
        overall_coordination: input.coordination,
        description: pattern.description().to_string(),
        anomalies,
    }
}
