//! # Tactical Advantage Scorer
//!
//! Compares a weighted alive-count/health score between the two sides.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::TeamAggregates;
use super::rules::{always, first_match, Rule};
use crate::config::AdvantageThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum AdvantageLevel {
    #[serde(rename = "T-STRONG")]
    TStrong,
    #[serde(rename = "CT-STRONG")]
    CtStrong,
    #[serde(rename = "T-SLIGHT")]
    TSlight,
    #[serde(rename = "CT-SLIGHT")]
    CtSlight,
    #[serde(rename = "BALANCED")]
    Balanced,
    #[serde(rename = "NO DATA")]
    NoData,
}

impl AdvantageLevel {
    pub fn label(&self) -> &'static str {
        match self {
            AdvantageLevel::TStrong => "T-STRONG",
            AdvantageLevel::CtStrong => "CT-STRONG",
            AdvantageLevel::TSlight => "T-SLIGHT",
            AdvantageLevel::CtSlight => "CT-SLIGHT",
            AdvantageLevel::Balanced => "BALANCED",
            AdvantageLevel::NoData => "NO DATA",
        }
    }

    pub fn is_strong(&self) -> bool {
        matches!(self, AdvantageLevel::TStrong | AdvantageLevel::CtStrong)
    }

    fn recommendation(&self) -> &'static str {
        match self {
            AdvantageLevel::TStrong => "T side should press the numbers advantage and take the site now",
            AdvantageLevel::CtStrong => "CT side can play aggressive and hunt for picks",
            AdvantageLevel::TSlight => "T side should group up and trade efficiently into a site",
            AdvantageLevel::CtSlight => "CT side should hold crossfires and wait for the commit",
            AdvantageLevel::Balanced => "Even fight; play for information before committing utility",
            AdvantageLevel::NoData => "No player data available",
        }
    }

    fn factors(&self) -> &'static [&'static str] {
        match self {
            AdvantageLevel::TStrong => &["Numbers advantage", "Health advantage", "Initiative"],
            AdvantageLevel::CtStrong => &["Numbers advantage", "Health advantage", "Positional control"],
            AdvantageLevel::TSlight => &["Marginal numbers or health edge", "Timing pressure"],
            AdvantageLevel::CtSlight => &["Marginal numbers or health edge", "Defensive setup"],
            AdvantageLevel::Balanced => &["Equal player counts", "Comparable health pools"],
            AdvantageLevel::NoData => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TacticalAdvantage {
    pub advantage: AdvantageLevel,
    pub t_score: f64,
    pub ct_score: f64,
    /// `|t_score - ct_score|`
    pub score_difference: f64,
    pub confidence: f64,
    pub recommendation: String,
    pub factors: Vec<String>,
}

struct ScorePair {
    t: f64,
    ct: f64,
}

fn t_strong(s: &ScorePair, cfg: &AdvantageThresholds) -> bool {
    s.t > s.ct + cfg.strong_margin
}

fn ct_strong(s: &ScorePair, cfg: &AdvantageThresholds) -> bool {
    s.ct > s.t + cfg.strong_margin
}

fn t_slight(s: &ScorePair, cfg: &AdvantageThresholds) -> bool {
    s.t > s.ct + cfg.slight_margin
}

fn ct_slight(s: &ScorePair, cfg: &AdvantageThresholds) -> bool {
    s.ct > s.t + cfg.slight_margin
}

static ADVANTAGE_RULES: &[Rule<ScorePair, AdvantageThresholds, AdvantageLevel>] = &[
    Rule { name: "t_strong", when: t_strong, then: AdvantageLevel::TStrong },
    Rule { name: "ct_strong", when: ct_strong, then: AdvantageLevel::CtStrong },
    Rule { name: "t_slight", when: t_slight, then: AdvantageLevel::TSlight },
    Rule { name: "ct_slight", when: ct_slight, then: AdvantageLevel::CtSlight },
    Rule { name: "balanced", when: always, then: AdvantageLevel::Balanced },
];

/// `alive × alive_weight + avg_health × health_weight`
pub fn side_score(alive_count: usize, avg_health: f64, cfg: &AdvantageThresholds) -> f64 {
    alive_count as f64 * cfg.alive_weight + avg_health * cfg.health_weight
}

pub fn score_advantage(teams: &TeamAggregates, has_data: bool, cfg: &AdvantageThresholds) -> TacticalAdvantage {
    if !has_data {
        return TacticalAdvantage {
            advantage: AdvantageLevel::NoData,
            t_score: 0.0,
            ct_score: 0.0,
            score_difference: 0.0,
            confidence: 0.0,
            recommendation: AdvantageLevel::NoData.recommendation().to_string(),
            factors: Vec::new(),
        };
    }

    let scores = ScorePair {
        t: side_score(teams.t.alive_count, teams.t.avg_health, cfg),
        ct: side_score(teams.ct.alive_count, teams.ct.avg_health, cfg),
    };
    let diff = (scores.t - scores.ct).abs();

    let advantage = first_match(ADVANTAGE_RULES, &scores, cfg)
        .copied()
        .unwrap_or(AdvantageLevel::Balanced);

    let confidence = match advantage {
        AdvantageLevel::TStrong | AdvantageLevel::CtStrong => (60.0 + diff).min(95.0),
        AdvantageLevel::TSlight | AdvantageLevel::CtSlight => 70.0,
        AdvantageLevel::Balanced => 60.0,
        AdvantageLevel::NoData => 0.0,
    };

    TacticalAdvantage {
        advantage,
        t_score: scores.t,
        ct_score: scores.ct,
        score_difference: diff,
        confidence,
        recommendation: advantage.recommendation().to_string(),
        factors: advantage.factors().iter().map(|f| f.to_string()).collect(),
    }
}
