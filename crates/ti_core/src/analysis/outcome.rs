//! # Match Outcome Predictor
//!
//! Weighted composite of alive, health, mobility and coordination
//! differentials, mapped to a round forecast.
//!
//! ## Probabilities
//! - `t_win_probability + ct_win_probability == 100`
//! - `overtime_probability` is reported on its own and is not part of that sum

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::TeamAggregates;
use super::rules::{always, first_match, Rule};
use crate::config::OutcomeThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum RoundOutcome {
    #[serde(rename = "T-SIDE VICTORY")]
    TVictory,
    #[serde(rename = "CT-SIDE VICTORY")]
    CtVictory,
    #[serde(rename = "OVERTIME LIKELY")]
    OvertimeLikely,
    #[serde(rename = "CLOSE ROUND")]
    CloseRound,
    #[serde(rename = "NO DATA")]
    NoData,
}

impl RoundOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RoundOutcome::TVictory => "T-SIDE VICTORY",
            RoundOutcome::CtVictory => "CT-SIDE VICTORY",
            RoundOutcome::OvertimeLikely => "OVERTIME LIKELY",
            RoundOutcome::CloseRound => "CLOSE ROUND",
            RoundOutcome::NoData => "NO DATA",
        }
    }

    fn confidence(&self, composite: f64) -> f64 {
        match self {
            RoundOutcome::TVictory | RoundOutcome::CtVictory => (60.0 + composite.abs() * 0.8).min(95.0),
            RoundOutcome::CloseRound => 70.0,
            RoundOutcome::OvertimeLikely => 65.0,
            RoundOutcome::NoData => 0.0,
        }
    }
}

/// Inputs to the composite, exposed for explanation in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeFactors {
    pub alive_differential: f64,
    pub health_differential: f64,
    pub mobility_differential: f64,
    pub coordination_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub prediction: RoundOutcome,
    pub confidence: f64,
    /// Positive favors T
    pub composite_score: f64,
    pub t_win_probability: f64,
    pub ct_win_probability: f64,
    pub overtime_probability: f64,
    pub factors: OutcomeFactors,
    pub key_factors: Vec<String>,
}

fn t_victory(c: &f64, cfg: &OutcomeThresholds) -> bool {
    *c > cfg.victory_margin
}

fn ct_victory(c: &f64, cfg: &OutcomeThresholds) -> bool {
    *c < -cfg.victory_margin
}

fn overtime(c: &f64, cfg: &OutcomeThresholds) -> bool {
    c.abs() < cfg.overtime_margin
}

static OUTCOME_RULES: &[Rule<f64, OutcomeThresholds, RoundOutcome>] = &[
    Rule { name: "t_victory", when: t_victory, then: RoundOutcome::TVictory },
    Rule { name: "ct_victory", when: ct_victory, then: RoundOutcome::CtVictory },
    Rule { name: "overtime_likely", when: overtime, then: RoundOutcome::OvertimeLikely },
    Rule { name: "close_round", when: always, then: RoundOutcome::CloseRound },
];

/// Weighted composite; positive favors T.
pub fn composite_score(teams: &TeamAggregates, overall_coordination: f64, cfg: &OutcomeThresholds) -> OutcomeFactors {
    OutcomeFactors {
        alive_differential: (teams.t.alive_count as f64 - teams.ct.alive_count as f64) * cfg.alive_weight,
        health_differential: (teams.t.avg_health - teams.ct.avg_health) * cfg.health_weight,
        mobility_differential: (teams.t.avg_velocity_magnitude - teams.ct.avg_velocity_magnitude)
            * cfg.mobility_weight,
        coordination_factor: (overall_coordination - cfg.coordination_baseline) * cfg.coordination_weight,
    }
}

impl OutcomeFactors {
    pub fn total(&self) -> f64 {
        self.alive_differential + self.health_differential + self.mobility_differential + self.coordination_factor
    }

    fn describe(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut push = |value: f64, favors_t: &str, favors_ct: &str| {
            if value > 0.0 {
                out.push(favors_t.to_string());
            } else if value < 0.0 {
                out.push(favors_ct.to_string());
            }
        };
        push(self.alive_differential, "T side has more players alive", "CT side has more players alive");
        push(self.health_differential, "T side has a healthier roster", "CT side has a healthier roster");
        push(self.mobility_differential, "T side is moving faster", "CT side is moving faster");
        if self.coordination_factor > 0.0 {
            out.push("Teams are tightly coordinated".to_string());
        } else if self.coordination_factor < 0.0 {
            out.push("Teams are loosely coordinated".to_string());
        }
        out
    }
}

pub fn predict_outcome(
    teams: &TeamAggregates,
    overall_coordination: f64,
    has_data: bool,
    cfg: &OutcomeThresholds,
) -> MatchOutcome {
    let factors = if has_data {
        composite_score(teams, overall_coordination, cfg)
    } else {
        OutcomeFactors {
            alive_differential: 0.0,
            health_differential: 0.0,
            mobility_differential: 0.0,
            coordination_factor: 0.0,
        }
    };
    let composite = factors.total();

    let prediction = if has_data {
        first_match(OUTCOME_RULES, &composite, cfg)
            .copied()
            .unwrap_or(RoundOutcome::CloseRound)
    } else {
        RoundOutcome::NoData
    };

    let ceiling = 100.0 - cfg.win_prob_floor;
    let t_win_probability = (50.0 + composite).clamp(cfg.win_prob_floor, ceiling);
    let overtime_probability = if composite.abs() < cfg.overtime_prob_margin {
        cfg.overtime_prob_close
    } else {
        cfg.overtime_prob_default
    };

    MatchOutcome {
        prediction,
        confidence: prediction.confidence(composite),
        composite_score: composite,
        t_win_probability,
        ct_win_probability: 100.0 - t_win_probability,
        overtime_probability,
        key_factors: factors.describe(),
        factors,
    }
}
