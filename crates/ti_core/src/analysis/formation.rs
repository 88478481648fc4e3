//! # Formation Classifier
//!
//! Classifies one side's shape from the RMS spread of its alive players.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::TeamAggregate;
use super::rules::{always, first_match, Rule};
use crate::config::FormationThresholds;
use crate::models::Side;

/// Team shape classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Formation {
    /// No alive players
    Unknown,
    /// Exactly one alive player
    Individual,
    TightStack,
    LooseFormation,
    SplitFormation,
}

impl Formation {
    pub fn display(&self) -> &'static str {
        match self {
            Formation::Unknown => "Unknown",
            Formation::Individual => "Individual",
            Formation::TightStack => "Tight Stack",
            Formation::LooseFormation => "Loose Formation",
            Formation::SplitFormation => "Split Formation",
        }
    }

    pub fn strategic_intent(&self) -> &'static str {
        match self {
            Formation::Unknown => "No alive players to read intent from",
            Formation::Individual => "Lone survivor playing for time, information or a pick",
            Formation::TightStack => "Concentrated force for a single-site hit or retake",
            Formation::LooseFormation => "Map presence with trade support between players",
            Formation::SplitFormation => "Multi-angle pressure or a split site take",
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            Formation::Unknown => 0.0,
            Formation::Individual => 95.0,
            Formation::TightStack => 90.0,
            Formation::LooseFormation => 85.0,
            Formation::SplitFormation => 80.0,
        }
    }
}

/// Formation read for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormationAnalysis {
    pub formation: Formation,
    pub confidence: f64,
    /// 0-100, inverse of spread
    pub cohesion: f64,
    pub spread: f64,
    pub player_count: usize,
    pub strategic_intent: String,
}

/// Both sides' formations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormationReport {
    pub t_side: FormationAnalysis,
    pub ct_side: FormationAnalysis,
}

impl FormationReport {
    pub fn side(&self, side: Side) -> &FormationAnalysis {
        match side {
            Side::T => &self.t_side,
            Side::Ct => &self.ct_side,
        }
    }
}

fn no_players(team: &TeamAggregate, _: &FormationThresholds) -> bool {
    team.alive_count == 0
}

fn single_player(team: &TeamAggregate, _: &FormationThresholds) -> bool {
    team.alive_count == 1
}

fn tight(team: &TeamAggregate, cfg: &FormationThresholds) -> bool {
    team.spread < cfg.tight_spread_max
}

fn loose(team: &TeamAggregate, cfg: &FormationThresholds) -> bool {
    team.spread < cfg.loose_spread_max
}

static FORMATION_RULES: &[Rule<TeamAggregate, FormationThresholds, Formation>] = &[
    Rule { name: "no_players", when: no_players, then: Formation::Unknown },
    Rule { name: "single_player", when: single_player, then: Formation::Individual },
    Rule { name: "tight_stack", when: tight, then: Formation::TightStack },
    Rule { name: "loose_formation", when: loose, then: Formation::LooseFormation },
    Rule { name: "split_formation", when: always, then: Formation::SplitFormation },
];

/// Classify one side from its alive-player aggregate.
pub fn classify_formation(team: &TeamAggregate, cfg: &FormationThresholds) -> FormationAnalysis {
    let formation = first_match(FORMATION_RULES, team, cfg)
        .copied()
        .unwrap_or(Formation::Unknown);

    let cohesion = match formation {
        Formation::Unknown => 0.0,
        Formation::Individual => 100.0,
        _ => (100.0 - team.spread / cfg.cohesion_divisor).clamp(0.0, 100.0),
    };

    FormationAnalysis {
        formation,
        confidence: formation.confidence(),
        cohesion,
        spread: team.spread,
        player_count: team.alive_count,
        strategic_intent: formation.strategic_intent().to_string(),
    }
}

pub fn classify_formations(
    t: &TeamAggregate,
    ct: &TeamAggregate,
    cfg: &FormationThresholds,
) -> FormationReport {
    FormationReport {
        t_side: classify_formation(t, cfg),
        ct_side: classify_formation(ct, cfg),
    }
}
