//! # Information Warfare Analyzer
//!
//! Spread plus numbers as a proxy for how much of the map a side can see.
//! The reported score is a fixed value per branch and does not scale with
//! the size of the lead.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::TeamAggregates;
use crate::config::InformationThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum InformationAdvantage {
    #[serde(rename = "T-SIDE")]
    TSide,
    #[serde(rename = "CT-SIDE")]
    CtSide,
    #[serde(rename = "NEUTRAL")]
    Neutral,
    #[serde(rename = "NO DATA")]
    NoData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InformationWarfare {
    pub advantage: InformationAdvantage,
    pub score: f64,
    pub t_position_score: f64,
    pub ct_position_score: f64,
    pub assessment: String,
}

pub fn analyze_information(teams: &TeamAggregates, has_data: bool, cfg: &InformationThresholds) -> InformationWarfare {
    if !has_data {
        return InformationWarfare {
            advantage: InformationAdvantage::NoData,
            score: 0.0,
            t_position_score: 0.0,
            ct_position_score: 0.0,
            assessment: "No player data available".to_string(),
        };
    }

    let t_position_score = teams.t.spread + teams.t.alive_count as f64 * cfg.alive_weight;
    let ct_position_score = teams.ct.spread + teams.ct.alive_count as f64 * cfg.alive_weight;

    let (advantage, score, assessment) = if t_position_score > ct_position_score + cfg.margin {
        (
            InformationAdvantage::TSide,
            cfg.advantage_score,
            "T side spread wide enough to gather information across the map",
        )
    } else if ct_position_score > t_position_score + cfg.margin {
        (
            InformationAdvantage::CtSide,
            cfg.advantage_score,
            "CT side holds more sightlines and will see the hit coming",
        )
    } else {
        (
            InformationAdvantage::Neutral,
            cfg.neutral_score,
            "Neither side has a clear information edge",
        )
    };

    InformationWarfare {
        advantage,
        score,
        t_position_score,
        ct_position_score,
        assessment: assessment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::metrics::TeamAggregate;

    fn teams(t: (usize, f64), ct: (usize, f64)) -> TeamAggregates {
        TeamAggregates {
            t: TeamAggregate { alive_count: t.0, spread: t.1, ..Default::default() },
            ct: TeamAggregate { alive_count: ct.0, spread: ct.1, ..Default::default() },
        }
    }

    #[test]
    fn test_fixed_score_regardless_of_margin() {
        let cfg = InformationThresholds::default();
        let narrow = analyze_information(&teams((5, 900.0), (5, 550.0)), true, &cfg);
        let wide = analyze_information(&teams((5, 5000.0), (1, 0.0)), true, &cfg);
        assert_eq!(narrow.advantage, InformationAdvantage::TSide);
        assert_eq!(wide.advantage, InformationAdvantage::TSide);
        assert_eq!(narrow.score, 75.0);
        assert_eq!(wide.score, 75.0);
    }

    #[test]
    fn test_ct_and_neutral() {
        let cfg = InformationThresholds::default();
        let ct = analyze_information(&teams((2, 100.0), (5, 400.0)), true, &cfg);
        assert_eq!(ct.advantage, InformationAdvantage::CtSide);
        assert_eq!(ct.ct_position_score, 900.0);

        let neutral = analyze_information(&teams((4, 300.0), (4, 200.0)), true, &cfg);
        assert_eq!(neutral.advantage, InformationAdvantage::Neutral);
        assert_eq!(neutral.score, 50.0);
    }

    #[test]
    fn test_empty() {
        let result = analyze_information(&TeamAggregates::default(), false, &InformationThresholds::default());
        assert_eq!(result.advantage, InformationAdvantage::NoData);
        assert_eq!(result.score, 0.0);
    }
}
