//! # Strategy Recommender
//!
//! Maps the advantage/outcome state to one prioritized piece of guidance.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::advantage::AdvantageLevel;
use super::patterns::BehaviorPattern;
use super::rules::{always, first_match, Rule};
use crate::config::StrategyThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum StrategyPriority {
    #[serde(rename = "EXECUTE")]
    Execute,
    #[serde(rename = "DEFEND")]
    Defend,
    #[serde(rename = "ADAPT")]
    Adapt,
    #[serde(rename = "REPOSITION")]
    Reposition,
    #[serde(rename = "NO DATA")]
    NoData,
}

/// Canned guidance per priority.
struct Playbook {
    timeframe: &'static str,
    focus: &'static str,
    recommendations: [&'static str; 3],
    counter_strategies: [&'static str; 3],
}

impl StrategyPriority {
    fn playbook(&self) -> Playbook {
        match self {
            StrategyPriority::Execute => Playbook {
                timeframe: "immediate",
                focus: "Convert the advantage into a site take before the defense recovers",
                recommendations: [
                    "Commit to a single site with full utility",
                    "Trade frags aggressively; numbers favor the attack",
                    "Plant for the safest post-plant position",
                ],
                counter_strategies: [
                    "Expect stacked retakes; hold post-plant crossfires",
                    "Watch for flank rotations through mid",
                    "Save one flash to break the retake",
                ],
            },
            StrategyPriority::Defend => Playbook {
                timeframe: "short-term",
                focus: "Hold the defensive advantage and deny the plant",
                recommendations: [
                    "Hold crossfires on the most likely entry",
                    "Delay with utility rather than peeking",
                    "Keep a rotator ready between sites",
                ],
                counter_strategies: [
                    "Anticipate a fake into a late split",
                    "Avoid dry peeks that give away the advantage",
                    "Play for time; the clock favors the defense",
                ],
            },
            StrategyPriority::Adapt => Playbook {
                timeframe: "mid-round",
                focus: "Gather information and react to the opponent's commitment",
                recommendations: [
                    "Take map control in uncontested areas",
                    "Use utility to force reactions before committing",
                    "Keep players in trade range",
                ],
                counter_strategies: [
                    "Punish over-rotations with a quick hit",
                    "Deny default control with early aggression",
                    "Track utility usage to read their plan",
                ],
            },
            StrategyPriority::Reposition => Playbook {
                timeframe: "short-term",
                focus: "Regroup before taking further fights",
                recommendations: [
                    "Fall back to positions with teammate support",
                    "Avoid isolated duels until numbers recover",
                    "Reset utility for a coordinated push",
                ],
                counter_strategies: [
                    "Expect the opponent to press the advantage",
                    "Cover the most likely push route",
                    "Look for a pick to even the numbers",
                ],
            },
            StrategyPriority::NoData => Playbook {
                timeframe: "N/A",
                focus: "No player data available",
                recommendations: ["", "", ""],
                counter_strategies: ["", "", ""],
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StrategicRecommendation {
    pub priority: StrategyPriority,
    pub timeframe: String,
    pub focus: String,
    pub recommendations: Vec<String>,
    pub counter_strategies: Vec<String>,
}

/// State the recommender decides on.
#[derive(Debug, Clone, Copy)]
pub struct StrategyInput {
    pub advantage: AdvantageLevel,
    pub t_alive: usize,
    pub ct_alive: usize,
    pub outcome_confidence: f64,
    pub pattern: BehaviorPattern,
}

fn attack_decisive(i: &StrategyInput, cfg: &StrategyThresholds) -> bool {
    i.advantage == AdvantageLevel::TStrong
        || (i.t_alive > i.ct_alive && i.outcome_confidence >= cfg.decisive_confidence)
}

fn defense_decisive(i: &StrategyInput, cfg: &StrategyThresholds) -> bool {
    i.advantage == AdvantageLevel::CtStrong
        || (i.ct_alive > i.t_alive && i.outcome_confidence >= cfg.decisive_confidence)
}

fn even_or_fluid(i: &StrategyInput, _: &StrategyThresholds) -> bool {
    i.advantage == AdvantageLevel::Balanced || i.pattern == BehaviorPattern::Adaptive
}

static STRATEGY_RULES: &[Rule<StrategyInput, StrategyThresholds, StrategyPriority>] = &[
    Rule { name: "execute", when: attack_decisive, then: StrategyPriority::Execute },
    Rule { name: "defend", when: defense_decisive, then: StrategyPriority::Defend },
    Rule { name: "adapt", when: even_or_fluid, then: StrategyPriority::Adapt },
    Rule { name: "reposition", when: always, then: StrategyPriority::Reposition },
];

pub fn recommend_strategy(input: &StrategyInput, cfg: &StrategyThresholds) -> StrategicRecommendation {
    let priority = if input.advantage == AdvantageLevel::NoData {
        StrategyPriority::NoData
    } else {
        first_match(STRATEGY_RULES, input, cfg)
            .copied()
            .unwrap_or(StrategyPriority::Reposition)
    };

    let book = priority.playbook();
    let lines = |items: [&'static str; 3]| -> Vec<String> {
        items.iter().filter(|s| !s.is_empty()).map(|s| s.to_string()).collect()
    };

    StrategicRecommendation {
        priority,
        timeframe: book.timeframe.to_string(),
        focus: book.focus.to_string(),
        recommendations: lines(book.recommendations),
        counter_strategies: lines(book.counter_strategies),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(advantage: AdvantageLevel, t: usize, ct: usize, conf: f64, pattern: BehaviorPattern) -> StrategyInput {
        StrategyInput {
            advantage,
            t_alive: t,
            ct_alive: ct,
            outcome_confidence: conf,
            pattern,
        }
    }

    #[test]
    fn test_priority_ladder() {
        let cfg = StrategyThresholds::default();
        let cases = [
            (input(AdvantageLevel::TStrong, 5, 3, 50.0, BehaviorPattern::Tactical), StrategyPriority::Execute),
            (input(AdvantageLevel::TSlight, 4, 3, 85.0, BehaviorPattern::Tactical), StrategyPriority::Execute),
            (input(AdvantageLevel::CtStrong, 2, 5, 50.0, BehaviorPattern::Tactical), StrategyPriority::Defend),
            (input(AdvantageLevel::CtSlight, 3, 4, 90.0, BehaviorPattern::Defensive), StrategyPriority::Defend),
            (input(AdvantageLevel::Balanced, 4, 4, 65.0, BehaviorPattern::Tactical), StrategyPriority::Adapt),
            (input(AdvantageLevel::TSlight, 4, 4, 70.0, BehaviorPattern::Adaptive), StrategyPriority::Adapt),
            (input(AdvantageLevel::CtSlight, 3, 4, 70.0, BehaviorPattern::Defensive), StrategyPriority::Reposition),
        ];
        for (state, expected) in cases {
            assert_eq!(recommend_strategy(&state, &cfg).priority, expected, "{:?}", state);
        }
    }

    #[test]
    fn test_guidance_shape() {
        let result = recommend_strategy(
            &input(AdvantageLevel::TStrong, 5, 1, 95.0, BehaviorPattern::Aggressive),
            &StrategyThresholds::default(),
        );
        assert_eq!(result.timeframe, "immediate");
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.counter_strategies.len(), 3);
    }

    #[test]
    fn test_no_data() {
        let result = recommend_strategy(
            &input(AdvantageLevel::NoData, 0, 0, 0.0, BehaviorPattern::NoData),
            &StrategyThresholds::default(),
        );
        assert_eq!(result.priority, StrategyPriority::NoData);
        assert!(result.recommendations.is_empty());
    }
}
