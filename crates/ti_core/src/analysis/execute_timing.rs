//! # Execute Timing Predictor
//!
//! Reads the round phase from how many alive players are moving fast or
//! holding still, and how many teammate pairs are stacked close together.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::pairs_within;
use super::rules::{always, first_match, Rule};
use crate::config::ExecuteThresholds;
use crate::models::SnapshotView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ExecutePhase {
    #[serde(rename = "IMMEDIATE EXECUTE")]
    ImmediateExecute,
    #[serde(rename = "PREPARING EXECUTE")]
    PreparingExecute,
    #[serde(rename = "DEFENSIVE HOLD")]
    DefensiveHold,
    #[serde(rename = "POSITIONAL SETUP")]
    PositionalSetup,
    #[serde(rename = "NO DATA")]
    NoData,
}

impl ExecutePhase {
    pub fn label(&self) -> &'static str {
        match self {
            ExecutePhase::ImmediateExecute => "IMMEDIATE EXECUTE",
            ExecutePhase::PreparingExecute => "PREPARING EXECUTE",
            ExecutePhase::DefensiveHold => "DEFENSIVE HOLD",
            ExecutePhase::PositionalSetup => "POSITIONAL SETUP",
            ExecutePhase::NoData => "NO DATA",
        }
    }

    /// Expected time until the execute lands.
    pub fn timing_window(&self) -> &'static str {
        match self {
            ExecutePhase::ImmediateExecute => "0-5s",
            ExecutePhase::PreparingExecute => "5-15s",
            ExecutePhase::DefensiveHold => "20+s",
            ExecutePhase::PositionalSetup => "10-25s",
            ExecutePhase::NoData => "N/A",
        }
    }

    fn confidence(&self) -> f64 {
        match self {
            ExecutePhase::ImmediateExecute => 90.0,
            ExecutePhase::PreparingExecute => 80.0,
            ExecutePhase::DefensiveHold => 75.0,
            ExecutePhase::PositionalSetup => 65.0,
            ExecutePhase::NoData => 0.0,
        }
    }

    fn indicators(&self) -> &'static [&'static str] {
        match self {
            ExecutePhase::ImmediateExecute => &["Multiple players sprinting", "Tight grouping", "Utility likely incoming"],
            ExecutePhase::PreparingExecute => &["Players rotating at speed", "Groups forming"],
            ExecutePhase::DefensiveHold => &["Most players stationary", "Angles being held"],
            ExecutePhase::PositionalSetup => &["Mixed movement", "Information gathering"],
            ExecutePhase::NoData => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTiming {
    pub phase: ExecutePhase,
    pub timing_window: String,
    pub confidence: f64,
    pub high_velocity_players: usize,
    pub low_velocity_players: usize,
    /// Teammate pairs within the coordination radius
    pub coordination_pairs: usize,
    pub indicators: Vec<String>,
}

struct MovementCounts {
    high: usize,
    low: usize,
    coordination: usize,
}

fn immediate(c: &MovementCounts, cfg: &ExecuteThresholds) -> bool {
    c.high > cfg.immediate_high_count && c.coordination > cfg.immediate_coordination
}

fn preparing(c: &MovementCounts, cfg: &ExecuteThresholds) -> bool {
    c.high > cfg.preparing_high_count && c.coordination > cfg.preparing_coordination
}

fn holding(c: &MovementCounts, cfg: &ExecuteThresholds) -> bool {
    c.low > cfg.hold_low_count
}

static EXECUTE_RULES: &[Rule<MovementCounts, ExecuteThresholds, ExecutePhase>] = &[
    Rule { name: "immediate_execute", when: immediate, then: ExecutePhase::ImmediateExecute },
    Rule { name: "preparing_execute", when: preparing, then: ExecutePhase::PreparingExecute },
    Rule { name: "defensive_hold", when: holding, then: ExecutePhase::DefensiveHold },
    Rule { name: "positional_setup", when: always, then: ExecutePhase::PositionalSetup },
];

pub fn predict_execute_timing(view: &SnapshotView<'_>, cfg: &ExecuteThresholds) -> ExecuteTiming {
    let phase_of = |phase: ExecutePhase, counts: &MovementCounts| ExecuteTiming {
        phase,
        timing_window: phase.timing_window().to_string(),
        confidence: phase.confidence(),
        high_velocity_players: counts.high,
        low_velocity_players: counts.low,
        coordination_pairs: counts.coordination,
        indicators: phase.indicators().iter().map(|s| s.to_string()).collect(),
    };

    if view.is_empty() {
        let counts = MovementCounts { high: 0, low: 0, coordination: 0 };
        return phase_of(ExecutePhase::NoData, &counts);
    }

    let mut counts = MovementCounts {
        high: 0,
        low: 0,
        // Each side counted separately: a pair is only "coordinated" if both are teammates
        coordination: pairs_within(&view.t_alive, cfg.coordination_radius)
            + pairs_within(&view.ct_alive, cfg.coordination_radius),
    };
    for player in view.alive_players() {
        let speed = player.planar_speed();
        if speed > cfg.high_velocity {
            counts.high += 1;
        } else if speed < cfg.low_velocity {
            counts.low += 1;
        }
    }

    let phase = first_match(EXECUTE_RULES, &counts, cfg)
        .copied()
        .unwrap_or(ExecutePhase::PositionalSetup);
    phase_of(phase, &counts)
}
