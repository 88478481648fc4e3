//! # Map Control Estimator
//!
//! Territorial share from alive-player coverage plus a count of close
//! opposing pairs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::rules::{always, first_match, Rule};
use crate::config::MapControlThresholds;
use crate::models::SnapshotView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MapControlStatus {
    #[serde(rename = "T-DOMINANCE")]
    TDominance,
    #[serde(rename = "CT-DOMINANCE")]
    CtDominance,
    #[serde(rename = "CONTESTED")]
    Contested,
    #[serde(rename = "BALANCED")]
    Balanced,
    #[serde(rename = "NO DATA")]
    NoData,
}

impl MapControlStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MapControlStatus::TDominance => "T-DOMINANCE",
            MapControlStatus::CtDominance => "CT-DOMINANCE",
            MapControlStatus::Contested => "CONTESTED",
            MapControlStatus::Balanced => "BALANCED",
            MapControlStatus::NoData => "NO DATA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapControlAnalysis {
    pub status: MapControlStatus,
    /// Percent, sums to 100 with `ct_control`
    pub t_control: f64,
    pub ct_control: f64,
    pub t_coverage: f64,
    pub ct_coverage: f64,
    pub contested_areas: usize,
}

impl MapControlAnalysis {
    fn no_data() -> Self {
        Self {
            status: MapControlStatus::NoData,
            t_control: 50.0,
            ct_control: 50.0,
            t_coverage: 0.0,
            ct_coverage: 0.0,
            contested_areas: 0,
        }
    }
}

struct ControlInput {
    t_control: f64,
    ct_control: f64,
    contested_areas: usize,
}

fn t_dominates(i: &ControlInput, cfg: &MapControlThresholds) -> bool {
    i.t_control > cfg.dominance_pct
}

fn ct_dominates(i: &ControlInput, cfg: &MapControlThresholds) -> bool {
    i.ct_control > cfg.dominance_pct
}

fn contested(i: &ControlInput, cfg: &MapControlThresholds) -> bool {
    i.contested_areas > cfg.contested_areas_min
}

static CONTROL_RULES: &[Rule<ControlInput, MapControlThresholds, MapControlStatus>] = &[
    Rule { name: "t_dominance", when: t_dominates, then: MapControlStatus::TDominance },
    Rule { name: "ct_dominance", when: ct_dominates, then: MapControlStatus::CtDominance },
    Rule { name: "contested", when: contested, then: MapControlStatus::Contested },
    Rule { name: "balanced", when: always, then: MapControlStatus::Balanced },
];

/// Count of (T-alive, CT-alive) pairs closer than the contested distance.
pub fn contested_areas(view: &SnapshotView<'_>, cfg: &MapControlThresholds) -> usize {
    let mut count = 0;
    for t in &view.t_alive {
        for ct in &view.ct_alive {
            if (t.planar_position() - ct.planar_position()).norm() < cfg.contested_distance {
                count += 1;
            }
        }
    }
    count
}

pub fn estimate_map_control(view: &SnapshotView<'_>, cfg: &MapControlThresholds) -> MapControlAnalysis {
    if view.is_empty() {
        return MapControlAnalysis::no_data();
    }

    let t_coverage = view.t_alive.len() as f64 * cfg.control_radius;
    let ct_coverage = view.ct_alive.len() as f64 * cfg.control_radius;
    let total = t_coverage + ct_coverage;
    let t_control = if total > 0.0 {
        t_coverage / total * 100.0
    } else {
        50.0
    };
    let ct_control = 100.0 - t_control;

    let input = ControlInput {
        t_control,
        ct_control,
        contested_areas: contested_areas(view, cfg),
    };
    let status = first_match(CONTROL_RULES, &input, cfg)
        .copied()
        .unwrap_or(MapControlStatus::Balanced);

    MapControlAnalysis {
        status,
        t_control,
        ct_control,
        t_coverage,
        ct_coverage,
        contested_areas: input.contested_areas,
    }
}
