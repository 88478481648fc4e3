//! # Momentum Tracker
//!
//! Velocity-based momentum per side and how contested the space between the
//! two team centers is.
//!
//! Momentum and team centers use every listed sample of a side, dead
//! players included, unlike the alive-only analyzers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::{centroid, mean_speed};
use crate::config::MomentumThresholds;
use crate::models::SnapshotView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum MomentumLeader {
    #[serde(rename = "T")]
    T,
    #[serde(rename = "CT")]
    Ct,
    #[serde(rename = "EVEN")]
    Even,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MomentumAnalysis {
    pub t_momentum: f64,
    pub ct_momentum: f64,
    /// `t / ct`, 0 when CT momentum is 0
    pub momentum_ratio: f64,
    /// 0-100, high when the team centers are close
    pub contested_level: f64,
    pub leader: MomentumLeader,
}

pub fn track_momentum(view: &SnapshotView<'_>, cfg: &MomentumThresholds) -> MomentumAnalysis {
    let t_momentum = mean_speed(&view.t_all);
    let ct_momentum = mean_speed(&view.ct_all);

    let momentum_ratio = if ct_momentum == 0.0 {
        0.0
    } else {
        t_momentum / ct_momentum
    };

    let contested_level = match (centroid(&view.t_all), centroid(&view.ct_all)) {
        (Some(t), Some(ct)) => {
            (100.0 - (t - ct).norm() / cfg.contest_distance_divisor).clamp(0.0, 100.0)
        }
        _ => 0.0,
    };

    let leader = if t_momentum > ct_momentum {
        MomentumLeader::T
    } else if ct_momentum > t_momentum {
        MomentumLeader::Ct
    } else {
        MomentumLeader::Even
    };

    MomentumAnalysis {
        t_momentum,
        ct_momentum,
        momentum_ratio,
        contested_level,
        leader,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::moving;
    use crate::models::Side;

    #[test]
    fn test_empty_snapshot() {
        let view = SnapshotView::new(&[], 0.0);
        let result = track_momentum(&view, &MomentumThresholds::default());
        assert_eq!(result.t_momentum, 0.0);
        assert_eq!(result.momentum_ratio, 0.0);
        assert_eq!(result.contested_level, 0.0);
        assert_eq!(result.leader, MomentumLeader::Even);
    }

    #[test]
    fn test_dead_players_count_toward_momentum() {
        let samples = vec![
            moving(Side::T, 100.0, 0.0, 0.0, 30.0, 40.0),
            moving(Side::T, 0.0, 0.0, 0.0, 0.0, 150.0),
            moving(Side::Ct, 100.0, 1000.0, 0.0, 50.0, 0.0),
        ];
        let view = SnapshotView::new(&samples, 0.0);
        let result = track_momentum(&view, &MomentumThresholds::default());
        assert_eq!(result.t_momentum, 100.0);
        assert_eq!(result.ct_momentum, 50.0);
        assert_eq!(result.momentum_ratio, 2.0);
        assert_eq!(result.leader, MomentumLeader::T);
        // centers 1000 apart -> 100 - 20
        assert!((result.contested_level - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_far_centers_floor_at_zero() {
        let samples = vec![
            moving(Side::T, 100.0, 0.0, 0.0, 0.0, 0.0),
            moving(Side::Ct, 100.0, 8000.0, 0.0, 10.0, 0.0),
        ];
        let view = SnapshotView::new(&samples, 0.0);
        let result = track_momentum(&view, &MomentumThresholds::default());
        assert_eq!(result.contested_level, 0.0);
        assert_eq!(result.momentum_ratio, 0.0);
        assert_eq!(result.leader, MomentumLeader::Ct);
    }
}
