//! # Team Aggregate
//!
//! Per-side summary over alive players, recomputed on every call.

use nalgebra::Vector2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::spatial::{centroid, mean_speed, spread, Point2};
use crate::models::{Side, SnapshotView};

/// Alive-player statistics for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamAggregate {
    /// `None` when the side has no alive players
    pub centroid: Option<Point2>,
    pub spread: f64,
    pub alive_count: usize,
    /// 0 when the side has no alive players
    pub avg_health: f64,
    pub avg_velocity_magnitude: f64,
}

impl TeamAggregate {
    pub fn from_view(view: &SnapshotView<'_>, side: Side) -> Self {
        let alive = view.alive(side);
        let center = centroid(alive);
        let avg_health = if alive.is_empty() {
            0.0
        } else {
            alive.iter().map(|s| s.health).sum::<f64>() / alive.len() as f64
        };

        TeamAggregate {
            centroid: center.map(Point2::from),
            spread: center.map(|c| spread(alive, &c)).unwrap_or(0.0),
            alive_count: alive.len(),
            avg_health,
            avg_velocity_magnitude: mean_speed(alive),
        }
    }

    pub fn centroid_vector(&self) -> Option<Vector2<f64>> {
        self.centroid.map(|p| Vector2::new(p.x, p.y))
    }
}

/// Both sides' aggregates, computed together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamAggregates {
    pub t: TeamAggregate,
    pub ct: TeamAggregate,
}

impl TeamAggregates {
    pub fn from_view(view: &SnapshotView<'_>) -> Self {
        Self {
            t: TeamAggregate::from_view(view, Side::T),
            ct: TeamAggregate::from_view(view, Side::Ct),
        }
    }

    pub fn side(&self, side: Side) -> &TeamAggregate {
        match side {
            Side::T => &self.t,
            Side::Ct => &self.ct,
        }
    }
}
