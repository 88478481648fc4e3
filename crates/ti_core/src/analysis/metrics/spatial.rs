//! # Spatial Aggregates
//!
//! Order-independent planar statistics over a set of player samples.
//! Everything else in the engine is built on these three primitives.

use nalgebra::Vector2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::SpatialThresholds;
use crate::models::PlayerPositionSample;

/// Serializable planar point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl From<Vector2<f64>> for Point2 {
    fn from(v: Vector2<f64>) -> Self {
        Point2 { x: v.x, y: v.y }
    }
}

/// Mean `(x, y)` of the samples.
///
/// # Returns
/// * `None` - If `samples` is empty; the caller picks the fallback
pub fn centroid(samples: &[&PlayerPositionSample]) -> Option<Vector2<f64>> {
    if samples.is_empty() {
        return None;
    }
    let sum = samples
        .iter()
        .fold(Vector2::zeros(), |acc, s| acc + s.planar_position());
    Some(sum / samples.len() as f64)
}

/// Root-mean-square distance of the samples from `center`.
///
/// 0 for one sample or none.
pub fn spread(samples: &[&PlayerPositionSample], center: &Vector2<f64>) -> f64 {
    if samples.len() <= 1 {
        return 0.0;
    }
    let sum_sq: f64 = samples
        .iter()
        .map(|s| (s.planar_position() - center).norm_squared())
        .sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// RMS spread around the samples' own centroid.
pub fn self_spread(samples: &[&PlayerPositionSample]) -> f64 {
    match centroid(samples) {
        Some(center) => spread(samples, &center),
        None => 0.0,
    }
}

/// Pairwise proximity score in [0, 100].
///
/// Averages `max(0, 100 - distance / falloff)` over every unordered pair.
/// A lone player (or none) has nobody to disagree with and scores 100.
pub fn coordination_index(samples: &[&PlayerPositionSample], cfg: &SpatialThresholds) -> f64 {
    if samples.len() < 2 {
        return 100.0;
    }

    let mut total = 0.0;
    let mut pairs = 0usize;
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            let distance = (a.planar_position() - b.planar_position()).norm();
            total += (100.0 - distance / cfg.coordination_falloff).max(0.0);
            pairs += 1;
        }
    }

    total / pairs as f64
}

/// Number of unordered pairs closer than `radius`.
pub fn pairs_within(samples: &[&PlayerPositionSample], radius: f64) -> usize {
    let mut count = 0;
    for (i, a) in samples.iter().enumerate() {
        for b in &samples[i + 1..] {
            if (a.planar_position() - b.planar_position()).norm() < radius {
                count += 1;
            }
        }
    }
    count
}

/// Mean planar speed; 0 for no samples.
pub fn mean_speed(samples: &[&PlayerPositionSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|s| s.planar_speed()).sum::<f64>() / samples.len() as f64
}
