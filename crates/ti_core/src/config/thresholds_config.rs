//! Threshold groups, one per analyzer.
//!
//! Every distance is in map units and every speed in units per tick.
//! Defaults reproduce the contractual cutoffs; changing them changes the
//! classification output, so overrides belong in an explicit config file.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Shared spatial primitives.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SpatialThresholds {
    /// A sample counts as alive when `health > alive_health_min`
    #[validate(range(min = 0.0, max = 100.0))]
    pub alive_health_min: f64,
    /// Coordination index loses one point per `coordination_falloff` units of pair distance
    #[validate(range(min = 0.001))]
    pub coordination_falloff: f64,
}

impl Default for SpatialThresholds {
    fn default() -> Self {
        Self {
            alive_health_min: 0.0,
            coordination_falloff: 10.0,
        }
    }
}

/// Formation spread bands.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_formation_bands"))]
pub struct FormationThresholds {
    /// Spread below this is a tight stack
    #[validate(range(min = 0.0))]
    pub tight_spread_max: f64,
    /// Spread below this (and above tight) is a loose formation
    #[validate(range(min = 0.0))]
    pub loose_spread_max: f64,
    /// Cohesion loses one point per `cohesion_divisor` units of spread
    #[validate(range(min = 0.001))]
    pub cohesion_divisor: f64,
}

impl Default for FormationThresholds {
    fn default() -> Self {
        Self {
            tight_spread_max: 300.0,
            loose_spread_max: 600.0,
            cohesion_divisor: 10.0,
        }
    }
}

fn validate_formation_bands(cfg: &FormationThresholds) -> Result<(), ValidationError> {
    if cfg.tight_spread_max >= cfg.loose_spread_max {
        return Err(ValidationError::new("tight_spread_max_not_below_loose"));
    }
    Ok(())
}

/// Territorial control.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MapControlThresholds {
    /// Territory credited to each alive player (tunable, not derived from map geometry)
    #[validate(range(min = 0.0))]
    pub control_radius: f64,
    /// Opposing pairs closer than this count as a contested area
    #[validate(range(min = 0.0))]
    pub contested_distance: f64,
    /// Control share (percent) above which a side dominates
    #[validate(range(min = 50.0, max = 100.0))]
    pub dominance_pct: f64,
    /// More contested areas than this marks the map as contested
    pub contested_areas_min: usize,
}

impl Default for MapControlThresholds {
    fn default() -> Self {
        Self {
            control_radius: 400.0,
            contested_distance: 800.0,
            dominance_pct: 70.0,
            contested_areas_min: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MomentumThresholds {
    /// Contest level loses one point per `contest_distance_divisor` units between team centers
    #[validate(range(min = 0.001))]
    pub contest_distance_divisor: f64,
}

impl Default for MomentumThresholds {
    fn default() -> Self {
        Self {
            contest_distance_divisor: 50.0,
        }
    }
}

/// Alive-count/health composite.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_advantage_margins"))]
pub struct AdvantageThresholds {
    pub alive_weight: f64,
    pub health_weight: f64,
    #[validate(range(min = 0.0))]
    pub strong_margin: f64,
    #[validate(range(min = 0.0))]
    pub slight_margin: f64,
}

impl Default for AdvantageThresholds {
    fn default() -> Self {
        Self {
            alive_weight: 25.0,
            health_weight: 0.6,
            strong_margin: 40.0,
            slight_margin: 15.0,
        }
    }
}

fn validate_advantage_margins(cfg: &AdvantageThresholds) -> Result<(), ValidationError> {
    if cfg.slight_margin > cfg.strong_margin {
        return Err(ValidationError::new("slight_margin_above_strong"));
    }
    Ok(())
}

/// Execute timing bands.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ExecuteThresholds {
    /// Speed above which an alive player is moving fast
    #[validate(range(min = 0.0))]
    pub high_velocity: f64,
    /// Speed below which an alive player is holding
    #[validate(range(min = 0.0))]
    pub low_velocity: f64,
    /// Teammates within this distance count toward coordination
    #[validate(range(min = 0.0))]
    pub coordination_radius: f64,
    pub immediate_high_count: usize,
    pub immediate_coordination: usize,
    pub preparing_high_count: usize,
    pub preparing_coordination: usize,
    pub hold_low_count: usize,
}

impl Default for ExecuteThresholds {
    fn default() -> Self {
        Self {
            high_velocity: 150.0,
            low_velocity: 50.0,
            coordination_radius: 500.0,
            immediate_high_count: 4,
            immediate_coordination: 12,
            preparing_high_count: 2,
            preparing_coordination: 8,
            hold_low_count: 6,
        }
    }
}

/// Information-control balance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct InformationThresholds {
    /// Position score credited per alive player
    pub alive_weight: f64,
    /// Position-score lead needed to claim the information advantage
    #[validate(range(min = 0.0))]
    pub margin: f64,
    /// Reported score for the side holding the advantage
    #[validate(range(min = 0.0, max = 100.0))]
    pub advantage_score: f64,
    /// Reported score when neither side leads
    #[validate(range(min = 0.0, max = 100.0))]
    pub neutral_score: f64,
}

impl Default for InformationThresholds {
    fn default() -> Self {
        Self {
            alive_weight: 100.0,
            margin: 300.0,
            advantage_score: 75.0,
            neutral_score: 50.0,
        }
    }
}

/// Movement pattern bands and anomaly triggers (percentages are 0-100).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PatternThresholds {
    /// Speed above which an alive player counts toward movement activity
    #[validate(range(min = 0.0))]
    pub high_movement_speed: f64,
    pub aggressive_activity: f64,
    pub aggressive_coordination: f64,
    pub tactical_coordination: f64,
    pub defensive_activity: f64,
    pub universal_mobility_activity: f64,
    pub coordination_floor: f64,
    pub chaotic_activity: f64,
    pub chaotic_coordination: f64,
}

impl Default for PatternThresholds {
    fn default() -> Self {
        Self {
            high_movement_speed: 200.0,
            aggressive_activity: 60.0,
            aggressive_coordination: 70.0,
            tactical_coordination: 60.0,
            defensive_activity: 30.0,
            universal_mobility_activity: 90.0,
            coordination_floor: 10.0,
            chaotic_activity: 70.0,
            chaotic_coordination: 40.0,
        }
    }
}

/// Round outcome composite.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_outcome_bands"))]
pub struct OutcomeThresholds {
    pub alive_weight: f64,
    pub health_weight: f64,
    pub mobility_weight: f64,
    pub coordination_weight: f64,
    /// Overall coordination at which the coordination term is zero
    pub coordination_baseline: f64,
    #[validate(range(min = 0.0))]
    pub victory_margin: f64,
    #[validate(range(min = 0.0))]
    pub overtime_margin: f64,
    /// |composite| below this raises overtime probability to `overtime_prob_close`
    #[validate(range(min = 0.0))]
    pub overtime_prob_margin: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub overtime_prob_close: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub overtime_prob_default: f64,
    #[validate(range(min = 0.0, max = 50.0))]
    pub win_prob_floor: f64,
}

impl Default for OutcomeThresholds {
    fn default() -> Self {
        Self {
            alive_weight: 15.0,
            health_weight: 0.4,
            mobility_weight: 0.1,
            coordination_weight: 0.3,
            coordination_baseline: 50.0,
            victory_margin: 40.0,
            overtime_margin: 15.0,
            overtime_prob_margin: 20.0,
            overtime_prob_close: 15.0,
            overtime_prob_default: 5.0,
            win_prob_floor: 5.0,
        }
    }
}

fn validate_outcome_bands(cfg: &OutcomeThresholds) -> Result<(), ValidationError> {
    if cfg.overtime_margin > cfg.victory_margin {
        return Err(ValidationError::new("overtime_margin_above_victory"));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct StrategyThresholds {
    /// Outcome confidence at which an alive-count lead is acted on
    #[validate(range(min = 0.0, max = 100.0))]
    pub decisive_confidence: f64,
}

impl Default for StrategyThresholds {
    fn default() -> Self {
        Self {
            decisive_confidence: 80.0,
        }
    }
}

/// Worker thread settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct WorkerConfig {
    /// Snapshots above this sample count are rejected before analysis
    #[validate(range(min = 1))]
    pub max_snapshot_samples: usize,
    #[validate(length(min = 1))]
    pub thread_name: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            max_snapshot_samples: 50_000,
            thread_name: "ti-analysis-worker".to_string(),
        }
    }
}
