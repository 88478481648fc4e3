use nalgebra::Vector2;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Team affiliation for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    /// Attacking side
    #[serde(rename = "T")]
    T,
    /// Defending side
    #[serde(rename = "CT")]
    Ct,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::T => "T",
            Side::Ct => "CT",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::T => Side::Ct,
            Side::Ct => Side::T,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// World-space vector in map units (positions) or units per tick (velocities).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane projection; height is ignored by every analyzer.
    pub fn planar(&self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }
}

/// One player at one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPositionSample {
    pub side: Side,
    /// 0-100, clamped by the producer
    pub health: f64,
    /// 0-100, clamped by the producer
    #[serde(default)]
    pub armor: f64,
    pub position: Vec3,
    #[serde(default)]
    pub velocity: Vec3,
    #[serde(default)]
    pub flash_duration: f64,
    #[serde(default)]
    pub tick: u64,
    #[serde(default)]
    pub round_number: u32,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub player_name: String,
}

impl PlayerPositionSample {
    pub fn is_alive(&self, alive_health_min: f64) -> bool {
        self.health > alive_health_min
    }

    pub fn planar_position(&self) -> Vector2<f64> {
        self.position.planar()
    }

    /// `√(vx² + vy²)`
    pub fn planar_speed(&self) -> f64 {
        self.velocity.planar().norm()
    }
}

/// The samples analyzed in one engine call.
pub type Snapshot = Vec<PlayerPositionSample>;
