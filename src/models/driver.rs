use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivingStyle {
    Relax,
    Normal,
    Aggressive,
}

/// Identity and ability profile for a driver. Values are 0.0 to 1.0 unless
/// noted otherwise. Catalogs are embedded static fixtures, so drivers no
/// longer carry a database-optional `uid` — every driver in a grid exists.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Driver {
    pub id: u32,
    pub name: String,
    pub skill_level: f32,
    pub stamina: f32,
    pub weather_tolerance: f32,
    pub experience: f32,
    pub consistency: f32,
    pub focus: f32,
    pub stress_level: f32,
    /// How willing the driver is to attempt overtakes under marginal gaps.
    pub aggression: f32,
    /// How gently the driver conserves tire life under racing conditions.
    pub tire_management: f32,
    /// Pace retained in wet conditions relative to dry, >1.0 is a wet specialist.
    pub wet_multiplier: f32,
    /// Per-track affinity bonus, looked up by track id; 0.0 if absent.
    pub track_affinity: f32,
}

impl Driver {
    pub fn stress_delta(&self, style: DrivingStyle, tick_duration_seconds: f32) -> f32 {
        match style {
            DrivingStyle::Aggressive => 0.03 * (1.0 - self.focus) * tick_duration_seconds,
            DrivingStyle::Normal => -0.005 * self.focus * tick_duration_seconds,
            DrivingStyle::Relax => -0.015 * self.focus * tick_duration_seconds,
        }
    }
}
