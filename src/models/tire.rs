use serde::{Deserialize, Serialize};

/// Catalog record for a tire compound: how much pace it offers when fresh
/// and how quickly that pace bleeds away with age.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compound {
    Soft,
    Medium,
    Hard,
    Intermediate,
    Wet,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct CompoundSpec {
    pub compound: Compound,
    /// Multiplier applied to max speed when the tire is fresh (age 0).
    pub pace_factor: f32,
    /// Wear accumulated per lap at full pace, 0.0 to 1.0 scale.
    pub wear_per_lap: f32,
    /// Whether this compound is legal to run in wet conditions.
    pub wet_weather: bool,
}

impl CompoundSpec {
    pub const fn new(compound: Compound, pace_factor: f32, wear_per_lap: f32, wet_weather: bool) -> Self {
        CompoundSpec {
            compound,
            pace_factor,
            wear_per_lap,
            wet_weather,
        }
    }
}

/// A car's current tire state: which compound is fitted, how old it is, and
/// how worn it has become. `wear` lives on a 0.0 (fresh) to 1.0 (fully
/// degraded) scale, unlike the donor's 0-100 percentage convention.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct TireState {
    pub compound: Compound,
    pub age_laps: u32,
    pub wear: f32,
}

impl TireState {
    pub fn fresh(compound: Compound) -> Self {
        TireState {
            compound,
            age_laps: 0,
            wear: 0.0,
        }
    }

    /// Grip multiplier from wear alone: 1.0 fresh, floors out at 0.4 fully worn.
    pub fn wear_factor(&self) -> f32 {
        1.0 - self.wear.clamp(0.0, 1.0) * 0.6
    }
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct ClientTireData {
    pub compound: Compound,
    pub age_laps: u32,
    pub wear: f32,
}

impl From<TireState> for ClientTireData {
    fn from(t: TireState) -> Self {
        ClientTireData {
            compound: t.compound,
            age_laps: t.age_laps,
            wear: t.wear,
        }
    }
}
