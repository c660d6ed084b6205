use serde::{Deserialize, Serialize};

use crate::models::race_control::RaceControlState;
use crate::models::weather::WeatherCondition;

/// A single per-driver command, queued by the scheduler and consumed during
/// step 1 (command ingestion) of the next tick.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommandKind {
    BoxThisLap,
    Push,
    Conserve,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DriverCommand {
    pub driver_code: String,
    pub kind: DriverCommandKind,
}

/// A race-director injection, queued by the scheduler (or scripted by a
/// scenario's event prescripts) and consumed during step 2.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub enum DirectorCommand {
    SetFlag(RaceControlState),
    ForceWeather(WeatherCondition),
}

/// Macro modifiers threaded through pace, incident, and tire-deg
/// computations. These are tick inputs, never state mutations — the
/// predictor's ensemble members vary these instead of the baseline state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Modifiers {
    pub aggression: f32,
    pub sc_probability: f32,
    pub tire_deg: f32,
}

impl Default for Modifiers {
    fn default() -> Self {
        Modifiers {
            aggression: 1.0,
            sc_probability: 1.0,
            tire_deg: 1.0,
        }
    }
}

/// Everything fed into a single `tick` call beyond the state and RNG.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub driver_commands: Vec<DriverCommand>,
    pub director_commands: Vec<DirectorCommand>,
    pub modifiers: Modifiers,
}
