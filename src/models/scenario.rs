use serde::{Deserialize, Serialize};

use crate::models::car::DrivingMode;
use crate::models::weather::WeatherCondition;

/// One entry on the starting grid: which driver is in which car, aligned by
/// starting position.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridSlot {
    pub starting_position: u32,
    pub driver_id: u32,
    pub team: String,
}

/// A director event scripted to fire at a specific lap, used to give
/// scenarios a bit of scripted drama (a VSC on lap 10, rain at lap 20, etc).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EventPrescript {
    pub lap: u32,
    pub description: String,
    pub force_weather: Option<WeatherCondition>,
    pub force_mode: Option<DrivingMode>,
}

/// Read-only catalog record describing one race to run: track, grid, laps,
/// weather baseline, and any scripted director events.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub track_id: String,
    pub laps: u32,
    pub grid: Vec<GridSlot>,
    pub weather_baseline: WeatherCondition,
    pub prescripts: Vec<EventPrescript>,
}

#[derive(Serialize, Debug, Clone)]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub track_id: String,
    pub laps: u32,
}

impl From<&Scenario> for ScenarioSummary {
    fn from(s: &Scenario) -> Self {
        ScenarioSummary {
            id: s.id.clone(),
            name: s.name.clone(),
            track_id: s.track_id.clone(),
            laps: s.laps,
        }
    }
}
