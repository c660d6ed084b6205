use serde::{Deserialize, Serialize};

use crate::models::car::Car;
use crate::models::event::Event;
use crate::models::race_control::RaceControlState;
use crate::models::weather::Weather;

pub const SCHEMA_VERSION: u32 = 1;
pub const TICK_DURATION_MS: u64 = 100;
pub const MAX_EVENTS_RETAINED: usize = 256;

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct RaceMeta {
    pub seed: u64,
    pub tick: u64,
    pub sim_time_ms: u64,
    pub laps_total: u32,
}

/// The single world snapshot at a given tick: the entire mutable state the
/// engine's `tick` function reads and returns. Cars are stored in a `Vec`
/// sorted by race position rather than the donor's `HashMap<u32, Car>` keyed
/// by car number, since classification re-sorts by position every tick and
/// a map keyed on a different field fights that.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RaceState {
    pub schema_version: u32,
    pub meta: RaceMeta,
    pub track_id: String,
    pub weather: Weather,
    pub race_control: RaceControlState,
    pub cars: Vec<Car>,
    pub events: Vec<Event>,
    pub is_finished: bool,
    /// Running totals surviving event trimming, per the engine's event
    /// trimming step: aggregate counts don't depend on untrimmed history.
    pub total_overtakes: u32,
    pub total_pit_stops: u32,
}

impl RaceState {
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
        if self.events.len() > MAX_EVENTS_RETAINED {
            let excess = self.events.len() - MAX_EVENTS_RETAINED;
            self.events.drain(0..excess);
        }
    }

    pub fn car_by_driver_code(&self, code: &str) -> Option<&Car> {
        self.cars.iter().find(|c| c.identity.driver_code == code)
    }

    pub fn car_by_driver_code_mut(&mut self, code: &str) -> Option<&mut Car> {
        self.cars.iter_mut().find(|c| c.identity.driver_code == code)
    }

    pub fn leader(&self) -> Option<&Car> {
        self.cars.iter().find(|c| c.timing.position == 1)
    }
}
