use serde::{Deserialize, Serialize};

use crate::models::driver::Driver;
use crate::models::tire::{ClientTireData, TireState};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrivingMode {
    Push,
    Balanced,
    Conserve,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveCommand {
    None,
    BoxThisLap,
    Push,
    Conserve,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStatus {
    Racing,
    InPit,
    Pitted,
    Dnf,
}

/// Immutable-for-the-race identity and ability profile.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Identity {
    pub driver_code: String,
    pub team: String,
    pub base_skill: f32,
    pub aggression: f32,
    pub tire_management: f32,
    pub wet_multiplier: f32,
    pub track_affinity: f32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Telemetry {
    pub speed_kph: f32,
    pub fuel_kg: f32,
    pub lap_progress: f32,
    pub tire: TireState,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Systems {
    pub drs_active: bool,
    pub ers_battery: f32,
    pub ers_deployed: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Strategy {
    pub driving_mode: DrivingMode,
    pub active_command: ActiveCommand,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct Timing {
    pub position: u32,
    pub lap: u32,
    pub sector: u8,
    pub last_lap_time_ms: u32,
    pub best_lap_time_ms: u32,
    pub pit_stops: u32,
    pub status: CarStatus,
    pub gap_to_leader_ms: u32,
    pub interval_to_ahead_ms: u32,
    pub in_pit_lane: bool,
    /// Ticks remaining before a car suspended in the pit lane rejoins.
    pub pit_ticks_remaining: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Car {
    pub identity: Identity,
    pub telemetry: Telemetry,
    pub systems: Systems,
    pub strategy: Strategy,
    pub timing: Timing,
}

impl Car {
    pub fn is_dnf(&self) -> bool {
        self.timing.status == CarStatus::Dnf
    }

    pub fn is_on_track(&self) -> bool {
        matches!(self.timing.status, CarStatus::Racing)
    }

    /// Grip/pace penalty purely from how worn the current tire is, scaled by
    /// the compound's own wear curve applied upstream in engine::pace.
    pub fn tire_wear_factor(&self) -> f32 {
        self.telemetry.tire.wear_factor()
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CarClientData {
    pub driver_code: String,
    pub driver_name: String,
    pub team: String,
    pub position: u32,
    pub lap: u32,
    pub lap_progress: f32,
    pub status: CarStatus,
    pub tire: ClientTireData,
    pub fuel_kg: f32,
    pub speed_kph: f32,
    pub gap_to_leader_ms: u32,
    pub interval_to_ahead_ms: u32,
    pub pit_stops: u32,
}

impl CarClientData {
    pub fn new(car: &Car, driver: &Driver) -> Self {
        CarClientData {
            driver_code: car.identity.driver_code.clone(),
            driver_name: driver.name.clone(),
            team: car.identity.team.clone(),
            position: car.timing.position,
            lap: car.timing.lap,
            lap_progress: car.telemetry.lap_progress,
            status: car.timing.status,
            tire: car.telemetry.tire.into(),
            fuel_kg: car.telemetry.fuel_kg,
            speed_kph: car.telemetry.speed_kph,
            gap_to_leader_ms: car.timing.gap_to_leader_ms,
            interval_to_ahead_ms: car.timing.interval_to_ahead_ms,
            pit_stops: car.timing.pit_stops,
        }
    }
}
