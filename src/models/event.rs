use serde::{Deserialize, Serialize};

use crate::models::race_control::RaceControlState;
use crate::models::tire::Compound;

/// A single timestamped occurrence produced by a tick of the engine.
///
/// Events are append-only and chronological; the scheduler trims the oldest
/// entries for transport but never reorders or rewrites what's kept.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Event {
    pub tick: u64,
    pub lap: u32,
    #[serde(rename = "type")]
    pub kind: EventType,
    pub description: String,
    pub payload: EventPayload,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    RaceStart,
    Overtake,
    PitStop,
    SafetyCarDeployed,
    SafetyCarEnding,
    VscDeployed,
    VscEnding,
    RedFlag,
    Dnf,
    FastestLap,
    WeatherChange,
    ModeChange,
    DrsEnabled,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "payload_kind")]
pub enum EventPayload {
    RaceStart {
        laps_total: u32,
    },
    Overtake {
        attacker: String,
        defender: String,
        position: u32,
    },
    PitStop {
        driver: String,
        compound: Compound,
        pit_stops: u32,
    },
    FlagChange {
        from: RaceControlState,
        to: RaceControlState,
    },
    Dnf {
        driver: String,
        reason: String,
    },
    FastestLap {
        driver: String,
        lap_time_ms: u32,
    },
    WeatherChange {
        from: String,
        to: String,
    },
    ModeChange {
        driver: String,
        mode: String,
    },
    DrsEnabled {
        driver: String,
    },
    None,
}

impl Event {
    pub fn new(tick: u64, lap: u32, kind: EventType, description: impl Into<String>, payload: EventPayload) -> Self {
        Event {
            tick,
            lap,
            kind,
            description: description.into(),
            payload,
        }
    }
}
