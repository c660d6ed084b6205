//! Incident rolls (tick step 7). New relative to the donor, which had only a
//! TODO placeholder for failure risk. Grounded on the track's
//! `base_incident` fixture and the compound wear curve already used by
//! `engine::pace`.

use rand::Rng;

use crate::models::car::{Car, CarStatus, DrivingMode};
use crate::models::event::{Event, EventPayload, EventType};
use crate::models::race_control::RaceControlState;
use crate::models::track::Track;
use crate::models::weather::WeatherCondition;

use super::commands::Modifiers;

fn mode_risk(mode: DrivingMode) -> f32 {
    match mode {
        DrivingMode::Push => 1.4,
        DrivingMode::Balanced => 1.0,
        DrivingMode::Conserve => 0.7,
    }
}

fn weather_risk(weather: WeatherCondition) -> f32 {
    match weather {
        WeatherCondition::Dry => 1.0,
        WeatherCondition::Intermediate => 1.6,
        WeatherCondition::Wet => 2.3,
    }
}

pub enum IncidentOutcome {
    Dnf(Event),
    YellowTrigger(Event, bool),
}

/// Rolls for an incident on one car this tick. Returns `None` on no
/// incident; on an incident, either a DNF or a yellow-triggering event
/// (whose `bool` signals whether it's severe enough to auto-deploy the
/// safety car).
pub fn roll(
    car: &Car,
    track: &Track,
    weather: WeatherCondition,
    modifiers: &Modifiers,
    rng: &mut impl Rng,
    tick: u64,
) -> Option<IncidentOutcome> {
    if car.timing.status != CarStatus::Racing {
        return None;
    }
    let wear = car.telemetry.tire.wear;
    let incident_rate = track.base_incident
        * (1.0 + wear * wear)
        * mode_risk(car.strategy.driving_mode)
        * weather_risk(weather)
        * modifiers.sc_probability.max(0.01);

    let roll: f32 = rng.random();
    if roll >= incident_rate {
        return None;
    }

    // Roughly 1 in 6 incidents is severe enough to end the race for that car.
    let severity_roll: f32 = rng.random();
    if severity_roll < 1.0 / 6.0 {
        let event = Event::new(
            tick,
            car.timing.lap,
            EventType::Dnf,
            format!("{} retires from the race", car.identity.driver_code),
            EventPayload::Dnf {
                driver: car.identity.driver_code.clone(),
                reason: "mechanical failure".to_string(),
            },
        );
        Some(IncidentOutcome::Dnf(event))
    } else {
        let auto_sc = severity_roll < 1.0 / 3.0;
        let event = Event::new(
            tick,
            car.timing.lap,
            EventType::SafetyCarDeployed,
            format!("{} has an incident", car.identity.driver_code),
            EventPayload::FlagChange {
                from: RaceControlState::Green,
                to: if auto_sc { RaceControlState::SafetyCar } else { RaceControlState::Yellow },
            },
        );
        Some(IncidentOutcome::YellowTrigger(event, auto_sc))
    }
}
