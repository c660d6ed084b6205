//! Pit-stop service (tick step 5). Grounded on the donor's `ai_pit_decision`
//! and the pit-entry handling in `RaceState::update`, replacing the donor's
//! continuous wetness-threshold AI with a command-armed stop plus a
//! strategic compound rule keyed on laps remaining.

use crate::catalogs::compounds::shortest_viable_dry_compound;
use crate::models::car::{ActiveCommand, Car, CarStatus};
use crate::models::event::{Event, EventPayload, EventType};
use crate::models::tire::{Compound, TireState};
use crate::models::track::Track;
use crate::models::weather::WeatherCondition;

/// Chooses the compound a pitting car should fit: wet-weather compounds when
/// the track demands it, otherwise the shortest dry compound that can
/// plausibly cover the remaining laps without feeling slow late in a stint.
pub fn strategic_compound(weather: WeatherCondition, laps_remaining: u32) -> Compound {
    match weather {
        WeatherCondition::Wet => Compound::Wet,
        WeatherCondition::Intermediate => Compound::Intermediate,
        WeatherCondition::Dry => {
            if laps_remaining > 25 {
                Compound::Hard
            } else if laps_remaining > 12 {
                Compound::Medium
            } else {
                shortest_viable_dry_compound()
            }
        }
    }
}

/// Services a car that just crossed the line with BOX_THIS_LAP armed.
/// Returns the PIT_STOP event if a stop was performed this call.
pub fn maybe_service(
    car: &mut Car,
    track: &Track,
    weather: WeatherCondition,
    laps_total: u32,
    tick: u64,
) -> Option<Event> {
    if car.strategy.active_command != ActiveCommand::BoxThisLap {
        return None;
    }
    if car.timing.status != CarStatus::Racing {
        return None;
    }

    let laps_remaining = laps_total.saturating_sub(car.timing.lap);
    let compound = strategic_compound(weather, laps_remaining);

    car.timing.status = CarStatus::InPit;
    car.timing.in_pit_lane = true;
    car.telemetry.tire = TireState::fresh(compound);
    car.timing.pit_stops += 1;
    car.strategy.active_command = ActiveCommand::None;
    car.timing.pit_ticks_remaining = (track.pit_loss * 10.0) as u32;

    Some(Event::new(
        tick,
        car.timing.lap,
        EventType::PitStop,
        format!("{} pits for {:?} tires", car.identity.driver_code, compound),
        EventPayload::PitStop {
            driver: car.identity.driver_code.clone(),
            compound,
            pit_stops: car.timing.pit_stops,
        },
    ))
}

/// Advances a car already suspended in the pit lane by one tick, releasing
/// it back to racing once `pit_ticks_remaining` reaches zero.
pub fn tick_in_pit(car: &mut Car) {
    if car.timing.pit_ticks_remaining > 0 {
        car.timing.pit_ticks_remaining -= 1;
    }
    if car.timing.pit_ticks_remaining == 0 {
        car.timing.status = CarStatus::Racing;
        car.timing.in_pit_lane = false;
    }
}
