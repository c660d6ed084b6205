//! Progress update (tick step 4): lap-progress integration, lap/sector
//! crossings, fuel burn, and tire aging/wear. Grounded on the donor's
//! `distance_km` / `lap_percentage` integration and its fuel- and
//! tire-wear-rate formulas in `RaceState::update`.

use crate::models::car::Car;
use crate::models::event::{Event, EventPayload, EventType};
use crate::models::track::Track;

use super::commands::Modifiers;

pub const TICK_DT_SECONDS: f32 = 0.1;

pub struct ProgressOutcome {
    pub events: Vec<Event>,
    pub ran_out_of_fuel: bool,
    /// Whether this tick crossed the line and incremented `car.timing.lap`.
    /// Pit service (step 5) is gated on this: a stop only happens on the
    /// tick the car actually completes a lap, i.e. crosses pit entry.
    pub lap_completed: bool,
}

/// Advances one car's lap_progress by its effective pace, crossing sector and
/// lap boundaries as needed, applying fuel burn and tire wear on lap
/// completion. Returns any events raised (FASTEST_LAP, DNF on fuel-out).
pub fn advance_car(
    car: &mut Car,
    track: &Track,
    effective_pace_kph: f32,
    best_lap_time_ms: u32,
    tick: u64,
    modifiers: &Modifiers,
) -> ProgressOutcome {
    let mut events = Vec::new();
    car.telemetry.speed_kph = effective_pace_kph;

    let distance_km = (effective_pace_kph / 3600.0) * TICK_DT_SECONDS;
    let distance_laps = distance_km / track.lap_length_km;
    car.telemetry.lap_progress += distance_laps;
    car.timing.sector = track.sector_for_progress(car.telemetry.lap_progress) as u8;

    let mut ran_out_of_fuel = false;
    let mut lap_completed = false;

    while car.telemetry.lap_progress >= 1.0 {
        car.telemetry.lap_progress -= 1.0;
        car.timing.lap += 1;
        lap_completed = true;

        // Lap time from this lap's average speed at the line; the donor
        // tracked only cumulative distance, so lap time here is derived from
        // the lap-length / effective-pace relationship instead of a stored
        // per-lap clock.
        let lap_time_ms = ((track.lap_length_km / effective_pace_kph) * 3_600_000.0) as u32;
        car.timing.last_lap_time_ms = lap_time_ms;
        if car.timing.best_lap_time_ms == 0 || lap_time_ms < car.timing.best_lap_time_ms {
            car.timing.best_lap_time_ms = lap_time_ms;
            if best_lap_time_ms == 0 || lap_time_ms < best_lap_time_ms {
                events.push(Event::new(
                    tick,
                    car.timing.lap,
                    EventType::FastestLap,
                    format!("{} sets the fastest lap of the race", car.identity.driver_code),
                    EventPayload::FastestLap {
                        driver: car.identity.driver_code.clone(),
                        lap_time_ms,
                    },
                ));
            }
        }

        car.telemetry.fuel_kg = (car.telemetry.fuel_kg - fuel_per_lap(car)).max(0.0);
        if car.telemetry.fuel_kg <= 0.0 {
            ran_out_of_fuel = true;
        }

        car.telemetry.tire.age_laps += 1;
        let push_bonus = matches!(car.strategy.driving_mode, crate::models::car::DrivingMode::Push) as u8 as f32 * 0.25;
        let management_bonus = car.identity.tire_management * 0.3;
        let wear_delta = wear_per_lap(car) * track.abrasion * modifiers.tire_deg * (1.0 + push_bonus) * (1.0 - management_bonus);
        car.telemetry.tire.wear = (car.telemetry.tire.wear + wear_delta).clamp(0.0, 1.0);
    }

    ProgressOutcome { events, ran_out_of_fuel, lap_completed }
}

fn fuel_per_lap(car: &Car) -> f32 {
    1.6 - car.identity.tire_management * 0.2 + (car.strategy.driving_mode == crate::models::car::DrivingMode::Push) as u8 as f32 * 0.2
}

fn wear_per_lap(car: &Car) -> f32 {
    crate::catalogs::compounds::get_compound(car.telemetry.tire.compound).wear_per_lap
}
