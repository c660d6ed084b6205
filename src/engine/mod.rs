//! The pure tick function and its supporting steps. Grounded throughout on
//! the donor's `RaceState::update` in `models/race.rs`, generalized from a
//! single-pass distance/speed integrator into the ten-step algorithm this
//! simulation's strategy, flags, and probabilistic layers need.

pub mod classification;
pub mod commands;
pub mod director;
pub mod error;
pub mod incidents;
pub mod overtake;
pub mod pace;
pub mod pit;
pub mod progress;
pub mod rng;
pub mod weather_drift;

use rand::Rng;

use crate::catalogs;
use crate::models::car::{ActiveCommand, Car, CarStatus, DrivingMode, Identity, Strategy, Systems, Telemetry, Timing};
use crate::models::driver::Driver;
use crate::models::event::{Event, EventPayload, EventType};
use crate::models::race_control::RaceControlState;
use crate::models::scenario::Scenario;
use crate::models::state::{RaceMeta, RaceState, MAX_EVENTS_RETAINED, SCHEMA_VERSION};
use crate::models::tire::{Compound, TireState};
use crate::models::track::Track;
use crate::models::weather::Weather;

use commands::{Controls, DriverCommandKind};
use director::DirectorState;
use error::EngineError;

/// Builds the initial RaceState for a scenario, drawing from the track and
/// driver catalogs. This is the engine's only catalog-reading entry point;
/// after construction, a RaceState is self-contained.
pub fn init_state(scenario: &Scenario, seed: u64) -> Result<RaceState, EngineError> {
    let track = catalogs::get_track(&scenario.track_id).ok_or_else(|| EngineError::UnknownTrack(scenario.track_id.clone()))?;

    let mut cars = Vec::with_capacity(scenario.grid.len());
    for slot in &scenario.grid {
        let driver: Driver = catalogs::get_driver(slot.driver_id).ok_or_else(|| EngineError::UnknownDriver(slot.driver_id.to_string()))?;
        let code = catalogs::driver_code(slot.driver_id).to_string();

        cars.push(Car {
            identity: Identity {
                driver_code: code,
                team: slot.team.clone(),
                base_skill: driver.skill_level,
                aggression: driver.aggression,
                tire_management: driver.tire_management,
                wet_multiplier: driver.wet_multiplier,
                track_affinity: driver.track_affinity,
            },
            telemetry: Telemetry {
                speed_kph: 0.0,
                fuel_kg: 100.0,
                lap_progress: 0.0,
                tire: TireState::fresh(Compound::Medium),
            },
            systems: Systems {
                drs_active: false,
                ers_battery: 4.0,
                ers_deployed: false,
            },
            strategy: Strategy {
                driving_mode: DrivingMode::Balanced,
                active_command: ActiveCommand::None,
            },
            timing: Timing {
                position: slot.starting_position,
                lap: 0,
                sector: 0,
                last_lap_time_ms: 0,
                best_lap_time_ms: 0,
                pit_stops: 0,
                status: CarStatus::Racing,
                gap_to_leader_ms: 0,
                interval_to_ahead_ms: 0,
                in_pit_lane: false,
                pit_ticks_remaining: 0,
            },
        });
    }

    let mut state = RaceState {
        schema_version: SCHEMA_VERSION,
        meta: RaceMeta { seed, tick: 0, sim_time_ms: 0, laps_total: scenario.laps },
        track_id: track.id.clone(),
        weather: weather_for_baseline(scenario.weather_baseline, track.downforce),
        race_control: RaceControlState::Green,
        cars,
        events: Vec::new(),
        is_finished: false,
        total_overtakes: 0,
        total_pit_stops: 0,
    };

    state.push_event(Event::new(
        0,
        0,
        EventType::RaceStart,
        format!("Lights out at {}", track.name),
        EventPayload::RaceStart { laps_total: scenario.laps },
    ));

    Ok(state)
}

fn weather_for_baseline(condition: crate::models::weather::WeatherCondition, downforce: f32) -> Weather {
    use crate::models::weather::WeatherCondition::*;
    let rain_probability = match condition {
        Dry => 0.0,
        Intermediate => 0.5,
        Wet => 0.9,
    };
    Weather {
        condition,
        rain_probability,
        track_temp: 28.0 - downforce * 4.0,
        wind: 0.0,
    }
}

/// Thread-local director bookkeeping carried alongside a RaceState between
/// ticks. Kept outside RaceState since it isn't part of the externally
/// observable world snapshot — only `race_control` itself is.
pub struct EngineContext {
    pub director: DirectorState,
}

impl Default for EngineContext {
    fn default() -> Self {
        EngineContext { director: DirectorState { entered_at_tick: 0 } }
    }
}

/// Advances `state` by exactly one tick (100ms of simulated time), consuming
/// `controls` and drawing from `rng` in the fixed order required for
/// deterministic replay: commands -> director -> per-car pace jitter (by
/// position) -> pit decisions -> overtakes (by position) -> incidents (by
/// identity) -> weather.
pub fn tick(state: &mut RaceState, ctx: &mut EngineContext, controls: &Controls, rng: &mut impl Rng) -> Result<Vec<Event>, EngineError> {
    let track = catalogs::get_track(&state.track_id).ok_or_else(|| EngineError::UnknownTrack(state.track_id.clone()))?;

    state.meta.tick += 1;
    state.meta.sim_time_ms = state.meta.tick * crate::models::state::TICK_DURATION_MS;
    let tick_n = state.meta.tick;
    let mut new_events = Vec::new();

    // Step 1: command ingestion.
    for cmd in &controls.driver_commands {
        if let Some(car) = state.cars.iter_mut().find(|c| c.identity.driver_code == cmd.driver_code) {
            match cmd.kind {
                DriverCommandKind::BoxThisLap => car.strategy.active_command = ActiveCommand::BoxThisLap,
                DriverCommandKind::Push => {
                    car.strategy.driving_mode = DrivingMode::Push;
                    new_events.push(Event::new(
                        tick_n,
                        car.timing.lap,
                        EventType::ModeChange,
                        format!("{} switches to push mode", car.identity.driver_code),
                        EventPayload::ModeChange { driver: car.identity.driver_code.clone(), mode: "PUSH".to_string() },
                    ));
                }
                DriverCommandKind::Conserve => {
                    car.strategy.driving_mode = DrivingMode::Conserve;
                    new_events.push(Event::new(
                        tick_n,
                        car.timing.lap,
                        EventType::ModeChange,
                        format!("{} switches to conserve mode", car.identity.driver_code),
                        EventPayload::ModeChange { driver: car.identity.driver_code.clone(), mode: "CONSERVE".to_string() },
                    ));
                }
            }
        }
    }

    // Step 2: race-director events.
    let field_bunched = field_is_bunched(&state.cars);
    let leader_lap = state.cars.iter().map(|c| c.timing.lap).max().unwrap_or(0);
    new_events.extend(director::apply(&mut state.race_control, &mut ctx.director, &controls.director_commands, tick_n, leader_lap, field_bunched));

    let frozen = state.race_control.freezes_on_track_action();

    if !frozen {
        // DRS eligibility, ahead of pace: within 1s of the car directly
        // ahead (position order, set by the previous tick's classification)
        // and only under a green flag. Emitted only on the false->true edge.
        for idx in 0..state.cars.len() {
            let car = &mut state.cars[idx];
            if car.is_dnf() || car.timing.in_pit_lane {
                car.systems.drs_active = false;
                continue;
            }
            let eligible = idx > 0 && state.race_control == RaceControlState::Green && car.timing.interval_to_ahead_ms < 1000;
            if eligible && !car.systems.drs_active {
                new_events.push(Event::new(
                    tick_n,
                    car.timing.lap,
                    EventType::DrsEnabled,
                    format!("{} enables DRS", car.identity.driver_code),
                    EventPayload::DrsEnabled { driver: car.identity.driver_code.clone() },
                ));
            }
            car.systems.drs_active = eligible;
        }

        // Step 3 & 4: pace + progress, in position order (cars are kept
        // sorted by position from the previous tick's classification).
        let mut pace_by_idx = vec![0.0f32; state.cars.len()];
        for (idx, car) in state.cars.iter().enumerate() {
            if car.is_dnf() || car.timing.in_pit_lane {
                continue;
            }
            let jitter: f32 = rng.random_range(-0.004..=0.004);
            let mut pace = pace::effective_pace_kph(car, &track, state.weather.condition, &controls.modifiers);
            pace *= 1.0 + jitter;
            pace = cap_pace_for_flag(pace, state.race_control);
            pace_by_idx[idx] = pace;
        }

        let best_lap_before = state.cars.iter().map(|c| c.timing.best_lap_time_ms).filter(|&t| t > 0).min().unwrap_or(0);

        let mut lap_completed_by_idx = vec![false; state.cars.len()];
        for (idx, car) in state.cars.iter_mut().enumerate() {
            if car.timing.in_pit_lane {
                pit::tick_in_pit(car);
                continue;
            }
            if car.is_dnf() {
                continue;
            }
            let outcome = progress::advance_car(car, &track, pace_by_idx[idx], best_lap_before, tick_n, &controls.modifiers);
            lap_completed_by_idx[idx] = outcome.lap_completed;
            new_events.extend(outcome.events);
            if outcome.ran_out_of_fuel && car.timing.status == CarStatus::Racing {
                car.timing.status = CarStatus::Dnf;
                new_events.push(Event::new(
                    tick_n,
                    car.timing.lap,
                    EventType::Dnf,
                    format!("{} retires, out of fuel", car.identity.driver_code),
                    EventPayload::Dnf { driver: car.identity.driver_code.clone(), reason: "out of fuel".to_string() },
                ));
            }
        }

        // Step 5: pit-stop service. Gated on having just crossed the line
        // this tick — a BOX_THIS_LAP command only takes effect once the car
        // reaches the pit entry at the end of its current lap, not mid-lap.
        for (idx, car) in state.cars.iter_mut().enumerate() {
            if !lap_completed_by_idx[idx] {
                continue;
            }
            if let Some(event) = pit::maybe_service(car, &track, state.weather.condition, state.meta.laps_total, tick_n) {
                state.total_pit_stops += 1;
                new_events.push(event);
            }
        }

        // Step 6: overtake resolution, adjacent pairs in position order.
        let mut i = 0;
        while i + 1 < state.cars.len() {
            let (defender_pace, attacker_pace) = (pace_by_idx[i], pace_by_idx[i + 1]);
            let (left, right) = state.cars.split_at_mut(i + 1);
            let defender = &mut left[i];
            let attacker = &mut right[0];
            if !defender.is_dnf() && !attacker.is_dnf() && !defender.timing.in_pit_lane && !attacker.timing.in_pit_lane {
                if let Some((event, success)) = overtake::attempt(attacker, defender, attacker_pace, defender_pace, &track, &controls.modifiers, rng, tick_n) {
                    if success {
                        state.total_overtakes += 1;
                    }
                    new_events.push(event);
                }
            }
            i += 1;
        }

        // Step 7: incident rolls, identity order (by driver_code).
        let mut order: Vec<usize> = (0..state.cars.len()).collect();
        order.sort_by(|&a, &b| state.cars[a].identity.driver_code.cmp(&state.cars[b].identity.driver_code));
        for idx in order {
            let outcome = incidents::roll(&state.cars[idx], &track, state.weather.condition, &controls.modifiers, rng, tick_n);
            match outcome {
                Some(incidents::IncidentOutcome::Dnf(event)) => {
                    state.cars[idx].timing.status = CarStatus::Dnf;
                    new_events.push(event);
                }
                Some(incidents::IncidentOutcome::YellowTrigger(event, auto_sc)) => {
                    let to = if auto_sc { RaceControlState::SafetyCar } else { RaceControlState::Yellow };
                    if state.race_control.can_transition_to(to) && state.race_control == RaceControlState::Green {
                        state.race_control = to;
                        ctx.director.entered_at_tick = tick_n;
                    }
                    new_events.push(event);
                }
                None => {}
            }
        }
    }

    // Step 8: weather drift.
    if let Some(event) = weather_drift::maybe_drift(&mut state.weather, tick_n, leader_lap, rng) {
        new_events.push(event);
    }

    // Step 9: classification.
    let finished = classification::classify(&mut state.cars, state.meta.laps_total, track.lap_length_km);
    state.is_finished = finished;

    // Step 10: event trimming.
    for event in new_events.iter().cloned() {
        state.push_event(event);
    }
    debug_assert!(state.events.len() <= MAX_EVENTS_RETAINED);

    Ok(new_events)
}

fn field_is_bunched(cars: &[Car]) -> bool {
    let racing: Vec<&Car> = cars.iter().filter(|c| c.is_on_track()).collect();
    if racing.len() < 2 {
        return true;
    }
    let max_gap = racing.iter().map(|c| c.timing.gap_to_leader_ms).max().unwrap_or(0);
    max_gap < 3000
}

fn cap_pace_for_flag(pace: f32, flag: RaceControlState) -> f32 {
    match flag {
        RaceControlState::Vsc => pace.min(pace * 0.6),
        RaceControlState::SafetyCar => pace.min(pace * 0.4),
        RaceControlState::Yellow => pace.min(pace * 0.85),
        RaceControlState::Green | RaceControlState::RedFlag => pace,
    }
}
