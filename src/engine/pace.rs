//! Per-car pace computation (tick step 3), grounded on the donor's
//! `RaceState::update` speed/curvature model, generalized from a single
//! acceleration-ramp figure into the multiplicative factor chain the
//! simulation's strategy layer needs.

use crate::catalogs::compounds::get_compound;
use crate::models::car::{Car, DrivingMode};
use crate::models::track::Track;
use crate::models::weather::WeatherCondition;

use super::commands::Modifiers;

/// Donor's curvature-to-speed mapping: 0 curvature is full pace, curvature at
/// or above ~0.3 rad floors out at 15% pace, exponential in between.
fn curvature_factor(curvature: f32) -> f32 {
    (-4.62 * curvature).exp().max(0.15)
}

fn compound_multiplier(car: &Car, modifiers: &Modifiers) -> f32 {
    let spec = get_compound(car.telemetry.tire.compound);
    let wear = (car.telemetry.tire.wear * modifiers.tire_deg).clamp(0.0, 1.0);
    spec.pace_factor * (1.0 - wear * 0.6)
}

fn fuel_multiplier(car: &Car) -> f32 {
    // Heavier fuel load costs pace; donor's fuel stat maxes at 100.0 kg.
    1.0 - (car.telemetry.fuel_kg / 100.0) * 0.06
}

/// Push/conserve pace delta, scaled by the macro aggression modifier: a
/// higher `modifiers.aggression` sharpens the push bonus and softens the
/// conserve penalty, per the predictor's aggression-modifier contract.
fn mode_multiplier(mode: DrivingMode, modifiers: &Modifiers) -> f32 {
    match mode {
        DrivingMode::Push => 1.0 + 0.05 * modifiers.aggression,
        DrivingMode::Balanced => 1.0,
        DrivingMode::Conserve => 1.0 - 0.05 / modifiers.aggression.max(0.1),
    }
}

fn weather_multiplier(weather: WeatherCondition, wet_multiplier: f32, compound_is_wet_weather: bool) -> f32 {
    match weather {
        WeatherCondition::Dry => 1.0,
        WeatherCondition::Intermediate => {
            if compound_is_wet_weather {
                0.92 * wet_multiplier
            } else {
                0.78 * wet_multiplier
            }
        }
        WeatherCondition::Wet => {
            if compound_is_wet_weather {
                0.85 * wet_multiplier
            } else {
                0.55 * wet_multiplier
            }
        }
    }
}

/// Slipstream bonus for a trailing car within range of the car ahead.
fn slipstream_factor(gap_ahead_ms: u32) -> f32 {
    if gap_ahead_ms < 1000 {
        1.03
    } else if gap_ahead_ms < 2000 {
        1.01
    } else {
        1.0
    }
}

/// Turbulent-air penalty for running close behind another car without DRS.
fn dirty_air_penalty(gap_ahead_ms: u32, in_dirty_air: bool) -> f32 {
    if in_dirty_air && gap_ahead_ms < 1500 {
        0.97
    } else {
        1.0
    }
}

fn drs_factor(drs_active: bool) -> f32 {
    if drs_active {
        1.04
    } else {
        1.0
    }
}

/// The full effective-pace multiplier chain from SPEC step 3, expressed in
/// km/h against the current sector's base pace.
pub fn effective_pace_kph(car: &Car, track: &Track, weather: WeatherCondition, modifiers: &Modifiers) -> f32 {
    let sector_idx = track.sector_for_progress(car.telemetry.lap_progress);
    let base_pace = track.sectors[sector_idx].base_pace_kph;
    let compound_spec = get_compound(car.telemetry.tire.compound);

    let in_dirty_air = car.timing.interval_to_ahead_ms < 1500 && !car.systems.drs_active;

    base_pace
        * compound_multiplier(car, modifiers)
        * fuel_multiplier(car)
        * car.identity.base_skill
        * mode_multiplier(car.strategy.driving_mode, modifiers)
        * weather_multiplier(weather, car.identity.wet_multiplier, compound_spec.wet_weather)
        * slipstream_factor(car.timing.interval_to_ahead_ms)
        * dirty_air_penalty(car.timing.interval_to_ahead_ms, in_dirty_air)
        * drs_factor(car.systems.drs_active)
        * curvature_factor(track.get_track_point_at_distance(car.telemetry.lap_progress).curvature)
        * (1.0 + car.identity.track_affinity * 0.05)
}
