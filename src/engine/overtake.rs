//! Overtake resolution (tick step 6). New relative to the donor, which had
//! no wheel-to-wheel model at all — positions were purely a function of
//! cumulative distance. Grounded on the donor's `rand::Rng` usage pattern
//! for stochastic decisions (`ai_pit_decision` callers, event jitter).

use rand::Rng;

use crate::models::car::Car;
use crate::models::event::{Event, EventPayload, EventType};
use crate::models::track::Track;

use super::commands::Modifiers;

/// Interval within which an overtake attempt can occur, widened by DRS,
/// aggression (driver trait scaled by the macro aggression modifier), and
/// wet conditions per the attacking car.
fn attempt_window_ms(attacker: &Car, drs_zone: bool, modifiers: &Modifiers) -> u32 {
    let mut window = 800u32;
    if drs_zone && attacker.systems.drs_active {
        window += 400;
    }
    window += (attacker.identity.aggression * modifiers.aggression * 300.0) as u32;
    window
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Attempts an overtake of `defender` (ahead) by `attacker` (behind), given
/// their pace delta this tick. Returns the OVERTAKE event and whether the
/// attacker succeeded (caller swaps positions on success).
pub fn attempt(
    attacker: &mut Car,
    defender: &mut Car,
    attacker_pace_kph: f32,
    defender_pace_kph: f32,
    track: &Track,
    modifiers: &Modifiers,
    rng: &mut impl Rng,
    tick: u64,
) -> Option<(Event, bool)> {
    let drs_zone = track.sectors[track.sector_for_progress(attacker.telemetry.lap_progress)].has_drs_zone;
    let window = attempt_window_ms(attacker, drs_zone, modifiers);
    if attacker.timing.interval_to_ahead_ms > window {
        return None;
    }

    let pace_delta = (attacker_pace_kph - defender_pace_kph) / defender_pace_kph.max(1.0);
    if pace_delta <= 0.0 {
        return None;
    }

    let defense = 1.0 - defender.identity.aggression * modifiers.aggression * 0.3;
    let logit = pace_delta * attacker.identity.aggression * modifiers.aggression * 4.0 - defense * track.overtake_difficulty;
    let success_prob = sigmoid(logit);
    let roll: f32 = rng.random();
    let success = roll < success_prob;

    if success {
        let attacker_pos = attacker.timing.position;
        let defender_pos = defender.timing.position;
        attacker.timing.position = defender_pos;
        defender.timing.position = attacker_pos;

        let event = Event::new(
            tick,
            attacker.timing.lap,
            EventType::Overtake,
            format!(
                "{} passes {} for position {}",
                attacker.identity.driver_code, defender.identity.driver_code, defender_pos
            ),
            EventPayload::Overtake {
                attacker: attacker.identity.driver_code.clone(),
                defender: defender.identity.driver_code.clone(),
                position: defender_pos,
            },
        );
        Some((event, true))
    } else {
        // Failed attempt costs a little tire and ERS from the lunge.
        attacker.telemetry.tire.wear = (attacker.telemetry.tire.wear + 0.004).clamp(0.0, 1.0);
        attacker.systems.ers_battery = (attacker.systems.ers_battery - 0.1).max(0.0);
        None
    }
}
