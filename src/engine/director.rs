//! Race-director state machine (tick step 2). New relative to the donor,
//! which had no flag system at all — grounded on the transition rules named
//! in the state-machine design: GREEN can go anywhere, everything else
//! returns to GREEN under its own clearing rule.

use crate::models::event::{Event, EventPayload, EventType};
use crate::models::race_control::RaceControlState;

use super::commands::DirectorCommand;

/// Minimum dwell, in ticks, before a safety-car period can clear back to
/// green once the field is bunched.
pub const SAFETY_CAR_MIN_DWELL_TICKS: u64 = 300;
/// Ticks a yellow flag stays up once raised, absent further incidents.
pub const YELLOW_CLEAR_TICKS: u64 = 50;
/// Ticks a virtual safety car period runs before an automatic return to green.
pub const VSC_DURATION_TICKS: u64 = 150;

pub struct DirectorState {
    pub entered_at_tick: u64,
}

fn event_for_transition(tick: u64, lap: u32, from: RaceControlState, to: RaceControlState) -> Event {
    use RaceControlState::*;
    let (kind, description) = match to {
        SafetyCar => (EventType::SafetyCarDeployed, "Safety car deployed".to_string()),
        Vsc => (EventType::VscDeployed, "Virtual safety car deployed".to_string()),
        RedFlag => (EventType::RedFlag, "Red flag: race suspended".to_string()),
        Green if from == SafetyCar => (EventType::SafetyCarEnding, "Safety car in this lap".to_string()),
        Green if from == Vsc => (EventType::VscEnding, "Virtual safety car ending".to_string()),
        Green => (EventType::RaceStart, "Track is clear, racing resumes".to_string()),
        Yellow => (EventType::SafetyCarDeployed, "Yellow flag".to_string()),
    };
    Event::new(tick, lap, kind, description, EventPayload::FlagChange { from, to })
}

/// Applies queued director commands and any auto-clear rules, returning the
/// events raised by any transitions.
pub fn apply(
    race_control: &mut RaceControlState,
    director: &mut DirectorState,
    commands: &[DirectorCommand],
    tick: u64,
    lap: u32,
    field_bunched: bool,
) -> Vec<Event> {
    let mut events = Vec::new();

    for command in commands {
        if let DirectorCommand::SetFlag(to) = command {
            if race_control.can_transition_to(*to) && *to != *race_control {
                events.push(event_for_transition(tick, lap, *race_control, *to));
                *race_control = *to;
                director.entered_at_tick = tick;
            }
        }
    }

    let dwell = tick.saturating_sub(director.entered_at_tick);
    let auto_clear = match *race_control {
        RaceControlState::Yellow => dwell >= YELLOW_CLEAR_TICKS,
        RaceControlState::Vsc => dwell >= VSC_DURATION_TICKS,
        RaceControlState::SafetyCar => dwell >= SAFETY_CAR_MIN_DWELL_TICKS && field_bunched,
        RaceControlState::Green | RaceControlState::RedFlag => false,
    };

    if auto_clear {
        events.push(event_for_transition(tick, lap, *race_control, RaceControlState::Green));
        *race_control = RaceControlState::Green;
        director.entered_at_tick = tick;
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_car_does_not_clear_before_minimum_dwell() {
        let mut race_control = RaceControlState::Green;
        let mut director = DirectorState { entered_at_tick: 0 };
        let events = apply(&mut race_control, &mut director, &[DirectorCommand::SetFlag(RaceControlState::SafetyCar)], 10, 1, true);
        assert_eq!(race_control, RaceControlState::SafetyCar);
        assert_eq!(events.len(), 1);

        let events = apply(&mut race_control, &mut director, &[], 10 + SAFETY_CAR_MIN_DWELL_TICKS - 1, 1, true);
        assert_eq!(race_control, RaceControlState::SafetyCar);
        assert!(events.is_empty());

        let events = apply(&mut race_control, &mut director, &[], 10 + SAFETY_CAR_MIN_DWELL_TICKS, 1, true);
        assert_eq!(race_control, RaceControlState::Green);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn safety_car_stays_out_until_field_is_bunched() {
        let mut race_control = RaceControlState::SafetyCar;
        let mut director = DirectorState { entered_at_tick: 0 };
        let events = apply(&mut race_control, &mut director, &[], SAFETY_CAR_MIN_DWELL_TICKS + 100, 1, false);
        assert_eq!(race_control, RaceControlState::SafetyCar);
        assert!(events.is_empty());
    }

    #[test]
    fn yellow_auto_clears_after_its_fixed_window() {
        let mut race_control = RaceControlState::Yellow;
        let mut director = DirectorState { entered_at_tick: 5 };
        let events = apply(&mut race_control, &mut director, &[], 5 + YELLOW_CLEAR_TICKS, 1, false);
        assert_eq!(race_control, RaceControlState::Green);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn direct_transition_between_two_non_green_states_is_ignored() {
        let mut race_control = RaceControlState::Yellow;
        let mut director = DirectorState { entered_at_tick: 0 };
        let events = apply(&mut race_control, &mut director, &[DirectorCommand::SetFlag(RaceControlState::SafetyCar)], 1, 1, true);
        assert_eq!(race_control, RaceControlState::Yellow);
        assert!(events.is_empty());
    }
}
