use serde::{Deserialize, Serialize};

/// Flag state of the race. At most one of {YELLOW, VSC, SAFETY_CAR, RED_FLAG}
/// is active at a time; GREEN is the absence of all of them.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceControlState {
    Green,
    Yellow,
    Vsc,
    SafetyCar,
    RedFlag,
}

impl Default for RaceControlState {
    fn default() -> Self {
        RaceControlState::Green
    }
}

impl RaceControlState {
    /// Whether `to` is a legal transition from `self`, per the engine's state
    /// machine: GREEN can go anywhere; everything else returns to GREEN
    /// under its own clearing rule (checked by the caller, not here); only
    /// an explicit director command can clear a red flag.
    pub fn can_transition_to(self, to: RaceControlState) -> bool {
        use RaceControlState::*;
        match (self, to) {
            (Green, _) => true,
            (_, Green) => true,
            (s, t) if s == t => true,
            _ => false,
        }
    }

    /// True for the steps the red flag freezes: pace, progress, pit,
    /// overtake, incidents (per-tick steps 3 through 7).
    pub fn freezes_on_track_action(self) -> bool {
        matches!(self, RaceControlState::RedFlag)
    }
}
