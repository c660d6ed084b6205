//! Typed session commands, replacing the donor's whitespace-tokenized
//! `handle_command` string dispatcher (`commands.rs`) with a command enum
//! the websocket layer deserializes directly from JSON.

use serde::{Deserialize, Serialize};

use crate::engine::commands::{DirectorCommand, DriverCommandKind};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SchedulerCommand {
    InitScenario { scenario_id: String },
    Start { speed: u32 },
    Pause,
    Step { n: u32 },
    SkipToLap { lap: u32 },
    Event { director_command: DirectorCommand },
    DriverCommand { driver_code: String, kind: DriverCommandKind },
    /// Attaches a predictor to this session: every subsequently published
    /// snapshot piggybacks a fresh `members`-wide ensemble pass run from the
    /// current live state, per the streaming contract's optional
    /// `predictions` field.
    AttachPredictor { members: u32 },
    DetachPredictor,
}
