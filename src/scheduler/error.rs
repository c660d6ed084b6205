use thiserror::Error;

use crate::engine::error::EngineError;

/// Rejections for ill-timed or unknown scheduler commands. Session state is
/// left unchanged when one of these is returned.
#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("no scenario initialized for this session")]
    NoScenario,
    #[error("scenario not found: {0}")]
    UnknownScenario(String),
    #[error("unsupported playback speed: {0} (expected 1, 5, 10, or 20)")]
    InvalidSpeed(u32),
    #[error("cannot {action} while the race is finished")]
    RaceFinished { action: String },
    #[error(transparent)]
    Engine(#[from] EngineError),
}
