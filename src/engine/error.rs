use thiserror::Error;

/// Engine-level failures. These signal an internal invariant violation, not
/// a user-facing rejection — the tick aborts rather than silently recovering.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("unknown track id: {0}")]
    UnknownTrack(String),
    #[error("unknown driver code: {0}")]
    UnknownDriver(String),
    #[error("invariant violated: {0}")]
    InvariantViolated(String),
    #[error("illegal race_control transition: {from:?} -> {to:?}")]
    IllegalTransition {
        from: crate::models::race_control::RaceControlState,
        to: crate::models::race_control::RaceControlState,
    },
}
