use thiserror::Error;

use crate::engine::error::EngineError;

/// Rejections for the stateless predictor entry point. Composes `EngineError`
/// since building the baseline state and driving each ensemble member both
/// go through the engine.
#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("scenario not found: {0}")]
    UnknownScenario(String),
    #[error("ensemble size must be positive (got {0})")]
    InvalidEnsembleSize(u32),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
