//! Top-level error type composing each layer's dedicated error enum at the
//! transport boundary, per the donor's `ApiError`/`AuthError` pattern in
//! `api.rs` and `auth.rs` (there: an `IntoResponse` impl mapping variants to
//! HTTP statuses; here: one enum per layer instead of one big flat enum).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::engine::error::EngineError;
use crate::predictor::PredictorError;
use crate::scheduler::SchedulerError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),
    #[error(transparent)]
    Predictor(#[from] PredictorError),
    #[error("unknown track: {0}")]
    UnknownTrack(String),
    #[error("unknown driver: {0}")]
    UnknownDriver(String),
    #[error("invalid request: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(EngineError::UnknownTrack(_) | EngineError::UnknownDriver(_)) => StatusCode::NOT_FOUND,
            ApiError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Scheduler(SchedulerError::UnknownScenario(_)) => StatusCode::NOT_FOUND,
            ApiError::Scheduler(SchedulerError::InvalidSpeed(_)) => StatusCode::BAD_REQUEST,
            ApiError::Scheduler(SchedulerError::NoScenario | SchedulerError::RaceFinished { .. }) => StatusCode::CONFLICT,
            ApiError::Scheduler(SchedulerError::Engine(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Predictor(PredictorError::UnknownScenario(_)) => StatusCode::NOT_FOUND,
            ApiError::Predictor(PredictorError::InvalidEnsembleSize(_)) => StatusCode::BAD_REQUEST,
            ApiError::Predictor(PredictorError::Engine(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnknownTrack(_) | ApiError::UnknownDriver(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(error = %self, %status, "request rejected");
        (status, axum::Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
