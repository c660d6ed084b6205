//! HTTP/JSON routes and the websocket upgrade, built on `axum` +
//! `tower-http`'s CORS/trace layers exactly as the donor wired them; the
//! donor's `warp`-based client fan-out and Postgres-backed car/driver/team
//! routes are replaced by the in-process catalogs and a single-session
//! scheduler/predictor pair, since persistence is out of scope here.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalogs;
use crate::config::Config;
use crate::engine::{self, commands::Controls, rng::seeded};
use crate::error::ApiError;
use crate::models::car::CarStatus;
use crate::models::event::{Event, EventType};
use crate::models::scenario::ScenarioSummary;
use crate::models::state::RaceState;
use crate::predictor::aggregate::Predictions;
use crate::predictor::{self, PredictionModifiers};
use crate::scheduler::{Session, SchedulerCommand, Snapshot, SnapshotKind};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

pub fn router(config: Config) -> Router {
    let state = AppState { config: Arc::new(config) };

    Router::new()
        .route("/tracks", get(list_tracks))
        .route("/tracks/{id}", get(get_track))
        .route("/drivers", get(list_drivers))
        .route("/scenarios", get(list_scenarios))
        .route("/scenarios/{id}", get(get_scenario))
        .route("/predict/{scenario_id}", post(predict_scenario))
        .route("/scenarios/{scenario_id}/run", post(run_scenario))
        .route("/ws", get(ws_upgrade))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .with_state(state)
}

async fn list_tracks() -> impl IntoResponse {
    Json(catalogs::list_track_summaries())
}

async fn get_track(Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    catalogs::get_track(&id).map(Json).ok_or(ApiError::UnknownTrack(id))
}

async fn list_drivers() -> impl IntoResponse {
    Json(catalogs::list_drivers())
}

async fn list_scenarios() -> impl IntoResponse {
    Json(catalogs::list_scenario_summaries())
}

async fn get_scenario(Path(id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    catalogs::get_scenario(&id).map(Json).ok_or_else(|| ApiError::BadRequest(format!("unknown scenario: {id}")))
}

#[derive(Deserialize, Default)]
struct PredictRequestBody {
    #[serde(flatten)]
    modifiers: PredictionModifiers,
    members: Option<u32>,
}

#[derive(Serialize)]
struct PredictResponse {
    baseline_state: RaceState,
    predictions: predictor::aggregate::Predictions,
}

async fn predict_scenario(
    State(state): State<AppState>,
    Path(scenario_id): Path<String>,
    body: Option<Json<PredictRequestBody>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let members = body.members.unwrap_or(state.config.default_ensemble_size);
    let cancel = Arc::new(AtomicBool::new(false));

    let span = tracing::info_span!("predict", %scenario_id, n_members = members);
    let _guard = span.enter();

    let (baseline_state, predictions) = predictor::predict(&scenario_id, body.modifiers, members, cancel).await?;
    Ok(Json(PredictResponse { baseline_state, predictions }))
}

#[derive(Serialize)]
struct RunResult {
    classification: Vec<DriverResult>,
    key_events: Vec<Event>,
    fastest_lap: Option<FastestLapSummary>,
    strategy_summary: Vec<StrategySummary>,
}

#[derive(Serialize)]
struct DriverResult {
    driver_code: String,
    position: u32,
    status: CarStatus,
}

#[derive(Serialize)]
struct FastestLapSummary {
    driver_code: String,
    lap_time_ms: u32,
}

#[derive(Serialize)]
struct StrategySummary {
    driver_code: String,
    pit_stops: u32,
    final_compound: crate::models::tire::Compound,
}

/// Runs a scenario to completion synchronously (a single deterministic
/// member, not an ensemble) and returns a final report. Grounded on the
/// donor's `finish_race` persistence step in `database/queries.rs`,
/// generalized from a DB write into an in-memory summary since no
/// persistence layer exists here.
async fn run_scenario(Path(scenario_id): Path<String>) -> Result<impl IntoResponse, ApiError> {
    let scenario = catalogs::get_scenario(&scenario_id).ok_or_else(|| ApiError::BadRequest(format!("unknown scenario: {scenario_id}")))?;
    let seed = crate::engine::rng::hash_seed(&scenario_id, 0);
    let mut rng_state = seeded(seed);
    let mut state = engine::init_state(&scenario, seed)?;
    let mut ctx = engine::EngineContext::default();
    let controls = Controls::default();

    let mut key_events = Vec::new();
    while !state.is_finished {
        let events = engine::tick(&mut state, &mut ctx, &controls, &mut rng_state)?;
        key_events.extend(events.into_iter().filter(is_key_event));
    }

    let classification = state
        .cars
        .iter()
        .map(|c| DriverResult { driver_code: c.identity.driver_code.clone(), position: c.timing.position, status: c.timing.status })
        .collect();

    let fastest_lap = state
        .cars
        .iter()
        .filter(|c| c.timing.best_lap_time_ms > 0)
        .min_by_key(|c| c.timing.best_lap_time_ms)
        .map(|c| FastestLapSummary { driver_code: c.identity.driver_code.clone(), lap_time_ms: c.timing.best_lap_time_ms });

    let strategy_summary = state
        .cars
        .iter()
        .map(|c| StrategySummary {
            driver_code: c.identity.driver_code.clone(),
            pit_stops: c.timing.pit_stops,
            final_compound: c.telemetry.tire.compound,
        })
        .collect();

    Ok(Json(RunResult { classification, key_events, fastest_lap, strategy_summary }))
}

fn is_key_event(event: &Event) -> bool {
    matches!(
        event.kind,
        EventType::Overtake
            | EventType::PitStop
            | EventType::SafetyCarDeployed
            | EventType::SafetyCarEnding
            | EventType::VscDeployed
            | EventType::VscEnding
            | EventType::RedFlag
            | EventType::Dnf
            | EventType::FastestLap
    )
}

async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Server -> client frame. `init` carries the scenario summary and is sent
/// once, right after `init_scenario` succeeds; `state`/`finished` carry a
/// piggybacked `predictions` bundle whenever the session has a predictor
/// attached and a fresh ensemble pass completed in time for this snapshot.
#[derive(Serialize)]
#[serde(tag = "type")]
enum ServerMessage<'a> {
    #[serde(rename = "init")]
    Init {
        data: &'a RaceState,
        #[serde(skip_serializing_if = "Option::is_none")]
        scenario: Option<&'a ScenarioSummary>,
    },
    #[serde(rename = "state")]
    State {
        data: &'a RaceState,
        #[serde(skip_serializing_if = "Option::is_none")]
        predictions: Option<&'a Predictions>,
    },
    #[serde(rename = "finished")]
    Finished {
        data: &'a RaceState,
        #[serde(skip_serializing_if = "Option::is_none")]
        predictions: Option<&'a Predictions>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

impl<'a> ServerMessage<'a> {
    fn from_snapshot(snapshot: &'a Snapshot) -> Self {
        match snapshot.kind {
            SnapshotKind::Init => ServerMessage::Init { data: &snapshot.state, scenario: snapshot.scenario.as_ref() },
            SnapshotKind::State if snapshot.state.is_finished => {
                ServerMessage::Finished { data: &snapshot.state, predictions: snapshot.predictions.as_ref() }
            }
            SnapshotKind::State => ServerMessage::State { data: &snapshot.state, predictions: snapshot.predictions.as_ref() },
        }
    }
}

/// One websocket connection owns exactly one session, per the single-owner
/// scheduling model: a session never outlives its socket and never shares
/// its RaceState with another connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let session_id = uuid::Uuid::new_v4();
    let span = tracing::info_span!("session", %session_id);
    let _guard = span.enter();

    let (mut ws_tx, mut ws_rx) = socket.split();

    let (cmd_tx, cmd_rx) = mpsc::channel::<SchedulerCommand>(16);
    let (snapshot_tx, mut snapshot_rx) = mpsc::channel::<Snapshot>(state.config.event_buffer_cap);

    let seed = rand_seed_from_uuid(session_id);
    let session = Session::new(seed);
    let session_task = tokio::spawn(session.run(cmd_rx, snapshot_tx));

    let forward_task = tokio::spawn(async move {
        while let Some(snapshot) = snapshot_rx.recv().await {
            let msg = ServerMessage::from_snapshot(&snapshot);
            let Ok(text) = serde_json::to_string(&msg) else { continue };
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_rx.next().await {
        let Message::Text(text) = msg else { continue };
        match serde_json::from_str::<SchedulerCommand>(&text) {
            Ok(command) => {
                if cmd_tx.send(command).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::debug!(%err, "dropped malformed client frame");
            }
        }
    }

    drop(cmd_tx);
    let _ = session_task.await;
    forward_task.abort();
    tracing::info!("session closed");
}

fn rand_seed_from_uuid(id: uuid::Uuid) -> u64 {
    let bytes = id.as_bytes();
    u64::from_le_bytes(bytes[0..8].try_into().unwrap())
}
