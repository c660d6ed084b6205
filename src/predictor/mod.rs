//! The stateless Monte Carlo predictor: given a scenario baseline and
//! modifiers, spawns an ensemble of independent tick loops concurrently and
//! aggregates their terminal classifications. Grounded on the donor's
//! `other_examples` prediction module's run-many-sum-outcomes shape,
//! generalized from a sequential `for _ in 0..runs` loop into concurrent
//! tokio tasks over the engine's own pure tick, since the donor's simulation
//! had no engine to drive concurrently.

pub mod aggregate;
pub mod error;
pub mod modifiers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::Rng;

use crate::catalogs;
use crate::engine::{self, commands::Controls, EngineContext};
use crate::models::state::RaceState;

use aggregate::{aggregate, MemberOutcome, Predictions};
pub use error::PredictorError;
pub use modifiers::PredictionModifiers;

pub const DEFAULT_ENSEMBLE_SIZE: u32 = 1000;

/// Runs the predictor for `scenario_id`, returning the baseline state it was
/// built from alongside the aggregated predictions. `cancel` lets a caller
/// short-circuit remaining ensemble members without corrupting the partial
/// aggregate built from whatever already finished.
pub async fn predict(
    scenario_id: &str,
    modifiers: PredictionModifiers,
    members: u32,
    cancel: Arc<AtomicBool>,
) -> Result<(RaceState, Predictions), PredictorError> {
    if members == 0 {
        return Err(PredictorError::InvalidEnsembleSize(members));
    }
    let scenario = catalogs::get_scenario(scenario_id).ok_or_else(|| PredictorError::UnknownScenario(scenario_id.to_string()))?;

    let base_seed = engine::rng::hash_seed(scenario_id, modifiers.bits());
    let mut baseline = engine::init_state(&scenario, base_seed)?;
    if let Some(weather) = modifiers.weather {
        baseline.weather.condition = weather;
    }

    let predictions = run_ensemble(baseline.clone(), modifiers, members, base_seed, cancel).await?;
    Ok((baseline, predictions))
}

/// Runs an ensemble from an arbitrary live `RaceState` rather than a fresh
/// scenario baseline, for a session with an attached predictor: each member
/// resumes the race mid-flight from the current grid, gaps, and tire/fuel
/// state instead of from lights-out. `seed` is caller-supplied (the session's
/// own reseed draw) rather than `hash_seed`, since a mid-race prediction has
/// no scenario-id-plus-modifiers identity to hash against.
pub async fn predict_from_state(
    state: &RaceState,
    modifiers: PredictionModifiers,
    members: u32,
    seed: u64,
    cancel: Arc<AtomicBool>,
) -> Result<Predictions, PredictorError> {
    if members == 0 {
        return Err(PredictorError::InvalidEnsembleSize(members));
    }
    let mut baseline = state.clone();
    if let Some(weather) = modifiers.weather {
        baseline.weather.condition = weather;
    }
    run_ensemble(baseline, modifiers, members, seed, cancel).await
}

async fn run_ensemble(
    baseline: RaceState,
    modifiers: PredictionModifiers,
    members: u32,
    base_seed: u64,
    cancel: Arc<AtomicBool>,
) -> Result<Predictions, PredictorError> {
    let driver_codes: Vec<String> = baseline.cars.iter().map(|c| c.identity.driver_code.clone()).collect();
    let engine_modifiers = modifiers.into_engine_modifiers();

    let mut handles = Vec::with_capacity(members as usize);
    for i in 0..members {
        let member_seed = engine::rng::ensemble_seed(base_seed, i as u64);
        let member_baseline = baseline.clone();
        let cancel = Arc::clone(&cancel);
        handles.push(tokio::spawn(async move {
            run_member(member_baseline, member_seed, engine_modifiers, cancel)
        }));
    }

    let mut outcomes: Vec<MemberOutcome> = Vec::with_capacity(members as usize);
    for handle in handles {
        match handle.await {
            Ok(Some(outcome)) => outcomes.push(outcome),
            Ok(None) => {} // cancelled before this member ran
            Err(join_err) => {
                tracing::error!(%join_err, "ensemble member task panicked");
            }
        }
    }

    Ok(aggregate(&driver_codes, &outcomes))
}

/// Drives one ensemble member to completion and extracts its final
/// classification. Runs on a blocking-free synchronous path since a single
/// tick is cheap; the surrounding `tokio::spawn` is what gives the ensemble
/// its concurrency, not per-tick `.await` points.
fn run_member(
    mut state: RaceState,
    seed: u64,
    modifiers: crate::engine::commands::Modifiers,
    cancel: Arc<AtomicBool>,
) -> Option<MemberOutcome> {
    if cancel.load(Ordering::Relaxed) {
        return None;
    }

    let mut rng = engine::rng::seeded(seed);
    let mut ctx = EngineContext::default();
    let controls = Controls { driver_commands: Vec::new(), director_commands: Vec::new(), modifiers };

    // A hard cap guards against a scenario whose invariants somehow never
    // settle `is_finished`; a real race at 100ms ticks finishes in well
    // under this many ticks.
    const MAX_TICKS: u64 = 200_000;
    let mut ticks_run = 0u64;
    while !state.is_finished && ticks_run < MAX_TICKS {
        if ticks_run % 256 == 0 && cancel.load(Ordering::Relaxed) {
            return None;
        }
        if engine::tick(&mut state, &mut ctx, &controls, &mut rng).is_err() {
            break;
        }
        ticks_run += 1;
    }

    let mut outcome = MemberOutcome::new();
    for car in &state.cars {
        if !car.is_dnf() {
            outcome.insert(car.identity.driver_code.clone(), car.timing.position);
        }
    }
    Some(outcome)
}

/// Convenience used by the websocket layer when a live session has an
/// attached predictor: reseeds deterministically from the session's own
/// rng draw rather than `hash_seed`, since a mid-race prediction has no
/// fixed scenario-level modifiers identity to hash against.
pub fn fresh_seed(rng: &mut impl Rng) -> u64 {
    rng.random()
}
