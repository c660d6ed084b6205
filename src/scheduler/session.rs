//! The live session: one cooperative task alternating between draining the
//! command queue and invoking the Engine, paced to wall-clock time.
//! Grounded on the donor's `tokio::time::interval` game loop in `main.rs`,
//! generalized from a fixed 100ms tick to speed-scaled pacing plus
//! step/skip/pause control.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::catalogs;
use crate::engine::{self, commands::Controls, EngineContext};
use crate::engine::commands::{DirectorCommand, DriverCommand};
use crate::engine::rng::seeded;
use crate::models::event::Event;
use crate::models::scenario::ScenarioSummary;
use crate::models::state::RaceState;
use crate::predictor::{self, PredictionModifiers};

use super::commands::SchedulerCommand;
use super::error::SchedulerError;
use super::snapshot::{Coalescer, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Paused,
    Playing { speed: u32 },
    Stepping { remaining: u32 },
    SkippingToLap { lap: u32 },
}

pub struct Session {
    state: Option<RaceState>,
    ctx: EngineContext,
    rng: StdRng,
    /// Separate from `rng`: seeds handed to an attached predictor's ensemble
    /// passes. Kept independent so a predictor attachment never perturbs the
    /// session's own `engine::tick` draw sequence, which would break replay
    /// determinism for the live race itself.
    predictor_rng: StdRng,
    mode: PlaybackMode,
    pending_driver_commands: Vec<DriverCommand>,
    pending_director_commands: Vec<DirectorCommand>,
    scenario_id: Option<String>,
    predictor_members: Option<u32>,
}

impl Session {
    pub fn new(seed: u64) -> Self {
        Session {
            state: None,
            ctx: EngineContext::default(),
            rng: seeded(seed),
            predictor_rng: seeded(seed ^ 0x5052_4544_4943_5430),
            mode: PlaybackMode::Paused,
            pending_driver_commands: Vec::new(),
            pending_director_commands: Vec::new(),
            scenario_id: None,
            predictor_members: None,
        }
    }

    pub fn state(&self) -> Option<&RaceState> {
        self.state.as_ref()
    }

    fn validate_speed(speed: u32) -> Result<(), SchedulerError> {
        if matches!(speed, 1 | 5 | 10 | 20) {
            Ok(())
        } else {
            Err(SchedulerError::InvalidSpeed(speed))
        }
    }

    /// Applies a single command, mutating session control state only.
    /// Returns whether the session should immediately run an extra tick
    /// batch (used by step/skip, which are self-paced rather than
    /// wall-clock-paced).
    pub fn apply_command(&mut self, command: SchedulerCommand) -> Result<(), SchedulerError> {
        match command {
            SchedulerCommand::InitScenario { scenario_id } => {
                let scenario = catalogs::get_scenario(&scenario_id)
                    .ok_or_else(|| SchedulerError::UnknownScenario(scenario_id.clone()))?;
                let seed = self.rng_reseed_value();
                self.state = Some(engine::init_state(&scenario, seed)?);
                self.ctx = EngineContext::default();
                self.mode = PlaybackMode::Paused;
                self.scenario_id = Some(scenario_id);
            }
            SchedulerCommand::Start { speed } => {
                self.require_active_race("start")?;
                Self::validate_speed(speed)?;
                self.mode = PlaybackMode::Playing { speed };
            }
            SchedulerCommand::Pause => {
                self.mode = PlaybackMode::Paused;
            }
            SchedulerCommand::Step { n } => {
                self.require_active_race("step")?;
                self.mode = PlaybackMode::Stepping { remaining: n };
            }
            SchedulerCommand::SkipToLap { lap } => {
                self.require_active_race("skip_to_lap")?;
                self.mode = PlaybackMode::SkippingToLap { lap };
            }
            SchedulerCommand::Event { director_command } => {
                self.pending_director_commands.push(director_command);
            }
            SchedulerCommand::DriverCommand { driver_code, kind } => {
                self.pending_driver_commands.push(DriverCommand { driver_code, kind });
            }
            SchedulerCommand::AttachPredictor { members } => {
                self.predictor_members = Some(members.max(1));
            }
            SchedulerCommand::DetachPredictor => {
                self.predictor_members = None;
            }
        }
        Ok(())
    }

    /// Builds the one-off `Init` snapshot for a just-initialized scenario,
    /// sent directly (bypassing the coalescer — it must never be dropped or
    /// merged away, the client needs it to learn the scenario summary).
    fn init_snapshot(&self) -> Option<Snapshot> {
        let state = self.state.clone()?;
        let scenario_id = self.scenario_id.as_ref()?;
        let summary = catalogs::get_scenario(scenario_id).map(|s| ScenarioSummary::from(&s))?;
        Some(Snapshot::init(state, summary))
    }

    /// Runs a fresh ensemble pass from the current live state if a predictor
    /// is attached, for piggybacking onto the next published snapshot.
    async fn maybe_predictions(&mut self) -> Option<predictor::aggregate::Predictions> {
        let members = self.predictor_members?;
        let state = self.state.as_ref()?.clone();
        let seed = predictor::fresh_seed(&mut self.predictor_rng);
        let cancel = Arc::new(AtomicBool::new(false));
        match predictor::predict_from_state(&state, PredictionModifiers::default(), members, seed, cancel).await {
            Ok(predictions) => Some(predictions),
            Err(err) => {
                tracing::warn!(%err, "attached predictor pass failed");
                None
            }
        }
    }

    fn require_active_race(&self, action: &str) -> Result<(), SchedulerError> {
        match &self.state {
            None => Err(SchedulerError::NoScenario),
            Some(s) if s.is_finished => Err(SchedulerError::RaceFinished { action: action.to_string() }),
            Some(_) => Ok(()),
        }
    }

    fn rng_reseed_value(&mut self) -> u64 {
        use rand::Rng;
        self.rng.random()
    }

    /// Advances the race by exactly one tick, draining any commands queued
    /// since the last tick in step 1's FIFO order.
    fn tick_once(&mut self) -> Result<Vec<Event>, SchedulerError> {
        let state = self.state.as_mut().ok_or(SchedulerError::NoScenario)?;
        let controls = Controls {
            driver_commands: std::mem::take(&mut self.pending_driver_commands),
            director_commands: std::mem::take(&mut self.pending_director_commands),
            modifiers: Default::default(),
        };
        let events = engine::tick(state, &mut self.ctx, &controls, &mut self.rng)?;
        Ok(events)
    }

    /// Runs the session until `cmd_rx` closes. Commands are drained at every
    /// pacing deadline; snapshots are pushed through `queue`/`snapshot_tx`
    /// with keep-newest-drop-intermediate coalescing.
    pub async fn run(
        mut self,
        mut cmd_rx: mpsc::Receiver<SchedulerCommand>,
        snapshot_tx: mpsc::Sender<Snapshot>,
    ) {
        let mut coalescer = Coalescer::new();
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                maybe_cmd = cmd_rx.recv() => {
                    match maybe_cmd {
                        Some(cmd) => {
                            let is_init = matches!(cmd, SchedulerCommand::InitScenario { .. });
                            match self.apply_command(cmd) {
                                Ok(()) if is_init => {
                                    if let Some(snapshot) = self.init_snapshot() {
                                        let _ = snapshot_tx.send(snapshot).await;
                                    }
                                }
                                Ok(()) => {}
                                Err(err) => tracing::warn!(%err, "rejected scheduler command"),
                            }
                        }
                        None => break,
                    }
                }
                _ = interval.tick(), if matches!(self.mode, PlaybackMode::Playing { .. }) => {
                    let PlaybackMode::Playing { speed } = self.mode else { unreachable!() };
                    let ticks_due = speed.max(1);
                    self.run_tick_batch(ticks_due, &mut coalescer, &snapshot_tx).await;
                }
            }

            match self.mode {
                PlaybackMode::Stepping { remaining } if remaining > 0 => {
                    self.run_tick_batch(remaining, &mut coalescer, &snapshot_tx).await;
                    self.mode = PlaybackMode::Paused;
                }
                PlaybackMode::SkippingToLap { lap } => {
                    self.run_until_lap(lap, &snapshot_tx).await;
                    self.mode = PlaybackMode::Paused;
                }
                _ => {}
            }

            if self.state.as_ref().map(|s| s.is_finished).unwrap_or(false) {
                self.mode = PlaybackMode::Paused;
            }
        }
    }

    async fn run_tick_batch(&mut self, n: u32, coalescer: &mut Coalescer, snapshot_tx: &mpsc::Sender<Snapshot>) {
        let mut carried = Vec::new();
        for _ in 0..n {
            match self.tick_once() {
                Ok(events) => carried.extend(events),
                Err(err) => {
                    tracing::error!(%err, "engine tick failed");
                    self.mode = PlaybackMode::Paused;
                    break;
                }
            }
            if self.state.as_ref().map(|s| s.is_finished).unwrap_or(false) {
                break;
            }
        }
        if let Some(state) = self.state.clone() {
            let predictions = self.maybe_predictions().await;
            let mut snapshot = Snapshot::new(state);
            snapshot.carried_events = carried;
            snapshot.predictions = predictions;
            coalescer.publish(snapshot_tx, snapshot).await;
        }
    }

    /// `skip_to_lap` never emits intermediate snapshots; only the final one.
    async fn run_until_lap(&mut self, lap: u32, snapshot_tx: &mpsc::Sender<Snapshot>) {
        let mut carried = Vec::new();
        loop {
            let leader_lap = self.state.as_ref().and_then(|s| s.leader()).map(|c| c.timing.lap).unwrap_or(0);
            let finished = self.state.as_ref().map(|s| s.is_finished).unwrap_or(true);
            if leader_lap >= lap || finished {
                break;
            }
            match self.tick_once() {
                Ok(events) => carried.extend(events),
                Err(err) => {
                    tracing::error!(%err, "engine tick failed during skip_to_lap");
                    break;
                }
            }
        }
        if let Some(state) = self.state.clone() {
            let predictions = self.maybe_predictions().await;
            let mut snapshot = Snapshot::new(state);
            snapshot.carried_events = carried;
            snapshot.predictions = predictions;
            let _ = snapshot_tx.send(snapshot).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::commands::DirectorCommand;
    use crate::models::race_control::RaceControlState;

    #[test]
    fn start_without_a_scenario_is_rejected() {
        let mut session = Session::new(1);
        let err = session.apply_command(SchedulerCommand::Start { speed: 1 }).unwrap_err();
        assert!(matches!(err, SchedulerError::NoScenario));
        assert_eq!(session.mode, PlaybackMode::Paused);
    }

    #[test]
    fn unsupported_speed_is_rejected() {
        let mut session = Session::new(1);
        session.apply_command(SchedulerCommand::InitScenario { scenario_id: "spa_strategic".to_string() }).unwrap();
        let err = session.apply_command(SchedulerCommand::Start { speed: 7 }).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidSpeed(7)));
    }

    #[test]
    fn unknown_scenario_is_rejected_and_leaves_no_active_race() {
        let mut session = Session::new(1);
        let err = session.apply_command(SchedulerCommand::InitScenario { scenario_id: "nope".to_string() }).unwrap_err();
        assert!(matches!(err, SchedulerError::UnknownScenario(_)));
        assert!(session.state().is_none());
    }

    #[test]
    fn attach_and_detach_predictor_toggles_member_count() {
        let mut session = Session::new(1);
        session.apply_command(SchedulerCommand::AttachPredictor { members: 50 }).unwrap();
        assert_eq!(session.predictor_members, Some(50));
        session.apply_command(SchedulerCommand::DetachPredictor).unwrap();
        assert_eq!(session.predictor_members, None);
    }

    #[test]
    fn init_scenario_produces_an_init_snapshot_with_the_scenario_summary() {
        let mut session = Session::new(1);
        session.apply_command(SchedulerCommand::InitScenario { scenario_id: "spa_strategic".to_string() }).unwrap();
        let snapshot = session.init_snapshot().expect("init snapshot available after InitScenario");
        let scenario = snapshot.scenario.expect("init snapshot carries scenario summary");
        assert_eq!(scenario.id, "spa_strategic");
    }

    #[test]
    fn step_queues_pending_commands_for_the_next_tick_batch() {
        let mut session = Session::new(1);
        session.apply_command(SchedulerCommand::InitScenario { scenario_id: "spa_strategic".to_string() }).unwrap();
        session.apply_command(SchedulerCommand::Event { director_command: DirectorCommand::SetFlag(RaceControlState::Yellow) }).unwrap();
        assert_eq!(session.pending_director_commands.len(), 1);

        let events = session.tick_once().unwrap();
        assert!(session.pending_director_commands.is_empty());
        assert!(events.iter().any(|e| matches!(e.payload, crate::models::event::EventPayload::FlagChange { .. })));
    }
}
