//! Outgoing snapshots and back-pressure coalescing. Grounded on the donor's
//! per-client broadcast loop in `main.rs::broadcast_state`, generalized from
//! an unconditional fan-out to a single-viewer channel with keep-newest
//! coalescing when the viewer falls behind.

use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::event::Event;
use crate::models::scenario::ScenarioSummary;
use crate::models::state::RaceState;
use crate::predictor::aggregate::Predictions;

/// Which server->client message shape this snapshot becomes on the wire.
/// `Init` carries the scenario summary and is sent once, right after
/// `init_scenario` succeeds, ahead of any tick; everything else is keyed off
/// `state.is_finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Init,
    State,
}

#[derive(Serialize, Debug, Clone)]
pub struct Snapshot {
    pub state: RaceState,
    /// Events skipped by coalesced snapshots, folded into the next one that
    /// actually gets sent, so no event is silently dropped even though
    /// intermediate state snapshots are.
    pub carried_events: Vec<Event>,
    /// Piggybacked ensemble predictions, present only when the session has a
    /// predictor attached and a fresh pass completed in time for this
    /// snapshot.
    pub predictions: Option<Predictions>,
    /// Present only on the one-off `Init` snapshot.
    pub scenario: Option<ScenarioSummary>,
    #[serde(skip)]
    pub kind: SnapshotKind,
}

impl Snapshot {
    pub fn new(state: RaceState) -> Self {
        Snapshot { state, carried_events: Vec::new(), predictions: None, scenario: None, kind: SnapshotKind::State }
    }

    pub fn init(state: RaceState, scenario: ScenarioSummary) -> Self {
        Snapshot { state, carried_events: Vec::new(), predictions: None, scenario: Some(scenario), kind: SnapshotKind::Init }
    }
}

/// Keep-newest-drop-intermediate publisher: a bounded channel's capacity is
/// the back-pressure threshold. When the channel is full, `publish` never
/// awaits — it folds the new snapshot's events onto whatever is already
/// waiting and keeps the newest state, so the viewer's queue never grows but
/// no event record is lost.
pub struct Coalescer {
    pending: Option<Snapshot>,
}

impl Coalescer {
    pub fn new() -> Self {
        Coalescer { pending: None }
    }

    /// Attempts to flush any previously coalesced snapshot, then tries the
    /// new one. Non-blocking: falls back to coalescing on a full channel.
    pub async fn publish(&mut self, tx: &mpsc::Sender<Snapshot>, mut next: Snapshot) {
        if let Some(mut prev) = self.pending.take() {
            prev.carried_events.append(&mut next.carried_events);
            next.carried_events = prev.carried_events;
        }
        match tx.try_send(next) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(snapshot)) => {
                self.pending = Some(snapshot);
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {}
        }
    }
}

impl Default for Coalescer {
    fn default() -> Self {
        Self::new()
    }
}
