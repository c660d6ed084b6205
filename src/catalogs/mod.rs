//! Process-embedded static fixture data: tracks, drivers, teams, tire
//! compounds, and scenarios. No file or database ingestion — the donor's
//! `assets/*.json` + seed-script idea, kept in-process since no catalog
//! ingestion pipeline is in scope.

pub mod compounds;
pub mod drivers;
pub mod scenarios;
pub mod teams;
pub mod tracks;

pub use compounds::{get_compound, list_compounds};
pub use drivers::{driver_code, get_driver, list_drivers};
pub use scenarios::{get_scenario, list_scenarios};
pub use teams::{get_team, list_teams};
pub use tracks::{get_track, list_tracks};

use crate::models::track::TrackSummary;
use crate::models::scenario::ScenarioSummary;

pub fn list_track_summaries() -> Vec<TrackSummary> {
    list_tracks().iter().map(TrackSummary::from).collect()
}

pub fn list_scenario_summaries() -> Vec<ScenarioSummary> {
    list_scenarios().iter().map(ScenarioSummary::from).collect()
}
