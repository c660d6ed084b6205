pub mod car;
pub mod driver;
pub mod event;
pub mod race_control;
pub mod scenario;
pub mod state;
pub mod team;
pub mod tire;
pub mod track;
pub mod weather;

pub use car::{Car, CarClientData, CarStatus, DrivingMode};
pub use driver::{Driver, DrivingStyle};
pub use event::{Event, EventPayload, EventType};
pub use race_control::RaceControlState;
pub use scenario::{Scenario, ScenarioSummary};
pub use state::{RaceMeta, RaceState};
pub use team::Team;
pub use tire::{Compound, TireState};
pub use track::{Track, TrackSummary};
pub use weather::{Weather, WeatherCondition};
