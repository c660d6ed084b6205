//! The live session: wall-clock pacing, command dispatch, and back-pressured
//! streaming over a single viewer connection.

pub mod commands;
pub mod error;
pub mod session;
pub mod snapshot;

pub use commands::SchedulerCommand;
pub use error::SchedulerError;
pub use session::{PlaybackMode, Session};
pub use snapshot::{Snapshot, SnapshotKind};
