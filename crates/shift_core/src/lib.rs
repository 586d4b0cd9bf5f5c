//! Guarded begin/adjust/commit workflow for shifting a frame interval through an external agent.

pub mod agent;
pub mod controller;
pub mod guard;
pub mod host;
pub mod http_agent;

pub use agent::TimeShiftAgent;
pub use controller::{CommitOutcome, ShiftController, SkipReason};
pub use guard::{AlreadyInFlight, FlightPermit, SingleFlight};
pub use host::{ParameterStore, UiContext, UiHost};
pub use http_agent::HttpShiftAgent;
