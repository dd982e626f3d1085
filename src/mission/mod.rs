//! Flight plans, mission lifecycle state, and the mission runner.

pub mod plan;
pub mod runner;
pub mod state;

pub use plan::{FlightPlan, MissionStep};
pub use runner::MissionRunner;
pub use state::{FlightState, MissionOutcome};
