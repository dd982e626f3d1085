//! Flight plan types.
//!
//! A plan is an ordered script of steps. Plans can be built in code or
//! loaded from a JSON file, e.g.:
//!
//! ```json
//! {
//!   "steps": [
//!     { "command": { "command": "command" } },
//!     { "battery_gate": { "min_percent": 20 } },
//!     { "command": { "command": "takeoff", "settle_s": 5.0 } },
//!     { "command": { "command": "land" } }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

/// One entry in an ordered flight plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionStep {
    /// Send one command, optionally settling afterwards.
    Command {
        /// Command text, sent verbatim (the link does not validate syntax).
        command: String,
        /// Pause after the acknowledgement, in seconds, letting the physical
        /// action complete before the next command. Zero means no pause.
        #[serde(default)]
        settle_s: f32,
    },
    /// Pre-flight battery check; the plan aborts below `min_percent`.
    BatteryGate {
        /// Minimum charge percentage required to continue.
        min_percent: i32,
    },
}

impl MissionStep {
    /// A bare command step with no settle-delay.
    pub fn command(command: impl Into<String>) -> Self {
        MissionStep::Command {
            command: command.into(),
            settle_s: 0.0,
        }
    }

    /// A command step followed by a settle-delay.
    pub fn with_settle(command: impl Into<String>, settle_s: f32) -> Self {
        MissionStep::Command {
            command: command.into(),
            settle_s,
        }
    }
}

/// Ordered mission script executed by [`super::MissionRunner`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightPlan {
    /// Steps, evaluated strictly in order.
    pub steps: Vec<MissionStep>,
}

impl FlightPlan {
    /// The stock plan: enter SDK mode, battery gate, takeoff, forward leg,
    /// quarter turn counter-clockwise, land.
    pub fn standard(battery_min_percent: i32) -> Self {
        Self {
            steps: vec![
                MissionStep::command("command"),
                MissionStep::BatteryGate {
                    min_percent: battery_min_percent,
                },
                MissionStep::with_settle("takeoff", 5.0),
                MissionStep::with_settle("forward 100", 2.0),
                MissionStep::with_settle("ccw 90", 2.0),
                MissionStep::command("land"),
            ],
        }
    }

    /// Parse a plan from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
