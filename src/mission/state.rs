//! Mission lifecycle state types.

/// Mission lifecycle.
///
/// `Aborted` and `Closed` are terminal. `Closed` is reached after `Landed`
/// or via the failure path; `Aborted` means the battery gate failed before
/// takeoff was ever sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FlightState {
    /// No mission activity yet.
    #[default]
    Idle,
    /// SDK mode entered (`command` acknowledged).
    ModeSet,
    /// Battery gate in progress.
    GateCheck,
    /// Airborne, executing motion steps.
    Flying,
    /// `land` acknowledged or plan completed.
    Landed,
    /// Battery gate failed; takeoff was never sent.
    Aborted,
    /// Endpoint released.
    Closed,
}

/// Terminal result of a mission run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MissionOutcome {
    /// Every step completed and the vehicle landed.
    Completed,
    /// Pre-flight battery gate failed (low or unreadable charge).
    AbortedLowBattery,
    /// A command went unanswered or the endpoint broke mid-flight.
    Failed(String),
}
