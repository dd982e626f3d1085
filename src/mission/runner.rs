//! Mission runner: ordered plan execution with a pre-flight gate.
//!
//! The runner never retries at this layer — delivery retries belong to the
//! command link. Any exhausted retry budget terminates the plan immediately,
//! and `land` is deliberately not sent on that path: with the device already
//! unresponsive, cleanup is limited to releasing the endpoint.

use std::time::Duration;

use tokio::time::sleep;

use super::plan::{FlightPlan, MissionStep};
use super::state::{FlightState, MissionOutcome};
use crate::link::CommandLink;
use crate::transport::CommandTransport;

/// Executes a [`FlightPlan`] over a [`CommandLink`], one step at a time.
pub struct MissionRunner<T: CommandTransport> {
    link: CommandLink<T>,
    state: FlightState,
}

impl<T: CommandTransport> MissionRunner<T> {
    /// Take ownership of the link; it is released when the run finishes.
    pub fn new(link: CommandLink<T>) -> Self {
        Self {
            link,
            state: FlightState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FlightState {
        self.state
    }

    /// Run the plan to a terminal outcome.
    ///
    /// Consumes the runner: whichever path the plan takes — completion, gate
    /// abort, or mid-flight failure — the endpoint is closed exactly once
    /// before this returns.
    pub async fn run(mut self, plan: &FlightPlan) -> MissionOutcome {
        let outcome = self.execute_plan(plan).await;

        if let Err(e) = self.link.close().await {
            log::warn!("endpoint close failed: {e}");
        }
        if self.state != FlightState::Aborted {
            self.transition(FlightState::Closed);
        }

        match &outcome {
            MissionOutcome::Completed => log::info!("mission completed"),
            MissionOutcome::AbortedLowBattery => log::warn!("mission aborted: low battery"),
            MissionOutcome::Failed(reason) => log::error!("mission failed: {reason}"),
        }
        outcome
    }

    async fn execute_plan(&mut self, plan: &FlightPlan) -> MissionOutcome {
        for step in &plan.steps {
            match step {
                MissionStep::Command { command, settle_s } => {
                    if let Err(e) = self.link.execute(command).await {
                        return MissionOutcome::Failed(e.to_string());
                    }
                    self.advance_for(command);
                    if *settle_s > 0.0 {
                        // Plan files are untrusted input: a non-finite or
                        // oversized settle must not take the runner down.
                        match Duration::try_from_secs_f32(*settle_s) {
                            Ok(settle) => {
                                log::debug!("settling {settle_s}s after '{command}'");
                                sleep(settle).await;
                            }
                            Err(_) => {
                                log::warn!(
                                    "ignoring unrepresentable settle of {settle_s}s after '{command}'"
                                );
                            }
                        }
                    }
                }
                MissionStep::BatteryGate { min_percent } => {
                    self.transition(FlightState::GateCheck);
                    let percent = match self.link.read_battery().await {
                        Ok(p) => p,
                        Err(e) => return MissionOutcome::Failed(e.to_string()),
                    };
                    // The -1 sentinel lands here too: an unreadable battery
                    // is treated exactly like a low one.
                    if percent < *min_percent {
                        log::warn!("battery gate failed: {percent}% < {min_percent}%");
                        self.transition(FlightState::Aborted);
                        return MissionOutcome::AbortedLowBattery;
                    }
                    log::info!("battery gate passed: {percent}%");
                }
            }
        }

        self.transition(FlightState::Landed);
        MissionOutcome::Completed
    }

    /// Track coarse lifecycle progress from the acknowledged command.
    fn advance_for(&mut self, command: &str) {
        match command {
            "command" => self.transition(FlightState::ModeSet),
            "takeoff" => self.transition(FlightState::Flying),
            "land" => self.transition(FlightState::Landed),
            _ => {}
        }
    }

    fn transition(&mut self, next: FlightState) {
        if self.state != next {
            log::debug!("mission state: {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }
}
