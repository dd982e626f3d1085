//! tello_link - Reliable command delivery for Tello-class UDP drones
//!
//! The Tello SDK protocol is plain ASCII text over UDP with no framing, no
//! sequence numbers, and no delivery guarantee. This crate turns that into a
//! bounded-retry, timeout-bound, strictly sequential request/response
//! primitive, plus a mission runner that chains commands with settle-delays
//! behind a pre-flight battery gate.
//!
//! # Modules
//!
//! - [`transport`]: datagram transport trait and the tokio UDP endpoint
//! - [`link`]: the retry-wrapped command channel and battery query
//! - [`mission`]: flight plans, lifecycle states, and the mission runner
//! - [`config`]: link configuration and defaults
//! - [`error`]: error taxonomy
//!
//! # Protocol note
//!
//! The device answers whichever address last sent it a command; a received
//! datagram is always taken as the reply to the most recent send. That
//! implicit correlation is a limitation of the hardware protocol and is
//! preserved as-is here.

pub mod config;
pub mod error;
pub mod link;
pub mod mission;
pub mod transport;

pub use config::LinkConfig;
pub use error::LinkError;
pub use link::{CommandLink, BATTERY_UNKNOWN, MAX_RESPONSE_LEN};
pub use mission::{FlightPlan, FlightState, MissionOutcome, MissionRunner, MissionStep};
pub use transport::{CommandTransport, UdpLink};
