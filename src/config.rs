//! Link configuration.

use std::net::SocketAddr;

/// Configuration for the command link.
///
/// All knobs are fixed at construction time and apply uniformly to every
/// command sent over the link.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Drone command endpoint (default: `192.168.10.1:8889`, the Tello SDK
    /// address).
    pub target_addr: SocketAddr,
    /// Local UDP port bound for responses (default: 9000). Port 0 lets the
    /// OS assign one.
    pub local_port: u16,
    /// Receive deadline per send attempt, in milliseconds (default: 5000).
    pub timeout_ms: u32,
    /// Total send attempts per command before giving up (default: 3).
    /// Must be at least 1; with 0 every `execute` fails without sending.
    pub max_retries: u32,
    /// Minimum battery percentage required to pass the pre-flight gate
    /// (default: 20).
    pub battery_min_percent: i32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            target_addr: "192.168.10.1:8889".parse().unwrap(),
            local_port: 9000,
            timeout_ms: 5000,
            max_retries: 3,
            battery_min_percent: 20,
        }
    }
}
