//! Link error types.

/// Errors surfaced by the command link.
///
/// Retry handling only ever applies to the receive deadline; I/O failures on
/// the local endpoint propagate immediately because resending cannot fix a
/// broken socket.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// No acknowledgement arrived within the retry budget.
    #[error("command '{command}' got no response after {attempts} attempts")]
    CommandTimeout {
        /// Command text that went unanswered.
        command: String,
        /// Send attempts performed before giving up.
        attempts: u32,
    },

    /// Local endpoint failure (bind, send, or receive).
    #[error("transport error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinkError {
    /// Whether this error is a retry-budget exhaustion (as opposed to a
    /// transport-fatal condition).
    pub fn is_timeout(&self) -> bool {
        matches!(self, LinkError::CommandTimeout { .. })
    }
}
