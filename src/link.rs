//! Command channel: bounded-retry request/response over a datagram transport.
//!
//! The Tello SDK protocol carries no request identifiers, so the link keeps
//! exactly one command in flight and treats any received datagram as the
//! answer to the most recent send. A reply arriving after the retry budget
//! is spent is simply absorbed when the next call re-arms the receive; that
//! race is a limitation of the device protocol, not something the link tries
//! to correct with fabricated sequence numbers.

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::transport::CommandTransport;

/// Largest response datagram accepted (Tello acknowledgements are far
/// smaller).
pub const MAX_RESPONSE_LEN: usize = 1024;

/// Sentinel battery reading meaning "reading unavailable". Always below any
/// sane gate threshold, so an unreadable battery fails the pre-flight gate.
pub const BATTERY_UNKNOWN: i32 = -1;

/// Retry-wrapped request/response primitive over a [`CommandTransport`].
///
/// Strictly sequential: one `execute` resolves (success or final timeout)
/// before the next command is issued.
pub struct CommandLink<T: CommandTransport> {
    transport: T,
    max_retries: u32,
    recv_buf: Vec<u8>,
}

impl<T: CommandTransport> CommandLink<T> {
    /// Wrap a transport with the configured retry budget.
    pub fn new(transport: T, config: &LinkConfig) -> Self {
        Self {
            transport,
            max_retries: config.max_retries,
            recv_buf: vec![0u8; MAX_RESPONSE_LEN],
        }
    }

    /// Send `command` and wait for one acknowledgement datagram.
    ///
    /// Each attempt performs one send followed by one receive bounded by the
    /// transport's deadline. On deadline expiry the same command is resent,
    /// up to `max_retries` total sends; exhaustion fails with
    /// [`LinkError::CommandTimeout`] carrying the attempt count. The
    /// response is decoded permissively, so garbled or binary replies never
    /// fail the call.
    pub async fn execute(&mut self, command: &str) -> Result<String, LinkError> {
        let mut attempts = 0;
        while attempts < self.max_retries {
            attempts += 1;
            log::debug!(
                "sending command: {command} (attempt {attempts}/{})",
                self.max_retries
            );
            self.transport.send(command.as_bytes()).await?;

            match self.transport.recv(&mut self.recv_buf).await? {
                Some(len) => {
                    let response = String::from_utf8_lossy(&self.recv_buf[..len]).into_owned();
                    log::debug!("response to '{command}': {:?}", response.trim_end());
                    return Ok(response);
                }
                None => {
                    if attempts < self.max_retries {
                        log::warn!(
                            "retry {attempts}/{}: no response for command - {command}",
                            self.max_retries
                        );
                    }
                }
            }
        }

        log::error!("command '{command}' exhausted {attempts} attempts");
        Err(LinkError::CommandTimeout {
            command: command.to_string(),
            attempts,
        })
    }

    /// Query the battery charge percentage.
    ///
    /// Timeouts and unparseable responses fold into [`BATTERY_UNKNOWN`]
    /// rather than an error; the gate treats the sentinel as a failed check.
    /// Only transport-fatal I/O failures surface as `Err`.
    pub async fn read_battery(&mut self) -> Result<i32, LinkError> {
        match self.execute("battery?").await {
            Ok(response) => match response.trim().parse::<i32>() {
                Ok(percent) => Ok(percent),
                Err(_) => {
                    log::warn!("battery response not a number: {:?}", response.trim());
                    Ok(BATTERY_UNKNOWN)
                }
            },
            Err(e) if e.is_timeout() => {
                log::warn!("battery query timed out, reading unavailable");
                Ok(BATTERY_UNKNOWN)
            }
            Err(e) => Err(e),
        }
    }

    /// Release the underlying endpoint. Call exactly once at session end.
    pub async fn close(&mut self) -> Result<(), LinkError> {
        self.transport.close().await
    }
}
