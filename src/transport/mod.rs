//! Datagram transport abstraction for the command link.
//!
//! The link drives a [`CommandTransport`] rather than a socket directly so
//! tests can substitute a scripted transport. The production implementation
//! is [`UdpLink`].

pub mod udp;

pub use udp::UdpLink;

use async_trait::async_trait;

use crate::error::LinkError;

/// Connectionless transport the command link sends and receives over.
///
/// Implementations own a single endpoint with a fixed target address and a
/// fixed receive deadline. `recv` distinguishes "deadline elapsed with no
/// datagram" (`Ok(None)`, retryable) from endpoint failure (`Err`, fatal).
#[async_trait]
pub trait CommandTransport: Send {
    /// Send one datagram to the fixed target endpoint.
    async fn send(&mut self, payload: &[u8]) -> Result<(), LinkError>;

    /// Await one datagram from any sender, bounded by the receive deadline.
    ///
    /// Returns the number of bytes written into `buf`, or `None` if the
    /// deadline elapsed first.
    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, LinkError>;

    /// Release the endpoint. Called exactly once at session end; any send or
    /// receive after this fails.
    async fn close(&mut self) -> Result<(), LinkError>;
}
