//! Tokio UDP endpoint bound to a fixed local port.
//!
//! One socket for the whole session: the Tello replies to whatever address
//! last sent it a command, so the link binds a known local port once and
//! reuses it for every exchange.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tokio::time::timeout;

use super::CommandTransport;
use crate::config::LinkConfig;
use crate::error::LinkError;

/// UDP transport: one bound socket, one target address, reused for every
/// command until closed.
pub struct UdpLink {
    socket: Option<UdpSocket>,
    target: SocketAddr,
    recv_timeout: Duration,
}

impl UdpLink {
    /// Bind `0.0.0.0:{local_port}` and fix the target address.
    pub async fn bind(config: &LinkConfig) -> Result<Self, LinkError> {
        let socket = UdpSocket::bind(("0.0.0.0", config.local_port)).await?;
        log::debug!(
            "UDP endpoint bound to {}, target {}",
            socket.local_addr()?,
            config.target_addr
        );

        Ok(Self {
            socket: Some(socket),
            target: config.target_addr,
            recv_timeout: Duration::from_millis(u64::from(config.timeout_ms)),
        })
    }

    /// Local address of the bound socket. Useful when binding port 0.
    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> {
        Ok(self.socket()?.local_addr()?)
    }

    fn socket(&self) -> Result<&UdpSocket, LinkError> {
        self.socket
            .as_ref()
            .ok_or_else(|| LinkError::Io(io::Error::new(io::ErrorKind::NotConnected, "endpoint closed")))
    }
}

#[async_trait]
impl CommandTransport for UdpLink {
    async fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        self.socket()?.send_to(payload, self.target).await?;
        Ok(())
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, LinkError> {
        let socket = self.socket()?;
        match timeout(self.recv_timeout, socket.recv_from(buf)).await {
            Ok(Ok((len, _addr))) => Ok(Some(len)),
            Ok(Err(e)) => Err(LinkError::Io(e)),
            Err(_) => Ok(None), // Deadline elapsed: no datagram this attempt
        }
    }

    async fn close(&mut self) -> Result<(), LinkError> {
        // Dropping the socket releases the port.
        self.socket = None;
        Ok(())
    }
}
