//! Scripted transport for link and mission tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tello_link::{CommandTransport, LinkError};

/// What one `recv` call observes.
#[derive(Clone)]
pub enum Reply {
    /// Datagram payload delivered before the deadline.
    Data(Vec<u8>),
    /// Deadline elapses with no datagram.
    Timeout,
}

impl Reply {
    pub fn ok() -> Self {
        Reply::Data(b"ok".to_vec())
    }

    pub fn text(s: &str) -> Self {
        Reply::Data(s.as_bytes().to_vec())
    }
}

/// Shared record of everything the transport observed.
#[derive(Default)]
pub struct Recorder {
    sends: Mutex<Vec<String>>,
    closes: AtomicUsize,
}

impl Recorder {
    /// Every payload sent, in order, lossily decoded.
    pub fn sends(&self) -> Vec<String> {
        self.sends.lock().unwrap().clone()
    }

    pub fn send_count(&self) -> usize {
        self.sends.lock().unwrap().len()
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

/// Transport that plays back a fixed reply script, one entry per `recv`.
/// Once the script is exhausted every further `recv` times out.
pub struct ScriptedTransport {
    replies: VecDeque<Reply>,
    recorder: Arc<Recorder>,
}

impl ScriptedTransport {
    pub fn new(replies: Vec<Reply>) -> (Self, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (
            Self {
                replies: replies.into(),
                recorder: Arc::clone(&recorder),
            },
            recorder,
        )
    }

    /// A transport that never answers.
    pub fn silent() -> (Self, Arc<Recorder>) {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl CommandTransport for ScriptedTransport {
    async fn send(&mut self, payload: &[u8]) -> Result<(), LinkError> {
        self.recorder
            .sends
            .lock()
            .unwrap()
            .push(String::from_utf8_lossy(payload).into_owned());
        Ok(())
    }

    async fn recv(&mut self, buf: &mut [u8]) -> Result<Option<usize>, LinkError> {
        match self.replies.pop_front() {
            Some(Reply::Data(payload)) => {
                buf[..payload.len()].copy_from_slice(&payload);
                Ok(Some(payload.len()))
            }
            Some(Reply::Timeout) | None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<(), LinkError> {
        self.recorder.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
