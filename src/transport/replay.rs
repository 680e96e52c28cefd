use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;
use crate::transport::frame::{self, Packet, SocketPacket};
use crate::transport::{Transport, TransportEvent};

/// Plays back a captured Socket.IO session, one raw frame per line.
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Default)]
pub struct ReplayTransport {
    events: VecDeque<TransportEvent>,
    requests: usize,
}

impl ReplayTransport {
    pub fn from_frames(text: &str) -> Self {
        let mut events = VecDeque::new();

        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let packet = match frame::decode(line) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Line {}: {}", lineno + 1, e);
                    continue;
                }
            };

            let event = match packet {
                Packet::Message(SocketPacket::Connect) => Some(TransportEvent::Connect),
                Packet::Message(SocketPacket::Disconnect) | Packet::Close => {
                    Some(TransportEvent::Disconnect)
                }
                Packet::Message(SocketPacket::ConnectError(message)) => {
                    Some(TransportEvent::Error(message))
                }
                Packet::Message(SocketPacket::Event { name, payload }) => {
                    match frame::into_event(&name, payload) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!("Line {}: {}", lineno + 1, e);
                            None
                        }
                    }
                }
                Packet::Open(_) | Packet::Ping | Packet::Pong | Packet::Noop => None,
            };

            events.extend(event);
        }

        debug!("Loaded {} replay events", events.len());
        Self {
            events,
            requests: 0,
        }
    }

    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Self::from_frames(&text))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// `request_update` calls received during the replay.
    pub fn requests(&self) -> usize {
        self.requests
    }
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        self.events.pop_front()
    }

    async fn request_update(&mut self) -> Result<()> {
        self.requests += 1;
        Ok(())
    }
}
