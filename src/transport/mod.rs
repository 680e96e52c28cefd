pub mod frame;
pub mod replay;
pub mod socketio;

pub use replay::ReplayTransport;
pub use socketio::SocketIoTransport;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Signal, Snapshot, SnapshotUpdate};

/// Inbound events, already decoded from the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    Connect,
    Disconnect,
    InitialData(Snapshot),
    BotUpdate(SnapshotUpdate),
    TradingSignal(Signal),
    Error(String),
}

impl TransportEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TransportEvent::Connect => "connect",
            TransportEvent::Disconnect => "disconnect",
            TransportEvent::InitialData(_) => "initial_data",
            TransportEvent::BotUpdate(_) => "bot_update",
            TransportEvent::TradingSignal(_) => "trading_signal",
            TransportEvent::Error(_) => "error",
        }
    }
}

/// The bidirectional channel to the bot backend.
#[async_trait]
pub trait Transport: Send {
    /// Next inbound event, in arrival order. `None` once the transport is
    /// permanently closed. Must be cancel-safe: the client polls it inside
    /// `tokio::select!` next to its timers.
    async fn next_event(&mut self) -> Option<TransportEvent>;

    /// Ask the backend for a fresh snapshot.
    async fn request_update(&mut self) -> Result<()>;
}
