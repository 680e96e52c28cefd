use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed frame: {0}")]
    Frame(String),

    #[error("invalid `{event}` payload: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("transport is not connected")]
    NotConnected,

    #[error("notification failed: {0}")]
    Notify(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
