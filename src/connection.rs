use std::fmt;

/// Connection banner state. Driven only by transport lifecycle events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    Connect,
    Disconnect,
    Error(String),
}

impl ConnectionState {
    /// Every event is accepted from every state; `Error` is not terminal.
    pub fn transition(&self, event: ConnectionEvent) -> ConnectionState {
        match event {
            ConnectionEvent::Connect => ConnectionState::Connected,
            ConnectionEvent::Disconnect => ConnectionState::Disconnected,
            ConnectionEvent::Error(message) => ConnectionState::Error(message),
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn label(&self) -> String {
        match self {
            ConnectionState::Disconnected => "🔴 Disconnected".to_string(),
            ConnectionState::Connected => "🟢 Connected".to_string(),
            ConnectionState::Error(message) => format!("⚠️ Error: {}", message),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Error(_) => "error",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "DISCONNECTED"),
            ConnectionState::Connected => write!(f, "CONNECTED"),
            ConnectionState::Error(message) => write!(f, "ERROR({})", message),
        }
    }
}
