//! Engine.IO v4 / Socket.IO v5 text framing, the subset the backend speaks.
//!
//! Engine.IO packets are a single type digit followed by data. Socket.IO
//! packets ride inside Engine.IO `4` (message) packets:
//! `40` connect, `41` disconnect, `42["event", payload]`, `44{..}` connect error.

use serde_json::{json, Value};
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{Signal, Snapshot, SnapshotUpdate};
use crate::transport::TransportEvent;

pub const PONG: &str = "3";
pub const CONNECT: &str = "40";
pub const REQUEST_UPDATE: &str = "request_update";

#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Open(Value),
    Close,
    Ping,
    Pong,
    Noop,
    Message(SocketPacket),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect,
    Disconnect,
    Event { name: String, payload: Value },
    ConnectError(String),
}

pub fn decode(text: &str) -> Result<Packet> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| DashboardError::Frame("empty frame".to_string()))?;
    let rest = chars.as_str();

    match kind {
        '0' => Ok(Packet::Open(
            serde_json::from_str(rest).unwrap_or(Value::Null),
        )),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket(rest).map(Packet::Message),
        '6' => Ok(Packet::Noop),
        other => Err(DashboardError::Frame(format!(
            "unknown engine.io packet type '{}'",
            other
        ))),
    }
}

fn decode_socket(text: &str) -> Result<SocketPacket> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| DashboardError::Frame("empty socket.io packet".to_string()))?;
    let body = strip_namespace_and_ack(chars.as_str());

    match kind {
        '0' => Ok(SocketPacket::Connect),
        '1' => Ok(SocketPacket::Disconnect),
        '2' => {
            let items: Vec<Value> = serde_json::from_str(body)
                .map_err(|e| DashboardError::Frame(format!("bad event body: {}", e)))?;
            let mut items = items.into_iter();
            let name = match items.next() {
                Some(Value::String(name)) => name,
                _ => return Err(DashboardError::Frame("event without name".to_string())),
            };
            Ok(SocketPacket::Event {
                name,
                payload: items.next().unwrap_or(Value::Null),
            })
        }
        '4' => {
            let message = serde_json::from_str::<Value>(body)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| body.to_string());
            Ok(SocketPacket::ConnectError(message))
        }
        other => Err(DashboardError::Frame(format!(
            "unsupported socket.io packet type '{}'",
            other
        ))),
    }
}

/// Skip an optional `/namespace,` prefix and numeric ack id.
fn strip_namespace_and_ack(body: &str) -> &str {
    let body = if body.starts_with('/') {
        body.split_once(',').map(|(_, rest)| rest).unwrap_or("")
    } else {
        body
    };
    body.trim_start_matches(|c: char| c.is_ascii_digit())
}

/// `42["name"]`, the only outbound event shape the dashboard needs.
pub fn encode_event(name: &str) -> String {
    format!("42{}", json!([name]))
}

/// Map a named event onto a [`TransportEvent`]. Unknown events yield `None`.
pub fn into_event(name: &str, payload: Value) -> Result<Option<TransportEvent>> {
    let payload_err = |source| DashboardError::Payload {
        event: name.to_string(),
        source,
    };

    let event = match name {
        "initial_data" => TransportEvent::InitialData(
            serde_json::from_value::<Snapshot>(payload).map_err(payload_err)?,
        ),
        "bot_update" => TransportEvent::BotUpdate(
            serde_json::from_value::<SnapshotUpdate>(payload).map_err(payload_err)?,
        ),
        "trading_signal" => TransportEvent::TradingSignal(
            serde_json::from_value::<Signal>(payload).map_err(payload_err)?,
        ),
        "error" => TransportEvent::Error(match payload {
            Value::String(s) => s,
            other => other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        }),
        other => {
            debug!("Ignoring unknown event '{}'", other);
            return Ok(None);
        }
    };
    Ok(Some(event))
}
