use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::transport::frame::{self, Packet, SocketPacket};
use crate::transport::{Transport, TransportEvent};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Engine.IO defaults (`pingInterval` 25s + `pingTimeout` 20s), used until
/// the server's handshake says otherwise.
const DEFAULT_PING_WINDOW: Duration = Duration::from_millis(45_000);

/// Socket.IO client over a plain WebSocket. Reconnects on its own after the
/// configured delay; a dropped or silent session surfaces as `Disconnect`.
///
/// All session state (retry deadline, ping deadline, outbound frames) lives
/// in the struct, so a `next_event` call dropped mid-await loses nothing.
pub struct SocketIoTransport {
    url: String,
    reconnect_delay: Duration,
    socket: Option<WsStream>,
    joined: bool,
    pending: VecDeque<TransportEvent>,
    outbox: VecDeque<String>,
    retry_at: Option<Instant>,
    request_buffered: bool,
    ping_window: Duration,
    ping_deadline: Instant,
}

impl SocketIoTransport {
    pub fn new(cfg: &DashboardConfig) -> Self {
        Self::with_reconnect_delay(cfg.backend_url.clone(), cfg.reconnect_delay())
    }

    pub fn with_reconnect_delay(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
            socket: None,
            joined: false,
            pending: VecDeque::new(),
            outbox: VecDeque::new(),
            retry_at: None,
            request_buffered: false,
            ping_window: DEFAULT_PING_WINDOW,
            ping_deadline: Instant::now() + DEFAULT_PING_WINDOW,
        }
    }

    async fn connect(&mut self) {
        if let Some(at) = self.retry_at {
            tokio::time::sleep_until(at).await;
        }

        info!("Connecting to {}", self.url);
        match connect_async(self.url.as_str()).await {
            Ok((ws, _)) => {
                debug!("WebSocket open, waiting for handshake");
                self.socket = Some(ws);
                self.retry_at = None;
                self.ping_window = DEFAULT_PING_WINDOW;
                self.ping_deadline = Instant::now() + self.ping_window;
            }
            Err(e) => {
                warn!("Connection failed: {}", e);
                self.pending.push_back(TransportEvent::Error(e.to_string()));
                self.retry_at = Some(Instant::now() + self.reconnect_delay);
            }
        }
    }

    async fn send(&mut self, text: String) -> Result<()> {
        let socket = self.socket.as_mut().ok_or(DashboardError::NotConnected)?;
        socket.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Send queued frames in order. A frame leaves the queue only once sent.
    async fn flush_outbox(&mut self) {
        while self.socket.is_some() {
            let Some(text) = self.outbox.front().cloned() else {
                return;
            };
            if let Err(e) = self.send(text).await {
                self.lost(&e.to_string());
                return;
            }
            self.outbox.pop_front();
        }
    }

    fn on_text(&mut self, text: &str) {
        self.ping_deadline = Instant::now() + self.ping_window;

        let packet = match frame::decode(text) {
            Ok(p) => p,
            Err(e) => {
                warn!("Dropping frame: {}", e);
                return;
            }
        };

        match packet {
            Packet::Open(handshake) => {
                debug!("Engine.IO handshake: {}", handshake);
                if let Some(window) = ping_window(&handshake) {
                    self.ping_window = window;
                    self.ping_deadline = Instant::now() + window;
                }
                self.outbox.push_back(frame::CONNECT.to_string());
            }
            Packet::Ping => self.outbox.push_back(frame::PONG.to_string()),
            Packet::Pong | Packet::Noop => {}
            Packet::Close => self.lost("server closed the session"),
            Packet::Message(SocketPacket::Connect) => {
                info!("Connected to backend");
                self.joined = true;
                self.pending.push_back(TransportEvent::Connect);
                if std::mem::take(&mut self.request_buffered) {
                    self.outbox.push_back(frame::encode_event(frame::REQUEST_UPDATE));
                }
            }
            Packet::Message(SocketPacket::Disconnect) => self.lost("server disconnected"),
            Packet::Message(SocketPacket::ConnectError(message)) => {
                warn!("Backend refused connection: {}", message);
                self.pending.push_back(TransportEvent::Error(message));
            }
            Packet::Message(SocketPacket::Event { name, payload }) => {
                match frame::into_event(&name, payload) {
                    Ok(Some(event)) => self.pending.push_back(event),
                    Ok(None) => {}
                    Err(e) => warn!("Dropping '{}' event: {}", name, e),
                }
            }
        }
    }

    fn lost(&mut self, reason: &str) {
        warn!("Connection lost: {}", reason);
        self.socket = None;
        if self.joined {
            self.joined = false;
            self.pending.push_back(TransportEvent::Disconnect);
        }

        // Frames belong to the dead session; only a pending update request
        // carries over.
        let request = frame::encode_event(frame::REQUEST_UPDATE);
        if self.outbox.drain(..).any(|text| text == request) {
            self.request_buffered = true;
        }
        self.retry_at = Some(Instant::now() + self.reconnect_delay);
    }
}

/// `pingInterval + pingTimeout` from an Engine.IO open packet.
fn ping_window(handshake: &Value) -> Option<Duration> {
    let interval = handshake.get("pingInterval")?.as_u64()?;
    let timeout = handshake.get("pingTimeout")?.as_u64()?;
    Some(Duration::from_millis(interval + timeout))
}

#[async_trait]
impl Transport for SocketIoTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        loop {
            self.flush_outbox().await;

            if let Some(event) = self.pending.pop_front() {
                return Some(event);
            }

            let deadline = self.ping_deadline;
            let Some(socket) = self.socket.as_mut() else {
                self.connect().await;
                continue;
            };

            let read = tokio::select! {
                message = socket.next() => Some(message),
                _ = tokio::time::sleep_until(deadline) => None,
            };
            let Some(message) = read else {
                self.lost("ping timeout");
                continue;
            };

            match message {
                Some(Ok(Message::Text(text))) => self.on_text(&text),
                Some(Ok(Message::Close(close))) => {
                    self.lost(&format!("close frame {:?}", close));
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    self.lost(&e.to_string());
                    self.pending.push_back(TransportEvent::Error(e.to_string()));
                }
                None => self.lost("stream ended"),
            }
        }
    }

    async fn request_update(&mut self) -> Result<()> {
        if !self.joined {
            debug!("Not connected, buffering request_update");
            self.request_buffered = true;
            return Ok(());
        }
        self.send(frame::encode_event(frame::REQUEST_UPDATE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    type ServerWs = WebSocketStream<TcpStream>;

    const WAIT: Duration = Duration::from_secs(5);

    async fn listen() -> (TcpListener, String) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!(
            "ws://{}/socket.io/?EIO=4&transport=websocket",
            listener.local_addr().unwrap()
        );
        (listener, url)
    }

    async fn accept(listener: &TcpListener) -> ServerWs {
        let (tcp, _) = listener.accept().await.unwrap();
        accept_async(tcp).await.unwrap()
    }

    async fn send(ws: &mut ServerWs, text: &str) {
        ws.send(Message::Text(text.to_string())).await.unwrap();
    }

    async fn recv(ws: &mut ServerWs) -> String {
        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => return text,
                Some(Ok(_)) => continue,
                other => panic!("server expected a text frame, got {:?}", other),
            }
        }
    }

    /// Engine.IO open plus namespace join, as the backend does it.
    async fn handshake(ws: &mut ServerWs, ping_interval: u64, ping_timeout: u64) {
        send(
            ws,
            &format!(
                r#"0{{"sid":"abc","upgrades":[],"pingInterval":{},"pingTimeout":{}}}"#,
                ping_interval, ping_timeout
            ),
        )
        .await;
        assert_eq!(recv(ws).await, "40");
        send(ws, r#"40{"sid":"def"}"#).await;
    }

    async fn next(t: &mut SocketIoTransport) -> TransportEvent {
        timeout(WAIT, t.next_event())
            .await
            .expect("transport produced no event")
            .expect("transport closed")
    }

    #[test]
    fn ping_window_reads_handshake() {
        let handshake = serde_json::json!({"pingInterval": 25000, "pingTimeout": 20000});
        assert_eq!(ping_window(&handshake), Some(Duration::from_secs(45)));
        assert_eq!(ping_window(&serde_json::json!({"sid": "x"})), None);
    }

    #[tokio::test]
    async fn joins_answers_pings_and_flushes_buffered_request() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(async move {
            let mut ws = accept(&listener).await;
            handshake(&mut ws, 25_000, 20_000).await;
            assert_eq!(recv(&mut ws).await, r#"42["request_update"]"#);
            send(&mut ws, "2").await;
            assert_eq!(recv(&mut ws).await, "3");
            send(&mut ws, r#"42["bot_update",{"status":"LIVE"}]"#).await;
            // Hold the socket until the client goes away.
            let _ = ws.next().await;
        });

        let mut t = SocketIoTransport::with_reconnect_delay(url, Duration::from_millis(50));
        t.request_update().await.unwrap();

        assert_eq!(next(&mut t).await, TransportEvent::Connect);
        match next(&mut t).await {
            TransportEvent::BotUpdate(update) => {
                assert_eq!(update.status.as_deref(), Some("LIVE"));
            }
            other => panic!("expected bot_update, got {:?}", other),
        }

        drop(t);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn silent_server_times_out_as_disconnect() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(async move {
            let mut ws = accept(&listener).await;
            handshake(&mut ws, 100, 100).await;
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(ws);
        });

        let mut t = SocketIoTransport::with_reconnect_delay(url, Duration::from_secs(30));
        assert_eq!(next(&mut t).await, TransportEvent::Connect);
        assert_eq!(next(&mut t).await, TransportEvent::Disconnect);

        server.abort();
    }

    #[tokio::test]
    async fn reconnects_after_dropped_session() {
        let (listener, url) = listen().await;
        let server = tokio::spawn(async move {
            let mut first = accept(&listener).await;
            handshake(&mut first, 25_000, 20_000).await;
            // Drop without a close handshake.
            drop(first);

            let mut second = accept(&listener).await;
            handshake(&mut second, 25_000, 20_000).await;
            let _ = second.next().await;
        });

        let mut t = SocketIoTransport::with_reconnect_delay(url, Duration::from_millis(50));
        assert_eq!(next(&mut t).await, TransportEvent::Connect);
        assert_eq!(next(&mut t).await, TransportEvent::Disconnect);

        // A reset without a close frame may also report the socket error.
        let mut event = next(&mut t).await;
        while let TransportEvent::Error(_) = event {
            event = next(&mut t).await;
        }
        assert_eq!(event, TransportEvent::Connect);

        drop(t);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_reports_error_and_retries() {
        let (listener, url) = listen().await;
        drop(listener);

        let mut t = SocketIoTransport::with_reconnect_delay(url, Duration::from_millis(20));
        assert!(matches!(next(&mut t).await, TransportEvent::Error(_)));
        // Second attempt after the delay fails the same way.
        assert!(matches!(next(&mut t).await, TransportEvent::Error(_)));
    }

    #[tokio::test]
    async fn lost_session_keeps_unsent_update_request() {
        let mut t = SocketIoTransport::with_reconnect_delay("ws://unused", Duration::from_secs(1));
        t.joined = true;
        t.outbox.push_back(frame::PONG.to_string());
        t.outbox.push_back(frame::encode_event(frame::REQUEST_UPDATE));

        t.lost("test");

        assert!(t.outbox.is_empty());
        assert!(t.request_buffered);
        assert_eq!(t.pending.pop_front(), Some(TransportEvent::Disconnect));
    }
}
