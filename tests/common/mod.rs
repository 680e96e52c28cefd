use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

use bot_dashboard::config::DashboardConfig;
use bot_dashboard::error::Result;
use bot_dashboard::transport::{Transport, TransportEvent};

/// A transport that delivers events at fixed offsets from its creation and
/// records when `request_update` was called. Use with paused tokio time.
pub struct ScriptedTransport {
    start: Instant,
    script: VecDeque<(Duration, TransportEvent)>,
    close_at: Duration,
    pub requests: Vec<Duration>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<(u64, TransportEvent)>, close_at_ms: u64) -> Self {
        Self {
            start: Instant::now(),
            script: script
                .into_iter()
                .map(|(ms, event)| (Duration::from_millis(ms), event))
                .collect(),
            close_at: Duration::from_millis(close_at_ms),
            requests: Vec::new(),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        // Deadlines are absolute, so a cancelled call just waits again.
        match self.script.front() {
            Some((at, _)) => {
                tokio::time::sleep_until(self.start + *at).await;
                self.script.pop_front().map(|(_, event)| event)
            }
            None => {
                tokio::time::sleep_until(self.start + self.close_at).await;
                None
            }
        }
    }

    async fn request_update(&mut self) -> Result<()> {
        self.requests.push(self.start.elapsed());
        Ok(())
    }
}

pub fn test_config() -> DashboardConfig {
    DashboardConfig {
        sound_enabled: false,
        output_path: std::env::temp_dir()
            .join(format!("bot_dashboard_integ_{}.html", std::process::id())),
        ..DashboardConfig::default()
    }
}

/// Payload shaped like the backend's `initial_data` emit.
pub fn initial_payload() -> Value {
    json!({
        "status": "LIVE",
        "account_balance": 10000,
        "floating_pnl": 0,
        "open_positions": 1,
        "total_trades": 2,
        "winning_trades": 1,
        "losing_trades": 1,
        "win_rate": 50.0,
        "active_positions": [{
            "id": "BTC_USD_M5_1700000000",
            "type": "BUY",
            "instrument": "BTC_USD",
            "timeframe": "M5",
            "entry": 100.0,
            "sl": 98.0,
            "tp": 103.0,
            "timestamp": "12:00:00",
            "pnl": 25.0,
            "status": "OPEN"
        }],
        "recent_trades": [
            {"type": "SELL", "instrument": "XAU_USD", "timeframe": "M15", "entry": 2050.0,
             "exit_price": 2040.0, "pnl": 10.0, "status": "CLOSED", "timestamp": "10:00:00"},
            {"type": "BUY", "instrument": "BTC_USD", "timeframe": "M5", "entry": 100.0,
             "pnl": 0, "status": "OPEN", "timestamp": "12:00:00"}
        ],
        "trading_signals": [
            {"type": "bullish", "message": "Hammer", "instrument": "BTC_USD",
             "timeframe": "M5", "timestamp": "11:59:00", "timestamp_ms": 1700000000.1}
        ],
        "config": {
            "buy_sl_mult": 1.0,
            "buy_tp_mult": 1.5,
            "instruments": ["BTC_USD", "XAU_USD"]
        }
    })
}

pub fn signal_payload(kind: &str, instrument: &str, timestamp_ms: f64) -> Value {
    json!({
        "type": kind,
        "message": format!("{} candle", kind),
        "instrument": instrument,
        "timeframe": "M5",
        "timestamp": "12:00:00",
        "timestamp_ms": timestamp_ms
    })
}
