use std::path::PathBuf;
use std::time::Duration;

/// Maximum number of signals kept client-side.
pub const MAX_SIGNALS: usize = 50;
/// Number of signals shown in the feed.
pub const SIGNALS_DISPLAYED: usize = 20;
/// Number of trades shown in the recent trades list.
pub const TRADES_DISPLAYED: usize = 10;

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    // Transport
    pub backend_url: String,
    pub reconnect_delay_secs: u64,

    // Polling
    pub initial_request_delay_ms: u64,
    pub poll_interval_secs: u64,

    // Presentation
    pub win_rate_threshold: f64,
    pub output_path: PathBuf,
    pub sound_enabled: bool,

    // Logging
    pub log_level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket".to_string(),
            reconnect_delay_secs: 2,
            initial_request_delay_ms: 1000,
            poll_interval_secs: 5,
            win_rate_threshold: 50.0,
            output_path: PathBuf::from("dashboard.html"),
            sound_enabled: true,
            log_level: "INFO".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to defaults.
    pub fn from_lookup(env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        DashboardConfig {
            backend_url: env("BACKEND_URL").unwrap_or(defaults.backend_url),
            reconnect_delay_secs: env("RECONNECT_DELAY_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.reconnect_delay_secs),
            initial_request_delay_ms: env("INITIAL_REQUEST_DELAY_MS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_request_delay_ms),
            poll_interval_secs: env("POLL_INTERVAL_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|&secs: &u64| secs > 0)
                .unwrap_or(defaults.poll_interval_secs),
            win_rate_threshold: env("WIN_RATE_THRESHOLD")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.win_rate_threshold),
            output_path: env("OUTPUT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_path),
            sound_enabled: env("SOUND_ENABLED")
                .map(|s| s.to_lowercase() == "true")
                .unwrap_or(defaults.sound_enabled),
            log_level: env("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }

    pub fn initial_request_delay(&self) -> Duration {
        Duration::from_millis(self.initial_request_delay_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}
