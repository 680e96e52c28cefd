use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
    Unknown,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Side {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "BUY" | "LONG" => Side::Buy,
            "SELL" | "SHORT" => Side::Sell,
            _ => Side::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
            Side::Unknown => "?",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
            Side::Unknown => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "OPEN"),
            TradeStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

impl TradeStatus {
    /// Anything the backend does not explicitly mark closed is still open.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("CLOSED") {
            TradeStatus::Closed
        } else {
            TradeStatus::Open
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Bullish,
    Bearish,
    CandleComplete,
    Other,
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalKind::Bullish => write!(f, "bullish"),
            SignalKind::Bearish => write!(f, "bearish"),
            SignalKind::CandleComplete => write!(f, "candle_complete"),
            SignalKind::Other => write!(f, "other"),
        }
    }
}

impl SignalKind {
    pub fn from_label(label: &str) -> Self {
        match label {
            "bullish" => SignalKind::Bullish,
            "bearish" => SignalKind::Bearish,
            "candle_complete" => SignalKind::CandleComplete,
            _ => SignalKind::Other,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SignalKind::Bullish => "📈",
            SignalKind::Bearish => "📉",
            SignalKind::CandleComplete => "🕯️",
            SignalKind::Other => "🔔",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SignalKind::Bullish => "signal-bullish",
            SignalKind::Bearish => "signal-bearish",
            SignalKind::CandleComplete => "signal-candle",
            SignalKind::Other => "signal-other",
        }
    }
}
