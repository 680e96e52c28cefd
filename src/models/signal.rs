use serde::Deserialize;

use crate::models::lenient;
use crate::models::SignalKind;

/// A trading condition detected by the bot, pushed one at a time.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Signal {
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub kind: String,
    #[serde(deserialize_with = "lenient::string")]
    pub instrument: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timeframe: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub timestamp_ms: f64,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        SignalKind::from_label(&self.kind)
    }

    /// Two signals are the same event when `(timestamp_ms, type, instrument)` match.
    pub fn same_event(&self, other: &Signal) -> bool {
        self.timestamp_ms.to_bits() == other.timestamp_ms.to_bits()
            && self.kind == other.kind
            && self.instrument == other.instrument
    }
}
