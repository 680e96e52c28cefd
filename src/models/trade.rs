use serde::Deserialize;

use crate::models::lenient;
use crate::models::{Side, TradeStatus};

/// A trade from the backend history. Never edited client-side.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Trade {
    #[serde(deserialize_with = "lenient::maybe_string", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient::string")]
    pub side: String,
    #[serde(deserialize_with = "lenient::string")]
    pub instrument: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timeframe: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub entry: f64,
    #[serde(deserialize_with = "lenient::maybe_f64", skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,
    #[serde(deserialize_with = "lenient::f64")]
    pub pnl: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::string")]
    pub timestamp: String,
    #[serde(deserialize_with = "lenient::maybe_string", skip_serializing_if = "Option::is_none")]
    pub close_time: Option<String>,
}

impl Trade {
    pub fn side(&self) -> Side {
        Side::from_label(&self.side)
    }

    pub fn status(&self) -> TradeStatus {
        TradeStatus::from_label(&self.status)
    }

    pub fn is_closed(&self) -> bool {
        self.status() == TradeStatus::Closed
    }
}
