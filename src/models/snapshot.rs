use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::models::lenient;
use crate::models::{Position, Signal, Trade};

/// Complete client-side view of the bot. Every field always holds a value:
/// either the last one received or its default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(deserialize_with = "lenient::f64")]
    pub account_balance: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub floating_pnl: f64,
    #[serde(deserialize_with = "lenient::u64")]
    pub open_positions: u64,
    #[serde(deserialize_with = "lenient::u64")]
    pub total_trades: u64,
    #[serde(deserialize_with = "lenient::u64")]
    pub winning_trades: u64,
    #[serde(deserialize_with = "lenient::u64")]
    pub losing_trades: u64,
    #[serde(deserialize_with = "lenient::f64")]
    pub win_rate: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub profit_factor: f64,
    #[serde(deserialize_with = "lenient::seq")]
    pub active_positions: Vec<Position>,
    #[serde(deserialize_with = "lenient::seq")]
    pub recent_trades: Vec<Trade>,
    #[serde(deserialize_with = "lenient::seq")]
    pub trading_signals: Vec<Signal>,
    #[serde(deserialize_with = "lenient::map")]
    pub config: BTreeMap<String, Value>,
}

/// A partial push from the backend. `None` means the key was absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnapshotUpdate {
    #[serde(default, deserialize_with = "lenient::present_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::present_f64")]
    pub account_balance: Option<f64>,
    #[serde(default, deserialize_with = "lenient::present_f64")]
    pub floating_pnl: Option<f64>,
    #[serde(default, deserialize_with = "lenient::present_u64")]
    pub open_positions: Option<u64>,
    #[serde(default, deserialize_with = "lenient::present_u64")]
    pub total_trades: Option<u64>,
    #[serde(default, deserialize_with = "lenient::present_u64")]
    pub winning_trades: Option<u64>,
    #[serde(default, deserialize_with = "lenient::present_u64")]
    pub losing_trades: Option<u64>,
    #[serde(default, deserialize_with = "lenient::present_f64")]
    pub win_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::present_f64")]
    pub profit_factor: Option<f64>,
    #[serde(default, deserialize_with = "lenient::present_seq")]
    pub active_positions: Option<Vec<Position>>,
    #[serde(default, deserialize_with = "lenient::present_seq")]
    pub recent_trades: Option<Vec<Trade>>,
    #[serde(default, deserialize_with = "lenient::present_seq")]
    pub trading_signals: Option<Vec<Signal>>,
    #[serde(default, deserialize_with = "lenient::present_map")]
    pub config: Option<BTreeMap<String, Value>>,
}

impl SnapshotUpdate {
    /// Number of keys the update carries.
    pub fn field_count(&self) -> usize {
        [
            self.status.is_some(),
            self.account_balance.is_some(),
            self.floating_pnl.is_some(),
            self.open_positions.is_some(),
            self.total_trades.is_some(),
            self.winning_trades.is_some(),
            self.losing_trades.is_some(),
            self.win_rate.is_some(),
            self.profit_factor.is_some(),
            self.active_positions.is_some(),
            self.recent_trades.is_some(),
            self.trading_signals.is_some(),
            self.config.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }
}
