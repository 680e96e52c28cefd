use serde::Deserialize;

use crate::models::lenient;
use crate::models::Side;

/// An open position as reported by the backend. Replaced wholesale on every
/// update that carries the position list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Position {
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
    #[serde(rename = "sl", alias = "stop_loss", deserialize_with = "lenient::f64")]
    pub stop_loss: f64,
    #[serde(rename = "tp", alias = "take_profit", deserialize_with = "lenient::f64")]
    pub take_profit: f64,
    #[serde(deserialize_with = "lenient::f64")]
    pub pnl: f64,
    #[serde(deserialize_with = "lenient::maybe_f64", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    #[serde(deserialize_with = "lenient::string")]
    pub timestamp: String,
}

impl Position {
    pub fn side(&self) -> Side {
        Side::from_label(&self.side)
    }

    /// P&L relative to the entry price, in percent. A zero entry yields a
    /// non-finite value; callers display it as-is.
    pub fn pnl_percent(&self) -> f64 {
        self.pnl / self.entry * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_shape() {
        let pos: Position = serde_json::from_value(json!({
            "id": "BTC_USD_M5_1700000000",
            "type": "BUY",
            "instrument": "BTC_USD",
            "timeframe": "M5",
            "entry": 43000.5,
            "sl": 42800.0,
            "tp": 43300.0,
            "timestamp": "12:30:00",
            "pnl": 12.5,
            "status": "OPEN"
        }))
        .unwrap();

        assert_eq!(pos.id.as_deref(), Some("BTC_USD_M5_1700000000"));
        assert_eq!(pos.side(), Side::Buy);
        assert_eq!(pos.stop_loss, 42800.0);
        assert_eq!(pos.take_profit, 43300.0);
        assert_eq!(pos.current_price, None);
    }

    #[test]
    fn malformed_fields_default() {
        let pos: Position = serde_json::from_value(json!({
            "type": "SELL",
            "entry": "not a number",
            "pnl": null,
            "current_price": "101.5"
        }))
        .unwrap();

        assert_eq!(pos.entry, 0.0);
        assert_eq!(pos.pnl, 0.0);
        assert_eq!(pos.current_price, Some(101.5));
        assert_eq!(pos.instrument, "");
    }

    #[test]
    fn pnl_percent_passes_through_zero_entry() {
        let pos = Position {
            entry: 100.0,
            pnl: 25.0,
            ..Default::default()
        };
        assert!((pos.pnl_percent() - 25.0).abs() < 1e-9);

        let flat = Position {
            entry: 0.0,
            pnl: 10.0,
            ..Default::default()
        };
        assert!(flat.pnl_percent().is_infinite());
    }
}
