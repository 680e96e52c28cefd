use serde_json::json;
use std::collections::BTreeMap;

use crate::config::DashboardConfig;
use crate::models::{Position, Signal, Snapshot, Trade};

pub fn make_position(side: &str, instrument: &str, entry: f64, pnl: f64) -> Position {
    Position {
        id: Some(format!("{}_M5", instrument)),
        side: side.to_string(),
        instrument: instrument.to_string(),
        timeframe: "M5".to_string(),
        entry,
        stop_loss: entry * 0.99,
        take_profit: entry * 1.015,
        pnl,
        current_price: None,
        timestamp: "12:00:00".to_string(),
    }
}

pub fn make_trade(side: &str, instrument: &str, status: &str, pnl: f64) -> Trade {
    let closed = status == "CLOSED";
    Trade {
        id: None,
        side: side.to_string(),
        instrument: instrument.to_string(),
        timeframe: "M15".to_string(),
        entry: 100.0,
        exit_price: if closed { Some(100.0 + pnl) } else { None },
        pnl,
        status: status.to_string(),
        timestamp: "09:00:00".to_string(),
        close_time: if closed { Some("09:30:00".to_string()) } else { None },
    }
}

pub fn make_signal(kind: &str, instrument: &str, timestamp_ms: f64) -> Signal {
    Signal {
        kind: kind.to_string(),
        instrument: instrument.to_string(),
        timeframe: "M5".to_string(),
        message: format!("{} on {}", kind, instrument),
        timestamp: "12:00:00".to_string(),
        timestamp_ms,
    }
}

pub fn sample_config() -> BTreeMap<String, serde_json::Value> {
    let mut config = BTreeMap::new();
    config.insert("max_lower_shadow_factor".to_string(), json!(0.4));
    config.insert("min_upper_shadow_ratio".to_string(), json!(2.5));
    config.insert("buy_sl_mult".to_string(), json!(1.0));
    config.insert("buy_tp_mult".to_string(), json!(1.5));
    config.insert("sell_sl_mult".to_string(), json!(1.5));
    config.insert("sell_tp_mult".to_string(), json!(3.0));
    config.insert("instruments".to_string(), json!(["BTC_USD", "XAU_USD"]));
    config.insert("timeframes".to_string(), json!(["M5", "M15"]));
    config
}

/// A realistic mid-session snapshot: two open positions, some history, a few signals.
pub fn sample_snapshot() -> Snapshot {
    Snapshot {
        status: "LIVE".to_string(),
        account_balance: 10_250.75,
        floating_pnl: 125.5,
        open_positions: 2,
        total_trades: 3,
        winning_trades: 2,
        losing_trades: 1,
        win_rate: 66.7,
        profit_factor: 1.8,
        active_positions: vec![
            make_position("BUY", "BTC_USD", 43_000.0, 150.0),
            make_position("SELL", "XAU_USD", 2_050.0, -24.5),
        ],
        recent_trades: vec![
            make_trade("BUY", "BTC_USD", "CLOSED", 40.0),
            make_trade("SELL", "XAU_USD", "CLOSED", -12.0),
            make_trade("BUY", "BTC_USD", "OPEN", 0.0),
        ],
        trading_signals: vec![
            make_signal("bullish", "BTC_USD", 1.0),
            make_signal("bearish", "XAU_USD", 2.0),
            make_signal("candle_complete", "BTC_USD", 3.0),
        ],
        config: sample_config(),
    }
}

/// Config suitable for tests: no sound, output in the temp dir.
pub fn default_test_config() -> DashboardConfig {
    DashboardConfig {
        sound_enabled: false,
        output_path: std::env::temp_dir()
            .join(format!("bot_dashboard_test_{}.html", std::process::id())),
        ..DashboardConfig::default()
    }
}
