use tracing::debug;

use crate::config::MAX_SIGNALS;
use crate::models::{Signal, Snapshot, SnapshotUpdate};

/// Owner of the dashboard snapshot. The only way to change it is through
/// `initialize`, `apply_update` and `append_signal`.
#[derive(Debug, Default)]
pub struct ViewModelStore {
    snapshot: Snapshot,
}

impl ViewModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Replace the whole state with a full sync from the backend.
    pub fn initialize(&mut self, snapshot: Snapshot) {
        self.snapshot = snapshot;
        cap_signals(&mut self.snapshot.trading_signals);
        debug!(
            "Store initialized: {} positions, {} trades, {} signals",
            self.snapshot.active_positions.len(),
            self.snapshot.recent_trades.len(),
            self.snapshot.trading_signals.len()
        );
    }

    /// Field-level merge. Absent fields keep their value; signals and
    /// positions also survive an empty list.
    pub fn apply_update(&mut self, update: SnapshotUpdate) {
        let fields = update.field_count();
        let s = &mut self.snapshot;

        let SnapshotUpdate {
            status,
            account_balance,
            floating_pnl,
            open_positions,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            profit_factor,
            active_positions,
            recent_trades,
            trading_signals,
            config,
        } = update;

        if let Some(v) = status {
            s.status = v;
        }
        if let Some(v) = account_balance {
            s.account_balance = v;
        }
        if let Some(v) = floating_pnl {
            s.floating_pnl = v;
        }
        if let Some(v) = open_positions {
            s.open_positions = v;
        }
        if let Some(v) = total_trades {
            s.total_trades = v;
        }
        if let Some(v) = winning_trades {
            s.winning_trades = v;
        }
        if let Some(v) = losing_trades {
            s.losing_trades = v;
        }
        if let Some(v) = win_rate {
            s.win_rate = v;
        }
        if let Some(v) = profit_factor {
            s.profit_factor = v;
        }
        if let Some(v) = recent_trades {
            s.recent_trades = v;
        }
        if let Some(v) = config {
            s.config = v;
        }

        // An empty list never clears held positions or signals.
        match active_positions {
            Some(v) if !v.is_empty() => s.active_positions = v,
            Some(_) => debug!("Empty position list in update, keeping previous"),
            None => {}
        }
        match trading_signals {
            Some(mut v) if !v.is_empty() => {
                cap_signals(&mut v);
                s.trading_signals = v;
            }
            Some(_) => debug!("Empty signal list in update, keeping previous"),
            None => {}
        }

        debug!("Applied update with {} field(s)", fields);
    }

    /// Append one signal unless an entry with the same
    /// `(timestamp_ms, type, instrument)` exists. Returns whether it was added.
    pub fn append_signal(&mut self, signal: Signal) -> bool {
        let signals = &mut self.snapshot.trading_signals;
        if signals.iter().any(|s| s.same_event(&signal)) {
            debug!(
                "Duplicate signal ignored: {} {} @ {}",
                signal.kind, signal.instrument, signal.timestamp_ms
            );
            return false;
        }

        signals.push(signal);
        cap_signals(signals);
        true
    }
}

fn cap_signals(signals: &mut Vec<Signal>) {
    if signals.len() > MAX_SIGNALS {
        let excess = signals.len() - MAX_SIGNALS;
        signals.drain(..excess);
    }
}
