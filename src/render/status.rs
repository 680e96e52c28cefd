use crate::models::Snapshot;
use crate::render::format::{money, percent, signed_money};
use crate::render::regions;
use crate::view::Node;

/// The status as sent, or `OFFLINE` when the backend sent none.
pub(crate) fn status_text(status: &str) -> &str {
    if status.is_empty() {
        "OFFLINE"
    } else {
        status
    }
}

pub(crate) fn pnl_node(pnl: f64) -> Node {
    let class = if pnl >= 0.0 { "profit" } else { "loss" };
    Node::span(class, signed_money(pnl))
}

pub(crate) fn win_rate_node(win_rate: f64, threshold: f64) -> Node {
    let class = if win_rate >= threshold { "good" } else { "bad" };
    Node::span(class, percent(win_rate, 1))
}

/// Header strip: bot status, balance, floating P&L, win rate, position count.
pub fn status_bar(snapshot: &Snapshot, win_rate_threshold: f64) -> Vec<(&'static str, Node)> {
    let status = status_text(&snapshot.status);
    vec![
        (
            regions::BOT_STATUS,
            Node::span("status", status)
                .with_class(format!("status-{}", status.trim().to_lowercase())),
        ),
        (
            regions::ACCOUNT_BALANCE,
            Node::span("balance", money(snapshot.account_balance)),
        ),
        (regions::FLOATING_PNL, pnl_node(snapshot.floating_pnl)),
        (
            regions::WIN_RATE,
            win_rate_node(snapshot.win_rate, win_rate_threshold),
        ),
        (
            regions::OPEN_POSITIONS,
            Node::span("count", snapshot.open_positions.to_string()),
        ),
    ]
}

/// The performance panel. Same formatting as the status bar, separate regions.
pub fn performance_metrics(
    snapshot: &Snapshot,
    win_rate_threshold: f64,
) -> Vec<(&'static str, Node)> {
    vec![
        (
            regions::METRIC_BALANCE,
            Node::span("balance", money(snapshot.account_balance)),
        ),
        (regions::METRIC_PNL, pnl_node(snapshot.floating_pnl)),
        (
            regions::METRIC_WIN_RATE,
            win_rate_node(snapshot.win_rate, win_rate_threshold),
        ),
        (
            regions::METRIC_TOTAL_TRADES,
            Node::span("count", snapshot.total_trades.to_string()),
        ),
        (
            regions::METRIC_WINNING_TRADES,
            Node::span("count", snapshot.winning_trades.to_string()).with_class("profit"),
        ),
        (
            regions::METRIC_LOSING_TRADES,
            Node::span("count", snapshot.losing_trades.to_string()).with_class("loss"),
        ),
        (
            regions::METRIC_PROFIT_FACTOR,
            Node::span("ratio", format!("{:.2}", snapshot.profit_factor)),
        ),
    ]
}
