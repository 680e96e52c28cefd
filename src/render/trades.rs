use crate::config::TRADES_DISPLAYED;
use crate::models::{Snapshot, Trade};
use crate::render::format::{price, signed_money};
use crate::view::Node;

pub const EMPTY_TRADES: &str = "No trades yet";

/// The last `TRADES_DISPLAYED` trades, newest first.
pub fn trades_list(snapshot: &Snapshot) -> Node {
    let trades = &snapshot.recent_trades;
    if trades.is_empty() {
        return Node::element("div")
            .with_class("empty-state")
            .child(Node::text(EMPTY_TRADES));
    }

    let start = trades.len().saturating_sub(TRADES_DISPLAYED);
    Node::element("div")
        .with_class("trades")
        .children(trades[start..].iter().rev().map(trade_row))
}

fn trade_row(trade: &Trade) -> Node {
    let side = trade.side();
    let row = Node::element("div")
        .with_class("card")
        .with_class("trade")
        .with_class(if trade.is_closed() { "closed" } else { "open" })
        .child(Node::span("side", side.as_str()).with_class(side.css_class()))
        .child(Node::span("instrument", trade.instrument.as_str()))
        .child(Node::span("timeframe", trade.timeframe.as_str()))
        .child(Node::span("entry", price(trade.entry)));

    let row = if trade.is_closed() {
        let exit = trade
            .exit_price
            .map(price)
            .unwrap_or_else(|| "N/A".to_string());
        let pnl_class = if trade.pnl >= 0.0 { "profit" } else { "loss" };
        row.child(Node::span("exit", format!("→ {}", exit)))
            .child(Node::span("pnl", signed_money(trade.pnl)).with_class(pnl_class))
    } else {
        row.child(Node::span("pending", "⏳ pending"))
    };

    let when = trade.close_time.as_deref().unwrap_or(trade.timestamp.as_str());
    row.child(Node::span("timestamp", when))
}
