use crate::models::{Position, Snapshot};
use crate::render::format::{percent, price, signed_money};
use crate::view::Node;

pub const EMPTY_POSITIONS: &str = "No active positions";

/// One card per open position, in the order the backend sent them.
pub fn positions_list(snapshot: &Snapshot) -> Node {
    if snapshot.active_positions.is_empty() {
        return Node::element("div")
            .with_class("empty-state")
            .child(Node::text(EMPTY_POSITIONS));
    }

    Node::element("div")
        .with_class("positions")
        .children(snapshot.active_positions.iter().map(position_card))
}

fn position_card(position: &Position) -> Node {
    let side = position.side();
    let pnl_class = if position.pnl >= 0.0 { "profit" } else { "loss" };

    let mut levels = vec![
        labelled("entry", "Entry", price(position.entry)),
        labelled("sl", "SL", price(position.stop_loss)),
        labelled("tp", "TP", price(position.take_profit)),
    ];
    if let Some(current) = position.current_price {
        levels.push(labelled("current", "Now", price(current)));
    }

    Node::element("div")
        .with_class("card")
        .with_class("position")
        .with_class(side.css_class())
        .child(
            Node::element("div")
                .with_class("card-header")
                .child(Node::span("side", side.as_str()).with_class(side.css_class()))
                .child(Node::span("instrument", position.instrument.as_str()))
                .child(Node::span("timeframe", position.timeframe.as_str())),
        )
        .child(Node::element("div").with_class("levels").children(levels))
        .child(
            Node::element("div")
                .with_class("pnl-row")
                .child(Node::span("pnl", signed_money(position.pnl)).with_class(pnl_class))
                .child(
                    Node::span("pnl-percent", percent(position.pnl_percent(), 2))
                        .with_class(pnl_class),
                ),
        )
        .child(Node::span("timestamp", position.timestamp.as_str()))
}

fn labelled(class: &str, label: &str, value: String) -> Node {
    Node::element("span")
        .with_class(class)
        .child(Node::span("label", label))
        .child(Node::text(format!(" {}", value)))
}
