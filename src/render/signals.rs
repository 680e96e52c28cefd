use crate::config::SIGNALS_DISPLAYED;
use crate::models::{Signal, Snapshot};
use crate::view::Node;

pub const EMPTY_SIGNALS: &str = "Waiting for signals...";

/// The most recent `SIGNALS_DISPLAYED` signals, newest first.
pub fn signals_feed(snapshot: &Snapshot) -> Node {
    let signals = &snapshot.trading_signals;
    if signals.is_empty() {
        return Node::element("div")
            .with_class("empty-state")
            .child(Node::text(EMPTY_SIGNALS));
    }

    let start = signals.len().saturating_sub(SIGNALS_DISPLAYED);
    Node::element("ul")
        .with_class("signals")
        .children(signals[start..].iter().rev().map(signal_item))
}

fn signal_item(signal: &Signal) -> Node {
    let kind = signal.kind();
    let mut header = Node::element("div")
        .with_class("signal-header")
        .child(Node::span("icon", kind.icon()))
        .child(Node::span("kind", signal.kind.to_uppercase()))
        .child(Node::span("instrument", signal.instrument.as_str()));
    if !signal.timeframe.is_empty() {
        header = header.child(Node::span("timeframe", signal.timeframe.as_str()));
    }

    Node::element("li")
        .with_class("signal")
        .with_class(kind.css_class())
        .child(header)
        .child(Node::span("message", signal.message.as_str()))
        .child(Node::span("timestamp", signal.timestamp.as_str()))
}
