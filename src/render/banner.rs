use chrono::NaiveTime;

use crate::connection::ConnectionState;
use crate::view::Node;

pub fn connection_banner(state: &ConnectionState) -> Node {
    Node::span("connection", state.label()).with_class(state.css_class())
}

/// Wall-clock stamp; fed by the controller, not by snapshot content.
pub fn last_updated(at: NaiveTime) -> Node {
    Node::span(
        "last-updated",
        format!("Last updated: {}", at.format("%H:%M:%S")),
    )
}
