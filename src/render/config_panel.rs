use serde_json::Value;

use crate::models::Snapshot;
use crate::view::Node;

pub const MISSING: &str = "N/A";

/// The parameters the panel shows, in display order.
pub const CONFIG_FIELDS: &[(&str, &str)] = &[
    ("Max Lower Shadow", "max_lower_shadow_factor"),
    ("Min Upper Shadow Ratio", "min_upper_shadow_ratio"),
    ("Buy SL Multiplier", "buy_sl_mult"),
    ("Buy TP Multiplier", "buy_tp_mult"),
    ("Sell SL Multiplier", "sell_sl_mult"),
    ("Sell TP Multiplier", "sell_tp_mult"),
    ("Instruments", "instruments"),
    ("Timeframes", "timeframes"),
];

/// Fixed-schema view of the strategy config. Unknown keys are not shown.
pub fn config_panel(snapshot: &Snapshot) -> Node {
    Node::element("dl").with_class("config").children(
        CONFIG_FIELDS.iter().map(|(label, key)| {
            let value = snapshot
                .config
                .get(*key)
                .and_then(display_value)
                .unwrap_or_else(|| MISSING.to_string());
            Node::element("div")
                .with_class("config-row")
                .with_class(*key)
                .child(Node::span("label", *label))
                .child(Node::span("value", value))
        }),
    )
}

fn display_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
