//! Small shared pieces of the Plotly-figure JSON both views emit.

use serde_json::{Value, json};

/// Assemble the figure envelope the page hands to the plotting library.
pub(crate) fn figure(data: Vec<Value>, layout: Value) -> Value {
    json!({ "data": data, "layout": layout })
}

/// Axis description with a log/linear scale toggle. A log axis is undefined
/// for zero or negative values; such points are left to the plotting library,
/// which renders them as absent.
pub(crate) fn axis(label: &str, log: bool) -> Value {
    let scale = if log { "log" } else { "linear" };
    json!({
        "title": { "text": label },
        "type": scale,
    })
}
