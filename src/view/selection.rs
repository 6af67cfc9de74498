//! The user's current chart selection.
//!
//! A `Selection` is a plain value: the server parses one from the request
//! query string, hands it to a renderer, and encodes it back into widget
//! state on the page. Nothing is persisted.

use serde::Serialize;

use crate::data::MetricSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Scatter,
    Choropleth,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Scatter => "scatter",
            ViewMode::Choropleth => "choropleth",
        }
    }

    pub fn parse(text: &str) -> Option<ViewMode> {
        match text {
            "scatter" => Some(ViewMode::Scatter),
            "choropleth" => Some(ViewMode::Choropleth),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub view: ViewMode,
    pub metric: String,
    pub log_x: bool,
    pub log_y: bool,
    pub log_color: bool,
}

impl Selection {
    /// Session default: scatter view on the first enumerated metric,
    /// linear everything.
    pub fn new(schema: &MetricSchema) -> Selection {
        Selection {
            view: ViewMode::Scatter,
            metric: schema.resolve(None).column.clone(),
            log_x: false,
            log_y: false,
            log_color: false,
        }
    }

    /// Parse widget state from a query string. Unknown keys are ignored; an
    /// unknown metric clamps to the schema's first option.
    pub fn from_query(query: &str, schema: &MetricSchema) -> Selection {
        let mut selection = Selection::new(schema);
        for (key, value) in query_pairs(query) {
            match key.as_str() {
                "view" => {
                    if let Some(view) = ViewMode::parse(&value) {
                        selection.view = view;
                    }
                }
                "metric" => selection.metric = schema.resolve(Some(&value)).column.clone(),
                "logx" => selection.log_x = flag(&value),
                "logy" => selection.log_y = flag(&value),
                "logc" => selection.log_color = flag(&value),
                _ => {}
            }
        }
        selection
    }

    /// Encode back into the query form `from_query` accepts.
    pub fn to_query(&self) -> String {
        let mut query = format!(
            "view={}&metric={}",
            self.view.as_str(),
            percent_encode(&self.metric)
        );
        if self.log_x {
            query.push_str("&logx=1");
        }
        if self.log_y {
            query.push_str("&logy=1");
        }
        if self.log_color {
            query.push_str("&logc=1");
        }
        query
    }
}

fn flag(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}

fn query_pairs(query: &str) -> impl Iterator<Item = (String, String)> + '_ {
    query.split('&').filter(|pair| !pair.is_empty()).map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (percent_decode(key), percent_decode(value))
    })
}

/// Decode `%XX` escapes and `+`-as-space. Malformed escapes pass through
/// literally rather than erroring; this is widget state, not an API.
pub(crate) fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let decoded = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());
                match decoded {
                    Some(byte) => {
                        out.push(byte);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            byte => {
                out.push(byte);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Encode a value for a query string. Column names are almost always plain
/// identifiers, so keep the unreserved set and escape the rest.
pub(crate) fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MetricSchema;
    use polars::df;

    fn schema() -> MetricSchema {
        let df = df!(
            "solar_degree_centrality" => [0.5],
            "wind_degree_centrality" => [0.5],
            "gdp_2023" => [1.0],
        )
        .unwrap();
        MetricSchema::from_frame(&df).unwrap()
    }

    #[test]
    fn defaults() {
        let selection = Selection::new(&schema());
        assert_eq!(selection.view, ViewMode::Scatter);
        assert_eq!(selection.metric, "solar_degree_centrality");
        assert!(!selection.log_x && !selection.log_y && !selection.log_color);
    }

    #[test]
    fn parses_full_query() {
        let selection = Selection::from_query(
            "view=choropleth&metric=wind_degree_centrality&logc=1",
            &schema(),
        );
        assert_eq!(selection.view, ViewMode::Choropleth);
        assert_eq!(selection.metric, "wind_degree_centrality");
        assert!(selection.log_color);
        assert!(!selection.log_x);
    }

    #[test]
    fn unknown_metric_clamps_to_first_option() {
        let selection = Selection::from_query("metric=bogus_degree_centrality", &schema());
        assert_eq!(selection.metric, "solar_degree_centrality");
    }

    #[test]
    fn unknown_view_and_keys_are_ignored() {
        let selection = Selection::from_query("view=pie&spurious=1", &schema());
        assert_eq!(selection.view, ViewMode::Scatter);
    }

    #[test]
    fn query_round_trip() {
        let schema = schema();
        let original = Selection {
            view: ViewMode::Choropleth,
            metric: "wind_degree_centrality".to_string(),
            log_x: true,
            log_y: false,
            log_color: true,
        };
        let round_tripped = Selection::from_query(&original.to_query(), &schema);
        assert_eq!(round_tripped, original);
    }

    #[test]
    fn percent_decoding() {
        assert_eq!(percent_decode("a+b%20c"), "a b c");
        assert_eq!(percent_decode("100%"), "100%"); // malformed escape passes through
        assert_eq!(percent_decode("%2Fpath"), "/path");
    }
}
