//! Explicit descriptor of the selectable metric columns.
//!
//! Computed once at load time from the table's actual header, so the
//! dashboard adapts to whatever centrality columns the input file carries
//! without re-scanning column names on every interaction.

use anyhow::{Result, ensure};
use polars::frame::DataFrame;
use serde::Serialize;

/// County GDP column, always selectable and always the scatter y-axis.
pub const GDP_COLUMN: &str = "gdp_2023";

/// Suffix marking a precomputed centrality metric column.
pub const CENTRALITY_SUFFIX: &str = "_degree_centrality";

/// One selectable numeric column and its display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricColumn {
    pub column: String,
    pub label: String,
}

/// The enumerated metric options, in header order, GDP last.
#[derive(Debug, Clone)]
pub struct MetricSchema {
    options: Vec<MetricColumn>,
}

impl MetricSchema {
    /// Scan the header for centrality columns and append the GDP column.
    pub fn from_frame(df: &DataFrame) -> Result<MetricSchema> {
        ensure!(
            df.column(GDP_COLUMN).is_ok(),
            "[data::schema] metrics table is missing required column {:?}",
            GDP_COLUMN
        );

        let mut options: Vec<MetricColumn> = df
            .get_columns()
            .iter()
            .map(|col| col.name().as_str())
            .filter(|name| name.ends_with(CENTRALITY_SUFFIX))
            .map(|name| MetricColumn {
                column: name.to_string(),
                label: axis_label(name),
            })
            .collect();
        options.push(MetricColumn {
            column: GDP_COLUMN.to_string(),
            label: axis_label(GDP_COLUMN),
        });

        Ok(MetricSchema { options })
    }

    pub fn options(&self) -> &[MetricColumn] {
        &self.options
    }

    pub fn contains(&self, column: &str) -> bool {
        self.options.iter().any(|opt| opt.column == column)
    }

    pub fn get(&self, column: &str) -> Option<&MetricColumn> {
        self.options.iter().find(|opt| opt.column == column)
    }

    /// Resolve a requested column against the enumerated options, clamping
    /// unknown or absent requests to the first option. Never empty: GDP is
    /// always present.
    pub fn resolve(&self, requested: Option<&str>) -> &MetricColumn {
        requested
            .and_then(|column| self.get(column))
            .unwrap_or(&self.options[0])
    }
}

/// Column name with the centrality suffix stripped ("solar_degree_centrality"
/// -> "solar"); non-metric names pass through unchanged.
pub fn short_label(column: &str) -> &str {
    column.strip_suffix(CENTRALITY_SUFFIX).unwrap_or(column)
}

/// Human-readable axis label for a selectable column.
pub fn axis_label(column: &str) -> String {
    if column == GDP_COLUMN {
        "GDP (USD)".to_string()
    } else {
        format!("{} Centrality", short_label(column))
    }
}

#[cfg(test)]
mod tests {
    use super::{GDP_COLUMN, MetricSchema, axis_label, short_label};
    use polars::df;

    fn frame() -> polars::frame::DataFrame {
        df!(
            "county_name" => ["Dane"],
            "solar_degree_centrality" => [0.8],
            "wind_degree_centrality" => [0.1],
            "gdp_2023" => [50e9],
        )
        .unwrap()
    }

    #[test]
    fn enumerates_centrality_columns_plus_gdp() {
        let schema = MetricSchema::from_frame(&frame()).unwrap();
        let columns: Vec<&str> = schema.options().iter().map(|o| o.column.as_str()).collect();
        assert_eq!(
            columns,
            ["solar_degree_centrality", "wind_degree_centrality", "gdp_2023"]
        );
    }

    #[test]
    fn missing_gdp_is_fatal() {
        let df = df!("solar_degree_centrality" => [0.8]).unwrap();
        assert!(MetricSchema::from_frame(&df).is_err());
    }

    #[test]
    fn labels() {
        assert_eq!(short_label("solar_degree_centrality"), "solar");
        assert_eq!(axis_label("solar_degree_centrality"), "solar Centrality");
        assert_eq!(axis_label(GDP_COLUMN), "GDP (USD)");
    }

    #[test]
    fn resolve_clamps_unknown_requests() {
        let schema = MetricSchema::from_frame(&frame()).unwrap();
        assert_eq!(
            schema.resolve(Some("wind_degree_centrality")).column,
            "wind_degree_centrality"
        );
        assert_eq!(schema.resolve(Some("bogus")).column, "solar_degree_centrality");
        assert_eq!(schema.resolve(None).column, "solar_degree_centrality");
    }
}
