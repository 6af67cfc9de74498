//! Scatter view: selected metric vs. county GDP with an OLS trendline.

use anyhow::Result;
use polars::prelude::DataType;
use serde_json::{Value, json};

use crate::data::{COUNTY_STATE_COLUMN, Dataset, GDP_COLUMN, axis_label, short_label};

use super::{Selection, figure, ols};

const MARKER_COLOR: &str = "teal";
const MARKER_SIZE: u32 = 7;
const MARKER_OPACITY: f64 = 0.7;
const TREND_COLOR: &str = "gray";
const TREND_NAME: &str = "OLS Trendline";

/// Pure function from (dataset, selection) to a scatter figure description.
/// Rows missing either the selected metric or GDP are dropped before
/// plotting and before the fit.
pub fn scatter_figure(dataset: &Dataset, selection: &Selection) -> Result<Value> {
    let metric = dataset.schema.resolve(Some(&selection.metric));
    let df = &dataset.metrics;

    let metric_col = df.column(&metric.column)?.cast(&DataType::Float64)?;
    let metric_vals = metric_col.f64()?;
    let gdp_col = df.column(GDP_COLUMN)?.cast(&DataType::Float64)?;
    let gdp_vals = gdp_col.f64()?;
    let label_col = df.column(COUNTY_STATE_COLUMN)?.cast(&DataType::String)?;
    let labels = label_col.str()?;

    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    for idx in 0..df.height() {
        if let (Some(x), Some(y)) = (metric_vals.get(idx), gdp_vals.get(idx)) {
            xs.push(x);
            ys.push(y);
            texts.push(labels.get(idx).unwrap_or("").to_string());
        }
    }

    let mut data = vec![json!({
        "type": "scatter",
        "mode": "markers",
        "x": xs,
        "y": ys,
        "text": texts,
        "name": "Counties",
        "hovertemplate": "%{text}<br>%{x}, %{y}<extra></extra>",
        "marker": { "size": MARKER_SIZE, "opacity": MARKER_OPACITY, "color": MARKER_COLOR },
    })];

    // Fit in linear space over the filtered rows, with a fitted point per
    // distinct x so the segment renders correctly on log axes too.
    if let Some(fit) = ols::fit(xs.iter().copied().zip(ys.iter().copied())) {
        let mut line_xs = xs.clone();
        line_xs.sort_by(f64::total_cmp);
        line_xs.dedup();
        let line_ys: Vec<f64> = line_xs.iter().map(|&x| fit.predict(x)).collect();
        data.push(json!({
            "type": "scatter",
            "mode": "lines",
            "x": line_xs,
            "y": line_ys,
            "name": TREND_NAME,
            "hoverinfo": "skip",
            "line": { "color": TREND_COLOR, "dash": "dash" },
        }));
    }

    let layout = json!({
        "title": { "text": format!("{} Centrality vs. GDP", short_label(&metric.column)) },
        "xaxis": figure::axis(&metric.label, selection.log_x),
        "yaxis": figure::axis(&axis_label(GDP_COLUMN), selection.log_y),
        "showlegend": true,
    });

    Ok(figure::figure(data, layout))
}

#[cfg(test)]
mod tests {
    use polars::df;

    use crate::data::{CountyBoundaries, Dataset, MetricSchema};
    use crate::view::{Selection, ViewMode};

    use super::scatter_figure;

    fn dataset() -> Dataset {
        let metrics = df!(
            "county_name" => ["Dane", "Cook", "Teton"],
            "state_fips" => ["55", "17", "56"],
            "GEOID" => ["55025", "17031", "56039"],
            "county_state" => ["Dane, Wisconsin", "Cook, Illinois", "Teton, Wyoming"],
            "solar_degree_centrality" => [Some(0.2), Some(0.4), None],
            "empty_degree_centrality" => [None::<f64>, None, None],
            "zero_degree_centrality" => [Some(0.0), Some(1.0), Some(2.0)],
            "gdp_2023" => [Some(50e9), Some(400e9), None],
        )
        .unwrap();
        let schema = MetricSchema::from_frame(&metrics).unwrap();
        Dataset {
            metrics,
            boundaries: CountyBoundaries::from_shapes(vec![]),
            schema,
        }
    }

    fn selection(metric: &str) -> Selection {
        Selection {
            view: ViewMode::Scatter,
            metric: metric.to_string(),
            log_x: false,
            log_y: false,
            log_color: false,
        }
    }

    #[test]
    fn drops_rows_missing_metric_or_gdp() {
        let fig = scatter_figure(&dataset(), &selection("solar_degree_centrality")).unwrap();
        let markers = &fig["data"][0];
        // Teton has no GDP, so only two points survive.
        assert_eq!(markers["x"].as_array().unwrap().len(), 2);
        assert_eq!(markers["text"][0], "Dane, Wisconsin");
    }

    #[test]
    fn overlays_a_named_trendline() {
        let fig = scatter_figure(&dataset(), &selection("solar_degree_centrality")).unwrap();
        let traces = fig["data"].as_array().unwrap();
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[1]["name"], "OLS Trendline");
        assert_eq!(traces[1]["line"]["dash"], "dash");
        assert_eq!(traces[1]["line"]["color"], "gray");
    }

    #[test]
    fn all_missing_metric_renders_zero_points() {
        let fig = scatter_figure(&dataset(), &selection("empty_degree_centrality")).unwrap();
        let traces = fig["data"].as_array().unwrap();
        assert_eq!(traces.len(), 1); // no trendline without points
        assert!(traces[0]["x"].as_array().unwrap().is_empty());
    }

    #[test]
    fn log_axis_flags_change_axis_type_only() {
        let mut sel = selection("zero_degree_centrality");
        sel.log_x = true;
        let fig = scatter_figure(&dataset(), &sel).unwrap();
        assert_eq!(fig["layout"]["xaxis"]["type"], "log");
        assert_eq!(fig["layout"]["yaxis"]["type"], "linear");
        // The zero-valued row stays in the data; the log axis simply cannot
        // place it, which is accepted behavior.
        let xs = fig["data"][0]["x"].as_array().unwrap();
        assert!(xs.iter().any(|v| v.as_f64() == Some(0.0)));
    }

    #[test]
    fn axis_labels_strip_the_metric_suffix() {
        let fig = scatter_figure(&dataset(), &selection("solar_degree_centrality")).unwrap();
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "solar Centrality");
        assert_eq!(fig["layout"]["yaxis"]["title"]["text"], "GDP (USD)");
        assert_eq!(fig["layout"]["title"]["text"], "solar Centrality vs. GDP");
    }
}
