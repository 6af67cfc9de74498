//! Choropleth view: county polygons shaded by the selected metric.

use anyhow::{Result, anyhow};
use polars::prelude::DataType;
use serde_json::{Value, json};

use crate::data::{COUNTY_STATE_COLUMN, Dataset, GEOID_COLUMN, short_label};
use crate::types::GeoId;

use super::{Selection, figure};

// Continental-US framing, fixed for every render.
const MAP_STYLE: &str = "carto-positron";
const MAP_ZOOM: f64 = 3.0;
const MAP_CENTER_LAT: f64 = 37.8;
const MAP_CENTER_LON: f64 = -96.0;
const FILL_OPACITY: f64 = 0.85;
const COLOR_SCALE: &str = "Viridis";
const MAP_HEIGHT: u32 = 700;

/// One county that survived the metrics-boundary join for the selected
/// metric: present in both tables with a non-missing value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct JoinedCounty {
    pub(crate) geo_id: GeoId,
    pub(crate) value: f64,
    pub(crate) label: String,
}

/// Join the metrics table against the boundary index on `geoid`, dropping
/// rows whose selected metric is missing. Recomputed per selection change,
/// never cached.
pub(crate) fn join_counties(dataset: &Dataset, metric_column: &str) -> Result<Vec<JoinedCounty>> {
    let df = &dataset.metrics;
    let geoid_col = df.column(GEOID_COLUMN)?.cast(&DataType::String)?;
    let geoids = geoid_col.str()?;
    let value_col = df.column(metric_column)?.cast(&DataType::Float64)?;
    let values = value_col.f64()?;
    let label_col = df.column(COUNTY_STATE_COLUMN)?.cast(&DataType::String)?;
    let labels = label_col.str()?;

    let mut rows = Vec::new();
    for idx in 0..df.height() {
        let (Some(raw), Some(value)) = (geoids.get(idx), values.get(idx)) else {
            continue;
        };
        let geo_id = GeoId::new(raw);
        if !dataset.boundaries.contains(&geo_id) {
            continue;
        }
        rows.push(JoinedCounty {
            geo_id,
            value,
            label: labels.get(idx).unwrap_or("").to_string(),
        });
    }
    Ok(rows)
}

/// Pure function from (dataset, selection) to a choropleth figure
/// description. Counties missing the selected metric are absent from the
/// map, not shown in a "no data" color.
pub fn choropleth_figure(dataset: &Dataset, selection: &Selection) -> Result<Value> {
    let metric = dataset.schema.resolve(Some(&selection.metric));
    let mut rows = join_counties(dataset, &metric.column)?;

    // The log-color toggle transforms the values feeding the color scale,
    // not just the color-bar tick labels. log10 is undefined at or below
    // zero, so those counties drop out of the log view.
    let colorbar_title = if selection.log_color {
        rows.retain(|row| row.value > 0.0);
        for row in &mut rows {
            row.value = row.value.log10();
        }
        format!("log10({})", short_label(&metric.column))
    } else {
        short_label(&metric.column).to_string()
    };

    let mut features = Vec::with_capacity(rows.len());
    for row in &rows {
        let shape = dataset
            .boundaries
            .get(&row.geo_id)
            .ok_or_else(|| anyhow!("[view::choropleth] no boundary for {}", row.geo_id))?;
        features.push(json!({
            "type": "Feature",
            "id": row.geo_id.id(),
            "geometry": multipolygon_to_geojson(&shape.geometry),
            "properties": { "county_state": row.label },
        }));
    }

    let locations: Vec<&str> = rows.iter().map(|row| row.geo_id.id()).collect();
    let z: Vec<f64> = rows.iter().map(|row| row.value).collect();
    let text: Vec<&str> = rows.iter().map(|row| row.label.as_str()).collect();

    let data = vec![json!({
        "type": "choroplethmapbox",
        "geojson": { "type": "FeatureCollection", "features": features },
        "locations": locations,
        "z": z,
        "text": text,
        "hovertemplate": "%{text}<br>GEOID %{location}<br>%{z}<extra></extra>",
        "colorscale": COLOR_SCALE,
        "marker": { "opacity": FILL_OPACITY },
        "colorbar": { "title": { "text": colorbar_title } },
    })];

    let layout = json!({
        "title": { "text": format!("Choropleth Map: {}", short_label(&metric.column)) },
        "mapbox": {
            "style": MAP_STYLE,
            "zoom": MAP_ZOOM,
            "center": { "lat": MAP_CENTER_LAT, "lon": MAP_CENTER_LON },
        },
        "margin": { "r": 0, "t": 50, "l": 0, "b": 0 },
        "height": MAP_HEIGHT,
    });

    Ok(figure::figure(data, layout))
}

/// GeoJSON MultiPolygon coordinates: per polygon, the exterior ring followed
/// by its holes.
fn multipolygon_to_geojson(mp: &geo::MultiPolygon<f64>) -> Value {
    let polygons: Vec<Value> = mp
        .0
        .iter()
        .map(|polygon| {
            let mut rings: Vec<Vec<Vec<f64>>> = Vec::with_capacity(1 + polygon.interiors().len());
            rings.push(ring_coords(polygon.exterior()));
            rings.extend(polygon.interiors().iter().map(ring_coords));
            json!(rings)
        })
        .collect();
    json!({
        "type": "MultiPolygon",
        "coordinates": polygons,
    })
}

fn ring_coords(ring: &geo::LineString<f64>) -> Vec<Vec<f64>> {
    ring.coords().map(|coord| vec![coord.x, coord.y]).collect()
}
