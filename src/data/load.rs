//! Dataset loading: metrics CSV + county boundary shapefile.
//!
//! Runs once at startup; the result is immutable for the lifetime of the
//! process and shared by reference with every render. A missing or malformed
//! input is an unrecoverable configuration error and aborts startup.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::{Context, Result, ensure};
use polars::{
    frame::DataFrame,
    io::SerReader,
    prelude::{
        CsvReadOptions, CsvReader, DataType, Field, IntoSeries, Schema, SchemaRef, StringChunked,
    },
};

use crate::types::{GeoId, state_name};

use super::{boundary::CountyBoundaries, schema::MetricSchema};

pub const GEOID_COLUMN: &str = "GEOID";
pub const COUNTY_NAME_COLUMN: &str = "county_name";
pub const STATE_FIPS_COLUMN: &str = "state_fips";

/// Derived at load: resolved state name (absent for unmapped FIPS codes).
pub const STATE_NAME_COLUMN: &str = "state_name";
/// Derived at load: `"<county>, <state>"` display label.
pub const COUNTY_STATE_COLUMN: &str = "county_state";

/// Placeholder state segment for FIPS codes outside the fixed lookup.
const UNKNOWN_STATE: &str = "Unknown";

/// Everything a render needs, loaded once and held immutable.
#[derive(Debug)]
pub struct Dataset {
    pub metrics: DataFrame,
    pub boundaries: CountyBoundaries,
    pub schema: MetricSchema,
}

impl Dataset {
    /// Load and join-prepare both input files.
    pub fn load(metrics_path: &Path, boundary_path: &Path) -> Result<Dataset> {
        let metrics = read_metrics_csv(metrics_path)?;
        let schema = MetricSchema::from_frame(&metrics)?;
        let boundaries = CountyBoundaries::from_shapefile(boundary_path)?;
        log::info!(
            "[data::load] {} metric rows, {} county polygons, {} selectable metrics",
            metrics.height(),
            boundaries.len(),
            schema.options().len()
        );
        Ok(Dataset { metrics, boundaries, schema })
    }
}

/// Force the FIPS-bearing columns to be read as strings so numeric parsing
/// cannot drop leading zeros.
fn metrics_csv_schema() -> SchemaRef {
    Arc::new(Schema::from_iter([
        Field::new(GEOID_COLUMN.into(), DataType::String),
        Field::new(STATE_FIPS_COLUMN.into(), DataType::String),
        Field::new(COUNTY_NAME_COLUMN.into(), DataType::String),
    ]))
}

/// Read the metrics CSV and derive the normalized `GEOID`, `state_name`, and
/// `county_state` columns.
pub(crate) fn read_metrics_csv(path: &Path) -> Result<DataFrame> {
    let file = File::open(path)
        .with_context(|| format!("[data::load] failed to open metrics CSV: {}", path.display()))?;
    let options = CsvReadOptions::default().with_schema_overwrite(Some(metrics_csv_schema()));
    let df = CsvReader::new(file)
        .with_options(options)
        .finish()
        .with_context(|| format!("[data::load] failed to read metrics CSV from {:?}", path))?;

    for column in [GEOID_COLUMN, COUNTY_NAME_COLUMN, STATE_FIPS_COLUMN] {
        ensure!(
            df.column(column).is_ok(),
            "[data::load] metrics CSV is missing required column {:?}",
            column
        );
    }

    derive_display_columns(df)
}

/// Normalize the key columns and attach the derived display columns.
fn derive_display_columns(mut df: DataFrame) -> Result<DataFrame> {
    // GEOID: zero-pad to the full 5-digit state+county form.
    let geoid_col = df.column(GEOID_COLUMN)?.cast(&DataType::String)?;
    let padded_geoids: StringChunked = geoid_col
        .str()?
        .into_iter()
        .map(|opt| opt.map(|raw| GeoId::new(raw).id().to_string()))
        .collect();

    // state_fips: zero-pad to 2 digits before the name lookup.
    let state_col = df.column(STATE_FIPS_COLUMN)?.cast(&DataType::String)?;
    let padded_states: StringChunked = state_col
        .str()?
        .into_iter()
        .map(|opt| opt.map(|raw| format!("{:0>2}", raw)))
        .collect();

    // Unmapped codes resolve to a null state name, not an error.
    let state_names: StringChunked = padded_states
        .into_iter()
        .map(|opt| opt.and_then(state_name).map(str::to_string))
        .collect();

    let county_col = df.column(COUNTY_NAME_COLUMN)?.cast(&DataType::String)?;
    let labels: StringChunked = county_col
        .str()?
        .into_iter()
        .zip(state_names.into_iter())
        .map(|(county, state)| {
            county.map(|c| format!("{}, {}", c, state.unwrap_or(UNKNOWN_STATE)))
        })
        .collect();

    df.replace_or_add(GEOID_COLUMN.into(), padded_geoids.into_series())?;
    df.replace_or_add(STATE_FIPS_COLUMN.into(), padded_states.into_series())?;
    df.replace_or_add(STATE_NAME_COLUMN.into(), state_names.into_series())?;
    df.replace_or_add(COUNTY_STATE_COLUMN.into(), labels.into_series())?;
    Ok(df)
}
