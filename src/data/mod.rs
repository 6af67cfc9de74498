mod boundary;
mod load;
mod schema;

pub use boundary::{CountyBoundaries, CountyShape, describe_shapefile};
pub use load::{COUNTY_STATE_COLUMN, Dataset, GEOID_COLUMN, STATE_NAME_COLUMN};
pub use schema::{CENTRALITY_SUFFIX, GDP_COLUMN, MetricColumn, MetricSchema, axis_label, short_label};
