#![doc = "Countylens public API"]
mod data;
mod types;
mod view;

pub mod page;
pub mod server;

#[doc(inline)]
pub use types::{GeoId, state_name};

#[doc(inline)]
pub use data::{
    CountyBoundaries, CountyShape, Dataset, GDP_COLUMN, MetricColumn, MetricSchema,
    describe_shapefile,
};

#[doc(inline)]
pub use view::{Selection, ViewMode, choropleth_figure, scatter_figure};
