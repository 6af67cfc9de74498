mod choropleth;
mod figure;
mod ols;
mod scatter;
mod selection;

pub use choropleth::choropleth_figure;
pub use scatter::scatter_figure;
pub use selection::{Selection, ViewMode};
