use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

/// Dashboard CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "countylens", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the interactive dashboard
    Serve(ServeArgs),

    /// Render one figure to a standalone HTML or JSON file
    Render(RenderArgs),

    /// Summarize a boundary shapefile's records
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// County metrics CSV
    #[arg(long, value_hint = ValueHint::FilePath, default_value = "county_climate_summary.csv")]
    pub metrics: PathBuf,

    /// County boundary shapefile (.shp)
    #[arg(long, value_hint = ValueHint::FilePath, default_value = "cb_2022_us_county_5m.shp")]
    pub boundaries: PathBuf,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,

    /// Open the dashboard in a browser once serving
    #[arg(long)]
    pub open: bool,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum ViewArg {
    Scatter,
    Choropleth,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file path
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Chart type to render
    #[arg(long, value_enum, default_value_t = ViewArg::Scatter)]
    pub view: ViewArg,

    /// Metric column (defaults to the first centrality column)
    #[arg(long)]
    pub metric: Option<String>,

    /// Log scale for the scatter X-axis
    #[arg(long)]
    pub log_x: bool,

    /// Log scale for the scatter Y-axis
    #[arg(long)]
    pub log_y: bool,

    /// Log scale for the choropleth color
    #[arg(long)]
    pub log_color: bool,

    /// Write raw figure JSON instead of an HTML page
    #[arg(long)]
    pub json: bool,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Boundary shapefile (.shp)
    #[arg(value_hint = ValueHint::FilePath)]
    pub shapefile: PathBuf,
}
