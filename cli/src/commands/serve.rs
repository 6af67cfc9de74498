use std::sync::Arc;

use anyhow::Result;
use countylens::Dataset;
use countylens::server::{ServeOptions, serve};

use crate::cli::ServeArgs;

pub fn run(args: &ServeArgs) -> Result<()> {
    let dataset = Arc::new(Dataset::load(&args.input.metrics, &args.input.boundaries)?);
    serve(
        dataset,
        &ServeOptions {
            port: args.port,
            open: args.open,
        },
    )
}
