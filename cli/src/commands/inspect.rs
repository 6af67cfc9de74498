use anyhow::Result;

use crate::cli::InspectArgs;

pub fn run(args: &InspectArgs) -> Result<()> {
    countylens::describe_shapefile(&args.shapefile)
}
