use anyhow::{Context, Result, ensure};
use countylens::{Dataset, Selection, ViewMode, page, server};

use crate::cli::{RenderArgs, ViewArg};

pub fn run(args: &RenderArgs) -> Result<()> {
    ensure!(
        args.force || !args.output.exists(),
        "[render] output already exists: {} (use --force)",
        args.output.display()
    );

    let dataset = Dataset::load(&args.input.metrics, &args.input.boundaries)?;
    let selection = Selection {
        view: match args.view {
            ViewArg::Scatter => ViewMode::Scatter,
            ViewArg::Choropleth => ViewMode::Choropleth,
        },
        metric: dataset.schema.resolve(args.metric.as_deref()).column.clone(),
        log_x: args.log_x,
        log_y: args.log_y,
        log_color: args.log_color,
    };

    let figure = server::render(&dataset, &selection)?;
    let content = if args.json {
        serde_json::to_string_pretty(&figure)?
    } else {
        let title = format!("countylens \u{b7} {}", selection.metric);
        page::export_page(&title, &figure)?
    };

    std::fs::write(&args.output, content)
        .with_context(|| format!("[render] failed to write {}", args.output.display()))?;
    log::info!("[render] wrote {}", args.output.display());
    Ok(())
}
