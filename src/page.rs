//! Server-rendered dashboard HTML.
//!
//! The page is the whole UI surface: a sidebar form whose controls re-submit
//! on change, and a chart container fed the embedded figure JSON. The
//! plotting library itself is loaded from a CDN and is an external
//! collaborator, not part of this crate.

use anyhow::Result;
use serde_json::Value;

use crate::data::MetricSchema;
use crate::view::{Selection, ViewMode};

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const PAGE_TITLE: &str = "U.S. County Climate-Tech Dashboard";

const STYLE: &str = "\
  body { margin: 0; font-family: system-ui, sans-serif; display: flex; }\n\
  #sidebar { width: 280px; padding: 16px; background: #f4f4f4; height: 100vh;\n\
             box-sizing: border-box; overflow-y: auto; }\n\
  #chart { flex: 1; height: 100vh; }\n\
  fieldset { border: none; padding: 8px 0; margin: 0; }\n\
  legend, label[for] { font-weight: 600; }\n\
  select { width: 100%; margin-top: 4px; }\n\
  h1 { font-size: 1.05rem; }\n\
  #status { color: #666; font-size: 0.85rem; }\n";

/// The interactive dashboard page for the current selection.
pub fn dashboard_page(
    schema: &MetricSchema,
    selection: &Selection,
    figure: &Value,
) -> Result<String> {
    let figure_json = script_json(figure)?;
    let state_json = script_json(&serde_json::to_value(selection)?)?;

    let mut sidebar = String::new();
    sidebar.push_str(&format!("<h1>\u{1F30E} {}</h1>\n", PAGE_TITLE));
    sidebar.push_str("<form method=\"get\" action=\"/\">\n");

    // View mode.
    sidebar.push_str("<fieldset><legend>Choose View:</legend>\n");
    for (mode, caption) in [
        (ViewMode::Scatter, "\u{1F4C8} Scatterplot"),
        (ViewMode::Choropleth, "\u{1F5FA} Choropleth Map"),
    ] {
        sidebar.push_str(&format!(
            "<label><input type=\"radio\" name=\"view\" value=\"{}\"{} \
             onchange=\"this.form.submit()\"> {}</label><br>\n",
            mode.as_str(),
            checked(selection.view == mode),
            caption,
        ));
    }
    sidebar.push_str("</fieldset>\n");

    // Metric dropdown, options enumerated from the loaded schema.
    sidebar.push_str(
        "<fieldset><label for=\"metric\">Select metric to visualize:</label>\n\
         <select id=\"metric\" name=\"metric\" onchange=\"this.form.submit()\">\n",
    );
    for option in schema.options() {
        sidebar.push_str(&format!(
            "<option value=\"{}\"{}>{}</option>\n",
            escape_html(&option.column),
            if option.column == selection.metric { " selected" } else { "" },
            escape_html(&option.label),
        ));
    }
    sidebar.push_str("</select></fieldset>\n");

    // Scale toggles applicable to the active view.
    sidebar.push_str("<fieldset>\n");
    match selection.view {
        ViewMode::Scatter => {
            sidebar.push_str(&checkbox("logx", "Log scale for X-axis", selection.log_x));
            sidebar.push_str(&checkbox("logy", "Log scale for Y-axis", selection.log_y));
        }
        ViewMode::Choropleth => {
            sidebar.push_str(&checkbox(
                "logc",
                "Log scale for choropleth color",
                selection.log_color,
            ));
        }
    }
    sidebar.push_str("</fieldset>\n<p id=\"status\"></p>\n</form>\n");

    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n\
         <style>\n{style}</style>\n\
         </head>\n<body>\n\
         <nav id=\"sidebar\">\n{sidebar}</nav>\n\
         <main id=\"chart\"></main>\n\
         <script>\n\
         const FIGURE = {figure_json};\n\
         const STATE = {state_json};\n\
         Plotly.newPlot(\"chart\", FIGURE.data, FIGURE.layout, {{responsive: true}});\n\
         document.getElementById(\"status\").textContent = STATE.view + \" \\u00b7 \" + STATE.metric;\n\
         </script>\n</body>\n</html>\n",
        title = PAGE_TITLE,
        cdn = PLOTLY_CDN,
        style = STYLE,
        sidebar = sidebar,
        figure_json = figure_json,
        state_json = state_json,
    ))
}

/// A standalone page for exported figures: no sidebar, same chart plumbing.
pub fn export_page(title: &str, figure: &Value) -> Result<String> {
    let figure_json = script_json(figure)?;
    Ok(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{cdn}\"></script>\n\
         <style>\nbody {{ margin: 0; }}\n#chart {{ width: 100vw; height: 100vh; }}\n</style>\n\
         </head>\n<body>\n<main id=\"chart\"></main>\n\
         <script>\n\
         const FIGURE = {figure_json};\n\
         Plotly.newPlot(\"chart\", FIGURE.data, FIGURE.layout, {{responsive: true}});\n\
         </script>\n</body>\n</html>\n",
        title = escape_html(title),
        cdn = PLOTLY_CDN,
        figure_json = figure_json,
    ))
}

fn checkbox(name: &str, caption: &str, on: bool) -> String {
    format!(
        "<label><input type=\"checkbox\" name=\"{}\" value=\"1\"{} \
         onchange=\"this.form.submit()\"> {}</label><br>\n",
        name,
        checked(on),
        caption,
    )
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

/// JSON safe to inline inside a `<script>` block: `</` must not appear
/// literally or a hostile county name could close the tag.
fn script_json(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Minimal escaping for text interpolated into HTML attributes and bodies.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
