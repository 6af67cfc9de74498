//! Request/response host for the dashboard.
//!
//! Single-threaded: each widget change is a plain GET that re-renders the
//! active view synchronously from the immutable, process-lifetime `Dataset`.
//! There is no background work and no shared mutable state.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use serde_json::Value;
use tiny_http::{Header, Response, Server};

use crate::data::Dataset;
use crate::page;
use crate::view::{Selection, ViewMode, choropleth_figure, scatter_figure};

pub struct ServeOptions {
    pub port: u16,
    pub open: bool,
}

/// Dispatch the active view's renderer. Pure: no state outside the
/// arguments.
pub fn render(dataset: &Dataset, selection: &Selection) -> Result<Value> {
    match selection.view {
        ViewMode::Scatter => scatter_figure(dataset, selection),
        ViewMode::Choropleth => choropleth_figure(dataset, selection),
    }
}

/// Serve the dashboard until the process is killed.
pub fn serve(dataset: Arc<Dataset>, options: &ServeOptions) -> Result<()> {
    let addr = format!("0.0.0.0:{}", options.port);
    let server = Server::http(&addr)
        .map_err(|err| anyhow!("[server] failed to bind {}: {}", addr, err))?;

    let url = format!("http://localhost:{}", options.port);
    log::info!("[server] dashboard at {}", url);
    if options.open {
        if let Err(err) = webbrowser::open(&url) {
            log::warn!("[server] could not open browser: {}; open {} manually", err, url);
        }
    }

    for request in server.incoming_requests() {
        let response = match route(&dataset, request.url()) {
            Ok(response) => response,
            Err(err) => {
                // Render failures at this point are data problems, not
                // configuration errors; keep serving.
                log::error!("[server] {} -> {:#}", request.url(), err);
                Response::from_string(format!("render failed: {err:#}")).with_status_code(500)
            }
        };
        if let Err(err) = request.respond(response) {
            log::warn!("[server] failed to send response: {}", err);
        }
    }
    Ok(())
}

fn route(dataset: &Dataset, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    match path {
        "/" => {
            let selection = Selection::from_query(query, &dataset.schema);
            let figure = render(dataset, &selection)?;
            let body = page::dashboard_page(&dataset.schema, &selection, &figure)?;
            Ok(html(body))
        }
        "/healthz" => Ok(Response::from_string("ok")),
        _ => Ok(Response::from_string("not found").with_status_code(404)),
    }
}

fn html(body: String) -> Response<Cursor<Vec<u8>>> {
    let mut response = Response::from_string(body);
    if let Ok(header) = Header::from_bytes("Content-Type", "text/html; charset=utf-8") {
        response.add_header(header);
    }
    response
}
