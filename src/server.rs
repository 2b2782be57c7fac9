//! HTTP chart server.
//!
//! Every request, whatever its method or path, gets the bar chart of the two
//! startup datasets. The datasets are shared read-only; nothing is cached
//! between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::json;

use crate::chart::{self, ChartSpec};
use crate::error::Error;
use crate::models::Comparison;

/// Read-only state behind every request.
#[derive(Debug, Clone)]
pub struct AppState {
    pub comparison: Comparison,
    pub category: String,
    pub chart: ChartSpec,
}

impl AppState {
    pub fn new(comparison: Comparison, category: impl Into<String>) -> Self {
        let category = category.into();
        Self {
            chart: ChartSpec::for_category(&category),
            comparison,
            category,
        }
    }

    /// Same state with the chart drawn at `width_px` x `height_px`.
    pub fn with_chart_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.chart.width_px = width_px;
        self.chart.height_px = height_px;
        self
    }

    /// Filter both datasets and render the chart.
    pub fn render_chart(&self) -> crate::error::Result<Vec<u8>> {
        let bars = chart::bars_for(&self.category, &self.comparison.datasets());
        chart::render_png(&bars, &self.chart)
    }
}

/// Failure of a chart request.
#[derive(Debug)]
pub enum ServeError {
    Chart(Error),
    Join(String),
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let msg = match &self {
            Self::Chart(e) => e.to_string(),
            Self::Join(msg) => format!("render task failed: {msg}"),
        };
        log::error!("chart request failed: {}", msg);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": msg })),
        )
            .into_response()
    }
}

/// The single route, plus a fallback so every other path behaves the same.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(serve_chart))
        .fallback(serve_chart)
        .with_state(state)
}

async fn serve_chart(State(state): State<Arc<AppState>>) -> Result<Response, ServeError> {
    let png = tokio::task::spawn_blocking(move || state.render_chart())
        .await
        .map_err(|e| ServeError::Join(e.to_string()))?
        .map_err(ServeError::Chart)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// Bind `addr` and serve forever.
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();
    println!("Server started at http://localhost:{port}");
    log::info!("listening on {}", addr);
    axum::serve(listener, router(Arc::new(state))).await
}
