//! HTTP surface: a single `GET /current-track` endpoint.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::clients::LastFmClient;
use crate::now_playing::fetch_current_track;

const NOT_FOUND_MESSAGE: &str = "No track information available.";
const UPSTREAM_FAILURE_MESSAGE: &str = "Error fetching track details.";

/// Query string accepted by `/current-track`.
///
/// `page` is kept as raw text so a malformed value never turns into a
/// rejection; see [`CurrentTrackParams::page`].
#[derive(Deserialize, Debug, Default)]
pub struct CurrentTrackParams {
    /// Page of the recent-tracks history to read, starting at 1.
    pub page: Option<String>,
}

impl CurrentTrackParams {
    /// Requested page, 1 when missing or unparseable, clamped to at least 1.
    pub fn page(&self) -> u32 {
        let requested = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
    }
}

/// Build the application router around a shared Last.fm client.
pub fn router(client: Arc<LastFmClient>) -> Router {
    Router::new()
        .route("/current-track", get(current_track))
        .with_state(client)
}

/// Serve the router on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, client: Arc<LastFmClient>) -> std::io::Result<()> {
    let port = listener.local_addr()?.port();
    info!("Server running at http://localhost:{port}");
    axum::serve(listener, router(client))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn current_track(
    State(client): State<Arc<LastFmClient>>,
    Query(params): Query<CurrentTrackParams>,
) -> Response {
    match fetch_current_track(&client, params.page()).await {
        Ok(Some(details)) => Json(details).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
        Err(e) => {
            error!("Error fetching track details: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE)
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
