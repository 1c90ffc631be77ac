//! HTTP surface of the bridge.
//!
//! Four operations, all JSON:
//!
//! - `GET /status` - reader and scan state, never blocks
//! - `GET /scan` - start a scan (or attach to the one in flight) and wait
//!   for the result
//! - `POST /scan` - start a scan without waiting
//! - `GET /poll` - wait for the pending result only
//!
//! Unknown paths answer HTTP 200 with an `Unknown endpoint` body. The
//! original bridge shipped that contract and the frontend relies on the
//! body rather than the status code, so it is preserved as-is.

use crate::coordinator::ScanCoordinator;
use crate::domain::config::BridgeConfig;
use crate::domain::error::BridgeError;
use crate::domain::types::{
    AckResponse, ScanResponse, StatusResponse, UnknownEndpointResponse,
};
use crate::middleware::create_cors_layer;
use axum::extract::State;
use axum::http::Uri;
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Paths listed in the unknown-endpoint body.
pub const AVAILABLE_ENDPOINTS: [&str; 3] = ["/status", "/scan", "/poll"];

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<ScanCoordinator>,
    /// Upper bound on how long `/scan` and `/poll` may hold a connection.
    pub wait_timeout: Duration,
}

/// Build the bridge router with CORS applied to every response.
pub fn build_router(coordinator: Arc<ScanCoordinator>, config: &BridgeConfig) -> Router {
    let state = AppState {
        coordinator,
        wait_timeout: config.wait_timeout(),
    };

    Router::new()
        .route("/status", get(status))
        .route("/scan", get(scan_and_wait).post(start_scan))
        .route("/poll", get(poll))
        .fallback(unknown_endpoint)
        .layer(create_cors_layer())
        .with_state(state)
}

async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let status = state.coordinator.status();
    Json(StatusResponse {
        status: "running",
        nfc_available: status.reader_ready,
        nfc_message: status.reader_message,
        is_scanning: status.is_scanning,
    })
}

/// Synchronous convenience: start (or attach to) a scan, then wait.
async fn scan_and_wait(State(state): State<AppState>) -> Json<ScanResponse> {
    match state.coordinator.start_scan() {
        // AlreadyScanning means someone else started one; attach to it.
        // ResultPending means an outcome is already waiting; take it.
        Ok(()) | Err(BridgeError::AlreadyScanning) | Err(BridgeError::ResultPending) => {}
        Err(e) => return Json(ScanResponse::from_error(&e)),
    }

    match state.coordinator.take_result(state.wait_timeout).await {
        Some(outcome) => Json(ScanResponse::from_outcome(outcome)),
        None => Json(ScanResponse::from_error(&BridgeError::PollTimeout)),
    }
}

/// Non-blocking start; clients follow up with `GET /poll`.
async fn start_scan(State(state): State<AppState>) -> Json<AckResponse> {
    match state.coordinator.start_scan() {
        Ok(()) => Json(AckResponse::accepted("Scan started")),
        Err(e) => Json(AckResponse::rejected(&e)),
    }
}

async fn poll(State(state): State<AppState>) -> Json<ScanResponse> {
    match state.coordinator.take_result(state.wait_timeout).await {
        Some(outcome) => Json(ScanResponse::from_outcome(outcome)),
        None => Json(ScanResponse::from_error(&BridgeError::PollTimeout)),
    }
}

/// HTTP 200 on purpose; see the module docs.
async fn unknown_endpoint(uri: Uri) -> Json<UnknownEndpointResponse> {
    debug!(path = %uri.path(), "unknown endpoint requested");
    Json(UnknownEndpointResponse {
        error: "Unknown endpoint",
        available_endpoints: AVAILABLE_ENDPOINTS,
    })
}
