// GET handler for the telemetry snapshot, plus the JSON 404 fallback.
// Per-request logging is deliberately absent; probes are fast and a log
// line per poll is pure noise.

use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};

use super::AppState;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// GET /sysinfo — fresh snapshot on every call, never cached, readable
/// cross-origin. Always 200: absent probe values serialize as null.
pub(super) async fn sysinfo_handler(State(state): State<AppState>) -> Response {
    let snapshot = state.probes.snapshot().await;
    (
        [
            (header::CONTENT_TYPE, JSON_UTF8),
            (header::CACHE_CONTROL, "no-store"),
        ],
        axum::Json(snapshot),
    )
        .into_response()
}

/// Dispatch is by path prefix: any `/sysinfo*` path serves the snapshot,
/// everything else gets a JSON 404.
pub(super) async fn fallback_handler(State(state): State<AppState>, uri: Uri) -> Response {
    if uri.path().starts_with("/sysinfo") {
        return sysinfo_handler(State(state)).await;
    }
    (
        StatusCode::NOT_FOUND,
        [
            (header::CONTENT_TYPE, JSON_UTF8),
            (header::CACHE_CONTROL, "no-store"),
        ],
        axum::Json(serde_json::json!({ "error": "not found" })),
    )
        .into_response()
}
