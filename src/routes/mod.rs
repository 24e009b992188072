// HTTP routes

mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::probes::ProbeRepo;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) probes: Arc<ProbeRepo>,
}

pub fn app(probes: Arc<ProbeRepo>) -> Router {
    let state = AppState { probes };
    Router::new()
        .route("/sysinfo", get(http::sysinfo_handler)) // GET /sysinfo
        .fallback(http::fallback_handler)
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
