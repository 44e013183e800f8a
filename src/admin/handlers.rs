use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Path, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde::Serialize;

use crate::admin::AdminState;
use crate::config::{ConfigSource, DumpSummary};
use crate::observability::metrics;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Serialize)]
pub struct PluginStatus {
    pub name: String,
    pub enabled: bool,
}

pub async fn get_health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_config(State(state): State<AdminState>) -> Json<DumpSummary> {
    Json(state.settings.load().summary())
}

pub async fn get_dump(State(state): State<AdminState>) -> String {
    state.settings.load().dump()
}

pub async fn get_plugins(State(state): State<AdminState>) -> Json<Vec<String>> {
    Json(state.settings.load().plugins().to_vec())
}

pub async fn get_plugin(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> (StatusCode, Json<PluginStatus>) {
    let enabled = state.settings.load().plugin_exists(&name);
    let status = if enabled {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    };
    (status, Json(PluginStatus { name, enabled }))
}

/// Record request count and latency per matched route.
pub async fn track_metrics(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    metrics::record_admin_request(&path, response.status().as_u16(), start);
    response
}
