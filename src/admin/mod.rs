//! Admin and health HTTP surface.
//!
//! `/health` is always open. Everything under `/admin` requires the
//! gateway's basic auth credentials when they are configured.

pub mod auth;
pub mod handlers;

use std::future::Future;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::config::SettingsHandle;

/// State injected into admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub settings: SettingsHandle,
}

pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin/config", get(get_config))
        .route("/admin/config/dump", get(get_dump))
        .route("/admin/plugins", get(get_plugins))
        .route("/admin/plugins/{name}", get(get_plugin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ))
        .route("/health", get(get_health))
        .layer(middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the admin router until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AdminState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin server starting");

    axum::serve(listener, setup_admin_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Admin server stopped");
    Ok(())
}
