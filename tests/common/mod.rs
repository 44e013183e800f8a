//! Shared helpers for integration tests.

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use base64::Engine;
use tower::ServiceExt;

use api_gateway::admin::{setup_admin_router, AdminState};
use api_gateway::config::{BasicAuthConfig, GatewayConfig, Settings, SettingsHandle};

/// The reference configuration used across integration tests.
pub fn scenario_config() -> GatewayConfig {
    GatewayConfig {
        port: 8080,
        basic_auth: BasicAuthConfig {
            username: "admin".into(),
            password: "secret".into(),
        },
        proxy_host: "upstream.internal".into(),
        plugins: vec!["auth".into(), "rate-limit".into(), "logging".into()],
        ..Default::default()
    }
}

/// Build an admin router over `config`, returning the handle for reloads.
#[allow(dead_code)]
pub fn admin_app(config: GatewayConfig) -> (Router, SettingsHandle) {
    let handle = SettingsHandle::new(Settings::from_config(config));
    let router = setup_admin_router(AdminState {
        settings: handle.clone(),
    });
    (router, handle)
}

/// Send a GET through the router, optionally with basic credentials.
#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str, creds: Option<(&str, &str)>) -> Response<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some((user, pass)) = creds {
        let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{user}:{pass}"));
        builder = builder.header(header::AUTHORIZATION, format!("Basic {encoded}"));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
