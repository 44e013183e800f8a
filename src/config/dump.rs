//! Diagnostics export of the effective configuration.
//!
//! Two renderings share one redaction policy: neither credential is ever
//! included, only whether basic auth is enabled.
//!
//! ```text
//! port: 8080
//! proxy_host: upstream.internal
//! basic_auth: enabled
//! plugins: [auth, rate-limit, logging]
//! ```

use std::fmt::Write;

use serde::Serialize;

use crate::config::source::ConfigSource;

/// Render the human-readable dump for a configuration source.
pub fn render<S: ConfigSource + ?Sized>(source: &S) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "port: {}", source.port());
    let _ = writeln!(out, "proxy_host: {}", source.proxy_host());
    let auth = if basic_auth_enabled(source) { "enabled" } else { "disabled" };
    let _ = writeln!(out, "basic_auth: {auth}");
    let _ = write!(out, "plugins: [{}]", source.plugins().join(", "));

    out
}

/// Basic auth counts as enabled once either credential is configured.
pub fn basic_auth_enabled<S: ConfigSource + ?Sized>(source: &S) -> bool {
    !source.basic_auth_username().is_empty() || !source.basic_auth_password().is_empty()
}

/// Machine-friendly counterpart of [`render`] for JSON consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpSummary {
    pub port: u16,
    pub proxy_host: String,
    pub basic_auth_enabled: bool,
    pub plugins: Vec<String>,
}

impl DumpSummary {
    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Self {
        Self {
            port: source.port(),
            proxy_host: source.proxy_host().to_string(),
            basic_auth_enabled: basic_auth_enabled(source),
            plugins: source.plugins().to_vec(),
        }
    }
}
