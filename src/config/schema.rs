//! Configuration schema definitions.
//!
//! This module defines the raw configuration entity for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::config::source::ConfigSource;

/// Root configuration entity for the gateway.
///
/// Produced by the loader and never mutated afterwards. Consumers should
/// go through [`Settings`](crate::config::Settings) rather than reading
/// these fields directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// TCP port the gateway listens on (1-65535).
    pub port: u16,

    /// Gateway-level basic authentication credentials.
    pub basic_auth: BasicAuthConfig,

    /// Upstream host that default traffic is forwarded to.
    pub proxy_host: String,

    /// Enabled plugins, in activation order.
    pub plugins: Vec<String>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            basic_auth: BasicAuthConfig::default(),
            proxy_host: "127.0.0.1:3000".to_string(),
            plugins: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Basic authentication credentials.
///
/// Both fields may be empty when basic auth is disabled upstream.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicAuthConfig {
    pub username: String,
    pub password: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per line for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

impl ConfigSource for GatewayConfig {
    fn port(&self) -> u16 {
        self.port
    }

    fn basic_auth_username(&self) -> &str {
        &self.basic_auth.username
    }

    fn basic_auth_password(&self) -> &str {
        &self.basic_auth.password
    }

    fn proxy_host(&self) -> &str {
        &self.proxy_host
    }

    fn plugins(&self) -> &[String] {
        &self.plugins
    }
}
