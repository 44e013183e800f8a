//! The configuration facade handed to every gateway subsystem.
//!
//! `Settings` is built once at startup and passed around by value (it is a
//! cheap `Arc` clone). It never mutates; hot reload replaces the whole
//! facade through [`SettingsHandle`](crate::config::SettingsHandle).

use std::sync::Arc;

use thiserror::Error;

use crate::config::dump;
use crate::config::schema::GatewayConfig;
use crate::config::source::ConfigSource;

/// Errors raised while constructing the facade.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// No configuration source was supplied.
    #[error("no configuration source available: {0}")]
    MissingSource(String),
}

/// Read-only facade over a [`ConfigSource`].
#[derive(Debug, Clone)]
pub struct Settings {
    source: Arc<dyn ConfigSource>,
}

impl Settings {
    /// Wrap an existing source.
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self { source }
    }

    /// Wrap a freshly loaded configuration entity.
    pub fn from_config(config: GatewayConfig) -> Self {
        Self::new(Arc::new(config))
    }

    /// Wrap a source that may be absent, failing immediately if it is.
    ///
    /// `origin` names where the source was expected to come from and ends up
    /// in the error message.
    pub fn try_from_source(
        source: Option<Arc<dyn ConfigSource>>,
        origin: &str,
    ) -> Result<Self, SettingsError> {
        source
            .map(Self::new)
            .ok_or_else(|| SettingsError::MissingSource(origin.to_string()))
    }

    /// Whether gateway-level basic auth is configured.
    pub fn basic_auth_enabled(&self) -> bool {
        dump::basic_auth_enabled(self.source.as_ref())
    }

    /// JSON-friendly redacted snapshot.
    pub fn summary(&self) -> dump::DumpSummary {
        dump::DumpSummary::from_source(self.source.as_ref())
    }
}

impl ConfigSource for Settings {
    fn port(&self) -> u16 {
        self.source.port()
    }

    fn basic_auth_username(&self) -> &str {
        self.source.basic_auth_username()
    }

    fn basic_auth_password(&self) -> &str {
        self.source.basic_auth_password()
    }

    fn proxy_host(&self) -> &str {
        self.source.proxy_host()
    }

    fn plugins(&self) -> &[String] {
        self.source.plugins()
    }

    fn plugin_exists(&self, name: &str) -> bool {
        self.source.plugin_exists(name)
    }

    fn dump(&self) -> String {
        self.source.dump()
    }
}
