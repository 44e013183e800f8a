//! Read capability over gateway-wide settings.

use std::fmt::Debug;

use crate::config::dump;

/// Read-only view of the gateway configuration.
///
/// Every subsystem that needs a setting depends on this trait rather than
/// on a concrete loader type, so alternate sources (test doubles, remote
/// config) can be substituted without touching consumers.
///
/// Implementors only provide the raw accessors. Plugin membership and the
/// diagnostics dump are derived from them.
pub trait ConfigSource: Debug + Send + Sync {
    /// Listen port. Assumed valid by the time it reaches this layer.
    fn port(&self) -> u16;

    /// Basic auth username, verbatim. Empty when unset.
    fn basic_auth_username(&self) -> &str;

    /// Basic auth password, verbatim. Empty when unset.
    fn basic_auth_password(&self) -> &str;

    /// Upstream host, verbatim.
    fn proxy_host(&self) -> &str;

    /// Enabled plugins in declaration order, duplicates included.
    fn plugins(&self) -> &[String];

    /// Whether `name` is one of [`plugins`](Self::plugins). Exact, case-sensitive.
    fn plugin_exists(&self, name: &str) -> bool {
        self.plugins().iter().any(|p| p == name)
    }

    /// Human-readable snapshot of the effective configuration.
    ///
    /// Never contains the basic auth password.
    fn dump(&self) -> String {
        dump::render(self)
    }
}
