//! Atomically swappable settings for hot reload.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::mpsc;

use crate::config::facade::Settings;
use crate::config::schema::GatewayConfig;
use crate::config::source::ConfigSource;
use crate::observability::metrics;

/// Shared handle to the current [`Settings`].
///
/// Readers take a snapshot with [`load`](Self::load); a snapshot never
/// changes even if a reload lands while it is held.
#[derive(Clone)]
pub struct SettingsHandle {
    current: Arc<ArcSwap<Settings>>,
}

impl SettingsHandle {
    pub fn new(settings: Settings) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(settings)),
        }
    }

    /// Snapshot of the current settings.
    pub fn load(&self) -> Arc<Settings> {
        self.current.load_full()
    }

    /// Replace the current settings.
    pub fn store(&self, settings: Settings) {
        metrics::record_plugins_enabled(settings.plugins().len());
        self.current.store(Arc::new(settings));
    }

    /// Apply configuration updates until the sender side closes.
    pub async fn apply_updates(self, mut updates: mpsc::UnboundedReceiver<GatewayConfig>) {
        while let Some(config) = updates.recv().await {
            let settings = Settings::from_config(config);
            tracing::info!(
                port = settings.port(),
                proxy_host = %settings.proxy_host(),
                plugins = ?settings.plugins(),
                "Configuration reloaded"
            );
            if settings.port() != self.load().port() {
                tracing::warn!("Port changes take effect after restart");
            }
            self.store(settings);
            metrics::record_config_reload();
        }
        tracing::debug!("Config update channel closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_plugins(plugins: &[&str]) -> GatewayConfig {
        GatewayConfig {
            plugins: plugins.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_does_not_affect_existing_snapshot() {
        let handle = SettingsHandle::new(Settings::from_config(with_plugins(&["auth"])));
        let before = handle.load();

        handle.store(Settings::from_config(with_plugins(&["cors"])));

        assert!(before.plugin_exists("auth"));
        assert!(!before.plugin_exists("cors"));
        assert!(handle.load().plugin_exists("cors"));
    }

    #[tokio::test]
    async fn test_apply_updates() {
        let handle = SettingsHandle::new(Settings::from_config(with_plugins(&[])));
        let (tx, rx) = mpsc::unbounded_channel();

        tx.send(with_plugins(&["auth", "logging"])).unwrap();
        drop(tx);

        handle.clone().apply_updates(rx).await;

        assert_eq!(handle.load().plugins(), ["auth", "logging"]);
    }
}
