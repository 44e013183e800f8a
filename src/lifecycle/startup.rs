//! Startup orchestration.
//!
//! Load the configuration entity, wrap it in the `Settings` facade, then
//! bring up observability, hot reload and the admin listener in that order.
//! Any failure aborts startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::admin::{self, AdminState};
use crate::config::{
    load_config, ConfigError, ConfigSource, ConfigWatcher, ObservabilityConfig, Settings,
    SettingsError, SettingsHandle,
};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Hint shown when no configuration source was given.
pub const MISSING_SOURCE_HINT: &str = "pass --config <path> or set GATEWAY_CONFIG";

/// Errors that abort gateway startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to watch configuration file: {0}")]
    Watch(#[from] notify::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Facade plus the process-level settings that stay outside it.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub observability: ObservabilityConfig,
}

/// Load the configuration at `path` and build the facade.
///
/// A missing path fails here rather than producing a default view.
pub fn load_settings(path: Option<&Path>) -> Result<LoadedSettings, StartupError> {
    let config = path.map(load_config).transpose()?;
    let observability = config
        .as_ref()
        .map(|c| c.observability.clone())
        .unwrap_or_default();
    let source = config.map(|c| Arc::new(c) as Arc<dyn ConfigSource>);
    let settings = Settings::try_from_source(source, MISSING_SOURCE_HINT)?;

    Ok(LoadedSettings {
        settings,
        observability,
    })
}

/// Run the gateway's admin surface until SIGINT/SIGTERM.
pub async fn serve(path: &Path, loaded: LoadedSettings) -> Result<(), StartupError> {
    let LoadedSettings {
        settings,
        observability,
    } = loaded;

    if observability.metrics_enabled {
        match observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics endpoint");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    tracing::info!(
        port = settings.port(),
        proxy_host = %settings.proxy_host(),
        basic_auth = settings.basic_auth_enabled(),
        plugins = settings.plugins().len(),
        "Configuration loaded"
    );
    tracing::info!("Effective configuration:\n{}", settings.dump());
    if settings.basic_auth_username().is_empty() && settings.basic_auth_enabled() {
        tracing::warn!(
            "Basic auth password set without a username, clients must send an empty username"
        );
    }

    let port = settings.port();
    let handle = SettingsHandle::new(settings);

    let (watcher, updates) = ConfigWatcher::new(path);
    let _watcher = watcher.run()?;
    tokio::spawn(handle.clone().apply_updates(updates));

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).await?;

    let shutdown = Shutdown::new();
    let stopped = shutdown.signalled();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    admin::serve(listener, AdminState { settings: handle }, stopped).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_fails_fast() {
        let err = load_settings(None).unwrap_err();
        assert!(matches!(err, StartupError::Settings(SettingsError::MissingSource(_))));
        assert!(err.to_string().contains("GATEWAY_CONFIG"));
    }

    #[test]
    fn test_unreadable_path_is_config_error() {
        let err = load_settings(Some(Path::new("/no/such/gateway.toml"))).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Io(_))));
    }

    #[test]
    fn test_loads_from_file() {
        let path = std::env::temp_dir().join(format!("gateway-startup-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "port = 9100\nplugins = [\"auth\"]\n[observability]\nlog_level = \"warn\"\n",
        )
        .unwrap();

        let loaded = load_settings(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.settings.port(), 9100);
        assert!(loaded.settings.plugin_exists("auth"));
        assert_eq!(loaded.observability.log_level, "warn");
    }
}
