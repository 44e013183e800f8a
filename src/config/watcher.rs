//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself. Editors and
//! mounted config maps replace the file by renaming a new one over it,
//! which would leave a file-level watch attached to the old inode.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::GatewayConfig;

/// Watches the configuration file and emits each successfully reloaded config.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self
            .path
            .file_name()
            .map(OsStr::to_os_string)
            .ok_or_else(|| notify::Error::generic("config path has no file name"))?;
        let dir = watch_dir(&self.path);
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_config_event(&event, &file_name) => {
                    tracing::info!(path = ?path, kind = ?event.kind, "Config file change detected, reloading");
                    match load_config(&path) {
                        Ok(new_config) => {
                            let _ = tx.send(new_config);
                        }
                        Err(e) => {
                            tracing::error!(
                                error = %e,
                                "Failed to reload config, keeping current configuration"
                            );
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Content changes, creations and renames that land on the config file.
fn is_config_event(event: &Event, file_name: &OsString) -> bool {
    let relevant = match event.kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    };
    relevant
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};
    use std::fs;

    #[test]
    fn test_event_filter() {
        let name = OsString::from("gateway.toml");
        let target = PathBuf::from("/etc/gateway/gateway.toml");
        let other = PathBuf::from("/etc/gateway/gateway.toml.tmp");

        let create = Event::new(EventKind::Create(CreateKind::File)).add_path(target.clone());
        assert!(is_config_event(&create, &name));

        let write = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any)))
            .add_path(target.clone());
        assert!(is_config_event(&write, &name));

        let sibling = Event::new(EventKind::Create(CreateKind::File)).add_path(other);
        assert!(!is_config_event(&sibling, &name));

        let chmod = Event::new(EventKind::Modify(ModifyKind::Metadata(MetadataKind::Any)))
            .add_path(target.clone());
        assert!(!is_config_event(&chmod, &name));

        let remove = Event::new(EventKind::Remove(RemoveKind::File)).add_path(target);
        assert!(!is_config_event(&remove, &name));
    }

    #[test]
    fn test_watch_dir_for_bare_file_name() {
        assert_eq!(watch_dir(Path::new("gateway.toml")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/etc/gateway/gateway.toml")),
            PathBuf::from("/etc/gateway")
        );
    }

    async fn wait_for_plugins(
        rx: &mut mpsc::UnboundedReceiver<GatewayConfig>,
        expected: &[&str],
    ) {
        tokio::time::timeout(Duration::from_secs(5), async {
            // Truncate-then-write can surface an intermediate config first.
            while let Some(config) = rx.recv().await {
                if config.plugins == expected {
                    return;
                }
            }
            panic!("watcher channel closed");
        })
        .await
        .unwrap_or_else(|_| panic!("reload to {expected:?} not observed"));
    }

    #[tokio::test]
    async fn test_reload_survives_atomic_replace() {
        let dir = std::env::temp_dir().join(format!("gateway-watch-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("gateway.toml");
        fs::write(&path, "plugins = []\n").unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _guard = watcher.run().unwrap();

        let tmp = dir.join("gateway.toml.tmp");
        fs::write(&tmp, "plugins = [\"auth\"]\n").unwrap();
        fs::rename(&tmp, &path).unwrap();
        wait_for_plugins(&mut rx, &["auth"]).await;

        // The watch must still be live after the rename.
        fs::write(&path, "plugins = [\"auth\", \"cors\"]\n").unwrap();
        wait_for_plugins(&mut rx, &["auth", "cors"]).await;

        let _ = fs::remove_dir_all(&dir);
    }
}
