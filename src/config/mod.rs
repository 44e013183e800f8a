//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, port range check)
//!     → GatewayConfig (raw entity, immutable)
//!     → Settings facade (ConfigSource capability)
//!     → shared by clone to all subsystems
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → reload.rs swaps a fresh Settings into the SettingsHandle
//!     → subsystems observe it on their next snapshot
//! ```
//!
//! # Design Decisions
//! - Consumers depend on `ConfigSource`, never on the loader's types
//! - Settings are immutable; reload replaces the whole facade
//! - Plugin names are neither deduplicated nor checked against a registry

pub mod dump;
pub mod facade;
pub mod loader;
pub mod reload;
pub mod schema;
pub mod source;
pub mod watcher;

pub use dump::DumpSummary;
pub use facade::{Settings, SettingsError};
pub use loader::{load_config, parse_config, ConfigError};
pub use reload::SettingsHandle;
pub use schema::{BasicAuthConfig, GatewayConfig, LogFormat, ObservabilityConfig};
pub use source::ConfigSource;
pub use watcher::ConfigWatcher;
