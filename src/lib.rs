//! API gateway configuration core.
//!
//! Exposes gateway-wide settings through the [`Settings`] facade, which
//! every subsystem receives by injection instead of reading the raw
//! configuration entity.

pub mod admin;
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{ConfigSource, GatewayConfig, Settings, SettingsHandle};
pub use lifecycle::Shutdown;
