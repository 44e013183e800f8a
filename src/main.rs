//! API gateway bootstrap.
//!
//! # Architecture Overview
//!
//! ```text
//!   gateway.toml ──▶ loader ──▶ GatewayConfig ──▶ Settings (facade)
//!                                                     │
//!          ┌──────────────────────────────────────────┼──────────────────┐
//!          ▼                                          ▼                  ▼
//!   admin surface                              startup logging     SettingsHandle
//!   /health, /admin/config, /admin/plugins     (dump, tracing)     (hot reload)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use api_gateway::config::ConfigSource;
use api_gateway::lifecycle::{self, LoadedSettings};
use api_gateway::observability::logging;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "api-gateway")]
#[command(about = "API gateway configuration bootstrap", long_about = None)]
struct Cli {
    /// Path to the gateway configuration file (TOML).
    #[arg(short, long, global = true, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the gateway admin and health surface
    Serve,
    /// Print the effective configuration (password redacted)
    Dump,
    /// List enabled plugins in activation order
    Plugins,
    /// Check whether a plugin is enabled (exit code 1 when it is not)
    CheckPlugin {
        /// Plugin name, matched exactly
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let loaded = lifecycle::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            logging::init_logging(&loaded.observability)?;
            tracing::info!("api-gateway v{} starting", env!("CARGO_PKG_VERSION"));

            // load_settings already rejected a missing path.
            let path = cli.config.unwrap_or_default();
            lifecycle::serve(&path, loaded).await?;

            tracing::info!("Shutdown complete");
        }
        Commands::Dump => println!("{}", loaded.settings.dump()),
        Commands::Plugins => print_plugins(&loaded),
        Commands::CheckPlugin { name } => {
            if loaded.settings.plugin_exists(&name) {
                println!("enabled");
            } else {
                println!("disabled");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_plugins(loaded: &LoadedSettings) {
    for plugin in loaded.settings.plugins() {
        println!("{plugin}");
    }
}
