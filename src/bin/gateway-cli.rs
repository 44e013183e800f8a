use clap::{Parser, Subcommand};
use reqwest::RequestBuilder;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Management CLI for the API gateway admin surface", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Basic auth username
    #[arg(long, env = "GATEWAY_USER")]
    user: Option<String>,

    /// Basic auth password
    #[arg(long, env = "GATEWAY_PASSWORD")]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check gateway health
    Health,
    /// Show the redacted configuration summary
    Config,
    /// Show the human-readable configuration dump
    Dump,
    /// List enabled plugins
    Plugins,
    /// Check whether a single plugin is enabled
    Plugin { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, text) = match &cli.command {
        Commands::Health => ("/health".to_string(), false),
        Commands::Config => ("/admin/config".to_string(), false),
        Commands::Dump => ("/admin/config/dump".to_string(), true),
        Commands::Plugins => ("/admin/plugins".to_string(), false),
        Commands::Plugin { name } => (format!("/admin/plugins/{name}"), false),
    };

    let req = authorize(client.get(format!("{}{}", cli.url, path)), &cli);
    let res = req.send().await?;
    print_response(res, text).await
}

fn authorize(req: RequestBuilder, cli: &Cli) -> RequestBuilder {
    match &cli.user {
        Some(user) => req.basic_auth(user, cli.password.as_deref()),
        None => req,
    }
}

async fn print_response(res: reqwest::Response, text: bool) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
        eprintln!("Error: admin API returned status {}", status);
        if let Ok(body) = res.text().await {
            eprintln!("Response: {}", body);
        }
        return Ok(());
    }

    if text {
        println!("{}", res.text().await?);
    } else {
        let json: Value = res.json().await?;
        println!("{}", serde_json::to_string_pretty(&json)?);
    }
    Ok(())
}
