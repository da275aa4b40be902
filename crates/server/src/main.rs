//! Shroud server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use shroud_core::AppConfig;
use shroud_server::{create_router, AppState};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Shroud - access-gated code server
#[derive(Parser, Debug)]
#[command(name = "shroudd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SHROUD_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Shroud v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args.config)?;
    let state = AppState::new(config);

    let addr = state.config.server.bind.clone();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, create_router(state))
        .await
        .context("server error")?;
    Ok(())
}

// Optional TOML file merged with SHROUD_ environment variables; every field
// has a default. Running without an api_key is allowed (/code then rejects
// everything), so neither source is mandatory.
fn load_config(path: &str) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if std::path::Path::new(path).exists() {
        tracing::info!(config_path = %path, "loading configuration from file");
        figment = figment.merge(Toml::file(path));
    } else {
        tracing::debug!("no config file found at {path}");
    }
    figment
        .merge(Env::prefixed("SHROUD_").split("__"))
        .extract()
        .context("failed to load configuration")
}
