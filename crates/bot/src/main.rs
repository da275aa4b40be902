//! Shroud bot binary.

use anyhow::{Context as _, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serenity::all::{Client, Context, EventHandler, GatewayIntents, Interaction, Ready};
use serenity::async_trait;
use shroud_bot::commands;
use shroud_bot::dispatch::Dispatcher;
use shroud_bot::fetch::HttpFetcher;
use shroud_core::AppConfig;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Shroud - code obfuscation bot
#[derive(Parser, Debug)]
#[command(name = "shroud-bot")]
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

struct Handler {
    dispatcher: Dispatcher,
    guild_id: Option<u64>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        commands::register_commands(&ctx, &ready, self.guild_id).await;
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            if command.data.name == "obf" {
                commands::obf::run(&ctx, &command, &self.dispatcher).await;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Shroud bot v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args.config)?;
    let token = config
        .bot
        .token
        .clone()
        .context("bot token not configured (set bot.token or SHROUD_BOT__TOKEN)")?;

    let handler = Handler {
        dispatcher: Dispatcher::new(Arc::new(HttpFetcher::new()), config.bot.spool_dir.clone()),
        guild_id: config.bot.guild_id,
    };

    // Slash commands arrive over the interactions gateway; no message
    // content intents are needed.
    let mut client = Client::builder(&token, GatewayIntents::empty())
        .event_handler(handler)
        .await
        .context("failed to build Discord client")?;

    client.start().await.context("Discord client error")?;
    Ok(())
}

// Optional TOML file merged with SHROUD_ environment variables; every field
// has a default, so both sources may be absent.
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
